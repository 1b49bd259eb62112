use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::command::{CommandRunner, CommandSpec};
use crate::config::{Config, GitHubPagesConfig};
use crate::deploy::{Deployment, SiteDeployer, run_cli};
use crate::error::Error;

pub struct GitHubPages {
    config: GitHubPagesConfig,
    project_root: PathBuf,
    timeout: Duration,
}

impl GitHubPages {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.github.clone(),
            project_root: config.project_root.clone(),
            timeout: config.command_timeout,
        }
    }
}

#[async_trait]
impl SiteDeployer for GitHubPages {
    fn name(&self) -> &str {
        "GitHub Pages"
    }

    // gh-pages pushes with the local git credentials; GH_TOKEN is optional
    fn check_credentials(&self) -> Result<(), Error> {
        Ok(())
    }

    fn prepare(&self, dist: &Path) -> Result<(), Error> {
        // Serve assets verbatim instead of through Jekyll
        fs::write(dist.join(".nojekyll"), "")?;

        // SPA fallback: unknown paths render the app shell
        let index = dist.join("index.html");
        if index.is_file() {
            fs::copy(&index, dist.join("404.html"))?;
        } else {
            debug!("No index.html in {}, skipping 404 fallback", dist.display());
        }

        if let Some(cname) = &self.config.cname {
            fs::write(dist.join("CNAME"), format!("{cname}\n"))?;
        }
        Ok(())
    }

    async fn publish(&self, dist: &Path, runner: &dyn CommandRunner) -> Result<Deployment, Error> {
        let spec = CommandSpec::npx(&self.project_root)
            .args(["gh-pages", "-d"])
            .arg(dist.display().to_string())
            // without it .nojekyll is left out of the pushed branch
            .arg("--dotfiles")
            .env_opt("GH_TOKEN", self.config.token.as_ref());
        run_cli(runner, &spec, self.timeout).await?;
        Ok(Deployment {
            url: Some(format!(
                "https://{}.github.io/{}",
                self.config.username, self.config.repo_name
            )),
        })
    }
}
