use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::{CommandRunner, CommandSpec};
use crate::config::{CloudflareConfig, Config};
use crate::deploy::{Deployment, SiteDeployer, run_cli, url};
use crate::error::{Error, require};

pub struct CloudflarePages {
    config: CloudflareConfig,
    project_root: PathBuf,
    timeout: Duration,
}

impl CloudflarePages {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.cloudflare.clone(),
            project_root: config.project_root.clone(),
            timeout: config.command_timeout,
        }
    }

    fn command(&self, dist: &Path) -> Result<CommandSpec, Error> {
        let account_id = require(&self.config.account_id, "CLOUDFLARE_ACCOUNT_ID")?;
        Ok(CommandSpec::npx(&self.project_root)
            .args(["wrangler", "pages", "deploy"])
            .arg(dist.display().to_string())
            .args(["--project-name", self.config.project_name.as_str()])
            .arg("--commit-dirty=true")
            .env("CLOUDFLARE_ACCOUNT_ID", account_id)
            .env_opt("CLOUDFLARE_API_KEY", self.config.api_key.as_ref())
            .env_opt("CLOUDFLARE_EMAIL", self.config.email.as_ref()))
    }
}

#[async_trait]
impl SiteDeployer for CloudflarePages {
    fn name(&self) -> &str {
        "Cloudflare Pages"
    }

    fn check_credentials(&self) -> Result<(), Error> {
        require(&self.config.account_id, "CLOUDFLARE_ACCOUNT_ID").map(|_| ())
    }

    async fn publish(&self, dist: &Path, runner: &dyn CommandRunner) -> Result<Deployment, Error> {
        let output = run_cli(runner, &self.command(dist)?, self.timeout).await?;
        let url = url::pages_url(&output.combined())
            .unwrap_or_else(|| format!("https://{}.pages.dev", self.config.project_name));
        Ok(Deployment { url: Some(url) })
    }
}
