use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::command::{CommandRunner, CommandSpec};
use crate::config::{Config, NetlifyConfig};
use crate::deploy::{Deployment, SiteDeployer, run_cli, url};
use crate::error::{Error, require};

pub struct Netlify {
    config: NetlifyConfig,
    project_root: PathBuf,
    timeout: Duration,
}

impl Netlify {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.netlify.clone(),
            project_root: config.project_root.clone(),
            timeout: config.command_timeout,
        }
    }

    fn command(&self, dist: &Path) -> Result<CommandSpec, Error> {
        let token = require(&self.config.auth_token, "NETLIFY_AUTH_TOKEN")?;
        let mut spec = CommandSpec::npx(&self.project_root)
            .args(["netlify-cli", "deploy", "--dir"])
            .arg(dist.display().to_string())
            .args(["--prod", "--json", "--auth", token]);
        if let Some(site_id) = &self.config.site_id {
            spec = spec.args(["--site", site_id.as_str()]);
        }
        Ok(spec
            .env("NETLIFY_AUTH_TOKEN", token)
            .env_opt("NETLIFY_SITE_ID", self.config.site_id.as_ref()))
    }
}

#[async_trait]
impl SiteDeployer for Netlify {
    fn name(&self) -> &str {
        "Netlify"
    }

    fn check_credentials(&self) -> Result<(), Error> {
        require(&self.config.auth_token, "NETLIFY_AUTH_TOKEN").map(|_| ())
    }

    async fn publish(&self, dist: &Path, runner: &dyn CommandRunner) -> Result<Deployment, Error> {
        let output = run_cli(runner, &self.command(dist)?, self.timeout).await?;
        let url = url::netlify_url(&output.stdout);
        if url.is_none() {
            warn!("Could not read the deploy URL from the Netlify CLI output");
        }
        Ok(Deployment { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockCommandRunner;
    use crate::command::mock::output;
    use crate::config::mock::config_with;

    #[tokio::test]
    async fn test_publish_uses_json_output() {
        let config = config_with(&[
            ("PROJECT_ROOT", "/srv/site"),
            ("NETLIFY_AUTH_TOKEN", "nf-token"),
            ("NETLIFY_SITE_ID", "site-1"),
        ]);
        let deployer = Netlify::new(&config);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec, timeout| {
                spec.args
                    == [
                        "netlify-cli",
                        "deploy",
                        "--dir",
                        "/srv/site/dist",
                        "--prod",
                        "--json",
                        "--auth",
                        "nf-token",
                        "--site",
                        "site-1",
                    ]
                    && *timeout == Duration::from_secs(300)
            })
            .returning(|_, _| {
                Ok(output(
                    true,
                    r#"{"deploy_url": "https://1a--pixel-os.netlify.app", "url": "https://pixel-os.netlify.app"}"#,
                ))
            });

        let deployment = deployer
            .publish(Path::new("/srv/site/dist"), &runner)
            .await
            .unwrap();
        assert_eq!(deployment.url.as_deref(), Some("https://pixel-os.netlify.app"));
    }

    #[tokio::test]
    async fn test_publish_without_site_id() {
        let config = config_with(&[("NETLIFY_AUTH_TOKEN", "nf-token")]);
        let deployer = Netlify::new(&config);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec, _| !spec.args.iter().any(|a| a == "--site"))
            .returning(|_, _| Ok(output(true, "Deploy is live!")));

        let deployment = deployer.publish(Path::new("dist"), &runner).await.unwrap();
        assert_eq!(deployment.url, None);
    }
}
