use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::{CommandRunner, CommandSpec};
use crate::config::{Config, VercelConfig};
use crate::deploy::{Deployment, SiteDeployer, run_cli, url};
use crate::error::{Error, require};

pub struct Vercel {
    config: VercelConfig,
    project_root: PathBuf,
    timeout: Duration,
}

impl Vercel {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.vercel.clone(),
            project_root: config.project_root.clone(),
            timeout: config.command_timeout,
        }
    }

    fn command(&self, dist: &Path) -> Result<CommandSpec, Error> {
        let token = require(&self.config.token, "VERCEL_TOKEN")?;
        Ok(CommandSpec::npx(&self.project_root)
            .args(["vercel", "deploy"])
            .arg(dist.display().to_string())
            .args(["--prod", "--yes", "--token", token])
            .env_opt("VERCEL_ORG_ID", self.config.org_id.as_ref())
            .env_opt("VERCEL_PROJECT_ID", self.config.project_id.as_ref()))
    }
}

#[async_trait]
impl SiteDeployer for Vercel {
    fn name(&self) -> &str {
        "Vercel"
    }

    fn check_credentials(&self) -> Result<(), Error> {
        require(&self.config.token, "VERCEL_TOKEN").map(|_| ())
    }

    async fn publish(&self, dist: &Path, runner: &dyn CommandRunner) -> Result<Deployment, Error> {
        let output = run_cli(runner, &self.command(dist)?, self.timeout).await?;
        Ok(Deployment {
            url: url::vercel_url(&output.stdout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockCommandRunner;
    use crate::command::mock::output;
    use crate::config::mock::config_with;

    #[tokio::test]
    async fn test_publish_passes_project_ids() {
        let config = config_with(&[
            ("VERCEL_TOKEN", "vc-token"),
            ("VERCEL_ORG_ID", "team_1"),
            ("VERCEL_PROJECT_ID", "prj_1"),
        ]);
        let deployer = Vercel::new(&config);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec, _| {
                spec.args == ["vercel", "deploy", "dist", "--prod", "--yes", "--token", "vc-token"]
                    && spec.envs
                        == [
                            ("VERCEL_ORG_ID".to_string(), "team_1".to_string()),
                            ("VERCEL_PROJECT_ID".to_string(), "prj_1".to_string()),
                        ]
            })
            .returning(|_, _| Ok(output(true, "https://pixel-os-k2j4.vercel.app\n")));

        let deployment = deployer.publish(Path::new("dist"), &runner).await.unwrap();
        assert_eq!(deployment.url.as_deref(), Some("https://pixel-os-k2j4.vercel.app"));
    }
}
