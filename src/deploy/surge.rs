use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::{CommandRunner, CommandSpec};
use crate::config::{Config, SurgeConfig};
use crate::deploy::{Deployment, SiteDeployer, run_cli};
use crate::error::{Error, require};

pub struct Surge {
    config: SurgeConfig,
    project_root: PathBuf,
    timeout: Duration,
}

impl Surge {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.surge.clone(),
            project_root: config.project_root.clone(),
            timeout: config.command_timeout,
        }
    }
}

#[async_trait]
impl SiteDeployer for Surge {
    fn name(&self) -> &str {
        "Surge"
    }

    fn check_credentials(&self) -> Result<(), Error> {
        require(&self.config.token, "SURGE_TOKEN").map(|_| ())
    }

    async fn publish(&self, dist: &Path, runner: &dyn CommandRunner) -> Result<Deployment, Error> {
        let token = require(&self.config.token, "SURGE_TOKEN")?;
        let spec = CommandSpec::npx(&self.project_root)
            .arg("surge")
            .arg(dist.display().to_string())
            .arg(self.config.domain.as_str())
            .env("SURGE_TOKEN", token);
        run_cli(runner, &spec, self.timeout).await?;
        Ok(Deployment {
            url: Some(format!("https://{}", self.config.domain)),
        })
    }
}
