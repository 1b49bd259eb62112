//! Single-provider deploys: credential check, build, prepare, publish.

pub mod cloudflare_pages;
pub mod github_pages;
pub mod neocities;
pub mod netlify;
pub mod surge;
pub mod url;
pub mod vercel;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::build::build_project;
use crate::command::{CommandOutput, CommandRunner, CommandSpec};
use crate::config::Config;
use crate::core::target::TargetKind;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deployment {
    pub url: Option<String>,
}

#[async_trait]
pub trait SiteDeployer: Send + Sync {
    fn name(&self) -> &str;
    fn check_credentials(&self) -> Result<(), Error>;
    /// Writes provider-specific marker files into the build output.
    fn prepare(&self, _dist: &Path) -> Result<(), Error> {
        Ok(())
    }
    async fn publish(&self, dist: &Path, runner: &dyn CommandRunner) -> Result<Deployment, Error>;
}

pub fn deployer_for(kind: TargetKind, config: &Config) -> Box<dyn SiteDeployer> {
    match kind {
        TargetKind::Cloudflare => Box::new(cloudflare_pages::CloudflarePages::new(config)),
        TargetKind::Netlify => Box::new(netlify::Netlify::new(config)),
        TargetKind::Vercel => Box::new(vercel::Vercel::new(config)),
        TargetKind::Surge => Box::new(surge::Surge::new(config)),
        TargetKind::Neocities => Box::new(neocities::Neocities::new(config)),
        TargetKind::GithubPages => Box::new(github_pages::GitHubPages::new(config)),
    }
}

pub async fn run(
    config: &Config,
    runner: &dyn CommandRunner,
    deployer: &dyn SiteDeployer,
) -> Result<Deployment, Error> {
    info!("🔷 {} Deployment", deployer.name());

    // Nothing is spawned or sent before the credentials are known to be present
    deployer.check_credentials()?;

    build_project(config, runner).await?;

    let dist = config.dist_path();
    if !dist.is_dir() {
        return Err(Error::NotFound(format!(
            "Dist directory not found: {}",
            dist.display()
        )));
    }
    deployer.prepare(&dist)?;

    info!("🚀 Deploying to {}...", deployer.name());
    let deployment = deployer.publish(&dist, runner).await?;

    info!("✅ {} deployment complete!", deployer.name());
    if let Some(url) = &deployment.url {
        info!("🌐 Live at: {url}");
    }
    Ok(deployment)
}

/// Runs a vendor CLI and turns a non-zero exit into `Error::CommandFailed`.
pub(crate) async fn run_cli(
    runner: &dyn CommandRunner,
    spec: &CommandSpec,
    timeout: Duration,
) -> Result<CommandOutput, Error> {
    let output = runner.run(spec, timeout).await?;
    if !output.success {
        return Err(Error::CommandFailed(format!(
            "`{}` exited with {}: {}",
            spec.display(),
            output
                .code
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            output.combined()
        )));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockCommandRunner;
    use crate::command::mock::output;
    use crate::config::mock::config_with;
    use assert_matches::assert_matches;

    fn site_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/index.html"), "<html></html>").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_credentials_spawn_nothing() {
        let dir = site_dir();
        let root = dir.path().to_str().unwrap();
        let config = config_with(&[("PROJECT_ROOT", root)]);
        // No expectations: any call to the runner panics
        let runner = MockCommandRunner::new();

        for kind in [
            TargetKind::Cloudflare,
            TargetKind::Netlify,
            TargetKind::Vercel,
            TargetKind::Surge,
            TargetKind::Neocities,
        ] {
            let deployer = deployer_for(kind, &config);
            let result = run(&config, &runner, deployer.as_ref()).await;
            assert_matches!(result, Err(Error::CredentialError(_)), "{kind:?}");
        }
    }

    #[tokio::test]
    async fn test_build_failure_stops_before_publish() {
        let dir = site_dir();
        let root = dir.path().to_str().unwrap();
        let config = config_with(&[("PROJECT_ROOT", root), ("SURGE_TOKEN", "t")]);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec, _| spec.program == "npm")
            .times(1)
            .returning(|_, _| Ok(output(false, "build broke")));

        let deployer = deployer_for(TargetKind::Surge, &config);
        let result = run(&config, &runner, deployer.as_ref()).await;
        assert_matches!(result, Err(Error::BuildFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_dist_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = config_with(&[("PROJECT_ROOT", root), ("SURGE_TOKEN", "t")]);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(output(true, "")));

        let deployer = deployer_for(TargetKind::Surge, &config);
        let result = run(&config, &runner, deployer.as_ref()).await;
        assert_matches!(result, Err(Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_publish_failure_surfaces_output() {
        let dir = site_dir();
        let root = dir.path().to_str().unwrap();
        let config = config_with(&[("PROJECT_ROOT", root), ("SURGE_TOKEN", "t")]);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec, _| spec.program == "npm")
            .returning(|_, _| Ok(output(true, "")));
        runner
            .expect_run()
            .withf(|spec, _| spec.program == "npx")
            .returning(|_, _| Ok(output(false, "Aborted - you do not have permission")));

        let deployer = deployer_for(TargetKind::Surge, &config);
        let result = run(&config, &runner, deployer.as_ref()).await;
        assert_matches!(result, Err(Error::CommandFailed(msg)) if msg.contains("permission"));
    }
}
