use tracing::{error, info};

use crate::command::{CommandRunner, CommandSpec};
use crate::config::Config;
use crate::error::Error;

pub fn build_spec(config: &Config) -> Result<CommandSpec, Error> {
    let Some((program, args)) = config.build_command.split_first() else {
        return Err(Error::InvalidInput("BUILD_COMMAND is empty".to_string()));
    };
    Ok(CommandSpec::new(program.clone(), &config.project_root).args(args.iter().cloned()))
}

/// Builds the static assets, surfacing the captured output when the build fails.
pub async fn build_project(config: &Config, runner: &dyn CommandRunner) -> Result<(), Error> {
    info!("📦 Building project...");
    let spec = build_spec(config)?;
    let output = runner.run(&spec, config.command_timeout).await?;
    if !output.success {
        error!("❌ Build failed");
        return Err(Error::BuildFailed(output.combined()));
    }
    info!("✅ Build successful");
    Ok(())
}
