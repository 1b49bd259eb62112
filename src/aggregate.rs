//! Runs every enabled deploy as a child process of this binary and summarizes.

use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::command::{CommandRunner, CommandSpec};
use crate::config::Config;
use crate::core::target::{DeploymentResult, DeploymentTarget, Outcome};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_results(results: &[DeploymentResult]) -> Self {
        results
            .iter()
            .fold(Summary::default(), |mut summary, result| {
                match result.outcome {
                    _ if result.is_failure() => summary.failed += 1,
                    Outcome::Skipped => summary.skipped += 1,
                    _ => summary.successful += 1,
                }
                summary
            })
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

async fn run_target(
    runner: &dyn CommandRunner,
    exe: &str,
    cwd: &Path,
    target: &DeploymentTarget,
    timeout: Duration,
) -> DeploymentResult {
    let result = |outcome, duration| DeploymentResult {
        target_name: target.name.clone(),
        outcome,
        duration,
    };

    if !target.enabled {
        info!("⏭️  {} skipped (disabled)", target.name);
        return result(Outcome::Skipped, Duration::ZERO);
    }

    info!("🚀 Deploying to {}...", target.name);
    let spec = CommandSpec::new(exe, cwd).args(["deploy", target.kind.slug()]);
    let start = Instant::now();

    match runner.run(&spec, timeout).await {
        Ok(output) if output.success => {
            info!("✅ {} deployed", target.name);
            result(Outcome::Success, start.elapsed())
        }
        Ok(output) => {
            error!("❌ {} failed", target.name);
            println!("{}", output.combined());
            result(Outcome::Failed, start.elapsed())
        }
        Err(Error::Timeout(bound)) => {
            error!("⏱️  {} timed out after {}s", target.name, bound.as_secs());
            result(Outcome::TimedOut, bound)
        }
        Err(e) => {
            error!("❌ {} failed: {e}", target.name);
            result(Outcome::Failed, start.elapsed())
        }
    }
}

/// Targets run in order; one failing never stops the rest.
pub async fn run_targets(
    runner: &dyn CommandRunner,
    exe: &str,
    cwd: &Path,
    targets: &[DeploymentTarget],
    timeout: Duration,
) -> Vec<DeploymentResult> {
    let mut results = Vec::with_capacity(targets.len());
    for target in targets {
        results.push(run_target(runner, exe, cwd, target, timeout).await);
    }
    results
}

pub fn print_summary(targets: &[DeploymentTarget], results: &[DeploymentResult]) -> Summary {
    let summary = Summary::from_results(results);

    println!();
    println!("📊 Deployment Summary");
    for result in results {
        let status = match result.outcome {
            Outcome::Success => "✅ success",
            Outcome::Failed => "❌ failed",
            Outcome::TimedOut => "⏱️  timed out",
            Outcome::Skipped => "⏭️  skipped",
        };
        println!(
            "  {:<18} {:<14} {:>6.1}s",
            result.target_name,
            status,
            result.duration.as_secs_f64()
        );
    }
    println!(
        "\n{} successful, {} failed, {} skipped",
        summary.successful, summary.failed, summary.skipped
    );

    println!("\n🌐 URLs:");
    for target in targets {
        println!("  {:<18} {}", target.name, target.url);
    }
    summary
}

pub async fn deploy_all(config: &Config, runner: &dyn CommandRunner) -> Result<Summary, Error> {
    let exe = std::env::current_exe()?;
    let exe = exe.to_string_lossy();
    // Children inherit the environment, so PROJECT_ROOT resolves against the same directory
    let cwd = std::env::current_dir()?;
    let targets = DeploymentTarget::all(config);

    let results = run_targets(
        runner,
        &exe,
        &cwd,
        &targets,
        config.script_timeout,
    )
    .await;
    Ok(print_summary(&targets, &results))
}
