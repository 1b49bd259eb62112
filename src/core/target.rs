use clap::ValueEnum;
use std::time::Duration;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TargetKind {
    Cloudflare,
    Netlify,
    Vercel,
    Surge,
    Neocities,
    GithubPages,
}

impl TargetKind {
    /// Aggregator order.
    pub const ALL: [TargetKind; 6] = [
        TargetKind::Cloudflare,
        TargetKind::Netlify,
        TargetKind::Vercel,
        TargetKind::Surge,
        TargetKind::Neocities,
        TargetKind::GithubPages,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            TargetKind::Cloudflare => "Cloudflare Pages",
            TargetKind::Netlify => "Netlify",
            TargetKind::Vercel => "Vercel",
            TargetKind::Surge => "Surge",
            TargetKind::Neocities => "Neocities",
            TargetKind::GithubPages => "GitHub Pages",
        }
    }

    /// Subcommand argument that selects this target.
    pub fn slug(&self) -> &'static str {
        match self {
            TargetKind::Cloudflare => "cloudflare",
            TargetKind::Netlify => "netlify",
            TargetKind::Vercel => "vercel",
            TargetKind::Surge => "surge",
            TargetKind::Neocities => "neocities",
            TargetKind::GithubPages => "github-pages",
        }
    }

    pub fn enabled(&self, config: &Config) -> bool {
        let enabled = &config.enabled;
        match self {
            TargetKind::Cloudflare => enabled.cloudflare,
            TargetKind::Netlify => enabled.netlify,
            TargetKind::Vercel => enabled.vercel,
            TargetKind::Surge => enabled.surge,
            TargetKind::Neocities => enabled.neocities,
            TargetKind::GithubPages => enabled.github_pages,
        }
    }

    /// Where the site is expected to be live after a successful deploy.
    pub fn live_url(&self, config: &Config) -> String {
        match self {
            TargetKind::Cloudflare => format!("https://{}.pages.dev", config.cloudflare.project_name),
            TargetKind::Netlify => format!("https://{}.netlify.app", config.site_name),
            TargetKind::Vercel => format!("https://{}.vercel.app", config.site_name),
            TargetKind::Surge => format!("https://{}", config.surge.domain),
            TargetKind::Neocities => format!("https://{}.neocities.org", config.neocities.sitename),
            TargetKind::GithubPages => format!(
                "https://{}.github.io/{}",
                config.github.username, config.github.repo_name
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub name: String,
    pub kind: TargetKind,
    pub enabled: bool,
    pub url: String,
}

impl DeploymentTarget {
    pub fn all(config: &Config) -> Vec<DeploymentTarget> {
        TargetKind::ALL
            .iter()
            .map(|kind| DeploymentTarget {
                name: kind.display_name().to_string(),
                kind: *kind,
                enabled: kind.enabled(config),
                url: kind.live_url(config),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
    TimedOut,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub target_name: String,
    pub outcome: Outcome,
    pub duration: Duration,
}

impl DeploymentResult {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed | Outcome::TimedOut)
    }
}
