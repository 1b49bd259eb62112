use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SITE_NAME: &str = "pixel-os";
const DEFAULT_NAMESERVERS: &str = "howard.ns.cloudflare.com,sierra.ns.cloudflare.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub project_root: PathBuf,
    pub dist_dir: PathBuf,
    pub build_command: Vec<String>,
    pub site_name: String,
    pub command_timeout: Duration,
    pub script_timeout: Duration,
    pub enabled: EnabledTargets,
    pub cloudflare: CloudflareConfig,
    pub netlify: NetlifyConfig,
    pub vercel: VercelConfig,
    pub surge: SurgeConfig,
    pub neocities: NeocitiesConfig,
    pub github: GitHubPagesConfig,
    pub spaceship: SpaceshipConfig,
}

#[derive(Clone, Debug)]
pub struct EnabledTargets {
    pub cloudflare: bool,
    pub netlify: bool,
    pub vercel: bool,
    pub surge: bool,
    pub neocities: bool,
    pub github_pages: bool,
}

#[derive(Clone, Debug)]
pub struct CloudflareConfig {
    pub account_id: Option<String>,
    pub api_key: Option<String>,
    pub email: Option<String>,
    pub project_name: String,
    pub api_url: String,
    pub dns_records_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct NetlifyConfig {
    pub auth_token: Option<String>,
    pub site_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct VercelConfig {
    pub token: Option<String>,
    pub org_id: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SurgeConfig {
    pub token: Option<String>,
    pub domain: String,
}

#[derive(Clone, Debug)]
pub struct NeocitiesConfig {
    pub api_key: Option<String>,
    pub sitename: String,
    pub api_url: String,
    pub upload_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct GitHubPagesConfig {
    pub username: String,
    pub token: Option<String>,
    pub repo_name: String,
    pub cname: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SpaceshipConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_url: String,
    pub domain: String,
    pub nameservers: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let flag = |key: &str, default: bool| {
            get(key)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };
        let secs = |key: &str, default: u64| {
            Duration::from_secs(get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default))
        };

        let project_root = PathBuf::from(or("PROJECT_ROOT", "."));
        let dist_dir = PathBuf::from(or("DIST_DIR", "dist"));

        Config {
            project_root,
            dist_dir,
            build_command: or("BUILD_COMMAND", "npm run build")
                .split_whitespace()
                .map(String::from)
                .collect(),
            site_name: or("SITE_NAME", DEFAULT_SITE_NAME),
            command_timeout: secs("DEPLOY_COMMAND_TIMEOUT_SECS", 300),
            script_timeout: secs("DEPLOY_SCRIPT_TIMEOUT_SECS", 600),
            enabled: EnabledTargets {
                cloudflare: flag("ENABLE_CLOUDFLARE", true),
                netlify: flag("ENABLE_NETLIFY", true),
                vercel: flag("ENABLE_VERCEL", true),
                surge: flag("ENABLE_SURGE", true),
                neocities: flag("ENABLE_NEOCITIES", true),
                github_pages: flag("ENABLE_GITHUB_PAGES", false),
            },
            cloudflare: CloudflareConfig {
                account_id: get("CLOUDFLARE_ACCOUNT_ID"),
                api_key: get("CLOUDFLARE_GLOBAL_API_KEY"),
                email: get("CLOUDFLARE_EMAIL"),
                project_name: or("CLOUDFLARE_PROJECT_NAME", DEFAULT_SITE_NAME),
                api_url: or("CLOUDFLARE_API_URL", "https://api.cloudflare.com/client/v4"),
                dns_records_file: get("CLOUDFLARE_DNS_RECORDS").map(PathBuf::from),
            },
            netlify: NetlifyConfig {
                auth_token: get("NETLIFY_AUTH_TOKEN"),
                site_id: get("NETLIFY_SITE_ID"),
            },
            vercel: VercelConfig {
                token: get("VERCEL_TOKEN"),
                org_id: get("VERCEL_ORG_ID"),
                project_id: get("VERCEL_PROJECT_ID"),
            },
            surge: SurgeConfig {
                token: get("SURGE_TOKEN"),
                domain: or("SURGE_DOMAIN", "pixel-os.surge.sh"),
            },
            neocities: NeocitiesConfig {
                api_key: get("NEOCITIES_API_KEY"),
                sitename: or("NEOCITIES_SITENAME", "chirag127"),
                api_url: or("NEOCITIES_API_URL", "https://neocities.org/api"),
                upload_timeout: secs("NEOCITIES_UPLOAD_TIMEOUT_SECS", 60),
            },
            github: GitHubPagesConfig {
                username: or("GH_USERNAME", "chirag127"),
                token: get("GH_TOKEN"),
                repo_name: or("GH_REPO_NAME", DEFAULT_SITE_NAME),
                cname: get("GH_PAGES_CNAME"),
            },
            spaceship: SpaceshipConfig {
                api_key: get("SPACESHIP_API_KEY"),
                api_secret: get("SPACESHIP_API_SECRET"),
                api_url: or("SPACESHIP_API_URL", "https://spaceship.dev/api/v1"),
                domain: or("SPACESHIP_DOMAIN", "oriz.in"),
                nameservers: or("SPACESHIP_NAMESERVERS", DEFAULT_NAMESERVERS)
                    .split(',')
                    .map(|ns| ns.trim().to_string())
                    .filter(|ns| !ns.is_empty())
                    .collect(),
            },
        }
    }

    pub fn dist_path(&self) -> PathBuf {
        self.project_root.join(&self.dist_dir)
    }
}
