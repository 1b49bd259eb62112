//! Live-URL extraction from vendor CLI output.

use serde::Deserialize;

fn https_urls(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter_map(|token| token.find("https://").map(|i| &token[i..]))
        .map(|url| url.trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '/')))
}

/// Wrangler prints the deployment alias inside a sentence, e.g.
/// `Take a peek over at https://abc123.pixel-os.pages.dev`.
pub fn pages_url(output: &str) -> Option<String> {
    https_urls(output)
        .find(|url| url.contains(".pages.dev"))
        .map(String::from)
}

#[derive(Deserialize)]
struct NetlifyDeployOutput {
    url: Option<String>,
    deploy_url: Option<String>,
}

/// Parses `netlify deploy --json`. The production `url` wins over the
/// per-deploy `deploy_url`. Anything printed around the JSON object is ignored.
pub fn netlify_url(stdout: &str) -> Option<String> {
    let start = stdout.find('{')?;
    let end = stdout.rfind('}')?;
    if end < start {
        return None;
    }
    let parsed: NetlifyDeployOutput = serde_json::from_str(&stdout[start..=end]).ok()?;
    parsed
        .url
        .or(parsed.deploy_url)
        .filter(|url| url.starts_with("https://"))
}

/// `vercel deploy` writes the deployment URL alone on stdout. The last one wins.
pub fn vercel_url(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("https://") && !line.contains(char::is_whitespace))
        .last()
        .map(String::from)
}
