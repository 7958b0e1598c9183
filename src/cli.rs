use clap::Parser;

/// Download every file listed in a site's remote cache manifest.
#[derive(Parser, Debug)]
#[command(name = "site-cache-downloader", version)]
pub struct Cli {
    /// Page that embeds `window.siteInfo`
    #[arg(value_name = "URL")]
    pub url: String,

    /// Destination folder; created if missing
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Anything after FOLDER is accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// One-line usage shown when the positionals are missing or malformed.
pub fn usage(program: &str) -> String {
    format!("Usage: {} URL FOLDER", program)
}
