use clap::Parser;
use engine::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/gastos_tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the gastos API, e.g. `http://localhost:8080/api/`.
    pub base_url: String,
    pub page_size: usize,
    /// Log level for the file log.
    pub level: String,
    pub log_file: String,
    /// Show an error notice when the list cannot be fetched.
    pub notify_fetch_errors: bool,
    pub request_timeout_secs: u64,
    pub state_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            level: "info".to_string(),
            log_file: "gastos_tui.log".to_string(),
            notify_fetch_errors: false,
            request_timeout_secs: 15,
            state_file: "config/gastos_tui_state.json".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gastos_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://localhost:8080/api/).
    #[arg(long)]
    base_url: Option<String>,
    /// Override rows per page.
    #[arg(long)]
    page_size: Option<usize>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GASTOS_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(level) = args.log_level {
        settings.level = level;
    }

    if settings.page_size == 0 {
        return Err(AppError::Settings("page_size must be at least 1".to_string()));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["gastos_tui", "--config", "does/not/exist.toml"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_without_file() {
        let settings = load_from(args(&[])).unwrap();
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert!(!settings.notify_fetch_errors);
        assert!(settings.base_url.ends_with('/'));
    }

    #[test]
    fn cli_overrides_win() {
        let settings = load_from(args(&[
            "--base-url",
            "http://10.0.0.5:9000/",
            "--page-size",
            "20",
            "--log-level",
            "debug",
        ]))
        .unwrap();
        assert_eq!(settings.base_url, "http://10.0.0.5:9000/");
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.level, "debug");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let res = load_from(args(&["--page-size", "0"]));
        assert!(matches!(res, Err(AppError::Settings(_))));
    }
}
