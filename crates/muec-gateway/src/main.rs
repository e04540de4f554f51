//! muec-gateway: Discord ⇄ Gemini relay bot
//!
//! Usage:
//!   muec-gateway            - Connect to Discord and serve the slash command
//!   muec-gateway --help     - Show help
//!   muec-gateway --version  - Show version

use std::sync::Arc;

use muec_core::{AiGateway, Config, GeminiClient};
use muec_discord::DiscordBot;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Connect to Discord
    Bot,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args(std::env::args().skip(1)) {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("muec-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Bot => {}
    }

    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    // 資格情報が欠けている場合は接続を試みずに終了する
    let config = match Config::load() {
        Ok(config) => config,
        Err(e @ muec_core::Error::MissingCredentials(_)) => {
            eprintln!("ERROR: {}.", e);
            eprintln!("Both DISCORD_TOKEN and GEMINI_API_KEY are required to run the bot.");
            std::process::exit(1);
        }
        Err(e) => return Err(anyhow::anyhow!("Config error: {}", e)),
    };

    tracing::info!("Starting muec-gateway...");
    tracing::info!("Model: {}", config.gemini.model);

    let gateway = build_gateway(&config);
    DiscordBot::new(config, gateway).start().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Log filter from `RUST_LOG`, falling back to `info`
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Create the AI gateway; a failure leaves the bot running without one
fn build_gateway(config: &Config) -> Option<Arc<dyn AiGateway>> {
    match GeminiClient::new(&config.gemini) {
        Ok(client) => {
            tracing::info!("Gemini API client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::error!("Failed to initialize Gemini API client: {}", e);
            None
        }
    }
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> RunMode
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Bot
}

/// Print help message
fn print_help() {
    println!("muec-gateway - Discord slash command relay to Gemini");
    println!();
    println!("Usage:");
    println!("  muec-gateway            Connect to Discord and serve the slash command");
    println!("  muec-gateway --help     Show this help message");
    println!("  muec-gateway --version  Show version");
    println!();
    println!("Environment Variables:");
    println!("  DISCORD_TOKEN             Discord bot token (required)");
    println!("  GEMINI_API_KEY            Gemini API key (required)");
    println!("  DISCORD_GUILD_ID          Register the command to one guild only");
    println!("  GEMINI_MODEL              Model name (default: gemini-2.5-flash)");
    println!("  GEMINI_BASE_URL           Custom API endpoint");
    println!("  GEMINI_TIMEOUT_SECS       Request timeout in seconds (default: 120)");
    println!("  MUEC_COMMAND_NAME         Slash command name (default: muec)");
    println!("  MUEC_COMMAND_DESCRIPTION  Slash command description");
    println!();
    println!("Settings may also be placed in ./muec.toml; environment variables take precedence.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])), RunMode::Bot);
        assert_eq!(parse_args(args(&["--help"])), RunMode::Help);
        assert_eq!(parse_args(args(&["-v"])), RunMode::Version);
        assert_eq!(parse_args(args(&["--unknown"])), RunMode::Bot);
    }

    #[test]
    fn test_log_filter_follows_rust_log() {
        let filter = log_filter(Some("warn".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = log_filter(Some("muec_discord=debug,error".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some(String::new())).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_build_gateway_with_valid_config() {
        let config = Config::from_lookup(|key| match key {
            "DISCORD_TOKEN" => Some("token".to_string()),
            "GEMINI_API_KEY" => Some("key".to_string()),
            _ => None,
        })
        .unwrap();

        let gateway = build_gateway(&config).unwrap();
        assert_eq!(gateway.model(), "gemini-2.5-flash");
    }
}
