//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. muec.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。
//! `DISCORD_TOKEN` と `GEMINI_API_KEY` は必須です。

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable holding the Discord bot token
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default config file looked up by [`Config::load`]
pub const DEFAULT_CONFIG_FILE: &str = "muec.toml";

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_command_name() -> String {
    "muec".to_string()
}

fn default_command_description() -> String {
    "Send the AI a message and get a reply.".to_string()
}

fn default_prompt_description() -> String {
    "The question or message you want to send to the AI.".to_string()
}

/// Discord connection settings
#[derive(Clone)]
pub struct DiscordConfig {
    /// Bot token
    pub token: String,

    /// Register the command to this guild only (instant propagation)
    pub guild_id: Option<u64>,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[redacted]")
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

/// Gemini API settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,

    /// Model used for every request
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a config with default model, endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Metadata of the slash command pushed to Discord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    pub name: String,
    pub description: String,
    pub prompt_description: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            name: default_command_name(),
            description: default_command_description(),
            prompt_description: default_prompt_description(),
        }
    }
}

/// Main configuration for muec-gateway
#[derive(Debug, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    pub gemini: GeminiConfig,
    pub command: CommandConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(TomlConfig::default(), &lookup)
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// `./muec.toml` があればそれを使い、なければ環境変数のみで構築します。
    pub fn load() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// 設定ファイル内の `${VAR_NAME}` は環境変数の値に置換され、
    /// 既存の環境変数はファイルの値より優先されます。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_toml_file_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_toml_file`], reading variables through `lookup`
    pub fn from_toml_file_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content, lookup)
    }

    fn from_toml_str<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut toml: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        // 展開はパース後の文字列値に対してのみ行う
        toml.expand_env_vars(&lookup);

        Self::resolve(toml, &lookup)
    }

    /// Merge file values with variable overrides and validate credentials
    fn resolve<F>(toml: TomlConfig, lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空文字列は未設定として扱う
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord = toml.discord.unwrap_or_default();
        let gemini = toml.gemini.unwrap_or_default();
        let command = toml.command.unwrap_or_default();

        let token = var(DISCORD_TOKEN_VAR).or(discord.token.filter(|t| !t.is_empty()));
        let api_key = var(GEMINI_API_KEY_VAR).or(gemini.api_key.filter(|k| !k.is_empty()));

        let (token, api_key) = match (token, api_key) {
            (Some(token), Some(api_key)) => (token, api_key),
            (token, api_key) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push(DISCORD_TOKEN_VAR);
                }
                if api_key.is_none() {
                    missing.push(GEMINI_API_KEY_VAR);
                }
                return Err(Error::MissingCredentials(missing));
            }
        };

        let guild_id = match var("DISCORD_GUILD_ID") {
            Some(id) => Some(parse_number("DISCORD_GUILD_ID", &id)?),
            None => discord.guild_id,
        };

        let timeout_secs = match var("GEMINI_TIMEOUT_SECS") {
            Some(secs) => parse_number("GEMINI_TIMEOUT_SECS", &secs)?,
            None => gemini.timeout_secs.unwrap_or_else(default_timeout_secs),
        };
        if timeout_secs == 0 {
            return Err(Error::Config("GEMINI_TIMEOUT_SECS must be greater than 0".to_string()));
        }

        let command_name = var("MUEC_COMMAND_NAME")
            .or(command.name)
            .unwrap_or_else(default_command_name);
        if !is_valid_command_name(&command_name) {
            return Err(Error::Config(format!(
                "invalid slash command name '{}': use 1-32 lowercase letters, digits, '-' or '_'",
                command_name
            )));
        }

        Ok(Config {
            discord: DiscordConfig { token, guild_id },
            gemini: GeminiConfig {
                api_key,
                model: var("GEMINI_MODEL")
                    .or(gemini.model)
                    .unwrap_or_else(default_model),
                base_url: var("GEMINI_BASE_URL")
                    .or(gemini.base_url)
                    .unwrap_or_else(default_base_url),
                timeout_secs,
            },
            command: CommandConfig {
                name: command_name,
                description: var("MUEC_COMMAND_DESCRIPTION")
                    .or(command.description)
                    .unwrap_or_else(default_command_description),
                prompt_description: command
                    .prompt_description
                    .unwrap_or_else(default_prompt_description),
            },
        })
    }
}

/// Discord slash command names: 1-32 chars, lowercase, no spaces
fn is_valid_command_name(name: &str) -> bool {
    let len = name.chars().count();
    (1..=32).contains(&len)
        && name
            .chars()
            .all(|c| c == '-' || c == '_' || (c.is_alphanumeric() && !c.is_uppercase()))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} is not a valid number: {}", key, value)))
}

/// `${VAR_NAME}` 形式の文字列を変数の値に置換する
///
/// 変数が存在しない場合は空文字列になります。
fn expand_env_vars<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }

            if let Some(env_value) = lookup(&var_name) {
                result.push_str(&env_value);
            }
        } else {
            result.push(c);
        }
    }

    result
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    discord: Option<TomlDiscordConfig>,
    gemini: Option<TomlGeminiConfig>,
    command: Option<TomlCommandConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDiscordConfig {
    token: Option<String>,
    guild_id: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlGeminiConfig {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlCommandConfig {
    name: Option<String>,
    description: Option<String>,
    prompt_description: Option<String>,
}

impl TomlConfig {
    /// Expand `${VAR_NAME}` in every string value
    fn expand_env_vars<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let expand = |value: &mut Option<String>| {
            if let Some(v) = value.as_mut() {
                *v = expand_env_vars(v, lookup);
            }
        };

        if let Some(discord) = self.discord.as_mut() {
            expand(&mut discord.token);
        }
        if let Some(gemini) = self.gemini.as_mut() {
            expand(&mut gemini.api_key);
            expand(&mut gemini.model);
            expand(&mut gemini.base_url);
        }
        if let Some(command) = self.command.as_mut() {
            expand(&mut command.name);
            expand(&mut command.description);
            expand(&mut command.prompt_description);
        }
    }
}
