//! muec-core: Core library for the muec relay bot
//!
//! 設定の読み込み、エラー型、そして生成 AI (Gemini) への
//! ゲートウェイを提供します。

pub mod config;
pub mod error;
pub mod gateway;

pub use config::{CommandConfig, Config, DiscordConfig, GeminiConfig};
pub use error::{Error, Result};
pub use gateway::{AiGateway, GeminiClient};
