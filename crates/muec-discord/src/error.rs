//! エラー型定義 (muec-discord)

use thiserror::Error;

/// muec-discord のエラー型
#[derive(Error, Debug)]
pub enum DiscordError {
    #[error("Serenity error: {0}")]
    SerenityError(#[from] serenity::Error),
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, DiscordError>;
