//! muec-discord: Discord front end for the muec relay bot
//!
//! スラッシュコマンドを1つ登録し、受け取ったメッセージを AI ゲートウェイへ転送して
//! 応答を返します。poise 0.6 / Serenity 0.12 を使用します。

pub mod bot;
pub mod commands;
pub mod error;
pub mod handler;
pub mod registrar;
pub mod reply;

pub use bot::DiscordBot;
pub use error::{DiscordError, Result};
pub use handler::{AskHandler, Invocation, Outcome};
pub use reply::{Reply, format_reply, truncate_reply};
