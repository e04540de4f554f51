//! Slash command registration
//!
//! Command definitions are pushed to Discord once the connection is ready.
//! A failed sync is logged but never stops the bot, since a previously
//! registered command may still be callable.

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::error::Result;

/// Result of pushing command definitions to Discord
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Synced(usize),
    Failed(String),
}

/// Lifecycle of the platform connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    /// Connected, commands not yet synchronized
    Connected,
    Ready,
    /// Connected, but the sync failed; the command may or may not be callable
    SyncFailed,
}

impl ConnectionState {
    /// State after a sync attempt
    pub fn on_sync(self, status: &SyncStatus) -> Self {
        match (self, status) {
            (Self::Connected, SyncStatus::Synced(_)) => Self::Ready,
            (Self::Connected, SyncStatus::Failed(_)) => Self::SyncFailed,
            (state, _) => state,
        }
    }
}

/// Push `commands` to Discord, globally or to a single guild
///
/// Returns the number of commands Discord now knows about.
pub async fn sync_commands<U, E>(
    http: impl AsRef<serenity::Http>,
    commands: &[poise::Command<U, E>],
    guild_id: Option<serenity::GuildId>,
) -> Result<usize> {
    let definitions = poise::builtins::create_application_commands(commands);

    let registered = match guild_id {
        Some(guild_id) => guild_id.set_commands(http, definitions).await?,
        None => serenity::Command::set_global_commands(http, definitions).await?,
    };

    Ok(registered.len())
}

/// Sync on the Ready event, logging the outcome instead of failing
pub async fn sync_on_ready<U, E>(
    http: impl AsRef<serenity::Http>,
    commands: &[poise::Command<U, E>],
    guild_id: Option<serenity::GuildId>,
) -> SyncStatus {
    match sync_commands(http, commands, guild_id).await {
        Ok(count) => {
            match guild_id {
                Some(guild_id) => info!("Synchronized {} slash command(s) to guild {}", count, guild_id),
                None => info!("Synchronized {} global slash command(s)", count),
            }
            SyncStatus::Synced(count)
        }
        Err(e) => {
            error!("Slash command sync failed: {}", e);
            SyncStatus::Failed(e.to_string())
        }
    }
}
