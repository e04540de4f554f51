//! Discord Bot implementation using poise Framework

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use muec_core::{AiGateway, Config};

use crate::commands::{self, Data, Error};
use crate::error::Result;
use crate::handler::AskHandler;
use crate::registrar::{self, ConnectionState};

/// Discord Bot for the muec relay
pub struct DiscordBot {
    config: Config,
    gateway: Option<Arc<dyn AiGateway>>,
}

impl DiscordBot {
    /// Create a bot; `gateway` is `None` when the AI client failed to initialize
    pub fn new(config: Config, gateway: Option<Arc<dyn AiGateway>>) -> Self {
        Self { config, gateway }
    }

    /// Handler shared by every invocation
    pub fn handler(&self) -> AskHandler {
        AskHandler::new(self.gateway.clone(), self.config.gemini.timeout())
    }

    /// Build the serenity client with the poise framework attached
    pub async fn build_client(&self) -> Result<serenity::Client> {
        let commands = commands::get_commands(&self.config.command);
        let guild_id = self.config.discord.guild_id.map(serenity::GuildId::new);
        let handler = self.handler();

        info!(
            "Registering /{} (AI gateway {})",
            self.config.command.name,
            if handler.is_available() { "available" } else { "unavailable" }
        );

        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands,
                on_error: |error| Box::pin(on_error(error)),
                ..Default::default()
            })
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Connected to Discord as {}", ready.user.name);

                    let status =
                        registrar::sync_on_ready(ctx, &framework.options().commands, guild_id)
                            .await;
                    let state = ConnectionState::Connected.on_sync(&status);
                    info!(?state, "Bot is accepting commands");

                    Ok(Data { handler })
                })
            })
            .build();

        // Slash commands only need the default, non-privileged intents
        let intents = serenity::GatewayIntents::non_privileged();

        let client = serenity::ClientBuilder::new(&self.config.discord.token, intents)
            .framework(framework)
            .await?;

        Ok(client)
    }

    /// Start the Discord bot and run until the connection closes or Ctrl+C
    pub async fn start(&self) -> Result<()> {
        info!("Starting Discord bot...");

        let mut client = self.build_client().await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down...");
                shard_manager.shutdown_all().await;
            }
        });

        client.start().await?;

        Ok(())
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to set up the bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command /{}: {:?}", ctx.command().name, error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
