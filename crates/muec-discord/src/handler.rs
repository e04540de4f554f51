//! Command handling for the "ask AI" slash command
//!
//! The reply protocol is two-phase: the invocation is deferred first, then
//! exactly one final reply (public answer or private failure) is sent.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use muec_core::{AiGateway, Error as CoreError};

use crate::error::Result;
use crate::reply::{GENERIC_FAILURE, Reply, SERVICE_UNAVAILABLE, format_reply};

/// One pending command invocation
#[async_trait]
pub trait Invocation: Send + Sync {
    /// Acknowledge with a "thinking" placeholder
    async fn defer(&mut self) -> Result<()>;

    /// Display name of the caller
    async fn display_name(&self) -> String;

    /// Send the final reply
    async fn send(&mut self, reply: Reply) -> Result<()>;
}

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Public answer sent
    Answered,
    /// No gateway configured, private notice sent
    Unavailable,
    /// Gateway call failed, private apology sent
    Failed,
}

/// Forwards a prompt to the AI gateway and replies to the caller
#[derive(Clone)]
pub struct AskHandler {
    gateway: Option<Arc<dyn AiGateway>>,
    timeout: Duration,
}

impl AskHandler {
    pub fn new(gateway: Option<Arc<dyn AiGateway>>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    pub fn is_available(&self) -> bool {
        self.gateway.is_some()
    }

    /// Handle one invocation
    ///
    /// Errors are only returned when Discord itself rejects the defer or the
    /// final private reply.
    pub async fn handle<I>(&self, invocation: &mut I, prompt: &str) -> Result<Outcome>
    where
        I: Invocation + ?Sized,
    {
        // 時間のかかる処理の前に必ず defer する
        invocation.defer().await?;

        let Some(gateway) = &self.gateway else {
            warn!("AI gateway is not initialized, rejecting invocation");
            invocation.send(Reply::private(SERVICE_UNAVAILABLE)).await?;
            return Ok(Outcome::Unavailable);
        };

        let display_name = invocation.display_name().await;
        info!("Processing prompt from {}: {}", display_name, prompt);

        let result = match tokio::time::timeout(self.timeout, gateway.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::Timeout(self.timeout)),
        };

        match result {
            Ok(text) => {
                let content = format_reply(&display_name, prompt, &text);
                match invocation.send(Reply::public(content)).await {
                    Ok(()) => {
                        debug!("Reply sent to {}", display_name);
                        Ok(Outcome::Answered)
                    }
                    Err(e) => {
                        error!("Failed to send reply: {:?}", e);
                        invocation.send(Reply::private(GENERIC_FAILURE)).await?;
                        Ok(Outcome::Failed)
                    }
                }
            }
            Err(e) => {
                error!(model = gateway.model(), "AI gateway error: {}", e);
                invocation.send(Reply::private(GENERIC_FAILURE)).await?;
                Ok(Outcome::Failed)
            }
        }
    }
}
