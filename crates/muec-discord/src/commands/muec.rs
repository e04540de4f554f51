//! /muec command - Send a message to the AI (poise implementation)

use async_trait::async_trait;
use tracing::debug;

use crate::commands::Context;
use crate::error::Result;
use crate::handler::Invocation;
use crate::reply::Reply;

/// Send the AI a message and get a reply
#[poise::command(slash_command, rename = "muec")]
pub async fn muec(
    ctx: Context<'_>,
    #[description = "The question or message you want to send to the AI."] message: String,
) -> Result<()> {
    let mut invocation = SlashInvocation::new(ctx);
    let outcome = ctx.data().handler.handle(&mut invocation, &message).await?;

    debug!(?outcome, user = %ctx.author().name, "Invocation finished");

    Ok(())
}

/// [`Invocation`] backed by a poise slash command context
pub struct SlashInvocation<'a> {
    ctx: Context<'a>,
}

impl<'a> SlashInvocation<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Invocation for SlashInvocation<'_> {
    async fn defer(&mut self) -> Result<()> {
        self.ctx.defer().await?;
        Ok(())
    }

    async fn display_name(&self) -> String {
        // ギルド内ではニックネームを優先
        match self.ctx.author_member().await {
            Some(member) => member.display_name().to_string(),
            None => {
                let author = self.ctx.author();
                author.global_name.clone().unwrap_or_else(|| author.name.clone())
            }
        }
    }

    async fn send(&mut self, reply: Reply) -> Result<()> {
        let builder = poise::CreateReply::default()
            .content(reply.content)
            .ephemeral(reply.private);
        self.ctx.send(builder).await?;
        Ok(())
    }
}
