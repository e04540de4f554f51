//! Slash commands for Discord bot (poise implementation)

mod muec;

use muec_core::CommandConfig;

use crate::handler::AskHandler;

/// User data stored and accessible in all command invocations
pub struct Data {
    pub handler: AskHandler,
}

/// Error type for commands
pub type Error = crate::error::DiscordError;

/// Context type for commands
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub use muec::{SlashInvocation, muec};

/// Get all commands for registration
///
/// Name and descriptions come from the configuration so the command can be
/// renamed without a rebuild.
pub fn get_commands(config: &CommandConfig) -> Vec<poise::Command<Data, Error>> {
    let mut command = muec();
    command.name = config.name.clone();
    command.qualified_name = config.name.clone();
    command.description = Some(config.description.clone());
    if let Some(prompt) = command.parameters.first_mut() {
        prompt.description = Some(config.prompt_description.clone());
    }

    vec![command]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_metadata() {
        let commands = get_commands(&CommandConfig::default());
        assert_eq!(commands.len(), 1);

        let command = &commands[0];
        assert_eq!(command.name, "muec");
        assert_eq!(
            command.description.as_deref(),
            Some("Send the AI a message and get a reply.")
        );
        assert!(command.slash_action.is_some());
        assert_eq!(command.parameters.len(), 1);
        assert!(command.parameters[0].required);
        assert_eq!(command.parameters[0].name, "message");
    }

    #[test]
    fn test_renamed_command() {
        let config = CommandConfig {
            name: "ask".to_string(),
            description: "Ask the AI".to_string(),
            prompt_description: "Your question".to_string(),
        };
        let commands = get_commands(&config);

        assert_eq!(commands[0].name, "ask");
        assert_eq!(commands[0].qualified_name, "ask");
        assert_eq!(commands[0].description.as_deref(), Some("Ask the AI"));
        assert_eq!(
            commands[0].parameters[0].description.as_deref(),
            Some("Your question")
        );
    }
}
