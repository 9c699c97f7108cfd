//! Slash command definitions.

use crate::Command;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};
use strum::IntoEnumIterator;

/// Name of the single argument every command takes.
pub const USERNAME_OPTION: &str = "username";

/// Definitions of every slash command, each with a required `username`.
pub fn slash_commands() -> Vec<CreateCommand> {
    Command::iter()
        .map(|command| {
            CreateCommand::new(command.to_string())
                .description(command.description())
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        USERNAME_OPTION,
                        "Minecraft username",
                    )
                    .required(true),
                )
        })
        .collect()
}
