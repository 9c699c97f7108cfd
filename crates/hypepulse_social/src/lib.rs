//! Command routing and Discord integration for HypePulse.
//!
//! [`CommandRouter`] turns a command name and a username into a [`Reply`]:
//! it resolves the username, fetches the record the command needs and hands
//! it to the stat formatter. Failures become an `Error: ...` text reply.
//!
//! # Platform Support
//!
//! - `discord` - Serenity bot that registers the slash commands and renders
//!   replies, with button pagination (requires `discord` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod router;

#[cfg(feature = "discord")]
mod discord;

pub use router::{Command, CommandRouter, Reply, UNKNOWN_COMMAND};

#[cfg(feature = "discord")]
pub use discord::{
    clamp_description, control_id, navigation_row, page_embed, parse_control_id,
    slash_commands, text_response, DiscordError, DiscordErrorKind, DiscordResult,
    HypePulseBot, HypePulseHandler, EMBED_LIMIT, MESSAGE_LIMIT, USERNAME_OPTION,
};
