//! Discord integration for HypePulse.
//!
//! Built on Serenity. The bot registers one slash command per
//! [`Command`](crate::Command), defers each interaction, runs it through the
//! [`CommandRouter`](crate::CommandRouter) and renders the [`Reply`](crate::Reply):
//!
//! - text as a plain message, or as an embed when over Discord's 2000
//!   character message limit
//! - a single page as an embed
//! - several pages as embeds behind Previous/Next buttons, until the
//!   paginator's inactivity timeout runs out
//!
//! # Usage
//!
//! Available with the `discord` feature.
//!
//! ```rust,ignore
//! use hypepulse_social::{HypePulseBot, HypePulseHandler};
//!
//! let handler = HypePulseHandler::new(router, icon_url);
//! let mut bot = HypePulseBot::new(token, handler).await?;
//! bot.start().await?;
//! ```

mod client;
mod commands;
mod error;
mod handler;
mod render;

pub use client::HypePulseBot;
pub use commands::{slash_commands, USERNAME_OPTION};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::HypePulseHandler;
pub use render::{
    clamp_description, control_id, navigation_row, page_embed, parse_control_id, text_response,
    EMBED_LIMIT, MESSAGE_LIMIT,
};
