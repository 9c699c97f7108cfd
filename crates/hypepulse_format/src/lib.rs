//! Stat formatting and pagination for HypePulse.
//!
//! [`StatFormatter`] maps player, guild and game records into
//! [`Page`]s whose bodies never exceed the configured length.
//! [`Paginator`] walks a multi-page [`PageSet`] with clamped
//! Previous/Next controls and an inactivity timeout.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod formatter;
mod page;
mod paginator;
mod text;

pub use config::{FormatConfig, FormatConfigBuilder, PaginationConfig, PaginationConfigBuilder};
pub use formatter::{GameMode, StatFormatter, ViewSelector};
pub use page::{
    Page, PageBuilder, PageField, PageSet, GENERAL_COLOR, GUILD_COLOR, MODE_COLOR, NO_DATA,
};
pub use paginator::{Control, PaginationTier, Paginator, PaginatorState};
pub use text::{
    char_len, push_line, ratio, render_json_section, render_section, render_value, split_text,
};
