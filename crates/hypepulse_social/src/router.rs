//! Command routing: command name and username in, reply out.

use hypepulse_error::HypePulseResult;
use hypepulse_format::{
    GameMode, Page, PageSet, PaginationConfig, PaginationTier, Paginator, StatFormatter,
    ViewSelector,
};
use hypepulse_upstream::UpstreamClient;
use std::str::FromStr;
use tracing::{debug, error, info, instrument};

/// Text replied for command names the bot does not know.
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

/// Slash commands understood by the bot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    /// Resolve a username to its identifier
    Uuid,
    /// Basic profile
    Player,
    /// Recently played games
    RecentGames,
    /// Guild name and tag
    Guild,
    /// Every stat of every game mode
    Stats,
    /// SkyWars stats
    SkyWars,
    /// BedWars stats
    BedWars,
    /// Duels stats
    Duels,
    /// Bridge duels stats
    BridgeDuels,
    /// SkyBlock stats
    SkyBlock,
    /// Pit stats
    Pit,
    /// Paginated per-mode stats
    DetailedStats,
}

impl Command {
    /// Slash command description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Uuid => "Get the Mojang UUID for a Minecraft username.",
            Self::Player => "Get basic Hypixel player info.",
            Self::RecentGames => "Get the recent games played by a player.",
            Self::Guild => "Get the guild info for a player.",
            Self::Stats => "Get all Hypixel stats for a player.",
            Self::SkyWars => "Get detailed SkyWars stats.",
            Self::BedWars => "Get detailed BedWars stats.",
            Self::Duels => "Get detailed Duels stats.",
            Self::BridgeDuels => "Get detailed Bridge Duels stats.",
            Self::SkyBlock => "Get detailed SkyBlock stats.",
            Self::Pit => "Get detailed Pit stats.",
            Self::DetailedStats => "Get detailed stats paginated by game mode for a player.",
        }
    }

    /// Stats view rendered by this command, for commands that show player stats.
    pub fn view(&self) -> Option<ViewSelector> {
        match self {
            Self::Stats => Some(ViewSelector::All),
            Self::SkyWars => Some(ViewSelector::Mode(GameMode::SkyWars)),
            Self::BedWars => Some(ViewSelector::Mode(GameMode::BedWars)),
            Self::Duels => Some(ViewSelector::Mode(GameMode::Duels)),
            Self::BridgeDuels => Some(ViewSelector::Mode(GameMode::BridgeDuels)),
            Self::SkyBlock => Some(ViewSelector::Mode(GameMode::SkyBlock)),
            Self::Pit => Some(ViewSelector::Mode(GameMode::Pit)),
            Self::DetailedStats => Some(ViewSelector::Detailed),
            Self::Uuid | Self::Player | Self::RecentGames | Self::Guild => None,
        }
    }
}

/// What to send back for a command.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Plain message text
    Text(String),
    /// A single embed
    Page(Page),
    /// Several embeds behind Previous/Next controls
    Paginated(Paginator),
}

impl Reply {
    /// Text of a plain reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Runs commands against the upstream services and formats the result.
///
/// Errors never escape: they become an `Error: ...` text reply and are logged
/// with the command and username.
#[derive(Debug, Clone)]
pub struct CommandRouter {
    upstream: UpstreamClient,
    formatter: StatFormatter,
    pagination: PaginationConfig,
}

impl CommandRouter {
    /// Create a router from its services.
    pub fn new(
        upstream: UpstreamClient,
        formatter: StatFormatter,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            upstream,
            formatter,
            pagination,
        }
    }

    /// Formatter used for replies.
    pub fn formatter(&self) -> &StatFormatter {
        &self.formatter
    }

    /// Handle a command by name.
    #[instrument(skip(self))]
    pub async fn handle(&self, command: &str, username: &str) -> Reply {
        let Ok(parsed) = Command::from_str(command) else {
            debug!("Unknown command");
            return Reply::Text(UNKNOWN_COMMAND.to_string());
        };

        match self.dispatch(parsed, username.trim()).await {
            Ok(reply) => {
                info!("Command completed");
                reply
            }
            Err(e) => {
                error!(command = %parsed, username, error = %e, "Error handling command");
                Reply::Text(format!("Error: {}", e.user_message()))
            }
        }
    }

    async fn dispatch(&self, command: Command, username: &str) -> HypePulseResult<Reply> {
        let identity = self.upstream.resolve_identity(username).await?;
        let id = identity.id().as_str();

        let reply = match (command, command.view()) {
            (Command::Uuid, _) => Reply::Text(self.formatter.identity_text(username, id)),
            (Command::Guild, _) => {
                let guild = self.upstream.fetch_guild(id).await?;
                Reply::Page(self.formatter.guild_page(username, &guild))
            }
            (Command::Player, _) => {
                let player = self.upstream.fetch_player(id).await?;
                Reply::Page(self.formatter.profile_page(&player))
            }
            (Command::RecentGames, _) => {
                let games = self.upstream.fetch_recent_games(id).await?;
                let text = self.formatter.recent_games_text(username, &games);
                if self.formatter.overflows(&text) {
                    let title = format!("Recent Games for {}", username);
                    let pages = self.formatter.paginate_text(&title, &text);
                    self.paginated(pages, PaginationTier::Overflow)
                } else {
                    Reply::Text(text)
                }
            }
            (_, Some(view)) => self.stats_reply(id, view).await?,
            (_, None) => Reply::Text(UNKNOWN_COMMAND.to_string()),
        };
        Ok(reply)
    }

    async fn stats_reply(&self, id: &str, view: ViewSelector) -> HypePulseResult<Reply> {
        let player = self.upstream.fetch_player(id).await?;
        let pages = self.formatter.format(&player, view);

        let reply = match (view, pages.is_paginated()) {
            (ViewSelector::Detailed, true) => self.paginated(pages, PaginationTier::Detailed),
            (ViewSelector::Detailed, false) => Reply::Page(pages.first().clone()),
            (_, true) => self.paginated(pages, PaginationTier::Overflow),
            (_, false) => Reply::Text(pages.first().body().clone()),
        };
        Ok(reply)
    }

    fn paginated(&self, pages: PageSet, tier: PaginationTier) -> Reply {
        debug!(pages = pages.len(), ?tier, "Paginating reply");
        Reply::Paginated(Paginator::new(pages, self.pagination.timeout_for(tier)))
    }
}
