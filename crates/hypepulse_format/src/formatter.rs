//! Player statistics to pages.

use crate::{
    char_len, push_line, ratio, render_json_section, render_section, render_value, split_text,
    FormatConfig, Page, PageField, PageSet, GENERAL_COLOR, GUILD_COLOR, MODE_COLOR, NO_DATA,
};
use hypepulse_error::{FormatterError, FormatterErrorKind, FormatterResult};
use hypepulse_upstream::{GameModeStats, GuildRecord, PlayerRecord, RecentGame};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Game modes with a dedicated stats view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// SkyWars
    SkyWars,
    /// BedWars
    BedWars,
    /// Duels
    Duels,
    /// Bridge duels, stored inside the Duels stats
    BridgeDuels,
    /// SkyBlock
    SkyBlock,
    /// The Pit
    Pit,
}

impl GameMode {
    /// Key of the mode inside the player's stats.
    pub fn stats_key(&self) -> &'static str {
        match self {
            Self::SkyWars => "SkyWars",
            Self::BedWars => "Bedwars",
            Self::Duels | Self::BridgeDuels => "Duels",
            Self::SkyBlock => "SkyBlock",
            Self::Pit => "Pit",
        }
    }

    /// Human-readable name used in section titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SkyWars => "SkyWars",
            Self::BedWars => "BedWars",
            Self::Duels => "Duels",
            Self::BridgeDuels => "Bridge Duels",
            Self::SkyBlock => "SkyBlock",
            Self::Pit => "Pit",
        }
    }
}

/// Which view of a player's statistics to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSelector {
    /// Every game mode, every field, as one text
    All,
    /// Curated fields of one game mode
    Mode(GameMode),
    /// General info page followed by one page (or more) per game mode
    Detailed,
}

/// Turns player records into size-bounded pages.
///
/// # Examples
///
/// ```
/// use hypepulse_format::{FormatConfig, GameMode, StatFormatter, ViewSelector};
/// use hypepulse_upstream::PlayerRecord;
/// use serde_json::json;
///
/// let formatter = StatFormatter::new(FormatConfig::default()).unwrap();
/// let player: PlayerRecord = serde_json::from_value(json!({
///     "displayname": "Notch",
///     "stats": {"Pit": {"kills": 4, "deaths": 2}}
/// })).unwrap();
///
/// let pages = formatter.format(&player, ViewSelector::Mode(GameMode::Pit));
/// assert_eq!(pages.len(), 1);
/// assert!(pages.first().body().contains("**kdr:** 2.00"));
/// ```
#[derive(Debug, Clone)]
pub struct StatFormatter {
    config: FormatConfig,
}

impl StatFormatter {
    /// Create a formatter, rejecting zero page lengths.
    pub fn new(config: FormatConfig) -> FormatterResult<Self> {
        for len in [*config.overflow_page_length(), *config.detailed_page_length()] {
            if len == 0 {
                return Err(FormatterError::new(FormatterErrorKind::InvalidPageLength(
                    len,
                )));
            }
        }
        Ok(Self { config })
    }

    /// Formatter settings.
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Render a view of a player's statistics.
    ///
    /// Text views (`All`, `Mode`) produce a single page titled
    /// `Stats for {name}`, split into several when longer than the overflow
    /// length.
    #[instrument(skip(self, player), fields(player = %player.name()))]
    pub fn format(&self, player: &PlayerRecord, view: ViewSelector) -> PageSet {
        match view {
            ViewSelector::All => self.paginate_text(&stats_title(player), &self.all_text(player)),
            ViewSelector::Mode(mode) => {
                self.paginate_text(&stats_title(player), &self.mode_text(player, mode))
            }
            ViewSelector::Detailed => self.detailed_pages(player),
        }
    }

    /// Whether a text is long enough to need pagination.
    pub fn overflows(&self, text: &str) -> bool {
        char_len(text) > *self.config.overflow_page_length()
    }

    /// Split a text into pages sharing one title.
    pub fn paginate_text(&self, title: &str, text: &str) -> PageSet {
        if !self.overflows(text) {
            return PageSet::new(vec![Page::new(title, text, GENERAL_COLOR)], title);
        }
        let pages: Vec<Page> = split_text(text, *self.config.overflow_page_length())
            .into_iter()
            .map(|chunk| Page::new(title, chunk, GENERAL_COLOR))
            .collect();
        debug!(pages = pages.len(), "Text overflowed into pages");
        PageSet::new(pages, title)
    }

    /// Every game mode and every field as one text.
    pub fn all_text(&self, player: &PlayerRecord) -> String {
        let mut out = format!("**All Stats for {}:**\n", player.name());
        match player.stats() {
            Some(stats) => {
                for (mode, fields) in stats.entries() {
                    out.push_str(&format!("\n**{} Stats:**\n", mode));
                    if let Some(fields) = fields {
                        push_fields(&mut out, fields);
                    }
                }
            }
            None => out.push_str("No stats available."),
        }
        out
    }

    /// Curated statistics for one game mode.
    pub fn mode_text(&self, player: &PlayerRecord, mode: GameMode) -> String {
        let stats = player
            .mode(mode.stats_key())
            .unwrap_or_else(|| GameModeStats::empty());
        let title = format!("{} Stats for {}", mode.label(), player.name());
        match mode {
            GameMode::SkyWars => render_section(&title, skywars_fields(&stats)),
            GameMode::BedWars => render_section(&title, bedwars_fields(&stats)),
            GameMode::Duels => render_section(&title, duels_fields(&stats)),
            GameMode::BridgeDuels => render_section(&title, bridge_duels_fields(&stats)),
            GameMode::Pit => render_section(&title, pit_fields(&stats)),
            GameMode::SkyBlock => skyblock_text(player.name(), &stats),
        }
    }

    /// General info page plus the raw fields of every game mode.
    pub fn detailed_pages(&self, player: &PlayerRecord) -> PageSet {
        let mut pages = vec![
            Page::new(format!("General Info for {}", player.name()), "", GENERAL_COLOR)
                .with_fields(login_fields(player)),
        ];

        if let Some(stats) = player.stats() {
            for (mode, fields) in stats.modes() {
                let mut description = String::new();
                push_fields(&mut description, fields);

                let parts = split_text(&description, *self.config.detailed_page_length());
                let multipart = parts.len() > 1;
                for (idx, part) in parts.into_iter().enumerate() {
                    let title = if multipart {
                        format!("{} Stats (Part {})", mode, idx + 1)
                    } else {
                        format!("{} Stats", mode)
                    };
                    let body = if part.is_empty() {
                        NO_DATA.to_string()
                    } else {
                        part
                    };
                    pages.push(Page::new(title, body, MODE_COLOR));
                }
            }
        }

        debug!(pages = pages.len(), "Built detailed view");
        PageSet::new(pages, stats_title(player))
    }

    /// Basic profile page.
    pub fn profile_page(&self, player: &PlayerRecord) -> Page {
        let uuid = player.uuid().as_deref().unwrap_or_default();
        Page::new(
            format!("Hypixel Profile: {}", player.name()),
            format!("UUID: `{}`", uuid),
            GENERAL_COLOR,
        )
        .with_fields(login_fields(player))
    }

    /// Guild name and tag.
    pub fn guild_page(&self, username: &str, guild: &GuildRecord) -> Page {
        let body = format!(
            "**Guild Name:** {}\n**Tag:** {}",
            or_na(guild.name().as_deref()),
            or_na(guild.tag().as_deref())
        );
        Page::new(format!("Guild Info for {}", username), body, GUILD_COLOR)
    }

    /// Numbered list of recent games.
    pub fn recent_games_text(&self, username: &str, games: &[RecentGame]) -> String {
        if games.is_empty() {
            return format!("No recent games found for **{}**.", username);
        }
        let mut out = format!("**Recent Games for {}:**\n", username);
        for (idx, game) in games.iter().enumerate() {
            out.push_str(&format!(
                "**Game {}:** {} on {}\n",
                idx + 1,
                game.game_type()
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .unwrap_or("Unknown"),
                or_na(game.map().as_deref())
            ));
        }
        out
    }

    /// Username to identifier answer.
    pub fn identity_text(&self, username: &str, id: &str) -> String {
        format!("UUID for **{}** is: `{}`", username, id)
    }
}

fn stats_title(player: &PlayerRecord) -> String {
    format!("Stats for {}", player.name())
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}

/// Every field of a mode as `**key:** value` lines, nulls shown as `null`.
fn push_fields(out: &mut String, fields: GameModeStats<'_>) {
    for (key, value) in fields.iter() {
        push_line(out, key, &render_value(value));
    }
}

fn login_fields(player: &PlayerRecord) -> Vec<PageField> {
    vec![
        PageField::new_inline("Rank", player.display_rank().unwrap_or("N/A")),
        PageField::new_inline("First Login", login_date(*player.first_login())),
        PageField::new_inline("Last Login", login_date(*player.last_login())),
    ]
}

/// `M/D/YYYY` in UTC, or `N/A` when unknown.
fn login_date(millis: Option<i64>) -> String {
    millis
        .filter(|ms| *ms != 0)
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|date| date.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

type Fields = Vec<(&'static str, Option<String>)>;

fn count(stats: &GameModeStats<'_>, key: &str) -> Option<String> {
    Some(stats.display_or(key, "0"))
}

fn kd(stats: &GameModeStats<'_>, num: &str, den: &str) -> Option<String> {
    ratio(stats.value(num), stats.number(den))
}

fn skywars_fields(sw: &GameModeStats<'_>) -> Fields {
    vec![
        ("stars", Some(sw.display_or("skywars_level", "N/A"))),
        ("kills", count(sw, "skywars_kills")),
        ("deaths", count(sw, "skywars_deaths")),
        ("kdr", kd(sw, "skywars_kills", "skywars_deaths")),
        ("wins", count(sw, "skywars_wins")),
        ("losses", count(sw, "skywars_losses")),
        ("wlr", kd(sw, "skywars_wins", "skywars_losses")),
        ("finalKills", count(sw, "skywars_final_kills")),
        ("finalDeaths", count(sw, "skywars_final_deaths")),
        (
            "fkdr",
            kd(sw, "skywars_final_kills", "skywars_final_deaths"),
        ),
    ]
}

fn bedwars_fields(bw: &GameModeStats<'_>) -> Fields {
    vec![
        ("kills", count(bw, "kills_bedwars")),
        ("deaths", count(bw, "deaths_bedwars")),
        ("kdr", kd(bw, "kills_bedwars", "deaths_bedwars")),
        ("finalKills", count(bw, "final_kills_bedwars")),
        ("finalDeaths", count(bw, "final_deaths_bedwars")),
        ("fkdr", kd(bw, "final_kills_bedwars", "final_deaths_bedwars")),
        ("wins", count(bw, "wins_bedwars")),
        ("losses", count(bw, "losses_bedwars")),
        ("wlr", kd(bw, "wins_bedwars", "losses_bedwars")),
        ("bedsBroken", count(bw, "beds_broken_bedwars")),
        ("gamesPlayed", count(bw, "games_played_bedwars")),
    ]
}

fn duels_fields(duels: &GameModeStats<'_>) -> Fields {
    vec![
        ("wins", count(duels, "wins")),
        ("losses", count(duels, "losses")),
        ("kills", count(duels, "kills")),
        ("deaths", count(duels, "deaths")),
        ("kdr", kd(duels, "kills", "deaths")),
        ("wlr", kd(duels, "wins", "losses")),
        ("games", count(duels, "games")),
        ("comboKills", count(duels, "combo_kills")),
        ("comboDeaths", count(duels, "combo_deaths")),
    ]
}

fn bridge_duels_fields(duels: &GameModeStats<'_>) -> Fields {
    vec![
        ("wins", count(duels, "bridge_duels_wins")),
        ("losses", count(duels, "bridge_duels_losses")),
        ("kills", count(duels, "bridge_duels_kills")),
        ("deaths", count(duels, "bridge_duels_deaths")),
        ("kdr", kd(duels, "bridge_duels_kills", "bridge_duels_deaths")),
        ("wlr", kd(duels, "bridge_duels_wins", "bridge_duels_losses")),
    ]
}

fn pit_fields(pit: &GameModeStats<'_>) -> Fields {
    vec![
        ("coins", count(pit, "coins")),
        ("kills", count(pit, "kills")),
        ("deaths", count(pit, "deaths")),
        ("kdr", kd(pit, "kills", "deaths")),
        ("level", Some(pit.display_or("level", "N/A"))),
    ]
}

const SKYBLOCK_SECTIONS: [(&str, &str); 3] = [
    ("profiles", "Profiles"),
    ("collections", "Collections"),
    ("slayers", "Slayers"),
];

fn skyblock_text(name: &str, sb: &GameModeStats<'_>) -> String {
    let mut out = format!("**SkyBlock Stats for {}:**\n", name);
    if sb.is_empty() {
        out.push_str("No SkyBlock stats available.");
        return out;
    }

    for (key, title) in SKYBLOCK_SECTIONS {
        if sb.truthy(key).is_some() {
            if let Some((_, value)) = sb.iter().find(|(k, _)| *k == key) {
                out.push_str(&render_json_section(title, value));
            }
        }
    }

    let extras: Vec<(&str, Option<String>)> = sb
        .iter()
        .filter(|(key, _)| !SKYBLOCK_SECTIONS.iter().any(|(k, _)| k == key))
        .map(|(key, value)| (key, (!value.is_null()).then(|| render_value(value))))
        .collect();
    if !extras.is_empty() {
        out.push_str(&render_section("Other SkyBlock Stats", extras));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_game_mode_from_command_name() {
        assert_eq!(GameMode::from_str("skywars").unwrap(), GameMode::SkyWars);
        assert_eq!(GameMode::from_str("bridgeduels").unwrap(), GameMode::BridgeDuels);
        assert!(GameMode::from_str("stats").is_err());
    }

    #[test]
    fn test_login_date() {
        assert_eq!(login_date(Some(1_600_000_000_000)), "9/13/2020");
        assert_eq!(login_date(Some(0)), "N/A");
        assert_eq!(login_date(None), "N/A");
    }

    #[test]
    fn test_zero_page_length_rejected() {
        let config = FormatConfig::default().with_detailed_page_length(0usize);
        let err = StatFormatter::new(config).unwrap_err();
        assert_eq!(*err.kind(), FormatterErrorKind::InvalidPageLength(0));
    }
}
