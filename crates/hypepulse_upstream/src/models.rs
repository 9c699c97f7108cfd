//! Player, guild and game records returned by the upstream services.
//!
//! The stats service returns a deeply nested, schema-less document per game
//! mode. Known top-level fields are typed; per-mode statistics are kept as raw
//! JSON objects (key order preserved) and read through [`GameModeStats`],
//! whose accessors treat a missing field as absent instead of failing.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};
use std::fmt;
use std::sync::LazyLock;

/// A username resolved to its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerIdentity {
    /// Username with the capitalisation the identity service reports
    username: String,
    /// Undashed 128-bit identifier
    id: String,
}

impl PlayerIdentity {
    /// Create an identity from its parts.
    pub fn new(username: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: id.into(),
        }
    }
}

/// Player record from the stats service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct PlayerRecord {
    /// Player identifier
    #[serde(default)]
    uuid: Option<String>,
    /// Display name with original capitalisation
    #[serde(default)]
    displayname: Option<String>,
    /// Lowercase player name
    #[serde(default)]
    playername: Option<String>,
    /// Staff or special rank
    #[serde(default)]
    rank: Option<String>,
    /// Purchased package rank
    #[serde(default, rename = "newPackageRank")]
    new_package_rank: Option<String>,
    /// First login, milliseconds since the Unix epoch
    #[serde(default, rename = "firstLogin")]
    first_login: Option<i64>,
    /// Last login, milliseconds since the Unix epoch
    #[serde(default, rename = "lastLogin")]
    last_login: Option<i64>,
    /// Statistics per game mode
    #[serde(default)]
    stats: Option<PlayerStats>,
}

impl PlayerRecord {
    /// Name to show in titles: display name, then player name, then `Unknown`.
    pub fn name(&self) -> &str {
        self.displayname
            .as_deref()
            .or(self.playername.as_deref())
            .unwrap_or("Unknown")
    }

    /// Rank to show: staff rank, then package rank.
    pub fn display_rank(&self) -> Option<&str> {
        self.rank
            .as_deref()
            .filter(|r| !r.is_empty())
            .or(self.new_package_rank.as_deref().filter(|r| !r.is_empty()))
    }

    /// Fill in the identifier if the upstream omitted it.
    pub fn with_uuid_fallback(mut self, id: &str) -> Self {
        if self.uuid.as_deref().is_none_or(str::is_empty) {
            self.uuid = Some(id.to_string());
        }
        self
    }

    /// Statistics for one game mode, if present and object-shaped.
    pub fn mode(&self, key: &str) -> Option<GameModeStats<'_>> {
        self.stats.as_ref().and_then(|s| s.mode(key))
    }
}

/// All game-mode statistics of a player, keyed by mode name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStats(Map<String, JsonValue>);

impl PlayerStats {
    /// Statistics for one game mode, if present and object-shaped.
    pub fn mode(&self, key: &str) -> Option<GameModeStats<'_>> {
        self.0.get(key).and_then(GameModeStats::from_json)
    }

    /// Every game mode in upstream order, with its fields when the mode's
    /// value is an object.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<GameModeStats<'_>>)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), GameModeStats::from_json(value)))
    }

    /// Every object-shaped game mode in upstream order.
    ///
    /// Modes whose value is not an object have no fields to show and are
    /// skipped.
    pub fn modes(&self) -> impl Iterator<Item = (&str, GameModeStats<'_>)> {
        self.entries().filter_map(|(name, stats)| {
            if stats.is_none() {
                tracing::debug!(mode = %name, "Skipping non-object game mode");
            }
            stats.map(|s| (name, s))
        })
    }

    /// Whether no game mode is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, JsonValue>> for PlayerStats {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

/// Read-only view of one game mode's statistics.
#[derive(Debug, Clone, Copy)]
pub struct GameModeStats<'a> {
    fields: &'a Map<String, JsonValue>,
}

static NO_FIELDS: LazyLock<Map<String, JsonValue>> = LazyLock::new(Map::new);

impl GameModeStats<'static> {
    /// A mode with no recorded statistics.
    pub fn empty() -> Self {
        Self { fields: &NO_FIELDS }
    }
}

impl<'a> GameModeStats<'a> {
    /// View a JSON value as game-mode statistics, if it is an object.
    pub fn from_json(value: &'a JsonValue) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    /// A present, non-null field.
    pub fn value(&self, key: &str) -> Option<StatValue<'a>> {
        self.fields.get(key).and_then(StatValue::from_json)
    }

    /// A numeric field.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(JsonValue::as_f64)
    }

    /// A field that is present and truthy.
    ///
    /// Zero, empty strings, `false` and `null` count as absent, matching how
    /// the stats display has always defaulted them.
    pub fn truthy(&self, key: &str) -> Option<StatValue<'a>> {
        self.value(key).filter(StatValue::is_truthy)
    }

    /// Render a truthy field, or the given default.
    pub fn display_or(&self, key: &str, default: &str) -> String {
        self.truthy(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| default.to_string())
    }

    /// Every field in upstream order, nulls included.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a JsonValue)> + 'a {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the mode has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// A scalar statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// Text value
    Text(&'a str),
    /// Numeric value
    Number(&'a Number),
    /// Boolean flag
    Bool(bool),
}

/// A statistic value: a scalar, or a nested structure rendered as JSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue<'a> {
    /// Text, number or flag
    Scalar(Scalar<'a>),
    /// Object or array
    Nested(&'a JsonValue),
}

impl<'a> StatValue<'a> {
    /// Classify a JSON value. `null` is absent.
    pub fn from_json(value: &'a JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::Bool(b) => Some(Self::Scalar(Scalar::Bool(*b))),
            JsonValue::Number(n) => Some(Self::Scalar(Scalar::Number(n))),
            JsonValue::String(s) => Some(Self::Scalar(Scalar::Text(s))),
            JsonValue::Array(_) | JsonValue::Object(_) => Some(Self::Nested(value)),
        }
    }

    /// Numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// JavaScript-style truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Scalar(Scalar::Text(s)) => !s.is_empty(),
            Self::Scalar(Scalar::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Self::Scalar(Scalar::Bool(b)) => *b,
            Self::Nested(_) => true,
        }
    }
}

impl fmt::Display for StatValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(Scalar::Text(s)) => f.write_str(s),
            Self::Scalar(Scalar::Number(n)) => f.write_str(&format_number(n)),
            Self::Scalar(Scalar::Bool(b)) => write!(f, "{}", b),
            Self::Nested(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
        }
    }
}

/// Render a number the way the stats have always been displayed: integral
/// values without a fractional part, everything else in shortest form.
///
/// ```
/// use hypepulse_upstream::format_number;
/// use serde_json::Number;
///
/// assert_eq!(format_number(&Number::from(42)), "42");
/// assert_eq!(format_number(&Number::from_f64(3.0).unwrap()), "3");
/// assert_eq!(format_number(&Number::from_f64(1.25).unwrap()), "1.25");
/// ```
pub fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => format_float(f),
        None => n.to_string(),
    }
}

/// Render a float without a trailing `.0` when integral.
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// One entry of a player's recent games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct RecentGame {
    /// Game type identifier, e.g. `BEDWARS`
    #[serde(default, rename = "gameType")]
    game_type: Option<String>,
    /// Map name
    #[serde(default)]
    map: Option<String>,
    /// Sub-mode identifier
    #[serde(default)]
    mode: Option<String>,
    /// Start time, milliseconds since the Unix epoch
    #[serde(default)]
    date: Option<i64>,
    /// End time, milliseconds since the Unix epoch (absent while in progress)
    #[serde(default)]
    ended: Option<i64>,
}

/// Guild record from the stats service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct GuildRecord {
    /// Guild identifier
    #[serde(default, rename = "_id")]
    id: Option<String>,
    /// Guild name
    #[serde(default)]
    name: Option<String>,
    /// Guild tag shown next to member names
    #[serde(default)]
    tag: Option<String>,
    /// Guild members as raw records
    #[serde(default)]
    members: Vec<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_record_tolerates_missing_fields() {
        let record: PlayerRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.name(), "Unknown");
        assert!(record.stats().is_none());
        assert!(record.display_rank().is_none());
    }

    #[test]
    fn test_name_falls_back_to_playername() {
        let record: PlayerRecord =
            serde_json::from_value(json!({"playername": "notch"})).unwrap();
        assert_eq!(record.name(), "notch");
    }

    #[test]
    fn test_display_rank_prefers_staff_rank() {
        let record: PlayerRecord =
            serde_json::from_value(json!({"rank": "ADMIN", "newPackageRank": "MVP_PLUS"}))
                .unwrap();
        assert_eq!(record.display_rank(), Some("ADMIN"));

        let record: PlayerRecord =
            serde_json::from_value(json!({"newPackageRank": "VIP"})).unwrap();
        assert_eq!(record.display_rank(), Some("VIP"));
    }

    #[test]
    fn test_uuid_fallback_only_fills_missing() {
        let record: PlayerRecord = serde_json::from_value(json!({"uuid": "abc"})).unwrap();
        assert_eq!(record.with_uuid_fallback("def").uuid().as_deref(), Some("abc"));

        let record = PlayerRecord::default().with_uuid_fallback("def");
        assert_eq!(record.uuid().as_deref(), Some("def"));
    }

    #[test]
    fn test_modes_preserve_order_and_skip_scalars() {
        let record: PlayerRecord = serde_json::from_value(json!({
            "stats": {
                "SkyWars": {"skywars_kills": 1},
                "Broken": 7,
                "Bedwars": {"kills_bedwars": 2}
            }
        }))
        .unwrap();
        let names: Vec<&str> = record
            .stats()
            .as_ref()
            .unwrap()
            .modes()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["SkyWars", "Bedwars"]);
    }

    #[test]
    fn test_truthiness_defaults() {
        let raw = json!({"zero": 0, "empty": "", "off": false, "null": null, "lvl": "5⋆", "n": 3});
        let stats = GameModeStats::from_json(&raw).unwrap();

        assert_eq!(stats.display_or("zero", "0"), "0");
        assert_eq!(stats.display_or("empty", "N/A"), "N/A");
        assert_eq!(stats.display_or("off", "N/A"), "N/A");
        assert_eq!(stats.display_or("null", "N/A"), "N/A");
        assert_eq!(stats.display_or("missing", "N/A"), "N/A");
        assert_eq!(stats.display_or("lvl", "N/A"), "5⋆");
        assert_eq!(stats.display_or("n", "0"), "3");
    }

    #[test]
    fn test_nested_values_render_as_indented_json() {
        let raw = json!({"packages": {"kit": "default"}});
        let stats = GameModeStats::from_json(&raw).unwrap();
        let rendered = stats.value("packages").unwrap().to_string();
        assert_eq!(rendered, "{\n  \"kit\": \"default\"\n}");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(10.0), "10");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-2.0), "-2");
    }
}
