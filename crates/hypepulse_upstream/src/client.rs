//! Identity and stats service client with caching and bounded retry.

use crate::{
    GuildRecord, HttpResponse, HttpTransport, PlayerIdentity, PlayerRecord, RecentGame,
    ReqwestTransport, UpstreamConfig,
};
use hypepulse_cache::{CacheCategory, ResultCache};
use hypepulse_error::{
    ConfigError, HypePulseResult, UpstreamCall, UpstreamError, UpstreamErrorKind, UpstreamResult,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};
use url::Url;

const USERNAME_NOT_FOUND: &str = "Username not found in Mojang API.";
const PLAYER_FETCH_FAILED: &str = "Failed to fetch data from Hypixel API.";
const PLAYER_NOT_FOUND: &str = "Player not found on Hypixel.";
const RECENT_GAMES_FETCH_FAILED: &str = "Failed to fetch recent games.";
const GUILD_FETCH_FAILED: &str = "Failed to fetch guild data from Hypixel API.";
const GUILD_NOT_FOUND: &str = "Guild not found for this player.";
/// Longest response body quoted in an error detail (characters).
const DETAIL_LIMIT: usize = 300;

/// Client for the identity service and the stats service.
///
/// Every lookup checks the [`ResultCache`] first. On a miss the upstream is
/// called, transient failures are retried with exponential backoff, and the
/// successful payload is cached before it is returned.
///
/// # Example
///
/// ```rust,ignore
/// let cache = Arc::new(ResultCache::default());
/// let client = UpstreamClient::new(UpstreamConfig::default(), api_key, cache)?;
///
/// let identity = client.resolve_identity("Notch").await?;
/// let player = client.fetch_player(identity.id()).await?;
/// ```
#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ResultCache>,
    config: UpstreamConfig,
    identity_base: Url,
    stats_base: Url,
    api_key: String,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("identity_base", &self.identity_base.as_str())
            .field("stats_base", &self.stats_base.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    /// Create a client that talks to the network through reqwest.
    pub fn new(
        config: UpstreamConfig,
        api_key: impl Into<String>,
        cache: Arc<ResultCache>,
    ) -> HypePulseResult<Self> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Self::with_transport(config, api_key, cache, Arc::new(transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        config: UpstreamConfig,
        api_key: impl Into<String>,
        cache: Arc<ResultCache>,
        transport: Arc<dyn HttpTransport>,
    ) -> HypePulseResult<Self> {
        let identity_base = parse_base_url(config.identity_base_url())?;
        let stats_base = parse_base_url(config.stats_base_url())?;
        debug!(
            identity_base = %identity_base,
            stats_base = %stats_base,
            "Creating upstream client"
        );

        Ok(Self {
            transport,
            cache,
            config,
            identity_base,
            stats_base,
            api_key: api_key.into(),
        })
    }

    /// The cache this client reads through.
    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Resolve a username to its identifier.
    #[instrument(skip(self))]
    pub async fn resolve_identity(&self, username: &str) -> UpstreamResult<PlayerIdentity> {
        let call = UpstreamCall::Identity;
        let username = username.trim();

        if let Some(cached) = self.cache.get(CacheCategory::Identity, username) {
            debug!("Identity cache hit");
            return identity_from_payload(username, &cached);
        }

        let url = self.identity_url(username);
        let response = self.get_with_retry(call, &url).await?;
        let status = *response.status();

        if status == 404 || status == 204 || response.body().trim().is_empty() {
            let detail = json_field(response.body(), "errorMessage")
                .or_else(|| non_empty(response.body()))
                .unwrap_or_else(|| USERNAME_NOT_FOUND.to_string());
            debug!(status, "Username not found");
            return Err(UpstreamError::new(call, UpstreamErrorKind::NotFound(detail)));
        }
        if !response.is_success() {
            return Err(rejected(call, &response));
        }

        let payload: JsonValue = serde_json::from_str(response.body())
            .map_err(|e| malformed(call, format!("Response is not JSON: {}", e)))?;
        let identity = identity_from_payload(username, &payload)?;

        self.cache.set(CacheCategory::Identity, username, payload, None);
        debug!(id = %identity.id(), "Resolved identity");
        Ok(identity)
    }

    /// Fetch the player record for an identifier.
    #[instrument(skip(self))]
    pub async fn fetch_player(&self, id: &str) -> UpstreamResult<PlayerRecord> {
        let call = UpstreamCall::Player;

        let player = match self.cache.get(CacheCategory::Player, id) {
            Some(cached) => {
                debug!("Player cache hit");
                cached
            }
            None => {
                let url = self.stats_url("player", "uuid", id);
                let mut body = self.fetch_stats(call, &url, PLAYER_FETCH_FAILED).await?;
                let player = take_present(&mut body, "player")
                    .ok_or_else(|| not_found(call, PLAYER_NOT_FOUND))?;
                self.cache
                    .set(CacheCategory::Player, id, player.clone(), None);
                player
            }
        };

        let record: PlayerRecord = decode(call, player)?;
        Ok(record.with_uuid_fallback(id))
    }

    /// Fetch the most recent games played by an identifier.
    #[instrument(skip(self))]
    pub async fn fetch_recent_games(&self, id: &str) -> UpstreamResult<Vec<RecentGame>> {
        let call = UpstreamCall::RecentGames;

        let games = match self.cache.get(CacheCategory::RecentGames, id) {
            Some(cached) => {
                debug!("Recent games cache hit");
                cached
            }
            None => {
                let url = self.stats_url("recentgames", "uuid", id);
                let mut body = self
                    .fetch_stats(call, &url, RECENT_GAMES_FETCH_FAILED)
                    .await?;
                let games = match take_present(&mut body, "games") {
                    None => JsonValue::Array(Vec::new()),
                    Some(games @ JsonValue::Array(_)) => games,
                    Some(_) => return Err(malformed(call, "Field `games` is not a list")),
                };
                self.cache
                    .set(CacheCategory::RecentGames, id, games.clone(), None);
                games
            }
        };

        decode(call, games)
    }

    /// Fetch the guild an identifier belongs to.
    #[instrument(skip(self))]
    pub async fn fetch_guild(&self, id: &str) -> UpstreamResult<GuildRecord> {
        let call = UpstreamCall::Guild;

        let guild = match self.cache.get(CacheCategory::Guild, id) {
            Some(cached) => {
                debug!("Guild cache hit");
                cached
            }
            None => {
                let url = self.stats_url("guild", "player", id);
                let mut body = self.fetch_stats(call, &url, GUILD_FETCH_FAILED).await?;
                let guild = take_present(&mut body, "guild")
                    .ok_or_else(|| not_found(call, GUILD_NOT_FOUND))?;
                self.cache.set(CacheCategory::Guild, id, guild.clone(), None);
                guild
            }
        };

        decode(call, guild)
    }

    fn identity_url(&self, username: &str) -> String {
        let mut url = self.identity_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", "profiles", "minecraft", username]);
        }
        url.to_string()
    }

    fn stats_url(&self, endpoint: &str, id_param: &str, id: &str) -> String {
        let mut url = self.stats_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair(id_param, id);
        url.to_string()
    }

    /// Call a stats endpoint and check its `success` envelope.
    async fn fetch_stats(
        &self,
        call: UpstreamCall,
        url: &str,
        failure_detail: &str,
    ) -> UpstreamResult<Map<String, JsonValue>> {
        let response = self.get_with_retry(call, url).await?;
        if !response.is_success() {
            return Err(rejected(call, &response));
        }

        let body: JsonValue = serde_json::from_str(response.body())
            .map_err(|e| malformed(call, format!("Response is not JSON: {}", e)))?;
        let JsonValue::Object(body) = body else {
            return Err(malformed(call, "Response is not a JSON object"));
        };

        match body.get("success").and_then(JsonValue::as_bool) {
            Some(true) => Ok(body),
            Some(false) => {
                debug!(cause = ?body.get("cause"), "Stats service reported failure");
                Err(not_found(call, failure_detail))
            }
            None => Err(malformed(call, "Missing field `success`")),
        }
    }

    /// GET a URL, retrying transport failures, 5xx and 429.
    ///
    /// Any other status is returned for the caller to interpret.
    async fn get_with_retry(&self, call: UpstreamCall, url: &str) -> UpstreamResult<HttpResponse> {
        let max_attempts = *self.config.max_attempts();
        let mut attempt = 0usize;

        Retry::spawn(self.config.retry_delays(), || {
            attempt += 1;
            let current = attempt;
            let transport = Arc::clone(&self.transport);
            let url = url.to_string();
            async move {
                let detail = match transport.get(&url).await {
                    Ok(response) if !response.is_transient() => return Ok(response),
                    Ok(response) => status_detail(&response),
                    Err(e) => e.message,
                };
                warn!(
                    call = %call,
                    attempt = current,
                    max_attempts,
                    error = %detail,
                    "Transient upstream failure"
                );
                Err(RetryError::Transient {
                    err: UpstreamError::new(call, UpstreamErrorKind::UpstreamUnavailable(detail)),
                    retry_after: None,
                })
            }
        })
        .await
    }
}

fn parse_base_url(raw: &str) -> HypePulseResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::new(format!("Invalid upstream URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::new(format!("Upstream URL '{}' cannot be a base", raw)).into());
    }
    Ok(url)
}

fn identity_from_payload(username: &str, payload: &JsonValue) -> UpstreamResult<PlayerIdentity> {
    let call = UpstreamCall::Identity;
    let id = payload
        .get("id")
        .and_then(JsonValue::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| malformed(call, "Missing field `id`"))?;
    let name = payload
        .get("name")
        .and_then(JsonValue::as_str)
        .unwrap_or(username);
    Ok(PlayerIdentity::new(name, id))
}

/// Remove a field, treating `null` as absent.
fn take_present(body: &mut Map<String, JsonValue>, key: &str) -> Option<JsonValue> {
    body.remove(key).filter(|v| !v.is_null())
}

fn decode<T: DeserializeOwned>(call: UpstreamCall, value: JsonValue) -> UpstreamResult<T> {
    serde_json::from_value(value).map_err(|e| malformed(call, format!("Unexpected shape: {}", e)))
}

fn json_field(body: &str, key: &str) -> Option<String> {
    serde_json::from_str::<JsonValue>(body)
        .ok()?
        .get(key)?
        .as_str()
        .map(clip)
}

fn non_empty(body: &str) -> Option<String> {
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| clip(trimmed))
}

/// Quote at most `DETAIL_LIMIT` characters of a body, marking the cut.
fn clip(text: &str) -> String {
    match text.char_indices().nth(DETAIL_LIMIT) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

fn status_detail(response: &HttpResponse) -> String {
    non_empty(response.body())
        .unwrap_or_else(|| format!("Request failed with status code {}", response.status()))
}

#[track_caller]
fn rejected(call: UpstreamCall, response: &HttpResponse) -> UpstreamError {
    warn!(call = %call, status = response.status(), "Upstream rejected request");
    UpstreamError::new(
        call,
        UpstreamErrorKind::Rejected {
            status: *response.status(),
            body: status_detail(response),
        },
    )
}

#[track_caller]
fn not_found(call: UpstreamCall, detail: &str) -> UpstreamError {
    UpstreamError::new(call, UpstreamErrorKind::NotFound(detail.to_string()))
}

#[track_caller]
fn malformed(call: UpstreamCall, detail: impl Into<String>) -> UpstreamError {
    let detail = detail.into();
    warn!(call = %call, detail = %detail, "Malformed upstream response");
    UpstreamError::new(call, UpstreamErrorKind::MalformedResponse(detail))
}
