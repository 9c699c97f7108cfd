//! Tests for command routing against a scripted upstream.

use async_trait::async_trait;
use hypepulse_cache::ResultCache;
use hypepulse_error::HttpError;
use hypepulse_format::{FormatConfig, PaginationConfig, StatFormatter};
use hypepulse_social::{CommandRouter, Reply, UNKNOWN_COMMAND};
use hypepulse_upstream::{HttpResponse, HttpTransport, UpstreamClient, UpstreamConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const NOTCH_ID: &str = "069a79f444e94726a5befca90e38aaf5";
const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Fake identity and stats services answering by URL path.
struct FakeServices {
    identity: Option<Value>,
    player_status: u16,
    player: Value,
    recent_games: Value,
    guild: Value,
    calls: Mutex<Vec<String>>,
}

impl FakeServices {
    fn new(player: Value) -> Self {
        Self {
            identity: Some(json!({"id": NOTCH_ID, "name": "Notch"})),
            player_status: 200,
            player: json!({"success": true, "player": player}),
            recent_games: json!({"success": true, "games": []}),
            guild: json!({"success": true, "guild": null}),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeServices {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.calls.lock().unwrap().push(url.to_string());
        let response = if url.contains("/users/profiles/minecraft/") {
            match &self.identity {
                Some(body) => HttpResponse::new(200, body.to_string()),
                None => HttpResponse::new(
                    404,
                    r#"{"errorMessage":"Couldn't find any profile with name nobody"}"#,
                ),
            }
        } else if url.contains("/recentgames") {
            HttpResponse::new(200, self.recent_games.to_string())
        } else if url.contains("/guild") {
            HttpResponse::new(200, self.guild.to_string())
        } else if self.player_status != 200 {
            HttpResponse::new(self.player_status, "x".repeat(6000))
        } else {
            HttpResponse::new(200, self.player.to_string())
        };
        Ok(response)
    }
}

fn router(services: Arc<FakeServices>) -> CommandRouter {
    let upstream = UpstreamClient::with_transport(
        UpstreamConfig::default(),
        "test-key",
        Arc::new(ResultCache::default()),
        services,
    )
    .unwrap();
    let formatter = StatFormatter::new(FormatConfig::default()).unwrap();
    CommandRouter::new(upstream, formatter, PaginationConfig::default())
}

fn notch() -> Value {
    json!({
        "displayname": "Notch",
        "rank": "ADMIN",
        "stats": {"SkyWars": {"skywars_kills": 10}}
    })
}

#[tokio::test]
async fn test_uuid_command_only_resolves_identity() {
    let services = Arc::new(FakeServices::new(notch()));
    let router = router(services.clone());

    let reply = router.handle("uuid", "Notch").await;

    assert_eq!(
        reply.as_text(),
        Some("UUID for **Notch** is: `069a79f444e94726a5befca90e38aaf5`")
    );
    assert_eq!(services.calls().len(), 1);
}

#[tokio::test]
async fn test_unknown_username_reports_error_without_stats_call() {
    let mut fake = FakeServices::new(notch());
    fake.identity = None;
    let services = Arc::new(fake);
    let router = router(services.clone());

    let reply = router.handle("skywars", "nobody").await;

    let text = reply.as_text().unwrap();
    assert!(text.starts_with("Error: Error fetching UUID: "));
    assert!(text.contains("Couldn't find any profile"));
    assert!(services.calls().iter().all(|url| !url.contains("/player")));
}

#[tokio::test]
async fn test_unknown_command() {
    let services = Arc::new(FakeServices::new(notch()));
    let router = router(services.clone());

    let reply = router.handle("hypixel", "Notch").await;

    assert_eq!(reply.as_text(), Some(UNKNOWN_COMMAND));
    assert!(services.calls().is_empty());
}

#[tokio::test]
async fn test_mode_command_replies_with_text() {
    let router = router(Arc::new(FakeServices::new(notch())));

    let reply = router.handle("skywars", "Notch").await;

    let text = reply.as_text().unwrap();
    assert!(text.starts_with("**SkyWars Stats for Notch:**"));
    assert!(text.contains("**kdr:** 10\n"));
}

#[tokio::test]
async fn test_player_command_replies_with_profile_page() {
    let router = router(Arc::new(FakeServices::new(notch())));

    match router.handle("player", "Notch").await {
        Reply::Page(page) => {
            assert_eq!(page.title(), "Hypixel Profile: Notch");
            assert_eq!(page.body(), &format!("UUID: `{}`", NOTCH_ID));
        }
        other => panic!("expected a page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_guild_not_found_message() {
    let router = router(Arc::new(FakeServices::new(notch())));

    let reply = router.handle("guild", "Notch").await;

    assert_eq!(
        reply.as_text(),
        Some("Error: Error fetching guild info: Guild not found for this player.")
    );
}

#[tokio::test]
async fn test_no_recent_games() {
    let router = router(Arc::new(FakeServices::new(notch())));

    let reply = router.handle("recentgames", "Notch").await;

    assert_eq!(reply.as_text(), Some("No recent games found for **Notch**."));
}

#[tokio::test]
async fn test_long_stats_are_paginated_with_overflow_timeout() {
    let fields: serde_json::Map<String, Value> = (0..400)
        .map(|i| (format!("stat_number_{:04}", i), json!(i)))
        .collect();
    let player = json!({"displayname": "Notch", "stats": {"Arcade": fields}});
    let router = router(Arc::new(FakeServices::new(player)));

    match router.handle("stats", "Notch").await {
        Reply::Paginated(paginator) => {
            assert!(paginator.len() > 1);
            assert_eq!(paginator.timeout(), Duration::from_millis(120_000));
            assert_eq!(paginator.current().title(), "Stats for Notch");
        }
        other => panic!("expected pagination, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detailed_stats_use_detailed_timeout() {
    let router = router(Arc::new(FakeServices::new(notch())));

    match router.handle("detailedstats", "Notch").await {
        Reply::Paginated(paginator) => {
            assert_eq!(paginator.len(), 2);
            assert_eq!(paginator.timeout(), Duration::from_millis(180_000));
            assert_eq!(paginator.current().title(), "General Info for Notch");
            assert_eq!(
                paginator.pages().get(1).unwrap().title(),
                "SkyWars Stats"
            );
        }
        other => panic!("expected pagination, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detailed_stats_without_modes_is_single_page() {
    let router = router(Arc::new(FakeServices::new(json!({"displayname": "Notch"}))));

    match router.handle("detailedstats", "Notch").await {
        Reply::Page(page) => assert_eq!(page.title(), "General Info for Notch"),
        other => panic!("expected a page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_command_reuses_cached_identity() {
    let services = Arc::new(FakeServices::new(notch()));
    let router = router(services.clone());

    router.handle("pit", "Notch").await;
    router.handle("bedwars", "notch").await;

    let identity_calls = services
        .calls()
        .iter()
        .filter(|url| url.contains("/users/profiles/minecraft/"))
        .count();
    let player_calls = services
        .calls()
        .iter()
        .filter(|url| url.contains("/player?"))
        .count();
    assert_eq!(identity_calls, 1);
    assert_eq!(player_calls, 1);
}

#[tokio::test]
async fn test_long_recent_games_are_paginated_with_overflow_timeout() {
    let mut fake = FakeServices::new(notch());
    let games: Vec<Value> = (0..100)
        .map(|i| json!({"gameType": "BEDWARS", "map": format!("Lighthouse Remastered Edition {}", i)}))
        .collect();
    fake.recent_games = json!({"success": true, "games": games});
    let router = router(Arc::new(fake));

    match router.handle("recentgames", "Notch").await {
        Reply::Paginated(paginator) => {
            assert!(paginator.len() > 1);
            assert_eq!(paginator.timeout(), Duration::from_millis(120_000));
            assert_eq!(paginator.current().title(), "Recent Games for Notch");
            assert!(paginator.current().body().starts_with("**Recent Games for Notch:**"));
        }
        other => panic!("expected pagination, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_error_reply_quotes_bounded_upstream_body() {
    let mut fake = FakeServices::new(notch());
    fake.player_status = 502;
    let router = router(Arc::new(fake));

    let reply = router.handle("stats", "Notch").await;

    let text = reply.as_text().unwrap();
    assert!(text.starts_with("Error: Error fetching Hypixel player data: "));
    assert!(text.ends_with('…'));
    assert!(text.chars().count() < DISCORD_MESSAGE_LIMIT);
}
