//! Tests for paginated reply navigation.

use hypepulse_format::{
    Control, Page, PageSet, PaginationConfig, PaginationTier, Paginator, PaginatorState,
    GENERAL_COLOR,
};
use std::str::FromStr;
use std::time::Duration;

fn three_pages() -> PageSet {
    PageSet::new(
        (1..=3)
            .map(|n| Page::new("Stats for Notch", format!("page {}", n), GENERAL_COLOR))
            .collect(),
        "Stats for Notch",
    )
}

#[tokio::test]
async fn test_next_next_previous_lands_on_second_page() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_secs(120));

    assert!(paginator.apply(Control::Next));
    assert!(paginator.apply(Control::Next));
    assert!(paginator.apply(Control::Previous));

    assert_eq!(paginator.index(), 1);
    assert_eq!(paginator.current().body(), "page 2");
}

#[tokio::test]
async fn test_previous_on_first_page_stays() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_secs(120));

    paginator.apply(Control::Previous);

    assert_eq!(paginator.index(), 0);
}

#[tokio::test]
async fn test_next_on_last_page_stays() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_secs(120));

    for _ in 0..5 {
        paginator.apply(Control::Next);
    }

    assert_eq!(paginator.index(), 2);
}

#[tokio::test]
async fn test_render_adds_footer() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_secs(120));
    assert_eq!(paginator.render().footer().as_deref(), Some("Page 1 / 3"));

    paginator.apply(Control::Next);
    let page = paginator.render();
    assert_eq!(page.footer().as_deref(), Some("Page 2 / 3"));
    assert_eq!(page.body(), "page 2");
    // The stored page is untouched
    assert!(paginator.current().footer().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_expires_after_inactivity() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_millis(120_000));

    tokio::time::advance(Duration::from_millis(120_001)).await;

    assert!(!paginator.apply(Control::Next));
    assert_eq!(paginator.index(), 0);
    assert_eq!(paginator.state(), PaginatorState::Expired);
    assert_eq!(paginator.remaining(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_interaction_resets_inactivity_clock() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_secs(120));

    tokio::time::advance(Duration::from_secs(100)).await;
    assert!(paginator.apply(Control::Next));

    tokio::time::advance(Duration::from_secs(100)).await;
    assert_eq!(paginator.refresh_state(), PaginatorState::Active);
    assert_eq!(paginator.remaining(), Duration::from_secs(20));

    assert!(paginator.apply(Control::Next));
    assert_eq!(paginator.index(), 2);
}

#[tokio::test]
async fn test_expire_is_final() {
    let mut paginator = Paginator::new(three_pages(), Duration::from_secs(120));

    paginator.expire();

    assert!(!paginator.apply(Control::Next));
    assert_eq!(paginator.refresh_state(), PaginatorState::Expired);
}

#[tokio::test]
async fn test_tier_timeouts() {
    let config = PaginationConfig::default();
    let detailed = Paginator::new(three_pages(), config.timeout_for(PaginationTier::Detailed));
    let overflow = Paginator::new(three_pages(), config.timeout_for(PaginationTier::Overflow));

    assert_eq!(detailed.timeout(), Duration::from_millis(180_000));
    assert_eq!(overflow.timeout(), Duration::from_millis(120_000));
}

#[test]
fn test_control_names() {
    assert_eq!(Control::from_str("next").unwrap(), Control::Next);
    assert_eq!(Control::from_str("previous").unwrap(), Control::Previous);
    assert_eq!(Control::Next.to_string(), "next");
}
