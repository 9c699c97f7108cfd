//! Page navigation state for paginated replies.

use crate::{Page, PageSet};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Navigation control pressed by the user.
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
)]
#[strum(serialize_all = "lowercase")]
pub enum Control {
    /// Go back one page
    Previous,
    /// Go forward one page
    Next,
}

/// Which inactivity timeout applies to a paginated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaginationTier {
    /// Detailed stats view
    Detailed,
    /// Text that overflowed a single message
    Overflow,
}

/// Paginator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaginatorState {
    /// Accepting controls
    Active,
    /// Timed out; controls are ignored
    Expired,
}

/// Page cursor over a [`PageSet`] with an inactivity timeout.
///
/// Navigation is clamped at both ends. Every accepted control resets the
/// inactivity clock; once the timeout elapses without one, the paginator
/// expires and stays expired.
///
/// # Examples
///
/// ```
/// use hypepulse_format::{Control, Page, PageSet, Paginator, GENERAL_COLOR};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let pages = PageSet::new(
///     vec![Page::new("a", "1", GENERAL_COLOR), Page::new("b", "2", GENERAL_COLOR)],
///     "Stats",
/// );
/// let mut paginator = Paginator::new(pages, Duration::from_secs(120));
///
/// paginator.apply(Control::Next);
/// assert_eq!(paginator.render().footer().as_deref(), Some("Page 2 / 2"));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Paginator {
    pages: PageSet,
    index: usize,
    state: PaginatorState,
    timeout: Duration,
    last_activity: Instant,
}

impl Paginator {
    /// Start at the first page, active.
    pub fn new(pages: PageSet, timeout: Duration) -> Self {
        Self {
            pages,
            index: 0,
            state: PaginatorState::Active,
            timeout,
            last_activity: Instant::now(),
        }
    }

    /// Apply a control. Returns whether it was accepted.
    ///
    /// Controls arriving after the timeout are ignored and expire the
    /// paginator.
    pub fn apply(&mut self, control: Control) -> bool {
        if self.refresh_state() == PaginatorState::Expired {
            tracing::debug!(%control, "Ignoring control on expired paginator");
            return false;
        }

        self.index = match control {
            Control::Next => (self.index + 1).min(self.pages.len() - 1),
            Control::Previous => self.index.saturating_sub(1),
        };
        self.last_activity = Instant::now();
        true
    }

    /// Current state, expiring the paginator if its timeout has elapsed.
    pub fn refresh_state(&mut self) -> PaginatorState {
        if self.state == PaginatorState::Active && self.remaining().is_zero() {
            self.state = PaginatorState::Expired;
        }
        self.state
    }

    /// Force expiry.
    pub fn expire(&mut self) {
        self.state = PaginatorState::Expired;
    }

    /// Time left before expiry without further interaction.
    pub fn remaining(&self) -> Duration {
        if self.state == PaginatorState::Expired {
            return Duration::ZERO;
        }
        self.timeout.saturating_sub(self.last_activity.elapsed())
    }

    /// Current page with a `Page n / total` footer.
    pub fn render(&self) -> Page {
        self.current()
            .clone()
            .with_footer(Some(format!("Page {} / {}", self.index + 1, self.pages.len())))
    }

    /// Current page as produced by the formatter.
    pub fn current(&self) -> &Page {
        self.pages.get(self.index).unwrap_or_else(|| self.pages.first())
    }

    /// Zero-based index of the current page.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: a paginator holds at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Last known state, without checking the clock.
    pub fn state(&self) -> PaginatorState {
        self.state
    }

    /// Configured inactivity timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying pages.
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }
}
