//! Pages and page sets produced by the formatter.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Accent for general info, profiles and overflow pages.
pub const GENERAL_COLOR: u32 = 0x00AE86;
/// Accent for per-mode detailed pages.
pub const MODE_COLOR: u32 = 0x0099FF;
/// Accent for guild pages.
pub const GUILD_COLOR: u32 = 0xFFD700;

/// Body used when a page would otherwise be empty.
pub const NO_DATA: &str = "No data available.";

/// A short labelled value shown alongside a page body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PageField {
    name: String,
    value: String,
    inline: bool,
}

impl PageField {
    /// Create an inline field.
    pub fn new_inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

/// One renderable page: a title, a size-bounded body and optional fields.
///
/// # Examples
///
/// ```
/// use hypepulse_format::{Page, PageBuilder, GUILD_COLOR};
///
/// let page = PageBuilder::default()
///     .title("Guild Info for Notch")
///     .body("**Guild Name:** N/A\n**Tag:** N/A")
///     .color(GUILD_COLOR)
///     .build()
///     .unwrap();
///
/// assert_eq!(page.title(), "Guild Info for Notch");
/// assert!(page.footer().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into)]
#[builder(setter(into))]
pub struct Page {
    /// Page title
    title: String,
    /// Page body
    #[builder(default)]
    body: String,
    /// Inline fields shown below the body
    #[builder(default)]
    fields: Vec<PageField>,
    /// Accent color (0xRRGGBB)
    #[builder(default = "GENERAL_COLOR")]
    color: u32,
    /// Footer text, set when the page is shown as part of a paginated reply
    #[builder(default)]
    footer: Option<String>,
}

impl Page {
    /// Create a page with a title, body and color.
    pub fn new(title: impl Into<String>, body: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            fields: Vec::new(),
            color,
            footer: None,
        }
    }

    /// The "nothing to show" page.
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self::new(title, NO_DATA, GENERAL_COLOR)
    }
}

/// An ordered, non-empty sequence of pages for one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    /// Build a page set, inserting a placeholder page titled `title` when
    /// `pages` is empty.
    pub fn new(pages: Vec<Page>, title: impl Into<String>) -> Self {
        if pages.is_empty() {
            tracing::debug!("Empty page set, inserting placeholder");
            return Self {
                pages: vec![Page::placeholder(title)],
            };
        }
        Self { pages }
    }

    /// Number of pages, always at least one.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the set needs pagination controls.
    pub fn is_paginated(&self) -> bool {
        self.pages.len() > 1
    }

    /// Page at an index.
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// The first page.
    pub fn first(&self) -> &Page {
        &self.pages[0]
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_field() {
        let field = PageField::new_inline("Rank", "MVP_PLUS");
        assert_eq!(field.name(), "Rank");
        assert_eq!(field.value(), "MVP_PLUS");
        assert!(*field.inline());
    }

    #[test]
    fn test_empty_page_set_gets_placeholder() {
        let set = PageSet::new(Vec::new(), "Stats for Notch");
        assert_eq!(set.len(), 1);
        assert_eq!(set.first().title(), "Stats for Notch");
        assert_eq!(set.first().body(), NO_DATA);
        assert!(!set.is_paginated());
    }

    #[test]
    fn test_page_set_preserves_order() {
        let set = PageSet::new(
            vec![
                Page::new("a", "1", GENERAL_COLOR),
                Page::new("b", "2", MODE_COLOR),
            ],
            "unused",
        );
        assert!(set.is_paginated());
        let titles: Vec<&str> = set.pages().iter().map(|p| p.title().as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_builder_defaults() {
        let page = PageBuilder::default().title("t").build().unwrap();
        assert_eq!(*page.color(), GENERAL_COLOR);
        assert!(page.body().is_empty());
        assert!(page.fields().is_empty());
    }
}
