//! Pages and replies to Discord message builders.

use hypepulse_format::{Control, Page, GENERAL_COLOR};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    EditInteractionResponse, Timestamp,
};

/// Longest plain message Discord accepts.
pub const MESSAGE_LIMIT: usize = 2000;

/// Longest embed description Discord accepts.
pub const EMBED_LIMIT: usize = 4096;

/// Render a page as an embed with the bot's thumbnail.
pub fn page_embed(page: &Page, icon_url: &str) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(page.title())
        .color(*page.color())
        .thumbnail(icon_url)
        .timestamp(Timestamp::now());

    if !page.body().is_empty() {
        embed = embed.description(page.body());
    }
    for field in page.fields() {
        embed = embed.field(field.name(), field.value(), *field.inline());
    }
    if let Some(footer) = page.footer() {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

/// Response for a text reply.
///
/// Text over the message limit goes into an embed description instead,
/// cut at the embed limit.
pub fn text_response(text: &str, icon_url: &str) -> EditInteractionResponse {
    let chars = text.chars().count();
    if chars <= MESSAGE_LIMIT {
        return EditInteractionResponse::new().content(text);
    }
    tracing::debug!(chars, "Text over message limit, sending as embed");
    let embed = CreateEmbed::new()
        .description(clamp_description(text))
        .color(GENERAL_COLOR)
        .thumbnail(icon_url)
        .timestamp(Timestamp::now());
    EditInteractionResponse::new().embed(embed)
}

/// Text cut to fit an embed description, ending in `…` when cut.
pub fn clamp_description(text: &str) -> String {
    match text.char_indices().nth(EMBED_LIMIT - 1) {
        Some((cut, _)) if text.chars().count() > EMBED_LIMIT => format!("{}…", &text[..cut]),
        _ => text.to_string(),
    }
}

/// Custom id of a navigation button on one message.
pub fn control_id(control: Control, nonce: u64) -> String {
    format!("hypepulse:{}:{}", control, nonce)
}

/// Parse a navigation button id created by [`control_id`].
pub fn parse_control_id(custom_id: &str, nonce: u64) -> Option<Control> {
    let mut parts = custom_id.splitn(3, ':');
    if parts.next()? != "hypepulse" {
        return None;
    }
    let control = parts.next()?.parse().ok()?;
    let id_nonce: u64 = parts.next()?.parse().ok()?;
    (id_nonce == nonce).then_some(control)
}

/// Previous (danger) and Next (success) buttons.
pub fn navigation_row(nonce: u64) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(control_id(Control::Previous, nonce))
            .label("Previous")
            .style(ButtonStyle::Danger),
        CreateButton::new(control_id(Control::Next, nonce))
            .label("Next")
            .style(ButtonStyle::Success),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_ids_round_trip() {
        let id = control_id(Control::Next, 42);
        assert_eq!(id, "hypepulse:next:42");
        assert_eq!(parse_control_id(&id, 42), Some(Control::Next));
        assert_eq!(parse_control_id(&control_id(Control::Previous, 42), 42), Some(Control::Previous));
    }

    #[test]
    fn test_clamp_description_fits_embed() {
        let clamped = clamp_description(&"x".repeat(6000));
        assert_eq!(clamped.chars().count(), EMBED_LIMIT);
        assert!(clamped.ends_with('…'));

        let fits = "y".repeat(EMBED_LIMIT);
        assert_eq!(clamp_description(&fits), fits);
    }

    #[test]
    fn test_control_ids_from_other_messages_are_ignored() {
        assert_eq!(parse_control_id("hypepulse:next:41", 42), None);
        assert_eq!(parse_control_id("prevbtn", 42), None);
        assert_eq!(parse_control_id("hypepulse:sideways:42", 42), None);
    }
}
