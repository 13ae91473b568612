use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::parser::schema::ARIA_LABEL;
use crate::parser::text::{element_text, strip_trailing, SEE_MORE};

static TEXT_BOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.display-flex.ph5.pv3").unwrap());
static SHOW_MORE_BOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.inline-show-more-text").unwrap());

/// About text with the "…see more" affordance removed, or empty.
pub fn extract(card: ElementRef<'_>) -> String {
    let Some(container) = card
        .select(&TEXT_BOX)
        .next()
        .or_else(|| card.select(&SHOW_MORE_BOX).next())
    else {
        return String::new();
    };

    // aria-hidden spans carry the visible copy; the visually-hidden twin would double it
    let visible: Vec<String> = container.select(&ARIA_LABEL).map(element_text).collect();
    let raw = if visible.is_empty() {
        element_text(container)
    } else {
        visible.join("\n")
    };
    strip_trailing(&raw, SEE_MORE)
}
