use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::warn;

use super::LIST_ITEM;
use crate::model::Experience;
use crate::parser::schema::{Labels, EXPERIENCE, HIDDEN_LABEL};
use crate::parser::text::element_text;

static HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.display-flex.flex-row.justify-space-between").unwrap());
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

pub fn extract(card: ElementRef<'_>) -> Vec<Experience> {
    card.select(&LIST_ITEM)
        .filter_map(|item| {
            let parsed = parse_item(item);
            if parsed.is_none() {
                warn!("experience item without a header region, skipping");
            }
            parsed
        })
        .collect()
}

fn parse_item(item: ElementRef<'_>) -> Option<Experience> {
    let header = item.select(&HEADER).next().or_else(|| {
        item.select(&DIV)
            .find(|div| div.select(&HIDDEN_LABEL).next().is_some())
    })?;
    let labels = Labels::collect(header, &HIDDEN_LABEL);

    let description = item
        .select(&BODY)
        .next()
        .and_then(|body| body.select(&SPAN).next())
        .map(element_text)
        .unwrap_or_default();

    Some(Experience {
        title: labels.at(EXPERIENCE.title).to_string(),
        company: labels.at(EXPERIENCE.company).to_string(),
        start_date: labels.at(EXPERIENCE.start_date).to_string(),
        location: labels.at(EXPERIENCE.location).to_string(),
        // not present as separate labels in this markup
        end_date: String::new(),
        duration: String::new(),
        description,
    })
}
