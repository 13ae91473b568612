use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::text::element_text;

static NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1.text-heading-xlarge").unwrap());
static ANY_H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static HEADLINE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.text-body-medium").unwrap());
static LOCATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.text-body-small.inline.t-black--light").unwrap());
static TOP_CARD_SMALL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ph5 span.text-body-small").unwrap());

/// Top-of-page identity fields; each is empty when its marker is missing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub headline: String,
    pub location: String,
}

pub fn extract(doc: &Html) -> Header {
    Header {
        name: first_text(doc, &[&*NAME, &*ANY_H1]),
        headline: first_text(doc, &[&*HEADLINE]),
        location: first_text(doc, &[&*LOCATION, &*TOP_CARD_SMALL]),
    }
}

fn first_text(doc: &Html, selectors: &[&Selector]) -> String {
    selectors
        .iter()
        .find_map(|sel| doc.select(sel).next())
        .map(element_text)
        .unwrap_or_default()
}
