use scraper::ElementRef;

use super::LIST_ITEM;
use crate::model::Project;
use crate::parser::schema::{Labels, ARIA_LABEL, PROJECT};
use crate::parser::text::DateRange;

pub fn extract(card: ElementRef<'_>) -> Vec<Project> {
    card.select(&LIST_ITEM)
        .map(|item| from_labels(&Labels::collect(item, &ARIA_LABEL)))
        .collect()
}

fn from_labels(labels: &Labels) -> Project {
    let range = DateRange::parse(labels.at(PROJECT.dates));
    Project {
        name: labels.at(PROJECT.name).to_string(),
        description: labels.at(PROJECT.description).to_string(),
        start_date: range.start,
        end_date: range.end,
        duration: range.duration,
        link: String::new(),
    }
}
