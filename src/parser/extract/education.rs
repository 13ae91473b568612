use scraper::ElementRef;

use super::LIST_ITEM;
use crate::model::Education;
use crate::parser::schema::{Labels, ARIA_LABEL, EDUCATION};
use crate::parser::text::DateRange;

pub fn extract(card: ElementRef<'_>) -> Vec<Education> {
    card.select(&LIST_ITEM)
        .map(|item| from_labels(&Labels::collect(item, &ARIA_LABEL)))
        .collect()
}

fn from_labels(labels: &Labels) -> Education {
    // "Master of Science - MS, Computer Science"
    let (degree, field_of_study) = match labels.at(EDUCATION.degree).split_once(',') {
        Some((d, f)) => (d.trim(), f.trim()),
        None => (labels.at(EDUCATION.degree), ""),
    };
    let dates = labels.at(EDUCATION.dates);
    let range = DateRange::parse(dates);

    Education {
        school: labels.at(EDUCATION.school).to_string(),
        degree: degree.to_string(),
        field_of_study: field_of_study.to_string(),
        start_date: range.start,
        end_date: range.end,
        duration: dates.to_string(),
        description: labels.at(EDUCATION.description).to_string(),
    }
}
