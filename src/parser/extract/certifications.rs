use scraper::ElementRef;

use super::LIST_ITEM;
use crate::model::LicenseAndCertification;
use crate::parser::schema::{Labels, ARIA_LABEL, CERTIFICATION};

pub fn extract(card: ElementRef<'_>) -> Vec<LicenseAndCertification> {
    card.select(&LIST_ITEM)
        .map(|item| from_labels(&Labels::collect(item, &ARIA_LABEL)))
        .collect()
}

fn from_labels(labels: &Labels) -> LicenseAndCertification {
    LicenseAndCertification {
        name: labels.at(CERTIFICATION.name).to_string(),
        issuing_organization: labels.at(CERTIFICATION.issuing_organization).to_string(),
        issue_date: labels.at(CERTIFICATION.issue_date).to_string(),
        expiration_date: String::new(),
        credential_id: labels.at(CERTIFICATION.credential_id).to_string(),
    }
}
