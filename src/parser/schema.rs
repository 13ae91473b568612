//! Positional schemas: which label index feeds which record field.
//!
//! LinkedIn list items carry no semantic keys, only an ordered run of label
//! spans. Every record kind maps fields to indices here, so markup drift is
//! fixed by editing a table rather than an extractor.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::text::element_text;

/// Value of any field whose index is past the end of the label list.
pub const MISSING: &str = "";

pub static HIDDEN_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.visually-hidden").unwrap());
pub static ARIA_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span[aria-hidden="true"]"#).unwrap());

/// Label texts of one list item, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(Vec<String>);

impl Labels {
    pub fn collect(item: ElementRef<'_>, label: &Selector) -> Self {
        Labels(item.select(label).map(element_text).collect())
    }

    /// Label at `index`, or `MISSING` when the item carries fewer labels.
    pub fn at(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or(MISSING)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Labels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Labels(iter.into_iter().map(Into::into).collect())
    }
}

/// Header spans of an experience item. End date and duration have no slot:
/// the markup never exposes them separately.
pub struct ExperienceSlots {
    pub title: usize,
    pub company: usize,
    pub start_date: usize,
    pub location: usize,
}

pub const EXPERIENCE: ExperienceSlots = ExperienceSlots {
    title: 0,
    company: 1,
    start_date: 2,
    location: 3,
};

/// `degree` holds "Degree, Field of study"; `dates` holds the date range.
pub struct EducationSlots {
    pub school: usize,
    pub degree: usize,
    pub dates: usize,
    pub description: usize,
}

pub const EDUCATION: EducationSlots = EducationSlots {
    school: 0,
    degree: 1,
    dates: 2,
    description: 3,
};

/// No expiration slot: it shares the issue-date label when present at all.
pub struct CertificationSlots {
    pub name: usize,
    pub issuing_organization: usize,
    pub issue_date: usize,
    pub credential_id: usize,
}

pub const CERTIFICATION: CertificationSlots = CertificationSlots {
    name: 0,
    issuing_organization: 1,
    issue_date: 2,
    credential_id: 3,
};

pub struct ProjectSlots {
    pub name: usize,
    pub description: usize,
    pub dates: usize,
}

pub const PROJECT: ProjectSlots = ProjectSlots {
    name: 0,
    description: 1,
    dates: 2,
};

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn missing_index_is_empty() {
        let labels: Labels = ["a", "b"].into_iter().collect();
        assert_eq!(labels.at(0), "a");
        assert_eq!(labels.at(1), "b");
        assert_eq!(labels.at(2), MISSING);
        assert_eq!(labels.at(usize::MAX), MISSING);
    }

    #[test]
    fn collects_in_document_order_trimmed() {
        let doc = Html::parse_fragment(
            r#"<li><div><span aria-hidden="true"> first </span></div>
               <span>skip</span><span aria-hidden="true">second</span></li>"#,
        );
        let labels = Labels::collect(doc.root_element(), &ARIA_LABEL);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.at(0), "first");
        assert_eq!(labels.at(1), "second");
    }

    #[test]
    fn no_labels() {
        let doc = Html::parse_fragment("<li><p>nothing here</p></li>");
        let labels = Labels::collect(doc.root_element(), &HIDDEN_LABEL);
        assert!(labels.is_empty());
        assert_eq!(labels.at(0), MISSING);
    }
}
