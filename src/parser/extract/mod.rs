pub mod about;
pub mod certifications;
pub mod education;
pub mod experience;
pub mod header;
pub mod posts;
pub mod projects;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::sections::{locate_sections, SectionKind};
use crate::model::*;

/// Record boundary shared by every list-shaped card.
pub(crate) static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.artdeco-list__item").unwrap());

/// Output of one section extractor.
#[derive(Debug, PartialEq, Eq)]
pub enum SectionData {
    About(String),
    Posts(Vec<Post>),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    LicensesAndCertifications(Vec<LicenseAndCertification>),
    Projects(Vec<Project>),
}

impl SectionData {
    fn len(&self) -> usize {
        match self {
            SectionData::About(text) => usize::from(!text.is_empty()),
            SectionData::Posts(v) => v.len(),
            SectionData::Experience(v) => v.len(),
            SectionData::Education(v) => v.len(),
            SectionData::LicensesAndCertifications(v) => v.len(),
            SectionData::Projects(v) => v.len(),
        }
    }
}

pub type Extractor = fn(ElementRef<'_>) -> SectionData;

/// Dispatch table: one extractor per section kind.
pub fn extractor(kind: SectionKind) -> Extractor {
    match kind {
        SectionKind::About => about_section,
        SectionKind::ContentCollections => posts_section,
        SectionKind::Experience => experience_section,
        SectionKind::Education => education_section,
        SectionKind::LicensesAndCertifications => certifications_section,
        SectionKind::Projects => projects_section,
    }
}

fn about_section(card: ElementRef<'_>) -> SectionData {
    SectionData::About(about::extract(card))
}

fn posts_section(card: ElementRef<'_>) -> SectionData {
    SectionData::Posts(posts::extract(card))
}

fn experience_section(card: ElementRef<'_>) -> SectionData {
    SectionData::Experience(experience::extract(card))
}

fn education_section(card: ElementRef<'_>) -> SectionData {
    SectionData::Education(education::extract(card))
}

fn certifications_section(card: ElementRef<'_>) -> SectionData {
    SectionData::LicensesAndCertifications(certifications::extract(card))
}

fn projects_section(card: ElementRef<'_>) -> SectionData {
    SectionData::Projects(projects::extract(card))
}

/// Single pass over a parsed document: header fields, then each located card.
/// Absent sections leave their field at its empty value.
pub fn assemble(url: &str, doc: &Html) -> Profile {
    let header = header::extract(doc);
    let sections = locate_sections(doc);
    if sections.is_empty() {
        debug!(url, "no profile cards located");
    } else {
        debug!(url, found = sections.len(), sections = ?sections.kinds(), "located profile cards");
    }

    let mut profile = Profile {
        url: url.to_string(),
        name: header.name,
        headline: header.headline,
        location: header.location,
        ..Default::default()
    };

    for (kind, card) in sections.iter() {
        let data = extractor(kind)(card);
        debug!(?kind, records = data.len(), "extracted section");
        match data {
            SectionData::About(text) => profile.about = text,
            SectionData::Posts(v) => profile.posts = v,
            SectionData::Experience(v) => profile.experiences = v,
            SectionData::Education(v) => profile.education = v,
            SectionData::LicensesAndCertifications(v) => profile.licenses_and_certifications = v,
            SectionData::Projects(v) => profile.projects = v,
        }
    }

    profile
}

#[cfg(test)]
static SECTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("section").unwrap());

/// First `<section>` of a test document.
#[cfg(test)]
pub(crate) fn first_card(doc: &Html) -> ElementRef<'_> {
    doc.select(&SECTION).next().expect("test document has a section")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(fixture: &str) -> Profile {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        let doc = Html::parse_document(&html);
        assemble("https://www.linkedin.com/in/jane-doe/", &doc)
    }

    #[test]
    fn profile_header() {
        let p = parse("profile");
        assert_eq!(p.url, "https://www.linkedin.com/in/jane-doe/");
        assert_eq!(p.name, "Jane Doe");
        assert_eq!(p.headline, "Staff Engineer at Example Corp");
        assert_eq!(p.location, "Berlin, Germany");
    }

    #[test]
    fn profile_about_uses_first_card() {
        let p = parse("profile");
        assert_eq!(p.about, "Building reliable data pipelines.");
    }

    #[test]
    fn profile_posts() {
        let p = parse("profile");
        assert_eq!(p.posts.len(), 2, "got: {:?}", p.posts);
        assert_eq!(p.posts[0].content, "Shipping our new parser today!");
        assert_eq!(p.posts[0].likes, Some(1024));
        assert_eq!(p.posts[0].comments, Some(37));
        assert_eq!(p.posts[0].link, "https://www.linkedin.com/feed/update/urn:li:activity:1/");
        assert_eq!(p.posts[1].likes, Some(12));
        assert_eq!(p.posts[1].comments, None);
        assert!(p.posts.iter().all(|post| post.kind == PostKind::Posted));
    }

    #[test]
    fn profile_experience() {
        let p = parse("profile");
        assert_eq!(p.experiences.len(), 2, "malformed third item should be skipped");
        assert_eq!(p.experiences[0].title, "Staff Engineer");
        assert_eq!(p.experiences[0].company, "Example Corp · Full-time");
        assert_eq!(p.experiences[0].description, "Led the ingestion platform rewrite.");
        assert_eq!(p.experiences[1].title, "Software Engineer");
        assert_eq!(p.experiences[1].location, "");
        assert_eq!(p.experiences[1].description, "");
    }

    #[test]
    fn profile_education_certs_projects() {
        let p = parse("profile");
        assert_eq!(p.education.len(), 2);
        assert_eq!(p.education[0].field_of_study, "Computer Science");
        assert_eq!(p.education[1].school, "Example High School");
        assert_eq!(p.education[1].degree, "");

        assert_eq!(p.licenses_and_certifications.len(), 1);
        assert_eq!(p.licenses_and_certifications[0].credential_id, "Credential ID ABC-123");

        assert_eq!(p.projects.len(), 2);
        assert_eq!(p.projects[0].start_date, "Jan 2020");
        assert_eq!(p.projects[0].end_date, "Mar 2021");
        assert_eq!(p.projects[1].start_date, "");
    }

    #[test]
    fn sparse_profile_defaults() {
        let p = parse("sparse");
        assert_eq!(p.name, "John Roe");
        assert_eq!(p.about, "");
        assert!(p.posts.is_empty());
        assert!(p.experiences.is_empty());
        assert!(p.education.is_empty());
        assert!(p.licenses_and_certifications.is_empty());
        assert!(p.projects.is_empty());
    }

    #[test]
    fn drifted_markup_degrades() {
        let p = parse("drift");
        assert_eq!(p.name, "Ada Example");
        assert_eq!(p.headline, "");
        assert_eq!(p.location, "");
        assert!(p.experiences.is_empty());
        assert_eq!(p.posts.len(), 1);
        assert_eq!(p.posts[0].likes, None);
        assert_eq!(p.posts[0].link, "/feed/update/2");
        assert_eq!(p.projects.len(), 1);
        assert_eq!(p.projects[0].name, "Lonely project");
        assert_eq!(p.projects[0].description, "");
        assert_eq!(p.projects[0].end_date, "");
    }

    #[test]
    fn assembling_twice_is_identical() {
        assert_eq!(parse("profile"), parse("profile"));
    }

    #[test]
    fn dispatch_covers_every_kind() {
        let doc = Html::parse_document("<section></section>");
        let card = first_card(&doc);
        for kind in SectionKind::ALL {
            let data = extractor(kind)(card);
            assert_eq!(data.len(), 0, "{:?} should be empty on a bare card", kind);
        }
    }
}
