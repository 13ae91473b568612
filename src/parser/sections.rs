use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"section[data-view-name="profile-card"]"#).unwrap());

/// Marker selectors in classification order.
static MARKERS: LazyLock<Vec<(SectionKind, Selector)>> = LazyLock::new(|| {
    SectionKind::ALL
        .iter()
        .map(|&kind| {
            let sel = Selector::parse(&format!("div#{}", kind.marker_id())).unwrap();
            (kind, sel)
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    About,
    ContentCollections,
    Experience,
    Education,
    LicensesAndCertifications,
    Projects,
}

impl SectionKind {
    /// Order matters: a card carrying several markers takes the first kind listed.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::About,
        SectionKind::ContentCollections,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::LicensesAndCertifications,
        SectionKind::Projects,
    ];

    /// `id` of the anchor div LinkedIn places inside each card.
    pub fn marker_id(self) -> &'static str {
        match self {
            SectionKind::About => "about",
            SectionKind::ContentCollections => "content_collections",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::LicensesAndCertifications => "licenses_and_certifications",
            SectionKind::Projects => "projects",
        }
    }
}

/// Located cards, at most one per kind.
#[derive(Debug, Default)]
pub struct Sections<'a> {
    cards: BTreeMap<SectionKind, ElementRef<'a>>,
}

impl<'a> Sections<'a> {
    #[cfg(test)]
    pub fn get(&self, kind: SectionKind) -> Option<ElementRef<'a>> {
        self.cards.get(&kind).copied()
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.cards.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, ElementRef<'a>)> + '_ {
        self.cards.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Find every profile card and key it by the marker it carries. The first
/// card of a kind wins; cards without a known marker are ignored.
pub fn locate_sections(doc: &Html) -> Sections<'_> {
    let mut cards = BTreeMap::new();
    for card in doc.select(&CARD) {
        if let Some(kind) = classify(card) {
            cards.entry(kind).or_insert(card);
        }
    }
    Sections { cards }
}

fn classify(card: ElementRef<'_>) -> Option<SectionKind> {
    MARKERS
        .iter()
        .find(|(_, marker)| card.select(marker).next().is_some())
        .map(|(kind, _)| *kind)
}

// ── Tests ──
