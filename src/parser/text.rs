use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*([KkMm])?\b").unwrap());

/// "Read more" affordances LinkedIn appends to truncated text blocks.
pub const SEE_MORE: &[&str] = &["…see more", "...see more"];
pub const SHOW_MORE: &[&str] = &["…show more", "...show more"];

/// All text under `el`, trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trim, drop any trailing affordance from `artifacts`, trim again.
pub fn strip_trailing(text: &str, artifacts: &[&str]) -> String {
    let mut out = text.trim();
    while let Some(stripped) = artifacts.iter().find_map(|a| out.strip_suffix(a)) {
        out = stripped.trim_end();
    }
    out.trim().to_string()
}

/// First number in a social counter ("1,024 likes" → 1024, "1.2K" → 1200).
pub fn parse_count(text: &str) -> Option<u32> {
    let caps = COUNT_RE.captures(text)?;
    let value: f64 = caps[1].replace(',', "").parse().ok()?;
    let scale = match caps.get(2).map(|m| m.as_str()) {
        Some("K" | "k") => 1_000.0,
        Some("M" | "m") => 1_000_000.0,
        _ => 1.0,
    };
    let n = (value * scale).round();
    (n <= f64::from(u32::MAX)).then_some(n as u32)
}

/// A "start – end · duration" label split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub duration: String,
}

impl DateRange {
    /// Split on the first en-dash or hyphen. Without one, the whole range is
    /// the start and `end` stays empty.
    pub fn parse(label: &str) -> Self {
        let (range, duration) = match label.split_once('·') {
            Some((r, d)) => (r, d.trim()),
            None => (label, ""),
        };
        let (start, end) = match range.split_once(['–', '-']) {
            Some((s, e)) => (s.trim(), e.trim()),
            None => (range.trim(), ""),
        };
        DateRange {
            start: start.to_string(),
            end: end.to_string(),
            duration: duration.to_string(),
        }
    }
}
