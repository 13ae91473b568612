pub mod extract;
pub mod schema;
pub mod sections;
pub mod text;

use scraper::Html;
use tracing::debug;

use crate::error::ParseError;
use crate::model::Profile;

/// Two-stage pipeline: markup → located cards → per-section extraction.
pub fn parse_profile(url: &str, html: &str) -> Result<Profile, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::UnreadableInput("document is empty".into()));
    }
    let doc = Html::parse_document(html);
    let profile = extract::assemble(url, &doc);
    debug!(
        url,
        posts = profile.posts.len(),
        experiences = profile.experiences.len(),
        education = profile.education.len(),
        certifications = profile.licenses_and_certifications.len(),
        projects = profile.projects.len(),
        "parsed profile"
    );
    Ok(profile)
}

/// Split a stored entry into its identifier line and the markup after it.
pub fn split_document(text: &str) -> (&str, &str) {
    match text.split_once('\n') {
        Some((id, body)) => (id.trim_end_matches('\r'), body),
        None => (text, ""),
    }
}

/// Parse an entry in the cache storage format (identifier line, then markup).
pub fn parse_cached(text: &str) -> Result<Profile, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::UnreadableInput("cache entry is empty".into()));
    }
    let (url, body) = split_document(text);
    if body.trim().is_empty() {
        return Err(ParseError::UnreadableInput(format!(
            "cache entry for {} has no markup",
            url
        )));
    }
    parse_profile(url.trim(), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_unreadable() {
        assert!(matches!(
            parse_profile("u", ""),
            Err(ParseError::UnreadableInput(_))
        ));
        assert!(matches!(
            parse_profile("u", "  \n\t "),
            Err(ParseError::UnreadableInput(_))
        ));
    }

    #[test]
    fn markup_without_sections_is_an_empty_profile() {
        let p = parse_profile("u", "<html><body><p>hi</p></body></html>").unwrap();
        assert_eq!(p.url, "u");
        assert_eq!(p.name, "");
        assert!(p.experiences.is_empty());
    }

    #[test]
    fn split_on_first_newline() {
        assert_eq!(split_document("https://x\n<html>\n</html>"), ("https://x", "<html>\n</html>"));
        assert_eq!(split_document("https://x\r\n<p>"), ("https://x", "<p>"));
        assert_eq!(split_document("no newline"), ("no newline", ""));
    }

    #[test]
    fn cached_entry_without_body_is_unreadable() {
        assert!(matches!(parse_cached(""), Err(ParseError::UnreadableInput(_))));
        assert!(matches!(
            parse_cached("https://www.linkedin.com/in/x/\n"),
            Err(ParseError::UnreadableInput(_))
        ));
    }

    #[test]
    fn cached_entry_round_trip() {
        let html = std::fs::read_to_string("tests/fixtures/profile.html").unwrap();
        let stored = format!("https://www.linkedin.com/in/jane-doe/\n{}", html);
        let p = parse_cached(&stored).unwrap();
        assert_eq!(p.url, "https://www.linkedin.com/in/jane-doe/");
        assert_eq!(p.name, "Jane Doe");
        assert_eq!(p, parse_cached(&stored).unwrap());
    }

    #[test]
    fn about_scenario() {
        let html = r#"<section data-view-name="profile-card"><div id="about"></div>
            <div class="display-flex ph5 pv3">Engineer.…see more</div></section>"#;
        assert_eq!(parse_profile("u", html).unwrap().about, "Engineer.");
    }
}
