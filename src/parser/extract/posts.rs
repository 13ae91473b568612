use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::model::{Post, PostKind};
use crate::parser::text::{element_text, parse_count, strip_trailing, SHOW_MORE};

static ACTIVITY_LIST: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("ul.display-flex.flex-wrap.list-style-none.justify-space-between").unwrap()
});
static ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.profile-creator-shared-feed-update__mini-container").unwrap());
static CONTEXT_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.feed-mini-update-contextual-description__text").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.display-flex.flex-row").unwrap());
static SOCIAL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul.display-flex").unwrap());
static SOCIAL_COUNT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static PERMALINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.app-aware-link").unwrap());
static ANY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Recent activity that the profile owner authored. Reposts, reactions and
/// comments are dropped.
pub fn extract(card: ElementRef<'_>) -> Vec<Post> {
    let scope = card
        .select(&ACTIVITY_LIST)
        .find(|list| list.select(&ITEM).next().is_some())
        .unwrap_or(card);

    scope
        .select(&ITEM)
        .filter_map(|item| {
            let Some(label) = item.select(&CONTEXT_LABEL).next().map(element_text) else {
                warn!("activity item without a context label, skipping");
                return None;
            };
            is_original_post(&label).then(|| parse_post(item))
        })
        .collect()
}

/// "Jane posted this" qualifies; "Jane reposted this" does not.
pub fn is_original_post(label: &str) -> bool {
    label
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case("posted"))
}

fn parse_post(item: ElementRef<'_>) -> Post {
    let content = item
        .select(&BODY)
        .next()
        .map(|body| strip_trailing(&element_text(body), SHOW_MORE))
        .unwrap_or_default();

    let counts: Vec<String> = item
        .select(&SOCIAL)
        .next()
        .map(|social| social.select(&SOCIAL_COUNT).map(element_text).collect())
        .unwrap_or_default();

    let link = item
        .select(&PERMALINK)
        .chain(item.select(&ANY_LINK))
        .find_map(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_string();

    Post {
        kind: PostKind::Posted,
        content,
        likes: counts.first().and_then(|c| parse_count(c)),
        comments: counts.get(1).and_then(|c| parse_count(c)),
        link,
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::parser::extract::first_card;

    fn item(label: &str, body: &str, social: &str, href: &str) -> String {
        format!(
            r#"<li class="profile-creator-shared-feed-update__mini-container">
                 <a class="app-aware-link" href="{href}">
                   <span class="feed-mini-update-contextual-description__text">{label}</span>
                 </a>
                 <div class="display-flex flex-row"><span>{body}</span></div>
                 <ul class="display-flex">{social}</ul>
               </li>"#
        )
    }

    fn card(items: &[String]) -> Html {
        Html::parse_document(&format!(
            r#"<section><div id="content_collections"></div>
                 <ul class="display-flex flex-wrap list-style-none justify-space-between">{}</ul>
               </section>"#,
            items.concat()
        ))
    }

    #[test]
    fn commented_is_dropped_posted_is_kept() {
        let doc = card(&[
            item("Jane commented on a post", "Nice!", "<li>3 likes</li>", "/c"),
            item("Jane posted an update", "Hello…show more", "<li>12 likes</li><li>4 comments</li>", "/p"),
        ]);
        let posts = extract(first_card(&doc));
        assert_eq!(posts.len(), 1);
        let p = &posts[0];
        assert_eq!(p.kind.as_str(), "posted");
        assert_eq!(p.content, "Hello");
        assert_eq!(p.likes, Some(12));
        assert_eq!(p.comments, Some(4));
        assert_eq!(p.link, "/p");
    }

    #[test]
    fn tab_bar_before_activity_list_is_ignored() {
        let doc = Html::parse_document(&format!(
            r#"<section><div id="content_collections"></div>
                 <ul class="list-style-none"><li><button>Posts</button></li><li><button>Comments</button></li></ul>
                 <ul class="display-flex flex-wrap list-style-none justify-space-between">{}</ul>
               </section>"#,
            item("Jane posted this", "From the feed", "<li>5 likes</li>", "/p")
        ));
        let posts = extract(first_card(&doc));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "From the feed");
        assert_eq!(posts[0].likes, Some(5));
    }

    #[test]
    fn reposts_and_reactions_are_dropped() {
        let doc = card(&[
            item("Jane reposted this", "x", "", "/r"),
            item("Jane likes this", "y", "", "/l"),
        ]);
        assert!(extract(first_card(&doc)).is_empty());
    }

    #[test]
    fn missing_comment_counter_is_none() {
        let doc = card(&[item("Jane posted this • 2w", "Body", "<li>1,024 likes</li>", "/p")]);
        let posts = extract(first_card(&doc));
        assert_eq!(posts[0].likes, Some(1024));
        assert_eq!(posts[0].comments, None);
    }

    #[test]
    fn item_without_label_is_skipped_siblings_kept() {
        let broken = r#"<li class="profile-creator-shared-feed-update__mini-container"><p>?</p></li>"#;
        let doc = card(&[broken.to_string(), item("Jane posted this", "ok", "", "/p")]);
        let posts = extract(first_card(&doc));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "ok");
        assert_eq!(posts[0].likes, None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = card(&[
            item("Jane posted this", "a", "<li>1</li>", "/a"),
            item("Jane commented on this", "b", "", "/b"),
        ]);
        let card = first_card(&doc);
        assert_eq!(extract(card), extract(card));
    }

    #[test]
    fn label_matching() {
        assert!(is_original_post("posted this"));
        assert!(is_original_post("Jane Doe Posted • 1mo"));
        assert!(!is_original_post("Jane reposted this"));
        assert!(!is_original_post("Jane commented on this"));
        assert!(!is_original_post(""));
    }
}
