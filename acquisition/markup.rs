//! Best-effort markup heuristics.
//!
//! External pages vary wildly in structure, so extraction is regex-based
//! and tolerant: noise blocks are removed, tags are stripped, and a small
//! set of entities is decoded. Precision on any single layout is not a
//! goal.

use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords marking a heading as the start of a symptom section.
pub const SECTION_KEYWORDS: &[&str] = &["symptom", "sign", "when to see"];

/// List items consulted when no symptom heading is found.
const LIST_FALLBACK_LIMIT: usize = 50;

static RE_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script>|<style\b.*?</style>|<nav\b.*?</nav>|<footer\b.*?</footer>|<header\b.*?</header>",
    )
    .expect("static noise pattern")
});

static RE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[234][^>]*>(.*?)</h[234]>").expect("static heading pattern"));

static RE_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li>").expect("static list pattern"));

static RE_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#)
        .expect("static anchor pattern")
});

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("static tag pattern"));

/// Strips tags, decodes common entities, and collapses whitespace.
#[must_use]
pub fn strip_tags(fragment: &str) -> String {
    let text = RE_TAG.replace_all(fragment, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the symptom-related text of a detail page.
///
/// Headings (h2–h4) whose text mentions a section keyword contribute all
/// content up to the next heading. When no heading matches, the text of
/// the first fifty list items stands in.
#[must_use]
pub fn symptom_section_text(html: &str) -> String {
    let clean = RE_NOISE.replace_all(html, " ");
    let headings: Vec<(usize, usize, String)> = RE_HEADING
        .captures_iter(&clean)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some((
                whole.start(),
                whole.end(),
                strip_tags(inner.as_str()).to_lowercase(),
            ))
        })
        .collect();

    let mut sections = Vec::new();
    for (index, (_, end, text)) in headings.iter().enumerate() {
        if !SECTION_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
            continue;
        }
        let until = headings
            .get(index + 1)
            .map_or(clean.len(), |(start, _, _)| *start);
        sections.push(strip_tags(&clean[*end..until]));
    }

    if sections.is_empty() {
        let items: Vec<String> = RE_LIST_ITEM
            .captures_iter(&clean)
            .take(LIST_FALLBACK_LIMIT)
            .filter_map(|caps| caps.get(1).map(|inner| strip_tags(inner.as_str())))
            .collect();
        return items.join(" ");
    }
    sections.join(" ")
}

/// Extracts `(text, href)` pairs for anchors whose href contains
/// `fragment`. Anchor text is tag-stripped.
#[must_use]
pub fn extract_links(html: &str, fragment: &str) -> Vec<(String, String)> {
    RE_ANCHOR
        .captures_iter(html)
        .filter_map(|caps| {
            let href = caps.get(1)?.as_str();
            if !href.contains(fragment) {
                return None;
            }
            let text = strip_tags(caps.get(2)?.as_str());
            Some((text, href.to_owned()))
        })
        .collect()
}
