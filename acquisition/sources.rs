//! Declarative table of external medical-information sources.
//!
//! Keeping per-source bounds and URL shapes as data lets the pipeline stay
//! a single generic loop, and keeps the table independently testable.

use std::time::Duration;

/// One external source: where its index lives and how hard to lean on it.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Short source name used in telemetry and failure reports.
    pub name: &'static str,
    /// Index pages listing candidate diseases.
    pub index_urls: Vec<String>,
    /// Substring an anchor href must contain to count as a candidate.
    pub link_fragment: &'static str,
    /// Prefix for relative candidate hrefs.
    pub base_url: &'static str,
    /// Hrefs must contain one of these to be deep-scraped; empty means any.
    pub detail_fragments: &'static [&'static str],
    /// Candidate names containing this fragment (case-insensitive) are
    /// skipped (index/navigation links masquerading as diseases).
    pub skip_name_fragment: Option<&'static str>,
    /// Upper bound on index anchors considered per index page.
    pub candidate_limit: usize,
    /// Upper bound on detail pages fetched for this source.
    pub scrape_limit: usize,
    /// Candidate name length bounds.
    pub min_name_len: usize,
    /// Maximum candidate name length.
    pub max_name_len: usize,
    /// Politeness delay between detail-page fetches.
    pub delay: Duration,
}

impl SourceSpec {
    /// Turns a possibly relative href into an absolute URL.
    #[must_use]
    pub fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_owned()
        } else {
            format!("{}{href}", self.base_url)
        }
    }

    /// Whether a candidate href qualifies for a detail-page fetch.
    #[must_use]
    pub fn wants_detail(&self, href: &str) -> bool {
        self.detail_fragments.is_empty()
            || self.detail_fragments.iter().any(|frag| href.contains(frag))
    }

    /// Whether a candidate name passes the source's shape rules.
    #[must_use]
    pub fn accepts_name(&self, name: &str) -> bool {
        if name.len() < self.min_name_len || name.len() > self.max_name_len {
            return false;
        }
        self.skip_name_fragment
            .map_or(true, |fragment| !name.to_lowercase().contains(fragment))
    }
}

/// Primary sources scanned on every pipeline run.
#[must_use]
pub fn primary_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec {
            name: "nhs_inform",
            index_urls: vec![
                "https://www.nhsinform.scot/illnesses-and-conditions/a-to-z".to_owned(),
            ],
            link_fragment: "/illnesses-and-conditions/",
            base_url: "https://www.nhsinform.scot",
            detail_fragments: &[],
            skip_name_fragment: None,
            candidate_limit: 100,
            scrape_limit: 25,
            min_name_len: 3,
            max_name_len: 120,
            delay: Duration::from_millis(300),
        },
        SourceSpec {
            name: "mayo_clinic",
            index_urls: ["A", "B", "C", "D"]
                .iter()
                .map(|letter| {
                    format!("https://www.mayoclinic.org/diseases-conditions/index?letter={letter}")
                })
                .collect(),
            link_fragment: "/diseases-conditions/",
            base_url: "https://www.mayoclinic.org",
            detail_fragments: &["/symptoms-causes", "/syc-"],
            skip_name_fragment: Some("index"),
            candidate_limit: 20,
            scrape_limit: 80,
            min_name_len: 3,
            max_name_len: 120,
            delay: Duration::from_millis(200),
        },
        SourceSpec {
            name: "medlineplus",
            index_urls: vec!["https://medlineplus.gov/healthtopics.html".to_owned()],
            link_fragment: "medlineplus.gov/",
            base_url: "https://medlineplus.gov",
            detail_fragments: &[".html"],
            skip_name_fragment: None,
            candidate_limit: 60,
            scrape_limit: 60,
            min_name_len: 4,
            max_name_len: 59,
            delay: Duration::from_millis(200),
        },
    ]
}

/// Last-resort source consulted only when the primaries produced fewer
/// than the minimum record count.
#[must_use]
pub fn last_resort_source() -> SourceSpec {
    SourceSpec {
        name: "who_topics",
        index_urls: vec!["https://www.who.int/health-topics".to_owned()],
        link_fragment: "/health-topics/",
        base_url: "https://www.who.int",
        detail_fragments: &[],
        skip_name_fragment: None,
        candidate_limit: 40,
        scrape_limit: 40,
        min_name_len: 3,
        max_name_len: 120,
        delay: Duration::from_millis(300),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_hrefs_get_the_base_prefix() {
        let spec = last_resort_source();
        assert_eq!(
            spec.absolute_url("/health-topics/measles"),
            "https://www.who.int/health-topics/measles"
        );
        assert_eq!(
            spec.absolute_url("https://elsewhere.example/x"),
            "https://elsewhere.example/x"
        );
    }

    #[test]
    fn mayo_requires_a_detail_fragment() {
        let mayo = primary_sources().remove(1);
        assert!(mayo.wants_detail("/diseases-conditions/flu/symptoms-causes/syc-20351719"));
        assert!(!mayo.wants_detail("/diseases-conditions/flu/doctors-departments"));
        assert!(!mayo.accepts_name("Disease Index"));
    }

    #[test]
    fn name_length_bounds_apply() {
        let medline = primary_sources().remove(2);
        assert!(!medline.accepts_name("Flu"));
        assert!(medline.accepts_name("Fever"));
    }
}
