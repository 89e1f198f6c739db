//! Weakness tag extraction from oracle feedback.
//!
//! The oracle reports free-text missing points. Matching those to short
//! tags is inherently fuzzy, so the keyword table is configuration data
//! handed to the service at construction, not logic baked into the core.

/// Substring keyword to canonical tag table, matched case-insensitively
/// in declaration order.
#[derive(Debug, Clone)]
pub struct WeaknessLexicon {
    rules: Vec<(String, String)>,
}

impl WeaknessLexicon {
    pub fn new<K, T>(rules: impl IntoIterator<Item = (K, T)>) -> Self
    where
        K: Into<String>,
        T: Into<String>,
    {
        WeaknessLexicon {
            rules: rules
                .into_iter()
                .map(|(k, t)| (k.into().to_lowercase(), t.into()))
                .collect(),
        }
    }

    /// Canonical tag for one missing point, if a keyword matches.
    pub fn tag_for(&self, point: &str) -> Option<&str> {
        let lowered = point.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map(|(_, tag)| tag.as_str())
    }

    /// Normalizes a batch of missing points into weakness tags. Points
    /// with no keyword match are kept verbatim so no signal is dropped.
    /// Order-preserving, deduplicated.
    pub fn extract<'a>(&self, points: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for point in points {
            let trimmed = point.trim();
            if trimmed.is_empty() {
                continue;
            }
            let tag = self
                .tag_for(trimmed)
                .map(str::to_string)
                .unwrap_or_else(|| trimmed.to_string());
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

impl Default for WeaknessLexicon {
    fn default() -> Self {
        WeaknessLexicon::new([
            ("transaction", "Transactions"),
            ("index", "Indexing"),
            ("cache", "Caching"),
            ("architecture", "System Design"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keywords_normalize_to_tags() {
        let lexicon = WeaknessLexicon::default();
        assert_eq!(
            lexicon.tag_for("No mention of transaction boundaries"),
            Some("Transactions")
        );
        assert_eq!(lexicon.tag_for("Missing INDEX strategy"), Some("Indexing"));
        assert_eq!(lexicon.tag_for("cache invalidation"), Some("Caching"));
        assert_eq!(
            lexicon.tag_for("weak architecture reasoning"),
            Some("System Design")
        );
    }

    #[test]
    fn test_unmatched_points_pass_through() {
        let lexicon = WeaknessLexicon::default();
        let tags = lexicon.extract(["Did not cover rate limiting"]);
        assert_eq!(tags, ["Did not cover rate limiting"]);
    }

    #[test]
    fn test_extract_dedupes_preserving_order() {
        let lexicon = WeaknessLexicon::default();
        let tags = lexicon.extract([
            "cache invalidation missed",
            "no failure handling",
            "caches never mentioned",
            "   ",
        ]);
        assert_eq!(tags, ["Caching", "no failure handling"]);
    }

    #[test]
    fn test_custom_lexicon_overrides_default() {
        let lexicon = WeaknessLexicon::new([("latency", "Performance")]);
        assert_eq!(lexicon.tag_for("p99 latency ignored"), Some("Performance"));
        assert_eq!(lexicon.tag_for("transactions"), None);
    }
}
