//! Query parameter coercion.
//!
//! Turns loosely typed caller input into a [`SearchQuery`]. Nothing
//! here rejects a request:
//! - blank text becomes "not given"
//! - the term is trimmed, inner whitespace collapsed and truncated
//! - a non-numeric, zero or negative `page`/`limit` falls back to the
//!   default, and an oversized `limit` is capped

use crate::core::config::SearchConfig;
use crate::core::types::{SearchParams, SearchQuery};

impl SearchParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// `term` is accepted for `query` and `pageSize` for `limit`. The
    /// first occurrence of a key wins and unknown keys are ignored.
    ///
    /// ```
    /// use folio::core::types::SearchParams;
    ///
    /// let params = SearchParams::from_pairs([("term", "kafka"), ("page", "2"), ("page", "9")]);
    /// assert_eq!(params.query.as_deref(), Some("kafka"));
    /// assert_eq!(params.page.as_deref(), Some("2"));
    /// ```
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut params = SearchParams::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "query" | "term" | "q" => &mut params.query,
                "category" => &mut params.category,
                "tag" => &mut params.tag,
                "page" => &mut params.page,
                "limit" | "pageSize" | "page_size" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }

        params
    }

    /// Coerce into a normalized query. Never fails.
    ///
    /// ```
    /// use folio::core::config::SearchConfig;
    /// use folio::core::types::SearchParams;
    ///
    /// let params = SearchParams {
    ///     query: Some("  intro   to kafka ".to_string()),
    ///     page: Some("-3".to_string()),
    ///     limit: Some("abc".to_string()),
    ///     ..Default::default()
    /// };
    /// let query = params.into_query(&SearchConfig::default());
    /// assert_eq!(query.term.as_deref(), Some("intro to kafka"));
    /// assert_eq!(query.page, 1);
    /// assert_eq!(query.page_size, 9);
    /// ```
    pub fn into_query(self, config: &SearchConfig) -> SearchQuery {
        let page_size = positive(self.limit.as_deref())
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size.max(1));

        SearchQuery {
            term: self
                .query
                .as_deref()
                .and_then(|t| normalize_term(t, config.max_term_chars)),
            category: non_blank(self.category),
            tag: non_blank(self.tag),
            page: positive(self.page.as_deref()).unwrap_or(1),
            page_size: page_size.max(1),
        }
    }
}

/// Trim, collapse whitespace runs and keep at most `max_chars`
/// characters. `None` when nothing is left.
pub fn normalize_term(raw: &str, max_chars: usize) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(max_chars).collect();
    let term = truncated.trim_end();

    (!term.is_empty()).then(|| term.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A strictly positive integer, or `None`
fn positive(value: Option<&str>) -> Option<usize> {
    value?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}
