//! The normalised constraint set shared by every search backend.
//!
//! A [`FilterBag`] is built once per search from the request filters and the
//! resolved [`PermittedTiers`], then handed by reference to the semantic,
//! keyword and count collaborators so all three see identical constraints.

use crate::types::{BadgeType, Content, ContentType, DateRange, SearchFilters, Visibility};
use crate::visibility::PermittedTiers;

/// Immutable search constraints. Fields are read through accessors only.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBag {
    query: String,
    visibility: PermittedTiers,
    content_types: Option<Vec<ContentType>>,
    tags: Option<Vec<String>>,
    badges: Option<Vec<BadgeType>>,
    date_range: Option<DateRange>,
    window: usize,
}

impl FilterBag {
    /// Build a bag from raw request parts.
    ///
    /// The query is trimmed. Content types and badges are sorted and
    /// deduplicated; tags are additionally trimmed and lowercased. Empty
    /// lists collapse to `None` (no constraint). `window` is the number of
    /// top-ranked matches each backend should return.
    pub fn new(
        query: &str,
        visibility: PermittedTiers,
        filters: Option<&SearchFilters>,
        window: usize,
    ) -> Self {
        let (content_types, tags, badges, date_range) = match filters {
            Some(f) => (
                f.content_types.as_deref().and_then(sorted_unique),
                f.tags.as_deref().and_then(normalize_tags),
                f.badges.as_deref().and_then(sorted_unique),
                f.date_range,
            ),
            None => (None, None, None, None),
        };

        Self {
            query: query.trim().to_string(),
            visibility,
            content_types,
            tags,
            badges,
            date_range,
            window,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visibility(&self) -> &PermittedTiers {
        &self.visibility
    }

    pub fn content_types(&self) -> Option<&[ContentType]> {
        self.content_types.as_deref()
    }

    /// Lowercased tag filter; content must carry at least one of them.
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    /// Owner badge filter. Evaluated by the backends, which know owners.
    pub fn badges(&self) -> Option<&[BadgeType]> {
        self.badges.as_deref()
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// How many top-ranked matches each backend should return.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Check the content-local constraints: tier, type, tags (any), date range.
    ///
    /// Badge constraints depend on the owner and are not checked here.
    /// `private` content never matches because the tier set cannot hold it.
    pub fn matches(&self, content: &Content) -> bool {
        if content.visibility == Visibility::Private || !self.visibility.contains(content.visibility)
        {
            return false;
        }
        if let Some(types) = &self.content_types {
            if !types.contains(&content.content_type) {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            let hit = content
                .tags
                .iter()
                .any(|t| tags.iter().any(|wanted| t.trim().eq_ignore_ascii_case(wanted)));
            if !hit {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if !range.contains(&content.publish_date) {
                return false;
            }
        }
        true
    }
}

fn sorted_unique<T: Copy + Ord>(values: &[T]) -> Option<Vec<T>> {
    let mut out = values.to_vec();
    out.sort();
    out.dedup();
    (!out.is_empty()).then_some(out)
}

fn normalize_tags(tags: &[String]) -> Option<Vec<String>> {
    let mut out: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    (!out.is_empty()).then_some(out)
}
