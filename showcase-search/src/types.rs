//! Core types for showcase content, callers, search requests and results.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of community content registered on the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Blog,
    Video,
    Code,
    Talk,
    Audio,
}

impl ContentType {
    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Video => "video",
            Self::Code => "code",
            Self::Talk => "talk",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Privacy level of a content item, ordered from narrowest to broadest audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Owner only. Never searchable through the hybrid search path.
    Private,
    /// AWS employees.
    AwsOnly,
    /// Badge-holding community members.
    AwsCommunity,
    /// Everyone, including anonymous callers.
    Public,
}

impl Visibility {
    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::AwsOnly => "aws_only",
            Self::AwsCommunity => "aws_community",
            Self::Public => "public",
        }
    }

    /// Returns all tiers, narrowest first.
    pub fn all() -> &'static [Visibility] {
        &[
            Self::Private,
            Self::AwsOnly,
            Self::AwsCommunity,
            Self::Public,
        ]
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A community credential that unlocks broader visibility tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeType {
    CommunityBuilder,
    Hero,
    Ambassador,
    UserGroupLeader,
}

impl BadgeType {
    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommunityBuilder => "community_builder",
            Self::Hero => "hero",
            Self::Ambassador => "ambassador",
            Self::UserGroupLeader => "user_group_leader",
        }
    }
}

impl fmt::Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of registered content as read by the search core.
///
/// Owned by the content-management subsystem; search never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Unique content identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    pub visibility: Visibility,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Open map of numeric counters (views, likes, ...).
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    pub publish_date: DateTime<Utc>,
    /// Identifier of the owning user.
    pub owner_id: String,
}

/// Identity of the caller for one search, built by the identity layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    pub authenticated: bool,
    #[serde(default)]
    pub badges: BTreeSet<BadgeType>,
    #[serde(default)]
    pub is_aws_employee: bool,
}

impl CallerContext {
    /// An unauthenticated caller with no badges.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Inclusive publish-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Returns `true` if `at` falls within `[start, end]`.
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.start && *at <= self.end
    }
}

/// Optional narrowing constraints supplied with a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub content_types: Option<Vec<ContentType>>,
    pub tags: Option<Vec<String>>,
    /// Restrict to content whose owner holds one of these badges.
    pub badges: Option<Vec<BadgeType>>,
    /// Requested visibility subset; intersected with what the caller may see.
    pub visibility: Option<Vec<Visibility>>,
    pub date_range: Option<DateRange>,
}

/// A search request as handed over by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub filters: Option<SearchFilters>,
    /// Page size. `None` falls back to the configured default (20).
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl SearchRequest {
    /// A request with the given query and no filters or paging overrides.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// A semantic-search hit. `similarity` is pre-normalised to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatch {
    pub content: Content,
    pub similarity: f64,
}

/// A keyword-search hit. `rank` is pre-normalised to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub content: Content,
    pub rank: f64,
}

/// One deduplicated entry of the fused ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedResult {
    pub content: Content,
    pub fused_score: f64,
}

/// One page of search results.
///
/// `total` is the authoritative match count, independent of `items.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<Content>,
    pub total: u64,
    pub limit: usize,
    pub offset: usize,
}

impl SearchResult {
    /// An empty page echoing the requested window.
    pub fn empty(limit: usize, offset: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit,
            offset,
        }
    }
}
