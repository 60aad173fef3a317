//! Weighted score fusion of semantic and keyword matches.
//!
//! Formula: `fused = 0.7 * similarity + 0.3 * rank`, where a side that did
//! not return the content contributes exactly 0. There is no renormalisation
//! by the number of contributing sides.
//!
//! Results are deduplicated by exact content id and sorted by fused score,
//! descending. Ties keep first-appearance order: semantic matches in backend
//! order, then keyword-only matches in backend order.

use std::collections::HashMap;

use crate::types::{Content, FusedResult, KeywordMatch, SemanticMatch};

/// Weight applied to semantic similarity.
pub const SEMANTIC_WEIGHT: f64 = 0.7;

/// Weight applied to keyword rank.
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// Combine a similarity and a rank, both in `[0, 1]`, into a fused score.
pub fn fused_score(similarity: f64, rank: f64) -> f64 {
    SEMANTIC_WEIGHT * similarity + KEYWORD_WEIGHT * rank
}

struct Entry {
    content: Content,
    similarity: f64,
    rank: f64,
}

/// Merge both match lists into one deduplicated, descending ranking.
///
/// If a backend repeats an id, its highest score for that id is used. The
/// content record is taken from the semantic match when there is one.
pub fn fuse(semantic: Vec<SemanticMatch>, keyword: Vec<KeywordMatch>) -> Vec<FusedResult> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(semantic.len() + keyword.len());
    let mut entries: Vec<Entry> = Vec::with_capacity(semantic.len() + keyword.len());

    for m in semantic {
        let similarity = clamp_score(m.similarity, "semantic", &m.content.id);
        match index.get(&m.content.id) {
            Some(&i) => entries[i].similarity = entries[i].similarity.max(similarity),
            None => {
                index.insert(m.content.id.clone(), entries.len());
                entries.push(Entry {
                    content: m.content,
                    similarity,
                    rank: 0.0,
                });
            }
        }
    }

    for m in keyword {
        let rank = clamp_score(m.rank, "keyword", &m.content.id);
        match index.get(&m.content.id) {
            Some(&i) => entries[i].rank = entries[i].rank.max(rank),
            None => {
                index.insert(m.content.id.clone(), entries.len());
                entries.push(Entry {
                    content: m.content,
                    similarity: 0.0,
                    rank,
                });
            }
        }
    }

    let mut fused: Vec<FusedResult> = entries
        .into_iter()
        .map(|e| FusedResult {
            fused_score: fused_score(e.similarity, e.rank),
            content: e.content,
        })
        .collect();

    // Stable sort: equal scores stay in first-appearance order.
    fused.sort_by(|a, b| b.fused_score.total_cmp(&a.fused_score));
    fused
}

/// Force a backend score into `[0, 1]`; non-finite scores count as 0.
fn clamp_score(score: f64, source: &'static str, id: &str) -> f64 {
    if !score.is_finite() {
        tracing::warn!(source, content_id = id, "non-finite backend score treated as 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&score) {
        tracing::warn!(source, content_id = id, score, "backend score outside [0, 1] clamped");
        return score.clamp(0.0, 1.0);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, Visibility};
    use chrono::Utc;
    use std::collections::{BTreeSet, HashMap};

    const EPS: f64 = 1e-9;

    fn content(id: &str) -> Content {
        Content {
            id: id.to_string(),
            title: format!("Title {id}"),
            description: String::new(),
            content_type: ContentType::Blog,
            visibility: Visibility::Public,
            tags: BTreeSet::new(),
            metrics: HashMap::new(),
            publish_date: Utc::now(),
            owner_id: "owner".into(),
        }
    }

    fn sem(id: &str, similarity: f64) -> SemanticMatch {
        SemanticMatch {
            content: content(id),
            similarity,
        }
    }

    fn kw(id: &str, rank: f64) -> KeywordMatch {
        KeywordMatch {
            content: content(id),
            rank,
        }
    }

    fn ids(results: &[FusedResult]) -> Vec<&str> {
        results.iter().map(|r| r.content.id.as_str()).collect()
    }

    #[test]
    fn weights_sum_to_one() {
        assert!((SEMANTIC_WEIGHT + KEYWORD_WEIGHT - 1.0).abs() < EPS);
    }

    #[test]
    fn both_sides_combined_by_weight() {
        let fused = fuse(vec![sem("c1", 1.0), sem("c2", 0.5)], vec![kw("c1", 0.3), kw("c2", 1.0)]);
        assert_eq!(ids(&fused), vec!["c1", "c2"]);
        assert!((fused[0].fused_score - 0.79).abs() < EPS);
        assert!((fused[1].fused_score - 0.65).abs() < EPS);
    }

    #[test]
    fn same_id_in_both_lists_appears_once() {
        let fused = fuse(vec![sem("c1", 0.9)], vec![kw("c1", 0.8)]);
        assert_eq!(fused.len(), 1);
        assert!((fused[0].fused_score - (0.7 * 0.9 + 0.3 * 0.8)).abs() < EPS);
    }

    #[test]
    fn missing_side_contributes_zero() {
        let fused = fuse(vec![sem("only-sem", 1.0)], vec![kw("only-kw", 1.0)]);
        assert_eq!(ids(&fused), vec!["only-sem", "only-kw"]);
        assert!((fused[0].fused_score - 0.7).abs() < EPS);
        assert!((fused[1].fused_score - 0.3).abs() < EPS);
    }

    #[test]
    fn empty_inputs_return_empty() {
        assert!(fuse(vec![], vec![]).is_empty());
    }

    #[test]
    fn single_side_preserves_backend_order() {
        let fused = fuse(vec![], vec![kw("a", 0.9), kw("b", 0.6), kw("c", 0.1)]);
        assert_eq!(ids(&fused), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        // z and a tie at 0.35; y (keyword-only) ties with x (keyword-only) at 0.15.
        let fused = fuse(
            vec![sem("z", 0.5), sem("a", 0.5)],
            vec![kw("y", 0.5), kw("x", 0.5)],
        );
        assert_eq!(ids(&fused), vec!["z", "a", "y", "x"]);
    }

    #[test]
    fn order_of_keyword_list_does_not_change_scores() {
        let a = fuse(
            vec![sem("c1", 0.4), sem("c2", 0.9)],
            vec![kw("c1", 1.0), kw("c2", 0.2)],
        );
        let b = fuse(
            vec![sem("c2", 0.9), sem("c1", 0.4)],
            vec![kw("c2", 0.2), kw("c1", 1.0)],
        );
        assert_eq!(ids(&a), ids(&b));
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.fused_score - y.fused_score).abs() < EPS);
        }
    }

    #[test]
    fn duplicate_within_one_list_keeps_best_score() {
        let fused = fuse(vec![sem("c1", 0.2), sem("c1", 0.6)], vec![]);
        assert_eq!(fused.len(), 1);
        assert!((fused[0].fused_score - 0.7 * 0.6).abs() < EPS);
    }

    #[test]
    fn semantic_content_record_wins() {
        let mut from_sem = content("c1");
        from_sem.title = "semantic copy".into();
        let mut from_kw = content("c1");
        from_kw.title = "keyword copy".into();
        let fused = fuse(
            vec![SemanticMatch {
                content: from_sem,
                similarity: 0.5,
            }],
            vec![KeywordMatch {
                content: from_kw,
                rank: 0.5,
            }],
        );
        assert_eq!(fused[0].content.title, "semantic copy");
    }

    #[test]
    fn out_of_range_scores_clamped() {
        let fused = fuse(vec![sem("hi", 1.7), sem("lo", -0.4)], vec![kw("nan", f64::NAN)]);
        let hi = fused.iter().find(|r| r.content.id == "hi").expect("hi present");
        let lo = fused.iter().find(|r| r.content.id == "lo").expect("lo present");
        let nan = fused.iter().find(|r| r.content.id == "nan").expect("nan present");
        assert!((hi.fused_score - 0.7).abs() < EPS);
        assert!(lo.fused_score.abs() < EPS);
        assert!(nan.fused_score.abs() < EPS);
    }

    #[test]
    fn output_sorted_descending() {
        let fused = fuse(
            (0..10).map(|i| sem(&format!("s{i}"), i as f64 / 10.0)).collect(),
            (0..10).map(|i| kw(&format!("s{i}"), 1.0 - i as f64 / 10.0)).collect(),
        );
        assert_eq!(fused.len(), 10);
        for pair in fused.windows(2) {
            assert!(pair[0].fused_score >= pair[1].fused_score);
        }
    }
}
