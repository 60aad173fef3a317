//! Caller-specific visibility policy.
//!
//! Maps a [`CallerContext`] to the set of visibility tiers the caller may
//! search, optionally narrowed by a requested subset. Tiers are granted
//! additively:
//!
//! | Condition | Tier added |
//! |-----------|------------|
//! | always | `public` |
//! | authenticated and holds at least one badge | `aws_community` |
//! | authenticated AWS employee | `aws_only` |
//!
//! An unauthenticated caller always gets `public` alone, whatever else the
//! context claims.
//!
//! `private` is never granted: private content is only reachable by its
//! owner through the content-management path.

use std::collections::BTreeSet;

use crate::types::{CallerContext, Visibility};

/// A non-empty set of searchable tiers that never contains `private`.
///
/// Only [`permitted_visibility`] can build one, so holding a value is proof
/// the policy has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermittedTiers(BTreeSet<Visibility>);

impl PermittedTiers {
    pub fn contains(&self, tier: Visibility) -> bool {
        self.0.contains(&tier)
    }

    /// Tiers in narrowest-first order.
    pub fn iter(&self) -> impl Iterator<Item = Visibility> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no tier is permitted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Visibility> {
        self.0.iter().copied().collect()
    }
}

/// Outcome of the visibility policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityAccess {
    /// The caller may search these tiers.
    Tiers(PermittedTiers),
    /// The requested subset shares nothing with what the caller may see.
    /// Not an error: the search short-circuits to an empty page.
    NoAccess,
}

/// Compute the tiers `context` may search, narrowed by `requested` if given.
///
/// An empty `requested` slice is treated as "no narrowing".
pub fn permitted_visibility(
    context: &CallerContext,
    requested: Option<&[Visibility]>,
) -> VisibilityAccess {
    let mut granted = BTreeSet::from([Visibility::Public]);
    if context.authenticated {
        if !context.badges.is_empty() {
            granted.insert(Visibility::AwsCommunity);
        }
        if context.is_aws_employee {
            granted.insert(Visibility::AwsOnly);
        }
    }

    let tiers = match requested {
        Some(subset) if !subset.is_empty() => subset
            .iter()
            .copied()
            .filter(|tier| granted.contains(tier))
            .collect::<BTreeSet<_>>(),
        _ => granted,
    };

    if tiers.is_empty() {
        VisibilityAccess::NoAccess
    } else {
        VisibilityAccess::Tiers(PermittedTiers(tiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BadgeType;

    fn ctx(authenticated: bool, badges: &[BadgeType], employee: bool) -> CallerContext {
        CallerContext {
            authenticated,
            badges: badges.iter().copied().collect(),
            is_aws_employee: employee,
        }
    }

    fn tiers(access: VisibilityAccess) -> Vec<Visibility> {
        match access {
            VisibilityAccess::Tiers(t) => t.to_vec(),
            VisibilityAccess::NoAccess => panic!("expected tiers, got NoAccess"),
        }
    }

    #[test]
    fn anonymous_sees_public_only() {
        let access = permitted_visibility(&CallerContext::anonymous(), None);
        assert_eq!(tiers(access), vec![Visibility::Public]);
    }

    #[test]
    fn unauthenticated_badges_are_ignored() {
        // Badges without authentication grant nothing extra.
        let access = permitted_visibility(&ctx(false, &[BadgeType::Hero], false), None);
        assert_eq!(tiers(access), vec![Visibility::Public]);
    }

    #[test]
    fn authenticated_without_badges_sees_public_only() {
        let access = permitted_visibility(&ctx(true, &[], false), None);
        assert_eq!(tiers(access), vec![Visibility::Public]);
    }

    #[test]
    fn badge_holder_gains_community_tier() {
        let access = permitted_visibility(&ctx(true, &[BadgeType::CommunityBuilder], false), None);
        assert_eq!(
            tiers(access),
            vec![Visibility::AwsCommunity, Visibility::Public]
        );
    }

    #[test]
    fn employee_gains_aws_only_tier() {
        let access = permitted_visibility(&ctx(true, &[], true), None);
        assert_eq!(tiers(access), vec![Visibility::AwsOnly, Visibility::Public]);
    }

    #[test]
    fn unauthenticated_employee_sees_public_only() {
        let access = permitted_visibility(&ctx(false, &[], true), None);
        assert_eq!(tiers(access), vec![Visibility::Public]);

        let access = permitted_visibility(&ctx(false, &[], true), Some(&[Visibility::AwsOnly]));
        assert_eq!(access, VisibilityAccess::NoAccess);
    }

    #[test]
    fn unauthenticated_callers_always_get_public_alone() {
        for employee in [false, true] {
            for badges in [&[][..], &[BadgeType::Hero, BadgeType::UserGroupLeader][..]] {
                let access = permitted_visibility(&ctx(false, badges, employee), None);
                assert_eq!(tiers(access), vec![Visibility::Public]);
            }
        }
    }

    #[test]
    fn badge_holding_employee_gets_three_tiers() {
        let access = permitted_visibility(&ctx(true, &[BadgeType::Hero], true), None);
        assert_eq!(
            tiers(access),
            vec![
                Visibility::AwsOnly,
                Visibility::AwsCommunity,
                Visibility::Public
            ]
        );
    }

    #[test]
    fn private_is_never_granted() {
        for authenticated in [false, true] {
            for employee in [false, true] {
                for badges in [&[][..], &[BadgeType::Ambassador][..]] {
                    let c = ctx(authenticated, badges, employee);
                    let access = permitted_visibility(&c, Some(&[Visibility::Private]));
                    assert_eq!(access, VisibilityAccess::NoAccess);
                    let all = tiers(permitted_visibility(&c, None));
                    assert!(!all.contains(&Visibility::Private));
                }
            }
        }
    }

    #[test]
    fn requested_subset_narrows() {
        let access = permitted_visibility(
            &ctx(true, &[BadgeType::Hero], true),
            Some(&[Visibility::AwsCommunity]),
        );
        assert_eq!(tiers(access), vec![Visibility::AwsCommunity]);
    }

    #[test]
    fn requested_subset_partially_permitted() {
        let access = permitted_visibility(
            &CallerContext::anonymous(),
            Some(&[Visibility::AwsOnly, Visibility::Public]),
        );
        assert_eq!(tiers(access), vec![Visibility::Public]);
    }

    #[test]
    fn anonymous_requesting_aws_only_has_no_access() {
        let access =
            permitted_visibility(&CallerContext::anonymous(), Some(&[Visibility::AwsOnly]));
        assert_eq!(access, VisibilityAccess::NoAccess);
    }

    #[test]
    fn empty_requested_subset_means_no_narrowing() {
        let access = permitted_visibility(&ctx(true, &[], true), Some(&[]));
        assert_eq!(tiers(access), vec![Visibility::AwsOnly, Visibility::Public]);
    }

    #[test]
    fn duplicate_requested_tiers_collapse() {
        let access = permitted_visibility(
            &CallerContext::anonymous(),
            Some(&[Visibility::Public, Visibility::Public]),
        );
        assert_eq!(tiers(access), vec![Visibility::Public]);
    }
}
