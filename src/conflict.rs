//! Removing conflicting pair and class rules.
//!
//! A glyph can be a literal in a glyph pair rule and at the same time a
//! member of a class used in a broader rule; a lookup containing both would
//! be ambiguous. The policy is that specificity wins: glyph pair rules beat
//! class rules, and single-class rules beat class pair rules. Resolution
//! walks the buckets from most to least specific, claiming concrete pairs
//! in a [`SeenPairs`] accumulator as it goes. When a class rule loses
//! members, the class is replaced in the rule by an explicit glyph list;
//! when it loses all of them, the rule is dropped.

use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::classes::{ClassRegistry, KernSide};
use crate::kerning::{KernPair, PairMap};
use crate::Name;

/// Concrete glyph pairs already claimed by a more specific rule.
///
/// The accumulator is threaded through the resolution passes in bucket
/// order; it is the only state the passes share.
#[derive(Debug, Default)]
pub(crate) struct SeenPairs(HashSet<KernPair>);

impl SeenPairs {
    /// Seed the accumulator with every glyph pair rule.
    pub(crate) fn seed(glyph_pair_rules: &PairMap) -> Self {
        SeenPairs(glyph_pair_rules.keys().cloned().collect())
    }

    /// Claim a concrete pair. Returns false if it was already claimed.
    fn claim(&mut self, pair: KernPair) -> bool {
        self.0.insert(pair)
    }
}

/// Filter the class members of each rule in a single-class bucket against
/// already claimed pairs.
///
/// `side` names the half of the pair holding the class. A narrowed rule is
/// re-keyed with an explicit glyph list (member order preserved); a rule
/// whose members are all claimed is dropped.
pub(crate) fn resolve_side_class_rules(
    rules: &mut PairMap,
    registry: &ClassRegistry,
    side: KernSide,
    seen: &mut SeenPairs,
) {
    let old = std::mem::take(rules);
    for ((left, right), value) in old {
        let class_name = match side {
            KernSide::Left => left.as_str(),
            KernSide::Right => right.as_str(),
        };
        let Some(members) = registry.side_members(side, class_name) else {
            rules.insert((left, right), value);
            continue;
        };
        let glyph = match side {
            KernSide::Left => &right,
            KernSide::Right => &left,
        };
        let kept: Vec<Name> = members
            .iter()
            .filter(|member| {
                let pair = match side {
                    KernSide::Left => ((*member).clone(), glyph.clone()),
                    KernSide::Right => (glyph.clone(), (*member).clone()),
                };
                seen.claim(pair)
            })
            .cloned()
            .collect();

        if kept.len() == members.len() {
            rules.insert((left, right), value);
        } else if kept.is_empty() {
            debug!("dropping fully shadowed class rule ({left}, {right})");
        } else {
            debug!("narrowing class rule ({left}, {right}) to {} member(s)", kept.len());
            let list = glyph_list(kept.iter());
            let key = match side {
                KernSide::Left => (list, right),
                KernSide::Right => (left, list),
            };
            rules.insert(key, value);
        }
    }
}

/// Filter the cross product of each class pair rule against already claimed
/// pairs.
///
/// A member survives on its side if it appears in *any* unclaimed concrete
/// pair; the two sides narrow independently, each to a sorted glyph list.
/// Conflicts are resolved against earlier buckets and earlier rules of this
/// bucket; mutual narrowing between two class pair rules sharing members is
/// not re-verified afterwards.
pub(crate) fn resolve_class_pair_rules(
    rules: &mut PairMap,
    registry: &ClassRegistry,
    seen: &mut SeenPairs,
) {
    let old = std::mem::take(rules);
    for ((left, right), value) in old {
        let (Some(left_members), Some(right_members)) = (
            registry.side_members(KernSide::Left, left.as_str()),
            registry.side_members(KernSide::Right, right.as_str()),
        ) else {
            rules.insert((left, right), value);
            continue;
        };

        let mut kept_left: BTreeSet<&Name> = BTreeSet::new();
        let mut kept_right: BTreeSet<&Name> = BTreeSet::new();
        for left_glyph in left_members {
            for right_glyph in right_members {
                if seen.claim((left_glyph.clone(), right_glyph.clone())) {
                    kept_left.insert(left_glyph);
                    kept_right.insert(right_glyph);
                }
            }
        }

        if kept_left.is_empty() {
            debug!("dropping fully shadowed class pair rule ({left}, {right})");
            continue;
        }
        let left_set: BTreeSet<&Name> = left_members.iter().collect();
        let right_set: BTreeSet<&Name> = right_members.iter().collect();
        let new_left =
            if kept_left == left_set { left } else { glyph_list(kept_left.into_iter()) };
        let new_right =
            if kept_right == right_set { right } else { glyph_list(kept_right.into_iter()) };
        rules.insert((new_left, new_right), value);
    }
}

/// Return the feature syntax representation of a list of glyph names.
fn glyph_list<'a>(glyphs: impl Iterator<Item = &'a Name>) -> Name {
    let mut list = String::from("[");
    for (index, glyph) in glyphs.enumerate() {
        if index > 0 {
            list.push(' ');
        }
        list.push_str(glyph);
    }
    list.push(']');
    Name::new_raw(&list)
}
