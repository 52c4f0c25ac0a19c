//! Kerning tables.

use std::collections::BTreeMap;

use crate::classes::KernSide;
use crate::Name;

/// A map of kerning pairs, as stored in a font.
///
/// This is represented as a map of first half of a kerning pair (glyph name
/// or group name) to the second half of a pair (glyph name or group name),
/// which maps to the kerning value (high-level view: (first, second) =>
/// value).
///
/// We use a [`BTreeMap`] because we need sorting for deterministic output.
pub type Kerning = BTreeMap<Name, BTreeMap<Name, f64>>;

/// The two halves of a kerning pair.
pub(crate) type KernPair = (Name, Name);

/// The engine's working table: a flat map of pair to adjustment.
///
/// Buckets use the same representation. This is an owned snapshot; the
/// caller's [`Kerning`] is never mutated.
pub(crate) type PairMap = BTreeMap<KernPair, i32>;

/// Snapshot a font's kerning table into a flat working table.
///
/// Feature syntax takes integer adjustments, so fractional values are
/// rounded half away from zero.
pub(crate) fn flatten(kerning: &Kerning) -> PairMap {
    let mut flat = PairMap::new();
    for (first, seconds) in kerning {
        for (second, value) in seconds {
            flat.insert((first.clone(), second.clone()), value.round() as i32);
        }
    }
    flat
}

/// Remove and return all entries whose half on `side` equals `name`.
pub(crate) fn take_matching(
    table: &mut PairMap,
    name: &str,
    side: KernSide,
) -> Vec<(KernPair, i32)> {
    let keys: Vec<KernPair> = table
        .keys()
        .filter(|(first, second)| {
            let half = match side {
                KernSide::Left => first,
                KernSide::Right => second,
            };
            half.as_str() == name
        })
        .cloned()
        .collect();

    let mut hits = Vec::with_capacity(keys.len());
    for key in keys {
        if let Some(value) = table.remove(&key) {
            hits.push((key, value));
        }
    }
    hits
}
