//! Generating the kern feature.

use std::collections::BTreeSet;

use log::warn;

use crate::classes::{ClassRegistry, KernSide};
use crate::conflict::{self, SeenPairs};
use crate::error::Error;
use crate::font::FontData;
use crate::kerning::{self, PairMap};
use crate::Name;

/// Generates a kern feature based on glyph class definitions.
///
/// Uses the kerning rules contained in a font's kerning table, as well as
/// glyph classes from the font's groups and from parsed feature source.
/// Rules for pre-declared feature classes are set based on the existing
/// rules for their key glyphs (the first member of each class).
///
/// A writer takes a snapshot of the font data at construction and owns it
/// exclusively for one generation pass; [`write`] consumes the writer, so
/// generating again means constructing a new one.
///
/// [`write`]: KernFeatureWriter::write
#[derive(Debug)]
pub struct KernFeatureWriter {
    /// The working kerning table, drained into the buckets below.
    kerning: PairMap,
    classes: ClassRegistry,
    glyph_pair_kerning: PairMap,
    left_class_kerning: PairMap,
    right_class_kerning: PairMap,
    class_pair_kerning: PairMap,
}

impl KernFeatureWriter {
    /// Create a writer over a snapshot of `font`.
    ///
    /// This parses glyph class definitions out of the font's feature source
    /// and corrects group names that are illegal in feature syntax, so it
    /// fails if the feature source contains a malformed class definition.
    /// The font data itself is never mutated.
    pub fn new(font: &FontData) -> Result<Self, Error> {
        let mut kerning = kerning::flatten(&font.kerning);
        let classes = ClassRegistry::collect(&font.features, &font.groups, &mut kerning)?;
        Ok(KernFeatureWriter {
            kerning,
            classes,
            glyph_pair_kerning: PairMap::new(),
            left_class_kerning: PairMap::new(),
            right_class_kerning: PairMap::new(),
            class_pair_kerning: PairMap::new(),
        })
    }

    /// Generate the kern feature text, with lines separated by `"\n"`.
    ///
    /// Returns the empty string when there are no kerning rules to write;
    /// no empty feature block is ever produced.
    pub fn write(self) -> String {
        self.write_with_line_ending("\n")
    }

    /// Generate the kern feature text with a caller-supplied line ending.
    pub fn write_with_line_ending(mut self, line_ending: &str) -> String {
        self.collect_fea_class_kerning();
        self.collect_group_kerning();
        self.remove_conflicting_rules();
        self.render(line_ending)
    }

    /// Set up class rules from pre-declared feature class definitions.
    ///
    /// The first glyph of each class (its "key") determines the kerning
    /// values associated with the whole class. Key pairs are consumed here
    /// so the partitioner does not misread them as plain glyph pairs.
    fn collect_fea_class_kerning(&mut self) {
        for (left_name, left_members) in &self.classes.left_fea {
            let Some(left_key) = left_members.first() else {
                warn!("feature class '{left_name}' has no members, no key glyph to resolve");
                continue;
            };

            // rules with two classes
            for (right_name, right_members) in &self.classes.right_fea {
                let Some(right_key) = right_members.first() else { continue };
                if let Some(value) = self.kerning.remove(&(left_key.clone(), right_key.clone())) {
                    self.class_pair_kerning.insert((left_name.clone(), right_name.clone()), value);
                }
            }

            // rules with a left class and a right glyph
            for ((_, right), value) in
                kerning::take_matching(&mut self.kerning, left_key, KernSide::Left)
            {
                self.left_class_kerning.insert((left_name.clone(), right), value);
            }
        }

        // rules with a left glyph and a right class
        for (right_name, right_members) in &self.classes.right_fea {
            let Some(right_key) = right_members.first() else {
                warn!("feature class '{right_name}' has no members, no key glyph to resolve");
                continue;
            };
            for ((left, _), value) in
                kerning::take_matching(&mut self.kerning, right_key, KernSide::Right)
            {
                self.right_class_kerning.insert((left, right_name.clone()), value);
            }
        }
    }

    /// Partition the remaining kerning entries into glyph pair or class
    /// rules by group membership of each half.
    fn collect_group_kerning(&mut self) {
        let remaining = std::mem::take(&mut self.kerning);
        for ((left, right), value) in remaining {
            let left_is_class = self.classes.left_groups.contains_key(left.as_str());
            let right_is_class = self.classes.right_groups.contains_key(right.as_str());
            let bucket = match (left_is_class, right_is_class) {
                (true, true) => &mut self.class_pair_kerning,
                (true, false) => &mut self.left_class_kerning,
                (false, true) => &mut self.right_class_kerning,
                (false, false) => &mut self.glyph_pair_kerning,
            };
            bucket.insert((left, right), value);
        }
    }

    /// Remove any conflicting pair and class rules, most specific bucket
    /// first.
    fn remove_conflicting_rules(&mut self) {
        let mut seen = SeenPairs::seed(&self.glyph_pair_kerning);
        conflict::resolve_side_class_rules(
            &mut self.left_class_kerning,
            &self.classes,
            KernSide::Left,
            &mut seen,
        );
        conflict::resolve_side_class_rules(
            &mut self.right_class_kerning,
            &self.classes,
            KernSide::Right,
            &mut seen,
        );
        conflict::resolve_class_pair_rules(&mut self.class_pair_kerning, &self.classes, &mut seen);
    }

    fn render(&self, line_ending: &str) -> String {
        if self.glyph_pair_kerning.is_empty()
            && self.left_class_kerning.is_empty()
            && self.right_class_kerning.is_empty()
            && self.class_pair_kerning.is_empty()
        {
            // no kerning pairs, don't write an empty feature
            return String::new();
        }

        let mut lines = Vec::new();
        self.add_glyph_classes(&mut lines);
        lines.push(String::new());

        lines.push("feature kern {".into());
        add_kerning(&mut lines, &self.glyph_pair_kerning, false);
        if !self.left_class_kerning.is_empty() {
            lines.push("    subtable;".into());
            add_kerning(&mut lines, &self.left_class_kerning, true);
        }
        if !self.right_class_kerning.is_empty() {
            lines.push("    subtable;".into());
            add_kerning(&mut lines, &self.right_class_kerning, true);
        }
        if !self.class_pair_kerning.is_empty() {
            lines.push("    subtable;".into());
            add_kerning(&mut lines, &self.class_pair_kerning, false);
        }
        lines.push("} kern;".into());

        lines.join(line_ending)
    }

    /// Add glyph class definitions for the group classes referenced by a
    /// surviving rule. Feature-declared classes are already defined in the
    /// hand-written source.
    fn add_glyph_classes(&self, lines: &mut Vec<String>) {
        let used = self.used_class_names();
        let definitions = self
            .classes
            .left_groups
            .iter()
            .chain(self.classes.right_groups.iter())
            .filter(|(class_name, _)| used.contains(class_name.as_str()))
            .collect::<std::collections::BTreeMap<_, _>>();
        for (class_name, members) in definitions {
            let members: Vec<&str> = members.iter().map(Name::as_str).collect();
            lines.push(format!("{} = [{}];", class_name, members.join(" ")));
        }
    }

    fn used_class_names(&self) -> BTreeSet<&str> {
        let mut used = BTreeSet::new();
        for (left, _) in self.left_class_kerning.keys().chain(self.class_pair_kerning.keys()) {
            used.insert(left.as_str());
        }
        for (_, right) in self.right_class_kerning.keys().chain(self.class_pair_kerning.keys()) {
            used.insert(right.as_str());
        }
        used
    }
}

/// Add kerning rules for one bucket, sorted by pair.
fn add_kerning(lines: &mut Vec<String>, rules: &PairMap, enumerate: bool) {
    let prefix = if enumerate { "enum " } else { "" };
    for ((left, right), value) in rules {
        lines.push(format!("    {prefix}pos {left} {right} {value};"));
    }
}
