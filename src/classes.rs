//! Kerning class collection and naming.
//!
//! Kerning classes come from two places: glyph class definitions in existing
//! feature source, and the font's named glyph groups. Both are split into
//! left-hand and right-hand registries by fixed naming conventions. Group
//! names are free-form and may be illegal in feature syntax, so they get a
//! corrected identifier here before any rules are built from them.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::debug;

use crate::error::Error;
use crate::fea;
use crate::groups::Groups;
use crate::kerning::{self, PairMap};
use crate::Name;

pub(crate) static LEFT_GROUP_PREFIX: &str = "public.kern1.";
pub(crate) static RIGHT_GROUP_PREFIX: &str = "public.kern2.";
pub(crate) static LEFT_CLASS_PREFIX: &str = "@MMK_L_";
pub(crate) static RIGHT_CLASS_PREFIX: &str = "@MMK_R_";

/// Which half of a kerning pair a class applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KernSide {
    /// The first glyph of a pair.
    Left,
    /// The second glyph of a pair.
    Right,
}

/// The kerning role of a group or class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KerningName<'a> {
    /// Not a kerning name; ignored for kerning purposes.
    NotKerning,
    /// A left-hand kerning name, with the prefix stripped.
    Left(&'a str),
    /// A right-hand kerning name, with the prefix stripped.
    Right(&'a str),
}

/// Classify a font group name by the `public.kern1.`/`public.kern2.`
/// convention.
pub(crate) fn classify_group(name: &str) -> KerningName<'_> {
    classify(name, LEFT_GROUP_PREFIX, RIGHT_GROUP_PREFIX)
}

/// Classify a feature glyph class name by the `@MMK_L_`/`@MMK_R_`
/// convention.
pub(crate) fn classify_fea_class(name: &str) -> KerningName<'_> {
    classify(name, LEFT_CLASS_PREFIX, RIGHT_CLASS_PREFIX)
}

fn classify<'a>(name: &'a str, left: &str, right: &str) -> KerningName<'a> {
    if let Some(base) = name.strip_prefix(left) {
        if !base.is_empty() {
            return KerningName::Left(base);
        }
    }
    if let Some(base) = name.strip_prefix(right) {
        if !base.is_empty() {
            return KerningName::Right(base);
        }
    }
    KerningName::NotKerning
}

/// The four kerning class namespaces known to one generation pass.
///
/// Feature-declared classes keep definition order (it drives key glyph
/// resolution); group-declared classes are kept sorted.
#[derive(Debug, Default)]
pub(crate) struct ClassRegistry {
    pub(crate) left_fea: IndexMap<Name, Vec<Name>>,
    pub(crate) right_fea: IndexMap<Name, Vec<Name>>,
    pub(crate) left_groups: BTreeMap<Name, Vec<Name>>,
    pub(crate) right_groups: BTreeMap<Name, Vec<Name>>,
}

impl ClassRegistry {
    /// Collect kerning classes from existing feature source and from the
    /// font's groups.
    ///
    /// Groups whose names are illegal in feature syntax are renamed, and
    /// every entry of `kerning` keyed on a renamed group is re-keyed under
    /// the corrected identifier. After this, every class known to the
    /// registry has a legal, unique feature identifier.
    pub(crate) fn collect(
        features: &str,
        groups: &Groups,
        kerning: &mut PairMap,
    ) -> Result<Self, Error> {
        let mut registry = ClassRegistry::default();
        for (name, members) in fea::parse_class_definitions(features)? {
            match classify_fea_class(&name) {
                KerningName::Left(_) => {
                    registry.left_fea.insert(name, members);
                }
                KerningName::Right(_) => {
                    registry.right_fea.insert(name, members);
                }
                KerningName::NotKerning => {}
            }
        }
        for (name, members) in groups {
            match classify_group(name) {
                KerningName::Left(_) => {
                    registry.left_groups.insert(name.clone(), members.clone());
                }
                KerningName::Right(_) => {
                    registry.right_groups.insert(name.clone(), members.clone());
                }
                KerningName::NotKerning => {}
            }
        }
        registry.correct_group_names(kerning);
        Ok(registry)
    }

    /// Detect and replace group names that are illegal in feature syntax.
    fn correct_group_names(&mut self, kerning: &mut PairMap) {
        for side in [KernSide::Left, KernSide::Right] {
            let names: Vec<Name> = match side {
                KernSide::Left => self.left_groups.keys().cloned().collect(),
                KernSide::Right => self.right_groups.keys().cloned().collect(),
            };
            for name in names {
                let new_name = self.make_fea_class_name(&name);
                if new_name == name {
                    continue;
                }
                debug!("renaming kerning group '{}' to '{}'", name, new_name);
                let groups = match side {
                    KernSide::Left => &mut self.left_groups,
                    KernSide::Right => &mut self.right_groups,
                };
                if let Some(members) = groups.remove(&name) {
                    groups.insert(new_name.clone(), members);
                }
                for ((left, right), value) in kerning::take_matching(kerning, &name, side) {
                    let new_key = match side {
                        KernSide::Left => (new_name.clone(), right),
                        KernSide::Right => (left, new_name.clone()),
                    };
                    kerning.insert(new_key, value);
                }
            }
        }
    }

    /// Make a glyph class name which is legal to use in feature syntax.
    ///
    /// Ensures the name starts with `@` and only includes characters in
    /// `A-Za-z0-9._`, and isn't already in use by any known class.
    fn make_fea_class_name(&self, name: &str) -> Name {
        let stripped: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '_')
            .collect();
        let base = format!("@{stripped}");
        let mut candidate = base.clone();
        let mut counter = 1;
        while self.contains_class(&candidate) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        Name::new_raw(&candidate)
    }

    fn contains_class(&self, name: &str) -> bool {
        self.left_fea.contains_key(name)
            || self.right_fea.contains_key(name)
            || self.left_groups.contains_key(name)
            || self.right_groups.contains_key(name)
    }

    /// Look up the members of a class usable on `side`, feature-declared
    /// classes first.
    pub(crate) fn side_members(&self, side: KernSide, name: &str) -> Option<&[Name]> {
        let (fea, groups) = match side {
            KernSide::Left => (&self.left_fea, &self.left_groups),
            KernSide::Right => (&self.right_fea, &self.right_groups),
        };
        fea.get(name).or_else(|| groups.get(name)).map(|members| members.as_slice())
    }
}
