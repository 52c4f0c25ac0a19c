use std::collections::{BTreeMap, HashSet};

use crate::classes::{classify_group, KerningName, LEFT_GROUP_PREFIX, RIGHT_GROUP_PREFIX};
use crate::error::GroupsValidationError;
use crate::Name;

/// A map of group name to a list of glyph names.
///
/// We use a [`BTreeMap`] because we need sorting for deterministic output.
pub type Groups = BTreeMap<Name, Vec<Name>>;

/// Validate the contents of a groups mapping according to the rules in the
/// [Unified Font Object v3 specification for groups.plist](http://unifiedfontobject.org/versions/ufo3/groups.plist/#specification).
pub(crate) fn validate_groups(groups_map: &Groups) -> Result<(), GroupsValidationError> {
    let mut kern1_set = HashSet::new();
    let mut kern2_set = HashSet::new();
    for (group_name, group_glyph_names) in groups_map {
        if group_name.as_str() == LEFT_GROUP_PREFIX || group_name.as_str() == RIGHT_GROUP_PREFIX {
            // Prefix but no actual name.
            return Err(GroupsValidationError::InvalidName);
        }

        let seen_on_side = match classify_group(group_name) {
            KerningName::Left(_) => &mut kern1_set,
            KerningName::Right(_) => &mut kern2_set,
            KerningName::NotKerning => continue,
        };
        for glyph_name in group_glyph_names {
            if !seen_on_side.insert(glyph_name) {
                return Err(GroupsValidationError::OverlappingKerningGroups {
                    glyph_name: glyph_name.to_string(),
                    group_name: group_name.to_string(),
                });
            }
        }
    }

    Ok(())
}
