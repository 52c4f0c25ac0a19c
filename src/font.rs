//! Reading the slices of font data that kerning generation consumes.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::groups::{validate_groups, Groups};
use crate::kerning::Kerning;

static GROUPS_FILE: &str = "groups.plist";
static KERNING_FILE: &str = "kerning.plist";
static FEATURES_FILE: &str = "features.fea";

/// The slice of a font's data consumed by kern feature generation: the
/// kerning table, the named glyph groups, and any existing feature source.
///
/// This mirrors the corresponding fields of a [UFO font object][ufo]; a
/// caller with font data from elsewhere can fill in the fields directly.
/// [`KernFeatureWriter`] only ever reads from it.
///
/// [ufo]: https://unifiedfontobject.org/versions/ufo3/
/// [`KernFeatureWriter`]: crate::KernFeatureWriter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontData {
    /// The kerning table.
    pub kerning: Kerning,
    /// A map of group name to an ordered list of glyph names.
    pub groups: Groups,
    /// Existing feature source text (possibly empty).
    pub features: String,
}

impl FontData {
    /// Returns a new, empty [`FontData`] object.
    pub fn new() -> Self {
        FontData::default()
    }

    /// Returns a [`FontData`] object with data from a UFO directory `path`.
    ///
    /// Reads `kerning.plist`, `groups.plist` and `features.fea` as described
    /// in [v3 of the Unified Font Object][v3] spec. Each of the three files
    /// is optional; a missing file yields an empty default. Groups are
    /// validated on load.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kernfea::FontData;
    ///
    /// let font = FontData::from_ufo_dir("path/to/font.ufo").expect("failed to load");
    /// ```
    ///
    /// [v3]: http://unifiedfontobject.org/versions/ufo3/
    pub fn from_ufo_dir(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::MissingUfoDir(path.display().to_string()));
        }

        let groups_path = path.join(GROUPS_FILE);
        let groups =
            if groups_path.exists() { load_groups(&groups_path)? } else { Groups::new() };

        let kerning_path = path.join(KERNING_FILE);
        let kerning =
            if kerning_path.exists() { load_kerning(&kerning_path)? } else { Kerning::new() };

        let features_path = path.join(FEATURES_FILE);
        let features =
            if features_path.exists() { load_features(&features_path)? } else { String::new() };

        Ok(FontData { kerning, groups, features })
    }
}

fn load_groups(groups_path: &Path) -> Result<Groups, Error> {
    let groups: Groups = plist::from_file(groups_path)
        .map_err(|error| Error::PlistLoad { path: groups_path.to_owned(), error })?;
    validate_groups(&groups).map_err(Error::InvalidGroups)?;
    Ok(groups)
}

fn load_kerning(kerning_path: &Path) -> Result<Kerning, Error> {
    let kerning: Kerning = plist::from_file(kerning_path)
        .map_err(|error| Error::PlistLoad { path: kerning_path.to_owned(), error })?;
    Ok(kerning)
}

fn load_features(features_path: &Path) -> Result<String, Error> {
    let features = fs::read_to_string(features_path)
        .map_err(|inner| Error::UfoLoad { path: features_path.into(), inner })?;
    Ok(features)
}
