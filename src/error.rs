//! Error types.

use std::io::Error as IoError;
use std::path::PathBuf;

use plist::Error as PlistError;

/// Errors that occur while collecting font data or generating a kern feature.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An error returned when the requested UFO directory path is not present.
    #[error("{0} directory was not found")]
    MissingUfoDir(String),
    /// An error returned when there is an input/output problem during loading.
    #[error("failed to read {}", path.display())]
    UfoLoad {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        inner: IoError,
    },
    /// An error returned when a plist file fails to load.
    #[error("failed to load {}", path.display())]
    PlistLoad {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        error: PlistError,
    },
    /// An error returned when there is invalid groups data.
    #[error("invalid groups data")]
    InvalidGroups(#[from] GroupsValidationError),
    /// An error returned when glyph class definitions cannot be parsed out
    /// of existing feature source.
    #[error("failed to parse glyph classes from feature source")]
    FeaParse(#[from] FeaParseError),
}

/// An error representing a failure to validate UFO kerning groups.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GroupsValidationError {
    /// An error returned when there is an invalid group name.
    #[error(
        "a kerning group name must have at least one character after the \
         common 'public.kernN.' prefix"
    )]
    InvalidName,
    /// An error returned when there are overlapping kerning groups.
    #[error("the glyph '{glyph_name}' appears in more than one kerning group, last found in '{group_name}'")]
    OverlappingKerningGroups {
        /// The glyph name.
        glyph_name: String,
        /// The group name.
        group_name: String,
    },
}

/// An error that occurs while harvesting glyph class definitions from
/// feature source.
///
/// Only `@name = [..];` statements are interpreted; a definition that starts
/// and then goes wrong is an error, everything else in the source is skipped.
/// No reliable line number information is available.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FeaParseError {
    /// A glyph class name with no characters after the '@'.
    #[error("a glyph class name must have at least one character after '@'")]
    EmptyClassName,
    /// A class definition without a bracketed member list.
    #[error("expected '[' to open the member list of '{0}'")]
    MissingMemberList(String),
    /// A member list that is never closed.
    #[error("unterminated member list for class '{0}'")]
    UnterminatedMemberList(String),
    /// A class definition without a terminating semicolon.
    #[error("expected ';' after the member list of '{0}'")]
    MissingSemicolon(String),
    /// A member that is not a usable glyph or class name.
    #[error("invalid member name in class '{0}'")]
    InvalidMember(String, #[source] NamingError),
    /// A string literal that is never closed.
    #[error("unterminated string literal in feature source")]
    UnterminatedString,
}

/// An error representing an invalid [`Name`].
///
/// [`Name`]: crate::Name
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NamingError {
    /// The name is empty or contains control characters.
    #[error("invalid name '{0}': names must be non-empty and contain no control characters")]
    Invalid(String),
}
