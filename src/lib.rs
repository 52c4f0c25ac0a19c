//! Generate a `kern` feature from a font's kerning data.
//!
//! The writer merges two sources of kerning classes, the font's named glyph
//! groups and glyph classes already declared in hand-written feature source,
//! with the font's kerning table, and renders a minimal, non-conflicting,
//! deterministic set of kerning rules as feature source text. Compiling the
//! result into binary lookup tables is a separate tool's job.
//!
//! # Basic usage:
//!
//! ```no_run
//! use kernfea::{FontData, KernFeatureWriter};
//!
//! let font = FontData::from_ufo_dir("RoflsSansLight.ufo").expect("failed to load font data");
//! let writer = KernFeatureWriter::new(&font).expect("failed to collect kerning classes");
//! let fea = writer.write();
//! if !fea.is_empty() {
//!     println!("{}", fea);
//! }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

mod classes;
mod conflict;
pub mod error;
mod fea;
mod font;
mod groups;
mod kerning;
mod name;
mod writer;

pub use error::Error;
pub use font::FontData;
pub use groups::Groups;
pub use kerning::Kerning;
pub use name::Name;
pub use writer::KernFeatureWriter;
