// crates/snippet_extractor/src/lib.rs

//! Extracts named regions delimited by `//gistsnip:start:<id>` and
//! `//gistsnip:end:<id>` comment lines.
//!
//! Regions may nest or interleave; each one captures every non-marker line
//! between its own start and end markers.
//!
//! ```ignore
//! use snippet_extractor::{extract, MarkerSyntax};
//!
//! let result = extract(source, &MarkerSyntax::default())?;
//! for region in result.iter() {
//!     println!("{}:\n{}", region.id, region.snippet());
//! }
//! ```

pub mod error;
pub mod extractor;
pub mod marker;
pub mod processor;
pub mod utils;

pub use error::{ExtractError, OpenRegionInfo};
pub use extractor::{extract, ExtractionResult, Extractor, Region};
pub use marker::{Marker, MarkerKind, MarkerSyntax, DEFAULT_PREFIX};
pub use utils::dedent::{dedent, render_snippet};
