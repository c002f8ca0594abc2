//! Text shaping over a dynamically loaded HarfBuzz.
//!
//! The native library is opened at runtime via `libloading` (no build
//! time linkage) and its glyph arrays are exposed through bounded views
//! instead of raw pointer indexing. On top of that sits a small shaper:
//! blob/face setup, per-ppem font reuse, feature and variation parsing,
//! and cluster-to-text attribution, plus a script itemizer for
//! splitting mixed-script input into shapeable runs.

pub mod hb_sys;

mod buffer;
mod error;
mod glyph;
mod library;
mod script;
mod shaper;

pub use buffer::GlyphView;
pub use error::{Result, ShapeError};
pub use glyph::{Direction, Glyph, Script};
pub use library::HbLibrary;
pub use script::{itemize_scripts, ScriptRun};
pub use shaper::{ShapeOptions, Shaper};
