//! Umbrella crate re-exporting the quill shaping library.

pub use quill_shape::*;
