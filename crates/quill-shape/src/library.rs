//! Dynamic loading of the HarfBuzz shared library.

use crate::error::{Result, ShapeError};
use crate::hb_sys::*;
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};

/// HarfBuzz library wrapper for dynamic loading.
///
/// Every entry point is resolved eagerly at load time; the `Library` is
/// retained so the code the pointers reference stays mapped.
pub struct HbLibrary {
    #[allow(dead_code)]
    lib: Library,
    pub(crate) hb_blob_create: HbBlobCreateFn,
    pub(crate) hb_blob_destroy: HbBlobDestroyFn,
    pub(crate) hb_face_create: HbFaceCreateFn,
    pub(crate) hb_face_destroy: HbFaceDestroyFn,
    pub(crate) hb_face_get_glyph_count: HbFaceGetGlyphCountFn,
    pub(crate) hb_font_create: HbFontCreateFn,
    pub(crate) hb_font_destroy: HbFontDestroyFn,
    pub(crate) hb_font_set_ppem: HbFontSetPpemFn,
    pub(crate) hb_font_set_variations: HbFontSetVariationsFn,
    pub(crate) hb_buffer_create: HbBufferCreateFn,
    pub(crate) hb_buffer_destroy: HbBufferDestroyFn,
    pub(crate) hb_buffer_add_utf8: HbBufferAddUtf8Fn,
    pub(crate) hb_buffer_set_cluster_level: HbBufferSetClusterLevelFn,
    pub(crate) hb_buffer_set_direction: HbBufferSetDirectionFn,
    pub(crate) hb_buffer_get_direction: HbBufferGetDirectionFn,
    pub(crate) hb_buffer_set_script: HbBufferSetScriptFn,
    pub(crate) hb_buffer_set_language: HbBufferSetLanguageFn,
    pub(crate) hb_buffer_guess_segment_properties: HbBufferGuessSegmentPropertiesFn,
    pub(crate) hb_buffer_get_length: HbBufferGetLengthFn,
    pub(crate) hb_buffer_get_glyph_infos: HbBufferGetGlyphInfosFn,
    pub(crate) hb_buffer_get_glyph_positions: HbBufferGetGlyphPositionsFn,
    pub(crate) hb_shape: HbShapeFn,
    pub(crate) hb_language_from_string: HbLanguageFromStringFn,
    pub(crate) hb_feature_from_string: HbFeatureFromStringFn,
    pub(crate) hb_variation_from_string: HbVariationFromStringFn,
    pub(crate) hb_unicode_funcs_get_default: HbUnicodeFuncsGetDefaultFn,
    pub(crate) hb_unicode_script: HbUnicodeScriptFn,
}

macro_rules! resolve {
    ($lib:expr, $name:ident: $ty:ty) => {{
        let sym: Symbol<$ty> = unsafe { $lib.get(stringify!($name).as_bytes()) }
            .map_err(|e| ShapeError::SymbolNotFound(format!("{}: {}", stringify!($name), e)))?;
        *sym
    }};
}

impl HbLibrary {
    /// Loads the library from `HARFBUZZ_PATH` if set, falling back to
    /// the system library path.
    pub fn load_default() -> Result<HbLibrary> {
        let path = std::env::var_os("HARFBUZZ_PATH").map(PathBuf::from);
        HbLibrary::load(path.as_deref())
    }

    /// Loads the library from the given file or directory, or from the
    /// system library path when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<HbLibrary> {
        let lib_name = HbLibrary::library_name();

        let lib = if let Some(path) = path {
            let lib_path = if path.is_file() {
                path.to_path_buf()
            } else {
                path.join(lib_name)
            };
            log::info!("loading harfbuzz from: {}", lib_path.display());
            unsafe { Library::new(&lib_path) }
        } else {
            log::info!("loading harfbuzz from system path: {}", lib_name);
            unsafe { Library::new(lib_name) }
        }
        .map_err(|e| ShapeError::LibraryLoad(e.to_string()))?;

        Ok(HbLibrary {
            hb_blob_create: resolve!(lib, hb_blob_create: HbBlobCreateFn),
            hb_blob_destroy: resolve!(lib, hb_blob_destroy: HbBlobDestroyFn),
            hb_face_create: resolve!(lib, hb_face_create: HbFaceCreateFn),
            hb_face_destroy: resolve!(lib, hb_face_destroy: HbFaceDestroyFn),
            hb_face_get_glyph_count: resolve!(lib, hb_face_get_glyph_count: HbFaceGetGlyphCountFn),
            hb_font_create: resolve!(lib, hb_font_create: HbFontCreateFn),
            hb_font_destroy: resolve!(lib, hb_font_destroy: HbFontDestroyFn),
            hb_font_set_ppem: resolve!(lib, hb_font_set_ppem: HbFontSetPpemFn),
            hb_font_set_variations: resolve!(lib, hb_font_set_variations: HbFontSetVariationsFn),
            hb_buffer_create: resolve!(lib, hb_buffer_create: HbBufferCreateFn),
            hb_buffer_destroy: resolve!(lib, hb_buffer_destroy: HbBufferDestroyFn),
            hb_buffer_add_utf8: resolve!(lib, hb_buffer_add_utf8: HbBufferAddUtf8Fn),
            hb_buffer_set_cluster_level: resolve!(lib, hb_buffer_set_cluster_level: HbBufferSetClusterLevelFn),
            hb_buffer_set_direction: resolve!(lib, hb_buffer_set_direction: HbBufferSetDirectionFn),
            hb_buffer_get_direction: resolve!(lib, hb_buffer_get_direction: HbBufferGetDirectionFn),
            hb_buffer_set_script: resolve!(lib, hb_buffer_set_script: HbBufferSetScriptFn),
            hb_buffer_set_language: resolve!(lib, hb_buffer_set_language: HbBufferSetLanguageFn),
            hb_buffer_guess_segment_properties: resolve!(lib, hb_buffer_guess_segment_properties: HbBufferGuessSegmentPropertiesFn),
            hb_buffer_get_length: resolve!(lib, hb_buffer_get_length: HbBufferGetLengthFn),
            hb_buffer_get_glyph_infos: resolve!(lib, hb_buffer_get_glyph_infos: HbBufferGetGlyphInfosFn),
            hb_buffer_get_glyph_positions: resolve!(lib, hb_buffer_get_glyph_positions: HbBufferGetGlyphPositionsFn),
            hb_shape: resolve!(lib, hb_shape: HbShapeFn),
            hb_language_from_string: resolve!(lib, hb_language_from_string: HbLanguageFromStringFn),
            hb_feature_from_string: resolve!(lib, hb_feature_from_string: HbFeatureFromStringFn),
            hb_variation_from_string: resolve!(lib, hb_variation_from_string: HbVariationFromStringFn),
            hb_unicode_funcs_get_default: resolve!(lib, hb_unicode_funcs_get_default: HbUnicodeFuncsGetDefaultFn),
            hb_unicode_script: resolve!(lib, hb_unicode_script: HbUnicodeScriptFn),
            lib,
        })
    }

    #[cfg(target_os = "windows")]
    fn library_name() -> &'static str {
        "harfbuzz.dll"
    }

    #[cfg(target_os = "macos")]
    fn library_name() -> &'static str {
        "libharfbuzz.0.dylib"
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn library_name() -> &'static str {
        "libharfbuzz.so.0"
    }
}
