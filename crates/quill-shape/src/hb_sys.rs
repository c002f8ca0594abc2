//! Minimal HarfBuzz C API definitions needed for the dynamic binding.
//!
//! These are trimmed down versions of the declarations from `hb.h` so we
//! can keep the dynamic loading surface small while still matching the
//! layout expected by the native library.
#![allow(non_camel_case_types, non_upper_case_globals, dead_code)]

use std::ffi::{c_char, c_int, c_uint, c_void};

pub type hb_codepoint_t = u32;
pub type hb_position_t = i32;
pub type hb_mask_t = u32;
pub type hb_tag_t = u32;
pub type hb_bool_t = c_int;
pub type hb_direction_t = c_uint;
pub type hb_script_t = u32;
pub type hb_memory_mode_t = c_uint;
pub type hb_buffer_cluster_level_t = c_uint;
pub type hb_destroy_func_t = Option<unsafe extern "C" fn(*mut c_void)>;

/// Packs four tag bytes big-endian, like the `HB_TAG` macro.
pub const fn hb_tag(bytes: &[u8; 4]) -> hb_tag_t {
    ((bytes[0] as u32) << 24)
        | ((bytes[1] as u32) << 16)
        | ((bytes[2] as u32) << 8)
        | (bytes[3] as u32)
}

pub const HB_TAG_NONE: hb_tag_t = 0;

pub const HB_MEMORY_MODE_DUPLICATE: hb_memory_mode_t = 0;
pub const HB_MEMORY_MODE_READONLY: hb_memory_mode_t = 1;
pub const HB_MEMORY_MODE_WRITABLE: hb_memory_mode_t = 2;

pub const HB_DIRECTION_INVALID: hb_direction_t = 0;
pub const HB_DIRECTION_LTR: hb_direction_t = 4;
pub const HB_DIRECTION_RTL: hb_direction_t = 5;
pub const HB_DIRECTION_TTB: hb_direction_t = 6;
pub const HB_DIRECTION_BTT: hb_direction_t = 7;

pub const HB_BUFFER_CLUSTER_LEVEL_MONOTONE_GRAPHEMES: hb_buffer_cluster_level_t = 0;
pub const HB_BUFFER_CLUSTER_LEVEL_MONOTONE_CHARACTERS: hb_buffer_cluster_level_t = 1;
pub const HB_BUFFER_CLUSTER_LEVEL_CHARACTERS: hb_buffer_cluster_level_t = 2;

/// One shaped glyph's identity and cluster mapping.
///
/// The trailing `var1`/`var2` fields are private scratch space of the
/// native library; they only exist here so the record size matches.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct hb_glyph_info_t {
    pub codepoint: hb_codepoint_t,
    pub mask: hb_mask_t,
    pub cluster: u32,
    pub var1: u32,
    pub var2: u32,
}

/// One shaped glyph's advance and offset, in font units.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct hb_glyph_position_t {
    pub x_advance: hb_position_t,
    pub y_advance: hb_position_t,
    pub x_offset: hb_position_t,
    pub y_offset: hb_position_t,
    pub var: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct hb_feature_t {
    pub tag: hb_tag_t,
    pub value: u32,
    pub start: c_uint,
    pub end: c_uint,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct hb_variation_t {
    pub tag: hb_tag_t,
    pub value: f32,
}

/// Opaque handle types; only ever touched through pointers.
#[repr(C)]
pub struct hb_blob_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct hb_face_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct hb_font_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct hb_buffer_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct hb_unicode_funcs_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct hb_language_impl_t {
    _unused: [u8; 0],
}

pub type hb_language_t = *mut hb_language_impl_t;

// Entry points resolved at load time, one typedef per symbol.

pub type HbBlobCreateFn = unsafe extern "C" fn(
    *const c_char,
    c_uint,
    hb_memory_mode_t,
    *mut c_void,
    hb_destroy_func_t,
) -> *mut hb_blob_t;
pub type HbBlobDestroyFn = unsafe extern "C" fn(*mut hb_blob_t);

pub type HbFaceCreateFn = unsafe extern "C" fn(*mut hb_blob_t, c_uint) -> *mut hb_face_t;
pub type HbFaceDestroyFn = unsafe extern "C" fn(*mut hb_face_t);
pub type HbFaceGetGlyphCountFn = unsafe extern "C" fn(*const hb_face_t) -> c_uint;

pub type HbFontCreateFn = unsafe extern "C" fn(*mut hb_face_t) -> *mut hb_font_t;
pub type HbFontDestroyFn = unsafe extern "C" fn(*mut hb_font_t);
pub type HbFontSetPpemFn = unsafe extern "C" fn(*mut hb_font_t, c_uint, c_uint);
pub type HbFontSetVariationsFn =
    unsafe extern "C" fn(*mut hb_font_t, *const hb_variation_t, c_uint);

pub type HbBufferCreateFn = unsafe extern "C" fn() -> *mut hb_buffer_t;
pub type HbBufferDestroyFn = unsafe extern "C" fn(*mut hb_buffer_t);
pub type HbBufferAddUtf8Fn =
    unsafe extern "C" fn(*mut hb_buffer_t, *const c_char, c_int, c_uint, c_int);
pub type HbBufferSetClusterLevelFn =
    unsafe extern "C" fn(*mut hb_buffer_t, hb_buffer_cluster_level_t);
pub type HbBufferSetDirectionFn = unsafe extern "C" fn(*mut hb_buffer_t, hb_direction_t);
pub type HbBufferGetDirectionFn = unsafe extern "C" fn(*const hb_buffer_t) -> hb_direction_t;
pub type HbBufferSetScriptFn = unsafe extern "C" fn(*mut hb_buffer_t, hb_script_t);
pub type HbBufferSetLanguageFn = unsafe extern "C" fn(*mut hb_buffer_t, hb_language_t);
pub type HbBufferGuessSegmentPropertiesFn = unsafe extern "C" fn(*mut hb_buffer_t);
pub type HbBufferGetLengthFn = unsafe extern "C" fn(*const hb_buffer_t) -> c_uint;
pub type HbBufferGetGlyphInfosFn =
    unsafe extern "C" fn(*mut hb_buffer_t, *mut c_uint) -> *mut hb_glyph_info_t;
pub type HbBufferGetGlyphPositionsFn =
    unsafe extern "C" fn(*mut hb_buffer_t, *mut c_uint) -> *mut hb_glyph_position_t;

pub type HbShapeFn =
    unsafe extern "C" fn(*mut hb_font_t, *mut hb_buffer_t, *const hb_feature_t, c_uint);

pub type HbLanguageFromStringFn = unsafe extern "C" fn(*const c_char, c_int) -> hb_language_t;
pub type HbFeatureFromStringFn =
    unsafe extern "C" fn(*const c_char, c_int, *mut hb_feature_t) -> hb_bool_t;
pub type HbVariationFromStringFn =
    unsafe extern "C" fn(*const c_char, c_int, *mut hb_variation_t) -> hb_bool_t;

pub type HbUnicodeFuncsGetDefaultFn = unsafe extern "C" fn() -> *mut hb_unicode_funcs_t;
pub type HbUnicodeScriptFn =
    unsafe extern "C" fn(*mut hb_unicode_funcs_t, hb_codepoint_t) -> hb_script_t;

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn record_layouts_match_native_abi() {
        assert_eq!(size_of::<hb_glyph_info_t>(), 20);
        assert_eq!(align_of::<hb_glyph_info_t>(), 4);
        assert_eq!(size_of::<hb_glyph_position_t>(), 20);
        assert_eq!(align_of::<hb_glyph_position_t>(), 4);
        assert_eq!(size_of::<hb_feature_t>(), 16);
        assert_eq!(size_of::<hb_variation_t>(), 8);
    }

    #[test]
    fn tag_packs_big_endian() {
        assert_eq!(hb_tag(b"Latn"), 0x4C61_746E);
        assert_eq!(hb_tag(b"\0\0\0\0"), 0);
    }
}
