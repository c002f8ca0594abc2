//! Shaping front end over the dynamically loaded library.

use std::collections::HashMap;
use std::ffi::{c_char, c_int, c_uint, CString};
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use crate::buffer::ShapeBuffer;
use crate::error::{Result, ShapeError};
use crate::glyph::{Direction, Glyph, Script};
use crate::hb_sys::{
    hb_blob_t, hb_face_t, hb_feature_t, hb_font_t, hb_variation_t,
    HB_BUFFER_CLUSTER_LEVEL_MONOTONE_CHARACTERS, HB_MEMORY_MODE_READONLY,
};
use crate::library::HbLibrary;

/// Options for a single shaping call.
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions {
    /// Requested direction; `Invalid` lets the library guess.
    pub direction: Direction,
    /// Requested script; `INVALID` lets the library guess.
    pub script: Script,
    /// BCP 47 language tag, e.g. `en`.
    pub language: Option<String>,
    /// Comma-separated OpenType feature list, e.g. `kern,liga` or
    /// `smcp=1`.
    pub features: Option<String>,
    /// Comma-separated variation list, e.g. `wght=700`.
    pub variations: Option<String>,
    /// Pixels per em set on the font; 0 keeps unscaled font units.
    pub ppem: u16,
}

/// A text shaper bound to one font face.
///
/// Holds the native blob and face, plus one `hb_font_t` per requested
/// ppem so repeated calls at the same size reuse the font object.
pub struct Shaper {
    lib: Arc<HbLibrary>,
    /// Pins the blob's backing bytes for the shaper's lifetime.
    #[allow(dead_code)]
    data: Arc<[u8]>,
    blob: *mut hb_blob_t,
    face: *mut hb_face_t,
    fonts: HashMap<u16, *mut hb_font_t>,
}

// The native objects are not thread-affine; the shaper owns them
// exclusively, so moving it to another thread is fine. Shared use from
// several threads is not (no Sync).
unsafe impl Send for Shaper {}

impl Shaper {
    /// Creates a shaper for the `index`-th face in `data`.
    pub fn new(lib: Arc<HbLibrary>, data: Arc<[u8]>, index: u32) -> Result<Shaper> {
        let blob = unsafe {
            (lib.hb_blob_create)(
                data.as_ptr() as *const c_char,
                data.len() as c_uint,
                HB_MEMORY_MODE_READONLY,
                ptr::null_mut(),
                None,
            )
        };
        if blob.is_null() {
            return Err(ShapeError::AllocFailed("hb_blob_create"));
        }

        let face = unsafe { (lib.hb_face_create)(blob, index as c_uint) };
        if face.is_null() {
            unsafe { (lib.hb_blob_destroy)(blob) };
            return Err(ShapeError::AllocFailed("hb_face_create"));
        }
        if unsafe { (lib.hb_face_get_glyph_count)(face) } == 0 {
            unsafe {
                (lib.hb_face_destroy)(face);
                (lib.hb_blob_destroy)(blob);
            }
            return Err(ShapeError::InvalidFont(format!(
                "face {} has no glyphs",
                index
            )));
        }

        Ok(Shaper {
            lib,
            data,
            blob,
            face,
            fonts: HashMap::new(),
        })
    }

    /// Creates a shaper from a font file on disk.
    pub fn from_path(lib: Arc<HbLibrary>, path: impl AsRef<Path>, index: u32) -> Result<Shaper> {
        let data = std::fs::read(path)?;
        Shaper::new(lib, Arc::from(data), index)
    }

    /// Shapes `text`, returning positioned glyphs in buffer order.
    ///
    /// Callers are expected to have applied bidi reordering upstream, so
    /// a right-to-left buffer is shaped as left-to-right; cluster
    /// values still let each glyph point back into the original text.
    pub fn shape(&mut self, text: &str, options: &ShapeOptions) -> Result<Vec<Glyph>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let font = self.font_for_ppem(options.ppem);

        if let Some(variations) = options.variations.as_deref() {
            let variations = self.parse_variations(variations);
            if !variations.is_empty() {
                unsafe {
                    (self.lib.hb_font_set_variations)(
                        font,
                        variations.as_ptr(),
                        variations.len() as c_uint,
                    )
                };
            }
        }

        let buffer = ShapeBuffer::new(&self.lib)?;
        let raw = buffer.as_ptr();
        unsafe {
            (self.lib.hb_buffer_add_utf8)(
                raw,
                text.as_ptr() as *const c_char,
                text.len() as c_int,
                0,
                text.len() as c_int,
            );
            (self.lib.hb_buffer_set_cluster_level)(raw, HB_BUFFER_CLUSTER_LEVEL_MONOTONE_CHARACTERS);
            (self.lib.hb_buffer_set_direction)(raw, options.direction.to_raw());
            (self.lib.hb_buffer_set_script)(raw, options.script.to_raw());
        }
        if let Some(language) = options.language.as_deref() {
            if let Ok(clanguage) = CString::new(language) {
                unsafe {
                    let language = (self.lib.hb_language_from_string)(clanguage.as_ptr(), -1);
                    (self.lib.hb_buffer_set_language)(raw, language);
                }
            }
        }
        unsafe { (self.lib.hb_buffer_guess_segment_properties)(raw) };

        // Bidi reordering already happened upstream.
        if Direction::from_raw(unsafe { (self.lib.hb_buffer_get_direction)(raw) })
            == Direction::RightToLeft
        {
            unsafe { (self.lib.hb_buffer_set_direction)(raw, Direction::LeftToRight.to_raw()) };
        }
        let reverse =
            Direction::from_raw(unsafe { (self.lib.hb_buffer_get_direction)(raw) }).is_backward();

        let features = options
            .features
            .as_deref()
            .map(|features| self.parse_features(features))
            .unwrap_or_default();
        unsafe {
            if features.is_empty() {
                (self.lib.hb_shape)(font, raw, ptr::null(), 0);
            } else {
                (self.lib.hb_shape)(font, raw, features.as_ptr(), features.len() as c_uint);
            }
        }

        let view = buffer.glyphs();
        let mut glyphs = Vec::with_capacity(view.len());
        for (info, position) in view.iter() {
            glyphs.push(Glyph {
                id: info.codepoint as u16,
                cluster: info.cluster,
                x_advance: position.x_advance,
                y_advance: position.y_advance,
                x_offset: position.x_offset,
                y_offset: position.y_offset,
                text: 0..0,
            });
        }
        attribute_clusters(&mut glyphs, text.len(), reverse);
        Ok(glyphs)
    }

    fn font_for_ppem(&mut self, ppem: u16) -> *mut hb_font_t {
        if let Some(&font) = self.fonts.get(&ppem) {
            return font;
        }
        let font = unsafe { (self.lib.hb_font_create)(self.face) };
        unsafe { (self.lib.hb_font_set_ppem)(font, ppem as c_uint, ppem as c_uint) };
        self.fonts.insert(ppem, font);
        font
    }

    fn parse_features(&self, list: &str) -> Vec<hb_feature_t> {
        let mut features = Vec::new();
        for entry in split_list(list) {
            let centry = match CString::new(entry) {
                Ok(centry) => centry,
                Err(_) => continue,
            };
            let mut feature = hb_feature_t {
                tag: 0,
                value: 0,
                start: 0,
                end: 0,
            };
            let ok = unsafe { (self.lib.hb_feature_from_string)(centry.as_ptr(), -1, &mut feature) };
            if ok == 0 {
                log::warn!("ignoring unparseable feature: {:?}", entry);
                continue;
            }
            features.push(feature);
        }
        features
    }

    fn parse_variations(&self, list: &str) -> Vec<hb_variation_t> {
        let mut variations = Vec::new();
        for entry in split_list(list) {
            let centry = match CString::new(entry) {
                Ok(centry) => centry,
                Err(_) => continue,
            };
            let mut variation = hb_variation_t { tag: 0, value: 0.0 };
            let ok =
                unsafe { (self.lib.hb_variation_from_string)(centry.as_ptr(), -1, &mut variation) };
            if ok == 0 {
                log::warn!("ignoring unparseable variation: {:?}", entry);
                continue;
            }
            variations.push(variation);
        }
        variations
    }
}

impl Drop for Shaper {
    fn drop(&mut self) {
        unsafe {
            for (_, font) in self.fonts.drain() {
                (self.lib.hb_font_destroy)(font);
            }
            (self.lib.hb_face_destroy)(self.face);
            (self.lib.hb_blob_destroy)(self.blob);
        }
    }
}

/// Splits a comma-separated option list, dropping empty entries.
fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Attributes to each glyph the byte range its cluster covers.
///
/// Clusters ascend through the glyph slice for forward runs and descend
/// for backward ones; the last cluster in text order always extends to
/// the end of the text.
fn attribute_clusters(glyphs: &mut [Glyph], text_len: usize, reverse: bool) {
    if glyphs.is_empty() {
        return;
    }
    if reverse {
        let mut end = text_len;
        for glyph in glyphs.iter_mut() {
            let start = glyph.cluster as usize;
            glyph.text = start..end;
            end = start;
        }
    } else {
        for i in 1..glyphs.len() {
            let range = glyphs[i - 1].cluster as usize..glyphs[i].cluster as usize;
            glyphs[i - 1].text = range;
        }
        if let Some(last) = glyphs.last_mut() {
            last.text = last.cluster as usize..text_len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(cluster: u32) -> Glyph {
        Glyph {
            id: 0,
            cluster,
            x_advance: 0,
            y_advance: 0,
            x_offset: 0,
            y_offset: 0,
            text: 0..0,
        }
    }

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        let entries: Vec<_> = split_list("kern, liga ,,smcp=1 ").collect();
        assert_eq!(entries, vec!["kern", "liga", "smcp=1"]);
        assert_eq!(split_list("").count(), 0);
        assert_eq!(split_list(" , ,").count(), 0);
    }

    #[test]
    fn forward_clusters_cover_adjacent_ranges() {
        // "ab" + a two-byte character forming one cluster each.
        let mut glyphs = vec![glyph(0), glyph(1), glyph(2)];
        attribute_clusters(&mut glyphs, 4, false);
        assert_eq!(glyphs[0].text, 0..1);
        assert_eq!(glyphs[1].text, 1..2);
        assert_eq!(glyphs[2].text, 2..4);
    }

    #[test]
    fn ligature_shares_one_cluster_range() {
        // Three bytes collapsing into one glyph, then one more.
        let mut glyphs = vec![glyph(0), glyph(3)];
        attribute_clusters(&mut glyphs, 4, false);
        assert_eq!(glyphs[0].text, 0..3);
        assert_eq!(glyphs[1].text, 3..4);
    }

    #[test]
    fn reversed_clusters_walk_backward_through_the_text() {
        // Backward run: clusters descend in glyph order.
        let mut glyphs = vec![glyph(4), glyph(2), glyph(0)];
        attribute_clusters(&mut glyphs, 6, true);
        assert_eq!(glyphs[0].text, 4..6);
        assert_eq!(glyphs[1].text, 2..4);
        assert_eq!(glyphs[2].text, 0..2);
    }

    #[test]
    fn single_glyph_covers_the_whole_text() {
        let mut glyphs = vec![glyph(0)];
        attribute_clusters(&mut glyphs, 5, false);
        assert_eq!(glyphs[0].text, 0..5);

        let mut glyphs = vec![glyph(0)];
        attribute_clusters(&mut glyphs, 5, true);
        assert_eq!(glyphs[0].text, 0..5);
    }

    #[test]
    fn empty_slice_is_untouched() {
        attribute_clusters(&mut [], 10, false);
        attribute_clusters(&mut [], 10, true);
    }
}
