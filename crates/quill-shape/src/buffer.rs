//! Buffer ownership and bounded access to the glyph arrays the native
//! library returns after shaping.

use std::slice;

use crate::error::{Result, ShapeError};
use crate::hb_sys::{hb_buffer_t, hb_glyph_info_t, hb_glyph_position_t};
use crate::library::HbLibrary;

/// An owned `hb_buffer_t`, created empty and destroyed on drop.
pub(crate) struct ShapeBuffer<'lib> {
    lib: &'lib HbLibrary,
    raw: *mut hb_buffer_t,
}

impl<'lib> ShapeBuffer<'lib> {
    pub(crate) fn new(lib: &'lib HbLibrary) -> Result<ShapeBuffer<'lib>> {
        let raw = unsafe { (lib.hb_buffer_create)() };
        if raw.is_null() {
            return Err(ShapeError::AllocFailed("hb_buffer_create"));
        }
        Ok(ShapeBuffer { lib, raw })
    }

    pub(crate) fn as_ptr(&self) -> *mut hb_buffer_t {
        self.raw
    }

    /// Bounded view over the glyph arrays of a shaped buffer.
    ///
    /// The view borrows `self`, so the buffer cannot be cleared or
    /// destroyed while the foreign arrays are reachable.
    pub(crate) fn glyphs(&self) -> GlyphView<'_> {
        let len = unsafe { (self.lib.hb_buffer_get_length)(self.raw) } as usize;
        let infos = unsafe { (self.lib.hb_buffer_get_glyph_infos)(self.raw, std::ptr::null_mut()) };
        let positions =
            unsafe { (self.lib.hb_buffer_get_glyph_positions)(self.raw, std::ptr::null_mut()) };
        unsafe { GlyphView::from_raw(infos, positions, len) }
    }
}

impl Drop for ShapeBuffer<'_> {
    fn drop(&mut self) {
        unsafe { (self.lib.hb_buffer_destroy)(self.raw) }
    }
}

/// Bounded view over a pair of foreign glyph-info and glyph-position
/// arrays of equal length.
///
/// Both slices are built exactly once from the array base pointers and
/// the length the owning buffer reports; every access after that point
/// is ordinary bounds-checked indexing, so an out-of-range index yields
/// `None` instead of reading past the arrays.
#[derive(Clone, Copy)]
pub struct GlyphView<'a> {
    infos: &'a [hb_glyph_info_t],
    positions: &'a [hb_glyph_position_t],
}

impl<'a> GlyphView<'a> {
    /// Builds a view from the raw arrays.
    ///
    /// A zero `len` or null base pointer produces an empty view.
    ///
    /// # Safety
    ///
    /// When `len` is nonzero and the pointers are non-null, `infos` and
    /// `positions` must each point to `len` contiguous initialized
    /// records that stay valid, and are not mutated, for the lifetime
    /// `'a`.
    pub unsafe fn from_raw(
        infos: *const hb_glyph_info_t,
        positions: *const hb_glyph_position_t,
        len: usize,
    ) -> GlyphView<'a> {
        if len == 0 || infos.is_null() || positions.is_null() {
            return GlyphView {
                infos: &[],
                positions: &[],
            };
        }
        GlyphView {
            infos: unsafe { slice::from_raw_parts(infos, len) },
            positions: unsafe { slice::from_raw_parts(positions, len) },
        }
    }

    /// Number of glyphs in the shaped buffer.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// The `i`-th glyph-info record, or `None` past the end.
    pub fn info(&self, i: usize) -> Option<&'a hb_glyph_info_t> {
        self.infos.get(i)
    }

    /// The `i`-th glyph-position record, or `None` past the end.
    pub fn position(&self, i: usize) -> Option<&'a hb_glyph_position_t> {
        self.positions.get(i)
    }

    /// Paired iteration in glyph order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a hb_glyph_info_t, &'a hb_glyph_position_t)> {
        self.infos.iter().zip(self.positions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    fn info(cluster: u32) -> hb_glyph_info_t {
        hb_glyph_info_t {
            codepoint: cluster + 100,
            mask: 0,
            cluster,
            var1: 0,
            var2: 0,
        }
    }

    fn position(x_advance: i32) -> hb_glyph_position_t {
        hb_glyph_position_t {
            x_advance,
            y_advance: 0,
            x_offset: 0,
            y_offset: 0,
            var: 0,
        }
    }

    fn sample() -> (Vec<hb_glyph_info_t>, Vec<hb_glyph_position_t>) {
        let infos = (0..3).map(info).collect();
        let positions = (0..3).map(|i| position(i * 10)).collect();
        (infos, positions)
    }

    #[test]
    fn index_zero_is_the_base_address() {
        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), infos.len()) };
        assert!(std::ptr::eq(view.info(0).unwrap(), &infos[0]));
        assert!(std::ptr::eq(view.position(0).unwrap(), &positions[0]));
    }

    #[test]
    fn indexing_matches_contiguous_array_addressing() {
        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), infos.len()) };
        let base = infos.as_ptr() as usize;
        for i in 0..infos.len() {
            let addr = view.info(i).unwrap() as *const hb_glyph_info_t as usize;
            assert_eq!(addr, base + i * size_of::<hb_glyph_info_t>());
        }
    }

    #[test]
    fn last_index_is_the_final_record() {
        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), infos.len()) };
        let last = view.info(infos.len() - 1).unwrap();
        assert!(std::ptr::eq(last, infos.last().unwrap()));
        assert_eq!(last.cluster, 2);
    }

    #[test]
    fn repeated_access_returns_the_same_address() {
        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), infos.len()) };
        let first = view.position(1).unwrap() as *const hb_glyph_position_t;
        let second = view.position(1).unwrap() as *const hb_glyph_position_t;
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_index_is_none() {
        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), infos.len()) };
        assert!(view.info(infos.len()).is_none());
        assert!(view.position(usize::MAX).is_none());
    }

    #[test]
    fn null_or_empty_arrays_produce_an_empty_view() {
        let view = unsafe { GlyphView::from_raw(std::ptr::null(), std::ptr::null(), 0) };
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert!(view.info(0).is_none());

        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), 0) };
        assert!(view.is_empty());
    }

    #[test]
    fn paired_iteration_walks_both_arrays_in_step() {
        let (infos, positions) = sample();
        let view = unsafe { GlyphView::from_raw(infos.as_ptr(), positions.as_ptr(), infos.len()) };
        let pairs: Vec<_> = view.iter().collect();
        assert_eq!(pairs.len(), 3);
        for (i, (info, position)) in pairs.iter().enumerate() {
            assert_eq!(info.cluster as usize, i);
            assert_eq!(position.x_advance as usize, i * 10);
        }
    }
}
