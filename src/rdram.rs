// ---------------------------------------------------------------------------
// Console memory view and address fiddling.
//
// RDRAM is held as 32-bit words in host (little-endian) byte order. An
// access of B bytes at console address `o` therefore lives at physical
// offset `o ^ fiddle(B)`.
// ---------------------------------------------------------------------------

use crate::ConvertError;

/// XOR applied to a console byte offset for a `bytes`-wide access.
#[inline(always)]
pub const fn fiddle(bytes: usize) -> usize {
    match bytes {
        1 => 3,
        2 => 2,
        _ => 0,
    }
}

/// Extra byte XOR for odd rows of word-swapped textures.
pub const SWAPPED_ROW_XOR: usize = 4;

/// Destination column XOR for swapped rows of `bytes`-wide source texels.
#[inline(always)]
pub(crate) const fn swizzle(bytes: usize) -> usize {
    match bytes {
        1 => 4,
        _ => 2,
    }
}

/// Read-only view of the emulated console memory.
///
/// Cheap to copy; conversions on different threads can share one view.
#[derive(Clone, Copy, Debug)]
pub struct Rdram<'a> {
    bytes: &'a [u8],
}

impl<'a> Rdram<'a> {
    /// Wrap a word-swapped memory image (see [`load_big_endian`]).
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline(always)]
    pub fn read_u8(&self, offset: usize) -> u8 {
        self.bytes[offset ^ fiddle(1)]
    }

    #[inline(always)]
    pub fn read_u16(&self, offset: usize) -> u16 {
        let o = offset ^ fiddle(2);
        u16::from_le_bytes([self.bytes[o], self.bytes[o + 1]])
    }

    #[inline(always)]
    pub fn read_u32(&self, offset: usize) -> u32 {
        let o = offset ^ fiddle(4);
        u32::from_le_bytes([
            self.bytes[o],
            self.bytes[o + 1],
            self.bytes[o + 2],
            self.bytes[o + 3],
        ])
    }

    /// Halfword stored at physical slot `index` of a table at `base`, with
    /// no fiddle applied.
    #[inline(always)]
    pub(crate) fn halfword_slot(&self, base: usize, index: usize) -> u16 {
        let o = base + index * 2;
        u16::from_le_bytes([self.bytes[o], self.bytes[o + 1]])
    }

    /// Physical bytes `offset..offset + len`, still in word-swapped order.
    #[inline(always)]
    pub(crate) fn physical(&self, offset: usize, len: usize) -> &'a [u8] {
        &self.bytes[offset..offset + len]
    }

    /// Fail unless `offset..offset + len`, widened to whole doublewords so
    /// every fiddled and row-swapped access stays inside, is in bounds.
    pub(crate) fn check_span(
        &self,
        offset: usize,
        len: usize,
        err: ConvertError,
    ) -> Result<(), ConvertError> {
        let end = offset
            .checked_add(len)
            .and_then(|end| end.checked_next_multiple_of(8))
            .ok_or(err)?;
        if end > self.bytes.len() { Err(err) } else { Ok(()) }
    }
}

/// Copy a big-endian console image into the word-swapped layout [`Rdram`]
/// reads.
///
/// `image.len()` must be a multiple of 4 and `out` at least as long.
pub fn load_big_endian(image: &[u8], out: &mut [u8]) -> Result<(), ConvertError> {
    if !image.len().is_multiple_of(4) {
        return Err(ConvertError::NotWordAligned);
    }
    if out.len() < image.len() {
        return Err(ConvertError::DestinationTooSmall);
    }
    crate::kernels::reverse_word_bytes(image, &mut out[..image.len()]);
    Ok(())
}
