// ---------------------------------------------------------------------------
// Row decoders: one console scanline into one host scanline.
//
// `offset` is the console byte offset of the row's first texel. Byte-sized
// reads already carry the fiddle; ROW_XOR adds the word swap of odd rows for
// formats that correct it on the source side, SWIZZLE moves destination
// columns instead for formats that correct it on the destination side.
// ---------------------------------------------------------------------------

use crate::kernels;
use crate::palette::Palette;
use crate::pixel::{Ci44, I8, NativePixel, Pf8888, SourceTexel, i4_channels, ia4_channels};
use crate::Rdram;

#[inline(always)]
fn put<P: NativePixel>(row: &mut [u8], x: usize, [r, g, b, a]: [u8; 4]) {
    P::from_channels(r, g, b, a).write(row, x);
}

#[inline(always)]
fn assert_aligned(offset: usize, bytes: usize) {
    assert!(
        offset.is_multiple_of(bytes),
        "row offset {offset:#x} is not aligned to its {bytes}-byte texels"
    );
}

// ===========================================================================
// Whole-byte texels: RGBA16, RGBA32, IA8, IA16, I8
// ===========================================================================

/// One texel per destination pixel.
///
/// With a non-zero `SWIZZLE` the width is rounded up to `1 << SWIZZLE`, so
/// the row writes that many columns.
///
/// # Panics
///
/// If `offset` is not a multiple of the texel size.
pub(crate) fn texel_row<T: SourceTexel, P: NativePixel, const SWIZZLE: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
) {
    assert_aligned(offset, T::BYTES);
    let width = width.next_multiple_of(1 << SWIZZLE);
    for x in 0..width {
        let texel = T::read(mem, offset + x * T::BYTES);
        texel.to_native::<P>().write(dst, x ^ SWIZZLE);
    }
}

/// Unswapped RGBA32 into 8888: each texel is its physical word reversed.
pub(crate) fn rgba32_row_8888(mem: &Rdram<'_>, offset: usize, width: usize, dst: &mut [u8]) {
    assert_aligned(offset, 4);
    kernels::reverse_word_bytes(mem.physical(offset, width * 4), &mut dst[..width * 4]);
}

/// Unswapped I8 into 8888, a word of texels at a time when the row starts
/// on a word.
pub(crate) fn i8_row_8888(mem: &Rdram<'_>, offset: usize, width: usize, dst: &mut [u8]) {
    let words = if offset.is_multiple_of(4) { width / 4 } else { 0 };
    kernels::expand_gray_words(mem.physical(offset, words * 4), &mut dst[..words * 16]);
    for x in words * 4..width {
        I8::read(mem, offset + x).to_native::<Pf8888>().write(dst, x);
    }
}

// ===========================================================================
// Nibble texels: IA4, I4
// ===========================================================================

/// Two texels per byte, high nibble first, 3-bit intensity and 1-bit alpha.
pub(crate) fn ia4_row<P: NativePixel, const ROW_XOR: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
) {
    for pair in 0..width / 2 {
        let b = mem.read_u8((offset + pair) ^ ROW_XOR);
        put::<P>(dst, pair * 2, ia4_channels(b >> 4));
        put::<P>(dst, pair * 2 + 1, ia4_channels(b & 0x0F));
    }
    if width & 1 == 1 {
        let b = mem.read_u8((offset + width / 2) ^ ROW_XOR);
        put::<P>(dst, width - 1, ia4_channels(b >> 4));
    }
}

/// Two grayscale texels per byte, high nibble first.
pub(crate) fn i4_row<P: NativePixel, const ROW_XOR: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
) {
    for pair in 0..width / 2 {
        let b = mem.read_u8((offset + pair) ^ ROW_XOR);
        put::<P>(dst, pair * 2, i4_channels(b >> 4));
        put::<P>(dst, pair * 2 + 1, i4_channels(b & 0x0F));
    }
    if width & 1 == 1 {
        let b = mem.read_u8((offset + width / 2) ^ ROW_XOR);
        put::<P>(dst, width - 1, i4_channels(b >> 4));
    }
}

// ===========================================================================
// Colour-indexed texels
// ===========================================================================

/// CI4 indices repacked into [`Ci44`] cells; an odd tail leaves the high
/// nibble of the last cell zero.
pub(crate) fn ci4_row_indexed<const ROW_XOR: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
) {
    for pair in 0..width / 2 {
        dst[pair] = Ci44::from_console(mem.read_u8((offset + pair) ^ ROW_XOR)).0;
    }
    if width & 1 == 1 {
        let b = mem.read_u8((offset + width / 2) ^ ROW_XOR);
        dst[width / 2] = Ci44::new(b >> 4, 0).0;
    }
}

/// CI8 indices copied into logical order.
pub(crate) fn ci8_row_indexed<const ROW_XOR: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
) {
    let words = if ROW_XOR == 0 && offset.is_multiple_of(4) {
        width / 4
    } else {
        0
    };
    kernels::reverse_word_bytes(mem.physical(offset, words * 4), &mut dst[..words * 4]);
    for x in words * 4..width {
        dst[x] = mem.read_u8((offset + x) ^ ROW_XOR);
    }
}

/// CI4 resolved through the converted palette into 8888.
pub(crate) fn ci4_row_rgba<const ROW_XOR: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
    palette: &Palette,
) {
    for pair in 0..width / 2 {
        let b = mem.read_u8((offset + pair) ^ ROW_XOR);
        palette.get(b >> 4).write(dst, pair * 2);
        palette.get(b & 0x0F).write(dst, pair * 2 + 1);
    }
    if width & 1 == 1 {
        let b = mem.read_u8((offset + width / 2) ^ ROW_XOR);
        palette.get(b >> 4).write(dst, width - 1);
    }
}

/// CI8 resolved through the converted palette into 8888.
pub(crate) fn ci8_row_rgba<const ROW_XOR: usize>(
    mem: &Rdram<'_>,
    offset: usize,
    width: usize,
    dst: &mut [u8],
    palette: &Palette,
) {
    for x in 0..width {
        palette.get(mem.read_u8((offset + x) ^ ROW_XOR)).write(dst, x);
    }
}
