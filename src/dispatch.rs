// ---------------------------------------------------------------------------
// Row iteration for whole textures.
//
// Source and destination advance by their own pitches. On swapped textures
// even rows take the unswapped decoder and odd rows the swapped one.
// ---------------------------------------------------------------------------

use crate::{ConvertError, DestFormat, Rdram, SourceTexture};

// ===========================================================================
// Validation helpers
// ===========================================================================

/// Check that every row of `texture` can be read from `mem` and written to
/// a `format` surface of `len` bytes with the given pitch.
///
/// Returns the number of bytes each destination row writes.
#[inline]
pub(crate) fn check_surface(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    format: DestFormat,
    len: usize,
    pitch: usize,
) -> Result<usize, ConvertError> {
    let (width, height) = (texture.width, texture.height);
    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidDimensions);
    }

    let src_span = (height - 1)
        .checked_mul(texture.pitch)
        .and_then(|span| span.checked_add(texture.source_row_bytes()))
        .ok_or(ConvertError::SourceOutOfBounds)?;
    mem.check_span(texture.address, src_span, ConvertError::SourceOutOfBounds)?;

    let row_bytes = texture.dest_row_bytes(format);
    if row_bytes > pitch {
        return Err(ConvertError::DestinationTooSmall);
    }
    let total = (height - 1)
        .checked_mul(pitch)
        .and_then(|span| span.checked_add(row_bytes))
        .ok_or(ConvertError::DestinationTooSmall)?;
    if len < total {
        return Err(ConvertError::DestinationTooSmall);
    }
    Ok(row_bytes)
}

// ===========================================================================
// Row driver
// ===========================================================================

/// Run one decoder per row of `texture`, handing each the console offset of
/// the row and its `row_bytes`-long slice of `pixels`.
///
/// Callers validate with [`check_surface`] first.
pub(crate) fn for_each_row<U, S>(
    texture: &SourceTexture,
    pixels: &mut [u8],
    pitch: usize,
    row_bytes: usize,
    mut unswapped: U,
    mut swapped: S,
) where
    U: FnMut(usize, &mut [u8]),
    S: FnMut(usize, &mut [u8]),
{
    for y in 0..texture.height {
        let offset = texture.address + y * texture.pitch;
        let row = &mut pixels[y * pitch..][..row_bytes];
        if texture.swapped && y & 1 == 1 {
            swapped(offset, row);
        } else {
            unswapped(offset, row);
        }
    }
}
