//! Decode into [`rgb`] pixel slices.
//!
//! Same conversions as the crate root, with 8888 output typed as
//! `Rgba<u8>` through bytemuck.
//!
//! ```rust
//! use rgb::Rgba;
//! use n64tex::{Rdram, SourceTexture, TexelSize, TextureFormat, typed_rgb};
//!
//! // Two I4 texels, 0xF and 0x0, in the high byte of a word-swapped word.
//! let console = [0x00, 0x00, 0x00, 0xF0, 0, 0, 0, 0];
//! let texture = SourceTexture::new(TextureFormat::I, TexelSize::Bits4, 0, 2, 1, 8);
//! let mut pixels = vec![Rgba::default(); 2];
//! typed_rgb::decode_rgba(&Rdram::new(&console), &texture, &mut pixels, 2).unwrap();
//! assert_eq!(pixels, [Rgba::new(255, 255, 255, 255), Rgba::new(0, 0, 0, 0)]);
//! ```

use rgb::Rgba;

use crate::palette::{self, CI8_ENTRIES};
use crate::{ConvertError, DestFormat, DestSurface, Rdram, SourceTexture, TexelSize};

/// Decode `texture` into `pixels`, `stride` pixels apart row to row.
///
/// `stride` must be at least [`SourceTexture::padded_width`].
pub fn decode_rgba(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    pixels: &mut [Rgba<u8>],
    stride: usize,
) -> Result<(), ConvertError> {
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(pixels);
    let mut dest = DestSurface::new(bytes, stride * 4, DestFormat::Rgba8888);
    crate::convert_texture(mem, texture, &mut dest)
}

/// Copy the raw indices of a CI texture into `indices` (packed two per byte
/// for CI4) and its converted palette into `palette`.
pub fn decode_indexed(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    indices: &mut [u8],
    stride: usize,
    palette: &mut [Rgba<u8>; CI8_ENTRIES],
) -> Result<(), ConvertError> {
    let format = match texture.size {
        TexelSize::Bits4 => DestFormat::Ci4,
        _ => DestFormat::Ci8,
    };
    let palette: &mut [u8] = bytemuck::cast_slice_mut(palette.as_mut_slice());
    let mut dest = DestSurface::new(indices, stride, format).with_palette(palette);
    crate::convert_texture(mem, texture, &mut dest)
}

/// Convert `out.len()` palette entries from the table at `tlut_address`.
pub fn palette_rgba(
    mem: &Rdram<'_>,
    tlut_address: usize,
    format: crate::TlutFormat,
    out: &mut [Rgba<u8>],
) -> Result<(), ConvertError> {
    palette::check_tlut(mem, tlut_address, out.len())?;
    let entries = out.len();
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(out);
    palette::convert_palette(mem, tlut_address, format, entries, bytes);
    Ok(())
}
