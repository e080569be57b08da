//! Whole-texture decoding into [`imgref`] images.
//!
//! ```rust
//! use n64tex::{Rdram, SourceTexture, TexelSize, TextureFormat, imgref};
//!
//! let console = [0u8; 64];
//! let texture = SourceTexture::new(TextureFormat::Ia, TexelSize::Bits8, 0, 4, 4, 8);
//! let img = imgref::decode_rgba(&Rdram::new(&console), &texture).unwrap();
//! assert_eq!((img.width(), img.height()), (4, 4));
//! ```

use alloc::vec;

use imgref::{ImgRefMut, ImgVec};
use rgb::Rgba;

use crate::{ConvertError, Rdram, SourceTexture, typed_rgb};

/// Decode `texture` into a new 8888 image.
///
/// The image stride is [`SourceTexture::padded_width`], so swizzled rows
/// have room for their padding.
pub fn decode_rgba(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
) -> Result<ImgVec<Rgba<u8>>, ConvertError> {
    let stride = texture.padded_width();
    let mut buf = vec![Rgba::default(); stride * texture.height];
    typed_rgb::decode_rgba(mem, texture, &mut buf, stride)?;
    Ok(ImgVec::new_stride(buf, texture.width, texture.height, stride))
}

/// Decode `texture` into a caller-provided image of the same dimensions.
pub fn decode_rgba_into(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dst: ImgRefMut<'_, Rgba<u8>>,
) -> Result<(), ConvertError> {
    if dst.width() != texture.width || dst.height() != texture.height {
        return Err(ConvertError::InvalidDimensions);
    }
    let stride = dst.stride();
    typed_rgb::decode_rgba(mem, texture, dst.into_buf(), stride)
}
