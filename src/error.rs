use crate::{DestFormat, TexelSize, TextureFormat};

/// Why a texture could not be converted.
///
/// Everything is checked before the first row is written, but once an error
/// is returned the destination contents are unspecified and must not be
/// presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// No decoder exists for this format and texel size.
    #[error("no decoder for {format:?} {size:?} textures")]
    UnsupportedFormat {
        format: TextureFormat,
        size: TexelSize,
    },
    /// The source decodes, but not into the requested surface.
    #[error("{format:?} {size:?} textures cannot be converted to {dest:?}")]
    UnsupportedDestination {
        format: TextureFormat,
        size: TexelSize,
        dest: DestFormat,
    },
    /// Width or height is zero.
    #[error("texture has zero width or height")]
    InvalidDimensions,
    /// A buffer that must hold whole 32-bit words does not.
    #[error("buffer length is not a multiple of 4 bytes")]
    NotWordAligned,
    /// The texel footprint runs past the end of console memory.
    #[error("texture extends past the end of console memory")]
    SourceOutOfBounds,
    /// The lookup table runs past the end of console memory.
    #[error("palette extends past the end of console memory")]
    PaletteOutOfBounds,
    /// The lookup table does not start on a halfword.
    #[error("palette address is not halfword aligned")]
    MisalignedPalette,
    /// The destination pitch is narrower than a padded row, or the buffer
    /// ends before the last row.
    #[error("destination surface is too small for the texture")]
    DestinationTooSmall,
    /// An indexed destination has no palette buffer, or one shorter than
    /// 256 entries.
    #[error("palette buffer holds fewer than 256 entries")]
    PaletteTooSmall,
}

impl ConvertError {
    /// True for format mismatches a caller can recover from by skipping the
    /// texture or substituting a placeholder.
    pub const fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::UnsupportedDestination { .. }
        )
    }
}
