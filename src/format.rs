//! Texture and surface descriptors.

/// Texel encoding family, as held in the RDP tile descriptor's `fmt` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgba,
    Yuv,
    Ci,
    Ia,
    I,
}

impl TextureFormat {
    /// Decode the 3-bit `G_IM_FMT_*` register value.
    ///
    /// Codes 5..=7 are undefined on hardware and map to `None`.
    pub const fn from_raw(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Rgba),
            1 => Some(Self::Yuv),
            2 => Some(Self::Ci),
            3 => Some(Self::Ia),
            4 => Some(Self::I),
            _ => None,
        }
    }
}

/// Bits per source texel (`G_IM_SIZ_*`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TexelSize {
    Bits4,
    Bits8,
    Bits16,
    Bits32,
}

impl TexelSize {
    /// Decode the 2-bit `G_IM_SIZ_*` register value.
    pub const fn from_raw(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Bits4),
            1 => Some(Self::Bits8),
            2 => Some(Self::Bits16),
            3 => Some(Self::Bits32),
            _ => None,
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            Self::Bits4 => 4,
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits32 => 32,
        }
    }

    /// Bytes spanned by `width` texels, rounding a trailing half byte up.
    ///
    /// Saturates at `usize::MAX`.
    pub const fn row_bytes(self, width: usize) -> usize {
        match width.checked_mul(self.bits()) {
            Some(bits) => bits.div_ceil(8),
            None => usize::MAX,
        }
    }
}

/// Colour encoding of the texture lookup table used by CI textures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TlutFormat {
    #[default]
    Rgba16,
    Ia16,
}

impl TlutFormat {
    /// Decode the `G_TT_*` other-mode value (`G_TT_RGBA16 = 2`, `G_TT_IA16 = 3`).
    ///
    /// `G_TT_NONE` and the reserved code return `None`; a CI texture drawn
    /// with either has no palette to convert through.
    pub const fn from_raw(bits: u8) -> Option<Self> {
        match bits {
            2 => Some(Self::Rgba16),
            3 => Some(Self::Ia16),
            _ => None,
        }
    }
}

/// Host surface layout written by a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DestFormat {
    Rgb565,
    Rgba5551,
    Rgba4444,
    Rgba8888,
    /// Two 4-bit indices per byte plus a 16-entry 8888 palette.
    Ci4,
    /// One 8-bit index per byte plus a 256-entry 8888 palette.
    Ci8,
}

impl DestFormat {
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Ci4 | Self::Ci8)
    }

    /// Bytes occupied by `width` destination pixels, saturating at
    /// `usize::MAX`.
    pub const fn row_bytes(self, width: usize) -> usize {
        match self {
            Self::Rgb565 | Self::Rgba5551 | Self::Rgba4444 => width.saturating_mul(2),
            Self::Rgba8888 => width.saturating_mul(4),
            Self::Ci4 => width.div_ceil(2),
            Self::Ci8 => width,
        }
    }
}

/// Where a texture lives in console memory and how its texels are encoded.
///
/// Built by the caller from RDP tile state immediately before a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceTexture {
    /// Byte offset of the first texel in console memory.
    pub address: usize,
    pub width: usize,
    pub height: usize,
    /// Distance in bytes between the starts of consecutive source rows.
    pub pitch: usize,
    pub format: TextureFormat,
    pub size: TexelSize,
    /// Odd rows are stored with their 32-bit words swapped.
    pub swapped: bool,
    /// Byte offset of the palette. Only read for CI textures.
    pub tlut_address: usize,
    pub tlut_format: TlutFormat,
}

impl SourceTexture {
    pub const fn new(
        format: TextureFormat,
        size: TexelSize,
        address: usize,
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Self {
        Self {
            address,
            width,
            height,
            pitch,
            format,
            size,
            swapped: false,
            tlut_address: 0,
            tlut_format: TlutFormat::Rgba16,
        }
    }

    /// Mark odd rows as word-swapped.
    pub const fn with_swapped(mut self, swapped: bool) -> Self {
        self.swapped = swapped;
        self
    }

    pub const fn with_tlut(mut self, address: usize, format: TlutFormat) -> Self {
        self.tlut_address = address;
        self.tlut_format = format;
        self
    }

    /// Destination column swizzle applied on swapped rows, or 0 when the
    /// format corrects swapped rows on the source side instead.
    pub(crate) const fn row_swizzle(&self) -> usize {
        if !self.swapped {
            return 0;
        }
        match (self.format, self.size) {
            (TextureFormat::Rgba, TexelSize::Bits16) | (TextureFormat::Ia, TexelSize::Bits16) => {
                crate::rdram::swizzle(2)
            }
            // TODO: check against hardware captures. A word swap moves a
            // 32-bit texel by one column, yet swapped RGBA32 rows XOR by two.
            (TextureFormat::Rgba, TexelSize::Bits32) => crate::rdram::swizzle(4),
            (TextureFormat::Ia, TexelSize::Bits8) | (TextureFormat::I, TexelSize::Bits8) => {
                crate::rdram::swizzle(1)
            }
            _ => 0,
        }
    }

    /// Texels decoded per row, including the padding a swizzled row writes.
    pub const fn padded_width(&self) -> usize {
        let swizzle = self.row_swizzle();
        if swizzle == 0 {
            return self.width;
        }
        match self.width.checked_next_multiple_of(1 << swizzle) {
            Some(width) => width,
            None => usize::MAX,
        }
    }

    /// Bytes each destination row must hold for this texture in `format`.
    ///
    /// Allocate surfaces with a pitch of at least this many bytes. Widths too
    /// large to address saturate at `usize::MAX`, which no surface satisfies.
    pub const fn dest_row_bytes(&self, format: DestFormat) -> usize {
        format.row_bytes(self.padded_width())
    }

    /// Bytes of console memory a row decode touches.
    pub(crate) const fn source_row_bytes(&self) -> usize {
        self.size.row_bytes(self.padded_width())
    }
}

/// A caller-owned surface the conversion writes into.
#[derive(Debug)]
pub struct DestSurface<'a> {
    pub pixels: &'a mut [u8],
    /// Distance in bytes between the starts of consecutive destination rows.
    pub pitch: usize,
    pub format: DestFormat,
    /// 256 RGBA-8888 entries (1024 bytes) for indexed formats.
    pub palette: Option<&'a mut [u8]>,
}

impl<'a> DestSurface<'a> {
    pub fn new(pixels: &'a mut [u8], pitch: usize, format: DestFormat) -> Self {
        Self {
            pixels,
            pitch,
            format,
            palette: None,
        }
    }

    pub fn with_palette(mut self, palette: &'a mut [u8]) -> Self {
        self.palette = Some(palette);
        self
    }
}
