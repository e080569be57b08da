//! Channel expansion tables, console texel encodings and host pixel formats.
//!
//! Narrow channels are widened by bit replication so that full intensity
//! always lands on `0xFF`: a 3-bit `0b101` becomes `0b10110110`, never
//! `0b10100000`.

use bytemuck::{Pod, Zeroable};

use crate::{DestFormat, Rdram};

// ===========================================================================
// Expansion tables
// ===========================================================================

pub const ONE_TO_EIGHT: [u8; 2] = [0x00, 0xFF];

/// 3-bit channel to 8 bits, repeating the bit pattern across the byte.
pub const THREE_TO_EIGHT: [u8; 8] = [
    0x00, // 000 -> 00 00 00 00
    0x24, // 001 -> 00 10 01 00
    0x49, // 010 -> 01 00 10 01
    0x6D, // 011 -> 01 10 11 01
    0x92, // 100 -> 10 01 00 10
    0xB6, // 101 -> 10 11 01 10
    0xDB, // 110 -> 11 01 10 11
    0xFF, // 111 -> 11 11 11 11
];

/// 4-bit channel to 8 bits: the nibble in both halves, i.e. `v * 17`.
pub const FOUR_TO_EIGHT: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
    0xFF,
];

pub const FIVE_TO_EIGHT: [u8; 32] = {
    let mut table = [0u8; 32];
    let mut v = 0;
    while v < 32 {
        table[v] = ((v << 3) | (v >> 2)) as u8;
        v += 1;
    }
    table
};

// ===========================================================================
// Console texel encodings
// ===========================================================================

/// A console texel that occupies one or more whole bytes.
pub trait SourceTexel: Copy {
    const BYTES: usize;

    fn read(mem: &Rdram<'_>, offset: usize) -> Self;

    /// Expanded `[r, g, b, a]`.
    fn channels(self) -> [u8; 4];

    #[inline(always)]
    fn to_native<P: NativePixel>(self) -> P {
        let [r, g, b, a] = self.channels();
        P::from_channels(r, g, b, a)
    }
}

/// RGBA 5551: `RRRRRGGG GGBBBBBA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba16(pub u16);

/// RGBA 8888, red in the most significant byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba32(pub u32);

/// 8-bit intensity over 8-bit alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ia16(pub u16);

/// 4-bit intensity over 4-bit alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ia8(pub u8);

/// 8-bit intensity, used for every channel including alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I8(pub u8);

impl SourceTexel for Rgba16 {
    const BYTES: usize = 2;

    #[inline(always)]
    fn read(mem: &Rdram<'_>, offset: usize) -> Self {
        Self(mem.read_u16(offset))
    }

    #[inline(always)]
    fn channels(self) -> [u8; 4] {
        let v = self.0 as usize;
        [
            FIVE_TO_EIGHT[(v >> 11) & 0x1F],
            FIVE_TO_EIGHT[(v >> 6) & 0x1F],
            FIVE_TO_EIGHT[(v >> 1) & 0x1F],
            ONE_TO_EIGHT[v & 0x01],
        ]
    }

    #[inline(always)]
    fn to_native<P: NativePixel>(self) -> P {
        P::from_rgba16(self)
    }
}

impl SourceTexel for Rgba32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn read(mem: &Rdram<'_>, offset: usize) -> Self {
        Self(mem.read_u32(offset))
    }

    #[inline(always)]
    fn channels(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl SourceTexel for Ia16 {
    const BYTES: usize = 2;

    #[inline(always)]
    fn read(mem: &Rdram<'_>, offset: usize) -> Self {
        Self(mem.read_u16(offset))
    }

    #[inline(always)]
    fn channels(self) -> [u8; 4] {
        let [i, a] = self.0.to_be_bytes();
        [i, i, i, a]
    }

    #[inline(always)]
    fn to_native<P: NativePixel>(self) -> P {
        P::from_ia16(self)
    }
}

impl SourceTexel for Ia8 {
    const BYTES: usize = 1;

    #[inline(always)]
    fn read(mem: &Rdram<'_>, offset: usize) -> Self {
        Self(mem.read_u8(offset))
    }

    #[inline(always)]
    fn channels(self) -> [u8; 4] {
        let i = FOUR_TO_EIGHT[(self.0 >> 4) as usize];
        let a = FOUR_TO_EIGHT[(self.0 & 0x0F) as usize];
        [i, i, i, a]
    }
}

impl SourceTexel for I8 {
    const BYTES: usize = 1;

    #[inline(always)]
    fn read(mem: &Rdram<'_>, offset: usize) -> Self {
        Self(mem.read_u8(offset))
    }

    #[inline(always)]
    fn channels(self) -> [u8; 4] {
        [self.0; 4]
    }
}

/// Channels of one IA4 nibble: 3-bit intensity, 1-bit alpha.
#[inline(always)]
pub fn ia4_channels(nibble: u8) -> [u8; 4] {
    let i = THREE_TO_EIGHT[((nibble >> 1) & 0x07) as usize];
    [i, i, i, ONE_TO_EIGHT[(nibble & 0x01) as usize]]
}

/// Channels of one I4 nibble, replicated into all four.
#[inline(always)]
pub fn i4_channels(nibble: u8) -> [u8; 4] {
    [FOUR_TO_EIGHT[(nibble & 0x0F) as usize]; 4]
}

// ===========================================================================
// Host pixel formats
// ===========================================================================

mod sealed {
    pub trait Sealed {}
}

/// A direct-colour host pixel. Implemented only by the four formats in
/// [`DestFormat`] that are not indexed.
pub trait NativePixel: Copy + sealed::Sealed {
    const FORMAT: DestFormat;

    fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self;

    #[inline(always)]
    fn from_rgba16(c: Rgba16) -> Self {
        let [r, g, b, a] = c.channels();
        Self::from_channels(r, g, b, a)
    }

    #[inline(always)]
    fn from_ia16(c: Ia16) -> Self {
        let [r, g, b, a] = c.channels();
        Self::from_channels(r, g, b, a)
    }

    /// Store at column `x` of `row`, little-endian.
    fn write(self, row: &mut [u8], x: usize);
}

/// `RRRRR GGGGGG BBBBB` from the low bit up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Pf5650(pub u16);

/// `RRRRR GGGGG BBBBB A` from the low bit up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Pf5551(pub u16);

/// `RRRR GGGG BBBB AAAA` from the low bit up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Pf4444(pub u16);

/// Bytes `R, G, B, A` in memory order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Pf8888(pub u32);

impl Pf8888 {
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl sealed::Sealed for Pf5650 {}
impl sealed::Sealed for Pf5551 {}
impl sealed::Sealed for Pf4444 {}
impl sealed::Sealed for Pf8888 {}

#[inline(always)]
fn write_u16(row: &mut [u8], x: usize, v: u16) {
    row[x * 2..x * 2 + 2].copy_from_slice(&v.to_le_bytes());
}

impl NativePixel for Pf5650 {
    const FORMAT: DestFormat = DestFormat::Rgb565;

    #[inline(always)]
    fn from_channels(r: u8, g: u8, b: u8, _a: u8) -> Self {
        Self((r as u16 >> 3) | ((g as u16 >> 2) << 5) | ((b as u16 >> 3) << 11))
    }

    #[inline(always)]
    fn write(self, row: &mut [u8], x: usize) {
        write_u16(row, x, self.0);
    }
}

impl NativePixel for Pf5551 {
    const FORMAT: DestFormat = DestFormat::Rgba5551;

    #[inline(always)]
    fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            (r as u16 >> 3)
                | ((g as u16 >> 3) << 5)
                | ((b as u16 >> 3) << 10)
                | ((a as u16 >> 7) << 15),
        )
    }

    // Same field widths as the console encoding, so no expansion is needed.
    #[inline(always)]
    fn from_rgba16(c: Rgba16) -> Self {
        let v = c.0;
        Self(
            ((v >> 11) & 0x1F)
                | (((v >> 6) & 0x1F) << 5)
                | (((v >> 1) & 0x1F) << 10)
                | ((v & 1) << 15),
        )
    }

    #[inline(always)]
    fn write(self, row: &mut [u8], x: usize) {
        write_u16(row, x, self.0);
    }
}

impl NativePixel for Pf4444 {
    const FORMAT: DestFormat = DestFormat::Rgba4444;

    #[inline(always)]
    fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            (r as u16 >> 4)
                | ((g as u16 >> 4) << 4)
                | ((b as u16 >> 4) << 8)
                | ((a as u16 >> 4) << 12),
        )
    }

    #[inline(always)]
    fn write(self, row: &mut [u8], x: usize) {
        write_u16(row, x, self.0);
    }
}

impl NativePixel for Pf8888 {
    const FORMAT: DestFormat = DestFormat::Rgba8888;

    #[inline(always)]
    fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    #[inline(always)]
    fn write(self, row: &mut [u8], x: usize) {
        row[x * 4..x * 4 + 4].copy_from_slice(&self.to_bytes());
    }
}

/// Two 4-bit palette indices in one byte, first texel in the low nibble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Ci44(pub u8);

impl Ci44 {
    #[inline(always)]
    pub const fn new(first: u8, second: u8) -> Self {
        Self((first & 0x0F) | (second << 4))
    }

    /// Repack a console byte, which holds the first texel in its high nibble.
    #[inline(always)]
    pub const fn from_console(b: u8) -> Self {
        Self(b.rotate_left(4))
    }
}
