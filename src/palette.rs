//! Texture lookup table conversion.
//!
//! A TLUT is a run of 16-bit colours in console memory. Because memory is
//! word-swapped, logical entry `i` sits in halfword slot `i ^ 1`.

use bytemuck::Zeroable;

use crate::pixel::{Ia16, NativePixel, Pf8888, Rgba16};
use crate::{ConvertError, Rdram, TlutFormat};

/// Entries in a CI4 palette.
pub const CI4_ENTRIES: usize = 16;
/// Entries in a CI8 palette, and the minimum size of a destination palette.
pub const CI8_ENTRIES: usize = 256;

/// Convert one console colour to 8888.
#[inline(always)]
pub fn convert_entry(raw: u16, format: TlutFormat) -> Pf8888 {
    match format {
        TlutFormat::Rgba16 => Pf8888::from_rgba16(Rgba16(raw)),
        TlutFormat::Ia16 => Pf8888::from_ia16(Ia16(raw)),
    }
}

/// Write `entries` converted colours to `out` as 8888 bytes.
///
/// Every requested entry is overwritten. The caller has already checked that
/// the table lies inside `mem` and that `out` holds `entries * 4` bytes.
pub fn convert_palette(
    mem: &Rdram<'_>,
    tlut_address: usize,
    format: TlutFormat,
    entries: usize,
    out: &mut [u8],
) {
    for (i, px) in out[..entries * 4].chunks_exact_mut(4).enumerate() {
        let raw = mem.halfword_slot(tlut_address, i ^ 1);
        px.copy_from_slice(&convert_entry(raw, format).to_bytes());
    }
}

/// Fail unless a table of `entries` colours at `tlut_address` is halfword
/// aligned and in bounds.
///
/// Entries are read in slot pairs, so an odd count also covers the slot
/// after the last entry.
pub(crate) fn check_tlut(
    mem: &Rdram<'_>,
    tlut_address: usize,
    entries: usize,
) -> Result<(), ConvertError> {
    if !tlut_address.is_multiple_of(2) {
        return Err(ConvertError::MisalignedPalette);
    }
    let len = entries
        .checked_next_multiple_of(2)
        .and_then(|slots| slots.checked_mul(2))
        .ok_or(ConvertError::PaletteOutOfBounds)?;
    mem.check_span(tlut_address, len, ConvertError::PaletteOutOfBounds)
}

/// A converted palette, indexed by the raw texel value.
#[derive(Clone, Debug)]
pub(crate) struct Palette {
    entries: [Pf8888; CI8_ENTRIES],
}

impl Palette {
    /// Convert the first `entries` colours of the table at `tlut_address`,
    /// already checked with [`check_tlut`]. At most [`CI8_ENTRIES`].
    pub(crate) fn load(
        mem: &Rdram<'_>,
        tlut_address: usize,
        format: TlutFormat,
        entries: usize,
    ) -> Self {
        let mut palette = Self {
            entries: [Pf8888::zeroed(); CI8_ENTRIES],
        };
        for (i, entry) in palette.entries[..entries].iter_mut().enumerate() {
            *entry = convert_entry(mem.halfword_slot(tlut_address, i ^ 1), format);
        }
        palette
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: u8) -> Pf8888 {
        self.entries[index as usize]
    }
}
