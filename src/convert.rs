// ---------------------------------------------------------------------------
// Format dispatch: (texel format, texel size) → one conversion routine.
//
// Each routine picks row decoders for the requested surface, validates the
// whole footprint, then drives the decoders across every row.
// ---------------------------------------------------------------------------

use crate::dispatch::{check_surface, for_each_row};
use crate::palette::{self, CI4_ENTRIES, CI8_ENTRIES, Palette};
use crate::pixel::{
    I8, Ia8, Ia16, NativePixel, Pf4444, Pf5551, Pf5650, Pf8888, Rgba16, Rgba32, SourceTexel,
};
use crate::rdram::{SWAPPED_ROW_XOR, swizzle};
use crate::rows;
use crate::{
    ConvertError, DestFormat, DestSurface, Rdram, SourceTexture, TexelSize, TextureFormat,
};

/// Converts one texture into one surface.
///
/// Holds no state; any number may run at once on disjoint surfaces.
pub type ConversionRoutine =
    fn(&Rdram<'_>, &SourceTexture, &mut DestSurface<'_>) -> Result<(), ConvertError>;

/// The routine for a texel format and size, or `None` if the combination has
/// no decoder.
pub fn routine(format: TextureFormat, size: TexelSize) -> Option<ConversionRoutine> {
    use TexelSize::*;
    use TextureFormat::*;

    let routine: ConversionRoutine = match (format, size) {
        (Rgba, Bits16) => convert_rgba16,
        (Rgba, Bits32) => convert_rgba32,
        (Ci, Bits4) => convert_ci4,
        (Ci, Bits8) => convert_ci8,
        (Ia, Bits4) => convert_ia4,
        (Ia, Bits8) => convert_ia8,
        (Ia, Bits16) => convert_ia16,
        (I, Bits4) => convert_i4,
        (I, Bits8) => convert_i8,
        (Rgba, Bits4 | Bits8)
        | (Yuv, _)
        | (Ci, Bits16 | Bits32)
        | (Ia, Bits32)
        | (I, Bits16 | Bits32) => return None,
    };
    Some(routine)
}

/// [`routine`] keyed by raw register codes: format `0..=7`, size `0..=3`.
pub fn routine_for_raw(format: u8, size: u8) -> Option<ConversionRoutine> {
    routine(TextureFormat::from_raw(format)?, TexelSize::from_raw(size)?)
}

/// Convert `texture` from console memory into `dest`.
///
/// On error the destination contents are unspecified.
///
/// # Panics
///
/// If a row of a 16- or 32-bit texture starts on an offset that is not a
/// multiple of the texel size, which means the descriptor was built wrong.
pub fn convert_texture(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    let routine = routine(texture.format, texture.size).ok_or(
        ConvertError::UnsupportedFormat {
            format: texture.format,
            size: texture.size,
        },
    )?;
    routine(mem, texture, dest)
}

/// [`convert_texture`], logging failures and reporting success as a `bool`.
///
/// A `false` result means the surface must not be presented; callers
/// typically skip the texture or draw a placeholder.
pub fn convert(mem: &Rdram<'_>, texture: &SourceTexture, dest: &mut DestSurface<'_>) -> bool {
    log::trace!("converting {texture:?} into {:?}", dest.format);
    match convert_texture(mem, texture, dest) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("texture at {:#x} not converted: {err}", texture.address);
            false
        }
    }
}

type RowFn = fn(&Rdram<'_>, usize, usize, &mut [u8]);

fn unsupported(texture: &SourceTexture, dest: DestFormat) -> ConvertError {
    ConvertError::UnsupportedDestination {
        format: texture.format,
        size: texture.size,
        dest,
    }
}

// ===========================================================================
// Direct-colour sources
// ===========================================================================

fn drive_texels<T: SourceTexel, P: NativePixel, const SWIZZLE: usize>(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    let row_bytes = check_surface(mem, texture, P::FORMAT, dest.pixels.len(), dest.pitch)?;
    let width = texture.width;
    for_each_row(
        texture,
        dest.pixels,
        dest.pitch,
        row_bytes,
        |offset, row| rows::texel_row::<T, P, 0>(mem, offset, width, row),
        |offset, row| rows::texel_row::<T, P, SWIZZLE>(mem, offset, width, row),
    );
    Ok(())
}

fn convert_texels<T: SourceTexel, const SWIZZLE: usize>(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    match dest.format {
        DestFormat::Rgb565 => drive_texels::<T, Pf5650, SWIZZLE>(mem, texture, dest),
        DestFormat::Rgba5551 => drive_texels::<T, Pf5551, SWIZZLE>(mem, texture, dest),
        DestFormat::Rgba4444 => drive_texels::<T, Pf4444, SWIZZLE>(mem, texture, dest),
        DestFormat::Rgba8888 => drive_texels::<T, Pf8888, SWIZZLE>(mem, texture, dest),
        DestFormat::Ci4 | DestFormat::Ci8 => Err(unsupported(texture, dest.format)),
    }
}

/// 8888 output whose unswapped rows go through a word kernel.
fn drive_8888_fast<T: SourceTexel, const SWIZZLE: usize>(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
    fast_row: RowFn,
) -> Result<(), ConvertError> {
    let row_bytes = check_surface(
        mem,
        texture,
        DestFormat::Rgba8888,
        dest.pixels.len(),
        dest.pitch,
    )?;
    let width = texture.width;
    for_each_row(
        texture,
        dest.pixels,
        dest.pitch,
        row_bytes,
        |offset, row| fast_row(mem, offset, width, row),
        |offset, row| rows::texel_row::<T, Pf8888, SWIZZLE>(mem, offset, width, row),
    );
    Ok(())
}

fn convert_rgba16(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    convert_texels::<Rgba16, { swizzle(2) }>(mem, t, d)
}

fn convert_rgba32(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    match d.format {
        DestFormat::Rgba8888 => {
            drive_8888_fast::<Rgba32, { swizzle(4) }>(mem, t, d, rows::rgba32_row_8888)
        }
        _ => convert_texels::<Rgba32, { swizzle(4) }>(mem, t, d),
    }
}

fn convert_ia8(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    convert_texels::<Ia8, { swizzle(1) }>(mem, t, d)
}

fn convert_ia16(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    convert_texels::<Ia16, { swizzle(2) }>(mem, t, d)
}

fn convert_i8(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    match d.format {
        DestFormat::Rgba8888 => {
            drive_8888_fast::<I8, { swizzle(1) }>(mem, t, d, rows::i8_row_8888)
        }
        _ => convert_texels::<I8, { swizzle(1) }>(mem, t, d),
    }
}

// ===========================================================================
// Nibble sources
// ===========================================================================

fn drive_nibbles(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
    unswapped: RowFn,
    swapped: RowFn,
) -> Result<(), ConvertError> {
    let row_bytes = check_surface(mem, texture, dest.format, dest.pixels.len(), dest.pitch)?;
    let width = texture.width;
    for_each_row(
        texture,
        dest.pixels,
        dest.pitch,
        row_bytes,
        |offset, row| unswapped(mem, offset, width, row),
        |offset, row| swapped(mem, offset, width, row),
    );
    Ok(())
}

fn convert_ia4(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    use rows::ia4_row;
    const X: usize = SWAPPED_ROW_XOR;
    match d.format {
        DestFormat::Rgb565 => drive_nibbles(mem, t, d, ia4_row::<Pf5650, 0>, ia4_row::<Pf5650, X>),
        DestFormat::Rgba5551 => {
            drive_nibbles(mem, t, d, ia4_row::<Pf5551, 0>, ia4_row::<Pf5551, X>)
        }
        DestFormat::Rgba4444 => {
            drive_nibbles(mem, t, d, ia4_row::<Pf4444, 0>, ia4_row::<Pf4444, X>)
        }
        DestFormat::Rgba8888 => {
            drive_nibbles(mem, t, d, ia4_row::<Pf8888, 0>, ia4_row::<Pf8888, X>)
        }
        DestFormat::Ci4 | DestFormat::Ci8 => Err(unsupported(t, d.format)),
    }
}

fn convert_i4(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    use rows::i4_row;
    const X: usize = SWAPPED_ROW_XOR;
    match d.format {
        DestFormat::Rgb565 => drive_nibbles(mem, t, d, i4_row::<Pf5650, 0>, i4_row::<Pf5650, X>),
        DestFormat::Rgba5551 => drive_nibbles(mem, t, d, i4_row::<Pf5551, 0>, i4_row::<Pf5551, X>),
        DestFormat::Rgba4444 => drive_nibbles(mem, t, d, i4_row::<Pf4444, 0>, i4_row::<Pf4444, X>),
        DestFormat::Rgba8888 => drive_nibbles(mem, t, d, i4_row::<Pf8888, 0>, i4_row::<Pf8888, X>),
        DestFormat::Ci4 | DestFormat::Ci8 => Err(unsupported(t, d.format)),
    }
}

// ===========================================================================
// Colour-indexed sources
// ===========================================================================

type PaletteRow = fn(&Rdram<'_>, usize, usize, &mut [u8], &Palette);

/// Resolve every index through the palette into an 8888 surface.
fn drive_palettised(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
    entries: usize,
    unswapped: PaletteRow,
    swapped: PaletteRow,
) -> Result<(), ConvertError> {
    let row_bytes = check_surface(
        mem,
        texture,
        DestFormat::Rgba8888,
        dest.pixels.len(),
        dest.pitch,
    )?;
    palette::check_tlut(mem, texture.tlut_address, entries)?;
    let palette = Palette::load(mem, texture.tlut_address, texture.tlut_format, entries);
    let width = texture.width;
    for_each_row(
        texture,
        dest.pixels,
        dest.pitch,
        row_bytes,
        |offset, row| unswapped(mem, offset, width, row, &palette),
        |offset, row| swapped(mem, offset, width, row, &palette),
    );
    Ok(())
}

/// Copy raw indices into an indexed surface and emit the converted palette.
fn drive_indexed(
    mem: &Rdram<'_>,
    texture: &SourceTexture,
    dest: &mut DestSurface<'_>,
    entries: usize,
    unswapped: RowFn,
    swapped: RowFn,
) -> Result<(), ConvertError> {
    let row_bytes = check_surface(mem, texture, dest.format, dest.pixels.len(), dest.pitch)?;
    palette::check_tlut(mem, texture.tlut_address, entries)?;
    let out = dest
        .palette
        .as_deref_mut()
        .filter(|out| out.len() >= CI8_ENTRIES * 4)
        .ok_or(ConvertError::PaletteTooSmall)?;
    let width = texture.width;
    for_each_row(
        texture,
        dest.pixels,
        dest.pitch,
        row_bytes,
        |offset, row| unswapped(mem, offset, width, row),
        |offset, row| swapped(mem, offset, width, row),
    );
    palette::convert_palette(mem, texture.tlut_address, texture.tlut_format, entries, out);
    Ok(())
}

fn convert_ci4(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    const X: usize = SWAPPED_ROW_XOR;
    match d.format {
        DestFormat::Rgba8888 => drive_palettised(
            mem,
            t,
            d,
            CI4_ENTRIES,
            rows::ci4_row_rgba::<0>,
            rows::ci4_row_rgba::<X>,
        ),
        DestFormat::Ci4 => drive_indexed(
            mem,
            t,
            d,
            CI4_ENTRIES,
            rows::ci4_row_indexed::<0>,
            rows::ci4_row_indexed::<X>,
        ),
        DestFormat::Rgb565 | DestFormat::Rgba5551 | DestFormat::Rgba4444 | DestFormat::Ci8 => {
            Err(unsupported(t, d.format))
        }
    }
}

fn convert_ci8(
    mem: &Rdram<'_>,
    t: &SourceTexture,
    d: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    const X: usize = SWAPPED_ROW_XOR;
    match d.format {
        DestFormat::Rgba8888 => drive_palettised(
            mem,
            t,
            d,
            CI8_ENTRIES,
            rows::ci8_row_rgba::<0>,
            rows::ci8_row_rgba::<X>,
        ),
        DestFormat::Ci8 => drive_indexed(
            mem,
            t,
            d,
            CI8_ENTRIES,
            rows::ci8_row_indexed::<0>,
            rows::ci8_row_indexed::<X>,
        ),
        DestFormat::Rgb565 | DestFormat::Rgba5551 | DestFormat::Rgba4444 | DestFormat::Ci4 => {
            Err(unsupported(t, d.format))
        }
    }
}
