extern crate alloc;
use alloc::{vec, vec::Vec};

use crate::palette::{self, CI4_ENTRIES, CI8_ENTRIES, Palette};
use crate::pixel::*;
use crate::*;

// --- Helpers ---

/// Word-swapped console memory holding `image`, given in console (big-endian)
/// byte order and zero-padded to whole doublewords.
fn console(image: &[u8]) -> Vec<u8> {
    let mut be = image.to_vec();
    be.resize(image.len().next_multiple_of(8), 0);
    let mut mem = vec![0u8; be.len()];
    load_big_endian(&be, &mut mem).unwrap();
    mem
}

/// Convert into a tightly pitched surface, with a palette for indexed
/// formats. Returns the pixels and the palette bytes.
fn decode(image: &[u8], texture: SourceTexture, format: DestFormat) -> (Vec<u8>, Vec<u8>) {
    let mem = console(image);
    let pitch = texture.dest_row_bytes(format);
    let mut pixels = vec![0u8; pitch * texture.height];
    let mut pal = vec![0u8; CI8_ENTRIES * 4];
    let mut dest = DestSurface::new(&mut pixels, pitch, format);
    if format.is_indexed() {
        dest = dest.with_palette(&mut pal);
    }
    convert_texture(&Rdram::new(&mem), &texture, &mut dest).unwrap();
    (pixels, pal)
}

fn decode_8888(image: &[u8], texture: SourceTexture) -> Vec<u8> {
    decode(image, texture, DestFormat::Rgba8888).0
}

fn row_texture(format: TextureFormat, size: TexelSize, width: usize) -> SourceTexture {
    SourceTexture::new(format, size, 0, width, 1, size.row_bytes(width).next_multiple_of(8))
}

/// Store the odd rows of `logical` with the two words of every doubleword
/// exchanged, the way the RDP leaves them.
fn swap_odd_rows(logical: &[u8], pitch: usize) -> Vec<u8> {
    let mut out = logical.to_vec();
    for (y, row) in out.chunks_exact_mut(pitch).enumerate() {
        if y & 1 == 1 {
            for (k, b) in row.iter_mut().enumerate() {
                *b = logical[y * pitch + (k ^ 4)];
            }
        }
    }
    out
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 37 + 11) as u8).collect()
}

// --- Address fiddling ---

#[test]
fn fiddle_values() {
    assert_eq!(fiddle(1), 3);
    assert_eq!(fiddle(2), 2);
    assert_eq!(fiddle(4), 0);
    assert_eq!(SWAPPED_ROW_XOR, 4);
}

#[test]
fn rdram_reads_console_order() {
    let mem = console(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
    let rdram = Rdram::new(&mem);
    assert_eq!(rdram.read_u8(0), 0x01);
    assert_eq!(rdram.read_u8(5), 0xAB);
    assert_eq!(rdram.read_u16(2), 0x4567);
    assert_eq!(rdram.read_u16(6), 0xCDEF);
    assert_eq!(rdram.read_u32(4), 0x89AB_CDEF);
    assert_eq!(rdram.len(), 8);
}

#[test]
fn load_big_endian_rejects_bad_lengths() {
    let mut out = [0u8; 8];
    assert_eq!(
        load_big_endian(&[0; 6], &mut out),
        Err(ConvertError::NotWordAligned)
    );
    assert_eq!(
        load_big_endian(&[0; 12], &mut out),
        Err(ConvertError::DestinationTooSmall)
    );
    load_big_endian(&[1, 2, 3, 4], &mut out).unwrap();
    assert_eq!(out[..4], [4, 3, 2, 1]);
}

// --- Channel expansion ---

#[test]
fn expansion_tables_span_full_range() {
    assert_eq!(ONE_TO_EIGHT, [0x00, 0xFF]);
    assert!(THREE_TO_EIGHT.windows(2).all(|w| w[0] < w[1]));
    assert_eq!((THREE_TO_EIGHT[0], THREE_TO_EIGHT[7]), (0x00, 0xFF));
    assert!(FIVE_TO_EIGHT.windows(2).all(|w| w[0] < w[1]));
    assert_eq!((FIVE_TO_EIGHT[0], FIVE_TO_EIGHT[31]), (0x00, 0xFF));
    for (v, &e) in FOUR_TO_EIGHT.iter().enumerate() {
        assert_eq!(e as usize, v * 17);
    }
}

#[test]
fn rgba16_to_every_direct_format() {
    assert_eq!(Pf8888::from_rgba16(Rgba16(0xF801)).to_bytes(), [0xFF, 0, 0, 0xFF]);
    assert_eq!(Pf8888::from_rgba16(Rgba16(0x07C0)).to_bytes(), [0, 0xFF, 0, 0]);
    assert_eq!(Pf8888::from_rgba16(Rgba16(0x003E)).to_bytes(), [0, 0, 0xFF, 0]);
    assert_eq!(Pf5650::from_rgba16(Rgba16(0xF801)), Pf5650(0x001F));
    assert_eq!(Pf5551::from_rgba16(Rgba16(0xF801)), Pf5551(0x801F));
    assert_eq!(Pf4444::from_rgba16(Rgba16(0xF801)), Pf4444(0xF00F));
}

#[test]
fn rgba5551_repack_matches_channel_path() {
    for v in (0..=u16::MAX).step_by(7) {
        let [r, g, b, a] = Rgba16(v).channels();
        assert_eq!(Pf5551::from_rgba16(Rgba16(v)), Pf5551::from_channels(r, g, b, a));
    }
}

#[test]
fn ci44_puts_first_texel_low() {
    assert_eq!(Ci44::from_console(0x12), Ci44::new(1, 2));
    assert_eq!(Ci44::from_console(0x12).0, 0x21);
}

// --- Single rows, one fixture per source format ---

#[test]
fn rgba16_row() {
    let image = [0xF8, 0x01, 0x07, 0xC0, 0x00, 0x3E];
    let texture = row_texture(TextureFormat::Rgba, TexelSize::Bits16, 3);
    assert_eq!(
        decode_8888(&image, texture),
        [0xFF, 0, 0, 0xFF, 0, 0xFF, 0, 0, 0, 0, 0xFF, 0]
    );
    let one = row_texture(TextureFormat::Rgba, TexelSize::Bits16, 1);
    assert_eq!(decode(&image[..2], one, DestFormat::Rgb565).0, [0x1F, 0x00]);
    assert_eq!(decode(&image[..2], one, DestFormat::Rgba5551).0, [0x1F, 0x80]);
    assert_eq!(decode(&image[..2], one, DestFormat::Rgba4444).0, [0x0F, 0xF0]);
}

#[test]
fn rgba32_row() {
    let image = [
        0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC,
    ];
    let texture = row_texture(TextureFormat::Rgba, TexelSize::Bits32, 3);
    assert_eq!(decode_8888(&image, texture), image);
    let one = row_texture(TextureFormat::Rgba, TexelSize::Bits32, 1);
    let (px, _) = decode(&image[..4], one, DestFormat::Rgba4444);
    assert_eq!(px, [0x21, 0x43]);
}

#[test]
fn ia8_row() {
    let texture = row_texture(TextureFormat::Ia, TexelSize::Bits8, 2);
    assert_eq!(
        decode_8888(&[0xA5, 0x0F], texture),
        [0xAA, 0xAA, 0xAA, 0x55, 0x00, 0x00, 0x00, 0xFF]
    );
}

#[test]
fn ia16_row() {
    let texture = row_texture(TextureFormat::Ia, TexelSize::Bits16, 1);
    assert_eq!(decode_8888(&[0x80, 0x40], texture), [0x80, 0x80, 0x80, 0x40]);
    let (px, _) = decode(&[0x80, 0x40], texture, DestFormat::Rgb565);
    assert_eq!(px, [0x10, 0x84]);
}

#[test]
fn i8_row_covers_words_and_tail() {
    let image = [0x12, 0x34, 0x56, 0x78, 0x9A];
    let texture = row_texture(TextureFormat::I, TexelSize::Bits8, 5);
    let expected: Vec<u8> = image.iter().flat_map(|&v| [v; 4]).collect();
    assert_eq!(decode_8888(&image, texture), expected);
    let (px, _) = decode(&image, texture, DestFormat::Rgba4444);
    assert_eq!(px[..2], [0x11, 0x11]);
}

#[test]
fn ia4_row() {
    let texture = row_texture(TextureFormat::Ia, TexelSize::Bits4, 2);
    assert_eq!(
        decode_8888(&[0xB3], texture),
        [0xB6, 0xB6, 0xB6, 0xFF, 0x24, 0x24, 0x24, 0xFF]
    );
    assert_eq!(decode_8888(&[0x0C], texture)[4..], [0xDB, 0xDB, 0xDB, 0x00]);
}

#[test]
fn i4_row() {
    let texture = row_texture(TextureFormat::I, TexelSize::Bits4, 2);
    assert_eq!(
        decode_8888(&[0x7F], texture),
        [0x77, 0x77, 0x77, 0x77, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

/// CI image: texels at 0, a big-endian RGBA16 palette at 64.
fn ci_image(texels: &[u8], palette: &[u16]) -> Vec<u8> {
    let mut image = vec![0u8; 64 + CI8_ENTRIES * 2];
    image[..texels.len()].copy_from_slice(texels);
    for (i, c) in palette.iter().enumerate() {
        image[64 + i * 2..][..2].copy_from_slice(&c.to_be_bytes());
    }
    image
}

#[test]
fn ci4_row_through_palette() {
    let image = ci_image(&[0x12], &[0x0000, 0xF801, 0x07C1]);
    let texture = row_texture(TextureFormat::Ci, TexelSize::Bits4, 2)
        .with_tlut(64, TlutFormat::Rgba16);
    assert_eq!(
        decode_8888(&image, texture),
        [0xFF, 0, 0, 0xFF, 0, 0xFF, 0, 0xFF]
    );
}

#[test]
fn ci4_row_indexed_with_palette() {
    let image = ci_image(&[0x12, 0x30], &[0x0000, 0xF801, 0x07C1]);
    let texture = row_texture(TextureFormat::Ci, TexelSize::Bits4, 4)
        .with_tlut(64, TlutFormat::Rgba16);
    let (px, pal) = decode(&image, texture, DestFormat::Ci4);
    assert_eq!(px, [0x21, 0x03]);
    assert_eq!(pal[4..12], [0xFF, 0, 0, 0xFF, 0, 0xFF, 0, 0xFF]);
    assert_eq!(pal[CI4_ENTRIES * 4..], [0u8; (CI8_ENTRIES - CI4_ENTRIES) * 4]);
}

#[test]
fn ci8_row_indexed_copies_indices() {
    let image = ci_image(&[5, 6, 7, 8, 9, 10], &[]);
    let texture = row_texture(TextureFormat::Ci, TexelSize::Bits8, 6)
        .with_tlut(64, TlutFormat::Rgba16);
    let (px, _) = decode(&image, texture, DestFormat::Ci8);
    assert_eq!(px, [5, 6, 7, 8, 9, 10]);
}

#[test]
fn ci8_ia16_palette() {
    let image = ci_image(&[0, 1], &[0x8040, 0xFF00]);
    let texture = row_texture(TextureFormat::Ci, TexelSize::Bits8, 2)
        .with_tlut(64, TlutFormat::Ia16);
    assert_eq!(
        decode_8888(&image, texture),
        [0x80, 0x80, 0x80, 0x40, 0xFF, 0xFF, 0xFF, 0x00]
    );
}

#[test]
fn ci8_index_one_reads_slot_zero() {
    // Physical layout, no load_big_endian: texel byte 0 sits at offset 3,
    // halfword slot 0 of the palette at 8.
    let mut mem = vec![0u8; 8 + CI8_ENTRIES * 2];
    mem[3] = 0x01;
    mem[8..10].copy_from_slice(&0xF801u16.to_le_bytes());
    let texture = SourceTexture::new(TextureFormat::Ci, TexelSize::Bits8, 0, 1, 1, 8)
        .with_tlut(8, TlutFormat::Rgba16);
    let mut pixels = [0u8; 4];
    let mut dest = DestSurface::new(&mut pixels, 4, DestFormat::Rgba8888);
    assert!(convert(&Rdram::new(&mem), &texture, &mut dest));
    assert_eq!(pixels, [0xFF, 0, 0, 0xFF]);
}

// --- Palettes ---

#[test]
fn convert_palette_overwrites_requested_entries() {
    let mem = console(&ci_image(&[], &[0xF801, 0x07C1, 0x003F]));
    let mut out = [0xEEu8; 4 * 4];
    palette::convert_palette(&Rdram::new(&mem), 64, TlutFormat::Rgba16, 3, &mut out);
    assert_eq!(out[..12], [0xFF, 0, 0, 0xFF, 0, 0xFF, 0, 0xFF, 0, 0, 0xFF, 0xFF]);
    assert_eq!(out[12..], [0xEE; 4]);
}

#[test]
fn palette_load_leaves_unread_entries_black() {
    let mem = console(&ci_image(&[], &[0xFFFF; 16]));
    let pal = Palette::load(&Rdram::new(&mem), 64, TlutFormat::Rgba16, CI4_ENTRIES);
    assert_eq!(pal.get(15), Pf8888::from_channels(0xFF, 0xFF, 0xFF, 0xFF));
    assert_eq!(pal.get(16), Pf8888(0));
}

// --- Odd widths never write past the row ---

#[test]
fn odd_width_nibble_rows_stay_in_bounds() {
    let mem = console(&[0x1F, 0x80]);
    let rdram = Rdram::new(&mem);
    for width in [1, 3] {
        for format in [TextureFormat::I, TextureFormat::Ia] {
            let texture = SourceTexture::new(format, TexelSize::Bits4, 0, width, 1, 8);
            let mut pixels = vec![0xEEu8; width * 4 + 4];
            let mut dest = DestSurface::new(&mut pixels, width * 4, DestFormat::Rgba8888);
            convert_texture(&rdram, &texture, &mut dest).unwrap();
            assert_eq!(pixels[width * 4..], [0xEE; 4], "{format:?} width={width}");
        }
    }

    let texture = SourceTexture::new(TextureFormat::I, TexelSize::Bits4, 0, 3, 1, 8);
    let mut pixels = [0u8; 12];
    let mut dest = DestSurface::new(&mut pixels, 12, DestFormat::Rgba8888);
    convert_texture(&rdram, &texture, &mut dest).unwrap();
    assert_eq!(
        pixels,
        [0x11, 0x11, 0x11, 0x11, 0xFF, 0xFF, 0xFF, 0xFF, 0x88, 0x88, 0x88, 0x88]
    );
}

#[test]
fn odd_width_ci4_indexed() {
    let mem = console(&ci_image(&[0x12, 0x30], &[]));
    let texture = SourceTexture::new(TextureFormat::Ci, TexelSize::Bits4, 0, 3, 1, 8)
        .with_tlut(64, TlutFormat::Rgba16);
    let mut pixels = [0xEEu8; 3];
    let mut pal = [0u8; CI8_ENTRIES * 4];
    let mut dest = DestSurface::new(&mut pixels, 2, DestFormat::Ci4).with_palette(&mut pal);
    convert_texture(&Rdram::new(&mem), &texture, &mut dest).unwrap();
    assert_eq!(pixels, [0x21, 0x03, 0xEE]);
}

// --- Swapped rows ---

/// Decoding the RDP's swapped layout must give the same pixels as decoding
/// the logical layout unswapped.
fn check_swapped(texture: SourceTexture, pitch: usize, image_len: usize) {
    let logical = pattern(image_len);
    let mut stored = swap_odd_rows(&logical[..pitch * texture.height], pitch);
    stored.extend_from_slice(&logical[pitch * texture.height..]);

    let swapped = texture.with_swapped(true);
    let format = DestFormat::Rgba8888;
    let row = swapped.dest_row_bytes(format);
    let expected = decode(&logical, texture, format).0;
    let expected: Vec<u8> = expected
        .chunks_exact(texture.dest_row_bytes(format))
        .flat_map(|r| {
            let mut r = r.to_vec();
            r.resize(row, 0);
            r
        })
        .collect();
    let (got, _) = decode(&stored, swapped, format);
    for y in 0..texture.height {
        let w = texture.width * 4;
        assert_eq!(
            got[y * row..][..w],
            expected[y * row..][..w],
            "{:?} {:?} row {y}",
            texture.format,
            texture.size
        );
    }

    let (unfixed, _) = decode(&stored, texture, format);
    let w = texture.dest_row_bytes(format);
    assert_eq!(unfixed[..w], expected[..w]);
    assert_ne!(unfixed[w..2 * w], expected[row..row + w]);
}

#[test]
fn swapped_rows_rgba16() {
    let texture = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, 4, 4, 8);
    check_swapped(texture, 8, 32);
}

#[test]
fn swapped_rows_ia16() {
    let texture = SourceTexture::new(TextureFormat::Ia, TexelSize::Bits16, 0, 8, 4, 16);
    check_swapped(texture, 16, 64);
}

#[test]
fn swapped_rows_ia8_and_i8() {
    for format in [TextureFormat::Ia, TextureFormat::I] {
        check_swapped(SourceTexture::new(format, TexelSize::Bits8, 0, 16, 4, 16), 16, 64);
    }
}

#[test]
fn swapped_rows_nibbles() {
    for format in [TextureFormat::Ia, TextureFormat::I] {
        check_swapped(SourceTexture::new(format, TexelSize::Bits4, 0, 16, 4, 8), 8, 32);
    }
}

#[test]
fn swapped_rows_ci() {
    let tlut = 64;
    check_swapped(
        SourceTexture::new(TextureFormat::Ci, TexelSize::Bits4, 0, 16, 4, 8)
            .with_tlut(tlut, TlutFormat::Rgba16),
        8,
        tlut + CI4_ENTRIES * 2,
    );
    check_swapped(
        SourceTexture::new(TextureFormat::Ci, TexelSize::Bits8, 0, 16, 4, 16)
            .with_tlut(tlut, TlutFormat::Ia16),
        16,
        tlut + CI8_ENTRIES * 2,
    );
}

#[test]
fn swapped_rows_pad_width() {
    let rgba16 = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, 3, 2, 8);
    assert_eq!(rgba16.padded_width(), 3);
    assert_eq!(rgba16.with_swapped(true).padded_width(), 4);
    let i8 = SourceTexture::new(TextureFormat::I, TexelSize::Bits8, 0, 5, 2, 16);
    assert_eq!(i8.with_swapped(true).padded_width(), 16);
    assert_eq!(i8.with_swapped(true).dest_row_bytes(DestFormat::Rgb565), 32);
    let i4 = SourceTexture::new(TextureFormat::I, TexelSize::Bits4, 0, 5, 2, 8);
    assert_eq!(i4.with_swapped(true).padded_width(), 5);
}

#[test]
fn swapped_height_one_matches_unswapped() {
    let image = pattern(8);
    let texture = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, 4, 1, 8);
    assert_eq!(
        decode_8888(&image, texture),
        decode_8888(&image, texture.with_swapped(true))
    );
}

// --- Dispatch table ---

#[test]
fn routine_table() {
    use TexelSize::*;
    use TextureFormat::*;
    for (format, size) in [
        (Rgba, Bits16),
        (Rgba, Bits32),
        (Ci, Bits4),
        (Ci, Bits8),
        (Ia, Bits4),
        (Ia, Bits8),
        (Ia, Bits16),
        (I, Bits4),
        (I, Bits8),
    ] {
        assert!(routine(format, size).is_some(), "{format:?} {size:?}");
    }
    for size in [Bits4, Bits8, Bits16, Bits32] {
        assert!(routine(Yuv, size).is_none());
    }
    assert!(routine(Rgba, Bits4).is_none());
    assert!(routine(I, Bits32).is_none());
    assert!(routine_for_raw(0, 2).is_some());
    assert!(routine_for_raw(1, 1).is_none());
    assert!(routine_for_raw(5, 0).is_none());
    assert!(routine_for_raw(0, 4).is_none());
}

#[test]
fn raw_codes() {
    assert_eq!(TextureFormat::from_raw(4), Some(TextureFormat::I));
    assert_eq!(TexelSize::from_raw(3), Some(TexelSize::Bits32));
    assert_eq!(TlutFormat::from_raw(3), Some(TlutFormat::Ia16));
    assert_eq!(TlutFormat::from_raw(0), None);
    assert_eq!(TexelSize::Bits4.row_bytes(3), 2);
}

// --- Failures ---

fn try_convert(
    mem: &[u8],
    texture: SourceTexture,
    dest: &mut DestSurface<'_>,
) -> Result<(), ConvertError> {
    convert_texture(&Rdram::new(mem), &texture, dest)
}

#[test]
fn yuv_is_unsupported() {
    let mem = [0u8; 64];
    let mut pixels = [0u8; 64];
    for size in [TexelSize::Bits4, TexelSize::Bits8, TexelSize::Bits16, TexelSize::Bits32] {
        let texture = SourceTexture::new(TextureFormat::Yuv, size, 0, 2, 2, 8);
        let mut dest = DestSurface::new(&mut pixels, 8, DestFormat::Rgba8888);
        assert!(!convert(&Rdram::new(&mem), &texture, &mut dest));
        let err = try_convert(&mem, texture, &mut dest).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedFormat {
                format: TextureFormat::Yuv,
                size
            }
        );
        assert!(err.is_unsupported());
    }
}

#[test]
fn mismatched_destinations_are_unsupported() {
    let mem = [0u8; 1024];
    let mut pixels = [0u8; 64];
    let ci4 = SourceTexture::new(TextureFormat::Ci, TexelSize::Bits4, 0, 2, 2, 8);
    let mut dest = DestSurface::new(&mut pixels, 8, DestFormat::Rgb565);
    assert!(!convert(&Rdram::new(&mem), &ci4, &mut dest));
    assert_eq!(
        try_convert(&mem, ci4, &mut dest),
        Err(ConvertError::UnsupportedDestination {
            format: TextureFormat::Ci,
            size: TexelSize::Bits4,
            dest: DestFormat::Rgb565,
        })
    );

    let rgba16 = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, 2, 2, 8);
    let mut dest = DestSurface::new(&mut pixels, 8, DestFormat::Ci8);
    assert!(try_convert(&mem, rgba16, &mut dest).unwrap_err().is_unsupported());
}

#[test]
fn validation_errors() {
    let mem = [0u8; 16];
    let mut pixels = [0u8; 64];

    let empty = SourceTexture::new(TextureFormat::I, TexelSize::Bits8, 0, 0, 4, 8);
    let mut dest = DestSurface::new(&mut pixels, 16, DestFormat::Rgba8888);
    assert_eq!(try_convert(&mem, empty, &mut dest), Err(ConvertError::InvalidDimensions));

    let long = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, 4, 3, 8);
    assert_eq!(try_convert(&mem, long, &mut dest), Err(ConvertError::SourceOutOfBounds));

    let wide = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 8, 4, 1, 8);
    assert_eq!(try_convert(&mem, wide, &mut dest), Ok(()));
    let mut dest = DestSurface::new(&mut pixels, 8, DestFormat::Rgba8888);
    assert_eq!(try_convert(&mem, wide, &mut dest), Err(ConvertError::DestinationTooSmall));
    let mut short = [0u8; 15];
    let mut dest = DestSurface::new(&mut short, 16, DestFormat::Rgba8888);
    assert_eq!(try_convert(&mem, wide, &mut dest), Err(ConvertError::DestinationTooSmall));
}

#[test]
fn palette_errors() {
    let mem = [0u8; 64];
    let mut pixels = [0u8; 16];
    let ci8 = SourceTexture::new(TextureFormat::Ci, TexelSize::Bits8, 0, 4, 1, 8)
        .with_tlut(8, TlutFormat::Rgba16);
    let mut dest = DestSurface::new(&mut pixels, 16, DestFormat::Rgba8888);
    assert_eq!(try_convert(&mem, ci8, &mut dest), Err(ConvertError::PaletteOutOfBounds));

    let mem = [0u8; 8 + CI8_ENTRIES * 2];
    let mut dest = DestSurface::new(&mut pixels, 4, DestFormat::Ci8);
    assert_eq!(try_convert(&mem, ci8, &mut dest), Err(ConvertError::PaletteTooSmall));
    let mut pal = [0u8; 100];
    let mut dest = DestSurface::new(&mut pixels, 4, DestFormat::Ci8).with_palette(&mut pal);
    assert_eq!(try_convert(&mem, ci8, &mut dest), Err(ConvertError::PaletteTooSmall));
}

#[test]
#[should_panic(expected = "not aligned")]
fn misaligned_rgba16_row_panics() {
    let mem = [0u8; 16];
    let texture = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 1, 2, 1, 8);
    let mut pixels = [0u8; 8];
    let mut dest = DestSurface::new(&mut pixels, 8, DestFormat::Rgba8888);
    let _ = try_convert(&mem, texture, &mut dest);
}

#[test]
fn error_messages() {
    use alloc::string::ToString;
    assert_eq!(
        ConvertError::PaletteTooSmall.to_string(),
        "palette buffer holds fewer than 256 entries"
    );
}

#[test]
fn overflowing_descriptors_are_rejected() {
    let mem = [0u8; 64];
    let mut pixels = [0u8; 64];

    let top = SourceTexture::new(TextureFormat::I, TexelSize::Bits8, usize::MAX - 3, 1, 1, 8);
    let mut dest = DestSurface::new(&mut pixels, 16, DestFormat::Rgba8888);
    assert!(!convert(&Rdram::new(&mem), &top, &mut dest));
    assert_eq!(try_convert(&mem, top, &mut dest), Err(ConvertError::SourceOutOfBounds));

    let wide = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits32, 0, usize::MAX / 8, 1, 8);
    assert!(!convert(&Rdram::new(&mem), &wide, &mut dest));
    assert_eq!(try_convert(&mem, wide, &mut dest), Err(ConvertError::SourceOutOfBounds));

    let ci8 = SourceTexture::new(TextureFormat::Ci, TexelSize::Bits8, 0, 4, 1, 8)
        .with_tlut(usize::MAX - 1, TlutFormat::Rgba16);
    assert_eq!(try_convert(&mem, ci8, &mut dest), Err(ConvertError::PaletteOutOfBounds));
}

#[test]
fn row_sizes_saturate() {
    assert_eq!(TexelSize::Bits32.row_bytes(usize::MAX / 8), usize::MAX);
    assert_eq!(DestFormat::Rgba8888.row_bytes(usize::MAX / 2), usize::MAX);
    let swapped = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, usize::MAX, 2, 8)
        .with_swapped(true);
    assert_eq!(swapped.padded_width(), usize::MAX);
    assert_eq!(swapped.dest_row_bytes(DestFormat::Rgb565), usize::MAX);
}

#[test]
fn huge_pitch_on_last_row() {
    let mem = console(&[0x42]);
    let texture = SourceTexture::new(TextureFormat::I, TexelSize::Bits8, 0, 1, 1, usize::MAX);
    let mut pixels = [0u8; 4];
    let mut dest = DestSurface::new(&mut pixels, 4, DestFormat::Rgba8888);
    assert_eq!(try_convert(&mem, texture, &mut dest), Ok(()));
    assert_eq!(pixels, [0x42; 4]);
}

#[test]
fn tlut_checks_cover_pair_slots_and_alignment() {
    let mem = [0u8; 8];
    let rdram = Rdram::new(&mem);
    assert_eq!(palette::check_tlut(&rdram, 0, 3), Ok(()));
    assert_eq!(
        palette::check_tlut(&rdram, 2, 3),
        Err(ConvertError::PaletteOutOfBounds)
    );
    assert_eq!(
        palette::check_tlut(&rdram, 1, 2),
        Err(ConvertError::MisalignedPalette)
    );

    let mem = [0u8; 8 + CI8_ENTRIES * 2];
    let ci4 = SourceTexture::new(TextureFormat::Ci, TexelSize::Bits4, 0, 2, 1, 8)
        .with_tlut(9, TlutFormat::Rgba16);
    let mut pixels = [0u8; 8];
    let mut dest = DestSurface::new(&mut pixels, 8, DestFormat::Rgba8888);
    assert_eq!(try_convert(&mem, ci4, &mut dest), Err(ConvertError::MisalignedPalette));
}

#[cfg(feature = "rgb")]
#[test]
fn typed_palette_odd_count() {
    use rgb::Rgba;

    let mem = [0u8; 8];
    let rdram = Rdram::new(&mem);
    let mut out = [Rgba::new(9, 9, 9, 9); 3];
    assert_eq!(
        typed_rgb::palette_rgba(&rdram, 2, TlutFormat::Rgba16, &mut out),
        Err(ConvertError::PaletteOutOfBounds)
    );
    assert_eq!(
        typed_rgb::palette_rgba(&rdram, 1, TlutFormat::Rgba16, &mut out[..2]),
        Err(ConvertError::MisalignedPalette)
    );
    typed_rgb::palette_rgba(&rdram, 0, TlutFormat::Rgba16, &mut out).unwrap();
    assert_eq!(out, [Rgba::new(0, 0, 0, 0); 3]);
}

#[test]
fn swapped_rgba32_rows_swizzle_by_two() {
    let image = pattern(32);
    let texture = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits32, 0, 3, 2, 16)
        .with_swapped(true);
    assert_eq!(texture.padded_width(), 4);
    assert_eq!(texture.dest_row_bytes(DestFormat::Rgba8888), 16);

    let px = decode_8888(&image, texture);
    let texel = |y: usize, x: usize| &image[y * 16 + x * 4..][..4];
    assert_eq!(px[..12], image[..12]);
    assert_eq!(px[12..16], [0; 4]);
    for x in 0..4 {
        assert_eq!(&px[16 + x * 4..][..4], texel(1, x ^ 2), "column {x}");
    }
}
