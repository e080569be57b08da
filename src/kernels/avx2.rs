use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::scalar::{expand_gray_words_row_scalar, reverse_word_bytes_row_scalar};

// ===========================================================================
// SIMD constants
// ===========================================================================

const REVERSE_WORD_SHUF_AVX: [i8; 32] = [
    3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12, 3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15,
    14, 13, 12,
];

// Both lanes hold the same 8 source bytes; the low lane expands word 0 and
// the high lane word 1, reading each word back to front.
const GRAY_WORD_EXPAND_AVX: [i8; 32] = [
    3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, 0, 0, 0, 0, 7, 7, 7, 7, 6, 6, 6, 6, 5, 5, 5, 5, 4, 4, 4, 4,
];

// ===========================================================================
// x86-64 AVX2: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn reverse_word_bytes_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm256_loadu_si256(&REVERSE_WORD_SHUF_AVX);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 32 <= n {
        let s: &[u8; 32] = src[i..i + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let reversed = _mm256_shuffle_epi8(v, mask);
        let d: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, reversed);
        i += 32;
    }
    reverse_word_bytes_row_scalar(ScalarToken, &src[i..], &mut dst[i..]);
}

#[rite]
pub(super) fn expand_gray_words_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let expand = _mm256_loadu_si256(&GRAY_WORD_EXPAND_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 8 <= slen && id + 32 <= dlen {
        let words = u64::from_le_bytes(src[is..is + 8].try_into().unwrap());
        let grays = _mm256_set1_epi64x(words as i64);
        let expanded = _mm256_shuffle_epi8(grays, expand);
        let d: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, expanded);
        is += 8;
        id += 32;
    }
    expand_gray_words_row_scalar(ScalarToken, &src[is..], &mut dst[id..]);
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn reverse_word_bytes_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    reverse_word_bytes_row_v3(t, s, d);
}
#[arcane]
pub(super) fn expand_gray_words_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    expand_gray_words_row_v3(t, s, d);
}
