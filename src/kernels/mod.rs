// ---------------------------------------------------------------------------
// Word-order kernels with SIMD dispatch.
//
// Console memory is word-swapped, so the widest hot loops are byte
// reversals within 32-bit words. #[rite] row functions hold the SIMD loops,
// #[arcane] wrappers are the incant! dispatch targets.
// ---------------------------------------------------------------------------

use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;


/// Reverse the bytes of every whole 32-bit word, `src` into `dst`.
///
/// Turns a word-swapped RGBA32 row into 8888 bytes, an 8-bit index row into
/// logical order, and a big-endian image into the word-swapped layout.
/// Processes `min(src.len(), dst.len()) / 4` words.
pub(crate) fn reverse_word_bytes(src: &[u8], dst: &mut [u8]) {
    incant!(reverse_word_bytes_impl(src, dst), [v3, scalar]);
}

/// Expand each word of four word-swapped intensity bytes into four 8888
/// pixels with the intensity in every channel.
///
/// Processes `min(src.len() / 4, dst.len() / 16)` words.
pub(crate) fn expand_gray_words(src: &[u8], dst: &mut [u8]) {
    incant!(expand_gray_words_impl(src, dst), [v3, scalar]);
}
