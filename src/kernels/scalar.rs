use archmage::prelude::*;

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn reverse_word_bytes_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[3];
        d[1] = s[2];
        d[2] = s[1];
        d[3] = s[0];
    }
}

pub(super) fn expand_gray_words_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(16)) {
        for (k, px) in d.chunks_exact_mut(4).enumerate() {
            px.fill(s[k ^ 3]);
        }
    }
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn reverse_word_bytes_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    reverse_word_bytes_row_scalar(t, s, d);
}
pub(super) fn expand_gray_words_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    expand_gray_words_row_scalar(t, s, d);
}
