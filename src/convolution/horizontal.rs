use super::AxisFilters;
use crate::resizer::EdgeMode;

/// Expands components of a source row into the decode buffer.
#[inline(always)]
pub(crate) fn decode_row(src_row: &[u8], decode_buffer: &mut [f32]) {
    debug_assert_eq!(src_row.len(), decode_buffer.len());
    for (dst, &src) in decode_buffer.iter_mut().zip(src_row) {
        *dst = src as f32;
    }
}

#[inline(always)]
pub(crate) fn horiz_convolution(
    decoded_row: &[f32],
    dst_row: &mut [f32],
    filters: &AxisFilters,
    channels: usize,
    edge: EdgeMode,
) {
    let src_width = decoded_row.len() / channels;
    debug_assert_eq!(src_width, filters.in_size() as usize);
    debug_assert_eq!(dst_row.len(), filters.out_size() as usize * channels);

    for ((contributor, ks), dst_texel) in filters.iter().zip(dst_row.chunks_exact_mut(channels)) {
        dst_texel.fill(0.);
        for (i, &k) in ks.iter().enumerate() {
            let x = edge.clamp_index(contributor.n0 as usize + i, src_width) * channels;
            let src_texel = &decoded_row[x..x + channels];
            for (d, &s) in dst_texel.iter_mut().zip(src_texel) {
                *d += s * k;
            }
        }
    }
}
