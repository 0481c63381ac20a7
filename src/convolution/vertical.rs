/// Adds the horizontally resampled scanline with given weight
/// to the accumulated values of an output row.
#[inline(always)]
pub(crate) fn accumulate(accumulator: &mut [f32], scanline: &[f32], weight: f32) {
    debug_assert_eq!(accumulator.len(), scanline.len());
    for (acc, &s) in accumulator.iter_mut().zip(scanline) {
        *acc += s * weight;
    }
}

/// Converts accumulated values into components of an output row.
#[inline(always)]
pub(crate) fn encode_row(accumulator: &[f32], dst_row: &mut [u8]) {
    debug_assert_eq!(accumulator.len(), dst_row.len());
    for (dst, &v) in dst_row.iter_mut().zip(accumulator) {
        *dst = num_traits::clamp(v.round(), 0., u8::MAX as f32) as u8;
    }
}
