use std::num::NonZeroU32;

use arena_resize as ar;

pub fn nonzero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap()
}

pub fn layout(width: u32, height: u32, channels: u8) -> ar::ImageLayout {
    ar::ImageLayout::new(nonzero(width), nonzero(height), channels).unwrap()
}

/// Image where every component has unique value (modulo 256).
pub fn gradient_image(layout: &ar::ImageLayout) -> Vec<u8> {
    let mut buffer = vec![0u8; layout.buffer_size()];
    for y in 0..layout.height().get() as usize {
        let start = y * layout.stride();
        let row = &mut buffer[start..start + layout.row_size()];
        for (i, v) in row.iter_mut().enumerate() {
            *v = (y * 31 + i * 7) as u8;
        }
    }
    buffer
}

/// Index of the source texel nearest to the center of the output texel.
pub fn nearest_src_index(dst_index: usize, src_size: u32, dst_size: u32) -> usize {
    (2 * dst_index + 1) * src_size as usize / (2 * dst_size as usize)
}

/// Allocates an arena with exactly required size.
pub fn arena_for(
    src_layout: &ar::ImageLayout,
    dst_layout: &ar::ImageLayout,
    options: &ar::ResizeOptions,
) -> Vec<u8> {
    let size = ar::calculate_memory(src_layout, dst_layout, options).unwrap();
    vec![0u8; size]
}
