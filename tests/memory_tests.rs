use arena_resize as ar;
use itertools::iproduct;
use utils::{arena_for, layout};

mod utils;

#[test]
fn calculate_memory_is_pure() {
    let options = ar::ResizeOptions::new();
    let src_layout = layout(13, 7, 3);
    let dst_layout = layout(40, 9, 3);
    let first = ar::calculate_memory(&src_layout, &dst_layout, &options).unwrap();
    let second = ar::calculate_memory(&src_layout, &dst_layout, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn calculate_memory_grows_with_output_width() {
    let options = ar::ResizeOptions::new();
    for channels in 1..=4u8 {
        let src_layout = layout(10, 4, channels);
        let mut prev_size = 0;
        for dst_width in 10..100 {
            let dst_layout = layout(dst_width, 6, channels);
            let size = ar::calculate_memory(&src_layout, &dst_layout, &options).unwrap();
            assert!(size >= prev_size, "dst_width={dst_width}");
            prev_size = size;
        }
    }
}

#[test]
fn calculate_memory_ignores_strides() {
    let options = ar::ResizeOptions::new();
    let src_layout = layout(5, 5, 2);
    let dst_layout = layout(8, 6, 2);
    let size = ar::calculate_memory(&src_layout, &dst_layout, &options).unwrap();
    let padded_size = ar::calculate_memory(
        &src_layout.with_stride(64).unwrap(),
        &dst_layout.with_stride(100).unwrap(),
        &options,
    )
    .unwrap();
    assert_eq!(size, padded_size);
}

#[test]
fn calculated_memory_is_enough() {
    let options = ar::ResizeOptions::new();
    let sizes = [(1, 1), (1, 3), (3, 1), (4, 4), (7, 3)];
    for ((src_w, src_h), channels, (add_w, add_h)) in
        iproduct!(sizes, 1..=4u8, [(0, 0), (1, 0), (0, 2), (5, 9)])
    {
        let src_layout = layout(src_w, src_h, channels);
        let dst_layout = layout(src_w + add_w, src_h + add_h, channels);
        let src_buffer = utils::gradient_image(&src_layout);
        let src_image = ar::ImageView::from_buffer(src_layout, &src_buffer).unwrap();
        let mut dst_buffer = vec![0u8; dst_layout.buffer_size()];
        let mut dst_image = ar::ImageViewMut::from_buffer(dst_layout, &mut dst_buffer).unwrap();

        let mut arena = arena_for(&src_layout, &dst_layout, &options);
        assert_eq!(
            ar::resize(&src_image, &mut dst_image, &options, &mut arena),
            Ok(())
        );
    }
}

#[test]
fn calculate_memory_rejects_invalid_arguments() {
    let options = ar::ResizeOptions::new();
    assert_eq!(
        ar::calculate_memory(&layout(8, 8, 1), &layout(7, 8, 1), &options),
        Err(ar::ResizeError::Downsampling)
    );
    assert_eq!(
        ar::calculate_memory(&layout(8, 8, 1), &layout(8, 7, 1), &options),
        Err(ar::ResizeError::Downsampling)
    );
    assert_eq!(
        ar::calculate_memory(&layout(8, 8, 1), &layout(8, 8, 2), &options),
        Err(ar::ResizeError::DifferentChannelsCount)
    );
}

#[test]
fn header_describes_regions() {
    let options = ar::ResizeOptions::new();
    let src_layout = layout(4, 3, 2);
    let dst_layout = layout(8, 5, 2);
    let mut arena = arena_for(&src_layout, &dst_layout, &options);
    let arena_len = arena.len() as u64;
    let filters = ar::precompute_filters(&src_layout, &dst_layout, &options, &mut arena).unwrap();
    let header = filters.header();

    assert_eq!(header.horizontal_kernel_texel_width, 1);
    assert_eq!(header.horizontal_total_coefficients, 8);
    assert_eq!(header.vertical_kernel_texel_width, 1);
    assert_eq!(header.vertical_total_coefficients, 5);

    let regions = [
        header.horizontal_contributors,
        header.horizontal_coefficients,
        header.vertical_contributors,
        header.vertical_coefficients,
        header.decode_buffer,
        header.scanline_buffer,
        header.accumulator,
    ];
    for pair in regions.windows(2) {
        assert_eq!(pair[0].end(), pair[1].offset);
    }
    assert!(regions[regions.len() - 1].end() <= arena_len);
    assert_eq!(header.decode_buffer.len, 4 * 2 * 4);
    assert_eq!(header.accumulator.len, 8 * 2 * 4);
}
