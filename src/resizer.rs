use crate::arena::{ArenaPlan, FilterArena};
use crate::convolution::{self, FilterInfo, FilterType};
use crate::image_view::{ImageLayout, ImageView, ImageViewMut};
use crate::pixels::SampleType;
use crate::ResizeError;

/// Handling of source texels outside of image boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum EdgeMode {
    /// Use the nearest texel on the image boundary.
    #[default]
    Clamp,
}

impl EdgeMode {
    #[inline(always)]
    pub(crate) fn clamp_index(self, index: usize, len: usize) -> usize {
        match self {
            Self::Clamp => index.min(len - 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Components are resampled as is.
    #[default]
    Linear,
    /// Declared for compatibility of identifiers. Gamma decoding is not
    /// implemented, so resizing of sRGB images returns an error.
    Srgb,
}

/// Options for configuring a resize process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeOptions {
    /// Default: `FilterType::Nearest`
    pub filter: FilterType,
    /// Default: `SampleType::U8`
    pub sample_type: SampleType,
    /// Default: `EdgeMode::Clamp`
    pub edge: EdgeMode,
    /// Default: `ColorSpace::Linear`
    pub colorspace: ColorSpace,
}

impl ResizeOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set filter used to calculate weights of source texels.
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn sample_type(mut self, sample_type: SampleType) -> Self {
        self.sample_type = sample_type;
        self
    }

    pub fn edge(mut self, edge: EdgeMode) -> Self {
        self.edge = edge;
        self
    }

    pub fn colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    fn filter_info(&self) -> Result<FilterInfo, ResizeError> {
        // Buffers of image views store components as bytes.
        match self.sample_type {
            SampleType::U8 => {}
        }
        if self.colorspace != ColorSpace::Linear {
            return Err(ResizeError::UnsupportedColorSpace);
        }
        Ok(self.filter.info()?)
    }
}

/// Returns the size of memory (in bytes) required by [resize] for images
/// with given layouts.
///
/// Strides don't affect the result, but they are a part of the layouts
/// so that the same values can be passed here and into [resize].
pub fn calculate_memory(
    src_layout: &ImageLayout,
    dst_layout: &ImageLayout,
    options: &ResizeOptions,
) -> Result<usize, ResizeError> {
    let filter = options.filter_info()?;
    let plan = ArenaPlan::new(src_layout, dst_layout, &filter)?;
    Ok(plan.required_bytes())
}

/// Partitions the arena and calculates contributors and coefficients
/// for both axes without touching pixels.
///
/// The returned [FilterArena] borrows the arena, so its content can be
/// inspected.
pub fn precompute_filters<'a>(
    src_layout: &ImageLayout,
    dst_layout: &ImageLayout,
    options: &ResizeOptions,
    arena: &'a mut [u8],
) -> Result<FilterArena<'a>, ResizeError> {
    let filter = options.filter_info()?;
    let plan = ArenaPlan::new(src_layout, dst_layout, &filter)?;
    let mut filters = FilterArena::partition(arena, &plan)?;

    test_log!("compute horizontal coefficients");
    convolution::calculate_filters(&mut filters.horizontal, &filter)?;
    test_log!("compute vertical coefficients");
    convolution::calculate_filters(&mut filters.vertical, &filter)?;
    Ok(filters)
}

/// Resize source image to the size of destination image and save
/// the result to the latter's pixel buffer.
///
/// All temporary data is stored inside of `arena`. Its size must be
/// not less than the value returned by [calculate_memory] for the same
/// images and options.
///
/// Only texels of the destination image are written. Padding bytes
/// at the end of rows stay untouched.
pub fn resize(
    src_image: &ImageView,
    dst_image: &mut ImageViewMut,
    options: &ResizeOptions,
    arena: &mut [u8],
) -> Result<(), ResizeError> {
    #[cfg(debug_assertions)]
    let overwrite_guard = OverwriteGuard::new(dst_image);

    let mut filters =
        precompute_filters(src_image.layout(), dst_image.layout(), options, arena)?;

    if src_image.width() == dst_image.width() && src_image.height() == dst_image.height() {
        test_log!("copy rows without resampling");
        for (dst_row, src_row) in dst_image.iter_rows_mut().zip(src_image.iter_rows()) {
            dst_row.copy_from_slice(src_row);
        }
    } else {
        test_log!("resample rows");
        convolution::resample(src_image, dst_image, &mut filters, options.edge);
    }

    #[cfg(debug_assertions)]
    overwrite_guard.verify(dst_image);
    Ok(())
}

#[cfg(debug_assertions)]
const OVERWRITE_GUARD_SIZE: usize = 64;

/// Copy of bytes which follow the last texel in the buffer of
/// a destination image.
#[cfg(debug_assertions)]
struct OverwriteGuard {
    start: usize,
    len: usize,
    contents: [u8; OVERWRITE_GUARD_SIZE],
}

#[cfg(debug_assertions)]
impl OverwriteGuard {
    fn new(dst_image: &ImageViewMut) -> Self {
        let buffer = dst_image.buffer();
        let start = dst_image.layout().buffer_size();
        let len = buffer.len().saturating_sub(start).min(OVERWRITE_GUARD_SIZE);
        let mut contents = [0; OVERWRITE_GUARD_SIZE];
        contents[..len].copy_from_slice(&buffer[start..start + len]);
        Self {
            start,
            len,
            contents,
        }
    }

    fn verify(&self, dst_image: &ImageViewMut) {
        debug_assert_eq!(
            &self.contents[..self.len],
            &dst_image.buffer()[self.start..self.start + self.len],
            "bytes after the destination image have been overwritten"
        );
    }
}
