use bytemuck::{Pod, Zeroable};

pub use filters::*;

use crate::image_view::{ImageView, ImageViewMut};
use crate::resizer::EdgeMode;
use crate::{CoefficientsError, FilterArena, ResizeError};

mod filters;
mod horizontal;
mod vertical;

/// Inclusive range of source texels contributing to one output texel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Contributor {
    /// First contributing source texel
    pub n0: u32,
    /// Last contributing source texel
    pub n1: u32,
}

impl Contributor {
    /// Number of contributing source texels.
    #[inline(always)]
    pub fn count(&self) -> usize {
        (self.n1 - self.n0) as usize + 1
    }
}

/// Contributors and coefficients of one axis, placed inside of an arena.
///
/// Coefficients are stored as a table with fixed row width equal to
/// `kernel_texel_width`. Every row is left-aligned, unused tail of a row
/// stays zeroed.
#[derive(Debug)]
pub struct AxisFilters<'a> {
    pub(crate) in_size: u32,
    pub(crate) kernel_texel_width: usize,
    pub(crate) contributors: &'a mut [Contributor],
    pub(crate) coefficients: &'a mut [f32],
}

impl<'a> AxisFilters<'a> {
    /// Size of the source image along the axis.
    #[inline]
    pub fn in_size(&self) -> u32 {
        self.in_size
    }

    /// Size of the destination image along the axis.
    #[inline]
    pub fn out_size(&self) -> u32 {
        self.contributors.len() as u32
    }

    /// Maximum number of source texels that can contribute to
    /// one output texel.
    #[inline]
    pub fn kernel_texel_width(&self) -> usize {
        self.kernel_texel_width
    }

    #[inline]
    pub fn contributors(&self) -> &[Contributor] {
        self.contributors
    }

    /// Returns contributors of the output texel and its normalized weights.
    #[inline]
    pub fn get(&self, index: usize) -> (Contributor, &[f32]) {
        let contributor = self.contributors[index];
        let start = index * self.kernel_texel_width;
        (
            contributor,
            &self.coefficients[start..start + contributor.count()],
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (Contributor, &[f32])> + '_ {
        self.contributors
            .iter()
            .zip(self.coefficients.chunks_exact(self.kernel_texel_width))
            .map(|(&contributor, row)| (contributor, &row[..contributor.count()]))
    }
}

/// Returns the maximum number of source texels that can affect
/// an output texel with the given filter.
///
/// Only upsampling (and identity) is defined, so the filter is never
/// stretched over more than `2 * support` source texels.
#[inline]
pub(crate) fn kernel_texel_width(filter: &FilterInfo) -> usize {
    (filter.support * 2.0).ceil() as usize
}

/// Fills contributors and coefficients of the axis.
///
/// Every scanline uses the same weights, so they are calculated once
/// per axis.
pub(crate) fn calculate_filters(
    filters: &mut AxisFilters,
    filter: &FilterInfo,
) -> Result<(), ResizeError> {
    let in_size = filters.in_size;
    let out_size = filters.out_size();
    if out_size < in_size {
        return Err(ResizeError::Downsampling);
    }
    let kernel_texel_width = filters.kernel_texel_width;

    // The influence radius of the filter in output texels is
    // `support * out_size / in_size`, so after back-mapping into
    // the source space it becomes `support` again.
    let in_size_f = in_size as f64;
    let out_size_f = out_size as f64;

    let rows = filters
        .contributors
        .iter_mut()
        .zip(filters.coefficients.chunks_exact_mut(kernel_texel_width));
    for (out_x, (contributor, row)) in (0..out_size).zip(rows) {
        // Center of the output texel mapped into the source space.
        let in_center = (out_x as f64 + 0.5) * in_size_f / out_size_f;
        let in_lower_bound = in_center - filter.support;
        let in_upper_bound = in_center + filter.support;

        // A boundary lying exactly between two texel centers belongs
        // to the right texel for the first contributor and to the left
        // texel for the last one.
        let n0 = (in_lower_bound + 0.5).floor() as i64;
        let n1 = (in_upper_bound - 0.5).floor() as i64;

        if n0 < 0 || n1 < n0 || n1 >= in_size as i64 {
            return Err(CoefficientsError::ContributorOutOfBounds {
                index: out_x,
                n0,
                n1,
            }
            .into());
        }
        let count = (n1 - n0 + 1) as usize;
        if count > kernel_texel_width {
            return Err(CoefficientsError::KernelTooWide {
                index: out_x,
                count,
                kernel_texel_width,
            }
            .into());
        }

        let mut total_weight = 0.0;
        for (x, w) in (n0..=n1).zip(row.iter_mut()) {
            let in_texel_center = x as f64 + 0.5;
            let weight = (filter.kernel)(in_center - in_texel_center);
            *w = weight as f32;
            total_weight += weight;
        }

        if total_weight <= 0.0 || total_weight.is_nan() {
            return Err(CoefficientsError::NonPositiveWeightSum { index: out_x }.into());
        }
        if (1.0 - total_weight).abs() >= 0.1 {
            return Err(CoefficientsError::WeightSumOutOfTolerance {
                index: out_x,
                sum: total_weight,
            }
            .into());
        }

        // The sum of weights must be equal to 1.0.
        let filter_scale = (1.0 / total_weight) as f32;
        row[..count].iter_mut().for_each(|w| *w *= filter_scale);

        *contributor = Contributor {
            n0: n0 as u32,
            n1: n1 as u32,
        };
    }
    Ok(())
}

/// Resamples the source image into the destination image with
/// weights precalculated inside of the arena.
///
/// Rows of the destination image are produced one by one: each
/// contributing source row is decoded and resampled horizontally, then
/// accumulated with its vertical weight.
pub(crate) fn resample(
    src_image: &ImageView,
    dst_image: &mut ImageViewMut,
    arena: &mut FilterArena,
    edge: EdgeMode,
) {
    let channels = src_image.layout().channels();
    let src_height = src_image.height().get() as usize;
    let FilterArena {
        horizontal,
        vertical,
        buffers,
        ..
    } = arena;

    // Source row which is currently stored in the scanline buffer
    let mut cached_row: Option<usize> = None;

    for (y, dst_row) in dst_image.iter_rows_mut().enumerate() {
        let (contributor, weights) = vertical.get(y);
        buffers.accumulator.fill(0.);
        for (i, &weight) in weights.iter().enumerate() {
            let src_y = edge.clamp_index(contributor.n0 as usize + i, src_height);
            if cached_row != Some(src_y) {
                horizontal::decode_row(src_image.row(src_y), buffers.decode);
                horizontal::horiz_convolution(
                    buffers.decode,
                    buffers.scanline,
                    horizontal,
                    channels,
                    edge,
                );
                cached_row = Some(src_y);
            }
            vertical::accumulate(buffers.accumulator, buffers.scanline, weight);
        }
        vertical::encode_row(buffers.accumulator, dst_row);
    }
}
