use thiserror::Error;

use crate::convolution::FilterType;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer is smaller than required")]
    InvalidBufferSize,
    #[error("Stride is smaller than size of row")]
    InvalidStride,
    #[error("Count of channels must be greater than zero")]
    InvalidChannelsCount,
    #[error("Only images with 8-bit components are supported")]
    UnsupportedComponentType,
    #[error("Size of image buffer doesn't fit into usize")]
    ImageTooLarge,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown identifier of filter: {0}")]
    InvalidFilter(i32),
    #[error("Filter {0:?} doesn't have a kernel function")]
    UnsupportedFilter(FilterType),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown or unsupported identifier of sample type: {0}")]
pub struct UnsupportedSampleTypeError(pub i32);

/// Violations of invariants of the coefficients calculator.
///
/// These errors point to a misconfigured filter (wrong support or kernel)
/// rather than to invalid arguments of a caller.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoefficientsError {
    #[error("Contributors [{n0}, {n1}] of output texel {index} are out of the source boundaries")]
    ContributorOutOfBounds { index: u32, n0: i64, n1: i64 },
    #[error("Output texel {index} has {count} contributors, but kernel width is {kernel_texel_width}")]
    KernelTooWide {
        index: u32,
        count: usize,
        kernel_texel_width: usize,
    },
    #[error("Sum of weights of output texel {index} is not positive")]
    NonPositiveWeightSum { index: u32 },
    #[error("Sum of weights of output texel {index} is too far from 1.0: {sum}")]
    WeightSumOutOfTolerance { index: u32, sum: f64 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ResizeError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("sRGB colorspace is not supported")]
    UnsupportedColorSpace,
    #[error("Count of channels of the source image is not equal to count of channels of the destination image")]
    DifferentChannelsCount,
    #[error("Size of the destination image is smaller than size of the source image")]
    Downsampling,
    #[error("Buffer for temporary data is absent")]
    MissingArena,
    #[error("Size of buffer for temporary data is {actual} bytes, but {required} bytes are required")]
    ArenaTooSmall { required: usize, actual: usize },
    #[error("Size of buffer for temporary data doesn't fit into usize")]
    ArenaSizeOverflow,
    #[error("Partition of buffer for temporary data doesn't match to the planned layout")]
    ArenaLayoutMismatch,
    #[error(transparent)]
    Coefficients(#[from] CoefficientsError),
}
