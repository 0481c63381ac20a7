use crate::FilterError;

pub type FilterFn = fn(f64) -> f64;

/// Kernel function of a filter and its support.
#[derive(Clone, Copy, Debug)]
pub struct FilterInfo {
    /// Weight of a source texel as a function of the signed distance
    /// (in source texels) between its center and the back-mapped center
    /// of an output texel.
    pub kernel: FilterFn,
    /// Half-width of the kernel in source texels. The kernel is zero
    /// outside `[-support, support]`.
    pub support: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterType {
    /// Each output texel takes the value of the nearest source texel.
    /// It is a box filter with support 0.5.
    Nearest,
    /// Declared for compatibility of identifiers. It doesn't have
    /// a kernel yet, so resizing with this filter returns an error.
    Bilinear,
}

impl Default for FilterType {
    fn default() -> Self {
        FilterType::Nearest
    }
}

impl FilterType {
    /// Returns the kernel function and the support of the filter.
    #[inline]
    pub fn info(self) -> Result<FilterInfo, FilterError> {
        match self {
            FilterType::Nearest => Ok(FilterInfo {
                kernel: nearest_filter,
                support: 0.5,
            }),
            FilterType::Bilinear => Err(FilterError::UnsupportedFilter(self)),
        }
    }

    /// Numeric identifier of the filter.
    pub fn id(self) -> i32 {
        match self {
            FilterType::Nearest => 1,
            FilterType::Bilinear => 2,
        }
    }
}

impl TryFrom<i32> for FilterType {
    type Error = FilterError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(FilterType::Nearest),
            2 => Ok(FilterType::Bilinear),
            _ => Err(FilterError::InvalidFilter(id)),
        }
    }
}

/// Box filter. The lower edge is closed so that a back-mapped center
/// lying exactly between two source texels gets the weight from the texel
/// selected by rounding of the first contributor.
#[inline]
fn nearest_filter(x: f64) -> f64 {
    if (-0.5..0.5).contains(&x) {
        1.0
    } else {
        0.0
    }
}
