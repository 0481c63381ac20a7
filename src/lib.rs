#![doc = include_str!("../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use arena::{ArenaHeader, FilterArena, Region};
pub use convolution::{AxisFilters, Contributor, FilterFn, FilterInfo, FilterType};
pub use errors::*;
pub use image_view::{ImageLayout, ImageView, ImageViewMut};
pub use pixels::SampleType;
pub use resizer::{
    calculate_memory, precompute_filters, resize, ColorSpace, EdgeMode, ResizeOptions,
};

#[macro_use]
mod utils;

mod arena;
mod convolution;
mod errors;
#[cfg(feature = "image")]
mod image_crate;
mod image_view;
pub mod pixels;
mod resizer;
#[cfg(feature = "for_testing")]
pub mod testing;
