use std::mem::{align_of, size_of};

use bytemuck::{Pod, Zeroable};

use crate::convolution::{self, AxisFilters, Contributor, FilterInfo};
use crate::{ImageLayout, ResizeError};

/// Alignment of the working part of an arena.
const ARENA_ALIGN: usize = align_of::<ArenaHeader>();

/// Position of a region inside of an arena, in bytes.
/// Offsets are counted from the aligned start of the arena.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Region {
    pub offset: u64,
    pub len: u64,
}

impl Region {
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }
}

/// Header placed at the start of an arena.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ArenaHeader {
    pub horizontal_total_coefficients: u64,
    pub horizontal_kernel_texel_width: u64,
    pub vertical_total_coefficients: u64,
    pub vertical_kernel_texel_width: u64,
    pub horizontal_contributors: Region,
    pub horizontal_coefficients: Region,
    pub vertical_contributors: Region,
    pub vertical_coefficients: Region,
    pub decode_buffer: Region,
    pub scanline_buffer: Region,
    pub accumulator: Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisPlan {
    pub in_size: u32,
    pub out_size: u32,
    pub kernel_texel_width: usize,
    total_coefficients: usize,
}

impl AxisPlan {
    fn new(in_size: u32, out_size: u32, filter: &FilterInfo) -> Result<Self, ResizeError> {
        if out_size < in_size {
            return Err(ResizeError::Downsampling);
        }
        let kernel_texel_width = convolution::kernel_texel_width(filter);
        Ok(Self {
            in_size,
            out_size,
            kernel_texel_width,
            total_coefficients: checked_size(out_size as usize, kernel_texel_width)?,
        })
    }

    #[inline]
    pub fn total_coefficients(&self) -> usize {
        self.total_coefficients
    }
}

/// Returns `count * item_size` or an error if it doesn't fit into `usize`.
fn checked_size(count: usize, item_size: usize) -> Result<usize, ResizeError> {
    count
        .checked_mul(item_size)
        .ok_or(ResizeError::ArenaSizeOverflow)
}

/// Layout of an arena for the given images and filter.
///
/// The same plan is used to calculate the required size of an arena
/// and to partition it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArenaPlan {
    pub horizontal: AxisPlan,
    pub vertical: AxisPlan,
    header: ArenaHeader,
    size: usize,
}

impl ArenaPlan {
    pub fn new(
        src_layout: &ImageLayout,
        dst_layout: &ImageLayout,
        filter: &FilterInfo,
    ) -> Result<Self, ResizeError> {
        if src_layout.channels() != dst_layout.channels() {
            return Err(ResizeError::DifferentChannelsCount);
        }
        let channels = src_layout.channels();
        let horizontal = AxisPlan::new(
            src_layout.width().get(),
            dst_layout.width().get(),
            filter,
        )?;
        let vertical = AxisPlan::new(
            src_layout.height().get(),
            dst_layout.height().get(),
            filter,
        )?;

        let mut offset = size_of::<ArenaHeader>();
        let mut next_region = |len: usize| -> Result<Region, ResizeError> {
            let region = Region {
                offset: offset as u64,
                len: len as u64,
            };
            offset = offset
                .checked_add(len)
                .ok_or(ResizeError::ArenaSizeOverflow)?;
            Ok(region)
        };
        let contributor_size = size_of::<Contributor>();
        let real_size = size_of::<f32>();
        let src_row_bytes =
            checked_size(checked_size(horizontal.in_size as usize, channels)?, real_size)?;
        let dst_row_bytes =
            checked_size(checked_size(horizontal.out_size as usize, channels)?, real_size)?;
        let header = ArenaHeader {
            horizontal_total_coefficients: horizontal.total_coefficients() as u64,
            horizontal_kernel_texel_width: horizontal.kernel_texel_width as u64,
            vertical_total_coefficients: vertical.total_coefficients() as u64,
            vertical_kernel_texel_width: vertical.kernel_texel_width as u64,
            horizontal_contributors: next_region(checked_size(
                horizontal.out_size as usize,
                contributor_size,
            )?)?,
            horizontal_coefficients: next_region(checked_size(
                horizontal.total_coefficients(),
                real_size,
            )?)?,
            vertical_contributors: next_region(checked_size(
                vertical.out_size as usize,
                contributor_size,
            )?)?,
            vertical_coefficients: next_region(checked_size(
                vertical.total_coefficients(),
                real_size,
            )?)?,
            decode_buffer: next_region(src_row_bytes)?,
            scanline_buffer: next_region(dst_row_bytes)?,
            accumulator: next_region(dst_row_bytes)?,
        };
        let size = offset;
        // The gap for alignment must fit too.
        size.checked_add(ARENA_ALIGN)
            .ok_or(ResizeError::ArenaSizeOverflow)?;

        Ok(Self {
            horizontal,
            vertical,
            header,
            size,
        })
    }

    /// Size of an arena in bytes, including the gap that may be needed
    /// to align the start of the header.
    #[inline]
    pub fn required_bytes(&self) -> usize {
        ARENA_ALIGN + self.size
    }
}

#[derive(Debug)]
pub(crate) struct ScratchBuffers<'a> {
    /// One source row with components expanded into `f32`.
    pub decode: &'a mut [f32],
    /// Source row resampled horizontally.
    pub scanline: &'a mut [f32],
    /// Weighted sum of scanlines for one output row.
    pub accumulator: &'a mut [f32],
}

/// Caller-supplied memory partitioned into regions used by the resizer.
#[derive(Debug)]
pub struct FilterArena<'a> {
    pub(crate) header: &'a ArenaHeader,
    pub(crate) horizontal: AxisFilters<'a>,
    pub(crate) vertical: AxisFilters<'a>,
    pub(crate) buffers: ScratchBuffers<'a>,
}

impl<'a> FilterArena<'a> {
    /// Zeroes the arena, writes the header and splits the rest of memory
    /// into regions described by the plan.
    pub(crate) fn partition(arena: &'a mut [u8], plan: &ArenaPlan) -> Result<Self, ResizeError> {
        if arena.is_empty() {
            return Err(ResizeError::MissingArena);
        }
        let required = plan.required_bytes();
        if arena.len() < required {
            return Err(ResizeError::ArenaTooSmall {
                required,
                actual: arena.len(),
            });
        }
        arena.fill(0);

        let align_offset = arena.as_ptr().align_offset(ARENA_ALIGN);
        if align_offset >= ARENA_ALIGN {
            return Err(ResizeError::ArenaLayoutMismatch);
        }
        let mut cutter = RegionCutter {
            rest: &mut arena[align_offset..],
            offset: 0,
        };

        let header_bytes = cutter.take(Region {
            offset: 0,
            len: size_of::<ArenaHeader>() as u64,
        })?;
        let header: &'a mut ArenaHeader = bytemuck::try_from_bytes_mut(header_bytes)
            .map_err(|_| ResizeError::ArenaLayoutMismatch)?;
        *header = plan.header;
        let header: &'a ArenaHeader = header;

        let horizontal = AxisFilters {
            in_size: plan.horizontal.in_size,
            kernel_texel_width: plan.horizontal.kernel_texel_width,
            contributors: cutter.take_slice(header.horizontal_contributors)?,
            coefficients: cutter.take_slice(header.horizontal_coefficients)?,
        };
        let vertical = AxisFilters {
            in_size: plan.vertical.in_size,
            kernel_texel_width: plan.vertical.kernel_texel_width,
            contributors: cutter.take_slice(header.vertical_contributors)?,
            coefficients: cutter.take_slice(header.vertical_coefficients)?,
        };
        let buffers = ScratchBuffers {
            decode: cutter.take_slice(header.decode_buffer)?,
            scanline: cutter.take_slice(header.scanline_buffer)?,
            accumulator: cutter.take_slice(header.accumulator)?,
        };
        if cutter.offset != plan.size {
            return Err(ResizeError::ArenaLayoutMismatch);
        }
        if horizontal.coefficients.len() != plan.horizontal.total_coefficients()
            || vertical.coefficients.len() != plan.vertical.total_coefficients()
        {
            return Err(ResizeError::ArenaLayoutMismatch);
        }

        Ok(Self {
            header,
            horizontal,
            vertical,
            buffers,
        })
    }

    #[inline]
    pub fn header(&self) -> &ArenaHeader {
        self.header
    }

    /// Contributors and coefficients of columns of the destination image.
    #[inline]
    pub fn horizontal(&self) -> &AxisFilters<'a> {
        &self.horizontal
    }

    /// Contributors and coefficients of rows of the destination image.
    #[inline]
    pub fn vertical(&self) -> &AxisFilters<'a> {
        &self.vertical
    }
}

/// Splits consecutive regions from the start of a byte slice.
struct RegionCutter<'a> {
    rest: &'a mut [u8],
    offset: usize,
}

impl<'a> RegionCutter<'a> {
    fn take(&mut self, region: Region) -> Result<&'a mut [u8], ResizeError> {
        let len = region.len as usize;
        if region.offset as usize != self.offset || len > self.rest.len() {
            return Err(ResizeError::ArenaLayoutMismatch);
        }
        let rest = std::mem::take(&mut self.rest);
        let (region_bytes, rest) = rest.split_at_mut(len);
        self.rest = rest;
        self.offset += len;
        Ok(region_bytes)
    }

    fn take_slice<T: Pod>(&mut self, region: Region) -> Result<&'a mut [T], ResizeError> {
        let bytes = self.take(region)?;
        bytemuck::try_cast_slice_mut(bytes).map_err(|_| ResizeError::ArenaLayoutMismatch)
    }
}
