use std::num::NonZeroU32;

use crate::ImageBufferError;

/// Dimensions and memory layout of an image.
///
/// Rows are stored one after another, each row takes `stride` bytes.
/// Components of a texel are interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLayout {
    width: NonZeroU32,
    height: NonZeroU32,
    stride: usize,
    channels: u8,
}

impl ImageLayout {
    /// Creates layout of an image with tightly packed rows.
    pub fn new(
        width: NonZeroU32,
        height: NonZeroU32,
        channels: u8,
    ) -> Result<Self, ImageBufferError> {
        if channels == 0 {
            return Err(ImageBufferError::InvalidChannelsCount);
        }
        let stride = (width.get() as usize)
            .checked_mul(channels as usize)
            .ok_or(ImageBufferError::ImageTooLarge)?;
        let layout = Self {
            width,
            height,
            stride,
            channels,
        };
        layout
            .checked_buffer_size()
            .ok_or(ImageBufferError::ImageTooLarge)?;
        Ok(layout)
    }

    /// Sets size of a row in bytes.
    /// Zero value means the row is tightly packed (`width * channels`).
    pub fn with_stride(mut self, stride: usize) -> Result<Self, ImageBufferError> {
        let row_size = self.row_size();
        if stride == 0 {
            self.stride = row_size;
        } else if stride < row_size {
            return Err(ImageBufferError::InvalidStride);
        } else {
            self.stride = stride;
        }
        self.checked_buffer_size()
            .ok_or(ImageBufferError::InvalidStride)?;
        Ok(self)
    }

    fn checked_buffer_size(&self) -> Option<usize> {
        self.stride
            .checked_mul(self.height.get() as usize - 1)?
            .checked_add(self.row_size())
    }

    #[inline(always)]
    pub fn width(&self) -> NonZeroU32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> NonZeroU32 {
        self.height
    }

    /// Size of a row in bytes, including padding.
    #[inline(always)]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline(always)]
    pub fn channels(&self) -> usize {
        self.channels as usize
    }

    /// Size of texels of a row in bytes, without padding.
    #[inline(always)]
    pub fn row_size(&self) -> usize {
        self.width.get() as usize * self.channels as usize
    }

    /// Minimal size of a buffer that can hold the image.
    /// The last row doesn't need the padding.
    ///
    /// Constructors of the layout reject sizes that don't fit into `usize`.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        self.stride * (self.height.get() as usize - 1) + self.row_size()
    }
}

/// An immutable view of image data used by resizer as source image.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    layout: ImageLayout,
    buffer: &'a [u8],
}

impl<'a> ImageView<'a> {
    pub fn from_buffer(layout: ImageLayout, buffer: &'a [u8]) -> Result<Self, ImageBufferError> {
        if buffer.len() < layout.buffer_size() {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        Ok(Self { layout, buffer })
    }

    #[inline(always)]
    pub fn layout(&self) -> &ImageLayout {
        &self.layout
    }

    #[inline(always)]
    pub fn width(&self) -> NonZeroU32 {
        self.layout.width
    }

    #[inline(always)]
    pub fn height(&self) -> NonZeroU32 {
        self.layout.height
    }

    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.buffer
    }

    /// Returns texels of the row without padding.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let buffer: &'a [u8] = self.buffer;
        let start = y * self.layout.stride;
        &buffer[start..start + self.layout.row_size()]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &'a [u8]> {
        let view = *self;
        (0..self.layout.height.get() as usize).map(move |y| view.row(y))
    }
}

/// A mutable view of image data used by resizer as destination image.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    layout: ImageLayout,
    buffer: &'a mut [u8],
}

impl<'a> ImageViewMut<'a> {
    pub fn from_buffer(
        layout: ImageLayout,
        buffer: &'a mut [u8],
    ) -> Result<Self, ImageBufferError> {
        if buffer.len() < layout.buffer_size() {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        Ok(Self { layout, buffer })
    }

    #[inline(always)]
    pub fn layout(&self) -> &ImageLayout {
        &self.layout
    }

    #[inline(always)]
    pub fn width(&self) -> NonZeroU32 {
        self.layout.width
    }

    #[inline(always)]
    pub fn height(&self) -> NonZeroU32 {
        self.layout.height
    }

    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.buffer
    }

    /// Returns mutable texels of rows without padding.
    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let row_size = self.layout.row_size();
        self.buffer
            .chunks_mut(self.layout.stride)
            .take(self.layout.height.get() as usize)
            .map(move |row| &mut row[..row_size])
    }
}
