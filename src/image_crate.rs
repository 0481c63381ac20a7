use std::num::NonZeroU32;
use std::ops::DerefMut;

use image::DynamicImage;

use crate::{ImageBufferError, ImageLayout, ImageView, ImageViewMut};

/// Returns layout of the image if its components are `u8`.
fn dynamic_image_layout(image: &DynamicImage) -> Result<ImageLayout, ImageBufferError> {
    let channels = match image {
        DynamicImage::ImageLuma8(_) => 1,
        DynamicImage::ImageLumaA8(_) => 2,
        DynamicImage::ImageRgb8(_) => 3,
        DynamicImage::ImageRgba8(_) => 4,
        _ => return Err(ImageBufferError::UnsupportedComponentType),
    };
    let width = NonZeroU32::new(image.width()).ok_or(ImageBufferError::InvalidBufferSize)?;
    let height = NonZeroU32::new(image.height()).ok_or(ImageBufferError::InvalidBufferSize)?;
    ImageLayout::new(width, height, channels)
}

impl<'a> TryFrom<&'a DynamicImage> for ImageView<'a> {
    type Error = ImageBufferError;

    fn try_from(image: &'a DynamicImage) -> Result<Self, Self::Error> {
        let layout = dynamic_image_layout(image)?;
        ImageView::from_buffer(layout, image.as_bytes())
    }
}

impl<'a> TryFrom<&'a mut DynamicImage> for ImageViewMut<'a> {
    type Error = ImageBufferError;

    fn try_from(image: &'a mut DynamicImage) -> Result<Self, Self::Error> {
        let layout = dynamic_image_layout(image)?;
        let buffer: &mut [u8] = match image {
            DynamicImage::ImageLuma8(img) => (*img).deref_mut(),
            DynamicImage::ImageLumaA8(img) => (*img).deref_mut(),
            DynamicImage::ImageRgb8(img) => (*img).deref_mut(),
            DynamicImage::ImageRgba8(img) => (*img).deref_mut(),
            _ => return Err(ImageBufferError::UnsupportedComponentType),
        };
        ImageViewMut::from_buffer(layout, buffer)
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, RgbImage};

    use super::*;

    #[test]
    fn views_of_dynamic_image() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(3, 2));
        let view = ImageView::try_from(&image).unwrap();
        assert_eq!(view.layout().channels(), 3);
        assert_eq!(view.layout().stride(), 9);
        assert_eq!(view.height().get(), 2);

        let mut image = DynamicImage::ImageLuma8(GrayImage::new(4, 5));
        let mut view = ImageViewMut::try_from(&mut image).unwrap();
        for row in view.iter_rows_mut() {
            row.fill(7);
        }
        assert!(image.as_bytes().iter().all(|&v| v == 7));
    }

    #[test]
    fn unsupported_dynamic_image() {
        let image = DynamicImage::new_rgb16(3, 2);
        assert_eq!(
            ImageView::try_from(&image).unwrap_err(),
            ImageBufferError::UnsupportedComponentType
        );
    }
}
