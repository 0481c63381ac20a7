use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use arena_resize as ar;
use clap::Parser;
use image::{ColorType, DynamicImage, ImageReader};
use log::debug;

mod structs;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Path to source image file
    #[clap(value_parser)]
    source_path: PathBuf,

    /// Path to result image file
    #[clap(value_parser)]
    destination_path: Option<PathBuf>,

    /// Width of result image, in pixels or percentage of the source image's width
    #[clap(short, long, value_parser)]
    width: Option<structs::Size>,

    /// Height of result image in pixels or percentage of the source image's height
    #[clap(short, long, value_parser)]
    height: Option<structs::Size>,

    /// Overwrite destination file
    #[clap(short, long, action)]
    overwrite: bool,

    /// Type of filter used to resample image
    #[clap(short, long, value_enum, default_value_t = structs::FilterType::Nearest)]
    filter: structs::FilterType,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    resize(&cli)
}

fn resize(cli: &Cli) -> Result<()> {
    let src_image = open_source_image(cli)?;
    let mut dst_image = create_destination_image(cli, &src_image)?;

    let options = ar::ResizeOptions::new().filter(cli.filter.into());
    let src_view =
        ar::ImageView::try_from(&src_image).with_context(|| "Failed to create source view")?;
    let mut dst_view = ar::ImageViewMut::try_from(&mut dst_image)
        .with_context(|| "Failed to create destination view")?;

    let arena_size = ar::calculate_memory(src_view.layout(), dst_view.layout(), &options)
        .with_context(|| "Failed to calculate size of temporary buffer")?;
    debug!("Allocate {} bytes for temporary data", arena_size);
    let mut arena = vec![0u8; arena_size];

    debug!(
        "Resize the source image into {}x{}",
        dst_view.width(),
        dst_view.height()
    );
    ar::resize(&src_view, &mut dst_view, &options, &mut arena)
        .with_context(|| "Failed to resize image")?;

    save_result(cli, &dst_image)
}

fn open_source_image(cli: &Cli) -> Result<DynamicImage> {
    let source_path = &cli.source_path;
    debug!("Opening the source image {:?}", source_path);
    let image = ImageReader::open(source_path)
        .with_context(|| format!("Failed to read source file from {:?}", source_path))?
        .decode()
        .with_context(|| "Failed to decode source image")?;

    let color_type = image.color();
    let image = match color_type {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => image,
        ColorType::L16 => {
            debug!("Convert components of the source image into u8");
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        ColorType::La16 => {
            debug!("Convert components of the source image into u8");
            DynamicImage::ImageLumaA8(image.to_luma_alpha8())
        }
        ColorType::Rgb16 => {
            debug!("Convert components of the source image into u8");
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
        ColorType::Rgba16 => {
            debug!("Convert components of the source image into u8");
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        _ => {
            return Err(anyhow!(
                "Unsupported pixel's format of source image: {:?}",
                color_type
            ))
        }
    };
    Ok(image)
}

fn create_destination_image(cli: &Cli, src_image: &DynamicImage) -> Result<DynamicImage> {
    let aspect_ratio = src_image.width() as f32 / src_image.height() as f32;

    let (dst_width, dst_height) = match (cli.width, cli.height) {
        (None, None) => (src_image.width(), src_image.height()),
        (Some(width), None) => {
            let width = width.calculate_size(src_image.width());
            (width, (width as f32 / aspect_ratio).round() as u32)
        }
        (None, Some(height)) => {
            let height = height.calculate_size(src_image.height());
            ((height as f32 * aspect_ratio).round() as u32, height)
        }
        (Some(width), Some(height)) => (
            width.calculate_size(src_image.width()),
            height.calculate_size(src_image.height()),
        ),
    };

    if dst_width < src_image.width() || dst_height < src_image.height() {
        return Err(anyhow!(
            "Size of the result image {}x{} is smaller than size of the source image {}x{}",
            dst_width,
            dst_height,
            src_image.width(),
            src_image.height()
        ));
    }

    Ok(DynamicImage::new(dst_width, dst_height, src_image.color()))
}

fn save_result(cli: &Cli, image: &DynamicImage) -> Result<()> {
    let result_path = if let Some(path) = cli.destination_path.clone() {
        path
    } else {
        let mut path = PathBuf::from("./");
        let ext = cli
            .source_path
            .extension()
            .unwrap_or_else(|| OsStr::new("png"));
        path.push("result");
        path.set_extension(ext);
        path
    };
    if result_path.exists() && !cli.overwrite {
        return Err(anyhow!(
            "Destination path {:?} already exists.",
            result_path
        ));
    };

    debug!("Save the result image into the file {:?}", result_path);
    image
        .save(&result_path)
        .with_context(|| "Failed to save the result image")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
