use std::str::FromStr;

use arena_resize as ar;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum FilterType {
    /// Each output pixel takes the value of the nearest source pixel.
    Nearest,
    /// Linear interpolation between neighbouring source pixels.
    /// Not implemented by the library yet.
    Bilinear,
}

impl From<FilterType> for ar::FilterType {
    fn from(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Nearest => ar::FilterType::Nearest,
            FilterType::Bilinear => ar::FilterType::Bilinear,
        }
    }
}

/// Size of the result image in pixels or percents of the source size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Size {
    Pixels(u32),
    Percent(f32),
}

impl Size {
    pub fn calculate_size(&self, src_size: u32) -> u32 {
        match *self {
            Self::Pixels(size) => size,
            Self::Percent(percent) => (src_size as f32 * percent / 100.).round() as u32,
        }
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(percent) = s.strip_suffix('%') {
            let percent: f32 = percent
                .trim()
                .parse()
                .map_err(|_| format!("Invalid percentage: {s}"))?;
            if percent <= 0. {
                return Err("Percentage must be greater than zero".to_string());
            }
            Ok(Self::Percent(percent))
        } else {
            let pixels: u32 = s.parse().map_err(|_| format!("Invalid size: {s}"))?;
            if pixels == 0 {
                return Err("Size must be greater than zero".to_string());
            }
            Ok(Self::Pixels(pixels))
        }
    }
}
