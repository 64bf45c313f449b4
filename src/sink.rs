// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image sinks backed by the `image` crate, and a grayscale dump of the
//! raw escape grid for looking at what the palette is hiding.

use std::fs::File;
use std::path::{Path, PathBuf};

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::ColorType;
use itertools::{Itertools, MinMaxResult};
use log::info;

use crate::errors::RenderError;
use crate::gradient::PixelBuffer;
use crate::grid::OutputGrid;
use crate::pipeline::ImageSink;

/// Writes the image to a file.  The format follows the file extension.
#[derive(Clone, Debug)]
pub struct ImageFileSink {
    path: PathBuf,
}

impl ImageFileSink {
    /// A sink writing to `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> ImageFileSink {
        ImageFileSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Where the image will be written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for ImageFileSink {
    fn accept(&mut self, pixels: &PixelBuffer) -> Result<(), RenderError> {
        image::save_buffer(
            &self.path,
            &pixels.to_raw(),
            pixels.width() as u32,
            pixels.height() as u32,
            ColorType::Rgb8,
        )?;
        info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// The name of frame `frame`, zero-padded to `digits` digits.
pub fn frame_name(frame: u32, digits: usize, extension: &str) -> String {
    format!("{:0width$}.{}", frame, extension, width = digits)
}

/// Scale the grid into 8-bit gray levels, its smallest value black and
/// its largest white.  A flat grid comes out black.
pub fn grid_to_gray(grid: &OutputGrid) -> Vec<u8> {
    let (low, high) = match grid.cells().iter().cloned().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => return vec![],
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(l, h) => (l, h),
    };
    let range = high - low;
    grid.cells()
        .iter()
        .map(|v| {
            if range > 0.0 {
                ((v - low) / range * 255.0) as u8
            } else {
                0
            }
        })
        .collect()
}

/// Write the escape grid to `path` as a binary graymap.
pub fn write_grid(path: &Path, grid: &OutputGrid) -> Result<(), RenderError> {
    let output = File::create(path)?;
    let mut encoder =
        PnmEncoder::new(output).with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(
        &grid_to_gray(grid)[..],
        grid.width() as u32,
        grid.height() as u32,
        ColorType::L8,
    )?;
    info!("wrote escape grid to {}", path.display());
    Ok(())
}
