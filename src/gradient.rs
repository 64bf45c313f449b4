// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cyclic gradient coloring.
//!
//! A `ColorRamp` is a piecewise-linear path through RGB space, pinned
//! at control points between 0 and 1.  An escape value is truncated to
//! an integer, wrapped into a cycle `gradient_repeats` long (negative
//! values wrap forward, so the bounded sentinel lands on the ramp like
//! anything else), and the resulting position is looked up on the ramp.

use log::warn;

use crate::errors::RenderError;
use crate::executor::Executor;
use crate::grid::OutputGrid;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Ordered control points in `[0, 1]`, each paired with a color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    points: Vec<f64>,
    colors: Vec<Rgb>,
}

impl ColorRamp {
    /// Builds a ramp.  There must be as many colors as points, at least
    /// two of each; the points must start at 0, end at 1, and strictly
    /// increase in between.  Only the first and the last pair of stops
    /// may share a point, giving a hard edge at either end of the ramp.
    pub fn new(points: Vec<f64>, colors: Vec<Rgb>) -> Result<ColorRamp, RenderError> {
        if points.len() != colors.len() {
            return Err(RenderError::RampLengthMismatch {
                points: points.len(),
                colors: colors.len(),
            });
        }
        if points.len() < 2 {
            return Err(RenderError::TooFewStops(points.len()));
        }
        let (first, last) = (points[0], points[points.len() - 1]);
        if first != 0.0 || last != 1.0 {
            return Err(RenderError::RampEndpoints { first, last });
        }
        let last = points.len() - 1;
        let out_of_order = |i: usize| {
            let edge = i == 1 || i == last;
            !(points[i] > points[i - 1] || (edge && points[i] == points[i - 1]))
        };
        if let Some(i) = (1..points.len()).find(|&i| out_of_order(i)) {
            return Err(RenderError::RampNotAscending(i));
        }
        Ok(ColorRamp { points, colors })
    }

    /// The control points.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// The colors, one per control point.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// The color at `position`.  Positions between two stops blend
    /// the two colors linearly, channel by channel, truncating toward
    /// zero.  Positions at or past the final stop get the final color.
    pub fn color_at(&self, position: f64) -> Rgb {
        let last = self.points.len() - 1;
        let top = match self.points.iter().position(|&p| p > position) {
            Some(i) if i > 0 => i,
            Some(_) => return self.colors[0],
            None => {
                if position > self.points[last] {
                    warn!("gradient position {} is past the last stop", position);
                }
                return self.colors[last];
            }
        };
        let bottom = top - 1;
        let span = (position - self.points[bottom]) / (self.points[top] - self.points[bottom]);
        let (low, high) = (self.colors[bottom], self.colors[top]);
        let mut rgb = [0u8; 3];
        for c in 0..3 {
            let channel = f64::from(low[c]) + span * (f64::from(high[c]) - f64::from(low[c]));
            rgb[c] = channel as u8;
        }
        rgb
    }
}

impl Default for ColorRamp {
    /// White through gold, dark red and indigo, and back to white.
    fn default() -> ColorRamp {
        ColorRamp {
            points: vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0],
            colors: vec![
                [255, 255, 255],
                [255, 204, 0],
                [135, 30, 20],
                [0, 0, 153],
                [0, 0, 153],
                [255, 255, 255],
            ],
        }
    }
}

/// Where an escape value falls along the gradient cycle, in `[0, 1)`.
/// The value is truncated toward zero before wrapping, never rounded.
pub fn gradient_position(value: f64, gradient_repeats: u32) -> f64 {
    let repeats = i64::from(gradient_repeats);
    (value as i64).rem_euclid(repeats) as f64 / repeats as f64
}

/// A row-major buffer of RGB pixels, ready for an image sink.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Width of the image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// All pixels, row by row from the top.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// The pixels as packed `r, g, b` bytes, the layout image encoders
    /// expect.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.iter().cloned()).collect()
    }
}

/// Color every cell of `grid` through `ramp`, one full pass of the
/// ramp every `gradient_repeats` escape iterations.
pub fn colorize<E: Executor>(
    grid: &OutputGrid,
    ramp: &ColorRamp,
    gradient_repeats: u32,
    executor: &E,
) -> Result<PixelBuffer, RenderError> {
    if gradient_repeats == 0 {
        return Err(RenderError::ZeroGradientRepeats);
    }
    let width = grid.width();
    let mut pixels = vec![[0u8; 3]; width * grid.height()];
    executor.for_each_row(&mut pixels, width, |y, row| {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = ramp.color_at(gradient_position(grid.get(x, y), gradient_repeats));
        }
    })?;
    Ok(PixelBuffer {
        width,
        height: grid.height(),
        pixels,
    })
}
