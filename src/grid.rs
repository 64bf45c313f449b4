// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The supersampled escape grid.  Every pixel is sampled at each of
//! the `SAMPLE_OFFSETS` and keeps the plain mean of the escape values,
//! bounded samples counting as -1.

use crate::errors::RenderError;
use crate::escape::escape;
use crate::executor::Executor;
use crate::planes::{Pixel, PlaneMapper, SAMPLE_OFFSETS};

/// A row-major grid of averaged escape values, one cell per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputGrid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl OutputGrid {
    /// Width of the grid in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[y * self.width + x]
    }

    /// All cells, row by row from the top.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Iterates the rows of the grid from the top.
    pub fn rows(&self) -> std::slice::Chunks<f64> {
        self.cells.chunks(self.width)
    }
}

/// The averaged escape value of one pixel.
pub fn sample_pixel(mapper: &PlaneMapper, pixel: &Pixel, max_iterations: usize) -> f64 {
    let total: i64 = SAMPLE_OFFSETS
        .iter()
        .map(|&offset| {
            let point = mapper.pixel_to_point(pixel, offset);
            escape(point.re, point.im, max_iterations)
        })
        .sum();
    total as f64 / SAMPLE_OFFSETS.len() as f64
}

/// Fill a fresh grid covering `mapper`'s image, sampling each pixel
/// with up to `max_iterations` iterations.  Rows are spread over
/// `executor`; each cell is written only by its own pixel.
pub fn fill<E: Executor>(
    mapper: &PlaneMapper,
    max_iterations: usize,
    executor: &E,
) -> Result<OutputGrid, RenderError> {
    if max_iterations == 0 {
        return Err(RenderError::ZeroIterations);
    }
    let width = mapper.width();
    let mut cells = vec![0.0_f64; mapper.len()];
    executor.for_each_row(&mut cells, width, |y, row| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = sample_pixel(mapper, &Pixel(x, y), max_iterations);
        }
    })?;
    Ok(OutputGrid {
        width,
        height: mapper.height(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{Serial, Threaded};
    use crate::planes::Viewport;

    fn square(size: usize) -> PlaneMapper {
        let viewport = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        PlaneMapper::new(size, size, viewport).unwrap()
    }

    #[test]
    fn grid_has_image_shape() {
        let viewport = Viewport::new(-2.0, 1.0, -1.0, 1.0).unwrap();
        let mapper = PlaneMapper::new(6, 4, viewport).unwrap();
        let grid = fill(&mapper, 20, &Serial).unwrap();
        assert_eq!((grid.width(), grid.height()), (6, 4));
        assert_eq!(grid.cells().len(), 24);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn corner_pixel_escapes_at_once() {
        let grid = fill(&square(4), 50, &Serial).unwrap();
        // Both samples, -2+1i and -1.5+1.5i, leave on the first iterate.
        assert_eq!(grid.get(0, 0), 0.0);
    }

    #[test]
    fn pixel_inside_the_main_body_is_bounded() {
        // Pixel (1, 1) samples -1+0i and -0.5+0.5i, both in the set.
        let grid = fill(&square(4), 50, &Serial).unwrap();
        assert_eq!(grid.get(1, 1), -1.0);
    }

    #[test]
    fn bounded_and_escaped_samples_average_plainly() {
        // Pixel (2, 1) samples the origin (bounded) and 0.5+0.5i, which
        // escapes on iteration 3.
        let grid = fill(&square(4), 50, &Serial).unwrap();
        assert_eq!(grid.get(2, 1), 1.0);
        assert_eq!(sample_pixel(&square(4), &Pixel(2, 1), 50), 1.0);
    }

    #[test]
    fn threaded_fill_matches_serial_fill() {
        let viewport = Viewport::new(-2.1, 0.7, -1.2, 1.2).unwrap();
        let mapper = PlaneMapper::new(61, 47, viewport).unwrap();
        let serial = fill(&mapper, 200, &Serial).unwrap();
        let threaded = fill(&mapper, 200, &Threaded::new(4, 5)).unwrap();
        assert_eq!(serial, threaded);
    }

    #[test]
    fn zero_iterations_is_rejected() {
        assert!(fill(&square(4), 0, &Serial).is_err());
    }
}
