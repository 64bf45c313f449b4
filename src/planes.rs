// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper-left corner, and a rectangle on the complex plane with
//! its origin in the lower-left corner.  Image rows count downward,
//! the imaginary axis counts upward, so the mapper flips one to get
//! the other.
use num::Complex;

use crate::errors::RenderError;

/// Describes the x, y of a pixel in the image.  x counts columns from
/// the left, y counts rows from the top.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The two fixed sub-pixel sample positions, as fractions of a pixel.
pub const SAMPLE_OFFSETS: [(f64, f64); 2] = [(0.0, 0.0), (0.5, 0.5)];

/// The rectangle of the complex plane that will be rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge (smallest real part).
    pub x_min: f64,
    /// Right edge (largest real part).
    pub x_max: f64,
    /// Bottom edge (smallest imaginary part).
    pub y_min: f64,
    /// Top edge (largest imaginary part).
    pub y_max: f64,
}

impl Viewport {
    /// A viewport with explicit bounds.  The bounds must describe a
    /// rectangle with a positive area.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Viewport, RenderError> {
        // Written as negations so that NaN bounds are rejected too.
        if !(x_max > x_min) {
            return Err(RenderError::InvalidXBounds {
                min: x_min,
                max: x_max,
            });
        }
        if !(y_max > y_min) {
            return Err(RenderError::InvalidYBounds {
                min: y_min,
                max: y_max,
            });
        }
        Ok(Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// A viewport described by the left-lower and right-upper corners
    /// of the plane.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Viewport, RenderError> {
        Viewport::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// A viewport centred on `center`, where one unit of the complex
    /// plane spans `pixels_per_unit` pixels of a `width` x `height`
    /// image.
    pub fn from_center(
        center: Complex<f64>,
        pixels_per_unit: f64,
        width: usize,
        height: usize,
    ) -> Result<Viewport, RenderError> {
        if !(pixels_per_unit > 0.0) {
            return Err(RenderError::InvalidZoom(pixels_per_unit));
        }
        let half_width = (width as f64 / 2.0) / pixels_per_unit;
        let half_height = (height as f64 / 2.0) / pixels_per_unit;
        Viewport::new(
            center.re - half_width,
            center.re + half_width,
            center.im - half_height,
            center.im + half_height,
        )
    }

    /// Width of the viewport on the real axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the viewport on the imaginary axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Describes the width and height of the image grid.  The origin is
/// always at 0,0 and all coordinates are non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Maps pixels of an image onto points of a viewport.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Size of the image in pixels.
    pub integral_plane: IntegralPlane,
    /// The rectangle of the complex plane the image covers.
    pub viewport: Viewport,
    // How far along each axis of the complex plane a single pixel
    // reaches.
    step: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the image size and the viewport it should
    /// cover.  The viewport is checked again, since its fields can be
    /// set directly.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, RenderError> {
        let viewport = Viewport::new(viewport.x_min, viewport.x_max, viewport.y_min, viewport.y_max)?;
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyResolution { width, height });
        }

        let step = (
            viewport.width() / (width as f64),
            viewport.height() / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
            step,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of pixels in the image.  Used to size buffers.
    /// Never zero: `new` rejects empty images.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// The size of one pixel on the real and imaginary axes.
    pub fn pixel_step(&self) -> (f64, f64) {
        self.step
    }

    /// Given a pixel and an offset inside it (each component in
    /// `[0, 1)`), return the point of the complex plane that sample
    /// falls on.  Row 0 is the top of the image, so it maps to the
    /// largest imaginary values.
    pub fn pixel_to_point(&self, pixel: &Pixel, offset: (f64, f64)) -> Complex<f64> {
        let flipped = (self.integral_plane.1 - 1 - pixel.1) as f64;
        Complex::new(
            self.viewport.x_min + (pixel.0 as f64 + offset.0) * self.step.0,
            self.viewport.y_min + (flipped + offset.1) * self.step.1,
        )
    }
}
