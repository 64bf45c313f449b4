// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error taxonomy of the renderer.  Nearly everything here is a
//! configuration problem, caught once before any pixel is computed.

use failure::Fail;

/// Everything that can stop a render from starting or finishing.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The horizontal bounds are empty or inverted.
    #[fail(display = "x bounds must satisfy min < max (got {} .. {})", min, max)]
    InvalidXBounds {
        /// Left edge of the plane.
        min: f64,
        /// Right edge of the plane.
        max: f64,
    },

    /// The vertical bounds are empty or inverted.
    #[fail(display = "y bounds must satisfy min < max (got {} .. {})", min, max)]
    InvalidYBounds {
        /// Bottom edge of the plane.
        min: f64,
        /// Top edge of the plane.
        max: f64,
    },

    /// The zoom factor of a center-based viewport is not positive.
    #[fail(display = "pixels per unit must be positive (got {})", _0)]
    InvalidZoom(f64),

    /// Width or height is zero.
    #[fail(display = "image resolution must be non-zero (got {}x{})", width, height)]
    EmptyResolution {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The iteration cap is zero.
    #[fail(display = "the iteration limit must be at least 1")]
    ZeroIterations,

    /// The gradient cycle length is zero.
    #[fail(display = "gradient repeats must be at least 1")]
    ZeroGradientRepeats,

    /// A ramp needs at least a start and an end stop.
    #[fail(display = "a color ramp needs at least two stops (got {})", _0)]
    TooFewStops(usize),

    /// The ramp's control points and colors do not pair up.
    #[fail(
        display = "color ramp has {} control points but {} colors",
        points, colors
    )]
    RampLengthMismatch {
        /// Number of control points supplied.
        points: usize,
        /// Number of colors supplied.
        colors: usize,
    },

    /// A control point is smaller than the one before it.
    #[fail(display = "color ramp control point {} is out of order", _0)]
    RampNotAscending(usize),

    /// The ramp does not start at 0 and end at 1.
    #[fail(display = "color ramp must start at 0 and end at 1 (got {} .. {})", first, last)]
    RampEndpoints {
        /// The first control point.
        first: f64,
        /// The last control point.
        last: f64,
    },

    /// A buffer handed to the executor does not hold whole rows.
    #[fail(display = "buffer of {} cells is not a whole number of {}-wide rows", len, width)]
    RaggedBuffer {
        /// Cells in the buffer.
        len: usize,
        /// Row width the buffer was split by.
        width: usize,
    },

    /// A worker thread panicked before finishing its tiles.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The image sink could not encode the pixels.
    #[fail(display = "could not encode image: {}", _0)]
    Image(#[cause] image::ImageError),

    /// The image sink could not write to storage.
    #[fail(display = "could not write output: {}", _0)]
    Io(#[cause] std::io::Error),
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}
