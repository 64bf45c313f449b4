#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Supersampled Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! whose orbit under `z = z * z + c` never leaves the circle of radius
//! 2.  Points outside the set are colored by how quickly they leave:
//! the "escape time" of the orbit.
//!
//! Each pixel is sampled twice, once at its corner and once at its
//! centre, and the two escape times are averaged.  The averages are
//! then pushed through a cyclic color ramp, so that the bands of
//! equal escape time repeat every `gradient_repeats` iterations
//! instead of fading into one color near the boundary of the set.
//!
//! Both passes are pure maps over the pixels: each cell is computed
//! from its own coordinates only, so the rows can be spread over any
//! `Executor` without locking.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod errors;
pub mod escape;
pub mod executor;
pub mod gradient;
pub mod grid;
pub mod pipeline;
pub mod planes;
pub mod sink;

pub use errors::RenderError;
pub use escape::{escape, escape_time};
pub use executor::{Executor, Serial, Threaded};
pub use gradient::{colorize, ColorRamp, PixelBuffer, Rgb};
pub use grid::{fill, OutputGrid};
pub use pipeline::{ImageSink, Render, RenderConfig, RenderPipeline};
pub use planes::{Pixel, PlaneMapper, Viewport};
pub use sink::ImageFileSink;
