// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ties the stages together: configuration is checked once, then the
//! escape grid is filled and colored, and the finished pixels go to an
//! image sink.

use std::time::{Duration, Instant};

use log::info;

use crate::errors::RenderError;
use crate::executor::{Executor, Threaded};
use crate::gradient::{colorize, ColorRamp, PixelBuffer};
use crate::grid::{fill, OutputGrid};
use crate::planes::{PlaneMapper, Viewport};

/// Anything that can take a finished image off the pipeline's hands.
/// Where the pixels end up, and in which format, is the sink's
/// business.
pub trait ImageSink {
    /// Accept a finished `width` x `height` image.
    fn accept(&mut self, pixels: &PixelBuffer) -> Result<(), RenderError>;
}

/// Everything a render needs to know.  Built once, never changed.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration cap of the escape test.
    pub max_iterations: usize,
    /// Escape iterations per full cycle of the color ramp.
    pub gradient_repeats: u32,
    /// The region of the complex plane to draw.
    pub viewport: Viewport,
    /// The palette.
    pub ramp: ColorRamp,
}

impl Default for RenderConfig {
    /// An 800x600 close-up of a filament on the real axis, near -1.5746.
    fn default() -> RenderConfig {
        RenderConfig {
            width: 800,
            height: 600,
            max_iterations: 15_000,
            gradient_repeats: 100,
            viewport: Viewport {
                x_min: -1.574_590_111_060_041_4,
                x_max: -1.574_589_863_820_997_4,
                y_min: 0.000_273_836_775_278_080_6,
                y_max: 0.000_274_022_091_563_295_3,
            },
            ramp: ColorRamp::default(),
        }
    }
}

impl RenderConfig {
    /// Checks every setting, failing on the first bad one.
    pub fn validate(&self) -> Result<(), RenderError> {
        let vp = &self.viewport;
        Viewport::new(vp.x_min, vp.x_max, vp.y_min, vp.y_max)?;
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iterations == 0 {
            return Err(RenderError::ZeroIterations);
        }
        if self.gradient_repeats == 0 {
            return Err(RenderError::ZeroGradientRepeats);
        }
        ColorRamp::new(self.ramp.points().to_vec(), self.ramp.colors().to_vec())?;
        Ok(())
    }
}

/// The product of one render.
#[derive(Clone, Debug)]
pub struct Render {
    /// The averaged escape values, kept for diagnostics.
    pub grid: OutputGrid,
    /// The colored image.
    pub pixels: PixelBuffer,
    /// Wall-clock time spent filling and coloring.
    pub elapsed: Duration,
}

/// A validated configuration bound to an executor.
pub struct RenderPipeline<E: Executor = Threaded> {
    config: RenderConfig,
    mapper: PlaneMapper,
    executor: E,
}

impl RenderPipeline<Threaded> {
    /// A pipeline running on one thread per CPU.
    pub fn threaded(config: RenderConfig) -> Result<Self, RenderError> {
        RenderPipeline::new(config, Threaded::default())
    }
}

impl<E: Executor> RenderPipeline<E> {
    /// Validates `config` and prepares the pixel mapping.  Nothing is
    /// computed until `render` is called.
    pub fn new(config: RenderConfig, executor: E) -> Result<Self, RenderError> {
        config.validate()?;
        let mapper = PlaneMapper::new(config.width, config.height, config.viewport)?;
        Ok(RenderPipeline {
            config,
            mapper,
            executor,
        })
    }

    /// The configuration this pipeline renders.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Fill the escape grid and color it.
    pub fn render(&self) -> Result<Render, RenderError> {
        let start = Instant::now();
        let grid = fill(&self.mapper, self.config.max_iterations, &self.executor)?;
        let pixels = colorize(
            &grid,
            &self.config.ramp,
            self.config.gradient_repeats,
            &self.executor,
        )?;
        let elapsed = start.elapsed();
        info!("Time to calculate: {:?}", elapsed);
        Ok(Render {
            grid,
            pixels,
            elapsed,
        })
    }

    /// Render, then hand the image to `sink`.  The grid is returned for
    /// callers who want to look at the raw escape values.
    pub fn render_to<S: ImageSink>(&self, sink: &mut S) -> Result<OutputGrid, RenderError> {
        let render = self.render()?;
        sink.accept(&render.pixels)?;
        Ok(render.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Serial;

    struct Collect(Vec<PixelBuffer>);

    impl ImageSink for Collect {
        fn accept(&mut self, pixels: &PixelBuffer) -> Result<(), RenderError> {
            self.0.push(pixels.clone());
            Ok(())
        }
    }

    fn small() -> RenderConfig {
        RenderConfig {
            width: 32,
            height: 24,
            max_iterations: 200,
            gradient_repeats: 25,
            viewport: Viewport::new(-2.0, 1.0, -1.125, 1.125).unwrap(),
            ramp: ColorRamp::default(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_configs_fail_before_rendering() {
        let mut c = small();
        c.width = 0;
        assert!(RenderPipeline::new(c, Serial).is_err());

        let mut c = small();
        c.max_iterations = 0;
        assert!(RenderPipeline::new(c, Serial).is_err());

        let mut c = small();
        c.gradient_repeats = 0;
        assert!(RenderPipeline::new(c, Serial).is_err());

        let mut c = small();
        c.viewport.x_max = c.viewport.x_min;
        assert!(RenderPipeline::new(c, Serial).is_err());

        let mut c = small();
        c.viewport.y_min = 5.0;
        assert!(RenderPipeline::new(c, Serial).is_err());
    }

    #[test]
    fn render_produces_matching_shapes() {
        let render = RenderPipeline::new(small(), Serial).unwrap().render().unwrap();
        assert_eq!((render.grid.width(), render.grid.height()), (32, 24));
        assert_eq!((render.pixels.width(), render.pixels.height()), (32, 24));
    }

    #[test]
    fn render_is_idempotent() {
        let pipeline = RenderPipeline::new(small(), Threaded::new(4, 3)).unwrap();
        let first = pipeline.render().unwrap();
        let second = pipeline.render().unwrap();
        assert_eq!(first.pixels, second.pixels);
        assert_eq!(first.grid, second.grid);
    }

    #[test]
    fn executors_produce_identical_images() {
        let serial = RenderPipeline::new(small(), Serial).unwrap().render().unwrap();
        let threaded = RenderPipeline::threaded(small()).unwrap().render().unwrap();
        assert_eq!(serial.pixels, threaded.pixels);
    }

    #[test]
    fn one_repeat_renders_all_white() {
        let mut c = small();
        c.gradient_repeats = 1;
        let render = RenderPipeline::new(c, Serial).unwrap().render().unwrap();
        assert!(render.pixels.pixels().iter().all(|&p| p == [255, 255, 255]));
    }

    #[test]
    fn sinks_receive_the_rendered_image() {
        let pipeline = RenderPipeline::new(small(), Serial).unwrap();
        let mut sink = Collect(vec![]);
        let grid = pipeline.render_to(&mut sink).unwrap();
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0], pipeline.render().unwrap().pixels);
        assert_eq!(grid.width(), pipeline.config().width);
    }
}
