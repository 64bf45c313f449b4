extern crate clap;
extern crate env_logger;
extern crate mandelbrot_gradient;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot_gradient::sink::{frame_name, write_grid};
use mandelbrot_gradient::{
    ColorRamp, ImageFileSink, RenderConfig, RenderError, RenderPipeline, Threaded, Viewport,
};
use num::Complex;
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const FRAME: &str = "frame";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const REPEATS: &str = "repeats";
const GRID: &str = "grid";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Supersampled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (default: the zero-padded frame number, as PNG)"),
        )
        .arg(
            Arg::with_name(FRAME)
                .required(false)
                .long(FRAME)
                .short("f")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        u32::max_value(),
                        "Could not parse frame number",
                        "Frame number out of range",
                    )
                })
                .help("Frame number used to name the output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .allow_hyphen_values(true)
                .short("l")
                .takes_value(true)
                .default_value("-1.574590111060041378352,0.000273836775278080587")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .allow_hyphen_values(true)
                .short("r")
                .takes_value(true)
                .default_value("-1.574589863820997445596,0.000274022091563295267")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .allow_hyphen_values(true)
                .short("c")
                .takes_value(true)
                .requires(ZOOM)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the image; overrides the corners"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .requires(CENTER)
                .validator(|s| match f64::from_str(&s) {
                    Ok(z) if z > 0.0 => Ok(()),
                    Ok(_) => Err("Zoom must be positive".to_string()),
                    Err(_) => Err("Could not parse zoom".to_string()),
                })
                .help("Pixels per unit of the complex plane, used with --center"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("15000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        10_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 10000000",
                    )
                })
                .help("Maximum number of iterations per sample"),
        )
        .arg(
            Arg::with_name(REPEATS)
                .required(false)
                .long(REPEATS)
                .short("g")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        u32::max_value(),
                        "Could not parse gradient repeats",
                        "Gradient repeats must be at least 1",
                    )
                })
                .help("Escape iterations per cycle of the color gradient"),
        )
        .arg(
            Arg::with_name(GRID)
                .required(false)
                .long(GRID)
                .takes_value(true)
                .help("Also write the raw escape grid to this file as a graymap"),
        )
        .get_matches()
}

// Every value below has already been checked by its validator.
fn config(matches: &ArgMatches) -> Result<RenderConfig, RenderError> {
    let (width, height) = parse_pair::<u16>(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((0, 0));
    let max_iterations = matches
        .value_of(ITERATIONS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or(0);
    let gradient_repeats = matches
        .value_of(REPEATS)
        .and_then(|s| u32::from_str(s).ok())
        .unwrap_or(0);

    let viewport = match (
        matches.value_of(CENTER).and_then(parse_complex),
        matches.value_of(ZOOM).and_then(|s| f64::from_str(s).ok()),
    ) {
        (Some(center), Some(zoom)) => Viewport::from_center(center, zoom, width, height)?,
        _ => {
            let zero = Complex::new(0.0, 0.0);
            let leftlower = matches.value_of(LEFTLOWER).and_then(parse_complex);
            let rightupper = matches.value_of(RIGHTUPPER).and_then(parse_complex);
            Viewport::from_corners(leftlower.unwrap_or(zero), rightupper.unwrap_or(zero))?
        }
    };

    Ok(RenderConfig {
        width,
        height,
        max_iterations,
        gradient_repeats,
        viewport,
        ramp: ColorRamp::default(),
    })
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let threads = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or_else(num_cpus::get);
    let output = match matches.value_of(OUTPUT) {
        Some(output) => output.to_string(),
        None => {
            let frame = matches
                .value_of(FRAME)
                .and_then(|s| u32::from_str(s).ok())
                .unwrap_or(1);
            frame_name(frame, 4, "png")
        }
    };

    let pipeline = RenderPipeline::new(config(matches)?, Threaded::new(threads, 16))?;
    let mut sink = ImageFileSink::new(&output);
    let grid = pipeline.render_to(&mut sink)?;
    if let Some(path) = matches.value_of(GRID) {
        write_grid(Path::new(path), &grid)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
