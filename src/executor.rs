// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parallel-for over a 2-D index range.
//!
//! A row-major buffer is cut into tiles of whole rows.  Every row is
//! handed to the worker function exactly once, together with its row
//! index, and no two calls ever see the same cells, so the workers
//! need no coordination beyond picking up the next tile.

use std::slice::ChunksMut;
use std::iter::Enumerate;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::errors::RenderError;

/// Something that can run a per-row function over every row of a
/// buffer.  Implementations decide how the rows are spread over
/// execution units; callers may not rely on any ordering.
pub trait Executor: Sync {
    /// Calls `f(y, row)` once for every row `y` of `buffer`, where
    /// `buffer` is `width` cells wide.
    fn for_each_row<T, F>(&self, buffer: &mut [T], width: usize, f: F) -> Result<(), RenderError>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync;
}

fn check_shape<T>(buffer: &[T], width: usize) -> Result<(), RenderError> {
    if width == 0 || buffer.len() % width != 0 {
        return Err(RenderError::RaggedBuffer {
            len: buffer.len(),
            width,
        });
    }
    Ok(())
}

/// Runs every row on the calling thread, top to bottom.
#[derive(Copy, Clone, Debug, Default)]
pub struct Serial;

impl Executor for Serial {
    fn for_each_row<T, F>(&self, buffer: &mut [T], width: usize, f: F) -> Result<(), RenderError>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        check_shape(buffer, width)?;
        for (y, row) in buffer.chunks_mut(width).enumerate() {
            f(y, row);
        }
        Ok(())
    }
}

type TileQueue<'a, T> = Arc<Mutex<Enumerate<ChunksMut<'a, T>>>>;

/// Spreads tiles of rows over a fixed number of scoped threads.  Each
/// thread pulls the next unclaimed tile off a shared queue until none
/// are left, so a slow tile never holds up the rest of the image.
#[derive(Copy, Clone, Debug)]
pub struct Threaded {
    threads: usize,
    rows_per_tile: usize,
}

impl Threaded {
    /// An executor with `threads` workers handing out `rows_per_tile`
    /// rows at a time.  Both are raised to at least 1.
    pub fn new(threads: usize, rows_per_tile: usize) -> Threaded {
        Threaded {
            threads: threads.max(1),
            rows_per_tile: rows_per_tile.max(1),
        }
    }

    /// The number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for Threaded {
    /// One worker per logical CPU, sixteen rows to a tile.
    fn default() -> Threaded {
        Threaded::new(num_cpus::get(), 16)
    }
}

impl Executor for Threaded {
    fn for_each_row<T, F>(&self, buffer: &mut [T], width: usize, f: F) -> Result<(), RenderError>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        check_shape(buffer, width)?;
        // A tile never holds more rows than the buffer does, so the tile
        // length stays within the buffer length.
        let rows = buffer.len() / width;
        let rows_per_tile = self.rows_per_tile.min(rows.max(1));
        let tile_len = width * rows_per_tile;
        let tile_count = rows / rows_per_tile + usize::from(rows % rows_per_tile != 0);
        debug!(
            "dispatching {} tiles of {} rows to {} threads",
            tile_count, rows_per_tile, self.threads
        );

        let tiles: TileQueue<T> = Arc::new(Mutex::new(buffer.chunks_mut(tile_len).enumerate()));
        let f = &f;
        crossbeam::scope(|spawner| {
            for _ in 0..self.threads.min(tile_count) {
                let tiles = tiles.clone();
                spawner.spawn(move |_| loop {
                    let tile = match tiles.lock() {
                        Ok(mut queue) => queue.next(),
                        Err(_) => None,
                    };
                    match tile {
                        Some((index, tile)) => {
                            let first_row = index * rows_per_tile;
                            for (offset, row) in tile.chunks_mut(width).enumerate() {
                                f(first_row + offset, row);
                            }
                        }
                        None => {
                            break;
                        }
                    }
                });
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp<E: Executor>(executor: &E, width: usize, height: usize) -> Vec<(usize, usize)> {
        let mut buffer = vec![(usize::MAX, usize::MAX); width * height];
        executor
            .for_each_row(&mut buffer, width, |y, row| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = (x, y);
                }
            })
            .unwrap();
        buffer
    }

    fn expected(width: usize, height: usize) -> Vec<(usize, usize)> {
        itertools::iproduct!(0..height, 0..width)
            .map(|(y, x)| (x, y))
            .collect()
    }

    #[test]
    fn serial_visits_every_cell_once() {
        assert_eq!(stamp(&Serial, 7, 5), expected(7, 5));
    }

    #[test]
    fn threaded_visits_every_cell_once() {
        assert_eq!(stamp(&Threaded::new(4, 3), 13, 29), expected(13, 29));
    }

    #[test]
    fn threaded_handles_more_threads_than_tiles() {
        assert_eq!(stamp(&Threaded::new(32, 16), 5, 2), expected(5, 2));
    }

    #[test]
    fn threaded_handles_huge_tiles() {
        assert_eq!(stamp(&Threaded::new(3, usize::MAX), 9, 7), expected(9, 7));
        assert_eq!(stamp(&Threaded::new(3, usize::MAX), 4, 0), expected(4, 0));
    }

    #[test]
    fn threaded_raises_zero_settings() {
        let t = Threaded::new(0, 0);
        assert_eq!(t.threads(), 1);
        assert_eq!(stamp(&t, 3, 3), expected(3, 3));
    }

    #[test]
    fn ragged_buffers_are_rejected() {
        let mut buffer = vec![0u8; 10];
        let r = Serial.for_each_row(&mut buffer, 3, |_, _| {});
        assert!(r.is_err());
        let r = Threaded::new(2, 1).for_each_row(&mut buffer, 0, |_, _| {});
        assert!(r.is_err());
    }

    #[test]
    fn worker_panics_are_reported() {
        let mut buffer = vec![0u8; 16];
        let r = Threaded::new(2, 1).for_each_row(&mut buffer, 4, |y, _| {
            if y == 2 {
                panic!("boom");
            }
        });
        match r {
            Err(RenderError::WorkerPanicked) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
