//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Bounded worker pool for PNG encoding.
//!
//! `submit` blocks under backpressure once the bounded channel fills;
//! `join` drains every in-flight task and reports the first failure, if
//! any. The extract/hash/seen-map step stays on the driver thread; workers
//! only ever see an owned image and a destination path.

use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender};

use crate::error::{TileError, TileResult};
use crate::raster::Image;

enum Job {
    Encode { image: Image, path: PathBuf },
    Shutdown,
}

/// A bounded pool of encoder threads.
pub struct WorkerPool {
    sender: Sender<Job>,
    handles: Vec<JoinHandle<()>>,
    failures: crossbeam_channel::Receiver<TileError>,
}

impl WorkerPool {
    /// Spawn `workers` encoder threads, with a bounded channel of capacity
    /// `queue_depth`.
    pub fn new(workers: usize, queue_depth: usize) -> Self {
        let (sender, receiver) = bounded::<Job>(queue_depth);
        let (fail_tx, fail_rx) = crossbeam_channel::unbounded::<TileError>();

        let handles = (0..workers.max(1))
            .map(|id| {
                let receiver = receiver.clone();
                let fail_tx = fail_tx.clone();
                std::thread::Builder::new()
                    .name(format!("tile-pyramid-encoder-{id}"))
                    .spawn(move || loop {
                        match receiver.recv() {
                            Ok(Job::Encode { image, path }) => {
                                tracing::trace!(path = %path.display(), "encoding tile");
                                if let Err(source) = image.encode_png(&path) {
                                    tracing::warn!(path = %path.display(), error = %source, "tile encode failed");
                                    let _ = fail_tx.send(source);
                                }
                            }
                            Ok(Job::Shutdown) | Err(_) => break,
                        }
                    })
                    .expect("failed to spawn encoder thread")
            })
            .collect();

        Self {
            sender,
            handles,
            failures: fail_rx,
        }
    }

    /// Default-sized pool: one worker per available core, a queue depth of
    /// twice the worker count.
    pub fn default_sized() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers, workers * 2)
    }

    /// Submit an encode task. Blocks if the bounded queue is full.
    pub fn submit(&self, image: Image, path: PathBuf) {
        // The only send error is a disconnected receiver, which only
        // happens after `join` has already torn the pool down.
        let _ = self.sender.send(Job::Encode { image, path });
    }

    /// Drain all in-flight work and return the first failure seen, if any.
    /// The pool is unusable after this call.
    pub fn join(self) -> TileResult<()> {
        for _ in &self.handles {
            let _ = self.sender.send(Job::Shutdown);
        }
        for handle in self.handles {
            let _ = handle.join();
        }
        self.failures.try_recv().map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn join_succeeds_with_no_work() {
        let pool = WorkerPool::new(2, 4);
        pool.join().unwrap();
    }

    #[test]
    fn submit_and_join_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let pool = WorkerPool::new(2, 4);
        for i in 0..4 {
            let img = Image::filled(2, 2, Rgba([1, 2, 3, 255]));
            pool.submit(img, dir.path().join(format!("{i}.png")));
        }
        pool.join().unwrap();
        for i in 0..4 {
            assert!(dir.path().join(format!("{i}.png")).exists());
        }
    }

    #[test]
    fn join_reports_encode_failure() {
        // Encoding to a path whose parent directory does not exist fails.
        let pool = WorkerPool::new(1, 2);
        let img = Image::filled(1, 1, Rgba([0, 0, 0, 0]));
        pool.submit(img, PathBuf::from("/nonexistent-dir-xyz/tile.png"));
        let result = pool.join();
        assert!(result.is_err());
    }
}
