//! Shared work distribution for the worker-pool strategy.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe pixel cursor plus a completion counter.
///
/// The only mutable state shared between render workers: a linear cursor
/// handing out each (column, row) pair exactly once, and a counter the
/// workers bump as pixels finish.
pub struct PixelManager {
    next: AtomicU64,
    completed: AtomicU64,
    total: u64,
    width: u32,
}

impl PixelManager {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            next: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            total: width as u64 * height as u64,
            width,
        }
    }

    /// Claim the next unclaimed pixel, or `None` once the grid is exhausted.
    pub fn next_pixel(&self) -> Option<(u32, u32)> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }
        let x = (index % self.width as u64) as u32;
        let y = (index / self.width as u64) as u32;
        Some((x, y))
    }

    /// Report one finished pixel.
    pub fn pixel_done(&self) {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let step = (self.total / 10).max(1);
        if done % step == 0 || done == self.total {
            log::debug!("rendered {}/{} pixels", done, self.total);
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
