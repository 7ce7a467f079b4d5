//! Throughput measurement and throttling
//!
//! [`IpsCounter`] counts dispatched instructions and produces a sample every
//! time a full [`IPS_WINDOW`] has elapsed since the previous one.

use super::constants::IPS_WINDOW;
use std::thread;
use std::time::{Duration, Instant};

/// Instructions-per-second sampler
#[derive(Debug, Clone)]
pub struct IpsCounter {
    window_start: Instant,
    count: u64,
}

impl IpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        IpsCounter {
            window_start: now,
            count: 0,
        }
    }

    /// Count one dispatched instruction
    pub fn record(&mut self) -> Option<u64> {
        self.record_at(Instant::now())
    }

    /// Count one instruction at `now`; returns a sample when the window closes
    pub fn record_at(&mut self, now: Instant) -> Option<u64> {
        self.count += 1;
        if now.duration_since(self.window_start) >= IPS_WINDOW {
            let sample = self.count;
            self.count = 0;
            self.window_start = now;
            Some(sample)
        } else {
            None
        }
    }
}

impl Default for IpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleep for the configured inter-instruction delay; zero means full speed
pub fn throttle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
