//! Test support utilities
//!
//! This module provides utilities for capturing console output during tests.
//! It's only available when the `test-support` feature is enabled.

use crate::ConsoleTarget;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// An in-memory writer whose clones share one buffer
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Console target that writes into this buffer
    pub fn target(&self) -> ConsoleTarget {
        ConsoleTarget::writer(self.clone())
    }

    /// Get all captured output
    pub fn logs(&self) -> String {
        String::from_utf8_lossy(&self.logs.lock()).into_owned()
    }

    /// Captured output split into lines
    pub fn lines(&self) -> Vec<String> {
        self.logs().lines().map(str::to_owned).collect()
    }

    /// Clear captured output
    pub fn clear(&self) {
        self.logs.lock().clear();
    }

    /// Check if the output contains a specific string
    pub fn contains(&self, text: &str) -> bool {
        self.logs().contains(text)
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logs.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
