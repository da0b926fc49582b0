//! Per-session state: the working-directory stack and the start time.

use std::time::{Duration, Instant};

/// Session-scoped mutable state.
///
/// The working-directory stack is ordered root-first and is never empty;
/// it is kept consistent by `cd` alone, so rendering it always yields a
/// path that resolves to an existing directory. Each interpreter instance
/// owns its session, so independent sessions can coexist in tests.
#[derive(Debug, Clone)]
pub struct Session {
    /// Root marker first, then one element per directory level.
    stack: Vec<String>,
    /// Captured once at creation; used only for uptime.
    started: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session positioned at the root.
    pub fn new() -> Self {
        Self {
            stack: vec!["/".to_string()],
            started: Instant::now(),
        }
    }

    /// Render the current working directory as a canonical path.
    ///
    /// Root renders as bare `/`, deeper locations as `/seg1/seg2/...`.
    pub fn cwd(&self) -> String {
        if self.stack.len() == 1 {
            "/".to_string()
        } else {
            format!("/{}", self.stack[1..].join("/"))
        }
    }

    /// The prompt line: the rendered working directory followed by `$ `.
    pub fn prompt(&self) -> String {
        format!("{}$ ", self.cwd())
    }

    /// Reset the stack to the root (for `cd` with no args or `cd /`).
    pub fn reset(&mut self) {
        self.stack.truncate(1);
    }

    /// Pop one level (for `cd ..`). Silent no-op at the root.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Replace the stack with root + the segments of a canonical path.
    ///
    /// The caller must have verified that `canonical` resolves to an
    /// existing directory.
    pub fn enter(&mut self, canonical: &str) {
        self.stack.truncate(1);
        self.stack.extend(
            canonical
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }

    /// Elapsed time since session creation.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stack depth including the root marker.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
