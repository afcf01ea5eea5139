//! Clock abstraction
//!
//! This module defines the trait seam that makes "now" injectable, so the
//! daily withdrawal counter and journal timestamps are testable without
//! waiting for calendar days to pass.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current instant
///
/// The engine reads every timestamp through this trait. Production uses
/// [`SystemClock`]; tests use [`ManualClock`] and move time explicitly.
pub trait Clock {
    /// The current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for tests and scripted sessions
///
/// Clones share the same underlying instant, so a test can keep one handle
/// while the engine owns another and still advance time mid-scenario.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            current: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        self.current.set(instant);
    }

    /// Move forward by a duration
    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}
