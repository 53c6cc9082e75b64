//! Subscriber callbacks for exposure events.

use std::fmt;

use crate::exposure::ExposureEvent;

/// Receives every exposure event after it has been recorded.
///
/// Called synchronously on whichever thread ran the sampling pass, with the
/// logger's lock released. Implementations that drive UI on another thread
/// must hand the event off themselves. Calling back into the logger
/// (including unsubscribing from inside `on_event`) is allowed.
pub trait ExposureListener: Send + Sync {
    fn on_event(&self, event: &ExposureEvent, formatted: &str);
}

/// Adapter turning a closure into an [`ExposureListener`].
pub struct FnListener<F>(pub F)
where
    F: Fn(&ExposureEvent, &str) + Send + Sync;

impl<F> ExposureListener for FnListener<F>
where
    F: Fn(&ExposureEvent, &str) + Send + Sync,
{
    fn on_event(&self, event: &ExposureEvent, formatted: &str) {
        (self.0)(event, formatted);
    }
}

impl<F> fmt::Debug for FnListener<F>
where
    F: Fn(&ExposureEvent, &str) + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnListener")
    }
}
