//! Adapter turning a closure into a [`Sink`].

use crate::sinks::traits::{Sink, SinkResult};
use std::fmt;

/// Calls a closure with every dispatched batch of lines.
pub struct FunctionSink<F> {
    f: F,
}

impl<F> FunctionSink<F>
where
    F: Fn(&[String]) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FunctionSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSink").finish_non_exhaustive()
    }
}

impl<F> Sink for FunctionSink<F>
where
    F: Fn(&[String]) + Send + Sync,
{
    fn write(&self, lines: &[String]) -> SinkResult<()> {
        (self.f)(lines);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "function"
    }
}
