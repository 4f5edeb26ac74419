//! Unique per-invocation local sinks for downloaded content.

mod guard;
mod registry;

pub use guard::SpoolGuard;
pub use registry::SpoolRegistry;
