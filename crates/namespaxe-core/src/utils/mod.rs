//! Formatting helpers for namespace fields.

pub mod format;

pub use format::{convert_date, cpu_millis, display_value, with_unit};
