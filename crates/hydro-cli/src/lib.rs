//! CLI library components for the sensor dashboard.

pub mod logging;
pub mod render;
