pub mod composer;
pub mod delta;

pub use composer::{compose_chart, ChartSpec};
pub use delta::{compute_delta, DeltaSummary};
