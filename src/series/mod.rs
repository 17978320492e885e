//! Series control: chaining games into a best-of-N series.

mod controller;

pub use controller::{SeriesController, SeriesStatus};
