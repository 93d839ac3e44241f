pub mod data;
pub mod point;

pub use data::{letter_for, Chart, ChartId, ChartObject, MultiChart};
pub use point::{ChartError, Point};
