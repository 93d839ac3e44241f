pub mod analysis;
pub mod pattern;
pub mod table;

pub use analysis::PatternAnalysis;
pub use pattern::{Cluster, Pattern, PatternMember};
pub use table::{PatternTable, PatternTableEntry};
