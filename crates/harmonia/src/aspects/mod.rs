pub mod resonance;
pub mod table;
pub mod types;

pub use resonance::{ResonanceBatch, ResonanceError};
pub use table::{AspectTable, AspectTableEntry};
pub use types::{Aspect, PrecisionClass};
