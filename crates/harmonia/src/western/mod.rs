pub mod signs;
pub mod symbols;

pub use signs::{degrees_to_coords, degrees_to_sign_coords, format_arc, zodiac_degree, ZodiacSign};
pub use symbols::symbol_for;
