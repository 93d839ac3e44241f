//! Glyphs for well-known chart points, looked up by name.

use std::collections::HashMap;

const UNKNOWN_SYMBOL: char = '*';

lazy_static::lazy_static! {
    static ref SYMBOLS: HashMap<&'static str, char> = {
        let table: &[(&[&str], char)] = &[
            (&["sun", "солнце"], '☉'),
            (&["moon", "луна"], '☽'),
            (&["mercury", "меркурий"], '☿'),
            (&["venus", "венера"], '♀'),
            (&["mars", "марс"], '♂'),
            (&["ceres", "церера"], '⚳'),
            (&["jupiter", "юпитер"], '♃'),
            (&["saturn", "сатурн"], '♄'),
            (&["chiron", "хирон"], '⚷'),
            (&["uranus", "уран"], '♅'),
            (&["neptune", "нептун"], '♆'),
            (&["pluto", "плутон"], '⯓'),
            (&["eris", "эрида"], '⯰'),
            (&["north_node", "nnode", "rahu", "раху"], '☊'),
            (&["south_node", "snode", "ketu", "кету"], '☋'),
            (&["lilith", "лилит"], '⚸'),
            (&["asc", "ascendant", "асц", "асцендент"], 'Ⓐ'),
            (&["mc", "мс"], 'Ⓜ'),
        ];
        let mut symbols = HashMap::new();
        for (aliases, symbol) in table {
            for alias in *aliases {
                symbols.insert(*alias, *symbol);
            }
        }
        symbols
    };
}

/// Glyph for a point name (case-insensitive), `*` when the name is unknown.
pub fn symbol_for(name: &str) -> char {
    SYMBOLS
        .get(name.to_lowercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_SYMBOL)
}
