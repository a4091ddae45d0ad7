//! The numeral systems a sequence can be generated and rendered in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The base (2, 10, or 16) used to render sequence symbols as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralSystem {
    /// Digits 0-9.
    Decimal,
    /// Digits 0-15, rendered as 0-9 and A-F.
    Hexadecimal,
    /// Digits 0-1.
    Binary,
}

impl NumeralSystem {
    /// The largest value a single symbol can hold in this system (inclusive).
    pub fn max_symbol(&self) -> u8 {
        match self {
            NumeralSystem::Decimal => 9,
            NumeralSystem::Hexadecimal => 15,
            NumeralSystem::Binary => 1,
        }
    }

    /// Renders a single symbol in this system's canonical text form.
    ///
    /// Hexadecimal symbols are always upper-cased (10 -> "A").
    pub fn render(&self, symbol: u8) -> String {
        match self {
            NumeralSystem::Decimal => symbol.to_string(),
            NumeralSystem::Hexadecimal => format!("{:X}", symbol),
            NumeralSystem::Binary => format!("{:b}", symbol),
        }
    }
}

impl fmt::Display for NumeralSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NumeralSystem::Decimal => "decimal",
            NumeralSystem::Hexadecimal => "hexadecimal",
            NumeralSystem::Binary => "binary",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_renders_base_ten() {
        for symbol in 0..=9 {
            assert_eq!(NumeralSystem::Decimal.render(symbol), symbol.to_string());
        }
    }

    #[test]
    fn hexadecimal_renders_upper_case() {
        assert_eq!(NumeralSystem::Hexadecimal.render(10), "A");
        assert_eq!(NumeralSystem::Hexadecimal.render(15), "F");
        assert_eq!(NumeralSystem::Hexadecimal.render(9), "9");
    }

    #[test]
    fn binary_renders_single_bits() {
        assert_eq!(NumeralSystem::Binary.render(0), "0");
        assert_eq!(NumeralSystem::Binary.render(1), "1");
    }

    #[test]
    fn rendering_is_deterministic() {
        // Same (symbol, system) input always yields the same string.
        for symbol in 0..=15 {
            assert_eq!(
                NumeralSystem::Hexadecimal.render(symbol),
                NumeralSystem::Hexadecimal.render(symbol)
            );
        }
    }

    #[test]
    fn display_names_are_lowercase() {
        assert_eq!(NumeralSystem::Decimal.to_string(), "decimal");
        assert_eq!(NumeralSystem::Hexadecimal.to_string(), "hexadecimal");
        assert_eq!(NumeralSystem::Binary.to_string(), "binary");
    }
}
