//! Sequence generation for a single round.

use crate::numeral::NumeralSystem;
use rand::Rng;

/// An ordered, immutable run of symbol values for one round.
///
/// A sequence is generated fresh when a round starts and discarded when the
/// round ends; nothing mutates it in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    symbols: Vec<u8>,
}

impl Sequence {
    /// Generates the sequence for `round_number`.
    ///
    /// Length is `base_length + round_number`; each symbol is drawn
    /// uniformly, independently, and with replacement from
    /// `0..=system.max_symbol()`.
    pub fn generate<R: Rng>(
        round_number: u32,
        system: NumeralSystem,
        base_length: u32,
        rng: &mut R,
    ) -> Self {
        let length = (base_length + round_number) as usize;
        let max = system.max_symbol();
        let symbols = (0..length).map(|_| rng.gen_range(0..=max)).collect();
        Self { symbols }
    }

    /// Builds a sequence from explicit symbol values.
    pub fn from_symbols(symbols: Vec<u8>) -> Self {
        Self { symbols }
    }

    /// Number of symbols in the sequence.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if the sequence has no symbols. Generated sequences never are.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The raw symbol values, in order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// The canonical answer string: every symbol rendered in order with no
    /// separators.
    pub fn canonical_answer(&self, system: NumeralSystem) -> String {
        self.symbols
            .iter()
            .map(|symbol| system.render(*symbol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_SYSTEMS: [NumeralSystem; 3] = [
        NumeralSystem::Decimal,
        NumeralSystem::Hexadecimal,
        NumeralSystem::Binary,
    ];

    proptest! {
        #[test]
        fn generated_length_and_range_hold(round in 1u32..40, seed in any::<u64>()) {
            for system in ALL_SYSTEMS {
                let mut rng = StdRng::seed_from_u64(seed);
                let sequence = Sequence::generate(round, system, 5, &mut rng);
                prop_assert_eq!(sequence.len() as u32, 5 + round);
                prop_assert!(!sequence.is_empty());
                prop_assert!(sequence
                    .symbols()
                    .iter()
                    .all(|&symbol| symbol <= system.max_symbol()));
            }
        }
    }

    #[test]
    fn round_one_yields_six_symbols() {
        let mut rng = StdRng::seed_from_u64(1);
        let sequence = Sequence::generate(1, NumeralSystem::Decimal, 5, &mut rng);
        assert_eq!(sequence.len(), 6);
    }

    #[test]
    fn canonical_answer_concatenates_renders() {
        let sequence = Sequence::from_symbols(vec![3, 1, 4, 1, 5, 9]);
        assert_eq!(sequence.canonical_answer(NumeralSystem::Decimal), "314159");

        let sequence = Sequence::from_symbols(vec![10, 2, 15]);
        assert_eq!(sequence.canonical_answer(NumeralSystem::Hexadecimal), "A2F");

        let sequence = Sequence::from_symbols(vec![1, 0, 1]);
        assert_eq!(sequence.canonical_answer(NumeralSystem::Binary), "101");
    }
}
