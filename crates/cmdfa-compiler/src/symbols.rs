//! Alphabet construction.
//!
//! Leaves sharing one particle identity collapse onto a single column, in
//! order of first discovery. Each column keeps the ascending list of
//! positions it covers so subset construction only visits relevant leaves.

use indexmap::IndexMap;

use cmdfa_automaton::{ElementSymbol, SymbolMap};
use cmdfa_core::{Particle, ParticleKey};

use crate::invariants::ensure_end_of_content_column;
use crate::syntax::Leaf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ColumnKey {
    Particle(ParticleKey),
    EndOfContent,
}

#[derive(Debug)]
pub(crate) struct SymbolIndex {
    symbols: SymbolMap,
    positions: Vec<Vec<usize>>,
}

impl SymbolIndex {
    pub(crate) fn build(leaves: &[Leaf]) -> Self {
        let mut columns: IndexMap<ColumnKey, (Option<Particle>, Vec<usize>)> = IndexMap::new();
        for (position, leaf) in leaves.iter().enumerate() {
            let key = match leaf {
                Leaf::Particle(p) => ColumnKey::Particle(p.key()),
                Leaf::EndOfContent => ColumnKey::EndOfContent,
            };
            columns
                .entry(key)
                .or_insert_with(|| (leaf.particle().cloned(), Vec::new()))
                .1
                .push(position);
        }

        let trimmed = columns.pop();
        let trimmed_is_eoc = matches!(trimmed, Some((ColumnKey::EndOfContent, _)));
        ensure_end_of_content_column(trimmed_is_eoc, leaves.len().saturating_sub(1));

        let mut symbols = Vec::with_capacity(columns.len());
        let mut positions = Vec::with_capacity(columns.len());
        for (particle, covered) in columns.into_values() {
            // Only the end-of-content column lacks a particle, and it was trimmed.
            if let Some(particle) = particle {
                symbols.push(ElementSymbol::new(particle));
                positions.push(covered);
            }
        }

        Self {
            symbols: SymbolMap::new(symbols),
            positions,
        }
    }

    pub(crate) fn column_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions covered by `column`, ascending.
    pub(crate) fn positions(&self, column: usize) -> &[usize] {
        &self.positions[column]
    }

    pub(crate) fn into_symbols(self) -> SymbolMap {
        self.symbols
    }
}
