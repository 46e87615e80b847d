//! Alphabet of a compiled content model.
//!
//! One column per distinct particle, in order of first appearance in the
//! content model. The end-of-content sentinel never appears here.

use cmdfa_core::{Particle, ParticleKind};

/// One alphabet column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSymbol {
    particle: Particle,
}

impl ElementSymbol {
    pub fn new(particle: Particle) -> Self {
        Self { particle }
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn kind(&self) -> ParticleKind {
        self.particle.kind()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    symbols: Box<[ElementSymbol]>,
}

impl SymbolMap {
    pub fn new(symbols: Vec<ElementSymbol>) -> Self {
        Self {
            symbols: symbols.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn get(&self, column: usize) -> Option<&ElementSymbol> {
        self.symbols.get(column)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Columns with their index, in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ElementSymbol)> {
        self.symbols.iter().enumerate()
    }

    /// Column holding `particle`, by identity.
    pub fn column_of(&self, particle: &Particle) -> Option<usize> {
        self.symbols.iter().position(|s| s.particle() == particle)
    }
}
