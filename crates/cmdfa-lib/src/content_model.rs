//! Shared handle over a compiled content model.

use std::sync::Arc;

use cmdfa_automaton::{Automaton, StateId};
use cmdfa_compiler::{Compiler, Node, check_unique_particle_attribution};
use cmdfa_core::{Colors, Particle, ParticleOverlap, QName, SchemaOverlap, SubstitutionGroups};
use cmdfa_vm::{MatchState, Matcher};

use crate::Result;
use crate::model::{ModelLoader, parse_model};

/// A compiled content model, cheap to clone and safe to share across threads.
///
/// The automaton is immutable; every validation session keeps its own
/// [`MatchState`] obtained from [`start_content_model`](Self::start_content_model).
pub struct ContentModel<U = ()> {
    automaton: Arc<Automaton<U>>,
}

impl<U> Clone for ContentModel<U> {
    fn clone(&self) -> Self {
        Self {
            automaton: Arc::clone(&self.automaton),
        }
    }
}

impl ContentModel {
    /// Parse a JSON description (see [`RawParticle`](crate::RawParticle)) and compile it.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw = parse_model(json)?;
        let tree = ModelLoader::new().load(&raw)?;
        Self::compile(&tree, ())
    }
}

impl<U> ContentModel<U> {
    /// Compile `tree` with default options.
    pub fn compile(tree: &Node, user_data: U) -> Result<Self> {
        Self::compile_with(&Compiler::new(), tree, user_data)
    }

    pub fn compile_with(compiler: &Compiler, tree: &Node, user_data: U) -> Result<Self> {
        let automaton = compiler.compile(tree, user_data)?;
        Ok(Self::from_automaton(automaton))
    }

    pub fn from_automaton(automaton: Automaton<U>) -> Self {
        Self {
            automaton: Arc::new(automaton),
        }
    }

    pub fn automaton(&self) -> &Automaton<U> {
        &self.automaton
    }

    /// Untraced matcher over this model.
    pub fn matcher(&self) -> Matcher<'_, U> {
        Matcher::new(&self.automaton)
    }

    /// New session cursor at the start state; its transition counter is zero.
    pub fn start_content_model(&self) -> MatchState {
        self.matcher().start()
    }

    /// Advance `cursor` by one child element. See [`Matcher::one_transition`].
    pub fn one_transition<R>(
        &self,
        name: &QName,
        cursor: &mut MatchState,
        resolver: &R,
    ) -> Option<Particle>
    where
        R: SubstitutionGroups + ?Sized,
    {
        self.matcher().one_transition(name, cursor, resolver)
    }

    /// Whether the content seen so far is complete.
    pub fn end_content_model(&self, cursor: &MatchState) -> bool {
        self.matcher().end(cursor)
    }

    pub fn is_final_state(&self, state: StateId) -> bool {
        self.automaton.is_final_state(state)
    }

    pub fn what_can_go_here(&self, cursor: &MatchState) -> Vec<Particle> {
        self.matcher().what_can_go_here(cursor)
    }

    /// Successful transitions in the session owning `cursor`.
    pub fn one_transition_counter(&self, cursor: &MatchState) -> u32 {
        cursor.transition_count()
    }

    /// UPA check with the schema overlap rules over `resolver`.
    ///
    /// `Ok(true)` means the model passed but holds a `##not` or list wildcard,
    /// so it must be checked again once new global elements are declared.
    pub fn check_unique_particle_attribution<R>(&self, resolver: &R) -> Result<bool>
    where
        R: SubstitutionGroups + ?Sized,
    {
        self.check_unique_particle_attribution_with(&SchemaOverlap::new(resolver))
    }

    /// UPA check with a caller-supplied overlap predicate.
    pub fn check_unique_particle_attribution_with<O>(&self, overlap: &O) -> Result<bool>
    where
        O: ParticleOverlap + ?Sized,
    {
        Ok(check_unique_particle_attribution(&self.automaton, overlap)?)
    }

    pub fn user_data(&self) -> &U {
        self.automaton.user_data()
    }

    /// Human-readable dump of the automaton.
    pub fn dump(&self, colors: Colors) -> String {
        cmdfa_automaton::dump(&self.automaton, colors)
    }
}
