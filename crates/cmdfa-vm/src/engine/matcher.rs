//! Table-driven matching of child elements against a compiled content model.

use cmdfa_automaton::{Automaton, StateId};
use cmdfa_core::{Particle, QName, SubstitutionGroups};

use super::cursor::{MatchState, StateRef};
use super::trace::{NoopTracer, Tracer};

/// Steps [`MatchState`] cursors through one shared automaton.
///
/// The matcher holds no session state besides its tracer, so one matcher
/// can drive any number of cursors.
pub struct Matcher<'a, U, T: Tracer = NoopTracer> {
    automaton: &'a Automaton<U>,
    tracer: T,
}

/// Builder for [`Matcher`].
pub struct MatcherBuilder<'a, U, T: Tracer = NoopTracer> {
    automaton: &'a Automaton<U>,
    tracer: T,
}

impl<'a, U> MatcherBuilder<'a, U> {
    pub fn new(automaton: &'a Automaton<U>) -> Self {
        Self {
            automaton,
            tracer: NoopTracer,
        }
    }
}

impl<'a, U, T: Tracer> MatcherBuilder<'a, U, T> {
    /// Replace the tracer.
    pub fn tracer<T2: Tracer>(self, tracer: T2) -> MatcherBuilder<'a, U, T2> {
        MatcherBuilder {
            automaton: self.automaton,
            tracer,
        }
    }

    pub fn build(self) -> Matcher<'a, U, T> {
        Matcher {
            automaton: self.automaton,
            tracer: self.tracer,
        }
    }
}

impl<'a, U> Matcher<'a, U> {
    pub fn new(automaton: &'a Automaton<U>) -> Self {
        MatcherBuilder::new(automaton).build()
    }

    pub fn builder(automaton: &'a Automaton<U>) -> MatcherBuilder<'a, U> {
        MatcherBuilder::new(automaton)
    }
}

impl<'a, U, T: Tracer> Matcher<'a, U, T> {
    pub fn automaton(&self) -> &'a Automaton<U> {
        self.automaton
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Open a session at the start state with a zero transition count.
    pub fn start(&mut self) -> MatchState {
        let state = self.automaton.start_state();
        self.tracer.trace_start(state);
        MatchState::at(state)
    }

    /// Feed one child element to the session.
    ///
    /// Returns the matched declaration (a substitute when the resolver picks
    /// one) or wildcard. After a mismatch the cursor is in an error state and
    /// the return value is only a best-effort guess for diagnostics, found by
    /// trying every column regardless of the current state.
    pub fn one_transition<R>(
        &mut self,
        name: &QName,
        cursor: &mut MatchState,
        resolver: &R,
    ) -> Option<Particle>
    where
        R: SubstitutionGroups + ?Sized,
    {
        let from = match cursor.current {
            StateRef::Valid(state) => state,
            StateRef::FirstError | StateRef::SubsequentError => {
                cursor.current = StateRef::SubsequentError;
                self.tracer.trace_subsequent_error(name);
                return self.find_matching_particle(name, resolver);
            }
        };

        let automaton = self.automaton;
        for (column, next) in automaton.transitions(from) {
            let Some(symbol) = automaton.symbol(column) else {
                continue;
            };
            if let Some(matched) = match_particle(symbol.particle(), name, resolver) {
                cursor.transitions = cursor.transitions.saturating_add(1);
                cursor.current = StateRef::Valid(next);
                self.tracer
                    .trace_transition(from, column, symbol.particle(), next, name);
                return Some(matched);
            }
        }

        cursor.saved = Some(from);
        cursor.current = StateRef::FirstError;
        self.tracer.trace_no_match(from, name);
        self.find_matching_particle(name, resolver)
    }

    /// Whether the session may stop here: a valid, final state.
    pub fn end(&mut self, cursor: &MatchState) -> bool {
        let accepted = match cursor.current {
            StateRef::Valid(state) => self.automaton.is_final_state(state),
            StateRef::FirstError | StateRef::SubsequentError => false,
        };
        self.tracer.trace_end(cursor.current, accepted);
        accepted
    }

    /// Particles accepted next, in alphabet order. After an error this
    /// answers for the state the first mismatch happened in.
    pub fn what_can_go_here(&self, cursor: &MatchState) -> Vec<Particle> {
        cursor
            .diagnostic_state()
            .map(|state| self.automaton.particles_from(state))
            .unwrap_or_default()
    }

    /// First column, in alphabet order, whose particle accepts `name`,
    /// ignoring the transition table.
    pub fn find_matching_particle<R>(&self, name: &QName, resolver: &R) -> Option<Particle>
    where
        R: SubstitutionGroups + ?Sized,
    {
        self.automaton
            .symbols()
            .iter()
            .find_map(|(_, symbol)| match_particle(symbol.particle(), name, resolver))
    }

    pub fn is_final_state(&self, state: StateId) -> bool {
        self.automaton.is_final_state(state)
    }
}

fn match_particle<R>(particle: &Particle, name: &QName, resolver: &R) -> Option<Particle>
where
    R: SubstitutionGroups + ?Sized,
{
    match particle {
        Particle::Element(head) => resolver.matching_decl(name, head).map(Particle::Element),
        Particle::Wildcard(wildcard) => wildcard
            .accepts_namespace(name.namespace_uri())
            .then(|| particle.clone()),
    }
}
