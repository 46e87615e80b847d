//! Unique Particle Attribution check.
//!
//! Walks every state's row and asks the overlap predicate about each pair of
//! enabled columns. Verdicts are memoized per column pair, since the same
//! pair tends to be enabled in many states. The first conflict wins.

use log::debug;

use cmdfa_automaton::{Automaton, StateId};
use cmdfa_core::{Particle, ParticleOverlap};

use crate::UpaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Unknown,
    Conflict,
    NoConflict,
}

/// Symmetric column-pair memo.
struct PairMemo {
    columns: usize,
    verdicts: Vec<Verdict>,
}

impl PairMemo {
    fn new(columns: usize) -> Self {
        Self {
            columns,
            verdicts: vec![Verdict::Unknown; columns * columns],
        }
    }

    fn get(&self, j: usize, k: usize) -> Verdict {
        self.verdicts[j * self.columns + k]
    }

    fn set(&mut self, j: usize, k: usize, verdict: Verdict) {
        self.verdicts[j * self.columns + k] = verdict;
        self.verdicts[k * self.columns + j] = verdict;
    }
}

/// Fails on the first state where two enabled columns can match a common
/// element, in (state, column pair) order.
///
/// On success returns whether any wildcard column carries a `##not` or list
/// constraint. Such a model has to be checked again if element declarations
/// added later might fall inside the wildcard.
pub fn check_unique_particle_attribution<U, O>(
    automaton: &Automaton<U>,
    overlap: &O,
) -> Result<bool, UpaError>
where
    O: ParticleOverlap + ?Sized,
{
    let particles: Vec<&Particle> = automaton
        .symbols()
        .iter()
        .map(|(_, symbol)| symbol.particle())
        .collect();
    let mut memo = PairMemo::new(particles.len());
    let mut enabled = Vec::with_capacity(particles.len());

    for index in 0..automaton.state_count() {
        let state = StateId::new(index);
        enabled.clear();
        enabled.extend(automaton.transitions(state).map(|(column, _)| column));

        for (i, &j) in enabled.iter().enumerate() {
            for &k in &enabled[i + 1..] {
                let verdict = match memo.get(j, k) {
                    Verdict::Unknown => {
                        let verdict = if overlap.overlaps(particles[j], particles[k]) {
                            Verdict::Conflict
                        } else {
                            Verdict::NoConflict
                        };
                        memo.set(j, k, verdict);
                        verdict
                    }
                    known => known,
                };

                if verdict == Verdict::Conflict {
                    debug!(
                        "UPA conflict in state {state}: #{j} `{}` vs #{k} `{}`",
                        particles[j], particles[k]
                    );
                    return Err(UpaError::Ambiguous {
                        first: particles[j].clone(),
                        second: particles[k].clone(),
                        state,
                    });
                }
            }
        }
    }

    Ok(automaton.has_loose_wildcard())
}
