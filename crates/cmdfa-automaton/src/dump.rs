//! Human-readable automaton dump for debugging and snapshot tests.
//!
//! ```text
//! [symbols]
//!   #0 a
//!   #1 any(##any)
//!
//! [states]
//!   0   #0→1
//!   1 ◉ #1→1
//! ```
//!
//! States are listed in construction order; `◉` marks final states and each
//! `#column→state` pair is a valid transition.

use std::fmt::Write as _;

use cmdfa_core::Colors;

use crate::format::{FINAL_MARK, width_for_count};
use crate::{Automaton, StateId};

/// Generate a human-readable dump of the automaton.
pub fn dump<U>(automaton: &Automaton<U>, colors: Colors) -> String {
    let mut out = String::new();
    dump_symbols(&mut out, automaton, colors);
    out.push('\n');
    dump_states(&mut out, automaton, colors);
    out
}

fn dump_symbols<U>(out: &mut String, automaton: &Automaton<U>, colors: Colors) {
    let Colors {
        blue, dim, reset, ..
    } = colors;
    let width = width_for_count(automaton.symbols().len());

    out.push_str("[symbols]\n");
    for (column, symbol) in automaton.symbols().iter() {
        writeln!(
            out,
            "  {dim}#{column:<width$}{reset} {blue}{}{reset}",
            symbol.particle()
        )
        .unwrap();
    }
}

fn dump_states<U>(out: &mut String, automaton: &Automaton<U>, colors: Colors) {
    let Colors {
        green, dim, reset, ..
    } = colors;
    let width = width_for_count(automaton.state_count());

    out.push_str("[states]\n");
    for index in 0..automaton.state_count() {
        let state = StateId::new(index);
        let mark = if automaton.is_final_state(state) {
            FINAL_MARK
        } else {
            " "
        };
        let mut line = format!("  {index:>width$} {green}{mark}{reset}");
        for (column, next) in automaton.transitions(state) {
            write!(line, " {dim}#{column}→{reset}{next}").unwrap();
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}
