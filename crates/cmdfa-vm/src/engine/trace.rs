//! Tracing for matcher sessions.
//!
//! With [`NoopTracer`] every hook is an empty `#[inline(always)]` body, so an
//! untraced matcher compiles down to the bare table walk. [`PrintTracer`]
//! keeps one formatted line per event for debugging.

use cmdfa_automaton::{Automaton, StateId, width_for_count};
use cmdfa_core::{Colors, Particle, QName};

use super::cursor::StateRef;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: matches, rejections and the end-of-content check.
    #[default]
    Default,
    /// Verbose (-v): also session start and inputs seen after an error.
    Verbose,
    /// Very verbose (-vv): also the input name on every match.
    VeryVerbose,
}

/// Hooks called by [`Matcher`](super::Matcher) at each step of a session.
pub trait Tracer {
    /// Called when a session starts.
    fn trace_start(&mut self, state: StateId);

    /// Called after `name` moved the session from `from` to `to` via `column`.
    fn trace_transition(
        &mut self,
        from: StateId,
        column: usize,
        particle: &Particle,
        to: StateId,
        name: &QName,
    );

    /// Called when no enabled column accepts `name` in `state`.
    fn trace_no_match(&mut self, state: StateId, name: &QName);

    /// Called for an input arriving after the session already failed.
    fn trace_subsequent_error(&mut self, name: &QName);

    /// Called by the end-of-content check.
    fn trace_end(&mut self, state: StateRef, accepted: bool);
}

/// No-op tracer that gets optimized away completely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_start(&mut self, _state: StateId) {}

    #[inline(always)]
    fn trace_transition(
        &mut self,
        _from: StateId,
        _column: usize,
        _particle: &Particle,
        _to: StateId,
        _name: &QName,
    ) {
    }

    #[inline(always)]
    fn trace_no_match(&mut self, _state: StateId, _name: &QName) {}

    #[inline(always)]
    fn trace_subsequent_error(&mut self, _name: &QName) {}

    #[inline(always)]
    fn trace_end(&mut self, _state: StateRef, _accepted: bool) {}
}

/// Tracer that collects a readable session log.
#[derive(Debug, Clone)]
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    /// Width of state numbers, sized for the traced automaton.
    state_width: usize,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new<U>(automaton: &Automaton<U>, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            state_width: width_for_count(automaton.state_count()),
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn verbose(&self) -> bool {
        self.verbosity != Verbosity::Default
    }

    fn push(&mut self, line: String) {
        self.lines.push(line.trim_end().to_owned());
    }
}

impl Tracer for PrintTracer {
    fn trace_start(&mut self, state: StateId) {
        if !self.verbose() {
            return;
        }
        let Colors { dim, reset, .. } = self.colors;
        self.push(format!("{dim}start{reset}  {state}"));
    }

    fn trace_transition(
        &mut self,
        from: StateId,
        column: usize,
        particle: &Particle,
        to: StateId,
        name: &QName,
    ) {
        let Colors {
            blue,
            green,
            dim,
            reset,
            ..
        } = self.colors;
        let w = self.state_width;
        let mut line = format!(
            "{green}match{reset}  {from:>w$} → {to:<w$}  {dim}#{column}{reset} {blue}{particle}{reset}"
        );
        if self.verbosity == Verbosity::VeryVerbose {
            line.push_str(&format!("  {dim}<- {name}{reset}"));
        }
        self.push(line);
    }

    fn trace_no_match(&mut self, state: StateId, name: &QName) {
        let Colors {
            blue, red, reset, ..
        } = self.colors;
        let w = self.state_width;
        self.push(format!("{red}reject{reset} {state:>w$}  {blue}{name}{reset}"));
    }

    fn trace_subsequent_error(&mut self, name: &QName) {
        if !self.verbose() {
            return;
        }
        let Colors {
            blue, red, reset, ..
        } = self.colors;
        self.push(format!("{red}error{reset}  {blue}{name}{reset}"));
    }

    fn trace_end(&mut self, state: StateRef, accepted: bool) {
        let Colors {
            green,
            red,
            dim,
            reset,
            ..
        } = self.colors;
        let verdict = if accepted {
            format!("{green}accepted{reset}")
        } else {
            format!("{red}rejected{reset}")
        };
        self.push(format!("{dim}end{reset}    {state}  {verdict}"));
    }
}
