//! Content-model tree as handed over by the schema particle compiler.
//!
//! A closed set of variants: leaves carry a shared particle, interior nodes
//! are binary sequence/choice or one of the three unary repetitions.
//! Occurrence ranges other than `?`, `*` and `+` are expanded up front by
//! [`Node::repeat`].

use std::fmt;
use std::sync::Arc;

use cmdfa_core::{ElementDecl, Particle, Wildcard};

#[derive(Debug)]
pub enum Node {
    Leaf(Particle),
    Sequence(Box<Node>, Box<Node>),
    Choice(Box<Node>, Box<Node>),
    ZeroOrMore(Box<Node>),
    OneOrMore(Box<Node>),
    ZeroOrOne(Box<Node>),
}

impl Node {
    pub fn leaf(particle: impl Into<Particle>) -> Self {
        Self::Leaf(particle.into())
    }

    pub fn element(decl: Arc<ElementDecl>) -> Self {
        Self::Leaf(Particle::Element(decl))
    }

    pub fn wildcard(wildcard: Arc<Wildcard>) -> Self {
        Self::Leaf(Particle::Wildcard(wildcard))
    }

    pub fn sequence(first: Node, second: Node) -> Self {
        Self::Sequence(Box::new(first), Box::new(second))
    }

    pub fn choice(left: Node, right: Node) -> Self {
        Self::Choice(Box::new(left), Box::new(right))
    }

    pub fn zero_or_more(node: Node) -> Self {
        Self::ZeroOrMore(Box::new(node))
    }

    pub fn one_or_more(node: Node) -> Self {
        Self::OneOrMore(Box::new(node))
    }

    pub fn zero_or_one(node: Node) -> Self {
        Self::ZeroOrOne(Box::new(node))
    }

    /// Left-nested sequence of `items`; `None` when empty.
    pub fn sequence_of(items: impl IntoIterator<Item = Node>) -> Option<Self> {
        items.into_iter().reduce(Self::sequence)
    }

    /// Left-nested choice of `items`; `None` when empty.
    pub fn choice_of(items: impl IntoIterator<Item = Node>) -> Option<Self> {
        items.into_iter().reduce(Self::choice)
    }

    /// Expand an occurrence range `{min, max}` (`None` = unbounded).
    ///
    /// Copies of `node` share its particles, so they land on the same
    /// alphabet columns. Optional tail copies nest (`x, (x, x?)?`) to keep
    /// the expansion deterministic. Returns `None` for `max = 0`.
    ///
    /// # Panics
    /// Panics if `max < min`.
    pub fn repeat(node: Node, min: u32, max: Option<u32>) -> Option<Self> {
        match (min, max) {
            (_, Some(0)) => None,
            (0, Some(1)) => Some(Self::zero_or_one(node)),
            (0, None) => Some(Self::zero_or_more(node)),
            (1, Some(1)) => Some(node),
            (1, None) => Some(Self::one_or_more(node)),
            (min, None) => {
                let required: Vec<Node> = (1..min).map(|_| node.clone()).collect();
                Self::sequence_of(
                    required
                        .into_iter()
                        .chain(std::iter::once(Self::one_or_more(node))),
                )
            }
            (min, Some(max)) => {
                crate::invariants::ensure_occurrence_range(min, max);
                let mut optional: Option<Node> = None;
                for _ in min..max {
                    optional = Some(match optional {
                        None => Self::zero_or_one(node.clone()),
                        Some(inner) => Self::zero_or_one(Self::sequence(node.clone(), inner)),
                    });
                }
                let required = (0..min).map(|_| node.clone());
                Self::sequence_of(required.chain(optional))
            }
        }
    }

    /// Number of leaf occurrences, i.e. Glushkov positions before augmentation.
    pub fn leaf_count(&self) -> usize {
        self.post_order()
            .into_iter()
            .filter(|node| matches!(node, Self::Leaf(_)))
            .count()
    }

    pub fn is_nullable(&self) -> bool {
        self.fold(|node| match node {
            Folded::Leaf(_) => false,
            Folded::Sequence(a, b) => a && b,
            Folded::Choice(a, b) => a || b,
            Folded::ZeroOrMore(_) | Folded::ZeroOrOne(_) => true,
            Folded::OneOrMore(x) => x,
        })
    }

    /// Leaf particles in position order.
    pub fn leaves(&self) -> Vec<&Particle> {
        self.post_order()
            .into_iter()
            .filter_map(|node| match node {
                Self::Leaf(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Nodes with children before parents, leaves left to right.
    ///
    /// Counted ranges expand into chains as deep as `max_occurs`, so every
    /// walk over a tree goes through an explicit stack instead of recursion.
    fn post_order(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            match node {
                Self::Leaf(_) => {}
                Self::Sequence(a, b) | Self::Choice(a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
                Self::ZeroOrMore(x) | Self::OneOrMore(x) | Self::ZeroOrOne(x) => stack.push(x),
            }
        }
        out.reverse();
        out
    }

    /// Bottom-up evaluation: `combine` sees each node with its children
    /// already reduced.
    pub(crate) fn fold<'a, T>(&'a self, mut combine: impl FnMut(Folded<'a, T>) -> T) -> T {
        let mut values: Vec<T> = Vec::new();
        for node in self.post_order() {
            let folded = match node {
                Self::Leaf(p) => Folded::Leaf(p),
                Self::Sequence(..) | Self::Choice(..) => {
                    let (b, a) = (pop_value(&mut values), pop_value(&mut values));
                    if matches!(node, Self::Sequence(..)) {
                        Folded::Sequence(a, b)
                    } else {
                        Folded::Choice(a, b)
                    }
                }
                Self::ZeroOrMore(_) => Folded::ZeroOrMore(pop_value(&mut values)),
                Self::OneOrMore(_) => Folded::OneOrMore(pop_value(&mut values)),
                Self::ZeroOrOne(_) => Folded::ZeroOrOne(pop_value(&mut values)),
            };
            values.push(combine(folded));
        }
        pop_value(&mut values)
    }

    /// Some particle of this subtree. Every tree bottoms out in a leaf.
    fn any_particle(&self) -> &Particle {
        let mut node = self;
        loop {
            match node {
                Self::Leaf(p) => return p,
                Self::Sequence(a, _) | Self::Choice(a, _) => node = &**a,
                Self::ZeroOrMore(x) | Self::OneOrMore(x) | Self::ZeroOrOne(x) => node = &**x,
            }
        }
    }

    /// Move the children out into `out`, leaving `filler` leaves behind.
    fn detach_children(&mut self, filler: &Particle, out: &mut Vec<Node>) {
        let mut take = |child: &mut Box<Node>| {
            out.push(std::mem::replace(&mut **child, Self::Leaf(filler.clone())));
        };
        match self {
            Self::Leaf(_) => {}
            Self::Sequence(a, b) | Self::Choice(a, b) => {
                take(a);
                take(b);
            }
            Self::ZeroOrMore(x) | Self::OneOrMore(x) | Self::ZeroOrOne(x) => take(x),
        }
    }
}

/// One node during [`Node::fold`], children replaced by their results.
pub(crate) enum Folded<'a, T> {
    Leaf(&'a Particle),
    Sequence(T, T),
    Choice(T, T),
    ZeroOrMore(T),
    OneOrMore(T),
    ZeroOrOne(T),
}

fn pop_value<T>(values: &mut Vec<T>) -> T {
    crate::invariants::ensure_fold_value(values.pop())
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.fold(|node| match node {
            Folded::Leaf(p) => Self::Leaf(p.clone()),
            Folded::Sequence(a, b) => Self::sequence(a, b),
            Folded::Choice(a, b) => Self::choice(a, b),
            Folded::ZeroOrMore(x) => Self::zero_or_more(x),
            Folded::OneOrMore(x) => Self::one_or_more(x),
            Folded::ZeroOrOne(x) => Self::zero_or_one(x),
        })
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        if matches!(self, Self::Leaf(_)) {
            return;
        }
        let filler = self.any_particle().clone();
        let mut pending = Vec::new();
        self.detach_children(&filler, &mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&filler, &mut pending);
        }
    }
}

/// Operator context for [`Display`](fmt::Display). Mixed binary operators are
/// always parenthesized, so `a, b | c` never appears.
const PREC_TOP: u8 = 0;
const PREC_CHOICE: u8 = 1;
const PREC_SEQUENCE: u8 = 2;
const PREC_POSTFIX: u8 = 3;

enum Piece<'a> {
    Node(&'a Node, u8),
    Text(&'static str),
}

fn push_binary<'a>(
    pieces: &mut Vec<Piece<'a>>,
    a: &'a Node,
    b: &'a Node,
    op: &'static str,
    prec: u8,
    outer: u8,
) {
    let wrap = outer != PREC_TOP && outer != prec;
    if wrap {
        pieces.push(Piece::Text(")"));
    }
    pieces.push(Piece::Node(b, prec));
    pieces.push(Piece::Text(op));
    pieces.push(Piece::Node(a, prec));
    if wrap {
        pieces.push(Piece::Text("("));
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self, PREC_TOP)];
        while let Some(piece) = pieces.pop() {
            let (node, outer) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node, outer) => (node, outer),
            };
            let (operand, op) = match node {
                Node::Leaf(p) => {
                    write!(f, "{p}")?;
                    continue;
                }
                Node::Choice(a, b) => {
                    push_binary(&mut pieces, a, b, " | ", PREC_CHOICE, outer);
                    continue;
                }
                Node::Sequence(a, b) => {
                    push_binary(&mut pieces, a, b, ", ", PREC_SEQUENCE, outer);
                    continue;
                }
                Node::ZeroOrMore(x) => (x, "*"),
                Node::OneOrMore(x) => (x, "+"),
                Node::ZeroOrOne(x) => (x, "?"),
            };
            pieces.push(Piece::Text(op));
            pieces.push(Piece::Node(operand, PREC_POSTFIX));
        }
        Ok(())
    }
}
