//! Position assignment and tree augmentation.
//!
//! Lowers a [`Node`] bottom-up into per-subtree `nullable`, `firstpos` and
//! `lastpos`, recording follow edges as each operator is reduced. Leaves are
//! numbered left to right and the whole tree is wrapped as
//! `Sequence(tree, EOC)`, so the end-of-content sentinel owns the last
//! position.

use cmdfa_core::{Particle, PositionSet};

use crate::Node;
use crate::followpos::FollowTable;
use crate::invariants::ensure_positions_assigned;
use crate::tree::Folded;

/// What sits at a position.
#[derive(Debug, Clone)]
pub(crate) enum Leaf {
    Particle(Particle),
    EndOfContent,
}

impl Leaf {
    pub(crate) fn particle(&self) -> Option<&Particle> {
        match self {
            Self::Particle(p) => Some(p),
            Self::EndOfContent => None,
        }
    }
}

/// Glushkov attributes of one reduced subtree.
#[derive(Debug)]
pub(crate) struct Summary {
    pub(crate) nullable: bool,
    pub(crate) first_pos: PositionSet,
    pub(crate) last_pos: PositionSet,
}

impl Summary {
    fn leaf(capacity: usize, position: usize) -> Self {
        Self {
            nullable: false,
            first_pos: PositionSet::with_position(capacity, position),
            last_pos: PositionSet::with_position(capacity, position),
        }
    }

    fn sequence(mut a: Summary, mut b: Summary, follow: &mut FollowTable) -> Self {
        follow.link(&a.last_pos, &b.first_pos);
        if a.nullable {
            a.first_pos.union_with(&b.first_pos);
        }
        if b.nullable {
            b.last_pos.union_with(&a.last_pos);
        }
        Self {
            nullable: a.nullable && b.nullable,
            first_pos: a.first_pos,
            last_pos: b.last_pos,
        }
    }

    fn choice(mut a: Summary, b: Summary) -> Self {
        a.first_pos.union_with(&b.first_pos);
        a.last_pos.union_with(&b.last_pos);
        a.nullable |= b.nullable;
        a
    }

    fn starred(self, follow: &mut FollowTable) -> Self {
        follow.link(&self.last_pos, &self.first_pos);
        self
    }

    fn optional(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Attributes of the augmented root plus the dense per-position tables.
#[derive(Debug)]
pub(crate) struct Augmented {
    pub(crate) root: Summary,
    pub(crate) leaves: Vec<Leaf>,
    pub(crate) follow: Vec<PositionSet>,
    pub(crate) end_of_content: usize,
}

impl Augmented {
    /// Size shared by every position set of this compilation.
    pub(crate) fn capacity(&self) -> usize {
        self.leaves.len()
    }
}

pub(crate) fn augment(tree: &Node) -> Augmented {
    let capacity = tree.leaf_count() + 1;
    let mut leaves = Vec::with_capacity(capacity);
    let mut follow = FollowTable::new(capacity);

    let body = tree.fold(|node| match node {
        Folded::Leaf(particle) => {
            let position = leaves.len();
            leaves.push(Leaf::Particle(particle.clone()));
            Summary::leaf(capacity, position)
        }
        Folded::Sequence(a, b) => Summary::sequence(a, b, &mut follow),
        Folded::Choice(a, b) => Summary::choice(a, b),
        Folded::ZeroOrMore(x) => x.starred(&mut follow).optional(),
        Folded::OneOrMore(x) => x.starred(&mut follow),
        Folded::ZeroOrOne(x) => x.optional(),
    });

    let end_of_content = leaves.len();
    leaves.push(Leaf::EndOfContent);
    ensure_positions_assigned(leaves.len(), capacity);

    let eoc = Summary::leaf(capacity, end_of_content);
    let root = Summary::sequence(body, eoc, &mut follow);
    Augmented {
        root,
        leaves,
        follow: follow.into_sets(),
        end_of_content,
    }
}
