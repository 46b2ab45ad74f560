//! Lazy subset-construction DFA and the match protocols driving it
//!
//! DFA states are sets of NFA nodes discovered on demand while scanning
//! text. Each state memoizes its per-byte transitions, and state-sets are
//! interned in a hash table so an already-seen set reuses its DFA node;
//! that reuse is what bounds construction on a cyclic NFA.

use std::collections::HashMap;

use tracing::trace;

use crate::error::Result;
use crate::nfa::{self, Nfa, NodeId, NodeKind};
use crate::parser::Symbol;

/// Index of a DFA node within its owning [`Fsm`]
pub type DnodeId = usize;

/// A memoized per-byte transition
#[derive(Debug, Clone, Copy)]
enum Transition {
    /// Not computed yet
    Unknown,
    /// Computed; no live state remains
    Dead,
    /// Computed successor state
    To(DnodeId),
}

/// One DFA state: an ordered NFA state-set plus its transition table
#[derive(Debug)]
struct Dnode {
    states: Vec<NodeId>,
    to: Box<[Transition; 256]>,
    is_accept: bool,
}

/// One automaton instance: the NFA graph, the lazily grown DFA over it,
/// and the state-set memoization table
#[derive(Debug)]
pub struct Fsm {
    nfa: Nfa,
    dnodes: Vec<Dnode>,
    memo: HashMap<Box<[NodeId]>, DnodeId>,
}

impl Fsm {
    /// Build the automaton for a postfix sequence; see [`nfa::build`] for
    /// the meaning of `flip` and `prepend_any`
    pub fn build(postfix: &[Symbol], flip: bool, prepend_any: bool) -> Result<Fsm> {
        let nfa = nfa::build(postfix, flip, prepend_any)?;
        Ok(Fsm {
            nfa,
            dnodes: Vec::new(),
            memo: HashMap::new(),
        })
    }

    /// Seed the DFA root with the closure of the NFA start node; idempotent
    fn init(&mut self) {
        if !self.dnodes.is_empty() {
            return;
        }
        self.nfa.next_epoch();
        let mut states = Vec::new();
        self.nfa.closure(self.nfa.start, &mut states);
        self.intern(states);
    }

    /// Look up a state-set in the memo table, allocating a fresh DFA node
    /// on a miss
    fn intern(&mut self, states: Vec<NodeId>) -> DnodeId {
        if let Some(&id) = self.memo.get(states.as_slice()) {
            return id;
        }
        let is_accept = states
            .iter()
            .any(|&s| self.nfa.nodes[s].kind == NodeKind::Accept);
        let id = self.dnodes.len();
        trace!(id, ?states, is_accept, "new DFA state");
        self.memo.insert(states.clone().into_boxed_slice(), id);
        self.dnodes.push(Dnode {
            states,
            to: Box::new([Transition::Unknown; 256]),
            is_accept,
        });
        id
    }

    /// Take the transition out of `from` on `byte`, computing and caching
    /// it on first use; `None` is a dead end
    fn step(&mut self, from: DnodeId, byte: u8) -> Option<DnodeId> {
        match self.dnodes[from].to[byte as usize] {
            Transition::To(id) => Some(id),
            Transition::Dead => None,
            Transition::Unknown => {
                // One epoch for the whole union keeps the successor set
                // deduplicated in first-visit order
                self.nfa.next_epoch();
                let members = self.dnodes[from].states.clone();
                let mut nstates = Vec::new();
                for s in members {
                    let succ = {
                        let node = &self.nfa.nodes[s];
                        if node.kind == NodeKind::Char && node.set.contains(byte) {
                            node.next
                        } else {
                            None
                        }
                    };
                    if let Some(succ) = succ {
                        self.nfa.closure(succ, &mut nstates);
                    }
                }
                if nstates.is_empty() {
                    self.dnodes[from].to[byte as usize] = Transition::Dead;
                    return None;
                }
                let id = self.intern(nstates);
                self.dnodes[from].to[byte as usize] = Transition::To(id);
                Some(id)
            }
        }
    }

    /// Whether the state-set's first member is the Accept node, i.e. the
    /// match cannot be extended and the scan may stop
    fn accept_is_first(&self, id: DnodeId) -> bool {
        self.dnodes[id]
            .states
            .first()
            .is_some_and(|&s| self.nfa.nodes[s].kind == NodeKind::Accept)
    }

    /// Truncate an accepting state-set to the members preceding its first
    /// Accept node and re-memoize, so scanning can continue hunting for a
    /// longer match among the still-live states
    fn strip(&mut self, from: DnodeId) -> DnodeId {
        let pos = self.dnodes[from]
            .states
            .iter()
            .position(|&s| self.nfa.nodes[s].kind == NodeKind::Accept);
        match pos {
            Some(p) => {
                let prefix = self.dnodes[from].states[..p].to_vec();
                self.intern(prefix)
            }
            // Callers only strip accepting sets
            None => from,
        }
    }

    /// Full match: every byte must be consumed and the final state accept
    pub fn run_full(&mut self, text: &[u8]) -> bool {
        self.init();
        let mut node = 0;
        for &byte in text {
            match self.step(node, byte) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.dnodes[node].is_accept
    }

    /// Substring match: succeed as soon as any visited state accepts
    pub fn run_partial(&mut self, text: &[u8]) -> bool {
        self.init();
        let mut node = 0;
        if self.dnodes[node].is_accept {
            return true;
        }
        for &byte in text {
            match self.step(node, byte) {
                Some(next) => node = next,
                None => return false,
            }
            if self.dnodes[node].is_accept {
                return true;
            }
        }
        false
    }
}

/// Recover the `[left, right)` span of the best match.
///
/// Pass 1 scans forward over the prepended-any automaton. Every accept
/// records a tentative right boundary; if the Accept node leads the
/// state-set the match cannot grow and the scan stops, otherwise the set is
/// stripped below the Accept node and scanning continues for a longer
/// match. Pass 2 scans backward from the right boundary over the flipped
/// automaton, keeping the leftmost accepting position.
pub fn find_boundary(forward: &mut Fsm, backward: &mut Fsm, text: &[u8]) -> Option<(usize, usize)> {
    forward.init();
    let mut node = 0;
    let mut found = false;
    let mut right = 0usize;

    if forward.dnodes[node].is_accept {
        found = true;
        if forward.accept_is_first(node) {
            return Some((0, 0));
        }
        node = forward.strip(node);
    }
    for (i, &byte) in text.iter().enumerate() {
        match forward.step(node, byte) {
            Some(next) => node = next,
            None => break,
        }
        if forward.dnodes[node].is_accept {
            found = true;
            right = i + 1;
            if forward.accept_is_first(node) {
                break;
            }
            node = forward.strip(node);
        }
    }
    if !found {
        return None;
    }

    backward.init();
    let mut node = 0;
    let mut left = None;
    if backward.dnodes[node].is_accept {
        left = Some(right);
    }
    for i in (0..right).rev() {
        match backward.step(node, text[i]) {
            Some(next) => node = next,
            None => break,
        }
        if backward.dnodes[node].is_accept {
            left = Some(i);
        }
    }

    // The forward pass accepted ending at `right`, so the flipped automaton
    // accepts somewhere within [0, right]
    debug_assert!(left.is_some());
    left.map(|l| (l, right))
}
