//! A small guarded-transition state machine for gameplay logic.
//!
//! [`StateMachine`] owns one node per key: a caller-supplied state object
//! plus an ordered list of transitions. Each transition carries a guard
//! predicate over the *current* state and an optional target key; a
//! transition with no target is the exit edge, after which the machine is
//! terminal ([`is_alive`](StateMachine::is_alive) turns false).
//!
//! The machine never polls itself. Callers drive it by calling
//! [`check_conditions`](StateMachine::check_conditions) whenever they want
//! transitions evaluated; the first transition (in registration order) whose
//! guard passes wins. Single-threaded, cooperative, no suspension.
//!
//! Machines nest: `StateMachine` itself implements [`State`], restarting on
//! entry, so a sub-machine can be registered as a state of a parent machine
//! and driven through [`current_state_mut`](StateMachine::current_state_mut).
//!
//! ```
//! use tally_fsm::{State, StateMachine};
//!
//! struct Phase;
//! impl State for Phase {}
//!
//! let mut fsm = StateMachine::new();
//! fsm.add_state("windup", Phase); // first state added is the start state
//! fsm.add_state("strike", Phase);
//! fsm.add_transition("windup", Some("strike"), |_| true).unwrap();
//! fsm.add_transition("strike", None, |_| true).unwrap(); // exit edge
//!
//! fsm.start();
//! assert_eq!(fsm.current_key(), Some("windup"));
//! fsm.check_conditions();
//! assert_eq!(fsm.current_key(), Some("strike"));
//! fsm.check_conditions();
//! assert!(!fsm.is_alive());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while wiring up a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FsmError {
    /// A transition or start marker referenced a key with no registered
    /// state. States must be registered before they are wired.
    #[error("state key is not registered in this machine")]
    UnknownState,
}

// ---------------------------------------------------------------------------
// State contract
// ---------------------------------------------------------------------------

/// Lifecycle hooks for a state object. Both default to no-ops, so plain
/// marker states need no boilerplate.
pub trait State {
    /// Called when the machine transitions into this state (including on
    /// [`StateMachine::start`]).
    fn on_enter(&mut self) {}

    /// Called when the machine transitions out of this state.
    fn on_exit(&mut self) {}
}

// ---------------------------------------------------------------------------
// StateMachine
// ---------------------------------------------------------------------------

type Guard<S> = Box<dyn Fn(&S) -> bool>;

struct Transition<K, S> {
    /// `None` is the exit edge: taking it makes the machine terminal.
    target: Option<K>,
    guard: Guard<S>,
}

struct Node<K, S> {
    state: S,
    /// Evaluated in registration order; first passing guard wins.
    transitions: Vec<Transition<K, S>>,
}

/// A node/transition graph over caller-supplied state objects.
///
/// Keys identify states; re-adding a key overwrites its node, transitions
/// included (last registration wins). The first state added becomes the
/// start state unless [`set_start`](Self::set_start) picks another.
pub struct StateMachine<K, S> {
    nodes: HashMap<K, Node<K, S>>,
    start: Option<K>,
    current: Option<K>,
    started: bool,
    finished: bool,
    on_change: Option<Box<dyn FnMut(K, K)>>,
    on_finish: Option<Box<dyn FnMut()>>,
}

impl<K, S> StateMachine<K, S>
where
    K: Copy + Eq + Hash,
    S: State,
{
    /// Create an empty machine.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            start: None,
            current: None,
            started: false,
            finished: false,
            on_change: None,
            on_finish: None,
        }
    }

    /// Register (or overwrite) the state for `key`. Overwriting discards
    /// the old node's transitions along with its state object.
    pub fn add_state(&mut self, key: K, state: S) {
        self.nodes.insert(
            key,
            Node {
                state,
                transitions: Vec::new(),
            },
        );
        if self.start.is_none() {
            self.start = Some(key);
        }
    }

    /// Mark `key` as the start state.
    pub fn set_start(&mut self, key: K) -> Result<(), FsmError> {
        if !self.nodes.contains_key(&key) {
            return Err(FsmError::UnknownState);
        }
        self.start = Some(key);
        Ok(())
    }

    /// Append a transition to `from`'s list. `to == None` registers the
    /// exit edge. Both endpoints must already be registered.
    pub fn add_transition(
        &mut self,
        from: K,
        to: Option<K>,
        guard: impl Fn(&S) -> bool + 'static,
    ) -> Result<(), FsmError> {
        if let Some(target) = to {
            if !self.nodes.contains_key(&target) {
                return Err(FsmError::UnknownState);
            }
        }
        let node = self.nodes.get_mut(&from).ok_or(FsmError::UnknownState)?;
        node.transitions.push(Transition {
            target: to,
            guard: Box::new(guard),
        });
        Ok(())
    }

    /// Observe every state change to a real target (not the exit edge),
    /// after the old state's `on_exit` and before the new state's
    /// `on_enter`.
    pub fn on_state_change(&mut self, callback: impl FnMut(K, K) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Observe the machine going terminal via the exit edge.
    pub fn on_finish(&mut self, callback: impl FnMut() + 'static) {
        self.on_finish = Some(Box::new(callback));
    }

    /// Enter the start state. Idempotent: a second call is a no-op, as is
    /// starting a machine with no states.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        let Some(key) = self.start else { return };
        self.started = true;
        self.current = Some(key);
        if let Some(node) = self.nodes.get_mut(&key) {
            node.state.on_enter();
        }
    }

    /// Evaluate the current node's transitions in registration order and
    /// take the first whose guard passes. No-op when the machine has not
    /// started, is terminal, or no guard passes.
    pub fn check_conditions(&mut self) {
        let Some(cur) = self.current else { return };

        let taken = {
            let Some(node) = self.nodes.get(&cur) else { return };
            node.transitions
                .iter()
                .find(|t| (t.guard)(&node.state))
                .map(|t| t.target)
        };
        let Some(target) = taken else { return };

        if let Some(node) = self.nodes.get_mut(&cur) {
            node.state.on_exit();
        }

        match target {
            Some(next) => {
                if let Some(callback) = self.on_change.as_mut() {
                    callback(cur, next);
                }
                self.current = Some(next);
                if let Some(node) = self.nodes.get_mut(&next) {
                    node.state.on_enter();
                }
            }
            None => {
                self.current = None;
                self.finished = true;
                if let Some(callback) = self.on_finish.as_mut() {
                    callback();
                }
            }
        }
    }

    /// Forget the run state (current node, started/terminal flags) while
    /// keeping the graph. No hooks fire.
    pub fn reset(&mut self) {
        self.started = false;
        self.finished = false;
        self.current = None;
    }

    /// `false` once the exit edge has been taken.
    pub fn is_alive(&self) -> bool {
        !self.finished
    }

    /// Key of the current state; `None` before `start()` and after the
    /// exit edge.
    pub fn current_key(&self) -> Option<K> {
        self.current
    }

    /// The current state object.
    pub fn current_state(&self) -> Option<&S> {
        self.current.and_then(|k| self.nodes.get(&k)).map(|n| &n.state)
    }

    /// Mutable access to the current state object. This is how a parent
    /// drives a nested machine.
    pub fn current_state_mut(&mut self) -> Option<&mut S> {
        let key = self.current?;
        self.nodes.get_mut(&key).map(|n| &mut n.state)
    }

    /// The state object registered under `key`.
    pub fn state(&self, key: K) -> Option<&S> {
        self.nodes.get(&key).map(|n| &n.state)
    }

    pub fn contains(&self, key: K) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K, S> Default for StateMachine<K, S>
where
    K: Copy + Eq + Hash,
    S: State,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, S> fmt::Debug for StateMachine<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.nodes.len())
            .field("current", &self.current)
            .field("started", &self.started)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Nesting support: entering a machine-as-state restarts it from its start
/// node. The parent drives the child's `check_conditions` through
/// [`StateMachine::current_state_mut`].
impl<K, S> State for StateMachine<K, S>
where
    K: Copy + Eq + Hash,
    S: State,
{
    fn on_enter(&mut self) {
        self.reset();
        self.start();
    }
}
