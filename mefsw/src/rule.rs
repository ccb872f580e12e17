//! Rules: a bounded, ordered list of actions, and their packed layout.
//!
//! The packed value is 50 bytes: the action count, five 8-byte action
//! slots and 9 bytes of padding. Slots past the count are zero.

use arrayvec::ArrayVec;

use crate::action::{Action, ACTION_WIRE_LEN};
use crate::error::{RuleError, WireError};

/// Maximum number of actions in a rule.
pub const MAX_ACTIONS: usize = 5;

/// Length of an encoded rule.
pub const RULE_WIRE_LEN: usize = 50;

/// An ordered list of at most [`MAX_ACTIONS`] actions.
///
/// Stored inline, so cloning a rule out of a table never allocates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rule {
    actions: ArrayVec<Action, MAX_ACTIONS>,
}

impl Rule {
    /// An empty rule. Executing it passes the frame unmodified.
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule holding a copy of `actions`.
    pub fn from_actions(actions: &[Action]) -> Result<Self, RuleError> {
        let mut rule = Self::new();
        for action in actions {
            rule.push(*action)?;
        }
        Ok(rule)
    }

    /// Append an action.
    pub fn push(&mut self, action: Action) -> Result<(), RuleError> {
        self.actions
            .try_push(action)
            .map_err(|_| RuleError::TooManyActions { max: MAX_ACTIONS })
    }

    /// The actions, in execution order.
    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the rule holds no action.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Encode into the packed layout.
    pub fn encode(&self) -> [u8; RULE_WIRE_LEN] {
        let mut buf = [0; RULE_WIRE_LEN];
        buf[0] = self.actions.len() as u8;
        for (slot, action) in buf[1..1 + MAX_ACTIONS * ACTION_WIRE_LEN]
            .chunks_exact_mut(ACTION_WIRE_LEN)
            .zip(self.actions.iter())
        {
            slot.copy_from_slice(&action.to_bytes());
        }
        buf
    }

    /// Decode from the packed layout.
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() != RULE_WIRE_LEN {
            return Err(WireError::Length {
                expected: RULE_WIRE_LEN,
                actual: buf.len(),
            });
        }
        let count = usize::from(buf[0]);
        if count > MAX_ACTIONS {
            return Err(WireError::ActionCount {
                count,
                max: MAX_ACTIONS,
            });
        }

        let mut actions = ArrayVec::new();
        for slot in buf[1..].chunks_exact(ACTION_WIRE_LEN).take(count) {
            let mut step = [0; ACTION_WIRE_LEN];
            step.copy_from_slice(slot);
            actions.push(Action::from_bytes(&step));
        }
        Ok(Self { actions })
    }
}
