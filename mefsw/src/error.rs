//! Error types of the switching data path.
//!
//! Header reads fail with [`Truncated`], buffer resizes with [`SpaceError`].
//! The action executor folds both, together with malformed actions, into
//! [`ExecError`], which the pipeline always resolves to an abort. A rule
//! miss is not an error: it is the `None` returned by a table lookup.
#![allow(missing_docs)]

use crate::action::{ActionType, TagKind};
use crate::key::ClassificationKey;

/// A header read or re-read extends past the valid frame length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("header truncated: need {need} bytes, frame has {len}")]
pub struct Truncated {
    /// Offset of the end of the header that was accessed.
    pub need: usize,
    /// Valid length of the frame.
    pub len: usize,
}

/// A buffer growth or shrink exceeds the available room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no room to resize frame: requested {requested} bytes, {available} available")]
pub struct SpaceError {
    /// Number of bytes the operation needed.
    pub requested: usize,
    /// Number of bytes that were available.
    pub available: usize,
}

/// Failure while applying a rule's actions to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    #[error(transparent)]
    Truncated(#[from] Truncated),

    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error("unrecognized action type {0}")]
    InvalidAction(ActionType),

    #[error("unrecognized tag kind {0} in push action")]
    InvalidTagKind(TagKind),
}

/// Failure while building a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("rule holds at most {max} actions")]
    TooManyActions { max: usize },
}

/// Failure while decoding the packed key or rule layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("wrong encoded length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("encoded rule claims {count} actions, at most {max} allowed")]
    ActionCount { count: usize, max: usize },
}

/// Failure while mutating a rule table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("rule table full ({max_entries} entries)")]
    Full { max_entries: usize },

    #[error(
        "a rule is already installed for port {}, outer vlan {}, inner vlan {}",
        .0.ingress_port,
        .0.outer_vlan_id,
        .0.inner_vlan_id
    )]
    Occupied(ClassificationKey),

    #[error("wire error: {0}")]
    Wire(#[from] WireError),
}

/// Failure while compiling a service description into a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("service produces no actions")]
    NoActions,

    #[error("invalid vlan id {0}, must be at most 4095")]
    InvalidVlanId(u16),

    #[error("invalid pop count {0}, must be 0, 1 or 2")]
    InvalidPopCount(u8),

    #[error("inner vlan match requires an outer vlan match")]
    InnerWithoutOuter,

    #[error(
        "service conflicts with the rule installed for port {}, outer vlan {}, inner vlan {}",
        .0.ingress_port,
        .0.outer_vlan_id,
        .0.inner_vlan_id
    )]
    Conflict(ClassificationKey),

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("table error: {0}")]
    Table(#[from] TableError),
}

/// Invalid configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfError {
    #[error("headroom {headroom} is below the {required} bytes the longest rule may push")]
    HeadroomTooSmall { headroom: usize, required: usize },

    #[error("dataroom must be at least {min} bytes, got {dataroom}")]
    DataroomTooSmall { dataroom: usize, min: usize },

    #[error("max_entries must be non-zero")]
    ZeroEntries,
}
