#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! The data path of a MEF-style Layer-2 switch.
//!
//! A frame arriving on an ingress port is classified by its port and VLAN
//! tags into a [`ClassificationKey`]. The [`Rule`] installed for that key
//! is a short ordered list of actions that push or pop VLAN tags in place
//! and forward the frame to an egress port. [`process_frame`] runs the
//! whole sequence and returns a [`Disposition`].
//!
//! Frames are handed in as any [`PktBufMut`]: an owned [`FrameBuf`] with
//! headroom, or a [`CursorMut`] over a driver's receive buffer.

#[macro_use]
mod macros;

mod traits;
pub use traits::{Buf, PktBuf, PktBufMut};

mod cursors;
pub use cursors::CursorMut;

mod frame;
pub use frame::FrameBuf;

pub mod conf;
pub mod error;

pub mod ether;
pub mod vlan;

pub mod codec;

pub mod action;
pub mod key;
pub mod rule;

pub mod table;

pub mod exec;
pub mod pipeline;

pub mod service;

pub use action::{Action, TagKind};
pub use key::{build_key, ClassificationKey};
pub use pipeline::{process_frame, Disposition, Pipeline};
pub use rule::{Rule, MAX_ACTIONS};
pub use table::{RuleTable, SharedRuleTable};
