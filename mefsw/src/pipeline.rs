//! The per-frame pipeline: classify, look up, execute.

use core::fmt;

use crate::error::ExecError;
use crate::exec::execute;
use crate::key::{build_key, ClassificationKey};
use crate::table::RuleTable;
use crate::PktBufMut;

/// What the caller should do with a processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Hand the frame on as it is now.
    Pass,
    /// Discard the frame. Never produced by the pipeline itself; boundary
    /// callers use it when mapping other dispositions.
    Drop,
    /// Rewriting failed. The frame may be half rewritten and must not be
    /// sent.
    Abort,
    /// Send the frame out of the given port.
    Redirect(u32),
}

impl Disposition {
    /// The egress port of a redirect.
    #[inline]
    pub fn redirect_port(&self) -> Option<u32> {
        match *self {
            Disposition::Redirect(port) => Some(port),
            _ => None,
        }
    }

    /// Whether the frame passes.
    #[inline]
    pub fn is_pass(&self) -> bool {
        *self == Disposition::Pass
    }

    /// Whether the frame was aborted.
    #[inline]
    pub fn is_abort(&self) -> bool {
        *self == Disposition::Abort
    }

    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Disposition::Pass => "pass",
            Disposition::Drop => "drop",
            Disposition::Abort => "abort",
            Disposition::Redirect(_) => "redirect",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Disposition::Redirect(port) => write!(f, "redirect({})", port),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Why the pipeline reached its disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The frame was too short to classify.
    Truncated,
    /// No rule matched the key.
    RuleMiss,
    /// The matching rule ran to completion.
    Executed,
    /// The matching rule failed.
    Failed(ExecError),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Truncated => f.write_str("truncated"),
            Reason::RuleMiss => f.write_str("rule_miss"),
            Reason::Executed => f.write_str("executed"),
            Reason::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// The full result of processing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The key the frame classified to, if it could be classified.
    pub key: Option<ClassificationKey>,
    /// Why `disposition` was chosen.
    pub reason: Reason,
    /// What to do with the frame.
    pub disposition: Disposition,
}

/// Process one frame and report how the disposition came about.
pub fn evaluate<T, R>(frame: &mut T, ingress_port: u32, table: &R) -> Outcome
where
    T: PktBufMut,
    R: RuleTable + ?Sized,
{
    let key = match build_key(frame.chunk(), ingress_port) {
        Ok(key) => key,
        Err(_) => {
            return Outcome {
                key: None,
                reason: Reason::Truncated,
                disposition: Disposition::Pass,
            }
        }
    };

    let rule = match table.lookup(&key) {
        Some(rule) => rule,
        None => {
            return Outcome {
                key: Some(key),
                reason: Reason::RuleMiss,
                disposition: Disposition::Pass,
            }
        }
    };

    match execute(frame, &rule) {
        Ok(disposition) => Outcome {
            key: Some(key),
            reason: Reason::Executed,
            disposition,
        },
        Err(err) => Outcome {
            key: Some(key),
            reason: Reason::Failed(err),
            disposition: Disposition::Abort,
        },
    }
}

/// Process one frame received on `ingress_port` against `table`.
///
/// Frames that cannot be classified and frames without a rule pass
/// unmodified. Otherwise the rule's actions run on the frame in place.
#[inline]
pub fn process_frame<T, R>(frame: &mut T, ingress_port: u32, table: &R) -> Disposition
where
    T: PktBufMut,
    R: RuleTable + ?Sized,
{
    evaluate(frame, ingress_port, table).disposition
}

/// A pipeline bound to a rule table, emitting one event per frame.
#[derive(Debug, Clone)]
pub struct Pipeline<R> {
    table: R,
}

impl<R: RuleTable> Pipeline<R> {
    /// A pipeline reading rules from `table`.
    pub fn new(table: R) -> Self {
        Self { table }
    }

    /// The rule table.
    pub fn table(&self) -> &R {
        &self.table
    }

    /// Process one frame, like [`process_frame`], and log the outcome.
    pub fn process<T: PktBufMut>(&self, frame: &mut T, ingress_port: u32) -> Disposition {
        let outcome = evaluate(frame, ingress_port, &self.table);
        let key = outcome.key.unwrap_or_default();

        if outcome.disposition.is_abort() {
            tracing::warn!(
                ingress_port,
                outer_vlan = key.outer_vlan_id,
                inner_vlan = key.inner_vlan_id,
                disposition = %outcome.disposition,
                reason = %outcome.reason,
                "frame aborted"
            );
        } else {
            tracing::debug!(
                ingress_port,
                outer_vlan = key.outer_vlan_id,
                inner_vlan = key.inner_vlan_id,
                disposition = %outcome.disposition,
                reason = %outcome.reason,
                "frame processed"
            );
        }
        outcome.disposition
    }
}
