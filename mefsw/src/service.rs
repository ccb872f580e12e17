//! Compiling MEF service descriptions into rules.
//!
//! A service names what to match on (port, outer and inner VLAN) and what
//! to do with matching frames: pop up to two tags, push a service and/or a
//! customer tag, and send the frame out of an egress port.

use crate::action::Action;
use crate::error::{ServiceError, TableError};
use crate::key::ClassificationKey;
use crate::rule::Rule;
use crate::table::SharedRuleTable;
use crate::vlan::MAX_VLAN_ID;

/// Maximum number of tags a service pops.
pub const MAX_POP_TAGS: u8 = 2;

/// One provisioned service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ServiceRule {
    /// Port the service's frames arrive on.
    pub ingress_port: u32,
    /// Outer VLAN to match, `None` for untagged frames.
    pub match_outer: Option<u16>,
    /// Inner VLAN to match, requires `match_outer`.
    pub match_inner: Option<u16>,
    /// Number of tags to pop first.
    pub pop_tags: u8,
    /// Service tag to push after popping.
    pub push_svlan: Option<u16>,
    /// Customer tag to push after the service tag, so it ends up outermost.
    pub push_cvlan: Option<u16>,
    /// Port to send matching frames to.
    pub egress_port: Option<u32>,
}

impl ServiceRule {
    /// A service matching untagged frames on `ingress_port` and doing
    /// nothing yet.
    pub fn new(ingress_port: u32) -> Self {
        Self {
            ingress_port,
            ..Self::default()
        }
    }

    /// The key and rule implementing the service.
    pub fn compile(&self) -> Result<(ClassificationKey, Rule), ServiceError> {
        if self.match_inner.is_some() && self.match_outer.is_none() {
            return Err(ServiceError::InnerWithoutOuter);
        }
        if self.pop_tags > MAX_POP_TAGS {
            return Err(ServiceError::InvalidPopCount(self.pop_tags));
        }
        for vlan_id in [
            self.match_outer,
            self.match_inner,
            self.push_svlan,
            self.push_cvlan,
        ]
        .into_iter()
        .flatten()
        {
            if vlan_id > MAX_VLAN_ID {
                return Err(ServiceError::InvalidVlanId(vlan_id));
            }
        }

        let key = ClassificationKey::new(
            self.ingress_port,
            self.match_outer.unwrap_or(0),
            self.match_inner.unwrap_or(0),
        );

        let mut rule = Rule::new();
        for _ in 0..self.pop_tags {
            rule.push(Action::Pop)?;
        }
        if let Some(vlan_id) = self.push_svlan {
            rule.push(Action::push_svlan(vlan_id))?;
        }
        if let Some(vlan_id) = self.push_cvlan {
            rule.push(Action::push_cvlan(vlan_id))?;
        }
        if let Some(target_port) = self.egress_port {
            rule.push(Action::Forward { target_port })?;
        }
        if rule.is_empty() {
            return Err(ServiceError::NoActions);
        }
        Ok((key, rule))
    }

    /// Compile the service and install it into `table`.
    ///
    /// Two services never share a key: if `table` already holds a rule for
    /// this service's key, nothing is installed and
    /// [`ServiceError::Conflict`] is returned. Use
    /// [`SharedRuleTable::insert`] to replace a rule on purpose.
    pub fn install(&self, table: &SharedRuleTable) -> Result<(), ServiceError> {
        let (key, rule) = self.compile()?;
        table.try_insert(key, rule).map_err(|err| match err {
            TableError::Occupied(key) => ServiceError::Conflict(key),
            err => ServiceError::Table(err),
        })
    }
}
