//! Rule tables.
//!
//! The data path only reads through [`RuleTable::lookup`]. Writers own the
//! table and may update it while frames are being processed; a lookup
//! always returns a complete rule, either the one before or the one after
//! a concurrent update of the same key.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::conf::TableConf;
use crate::error::{ConfError, TableError};
use crate::key::ClassificationKey;
use crate::rule::{Rule, RULE_WIRE_LEN};

/// Point lookups of rules by classification key.
pub trait RuleTable {
    /// The rule installed for `key`, if any.
    fn lookup(&self, key: &ClassificationKey) -> Option<Rule>;
}

impl<S: BuildHasher> RuleTable for HashMap<ClassificationKey, Rule, S> {
    #[inline]
    fn lookup(&self, key: &ClassificationKey) -> Option<Rule> {
        self.get(key).cloned()
    }
}

impl<T: RuleTable + ?Sized> RuleTable for &T {
    #[inline]
    fn lookup(&self, key: &ClassificationKey) -> Option<Rule> {
        (**self).lookup(key)
    }
}

impl<T: RuleTable + ?Sized> RuleTable for Arc<T> {
    #[inline]
    fn lookup(&self, key: &ClassificationKey) -> Option<Rule> {
        (**self).lookup(key)
    }
}

/// A bounded rule table shared between the data path and its writers.
///
/// Reads go straight to a sharded map and only contend with a writer
/// touching the same shard. Writers are serialized among themselves so the
/// entry limit is exact.
#[derive(Debug)]
pub struct SharedRuleTable {
    map: DashMap<ClassificationKey, Rule>,
    writer: Mutex<()>,
    max_entries: usize,
}

impl SharedRuleTable {
    /// An empty table with the default capacity.
    pub fn new() -> Self {
        Self::with_max_entries(TableConf::MAX_ENTRIES)
    }

    /// An empty table sized by `conf`.
    pub fn with_conf(conf: &TableConf) -> Result<Self, ConfError> {
        conf.validate()?;
        Ok(Self::with_max_entries(conf.max_entries))
    }

    fn with_max_entries(max_entries: usize) -> Self {
        Self {
            map: DashMap::new(),
            writer: Mutex::new(()),
            max_entries,
        }
    }

    /// Maximum number of keys the table accepts.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Install `rule` for `key`, returning the rule it replaces.
    ///
    /// Replacing the rule of a present key always succeeds; adding a new
    /// key fails once the table is full.
    pub fn insert(&self, key: ClassificationKey, rule: Rule) -> Result<Option<Rule>, TableError> {
        let _guard = self.writer.lock();
        if !self.map.contains_key(&key) && self.map.len() >= self.max_entries {
            tracing::warn!(
                ingress_port = key.ingress_port,
                outer_vlan = key.outer_vlan_id,
                inner_vlan = key.inner_vlan_id,
                max_entries = self.max_entries,
                "rule table full, rule rejected"
            );
            return Err(TableError::Full {
                max_entries: self.max_entries,
            });
        }
        let actions = rule.len();
        let prev = self.map.insert(key, rule);
        tracing::debug!(
            ingress_port = key.ingress_port,
            outer_vlan = key.outer_vlan_id,
            inner_vlan = key.inner_vlan_id,
            actions,
            replaced = prev.is_some(),
            "rule installed"
        );
        Ok(prev)
    }

    /// Install `rule` for a key that has none yet.
    ///
    /// Fails with [`TableError::Occupied`] if `key` already has a rule, and
    /// with [`TableError::Full`] once the table is full.
    pub fn try_insert(&self, key: ClassificationKey, rule: Rule) -> Result<(), TableError> {
        let _guard = self.writer.lock();
        if self.map.contains_key(&key) {
            tracing::warn!(
                ingress_port = key.ingress_port,
                outer_vlan = key.outer_vlan_id,
                inner_vlan = key.inner_vlan_id,
                "key already has a rule, rule rejected"
            );
            return Err(TableError::Occupied(key));
        }
        if self.map.len() >= self.max_entries {
            tracing::warn!(
                ingress_port = key.ingress_port,
                outer_vlan = key.outer_vlan_id,
                inner_vlan = key.inner_vlan_id,
                max_entries = self.max_entries,
                "rule table full, rule rejected"
            );
            return Err(TableError::Full {
                max_entries: self.max_entries,
            });
        }
        let actions = rule.len();
        self.map.insert(key, rule);
        tracing::debug!(
            ingress_port = key.ingress_port,
            outer_vlan = key.outer_vlan_id,
            inner_vlan = key.inner_vlan_id,
            actions,
            replaced = false,
            "rule installed"
        );
        Ok(())
    }

    /// Install a rule given in the packed key and rule layouts.
    pub fn insert_raw(
        &self,
        key: &[u8; ClassificationKey::WIRE_LEN],
        rule: &[u8; RULE_WIRE_LEN],
    ) -> Result<Option<Rule>, TableError> {
        let key = ClassificationKey::from_bytes(&key[..])?;
        let rule = Rule::decode(&rule[..])?;
        self.insert(key, rule)
    }

    /// Remove the rule of `key`, returning it.
    pub fn remove(&self, key: &ClassificationKey) -> Option<Rule> {
        let _guard = self.writer.lock();
        let prev = self.map.remove(key).map(|(_, rule)| rule);
        if prev.is_some() {
            tracing::debug!(
                ingress_port = key.ingress_port,
                outer_vlan = key.outer_vlan_id,
                inner_vlan = key.inner_vlan_id,
                "rule removed"
            );
        }
        prev
    }

    /// A copy of the rule of `key`.
    #[inline]
    pub fn get(&self, key: &ClassificationKey) -> Option<Rule> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    /// Remove every rule.
    pub fn clear(&self) {
        let _guard = self.writer.lock();
        self.map.clear();
        tracing::debug!("rule table cleared");
    }

    /// Number of installed rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no rule is installed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// A copy of every entry, sorted by key.
    pub fn entries(&self) -> Vec<(ClassificationKey, Rule)> {
        let mut entries: Vec<_> = self
            .map
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}

impl Default for SharedRuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTable for SharedRuleTable {
    #[inline]
    fn lookup(&self, key: &ClassificationKey) -> Option<Rule> {
        self.get(key)
    }
}
