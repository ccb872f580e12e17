//! Sizing of frame buffers and of the shared rule table.

use crate::error::ConfError;
use crate::ether::ETHER_HEADER_LEN;
use crate::rule::MAX_ACTIONS;
use crate::vlan::VLAN_HEADER_LEN;

/// Sizing of owned frame buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConf {
    /// Bytes reserved in front of a received frame for pushed tags.
    pub headroom: usize,
    /// Bytes available for the frame itself.
    pub dataroom: usize,
}

impl FrameConf {
    /// Default headroom, the usual packet mbuf headroom.
    pub const HEADROOM: usize = 128;
    /// Default dataroom, enough for a standard frame with a few tags.
    pub const DATAROOM: usize = 2048;
    /// Headroom needed for a rule made entirely of pushes.
    pub const MIN_HEADROOM: usize = MAX_ACTIONS * VLAN_HEADER_LEN;

    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the headroom.
    pub fn set_headroom(&mut self, val: usize) {
        self.headroom = val;
    }

    /// Set the dataroom.
    pub fn set_dataroom(&mut self, val: usize) {
        self.dataroom = val;
    }

    /// Check that a buffer of this size can take any rule.
    pub fn validate(&self) -> Result<(), ConfError> {
        if self.headroom < Self::MIN_HEADROOM {
            return Err(ConfError::HeadroomTooSmall {
                headroom: self.headroom,
                required: Self::MIN_HEADROOM,
            });
        }
        if self.dataroom < ETHER_HEADER_LEN {
            return Err(ConfError::DataroomTooSmall {
                dataroom: self.dataroom,
                min: ETHER_HEADER_LEN,
            });
        }
        Ok(())
    }
}

impl Default for FrameConf {
    fn default() -> Self {
        Self {
            headroom: Self::HEADROOM,
            dataroom: Self::DATAROOM,
        }
    }
}

/// Sizing of the shared rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConf {
    /// Maximum number of distinct keys.
    pub max_entries: usize,
}

impl TableConf {
    /// Default capacity.
    pub const MAX_ENTRIES: usize = 4096;

    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity.
    pub fn set_max_entries(&mut self, val: usize) {
        self.max_entries = val;
    }

    /// Check that the table can hold anything at all.
    pub fn validate(&self) -> Result<(), ConfError> {
        if self.max_entries == 0 {
            return Err(ConfError::ZeroEntries);
        }
        Ok(())
    }
}

impl Default for TableConf {
    fn default() -> Self {
        Self {
            max_entries: Self::MAX_ENTRIES,
        }
    }
}
