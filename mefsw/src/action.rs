//! Rule actions and their packed 8-byte layout.
//!
//! ```text
//!  0       1       2               4                               8
//! +-------+-------+---------------+-------------------------------+
//! | type  |  tag  | vlan id (LE)  |        target port (LE)       |
//! +-------+-------+---------------+-------------------------------+
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::ether::EtherType;
use crate::vlan::VLAN_ID_MASK;

/// Length of one encoded action.
pub const ACTION_WIRE_LEN: usize = 8;

enum_sim! {
    /// Wire code of an action.
    pub struct ActionType (u8) {
        /// Empty slot.
        NONE = 0,
        /// Redirect to an egress port.
        FORWARD = 1,
        /// Insert a VLAN tag.
        PUSH = 2,
        /// Remove the outermost VLAN tag.
        POP = 3,
    }
}

enum_sim! {
    /// Wire code of the kind of tag a push inserts.
    pub struct TagKind (u8) {
        /// No tag.
        NONE = 0,
        /// 802.1Q customer tag.
        CVLAN = 1,
        /// 802.1ad service tag.
        SVLAN = 2,
    }
}

impl TagKind {
    /// The EtherType announcing a tag of this kind, if the kind is pushable.
    #[inline]
    pub fn tpid(&self) -> Option<EtherType> {
        match *self {
            Self::CVLAN => Some(EtherType::VLAN),
            Self::SVLAN => Some(EtherType::QINQ),
            _ => None,
        }
    }
}

/// One step of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Redirect the frame to `target_port`. Port 0 means "do not redirect".
    Forward {
        /// Egress port.
        target_port: u32,
    },
    /// Insert a tag of `tag_kind` carrying `vlan_id` (masked to 12 bits).
    Push {
        /// Kind of the inserted tag.
        tag_kind: TagKind,
        /// VLAN id of the inserted tag.
        vlan_id: u16,
    },
    /// Remove the outermost tag, if any.
    Pop,
    /// A slot whose type code is not one we execute.
    Unrecognized(ActionType),
}

impl Action {
    /// The wire code of this action.
    pub fn kind(&self) -> ActionType {
        match *self {
            Action::Forward { .. } => ActionType::FORWARD,
            Action::Push { .. } => ActionType::PUSH,
            Action::Pop => ActionType::POP,
            Action::Unrecognized(t) => t,
        }
    }

    /// A push of a customer tag.
    pub fn push_cvlan(vlan_id: u16) -> Self {
        Action::Push {
            tag_kind: TagKind::CVLAN,
            vlan_id,
        }
    }

    /// A push of a service tag.
    pub fn push_svlan(vlan_id: u16) -> Self {
        Action::Push {
            tag_kind: TagKind::SVLAN,
            vlan_id,
        }
    }

    /// Encode into the packed layout.
    pub fn to_bytes(&self) -> [u8; ACTION_WIRE_LEN] {
        let mut buf = [0; ACTION_WIRE_LEN];
        buf[0] = self.kind().raw();
        match *self {
            Action::Forward { target_port } => {
                LittleEndian::write_u32(&mut buf[4..8], target_port);
            }
            Action::Push { tag_kind, vlan_id } => {
                buf[1] = tag_kind.raw();
                LittleEndian::write_u16(&mut buf[2..4], vlan_id);
            }
            Action::Pop | Action::Unrecognized(_) => {}
        }
        buf
    }

    /// Decode from the packed layout. Unknown type codes become
    /// [`Action::Unrecognized`]; unknown tag codes are kept as they are.
    pub fn from_bytes(buf: &[u8; ACTION_WIRE_LEN]) -> Self {
        match ActionType::from(buf[0]) {
            ActionType::FORWARD => Action::Forward {
                target_port: LittleEndian::read_u32(&buf[4..8]),
            },
            ActionType::PUSH => Action::Push {
                tag_kind: TagKind::from(buf[1]),
                vlan_id: LittleEndian::read_u16(&buf[2..4]),
            },
            ActionType::POP => Action::Pop,
            other => Action::Unrecognized(other),
        }
    }

    /// The TCI written by a push of `vlan_id`: priority and DEI cleared.
    #[inline]
    pub(crate) fn push_tci(vlan_id: u16) -> u16 {
        vlan_id & VLAN_ID_MASK
    }
}
