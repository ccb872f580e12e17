//! 802.1Q / 802.1ad VLAN tag.
//!
//! A tag follows an Ethernet header (or another tag) whose EtherType is
//! 0x8100 (customer tag) or 0x88a8 (service tag). It carries the Tag
//! Control Information and the EtherType of what it encapsulates:
//!
//! ```text
//!  0               1               2               3
//! +-----+-+-----------------------+-------------------------------+
//! | PCP |D|        VLAN ID        |     encapsulated EtherType    |
//! +-----+-+-----------------------+-------------------------------+
//! ```

use byteorder::{ByteOrder, NetworkEndian};

use crate::ether::EtherType;

/// Fixed length of a VLAN tag as seen after the EtherType that announces it.
pub const VLAN_HEADER_LEN: usize = 4;

/// Mask selecting the 12-bit VLAN id out of a TCI.
pub const VLAN_ID_MASK: u16 = 0x0fff;

/// Largest VLAN id.
pub const MAX_VLAN_ID: u16 = VLAN_ID_MASK;

/// A view of a VLAN tag over the first 4 bytes of `buf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanHeader<T> {
    buf: T,
}

impl VlanHeader<[u8; VLAN_HEADER_LEN]> {
    /// Build an owned tag.
    pub fn new(tci: u16, ethertype: EtherType) -> Self {
        let mut header = Self {
            buf: [0; VLAN_HEADER_LEN],
        };
        header.set_tci(tci);
        header.set_ethertype(ethertype);
        header
    }
}

impl<T: AsRef<[u8]>> VlanHeader<T> {
    /// Wrap `buf`, which must hold at least [`VLAN_HEADER_LEN`] bytes.
    #[inline]
    pub fn parse_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The tag bytes.
    #[inline]
    pub fn header_slice(&self) -> &[u8] {
        &self.buf.as_ref()[0..VLAN_HEADER_LEN]
    }

    /// The whole Tag Control Information field.
    #[inline]
    pub fn tci(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.as_ref()[0..2])
    }

    /// Priority code point.
    #[inline]
    pub fn priority(&self) -> u8 {
        self.buf.as_ref()[0] >> 5
    }

    /// Drop eligible indicator.
    #[inline]
    pub fn dei_flag(&self) -> bool {
        self.buf.as_ref()[0] & 0x10 != 0
    }

    /// The 12-bit VLAN id.
    #[inline]
    pub fn vlan_id(&self) -> u16 {
        self.tci() & VLAN_ID_MASK
    }

    /// EtherType of the encapsulated protocol.
    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.as_ref()[2..4]))
    }
}

impl<T: AsMut<[u8]>> VlanHeader<T> {
    /// Overwrite the whole Tag Control Information field.
    #[inline]
    pub fn set_tci(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.as_mut()[0..2], value);
    }

    /// Set the EtherType of the encapsulated protocol.
    #[inline]
    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.as_mut()[2..4], u16::from(value));
    }
}
