//! Ethernet II header.

use core::fmt;

use byteorder::{ByteOrder, NetworkEndian};

/// Fixed length of the Ethernet II header: two addresses and the EtherType.
pub const ETHER_HEADER_LEN: usize = 14;

enum_sim! {
    /// An enum-like type for representing the EtherType of an Ethernet frame
    /// or the encapsulated protocol of a VLAN tag.
    pub struct EtherType (u16) {
        /// Frame payload is Ipv4 protocol.
        IPV4 = 0x0800,
        /// Frame payload is Arp protocol.
        ARP = 0x0806,
        /// 802.1Q customer tag follows.
        VLAN = 0x8100,
        /// Frame payload is Ipv6 protocol.
        IPV6 = 0x86DD,
        /// 802.1ad service tag follows.
        QINQ = 0x88A8,
    }
}

impl EtherType {
    /// Whether a VLAN tag follows a header carrying this EtherType.
    #[inline]
    pub fn is_vlan_tpid(&self) -> bool {
        *self == Self::VLAN || *self == Self::QINQ
    }
}

/// A six-octet Ethernet II address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct EtherAddr(pub [u8; 6]);

impl EtherAddr {
    /// The all-zero address, used where an address field is unused.
    pub const UNSPECIFIED: EtherAddr = EtherAddr([0; 6]);

    /// Construct an Ethernet address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not six octets long.
    pub fn from_bytes(data: &[u8]) -> EtherAddr {
        let mut bytes = [0; 6];
        bytes.copy_from_slice(data);
        EtherAddr(bytes)
    }

    /// Return an Ethernet address as a sequence of octets, in big-endian.
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EtherAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
        )
    }
}

/// A view of an Ethernet II header over the first 14 bytes of `buf`.
///
/// `EtherHeader<[u8; 14]>` is an owned copy of a header and is what the
/// data path stages before resizing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtherHeader<T> {
    buf: T,
}

impl EtherHeader<[u8; ETHER_HEADER_LEN]> {
    /// Build an owned header.
    pub fn new(dst: EtherAddr, src: EtherAddr, ethertype: EtherType) -> Self {
        let mut header = Self {
            buf: [0; ETHER_HEADER_LEN],
        };
        header.set_dst_addr(dst);
        header.set_src_addr(src);
        header.set_ethertype(ethertype);
        header
    }
}

impl<T: AsRef<[u8]>> EtherHeader<T> {
    /// Wrap `buf`, which must hold at least [`ETHER_HEADER_LEN`] bytes.
    #[inline]
    pub fn parse_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The header bytes.
    #[inline]
    pub fn header_slice(&self) -> &[u8] {
        &self.buf.as_ref()[0..ETHER_HEADER_LEN]
    }

    /// Destination address.
    #[inline]
    pub fn dst_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.as_ref()[0..6])
    }

    /// Source address.
    #[inline]
    pub fn src_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.as_ref()[6..12])
    }

    /// The protocol/length field.
    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.as_ref()[12..14]))
    }
}

impl<T: AsMut<[u8]>> EtherHeader<T> {
    /// Set the destination address.
    #[inline]
    pub fn set_dst_addr(&mut self, value: EtherAddr) {
        (&mut self.buf.as_mut()[0..6]).copy_from_slice(value.as_bytes());
    }

    /// Set the source address.
    #[inline]
    pub fn set_src_addr(&mut self, value: EtherAddr) {
        (&mut self.buf.as_mut()[6..12]).copy_from_slice(value.as_bytes());
    }

    /// Set the protocol/length field.
    #[inline]
    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.as_mut()[12..14], u16::from(value));
    }
}
