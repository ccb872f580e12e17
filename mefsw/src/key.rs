//! Classification keys and the key builder.

use byteorder::{ByteOrder, LittleEndian};

use crate::codec::{read_ethernet_header, read_vlan_header};
use crate::error::{Truncated, WireError};
use crate::ether::{EtherAddr, EtherType, ETHER_HEADER_LEN};
use crate::vlan::VLAN_HEADER_LEN;

/// The lookup key of a frame.
///
/// Packed little-endian as
/// `ingress_port u32 | cvlan u16 | svlan u16 | backbone_mac [u8; 6] | pad [u8; 2]`,
/// the layout the provisioning side writes. The two VLAN fields are named
/// by tag kind there, so the ids move between slots by frame type:
///
/// | frame               | `cvlan`         | `svlan`         |
/// |---------------------|-----------------|-----------------|
/// | untagged            | 0               | 0               |
/// | single tag          | `outer_vlan_id` | 0               |
/// | QinQ                | `inner_vlan_id` | `outer_vlan_id` |
///
/// A lone service tag is provisioned with only `svlan` set and decodes to
/// an outer id, like a single customer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClassificationKey {
    /// Port the frame arrived on.
    pub ingress_port: u32,
    /// 12-bit id of the outer tag, 0 if untagged.
    pub outer_vlan_id: u16,
    /// 12-bit id of the inner tag of a QinQ frame, 0 otherwise.
    pub inner_vlan_id: u16,
    /// Backbone MAC, all-zero when unused.
    pub backbone_mac: EtherAddr,
}

impl ClassificationKey {
    /// Length of an encoded key.
    pub const WIRE_LEN: usize = 16;

    /// A key without backbone MAC.
    pub fn new(ingress_port: u32, outer_vlan_id: u16, inner_vlan_id: u16) -> Self {
        Self {
            ingress_port,
            outer_vlan_id,
            inner_vlan_id,
            backbone_mac: EtherAddr::UNSPECIFIED,
        }
    }

    /// The same key matching on `backbone_mac`.
    pub fn with_backbone_mac(mut self, backbone_mac: EtherAddr) -> Self {
        self.backbone_mac = backbone_mac;
        self
    }

    /// Encode into the packed layout.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0; Self::WIRE_LEN];
        let (cvlan, svlan) = match self.inner_vlan_id {
            0 => (self.outer_vlan_id, 0),
            inner => (inner, self.outer_vlan_id),
        };
        LittleEndian::write_u32(&mut buf[0..4], self.ingress_port);
        LittleEndian::write_u16(&mut buf[4..6], cvlan);
        LittleEndian::write_u16(&mut buf[6..8], svlan);
        buf[8..14].copy_from_slice(self.backbone_mac.as_bytes());
        buf
    }

    /// Decode from the packed layout. Padding is ignored.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() != Self::WIRE_LEN {
            return Err(WireError::Length {
                expected: Self::WIRE_LEN,
                actual: buf.len(),
            });
        }
        let cvlan = LittleEndian::read_u16(&buf[4..6]);
        let svlan = LittleEndian::read_u16(&buf[6..8]);
        let (outer_vlan_id, inner_vlan_id) = match svlan {
            0 => (cvlan, 0),
            svlan => (svlan, cvlan),
        };
        Ok(Self {
            ingress_port: LittleEndian::read_u32(&buf[0..4]),
            outer_vlan_id,
            inner_vlan_id,
            backbone_mac: EtherAddr::from_bytes(&buf[8..14]),
        })
    }
}

/// Classify `frame`, received on `ingress_port`.
///
/// A service tag (0x88a8) sets the outer id, and a customer tag (0x8100)
/// directly inside it sets the inner id. Otherwise a lone customer tag sets
/// the outer id. Anything else leaves both ids at 0. The backbone MAC is
/// never taken from the frame.
pub fn build_key(frame: &[u8], ingress_port: u32) -> Result<ClassificationKey, Truncated> {
    let eth = read_ethernet_header(frame)?;
    let mut key = ClassificationKey::new(ingress_port, 0, 0);

    match eth.ethertype() {
        EtherType::QINQ => {
            let outer = read_vlan_header(frame, ETHER_HEADER_LEN)?;
            key.outer_vlan_id = outer.vlan_id();
            if outer.ethertype() == EtherType::VLAN {
                let inner = read_vlan_header(frame, ETHER_HEADER_LEN + VLAN_HEADER_LEN)?;
                key.inner_vlan_id = inner.vlan_id();
            }
        }
        EtherType::VLAN => {
            key.outer_vlan_id = read_vlan_header(frame, ETHER_HEADER_LEN)?.vlan_id();
        }
        _ => {}
    }
    Ok(key)
}
