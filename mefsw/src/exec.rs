//! The action executor.
//!
//! Actions run strictly in order. Every step starts by re-reading the
//! Ethernet header from the current frame, since the previous step may
//! have resized it. A push or pop stages the complete new headers before
//! the first resize and writes them back at offsets taken from the new
//! layout, so a step that fails before its resize leaves the frame as it
//! was.

use crate::action::{Action, TagKind};
use crate::codec::{
    insert_bytes, insert_vlan_tag, read_ethernet_header, read_vlan_header, remove_bytes,
    write_ethernet_header,
};
use crate::error::ExecError;
use crate::ether::{EtherHeader, ETHER_HEADER_LEN};
use crate::pipeline::Disposition;
use crate::rule::Rule;
use crate::vlan::VLAN_HEADER_LEN;
use crate::PktBufMut;

/// Apply `rule` to `frame`.
///
/// Returns the disposition of the first terminal action, or
/// [`Disposition::Pass`] if the rule has none. An error means the frame
/// may already have been rewritten by earlier actions and must not be sent.
pub fn execute<T: PktBufMut>(frame: &mut T, rule: &Rule) -> Result<Disposition, ExecError> {
    for action in rule.actions() {
        let eth = read_ethernet_header(frame.chunk())?;
        match *action {
            Action::Push { tag_kind, vlan_id } => push(frame, &eth, tag_kind, vlan_id)?,
            Action::Pop => pop(frame, &eth)?,
            Action::Forward { target_port: 0 } => return Ok(Disposition::Pass),
            Action::Forward { target_port } => return Ok(Disposition::Redirect(target_port)),
            Action::Unrecognized(kind) => return Err(ExecError::InvalidAction(kind)),
        }
    }
    Ok(Disposition::Pass)
}

fn push<T: PktBufMut>(
    frame: &mut T,
    eth: &EtherHeader<[u8; ETHER_HEADER_LEN]>,
    tag_kind: TagKind,
    vlan_id: u16,
) -> Result<(), ExecError> {
    let tpid = tag_kind
        .tpid()
        .ok_or(ExecError::InvalidTagKind(tag_kind))?;
    let new_eth = EtherHeader::new(eth.dst_addr(), eth.src_addr(), tpid);

    // the new tag encapsulates whatever the old header announced
    insert_vlan_tag(
        frame,
        ETHER_HEADER_LEN,
        Action::push_tci(vlan_id),
        eth.ethertype(),
    )?;
    write_ethernet_header(frame, &new_eth)?;
    Ok(())
}

fn pop<T: PktBufMut>(
    frame: &mut T,
    eth: &EtherHeader<[u8; ETHER_HEADER_LEN]>,
) -> Result<(), ExecError> {
    if !eth.ethertype().is_vlan_tpid() {
        return Ok(());
    }
    let tag = read_vlan_header(frame.chunk(), ETHER_HEADER_LEN)?;
    let new_eth = EtherHeader::new(eth.dst_addr(), eth.src_addr(), tag.ethertype());

    // replace {header, tag} with a fresh header; only one tag is unwound
    remove_bytes(frame, 0, ETHER_HEADER_LEN + VLAN_HEADER_LEN)?;
    insert_bytes(frame, 0, ETHER_HEADER_LEN)?;
    write_ethernet_header(frame, &new_eth)?;
    Ok(())
}
