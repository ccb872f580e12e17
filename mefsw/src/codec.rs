//! Bounds-checked header access and in-place resizing of a frame.
//!
//! Reads copy the header out of the frame, so the returned value stays
//! valid after the frame is resized. Resizes shift only the bytes in front
//! of the resize point; the payload never moves. A resize that cannot be
//! satisfied returns an error before touching the frame.
//!
//! Every resize invalidates offsets computed before it. Callers that
//! rewrite headers stage the new header values first, resize, then write
//! the staged values back at offsets recomputed from the new layout.

use crate::error::{SpaceError, Truncated};
use crate::ether::{EtherHeader, EtherType, ETHER_HEADER_LEN};
use crate::vlan::{VlanHeader, VLAN_HEADER_LEN};
use crate::PktBufMut;

#[inline]
fn check_bounds(len: usize, offset: usize, width: usize) -> Result<usize, Truncated> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(end),
        _ => Err(Truncated {
            need: offset.saturating_add(width),
            len,
        }),
    }
}

/// Copy out the Ethernet header at the start of `frame`.
#[inline]
pub fn read_ethernet_header(frame: &[u8]) -> Result<EtherHeader<[u8; ETHER_HEADER_LEN]>, Truncated> {
    check_bounds(frame.len(), 0, ETHER_HEADER_LEN)?;
    let mut hdr = [0; ETHER_HEADER_LEN];
    hdr.copy_from_slice(&frame[..ETHER_HEADER_LEN]);
    Ok(EtherHeader::parse_unchecked(hdr))
}

/// Copy out the VLAN tag starting at `offset`.
#[inline]
pub fn read_vlan_header(
    frame: &[u8],
    offset: usize,
) -> Result<VlanHeader<[u8; VLAN_HEADER_LEN]>, Truncated> {
    let end = check_bounds(frame.len(), offset, VLAN_HEADER_LEN)?;
    let mut hdr = [0; VLAN_HEADER_LEN];
    hdr.copy_from_slice(&frame[offset..end]);
    Ok(VlanHeader::parse_unchecked(hdr))
}

/// Overwrite the Ethernet header at the start of the frame.
#[inline]
pub fn write_ethernet_header<T: PktBufMut>(
    frame: &mut T,
    hdr: &EtherHeader<[u8; ETHER_HEADER_LEN]>,
) -> Result<(), Truncated> {
    check_bounds(frame.remaining(), 0, ETHER_HEADER_LEN)?;
    frame.chunk_mut()[..ETHER_HEADER_LEN].copy_from_slice(hdr.header_slice());
    Ok(())
}

/// Overwrite the VLAN tag starting at `offset`.
#[inline]
pub fn write_vlan_header<T: PktBufMut>(
    frame: &mut T,
    offset: usize,
    hdr: &VlanHeader<[u8; VLAN_HEADER_LEN]>,
) -> Result<(), Truncated> {
    let end = check_bounds(frame.remaining(), offset, VLAN_HEADER_LEN)?;
    frame.chunk_mut()[offset..end].copy_from_slice(hdr.header_slice());
    Ok(())
}

/// Grow the frame by `count` zeroed bytes at offset `at`.
///
/// The first `at` bytes move `count` bytes towards the front, into the
/// headroom; everything from `at` on stays where it is.
pub fn insert_bytes<T: PktBufMut>(frame: &mut T, at: usize, count: usize) -> Result<(), SpaceError> {
    if at > frame.remaining() {
        return Err(SpaceError {
            requested: at,
            available: frame.remaining(),
        });
    }
    frame.move_back(count)?;
    let chunk = frame.chunk_mut();
    chunk.copy_within(count..count + at, 0);
    chunk[at..at + count].fill(0);
    Ok(())
}

/// Shrink the frame by the `count` bytes starting at `start`.
///
/// The first `start` bytes move `count` bytes towards the back; everything
/// after the removed range stays where it is.
pub fn remove_bytes<T: PktBufMut>(frame: &mut T, start: usize, count: usize) -> Result<(), SpaceError> {
    let len = frame.remaining();
    match start.checked_add(count) {
        Some(end) if end <= len => {}
        _ => {
            return Err(SpaceError {
                requested: start.saturating_add(count),
                available: len,
            })
        }
    }
    frame.chunk_mut().copy_within(0..start, count);
    frame.advance(count);
    Ok(())
}

/// Insert a 4-byte VLAN tag carrying `tci` and `encapsulated` right after
/// the first `after_offset` bytes of the frame.
///
/// Inserting after the Ethernet header leaves that header's EtherType in
/// front of the new tag; the caller sets it to the tag's TPID.
pub fn insert_vlan_tag<T: PktBufMut>(
    frame: &mut T,
    after_offset: usize,
    tci: u16,
    encapsulated: EtherType,
) -> Result<(), SpaceError> {
    let tag = VlanHeader::new(tci, encapsulated);
    insert_bytes(frame, after_offset, VLAN_HEADER_LEN)?;
    frame.chunk_mut()[after_offset..after_offset + VLAN_HEADER_LEN]
        .copy_from_slice(tag.header_slice());
    Ok(())
}
