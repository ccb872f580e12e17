use bytes::Buf;

use crate::error::SpaceError;
use crate::{PktBuf, PktBufMut};

/// A frame living inside a caller-owned byte slice.
///
/// The slice is split into `[headroom | valid region | tailroom]`. Drivers
/// that receive frames into their own buffers hand those buffers in with
/// the offset of the first valid byte, and the data path grows and shrinks
/// the valid region in place.
#[derive(Debug)]
pub struct CursorMut<'a> {
    buf: &'a mut [u8],
    start: usize,
    end: usize,
}

impl<'a> CursorMut<'a> {
    /// The whole slice is valid, with no headroom.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        let end = buf.len();
        CursorMut { buf, start: 0, end }
    }

    /// The valid region is `buf[start..end]`.
    #[inline]
    pub fn with_region(buf: &'a mut [u8], start: usize, end: usize) -> Result<Self, SpaceError> {
        if start > end || end > buf.len() {
            return Err(SpaceError {
                requested: end,
                available: buf.len(),
            });
        }
        Ok(CursorMut { buf, start, end })
    }

    /// The entire underlying slice, headroom and tailroom included.
    #[inline]
    pub fn buf(&self) -> &[u8] {
        self.buf
    }

    /// Offset of the first valid byte in the underlying slice.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }

    /// Bytes past the valid region.
    #[inline]
    pub fn tailroom(&self) -> usize {
        self.buf.len() - self.end
    }
}

impl<'a> Buf for CursorMut<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for CursorMut<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.start {
            return Err(SpaceError {
                requested: cnt,
                available: self.start,
            });
        }
        self.start -= cnt;
        Ok(())
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.remaining() {
            return Err(SpaceError {
                requested: cnt,
                available: self.remaining(),
            });
        }
        self.end -= cnt;
        Ok(())
    }
}

impl<'a> PktBufMut for CursorMut<'a> {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        self.start
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_mut() {
        let mut b = [10; 1000];
        let c: [u8; 1000] = [10; 1000];
        for c_pos in 0..1001 {
            let mut cursor = CursorMut::new(&mut b[..]);
            cursor.advance(c_pos);

            assert_eq!(c_pos, cursor.cursor());
            assert_eq!(cursor.buf(), &c[..]);
            assert_eq!(cursor.remaining(), 1000 - c_pos);
            assert_eq!(cursor.chunk_headroom(), c_pos);
            assert_eq!(cursor.chunk(), &c[c_pos..]);
        }

        for c_pos in 0..1001 {
            let mut cursor = CursorMut::new(&mut b[..]);
            cursor.advance(1000);
            cursor.move_back(c_pos).unwrap();

            assert_eq!(1000 - c_pos, cursor.cursor());
            assert_eq!(cursor.remaining(), c_pos);
            assert_eq!(cursor.chunk(), &c[1000 - c_pos..]);
        }

        let n = 300;
        for c_pos in 0..(1000 - n + 1) {
            let mut cursor = CursorMut::new(&mut b[..]);
            cursor.advance(n);

            cursor.trim_off(c_pos).unwrap();
            assert_eq!(cursor.remaining(), 1000 - n - c_pos);
            assert_eq!(cursor.tailroom(), c_pos);
            assert_eq!(cursor.chunk_mut(), &c[n..(1000 - c_pos)]);
        }
    }

    #[test]
    fn resize_past_bounds_is_rejected() {
        let mut b = [0u8; 64];
        let mut cursor = CursorMut::with_region(&mut b[..], 8, 60).unwrap();

        assert_eq!(
            cursor.move_back(9),
            Err(SpaceError {
                requested: 9,
                available: 8
            })
        );
        assert_eq!(cursor.cursor(), 8);

        assert_eq!(
            cursor.trim_off(53),
            Err(SpaceError {
                requested: 53,
                available: 52
            })
        );
        assert_eq!(cursor.remaining(), 52);

        cursor.move_back(8).unwrap();
        assert_eq!(cursor.chunk_headroom(), 0);
        assert_eq!(cursor.remaining(), 60);
    }

    #[test]
    fn invalid_region() {
        let mut b = [0u8; 16];
        assert!(CursorMut::with_region(&mut b[..], 10, 4).is_err());
        assert!(CursorMut::with_region(&mut b[..], 0, 17).is_err());
        assert!(CursorMut::with_region(&mut b[..], 16, 16).is_ok());
    }
}
