use bytes::Buf;

use crate::conf::FrameConf;
use crate::error::{ConfError, SpaceError};
use crate::{PktBuf, PktBufMut};

/// An owned frame buffer with headroom, laid out like a packet mbuf.
///
/// The storage is allocated once, at construction. Afterwards the valid
/// region only moves inside it: `extend_front`/`trim_front` adjust the
/// head, `extend`/`truncate` the tail. None of these allocate, and all of
/// them refuse to move past the storage instead of panicking.
#[derive(Debug, Clone)]
pub struct FrameBuf {
    buf: Box<[u8]>,
    data_off: usize,
    data_len: usize,
}

impl FrameBuf {
    /// An empty frame with `headroom` bytes in front and `dataroom` bytes
    /// for data.
    pub fn new(headroom: usize, dataroom: usize) -> Self {
        Self {
            buf: vec![0; headroom + dataroom].into_boxed_slice(),
            data_off: headroom,
            data_len: 0,
        }
    }

    /// An empty frame sized by `conf`, which must leave room for a rule
    /// made entirely of pushes.
    pub fn from_conf(conf: &FrameConf) -> Result<Self, ConfError> {
        conf.validate()?;
        Ok(Self::new(conf.headroom, conf.dataroom))
    }

    /// A frame holding a copy of `data`, with `headroom` bytes in front and
    /// no tailroom.
    pub fn from_slice(headroom: usize, data: &[u8]) -> Self {
        let mut frame = Self::new(headroom, data.len());
        frame.buf[headroom..].copy_from_slice(data);
        frame.data_len = data.len();
        frame
    }

    /// Length of the valid region.
    #[inline]
    pub fn len(&self) -> usize {
        self.data_len
    }

    /// Whether the valid region is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data_len == 0
    }

    /// Bytes available behind the valid region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len() - self.data_off - self.data_len
    }

    /// Bytes available in front of the valid region.
    #[inline]
    pub fn front_capacity(&self) -> usize {
        self.data_off
    }

    /// The valid region.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buf[self.data_off..self.data_off + self.data_len]
    }

    /// The valid region, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.data_off..self.data_off + self.data_len]
    }

    /// Grow the valid region by `cnt` bytes at the tail.
    #[inline]
    pub fn extend(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.capacity() {
            return Err(SpaceError {
                requested: cnt,
                available: self.capacity(),
            });
        }
        self.data_len += cnt;
        Ok(())
    }

    /// Append `slice` to the valid region.
    #[inline]
    pub fn extend_from_slice(&mut self, slice: &[u8]) -> Result<(), SpaceError> {
        let old_len = self.len();
        self.extend(slice.len())?;
        self.data_mut()[old_len..].copy_from_slice(slice);
        Ok(())
    }

    /// Grow the valid region by `cnt` bytes into the headroom.
    #[inline]
    pub fn extend_front(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.front_capacity() {
            return Err(SpaceError {
                requested: cnt,
                available: self.front_capacity(),
            });
        }
        self.data_off -= cnt;
        self.data_len += cnt;
        Ok(())
    }

    /// Prepend `slice` to the valid region.
    #[inline]
    pub fn extend_front_from_slice(&mut self, slice: &[u8]) -> Result<(), SpaceError> {
        self.extend_front(slice.len())?;
        self.data_mut()[..slice.len()].copy_from_slice(slice);
        Ok(())
    }

    /// Shorten the valid region to `cnt` bytes.
    #[inline]
    pub fn truncate(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.len() {
            return Err(SpaceError {
                requested: cnt,
                available: self.len(),
            });
        }
        self.data_len = cnt;
        Ok(())
    }

    /// Drop `cnt` bytes from the front of the valid region, returning them
    /// to the headroom.
    #[inline]
    pub fn trim_front(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.len() {
            return Err(SpaceError {
                requested: cnt,
                available: self.len(),
            });
        }
        self.data_off += cnt;
        self.data_len -= cnt;
        Ok(())
    }

    /// Empty the frame and restore `headroom` bytes in front, so the
    /// storage can receive the next frame.
    pub fn reset(&mut self, headroom: usize) -> Result<(), SpaceError> {
        if headroom > self.buf.len() {
            return Err(SpaceError {
                requested: headroom,
                available: self.buf.len(),
            });
        }
        self.data_off = headroom;
        self.data_len = 0;
        Ok(())
    }
}

impl Buf for FrameBuf {
    #[inline]
    fn remaining(&self) -> usize {
        self.data_len
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        self.data()
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.data_len);
        self.data_off += cnt;
        self.data_len -= cnt;
    }
}

impl PktBuf for FrameBuf {
    #[inline]
    fn move_back(&mut self, cnt: usize) -> Result<(), SpaceError> {
        self.extend_front(cnt)
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) -> Result<(), SpaceError> {
        if cnt > self.data_len {
            return Err(SpaceError {
                requested: cnt,
                available: self.data_len,
            });
        }
        self.data_len -= cnt;
        Ok(())
    }
}

impl PktBufMut for FrameBuf {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        self.data_off
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        self.data_mut()
    }
}
