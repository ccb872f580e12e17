pub use bytes::Buf;

use crate::error::SpaceError;

/// A contiguous frame buffer whose valid region can move into the headroom.
///
/// `chunk()` (from [`Buf`]) is the valid region of the frame. Every resize
/// is checked and reports a [`SpaceError`] instead of panicking; on error
/// the buffer is left untouched.
pub trait PktBuf: Buf {
    /// Extend the valid region `cnt` bytes to the front, into the headroom.
    fn move_back(&mut self, cnt: usize) -> Result<(), SpaceError>;

    /// Remove `cnt` trailing bytes from the valid region.
    fn trim_off(&mut self, cnt: usize) -> Result<(), SpaceError>;
}

/// A [`PktBuf`] that allows writing to its valid region.
pub trait PktBufMut: PktBuf {
    /// Number of bytes in front of the valid region that `move_back` may claim.
    fn chunk_headroom(&self) -> usize;

    /// The valid region of the frame, mutably.
    fn chunk_mut(&mut self) -> &mut [u8];
}

impl<T: PktBuf + ?Sized> PktBuf for &mut T {
    #[inline]
    fn move_back(&mut self, cnt: usize) -> Result<(), SpaceError> {
        (**self).move_back(cnt)
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) -> Result<(), SpaceError> {
        (**self).trim_off(cnt)
    }
}

impl<T: PktBufMut + ?Sized> PktBufMut for &mut T {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        (**self).chunk_headroom()
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        (**self).chunk_mut()
    }
}
