//! Reusable per-source sample buffers
//!
//! A buffer starts unsized and takes its shape from the first frame it
//! sees. From then on every write must match that shape; the storage is
//! never reallocated.

use kinetic_core::{FrameSourceTypes, KineticError, KineticResult, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferState {
    Unsized,
    Sized(Size),
}

/// Fixed-shape sample storage for one source
#[derive(Debug, Clone)]
pub struct FrameBuffer<T> {
    stream: FrameSourceTypes,
    /// Samples per pixel
    channels: usize,
    state: BufferState,
    data: Vec<T>,
}

impl<T: Copy> FrameBuffer<T> {
    /// One sample per pixel
    pub fn new(stream: FrameSourceTypes) -> Self {
        Self::with_channels(stream, 1)
    }

    pub fn with_channels(stream: FrameSourceTypes, channels: usize) -> Self {
        Self {
            stream,
            channels,
            state: BufferState::Unsized,
            data: Vec::new(),
        }
    }

    pub fn stream(&self) -> FrameSourceTypes {
        self.stream
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_sized(&self) -> bool {
        matches!(self.state, BufferState::Sized(_))
    }

    /// Image size, `None` until the first frame arrived
    pub fn size(&self) -> Option<Size> {
        match self.state {
            BufferState::Unsized => None,
            BufferState::Sized(size) => Some(size),
        }
    }

    /// Number of samples a frame of this buffer's shape holds
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Storage address, stable once sized
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Transition to the sized state if not there yet
    ///
    /// Returns `Ok(true)` when this call allocated the storage, filled
    /// with `fill`. A size different from the established one is
    /// rejected and leaves the buffer untouched.
    pub fn ensure_sized(&mut self, size: Size, fill: T) -> KineticResult<bool> {
        match self.state {
            BufferState::Sized(current) if current == size => Ok(false),
            BufferState::Sized(current) => Err(KineticError::ShapeMismatch {
                stream: self.stream,
                expected: current,
                actual: size,
            }),
            BufferState::Unsized => {
                self.data = vec![fill; size.area() * self.channels];
                self.state = BufferState::Sized(size);
                tracing::debug!(stream = ?self.stream, %size, "frame buffer sized");
                Ok(true)
            }
        }
    }

    /// Copy a full frame of samples into the buffer
    pub fn write(&mut self, size: Size, samples: &[T], fill: T) -> KineticResult<()> {
        let expected = size.area() * self.channels;
        if samples.len() < expected {
            return Err(KineticError::FrameTooShort {
                expected,
                actual: samples.len(),
            });
        }
        self.ensure_sized(size, fill)?;
        self.data.copy_from_slice(&samples[..expected]);
        Ok(())
    }

    /// Fill the buffer in place through a closure over the whole storage
    pub fn write_with<F>(&mut self, size: Size, fill: T, f: F) -> KineticResult<()>
    where
        F: FnOnce(&mut [T]),
    {
        self.ensure_sized(size, fill)?;
        f(&mut self.data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsized_until_first_write() {
        let buffer: FrameBuffer<u16> = FrameBuffer::new(FrameSourceTypes::DEPTH);
        assert!(!buffer.is_sized());
        assert_eq!(buffer.size(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_first_write_sizes() {
        let mut buffer = FrameBuffer::new(FrameSourceTypes::DEPTH);
        buffer.write(Size::new(2, 2), &[1u16, 2, 3, 4], 0).unwrap();
        assert_eq!(buffer.size(), Some(Size::new(2, 2)));
        assert_eq!(buffer.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_storage_stable_across_writes() {
        let mut buffer = FrameBuffer::with_channels(FrameSourceTypes::COLOR, 4);
        let size = Size::new(3, 2);
        buffer.write(size, &[7u8; 24], 0).unwrap();
        let ptr = buffer.as_ptr();
        let capacity = buffer.capacity();
        for value in 0..10u8 {
            buffer.write(size, &[value; 24], 0).unwrap();
            assert_eq!(buffer.as_ptr(), ptr);
            assert_eq!(buffer.capacity(), capacity);
            assert_eq!(buffer.len(), 24);
        }
    }

    #[test]
    fn test_shape_change_rejected() {
        let mut buffer = FrameBuffer::new(FrameSourceTypes::BODY_INDEX);
        buffer.write(Size::new(2, 2), &[0u8; 4], 0).unwrap();
        let err = buffer.write(Size::new(4, 1), &[9u8; 4], 0).unwrap_err();
        assert!(matches!(
            err,
            KineticError::ShapeMismatch {
                stream: FrameSourceTypes::BODY_INDEX,
                ..
            }
        ));
        assert_eq!(buffer.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(buffer.size(), Some(Size::new(2, 2)));
    }

    #[test]
    fn test_short_frame_rejected() {
        let mut buffer = FrameBuffer::new(FrameSourceTypes::INFRARED);
        let err = buffer.write(Size::new(2, 2), &[1u16; 3], 0).unwrap_err();
        assert!(matches!(
            err,
            KineticError::FrameTooShort {
                expected: 4,
                actual: 3
            }
        ));
        assert!(!buffer.is_sized());
    }

    #[test]
    fn test_ensure_sized_fill() {
        let mut buffer = FrameBuffer::new(FrameSourceTypes::BODY_INDEX);
        assert!(buffer.ensure_sized(Size::new(3, 1), u8::MAX).unwrap());
        assert!(!buffer.ensure_sized(Size::new(3, 1), 0).unwrap());
        assert_eq!(buffer.as_slice(), &[u8::MAX; 3]);
    }
}
