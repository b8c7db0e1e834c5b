//! Frame sources.
//!
//! The control loop pulls one frame per iteration.  A failed read ends the
//! loop; it is never retried.

use hand_gesture::Frame;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("camera {index} unavailable: {reason}")]
    Unavailable { index: u32, reason: String },
    #[error("failed to read frame {frame}: {reason}")]
    ReadFailed { frame: u64, reason: String },
}

pub trait FrameSource {
    fn read(&mut self) -> Result<Frame, CaptureError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> Result<Frame, CaptureError> { (**self).read() }
}

// ════════════════════════════════════════════════════════════════════════════
// SimCamera: synthetic backdrop for keyboard simulation
// ════════════════════════════════════════════════════════════════════════════

/// Produces a dark, slowly drifting gradient in place of a webcam image.
pub struct SimCamera {
    index:  u32,
    width:  usize,
    height: usize,
    frames: u64,
}

impl SimCamera {
    pub fn open(index: u32, width: usize, height: usize) -> Result<Self, CaptureError> {
        if width == 0 || height == 0 {
            return Err(CaptureError::Unavailable {
                index,
                reason: format!("invalid frame size {width}x{height}"),
            });
        }
        tracing::info!(index, width, height, "Camera opened (simulated)");
        Ok(SimCamera { index, width, height, frames: 0 })
    }

    pub fn frames_read(&self) -> u64 { self.frames }
}

impl FrameSource for SimCamera {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        let mut frame = Frame::new(self.width, self.height, 0);
        let drift = (self.frames % 512) as usize;
        for y in 0..self.height {
            let shade = ((y + drift / 2) * 48 / self.height.max(1)) as u32 & 0xFF;
            let color = 0xFF000000 | (shade / 2) << 16 | (shade / 2) << 8 | shade;
            frame.pixels[y * self.width..(y + 1) * self.width].fill(color);
        }
        self.frames += 1;
        Ok(frame)
    }
}

impl Drop for SimCamera {
    fn drop(&mut self) {
        tracing::info!(index = self.index, frames = self.frames, "Camera released");
    }
}
