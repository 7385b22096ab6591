//! Presentation layer seam
//!
//! A presenter draws (or records) one snapshot per frame. Drawing itself is
//! outside this crate; the presenters here log or store frames for headless
//! runs.

use std::cell::RefCell;
use std::rc::Rc;

use super::snapshot::Snapshot;
use thiserror::Error;

/// Result type for presenter operations
pub type PresentResult = Result<(), PresentError>;

/// Errors raised by a presentation layer
#[derive(Error, Debug)]
pub enum PresentError {
    /// The output surface is gone (window closed, device lost)
    #[error("Presentation target lost: {0}")]
    TargetLost(String),

    /// Any other backend failure
    #[error("Presentation failed: {0}")]
    Backend(String),
}

/// Consumer of per-frame snapshots
pub trait Presenter {
    /// Present one frame
    fn present(&mut self, snapshot: &Snapshot) -> PresentResult;
}

/// Writes every frame to the log
///
/// Frame summaries go to `debug`, individual bodies to `trace`.
#[derive(Debug, Default)]
pub struct LogPresenter {
    frames_presented: u64,
}

impl LogPresenter {
    /// Create a new log presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &Snapshot) -> PresentResult {
        self.frames_presented += 1;
        log::debug!(
            "Frame {}: {} bodies, {} vertex bytes",
            snapshot.frame(),
            snapshot.len(),
            snapshot.vertex_bytes().len()
        );
        for body in snapshot.bodies() {
            log::trace!(
                "  {:?} {:?} center=({:.1}, {:.1}) angle={:.3}",
                body.handle,
                body.kind,
                body.center.x,
                body.center.y,
                body.angle
            );
        }
        Ok(())
    }
}

/// Keeps every presented snapshot in memory
///
/// Clones share one frame buffer: hand a clone to the engine and read the
/// frames back through the one you kept.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    frames: Rc<RefCell<Vec<Snapshot>>>,
}

impl RecordingPresenter {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Another recorder writing to the same frame buffer
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Copy of the recorded frames, oldest first
    pub fn frames(&self) -> Vec<Snapshot> {
        self.frames.borrow().clone()
    }

    /// Number of recorded frames
    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Take the recorded frames, leaving the buffer empty
    pub fn take_frames(&self) -> Vec<Snapshot> {
        std::mem::take(&mut *self.frames.borrow_mut())
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, snapshot: &Snapshot) -> PresentResult {
        self.frames.borrow_mut().push(snapshot.clone());
        Ok(())
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, snapshot: &Snapshot) -> PresentResult {
        (**self).present(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_handles_share_frames() {
        let recorder = RecordingPresenter::new();
        let mut boxed: Box<dyn Presenter> = Box::new(recorder.handle());

        boxed.present(&Snapshot::default()).unwrap();
        boxed.present(&Snapshot::default()).unwrap();
        drop(boxed);

        assert_eq!(recorder.frame_count(), 2);
        assert_eq!(recorder.take_frames().len(), 2);
        assert_eq!(recorder.frame_count(), 0);
    }

    #[test]
    fn test_log_presenter_counts_frames() {
        let mut presenter = LogPresenter::new();
        presenter.present(&Snapshot::default()).unwrap();
        assert_eq!(presenter.frames_presented(), 1);
    }
}
