//! # Snapshot/Render Bridge
//!
//! The render side of the frame loop. The engine never draws; it extracts a
//! [`Snapshot`] after each step and hands it to a [`Presenter`].
//!
//! ## Architecture
//!
//! - **Snapshot**: per-frame, render-agnostic body state in display pixels
//! - **Presenter**: the presentation layer seam, with logging and recording
//!   implementations for headless runs

pub mod presenter;
pub mod snapshot;

pub use presenter::{LogPresenter, PresentError, PresentResult, Presenter, RecordingPresenter};
pub use snapshot::{capture_snapshot, BodySnapshot, QuadVertex, Snapshot};
