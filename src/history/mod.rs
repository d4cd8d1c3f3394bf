//! Transform edit history with linear undo/redo.
//!
//! The rendering host pushes pose snapshots in; undo and redo hand back the
//! pose the host should apply. The history never reads the scene itself.

pub mod manager;
pub mod snapshot;

pub use manager::{RehydrateOutcome, TransformHistory};
pub use snapshot::{EulerRotation, RotationOrder, TransformSnapshot};
