//! # Rust CV Draw
//!
//! Drawing helpers for computer vision pipelines: keypoints,
//! correspondences, projected pose overlays, and a small
//! coordinate-scaled plotting canvas.
//!
//! Everything here is a thin convenience layer over [`imageproc`]'s
//! rasterization primitives and [`nalgebra`]'s geometry types. The crate
//! adds no detection or estimation of its own; it exists so that
//! pipeline code can dump what it sees onto an image in one call:
//!
//! * [`draw_keypoints`] circles detected features, optionally colored by
//!   pyramid octave and annotated with orientation rays.
//! * [`draw_correspondences`] and [`draw_matches`] composite two frames
//!   side by side and connect matching features.
//! * [`draw_reference_system`] and [`draw_box`] project an object pose
//!   into the image and trace its axes or silhouette rectangle, and
//!   [`draw_projected_box`] does the same for a planar homography.
//! * [`Plot`] owns a canvas addressed in logical coordinates with
//!   axis-equal scaling, for quick trajectory or residual sketches.
//!
//! Functions that pick random colors take their generator as an
//! argument, so an application that seeds one RNG per run gets
//! reproducible imagery.
//!
//! No logger is installed and no threads are spawned; drawing is a
//! synchronous mutation of the image you pass in (or of the canvas a
//! [`Plot`] owns).

mod draw;
mod keypoint;
mod overlay;
mod plot;
mod style;

pub use draw::*;
pub use keypoint::KeyPoint;
pub use overlay::*;
pub use plot::Plot;
pub use style::Style;

pub use image;
pub use nalgebra;
