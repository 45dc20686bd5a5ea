/// A point of interest in an image.
/// This pretty much follows from OpenCV conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPoint {
    /// The horizontal coordinate in a coordinate system is
    /// defined s.t. +x faces right and starts from the top
    /// of the image.
    /// the vertical coordinate in a coordinate system is defined
    /// s.t. +y faces toward the bottom of an image and starts
    /// from the left side of the image.
    pub point: (f32, f32),

    /// The diameter defining the extent of the keypoint, in pixel units
    pub size: f32,

    /// The orientation angle in degrees; any negative value means
    /// the orientation is undefined
    pub angle: f32,

    /// The level of scale space in which the keypoint was detected.
    /// Signed so that detectors reporting level 0 or placeholder
    /// values stay representable.
    pub octave: i32,
}

impl KeyPoint {
    /// Creates a keypoint at a position with unit size, undefined
    /// orientation, and octave zero.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            point: (x, y),
            size: 1.0,
            angle: -1.0,
            octave: 0,
        }
    }
}
