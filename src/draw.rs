use image::{imageops, ImageResult, Rgb, RgbImage};
use imageproc::drawing::{self, Canvas};
use log::trace;
use rand::Rng;
use std::path::Path;

use crate::KeyPoint;

/// Octave palette in detection-level order: level 1, 2, 3, then a
/// catch-all white for everything outside that range.
const OCTAVE_PALETTE: [Rgb<u8>; 4] = [
    Rgb([255, 0, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 255, 255]),
];

pub(crate) fn octave_color(octave: i32) -> Rgb<u8> {
    if (1..=3).contains(&octave) {
        OCTAVE_PALETTE[(octave - 1) as usize]
    } else {
        OCTAVE_PALETTE[3]
    }
}

pub(crate) fn random_color(rng: &mut impl Rng) -> Rgb<u8> {
    Rgb([rng.gen(), rng.gen(), rng.gen()])
}

fn rounded(point: (f32, f32)) -> (i32, i32) {
    ((point.0 + 0.5).floor() as i32, (point.1 + 0.5).floor() as i32)
}

/// Strokes a line segment of the given thickness by laying 1-px
/// segments side by side along the perpendicular.
pub(crate) fn draw_thick_line_segment<C>(
    canvas: &mut C,
    start: (f32, f32),
    end: (f32, f32),
    color: C::Pixel,
    thickness: i32,
) where
    C: Canvas,
{
    if thickness <= 1 {
        drawing::draw_line_segment_mut(canvas, start, end, color);
        return;
    }
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len > 0.0 {
        (-dy / len, dx / len)
    } else {
        (1.0, 0.0)
    };
    for i in 0..thickness {
        let offset = i as f32 - (thickness - 1) as f32 / 2.0;
        drawing::draw_line_segment_mut(
            canvas,
            (start.0 + nx * offset, start.1 + ny * offset),
            (end.0 + nx * offset, end.1 + ny * offset),
            color,
        );
    }
}

/// Selects how [`draw_keypoints`] renders each keypoint.
///
/// The default draws fixed-radius circles in per-keypoint random colors
/// with no orientation rays.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeypointDrawing {
    /// Color by detection level (1 red, 2 green, 3 blue, anything else
    /// white) instead of a random color per keypoint.
    pub color_octave: bool,
    /// Use half the keypoint size as the circle radius instead of the
    /// fixed 3 px default.
    pub use_keypoint_size: bool,
    /// Draw a ray from the center along the keypoint orientation.
    pub draw_angle: bool,
    /// Negate the vertical component of the orientation ray so angles
    /// follow the mathematical convention rather than raster rows.
    pub cartesian_angle: bool,
}

/// Draws every keypoint onto `image` as a hollow circle, optionally with
/// an orientation ray.
///
/// Random colors are pulled from `rng` so that callers control
/// determinism by seeding; the generator is untouched when
/// `color_octave` is set.
pub fn draw_keypoints(
    image: &mut RgbImage,
    keypoints: &[KeyPoint],
    config: KeypointDrawing,
    rng: &mut impl Rng,
) {
    trace!("drawing {} keypoints", keypoints.len());
    for kp in keypoints {
        let radius = if config.use_keypoint_size {
            kp.size / 2.0
        } else {
            3.0
        };
        let (c1, r1) = rounded(kp.point);
        let color = if config.color_octave {
            octave_color(kp.octave)
        } else {
            random_color(rng)
        };
        drawing::draw_hollow_circle_mut(image, (c1, r1), radius as i32, color);

        if !config.draw_angle {
            continue;
        }

        // The ray length always follows the keypoint size, even when the
        // circle radius does not.
        let radius = kp.size / 2.0;
        if kp.angle >= 0.0 {
            let (x, y) = kp.point;
            let orientation = kp.angle.to_radians();
            let c2 = (radius * orientation.cos() + x + 0.5).floor() as i32;
            let r2 = if config.cartesian_angle {
                (-radius * orientation.sin() + y + 0.5).floor() as i32
            } else {
                (radius * orientation.sin() + y + 0.5).floor() as i32
            };
            drawing::draw_line_segment_mut(
                image,
                (c1 as f32, r1 as f32),
                (c2 as f32, r2 as f32),
                color,
            );
        }
    }
}

fn hconcat(img1: &RgbImage, img2: &RgbImage) -> RgbImage {
    let width = img1.width() + img2.width();
    let height = img1.height().max(img2.height());
    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, img1, 0, 0);
    imageops::replace(&mut canvas, img2, i64::from(img1.width()), 0);
    canvas
}

/// Renders two keypoint sets side by side and connects corresponding
/// pairs with randomly colored lines.
///
/// `indices1[i]` and `indices2[i]` index a corresponding pair in `kp1`
/// and `kp2`. The source images are never mutated; the composite canvas
/// is returned with the right image offset by `img1`'s width.
///
/// # Panics
///
/// Panics if the index slices differ in length or reference keypoints
/// out of range.
pub fn draw_correspondences(
    img1: &RgbImage,
    img2: &RgbImage,
    kp1: &[KeyPoint],
    kp2: &[KeyPoint],
    indices1: &[usize],
    indices2: &[usize],
    rng: &mut impl Rng,
) -> RgbImage {
    assert_eq!(
        indices1.len(),
        indices2.len(),
        "correspondence index slices must pair up"
    );
    let mut aux1 = img1.clone();
    let mut aux2 = img2.clone();
    draw_keypoints(&mut aux1, kp1, KeypointDrawing::default(), rng);
    draw_keypoints(&mut aux2, kp2, KeypointDrawing::default(), rng);

    let mut canvas = hconcat(&aux1, &aux2);
    trace!(
        "connecting {} correspondences on a {}x{} canvas",
        indices1.len(),
        canvas.width(),
        canvas.height()
    );

    let offset = img1.width() as f32;
    for (&i1, &i2) in indices1.iter().zip(indices2) {
        let (mx, my) = kp1[i1].point;
        let (px, py) = kp2[i2].point;
        let color = random_color(rng);
        drawing::draw_line_segment_mut(
            &mut canvas,
            (mx.trunc(), my.trunc()),
            (px.trunc() + offset, py.trunc()),
            color,
        );
    }
    canvas
}

/// Renders a match list the way `draw_correspondences` does, where
/// `matches[i]` names the keypoint in `kp2` matched to `kp1[i]` and
/// `None` marks an unmatched keypoint.
///
/// Matched pairs are marked with circles at both ends plus a connecting
/// line in one random color per pair. With `draw_unmatched` set the
/// keypoints that never matched are circled as well.
pub fn draw_matches(
    img1: &RgbImage,
    img2: &RgbImage,
    kp1: &[KeyPoint],
    kp2: &[KeyPoint],
    matches: &[Option<usize>],
    draw_unmatched: bool,
    rng: &mut impl Rng,
) -> RgbImage {
    let mut canvas = hconcat(img1, img2);
    let offset = img1.width() as i32;
    let mut matched2 = vec![false; kp2.len()];

    for (i, m) in matches.iter().enumerate() {
        if let Some(j) = *m {
            matched2[j] = true;
            let color = random_color(rng);
            let (x1, y1) = rounded(kp1[i].point);
            let (x2, y2) = rounded(kp2[j].point);
            let x2 = x2 + offset;
            drawing::draw_hollow_circle_mut(&mut canvas, (x1, y1), 3, color);
            drawing::draw_hollow_circle_mut(&mut canvas, (x2, y2), 3, color);
            drawing::draw_line_segment_mut(
                &mut canvas,
                (x1 as f32, y1 as f32),
                (x2 as f32, y2 as f32),
                color,
            );
        }
    }

    if draw_unmatched {
        for (i, kp) in kp1.iter().enumerate() {
            if matches.get(i).copied().flatten().is_none() {
                let (x, y) = rounded(kp.point);
                drawing::draw_hollow_circle_mut(&mut canvas, (x, y), 3, random_color(rng));
            }
        }
        for (j, kp) in kp2.iter().enumerate() {
            if !matched2[j] {
                let (x, y) = rounded(kp.point);
                drawing::draw_hollow_circle_mut(&mut canvas, (x + offset, y), 3, random_color(rng));
            }
        }
    }
    canvas
}

/// Draws the keypoints on a copy of `image` and writes the result to
/// `path` (the format is derived from the extension).
pub fn save_keypoint_image<P: AsRef<Path>>(
    path: P,
    image: &RgbImage,
    keypoints: &[KeyPoint],
    rng: &mut impl Rng,
) -> ImageResult<()> {
    let mut annotated = image.clone();
    draw_keypoints(&mut annotated, keypoints, KeypointDrawing::default(), rng);
    annotated.save(path)
}

/// Composes [`draw_correspondences`] with a file write.
#[allow(clippy::too_many_arguments)]
pub fn save_correspondence_image<P: AsRef<Path>>(
    path: P,
    img1: &RgbImage,
    img2: &RgbImage,
    kp1: &[KeyPoint],
    kp2: &[KeyPoint],
    indices1: &[usize],
    indices2: &[usize],
    rng: &mut impl Rng,
) -> ImageResult<()> {
    let canvas = draw_correspondences(img1, img2, kp1, kp2, indices1, indices2, rng);
    canvas.save(path)
}
