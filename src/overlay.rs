use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::Canvas;
use nalgebra::{Matrix3, Matrix4, Point2, Point3, RealField, Rotation3, Vector3, Vector4};
use num_traits::{NumCast, One, Zero};

use crate::draw::draw_thick_line_segment;
use crate::Style;

/// Gray levels for the X, Y, and Z axis lines on single-channel images,
/// chosen to stay pairwise distinguishable.
const GRAY_AXIS_LEVELS: [u8; 3] = [120, 182, 18];

const AXIS_THICKNESS: i32 = 2;

/// Projects object-frame points into pixel coordinates through a pinhole
/// camera with Brown-Conrady distortion.
///
/// `distortion` carries `(k1, k2, p1, p2)`; `None` means an undistorted
/// lens. The camera-frame point is perspective divided, the normalized
/// coordinates are distorted, and the intrinsics matrix maps the result
/// to pixels (with a homogeneous divide so non-canonical matrices
/// behave).
pub fn project_points(
    points: &[Point3<f64>],
    rotation: &Rotation3<f64>,
    translation: &Vector3<f64>,
    intrinsics: &Matrix3<f64>,
    distortion: Option<Vector4<f64>>,
) -> Vec<Point2<f64>> {
    let k = distortion.unwrap_or_else(Vector4::zeros);
    points
        .iter()
        .map(|point| {
            let cam = rotation * point + translation;
            let x = cam.x / cam.z;
            let y = cam.y / cam.z;
            let r2 = x * x + y * y;
            let radial = 1.0 + k[0] * r2 + k[1] * r2 * r2;
            let xd = x * radial + 2.0 * k[2] * x * y + k[3] * (r2 + 2.0 * x * x);
            let yd = y * radial + k[2] * (r2 + 2.0 * y * y) + 2.0 * k[3] * x * y;
            let uv = intrinsics * Vector3::new(xd, yd, 1.0);
            Point2::new(uv.x / uv.z, uv.y / uv.z)
        })
        .collect()
}

fn draw_axes<C>(
    image: &mut C,
    rotation: &Rotation3<f64>,
    translation: &Vector3<f64>,
    intrinsics: &Matrix3<f64>,
    distortion: Option<Vector4<f64>>,
    length: f64,
    colors: [C::Pixel; 3],
) where
    C: Canvas,
{
    let points = [
        Point3::origin(),
        Point3::new(length, 0.0, 0.0),
        Point3::new(0.0, length, 0.0),
        Point3::new(0.0, 0.0, length),
    ];
    let projected = project_points(&points, rotation, translation, intrinsics, distortion);
    let origin = (projected[0].x as f32, projected[0].y as f32);
    for (endpoint, color) in projected[1..].iter().zip(colors) {
        draw_thick_line_segment(
            image,
            origin,
            (endpoint.x as f32, endpoint.y as f32),
            color,
            AXIS_THICKNESS,
        );
    }
}

/// Draws the projected axes of the object frame: X red, Y green, Z blue.
pub fn draw_reference_system(
    image: &mut RgbImage,
    rotation: &Rotation3<f64>,
    translation: &Vector3<f64>,
    intrinsics: &Matrix3<f64>,
    distortion: Option<Vector4<f64>>,
    length: f64,
) {
    let colors = [Rgb([255, 0, 0]), Rgb([0, 255, 0]), Rgb([0, 0, 255])];
    draw_axes(
        image,
        rotation,
        translation,
        intrinsics,
        distortion,
        length,
        colors,
    );
}

/// Single-channel variant of [`draw_reference_system`]: the axes are
/// rendered at distinct gray levels instead of distinct hues.
pub fn draw_reference_system_gray(
    image: &mut GrayImage,
    rotation: &Rotation3<f64>,
    translation: &Vector3<f64>,
    intrinsics: &Matrix3<f64>,
    distortion: Option<Vector4<f64>>,
    length: f64,
) {
    let colors = GRAY_AXIS_LEVELS.map(|level| Luma([level]));
    draw_axes(
        image,
        rotation,
        translation,
        intrinsics,
        distortion,
        length,
        colors,
    );
}

fn split_homogeneous(transform: &Matrix4<f64>) -> (Rotation3<f64>, Vector3<f64>) {
    let rotation =
        Rotation3::from_matrix_unchecked(transform.fixed_slice::<3, 3>(0, 0).into_owned());
    let translation = transform.fixed_slice::<3, 1>(0, 3) / transform[(3, 3)];
    (rotation, translation)
}

/// [`draw_reference_system`] for a pose given as a single homogeneous
/// matrix. The translation column is de-homogenized by the bottom-right
/// element before projecting.
pub fn draw_reference_system_homogeneous(
    image: &mut RgbImage,
    transform: &Matrix4<f64>,
    intrinsics: &Matrix3<f64>,
    distortion: Option<Vector4<f64>>,
    length: f64,
) {
    let (rotation, translation) = split_homogeneous(transform);
    draw_reference_system(image, &rotation, &translation, intrinsics, distortion, length);
}

fn stroke_closed_quad(image: &mut RgbImage, quad: &[(f32, f32); 4], style: &Style) {
    for i in 0..4 {
        draw_thick_line_segment(image, quad[i], quad[(i + 1) % 4], style.color, style.thickness);
    }
}

/// Projects a `width` x `height` rectangle lying in the object frame's
/// z=0 plane, centered at the origin, and draws it as a closed loop.
///
/// The corners are generated bottom-left, bottom-right, top-right,
/// top-left in the local frame and returned in that order after
/// projection so callers can reuse the image-plane quadrilateral.
#[allow(clippy::too_many_arguments)]
pub fn draw_box(
    image: &mut RgbImage,
    rotation: &Rotation3<f64>,
    translation: &Vector3<f64>,
    width: f64,
    height: f64,
    intrinsics: &Matrix3<f64>,
    distortion: Option<Vector4<f64>>,
    style: &Style,
) -> [Point2<f64>; 4] {
    let w = width / 2.0;
    let h = height / 2.0;
    let corners = [
        Point3::new(-w, -h, 0.0),
        Point3::new(w, -h, 0.0),
        Point3::new(w, h, 0.0),
        Point3::new(-w, h, 0.0),
    ];
    let projected = project_points(&corners, rotation, translation, intrinsics, distortion);
    let corners = [projected[0], projected[1], projected[2], projected[3]];
    let quad = corners.map(|p| (p.x as f32, p.y as f32));
    stroke_closed_quad(image, &quad, style);
    corners
}

fn real<T: RealField + NumCast + Zero>(value: f64) -> T {
    NumCast::from(value).unwrap_or_else(T::zero)
}

/// Maps the corners of a `cols` x `rows` source rectangle through a
/// projective transform and draws the resulting closed quadrilateral.
///
/// The routine is generic over the transform's element type so f32 and
/// f64 homographies run the identical algorithm at their own precision.
/// The mapped corners are returned in source order `(0,0)`, `(cols,0)`,
/// `(cols,rows)`, `(0,rows)`.
pub fn draw_projected_box<T>(
    image: &mut RgbImage,
    transform: &Matrix3<T>,
    cols: u32,
    rows: u32,
    style: &Style,
) -> [Point2<T>; 4]
where
    T: RealField + NumCast + Zero + One + Copy,
{
    let w: T = real(<f64 as From<u32>>::from(cols));
    let h: T = real(<f64 as From<u32>>::from(rows));
    let corners = [
        Vector3::new(T::zero(), T::zero(), T::one()),
        Vector3::new(w, T::zero(), T::one()),
        Vector3::new(w, h, T::one()),
        Vector3::new(T::zero(), h, T::one()),
    ];
    let projected = corners.map(|corner| {
        let mapped = transform * corner;
        Point2::new(mapped.x / mapped.z, mapped.y / mapped.z)
    });
    let quad = projected.map(|p| {
        (
            p.x.to_f32().unwrap_or(0.0),
            p.y.to_f32().unwrap_or(0.0),
        )
    });
    stroke_closed_quad(image, &quad, style);
    projected
}
