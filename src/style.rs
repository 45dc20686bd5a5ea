use image::Rgb;

/// Stroke parameters shared by the overlay and plot drawing routines.
///
/// The color is selected with a single-character code in the style of
/// MATLAB/matplotlib format strings. Channels are always fully saturated
/// or zero; there is no blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: Rgb<u8>,
    pub thickness: i32,
}

impl Style {
    /// Creates a style from a color code and a line thickness in pixels.
    ///
    /// Valid codes are `r`, `g`, `b`, `c`, `m`, `y`, and `w`. Any other
    /// code silently yields black.
    pub fn new(code: char, thickness: i32) -> Self {
        let color = match code {
            'r' => Rgb([255, 0, 0]),
            'g' => Rgb([0, 255, 0]),
            'b' => Rgb([0, 0, 255]),
            'c' => Rgb([0, 255, 255]),
            'm' => Rgb([255, 0, 255]),
            'y' => Rgb([255, 255, 0]),
            'w' => Rgb([255, 255, 255]),
            _ => Rgb([0, 0, 0]),
        };
        Self { color, thickness }
    }

    /// Same as [`Style::new`] with the arguments swapped.
    pub fn from_thickness(thickness: i32, code: char) -> Self {
        Self::new(code, thickness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_codes_yield_saturated_channels() {
        let cases = [
            ('r', [255, 0, 0]),
            ('g', [0, 255, 0]),
            ('b', [0, 0, 255]),
            ('c', [0, 255, 255]),
            ('m', [255, 0, 255]),
            ('y', [255, 255, 0]),
            ('w', [255, 255, 255]),
        ];
        for (code, expected) in cases {
            let style = Style::new(code, 1);
            assert_eq!(style.color, Rgb(expected), "code {:?}", code);
            assert!(style.color.0.iter().all(|&ch| ch == 0 || ch == 255));
        }
    }

    #[test]
    fn unknown_codes_yield_black() {
        for code in ['k', 'q', 'Z', '0', ' '] {
            assert_eq!(Style::new(code, 2).color, Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn reversed_argument_constructor_is_equivalent() {
        assert_eq!(Style::from_thickness(4, 'm'), Style::new('m', 4));
        assert_eq!(Style::from_thickness(1, 'q'), Style::new('q', 1));
    }
}
