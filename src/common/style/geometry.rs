/// Position and size of a shape on the slide, in EMUs.
///
/// Taken from a shape's `<a:xfrm>` (`<a:off x y>` and `<a:ext cx cy>`).
/// A missing `ext` leaves the extent at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// X position in EMUs
    pub x: i64,
    /// Y position in EMUs
    pub y: i64,
    /// Width in EMUs
    pub cx: i64,
    /// Height in EMUs
    pub cy: i64,
}

/// Horizontal or vertical third of the slide a point falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Third {
    First,
    Middle,
    Last,
}

impl Third {
    /// Classify `value` against `extent` (both in EMUs).
    ///
    /// Non-positive extents fall back to `Middle`.
    pub fn of(value: i64, extent: i64) -> Self {
        if extent <= 0 {
            return Third::Middle;
        }
        let ratio = value as f64 / extent as f64;
        if ratio < 1.0 / 3.0 {
            Third::First
        } else if ratio < 2.0 / 3.0 {
            Third::Middle
        } else {
            Third::Last
        }
    }
}

impl Rect {
    /// Horizontal center in EMUs, saturating at the `i64` bounds.
    #[inline]
    pub fn center_x(&self) -> i64 {
        self.x.saturating_add(self.cx / 2)
    }

    /// Vertical center in EMUs, saturating at the `i64` bounds.
    #[inline]
    pub fn center_y(&self) -> i64 {
        self.y.saturating_add(self.cy / 2)
    }

    /// Width as a fraction of `slide_width`.
    pub fn width_ratio(&self, slide_width: i64) -> f64 {
        if slide_width <= 0 {
            return 0.0;
        }
        self.cx as f64 / slide_width as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirds() {
        assert_eq!(Third::of(0, 900), Third::First);
        assert_eq!(Third::of(450, 900), Third::Middle);
        assert_eq!(Third::of(899, 900), Third::Last);
        assert_eq!(Third::of(10, 0), Third::Middle);
    }

    #[test]
    fn test_centers_and_ratio() {
        let rect = Rect { x: 100, y: 200, cx: 50, cy: 20 };
        assert_eq!(rect.center_x(), 125);
        assert_eq!(rect.center_y(), 210);
        assert!((rect.width_ratio(100) - 0.5).abs() < f64::EPSILON);
        assert_eq!(rect.width_ratio(0), 0.0);
    }

    #[test]
    fn test_centers_saturate_on_extreme_offsets() {
        let rect = Rect { x: i64::MAX, y: i64::MIN, cx: i64::MAX, cy: i64::MIN };
        assert_eq!(rect.center_x(), i64::MAX);
        assert_eq!(rect.center_y(), i64::MIN);
        assert_eq!(Third::of(rect.center_x(), 9_144_000), Third::Last);
    }
}
