//! Axis-aligned integer rectangle

/// An axis-aligned rectangle with integer position and size.
///
/// Units depend on context: cell units for grid rectangles, pixel units
/// for tile and entity placement. Tile rectangles carry a zero size and
/// only use the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,

    /// Top edge
    pub y: i32,

    /// Width
    pub w: i32,

    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a rectangle from position and size
    #[inline]
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check whether a cell lies inside this rectangle
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether two rectangles overlap. Empty rectangles overlap
    /// nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(1, 2, 3, 2);
        assert!(r.contains(1, 2));
        assert!(r.contains(3, 3));
        assert!(!r.contains(4, 2));
        assert!(!r.contains(1, 4));
        assert!(!r.contains(0, 2));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(1, 1, 2, 2);
        let c = Rect::new(2, 0, 2, 2);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_zero_size_intersects_nothing() {
        let a = Rect::new(5, 5, 0, 0);
        let b = Rect::new(4, 4, 3, 3);
        assert!(!a.intersects(&b));
    }
}
