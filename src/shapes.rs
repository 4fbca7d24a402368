use nalgebra::{self as na, point};

use crate::{Error, Point, P2};

/// An axis-aligned rectangle spanning two closed intervals, used both as a
/// query region and as the boundary of [`QuadTree`](crate::QuadTree) regions.
///
/// All four edges are inclusive: a point exactly on the boundary is
/// contained, and two rects sharing only a boundary line intersect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawRect", into = "RawRect")
)]
pub struct Rect {
    start: P2,
    center: P2,
    end: P2,
}

impl Rect {
    /// Create a new rect from its extreme coordinates.
    ///
    /// Fails with [`Error::InvalidBounds`] if min exceeds max on either axis.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, Error> {
        if xmin > xmax || ymin > ymax {
            return Err(Error::InvalidBounds {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self::from_corners(point![xmin, ymin], point![xmax, ymax]))
    }

    /// Create a rect spanning two corner points, swapping coordinates where
    /// needed so the result is always valid
    pub fn from_corners(a: P2, b: P2) -> Self {
        let start = point![a.x.min(b.x), a.y.min(b.y)];
        let end = point![a.x.max(b.x), a.y.max(b.y)];
        Self {
            start,
            center: na::center(&start, &end),
            end,
        }
    }

    /// Compute the tight bounding rect of a set of points
    ///
    /// **Returns** `None` if the set is empty
    pub fn of<T: Point>(items: &[T]) -> Option<Self> {
        let (first, rest) = items.split_first()?;
        let mut start = first.point();
        let mut end = start;
        for item in rest {
            let p = item.point();
            start = point![start.x.min(p.x), start.y.min(p.y)];
            end = point![end.x.max(p.x), end.y.max(p.y)];
        }
        Some(Self {
            start,
            center: na::center(&start, &end),
            end,
        })
    }

    /// Get the start (minimum) corner of the rect
    pub fn start(&self) -> P2 {
        self.start
    }

    /// Get the end (maximum) corner of the rect
    pub fn end(&self) -> P2 {
        self.end
    }

    /// Get the center point of the rect
    pub fn center(&self) -> P2 {
        self.center
    }

    /// Check if a point exists within the rect, boundary included
    pub fn contains(&self, point: &P2) -> bool {
        *point >= self.start && *point <= self.end
    }

    /// Check if the rect shares any space with another rect
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.end.x < other.start.x
            || self.start.x > other.end.x
            || self.end.y < other.start.y
            || self.start.y > other.end.y)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawRect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

#[cfg(feature = "serde")]
impl From<Rect> for RawRect {
    fn from(rect: Rect) -> Self {
        Self {
            xmin: rect.start.x,
            ymin: rect.start.y,
            xmax: rect.end.x,
            ymax: rect.end.y,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawRect> for Rect {
    type Error = Error;

    fn try_from(raw: RawRect) -> Result<Self, Error> {
        Rect::new(raw.xmin, raw.ymin, raw.xmax, raw.ymax)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::point;

    use crate::util::tests::make_rect;

    use super::*;

    #[test]
    fn rect_properties() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            rect.start(),
            point![0.0, 0.0],
            "Start should be at (0.0, 0.0)"
        );
        assert_eq!(
            rect.end(),
            point![10.0, 10.0],
            "End should be at (10.0, 10.0)"
        );
        assert_eq!(
            rect.center(),
            point![5.0, 5.0],
            "Center should be at (5.0, 5.0)"
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_eq!(
            Rect::new(5.0, 5.0, 2.0, 2.0),
            Err(Error::InvalidBounds {
                xmin: 5.0,
                ymin: 5.0,
                xmax: 2.0,
                ymax: 2.0,
            }),
            "Min above max on both axes should fail"
        );
        assert!(
            Rect::new(0.0, 5.0, 10.0, 2.0).is_err(),
            "Min above max on y alone should fail"
        );
        assert!(
            Rect::new(5.0, 5.0, 5.0, 5.0).is_ok(),
            "A degenerate point-sized rect is valid"
        );
    }

    #[test]
    fn from_corners_normalizes() {
        let rect = Rect::from_corners(point![10.0, 0.0], point![0.0, 10.0]);
        assert_eq!(rect, make_rect(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn of_computes_tight_bounds() {
        let points = [point![3.0, 7.0], point![-1.0, 2.0], point![5.0, 4.0]];
        assert_eq!(Rect::of(&points), Some(make_rect(-1.0, 2.0, 5.0, 7.0)));
        assert_eq!(Rect::of::<P2>(&[]), None, "Empty set has no bounds");
    }

    #[test]
    fn rect_contains_point() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        assert!(
            rect.contains(&point![5.0, 5.0]),
            "Rect should contain point (5.0, 5.0)"
        );
        assert!(
            !rect.contains(&point![-1.0, 5.0]),
            "Rect should not contain point (-1.0, 5.0)"
        );
        assert!(
            rect.contains(&point![0.0, 0.0]),
            "Rect should contain its start point (0.0, 0.0)"
        );
        assert!(
            rect.contains(&point![10.0, 10.0]),
            "Rect should contain its end point (10.0, 10.0)"
        );
        assert!(
            rect.contains(&point![10.0, 3.0]),
            "Rect should contain a point on one edge"
        );
    }

    #[test]
    fn rect_intersects_with_another_rect() {
        let rect1 = make_rect(0.0, 0.0, 10.0, 10.0);
        let rect2 = make_rect(5.0, 5.0, 15.0, 15.0);
        assert!(
            rect1.intersects(&rect2),
            "Rect1 should intersect with Rect2"
        );

        let rect3 = make_rect(10.0, 10.0, 20.0, 20.0);
        assert!(
            rect1.intersects(&rect3),
            "Rect1 should touch Rect3 at the corner, counting as intersect"
        );

        let rect4 = make_rect(11.0, 11.0, 21.0, 21.0);
        assert!(
            !rect1.intersects(&rect4),
            "Rect1 should not intersect with Rect4"
        );

        let rect5 = make_rect(3.0, 3.0, 7.0, 7.0);
        assert!(
            rect1.intersects(&rect5),
            "Rect5 is entirely inside Rect1, should intersect"
        );

        let rect6 = make_rect(-10.0, 0.0, -1.0, 10.0);
        assert!(
            !rect1.intersects(&rect6),
            "Rect1 should not intersect with Rect6 on the left"
        );

        let rect7 = make_rect(0.0, 10.0, 10.0, 20.0);
        assert!(
            rect1.intersects(&rect7),
            "Rect1 should touch Rect7 at the top edge, counting as intersect"
        );

        let rect8 = make_rect(10.0, 0.0, 20.0, 10.0);
        assert!(
            rect1.intersects(&rect8),
            "Rect1 should touch Rect8 on the right edge, counting as intersect"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_revalidates() {
        let rect = make_rect(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, r#"{"xmin":1.0,"ymin":2.0,"xmax":3.0,"ymax":4.0}"#);
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rect);

        let inverted = r#"{"xmin":5.0,"ymin":5.0,"xmax":2.0,"ymax":2.0}"#;
        assert!(
            serde_json::from_str::<Rect>(inverted).is_err(),
            "Deserializing inverted bounds should fail"
        );
    }
}
