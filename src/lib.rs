//! Static spatial indexes for 2D orthogonal range queries.
//!
//! Two index structures are provided, both built once from a batch of points
//! and immutable afterwards:
//!
//! - [`KdTree`]: a binary tree partitioning unique point locations at the
//!   median coordinate, alternating the split axis by depth.
//! - [`QuadTree`]: a region tree subdividing a tight bounding rectangle into
//!   quadrants until a region holds few enough distinct locations.
//!
//! Exact-coordinate duplicates in the input collapse into a single stored
//! location carrying a multiplicity count. Range searches are lazy and yield
//! each matching location once, paired with that count.
//!
//! ```
//! use nalgebra::point;
//! use rangetree::{KdTree, Rect};
//!
//! let points = [point![2.0, 3.0], point![5.0, 7.0], point![5.0, 7.0], point![9.0, 6.0]];
//! let tree = KdTree::build(&points)?;
//!
//! let rect = Rect::new(4.0, 5.0, 10.0, 8.0)?;
//! let found: Vec<_> = tree.range_search(&rect).collect();
//! assert_eq!(found, vec![(point![5.0, 7.0], 2), (point![9.0, 6.0], 1)]);
//! # Ok::<(), rangetree::Error>(())
//! ```

mod error;
mod kdtree;
pub mod observe;
mod quadtree;
mod shapes;
mod util;

pub use error::Error;
pub use kdtree::{KdRangeSearch, KdTree};
pub use quadtree::{QuadRangeSearch, QuadTree, DEFAULT_CAPACITY};
pub use shapes::Rect;

use nalgebra::Point2;

/// Shorthand for the 2d point type used throughout the crate
pub type P2 = Point2<f64>;

/// Trait for getting a 2d point position of data indexed by the trees
pub trait Point {
    /// Get 2d point position
    fn point(&self) -> P2;
}

impl Point for P2 {
    fn point(&self) -> P2 {
        *self
    }
}

impl Point for (f64, f64) {
    fn point(&self) -> P2 {
        Point2::new(self.0, self.1)
    }
}

impl Point for [f64; 2] {
    fn point(&self) -> P2 {
        Point2::new(self[0], self[1])
    }
}
