use rustc_hash::FxHashSet;

use crate::observe::{Event, NopObserver, Observer};
use crate::util::{self, PointKey};
use crate::{Error, Point, Rect, P2};

/// Default number of unique locations a region may hold before it is
/// subdivided into quadrants
pub const DEFAULT_CAPACITY: usize = 4;

/// A four-way region tree over 2d points.
///
/// Each region carries the tight bounding rect of the points inside it.
/// Regions holding more than `capacity` distinct locations are subdivided
/// around the rect's midpoint; the rest become leaves mapping each location
/// to its multiplicity. Built once from a batch of points and immutable
/// afterwards.
#[derive(Debug)]
pub struct QuadTree {
    root: Option<Node>,
    capacity: usize,
    len: usize,
}

/// A region is either a leaf holding its locations or an internal node
/// holding its non-empty quadrants, never both.
#[derive(Debug)]
enum Node {
    Internal {
        boundary: Rect,
        count: usize,
        children: Vec<Node>,
    },
    Leaf {
        boundary: Rect,
        count: usize,
        points: Vec<(P2, usize)>,
    },
}

impl QuadTree {
    /// Build a tree from a batch of points with [`DEFAULT_CAPACITY`].
    ///
    /// Fails with [`Error::InvalidInput`] if any coordinate is NaN or
    /// infinite.
    pub fn build<T: Point>(points: &[T]) -> Result<Self, Error> {
        Self::with_capacity(points, DEFAULT_CAPACITY)
    }

    /// Build a tree that subdivides regions holding more than `capacity`
    /// unique locations. A capacity of 0 is treated as 1.
    pub fn with_capacity<T: Point>(points: &[T], capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_observed(points, capacity, &mut NopObserver)
    }

    /// Like [`QuadTree::with_capacity`], reporting every subdivision and
    /// leaf to `observer`. The observer never affects the resulting tree.
    pub fn with_capacity_observed<T: Point, O: Observer>(
        points: &[T],
        capacity: usize,
        observer: &mut O,
    ) -> Result<Self, Error> {
        let points = util::validate(points)?;
        let capacity = capacity.max(1);
        let len = points.len();
        let root = build_node(points, capacity, observer);
        Ok(Self {
            root,
            capacity,
            len,
        })
    }

    /// Number of raw input points, duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no points
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The unique-location threshold regions are subdivided at
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tight bounding rect of the whole input
    ///
    /// **Returns** `None` for an empty tree
    pub fn boundary(&self) -> Option<&Rect> {
        self.root.as_ref().map(Node::boundary)
    }

    /// Number of regions on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    /// Search for stored locations inside `rect`.
    ///
    /// Lazily yields each matching unique location once, paired with its
    /// multiplicity. Whole regions that miss `rect` are pruned. The
    /// iterator is single-pass; calling this again re-walks the tree from
    /// scratch.
    pub fn range_search(&self, rect: &Rect) -> QuadRangeSearch<'_> {
        self.range_search_observed(rect, NopObserver)
    }

    /// Like [`QuadTree::range_search`], reporting entered, pruned, and
    /// matched regions to `observer` as the iterator advances
    pub fn range_search_observed<O: Observer>(
        &self,
        rect: &Rect,
        observer: O,
    ) -> QuadRangeSearch<'_, O> {
        QuadRangeSearch {
            rect: *rect,
            stack: self.root.iter().collect(),
            leaf: [].iter(),
            seen: FxHashSet::default(),
            observer,
        }
    }

    /// Search for stored locations inside `rect`, dropping multiplicities
    pub fn range_search_points<'a>(&'a self, rect: &Rect) -> impl Iterator<Item = P2> + 'a {
        self.range_search(rect).map(|(point, _)| point)
    }
}

impl Node {
    fn boundary(&self) -> &Rect {
        match self {
            Self::Internal { boundary, .. } | Self::Leaf { boundary, .. } => boundary,
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Internal { count, .. } | Self::Leaf { count, .. } => *count,
        }
    }

    fn height(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { children, .. } => {
                1 + children.iter().map(Self::height).max().unwrap_or(0)
            }
        }
    }
}

fn build_node<O: Observer>(points: Vec<P2>, capacity: usize, observer: &mut O) -> Option<Node> {
    let boundary = Rect::of(&points)?;
    let unique = util::count_unique(&points);
    let count = points.len();

    if unique.len() <= capacity {
        observer.observe(&Event::LeafCreated {
            boundary,
            locations: unique.len(),
            count,
        });
        return Some(Node::Leaf {
            boundary,
            count,
            points: unique,
        });
    }

    let center = boundary.center();
    let mut quadrants: [Vec<P2>; 4] = Default::default();
    for p in points {
        let quadrant = (p.x > center.x) as usize | (((p.y > center.y) as usize) << 1);
        quadrants[quadrant].push(p);
    }

    // A tight boundary one ulp wide can round its midpoint onto an edge,
    // leaving every point in one quadrant. Subdividing again would never
    // terminate, so such a region stays a leaf even though it is over
    // capacity.
    if quadrants.iter().any(|q| q.len() == count) {
        observer.observe(&Event::LeafCreated {
            boundary,
            locations: unique.len(),
            count,
        });
        return Some(Node::Leaf {
            boundary,
            count,
            points: unique,
        });
    }

    observer.observe(&Event::Subdivided { boundary, center });
    let children: Vec<Node> = quadrants
        .into_iter()
        .filter_map(|quadrant| build_node(quadrant, capacity, observer))
        .collect();
    let count = children.iter().map(Node::count).sum();
    Some(Node::Internal {
        boundary,
        count,
        children,
    })
}

/// Lazy range search over a [`QuadTree`].
///
/// Walks the tree with an explicit stack, pruning regions that miss the
/// query rectangle. A per-query seen set keeps every unique location to a
/// single emission even where sibling regions touch. Each
/// [`Iterator::next`] advances to the next match, letting callers stop
/// early without paying for the full result set.
#[derive(Debug)]
pub struct QuadRangeSearch<'a, O = NopObserver> {
    rect: Rect,
    stack: Vec<&'a Node>,
    leaf: std::slice::Iter<'a, (P2, usize)>,
    seen: FxHashSet<PointKey>,
    observer: O,
}

impl<'a, O: Observer> Iterator for QuadRangeSearch<'a, O> {
    type Item = (P2, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(&(point, count)) = self.leaf.next() {
                if self.rect.contains(&point) && self.seen.insert(util::point_key(&point)) {
                    self.observer.observe(&Event::Matched { point, count });
                    return Some((point, count));
                }
            }

            let node = self.stack.pop()?;
            if !self.rect.intersects(node.boundary()) {
                self.observer.observe(&Event::Pruned {
                    boundary: *node.boundary(),
                });
                continue;
            }
            self.observer.observe(&Event::Entered {
                boundary: *node.boundary(),
            });
            match node {
                Node::Leaf { points, .. } => self.leaf = points.iter(),
                Node::Internal { children, .. } => {
                    // Reversed so children drain in construction order.
                    self.stack.extend(children.iter().rev());
                }
            }
        }
    }
}
