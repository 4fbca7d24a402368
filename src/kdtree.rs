use crate::observe::{Event, NopObserver, Observer};
use crate::{util, Error, Point, Rect, P2};

/// A binary tree over unique point locations, splitting space at the median
/// coordinate and alternating the split axis by depth (x at even depths, y
/// at odd).
///
/// Built once from a batch of points and immutable afterwards. Exact
/// duplicates collapse into a single node carrying a multiplicity count, so
/// every stored location lives in exactly one node.
#[derive(Debug)]
pub struct KdTree {
    root: Option<Box<Node>>,
    len: usize,
}

#[derive(Debug)]
struct Node {
    point: P2,
    count: usize,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl KdTree {
    /// Build a tree from a batch of points.
    ///
    /// Fails with [`Error::InvalidInput`] if any coordinate is NaN or
    /// infinite.
    pub fn build<T: Point>(points: &[T]) -> Result<Self, Error> {
        Self::build_observed(points, &mut NopObserver)
    }

    /// Build a tree, reporting every split decision and node creation to
    /// `observer`. The observer never affects the resulting tree.
    pub fn build_observed<T: Point, O: Observer>(
        points: &[T],
        observer: &mut O,
    ) -> Result<Self, Error> {
        let points = util::validate(points)?;
        let unique = util::count_unique(&points);
        let root = build_node(unique, 0, observer);
        Ok(Self {
            root,
            len: points.len(),
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

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Search for stored locations inside `rect`.
    ///
    /// Lazily yields each matching unique location once, paired with its
    /// multiplicity, in node-left-right traversal order. The iterator is
    /// single-pass; calling this again re-walks the tree from scratch.
    pub fn range_search(&self, rect: &Rect) -> KdRangeSearch<'_> {
        self.range_search_observed(rect, NopObserver)
    }

    /// Like [`KdTree::range_search`], reporting descent and match decisions
    /// to `observer` as the iterator advances
    pub fn range_search_observed<O: Observer>(
        &self,
        rect: &Rect,
        observer: O,
    ) -> KdRangeSearch<'_, O> {
        KdRangeSearch {
            rect: *rect,
            stack: self.root.as_deref().map(|node| (node, 0)).into_iter().collect(),
            observer,
        }
    }

    /// Search for stored locations inside `rect`, dropping multiplicities
    pub fn range_search_points<'a>(&'a self, rect: &Rect) -> impl Iterator<Item = P2> + 'a {
        self.range_search(rect).map(|(point, _)| point)
    }
}

fn build_node<O: Observer>(
    mut points: Vec<(P2, usize)>,
    depth: usize,
    observer: &mut O,
) -> Option<Box<Node>> {
    if points.is_empty() {
        return None;
    }

    let axis = depth % 2;
    points.sort_by(|a, b| a.0[axis].total_cmp(&b.0[axis]));

    let median = points.len() / 2;
    let (point, count) = points[median];
    let coord = point[axis];
    observer.observe(&Event::SplitChosen { axis, coord, depth });

    // Locations tied with the median on this axis go left; the search
    // descent rule relies on it.
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (i, &entry) in points.iter().enumerate() {
        if i == median {
            continue;
        }
        if entry.0[axis] <= coord {
            left.push(entry);
        } else {
            right.push(entry);
        }
    }

    let node = Node {
        point,
        count,
        left: build_node(left, depth + 1, observer),
        right: build_node(right, depth + 1, observer),
    };
    observer.observe(&Event::NodeCreated {
        point,
        count,
        depth,
    });
    Some(Box::new(node))
}

fn height(node: &Option<Box<Node>>) -> usize {
    match node {
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
        None => 0,
    }
}

/// Lazy range search over a [`KdTree`].
///
/// Walks the tree with an explicit stack, so call depth stays constant no
/// matter how the tree is shaped. Each [`Iterator::next`] advances to the
/// next match, letting callers stop early without paying for the full
/// result set.
#[derive(Debug)]
pub struct KdRangeSearch<'a, O = NopObserver> {
    rect: Rect,
    stack: Vec<(&'a Node, usize)>,
    observer: O,
}

impl<'a, O: Observer> Iterator for KdRangeSearch<'a, O> {
    type Item = (P2, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            let axis = depth % 2;
            let coord = node.point[axis];

            // The right subtree is pushed first so the left one drains
            // before it, preserving node-left-right order.
            if self.rect.end()[axis] > coord {
                if let Some(right) = node.right.as_deref() {
                    self.observer.observe(&Event::Descended {
                        axis,
                        coord,
                        toward_min: false,
                        depth: depth + 1,
                    });
                    self.stack.push((right, depth + 1));
                }
            }
            if self.rect.start()[axis] <= coord {
                if let Some(left) = node.left.as_deref() {
                    self.observer.observe(&Event::Descended {
                        axis,
                        coord,
                        toward_min: true,
                        depth: depth + 1,
                    });
                    self.stack.push((left, depth + 1));
                }
            }

            if self.rect.contains(&node.point) {
                self.observer.observe(&Event::Matched {
                    point: node.point,
                    count: node.count,
                });
                return Some((node.point, node.count));
            }
        }
        None
    }
}
