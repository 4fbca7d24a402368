//! Observation hooks for animating construction and search.
//!
//! Both trees expose their intermediate decisions (node creation, split
//! selection, subtree descent, pruning, matches) through the [`Observer`]
//! trait, so a visualization can watch an algorithm run step by step.
//! Observers are pure side-observers: the `*_observed` variants produce
//! exactly the same trees and results as their plain counterparts.

use crate::{Rect, P2};

/// A single decision point inside tree construction or range search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A partition node was finished for `point` at `depth`
    NodeCreated { point: P2, count: usize, depth: usize },
    /// Construction chose a median split boundary on `axis` (0 = x, 1 = y)
    SplitChosen { axis: usize, coord: f64, depth: usize },
    /// A region was subdivided into quadrants around `center`
    Subdivided { boundary: Rect, center: P2 },
    /// A region was finalized as a leaf holding `locations` unique locations
    /// with `count` raw points among them
    LeafCreated {
        boundary: Rect,
        locations: usize,
        count: usize,
    },
    /// A search descended past a split boundary, toward the min (left/bottom)
    /// side or the max side
    Descended {
        axis: usize,
        coord: f64,
        toward_min: bool,
        depth: usize,
    },
    /// A search entered a region intersecting the query
    Entered { boundary: Rect },
    /// A search skipped a whole region that misses the query
    Pruned { boundary: Rect },
    /// A stored location matched the query rectangle
    Matched { point: P2, count: usize },
}

/// Receives [`Event`]s as an algorithm runs
pub trait Observer {
    /// Handle a single event
    fn observe(&mut self, event: &Event);
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, event: &Event) {
        (**self).observe(event);
    }
}

/// Observer that discards every event, the default for unobserved runs
#[derive(Clone, Copy, Debug, Default)]
pub struct NopObserver;

impl Observer for NopObserver {
    fn observe(&mut self, _event: &Event) {}
}

/// Observer that records every event it sees, in order
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// The recorded events
    pub events: Vec<Event>,
}

impl Observer for Recorder {
    fn observe(&mut self, event: &Event) {
        self.events.push(*event);
    }
}
