//! Euclidean distances from a query point to every topic.

use std::collections::BTreeMap;

use crate::dataset::{Topic, TopicId};
use crate::select;

/// A point in the plane
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Creates a point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Distance from a query point to one topic
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceRecord {
    /// Topic id
    pub id: TopicId,
    /// Euclidean distance to the query point
    pub distance: f64,
}

/// Flat topic storage scanned linearly by every query
///
/// Topics are kept in ascending id order, which fixes the order of
/// equal-distance records after the stable sort.
///
/// # Examples
/// ```
/// use nearby::{Point, TopicTable};
///
/// let mut table = TopicTable::with_capacity(3);
/// table.add(0, 0.0, 0.0);
/// table.add(1, 10.0, 0.0);
/// table.add(2, 3.0, 0.0);
///
/// let mut results = Vec::new();
/// table.query_nearest_k(Point::new(0.0, 0.0), 2, &mut results);
/// assert_eq!(results, vec![0, 2]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TopicTable {
    /// (id, x, y) for each topic
    topics: Vec<(TopicId, f64, f64)>,
}

impl TopicTable {
    /// Creates an empty table
    pub fn new() -> Self {
        TopicTable::with_capacity(0)
    }

    /// Creates an empty table with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        TopicTable { topics: Vec::with_capacity(capacity) }
    }

    /// Builds a table from a topic mapping, in ascending id order
    pub fn from_topics(topics: &BTreeMap<TopicId, Topic>) -> Self {
        let mut table = TopicTable::with_capacity(topics.len());
        for topic in topics.values() {
            table.add(topic.id, topic.x, topic.y);
        }
        table
    }

    /// Appends a topic
    pub fn add(&mut self, id: TopicId, x: f64, y: f64) {
        self.topics.push((id, x, y));
    }

    /// Returns the number of topics in the table
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Returns whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Computes one [`DistanceRecord`] per topic, in table order
    pub fn distances_from(&self, point: Point) -> Vec<DistanceRecord> {
        self.topics
            .iter()
            .map(|&(id, x, y)| DistanceRecord { id, distance: point.distance(&Point::new(x, y)) })
            .collect()
    }

    /// Queries for the `k` nearest topics to `point`
    ///
    /// Ids are appended to `results` nearest first (not cleared first).
    /// Asking for more topics than the table holds returns all of them.
    pub fn query_nearest_k(&self, point: Point, k: usize, results: &mut Vec<TopicId>) {
        if k == 0 {
            return;
        }
        let nearest = select::select_nearest(self.distances_from(point), k);
        results.extend(nearest.iter().map(|record| record.id));
    }
}
