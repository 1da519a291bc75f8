//! # nearby - nearest topic and question queries
//!
//! A Rust library answering nearest-neighbor queries over two related sets
//! of entities: **topics**, which are points in the plane, and **questions**,
//! which carry no location and are placed through the topics they reference.
//!
//! ## Features
//!
//! - **Topic queries**: the K topics nearest to a point, nearest first
//! - **Question queries**: the K questions whose referenced topics are nearest,
//!   using topic proximity as a relevance proxy
//! - **Clamped answers**: asking for more results than exist returns what exists
//! - **Deterministic output**: identical input always yields identical output,
//!   sequentially or on the rayon pool
//!
//! ## Quick Start
//!
//! ```rust
//! use nearby::prelude::*;
//!
//! // 3 topics, 2 questions, 2 queries
//! let input = "\
//! 3 2 2
//! 0 0.0 0.0
//! 1 10.0 0.0
//! 2 3.0 0.0
//! 0 1 1
//! 1 2 2 1
//! t 2 0.0 0.0
//! q 5 0.0 0.0
//! ";
//!
//! let dataset: Dataset = input.parse().unwrap();
//! let engine = Engine::new(&dataset, EngineConfig::default());
//!
//! let mut out = Vec::new();
//! engine.run(&dataset.queries, &mut out).unwrap();
//!
//! // Topics 0 and 2 are nearest; question 1 reaches topic 2 before question 0 reaches topic 1
//! assert_eq!(String::from_utf8(out).unwrap(), "0 2 \n1 0 \n");
//! ```
//!
//! ## How It Works
//!
//! Every query scans all topics and sorts them by Euclidean distance. A topic
//! query keeps the nearest K. A question query walks the nearest
//! [`DEFAULT_MAX_CANDIDATE_TOPICS`] topics (configurable through
//! [`EngineConfig`]) and, for each, appends the questions referencing it in
//! ascending id order, skipping questions already collected. Questions that
//! only reference topics beyond that cutoff are never returned.

pub mod dataset;
pub mod distance;
pub mod emit;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod resolver;
pub mod select;

mod integration_test;

pub use dataset::{Dataset, Header, Query, QueryKind, Question, QuestionId, Topic, TopicId};
pub use distance::{DistanceRecord, Point, TopicTable};
pub use engine::{Engine, EngineConfig, run};
pub use error::{NearbyError, Result, Section};
pub use resolver::{DEFAULT_MAX_CANDIDATE_TOPICS, QuestionIndex};
pub use select::{select_nearest, sort_by_distance};
