//! Query evaluation over an immutable dataset.
//!
//! The engine owns a flat [`TopicTable`] and a [`QuestionIndex`] built once
//! from a [`Dataset`]. Each query is answered independently, so evaluation
//! can run sequentially (answers stream out as they are computed) or on the
//! rayon pool (answers are collected in query order, then written).

use std::io::{BufRead, Write};

use rayon::prelude::*;

use crate::dataset::{Dataset, Query, QueryKind};
use crate::distance::{Point, TopicTable};
use crate::emit;
use crate::error::Result;
use crate::resolver::{DEFAULT_MAX_CANDIDATE_TOPICS, QuestionIndex};
use crate::select;

/// Tunables for query evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of proximity-ranked topics a question query looks at
    pub max_candidate_topics: usize,
    /// Evaluate queries on the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { max_candidate_topics: DEFAULT_MAX_CANDIDATE_TOPICS, parallel: false }
    }
}

impl EngineConfig {
    /// Sets the question-query topic cutoff
    #[must_use]
    pub fn with_max_candidate_topics(mut self, max_candidate_topics: usize) -> Self {
        self.max_candidate_topics = max_candidate_topics;
        self
    }

    /// Enables or disables parallel evaluation
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Answers topic and question queries against one dataset
///
/// # Examples
/// ```
/// use nearby::{Dataset, Engine, EngineConfig};
///
/// let dataset: Dataset = "3 0 1\n0 0.0 0.0\n1 10.0 0.0\n2 3.0 0.0\nt 2 0.0 0.0\n"
///     .parse()
///     .unwrap();
/// let engine = Engine::new(&dataset, EngineConfig::default());
/// assert_eq!(engine.answer(&dataset.queries[0]), vec![0, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    topics: TopicTable,
    questions: QuestionIndex,
    config: EngineConfig,
}

impl Engine {
    /// Builds the topic table and question index for `dataset`
    pub fn new(dataset: &Dataset, config: EngineConfig) -> Self {
        let topics = TopicTable::from_topics(&dataset.topics);
        let questions = QuestionIndex::from_questions(dataset.questions.values());
        tracing::debug!(
            topics = topics.len(),
            referenced_topics = questions.len(),
            max_candidate_topics = config.max_candidate_topics,
            "engine ready"
        );
        Engine { topics, questions, config }
    }

    /// Answers a single query with topic or question ids, nearest first
    pub fn answer(&self, query: &Query) -> Vec<i64> {
        let point = Point::new(query.x, query.y);
        let answer = match query.kind {
            QueryKind::Topic => {
                let mut results = Vec::with_capacity(query.required_results.min(self.topics.len()));
                self.topics.query_nearest_k(point, query.required_results, &mut results);
                results
            }
            QueryKind::Question => {
                let mut nearest = self.topics.distances_from(point);
                select::sort_by_distance(&mut nearest);
                self.questions.resolve(&nearest, query.required_results, self.config.max_candidate_topics)
            }
        };
        tracing::trace!(kind = ?query.kind, k = query.required_results, found = answer.len(), "answered");
        answer
    }

    /// Answers every query, keeping input order
    pub fn answer_all(&self, queries: &[Query]) -> Vec<Vec<i64>> {
        if self.config.parallel {
            queries.par_iter().map(|query| self.answer(query)).collect()
        } else {
            queries.iter().map(|query| self.answer(query)).collect()
        }
    }

    /// Answers every query and writes one line per query to `out`
    ///
    /// # Errors
    /// Returns an error if writing to `out` fails.
    pub fn run<W: Write>(&self, queries: &[Query], out: &mut W) -> Result<()> {
        if self.config.parallel {
            let answers = self.answer_all(queries);
            emit::write_answers(out, &answers)?;
        } else {
            for query in queries {
                emit::write_answer(out, &self.answer(query))?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Parses a dataset from `input` and writes one answer line per query to `out`
///
/// Returns the number of queries answered.
///
/// # Errors
/// Returns an error if the input is malformed or any read or write fails.
///
/// # Examples
/// ```
/// use nearby::EngineConfig;
///
/// let input = "3 0 1\n0 0 0\n1 10 0\n2 3 0\nt 2 0 0\n";
/// let mut out = Vec::new();
/// nearby::run(input.as_bytes(), &mut out, EngineConfig::default()).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0 2 \n");
/// ```
pub fn run<R: BufRead, W: Write>(input: R, out: &mut W, config: EngineConfig) -> Result<usize> {
    let dataset = Dataset::parse(input)?;
    let engine = Engine::new(&dataset, config);
    engine.run(&dataset.queries, out)?;
    Ok(dataset.queries.len())
}
