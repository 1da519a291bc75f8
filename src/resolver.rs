//! Question resolution through topic proximity.
//!
//! Questions carry no location of their own. A question query ranks the
//! topics around the query point and walks them nearest first; every
//! question referencing the current topic joins the answer the first time it
//! is seen. Only the nearest `max_candidate_topics` topics are walked, so a
//! question whose topics all lie beyond that rank is never returned.

use std::collections::{HashMap, HashSet};

use crate::dataset::{Question, QuestionId, TopicId};
use crate::distance::DistanceRecord;

/// Number of proximity-ranked topics a question query looks at
pub const DEFAULT_MAX_CANDIDATE_TOPICS: usize = 1000;

/// Reverse lookup from a topic id to the questions referencing it
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use nearby::{DistanceRecord, Question, QuestionIndex};
///
/// let mut questions = BTreeMap::new();
/// questions.insert(0, Question { id: 0, topics: vec![5] });
/// questions.insert(1, Question { id: 1, topics: vec![5, 6] });
///
/// let index = QuestionIndex::from_questions(questions.values());
/// let nearest = [DistanceRecord { id: 6, distance: 0.0 }, DistanceRecord { id: 5, distance: 1.0 }];
/// assert_eq!(index.resolve(&nearest, 10, 1000), vec![1, 0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct QuestionIndex {
    /// Question ids per topic, ascending, without repeats
    by_topic: HashMap<TopicId, Vec<QuestionId>>,
}

impl QuestionIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        QuestionIndex::default()
    }

    /// Builds the index from questions given in ascending id order
    pub fn from_questions<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Self {
        let mut index = QuestionIndex::new();
        for question in questions {
            index.add(question);
        }
        index
    }

    /// Registers a question under each topic it references
    ///
    /// Questions must be added in ascending id order.
    pub fn add(&mut self, question: &Question) {
        for &topic in &question.topics {
            let ids = self.by_topic.entry(topic).or_default();
            if ids.last() != Some(&question.id) {
                ids.push(question.id);
            }
        }
    }

    /// Questions referencing `topic`, ascending by id
    pub fn questions_for(&self, topic: TopicId) -> &[QuestionId] {
        self.by_topic.get(&topic).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct topic ids referenced by at least one question
    pub fn len(&self) -> usize {
        self.by_topic.len()
    }

    /// Returns whether no question references any topic
    pub fn is_empty(&self) -> bool {
        self.by_topic.is_empty()
    }

    /// Collects up to `required_results` question ids for topics ranked nearest first.
    ///
    /// `nearest` must already be sorted by distance. Only its first
    /// `max_candidate_topics` entries are considered.
    pub fn resolve(
        &self,
        nearest: &[DistanceRecord],
        required_results: usize,
        max_candidate_topics: usize,
    ) -> Vec<QuestionId> {
        let mut results = Vec::new();
        if required_results == 0 {
            return results;
        }

        let mut seen = HashSet::new();
        for record in nearest.iter().take(max_candidate_topics) {
            for &id in self.questions_for(record.id) {
                if seen.insert(id) {
                    results.push(id);
                    if results.len() == required_results {
                        return results;
                    }
                }
            }
        }
        results
    }
}
