//! Dataset model and the line-oriented input parser.
//!
//! The input is a single text stream:
//!
//! ```text
//! T Q N
//! <T lines>  id x y
//! <Q lines>  id qn t_1 .. t_qn
//! <N lines>  kind k x y
//! ```
//!
//! Counts declared on the header line bound how many records are read for
//! each section. Anything after the last query is ignored.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{NearbyError, Result, Section};

/// Upper bound on preallocation driven by counts read from the input
const PREALLOC_LIMIT: usize = 4096;

/// Topic identifier
pub type TopicId = i64;
/// Question identifier
pub type QuestionId = i64;

/// A located point entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Topic {
    /// Topic id, unique within a dataset
    pub id: TopicId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

/// An entity located only through the topics it references
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    /// Question id, unique within a dataset
    pub id: QuestionId,
    /// Referenced topic ids, in input order. May be empty or dangling.
    pub topics: Vec<TopicId>,
}

/// What a query asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryKind {
    /// K nearest topics (`t`)
    Topic,
    /// K most relevant questions (any other token)
    Question,
}

impl QueryKind {
    /// Maps the leading token of a query line to its kind.
    ///
    /// Only the literal `t` selects topics; every other token is a question query.
    pub fn from_token(token: &str) -> Self {
        if token == "t" { Self::Topic } else { Self::Question }
    }
}

/// A single nearest-neighbor request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Query {
    /// Topic or question query
    pub kind: QueryKind,
    /// Maximum number of ids to answer with
    pub required_results: usize,
    /// Query point x
    pub x: f64,
    /// Query point y
    pub y: f64,
}

/// Record counts declared on the first line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Number of topic lines (`T`)
    pub topics: usize,
    /// Number of question lines (`Q`)
    pub questions: usize,
    /// Number of query lines (`N`)
    pub queries: usize,
}

/// Parsed input: topics and questions keyed by id, queries in input order
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// Topics by id
    pub topics: BTreeMap<TopicId, Topic>,
    /// Questions by id
    pub questions: BTreeMap<QuestionId, Question>,
    /// Queries in input order
    pub queries: Vec<Query>,
}

impl Dataset {
    /// Parses a complete dataset from a line reader.
    ///
    /// # Errors
    /// Returns an error on any I/O failure, malformed record, or when the
    /// stream ends before every record declared in the header was read.
    ///
    /// # Examples
    /// ```
    /// use nearby::Dataset;
    ///
    /// let input = "1 1 1\n7 0.5 0.5\n3 1 7\nq 5 0 0\n";
    /// let dataset = Dataset::parse(input.as_bytes()).unwrap();
    /// assert_eq!(dataset.topics.len(), 1);
    /// assert_eq!(dataset.questions[&3].topics, vec![7]);
    /// ```
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Lines::new(reader);

        let (line, text) = lines.next_line()?.ok_or(NearbyError::EmptyInput)?;
        let header = parse_header(line, &text)?;
        tracing::debug!(
            topics = header.topics,
            questions = header.questions,
            queries = header.queries,
            "parsed header"
        );

        let mut dataset = Dataset {
            topics: BTreeMap::new(),
            questions: BTreeMap::new(),
            queries: Vec::with_capacity(header.queries.min(PREALLOC_LIMIT)),
        };

        for found in 0..header.topics {
            let (line, text) = lines.expect_line(Section::Topics, header.topics, found)?;
            let topic = parse_topic(line, &text)?;
            if dataset.topics.insert(topic.id, topic).is_some() {
                tracing::warn!(line, id = topic.id, "duplicate topic id replaces earlier entry");
            }
        }

        for found in 0..header.questions {
            let (line, text) = lines.expect_line(Section::Questions, header.questions, found)?;
            let question = parse_question(line, &text)?;
            let id = question.id;
            if dataset.questions.insert(id, question).is_some() {
                tracing::warn!(line, id, "duplicate question id replaces earlier entry");
            }
        }

        for found in 0..header.queries {
            let (line, text) = lines.expect_line(Section::Queries, header.queries, found)?;
            dataset.queries.push(parse_query(line, &text)?);
        }

        Ok(dataset)
    }
}

impl FromStr for Dataset {
    type Err = NearbyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

/// Non-blank lines with their 1-based line numbers
struct Lines<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Lines { reader, line: 0, buf: String::new() }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = self.buf.trim();
            if !trimmed.is_empty() {
                return Ok(Some((self.line, trimmed.to_owned())));
            }
        }
    }

    fn expect_line(&mut self, section: Section, expected: usize, found: usize) -> Result<(usize, String)> {
        self.next_line()?
            .ok_or(NearbyError::UnexpectedEof { section, expected, found })
    }
}

/// Whitespace-separated tokens of one record
struct Record<'a> {
    line: usize,
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Record<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Record { line, tokens: text.split_ascii_whitespace().collect(), pos: 0 }
    }

    fn token(&mut self, field: &'static str) -> Result<&'a str> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(NearbyError::MissingField { line: self.line, field })?;
        self.pos += 1;
        Ok(token)
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T> {
        let token = self.token(field)?;
        token.parse().map_err(|_| NearbyError::InvalidNumber {
            line: self.line,
            field,
            value: token.to_owned(),
        })
    }

    fn finish(self) -> Result<()> {
        if self.pos == self.tokens.len() {
            Ok(())
        } else {
            Err(NearbyError::TrailingTokens {
                line: self.line,
                expected: self.pos,
                found: self.tokens.len(),
            })
        }
    }
}

fn parse_header(line: usize, text: &str) -> Result<Header> {
    let mut record = Record::new(line, text);
    let header = Header {
        topics: record.number("T")?,
        questions: record.number("Q")?,
        queries: record.number("N")?,
    };
    record.finish()?;
    Ok(header)
}

fn parse_topic(line: usize, text: &str) -> Result<Topic> {
    let mut record = Record::new(line, text);
    let topic = Topic {
        id: record.number("id")?,
        x: record.number("x")?,
        y: record.number("y")?,
    };
    record.finish()?;
    Ok(topic)
}

fn parse_question(line: usize, text: &str) -> Result<Question> {
    let mut record = Record::new(line, text);
    let id = record.number("id")?;
    let qn: usize = record.number("qn")?;
    let mut topics = Vec::with_capacity(qn.min(PREALLOC_LIMIT));
    for _ in 0..qn {
        topics.push(record.number("topic id")?);
    }
    record.finish()?;
    Ok(Question { id, topics })
}

fn parse_query(line: usize, text: &str) -> Result<Query> {
    let mut record = Record::new(line, text);
    let query = Query {
        kind: QueryKind::from_token(record.token("kind")?),
        required_results: record.number("k")?,
        x: record.number("x")?,
        y: record.number("y")?,
    };
    record.finish()?;
    Ok(query)
}
