//! Error types for dataset parsing and result emission.

use thiserror::Error;

/// Input section a record belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Section {
    /// `T Q N` header line
    Header,
    /// `id x y` topic lines
    Topics,
    /// `id qn t_1 .. t_qn` question lines
    Questions,
    /// `kind k x y` query lines
    Queries,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Topics => "topics",
            Self::Questions => "questions",
            Self::Queries => "queries",
        };
        f.write_str(name)
    }
}

/// Errors raised while reading a dataset or writing answers.
///
/// Every variant is fatal for the run: a dataset is either parsed completely
/// or not at all.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NearbyError {
    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream contained no header line
    #[error("empty input: expected a `T Q N` header line")]
    EmptyInput,

    /// A record ended before a required field
    #[error("line {line}: missing field `{field}`")]
    MissingField {
        /// 1-based line number
        line: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A record carried more tokens than its grammar allows
    #[error("line {line}: expected {expected} tokens, found {found}")]
    TrailingTokens {
        /// 1-based line number
        line: usize,
        /// Number of tokens the record should have
        expected: usize,
        /// Number of tokens actually present
        found: usize,
    },

    /// A numeric field could not be parsed
    #[error("line {line}: invalid value {value:?} for field `{field}`")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Name of the offending field
        field: &'static str,
        /// Raw token
        value: String,
    },

    /// The stream ended before every declared record was read
    #[error("unexpected end of input in {section}: expected {expected} records, found {found}")]
    UnexpectedEof {
        /// Section that was cut short
        section: Section,
        /// Count declared in the header
        expected: usize,
        /// Records read before the stream ended
        found: usize,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NearbyError>;
