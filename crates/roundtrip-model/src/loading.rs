// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for the Asymmetric TSP.
//!
//! This module turns whitespace-delimited text streams into a validated
//! `DistanceMatrix`. The expected format is a single leading vertex count
//! `n`, followed by `n * n` integers in row-major order. Lines may contain
//! comments introduced by `#`, which are ignored during tokenization.
//!
//! Negative entries encode "no direct edge". Formats that encode infinity
//! as a large integer are accommodated via the `forbid_at_least` threshold,
//! and `fail_on_isolated` rejects instances early when some vertex has no
//! outgoing connection at all (such instances cannot contain any tour).
//!
//! The parser accepts any `BufRead`, file path, raw reader, or string
//! slice, making it convenient to integrate with benchmarks, tests, and
//! tooling.

use crate::{
    index::VertexIndex,
    matrix::{DistanceMatrix, DistanceMatrixBuilder},
};
use num_traits::{PrimInt, Signed};
use roundtrip_core::num::constants::MinusOne;
use std::{
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended unexpectedly (e.g., missing tokens).
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The leading vertex count is invalid (must be at least 2).
    InvalidDimensions,
    /// The instance is trivially infeasible based on the loader
    /// configuration.
    Isolated(IsolatedVertexError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// Details about a vertex that cannot be left once entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedVertexError {
    /// The index of the vertex without any outgoing edge.
    pub vertex: VertexIndex,
}

impl std::fmt::Display for IsolatedVertexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vertex {} has no outgoing edges; no tour can exist",
            self.vertex.get()
        )
    }
}

impl std::error::Error for IsolatedVertexError {}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => {
                write!(f, "The vertex count must be an integer of at least 2")
            }
            Self::Isolated(e) => write!(f, "Infeasible instance: {}", e),
        }
    }
}

impl std::error::Error for InstanceLoaderError {}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for InstanceLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<IsolatedVertexError> for InstanceLoaderError {
    fn from(e: IsolatedVertexError) -> Self {
        Self::Isolated(e)
    }
}

/// A configurable loader for ATSP instances.
///
/// The format this parser expects is as follows (whitespace-separated
/// tokens):
///
/// ```raw
/// n                  // number of vertices
/// c_0_0 ... c_0_n-1  // row-major edge costs, n rows of n entries
/// ...
/// c_n-1_0 ... c_n-1_n-1
/// ```
///
/// # Configuration
///
/// * `forbid_at_least`: any edge cost >= this value is treated as absent.
///   Useful for formats where "Infinity" is represented by a large integer.
/// * `fail_on_isolated`: if true, the loader returns an error if any vertex
///   has no outgoing edge (the instance cannot contain a tour).
///
/// Negative entries are always treated as absent edges. Diagonal entries
/// are read but never used by the solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader<T> {
    forbid_at_least: Option<T>,
    fail_on_isolated: bool,
}

impl<T> Default for InstanceLoader<T> {
    fn default() -> Self {
        Self {
            forbid_at_least: None,
            fail_on_isolated: true,
        }
    }
}

impl<T> InstanceLoader<T>
where
    T: PrimInt + Signed + MinusOne + FromStr + Display + Debug,
{
    /// Creates a new `InstanceLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a threshold value. Any edge cost read from the input that is
    /// greater than or equal to `v` will be treated as absent.
    #[inline]
    pub fn forbid_at_least(mut self, v: T) -> Self {
        self.forbid_at_least = Some(v);
        self
    }

    /// Configures whether to return an error if a vertex ends up without
    /// any outgoing edge.
    #[inline]
    pub fn fail_on_isolated(mut self, yes: bool) -> Self {
        self.fail_on_isolated = yes;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<DistanceMatrix<T>, InstanceLoaderError> {
        let mut sc = Scanner::new(rdr);

        let n_val: T = sc.next()?;
        let n = n_val
            .to_usize()
            .ok_or(InstanceLoaderError::InvalidDimensions)?;
        if n < 2 {
            return Err(InstanceLoaderError::InvalidDimensions);
        }

        let mut builder = DistanceMatrixBuilder::new(n);

        for from in 0..n {
            let from_index = VertexIndex::new(from);
            let mut outgoing_found = false;

            for to in 0..n {
                let value: T = sc.next()?;
                let is_forbidden = self.forbid_at_least.is_some_and(|limit| value >= limit);

                if !is_forbidden && value >= T::zero() {
                    builder.set_cost(from_index, VertexIndex::new(to), value);
                    if from != to {
                        outgoing_found = true;
                    }
                }
            }

            if self.fail_on_isolated && !outgoing_found {
                return Err(InstanceLoaderError::Isolated(IsolatedVertexError {
                    vertex: from_index,
                }));
            }
        }

        Ok(builder.build())
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<DistanceMatrix<T>, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<DistanceMatrix<T>, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<DistanceMatrix<T>, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// A helper to read whitespace-delimited tokens from a generic reader.
///
/// Comments introduced by `#` are stripped when a line is buffered, so the
/// token loop only ever deals with whitespace separation.
struct Scanner<R> {
    rdr: R,
    line: String,
    cursor: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            cursor: 0,
        }
    }

    /// Buffers the next line, truncated at the first `#`.
    /// Returns `Ok(false)` on EOF.
    fn advance_line(&mut self) -> Result<bool, InstanceLoaderError> {
        self.line.clear();
        self.cursor = 0;
        let bytes_read = self
            .rdr
            .read_line(&mut self.line)
            .map_err(InstanceLoaderError::Io)?;
        if let Some(comment_start) = self.line.find('#') {
            self.line.truncate(comment_start);
        }
        Ok(bytes_read > 0)
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, InstanceLoaderError>
    where
        T: FromStr,
    {
        loop {
            let remainder = &self.line[self.cursor..];
            let trimmed = remainder.trim_start();
            if trimmed.is_empty() {
                if !self.advance_line()? {
                    return Err(InstanceLoaderError::UnexpectedEof);
                }
                continue;
            }

            self.cursor += remainder.len() - trimmed.len();
            let token_len = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let token = &self.line[self.cursor..self.cursor + token_len];
            self.cursor += token_len;

            return token.parse::<T>().map_err(|_| {
                InstanceLoaderError::Parse(ParseTokenError {
                    token: token.to_owned(),
                    type_name: std::any::type_name::<T>(),
                })
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_INSTANCE: &str = r#"
        4                       # number of vertices
        0  10 15 20
        10 0  35 25             # row of vertex 1
        15 35 0  30
        20 25 30 0
    "#;

    #[test]
    fn test_loads_and_maps_correctly() {
        let loader = InstanceLoader::new();
        let matrix: DistanceMatrix<i64> = loader.from_str(SMALL_INSTANCE).expect("Failed to load");

        assert_eq!(matrix.num_vertices(), 4);
        assert_eq!(
            matrix
                .cost(VertexIndex::new(1), VertexIndex::new(3))
                .into_option(),
            Some(25)
        );
        assert!(matrix.is_complete());
    }

    #[test]
    fn test_negative_entries_become_absent_edges() {
        let data = "2  0 -1  5 0";
        let loader = InstanceLoader::new().fail_on_isolated(false);
        let matrix: DistanceMatrix<i64> = loader.from_str(data).unwrap();

        assert!(matrix
            .cost(VertexIndex::new(0), VertexIndex::new(1))
            .is_none());
        assert_eq!(
            matrix
                .cost(VertexIndex::new(1), VertexIndex::new(0))
                .into_option(),
            Some(5)
        );
    }

    #[test]
    fn test_forbid_threshold() {
        let data = "2  0 1000  5 0";
        let loader = InstanceLoader::new().forbid_at_least(900).fail_on_isolated(false);
        let matrix: DistanceMatrix<i64> = loader.from_str(data).unwrap();

        assert!(matrix
            .cost(VertexIndex::new(0), VertexIndex::new(1))
            .is_none());
    }

    #[test]
    fn test_fail_on_isolated() {
        let data = "2  0 -1  5 0";
        let loader = InstanceLoader::new().fail_on_isolated(true);
        let res: Result<DistanceMatrix<i64>, _> = loader.from_str(data);

        match res {
            Err(InstanceLoaderError::Isolated(IsolatedVertexError { vertex })) => {
                assert_eq!(vertex.get(), 0);
            }
            _ => panic!("Expected IsolatedVertexError"),
        }
    }

    #[test]
    fn test_parse_error_structure() {
        let data = "2 0 garbage 5 0";
        let loader = InstanceLoader::<i64>::new();
        let res = loader.from_str(data);

        match res {
            Err(InstanceLoaderError::Parse(e)) => {
                assert_eq!(e.token, "garbage");
                assert!(e.type_name.contains("i64"));
            }
            _ => panic!("Expected Parse error with context"),
        }
    }

    #[test]
    fn test_rejects_undersized_instance() {
        let data = "1 0";
        let loader = InstanceLoader::<i64>::new();
        assert!(matches!(
            loader.from_str(data),
            Err(InstanceLoaderError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_truncated_input() {
        let data = "3  0 1 2  3 0";
        let loader = InstanceLoader::<i64>::new();
        assert!(matches!(
            loader.from_str(data),
            Err(InstanceLoaderError::UnexpectedEof)
        ));
    }
}
