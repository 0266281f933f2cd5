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

use roundtrip_model::index::VertexIndex;

/// Precondition violations reported before a solver starts working.
///
/// Solvers do not raise recoverable faults while searching; anything that
/// would go wrong is checked up front and reported once, before any table
/// is allocated or any node is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The instance exceeds the solver's supported vertex count.
    TooManyVertices {
        num_vertices: usize,
        max_supported: usize,
    },
    /// The solver requires every off-diagonal edge to be present, but at
    /// least one is absent.
    IncompleteMatrix { from: VertexIndex, to: VertexIndex },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyVertices {
                num_vertices,
                max_supported,
            } => {
                write!(
                    f,
                    "The instance has {} vertices, but this solver supports at most {}",
                    num_vertices, max_supported
                )
            }
            Self::IncompleteMatrix { from, to } => {
                write!(
                    f,
                    "The edge {} -> {} is absent, but this solver requires a complete matrix",
                    from.get(),
                    to.get()
                )
            }
        }
    }
}

impl std::error::Error for SolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_name_the_offender() {
        let err = SolveError::TooManyVertices {
            num_vertices: 30,
            max_supported: 22,
        };
        assert!(format!("{}", err).contains("30"));

        let err = SolveError::IncompleteMatrix {
            from: VertexIndex::new(1),
            to: VertexIndex::new(2),
        };
        assert!(format!("{}", err).contains("1 -> 2"));
    }
}
