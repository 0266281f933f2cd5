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

use num_traits::{PrimInt, Signed};
use roundtrip_model::tour::Tour;

/// The result of a solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult<T> {
    /// We have proven that no tour exists.
    Infeasible,
    /// We have found a tour and proven its optimality.
    Optimal(Tour<T>),
    /// We have found a tour, but not proven its optimality.
    Feasible(Tour<T>),
}

impl<T> SolveResult<T> {
    /// Returns the tour carried by this result, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour<T>> {
        match self {
            SolveResult::Optimal(tour) | SolveResult::Feasible(tour) => Some(tour),
            SolveResult::Infeasible => None,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveResult::Infeasible)
    }

    #[inline]
    pub fn has_tour(&self) -> bool {
        self.tour().is_some()
    }
}

impl<T> std::fmt::Display for SolveResult<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Infeasible => write!(f, "Infeasible"),
            SolveResult::Optimal(tour) => {
                write!(f, "Optimal(cost={})", tour.total_cost())
            }
            SolveResult::Feasible(tour) => {
                write!(f, "Feasible(cost={})", tour.total_cost())
            }
        }
    }
}

/// Why a solver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a tour.
    OptimalityProven,
    /// The solver proved that no tour exists.
    InfeasibilityProven,
    /// The solver aborted due to a search limit (time, nodes, etc.).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtrip_model::index::VertexIndex;

    fn tour() -> Tour<i64> {
        Tour::new(10, vec![VertexIndex::new(0), VertexIndex::new(1)])
    }

    #[test]
    fn test_result_accessors() {
        let optimal = SolveResult::Optimal(tour());
        assert!(optimal.is_optimal());
        assert!(optimal.has_tour());
        assert_eq!(optimal.tour().unwrap().total_cost(), 10);

        let infeasible: SolveResult<i64> = SolveResult::Infeasible;
        assert!(infeasible.is_infeasible());
        assert!(!infeasible.has_tour());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SolveResult::Optimal(tour())), "Optimal(cost=10)");
        assert_eq!(
            format!("{}", TerminationReason::Aborted("node limit".into())),
            "Aborted: node limit"
        );
    }
}
