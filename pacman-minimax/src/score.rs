//! Evaluations and the bounds the search compares them against.

use decorum::N64;

/// The value an evaluation function assigns to a game state
///
/// This is a NaN free float so it can be totally ordered and used as a sort key.
pub type Evaluation = N64;

#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Copy)]
/// The extended-real type used for the alpha and beta bounds. An evaluation is wrapped in
/// `Scored`, and the two unbounded ends sit either side of every possible evaluation so a bound
/// can start out as "nothing guaranteed yet" without any float infinity arithmetic.
pub enum Bound {
    /// Lower than any evaluation
    Worst,
    /// Ordered based on the wrapped evaluation
    Scored(Evaluation),
    /// Higher than any evaluation
    Best,
}

impl Bound {
    /// Returns the best possible score
    ///
    /// No evaluation can be higher than this, so it is the starting `beta` at the root
    pub fn best_possible_score() -> Self {
        Bound::Best
    }

    /// Returns the worst possible score
    ///
    /// No evaluation can be lower than this, so it is the starting `alpha` at the root
    pub fn worst_possible_score() -> Self {
        Bound::Worst
    }

    /// Returns the wrapped evaluation, or `None` for either unbounded end
    pub fn scored(&self) -> Option<Evaluation> {
        match self {
            Bound::Scored(s) => Some(*s),
            _ => None,
        }
    }
}

impl From<Evaluation> for Bound {
    fn from(score: Evaluation) -> Self {
        Bound::Scored(score)
    }
}

/// The arithmetic mean of the given evaluations, summed in iteration order
///
/// Returns `None` when there is nothing to average
pub fn mean(scores: impl IntoIterator<Item = Evaluation>) -> Option<Evaluation> {
    let (count, total) = scores
        .into_iter()
        .fold((0usize, N64::from(0.0)), |(count, total), score| {
            (count + 1, total + score)
        });

    if count == 0 {
        return None;
    }

    Some(total / N64::from(count as f64))
}
