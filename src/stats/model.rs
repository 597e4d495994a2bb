use serde::{Deserialize, Serialize};
use tracing::warn;

use super::VoteDelta;
use crate::review::BookId;

/// Round a mean rating to two decimals for display, folding `-0.0` into `0.0`.
pub fn round_rating(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 || !rounded.is_finite() {
        0.0
    } else {
        rounded
    }
}

/// The stored aggregate for one book. `mean_rating` is kept at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStats {
    pub book_id: BookId,
    pub total_votes: u64,
    pub mean_rating: f64,
}

/// What callers see: the aggregate rounded at the read boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_votes: u64,
    pub mean_rating: f64,
}

impl StatsSummary {
    pub const EMPTY: StatsSummary = StatsSummary {
        total_votes: 0,
        mean_rating: 0.0,
    };
}

impl BookStats {
    pub fn empty(book_id: BookId) -> Self {
        BookStats {
            book_id,
            total_votes: 0,
            mean_rating: 0.0,
        }
    }

    /// Build from a complete set of ratings.
    pub fn from_ratings(book_id: BookId, ratings: impl IntoIterator<Item = u8>) -> Self {
        let (count, sum) = ratings
            .into_iter()
            .fold((0u64, 0i64), |(n, s), r| (n + 1, s + i64::from(r)));
        Self::from_parts(book_id, count, sum)
    }

    fn from_parts(book_id: BookId, total_votes: u64, rating_sum: i64) -> Self {
        let mean_rating = if total_votes == 0 {
            0.0
        } else {
            rating_sum as f64 / total_votes as f64
        };
        BookStats {
            book_id,
            total_votes,
            mean_rating,
        }
    }

    /// The implied sum of ratings. Ratings are integers, so rounding recovers the
    /// exact sum and keeps float error from accumulating across deltas.
    pub fn rating_sum(&self) -> i64 {
        (self.mean_rating * self.total_votes as f64).round() as i64
    }

    /// Return the aggregate after `delta`.
    ///
    /// A subtract from an empty aggregate, or one that would push the sum below
    /// zero, clamps at zero and logs; both mean the aggregate had already drifted.
    pub fn apply(&self, delta: VoteDelta) -> BookStats {
        let mut count = self.total_votes as i64 + delta.count_change();
        let mut sum = self.rating_sum() + delta.sum_change();

        if count < 0 || sum < 0 {
            warn!(
                book_id = self.book_id,
                total_votes = self.total_votes,
                ?delta,
                "aggregate would go negative; clamping to zero"
            );
            count = count.max(0);
            sum = sum.max(0);
        }
        if count == 0 && sum != 0 {
            warn!(book_id = self.book_id, sum, "no votes left but rating sum is non-zero");
            sum = 0;
        }

        Self::from_parts(self.book_id, count as u64, sum)
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            total_votes: self.total_votes,
            mean_rating: round_rating(self.mean_rating),
        }
    }
}
