/// Signed change a single review mutation makes to its book's aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDelta {
    /// A first vote: one more review carrying `rating`.
    Add { rating: u8 },
    /// A revote or edit: same count, rating moves from `old` to `new`.
    Update { old: u8, new: u8 },
    /// A removed review: one fewer, its `rating` retracted.
    Subtract { rating: u8 },
}

impl VoteDelta {
    /// Change in vote count.
    pub fn count_change(&self) -> i64 {
        match self {
            VoteDelta::Add { .. } => 1,
            VoteDelta::Update { .. } => 0,
            VoteDelta::Subtract { .. } => -1,
        }
    }

    /// Change in the implied rating sum.
    pub fn sum_change(&self) -> i64 {
        match *self {
            VoteDelta::Add { rating } => i64::from(rating),
            VoteDelta::Update { old, new } => i64::from(new) - i64::from(old),
            VoteDelta::Subtract { rating } => -i64::from(rating),
        }
    }

    /// True when applying this delta cannot change the aggregate.
    pub fn is_noop(&self) -> bool {
        matches!(self, VoteDelta::Update { old, new } if old == new)
    }
}
