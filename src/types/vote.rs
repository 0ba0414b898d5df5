use serde::Deserialize;

/// A single tally entry. Votes carry no voter identity, so every accepted
/// vote appends a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub fn value(self) -> i32 {
        match self {
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }
}

/// Kept as raw JSON so that `0`, `2`, `1.0` and `"1"` all reach validation
/// instead of failing deserialization.
#[derive(Debug, Deserialize, Default)]
pub struct VoteBody {
    pub vote: Option<serde_json::Value>,
}
