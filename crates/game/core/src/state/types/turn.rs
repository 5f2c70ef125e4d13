/// Global turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Global turn counter, advanced once per full round.
    ///
    /// Slowed monsters skip their action on even values.
    pub number: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self { number: 1 }
    }

    pub fn is_even(&self) -> bool {
        self.number % 2 == 0
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
