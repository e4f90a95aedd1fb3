// Keydist Cost Configuration
// Weights for insertions, deletions and substitutions

use serde::Deserialize;

/// Edit operation costs plus the keyboard bias toggle
///
/// Deserializes from the keys `insertionCost`, `deletionCost`,
/// `substitutionCost` and `useKeyboardModel`; the snake_case spellings are
/// accepted too. Unknown keys are rejected. Costs are taken as given,
/// including zero or negative values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CostConfig {
    #[serde(alias = "insertion_cost")]
    pub insertion_cost: f64,

    #[serde(alias = "deletion_cost")]
    pub deletion_cost: f64,

    #[serde(alias = "substitution_cost")]
    pub substitution_cost: f64,

    /// Discount errors between adjacent keys
    #[serde(alias = "use_keyboard_model", alias = "usekeyboardmodel")]
    pub use_keyboard_model: bool,
}

impl CostConfig {
    pub const DEFAULT_INSERTION_COST: f64 = 1.0;
    pub const DEFAULT_DELETION_COST: f64 = 1.0;
    pub const DEFAULT_SUBSTITUTION_COST: f64 = 2.0;

    /// Default costs with the keyboard bias on
    pub fn keyboard() -> Self {
        Self::default().with_keyboard_model(true)
    }

    pub fn with_insertion_cost(mut self, cost: f64) -> Self {
        self.insertion_cost = cost;
        self
    }

    pub fn with_deletion_cost(mut self, cost: f64) -> Self {
        self.deletion_cost = cost;
        self
    }

    pub fn with_substitution_cost(mut self, cost: f64) -> Self {
        self.substitution_cost = cost;
        self
    }

    pub fn with_keyboard_model(mut self, enabled: bool) -> Self {
        self.use_keyboard_model = enabled;
        self
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            insertion_cost: Self::DEFAULT_INSERTION_COST,
            deletion_cost: Self::DEFAULT_DELETION_COST,
            substitution_cost: Self::DEFAULT_SUBSTITUTION_COST,
            use_keyboard_model: false,
        }
    }
}
