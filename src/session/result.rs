use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub total: usize,
    pub correct_first_try: usize,
    pub mistakes: usize,
    /// Percentage of items answered on the first try. Items answered after a
    /// wrong attempt count against accuracy even though they were completed.
    pub accuracy: f64,
}

impl SessionReport {
    pub fn new(total: usize, correct_first_try: usize, mistakes: usize) -> Self {
        let accuracy = if total > 0 {
            (total.saturating_sub(mistakes) as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            total,
            correct_first_try,
            mistakes,
            accuracy,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.mistakes == 0
    }
}
