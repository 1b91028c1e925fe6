//! Commentary tiers for a required final-exam percentage.
//!
//! | Range            | Tier             |
//! |------------------|------------------|
//! | `x <= 0`         | `AlreadyPassing` |
//! | `0 < x <= 40`    | `Easy`           |
//! | `40 < x <= 60`   | `Moderate`       |
//! | `60 < x <= 80`   | `Hard`           |
//! | `80 < x <= 90`   | `Tight`          |
//! | `90 < x <= 100`  | `VeryHard`       |
//! | `x > 100`        | `Impossible`     |

use std::fmt;

use serde::{Deserialize, Serialize};

/// How daunting the required percentage is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commentary {
    AlreadyPassing,
    Easy,
    Moderate,
    Hard,
    Tight,
    VeryHard,
    Impossible,
}

impl Commentary {
    /// Band a required percentage. The input is not clamped.
    pub fn classify(required_percent: f64) -> Self {
        match required_percent {
            x if x <= 0.0 => Commentary::AlreadyPassing,
            x if x <= 40.0 => Commentary::Easy,
            x if x <= 60.0 => Commentary::Moderate,
            x if x <= 80.0 => Commentary::Hard,
            x if x <= 90.0 => Commentary::Tight,
            x if x <= 100.0 => Commentary::VeryHard,
            // NaN lands here too; it cannot come out of a validated evaluation.
            _ => Commentary::Impossible,
        }
    }

    /// The personal note shown after the result.
    pub fn message(&self) -> &'static str {
        match self {
            Commentary::AlreadyPassing => {
                "Wow. You could literally not go to the final exam and still pass. \
                 Not that it's encouraged, but I'm still jealous!"
            }
            Commentary::Easy => "Should be pretty easy, no?",
            Commentary::Moderate => "As long as you put some work in I'm sure you'll be fine.",
            Commentary::Hard => {
                "You should probably start studying now instead of calculating \
                 what you need on the final to pass lmao."
            }
            Commentary::Tight => "Gonna be tight but I believe in you!",
            Commentary::VeryHard => "I'll pray for you.",
            Commentary::Impossible => "Damn, I'd hate to be you right now.",
        }
    }
}

impl fmt::Display for Commentary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
