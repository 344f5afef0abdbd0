//! Planned shot descriptions for one batch.

use crate::{GenerationMode, PackSize};
use serde::{Deserialize, Serialize};

/// Ordered shot descriptions, always exactly `pack_size` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ShotStrategy {
    /// One description per planned output
    shots: Vec<String>,
    /// How many trailing entries are generic placeholders
    padded: usize,
}

impl ShotStrategy {
    /// Fits planner output to the requested pack size.
    ///
    /// Extra entries are dropped; missing entries are filled with generic
    /// placeholders numbered by position.
    ///
    /// # Examples
    ///
    /// ```
    /// use packshot_core::{GenerationMode, PackSize, ShotStrategy};
    ///
    /// let strategy = ShotStrategy::from_planned(
    ///     vec!["hero shot on marble".to_string()],
    ///     PackSize::Small,
    ///     GenerationMode::ObjectCentric,
    /// );
    /// assert_eq!(strategy.len(), 5);
    /// assert_eq!(*strategy.padded(), 4);
    /// assert!(strategy.shots()[4].ends_with("variation 5"));
    /// ```
    pub fn from_planned(mut planned: Vec<String>, pack_size: PackSize, mode: GenerationMode) -> Self {
        let target = pack_size.count();
        planned.truncate(target);
        let padded = target - planned.len();
        let start = planned.len();
        planned.extend((start..target).map(|index| placeholder_shot(mode, index)));
        Self {
            shots: planned,
            padded,
        }
    }

    /// Number of shots.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// True when no shots are planned.
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Consumes the strategy, returning its shots.
    pub fn into_shots(self) -> Vec<String> {
        self.shots
    }
}

/// Generic shot description for a position the planner did not fill.
pub fn placeholder_shot(mode: GenerationMode, index: usize) -> String {
    let base = match mode {
        GenerationMode::ObjectCentric => {
            "Clean commercial product photograph on a seamless backdrop with soft studio lighting"
        }
        GenerationMode::ModelCentric => {
            "Editorial photograph of the model naturally wearing or holding the product"
        }
    };
    format!("{}, variation {}", base, index + 1)
}
