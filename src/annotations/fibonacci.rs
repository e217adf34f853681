//! Fibonacci retracement level sets.
//!
//! Ratios 0 and 1 bound the retracement and are permanent: they can be
//! toggled off but never removed. Any other ratio may be added, removed or
//! toggled.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FIBONACCI_RATIOS;

/// Two ratios closer than this are the same level
const RATIO_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    pub ratio: f32,
    pub enabled: bool,
}

impl FibLevel {
    pub fn new(ratio: f32) -> Self {
        Self {
            ratio,
            enabled: true,
        }
    }

    pub fn is_permanent(&self) -> bool {
        is_permanent_ratio(self.ratio)
    }

    /// Label shown next to the level line, e.g. "61.8%"
    pub fn label(&self) -> String {
        let percent = self.ratio * 100.0;
        if (percent - percent.round()).abs() < 0.05 {
            format!("{:.0}%", percent)
        } else {
            format!("{:.1}%", percent)
        }
    }
}

fn is_permanent_ratio(ratio: f32) -> bool {
    ratio.abs() < RATIO_EPSILON || (ratio - 1.0).abs() < RATIO_EPSILON
}

/// Ordered set of fibonacci levels, sorted by ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FibLevel>", into = "Vec<FibLevel>")]
pub struct FibLevels {
    levels: Vec<FibLevel>,
}

impl Default for FibLevels {
    fn default() -> Self {
        Self {
            levels: DEFAULT_FIBONACCI_RATIOS
                .iter()
                .map(|&ratio| FibLevel::new(ratio))
                .collect(),
        }
    }
}

impl From<Vec<FibLevel>> for FibLevels {
    /// Builds a level set from arbitrary input, restoring the 0 and 1 levels
    /// if they are missing and dropping duplicates or non-finite ratios.
    fn from(input: Vec<FibLevel>) -> Self {
        let mut levels = Self {
            levels: vec![FibLevel::new(0.0), FibLevel::new(1.0)],
        };
        for level in input {
            if !level.ratio.is_finite() {
                continue;
            }
            match levels.position(level.ratio) {
                Some(index) => levels.levels[index].enabled = level.enabled,
                None => levels.insert_sorted(level),
            }
        }
        levels
    }
}

impl From<FibLevels> for Vec<FibLevel> {
    fn from(levels: FibLevels) -> Self {
        levels.levels
    }
}

impl FibLevels {
    pub fn iter(&self) -> impl Iterator<Item = &FibLevel> {
        self.levels.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &FibLevel> {
        self.levels.iter().filter(|level| level.enabled)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn contains(&self, ratio: f32) -> bool {
        self.position(ratio).is_some()
    }

    /// Add a new enabled level. Returns false for duplicates and non-finite ratios.
    pub fn add(&mut self, ratio: f32) -> bool {
        if !ratio.is_finite() || self.contains(ratio) {
            return false;
        }
        self.insert_sorted(FibLevel::new(ratio));
        true
    }

    /// Remove a level. The permanent 0 and 1 levels are never removed.
    pub fn remove(&mut self, ratio: f32) -> bool {
        if is_permanent_ratio(ratio) {
            return false;
        }
        match self.position(ratio) {
            Some(index) => {
                self.levels.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip a level's enabled flag, returning the new state
    pub fn toggle(&mut self, ratio: f32) -> Option<bool> {
        let index = self.position(ratio)?;
        let level = &mut self.levels[index];
        level.enabled = !level.enabled;
        Some(level.enabled)
    }

    pub fn set_enabled(&mut self, ratio: f32, enabled: bool) -> bool {
        match self.position(ratio) {
            Some(index) => {
                self.levels[index].enabled = enabled;
                true
            }
            None => false,
        }
    }

    fn position(&self, ratio: f32) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| (level.ratio - ratio).abs() < RATIO_EPSILON)
    }

    fn insert_sorted(&mut self, level: FibLevel) {
        let index = self
            .levels
            .iter()
            .position(|existing| existing.ratio > level.ratio)
            .unwrap_or(self.levels.len());
        self.levels.insert(index, level);
    }
}
