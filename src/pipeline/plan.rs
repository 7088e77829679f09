//! Shift plan construction

use crate::types::SemitoneOffset;

/// Ordered set of unique semitone offsets to render for every source file
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftPlan {
    offsets: Vec<SemitoneOffset>,
}

impl ShiftPlan {
    /// Build a plan from requested steps, dropping repeats but keeping the
    /// position of each value's first occurrence
    pub fn new(steps: &[f64]) -> Self {
        let mut offsets: Vec<SemitoneOffset> = Vec::with_capacity(steps.len());
        for &step in steps {
            let offset = SemitoneOffset::new(step);
            if !offsets.contains(&offset) {
                offsets.push(offset);
            }
        }
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SemitoneOffset> + '_ {
        self.offsets.iter().copied()
    }
}
