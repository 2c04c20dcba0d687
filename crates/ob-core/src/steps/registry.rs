use super::{StepDefinition, StepKind};

/// Requested step index is outside `[0, step_count)`.
///
/// Only the controller moves the index, so this indicates a programming error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step index {index} out of range (step count {count})")]
pub struct OutOfRangeError {
    pub index: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a step registry needs at least one step")]
    Empty,
    #[error("the last step must be {expected:?}, got {actual:?}")]
    LastStepNotSecurity { expected: StepKind, actual: StepKind },
}

/// Ordered, fixed sequence of steps.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

impl StepRegistry {
    /// The six-step onboarding flow.
    pub fn standard() -> Self {
        Self::from_kinds(StepKind::STANDARD_ORDER)
    }

    /// Build a registry from an explicit ordering.
    ///
    /// Indices are assigned from position. The final step gates account
    /// creation, so it must be the security step.
    pub fn new(kinds: impl IntoIterator<Item = StepKind>) -> Result<Self, RegistryError> {
        let registry = Self::from_kinds(kinds);
        match registry.steps.last() {
            None => Err(RegistryError::Empty),
            Some(last) if last.kind != StepKind::Security => {
                Err(RegistryError::LastStepNotSecurity {
                    expected: StepKind::Security,
                    actual: last.kind,
                })
            }
            Some(_) => Ok(registry),
        }
    }

    fn from_kinds(kinds: impl IntoIterator<Item = StepKind>) -> Self {
        let steps = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| StepDefinition::new(index, kind))
            .collect();
        Self { steps }
    }

    pub fn get_step(&self, index: usize) -> Result<&StepDefinition, OutOfRangeError> {
        self.steps.get(index).ok_or(OutOfRangeError {
            index,
            count: self.steps.len(),
        })
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn steps(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }

    /// Completion percentage when `index` is the active step (1-based, like
    /// the "Step 2 of 6" header), clamped to 100.
    pub fn progress(&self, index: usize) -> u8 {
        if self.steps.is_empty() {
            return 100;
        }
        let done = (index + 1).min(self.steps.len());
        ((done * 100) / self.steps.len()) as u8
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_six_ordered_steps() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.step_count(), 6);
        assert_eq!(registry.last_index(), 5);

        let kinds: Vec<_> = registry.steps().map(|s| s.kind).collect();
        assert_eq!(kinds, StepKind::STANDARD_ORDER.to_vec());
        for (position, step) in registry.steps().enumerate() {
            assert_eq!(step.index, position);
        }
    }

    #[test]
    fn get_step_rejects_out_of_range_index() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.get_step(0).unwrap().kind, StepKind::Personal);
        assert_eq!(registry.get_step(5).unwrap().title, "Security & Terms");
        assert_eq!(
            registry.get_step(6).unwrap_err(),
            OutOfRangeError { index: 6, count: 6 }
        );
    }

    #[test]
    fn custom_order_reassigns_indices() {
        let registry = StepRegistry::new([
            StepKind::Identity,
            StepKind::Personal,
            StepKind::Security,
        ])
        .unwrap();
        assert_eq!(registry.step_count(), 3);
        assert_eq!(registry.get_step(1).unwrap().kind, StepKind::Personal);
        assert_eq!(registry.get_step(1).unwrap().index, 1);
    }

    #[test]
    fn custom_order_must_end_with_security() {
        assert_eq!(StepRegistry::new(Vec::<StepKind>::new()).unwrap_err(), RegistryError::Empty);
        assert_eq!(
            StepRegistry::new([StepKind::Security, StepKind::Contact]).unwrap_err(),
            RegistryError::LastStepNotSecurity {
                expected: StepKind::Security,
                actual: StepKind::Contact,
            }
        );
    }

    #[test]
    fn progress_tracks_current_step() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.progress(0), 16);
        assert_eq!(registry.progress(2), 50);
        assert_eq!(registry.progress(5), 100);
        assert_eq!(registry.progress(42), 100);
    }
}
