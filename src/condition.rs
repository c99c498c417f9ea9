//! # Generation Conditions
//!
//! A pluggable predicate collaborators implement to gate whether a frame or
//! layer prototype may currently be generated. A prototype with no attached
//! condition is always eligible.

/// Capability answering "can this prototype currently be generated?".
///
/// Queried once per candidate per generation call. Implementations may be
/// stateful behind interior mutability, but the engine only ever takes
/// `&self`.
pub trait LevelCondition {
    /// Returns whether the owning prototype is currently generatable.
    fn can_generate(&self) -> bool;
}

impl<F> LevelCondition for F
where
    F: Fn() -> bool,
{
    fn can_generate(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_condition() {
        let closed = || false;
        let open = || true;

        assert!(!closed.can_generate());
        assert!(open.can_generate());
    }

    #[test]
    fn test_stateful_condition() {
        struct Budget(Cell<u32>);

        impl LevelCondition for Budget {
            fn can_generate(&self) -> bool {
                let left = self.0.get();
                if left == 0 {
                    return false;
                }
                self.0.set(left - 1);
                true
            }
        }

        let budget = Budget(Cell::new(2));

        assert!(budget.can_generate());
        assert!(budget.can_generate());
        assert!(!budget.can_generate());
    }
}
