#![forbid(unsafe_code)]

//! Overflow allocation: split declared buttons into inline and hidden sets.
//!
//! The split is a stable partition on [`Visibility`]: `Always` buttons go
//! inline, `Never` buttons go to the overflow menu. No geometry is consulted;
//! the policy is a declaration, not a fit computation.
//!
//! # Invariants
//!
//! 1. `inline.len() + hidden.len() == input.len()`.
//! 2. Every input descriptor appears exactly once across both sets.
//! 3. Within each set, declaration order is preserved.
//! 4. Identical input yields identical output.

use crate::descriptor::{ButtonDescriptor, ButtonId, Visibility};

/// Result of [`allocate`]: borrowed inline and hidden buttons.
#[derive(Debug, Clone, Default)]
pub struct Allocation<'a> {
    inline: Vec<&'a ButtonDescriptor>,
    hidden: Vec<&'a ButtonDescriptor>,
}

impl<'a> Allocation<'a> {
    /// Buttons rendered directly in the header, in declaration order.
    #[must_use]
    pub fn inline(&self) -> &[&'a ButtonDescriptor] {
        &self.inline
    }

    /// Buttons listed in the overflow menu, in declaration order.
    #[must_use]
    pub fn hidden(&self) -> &[&'a ButtonDescriptor] {
        &self.hidden
    }

    /// Whether an overflow trigger is needed at all.
    #[must_use]
    pub fn needs_overflow(&self) -> bool {
        !self.hidden.is_empty()
    }

    /// Total number of allocated buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inline.len() + self.hidden.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn inline_ids(&self) -> Vec<ButtonId> {
        self.inline.iter().map(|d| d.id()).collect()
    }

    #[must_use]
    pub fn hidden_ids(&self) -> Vec<ButtonId> {
        self.hidden.iter().map(|d| d.id()).collect()
    }

    /// Whether `id` is rendered inline.
    #[must_use]
    pub fn is_inline(&self, id: ButtonId) -> bool {
        self.inline.iter().any(|d| d.id() == id)
    }
}

/// Partition `buttons` into inline and hidden sets.
///
/// Single pass, O(n), no side effects.
pub fn allocate<'a, I>(buttons: I) -> Allocation<'a>
where
    I: IntoIterator<Item = &'a ButtonDescriptor>,
{
    let mut allocation = Allocation::default();
    for descriptor in buttons {
        match descriptor.visibility() {
            Visibility::Always => allocation.inline.push(descriptor),
            Visibility::Never => allocation.hidden.push(descriptor),
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: headerbar_core::logging::TARGET,
        inline = allocation.inline.len(),
        hidden = allocation.hidden.len(),
        "headerbar.allocate"
    );

    allocation
}
