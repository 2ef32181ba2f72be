#![forbid(unsafe_code)]

//! Press dispatch.
//!
//! [`DispatchRouter::dispatch`] is the only place a press handler is called.
//! Inline presses reach it directly; overflow selections reach it after the
//! menu controller resolves. Cancellations never reach it.
//!
//! # Invariants
//!
//! - One call to `dispatch` invokes the handler at most once.
//! - A descriptor without a handler is counted as inert, never an error.

use std::rc::Rc;

use crate::descriptor::{ButtonDescriptor, ButtonId};

/// Where a dispatch originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchSource {
    /// Direct press on an inline button.
    Inline,
    /// Row selected in the overflow menu.
    Overflow,
}

impl DispatchSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Overflow => "overflow",
        }
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// The handler ran once.
    Invoked,
    /// The button has no handler.
    Inert,
}

/// Dispatch counters, split by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchStats {
    pub inline_invoked: u64,
    pub inline_inert: u64,
    pub overflow_invoked: u64,
    pub overflow_inert: u64,
}

impl DispatchStats {
    /// Handlers actually invoked, from any source.
    #[must_use]
    pub const fn invoked(&self) -> u64 {
        self.inline_invoked + self.overflow_invoked
    }

    /// All dispatch calls, including inert ones.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.invoked() + self.inline_inert + self.overflow_inert
    }

    fn record(&mut self, source: DispatchSource, outcome: DispatchOutcome) {
        let slot = match (source, outcome) {
            (DispatchSource::Inline, DispatchOutcome::Invoked) => &mut self.inline_invoked,
            (DispatchSource::Inline, DispatchOutcome::Inert) => &mut self.inline_inert,
            (DispatchSource::Overflow, DispatchOutcome::Invoked) => &mut self.overflow_invoked,
            (DispatchSource::Overflow, DispatchOutcome::Inert) => &mut self.overflow_inert,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Invokes press handlers.
#[derive(Debug, Default)]
pub struct DispatchRouter {
    stats: DispatchStats,
    last: Option<(ButtonId, DispatchSource)>,
}

impl DispatchRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke `descriptor`'s handler once, or do nothing if it has none.
    ///
    /// The handler runs synchronously before this returns. It receives no
    /// access to the container, so it cannot re-enter dispatch.
    pub fn dispatch(
        &mut self,
        descriptor: &ButtonDescriptor,
        source: DispatchSource,
    ) -> DispatchOutcome {
        let handler = descriptor.on_press().map(Rc::clone);
        let outcome = if handler.is_some() {
            DispatchOutcome::Invoked
        } else {
            DispatchOutcome::Inert
        };

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            target: headerbar_core::logging::TARGET,
            "headerbar.dispatch",
            button = descriptor.id().index(),
            title = descriptor.title(),
            source = source.as_str(),
            inert = handler.is_none()
        )
        .entered();

        self.stats.record(source, outcome);
        self.last = Some((descriptor.id(), source));

        if let Some(handler) = handler {
            handler();
        }
        outcome
    }

    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Most recently dispatched button and its source.
    #[must_use]
    pub fn last_dispatched(&self) -> Option<(ButtonId, DispatchSource)> {
        self.last
    }
}
