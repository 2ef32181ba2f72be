//! Property-based invariant tests for overflow allocation and layout.
//!
//! 1. Every button lands in exactly one set.
//! 2. Declaration order is preserved within each set.
//! 3. Each set holds exactly the buttons of its policy.
//! 4. A trigger is rendered iff the hidden set is non-empty.
//! 5. Allocation is deterministic.
//! 6. Rendered slots stay inside the header area and never overlap.
//! 7. `None` declarations never consume an identity.

use headerbar_core::geometry::Rect;
use headerbar_widgets::{
    ButtonId, HeaderButtons, HeaderButtonsConfig, Item, Visibility, allocate, normalize,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn policies(max_len: usize) -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 0..=max_len)
}

fn items(hidden: &[bool]) -> Vec<Item> {
    hidden
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            let show = if h { Visibility::Never } else { Visibility::Always };
            Item::new(format!("b{i}")).show(show)
        })
        .collect()
}

fn is_sorted(ids: &[ButtonId]) -> bool {
    ids.windows(2).all(|w| w[0] < w[1])
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Partition
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn partition_is_complete_and_ordered(hidden in policies(64)) {
        let buttons = normalize(items(&hidden));
        let allocation = allocate(&buttons);

        prop_assert_eq!(allocation.len(), buttons.len());

        let inline = allocation.inline_ids();
        let overflow = allocation.hidden_ids();
        prop_assert!(is_sorted(&inline));
        prop_assert!(is_sorted(&overflow));

        let mut all: Vec<ButtonId> = inline.iter().chain(overflow.iter()).copied().collect();
        all.sort();
        let expected: Vec<ButtonId> = (0..buttons.len()).map(ButtonId::new).collect();
        prop_assert_eq!(all, expected);

        for id in &inline {
            prop_assert!(!hidden[id.index()]);
        }
        for id in &overflow {
            prop_assert!(hidden[id.index()]);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-6. Rendering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn trigger_iff_hidden_and_slots_in_bounds(
        hidden in policies(16),
        left in any::<bool>(),
        width in 0u16..120,
        slot in 1u16..8,
    ) {
        let config = HeaderButtonsConfig::default().left(left).slot_width(slot);
        let mut header = HeaderButtons::new(config).with_items(items(&hidden));
        let area = Rect::new(3, 2, width, 1);
        let row = header.render(area).clone();

        prop_assert_eq!(row.trigger.is_some(), hidden.iter().any(|&h| h));
        prop_assert_eq!(row.buttons.len(), hidden.iter().filter(|&&h| !h).count());

        let mut slots: Vec<Rect> = row.buttons.iter().map(|b| b.area).collect();
        slots.extend(row.trigger.iter().map(|t| t.area));
        for s in slots.iter().filter(|s| !s.is_empty()) {
            prop_assert_eq!(s.intersection_opt(&area), Some(*s));
        }
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                prop_assert!(a.intersection_opt(b).is_none());
            }
        }
    }
}

proptest! {
    #[test]
    fn allocation_is_deterministic(hidden in policies(32)) {
        let buttons = normalize(items(&hidden));
        let first = allocate(&buttons);
        let second = allocate(&buttons);
        prop_assert_eq!(first.inline_ids(), second.inline_ids());
        prop_assert_eq!(first.hidden_ids(), second.hidden_ids());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Conditional declarations
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn absent_declarations_are_skipped(present in proptest::collection::vec(any::<bool>(), 0..32)) {
        let declared: Vec<Option<Item>> = present
            .iter()
            .enumerate()
            .map(|(i, &p)| p.then(|| Item::new(format!("b{i}"))))
            .collect();
        let buttons = normalize(declared);
        prop_assert_eq!(buttons.len(), present.iter().filter(|&&p| p).count());
        for (index, button) in buttons.iter().enumerate() {
            prop_assert_eq!(button.id().index(), index);
        }
    }
}
