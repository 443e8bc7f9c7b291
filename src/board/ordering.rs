//! Dense ordering over entities with an integer `order` field.
//!
//! After every operation in this module the `order` values of a list are
//! exactly `0..len` with no duplicates. Insert appends, move shifts the range
//! between the old and new slot by one, delete closes the gap.

use super::models::Column;

/// An entity that carries its own position in an ordered list.
pub trait Ordered {
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

impl Ordered for Column {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Order value for an entity appended to `items`.
pub fn append_order<T: Ordered>(items: &[T]) -> u32 {
    items.len() as u32
}

/// Clamp a requested slot into `0..len`.
pub fn clamp_order<T: Ordered>(items: &[T], requested: u32) -> u32 {
    let last = items.len().saturating_sub(1) as u32;
    requested.min(last)
}

/// Move `items[index]` to `new_order`, shifting everything in between by one.
///
/// `new_order` past the end is clamped to the last slot. Returns `false` when
/// nothing changed (same slot, or `index` out of bounds).
pub fn move_to<T: Ordered>(items: &mut [T], index: usize, new_order: u32) -> bool {
    let Some(moved) = items.get(index) else {
        return false;
    };
    let old_order = moved.order();
    let new_order = clamp_order(items, new_order);
    if old_order == new_order {
        return false;
    }

    for (i, item) in items.iter_mut().enumerate() {
        if i == index {
            continue;
        }
        let o = item.order();
        if old_order < new_order && o > old_order && o <= new_order {
            item.set_order(o - 1);
        } else if old_order > new_order && o >= new_order && o < old_order {
            item.set_order(o + 1);
        }
    }
    items[index].set_order(new_order);
    true
}

/// Reassign `order = position` after sorting by the current order.
///
/// Used after a removal and when loading stored data that may not be dense.
/// The sort is stable, so entities sharing an order keep their list sequence.
pub fn close_gaps<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
    for (i, item) in items.iter_mut().enumerate() {
        item.set_order(i as u32);
    }
}

/// True when the orders are exactly `0..len` in some arrangement.
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    let mut orders: Vec<u32> = items.iter().map(|item| item.order()).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(i, &o)| o == i as u32)
}
