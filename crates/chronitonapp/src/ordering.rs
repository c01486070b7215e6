//! # Dense Sibling Ordering
//!
//! Categories (globally) and Events (per Category) carry an `order_index` that must
//! always form the sequence `0..N-1`: no gaps, no duplicates. This module owns the
//! renumbering rules; it owns no data.
//!
//! All functions operate on a materialized sibling list that is already sorted by
//! position (see [`sort_by_position`]). Each one validates its index argument
//! before touching the list, so a failed call leaves the siblings exactly as they were.
//!
//! | Operation | Precondition | Result |
//! |-----------|--------------|--------|
//! | [`insert`] | `index <= len` | new element at `index`, positions `0..=len` |
//! | [`remove`] | element present | positions `0..len-1`, order preserved |
//! | [`move_to_index`] | `target < len` | element at `target`, others keep relative order |
//!
//! Out-of-range indexes are rejected with [`ChronitonError::IndexOutOfRange`], never
//! clamped.

use crate::error::{ChronitonError, Result};

/// A record with an identity and a mutable sibling position.
pub trait Ordered {
    type Key: PartialEq + Copy + std::fmt::Debug;

    fn key(&self) -> Self::Key;
    fn position(&self) -> usize;
    fn set_position(&mut self, position: usize);
}

/// Sort siblings by their current position. Stable, so ties keep input order.
pub fn sort_by_position<E: Ordered>(siblings: &mut [E]) {
    siblings.sort_by_key(|e| e.position());
}

/// Assign positions `0..len` following the current order of `siblings`.
///
/// Returns how many elements had a different position before.
pub fn renumber<E: Ordered>(siblings: &mut [E]) -> usize {
    let mut changed = 0;
    for (i, element) in siblings.iter_mut().enumerate() {
        if element.position() != i {
            element.set_position(i);
            changed += 1;
        }
    }
    changed
}

/// True if positions are exactly `0..len` in list order.
pub fn is_dense<E: Ordered>(siblings: &[E]) -> bool {
    siblings.iter().enumerate().all(|(i, e)| e.position() == i)
}

/// Insert `element` at `index` (default: the end), shifting later siblings down.
///
/// Returns the position assigned to the new element.
pub fn insert<E: Ordered>(siblings: &mut Vec<E>, element: E, index: Option<usize>) -> Result<usize> {
    let len = siblings.len();
    let index = index.unwrap_or(len);
    if index > len {
        return Err(ChronitonError::IndexOutOfRange { index, len });
    }

    siblings.insert(index, element);
    renumber(siblings);
    Ok(index)
}

/// Remove the element with `key`, closing the gap it leaves.
///
/// Deleting the record itself is the caller's job; this only fixes the positions of
/// the remaining siblings.
pub fn remove<E: Ordered>(siblings: &mut Vec<E>, key: E::Key) -> Result<E> {
    let current = locate(siblings, key)?;
    let removed = siblings.remove(current);
    renumber(siblings);
    Ok(removed)
}

/// Move the element with `key` to `target`, keeping everyone else in relative order.
pub fn move_to_index<E: Ordered>(siblings: &mut [E], key: E::Key, target: usize) -> Result<()> {
    let len = siblings.len();
    if target >= len {
        return Err(ChronitonError::IndexOutOfRange { index: target, len });
    }
    let current = locate(siblings, key)?;

    if current < target {
        siblings[current..=target].rotate_left(1);
    } else if current > target {
        siblings[target..=current].rotate_right(1);
    }
    renumber(siblings);
    Ok(())
}

fn locate<E: Ordered>(siblings: &[E], key: E::Key) -> Result<usize> {
    siblings.iter().position(|e| e.key() == key).ok_or_else(|| {
        ChronitonError::Consistency(format!("{:?} is not among the given siblings", key))
    })
}
