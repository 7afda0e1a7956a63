//! The cargo hold a ship carries: a fixed-length row of slots, each empty,
//! holding one colonist, or holding a bounded stack of one commodity.
//!
//! All transfer rules in the harbor are built on the fit queries here, so
//! their exact semantics matter: `fits` is a single-slot question, while the
//! "somewhere" variants scan the hold from a starting slot without wrapping.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_GOODS_PER_SLOT;
use crate::economy::Good;
use crate::units::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CargoSlot {
    #[default]
    Empty,
    Unit {
        unit: UnitId,
    },
    Goods {
        good: Good,
        quantity: u32,
    },
}

impl CargoSlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, CargoSlot::Empty)
    }
}

/// An item proposed for insertion into a hold, used by the fit queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CargoItem {
    Unit(UnitId),
    Goods { good: Good, quantity: u32 },
}

impl CargoItem {
    /// The same commodity reduced to a single unit of quantity. A transfer
    /// is allowed as soon as one unit fits; the executor then moves as much
    /// as it actually can.
    pub fn one_of(good: Good) -> Self {
        CargoItem::Goods { good, quantity: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoHold {
    slots: Vec<CargoSlot>,
}

impl CargoHold {
    pub fn with_capacity(slots: usize) -> Self {
        CargoHold {
            slots: vec![CargoSlot::Empty; slots],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, idx: usize) -> Option<&CargoSlot> {
        self.slots.get(idx)
    }

    pub fn slots(&self) -> impl Iterator<Item = (usize, &CargoSlot)> {
        self.slots.iter().enumerate()
    }

    pub fn unit_at(&self, idx: usize) -> Option<UnitId> {
        match self.slots.get(idx) {
            Some(CargoSlot::Unit { unit }) => Some(*unit),
            _ => None,
        }
    }

    pub fn goods_at(&self, idx: usize) -> Option<(Good, u32)> {
        match self.slots.get(idx) {
            Some(CargoSlot::Goods { good, quantity }) => Some((*good, *quantity)),
            _ => None,
        }
    }

    /// The slot's contents as an insertable item, if it holds anything.
    pub fn item_at(&self, idx: usize) -> Option<CargoItem> {
        match self.slots.get(idx)? {
            CargoSlot::Empty => None,
            CargoSlot::Unit { unit } => Some(CargoItem::Unit(*unit)),
            CargoSlot::Goods { good, quantity } => Some(CargoItem::Goods {
                good: *good,
                quantity: *quantity,
            }),
        }
    }

    pub fn holds_unit(&self, unit: UnitId) -> bool {
        self.slots
            .iter()
            .any(|slot| matches!(slot, CargoSlot::Unit { unit: u } if *u == unit))
    }

    /// All commodity stacks in the hold, in slot order.
    pub fn goods_slots(&self) -> impl Iterator<Item = (usize, Good, u32)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            CargoSlot::Goods { good, quantity } => Some((idx, *good, *quantity)),
            _ => None,
        })
    }

    /// Whether `item` can occupy `slot`. For commodities this asks whether
    /// the *whole* proposed quantity fits, so callers checking transfer
    /// legality pass a one-unit item (see [`CargoItem::one_of`]).
    ///
    /// Out-of-range slots never fit.
    pub fn fits(&self, item: &CargoItem, slot: usize) -> bool {
        let Some(content) = self.slots.get(slot) else {
            return false;
        };
        match item {
            CargoItem::Unit(_) => content.is_empty(),
            CargoItem::Goods { good, quantity } => {
                if *quantity == 0 || *quantity > MAX_GOODS_PER_SLOT {
                    return false;
                }
                match content {
                    CargoSlot::Empty => true,
                    CargoSlot::Unit { .. } => false,
                    CargoSlot::Goods {
                        good: held,
                        quantity: held_quantity,
                    } => held == good && held_quantity + quantity <= MAX_GOODS_PER_SLOT,
                }
            }
        }
    }

    /// As [`fits`](Self::fits), but evaluated as if `remove_slot` had been
    /// emptied first, so a stack or unit being reslotted does not block
    /// itself.
    pub fn fits_with_item_removed(
        &self,
        item: &CargoItem,
        remove_slot: usize,
        insert_slot: usize,
    ) -> bool {
        let mut hypothetical = self.clone();
        if remove_slot < hypothetical.slots.len() {
            hypothetical.slots[remove_slot] = CargoSlot::Empty;
        }
        hypothetical.fits(item, insert_slot)
    }

    /// Whether any slot at or after `start_slot` accepts `item`.
    pub fn fits_somewhere(&self, item: &CargoItem, start_slot: usize) -> bool {
        (start_slot..self.slots.len()).any(|idx| self.fits(item, idx))
    }

    /// The largest total quantity of `good` the hold could absorb across
    /// empty slots and existing same-type stacks. Caps market purchases.
    pub fn max_quantity_that_fits(&self, good: Good) -> u32 {
        self.slots
            .iter()
            .map(|slot| match slot {
                CargoSlot::Empty => MAX_GOODS_PER_SLOT,
                CargoSlot::Unit { .. } => 0,
                CargoSlot::Goods {
                    good: held,
                    quantity,
                } => {
                    if *held == good {
                        MAX_GOODS_PER_SLOT - quantity
                    } else {
                        0
                    }
                }
            })
            .sum()
    }

    /// Quantity of `good` slot `idx` could still take.
    fn room_at(&self, idx: usize, good: Good) -> u32 {
        match &self.slots[idx] {
            CargoSlot::Empty => MAX_GOODS_PER_SLOT,
            CargoSlot::Unit { .. } => 0,
            CargoSlot::Goods {
                good: held,
                quantity,
            } => {
                if *held == good {
                    MAX_GOODS_PER_SLOT - quantity
                } else {
                    0
                }
            }
        }
    }

    /// Place a unit at exactly `slot`. Returns false without mutating if the
    /// slot does not accept it.
    pub fn try_add_unit(&mut self, unit: UnitId, slot: usize) -> bool {
        debug_assert!(
            !self.holds_unit(unit),
            "unit {unit:?} is already aboard this hold"
        );
        if !self.fits(&CargoItem::Unit(unit), slot) {
            return false;
        }
        self.slots[slot] = CargoSlot::Unit { unit };
        self.check_invariants();
        true
    }

    /// Place a unit in the first accepting slot at or after `start_slot`.
    pub fn add_unit_somewhere(&mut self, unit: UnitId, start_slot: usize) -> Option<usize> {
        let idx = (start_slot..self.slots.len())
            .find(|idx| self.fits(&CargoItem::Unit(unit), *idx))?;
        self.slots[idx] = CargoSlot::Unit { unit };
        self.check_invariants();
        Some(idx)
    }

    /// Empty the slot holding `unit`. Returns false if it is not aboard.
    pub fn remove_unit(&mut self, unit: UnitId) -> bool {
        for slot in self.slots.iter_mut() {
            if matches!(slot, CargoSlot::Unit { unit: u } if *u == unit) {
                *slot = CargoSlot::Empty;
                return true;
            }
        }
        false
    }

    /// Take the whole commodity stack out of `slot`.
    ///
    /// Panics if the slot does not hold a commodity; callers reach this only
    /// after the slot's contents have been checked.
    pub fn take_goods(&mut self, slot: usize) -> (Good, u32) {
        match self.slots[slot] {
            CargoSlot::Goods { good, quantity } => {
                self.slots[slot] = CargoSlot::Empty;
                (good, quantity)
            }
            ref other => panic!("slot {slot} holds {other:?}, expected a commodity stack"),
        }
    }

    /// Put a stack into `slot`, merging with an existing same-type stack.
    ///
    /// Panics if the stack does not fit; callers must have sized it first.
    pub fn put_goods(&mut self, slot: usize, good: Good, quantity: u32) {
        assert!(
            self.fits(&CargoItem::Goods { good, quantity }, slot),
            "{quantity} {good} does not fit at slot {slot}"
        );
        self.slots[slot] = match self.slots[slot] {
            CargoSlot::Empty => CargoSlot::Goods { good, quantity },
            CargoSlot::Goods {
                good: held,
                quantity: held_quantity,
            } => CargoSlot::Goods {
                good: held,
                quantity: held_quantity + quantity,
            },
            CargoSlot::Unit { .. } => unreachable!("fits() rejects occupied slots"),
        };
        self.check_invariants();
    }

    /// Insert up to `quantity` of `good`, filling `preferred` first. With
    /// `spread` the remainder is distributed over the other slots in
    /// ascending order; without it only the preferred slot is touched.
    /// Returns the quantity actually inserted.
    pub fn insert_goods(
        &mut self,
        good: Good,
        quantity: u32,
        preferred: usize,
        spread: bool,
    ) -> u32 {
        let mut remaining = quantity;
        let mut order: Vec<usize> = Vec::with_capacity(self.slots.len());
        if preferred < self.slots.len() {
            order.push(preferred);
        }
        if spread {
            order.extend((0..self.slots.len()).filter(|idx| *idx != preferred));
        }
        for idx in order {
            if remaining == 0 {
                break;
            }
            let portion = remaining.min(self.room_at(idx, good));
            if portion > 0 {
                self.put_goods(idx, good, portion);
                remaining -= portion;
            }
        }
        quantity - remaining
    }

    /// Hold-local invariants: stack quantities stay in `1..=100`. A
    /// zero-quantity stack must never persist; emptied slots become `Empty`.
    fn check_invariants(&self) {
        for (idx, slot) in self.slots.iter().enumerate() {
            if let CargoSlot::Goods { good, quantity } = slot {
                debug_assert!(
                    *quantity > 0,
                    "slot {idx}: zero-quantity {good} stack must not persist"
                );
                debug_assert!(
                    *quantity <= MAX_GOODS_PER_SLOT,
                    "slot {idx}: {quantity} {good} exceeds the per-slot cap"
                );
            }
        }
    }
}

/// Move commodity between two slots of the same hold: as much as fits at the
/// destination, the rest staying put at the source slot. Returns the
/// quantity moved.
pub fn move_goods_within(
    hold: &mut CargoHold,
    src_slot: usize,
    dst_slot: usize,
    max_quantity: Option<u32>,
    spread: bool,
) -> u32 {
    let (good, quantity) = hold.take_goods(src_slot);
    let limit = max_quantity.map_or(quantity, |m| m.min(quantity));
    let moved = hold.insert_goods(good, limit, dst_slot, spread);
    let leftover = quantity - moved;
    if leftover > 0 {
        hold.put_goods(src_slot, good, leftover);
    }
    moved
}

/// Cross-hold variant of [`move_goods_within`].
pub fn move_goods_between(
    src: &mut CargoHold,
    src_slot: usize,
    dst: &mut CargoHold,
    dst_slot: usize,
    max_quantity: Option<u32>,
    spread: bool,
) -> u32 {
    let (good, quantity) = src.take_goods(src_slot);
    let limit = max_quantity.map_or(quantity, |m| m.min(quantity));
    let moved = dst.insert_goods(good, limit, dst_slot, spread);
    let leftover = quantity - moved;
    if leftover > 0 {
        src.put_goods(src_slot, good, leftover);
    }
    moved
}
