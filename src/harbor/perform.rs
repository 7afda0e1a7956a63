//! Transfer execution.
//!
//! `perform` runs only after `can_connect` approved the pair and the
//! quantity prompt, if any, was answered. It re-validates *existence* — the
//! dialog may have been open while a ship departed or a unit was consumed —
//! and aborts without mutating on such stale references. It does not
//! re-check legality: a pair the checker would reject reaching this module
//! means the dispatch tables are out of sync, and that is a hard failure.

use thiserror::Error;

use crate::constants::DEFAULT_MARKET_QUANTITY;
use crate::economy::Good;
use crate::harbor::draggable::{DragSource, DragTarget};
use crate::ships::cargo::{CargoItem, move_goods_between, move_goods_within};
use crate::ships::{Fleet, ShipId, ShipLocation};
use crate::units::{DockRoster, UnitId};

/// Mutable slice of the harbor a transfer operates on.
pub struct HarborMut<'a> {
    pub fleet: &'a mut Fleet,
    pub dock: &'a mut DockRoster,
}

/// A transfer that could not run because the world changed while it was
/// suspended. The state is untouched; the drag simply fizzles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("ship {0:?} no longer exists")]
    ShipGone(ShipId),
    #[error("unit {0:?} is no longer on the dock")]
    UnitNotOnDock(UnitId),
    #[error("slot {slot} of ship {ship:?} no longer holds the dragged cargo")]
    SlotVacated { ship: ShipId, slot: usize },
    #[error("no room left aboard ship {0:?}")]
    NoRoomAboard(ShipId),
}

/// What a completed transfer actually moved. The caller settles money and
/// selection from this; the executor itself only touches cargo state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transferred {
    Unit { unit: UnitId },
    Goods { good: Good, quantity: u32 },
    Ship { ship: ShipId },
}

/// Execute the transfer. `quantity` is the negotiated amount for the pairs
/// that prompt for one, `None` for the rest.
///
/// Panics on pairs `can_connect` has no rule for, and on a zero quantity
/// reaching a market transfer; both indicate a caller bug upstream.
pub fn perform(
    source: &DragSource,
    target: &DragTarget,
    quantity: Option<u32>,
    harbor: &mut HarborMut,
) -> Result<Transferred, TransferError> {
    match (source, target) {
        // Unit steps off onto the dock.
        (DragSource::CargoSlot { ship, slot }, DragTarget::Dock) => {
            let ship_ref = harbor
                .fleet
                .get_mut(*ship)
                .ok_or(TransferError::ShipGone(*ship))?;
            let unit = ship_ref
                .hold
                .unit_at(*slot)
                .ok_or(TransferError::SlotVacated { ship: *ship, slot: *slot })?;
            ship_ref.hold.remove_unit(unit);
            harbor.dock.add(unit);
            Ok(Transferred::Unit { unit })
        }

        // Reslot within one ship. For a unit the destination was verified
        // with the source slot vacated; for goods, as much of the stack as
        // fits moves, the rest stays where it was, and no other slot is
        // tried.
        (
            DragSource::CargoSlot { ship: src_ship, slot: src_slot },
            DragTarget::CargoSlot { ship: dst_ship, slot: dst_slot },
        ) => {
            assert_eq!(src_ship, dst_ship, "slot-to-slot transfers stay on one ship");
            let ship_ref = harbor
                .fleet
                .get_mut(*src_ship)
                .ok_or(TransferError::ShipGone(*src_ship))?;
            match ship_ref.hold.item_at(*src_slot) {
                Some(CargoItem::Unit(unit)) => {
                    ship_ref.hold.remove_unit(unit);
                    if !ship_ref.hold.try_add_unit(unit, *dst_slot) {
                        // Destination filled up since the check; put the
                        // unit back where it was.
                        assert!(ship_ref.hold.try_add_unit(unit, *src_slot));
                        return Err(TransferError::SlotVacated {
                            ship: *src_ship,
                            slot: *dst_slot,
                        });
                    }
                    Ok(Transferred::Unit { unit })
                }
                Some(CargoItem::Goods { good, .. }) => {
                    let moved =
                        move_goods_within(&mut ship_ref.hold, *src_slot, *dst_slot, None, false);
                    Ok(Transferred::Goods { good, quantity: moved })
                }
                None => Err(TransferError::SlotVacated {
                    ship: *src_ship,
                    slot: *src_slot,
                }),
            }
        }

        // The return leg home: the countdown already ran down, so the ship
        // docks at once.
        (DragSource::Outbound { ship }, DragTarget::Inbound) => {
            let ship_ref = harbor
                .fleet
                .get_mut(*ship)
                .ok_or(TransferError::ShipGone(*ship))?;
            debug_assert!(
                matches!(ship_ref.location, ShipLocation::Outbound { turns_left: 0 }),
                "return drag on a ship still mid-crossing"
            );
            ship_ref.location = ShipLocation::InPort;
            Ok(Transferred::Ship { ship: *ship })
        }

        // Dock unit boards: first slot with room, scanning from the bow.
        (DragSource::Dock { unit }, DragTarget::InPortShip { ship }) => {
            if !harbor.dock.contains(*unit) {
                return Err(TransferError::UnitNotOnDock(*unit));
            }
            let ship_ref = harbor
                .fleet
                .get_mut(*ship)
                .ok_or(TransferError::ShipGone(*ship))?;
            if ship_ref.hold.add_unit_somewhere(*unit, 0).is_none() {
                return Err(TransferError::NoRoomAboard(*ship));
            }
            harbor.dock.remove(*unit);
            Ok(Transferred::Unit { unit: *unit })
        }

        // Cargo to another docked ship.
        (
            DragSource::CargoSlot { ship: src_ship, slot },
            DragTarget::InPortShip { ship: dst_ship },
        ) => {
            let item = harbor
                .fleet
                .get(*src_ship)
                .ok_or(TransferError::ShipGone(*src_ship))?
                .hold
                .item_at(*slot);
            match item {
                Some(CargoItem::Unit(unit)) => {
                    debug_assert!(
                        quantity.is_none(),
                        "a unit transfer carries no negotiated quantity"
                    );
                    let (src, dst) = harbor
                        .fleet
                        .pair_mut(*src_ship, *dst_ship)
                        .ok_or(TransferError::ShipGone(*dst_ship))?;
                    src.hold.remove_unit(unit);
                    if dst.hold.add_unit_somewhere(unit, 0).is_none() {
                        assert!(src.hold.try_add_unit(unit, *slot));
                        return Err(TransferError::NoRoomAboard(*dst_ship));
                    }
                    Ok(Transferred::Unit { unit })
                }
                Some(CargoItem::Goods { good, .. }) => {
                    // Dropping a stack onto its own ship restows it from
                    // the bow; otherwise it crosses to the other hold.
                    let moved = if src_ship == dst_ship {
                        let ship = harbor
                            .fleet
                            .get_mut(*src_ship)
                            .ok_or(TransferError::ShipGone(*src_ship))?;
                        move_goods_within(&mut ship.hold, *slot, 0, quantity, true)
                    } else {
                        let (src, dst) = harbor
                            .fleet
                            .pair_mut(*src_ship, *dst_ship)
                            .ok_or(TransferError::ShipGone(*dst_ship))?;
                        move_goods_between(&mut src.hold, *slot, &mut dst.hold, 0, quantity, true)
                    };
                    Ok(Transferred::Goods { good, quantity: moved })
                }
                None => Err(TransferError::SlotVacated {
                    ship: *src_ship,
                    slot: *slot,
                }),
            }
        }

        // Market buy onto a specific slot: the requested amount, capped by
        // what the whole hold can absorb and by the standard wagon size.
        (DragSource::Market { good }, DragTarget::CargoSlot { ship, slot }) => {
            buy_into(harbor, *good, *ship, *slot, quantity)
        }

        // Market buy onto the ship as a whole: same, preferring the bow.
        (DragSource::Market { good }, DragTarget::InPortShip { ship }) => {
            buy_into(harbor, *good, *ship, 0, quantity)
        }

        // Market sell: the requested amount leaves the stack, any remainder
        // stays in the very same slot.
        (DragSource::CargoSlot { ship, slot }, DragTarget::Market) => {
            let ship_ref = harbor
                .fleet
                .get_mut(*ship)
                .ok_or(TransferError::ShipGone(*ship))?;
            if ship_ref.hold.goods_at(*slot).is_none() {
                return Err(TransferError::SlotVacated { ship: *ship, slot: *slot });
            }
            let (good, held) = ship_ref.hold.take_goods(*slot);
            let sold = quantity.unwrap_or(held).min(held);
            let remainder = held - sold;
            if remainder > 0 {
                ship_ref.hold.put_goods(*slot, good, remainder);
            }
            Ok(Transferred::Goods { good, quantity: sold })
        }

        _ => panic!("no transfer rule for {source:?} -> {target:?}"),
    }
}

fn buy_into(
    harbor: &mut HarborMut,
    good: Good,
    ship: ShipId,
    preferred_slot: usize,
    quantity: Option<u32>,
) -> Result<Transferred, TransferError> {
    let ship_ref = harbor
        .fleet
        .get_mut(ship)
        .ok_or(TransferError::ShipGone(ship))?;
    let amount = quantity
        .unwrap_or(DEFAULT_MARKET_QUANTITY)
        .min(ship_ref.hold.max_quantity_that_fits(good))
        .min(DEFAULT_MARKET_QUANTITY);
    assert!(amount > 0, "market buy arrived with nothing to place");
    let inserted = ship_ref.hold.insert_goods(good, amount, preferred_slot, true);
    debug_assert_eq!(inserted, amount, "capped buy amount must fit in full");
    Ok(Transferred::Goods { good, quantity: inserted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::Good;
    use crate::ships::ShipKind;

    struct Port {
        fleet: Fleet,
        dock: DockRoster,
    }

    impl Port {
        fn new() -> Self {
            Port {
                fleet: Fleet::default(),
                dock: DockRoster::default(),
            }
        }

        fn harbor(&mut self) -> HarborMut<'_> {
            HarborMut {
                fleet: &mut self.fleet,
                dock: &mut self.dock,
            }
        }
    }

    #[test]
    fn unit_steps_off_onto_the_dock() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        assert!(port.fleet.get_mut(ship).unwrap().hold.try_add_unit(UnitId(1), 0));
        let result = perform(
            &DragSource::CargoSlot { ship, slot: 0 },
            &DragTarget::Dock,
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Ok(Transferred::Unit { unit: UnitId(1) }));
        assert!(port.dock.contains(UnitId(1)));
        assert!(port.fleet.get(ship).unwrap().hold.slot(0).unwrap().is_empty());
    }

    #[test]
    fn vacated_slot_aborts_without_mutation() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        let result = perform(
            &DragSource::CargoSlot { ship, slot: 0 },
            &DragTarget::Dock,
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Err(TransferError::SlotVacated { ship, slot: 0 }));
        assert!(port.dock.is_empty());
    }

    #[test]
    fn same_ship_goods_reslot_is_partial_without_searching() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Galleon);
        {
            let hold = &mut port.fleet.get_mut(ship).unwrap().hold;
            hold.put_goods(0, Good::Ore, 70);
            hold.put_goods(1, Good::Ore, 60);
        }
        let result = perform(
            &DragSource::CargoSlot { ship, slot: 0 },
            &DragTarget::CargoSlot { ship, slot: 1 },
            None,
            &mut port.harbor(),
        );
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Ore, quantity: 40 })
        );
        let hold = &port.fleet.get(ship).unwrap().hold;
        // The overflow stays in the source slot; slot 2 is never touched.
        assert_eq!(hold.goods_at(0), Some((Good::Ore, 30)));
        assert_eq!(hold.goods_at(1), Some((Good::Ore, 100)));
        assert!(hold.slot(2).unwrap().is_empty());
    }

    #[test]
    fn cross_ship_move_never_exceeds_requested_or_available() {
        let mut port = Port::new();
        let src = port.fleet.commission(ShipKind::Galleon);
        let dst = port.fleet.commission(ShipKind::Merchantman);
        port.fleet.get_mut(src).unwrap().hold.put_goods(0, Good::Furs, 30);
        let result = perform(
            &DragSource::CargoSlot { ship: src, slot: 0 },
            &DragTarget::InPortShip { ship: dst },
            Some(80),
            &mut port.harbor(),
        );
        // Only 30 were available despite the larger request.
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Furs, quantity: 30 })
        );
        assert_eq!(
            port.fleet.get(dst).unwrap().hold.goods_at(0),
            Some((Good::Furs, 30))
        );
    }

    #[test]
    fn cross_ship_move_may_search_other_slots() {
        let mut port = Port::new();
        let src = port.fleet.commission(ShipKind::Galleon);
        let dst = port.fleet.commission(ShipKind::Merchantman);
        port.fleet.get_mut(src).unwrap().hold.put_goods(0, Good::Furs, 100);
        {
            let hold = &mut port.fleet.get_mut(dst).unwrap().hold;
            hold.put_goods(0, Good::Furs, 90);
        }
        let result = perform(
            &DragSource::CargoSlot { ship: src, slot: 0 },
            &DragTarget::InPortShip { ship: dst },
            Some(100),
            &mut port.harbor(),
        );
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Furs, quantity: 100 })
        );
        let hold = &port.fleet.get(dst).unwrap().hold;
        assert_eq!(hold.goods_at(0), Some((Good::Furs, 100)));
        assert_eq!(hold.goods_at(1), Some((Good::Furs, 90)));
    }

    #[test]
    fn unit_changes_ships_whole() {
        let mut port = Port::new();
        let src = port.fleet.commission(ShipKind::Caravel);
        let dst = port.fleet.commission(ShipKind::Caravel);
        assert!(port.fleet.get_mut(src).unwrap().hold.try_add_unit(UnitId(4), 1));
        let result = perform(
            &DragSource::CargoSlot { ship: src, slot: 1 },
            &DragTarget::InPortShip { ship: dst },
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Ok(Transferred::Unit { unit: UnitId(4) }));
        assert!(!port.fleet.get(src).unwrap().hold.holds_unit(UnitId(4)));
        assert_eq!(port.fleet.get(dst).unwrap().hold.unit_at(0), Some(UnitId(4)));
    }

    #[test]
    fn dock_unit_boards_the_first_free_slot() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Merchantman);
        port.fleet.get_mut(ship).unwrap().hold.put_goods(0, Good::Ore, 10);
        port.dock.add(UnitId(7));
        let result = perform(
            &DragSource::Dock { unit: UnitId(7) },
            &DragTarget::InPortShip { ship },
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Ok(Transferred::Unit { unit: UnitId(7) }));
        assert!(!port.dock.contains(UnitId(7)));
        assert_eq!(port.fleet.get(ship).unwrap().hold.unit_at(1), Some(UnitId(7)));
    }

    #[test]
    fn departed_dock_unit_aborts_cleanly() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        let result = perform(
            &DragSource::Dock { unit: UnitId(7) },
            &DragTarget::InPortShip { ship },
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Err(TransferError::UnitNotOnDock(UnitId(7))));
    }

    #[test]
    fn market_buy_caps_at_what_the_hold_absorbs() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        {
            let hold = &mut port.fleet.get_mut(ship).unwrap().hold;
            assert!(hold.try_add_unit(UnitId(1), 0));
            hold.put_goods(1, Good::Ore, 70);
        }
        let result = perform(
            &DragSource::Market { good: Good::Ore },
            &DragTarget::CargoSlot { ship, slot: 1 },
            Some(100),
            &mut port.harbor(),
        );
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Ore, quantity: 30 })
        );
        assert_eq!(
            port.fleet.get(ship).unwrap().hold.goods_at(1),
            Some((Good::Ore, 100))
        );
    }

    #[test]
    fn market_buy_spills_into_other_slots() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Merchantman);
        port.fleet.get_mut(ship).unwrap().hold.put_goods(2, Good::Ore, 80);
        let result = perform(
            &DragSource::Market { good: Good::Ore },
            &DragTarget::CargoSlot { ship, slot: 2 },
            Some(100),
            &mut port.harbor(),
        );
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Ore, quantity: 100 })
        );
        let hold = &port.fleet.get(ship).unwrap().hold;
        assert_eq!(hold.goods_at(2), Some((Good::Ore, 100)));
        assert_eq!(hold.goods_at(0), Some((Good::Ore, 80)));
    }

    #[test]
    #[should_panic(expected = "nothing to place")]
    fn market_buy_with_no_room_is_a_caller_bug() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        {
            let hold = &mut port.fleet.get_mut(ship).unwrap().hold;
            hold.put_goods(0, Good::Furs, 100);
            hold.put_goods(1, Good::Furs, 100);
        }
        let _ = perform(
            &DragSource::Market { good: Good::Ore },
            &DragTarget::CargoSlot { ship, slot: 0 },
            Some(50),
            &mut port.harbor(),
        );
    }

    #[test]
    fn selling_leaves_the_remainder_in_place() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Galleon);
        port.fleet.get_mut(ship).unwrap().hold.put_goods(3, Good::Tobacco, 30);
        let result = perform(
            &DragSource::CargoSlot { ship, slot: 3 },
            &DragTarget::Market,
            Some(10),
            &mut port.harbor(),
        );
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Tobacco, quantity: 10 })
        );
        let hold = &port.fleet.get(ship).unwrap().hold;
        assert_eq!(hold.goods_at(3), Some((Good::Tobacco, 20)));
        // No other slot was involved.
        assert_eq!(hold.goods_slots().count(), 1);
    }

    #[test]
    fn selling_more_than_held_clears_the_slot() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        port.fleet.get_mut(ship).unwrap().hold.put_goods(0, Good::Silver, 1);
        let result = perform(
            &DragSource::CargoSlot { ship, slot: 0 },
            &DragTarget::Market,
            Some(50),
            &mut port.harbor(),
        );
        assert_eq!(
            result,
            Ok(Transferred::Goods { good: Good::Silver, quantity: 1 })
        );
        assert!(port.fleet.get(ship).unwrap().hold.slot(0).unwrap().is_empty());
    }

    #[test]
    fn returning_ship_docks() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        port.fleet.get_mut(ship).unwrap().location =
            ShipLocation::Outbound { turns_left: 0 };
        let result = perform(
            &DragSource::Outbound { ship },
            &DragTarget::Inbound,
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Ok(Transferred::Ship { ship }));
        assert!(port.fleet.get(ship).unwrap().location.is_in_port());
    }

    #[test]
    fn departed_ship_aborts_the_return_drag() {
        let mut port = Port::new();
        let ghost = ShipId(99);
        let result = perform(
            &DragSource::Outbound { ship: ghost },
            &DragTarget::Inbound,
            None,
            &mut port.harbor(),
        );
        assert_eq!(result, Err(TransferError::ShipGone(ghost)));
    }

    #[test]
    #[should_panic(expected = "no transfer rule")]
    fn unlisted_pairs_never_reach_the_executor() {
        let mut port = Port::new();
        let ship = port.fleet.commission(ShipKind::Caravel);
        let _ = perform(
            &DragSource::InPortShip { ship },
            &DragTarget::Market,
            None,
            &mut port.harbor(),
        );
    }
}
