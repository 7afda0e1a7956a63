//! Legality checking for harbor drags.
//!
//! `can_connect` is consulted every frame while a drag is in flight, so it
//! must stay pure and cheap: it reads state, never mutates it, and never
//! prompts. Whether a boycotted commodity may be offered for dragging at all
//! is the caller's decision, made before a source is handed to this module.

use crate::harbor::draggable::{DragSource, DragTarget};
use crate::ships::cargo::CargoItem;
use crate::ships::{Fleet, ShipId};
use crate::units::DockRoster;

/// Read-only view of the harbor the checker runs against. The active cargo
/// ship is the one whose hold the cargo box currently shows; it is session
/// state passed in by the caller, never looked up globally.
#[derive(Clone, Copy)]
pub struct HarborCtx<'a> {
    pub fleet: &'a Fleet,
    pub dock: &'a DockRoster,
    pub active_ship: Option<ShipId>,
}

impl<'a> HarborCtx<'a> {
    /// The active ship, provided it exists and is docked.
    fn active_in_port(&self) -> Option<ShipId> {
        let id = self.active_ship?;
        let ship = self.fleet.get(id)?;
        ship.location.is_in_port().then_some(id)
    }
}

/// Whether dropping `source` on `target` is a legal transfer in the current
/// state. Every pair without an explicit rule is illegal.
pub fn can_connect(source: &DragSource, target: &DragTarget, ctx: &HarborCtx) -> bool {
    match (source, target) {
        // Only units may stand on the dock; commodities stay aboard.
        (DragSource::CargoSlot { ship, slot }, DragTarget::Dock) => {
            let Some(ship) = ctx.fleet.get(*ship) else {
                return false;
            };
            ship.hold.unit_at(*slot).is_some()
        }

        // Reslotting within one ship. Dropping back on the same slot is
        // trivially fine; otherwise the dragged item must fit at the target
        // with its own slot counted as vacated, and a commodity only needs
        // room for a single unit since a partial move is acceptable.
        (
            DragSource::CargoSlot { ship: src_ship, slot: src_slot },
            DragTarget::CargoSlot { ship: dst_ship, slot: dst_slot },
        ) => {
            if src_ship != dst_ship {
                return false;
            }
            if src_slot == dst_slot {
                return true;
            }
            let Some(ship) = ctx.fleet.get(*src_ship) else {
                return false;
            };
            match ship.hold.item_at(*src_slot) {
                Some(CargoItem::Unit(unit)) => ship.hold.fits_with_item_removed(
                    &CargoItem::Unit(unit),
                    *src_slot,
                    *dst_slot,
                ),
                Some(CargoItem::Goods { good, .. }) => {
                    ship.hold.fits(&CargoItem::one_of(good), *dst_slot)
                }
                None => false,
            }
        }

        // A ship may only be dragged back to the harbor lane once its
        // outbound crossing has run down.
        (DragSource::Outbound { ship }, DragTarget::Inbound) => {
            match ctx.fleet.get(*ship).map(|s| s.location) {
                Some(crate::ships::ShipLocation::Outbound { turns_left }) => turns_left == 0,
                _ => false,
            }
        }

        // A dock unit boards a ship wherever there is room.
        (DragSource::Dock { unit }, DragTarget::InPortShip { ship }) => {
            if !ctx.dock.contains(*unit) {
                return false;
            }
            let Some(ship) = ctx.fleet.get(*ship) else {
                return false;
            };
            ship.location.is_in_port() && ship.hold.fits_somewhere(&CargoItem::Unit(*unit), 0)
        }

        // Cargo dropped onto a docked ship as a whole: a unit must change
        // ships and find room; a commodity needs room for one unit.
        (
            DragSource::CargoSlot { ship: src_ship, slot },
            DragTarget::InPortShip { ship: dst_ship },
        ) => {
            let Some(src) = ctx.fleet.get(*src_ship) else {
                return false;
            };
            let Some(dst) = ctx.fleet.get(*dst_ship) else {
                return false;
            };
            if !dst.location.is_in_port() {
                return false;
            }
            match src.hold.item_at(*slot) {
                Some(CargoItem::Unit(unit)) => {
                    src_ship != dst_ship && dst.hold.fits_somewhere(&CargoItem::Unit(unit), 0)
                }
                Some(CargoItem::Goods { good, .. }) => {
                    dst.hold.fits_somewhere(&CargoItem::one_of(good), 0)
                }
                None => false,
            }
        }

        // Buying: the active ship must be docked, and one unit of the
        // commodity must fit at the slot the player aimed at.
        (DragSource::Market { good }, DragTarget::CargoSlot { ship, slot }) => {
            let Some(active) = ctx.active_in_port() else {
                return false;
            };
            if *ship != active {
                return false;
            }
            let Some(ship) = ctx.fleet.get(active) else {
                return false;
            };
            ship.hold.fits(&CargoItem::one_of(*good), *slot)
        }

        // Buying onto a ship as a whole: one unit must fit somewhere.
        (DragSource::Market { good }, DragTarget::InPortShip { ship }) => {
            let Some(ship) = ctx.fleet.get(*ship) else {
                return false;
            };
            ship.location.is_in_port() && ship.hold.fits_somewhere(&CargoItem::one_of(*good), 0)
        }

        // Selling: the active ship must be docked and the slot must hold a
        // commodity; units are not for sale.
        (DragSource::CargoSlot { ship, slot }, DragTarget::Market) => {
            let Some(active) = ctx.active_in_port() else {
                return false;
            };
            if *ship != active {
                return false;
            }
            let Some(ship) = ctx.fleet.get(active) else {
                return false;
            };
            ship.hold.goods_at(*slot).is_some()
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::Good;
    use crate::ships::{ShipKind, ShipLocation};
    use crate::units::{DockRoster, UnitId};

    struct Harbor {
        fleet: Fleet,
        dock: DockRoster,
        active: Option<ShipId>,
    }

    impl Harbor {
        fn ctx(&self) -> HarborCtx<'_> {
            HarborCtx {
                fleet: &self.fleet,
                dock: &self.dock,
                active_ship: self.active,
            }
        }
    }

    /// A galleon in port holding a unit at slot 0 and ore at slot 1, a
    /// second docked caravel, and one unit waiting on the dock.
    fn harbor() -> (Harbor, ShipId, ShipId) {
        let mut fleet = Fleet::default();
        let galleon = fleet.commission(ShipKind::Galleon);
        let caravel = fleet.commission(ShipKind::Caravel);
        {
            let hold = &mut fleet.get_mut(galleon).unwrap().hold;
            assert!(hold.try_add_unit(UnitId(1), 0));
            hold.put_goods(1, Good::Ore, 50);
        }
        let mut dock = DockRoster::default();
        dock.add(UnitId(9));
        (
            Harbor {
                fleet,
                dock,
                active: Some(galleon),
            },
            galleon,
            caravel,
        )
    }

    #[test]
    fn unlisted_pairs_are_illegal() {
        let (harbor, galleon, caravel) = harbor();
        let ctx = harbor.ctx();
        let cases: &[(DragSource, DragTarget)] = &[
            // The dock only receives, it never sends to the market.
            (DragSource::Dock { unit: UnitId(9) }, DragTarget::Market),
            (DragSource::Dock { unit: UnitId(9) }, DragTarget::Dock),
            (
                DragSource::Dock { unit: UnitId(9) },
                DragTarget::CargoSlot { ship: galleon, slot: 0 },
            ),
            // Market goods cannot be dropped on the dock or at sea.
            (DragSource::Market { good: Good::Ore }, DragTarget::Dock),
            (DragSource::Market { good: Good::Ore }, DragTarget::Outbound),
            (DragSource::Market { good: Good::Ore }, DragTarget::Market),
            // Whole ships cannot be dragged into holds or stalls.
            (DragSource::InPortShip { ship: caravel }, DragTarget::Market),
            (
                DragSource::InPortShip { ship: caravel },
                DragTarget::InPortShip { ship: galleon },
            ),
            (DragSource::InPortShip { ship: caravel }, DragTarget::Outbound),
            // Sailing is ordered, not dragged, except for the return leg.
            (DragSource::Inbound { ship: caravel }, DragTarget::Outbound),
            (DragSource::Inbound { ship: caravel }, DragTarget::Dock),
            (DragSource::Outbound { ship: caravel }, DragTarget::Dock),
            (
                DragSource::Outbound { ship: caravel },
                DragTarget::InPortShip { ship: galleon },
            ),
            (
                DragSource::CargoSlot { ship: galleon, slot: 1 },
                DragTarget::Outbound,
            ),
            (
                DragSource::CargoSlot { ship: galleon, slot: 1 },
                DragTarget::Inbound,
            ),
        ];
        for (source, target) in cases {
            assert!(
                !can_connect(source, target, &ctx),
                "{source:?} -> {target:?} should be illegal"
            );
        }
    }

    #[test]
    fn dropping_on_the_same_slot_is_always_legal() {
        let (harbor, galleon, _) = harbor();
        for slot in 0..6 {
            assert!(can_connect(
                &DragSource::CargoSlot { ship: galleon, slot },
                &DragTarget::CargoSlot { ship: galleon, slot },
                &harbor.ctx()
            ));
        }
    }

    #[test]
    fn cross_ship_slot_to_slot_is_illegal() {
        let (harbor, galleon, caravel) = harbor();
        assert!(!can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 1 },
            &DragTarget::CargoSlot { ship: caravel, slot: 0 },
            &harbor.ctx()
        ));
    }

    #[test]
    fn only_units_may_be_dropped_on_the_dock() {
        let (harbor, galleon, _) = harbor();
        let ctx = harbor.ctx();
        assert!(can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 0 },
            &DragTarget::Dock,
            &ctx
        ));
        assert!(!can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 1 },
            &DragTarget::Dock,
            &ctx
        ));
        // An empty slot drags nothing.
        assert!(!can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 2 },
            &DragTarget::Dock,
            &ctx
        ));
    }

    #[test]
    fn unit_reslot_requires_room_with_own_slot_vacated() {
        let mut fleet = Fleet::default();
        let ship = fleet.commission(ShipKind::Caravel);
        {
            let hold = &mut fleet.get_mut(ship).unwrap().hold;
            assert!(hold.try_add_unit(UnitId(1), 0));
            hold.put_goods(1, Good::Ore, 100);
        }
        let dock = DockRoster::default();
        let ctx = HarborCtx {
            fleet: &fleet,
            dock: &dock,
            active_ship: Some(ship),
        };
        // Slot 1 is occupied by goods, so the unit cannot move there even
        // though its own slot would be free.
        assert!(!can_connect(
            &DragSource::CargoSlot { ship, slot: 0 },
            &DragTarget::CargoSlot { ship, slot: 1 },
            &ctx
        ));
    }

    #[test]
    fn commodity_reslot_needs_room_for_just_one_unit() {
        let mut fleet = Fleet::default();
        let ship = fleet.commission(ShipKind::Caravel);
        {
            let hold = &mut fleet.get_mut(ship).unwrap().hold;
            hold.put_goods(0, Good::Ore, 80);
            hold.put_goods(1, Good::Ore, 99);
        }
        let dock = DockRoster::default();
        let ctx = HarborCtx {
            fleet: &fleet,
            dock: &dock,
            active_ship: Some(ship),
        };
        // Only one unit fits at slot 1; a partial move is still legal.
        assert!(can_connect(
            &DragSource::CargoSlot { ship, slot: 0 },
            &DragTarget::CargoSlot { ship, slot: 1 },
            &ctx
        ));
    }

    #[test]
    fn outbound_ship_returns_only_after_the_countdown() {
        let (mut harbor, galleon, _) = harbor();
        harbor.fleet.get_mut(galleon).unwrap().location =
            ShipLocation::Outbound { turns_left: 2 };
        assert!(!can_connect(
            &DragSource::Outbound { ship: galleon },
            &DragTarget::Inbound,
            &harbor.ctx()
        ));
        harbor.fleet.get_mut(galleon).unwrap().location =
            ShipLocation::Outbound { turns_left: 0 };
        assert!(can_connect(
            &DragSource::Outbound { ship: galleon },
            &DragTarget::Inbound,
            &harbor.ctx()
        ));
    }

    #[test]
    fn dock_unit_boards_where_there_is_room() {
        let (mut harbor, _, caravel) = harbor();
        assert!(can_connect(
            &DragSource::Dock { unit: UnitId(9) },
            &DragTarget::InPortShip { ship: caravel },
            &harbor.ctx()
        ));
        // Fill the caravel completely.
        {
            let hold = &mut harbor.fleet.get_mut(caravel).unwrap().hold;
            hold.put_goods(0, Good::Ore, 1);
            hold.put_goods(1, Good::Furs, 1);
        }
        assert!(!can_connect(
            &DragSource::Dock { unit: UnitId(9) },
            &DragTarget::InPortShip { ship: caravel },
            &harbor.ctx()
        ));
    }

    #[test]
    fn unit_cannot_board_the_ship_it_is_already_on() {
        let (harbor, galleon, caravel) = harbor();
        let ctx = harbor.ctx();
        assert!(!can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 0 },
            &DragTarget::InPortShip { ship: galleon },
            &ctx
        ));
        assert!(can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 0 },
            &DragTarget::InPortShip { ship: caravel },
            &ctx
        ));
    }

    #[test]
    fn market_buy_requires_the_active_ship_in_port() {
        let (mut harbor, galleon, _) = harbor();
        let source = DragSource::Market { good: Good::Ore };
        let target = DragTarget::CargoSlot { ship: galleon, slot: 2 };
        assert!(can_connect(&source, &target, &harbor.ctx()));

        // At sea: refused no matter how much room the hold has.
        harbor.fleet.get_mut(galleon).unwrap().location =
            ShipLocation::Inbound { turns_left: 1 };
        assert!(!can_connect(&source, &target, &harbor.ctx()));

        // No active ship at all: refused.
        harbor.fleet.get_mut(galleon).unwrap().location = ShipLocation::InPort;
        harbor.active = None;
        assert!(!can_connect(&source, &target, &harbor.ctx()));
    }

    #[test]
    fn market_buy_checks_the_exact_target_slot() {
        let (harbor, galleon, _) = harbor();
        let ctx = harbor.ctx();
        // Slot 0 holds a unit: no room for even one unit of ore there.
        assert!(!can_connect(
            &DragSource::Market { good: Good::Ore },
            &DragTarget::CargoSlot { ship: galleon, slot: 0 },
            &ctx
        ));
        // Slot 1 holds 50 ore: one more fits.
        assert!(can_connect(
            &DragSource::Market { good: Good::Ore },
            &DragTarget::CargoSlot { ship: galleon, slot: 1 },
            &ctx
        ));
        // A different commodity cannot share the stack.
        assert!(!can_connect(
            &DragSource::Market { good: Good::Furs },
            &DragTarget::CargoSlot { ship: galleon, slot: 1 },
            &ctx
        ));
    }

    #[test]
    fn selling_requires_goods_in_the_source_slot() {
        let (harbor, galleon, _) = harbor();
        let ctx = harbor.ctx();
        assert!(can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 1 },
            &DragTarget::Market,
            &ctx
        ));
        // Units are not for sale.
        assert!(!can_connect(
            &DragSource::CargoSlot { ship: galleon, slot: 0 },
            &DragTarget::Market,
            &ctx
        ));
    }

    #[test]
    fn boycotts_do_not_concern_the_checker() {
        // Whether a good is under boycott is decided before a drag source
        // is ever offered; the legality check itself stays capacity-only,
        // so a boycotted good still "connects" if it would fit.
        let (harbor, galleon, _) = harbor();
        assert!(can_connect(
            &DragSource::Market { good: Good::Muskets },
            &DragTarget::CargoSlot { ship: galleon, slot: 2 },
            &harbor.ctx()
        ));
    }
}
