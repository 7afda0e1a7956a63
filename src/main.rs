//! Rust Colonial - a turn-based colonial trading game

use bevy::prelude::*;

use rust_colonial::constants::HIGH_SEAS_TURNS;
use rust_colonial::economy::Good;
use rust_colonial::harbor::HarborSelection;
use rust_colonial::ships::{Fleet, ShipKind, ShipLocation};
use rust_colonial::units::{DockRoster, UnitKind, UnitRegistry};

fn main() {
    let mut app = rust_colonial::app();
    app.add_systems(Startup, setup_demo_harbor);
    app.run();
}

/// A small opening position: a loaded galleon in port, a caravel halfway
/// home, and two colonists waiting on the dock.
fn setup_demo_harbor(
    mut fleet: ResMut<Fleet>,
    mut registry: ResMut<UnitRegistry>,
    mut dock: ResMut<DockRoster>,
    mut selection: ResMut<HarborSelection>,
) {
    let galleon = fleet.commission(ShipKind::Galleon);
    {
        let hold = &mut fleet.get_mut(galleon).unwrap().hold;
        hold.put_goods(0, Good::Ore, 50);
        hold.put_goods(1, Good::Silver, 1);
        hold.put_goods(2, Good::Tobacco, 100);
        let passenger = registry.register(UnitKind::ExpertFarmer);
        assert!(hold.try_add_unit(passenger, 3));
    }

    let caravel = fleet.commission(ShipKind::Caravel);
    fleet.get_mut(caravel).unwrap().location = ShipLocation::Inbound {
        turns_left: HIGH_SEAS_TURNS / 2,
    };

    for kind in [UnitKind::FreeColonist, UnitKind::Soldier] {
        let unit = registry.register(kind);
        dock.add(unit);
    }

    selection.ship = Some(galleon);
    info!("harbor ready: galleon in port, caravel inbound");
}
