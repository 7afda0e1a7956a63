use bevy::prelude::*;

use crate::harbor::HarborSelection;
use crate::turn_system::TurnPhase;

pub mod cargo;
pub mod types;

pub use cargo::{CargoHold, CargoItem, CargoSlot};
pub use types::{Fleet, Ship, ShipId, ShipKind, ShipLocation};

use crate::constants::HIGH_SEAS_TURNS;

/// Order an in-port ship to set sail for the new world
#[derive(Message, Debug, Clone, Copy)]
pub struct SailForNewWorld {
    pub ship: ShipId,
}

/// Order a ship on the high seas to turn around and head for the harbor
#[derive(Message, Debug, Clone, Copy)]
pub struct SailForHarbor {
    pub ship: ShipId,
}

/// Plugin for fleet management and high-seas travel
pub struct ShipsPlugin;

impl Plugin for ShipsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Fleet>()
            .add_message::<SailForNewWorld>()
            .add_message::<SailForHarbor>()
            .add_systems(Update, (handle_sail_for_new_world, handle_sail_for_harbor))
            .add_systems(OnEnter(TurnPhase::Processing), progress_high_seas);
    }
}

/// Send in-port ships outbound; the harbor selection moves on to the next
/// docked ship so the player is not left looking at a departed one.
fn handle_sail_for_new_world(
    mut orders: MessageReader<SailForNewWorld>,
    mut fleet: ResMut<Fleet>,
    mut selection: ResMut<HarborSelection>,
) {
    for order in orders.read() {
        let Some(ship) = fleet.get_mut(order.ship) else {
            warn!("sail order for unknown ship {:?}", order.ship);
            continue;
        };
        if !ship.location.is_in_port() {
            warn!("ship {:?} cannot sail: not in port", order.ship);
            continue;
        }
        ship.location = ShipLocation::Outbound {
            turns_left: HIGH_SEAS_TURNS,
        };
        info!("ship {:?} sets sail for the new world", order.ship);
        if selection.ship == Some(order.ship) {
            selection.ship = fleet.in_port().next();
        }
    }
}

/// Turn an outbound ship around mid-crossing. Distance already covered
/// counts toward the return trip.
fn handle_sail_for_harbor(mut orders: MessageReader<SailForHarbor>, mut fleet: ResMut<Fleet>) {
    for order in orders.read() {
        let Some(ship) = fleet.get_mut(order.ship) else {
            warn!("sail order for unknown ship {:?}", order.ship);
            continue;
        };
        match ship.location {
            ShipLocation::Outbound { turns_left } => {
                ship.location = ShipLocation::Inbound {
                    turns_left: HIGH_SEAS_TURNS - turns_left.min(HIGH_SEAS_TURNS),
                };
                info!("ship {:?} comes about for the harbor", order.ship);
            }
            ShipLocation::Inbound { .. } | ShipLocation::InPort => {
                debug!("ship {:?} is already heading home", order.ship);
            }
        }
    }
}

/// Advance every crossing by one turn. Inbound ships that finish the
/// crossing dock immediately; outbound ships wait at zero until ordered on.
fn progress_high_seas(mut fleet: ResMut<Fleet>, mut selection: ResMut<HarborSelection>) {
    let mut arrivals: Vec<ShipId> = Vec::new();
    for (id, ship) in fleet.iter_mut() {
        match &mut ship.location {
            ShipLocation::InPort => {}
            ShipLocation::Outbound { turns_left } => {
                *turns_left = turns_left.saturating_sub(1);
            }
            ShipLocation::Inbound { turns_left } => {
                *turns_left = turns_left.saturating_sub(1);
                if *turns_left == 0 {
                    ship.location = ShipLocation::InPort;
                    arrivals.push(id);
                }
            }
        }
    }
    for id in arrivals {
        info!("ship {:?} has docked at the harbor", id);
        if selection.ship.is_none() {
            selection.ship = Some(id);
        }
    }
}
