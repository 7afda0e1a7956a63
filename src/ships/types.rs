use bevy::prelude::*;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ships::cargo::CargoHold;

/// Stable identifier for a ship
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct ShipId(pub u32);

/// Type of ship (based on the classic roster: Caravel through Galleon)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShipKind {
    /// Starting ship
    #[default]
    Caravel,
    /// Dedicated cargo hauler
    Merchantman,
    /// Largest hold in the game
    Galleon,
    /// Fast raider with a small hold
    Privateer,
    /// Warship
    Frigate,
}

impl ShipKind {
    /// Get the number of cargo slots for this ship type
    pub fn cargo_capacity(self) -> usize {
        match self {
            ShipKind::Caravel => 2,
            ShipKind::Merchantman => 4,
            ShipKind::Galleon => 6,
            ShipKind::Privateer => 2,
            ShipKind::Frigate => 2,
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipKind::Caravel => write!(f, "Caravel"),
            ShipKind::Merchantman => write!(f, "Merchantman"),
            ShipKind::Galleon => write!(f, "Galleon"),
            ShipKind::Privateer => write!(f, "Privateer"),
            ShipKind::Frigate => write!(f, "Frigate"),
        }
    }
}

/// Where a ship currently is, from the harbor's point of view.
///
/// The countdowns run toward zero: an outbound ship with `turns_left == 0`
/// has completed the crossing, an inbound ship with `turns_left == 0` is
/// docking this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShipLocation {
    #[default]
    InPort,
    Outbound {
        turns_left: u32,
    },
    Inbound {
        turns_left: u32,
    },
}

impl ShipLocation {
    pub fn is_in_port(&self) -> bool {
        matches!(self, ShipLocation::InPort)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub kind: ShipKind,
    pub location: ShipLocation,
    pub hold: CargoHold,
}

impl Ship {
    /// Create a new ship, docked and empty
    pub fn new(kind: ShipKind) -> Self {
        Ship {
            kind,
            location: ShipLocation::InPort,
            hold: CargoHold::with_capacity(kind.cargo_capacity()),
        }
    }
}

/// Registry of the player's ships, keyed by id.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: BTreeMap<ShipId, Ship>,
    next_id: u32,
}

impl Fleet {
    pub fn commission(&mut self, kind: ShipKind) -> ShipId {
        let id = ShipId(self.next_id);
        self.next_id += 1;
        self.ships.insert(id, Ship::new(kind));
        id
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    pub fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(&id)
    }

    pub fn contains(&self, id: ShipId) -> bool {
        self.ships.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships.iter().map(|(id, ship)| (*id, ship))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ShipId, &mut Ship)> {
        self.ships.iter_mut().map(|(id, ship)| (*id, ship))
    }

    /// Ships currently docked, in id order
    pub fn in_port(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.iter()
            .filter(|(_, ship)| ship.location.is_in_port())
            .map(|(id, _)| id)
    }

    /// Disjoint mutable access to two different ships.
    pub fn pair_mut(&mut self, a: ShipId, b: ShipId) -> Option<(&mut Ship, &mut Ship)> {
        debug_assert_ne!(a, b, "pair_mut requires two distinct ships");
        let mut first = None;
        let mut second = None;
        for (id, ship) in self.ships.iter_mut() {
            if *id == a {
                first = Some(ship);
            } else if *id == b {
                second = Some(ship);
            }
        }
        first.zip(second)
    }
}
