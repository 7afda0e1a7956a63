//! Endpoint classification for harbor drag gestures.
//!
//! Sources and targets are separate closed enums: a dock *source* names the
//! unit being picked up, while a dock *target* is just "the dock". Every
//! consumer matches on the `(source, target)` pair exhaustively; pairs with
//! no rule fall through to "illegal" in the checker and to a hard failure in
//! the executor.

use crate::economy::Good;
use crate::ships::ShipId;
use crate::units::UnitId;

/// What the player picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// A unit standing on the dock
    Dock { unit: UnitId },
    /// Whatever occupies one cargo slot of a ship
    CargoSlot { ship: ShipId, slot: usize },
    /// A commodity offered by the market
    Market { good: Good },
    /// A docked ship, grabbed as a whole
    InPortShip { ship: ShipId },
    /// A ship crossing toward the new world
    Outbound { ship: ShipId },
    /// A ship crossing toward the harbor
    Inbound { ship: ShipId },
}

/// Where the player dropped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The dock walkway
    Dock,
    /// A specific cargo slot of a ship
    CargoSlot { ship: ShipId, slot: usize },
    /// The market stalls
    Market,
    /// A docked ship as a whole ("stow anywhere aboard")
    InPortShip { ship: ShipId },
    /// The outbound lane of the high seas
    Outbound,
    /// The inbound lane of the high seas
    Inbound,
}
