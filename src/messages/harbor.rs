use bevy::prelude::*;

use crate::harbor::draggable::{DragSource, DragTarget};
use crate::harbor::perform::Transferred;
use crate::ships::ShipId;

/// The player dropped a drag source on a target; run the transfer pipeline.
#[derive(Message, Debug, Clone, Copy)]
pub struct DropRequested {
    pub source: DragSource,
    pub target: DragTarget,
}

/// The quantity prompt was answered.
#[derive(Message, Debug, Clone, Copy)]
pub struct QuantitySubmitted {
    pub value: u32,
}

/// The quantity prompt was dismissed; abandon the pending transfer.
#[derive(Message, Debug, Clone, Copy)]
pub struct QuantityCancelled;

/// A transfer finished; carries what actually moved so UI panels refresh.
#[derive(Message, Debug, Clone, Copy)]
pub struct TransferCompleted {
    pub outcome: Transferred,
}

/// Sell every non-boycotted commodity stack aboard the ship, cheapest
/// stack first.
#[derive(Message, Debug, Clone, Copy)]
pub struct UnloadAll {
    pub ship: ShipId,
}
