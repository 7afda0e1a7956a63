//! The harbor: drag-transfer pipeline, session state, and auto-unload.
//!
//! A transfer runs in three phases: the connectivity check, the quantity
//! prompt (only for commodity-amount pairs), and execution. Only the prompt
//! may wait on the player; while it is open the pending pair sits in
//! [`TransferSession::AwaitingQuantity`] and nothing has been mutated yet,
//! so a cancellation simply drops the session back to idle.

use bevy::prelude::*;

pub mod connect;
pub mod draggable;
pub mod negotiate;
pub mod perform;
pub mod unload;

pub use connect::{HarborCtx, can_connect};
pub use draggable::{DragSource, DragTarget};
pub use negotiate::{QuantityRequest, QuantityVerb, quantity_request};
pub use perform::{HarborMut, TransferError, Transferred, perform};
pub use unload::{UnloadableSlot, rank_unloadable_slots};

use crate::economy::{Market, Treasury};
use crate::messages::{
    DropRequested, QuantityCancelled, QuantitySubmitted, TransferCompleted, UnloadAll,
};
use crate::ships::{Fleet, ShipId};
use crate::units::DockRoster;

/// The ship whose hold the cargo box currently shows. Owned by the harbor
/// session; checker and executor receive it as a parameter.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarborSelection {
    pub ship: Option<ShipId>,
}

/// The in-flight transfer, if any. One drag at a time: a new drop is
/// refused while a prompt is open.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferSession {
    #[default]
    Idle,
    AwaitingQuantity {
        source: DragSource,
        target: DragTarget,
        request: QuantityRequest,
    },
}

impl TransferSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransferSession::Idle)
    }
}

pub struct HarborPlugin;

impl Plugin for HarborPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HarborSelection>()
            .init_resource::<TransferSession>()
            .init_resource::<DockRoster>()
            .init_resource::<crate::units::UnitRegistry>()
            .add_message::<DropRequested>()
            .add_message::<QuantitySubmitted>()
            .add_message::<QuantityCancelled>()
            .add_message::<TransferCompleted>()
            .add_message::<UnloadAll>()
            .add_systems(
                Update,
                (
                    handle_drop_requests,
                    handle_quantity_replies,
                    handle_unload_all,
                    update_selection_on_arrival,
                ),
            );
    }
}

/// Phase one and two: check the pair, then either park it behind a prompt
/// or execute immediately.
fn handle_drop_requests(
    mut drops: MessageReader<DropRequested>,
    mut session: ResMut<TransferSession>,
    mut fleet: ResMut<Fleet>,
    mut dock: ResMut<DockRoster>,
    market: Res<Market>,
    mut treasury: ResMut<Treasury>,
    selection: Res<HarborSelection>,
    mut completed: MessageWriter<TransferCompleted>,
) {
    for drop in drops.read() {
        if !session.is_idle() {
            warn!("drop ignored: a transfer is already awaiting its quantity");
            continue;
        }
        let ctx = HarborCtx {
            fleet: &*fleet,
            dock: &*dock,
            active_ship: selection.ship,
        };
        if !can_connect(&drop.source, &drop.target, &ctx) {
            debug!("illegal drop {:?} -> {:?}", drop.source, drop.target);
            continue;
        }
        match quantity_request(&drop.source, &drop.target, &ctx) {
            Some(request) => {
                *session = TransferSession::AwaitingQuantity {
                    source: drop.source,
                    target: drop.target,
                    request,
                };
            }
            None => execute_transfer(
                &drop.source,
                &drop.target,
                None,
                &mut fleet,
                &mut dock,
                &market,
                &mut treasury,
                &mut completed,
            ),
        }
    }
}

/// Phase three, resumed: the prompt was answered or dismissed.
fn handle_quantity_replies(
    mut submissions: MessageReader<QuantitySubmitted>,
    mut cancellations: MessageReader<QuantityCancelled>,
    mut session: ResMut<TransferSession>,
    mut fleet: ResMut<Fleet>,
    mut dock: ResMut<DockRoster>,
    market: Res<Market>,
    mut treasury: ResMut<Treasury>,
    mut completed: MessageWriter<TransferCompleted>,
) {
    if cancellations.read().next().is_some() {
        if !session.is_idle() {
            debug!("transfer cancelled at the quantity prompt");
            *session = TransferSession::Idle;
        }
        submissions.clear();
        return;
    }
    for submission in submissions.read() {
        let TransferSession::AwaitingQuantity { source, target, request } = *session else {
            warn!("quantity submitted with no transfer pending");
            continue;
        };
        *session = TransferSession::Idle;
        let value = submission.value.min(request.max);
        if value == 0 {
            // Nothing to transfer; same outcome as a cancellation.
            debug!("zero quantity submitted; abandoning the transfer");
            continue;
        }
        execute_transfer(
            &source,
            &target,
            Some(value),
            &mut fleet,
            &mut dock,
            &market,
            &mut treasury,
            &mut completed,
        );
    }
}

/// Run the executor and settle the money and selection consequences.
#[allow(clippy::too_many_arguments)]
fn execute_transfer(
    source: &DragSource,
    target: &DragTarget,
    quantity: Option<u32>,
    fleet: &mut Fleet,
    dock: &mut DockRoster,
    market: &Market,
    treasury: &mut Treasury,
    completed: &mut MessageWriter<TransferCompleted>,
) {
    let mut harbor = HarborMut { fleet, dock };
    debug!("performing transfer {source:?} -> {target:?}");
    let outcome = match perform(source, target, quantity, &mut harbor) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("transfer aborted: {err}");
            return;
        }
    };
    match (source, target, outcome) {
        // Buying debits the treasury at the ask price.
        (DragSource::Market { good }, _, Transferred::Goods { quantity, .. }) => {
            treasury.subtract(market.purchase_cost(*good, quantity));
        }
        // Selling credits it at the bid price.
        (_, DragTarget::Market, Transferred::Goods { good, quantity }) => {
            treasury.add(market.sale_value(good, quantity));
        }
        _ => {}
    }
    completed.write(TransferCompleted { outcome });
}

/// When a ship returns home via the drag, shift the harbor selection onto a
/// docked ship so the cargo box shows something useful.
pub fn settle_arrival_selection(
    fleet: &Fleet,
    selection: &mut HarborSelection,
    arrived: ShipId,
) {
    selection.ship = fleet
        .in_port()
        .find(|id| *id != arrived)
        .or(Some(arrived));
}

/// System wrapper around [`settle_arrival_selection`] driven by completed
/// ship transfers.
fn update_selection_on_arrival(
    mut completed: MessageReader<TransferCompleted>,
    fleet: Res<Fleet>,
    mut selection: ResMut<HarborSelection>,
) {
    for message in completed.read() {
        if let Transferred::Ship { ship } = message.outcome {
            settle_arrival_selection(&fleet, &mut selection, ship);
        }
    }
}

/// Sell off a ship's stacks cheapest-first, skipping boycotted goods.
fn handle_unload_all(
    mut requests: MessageReader<UnloadAll>,
    mut fleet: ResMut<Fleet>,
    mut dock: ResMut<DockRoster>,
    market: Res<Market>,
    mut treasury: ResMut<Treasury>,
    mut completed: MessageWriter<TransferCompleted>,
) {
    for request in requests.read() {
        let ranked = rank_unloadable_slots(&fleet, request.ship, &market);
        for entry in ranked {
            if entry.boycotted {
                info!(
                    "{} is under boycott and stays aboard; parliament must lift it first",
                    entry.good
                );
                continue;
            }
            execute_transfer(
                &DragSource::CargoSlot {
                    ship: request.ship,
                    slot: entry.slot,
                },
                &DragTarget::Market,
                Some(entry.quantity),
                &mut fleet,
                &mut dock,
                &market,
                &mut treasury,
                &mut completed,
            );
        }
    }
}
