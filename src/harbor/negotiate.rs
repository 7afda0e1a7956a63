//! Quantity negotiation: the one place a transfer may pause for input.
//!
//! Most drags execute immediately. The four commodity-amount pairs instead
//! produce a [`QuantityRequest`] describing the bounded prompt to put in
//! front of the player; the transfer resumes when a value arrives and is
//! abandoned, with no state touched, when the prompt is cancelled. A
//! submitted zero is treated as a cancellation by the session so the
//! executor never sees an empty transfer.

use core::fmt;

use crate::constants::DEFAULT_MARKET_QUANTITY;
use crate::economy::Good;
use crate::harbor::connect::HarborCtx;
use crate::harbor::draggable::{DragSource, DragTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityVerb {
    Buy,
    Sell,
    Move,
}

impl fmt::Display for QuantityVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityVerb::Buy => write!(f, "buy"),
            QuantityVerb::Sell => write!(f, "sell"),
            QuantityVerb::Move => write!(f, "move"),
        }
    }
}

/// A bounded integer prompt the UI must answer before the transfer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityRequest {
    pub good: Good,
    pub verb: QuantityVerb,
    pub initial: u32,
    pub min: u32,
    pub max: u32,
}

impl QuantityRequest {
    fn new(good: Good, verb: QuantityVerb, initial: u32) -> Self {
        QuantityRequest {
            good,
            verb,
            initial,
            min: 0,
            max: DEFAULT_MARKET_QUANTITY,
        }
    }

    pub fn prompt_text(&self) -> String {
        format!(
            "What quantity of {} would you like to {}? ({}-{}):",
            self.good, self.verb, self.min, self.max
        )
    }
}

/// The prompt a `(source, target)` pair needs, or `None` when the pair
/// carries no player-chosen amount and may execute straight away.
///
/// Call only after `can_connect` has approved the pair; the slot lookups
/// here rely on the shapes the checker established.
pub fn quantity_request(
    source: &DragSource,
    target: &DragTarget,
    ctx: &HarborCtx,
) -> Option<QuantityRequest> {
    match (source, target) {
        // Buying defaults to a full wagon of the commodity.
        (DragSource::Market { good }, DragTarget::CargoSlot { .. })
        | (DragSource::Market { good }, DragTarget::InPortShip { .. }) => Some(
            QuantityRequest::new(*good, QuantityVerb::Buy, DEFAULT_MARKET_QUANTITY),
        ),

        // Selling defaults to the whole stack.
        (DragSource::CargoSlot { ship, slot }, DragTarget::Market) => {
            let (good, quantity) = ctx.fleet.get(*ship)?.hold.goods_at(*slot)?;
            Some(QuantityRequest::new(good, QuantityVerb::Sell, quantity))
        }

        // Moving cargo to another ship only prompts for commodities; a
        // unit transfer has no amount to choose.
        (DragSource::CargoSlot { ship, slot }, DragTarget::InPortShip { .. }) => {
            let (good, quantity) = ctx.fleet.get(*ship)?.hold.goods_at(*slot)?;
            Some(QuantityRequest::new(good, QuantityVerb::Move, quantity))
        }

        _ => None,
    }
}
