use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::economy::Good;

/// Goods shown in the harbor market table, in display order.
pub const MARKET_GOODS: &[Good] = &[
    Good::Food,
    Good::Sugar,
    Good::Tobacco,
    Good::Cotton,
    Good::Furs,
    Good::Lumber,
    Good::Ore,
    Good::Silver,
    Good::Horses,
    Good::Rum,
    Good::Cigars,
    Good::Cloth,
    Good::Coats,
    Good::TradeGoods,
    Good::Tools,
    Good::Muskets,
];

/// Per-good market state: what the crown pays, what it charges, and
/// whether parliament has embargoed the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEntry {
    /// Price paid to the player per unit sold
    pub bid: u32,
    /// Price charged to the player per unit bought
    pub ask: u32,
    pub boycott: bool,
}

/// The old-world market the harbor trades against.
///
/// Prices are plain table state here; the dynamic price-movement model
/// reacting to trade volume belongs to a later milestone.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Market {
    entries: BTreeMap<Good, MarketEntry>,
}

impl Default for Market {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        for &good in MARKET_GOODS {
            let bid = starting_bid(good);
            entries.insert(
                good,
                MarketEntry {
                    bid,
                    ask: bid + starting_spread(good),
                    boycott: false,
                },
            );
        }
        Market { entries }
    }
}

/// Starting bid prices, roughly mirroring the original game's opening values.
fn starting_bid(good: Good) -> u32 {
    match good {
        Good::Food => 1,
        Good::Sugar | Good::Tobacco | Good::Cotton | Good::Furs => 4,
        Good::Lumber => 2,
        Good::Ore => 3,
        Good::Silver => 19,
        Good::Horses => 2,
        Good::Rum | Good::Cigars | Good::Cloth | Good::Coats => 11,
        Good::TradeGoods => 2,
        Good::Tools => 2,
        Good::Muskets => 3,
    }
}

/// Bid/ask spread per good; manufactured goods carry the widest margin.
fn starting_spread(good: Good) -> u32 {
    match good {
        Good::Food | Good::Lumber | Good::Horses => 7,
        Good::TradeGoods | Good::Tools | Good::Muskets => 8,
        _ => 1,
    }
}

impl Market {
    pub fn entry(&self, good: Good) -> MarketEntry {
        *self
            .entries
            .get(&good)
            .unwrap_or(&MarketEntry { bid: 0, ask: 0, boycott: false })
    }

    pub fn bid_price(&self, good: Good) -> u32 {
        self.entry(good).bid
    }

    pub fn ask_price(&self, good: Good) -> u32 {
        self.entry(good).ask
    }

    pub fn is_boycotted(&self, good: Good) -> bool {
        self.entry(good).boycott
    }

    /// What selling `quantity` units fetches at the current bid price
    pub fn sale_value(&self, good: Good, quantity: u32) -> u32 {
        self.bid_price(good) * quantity
    }

    /// What buying `quantity` units costs at the current ask price
    pub fn purchase_cost(&self, good: Good, quantity: u32) -> u32 {
        self.ask_price(good) * quantity
    }

    pub fn set_bid_price(&mut self, good: Good, bid: u32) {
        let entry = self.entries.entry(good).or_insert(MarketEntry {
            bid: 0,
            ask: 0,
            boycott: false,
        });
        entry.bid = bid;
        entry.ask = entry.ask.max(bid);
    }

    pub fn set_boycott(&mut self, good: Good, boycott: bool) {
        self.entries
            .entry(good)
            .or_insert(MarketEntry {
                bid: 0,
                ask: 0,
                boycott: false,
            })
            .boycott = boycott;
    }
}
