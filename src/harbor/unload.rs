//! Ranking a docked ship's commodity stacks for the auto-sell flow.
//!
//! Stacks are sold cheapest first, so the ranking orders them by ascending
//! sale value at the current bid prices. Boycotted stacks keep their place
//! in the order but are tagged, letting the caller skip them or offer to
//! pay the back taxes.

use crate::economy::{Good, Market};
use crate::ships::{Fleet, ShipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnloadableSlot {
    pub slot: usize,
    pub good: Good,
    pub quantity: u32,
    /// Sale value of the whole stack at the current bid price
    pub value: u32,
    pub boycotted: bool,
}

/// The ship's commodity stacks, cheapest total value first. Unknown ships
/// and ships without cargo rank as empty.
pub fn rank_unloadable_slots(fleet: &Fleet, ship: ShipId, market: &Market) -> Vec<UnloadableSlot> {
    let Some(ship) = fleet.get(ship) else {
        return Vec::new();
    };
    let mut slots: Vec<UnloadableSlot> = ship
        .hold
        .goods_slots()
        .map(|(slot, good, quantity)| UnloadableSlot {
            slot,
            good,
            quantity,
            value: market.sale_value(good, quantity),
            boycotted: market.is_boycotted(good),
        })
        .collect();
    slots.sort_by_key(|s| s.value);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::ShipKind;

    /// A galleon loaded with the standard price-list cargo: ore 50 @ 5,
    /// silver 1 @ 19, food 100 @ 0, muskets 100 @ 6, trade goods 100 @ 3.
    fn loaded_galleon() -> (Fleet, ShipId, Market) {
        let mut fleet = Fleet::default();
        let ship = fleet.commission(ShipKind::Galleon);
        {
            let hold = &mut fleet.get_mut(ship).unwrap().hold;
            hold.put_goods(0, Good::Ore, 50);
            hold.put_goods(1, Good::Silver, 1);
            hold.put_goods(2, Good::Food, 100);
            hold.put_goods(4, Good::Muskets, 100);
            hold.put_goods(5, Good::TradeGoods, 100);
        }
        let mut market = Market::default();
        market.set_bid_price(Good::Ore, 5);
        market.set_bid_price(Good::Silver, 19);
        market.set_bid_price(Good::Food, 0);
        market.set_bid_price(Good::Muskets, 6);
        market.set_bid_price(Good::TradeGoods, 3);
        (fleet, ship, market)
    }

    #[test]
    fn stacks_rank_by_ascending_sale_value() {
        let (fleet, ship, market) = loaded_galleon();
        let ranked = rank_unloadable_slots(&fleet, ship, &market);
        let order: Vec<(usize, Good, u32)> =
            ranked.iter().map(|s| (s.slot, s.good, s.value)).collect();
        assert_eq!(
            order,
            vec![
                (2, Good::Food, 0),
                (1, Good::Silver, 19),
                (0, Good::Ore, 250),
                (5, Good::TradeGoods, 300),
                (4, Good::Muskets, 600),
            ]
        );
        assert!(ranked.iter().all(|s| !s.boycotted));
    }

    #[test]
    fn boycott_tags_without_reordering() {
        let (fleet, ship, mut market) = loaded_galleon();
        market.set_boycott(Good::Muskets, true);
        let ranked = rank_unloadable_slots(&fleet, ship, &market);
        let order: Vec<usize> = ranked.iter().map(|s| s.slot).collect();
        assert_eq!(order, vec![2, 1, 0, 5, 4]);
        for entry in &ranked {
            assert_eq!(entry.boycotted, entry.good == Good::Muskets);
        }
    }

    #[test]
    fn empty_and_unknown_ships_rank_empty() {
        let (mut fleet, _, market) = loaded_galleon();
        let empty = fleet.commission(ShipKind::Caravel);
        assert!(rank_unloadable_slots(&fleet, empty, &market).is_empty());
        assert!(rank_unloadable_slots(&fleet, ShipId(42), &market).is_empty());
    }
}
