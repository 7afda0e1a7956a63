use bevy::prelude::*;

pub mod goods;
pub mod market;
pub mod treasury;

pub use goods::Good;
pub use market::{MARKET_GOODS, Market, MarketEntry};
pub use treasury::Treasury;

/// Plugin that owns the old-world market and the player's treasury
pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Market>()
            .init_resource::<Treasury>();
    }
}
