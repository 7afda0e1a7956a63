use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use rust_colonial::LogicPlugins;
use rust_colonial::economy::Good;
use rust_colonial::harbor::HarborSelection;
use rust_colonial::ships::{Fleet, ShipId, ShipKind};
use rust_colonial::turn_system::EndPlayerTurn;

/// Build a headless app with the full logic stack and no rendering
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(LogicPlugins);
    app.update();
    app
}

/// Commission a docked ship and make it the harbor selection
pub fn add_selected_ship(app: &mut App, kind: ShipKind) -> ShipId {
    let id = app.world_mut().resource_mut::<Fleet>().commission(kind);
    app.world_mut().resource_mut::<HarborSelection>().ship = Some(id);
    id
}

/// Stack goods into a specific slot of a ship's hold
pub fn load_goods(app: &mut App, ship: ShipId, slot: usize, good: Good, quantity: u32) {
    let mut fleet = app.world_mut().resource_mut::<Fleet>();
    fleet
        .get_mut(ship)
        .expect("ship must exist")
        .hold
        .put_goods(slot, good, quantity);
}

/// End the player turn and run updates until processing has handed the
/// phase back
pub fn advance_turn(app: &mut App) {
    app.world_mut().write_message(EndPlayerTurn);
    for _ in 0..4 {
        app.update();
    }
}
