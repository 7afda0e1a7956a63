pub mod button_style;
pub mod harbor;

use bevy::prelude::*;

pub struct GameUIPlugin;

impl Plugin for GameUIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(harbor::HarborUIPlugin)
            .add_systems(Update, button_style::unified_button_interaction_system);
    }
}
