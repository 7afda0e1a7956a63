//! Rust Colonial - a turn-based colonial trading game built around its
//! old-world harbor screen.
//!
//! This library exposes the core game components for testing and potential reuse.

use bevy::prelude::*;

#[cfg(feature = "debug")]
use bevy_inspector_egui::bevy_egui::EguiPlugin;
#[cfg(feature = "debug")]
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use crate::economy::EconomyPlugin;
use crate::harbor::HarborPlugin;
use crate::ships::ShipsPlugin;
use crate::turn_system::TurnSystemPlugin;
use crate::ui::GameUIPlugin;

pub mod constants;
pub mod economy;
pub mod harbor;
pub mod messages;
pub mod ships;
pub mod turn_system;
pub mod ui;
pub mod units;

/// Plugin group for core game logic (headless-compatible)
/// Use this for tests that don't need rendering or player input
pub struct LogicPlugins;

impl PluginGroup for LogicPlugins {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(TurnSystemPlugin)
            .add(EconomyPlugin)
            .add(ShipsPlugin)
            .add(HarborPlugin)
    }
}

pub fn app() -> App {
    let mut app = App::new();

    app
        // Core Bevy plugins
        .add_plugins((
            DefaultPlugins,
            bevy::input_focus::InputDispatchPlugin,
            bevy::ui_widgets::UiWidgetsPlugins,
        ))
        .add_plugins(LogicPlugins)
        .add_plugins(GameUIPlugin);

    #[cfg(feature = "debug")]
    app.add_plugins((EguiPlugin::default(), WorldInspectorPlugin::new()));

    app
}
