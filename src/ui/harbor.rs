//! The harbor screen: ship list, cargo box, dock, and market table.
//!
//! Drag gestures are presented as pick-up/drop clicks: the first click on a
//! slot, dock unit, market row, or outbound ship arms a pickup, the second
//! click resolves the drop target and hands the pair to the harbor session
//! as a [`DropRequested`] message. Boycotted market rows refuse to arm a
//! pickup at all, which is where boycott enforcement lives.

use bevy::prelude::*;
use bevy::ui::widget::Button as OldButton;
use bevy::ui_widgets::{Activate, Button};

use crate::economy::{Good, MARKET_GOODS, Market, Treasury};
use crate::harbor::{DragSource, DragTarget, HarborSelection, TransferSession};
use crate::messages::{DropRequested, QuantityCancelled, QuantitySubmitted, UnloadAll};
use crate::ships::{CargoSlot, Fleet, ShipId, ShipLocation};
use crate::turn_system::TurnCounter;
use crate::ui::button_style::*;
use crate::units::{DockRoster, UnitId, UnitRegistry};

#[derive(Component)]
pub struct HarborScreen;

#[derive(Component)]
struct TurnText;

#[derive(Component)]
struct TreasuryText;

#[derive(Component)]
struct PickupText;

#[derive(Component)]
struct ShipList;

#[derive(Component)]
struct CargoBox;

#[derive(Component)]
struct DockPanel;

#[derive(Component)]
struct ShipRowButton {
    ship: ShipId,
}

#[derive(Component)]
struct CargoSlotButton {
    ship: ShipId,
    slot: usize,
}

#[derive(Component)]
struct DockUnitButton {
    unit: UnitId,
}

#[derive(Component)]
struct DockDropButton;

#[derive(Component)]
struct InboundLaneButton;

#[derive(Component)]
struct MarketRowButton {
    good: Good,
}

#[derive(Component)]
struct MarketRowText {
    good: Good,
}

#[derive(Component)]
struct UnloadAllButton;

#[derive(Component)]
struct QuantityPromptDialog;

#[derive(Component)]
struct QuantityValueText;

#[derive(Component)]
struct QuantityAdjustButton {
    delta: i32,
}

#[derive(Component)]
struct QuantityOkButton;

#[derive(Component)]
struct QuantityCancelButton;

/// The armed half of a pick-up/drop pair, if any.
#[derive(Resource, Default)]
struct PendingPickup {
    source: Option<DragSource>,
}

/// Working value of the open quantity prompt.
#[derive(Resource, Default)]
struct PromptValue {
    value: u32,
}

pub struct HarborUIPlugin;

impl Plugin for HarborUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingPickup>()
            .init_resource::<PromptValue>()
            .add_systems(Startup, setup_harbor_screen)
            .add_systems(
                Update,
                (
                    rebuild_ship_list,
                    rebuild_cargo_box,
                    rebuild_dock_panel,
                    update_market_rows,
                    update_treasury_text,
                    update_turn_text,
                    update_pickup_text,
                    sync_quantity_prompt,
                    update_quantity_value_text,
                ),
            );
    }
}

fn label(text: impl Into<String>, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::srgb(0.92, 0.9, 0.82)),
    )
}

fn panel_node() -> Node {
    Node {
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(4.0),
        padding: UiRect::all(Val::Px(8.0)),
        min_width: Val::Px(220.0),
        ..default()
    }
}

fn setup_harbor_screen(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                padding: UiRect::all(Val::Px(16.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.06, 0.09, 1.0)),
            HarborScreen,
        ))
        .with_children(|parent| {
            parent.spawn(label("Old World Harbor", 28.0));

            // Status line
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(24.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((label("Turn: 1", 16.0), TurnText));
                    row.spawn((label("Treasury: $0", 16.0), TreasuryText));
                    row.spawn((label("", 16.0), PickupText));
                    row.spawn(label("(space ends the turn)", 13.0));
                });

            // Main panels
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|main| {
                    // Ships + high seas
                    main.spawn((
                        panel_node(),
                        BackgroundColor(Color::srgba(0.09, 0.1, 0.14, 0.9)),
                    ))
                    .with_children(|panel| {
                        panel.spawn(label("Ships", 18.0));
                        panel.spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(3.0),
                                ..default()
                            },
                            ShipList,
                        ));
                        panel
                            .spawn((
                                Button,
                                OldButton,
                                button_node(),
                                BackgroundColor(NORMAL_BUTTON),
                                InboundLaneButton,
                            ))
                            .observe(inbound_lane_clicked)
                            .with_children(|b| {
                                b.spawn(label("Harbor approach (drop returning ships)", 13.0));
                            });
                    });

                    // Active ship's cargo
                    main.spawn((
                        panel_node(),
                        BackgroundColor(Color::srgba(0.09, 0.1, 0.14, 0.9)),
                    ))
                    .with_children(|panel| {
                        panel.spawn(label("Cargo", 18.0));
                        panel.spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(3.0),
                                ..default()
                            },
                            CargoBox,
                        ));
                        panel
                            .spawn((
                                Button,
                                OldButton,
                                button_node(),
                                BackgroundColor(NORMAL_ACCENT),
                                AccentButton,
                                UnloadAllButton,
                            ))
                            .observe(unload_all_clicked)
                            .with_children(|b| {
                                b.spawn(label("Unload everything", 13.0));
                            });
                    });

                    // Dock
                    main.spawn((
                        panel_node(),
                        BackgroundColor(Color::srgba(0.09, 0.1, 0.14, 0.9)),
                    ))
                    .with_children(|panel| {
                        panel.spawn(label("Dock", 18.0));
                        panel.spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(3.0),
                                ..default()
                            },
                            DockPanel,
                        ));
                    });

                    // Market
                    main.spawn((
                        panel_node(),
                        BackgroundColor(Color::srgba(0.09, 0.1, 0.14, 0.9)),
                    ))
                    .with_children(|panel| {
                        panel.spawn(label("Market", 18.0));
                        for &good in MARKET_GOODS {
                            panel
                                .spawn((
                                    Button,
                                    OldButton,
                                    Node {
                                        padding: UiRect::all(Val::Px(3.0)),
                                        ..default()
                                    },
                                    BackgroundColor(NORMAL_BUTTON),
                                    MarketRowButton { good },
                                ))
                                .observe(market_row_clicked)
                                .with_children(|row| {
                                    row.spawn((label("", 13.0), MarketRowText { good }));
                                });
                        }
                    });
                });
        });
}

fn clear_children_recursive(entity: Entity, commands: &mut Commands, children: &Query<&Children>) {
    if let Ok(child_list) = children.get(entity) {
        for child in child_list.iter() {
            clear_children_recursive(child, commands, children);
            commands.entity(child).despawn();
        }
    }
}

fn describe_location(location: &ShipLocation) -> String {
    match location {
        ShipLocation::InPort => "in port".to_string(),
        ShipLocation::Outbound { turns_left } => {
            format!("outbound, {turns_left} turns")
        }
        ShipLocation::Inbound { turns_left } => {
            format!("inbound, {turns_left} turns")
        }
    }
}

fn rebuild_ship_list(
    mut commands: Commands,
    fleet: Res<Fleet>,
    selection: Res<HarborSelection>,
    list: Query<Entity, With<ShipList>>,
    children: Query<&Children>,
) {
    if !fleet.is_changed() && !selection.is_changed() {
        return;
    }
    let Ok(list) = list.single() else {
        return;
    };
    clear_children_recursive(list, &mut commands, &children);
    for (id, ship) in fleet.iter() {
        let marker = if selection.ship == Some(id) { "> " } else { "  " };
        let text = format!(
            "{}{} {:?}: {}",
            marker,
            ship.kind,
            id,
            describe_location(&ship.location)
        );
        commands.entity(list).with_children(|parent| {
            parent
                .spawn((
                    Button,
                    OldButton,
                    Node {
                        padding: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(NORMAL_BUTTON),
                    ShipRowButton { ship: id },
                ))
                .observe(ship_row_clicked)
                .with_children(|b| {
                    b.spawn(label(text.clone(), 13.0));
                });
        });
    }
}

fn describe_slot(slot: &CargoSlot, registry: &UnitRegistry) -> String {
    match slot {
        CargoSlot::Empty => "empty".to_string(),
        CargoSlot::Unit { unit } => match registry.get(*unit) {
            Some(u) => format!("{}", u.kind),
            None => format!("{unit:?}"),
        },
        CargoSlot::Goods { good, quantity } => format!("{quantity} {good}"),
    }
}

fn rebuild_cargo_box(
    mut commands: Commands,
    fleet: Res<Fleet>,
    selection: Res<HarborSelection>,
    registry: Res<UnitRegistry>,
    cargo_box: Query<Entity, With<CargoBox>>,
    children: Query<&Children>,
) {
    if !fleet.is_changed() && !selection.is_changed() {
        return;
    }
    let Ok(cargo_box) = cargo_box.single() else {
        return;
    };
    clear_children_recursive(cargo_box, &mut commands, &children);
    let Some(ship_id) = selection.ship else {
        commands.entity(cargo_box).with_children(|parent| {
            parent.spawn(label("no ship selected", 13.0));
        });
        return;
    };
    let Some(ship) = fleet.get(ship_id) else {
        return;
    };
    for (slot, content) in ship.hold.slots() {
        let text = format!("slot {}: {}", slot, describe_slot(content, &registry));
        commands.entity(cargo_box).with_children(|parent| {
            parent
                .spawn((
                    Button,
                    OldButton,
                    Node {
                        padding: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(NORMAL_BUTTON),
                    CargoSlotButton { ship: ship_id, slot },
                ))
                .observe(cargo_slot_clicked)
                .with_children(|b| {
                    b.spawn(label(text.clone(), 13.0));
                });
        });
    }
}

fn rebuild_dock_panel(
    mut commands: Commands,
    dock: Res<DockRoster>,
    registry: Res<UnitRegistry>,
    panel: Query<Entity, With<DockPanel>>,
    children: Query<&Children>,
) {
    if !dock.is_changed() {
        return;
    }
    let Ok(panel) = panel.single() else {
        return;
    };
    clear_children_recursive(panel, &mut commands, &children);
    commands.entity(panel).with_children(|parent| {
        parent
            .spawn((
                Button,
                OldButton,
                button_node(),
                BackgroundColor(NORMAL_BUTTON),
                DockDropButton,
            ))
            .observe(dock_drop_clicked)
            .with_children(|b| {
                b.spawn(label("Walkway (drop units here)", 13.0));
            });
    });
    for unit in dock.iter() {
        let text = match registry.get(unit) {
            Some(u) => format!("{}", u.kind),
            None => format!("{unit:?}"),
        };
        commands.entity(panel).with_children(|parent| {
            parent
                .spawn((
                    Button,
                    OldButton,
                    Node {
                        padding: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(NORMAL_BUTTON),
                    DockUnitButton { unit },
                ))
                .observe(dock_unit_clicked)
                .with_children(|b| {
                    b.spawn(label(text.clone(), 13.0));
                });
        });
    }
}

fn update_market_rows(
    market: Res<Market>,
    mut texts: Query<(&mut Text, &MarketRowText)>,
    new_texts: Query<Entity, Added<MarketRowText>>,
) {
    if !market.is_changed() && new_texts.is_empty() {
        return;
    }
    for (mut text, row) in texts.iter_mut() {
        let entry = market.entry(row.good);
        let boycott = if entry.boycott { "  [boycott]" } else { "" };
        text.0 = format!("{}  {} / {}{}", row.good, entry.bid, entry.ask, boycott);
    }
}

fn update_treasury_text(
    treasury: Res<Treasury>,
    mut texts: Query<&mut Text, With<TreasuryText>>,
) {
    if !treasury.is_changed() {
        return;
    }
    for mut text in texts.iter_mut() {
        text.0 = format!("Treasury: ${}", treasury.gold());
    }
}

fn update_turn_text(counter: Res<TurnCounter>, mut texts: Query<&mut Text, With<TurnText>>) {
    if !counter.is_changed() {
        return;
    }
    for mut text in texts.iter_mut() {
        text.0 = format!("Turn: {}", counter.current);
    }
}

fn update_pickup_text(
    pickup: Res<PendingPickup>,
    mut texts: Query<&mut Text, With<PickupText>>,
) {
    if !pickup.is_changed() {
        return;
    }
    for mut text in texts.iter_mut() {
        text.0 = match &pickup.source {
            Some(source) => format!("carrying {source:?}"),
            None => String::new(),
        };
    }
}

// ---------------------------------------------------------------------------
// Click handling: first click arms a pickup, second click drops it.
// ---------------------------------------------------------------------------

fn cargo_slot_clicked(
    trigger: On<Activate>,
    buttons: Query<&CargoSlotButton>,
    fleet: Res<Fleet>,
    mut pickup: ResMut<PendingPickup>,
    mut drops: MessageWriter<DropRequested>,
) {
    let Ok(button) = buttons.get(trigger.event().entity) else {
        return;
    };
    match pickup.source.take() {
        Some(source) => {
            drops.write(DropRequested {
                source,
                target: DragTarget::CargoSlot {
                    ship: button.ship,
                    slot: button.slot,
                },
            });
        }
        None => {
            let occupied = fleet
                .get(button.ship)
                .and_then(|ship| ship.hold.item_at(button.slot))
                .is_some();
            if occupied {
                pickup.source = Some(DragSource::CargoSlot {
                    ship: button.ship,
                    slot: button.slot,
                });
            }
        }
    }
}

fn dock_unit_clicked(
    trigger: On<Activate>,
    buttons: Query<&DockUnitButton>,
    mut pickup: ResMut<PendingPickup>,
) {
    let Ok(button) = buttons.get(trigger.event().entity) else {
        return;
    };
    if pickup.source.is_none() {
        pickup.source = Some(DragSource::Dock { unit: button.unit });
    }
}

fn dock_drop_clicked(
    _trigger: On<Activate>,
    mut pickup: ResMut<PendingPickup>,
    mut drops: MessageWriter<DropRequested>,
) {
    if let Some(source) = pickup.source.take() {
        drops.write(DropRequested {
            source,
            target: DragTarget::Dock,
        });
    }
}

fn market_row_clicked(
    trigger: On<Activate>,
    buttons: Query<&MarketRowButton>,
    market: Res<Market>,
    mut pickup: ResMut<PendingPickup>,
    mut drops: MessageWriter<DropRequested>,
) {
    let Ok(button) = buttons.get(trigger.event().entity) else {
        return;
    };
    match pickup.source.take() {
        Some(source) => {
            drops.write(DropRequested {
                source,
                target: DragTarget::Market,
            });
        }
        None => {
            // Boycott enforcement: an embargoed good is never offered as a
            // drag source in the first place.
            if market.is_boycotted(button.good) {
                info!(
                    "{} is under boycott; parliament must lift it before trading resumes",
                    button.good
                );
                return;
            }
            pickup.source = Some(DragSource::Market { good: button.good });
        }
    }
}

fn ship_row_clicked(
    trigger: On<Activate>,
    buttons: Query<&ShipRowButton>,
    fleet: Res<Fleet>,
    mut selection: ResMut<HarborSelection>,
    mut pickup: ResMut<PendingPickup>,
    mut drops: MessageWriter<DropRequested>,
) {
    let Ok(button) = buttons.get(trigger.event().entity) else {
        return;
    };
    let Some(ship) = fleet.get(button.ship) else {
        return;
    };
    match pickup.source.take() {
        Some(source) => {
            drops.write(DropRequested {
                source,
                target: DragTarget::InPortShip { ship: button.ship },
            });
        }
        None => match ship.location {
            ShipLocation::InPort => {
                selection.ship = Some(button.ship);
            }
            ShipLocation::Outbound { .. } => {
                pickup.source = Some(DragSource::Outbound { ship: button.ship });
            }
            ShipLocation::Inbound { .. } => {
                pickup.source = Some(DragSource::Inbound { ship: button.ship });
            }
        },
    }
}

fn inbound_lane_clicked(
    _trigger: On<Activate>,
    mut pickup: ResMut<PendingPickup>,
    mut drops: MessageWriter<DropRequested>,
) {
    if let Some(source) = pickup.source.take() {
        drops.write(DropRequested {
            source,
            target: DragTarget::Inbound,
        });
    }
}

fn unload_all_clicked(
    _trigger: On<Activate>,
    selection: Res<HarborSelection>,
    mut unloads: MessageWriter<UnloadAll>,
) {
    if let Some(ship) = selection.ship {
        unloads.write(UnloadAll { ship });
    }
}

// ---------------------------------------------------------------------------
// Quantity prompt dialog
// ---------------------------------------------------------------------------

fn sync_quantity_prompt(
    mut commands: Commands,
    session: Res<TransferSession>,
    mut value: ResMut<PromptValue>,
    dialogs: Query<Entity, With<QuantityPromptDialog>>,
) {
    if !session.is_changed() {
        return;
    }
    match *session {
        TransferSession::AwaitingQuantity { request, .. } => {
            if !dialogs.is_empty() {
                return;
            }
            value.value = request.initial.clamp(request.min, request.max);
            spawn_quantity_prompt(&mut commands, request.prompt_text());
        }
        TransferSession::Idle => {
            for dialog in dialogs.iter() {
                commands.entity(dialog).despawn();
            }
        }
    }
}

fn spawn_quantity_prompt(commands: &mut Commands, prompt: String) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(25.0),
                right: Val::Percent(25.0),
                top: Val::Percent(35.0),
                padding: UiRect::all(Val::Px(16.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.12, 0.12, 0.16, 0.98)),
            QuantityPromptDialog,
        ))
        .with_children(|dialog| {
            dialog.spawn(label(prompt, 16.0));
            dialog.spawn((label("0", 22.0), QuantityValueText));
            dialog
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|row| {
                    for delta in [-10i32, -1, 1, 10] {
                        let caption = if delta > 0 {
                            format!("+{delta}")
                        } else {
                            format!("{delta}")
                        };
                        row.spawn((
                            Button,
                            OldButton,
                            button_node(),
                            BackgroundColor(NORMAL_BUTTON),
                            QuantityAdjustButton { delta },
                        ))
                        .observe(quantity_adjust_clicked)
                        .with_children(|b| {
                            b.spawn(label(caption.clone(), 14.0));
                        });
                    }
                });
            dialog
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Button,
                        OldButton,
                        button_node(),
                        BackgroundColor(NORMAL_ACCENT),
                        AccentButton,
                        QuantityOkButton,
                    ))
                    .observe(quantity_ok_clicked)
                    .with_children(|b| {
                        b.spawn(label("OK", 14.0));
                    });
                    row.spawn((
                        Button,
                        OldButton,
                        button_node(),
                        BackgroundColor(NORMAL_DANGER),
                        DangerButton,
                        QuantityCancelButton,
                    ))
                    .observe(quantity_cancel_clicked)
                    .with_children(|b| {
                        b.spawn(label("Cancel", 14.0));
                    });
                });
        });
}

fn quantity_adjust_clicked(
    trigger: On<Activate>,
    buttons: Query<&QuantityAdjustButton>,
    session: Res<TransferSession>,
    mut value: ResMut<PromptValue>,
) {
    let Ok(button) = buttons.get(trigger.event().entity) else {
        return;
    };
    let TransferSession::AwaitingQuantity { request, .. } = *session else {
        return;
    };
    let adjusted = value.value as i64 + button.delta as i64;
    value.value = adjusted.clamp(request.min as i64, request.max as i64) as u32;
}

fn quantity_ok_clicked(
    _trigger: On<Activate>,
    value: Res<PromptValue>,
    mut submissions: MessageWriter<QuantitySubmitted>,
) {
    submissions.write(QuantitySubmitted { value: value.value });
}

fn quantity_cancel_clicked(
    _trigger: On<Activate>,
    mut cancellations: MessageWriter<QuantityCancelled>,
) {
    cancellations.write(QuantityCancelled);
}

fn update_quantity_value_text(
    value: Res<PromptValue>,
    mut texts: Query<&mut Text, With<QuantityValueText>>,
    new_texts: Query<Entity, Added<QuantityValueText>>,
) {
    if !value.is_changed() && new_texts.is_empty() {
        return;
    }
    for mut text in texts.iter_mut() {
        text.0 = format!("{}", value.value);
    }
}
