use bevy::prelude::*;

/// Standard button color constants following Bevy UI conventions
pub const NORMAL_BUTTON: Color = Color::srgb(0.13, 0.12, 0.10);
pub const HOVERED_BUTTON: Color = Color::srgb(0.24, 0.22, 0.18);
pub const PRESSED_BUTTON: Color = Color::srgb(0.45, 0.38, 0.20);

/// Accent button colors (confirm / primary actions)
pub const NORMAL_ACCENT: Color = Color::srgb(0.16, 0.28, 0.20);
pub const HOVERED_ACCENT: Color = Color::srgb(0.24, 0.42, 0.30);
pub const PRESSED_ACCENT: Color = Color::srgb(0.32, 0.70, 0.38);

/// Danger button colors (cancel / destructive actions)
pub const NORMAL_DANGER: Color = Color::srgb(0.30, 0.14, 0.12);
pub const HOVERED_DANGER: Color = Color::srgb(0.44, 0.19, 0.16);
pub const PRESSED_DANGER: Color = Color::srgb(0.72, 0.32, 0.28);

/// Button style helper for creating consistent button nodes
pub fn button_node() -> Node {
    Node {
        padding: UiRect::all(Val::Px(6.0)),
        ..default()
    }
}

/// Marker component for accent-styled buttons
#[derive(Component)]
pub struct AccentButton;

/// Marker component for danger-styled buttons
#[derive(Component)]
pub struct DangerButton;

/// System that handles button interaction visual feedback for all button types
/// Updates BackgroundColor based on Interaction state and button type markers
pub fn unified_button_interaction_system(
    mut interaction_query: Query<
        (
            &Interaction,
            &mut BackgroundColor,
            Option<&AccentButton>,
            Option<&DangerButton>,
        ),
        Changed<Interaction>,
    >,
) {
    for (interaction, mut color, accent, danger) in interaction_query.iter_mut() {
        let (normal, hovered, pressed) = if accent.is_some() {
            (NORMAL_ACCENT, HOVERED_ACCENT, PRESSED_ACCENT)
        } else if danger.is_some() {
            (NORMAL_DANGER, HOVERED_DANGER, PRESSED_DANGER)
        } else {
            (NORMAL_BUTTON, HOVERED_BUTTON, PRESSED_BUTTON)
        };

        match *interaction {
            Interaction::Pressed => {
                *color = pressed.into();
            }
            Interaction::Hovered => {
                *color = hovered.into();
            }
            Interaction::None => {
                *color = normal.into();
            }
        }
    }
}
