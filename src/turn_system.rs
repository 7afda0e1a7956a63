use bevy::prelude::*;

/// Which turn we are on, starting at 1
#[derive(Resource, Debug, Clone)]
pub struct TurnCounter {
    pub current: u32,
}

impl Default for TurnCounter {
    fn default() -> Self {
        TurnCounter { current: 1 }
    }
}

impl TurnCounter {
    pub fn new(current: u32) -> Self {
        TurnCounter { current }
    }

    pub fn increment(&mut self) {
        self.current += 1;
    }
}

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    #[default]
    PlayerTurn,
    Processing,
}

/// Request to end the player's turn and run turn processing
#[derive(Message, Debug, Clone, Copy)]
pub struct EndPlayerTurn;

pub struct TurnSystemPlugin;

impl Plugin for TurnSystemPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<TurnPhase>()
            .init_resource::<TurnCounter>()
            .add_message::<EndPlayerTurn>()
            .add_systems(
                Update,
                (
                    handle_turn_input.run_if(in_state(TurnPhase::PlayerTurn)),
                    end_player_turn.run_if(in_state(TurnPhase::PlayerTurn)),
                    // OnEnter(Processing) systems have already run by the
                    // time this sees the Processing state, so the phase
                    // hands straight back to the player.
                    complete_processing.run_if(in_state(TurnPhase::Processing)),
                ),
            );
    }
}

/// Space ends the player's turn. Input is absent in headless runs.
fn handle_turn_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut end_turn: MessageWriter<EndPlayerTurn>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::Space) {
        end_turn.write(EndPlayerTurn);
    }
}

fn end_player_turn(
    mut requests: MessageReader<EndPlayerTurn>,
    mut next_phase: ResMut<NextState<TurnPhase>>,
) {
    if requests.read().next().is_some() {
        next_phase.set(TurnPhase::Processing);
    }
}

fn complete_processing(
    mut counter: ResMut<TurnCounter>,
    mut next_phase: ResMut<NextState<TurnPhase>>,
) {
    counter.increment();
    info!("=== Turn {} ===", counter.current);
    next_phase.set(TurnPhase::PlayerTurn);
}
