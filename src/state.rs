// src/state.rs
use std::fmt;

use crate::errors::TowerError;

/// Every state the game engine can be in. The engine holds exactly one of
/// these at any time; there is no "no state".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Possible error or misconfiguration; nothing should ever set this
    /// deliberately.
    Unknown,
    /// Before any subsystem is configured.
    Initializing,
    /// Display, audio and assets are up.
    Initialized,
    /// Map editing mode.
    MapEditing,
    /// Active play mode.
    GamePlaying,
    /// Main menu.
    MainMenu,
    /// Game-ended screen.
    GameEnded,
    /// The engine is exiting and unwinding. Terminal.
    Quitting,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GameState::Unknown => "unknown",
            GameState::Initializing => "initializing",
            GameState::Initialized => "initialized",
            GameState::MapEditing => "map_editing",
            GameState::GamePlaying => "game_playing",
            GameState::MainMenu => "main_menu",
            GameState::GameEnded => "game_ended",
            GameState::Quitting => "quitting",
        };
        write!(f, "{}", name)
    }
}

/// The authoritative state cell. Lives and dies with the game context that
/// owns it; there is no ambient global.
///
/// Two primitives: an unchecked `set_state` and a checked `assert_state_is`.
/// Legality of a transition is the caller's responsibility via the assert
/// guard, not the machine's. The one exception is `Quitting`: it is terminal,
/// so writes after it are dropped.
#[derive(Debug)]
pub struct StateMachine {
    current: GameState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: GameState::Initializing,
        }
    }

    pub fn current_state(&self) -> GameState {
        self.current
    }

    /// Overwrites the current state without validation. Once `Quitting` is
    /// reached the machine is frozen and further writes are ignored.
    pub fn set_state(&mut self, new_state: GameState) {
        if self.current == GameState::Quitting {
            log::debug!("ignoring state change to {} after quitting", new_state);
            return;
        }
        log::debug!("game state: {} -> {}", self.current, new_state);
        self.current = new_state;
    }

    /// Precondition guard: errors unless the current state is one of
    /// `expected`.
    pub fn assert_state_is(&self, expected: &[GameState]) -> Result<(), TowerError> {
        if expected.contains(&self.current) {
            Ok(())
        } else {
            Err(TowerError::state(expected, self.current))
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_initializing() {
        let machine = StateMachine::new();
        assert_eq!(machine.current_state(), GameState::Initializing);
    }

    #[test]
    fn set_state_overwrites() {
        let mut machine = StateMachine::new();
        machine.set_state(GameState::Initialized);
        assert_eq!(machine.current_state(), GameState::Initialized);
        machine.set_state(GameState::MainMenu);
        assert_eq!(machine.current_state(), GameState::MainMenu);
    }

    #[test]
    fn quitting_is_terminal() {
        let mut machine = StateMachine::new();
        machine.set_state(GameState::Quitting);
        machine.set_state(GameState::MainMenu);
        assert_eq!(machine.current_state(), GameState::Quitting);
    }

    #[test]
    fn assert_accepts_member() {
        let machine = StateMachine::new();
        assert!(machine
            .assert_state_is(&[GameState::Initializing, GameState::Initialized])
            .is_ok());
    }

    #[test]
    fn assert_rejects_non_member() {
        let machine = StateMachine::new();
        let err = machine
            .assert_state_is(&[GameState::Initialized])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("initialized"), "{}", msg);
        assert!(msg.contains("initializing"), "{}", msg);
    }
}
