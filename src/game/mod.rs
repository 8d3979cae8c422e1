// src/game/mod.rs
use crate::clock::FrameClock;
use crate::errors::TowerError;
use crate::events::GameEvent;
use crate::loops::{GameLoop, SubLoops};
use crate::platform::{Platform, ScreenConfig};
use crate::state::{GameState, StateMachine};

/// The long-lived owner shared by the top-level loop and every sub-loop:
/// the state machine, the platform handle and the frame clock. Sub-loops
/// borrow it per call and request transitions through `set_state`.
pub struct GameContext<P: Platform> {
    state: StateMachine,
    platform: P,
    screen: ScreenConfig,
    clock: FrameClock,
}

impl<P: Platform> GameContext<P> {
    pub fn new(platform: P, screen: ScreenConfig) -> Self {
        Self {
            state: StateMachine::new(),
            platform,
            screen,
            clock: FrameClock::default(),
        }
    }

    pub fn current_state(&self) -> GameState {
        self.state.current_state()
    }

    pub fn set_state(&mut self, new_state: GameState) {
        self.state.set_state(new_state);
    }

    pub fn assert_state_is(&self, expected: &[GameState]) -> Result<(), TowerError> {
        self.state.assert_state_is(expected)
    }

    pub fn poll_events(&mut self) -> Vec<GameEvent> {
        self.platform.poll_events()
    }

    /// Frame-rate throttle, called once per loop iteration.
    pub fn tick(&mut self) {
        self.clock.tick();
    }

    pub fn screen(&self) -> ScreenConfig {
        self.screen
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

/// The top-level game object: owns the context and the sub-loops, and
/// drives the initialize -> run -> teardown lifecycle. Not restartable;
/// build a fresh one for a new run.
pub struct TowerGame<P: Platform> {
    ctx: GameContext<P>,
    loops: Option<SubLoops>,
}

impl<P: Platform> TowerGame<P> {
    /// A game in the `initializing` state with no subsystems up yet.
    pub fn new(platform: P, screen: ScreenConfig) -> Self {
        Self {
            ctx: GameContext::new(platform, screen),
            loops: None,
        }
    }

    /// Convenience constructor: build and initialize in one step.
    pub fn create(platform: P, fullscreen: bool) -> Result<Self, TowerError> {
        let screen = if fullscreen {
            ScreenConfig::fullscreen()
        } else {
            ScreenConfig::windowed()
        };
        let mut game = Self::new(platform, screen);
        game.initialize()?;
        Ok(game)
    }

    /// Brings up the platform subsystems and the sub-loops, then moves to
    /// `initialized`. Legal only from `initializing`.
    pub fn initialize(&mut self) -> Result<(), TowerError> {
        self.ctx.assert_state_is(&[GameState::Initializing])?;
        log::info!("initializing subsystems");
        let screen = self.ctx.screen;
        self.ctx.platform.init_subsystems(&screen)?;
        self.loops = Some(SubLoops::default());
        self.ctx.set_state(GameState::Initialized);
        Ok(())
    }

    /// Enters the main menu and dispatches to sub-loops until the state
    /// machine reaches `quitting`, then tears the platform down. Legal only
    /// from `initialized`.
    pub fn run(&mut self) -> Result<(), TowerError> {
        self.ctx.assert_state_is(&[GameState::Initialized])?;
        self.ctx.set_state(GameState::MainMenu);
        log::info!("entering main loop");

        let loops = self.loops.get_or_insert_with(SubLoops::default);
        while self.ctx.current_state() != GameState::Quitting {
            let state = self.ctx.current_state();
            match loops.for_state::<P>(state) {
                Some(active) => active.run(&mut self.ctx),
                None => Self::idle(&mut self.ctx, state),
            }
        }

        self.ctx.platform.teardown();
        log::info!("main loop finished");
        Ok(())
    }

    /// One iteration for states that have no sub-loop yet. Still drains the
    /// event queue and applies the universal quit rule, so a quit signal
    /// always ends the run instead of the process spinning forever.
    fn idle(ctx: &mut GameContext<P>, state: GameState) {
        log::debug!("no sub-loop for {}, idling", state);
        for event in ctx.poll_events() {
            if event.requests_quit() {
                ctx.set_state(GameState::Quitting);
            }
        }
        ctx.tick();
    }

    pub fn current_state(&self) -> GameState {
        self.ctx.current_state()
    }

    pub fn context(&self) -> &GameContext<P> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext<P> {
        &mut self.ctx
    }

    /// The sub-loops, present once `initialize()` has run.
    pub fn sub_loops(&self) -> Option<&SubLoops> {
        self.loops.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scripted::ScriptedPlatform;
    use winit::event::VirtualKeyCode;

    fn windowed_game(batches: Vec<Vec<GameEvent>>) -> TowerGame<ScriptedPlatform> {
        TowerGame::new(ScriptedPlatform::new(batches), ScreenConfig::windowed())
    }

    #[test]
    fn initialize_fails_from_every_other_state() {
        let others = [
            GameState::Unknown,
            GameState::Initialized,
            GameState::MapEditing,
            GameState::GamePlaying,
            GameState::MainMenu,
            GameState::GameEnded,
            GameState::Quitting,
        ];
        for state in others {
            let mut game = windowed_game(Vec::new());
            game.context_mut().set_state(state);
            let result = game.initialize();
            assert!(
                matches!(result, Err(TowerError::State { .. })),
                "initialize() should fail from {}",
                state
            );
        }
    }

    #[test]
    fn run_before_initialize_names_both_states() {
        let mut game = windowed_game(Vec::new());
        match game.run() {
            Err(TowerError::State { expected, actual }) => {
                assert_eq!(expected, vec![GameState::Initialized]);
                assert_eq!(actual, GameState::Initializing);
            }
            other => panic!("expected a state error, got {:?}", other),
        }
    }

    #[test]
    fn run_fails_from_any_state_but_initialized() {
        for state in [GameState::MainMenu, GameState::GameEnded, GameState::Unknown] {
            let mut game = windowed_game(Vec::new());
            game.context_mut().set_state(state);
            assert!(matches!(game.run(), Err(TowerError::State { .. })));
        }
    }

    #[test]
    fn initialize_brings_up_subsystems_and_sub_loops() {
        let mut game = windowed_game(Vec::new());
        assert!(game.sub_loops().is_none());

        game.initialize().unwrap();

        assert_eq!(game.current_state(), GameState::Initialized);
        assert!(game.sub_loops().is_some());
        assert_eq!(game.context().platform().init_calls, 1);
    }

    #[test]
    fn windowed_quit_scenario() {
        // create -> initialize -> run; a quit event during the menu loop
        // ends the run cleanly.
        let platform = ScriptedPlatform::new(vec![
            vec![GameEvent::KeyDown(VirtualKeyCode::Down)],
            vec![GameEvent::Quit],
        ]);
        let mut game = TowerGame::create(platform, false).unwrap();
        assert_eq!(game.current_state(), GameState::Initialized);
        assert!(!game.context().screen().fullscreen);

        game.run().unwrap();

        assert_eq!(game.current_state(), GameState::Quitting);
        assert_eq!(game.context().platform().teardown_calls, 1);
    }

    #[test]
    fn escape_key_ends_the_run_like_quit() {
        let platform =
            ScriptedPlatform::new(vec![vec![GameEvent::KeyDown(VirtualKeyCode::Escape)]]);
        let mut game = TowerGame::create(platform, false).unwrap();
        game.run().unwrap();
        assert_eq!(game.current_state(), GameState::Quitting);
    }

    #[test]
    fn idle_branch_honours_the_quit_rule() {
        // A state with no sub-loop must not swallow quit signals.
        let mut ctx = GameContext::new(
            ScriptedPlatform::new(vec![vec![GameEvent::Quit]]),
            ScreenConfig::windowed(),
        );
        ctx.set_state(GameState::GameEnded);

        TowerGame::idle(&mut ctx, GameState::GameEnded);

        assert_eq!(ctx.current_state(), GameState::Quitting);
    }

    #[test]
    fn run_is_not_restartable() {
        let platform = ScriptedPlatform::new(vec![vec![GameEvent::Quit]]);
        let mut game = TowerGame::create(platform, false).unwrap();
        game.run().unwrap();
        // A second run is a precondition violation: the machine is frozen
        // at quitting.
        assert!(matches!(game.run(), Err(TowerError::State { .. })));
    }

    #[test]
    fn subsystem_failure_leaves_the_game_uninitialized() {
        struct FailingPlatform;
        impl Platform for FailingPlatform {
            fn init_subsystems(&mut self, _screen: &ScreenConfig) -> Result<(), TowerError> {
                Err(TowerError::SubsystemInit("no display".into()))
            }
            fn poll_events(&mut self) -> Vec<GameEvent> {
                Vec::new()
            }
            fn teardown(&mut self) {}
        }

        let mut game = TowerGame::new(FailingPlatform, ScreenConfig::windowed());
        assert!(matches!(
            game.initialize(),
            Err(TowerError::SubsystemInit(_))
        ));
        assert_eq!(game.current_state(), GameState::Initializing);
        assert!(game.sub_loops().is_none());
    }
}
