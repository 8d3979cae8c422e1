// src/loops/mod.rs
//
// The sub-loop abstraction. Each active game state is served by one loop
// variant; the variant runs until something (an event handler or the
// universal quit rule) moves the shared state elsewhere, then control
// returns to the top-level dispatch in `TowerGame::run`.
use crate::events::GameEvent;
use crate::game::GameContext;
use crate::platform::Platform;
use crate::state::GameState;

/// One cooperating sub-loop. Loops never own the game context; they borrow
/// it per call, so the context outlives every loop it dispatches to.
pub trait GameLoop<P: Platform> {
    /// The state this loop serves. `run` keeps going exactly as long as the
    /// shared state equals this value.
    fn home_state(&self) -> GameState;

    /// Per-event extension point. The default does nothing; the universal
    /// quit rule has already been applied by the time this is called.
    fn handle_event(&mut self, _ctx: &mut GameContext<P>, _event: &GameEvent) {}

    /// Drives this loop until the shared state leaves `home_state()`. Every
    /// pending event is processed in arrival order: quit rule first, then
    /// `handle_event`. Without the quit rule the window would hang, since
    /// nothing else drains the platform's event queue.
    fn run(&mut self, ctx: &mut GameContext<P>) {
        log::debug!("entering {} loop", self.home_state());
        while ctx.current_state() == self.home_state() {
            for event in ctx.poll_events() {
                if event.requests_quit() {
                    ctx.set_state(GameState::Quitting);
                }
                self.handle_event(ctx, &event);
            }
            ctx.tick();
        }
        log::debug!("leaving {} loop", self.home_state());
    }
}

/// Main menu. Selection handling lands in `handle_event` later.
#[derive(Debug, Default)]
pub struct MenuLoop;

impl<P: Platform> GameLoop<P> for MenuLoop {
    fn home_state(&self) -> GameState {
        GameState::MainMenu
    }
}

/// Map editing mode. Tile placement lands in `handle_event` later.
#[derive(Debug, Default)]
pub struct EditingLoop;

impl<P: Platform> GameLoop<P> for EditingLoop {
    fn home_state(&self) -> GameState {
        GameState::MapEditing
    }
}

/// Active play.
#[derive(Debug, Default)]
pub struct PlayLoop;

impl<P: Platform> GameLoop<P> for PlayLoop {
    fn home_state(&self) -> GameState {
        GameState::GamePlaying
    }
}

/// The full set of sub-loops, constructed together once the game context is
/// initialized.
#[derive(Debug, Default)]
pub struct SubLoops {
    pub menu: MenuLoop,
    pub editing: EditingLoop,
    pub playing: PlayLoop,
}

impl SubLoops {
    /// Enum-keyed dispatch: which loop serves `state`, if any. States with
    /// no loop (unknown, game_ended, the lifecycle states) return `None`
    /// and are handled by the top-level idle branch.
    pub fn for_state<P: Platform>(&mut self, state: GameState) -> Option<&mut dyn GameLoop<P>> {
        match state {
            GameState::MainMenu => Some(&mut self.menu),
            GameState::MapEditing => Some(&mut self.editing),
            GameState::GamePlaying => Some(&mut self.playing),
            _ => None,
        }
    }
}
