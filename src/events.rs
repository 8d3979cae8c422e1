// src/events.rs
use winit::event::VirtualKeyCode;

/// A platform input event, translated from the window system into the small
/// tagged set the game loops care about. Each poll yields an ordered, finite
/// batch of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The window system asked us to close.
    Quit,
    KeyDown(VirtualKeyCode),
    KeyUp(VirtualKeyCode),
    Resized(u32, u32),
}

impl GameEvent {
    /// The universal quit rule: a close request or an Escape press maps to
    /// the quitting transition no matter which loop is active.
    pub fn requests_quit(&self) -> bool {
        matches!(
            self,
            GameEvent::Quit | GameEvent::KeyDown(VirtualKeyCode::Escape)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_and_escape_request_quit() {
        assert!(GameEvent::Quit.requests_quit());
        assert!(GameEvent::KeyDown(VirtualKeyCode::Escape).requests_quit());
    }

    #[test]
    fn other_events_do_not() {
        assert!(!GameEvent::KeyDown(VirtualKeyCode::Return).requests_quit());
        assert!(!GameEvent::KeyUp(VirtualKeyCode::Escape).requests_quit());
        assert!(!GameEvent::Resized(800, 800).requests_quit());
    }
}
