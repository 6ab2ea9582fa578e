use glam::Vec2;

use crate::api::game::Game;
use crate::api::types::MouseButton;

/// Raw input events the host forwards to the game.
/// Positions are surface coordinates; there is no device abstraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel rotation; positive is away from the user.
    MouseWheel { delta: f32 },
    /// A mouse button was pressed at `pos`.
    MouseButtonDown { button: MouseButton, pos: Vec2 },
    /// A mouse button was released at `pos`.
    MouseButtonUp { button: MouseButton, pos: Vec2 },
    /// The cursor entered the surface at `pos`.
    MouseEnter { pos: Vec2 },
    /// The cursor left the surface at `pos`.
    MouseLeave { pos: Vec2 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

impl InputEvent {
    /// Forward the event to the matching `Game::on_*` hook.
    pub fn dispatch<G: Game + ?Sized>(self, game: &mut G) {
        match self {
            InputEvent::MouseWheel { delta } => game.on_mouse_wheel(delta),
            InputEvent::MouseButtonDown { button: MouseButton::Left, pos } => {
                game.on_mouse_left_button_down(pos)
            }
            InputEvent::MouseButtonDown { button: MouseButton::Right, pos } => {
                game.on_mouse_right_button_down(pos)
            }
            InputEvent::MouseButtonUp { button: MouseButton::Left, pos } => {
                game.on_mouse_left_button_up(pos)
            }
            InputEvent::MouseButtonUp { button: MouseButton::Right, pos } => {
                game.on_mouse_right_button_up(pos)
            }
            InputEvent::MouseEnter { pos } => game.on_mouse_enter(pos),
            InputEvent::MouseLeave { pos } => game.on_mouse_leave(pos),
            InputEvent::KeyDown { key_code } => game.on_key_down(key_code),
            InputEvent::KeyUp { key_code } => game.on_key_up(key_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::EngineContext;
    use crate::api::state::UpdateState;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<&'static str>,
        last_pos: Option<Vec2>,
        last_key: Option<u32>,
    }

    impl Game for Recorder {
        type Device = ();

        fn update(&mut self, _ctx: &mut EngineContext, _state: &UpdateState) -> anyhow::Result<()> {
            Ok(())
        }

        fn on_mouse_wheel(&mut self, _delta: f32) {
            self.seen.push("wheel");
        }

        fn on_mouse_left_button_down(&mut self, pos: Vec2) {
            self.seen.push("left_down");
            self.last_pos = Some(pos);
        }

        fn on_mouse_left_button_up(&mut self, _pos: Vec2) {
            self.seen.push("left_up");
        }

        fn on_mouse_right_button_down(&mut self, _pos: Vec2) {
            self.seen.push("right_down");
        }

        fn on_mouse_right_button_up(&mut self, pos: Vec2) {
            self.seen.push("right_up");
            self.last_pos = Some(pos);
        }

        fn on_mouse_enter(&mut self, _pos: Vec2) {
            self.seen.push("enter");
        }

        fn on_mouse_leave(&mut self, _pos: Vec2) {
            self.seen.push("leave");
        }

        fn on_key_down(&mut self, key_code: u32) {
            self.seen.push("key_down");
            self.last_key = Some(key_code);
        }

        fn on_key_up(&mut self, _key_code: u32) {
            self.seen.push("key_up");
        }
    }

    #[test]
    fn each_event_reaches_its_hook() {
        let mut game = Recorder::default();
        let pos = Vec2::new(10.0, 20.0);
        let events = [
            InputEvent::MouseWheel { delta: 120.0 },
            InputEvent::MouseButtonDown { button: MouseButton::Left, pos },
            InputEvent::MouseButtonUp { button: MouseButton::Left, pos },
            InputEvent::MouseButtonDown { button: MouseButton::Right, pos },
            InputEvent::MouseButtonUp { button: MouseButton::Right, pos: Vec2::ONE },
            InputEvent::MouseEnter { pos },
            InputEvent::MouseLeave { pos },
            InputEvent::KeyDown { key_code: 32 },
            InputEvent::KeyUp { key_code: 32 },
        ];
        for event in events {
            event.dispatch(&mut game);
        }
        assert_eq!(
            game.seen,
            [
                "wheel", "left_down", "left_up", "right_down", "right_up", "enter", "leave",
                "key_down", "key_up",
            ]
        );
        assert_eq!(game.last_pos, Some(Vec2::ONE));
        assert_eq!(game.last_key, Some(32));
    }
}
