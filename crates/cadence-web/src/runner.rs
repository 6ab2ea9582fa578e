use cadence_engine::{
    DrawingSurface, Engine, EngineError, Game, InputEvent, MouseButton, SurfaceSize, TickReport,
};
use glam::Vec2;

use crate::clock::HostClock;
use crate::surface::CanvasSurface;

/// Runner bound to a `<canvas>`; what `export_game!` stores.
pub type WebRunner<G> = GameRunner<CanvasSurface, G>;

/// Generic game runner that wires the engine to a browser frame loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_game!`](crate::export_game)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<S, G>
where
    S: DrawingSurface,
    G: Game<Device = S::Device>,
{
    engine: Engine<S, G>,
    clock: HostClock,
}

impl<S, G> GameRunner<S, G>
where
    S: DrawingSurface,
    G: Game<Device = S::Device>,
{
    pub fn new(surface: S, game: G) -> Result<Self, EngineError> {
        Ok(Self {
            engine: Engine::new(surface, game)?,
            clock: HostClock::new(),
        })
    }

    /// Initialize the game. Call once after construction.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.engine.run()
    }

    /// Run one animation frame. `now_ms` is the `requestAnimationFrame`
    /// timestamp. Returns `None` while paused.
    pub fn frame(&mut self, now_ms: f64) -> Result<Option<TickReport>, EngineError> {
        if self.clock.is_paused() {
            return Ok(None);
        }
        let (elapsed, total) = self.clock.advance(now_ms);
        self.engine.tick(elapsed, total).map(Some)
    }

    /// Push an input event straight through to the game.
    pub fn push_input(&mut self, event: InputEvent) {
        self.engine.handle_input(event);
    }

    /// `button` is the DOM `MouseEvent.button` code; buttons other than
    /// left (0) and right (2) are ignored.
    pub fn pointer_down(&mut self, button: i16, x: f32, y: f32) {
        if let Some(button) = mouse_button(button) {
            self.push_input(InputEvent::MouseButtonDown { button, pos: Vec2::new(x, y) });
        }
    }

    pub fn pointer_up(&mut self, button: i16, x: f32, y: f32) {
        if let Some(button) = mouse_button(button) {
            self.push_input(InputEvent::MouseButtonUp { button, pos: Vec2::new(x, y) });
        }
    }

    /// `delta_y` follows DOM `WheelEvent.deltaY` (positive scrolls down),
    /// which is flipped so positive means away from the user.
    pub fn wheel(&mut self, delta_y: f32) {
        self.push_input(InputEvent::MouseWheel { delta: -delta_y });
    }

    pub fn pointer_enter(&mut self, x: f32, y: f32) {
        self.push_input(InputEvent::MouseEnter { pos: Vec2::new(x, y) });
    }

    pub fn pointer_leave(&mut self, x: f32, y: f32) {
        self.push_input(InputEvent::MouseLeave { pos: Vec2::new(x, y) });
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.push_input(InputEvent::KeyDown { key_code });
    }

    pub fn key_up(&mut self, key_code: u32) {
        self.push_input(InputEvent::KeyUp { key_code });
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.surface_resized(SurfaceSize::new(width, height));
    }

    /// Stop ticking, e.g. while the page is hidden.
    pub fn pause(&mut self) {
        log::debug!("runner paused");
        self.clock.pause();
    }

    /// Resume ticking without replaying the time spent paused.
    pub fn resume(&mut self) {
        log::debug!("runner resumed");
        self.clock.resume();
        self.engine.reset_elapsed_time();
    }

    pub fn reset_elapsed_time(&mut self) {
        self.engine.reset_elapsed_time();
    }

    pub fn dispose(&mut self) -> Result<(), EngineError> {
        self.engine.dispose()
    }

    pub fn engine(&self) -> &Engine<S, G> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S, G> {
        &mut self.engine
    }
}

fn mouse_button(code: i16) -> Option<MouseButton> {
    match code {
        0 => Some(MouseButton::Left),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}
