use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::state::{DrawState, UpdateState};
use crate::api::types::SurfaceSize;
use crate::assets::content::ContentManager;
use crate::core::services::ServiceContainer;
use crate::core::ticks::Ticks;
use crate::core::time::{DEFAULT_SLOW_RUN_WINDOW, DEFAULT_TARGET_ELAPSED_TIME};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed step duration in ticks (default: 166 667, ~60 Hz).
    pub target_elapsed_time: Ticks,
    /// Root directory handed to the content manager (default: "Content").
    pub content_root: String,
    /// Ticks after a second catch-up burst that still report running slowly (default: 20).
    pub slow_run_window: u32,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_elapsed_time: DEFAULT_TARGET_ELAPSED_TIME,
            content_root: "Content".to_string(),
            slow_run_window: DEFAULT_SLOW_RUN_WINDOW,
        }
    }
}

/// The contract every game must fulfill.
///
/// The engine calls `initialize` once from `Engine::run`, then `update` zero
/// or more times per tick followed by at most one
/// `begin_draw`/`draw`/`end_draw` sequence. Input hooks are called whenever
/// the host forwards an event.
pub trait Game {
    /// Rendering context of the drawing surface this game is bound to.
    type Device;

    /// Return engine configuration. Called once at construction.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// One-time setup. The default loads content.
    fn initialize(&mut self, ctx: &mut EngineContext) -> anyhow::Result<()> {
        log::info!("loading content");
        self.load_content(ctx)
    }

    fn load_content(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called from `Engine::dispose`.
    fn unload_content(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Advance the simulation by one fixed step.
    fn update(&mut self, ctx: &mut EngineContext, state: &UpdateState) -> anyhow::Result<()>;

    /// Return false to skip this frame's draw (device lost, minimized, ...).
    fn begin_draw(&mut self) -> bool {
        true
    }

    fn draw(&mut self, _state: &DrawState<'_, Self::Device>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called after a successful `draw`.
    fn end_draw(&mut self) {}

    fn on_surface_resized(&mut self, _size: SurfaceSize) {}

    fn on_mouse_wheel(&mut self, _delta: f32) {}

    fn on_mouse_left_button_down(&mut self, _pos: Vec2) {}

    fn on_mouse_left_button_up(&mut self, _pos: Vec2) {}

    fn on_mouse_right_button_down(&mut self, _pos: Vec2) {}

    fn on_mouse_right_button_up(&mut self, _pos: Vec2) {}

    fn on_mouse_enter(&mut self, _pos: Vec2) {}

    fn on_mouse_leave(&mut self, _pos: Vec2) {}

    fn on_key_down(&mut self, _key_code: u32) {}

    fn on_key_up(&mut self, _key_code: u32) {}
}

/// Mutable access to engine-owned state, passed to the lifecycle hooks.
#[derive(Debug)]
pub struct EngineContext {
    content: ContentManager,
    services: ServiceContainer,
    suppress_draw: bool,
    reset_requested: bool,
}

impl EngineContext {
    pub fn new(content: ContentManager) -> Self {
        Self {
            content,
            services: ServiceContainer::new(),
            suppress_draw: false,
            reset_requested: false,
        }
    }

    pub fn content(&self) -> &ContentManager {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentManager {
        &mut self.content
    }

    pub fn set_content(&mut self, content: ContentManager) {
        self.content = content;
    }

    pub fn services(&self) -> &ServiceContainer {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceContainer {
        &mut self.services
    }

    /// Skip the draw that follows the current step.
    ///
    /// The request covers only the step that makes it; a tick that runs
    /// several steps still draws unless every one of them asks to skip.
    pub fn suppress_draw(&mut self) {
        self.suppress_draw = true;
    }

    /// Ask the engine to treat the next tick as zero elapsed time and drop
    /// slow-running history. Takes effect when the current hook returns.
    pub fn reset_elapsed_time(&mut self) {
        self.reset_requested = true;
    }

    pub(crate) fn take_suppress_draw(&mut self) -> bool {
        std::mem::take(&mut self.suppress_draw)
    }

    pub(crate) fn take_reset_request(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(ContentManager::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.target_elapsed_time, Ticks(166_667));
        assert_eq!(config.content_root, "Content");
        assert_eq!(config.slow_run_window, 20);
    }

    #[test]
    fn config_from_partial_json() {
        let config = GameConfig::from_json(r#"{ "target_elapsed_time": 100000 }"#).unwrap();
        assert_eq!(config.target_elapsed_time, Ticks::from_millis(10));
        assert_eq!(config.content_root, "Content");
    }

    #[test]
    fn requests_clear_when_taken() {
        let mut ctx = EngineContext::default();
        ctx.suppress_draw();
        ctx.reset_elapsed_time();
        assert!(ctx.take_suppress_draw());
        assert!(!ctx.take_suppress_draw());
        assert!(ctx.take_reset_request());
        assert!(!ctx.take_reset_request());
    }
}
