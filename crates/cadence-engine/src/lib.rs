pub mod api;
pub mod assets;
pub mod core;
pub mod error;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::state::{DrawState, UpdateState};
pub use api::surface::DrawingSurface;
pub use api::types::{MouseButton, SurfaceSize};
pub use assets::content::ContentManager;
pub use crate::core::engine::{Engine, TickReport};
pub use crate::core::services::ServiceContainer;
pub use crate::core::ticks::Ticks;
pub use crate::core::time::{
    FixedTimestep, StepPlan, DEFAULT_SLOW_RUN_WINDOW, DEFAULT_TARGET_ELAPSED_TIME,
    MAXIMUM_ELAPSED_TIME,
};
pub use error::EngineError;
pub use input::event::InputEvent;
