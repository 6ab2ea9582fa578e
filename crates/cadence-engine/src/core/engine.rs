use crate::api::game::{EngineContext, Game};
use crate::api::state::{DrawState, UpdateState};
use crate::api::surface::DrawingSurface;
use crate::api::types::SurfaceSize;
use crate::assets::content::ContentManager;
use crate::core::services::ServiceContainer;
use crate::core::ticks::Ticks;
use crate::core::time::FixedTimestep;
use crate::error::EngineError;
use crate::input::event::InputEvent;

/// What a single [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Fixed steps run.
    pub steps: u64,
    /// Whether `Game::draw` was called.
    pub drew: bool,
    pub running_slowly: bool,
}

/// Fixed-timestep update/draw scheduler.
///
/// The host calls [`tick`](Self::tick) once per frame pulse with the wall
/// time since the previous pulse and the total session time. The engine
/// turns that into zero or more fixed-size `Game::update` calls and at most
/// one `Game::draw`.
pub struct Engine<S, G>
where
    S: DrawingSurface,
    G: Game<Device = S::Device>,
{
    surface: S,
    root: S::Root,
    game: G,
    ctx: EngineContext,
    timestep: FixedTimestep,
    total_game_time: Ticks,
    /// Step time consumed since the last draw.
    last_frame_elapsed: Ticks,
    done_first_update: bool,
    started: bool,
    resize_attached: bool,
    disposed: bool,
}

impl<S, G> Engine<S, G>
where
    S: DrawingSurface,
    G: Game<Device = S::Device>,
{
    /// Bind a game to a drawing surface.
    ///
    /// Fails if the surface has no parent control or the game configures a
    /// non-positive step duration.
    pub fn new(surface: S, game: G) -> Result<Self, EngineError> {
        let config = game.config();
        if config.target_elapsed_time <= Ticks::ZERO {
            return Err(EngineError::InvalidTargetElapsedTime(config.target_elapsed_time));
        }
        let root = surface.parent().ok_or(EngineError::NoRootControl)?;

        let timestep = FixedTimestep::new(config.target_elapsed_time)
            .with_slow_run_window(config.slow_run_window);
        let ctx = EngineContext::new(ContentManager::new(config.content_root));

        log::debug!(
            "engine created: target {}, content root {:?}",
            timestep.target(),
            ctx.content().root_directory()
        );

        Ok(Self {
            surface,
            root,
            game,
            ctx,
            timestep,
            total_game_time: Ticks::ZERO,
            last_frame_elapsed: Ticks::ZERO,
            done_first_update: false,
            started: false,
            resize_attached: true,
            disposed: false,
        })
    }

    /// Initialize the game and issue the first, zero-length update.
    ///
    /// Hook errors are logged and returned; nothing is retried.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if self.disposed {
            return Err(EngineError::Disposed);
        }
        if self.started {
            return Err(EngineError::AlreadyRunning);
        }
        self.started = true;

        log::info!("initializing engine");
        if let Err(err) = self.initialize_and_first_update() {
            log::error!("engine initialization failed: {err:#}");
            return Err(err.into());
        }
        self.done_first_update = true;
        Ok(())
    }

    fn initialize_and_first_update(&mut self) -> anyhow::Result<()> {
        let result = self.game.initialize(&mut self.ctx);
        self.apply_context_requests();
        result?;

        let state = UpdateState {
            elapsed_game_time: Ticks::ZERO,
            total_game_time: self.total_game_time,
            is_running_slowly: false,
        };
        let result = self.game.update(&mut self.ctx, &state);
        self.apply_context_requests();
        result
    }

    /// Advance by one host frame pulse.
    ///
    /// `elapsed` is the wall time since the previous pulse, `total_game_time`
    /// the session time the host reports for this pulse. An error from
    /// `update` or `draw` is returned after the time bookkeeping for the
    /// failed call has been applied.
    pub fn tick(&mut self, elapsed: Ticks, total_game_time: Ticks) -> Result<TickReport, EngineError> {
        if self.disposed {
            return Err(EngineError::Disposed);
        }

        let plan = self.timestep.accumulate(elapsed);
        self.last_frame_elapsed = Ticks::ZERO;
        let target = self.timestep.target();

        // Stays set only if every step asks to skip the draw, or none runs.
        let mut suppress_draw = true;
        for _ in 0..plan.steps {
            let state = UpdateState {
                elapsed_game_time: target,
                total_game_time: self.total_game_time,
                is_running_slowly: self.timestep.running_slowly(),
            };
            let _bookkeeping = StepBookkeeping {
                last_frame_elapsed: &mut self.last_frame_elapsed,
                total_game_time: &mut self.total_game_time,
                step: target,
                new_total: total_game_time,
            };

            let result = self.game.update(&mut self.ctx, &state);
            if self.ctx.take_reset_request() {
                reset_timestep(&mut self.timestep);
            }
            if let Err(err) = result {
                log::error!("update failed: {err:#}");
                return Err(err.into());
            }
            self.done_first_update = true;
            suppress_draw &= self.ctx.take_suppress_draw();
        }

        let drew = if suppress_draw { false } else { self.draw_frame()? };

        Ok(TickReport {
            steps: plan.steps,
            drew,
            running_slowly: self.timestep.running_slowly(),
        })
    }

    fn draw_frame(&mut self) -> Result<bool, EngineError> {
        let elapsed = self.last_frame_elapsed;
        let _reset = ResetOnDrop(&mut self.last_frame_elapsed);

        if !self.done_first_update || !self.game.begin_draw() {
            return Ok(false);
        }

        let state = DrawState {
            total_game_time: self.total_game_time,
            elapsed_game_time: elapsed,
            is_running_slowly: self.timestep.running_slowly(),
            graphics_device: self.surface.graphics_device(),
        };
        if let Err(err) = self.game.draw(&state) {
            log::error!("draw failed: {err:#}");
            return Err(err.into());
        }
        self.game.end_draw();
        Ok(true)
    }

    /// Treat the next tick as zero elapsed time and clear slow-running state.
    /// Call after a pause, resume or seek.
    pub fn reset_elapsed_time(&mut self) {
        reset_timestep(&mut self.timestep);
    }

    /// Panics if `value` is not positive.
    pub fn set_target_elapsed_time(&mut self, value: Ticks) {
        self.timestep.set_target(value);
    }

    /// Forward a raw input event to the game.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.disposed {
            log::debug!("dropping {event:?} after dispose");
            return;
        }
        event.dispatch(&mut self.game);
    }

    /// Forward a surface resize to the game while the listener is attached.
    pub fn surface_resized(&mut self, size: SurfaceSize) {
        if self.resize_attached {
            self.game.on_surface_resized(size);
        }
    }

    /// Unload content and detach from the surface.
    ///
    /// Only the first call does anything; later calls return `Ok`.
    pub fn dispose(&mut self) -> Result<(), EngineError> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;

        log::info!("unloading content");
        let result = self.game.unload_content(&mut self.ctx);
        self.resize_attached = false;
        if let Err(err) = result {
            log::error!("unload_content failed: {err:#}");
            return Err(err.into());
        }
        Ok(())
    }

    fn apply_context_requests(&mut self) {
        if self.ctx.take_reset_request() {
            self.reset_elapsed_time();
        }
    }

    pub fn graphics_device(&self) -> &S::Device {
        self.surface.graphics_device()
    }

    pub fn drawing_surface(&self) -> &S {
        &self.surface
    }

    pub fn root_control(&self) -> &S::Root {
        &self.root
    }

    pub fn content(&self) -> &ContentManager {
        self.ctx.content()
    }

    pub fn content_mut(&mut self) -> &mut ContentManager {
        self.ctx.content_mut()
    }

    pub fn set_content(&mut self, content: ContentManager) {
        self.ctx.set_content(content);
    }

    pub fn services(&self) -> &ServiceContainer {
        self.ctx.services()
    }

    pub fn services_mut(&mut self) -> &mut ServiceContainer {
        self.ctx.services_mut()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn target_elapsed_time(&self) -> Ticks {
        self.timestep.target()
    }

    pub fn total_game_time(&self) -> Ticks {
        self.total_game_time
    }

    pub fn accumulated_time(&self) -> Ticks {
        self.timestep.accumulated()
    }

    pub fn is_running_slowly(&self) -> bool {
        self.timestep.running_slowly()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<S, G> Drop for Engine<S, G>
where
    S: DrawingSurface,
    G: Game<Device = S::Device>,
{
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            log::error!("dispose failed: {err:#}");
        }
    }
}

fn reset_timestep(timestep: &mut FixedTimestep) {
    log::info!("reset elapsed time");
    timestep.reset_elapsed_time();
}

/// Applied when a step ends, whether `update` returned, failed or panicked.
struct StepBookkeeping<'a> {
    last_frame_elapsed: &'a mut Ticks,
    total_game_time: &'a mut Ticks,
    step: Ticks,
    new_total: Ticks,
}

impl Drop for StepBookkeeping<'_> {
    fn drop(&mut self) {
        *self.last_frame_elapsed += self.step;
        *self.total_game_time = self.new_total;
    }
}

struct ResetOnDrop<'a>(&'a mut Ticks);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = Ticks::ZERO;
    }
}
