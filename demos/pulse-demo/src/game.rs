use anyhow::anyhow;
use cadence_engine::*;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Pulse period in fixed steps (one second at the default rate).
const PULSE_STEPS: u32 = 60;
const KEY_SPACE: u32 = 32;

/// A square that pulses once per second of simulated time.
/// Space freezes the pulse; clicking moves the square.
pub struct PulseDemo {
    step: u32,
    frozen: bool,
    center: Vec2,
    size: SurfaceSize,
    slow_frames: u32,
}

impl PulseDemo {
    pub fn new() -> Self {
        Self {
            step: 0,
            frozen: false,
            center: Vec2::new(160.0, 120.0),
            size: SurfaceSize::new(320.0, 240.0),
            slow_frames: 0,
        }
    }

    fn phase(&self) -> f32 {
        (self.step % PULSE_STEPS) as f32 / PULSE_STEPS as f32
    }
}

impl Game for PulseDemo {
    type Device = HtmlCanvasElement;

    fn update(&mut self, ctx: &mut EngineContext, state: &UpdateState) -> anyhow::Result<()> {
        if self.frozen {
            // Nothing moves, so the previous frame is still correct.
            ctx.suppress_draw();
            return Ok(());
        }
        if state.elapsed_game_time > Ticks::ZERO {
            self.step = self.step.wrapping_add(1);
        }
        Ok(())
    }

    fn draw(&mut self, state: &DrawState<'_, HtmlCanvasElement>) -> anyhow::Result<()> {
        if state.is_running_slowly {
            self.slow_frames += 1;
        }
        let ctx = state
            .graphics_device
            .get_context("2d")
            .map_err(|e| anyhow!("get_context failed: {e:?}"))?
            .ok_or_else(|| anyhow!("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("unexpected context type"))?;

        let side = 20.0 + 40.0 * (self.phase() * std::f32::consts::TAU).sin().abs();
        ctx.clear_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64);
        ctx.fill_rect(
            (self.center.x - side / 2.0) as f64,
            (self.center.y - side / 2.0) as f64,
            side as f64,
            side as f64,
        );
        Ok(())
    }

    fn unload_content(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        log::info!("pulse-demo: {} slow frames this session", self.slow_frames);
        Ok(())
    }

    fn on_mouse_left_button_down(&mut self, pos: Vec2) {
        self.center = pos;
    }

    fn on_key_down(&mut self, key_code: u32) {
        if key_code == KEY_SPACE {
            self.frozen = !self.frozen;
        }
    }

    fn on_surface_resized(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}
