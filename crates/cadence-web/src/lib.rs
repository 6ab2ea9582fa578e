pub mod clock;
pub mod report;
pub mod runner;
pub mod surface;

pub use clock::HostClock;
pub use report::{error_message, report_to_page};
pub use runner::{GameRunner, WebRunner};
pub use surface::CanvasSurface;

/// Route panics and `log` output to the browser console.
/// Safe to call more than once.
pub fn init_browser_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(level);
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the runner
/// - `with_runner()` helper function
/// - exports for init, the per-frame tick, input, resize, pause/resume and dispose
///
/// The page calls `game_init(canvasId)` once, then `game_frame(now)` from
/// every `requestAnimationFrame` callback. Errors escaping the engine are
/// logged, alerted and thrown back into JS as `Error`s.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use cadence_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// cadence_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: a type implementing `cadence_engine::Game` with
///   `Device = web_sys::HtmlCanvasElement` and a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WebRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::WebRunner<$game_type>) -> R,
        ) -> Result<R, JsValue> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .ok_or_else(|| JsValue::from_str("game not initialized; call game_init() first"))?;
                Ok(f(runner))
            })
        }

        #[wasm_bindgen]
        pub fn game_init(canvas_id: &str) -> Result<(), JsValue> {
            $crate::init_browser_logging(log::Level::Info);

            let surface = $crate::CanvasSurface::from_element_id(canvas_id)?;
            let mut runner = $crate::GameRunner::new(surface, <$game_type>::new())
                .map_err(|e| $crate::report_to_page(&e))?;
            runner.start().map_err(|e| $crate::report_to_page(&e))?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_frame(now_ms: f64) -> Result<(), JsValue> {
            with_runner(|r| r.frame(now_ms))?
                .map(|_| ())
                .map_err(|e| $crate::report_to_page(&e))
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(button: i16, x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.pointer_down(button, x, y))
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(button: i16, x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.pointer_up(button, x, y))
        }

        #[wasm_bindgen]
        pub fn game_pointer_enter(x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.pointer_enter(x, y))
        }

        #[wasm_bindgen]
        pub fn game_pointer_leave(x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.pointer_leave(x, y))
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.wheel(delta_y))
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) -> Result<(), JsValue> {
            with_runner(|r| r.key_down(key_code))
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) -> Result<(), JsValue> {
            with_runner(|r| r.key_up(key_code))
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) -> Result<(), JsValue> {
            with_runner(|r| r.resize(width, height))
        }

        // ---- Lifecycle ----

        #[wasm_bindgen]
        pub fn game_pause() -> Result<(), JsValue> {
            with_runner(|r| r.pause())
        }

        #[wasm_bindgen]
        pub fn game_resume() -> Result<(), JsValue> {
            with_runner(|r| r.resume())
        }

        #[wasm_bindgen]
        pub fn game_reset_elapsed_time() -> Result<(), JsValue> {
            with_runner(|r| r.reset_elapsed_time())
        }

        #[wasm_bindgen]
        pub fn game_dispose() -> Result<(), JsValue> {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            match runner {
                Some(mut runner) => runner.dispose().map_err(|e| $crate::report_to_page(&e)),
                None => Ok(()),
            }
        }
    };
}
