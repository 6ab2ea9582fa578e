use cadence_engine::EngineError;
use wasm_bindgen::JsValue;

/// Flatten an engine error (and its cause chain) into a single line that is
/// safe to embed in a JS string literal.
pub fn error_message(err: &EngineError) -> String {
    format!("{err:#}")
        .replace('"', "'")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

/// Report an error that escaped the engine to the page.
///
/// Logs it, shows a blocking alert, and returns a JS `Error` for the export
/// to throw so the embedding page's own handlers see it too.
pub fn report_to_page(err: &EngineError) -> JsValue {
    let message = error_message(err);
    log::error!("{message}");

    if let Some(window) = web_sys::window() {
        if let Err(alert_err) = window.alert_with_message(&message) {
            log::error!("could not show error alert: {alert_err:?}");
        }
    }

    js_sys::Error::new(&format!("Unhandled error in game: {message}")).into()
}
