use cadence_engine::{DrawingSurface, SurfaceSize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlCanvasElement};

/// A `<canvas>` element as the engine's drawing surface.
///
/// The canvas itself is the graphics device: renderers pull whatever
/// context they need (`webgpu`, `webgl2`, `2d`) from it in `Game::draw`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Look up a canvas by DOM id.
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {id:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element {id:?} is not a canvas")))?;
        Ok(Self::new(canvas))
    }
}

impl DrawingSurface for CanvasSurface {
    type Device = HtmlCanvasElement;
    type Root = Element;

    fn graphics_device(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn parent(&self) -> Option<Element> {
        self.canvas.parent_element()
    }

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.client_width() as f32, self.canvas.client_height() as f32)
    }
}
