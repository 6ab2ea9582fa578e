use super::types::SurfaceSize;

/// The host drawing surface the engine is bound to.
///
/// The engine never renders; it only hands `graphics_device` through to
/// `Game::draw` and resolves the root control once at construction.
pub trait DrawingSurface {
    /// Rendering context passed through to draw calls.
    type Device;
    /// The control that hosts the surface.
    type Root;

    fn graphics_device(&self) -> &Self::Device;

    /// The surface's parent control, if it is attached to one.
    fn parent(&self) -> Option<Self::Root>;

    /// Current logical size of the surface.
    fn size(&self) -> SurfaceSize;
}
