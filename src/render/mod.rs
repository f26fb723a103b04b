//! Redraw scheduling and draw execution.
//!
//! Every other component only *requests* a redraw; `RenderContext::render`
//! is the single place a draw actually happens, so requests from multiple
//! sources coalesce into one frame. The pixel-producing backend sits
//! behind the `Presenter` seam - the core never knows which adapter hosts
//! it, and tests run against the null presenter.

pub mod camera;
pub mod pick;

use std::path::Path;

pub use camera::Camera;
pub use pick::{PickOutcome, Picker, Ray, HIGHLIGHT_EMISSIVE};

use crate::scene::SceneGraph;

/// Draw backend seam. The hosting adapter supplies one; `NullPresenter`
/// is used headless and in tests.
pub trait Presenter {
    fn present(&mut self, graph: &SceneGraph, camera: &Camera, viewport: (u32, u32));
}

#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _graph: &SceneGraph, _camera: &Camera, _viewport: (u32, u32)) {}
}

pub struct RenderContext {
    pub camera: Camera,
    width: u32,
    height: u32,
    clear_color: [f32; 4],
    backdrop: Option<image::RgbaImage>,
    needs_redraw: bool,
    redraw_requests: u64,
    frames_rendered: u64,
    presenter: Box<dyn Presenter>,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_presenter(width, height, Box::new(NullPresenter))
    }

    pub fn with_presenter(width: u32, height: u32, presenter: Box<dyn Presenter>) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            camera: Camera::session_default(width as f32 / height as f32),
            width,
            height,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            backdrop: None,
            needs_redraw: true,
            redraw_requests: 0,
            frames_rendered: 0,
            presenter,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Signal that the next tick must re-render. Idempotent within a frame.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
        self.redraw_requests += 1;
    }

    /// Consume the pending request flag; the adapter polls this to decide
    /// whether to schedule a window redraw.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Cumulative request count, for verifying redraw-per-edit contracts.
    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Update the output size and the camera aspect after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.camera.set_aspect(self.width, self.height);
        self.request_redraw();
    }

    /// Load the scene backdrop once at startup. Failure is non-fatal: the
    /// clear color stays and the session continues.
    pub fn load_backdrop(&mut self, path: &Path) {
        match image::open(path) {
            Ok(backdrop) => {
                self.backdrop = Some(backdrop.to_rgba8());
                self.request_redraw();
                log::info!("backdrop loaded from {}", path.display());
            }
            Err(error) => {
                log::warn!("backdrop load failed ({}): {error}", path.display());
            }
        }
    }

    pub fn has_backdrop(&self) -> bool {
        self.backdrop.is_some()
    }

    /// Execute the draw. The sole caller is the adapter's redraw handler.
    pub fn render(&mut self, graph: &SceneGraph) {
        self.needs_redraw = false;
        self.frames_rendered += 1;
        self.presenter
            .present(graph, &self.camera, (self.width, self.height));
    }
}
