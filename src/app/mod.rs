//! winit application adapter. Owns the window, the egui host, and the
//! session-long application context (scene graph, index, picker, panel,
//! bindings, render context) the core components operate on. All shared
//! state is touched from this single event-processing turn.

mod egui_host;
mod pointer;
mod timing;

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use cellviz::assets::{self, AssetLoad, LoadEvent};
use cellviz::content::PartCatalog;
use cellviz::render::{PickOutcome, Picker, RenderContext};
use cellviz::scene::index::SceneIndex;
use cellviz::scene::{setup, SceneGraph};
use cellviz::ui::{self, InfoPanel, LoadingIndicator, TransformBinder};

use egui_host::EguiHost;
use pointer::PointerState;
use timing::FrameTiming;

const WINDOW_TITLE: &str = "Cellviz";
const MODEL_BASE_PATH: &str = "cellModel";
const BACKDROP_PATH: &str = "images/3dCellBackground.jpg";
const CATALOG_PATH: &str = "cellParts.json";
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Loader events handled per event-loop turn; keeps a large model from
/// starving input handling.
const LOAD_EVENTS_PER_TURN: usize = 8;

pub struct App {
    window: Option<Arc<Window>>,
    egui: Option<EguiHost>,
    render: Option<RenderContext>,
    graph: SceneGraph,
    index: SceneIndex,
    picker: Picker,
    panel: InfoPanel,
    binder: Option<TransformBinder>,
    load: Option<AssetLoad>,
    loading: LoadingIndicator,
    pointer: PointerState,
    timing: FrameTiming,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            egui: None,
            render: None,
            graph: SceneGraph::new(),
            index: SceneIndex::new(),
            picker: Picker::new(),
            panel: InfoPanel::new(PartCatalog::load_or_builtin(Path::new(CATALOG_PATH))),
            binder: None,
            load: None,
            loading: LoadingIndicator::new(),
            pointer: PointerState::default(),
            timing: FrameTiming::new(),
        }
    }

    fn init_session(&mut self, window: &Window) {
        let size = window.inner_size();
        let mut render = RenderContext::new(size.width, size.height);
        render.load_backdrop(Path::new(BACKDROP_PATH));

        setup::spawn_neighbor_cells(&mut self.graph);
        setup::spawn_lights(&mut self.graph);

        self.load = Some(AssetLoad::new(MODEL_BASE_PATH));
        self.render = Some(render);
        log::info!(
            "session started: {}x{} viewport, loading model from '{}'",
            size.width,
            size.height,
            MODEL_BASE_PATH
        );
    }

    /// Drain a slice of the in-flight load. Runs between frames so the
    /// render loop and pointer handling keep going while bytes arrive.
    fn pump_load(&mut self) {
        let Some(load) = self.load.as_mut() else {
            return;
        };
        let Some(render) = self.render.as_mut() else {
            return;
        };

        for _ in 0..LOAD_EVENTS_PER_TURN {
            match load.pump() {
                Some(LoadEvent::Progress { stage, ratio }) => {
                    log::debug!("{stage} {:.0}% downloaded", ratio * 100.0);
                }
                Some(LoadEvent::StageComplete(stage)) => {
                    self.loading.on_stage_complete(stage);
                    render.request_redraw();
                }
                Some(LoadEvent::Finished(asset)) => {
                    let root = assets::attach_asset(&mut self.graph, asset);
                    // The scene is structurally complete only now: asset
                    // subtree plus the dressing added at startup.
                    self.index.rebuild(&self.graph);
                    self.binder = Some(TransformBinder::new(root));
                    render.request_redraw();
                    log::info!("model attached, {} nodes indexed", self.index.len());
                }
                Some(LoadEvent::Failed(error)) => {
                    // Indicator stays up; the session continues without
                    // the model. No retry.
                    log::warn!("model load abandoned: {error}");
                }
                None => break,
            }
        }
        if self.load.as_ref().is_some_and(AssetLoad::is_done) {
            self.load = None;
        }
    }

    fn handle_pointer_down(&mut self) {
        let Some(position) = self.pointer.position() else {
            return;
        };
        let Some(render) = self.render.as_mut() else {
            return;
        };
        let camera = render.camera;
        let viewport = render.size();

        let outcome = self
            .picker
            .pick(&mut self.graph, &self.index, &camera, position, viewport);
        match outcome {
            PickOutcome::Selected(name) => {
                self.panel.show_part(&name);
                render.request_redraw();
            }
            PickOutcome::Cleared => render.request_redraw(),
            PickOutcome::Unchanged => {}
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) {
        if let Some((dx, dy)) = self.pointer.moved(x, y) {
            if let Some(render) = self.render.as_mut() {
                render
                    .camera
                    .orbit(dx * ORBIT_SENSITIVITY, -dy * ORBIT_SENSITIVITY);
                render.request_redraw();
            }
        }
    }

    fn redraw(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let Some(render) = self.render.as_mut() else {
            return;
        };
        self.timing.tick(&window, WINDOW_TITLE);

        let graph = &mut self.graph;
        let panel = &mut self.panel;
        let binder = self.binder.as_ref();
        let loading = &self.loading;
        if let Some(egui) = self.egui.as_mut() {
            egui.run(&window, |ctx| {
                ui::draw(ctx, graph, render, binder, panel, loading);
            });
        }

        render.render(graph);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        self.egui = Some(EguiHost::new(&window));
        self.init_session(&window);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let ui_consumed = match (&self.window, &mut self.egui) {
            (Some(window), Some(egui)) => egui.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if !ui_consumed {
                    self.handle_cursor_moved(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left && !ui_consumed {
                    match state {
                        ElementState::Pressed => {
                            self.handle_pointer_down();
                            self.pointer.begin_drag();
                        }
                        ElementState::Released => self.pointer.end_drag(),
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.pump_load();
        // Continuous redraw: the loop runs for the session lifetime.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
