//! Minimal egui/winit bridge. The null presenter consumes no paint
//! primitives, so this host only drives input and the UI pass itself;
//! tessellation happens in a presenter that wants pixels.

use egui_winit::winit::event::WindowEvent;
use winit::window::Window;

pub struct EguiHost {
    context: egui::Context,
    winit_state: egui_winit::State,
}

impl EguiHost {
    pub fn new(window: &Window) -> Self {
        let context = egui::Context::default();
        let winit_state = egui_winit::State::new(
            context.clone(),
            egui::ViewportId::ROOT,
            window,
            None,
            None,
            None,
        );
        Self {
            context,
            winit_state,
        }
    }

    /// Feed a window event to egui; true when egui consumed it and the
    /// scene should not react (e.g. a click landing on a slider).
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Run one UI pass; returns whether egui wants the pointer.
    pub fn run(&mut self, window: &Window, run_ui: impl FnMut(&egui::Context)) -> bool {
        let raw_input = self.winit_state.take_egui_input(window);
        let full_output = self.context.run(raw_input, run_ui);
        self.winit_state
            .handle_platform_output(window, full_output.platform_output);
        self.context.wants_pointer_input()
    }
}
