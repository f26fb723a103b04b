//! egui control surface: transform sliders, the part info panel, and the
//! loading indicator. The hosting adapter owns the egui context and calls
//! `draw` once per frame; this module owns the bound effects.

pub mod bindings;
pub mod panel;

pub use bindings::{standard_bindings, ControlBinding, TransformAxis, TransformBinder};
pub use panel::{InfoPanel, InfoPanelState};

use crate::assets::LoadStage;
use crate::render::RenderContext;
use crate::scene::SceneGraph;

/// Shown from startup until the geometry stage reports 100%. A load
/// failure leaves it visible for the rest of the session.
#[derive(Debug, Clone, Copy)]
pub struct LoadingIndicator {
    visible: bool,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_stage_complete(&mut self, stage: LoadStage) {
        if stage == LoadStage::Geometry {
            self.visible = false;
        }
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw every control for one frame.
pub fn draw(
    ctx: &egui::Context,
    graph: &mut SceneGraph,
    render: &mut RenderContext,
    binder: Option<&TransformBinder>,
    panel: &mut InfoPanel,
    loading: &LoadingIndicator,
) {
    if loading.is_visible() {
        egui::Area::new(egui::Id::new("loading-indicator"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading cell model…");
                });
            });
    }

    if let Some(binder) = binder {
        egui::Window::new("Transform")
            .resizable(false)
            .show(ctx, |ui| {
                for binding in binder.bindings() {
                    let mut value = binder.value(graph, binding.axis);
                    let slider = egui::Slider::new(&mut value, binding.min..=binding.max)
                        .text(binding.label);
                    if ui.add(slider).changed() {
                        binder.apply(graph, render, binding.axis, value);
                    }
                }
            });
    }

    draw_panel(ctx, panel, render);
}

fn draw_panel(ctx: &egui::Context, panel: &mut InfoPanel, render: &mut RenderContext) {
    if !panel.is_visible() {
        return;
    }
    let Some(info) = panel.entry().cloned() else {
        return;
    };
    let expanded = matches!(panel.state(), InfoPanelState::Expanded { .. });

    egui::Window::new("Part")
        .id(egui::Id::new("info-panel"))
        .resizable(false)
        .show(ctx, |ui| {
            if expanded {
                if ui.button("\u{2190} back").clicked() {
                    panel.back();
                    render.request_redraw();
                }
                // Expanded view: text hidden, image enlarged.
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_size(egui::vec2(280.0, 280.0));
                    ui.centered_and_justified(|ui| ui.label(&info.image));
                });
            } else {
                ui.hyperlink_to(&info.title, &info.link);
                ui.label(&info.text);
                if ui.small_button(format!("\u{1F50D} {}", info.image)).clicked() {
                    panel.expand();
                    render.request_redraw();
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_starts_visible() {
        assert!(LoadingIndicator::new().is_visible());
    }

    #[test]
    fn material_stage_completion_keeps_the_indicator_visible() {
        let mut loading = LoadingIndicator::new();
        loading.on_stage_complete(LoadStage::Materials);
        assert!(loading.is_visible());
    }

    #[test]
    fn geometry_stage_completion_hides_the_indicator() {
        let mut loading = LoadingIndicator::new();
        loading.on_stage_complete(LoadStage::Materials);
        loading.on_stage_complete(LoadStage::Geometry);
        assert!(!loading.is_visible());
    }

    #[test]
    fn failed_load_leaves_the_indicator_visible() {
        // A failing load never completes its failing stage, so the event
        // sequence the handler sees is at most a materials completion.
        let mut loading = LoadingIndicator::new();
        loading.on_stage_complete(LoadStage::Materials);
        assert!(loading.is_visible(), "indicator must outlive a failed load");
    }
}
