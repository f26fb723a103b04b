//! Cellviz window adapter. The interactive core lives in the library;
//! this binary only attaches it to a winit window and an egui surface.

mod app;

use winit::event_loop::{ControlFlow, EventLoop};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Cellviz - interactive cell anatomy viewer");
    log::info!("   Click a cell part for details; drag to orbit; ESC to exit");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
