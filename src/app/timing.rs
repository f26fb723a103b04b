use std::time::Instant;
use winit::window::Window;

/// Frame counter that folds the measured fps into the window title twice
/// a second.
pub struct FrameTiming {
    window_start: Instant,
    frame_count: u32,
}

impl FrameTiming {
    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frame_count: 0,
        }
    }

    pub fn tick(&mut self, window: &Window, base_title: &str) {
        self.frame_count = self.frame_count.saturating_add(1);
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            let fps = self.frame_count as f32 / elapsed;
            window.set_title(&format!("{base_title} - {fps:.1} fps"));
            self.frame_count = 0;
            self.window_start = Instant::now();
        }
    }
}
