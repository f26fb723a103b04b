/// Last known cursor position in viewport pixels, plus the drag state the
/// orbit control consumes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerState {
    position: Option<(f32, f32)>,
    dragging: bool,
}

impl PointerState {
    /// Record a cursor move; returns the delta while a drag is active.
    pub fn moved(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let delta = match (self.dragging, self.position) {
            (true, Some((px, py))) => Some((x - px, y - py)),
            _ => None,
        };
        self.position = Some((x, y));
        delta
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }
}
