const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille activity indicator, advanced by the event loop tick.
#[derive(Default)]
pub struct Spinner {
    ticks: usize,
}

impl Spinner {
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn current(&self) -> &'static str {
        // Two ticks per glyph keeps the 25 ms loop from blurring it.
        FRAMES[(self.ticks / 2) % FRAMES.len()]
    }
}
