use crate::config::Rgb;

/// A 2D drawing target the animation paints into once per frame.
pub trait Surface {
    fn clear(&mut self);

    /// `x`/`y` is the circle center.
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb);

    /// `x`/`y` is the top-left corner.
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);

    fn resize(&mut self, _width: f32, _height: f32) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle { x: f32, y: f32, radius: f32, color: Rgb },
    Rect { x: f32, y: f32, width: f32, height: f32, color: Rgb },
    Resize { width: f32, height: f32 },
}

/// In-memory surface that keeps every command it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the most recent `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|command| *command == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn frames(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| **command == DrawCommand::Clear)
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color });
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.commands.push(DrawCommand::Rect { x, y, width, height, color });
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }
}
