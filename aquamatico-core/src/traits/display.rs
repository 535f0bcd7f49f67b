//! Display text service
//!
//! The OLED is an output sink. Text is drawn into an off-screen
//! framebuffer and only reaches the panel on [`TextDisplay::render`], so
//! callers clear, draw and then render.

/// Text output onto a pixel framebuffer
pub trait TextDisplay {
    /// Error raised by the underlying bus
    type Error;

    /// Draw ASCII text left to right with its top-left corner at (`x`, `y`)
    ///
    /// Glyphs are opaque: drawing spaces erases what was under them.
    /// Text running past the right edge is clipped.
    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error>;

    /// Push the framebuffer to the panel
    fn render(&mut self) -> Result<(), Self::Error>;
}

impl<T: TextDisplay + ?Sized> TextDisplay for &mut T {
    type Error = T::Error;

    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        (**self).draw_string(x, y, text)
    }

    fn render(&mut self) -> Result<(), Self::Error> {
        (**self).render()
    }
}
