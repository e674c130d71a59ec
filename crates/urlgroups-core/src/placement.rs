//! Where to put an editor popup relative to the main window.

/// A window's outer rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Top-left corner for a popup of `popup_size` next to `anchor`.
///
/// The popup starts at the anchor's right edge, level with its top. It is
/// moved left / up when it would leave the screen, and never to negative
/// coordinates.
pub fn popup_position(
    anchor: ScreenRect,
    popup_size: (f32, f32),
    screen_size: (f32, f32),
) -> (f32, f32) {
    let (popup_w, popup_h) = popup_size;
    let (screen_w, screen_h) = screen_size;

    let mut x = anchor.right();
    let mut y = anchor.y;
    if x + popup_w > screen_w {
        x = screen_w - popup_w;
    }
    if y + popup_h > screen_h {
        y = screen_h - popup_h;
    }
    (x.max(0.0), y.max(0.0))
}
