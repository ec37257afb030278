use crate::error::ClientError;
use crate::gfx::buffer::Buffer;
pub use minifb::Key;
use minifb::{KeyRepeat, MouseButton, MouseMode, Scale, Window as MiniFBWindow, WindowOptions};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const WIDTH: usize = 1000;
pub const HEIGHT: usize = 760;

pub struct Window {
    pub win: MiniFBWindow,
    pub buf: Buffer,
    mouse_was_down: bool,
}

impl Window {
    pub fn new() -> Result<Self, ClientError> {
        let name = env!("CARGO_PKG_DESCRIPTION");
        let opts = WindowOptions {
            scale: Scale::X1,
            ..WindowOptions::default()
        };
        let mut win = MiniFBWindow::new(name, WIDTH, HEIGHT, opts)?;
        win.limit_update_rate(Some(Duration::from_millis(1000 / 60)));
        let buf = Buffer::new(WIDTH, HEIGHT);
        Ok(Self {
            win,
            buf,
            mouse_was_down: false,
        })
    }

    pub fn update(&mut self) -> Result<(), ClientError> {
        if !self.win.is_open() || self.check_for_quit() {
            Err(ClientError::Quit)
        } else {
            self.win.update_with_buffer(&self.buf.data, self.buf.width, self.buf.height)?;
            Ok(())
        }
    }

    /// Position of a left click that started since the last call.
    pub fn mouse_clicked(&mut self) -> Option<(f32, f32)> {
        let down = self.win.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        if clicked {
            self.win.get_mouse_pos(MouseMode::Discard)
        } else {
            None
        }
    }

    pub fn keys_pressed(&self) -> Vec<Key> {
        self.win.get_keys_pressed(KeyRepeat::No)
    }

    pub fn quit(&self) -> Result<(), ClientError> {
        Err(ClientError::Quit)
    }

    #[cfg(not(target_os = "macos"))]
    pub fn check_for_quit(&self) -> bool {
        use Key::*;
        (self.win.is_key_down(LeftAlt) || self.win.is_key_down(RightAlt)) && self.win.is_key_down(F4)
    }

    #[cfg(target_os = "macos")]
    pub fn check_for_quit(&self) -> bool {
        use Key::*;
        (self.win.is_key_down(LeftSuper) || self.win.is_key_down(RightSuper))
            && (self.win.is_key_down(Q) || self.win.is_key_down(W))
    }

    pub fn wait_for_any_key(&mut self) -> Result<(), ClientError> {
        loop {
            self.update()?;
            if !self.keys_pressed().is_empty() {
                return Ok(());
            }
        }
    }

    pub fn wait_for_number(&mut self, range: RangeInclusive<isize>) -> Result<Option<isize>, ClientError> {
        loop {
            self.update()?;
            for key in self.keys_pressed() {
                if Key::Escape == key {
                    return Ok(None);
                } else if let Some(digit) = digit(key) {
                    if range.contains(&digit) {
                        return Ok(Some(digit));
                    }
                }
            }
        }
    }
}

/// The number on a top-row or keypad digit key.
pub fn digit(key: Key) -> Option<isize> {
    use Key::*;
    let index = key as isize;
    if (Key0 as isize..=Key9 as isize).contains(&index) {
        Some(index - Key0 as isize)
    } else if (NumPad0 as isize..=NumPad9 as isize).contains(&index) {
        Some(index - NumPad0 as isize)
    } else {
        None
    }
}
