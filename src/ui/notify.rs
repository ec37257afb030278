use crate::gfx::buffer::{Buffer, GLYPH_SIZE};
use crate::gfx::color::Color;
use log::debug;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const LIFETIME: Duration = Duration::from_secs(3);
const MAX_TOASTS: usize = 4;
const TOAST_HEIGHT: i32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn color(&self) -> Color {
        match self {
            ToastKind::Info => Color::INFO,
            ToastKind::Success => Color::SUCCESS,
            ToastKind::Error => Color::DANGER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifier {
    toasts: VecDeque<Toast>,
}

impl Notifier {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        debug!("Toast {kind:?}: {message}");
        self.toasts.push_back(Toast {
            kind,
            message,
            shown_at: Instant::now(),
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|toast| now.duration_since(toast.shown_at) < LIFETIME);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Stacks toasts in the top-right corner of a `width` wide region, newest at the bottom.
    pub fn draw(&self, buf: &mut Buffer, width: i32) {
        for (i, toast) in self.toasts.iter().enumerate() {
            let w = Buffer::text_width(&toast.message, 1) + 2 * GLYPH_SIZE;
            let x = width - w - 10;
            let y = 10 + i as i32 * (TOAST_HEIGHT + 6);
            buf.fill_rect_alpha(x, y, w, TOAST_HEIGHT, toast.kind.color(), 0.9);
            buf.draw_text(&toast.message, x + GLYPH_SIZE, y + (TOAST_HEIGHT - GLYPH_SIZE) / 2, 1, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_toasts() {
        let mut notifier = Notifier::default();
        for i in 0..6 {
            notifier.info(format!("toast {i}"));
        }
        assert_eq!(notifier.len(), MAX_TOASTS);
        assert_eq!(notifier.latest().map(|toast| toast.message.as_str()), Some("toast 5"));
    }

    #[test]
    fn toasts_expire() {
        let mut notifier = Notifier::default();
        notifier.error("No pokeballs left!");
        notifier.expire(Instant::now());
        assert_eq!(notifier.len(), 1);
        notifier.expire(Instant::now() + LIFETIME);
        assert_eq!(notifier.len(), 0);
    }
}
