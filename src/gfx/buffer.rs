use super::color::Color;
use super::glyph::Glyph;
use font8x8::legacy::BASIC_LEGACY;

pub const GLYPH_SIZE: i32 = 8;
const LINE_HEIGHT: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    pub data: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl Buffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![Color::BLACK.into(); width * height],
            width,
            height,
        }
    }

    pub fn from_pixels(width: usize, height: usize, data: Vec<u32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { data, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn clear(&mut self, color: Color) {
        self.data.fill(color.into());
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.data[index] = color.into();
        }
    }

    #[cfg(test)]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|index| self.data[index])
    }

    /// Clips a rectangle to the buffer, returning `(x0, y0, x1, y1)` as half-open bounds.
    fn clip(&self, x: i32, y: i32, width: i32, height: i32) -> Option<(usize, usize, usize, usize)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width as i32);
        let y1 = (y + height).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) {
            let col = color.into();
            for row in y0..y1 {
                let start = row * self.width;
                self.data[start + x0..start + x1].fill(col);
            }
        }
    }

    pub fn fill_rect_alpha(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color, opacity: f32) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) {
            for row in y0..y1 {
                let start = row * self.width;
                for pixel in &mut self.data[start + x0..start + x1] {
                    *pixel = color.blend_over(*pixel, opacity);
                }
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, thickness: i32, color: Color) {
        self.fill_rect(x, y, width, thickness, color);
        self.fill_rect(x, y + height - thickness, width, thickness, color);
        self.fill_rect(x, y, thickness, height, color);
        self.fill_rect(x + width - thickness, y, thickness, height, color);
    }

    pub fn stroke_rect_alpha(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color, opacity: f32) {
        self.fill_rect_alpha(x, y, width, 1, color, opacity);
        self.fill_rect_alpha(x, y + height - 1, width, 1, color, opacity);
        self.fill_rect_alpha(x, y + 1, 1, height - 2, color, opacity);
        self.fill_rect_alpha(x + width - 1, y + 1, 1, height - 2, color, opacity);
    }

    pub fn vertical_gradient(&mut self, x: i32, y: i32, width: i32, height: i32, top: Color, bottom: Color) {
        let span = (height - 1).max(1) as f32;
        for row in 0..height {
            let color = top.lerp(bottom, row as f32 / span);
            self.fill_rect(x, y + row, width, 1, color);
        }
    }

    pub fn horizontal_gradient(&mut self, x: i32, y: i32, width: i32, height: i32, left: Color, right: Color) {
        let span = (width - 1).max(1) as f32;
        for col in 0..width {
            let color = left.lerp(right, col as f32 / span);
            self.fill_rect(x + col, y, 1, height, color);
        }
    }

    /// Bresenham line stamped with a `width`-sized square; `dash` is an (on, off) pattern in steps.
    pub fn draw_line(
        &mut self,
        (x0, y0): (i32, i32),
        (x1, y1): (i32, i32),
        width: i32,
        color: Color,
        dash: Option<(u32, u32)>,
    ) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let offset = (width - 1) / 2;
        let mut step = 0u32;
        loop {
            let visible = match dash {
                Some((on, off)) if on + off > 0 => step % (on + off) < on,
                _ => true,
            };
            if visible {
                if width <= 1 {
                    self.put_pixel(x, y, color);
                } else {
                    self.fill_rect(x - offset, y - offset, width, width, color);
                }
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1;
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r2 = (radius * radius) as f32;
        for dy in -radius..=radius {
            let span = (r2 - (dy * dy) as f32).sqrt().round() as i32;
            self.fill_rect(cx - span, cy + dy, span * 2 + 1, 1, color);
        }
    }

    pub fn stroke_circle(&mut self, cx: i32, cy: i32, radius: i32, width: i32, color: Color) {
        let half = width as f32 / 2.0;
        let inner = (radius as f32 - half).max(0.0).powi(2);
        let outer = (radius as f32 + half).powi(2);
        let reach = radius + width;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let d2 = (dx * dx + dy * dy) as f32;
                if d2 >= inner && d2 <= outer {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn fill_triangle(&mut self, a: (i32, i32), b: (i32, i32), c: (i32, i32), color: Color) {
        let edge = |p: (i32, i32), q: (i32, i32), r: (i32, i32)| (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0);
        let area = edge(a, b, c);
        if area == 0 {
            return;
        }
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x, y);
                let (w0, w1, w2) = (edge(b, c, p), edge(c, a, p), edge(a, b, p));
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Opaque copy of `buf` with its top-left corner at `(x, y)`.
    pub fn draw_buffer(&mut self, buf: &Buffer, x: i32, y: i32) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, buf.width as i32, buf.height as i32) {
            let src_x = (x0 as i32 - x) as usize;
            for row in y0..y1 {
                let src_start = (row as i32 - y) as usize * buf.width + src_x;
                let dst_start = row * self.width;
                self.data[dst_start + x0..dst_start + x1]
                    .copy_from_slice(&buf.data[src_start..src_start + (x1 - x0)]);
            }
        }
    }

    /// Alpha-blended copy of an ARGB sprite with its top-left corner at `(x, y)`.
    pub fn draw_sprite(&mut self, sprite: &Buffer, x: i32, y: i32, opacity: f32) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, sprite.width as i32, sprite.height as i32) {
            for row in y0..y1 {
                let src_row = (row as i32 - y) as usize * sprite.width;
                for col in x0..x1 {
                    let src = Color::from(sprite.data[src_row + (col as i32 - x) as usize]);
                    let dst = &mut self.data[row * self.width + col];
                    *dst = src.blend_over(*dst, opacity);
                }
            }
        }
    }

    /// Draws an 8x8 bitmap whose rows have the leftmost pixel in the high bit.
    pub fn draw_glyph(&mut self, glyph: &Glyph, x: i32, y: i32, scale: i32, color: Color) {
        for (row, mut byte) in glyph.rows().iter().copied().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (byte & 0b1000_0000) == 0b1000_0000 {
                    self.fill_rect(x + col * scale, y + row as i32 * scale, scale, scale, color);
                }
                byte <<= 1;
            }
        }
    }

    pub fn text_width(text: &str, scale: i32) -> i32 {
        text.lines().map(|line| line.chars().count()).max().unwrap_or(0) as i32 * GLYPH_SIZE * scale
    }

    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: Color) {
        for (ln, line) in text.split('\n').enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let code = match u8::try_from(ch) {
                    Ok(32..=126) => ch as usize,
                    _ => '?' as usize,
                };
                let mut rows = BASIC_LEGACY[code];
                for row in rows.iter_mut() {
                    *row = row.reverse_bits();
                }
                let glyph = Glyph::new(rows);
                let gx = x + col as i32 * GLYPH_SIZE * scale;
                let gy = y + ln as i32 * LINE_HEIGHT * scale;
                self.draw_glyph(&glyph, gx, gy, scale, color);
            }
        }
    }

    /// Draws text horizontally centred on `cx`.
    pub fn center_text(&mut self, text: &str, cx: i32, y: i32, scale: i32, color: Color) {
        let x = cx - Buffer::text_width(text, scale) / 2;
        self.draw_text(text, x, y, scale, color);
    }
}
