#[derive(Clone, Debug, Copy, Default, PartialEq, Eq)]
pub struct Color(u32);

const fn rgb_to_u32(r: u8, g: u8, b: u8) -> u32 {
    0xff00_0000 + ((r as u32) << 16) + ((g as u32) << 8) + (b as u32)
}

impl Color {
    #[cfg(test)]
    pub const TRANSPARENT: Color = Color(0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DARK_GREY: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const GREY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const LIGHT_GREY: Color = Color::rgb(0xdd, 0xdd, 0xdd);
    pub const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);
    pub const RED: Color = Color::rgb(0xff, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xff);
    pub const GOLD: Color = Color::rgb(0xff, 0xd7, 0);
    pub const ORANGE_RED: Color = Color::rgb(0xff, 0x45, 0);
    pub const DANGER: Color = Color::rgb(0xdc, 0x35, 0x45);
    pub const DANGER_LIGHT: Color = Color::rgb(0xff, 0x6b, 0x6b);
    pub const WARNING: Color = Color::rgb(0xff, 0xc1, 0x07);
    pub const WARNING_LIGHT: Color = Color::rgb(0xff, 0xd1, 0x66);
    pub const SUCCESS: Color = Color::rgb(0x28, 0xa7, 0x45);
    pub const LAWN_GREEN: Color = Color::rgb(0x7c, 0xfc, 0);
    pub const INFO: Color = Color::rgb(0x17, 0xa2, 0xb8);
    pub const SKY_TOP: Color = Color::rgb(0x87, 0xce, 0xeb);
    pub const SKY_BOTTOM: Color = Color::rgb(0xe0, 0xf7, 0xff);
    pub const GROUND: Color = Color::rgb(0x8b, 0x45, 0x13);
    pub const GRASS: Color = Color::rgb(0x22, 0x8b, 0x22);
    pub const PANEL: Color = Color::rgb(0x2b, 0x2d, 0x42);
    pub const PANEL_LIGHT: Color = Color::rgb(0x3d, 0x40, 0x5b);
    pub const CARD: Color = Color::rgb(0xfa, 0xfa, 0xfa);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(rgb_to_u32(r, g, b))
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) + ((r as u32) << 16) + ((g as u32) << 8) + (b as u32))
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    #[cfg(test)]
    pub const fn with_alpha(self, a: u8) -> Self {
        Color((self.0 & 0x00ff_ffff) + ((a as u32) << 24))
    }

    /// Linear interpolation between two opaque colours, `t` in `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgb(
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }

    /// Composites `self` over an opaque destination pixel, scaling the source alpha by `opacity`.
    pub fn blend_over(self, dst: u32, opacity: f32) -> u32 {
        let a = (self.alpha() as f32 / 255.0) * opacity.clamp(0.0, 1.0);
        if a <= 0.0 {
            return dst;
        }
        if a >= 1.0 {
            return self.0 | 0xff00_0000;
        }
        let dst = Color(dst);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        Color::rgb(
            mix(self.red(), dst.red()),
            mix(self.green(), dst.green()),
            mix(self.blue(), dst.blue()),
        )
        .into()
    }
}

impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        value.0
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending_respects_opacity() {
        let dst: u32 = Color::BLACK.into();
        assert_eq!(Color::WHITE.blend_over(dst, 1.0), u32::from(Color::WHITE));
        assert_eq!(Color::WHITE.blend_over(dst, 0.0), dst);
        let half = Color::from(Color::WHITE.blend_over(dst, 0.5));
        assert_eq!(half.red(), 128);
        let translucent = Color::WHITE.with_alpha(0);
        assert_eq!(translucent.blend_over(dst, 1.0), dst);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(Color::SKY_TOP.lerp(Color::SKY_BOTTOM, 0.0), Color::SKY_TOP);
        assert_eq!(Color::SKY_TOP.lerp(Color::SKY_BOTTOM, 1.0), Color::SKY_BOTTOM);
    }
}
