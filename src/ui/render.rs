use crate::assets::{ImageCache, FIELD_SPRITE_SIZE, HOSTILE_SPRITE_SIZE};
use crate::data::state::{Creature, GameState};
use crate::gfx::buffer::Buffer;
use crate::gfx::color::Color;
use crate::gfx::glyph;
use lazy_static::lazy_static;
use std::time::{Duration, Instant};

pub const CANVAS_WIDTH: usize = 800;
pub const CANVAS_HEIGHT: usize = 600;

const ENEMY_LINE_Y: i32 = 100;
const BASE_LINE_Y: i32 = CANVAS_HEIGHT as i32 - 150;
const ARROW_CUTOFF_Y: i32 = 400;

lazy_static! {
    static ref BACKGROUND: Buffer = paint_background();
}

fn paint_background() -> Buffer {
    let (w, h) = (CANVAS_WIDTH as i32, CANVAS_HEIGHT as i32);
    let mut buf = Buffer::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    buf.vertical_gradient(0, 0, w, h, Color::SKY_TOP, Color::SKY_BOTTOM);
    buf.fill_rect(0, h - 100, w, 100, Color::GROUND);
    buf.fill_rect(0, h - 100, w, 20, Color::GRASS);
    buf.draw_line((0, ENEMY_LINE_Y), (w - 1, ENEMY_LINE_Y), 5, Color::RED, None);
    buf.draw_line((0, BASE_LINE_Y), (w - 1, BASE_LINE_Y), 5, Color::BLUE, None);
    // placement grid
    for x in (50..w).step_by(100) {
        for y in (200..h - 200).step_by(100) {
            buf.fill_rect_alpha(x - 40, y - 40, 80, 80, Color::rgb(0, 255, 0), 0.05);
            buf.stroke_rect_alpha(x - 40, y - 40, 80, 80, Color::BLACK, 0.1);
        }
    }
    buf.center_text("ENEMY SPAWN", w / 2, 64, 2, Color::RED);
    buf.center_text("YOUR BASE", w / 2, h - 146, 2, Color::BLUE);
    buf.center_text("Place your Pokemon here", w / 2, h / 2 - 8, 1, Color::DARK_GREY);
    buf
}

/// Per-frame timing. Tracked for every rendered frame but not used to animate anything.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: Duration,
}

impl FrameClock {
    pub fn tick(&mut self, now: Instant) -> Duration {
        self.elapsed = self.last.map(|last| now.duration_since(last)).unwrap_or_default();
        self.last = Some(now);
        self.elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn stop(&mut self) {
        self.last = None;
    }
}

pub fn draw_scene(canvas: &mut Buffer, state: Option<&GameState>, images: Option<&ImageCache>) {
    canvas.draw_buffer(&BACKGROUND, 0, 0);
    if let Some(state) = state {
        for creature in &state.field {
            draw_field_creature(canvas, creature, state, images);
        }
        for hostile in &state.enemies {
            draw_hostile(canvas, hostile, images);
        }
    }
}

pub fn draw_health_bar(buf: &mut Buffer, x: i32, y: i32, width: i32, height: i32, fraction: f32, bg: Color, fg: Color) {
    buf.fill_rect(x, y, width, height, bg);
    let fill = (width as f32 * fraction.clamp(0.0, 1.0)).floor() as i32;
    buf.fill_rect(x, y, fill, height, fg);
    buf.stroke_rect(x, y, width, height, 1, Color::DARK_GREY);
}

fn truncate(name: &str, len: usize) -> String {
    name.chars().take(len).collect()
}

fn center(creature: &Creature) -> (i32, i32) {
    (creature.x.round() as i32, creature.y.round() as i32)
}

fn draw_field_creature(canvas: &mut Buffer, creature: &Creature, state: &GameState, images: Option<&ImageCache>) {
    let (x, y) = center(creature);
    let half = FIELD_SPRITE_SIZE as i32 / 2;
    match images.and_then(|images| images.sprite_at(&creature.name, FIELD_SPRITE_SIZE)) {
        Some(sprite) => {
            if creature.is_moving {
                canvas.draw_sprite(sprite, x - half - 5, y - half - 5, 0.3);
            }
            canvas.draw_sprite(sprite, x - half, y - half, 1.0);
        }
        None => {
            canvas.fill_circle(x, y, 25, creature.element.color());
            canvas.stroke_circle(x, y, 25, 2, Color::DARK_GREY);
            canvas.draw_glyph(creature.element.glyph(), x - 8, y - 8, 2, Color::WHITE);
        }
    }
    canvas.center_text(&truncate(&creature.name, 8), x, y + 37, 1, Color::BLACK);
    draw_health_bar(canvas, x - 30, y - 40, 60, 6, creature.health_fraction(), Color::DANGER, Color::SUCCESS);
    if creature.is_moving {
        canvas.fill_circle(x + 30, y - 45, 4, Color::GOLD);
    }
    if let Some(target) = creature.target.and_then(|id| state.hostile(id)) {
        canvas.draw_line((x, y), center(target), 2, Color::ORANGE_RED, Some((5, 5)));
    }
}

fn draw_hostile(canvas: &mut Buffer, hostile: &Creature, images: Option<&ImageCache>) {
    let (x, y) = center(hostile);
    let half = HOSTILE_SPRITE_SIZE as i32 / 2;
    match images.and_then(|images| images.sprite_at(&hostile.name, HOSTILE_SPRITE_SIZE)) {
        Some(sprite) => canvas.draw_sprite(sprite, x - half, y - half, 1.0),
        None => {
            canvas.fill_circle(x, y, 20, Color::DANGER);
            canvas.stroke_circle(x, y, 20, 2, Color::DARK_GREY);
            canvas.draw_glyph(&glyph::INVADER, x - 8, y - 8, 2, Color::WHITE);
        }
    }
    canvas.center_text(&truncate(&hostile.name, 6), x, y + 27, 1, Color::WHITE);
    draw_health_bar(
        canvas,
        x - 25,
        y - 35,
        50,
        5,
        hostile.health_fraction(),
        Color::DANGER_LIGHT,
        Color::WARNING,
    );
    if y < ARROW_CUTOFF_Y {
        canvas.fill_triangle((x, y + 35), (x - 5, y + 25), (x + 5, y + 25), Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, Sprite};
    use crate::data::element::Element;
    use crate::data::state::SnapshotPayload;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn state(json: &str) -> GameState {
        let payload: SnapshotPayload = serde_json::from_str(json).unwrap();
        GameState::from(payload)
    }

    fn canvas() -> Buffer {
        Buffer::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    fn pixel(buf: &Buffer, x: i32, y: i32) -> Option<u32> {
        buf.get_pixel(x, y)
    }

    #[test]
    fn zubat_bar_fills_a_quarter() {
        let zubat = state(r#"{"enemies": [{"id": 0, "name": "Zubat", "current_health": 10, "health": 40}]}"#);
        let mut buf = Buffer::new(100, 20);
        draw_health_bar(&mut buf, 10, 5, 50, 5, zubat.enemies[0].health_fraction(), Color::DANGER_LIGHT, Color::WARNING);
        assert_eq!(pixel(&buf, 21, 7), Some(Color::WARNING.into()));
        assert_eq!(pixel(&buf, 22, 7), Some(Color::DANGER_LIGHT.into()));
        assert_eq!(pixel(&buf, 10, 7), Some(Color::DARK_GREY.into()));
    }

    #[test]
    fn background_marks_spawn_base_and_ground() {
        let mut buf = canvas();
        draw_scene(&mut buf, None, None);
        assert_eq!(pixel(&buf, 400, ENEMY_LINE_Y), Some(Color::RED.into()));
        assert_eq!(pixel(&buf, 400, BASE_LINE_Y), Some(Color::BLUE.into()));
        assert_eq!(pixel(&buf, 400, 510), Some(Color::GRASS.into()));
        assert_eq!(pixel(&buf, 400, 590), Some(Color::GROUND.into()));
        assert_eq!(pixel(&buf, 0, 0), Some(Color::SKY_TOP.into()));
    }

    #[test]
    fn missing_images_fall_back_to_shapes() {
        let snapshot = state(
            r#"{
                "field": [{"id": 1, "name": "Charmander", "element": "fire", "health": 60, "x": 300, "y": 300, "is_moving": true}],
                "enemies": [{"id": 2, "name": "Zubat", "health": 40, "x": 600, "y": 200}]
            }"#,
        );
        let mut buf = canvas();
        draw_scene(&mut buf, Some(&snapshot), None);
        assert_eq!(pixel(&buf, 280, 300), Some(Element::Fire.color().into()));
        assert_eq!(pixel(&buf, 330, 255), Some(Color::GOLD.into()));
        assert_eq!(pixel(&buf, 585, 200), Some(Color::DANGER.into()));
        assert_eq!(pixel(&buf, 600, 233), Some(Color::WHITE.into()));
    }

    #[test]
    fn loaded_sprites_replace_the_fallback() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        let bytes = bytes.into_inner();
        let mut images = ImageCache::default();
        images.insert("charmander", Sprite::decode(&bytes, AssetKind::Pokemon.sizes()).ok());
        let snapshot = state(r#"{"field": [{"id": 1, "name": "Charmander", "element": "fire", "health": 60, "x": 300, "y": 300}]}"#);
        let mut buf = canvas();
        draw_scene(&mut buf, Some(&snapshot), Some(&images));
        assert_eq!(pixel(&buf, 280, 300), Some(Color::rgb(10, 20, 30).into()));
    }

    #[test]
    fn far_off_creatures_are_clipped() {
        let snapshot = state(
            r#"{
                "field": [{"id": 1, "name": "Growlithe", "health": 60, "x": 1e30, "y": 1e30, "is_moving": true, "target": 2}],
                "enemies": [{"id": 2, "name": "Geodude", "health": 40, "x": -1e30, "y": 100}]
            }"#,
        );
        let mut buf = canvas();
        draw_scene(&mut buf, Some(&snapshot), None);
        assert_eq!(pixel(&buf, 400, 590), Some(Color::GROUND.into()));
    }

    #[test]
    fn frame_clock_measures_between_frames() {
        let mut clock = FrameClock::default();
        let start = Instant::now();
        assert_eq!(clock.tick(start), Duration::ZERO);
        assert_eq!(clock.tick(start + Duration::from_millis(16)), Duration::from_millis(16));
        clock.stop();
        assert_eq!(clock.tick(start + Duration::from_secs(5)), Duration::ZERO);
    }
}
