use super::session::{Phase, Selection, Session};
use crate::assets::{ImageCache, CARD_SPRITE_SIZE, ICON_SIZE};
use crate::data::state::{Card, GameState};
use crate::gfx::buffer::Buffer;
use crate::gfx::color::Color;
use crate::gfx::glyph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32 && y >= self.y as f32 && x < (self.x + self.w) as f32 && y < (self.y + self.h) as f32
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }
}

pub const CANVAS: Rect = Rect::new(0, 0, 800, 600);
pub const PANEL: Rect = Rect::new(800, 0, 200, 600);
pub const HAND: Rect = Rect::new(0, 600, 1000, 160);
pub const POKEBALL_BUTTON: Rect = Rect::new(810, 250, 180, 40);
pub const PAUSE_BUTTON: Rect = Rect::new(810, 300, 180, 40);
pub const QUIT_BUTTON: Rect = Rect::new(810, 350, 180, 40);

pub const MAX_VISIBLE_CARDS: usize = 9;
/// Cards per page once the last slot becomes the pager.
const PAGE_SIZE: usize = MAX_VISIBLE_CARDS - 1;
const CARD_WIDTH: i32 = 104;
const CARD_HEIGHT: i32 = 150;
const CARD_STRIDE: i32 = 110;
const PAGER: Rect = card_rect(PAGE_SIZE);

const HEALTH_BAR: Rect = Rect::new(832, 42, 120, 12);

pub const fn card_rect(slot: usize) -> Rect {
    Rect::new(10 + slot as i32 * CARD_STRIDE, HAND.y + 5, CARD_WIDTH, CARD_HEIGHT)
}

/// Which part of the hand is on screen. A hand that fits shows every card,
/// a longer one is shown a page at a time with a pager in the last slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandView {
    pub first: usize,
    pub shown: usize,
    pub page: usize,
    pub pages: usize,
    total: usize,
}

impl HandView {
    pub fn new(total: usize, page: i32) -> Self {
        if total <= MAX_VISIBLE_CARDS {
            return Self {
                first: 0,
                shown: total,
                page: 0,
                pages: 1,
                total,
            };
        }
        let pages = total.div_ceil(PAGE_SIZE);
        let page = i64::from(page).rem_euclid(pages as i64) as usize;
        let first = page * PAGE_SIZE;
        Self {
            first,
            shown: PAGE_SIZE.min(total - first),
            page,
            pages,
            total,
        }
    }

    pub fn of(session: &Session) -> Self {
        let total = session.snapshot().map_or(0, |state| state.hand.len());
        Self::new(total, session.hand_page())
    }

    pub fn is_paged(&self) -> bool {
        self.pages > 1
    }

    /// Hand indices on screen, in slot order.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.first..self.first + self.shown
    }

    pub fn hidden(&self) -> usize {
        self.total - self.shown
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Canvas { x: f32, y: f32 },
    /// Index into the whole hand, not the on-screen slot.
    Card(usize),
    NextPage,
    OpenPokeball,
    Pause,
    Quit,
}

pub fn hit_test(x: f32, y: f32, hand: HandView) -> Option<Hit> {
    if CANVAS.contains(x, y) {
        return Some(Hit::Canvas { x, y });
    }
    if POKEBALL_BUTTON.contains(x, y) {
        return Some(Hit::OpenPokeball);
    }
    if PAUSE_BUTTON.contains(x, y) {
        return Some(Hit::Pause);
    }
    if QUIT_BUTTON.contains(x, y) {
        return Some(Hit::Quit);
    }
    if hand.is_paged() && PAGER.contains(x, y) {
        return Some(Hit::NextPage);
    }
    hand.indices()
        .enumerate()
        .find(|&(slot, _)| card_rect(slot).contains(x, y))
        .map(|(_, index)| Hit::Card(index))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Critical,
    Wounded,
    Healthy,
}

impl HealthBand {
    pub fn of(player_health: i32) -> Self {
        match player_health.clamp(0, 100) {
            0..=29 => HealthBand::Critical,
            30..=59 => HealthBand::Wounded,
            _ => HealthBand::Healthy,
        }
    }

    fn gradient(&self) -> (Color, Color) {
        match self {
            HealthBand::Critical => (Color::DANGER, Color::DANGER_LIGHT),
            HealthBand::Wounded => (Color::WARNING, Color::WARNING_LIGHT),
            HealthBand::Healthy => (Color::SUCCESS, Color::LAWN_GREEN),
        }
    }
}

/// Width in pixels of the player health fill.
pub fn health_fill(player_health: i32) -> i32 {
    HEALTH_BAR.w * player_health.clamp(0, 100) / 100
}

pub(super) fn draw_button(buf: &mut Buffer, rect: Rect, lines: &str, fill: Color, enabled: bool) {
    let (fill, text) = if enabled {
        (fill, Color::WHITE)
    } else {
        (Color::MUTED, Color::LIGHT_GREY)
    };
    buf.fill_rect(rect.x, rect.y, rect.w, rect.h, fill);
    buf.stroke_rect(rect.x, rect.y, rect.w, rect.h, 1, Color::DARK_GREY);
    let line_count = lines.lines().count() as i32;
    let top = rect.y + (rect.h - (line_count * 10 - 2)) / 2;
    buf.center_text(lines, rect.center_x(), top, 1, text);
}

fn draw_stats(buf: &mut Buffer, state: &GameState) {
    buf.draw_text("HP", 810, 44, 1, Color::WHITE);
    let (left, right) = HealthBand::of(state.player_health).gradient();
    let bar = HEALTH_BAR;
    buf.fill_rect(bar.x, bar.y, bar.w, bar.h, Color::PANEL_LIGHT);
    buf.horizontal_gradient(bar.x, bar.y, health_fill(state.player_health), bar.h, left, right);
    buf.stroke_rect(bar.x, bar.y, bar.w, bar.h, 1, Color::DARK_GREY);
    buf.draw_text(&state.player_health.to_string(), 958, 44, 1, Color::WHITE);

    let rows = [
        ("Level", state.player_level.to_string()),
        ("Exp", format!("{}/{}", state.player_exp, state.player_max_exp)),
        ("Wave", state.wave.to_string()),
        ("Score", state.score.to_string()),
        ("Pokeballs", state.pokeballs.to_string()),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = 74 + i as i32 * 24;
        buf.draw_text(label, 810, y, 1, Color::LIGHT_GREY);
        buf.draw_text(value, 990 - Buffer::text_width(value, 1), y, 1, Color::WHITE);
    }
}

pub fn draw_panel(buf: &mut Buffer, session: &Session) {
    buf.fill_rect(PANEL.x, PANEL.y, PANEL.w, PANEL.h, Color::PANEL);
    buf.center_text("PokeTD", PANEL.center_x(), 12, 2, Color::GOLD);
    let pokeballs = match session.snapshot() {
        Some(state) => {
            draw_stats(buf, state);
            state.pokeballs
        }
        None => {
            buf.center_text("Loading...", PANEL.center_x(), 120, 1, Color::LIGHT_GREY);
            0
        }
    };
    let label = format!("Open Pokeball\n(Left: {pokeballs})");
    draw_button(buf, POKEBALL_BUTTON, &label, Color::DANGER, pokeballs > 0);
    let ended = matches!(session.phase(), Phase::Ended { .. });
    let paused = session.phase() == Phase::Paused;
    draw_button(buf, PAUSE_BUTTON, if paused { "Resume" } else { "Pause" }, Color::INFO, !ended);
    draw_button(buf, QUIT_BUTTON, "Quit", Color::DARK_GREY, !ended);
    if paused {
        buf.center_text("PAUSED", PANEL.center_x(), 420, 2, Color::WARNING);
    }
    if let Some(selection) = session.selection() {
        let hint = format!("Card {} selected", selection.slot + 1);
        buf.center_text(&hint, PANEL.center_x(), 460, 1, Color::LIGHT_GREY);
    }
}

fn truncate(name: &str, len: usize) -> String {
    name.chars().take(len).collect()
}

fn draw_card(buf: &mut Buffer, rect: Rect, card: &Card, selected: bool, images: Option<&ImageCache>) {
    if selected {
        for (ring, opacity) in [(3, 0.15), (2, 0.3), (1, 0.5)] {
            buf.stroke_rect_alpha(rect.x - ring, rect.y - ring, rect.w + 2 * ring, rect.h + 2 * ring, Color::RED, opacity);
        }
    }
    buf.fill_rect(rect.x, rect.y, rect.w, rect.h, Color::CARD);
    if selected {
        buf.stroke_rect(rect.x, rect.y, rect.w, rect.h, 2, Color::RED);
    } else {
        buf.stroke_rect(rect.x, rect.y, rect.w, rect.h, 1, Color::LIGHT_GREY);
    }
    let cx = rect.center_x();
    let top = rect.y;
    buf.center_text(&truncate(&card.name, 12), cx, top + 6, 1, Color::BLACK);
    match images.and_then(|images| images.sprite_at(&card.name, CARD_SPRITE_SIZE)) {
        Some(sprite) => buf.draw_sprite(sprite, cx - 30, top + 18, 1.0),
        None => buf.draw_glyph(card.element.glyph(), cx - 16, top + 32, 4, card.element.color()),
    }
    buf.draw_text(&format!("HP  {}", card.health), rect.x + 8, top + 82, 1, Color::DARK_GREY);
    buf.draw_text(&format!("ATK {}", card.attack), rect.x + 8, top + 92, 1, Color::DARK_GREY);
    buf.draw_text(&format!("SPD {:.1}", card.speed), rect.x + 8, top + 102, 1, Color::DARK_GREY);
    let tag = card.element.as_str().to_uppercase();
    let tag_width = Buffer::text_width(&tag, 1) + 8;
    buf.fill_rect(cx - tag_width / 2, top + 113, tag_width, 12, card.element.color());
    buf.center_text(&tag, cx, top + 115, 1, Color::WHITE);
    buf.center_text("Click to\nselect", cx, top + 130, 1, Color::MUTED);
}

fn draw_pager(buf: &mut Buffer, view: HandView) {
    let rect = PAGER;
    let cx = rect.center_x();
    buf.fill_rect(rect.x, rect.y, rect.w, rect.h, Color::PANEL_LIGHT);
    buf.stroke_rect(rect.x, rect.y, rect.w, rect.h, 1, Color::DARK_GREY);
    buf.center_text(&format!("+{} more", view.hidden()), cx, rect.y + 30, 1, Color::WHITE);
    buf.center_text(&format!("Page {}/{}", view.page + 1, view.pages), cx, rect.y + 55, 1, Color::LIGHT_GREY);
    buf.draw_glyph(&glyph::POKEBALL, cx - 16, rect.y + 75, 4, Color::GOLD);
    buf.center_text("Next\n< > keys", cx, rect.y + 120, 1, Color::LIGHT_GREY);
}

fn draw_empty_hand(buf: &mut Buffer, images: Option<&ImageCache>) {
    let cx = HAND.center_x();
    match images.and_then(|images| images.sprite_at("pokeball", ICON_SIZE)) {
        Some(icon) => buf.draw_sprite(icon, cx - ICON_SIZE as i32 / 2, HAND.y + 30, 0.5),
        None => buf.draw_glyph(&glyph::POKEBALL, cx - 24, HAND.y + 31, 6, Color::MUTED),
    }
    buf.center_text(
        "No cards in hand. Open a pokeball to get Pokemon!",
        cx,
        HAND.y + 95,
        1,
        Color::MUTED,
    );
}

pub fn draw_hand(buf: &mut Buffer, session: &Session, images: Option<&ImageCache>) {
    buf.fill_rect(HAND.x, HAND.y, HAND.w, HAND.h, Color::SKY_BOTTOM);
    if let Some(state) = session.snapshot() {
        if state.hand.is_empty() {
            draw_empty_hand(buf, images);
        }
        let view = HandView::new(state.hand.len(), session.hand_page());
        for (slot, index) in view.indices().enumerate() {
            let card = &state.hand[index];
            let selected = session.selection() == Some(Selection { card_id: card.id, slot: index });
            draw_card(buf, card_rect(slot), card, selected, images);
        }
        if view.is_paged() {
            draw_pager(buf, view);
        }
    }
}
