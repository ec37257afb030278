use super::hud::{draw_button, Rect};
use super::session::InputEvent;
use crate::data::state::GameState;
use crate::gfx::buffer::Buffer;
use crate::gfx::color::Color;

const END_DIALOG: Rect = Rect::new(300, 190, 400, 270);
const PLAY_AGAIN_BUTTON: Rect = Rect::new(320, 400, 170, 40);
const LOBBY_BUTTON: Rect = Rect::new(510, 400, 170, 40);

const QUIT_DIALOG: Rect = Rect::new(325, 230, 350, 150);
const YES_BUTTON: Rect = Rect::new(355, 315, 135, 40);
const NO_BUTTON: Rect = Rect::new(510, 315, 135, 40);

fn draw_dialog(buf: &mut Buffer, dialog: Rect) {
    buf.fill_rect_alpha(0, 0, buf.width as i32, buf.height as i32, Color::BLACK, 0.6);
    buf.fill_rect(dialog.x, dialog.y, dialog.w, dialog.h, Color::CARD);
    buf.stroke_rect(dialog.x, dialog.y, dialog.w, dialog.h, 2, Color::DARK_GREY);
}

pub fn draw_end_modal(buf: &mut Buffer, victory: bool, state: Option<&GameState>) {
    draw_dialog(buf, END_DIALOG);
    let cx = END_DIALOG.center_x();
    let (title, color) = if victory {
        ("VICTORY!", Color::SUCCESS)
    } else {
        ("GAME OVER", Color::DANGER)
    };
    buf.center_text(title, cx, END_DIALOG.y + 30, 3, color);
    if let Some(state) = state {
        let lines = [
            format!("Final score: {}", state.score),
            format!("Waves completed: {}", state.waves_completed()),
            format!("Enemies defeated: {}", state.enemies_defeated()),
        ];
        for (i, line) in lines.iter().enumerate() {
            buf.center_text(line, cx, END_DIALOG.y + 100 + i as i32 * 22, 1, Color::DARK_GREY);
        }
    }
    draw_button(buf, PLAY_AGAIN_BUTTON, "Play Again", Color::SUCCESS, true);
    draw_button(buf, LOBBY_BUTTON, "Return to Lobby", Color::INFO, true);
}

pub fn end_modal_hit(x: f32, y: f32) -> Option<InputEvent> {
    if PLAY_AGAIN_BUTTON.contains(x, y) {
        Some(InputEvent::PlayAgain)
    } else if LOBBY_BUTTON.contains(x, y) {
        Some(InputEvent::ReturnToLobby)
    } else {
        None
    }
}

pub fn draw_quit_modal(buf: &mut Buffer) {
    draw_dialog(buf, QUIT_DIALOG);
    buf.center_text("Are you sure you want to quit?", QUIT_DIALOG.center_x(), QUIT_DIALOG.y + 35, 1, Color::BLACK);
    draw_button(buf, YES_BUTTON, "Yes (Y)", Color::DANGER, true);
    draw_button(buf, NO_BUTTON, "No (N)", Color::GREY, true);
}

pub fn quit_modal_hit(x: f32, y: f32) -> Option<InputEvent> {
    if YES_BUTTON.contains(x, y) {
        Some(InputEvent::QuitConfirmed(true))
    } else if NO_BUTTON.contains(x, y) {
        Some(InputEvent::QuitConfirmed(false))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::state::SnapshotPayload;
    use crate::window::{HEIGHT, WIDTH};

    #[test]
    fn end_modal_buttons() {
        assert_eq!(end_modal_hit(400.0, 420.0), Some(InputEvent::PlayAgain));
        assert_eq!(end_modal_hit(600.0, 420.0), Some(InputEvent::ReturnToLobby));
        assert_eq!(end_modal_hit(500.0, 300.0), None);
    }

    #[test]
    fn quit_modal_buttons() {
        assert_eq!(quit_modal_hit(400.0, 330.0), Some(InputEvent::QuitConfirmed(true)));
        assert_eq!(quit_modal_hit(600.0, 330.0), Some(InputEvent::QuitConfirmed(false)));
        assert_eq!(quit_modal_hit(10.0, 10.0), None);
    }

    #[test]
    fn title_colour_follows_the_result() {
        let state = GameState::from(SnapshotPayload::default());
        let has = |buf: &Buffer, color: Color| {
            let color: u32 = color.into();
            let band = END_DIALOG.y + 30..END_DIALOG.y + 54;
            band.into_iter().any(|y| (END_DIALOG.x..END_DIALOG.x + END_DIALOG.w).any(|x| buf.get_pixel(x, y) == Some(color)))
        };
        let mut won = Buffer::new(WIDTH, HEIGHT);
        draw_end_modal(&mut won, true, Some(&state));
        assert!(has(&won, Color::SUCCESS));
        let mut lost = Buffer::new(WIDTH, HEIGHT);
        draw_end_modal(&mut lost, false, Some(&state));
        assert!(has(&lost, Color::DANGER));
        assert!(!has(&lost, Color::SUCCESS));
    }
}
