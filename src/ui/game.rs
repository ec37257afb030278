use super::hud::{draw_hand, draw_panel, hit_test, HandView, Hit};
use super::modal::{draw_end_modal, draw_quit_modal, end_modal_hit, quit_modal_hit};
use super::render::{draw_scene, FrameClock, CANVAS_HEIGHT, CANVAS_WIDTH};
use super::session::{InputEvent, Phase, Session};
use crate::assets::ImageCache;
use crate::error::ClientError;
use crate::gfx::buffer::Buffer;
use crate::net::{Command, GameClient};
use crate::window::{digit, Key, Window};
use log::{debug, warn};
use std::time::{Duration, Instant};
use tokio::sync::oneshot::{self, error::TryRecvError};

const SLOW_FRAME: Duration = Duration::from_millis(100);

fn dispatch(client: &mut GameClient, commands: Vec<Command>) -> Result<(), ClientError> {
    for cmd in commands {
        client.send(cmd)?;
    }
    Ok(())
}

fn card_event(session: &Session, index: usize) -> Option<InputEvent> {
    let card = session.snapshot()?.hand.get(index)?;
    Some(InputEvent::CardSelected { card_id: card.id, slot: index })
}

fn read_input(win: &mut Window, session: &Session) -> Vec<InputEvent> {
    let keys = win.keys_pressed();
    let click = win.mouse_clicked();
    let mut events = Vec::new();
    if session.quit_prompt_open() {
        for key in keys {
            match key {
                Key::Y => events.push(InputEvent::QuitConfirmed(true)),
                Key::N | Key::Escape => events.push(InputEvent::QuitConfirmed(false)),
                _ => {}
            }
        }
        events.extend(click.and_then(|(x, y)| quit_modal_hit(x, y)));
    } else if let Phase::Ended { .. } = session.phase() {
        for key in keys {
            match key {
                Key::Enter => events.push(InputEvent::PlayAgain),
                Key::Escape => events.push(InputEvent::ReturnToLobby),
                _ => {}
            }
        }
        events.extend(click.and_then(|(x, y)| end_modal_hit(x, y)));
    } else {
        let hand = HandView::of(session);
        for key in keys {
            match key {
                Key::O => events.push(InputEvent::OpenPokeball),
                Key::P | Key::Space => events.push(InputEvent::TogglePause),
                Key::Escape => events.push(InputEvent::QuitRequested),
                Key::Left => events.push(InputEvent::PageHand(-1)),
                Key::Right => events.push(InputEvent::PageHand(1)),
                key => {
                    // number keys pick from the cards on screen
                    if let Some(number @ 1..=9) = digit(key) {
                        if let Some(index) = hand.indices().nth(number as usize - 1) {
                            events.extend(card_event(session, index));
                        }
                    }
                }
            }
        }
        let hit = click.and_then(|(x, y)| hit_test(x, y, hand));
        match hit {
            Some(Hit::Canvas { x, y }) => events.push(InputEvent::CanvasClicked { x, y }),
            Some(Hit::Card(index)) => events.extend(card_event(session, index)),
            Some(Hit::NextPage) => events.push(InputEvent::PageHand(1)),
            Some(Hit::OpenPokeball) => events.push(InputEvent::OpenPokeball),
            Some(Hit::Pause) => events.push(InputEvent::TogglePause),
            Some(Hit::Quit) => events.push(InputEvent::QuitRequested),
            None => {}
        }
    }
    events
}

/// Runs one game session until the player leaves for the lobby.
pub fn game(
    win: &mut Window,
    client: &mut GameClient,
    mut loader: oneshot::Receiver<ImageCache>,
) -> Result<(), ClientError> {
    let mut session = Session::new();
    let mut images: Option<ImageCache> = None;
    let mut canvas = Buffer::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut clock = FrameClock::default();
    let commands = session.start();
    dispatch(client, commands)?;
    loop {
        if images.is_none() {
            match loader.try_recv() {
                Ok(cache) => images = Some(cache),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    warn!("Image loader stopped, drawing placeholders only");
                    images = Some(ImageCache::default());
                }
            }
        }
        while let Some(outcome) = client.recv()? {
            let commands = session.handle_outcome(outcome);
            dispatch(client, commands)?;
        }
        for event in read_input(win, &session) {
            let commands = session.handle_input(event);
            dispatch(client, commands)?;
        }
        if session.is_finished() {
            return Ok(());
        }

        let now = Instant::now();
        session.notifier.expire(now);
        if session.is_rendering() {
            if clock.tick(now) > SLOW_FRAME {
                debug!("Slow frame: {:?}", clock.elapsed());
            }
            draw_scene(&mut canvas, session.snapshot(), images.as_ref());
        } else {
            clock.stop();
        }
        win.buf.draw_buffer(&canvas, 0, 0);
        draw_panel(&mut win.buf, &session);
        draw_hand(&mut win.buf, &session, images.as_ref());
        if let Phase::Ended { victory } = session.phase() {
            draw_end_modal(&mut win.buf, victory, session.snapshot());
        }
        if session.quit_prompt_open() {
            draw_quit_modal(&mut win.buf);
        }
        session.notifier.draw(&mut win.buf, CANVAS_WIDTH as i32);
        win.update()?;
    }
}
