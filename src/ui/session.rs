use super::notify::Notifier;
use crate::data::action::{ActionResponse, GameAction};
use crate::data::state::{Card, GameState};
use crate::net::{Command, NetworkError, Outcome};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Running,
    Paused,
    Ended { victory: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub card_id: i64,
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    CardSelected { card_id: i64, slot: usize },
    /// Turn the hand by this many pages.
    PageHand(i32),
    CanvasClicked { x: f32, y: f32 },
    OpenPokeball,
    TogglePause,
    QuitRequested,
    QuitConfirmed(bool),
    PlayAgain,
    ReturnToLobby,
}

/// Everything the client owns for one game lifecycle.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    snapshot: Option<GameState>,
    selection: Option<Selection>,
    hand_page: i32,
    quit_prompt: bool,
    quitting: bool,
    restarting: bool,
    finished: bool,
    pub notifier: Notifier,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            snapshot: None,
            selection: None,
            hand_page: 0,
            quit_prompt: false,
            quitting: false,
            restarting: false,
            finished: false,
            notifier: Notifier::default(),
        }
    }

    /// Commands to issue when the session first appears.
    pub fn start(&mut self) -> Vec<Command> {
        info!("Session started");
        vec![Command::FetchState]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&GameState> {
        self.snapshot.as_ref()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Unbounded page counter; the hand layout wraps it.
    pub fn hand_page(&self) -> i32 {
        self.hand_page
    }

    pub fn is_rendering(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Running)
    }

    pub fn quit_prompt_open(&self) -> bool {
        self.quit_prompt
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended { .. })
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<Command> {
        if self.finished {
            return Vec::new();
        }
        if self.quit_prompt {
            return match event {
                InputEvent::QuitConfirmed(confirmed) => self.answer_quit(confirmed),
                _ => Vec::new(),
            };
        }
        if self.is_ended() {
            return match event {
                InputEvent::PlayAgain => self.play_again(),
                InputEvent::ReturnToLobby => {
                    self.finished = true;
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }
        match event {
            InputEvent::CardSelected { card_id, slot } => {
                self.select(card_id, slot);
                Vec::new()
            }
            InputEvent::PageHand(delta) => {
                self.hand_page = self.hand_page.wrapping_add(delta);
                Vec::new()
            }
            InputEvent::CanvasClicked { x, y } => self.place(x, y),
            InputEvent::OpenPokeball => self.open_pokeball(),
            InputEvent::TogglePause => self.toggle_pause(),
            InputEvent::QuitRequested => {
                if !self.quitting {
                    self.quit_prompt = true;
                }
                Vec::new()
            }
            InputEvent::QuitConfirmed(_) | InputEvent::PlayAgain | InputEvent::ReturnToLobby => Vec::new(),
        }
    }

    fn select(&mut self, card_id: i64, slot: usize) {
        let selection = Selection { card_id, slot };
        if self.selection == Some(selection) {
            return;
        }
        self.selection = Some(selection);
        self.notifier.info("Card selected. Now click on the field to place it.");
    }

    fn place(&mut self, x: f32, y: f32) -> Vec<Command> {
        match self.selection {
            None => {
                self.notifier.info("Select a card first by clicking on it");
                Vec::new()
            }
            Some(selection) => vec![Command::Act(GameAction::play_card(selection.card_id, x, y))],
        }
    }

    fn open_pokeball(&mut self) -> Vec<Command> {
        match self.snapshot {
            Some(ref state) if state.pokeballs > 0 => vec![Command::Act(GameAction::OpenPokeball)],
            _ => {
                self.notifier.error("No pokeballs left!");
                Vec::new()
            }
        }
    }

    fn toggle_pause(&mut self) -> Vec<Command> {
        match self.phase {
            Phase::Loading | Phase::Running => {
                self.enter(Phase::Paused);
                vec![Command::SetPolling(false)]
            }
            Phase::Paused => {
                let resumed = if self.snapshot.is_some() {
                    Phase::Running
                } else {
                    Phase::Loading
                };
                self.enter(resumed);
                vec![Command::SetPolling(true)]
            }
            Phase::Ended { .. } => Vec::new(),
        }
    }

    fn answer_quit(&mut self, confirmed: bool) -> Vec<Command> {
        self.quit_prompt = false;
        if !confirmed {
            return Vec::new();
        }
        self.quitting = true;
        vec![Command::SetPolling(false), Command::EndGame]
    }

    fn play_again(&mut self) -> Vec<Command> {
        if self.restarting {
            return Vec::new();
        }
        self.restarting = true;
        vec![Command::StartGame]
    }

    pub fn handle_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        if self.finished {
            return Vec::new();
        }
        match outcome {
            Outcome::Snapshot(state) => self.apply_snapshot(state),
            Outcome::PollFailed(err) => {
                warn!("Error updating game state: {err}");
                Vec::new()
            }
            Outcome::Acted { action, result } => self.acted(action, result),
            Outcome::GameEnded(result) => self.game_ended(result),
            Outcome::GameStarted(result) => self.game_started(result),
        }
    }

    fn apply_snapshot(&mut self, state: GameState) -> Vec<Command> {
        if self.is_ended() {
            debug!("Ignoring snapshot after game over");
            return Vec::new();
        }
        if state.game_over {
            let victory = state.victory;
            self.snapshot = Some(state);
            self.quit_prompt = false;
            self.enter(Phase::Ended { victory });
            return vec![Command::SetPolling(false)];
        }
        self.follow_selection(&state.hand);
        self.snapshot = Some(state);
        if self.phase == Phase::Loading {
            self.enter(Phase::Running);
        }
        Vec::new()
    }

    /// Keeps the selection on the same card as the hand shifts, dropping it once the card is gone.
    fn follow_selection(&mut self, hand: &[Card]) {
        let selection = match self.selection {
            Some(selection) => selection,
            None => return,
        };
        if hand.get(selection.slot).is_some_and(|card| card.id == selection.card_id) {
            return;
        }
        self.selection = match hand.iter().position(|card| card.id == selection.card_id) {
            Some(slot) => Some(Selection { slot, ..selection }),
            None => {
                debug!("Selected card {} left the hand", selection.card_id);
                None
            }
        };
    }

    fn refresh(&self) -> Vec<Command> {
        if self.is_ended() {
            Vec::new()
        } else {
            vec![Command::FetchState]
        }
    }

    fn acted(&mut self, action: GameAction, result: Result<ActionResponse, NetworkError>) -> Vec<Command> {
        match (action, result) {
            (GameAction::OpenPokeball, Ok(response)) if response.success => {
                match response.pokemon {
                    Some(card) => self.notifier.success(format!("Got {}!", card.name)),
                    None => self.notifier.success("Got a new Pokemon!"),
                }
                self.refresh()
            }
            (GameAction::OpenPokeball, Ok(response)) => {
                let message = response.error.unwrap_or_else(|| "Failed to open pokeball".to_string());
                self.notifier.error(message);
                Vec::new()
            }
            (GameAction::OpenPokeball, Err(err)) => {
                warn!("Error opening pokeball: {err}");
                self.notifier.error("Failed to open pokeball");
                Vec::new()
            }
            (GameAction::PlayCard { .. }, Ok(response)) if response.success => {
                self.notifier.success("Pokemon placed on field!");
                self.selection = None;
                self.refresh()
            }
            (GameAction::PlayCard { .. }, Ok(response)) => {
                let message = response.error.unwrap_or_else(|| "Cannot place here".to_string());
                self.notifier.error(message);
                Vec::new()
            }
            (GameAction::PlayCard { .. }, Err(err)) => {
                warn!("Error playing card: {err}");
                self.notifier.error("Failed to place pokemon");
                Vec::new()
            }
        }
    }

    fn game_ended(&mut self, result: Result<(), NetworkError>) -> Vec<Command> {
        if !self.quitting {
            return Vec::new();
        }
        self.quitting = false;
        match result {
            Ok(()) => {
                info!("Game ended, returning to lobby");
                self.finished = true;
                Vec::new()
            }
            Err(err) => {
                warn!("Error ending game: {err}");
                self.notifier.error("Failed to quit game");
                if matches!(self.phase, Phase::Loading | Phase::Running) {
                    vec![Command::SetPolling(true)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn game_started(&mut self, result: Result<(), NetworkError>) -> Vec<Command> {
        if !self.restarting {
            return Vec::new();
        }
        self.restarting = false;
        match result {
            Ok(()) => {
                self.snapshot = None;
                self.selection = None;
                self.hand_page = 0;
                self.enter(Phase::Loading);
                vec![Command::SetPolling(true), Command::FetchState]
            }
            Err(err) => {
                warn!("Error restarting game: {err}");
                self.notifier.error("Failed to restart game");
                Vec::new()
            }
        }
    }
}
