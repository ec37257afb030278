mod api;
mod client;
mod error;
use crate::data::action::{ActionResponse, GameAction};
use crate::data::state::GameState;
pub use api::{AssetSource, GameApi, HttpApi};
pub use client::GameClient;
pub use error::NetworkError;

/// Requests from the session to the network task.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchState,
    Act(GameAction),
    EndGame,
    StartGame,
    SetPolling(bool),
    Shutdown,
}

/// What the network task reports back, one per completed request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Snapshot(GameState),
    PollFailed(NetworkError),
    Acted {
        action: GameAction,
        result: Result<ActionResponse, NetworkError>,
    },
    GameEnded(Result<(), NetworkError>),
    GameStarted(Result<(), NetworkError>),
}
