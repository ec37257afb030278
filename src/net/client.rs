use super::{Command, GameApi, NetworkError, Outcome};
use std::sync::Arc;
use tokio::select;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

async fn perform<A: GameApi>(api: &A, cmd: Command) -> Option<Outcome> {
    let outcome = match cmd {
        Command::FetchState => match api.fetch_state().await {
            Ok(state) => Outcome::Snapshot(state),
            Err(err) => Outcome::PollFailed(err),
        },
        Command::Act(action) => Outcome::Acted {
            action: action.clone(),
            result: api.send_action(action).await,
        },
        Command::EndGame => Outcome::GameEnded(api.end_game().await),
        Command::StartGame => Outcome::GameStarted(api.start_game().await),
        Command::SetPolling(_) | Command::Shutdown => return None,
    };
    Some(outcome)
}

fn spawn_request<A: GameApi>(api: &Arc<A>, tx: &mpsc::Sender<Outcome>, cmd: Command) {
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Some(outcome) = perform(api.as_ref(), cmd).await {
            if tx.send(outcome).await.is_err() {
                log::debug!("Dropping outcome, session is gone");
            }
        }
    });
}

async fn client_loop<A: GameApi>(
    api: Arc<A>,
    period: Duration,
    tx: mpsc::Sender<Outcome>,
    mut rx: mpsc::Receiver<Command>,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polling = true;
    loop {
        select! {
            _ = interval.tick(), if polling => {
                spawn_request(&api, &tx, Command::FetchState);
            }
            msg = rx.recv() => {
                match msg {
                    Some(Command::SetPolling(enabled)) => {
                        if enabled && !polling {
                            interval.reset();
                        }
                        polling = enabled;
                    }
                    Some(Command::Shutdown) | None => return,
                    Some(cmd) => spawn_request(&api, &tx, cmd),
                }
            }
        }
    }
}

/// Handle to the network task. Commands go in, outcomes come back out; neither side blocks the window.
pub struct GameClient {
    tx: mpsc::Sender<Command>,
    rx: mpsc::Receiver<Outcome>,
}

impl GameClient {
    pub fn new<A: GameApi>(api: A, poll_every: Duration) -> Self {
        let (conn_tx, conn_rx) = mpsc::channel(64);
        let (send_tx, send_rx) = mpsc::channel(64);
        tokio::spawn(client_loop(Arc::new(api), poll_every, conn_tx, send_rx));
        Self {
            tx: send_tx,
            rx: conn_rx,
        }
    }

    pub fn send(&mut self, cmd: Command) -> Result<(), NetworkError> {
        log::debug!("Dispatching {cmd:?}");
        self.tx.try_send(cmd)?;
        Ok(())
    }

    pub fn recv(&mut self) -> Result<Option<Outcome>, NetworkError> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(NetworkError::Disconnected),
        }
    }

    pub fn disconnect(self) -> Result<(), NetworkError> {
        self.tx.try_send(Command::Shutdown)?;
        Ok(())
    }
}
