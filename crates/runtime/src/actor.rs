//! Session actor - one tokio task owns the game.
//!
//! Commands arrive over a bounded mpsc channel, events leave over an
//! unbounded one. Wall-clock time is mapped onto the session's virtual
//! clock, so the task only ever sleeps until the next due callback or the
//! next command, whichever comes first.

use std::future::pending;
use std::path::PathBuf;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use crate::core::{GameError, RoundSnapshot, Session, Shuffler};
use crate::journal::Journal;
use crate::types::{GameAction, GameEvent};

/// Runtime options
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_capacity: usize,
    pub journal_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_capacity: 32,
            journal_path: None,
        }
    }
}

/// Message to the session task
#[derive(Debug)]
pub enum SessionCommand {
    Action {
        action: GameAction,
        reply: Option<oneshot::Sender<Result<(), GameError>>>,
    },
    Snapshot(oneshot::Sender<RoundSnapshot>),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// The session task has stopped
    Closed,
    /// Command queue is full
    Busy,
    Game(GameError),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Closed => f.write_str("session task has stopped"),
            RuntimeError::Busy => f.write_str("session command queue is full"),
            RuntimeError::Game(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<GameError> for RuntimeError {
    fn from(value: GameError) -> Self {
        RuntimeError::Game(value)
    }
}

/// Cloneable handle to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Apply an action and wait for the verdict
    pub async fn dispatch(&self, action: GameAction) -> Result<(), RuntimeError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Action {
                action,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        reply_rx.await.map_err(|_| RuntimeError::Closed)??;
        Ok(())
    }

    pub async fn start(&self) -> Result<(), RuntimeError> {
        self.dispatch(GameAction::Start).await
    }

    pub async fn restart(&self) -> Result<(), RuntimeError> {
        self.dispatch(GameAction::Restart).await
    }

    pub async fn select_tile(&self, position: usize) -> Result<(), RuntimeError> {
        self.dispatch(GameAction::SelectTile(position)).await
    }

    /// Queue an action without waiting. Rejections only show up in the log.
    pub fn try_dispatch(&self, action: GameAction) -> Result<(), RuntimeError> {
        self.tx
            .try_send(SessionCommand::Action {
                action,
                reply: None,
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => RuntimeError::Busy,
                mpsc::error::TrySendError::Closed(_) => RuntimeError::Closed,
            })
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot, RuntimeError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Snapshot(reply_tx))
            .await
            .map_err(|_| RuntimeError::Closed)?;
        reply_rx.await.map_err(|_| RuntimeError::Closed)
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.tx
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Spawn a session task on the current tokio runtime.
///
/// Returns the command handle, the event stream and the task handle.
pub fn spawn_session<S>(
    session: Session<S>,
    config: &RuntimeConfig,
) -> (
    SessionHandle,
    mpsc::UnboundedReceiver<GameEvent>,
    JoinHandle<()>,
)
where
    S: Shuffler + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>(config.command_capacity.max(1));
    let (event_tx, event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let journal = config.journal_path.clone().map(Journal::spawn);

    let task = tokio::spawn(run_session(session, cmd_rx, event_tx, journal));
    (SessionHandle { tx: cmd_tx }, event_rx, task)
}

/// Session task body.
///
/// Runs until a `Shutdown` command arrives or every handle is dropped.
pub async fn run_session<S: Shuffler>(
    mut session: Session<S>,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    mut journal: Option<Journal>,
) {
    let origin = Instant::now() - Duration::from_millis(session.now_ms());
    let mut publish = |now_ms: u64, events: Vec<GameEvent>| {
        for event in events {
            if let Some(j) = journal.as_mut() {
                j.record(now_ms, &event);
            }
            // A dropped receiver is fine; the game keeps running headless.
            let _ = event_tx.send(event);
        }
    };

    log::debug!("session task started");
    loop {
        let deadline = session
            .next_due_ms()
            .map(|ms| origin + Duration::from_millis(ms));

        tokio::select! {
            cmd = cmd_rx.recv() => {
                // Callbacks due before this command run first.
                let now_ms = elapsed_ms(origin);
                publish(now_ms, session.advance_to(now_ms));

                match cmd {
                    None | Some(SessionCommand::Shutdown) => break,
                    Some(SessionCommand::Action { action, reply }) => {
                        let result = session.dispatch(action).map(|events| publish(now_ms, events));
                        if let Some(reply) = reply {
                            let _ = reply.send(result);
                        }
                    }
                    Some(SessionCommand::Snapshot(reply)) => {
                        let _ = reply.send(session.snapshot());
                    }
                }
            }
            _ = wait_until(deadline) => {
                let now_ms = elapsed_ms(origin);
                publish(now_ms, session.advance_to(now_ms));
            }
        }
    }

    drop(publish);
    if let Some(j) = journal.take() {
        j.close().await;
    }
    log::debug!("session task stopped");
}

fn elapsed_ms(origin: Instant) -> u64 {
    origin.elapsed().as_millis() as u64
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => pending::<()>().await,
    }
}
