//! Bridges a synchronous frame loop with the async session task.

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::actor::{spawn_session, RuntimeConfig, RuntimeError, SessionHandle};
use crate::core::{PresentationSink, RoundSnapshot, Session, Shuffler};
use crate::types::{GameAction, GameEvent};

/// Running session with its own tokio runtime.
pub struct SessionRuntime {
    rt: Runtime,
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<GameEvent>,
    task: Option<JoinHandle<()>>,
}

impl SessionRuntime {
    pub fn start<S>(session: Session<S>, config: RuntimeConfig) -> anyhow::Result<Self>
    where
        S: Shuffler + Send + 'static,
    {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (handle, events, task) = {
            let _guard = rt.enter();
            spawn_session(session, &config)
        };

        Ok(Self {
            rt,
            handle,
            events,
            task: Some(task),
        })
    }

    /// Queue a player action without blocking the frame
    pub fn send(&self, action: GameAction) -> Result<(), RuntimeError> {
        self.handle.try_dispatch(action)
    }

    pub fn try_recv(&mut self) -> Option<GameEvent> {
        self.events.try_recv().ok()
    }

    /// Hand every pending event to `sink`; returns how many were delivered
    pub fn drain_into<P: PresentationSink + ?Sized>(&mut self, sink: &mut P) -> usize {
        let mut n = 0;
        while let Some(event) = self.try_recv() {
            crate::core::deliver(sink, std::slice::from_ref(&event));
            n += 1;
        }
        n
    }

    pub fn snapshot(&self) -> Result<RoundSnapshot, RuntimeError> {
        self.rt.block_on(self.handle.snapshot())
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stop the session task and wait for the journal to flush
    pub fn shutdown(mut self) {
        let _ = self.rt.block_on(self.handle.shutdown());
        if let Some(task) = self.task.take() {
            if let Err(e) = self.rt.block_on(task) {
                log::error!("session task failed: {}", e);
            }
        }
    }
}
