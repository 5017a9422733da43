//! Debounced auto-save for one form.
//!
//! Each coordinator owns a background task holding the latest value. Edits
//! restart a quiet-period timer; when it expires the value is written through
//! a `Saver`. At most one save is outstanding at a time, and an edit that
//! lands mid-save is saved in the next cycle rather than dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::error::{BackendError, SaveError};

use super::saver::Saver;
use super::state::SaveState;

type Reply = oneshot::Sender<Result<(), SaveError>>;

enum Command<T> {
    Update(T),
    Flush(Reply),
    Close(Reply),
}

/// Handle to a running auto-save task.
///
/// Dropping the handle lets the task flush pending edits and exit on its own;
/// `close()` does the same but waits for the outcome.
pub struct AutoSaveCoordinator<T> {
    commands: mpsc::UnboundedSender<Command<T>>,
    state: watch::Receiver<SaveState>,
    task: JoinHandle<()>,
}

impl<T> AutoSaveCoordinator<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Start a coordinator seeded with the value already persisted.
    pub fn spawn(initial: T, delay: Duration, saver: Arc<dyn Saver<T>>) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(SaveState::default());

        let worker = Worker {
            label: saver.label(),
            saver,
            delay,
            latest: initial,
            revision: 0,
            deadline: None,
            in_flight: None,
            waiters: Vec::new(),
            queued: Vec::new(),
            halted: false,
            closing: false,
            state: SaveState::default(),
            state_tx,
        };
        let task = tokio::spawn(worker.run(rx));

        Self {
            commands,
            state,
            task,
        }
    }

    /// Record a new value. Values equal to the latest one are ignored.
    pub fn update(&self, value: T) -> Result<(), SaveError> {
        self.commands
            .send(Command::Update(value))
            .map_err(|_| SaveError::Closed)
    }

    /// Cancel the quiet-period timer and save the latest value now.
    ///
    /// Resolves once a save covering every edit made so far has settled.
    pub async fn save_now(&self) -> Result<(), SaveError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Flush(reply))
            .map_err(|_| SaveError::Closed)?;
        outcome.await.map_err(|_| SaveError::Closed)?
    }

    pub fn state(&self) -> SaveState {
        self.state.borrow().clone()
    }

    /// Watch save state changes, e.g. to drive a status indicator.
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.state.clone()
    }

    /// Flush pending edits, wait for any in-flight save, and stop the task.
    pub async fn close(self) -> Result<(), SaveError> {
        let (reply, outcome) = oneshot::channel();
        if self.commands.send(Command::Close(reply)).is_err() {
            return Err(SaveError::Closed);
        }
        let result = outcome.await.map_err(|_| SaveError::Closed)?;
        if let Err(e) = self.task.await {
            warn!(error = %e, "Auto-save task ended abnormally");
        }
        result
    }
}

struct InFlight {
    revision: u64,
    save: BoxFuture<'static, Result<(), BackendError>>,
}

struct Worker<T> {
    label: String,
    saver: Arc<dyn Saver<T>>,
    delay: Duration,
    latest: T,
    /// Bumped on every accepted edit.
    revision: u64,
    deadline: Option<Instant>,
    in_flight: Option<InFlight>,
    /// Waiting on the in-flight save.
    waiters: Vec<Reply>,
    /// Waiting on a save of edits newer than the in-flight one.
    queued: Vec<Reply>,
    /// Set after a stale-token failure; no further saves are attempted.
    halted: bool,
    closing: bool,
    state: SaveState,
    state_tx: watch::Sender<SaveState>,
}

impl<T> Worker<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command<T>>) {
        debug!(form = %self.label, "Auto-save coordinator started");

        loop {
            if self.closing && self.in_flight.is_none() {
                break;
            }

            let timer_armed = self.in_flight.is_none() && self.deadline.is_some();
            let deadline = self.deadline.unwrap_or_else(Instant::now);

            tokio::select! {
                command = commands.recv(), if !self.closing => match command {
                    Some(Command::Update(value)) => self.on_update(value),
                    Some(Command::Flush(reply)) => self.flush(Some(reply)),
                    Some(Command::Close(reply)) => self.begin_close(Some(reply)),
                    None => self.begin_close(None),
                },
                _ = sleep_until(deadline), if timer_armed => {
                    debug!(form = %self.label, "Quiet period elapsed");
                    self.start_save();
                }
                result = settle(&mut self.in_flight) => self.on_settled(result),
            }
        }

        debug!(form = %self.label, "Auto-save coordinator stopped");
    }

    fn on_update(&mut self, value: T) {
        if value == self.latest {
            return;
        }
        self.latest = value;
        self.revision += 1;
        self.state.dirty = true;

        // While a save is outstanding the timer is re-armed when it settles.
        if !self.halted && self.in_flight.is_none() {
            self.deadline = Some(Instant::now() + self.delay);
        }
        self.publish();
    }

    fn flush(&mut self, reply: Option<Reply>) {
        if self.halted {
            respond(reply, Err(BackendError::StaleToken.into()));
            return;
        }
        self.deadline = None;

        match self.in_flight.as_ref().map(|f| f.revision) {
            Some(revision) if revision == self.revision => self.waiters.extend(reply),
            Some(_) => self.queued.extend(reply),
            None => {
                self.waiters.extend(reply);
                self.start_save();
            }
        }
    }

    fn begin_close(&mut self, reply: Option<Reply>) {
        self.closing = true;
        self.deadline = None;

        if self.state.dirty && !self.halted {
            self.flush(reply);
        } else if self.in_flight.is_some() {
            self.waiters.extend(reply);
        } else if self.state.dirty {
            respond(reply, Err(BackendError::StaleToken.into()));
        } else {
            respond(reply, Ok(()));
        }
    }

    fn start_save(&mut self) {
        self.deadline = None;

        let saver = Arc::clone(&self.saver);
        let value = self.latest.clone();
        self.in_flight = Some(InFlight {
            revision: self.revision,
            save: Box::pin(async move { saver.save(value).await }),
        });

        self.state.in_flight = true;
        self.state.last_error = None;
        self.publish();
        debug!(form = %self.label, revision = self.revision, "Saving");
    }

    fn on_settled(&mut self, result: Result<(), BackendError>) {
        let Some(finished) = self.in_flight.take() else {
            return;
        };
        self.state.in_flight = false;

        match &result {
            Ok(()) => {
                self.state.last_saved = Some(Utc::now());
                self.state.dirty = finished.revision != self.revision;
                info!(form = %self.label, revision = finished.revision, "Auto-saved");
            }
            Err(e) => {
                self.state.dirty = true;
                self.state.last_error = Some(e.clone());
                if e.is_stale_token() {
                    self.halted = true;
                    warn!(form = %self.label, "Auto-save stopped: session token rejected");
                } else {
                    warn!(form = %self.label, error = %e, "Auto-save failed");
                }
            }
        }

        self.publish();
        for reply in self.waiters.drain(..) {
            let _ = reply.send(result.clone().map_err(SaveError::from));
        }

        if self.halted {
            for reply in self.queued.drain(..) {
                let _ = reply.send(Err(BackendError::StaleToken.into()));
            }
        } else if !self.queued.is_empty() {
            self.waiters.append(&mut self.queued);
            self.start_save();
        } else if finished.revision != self.revision {
            if self.closing {
                self.start_save();
            } else {
                self.deadline = Some(Instant::now() + self.delay);
            }
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}

async fn settle(in_flight: &mut Option<InFlight>) -> Result<(), BackendError> {
    match in_flight {
        Some(f) => f.save.as_mut().await,
        None => futures::future::pending().await,
    }
}

fn respond(reply: Option<Reply>, result: Result<(), SaveError>) {
    if let Some(reply) = reply {
        let _ = reply.send(result);
    }
}
