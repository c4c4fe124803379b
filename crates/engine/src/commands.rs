//! Single-writer command queue.
//!
//! Every backend call goes through one worker task that owns the
//! [`GastosApi`] and runs commands strictly in submission order. Completions
//! come back in the same order, so the collection is patched in the order
//! the user acted, whatever the latency of each request.
use api_types::gasto::{Gasto, GastoId};
use tokio::sync::mpsc;

use crate::{api::GastosApi, error::ApiError};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FetchAll,
    Delete(GastoId),
    DeleteAll,
    /// Persist the edit form.
    Save(Gasto),
}

impl Command {
    pub fn label(&self) -> String {
        match self {
            Self::FetchAll => "fetch_all".to_string(),
            Self::Delete(id) => format!("delete({id})"),
            Self::DeleteAll => "delete_all".to_string(),
            Self::Save(gasto) => format!("save({})", gasto.id),
        }
    }
}

/// Completions the list controller applies to its collection.
#[derive(Clone, Debug, PartialEq)]
pub enum ListEvent {
    Fetched(Result<Vec<Gasto>, ApiError>),
    Deleted {
        id: GastoId,
        result: Result<(), ApiError>,
    },
    DeletedAll(Result<(), ApiError>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    List(ListEvent),
    /// Outcome of [`Command::Save`], consumed by the edit form.
    Saved(Result<Gasto, ApiError>),
}

pub async fn execute<A: GastosApi + ?Sized>(api: &A, command: Command) -> Completion {
    match command {
        Command::FetchAll => Completion::List(ListEvent::Fetched(api.list().await)),
        Command::Delete(id) => Completion::List(ListEvent::Deleted {
            id,
            result: api.delete(id).await,
        }),
        Command::DeleteAll => Completion::List(ListEvent::DeletedAll(api.delete_all().await)),
        Command::Save(gasto) => Completion::Saved(api.update(&gasto).await),
    }
}

#[derive(Debug, thiserror::Error)]
#[error("command worker stopped")]
pub struct QueueClosed;

#[derive(Debug)]
pub struct CommandQueue {
    commands: mpsc::UnboundedSender<Command>,
    completions: mpsc::UnboundedReceiver<Completion>,
    pending: usize,
}

impl CommandQueue {
    /// Starts the worker on the current tokio runtime.
    ///
    /// The worker stops once the queue is dropped.
    pub fn spawn<A: GastosApi + 'static>(api: A) -> Self {
        let (commands, mut commands_rx) = mpsc::unbounded_channel::<Command>();
        let (completions_tx, completions) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(command) = commands_rx.recv().await {
                let label = command.label();
                tracing::debug!("executing {label}");
                let completion = execute(&api, command).await;
                if completions_tx.send(completion).is_err() {
                    break;
                }
                tracing::debug!("completed {label}");
            }
            tracing::debug!("command worker stopped");
        });

        Self {
            commands,
            completions,
            pending: 0,
        }
    }

    pub fn submit(&mut self, command: Command) -> Result<(), QueueClosed> {
        self.commands.send(command).map_err(|_| QueueClosed)?;
        self.pending += 1;
        Ok(())
    }

    /// Commands submitted and not yet collected.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    /// Non-blocking poll, for the UI tick.
    pub fn try_next(&mut self) -> Option<Completion> {
        let completion = self.completions.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(completion)
    }

    pub async fn next(&mut self) -> Option<Completion> {
        let completion = self.completions.recv().await?;
        self.pending = self.pending.saturating_sub(1);
        Some(completion)
    }
}
