use std::sync::mpsc;
use std::time::Duration;

use super::api::Credential;
use super::pipeline::{CommitError, CommitPipeline, CommitResult};
use crate::editor::tools::Shape;

/// How often a UI loop should call [`CommitWorker::try_result`].
pub const COMMIT_POLL_INTERVAL: Duration = Duration::from_millis(24);

pub type CommitOutcome = Result<CommitResult, CommitError>;

/// One commit running off the UI thread.
#[derive(Debug)]
pub struct CommitWorker {
    rx: mpsc::Receiver<CommitOutcome>,
}

impl CommitWorker {
    pub fn spawn(
        pipeline: CommitPipeline,
        shapes: Vec<Shape>,
        create_copy: bool,
        credential: Credential,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<CommitOutcome>();
        std::thread::spawn(move || {
            let result = pipeline.commit(&shapes, create_copy, Some(&credential));
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// `None` while the commit is still running.
    pub fn try_result(&self) -> Option<CommitOutcome> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(CommitError::WorkerStopped)),
        }
    }

    /// Blocks until the commit finishes.
    pub fn wait(&self) -> CommitOutcome {
        self.rx.recv().unwrap_or(Err(CommitError::WorkerStopped))
    }
}
