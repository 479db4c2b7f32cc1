use super::record::LabelRecord;
use crate::error::{RelayError, Result};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const QUEUE_DEPTH: usize = 1024;

struct AppendRequest {
    record: LabelRecord,
    reply: oneshot::Sender<Result<()>>,
}

/// Handle to the append-only label file.
///
/// A single writer task owns the path; every append goes through its queue,
/// so appends are totally ordered within the process. Only one process may
/// own a given data file.
#[derive(Clone)]
pub struct LabelStore {
    tx: mpsc::Sender<AppendRequest>,
    path: PathBuf,
}

impl LabelStore {
    /// Start the writer task. It exits once every handle is dropped and the queue is drained.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let path = path.into();
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let writer = LabelWriter { path: path.clone(), rx };
        let handle = tokio::spawn(writer.run());
        (Self { tx, path }, handle)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, record: LabelRecord) -> Result<()> {
        record.validate()?;
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(AppendRequest { record, reply })
            .await
            .map_err(|_| writer_gone())?;
        rx.await.map_err(|_| writer_gone())?
    }
}

fn writer_gone() -> RelayError {
    RelayError::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        "label writer stopped",
    ))
}

struct LabelWriter {
    path: PathBuf,
    rx: mpsc::Receiver<AppendRequest>,
}

impl LabelWriter {
    async fn run(mut self) {
        info!("Label writer started for {}", self.path.display());
        while let Some(req) = self.rx.recv().await {
            let result = append_line(&self.path, &req.record).await;
            match &result {
                Ok(()) => debug!("Appended label {:?} for {:?}", req.record.label, req.record.query),
                Err(e) => warn!("Failed to append to {}: {}", self.path.display(), e),
            }
            // Caller may have gone away; the record is on disk either way.
            let _ = req.reply.send(result);
        }
        info!("Label writer for {} stopped", self.path.display());
    }
}

/// Open in append mode (creating if absent), write one whole line, flush to disk.
async fn append_line(path: &Path, record: &LabelRecord) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(record.to_line().as_bytes()).await?;
    file.flush().await?;
    file.sync_data().await?;
    Ok(())
}
