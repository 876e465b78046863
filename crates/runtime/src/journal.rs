//! Event journal - every published event as one JSON line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::types::GameEvent;

/// One journal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    /// Session time of the event in milliseconds
    pub at_ms: u64,
    pub event: GameEvent,
}

/// Writer handle. Records are queued and written by a background task.
#[derive(Debug)]
pub struct Journal {
    tx: mpsc::UnboundedSender<EventRecord>,
    seq: u64,
    writer: JoinHandle<()>,
}

impl Journal {
    /// Spawn the writer task; the file is created or appended to.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<EventRecord>();
        let writer = tokio::spawn(write_records(path, rx));
        Self { tx, seq: 0, writer }
    }

    pub fn record(&mut self, at_ms: u64, event: &GameEvent) {
        self.seq += 1;
        let _ = self.tx.send(EventRecord {
            seq: self.seq,
            at_ms,
            event: *event,
        });
    }

    pub fn recorded(&self) -> u64 {
        self.seq
    }

    /// Flush queued records and wait for the writer to finish
    pub async fn close(self) {
        let Journal { tx, writer, .. } = self;
        drop(tx);
        let _ = writer.await;
    }
}

async fn write_records(path: PathBuf, mut rx: mpsc::UnboundedReceiver<EventRecord>) {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(f) => f,
        Err(e) => {
            log::warn!("journal disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };

    let mut buf: Vec<u8> = Vec::with_capacity(256);

    while let Some(rec) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &rec).is_err() {
            continue;
        }
        buf.push(b'\n');
        if file.write_all(&buf).await.is_err() {
            log::warn!("journal write to {} failed", path.display());
            break;
        }
    }

    let _ = file.flush().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!(
            "memory-match-{}-{}-{}.jsonl",
            name,
            std::process::id(),
            nanos
        ))
    }

    #[tokio::test]
    async fn writes_one_line_per_event() {
        let path = temp_path("journal");
        let mut journal = Journal::spawn(path.clone());
        journal.record(0, &GameEvent::RoundReset);
        journal.record(
            5000,
            &GameEvent::RoundEnded {
                outcome: Outcome::Lost,
            },
        );
        assert_eq!(journal.recorded(), 2);
        journal.close().await;

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        let records: Vec<EventRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seq, 1);
        assert_eq!(records[1].at_ms, 5000);
        assert_eq!(
            records[1].event,
            GameEvent::RoundEnded {
                outcome: Outcome::Lost
            }
        );
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn unwritable_path_is_not_fatal() {
        let path = std::env::temp_dir()
            .join("memory-match-missing-dir")
            .join("nested")
            .join("journal.jsonl");
        let mut journal = Journal::spawn(path);
        journal.record(0, &GameEvent::RoundReset);
        journal.close().await;
    }
}
