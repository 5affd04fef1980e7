use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::error;

use crate::models::Task;
use crate::storage::gateway::Gateway;

enum Msg {
    Schedule(Vec<Task>),
    Flush(Sender<()>),
    Shutdown,
}

/// Debounced persistence writer. Snapshots scheduled within the quiet
/// window replace each other; only the last one is written once the window
/// elapses. `flush` writes the pending snapshot immediately; dropping the
/// writer cancels it — teardown must never trigger a write.
pub struct DebouncedWriter {
    tx: Sender<Msg>,
    worker: Option<JoinHandle<()>>,
}

impl DebouncedWriter {
    /// Moves the gateway onto a background thread that performs all
    /// writes. Save failures are logged there and never propagate.
    pub fn spawn(gateway: Gateway, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || run(gateway, rx, delay));
        Self {
            tx,
            worker: Some(worker),
        }
    }

    /// Re-arms the quiet window with a fresh snapshot.
    pub fn schedule(&self, tasks: Vec<Task>) {
        let _ = self.tx.send(Msg::Schedule(tasks));
    }

    /// Writes any pending snapshot now and waits until the write has run.
    pub fn flush(&self) {
        let (ack, done) = mpsc::channel();
        if self.tx.send(Msg::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run(mut gateway: Gateway, rx: Receiver<Msg>, delay: Duration) {
    let mut pending: Option<Vec<Task>> = None;
    let mut deadline = Instant::now();
    loop {
        let msg = if pending.is_some() {
            match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    write_out(&mut gateway, &mut pending);
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => return,
            }
        } else {
            match rx.recv() {
                Ok(msg) => msg,
                Err(_) => return,
            }
        };
        match msg {
            Msg::Schedule(tasks) => {
                pending = Some(tasks);
                deadline = Instant::now() + delay;
            }
            Msg::Flush(ack) => {
                write_out(&mut gateway, &mut pending);
                let _ = ack.send(());
            }
            // Pending state is discarded: a torn-down owner must not write.
            Msg::Shutdown => return,
        }
    }
}

fn write_out(gateway: &mut Gateway, pending: &mut Option<Vec<Task>>) {
    if let Some(tasks) = pending.take() {
        if let Err(err) = gateway.save(&tasks) {
            error!("task save failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::slot::MemorySlot;

    fn writer_with_handle(delay: Duration) -> (DebouncedWriter, MemorySlot) {
        let slot = MemorySlot::new();
        let handle = slot.clone();
        (DebouncedWriter::spawn(Gateway::new(slot), delay), handle)
    }

    fn snapshot(names: &[&str]) -> Vec<Task> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Task {
                id: i as i64 + 1,
                name: (*name).to_owned(),
                description: String::new(),
                completed: false,
            })
            .collect()
    }

    #[test]
    fn burst_of_schedules_produces_one_write_with_final_state() {
        let (writer, handle) = writer_with_handle(Duration::from_millis(40));
        writer.schedule(snapshot(&["a"]));
        writer.schedule(snapshot(&["a", "b"]));
        writer.schedule(snapshot(&["a", "b", "c"]));
        thread::sleep(Duration::from_millis(200));
        assert_eq!(handle.writes(), 1);
        assert!(handle.contents().unwrap().contains("\"c\""));
    }

    #[test]
    fn quiet_periods_between_schedules_write_each_time() {
        let (writer, handle) = writer_with_handle(Duration::from_millis(20));
        writer.schedule(snapshot(&["a"]));
        thread::sleep(Duration::from_millis(120));
        writer.schedule(snapshot(&["a", "b"]));
        thread::sleep(Duration::from_millis(120));
        assert_eq!(handle.writes(), 2);
    }

    #[test]
    fn flush_writes_immediately() {
        let (writer, handle) = writer_with_handle(Duration::from_secs(60));
        writer.schedule(snapshot(&["a"]));
        writer.flush();
        assert_eq!(handle.writes(), 1);
        assert!(handle.contents().unwrap().contains("\"a\""));
    }

    #[test]
    fn flush_without_pending_writes_nothing() {
        let (writer, handle) = writer_with_handle(Duration::from_millis(10));
        writer.flush();
        assert_eq!(handle.writes(), 0);
    }

    #[test]
    fn drop_cancels_pending_write() {
        let (writer, handle) = writer_with_handle(Duration::from_secs(60));
        writer.schedule(snapshot(&["doomed"]));
        drop(writer);
        assert_eq!(handle.writes(), 0);
        assert_eq!(handle.contents(), None);
    }
}
