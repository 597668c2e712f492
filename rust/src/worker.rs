//! Background worker that computes schedules off the calling thread.
//!
//! Each submitted task list is one request and gets exactly one reply.
//! Requests are processed independently in arrival order.

use std::sync::mpsc;
use std::thread;

use crate::calculation::compute_schedule;
use crate::config::CriticalPathConfig;
use crate::error::CriticalPathError;
use crate::log_changes;
use crate::models::{ScheduleResult, Task};

type Reply = Result<ScheduleResult, CriticalPathError>;

struct Request {
    tasks: Vec<Task>,
    reply: mpsc::Sender<Reply>,
}

/// Runs critical path computations on a dedicated thread.
pub struct CriticalPathWorker {
    sender: Option<mpsc::Sender<Request>>,
    handle: Option<thread::JoinHandle<()>>,
}

/// Handle for the reply to a single submitted request.
pub struct PendingSchedule {
    rx: mpsc::Receiver<Reply>,
}

impl PendingSchedule {
    /// Block until the worker replies.
    pub fn wait(self) -> Reply {
        self.rx
            .recv()
            .map_err(|_| CriticalPathError::WorkerDisconnected)?
    }
}

impl CriticalPathWorker {
    /// Spawn the worker thread. Every request is computed with `config`.
    pub fn spawn(config: CriticalPathConfig) -> Self {
        let (tx, rx) = mpsc::channel::<Request>();

        let handle = thread::spawn(move || {
            log_changes!(config.verbosity, "Critical path worker started");
            while let Ok(request) = rx.recv() {
                let reply = compute_schedule(&request.tasks, &config);
                // The submitter may have dropped its handle; nothing to do then
                let _ = request.reply.send(reply);
            }
            log_changes!(config.verbosity, "Critical path worker stopped");
        });

        Self {
            sender: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queue a task list for computation.
    ///
    /// If the worker has stopped, the returned handle reports `WorkerDisconnected`.
    pub fn submit(&self, tasks: Vec<Task>) -> PendingSchedule {
        let (reply, rx) = mpsc::channel();
        if let Some(sender) = &self.sender {
            // On failure the request (and its reply sender) is dropped, so
            // `wait` sees a disconnected channel.
            let _ = sender.send(Request { tasks, reply });
        }
        PendingSchedule { rx }
    }

    /// Submit and wait for the reply.
    pub fn compute(&self, tasks: Vec<Task>) -> Reply {
        self.submit(tasks).wait()
    }
}

impl Drop for CriticalPathWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
