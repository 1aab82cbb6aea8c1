use log::{error, info};
use parking_lot::{Condvar, Mutex};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::bank::{Bank, LoadError};


/// Identifies one load request. Only the most recently issued ticket may
/// deliver a result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Loaded {
    pub path: PathBuf,
    pub result: Result<Bank, LoadError>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: bool,
    ready: Option<Loaded>,
}

#[derive(Clone, Default)]
pub struct BankLoader {
    slot: Arc<Mutex<Slot>>,
    completed: Arc<Condvar>,
}

impl BankLoader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Opens `path` on a background thread. Any load still in flight is
    /// superseded and its result will be dropped.
    pub fn load(&self, path: PathBuf) {
        let ticket = self.begin();
        let loader = self.clone();
        info!("Loading question bank {}", path.display());
        thread::spawn(move || {
            let result = Bank::open(&path);
            loader.complete(ticket, path, result);
        });
    }

    pub fn begin(&self) -> Ticket {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.pending = true;
        slot.ready = None;
        Ticket(slot.generation)
    }

    /// Returns false when the ticket was superseded and the result discarded.
    pub fn complete(&self, ticket: Ticket, path: PathBuf, result: Result<Bank, LoadError>) -> bool {
        let mut slot = self.slot.lock();
        if slot.generation != ticket.0 {
            info!("Discarding stale load of {}", path.display());
            return false;
        }
        if let Err(e) = &result {
            error!("Could not load {}: {}", path.display(), e);
        }
        slot.pending = false;
        slot.ready = Some(Loaded { path, result });
        self.completed.notify_all();
        true
    }

    pub fn is_loading(&self) -> bool {
        self.slot.lock().pending
    }

    pub fn take_ready(&self) -> Option<Loaded> {
        self.slot.lock().ready.take()
    }

    /// Blocks until the current load completes or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Option<Loaded> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.slot.lock();
        while slot.pending {
            if self.completed.wait_until(&mut slot, deadline).timed_out() {
                break;
            }
        }
        slot.ready.take()
    }
}
