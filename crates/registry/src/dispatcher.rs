use futures::channel::oneshot;
use parking_lot::Mutex;
use statusbar_core::{Content, EntryChange, EntryKey, Result, StatusBarError};
use std::{
    sync::Arc,
    thread::{self, ThreadId},
};
use tokio::sync::{mpsc, Notify};
use tracing::trace;

/// Work marshaled onto the owning thread.
pub(crate) enum Command {
    Apply { key: EntryKey, change: EntryChange },
    Dispose { key: EntryKey },
    ReadContent { key: EntryKey, reply: oneshot::Sender<Option<Content>> },
}

/// Wakes a waiter whenever another thread queues work for the owner.
///
/// Holding a signal does not keep the registry alive, so a UI subscription
/// can wait on it without counting as an owner reference.
#[derive(Clone)]
pub struct WorkSignal {
    wake: Arc<Notify>,
}

impl WorkSignal {
    /// Resolve once work was posted since the last wake-up.
    pub async fn notified(&self) {
        self.wake.notified().await;
    }
}

/// Binds status bar state to one owning thread.
///
/// Any thread may post commands; only the owner drains them. Posting wakes
/// whoever is waiting in [`Dispatcher::wait`], typically a UI subscription
/// that then asks the owner to pump.
pub(crate) struct Dispatcher {
    owner: ThreadId,
    tx: mpsc::UnboundedSender<Command>,
    rx: Mutex<mpsc::UnboundedReceiver<Command>>,
    wake: Arc<Notify>,
}

impl Dispatcher {
    /// The calling thread becomes the owner.
    pub(crate) fn for_current_thread() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            owner: thread::current().id(),
            tx,
            rx: Mutex::new(rx),
            wake: Arc::new(Notify::new()),
        }
    }

    pub(crate) fn check_access(&self) -> bool {
        thread::current().id() == self.owner
    }

    pub(crate) fn verify_access(&self, operation: &'static str) -> Result<()> {
        if self.check_access() {
            Ok(())
        } else {
            Err(StatusBarError::WrongThread { operation })
        }
    }

    /// Queue `command` for the owner and return immediately.
    pub(crate) fn post(&self, command: Command) {
        if self.tx.send(command).is_err() {
            trace!("Owner queue closed; dropping command");
            return;
        }
        self.wake.notify_one();
    }

    /// Take the next queued command. Owner thread only.
    pub(crate) fn next(&self) -> Option<Command> {
        self.rx.lock().try_recv().ok()
    }

    /// Resolve once at least one command was posted since the last wake-up.
    pub(crate) async fn wait(&self) {
        self.wake.notified().await;
    }

    pub(crate) fn signal(&self) -> WorkSignal {
        WorkSignal { wake: Arc::clone(&self.wake) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn posted_commands_come_back_in_order() {
        let dispatcher = Dispatcher::for_current_thread();
        let first = EntryKey::next();
        let second = EntryKey::next();

        dispatcher.post(Command::Dispose { key: first });
        dispatcher.post(Command::Apply { key: second, change: EntryChange::Show(true) });

        assert!(matches!(dispatcher.next(), Some(Command::Dispose { key }) if key == first));
        assert!(matches!(dispatcher.next(), Some(Command::Apply { key, .. }) if key == second));
        assert!(dispatcher.next().is_none());
    }

    #[tokio::test]
    async fn posting_before_waiting_still_wakes() {
        let dispatcher = Dispatcher::for_current_thread();
        let signal = dispatcher.signal();
        dispatcher.post(Command::Dispose { key: EntryKey::next() });

        tokio::time::timeout(Duration::from_secs(1), signal.notified())
            .await
            .expect("wake-up stored by post");
    }

    #[test]
    fn only_the_creating_thread_has_access() {
        let dispatcher = Arc::new(Dispatcher::for_current_thread());
        assert!(dispatcher.verify_access("pump").is_ok());

        let remote = Arc::clone(&dispatcher);
        let err = thread::spawn(move || remote.verify_access("pump").unwrap_err())
            .join()
            .unwrap();
        assert!(matches!(err, StatusBarError::WrongThread { operation: "pump" }));
    }
}
