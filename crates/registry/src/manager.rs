use crate::{
    dispatcher::{Command, Dispatcher, WorkSignal},
    item::StatusBarItem,
    message::MessageHandle,
};
use parking_lot::Mutex;
use statusbar_core::{
    Alignment, Content, Entry, EntryChange, EntryKey, Result, StatusBarError, Surface,
};
use futures::channel::oneshot;
use std::{
    collections::VecDeque,
    future::Future,
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Creates status bar items and forwards them to a bound [`Surface`].
///
/// The manager is created on, and bound to, the thread that will own the
/// surface (the UI thread). Items it hands out may be moved to any thread:
/// writes made elsewhere are queued and applied the next time the owner
/// calls [`StatusBarManager::pump`].
///
/// Cloning is cheap and yields another reference to the same registry.
/// Manager clones are the only references that keep the registry alive:
/// items, message handles, [`WeakStatusBarManager`] and [`WorkSignal`] do
/// not. Once the last clone is dropped, queued work is discarded and
/// blocked content reads fail with [`StatusBarError::OwnerGone`].
#[derive(Clone)]
pub struct StatusBarManager {
    pub(crate) inner: Arc<Inner>,
}

/// Non-owning reference to a [`StatusBarManager`].
///
/// Click handlers stored in the bar should hold one of these; a strong
/// manager captured there would keep the registry alive through its own
/// entries.
#[derive(Clone)]
pub struct WeakStatusBarManager {
    inner: Weak<Inner>,
}

impl WeakStatusBarManager {
    pub fn upgrade(&self) -> Option<StatusBarManager> {
        self.inner.upgrade().map(|inner| StatusBarManager { inner })
    }
}

pub(crate) struct Inner {
    dispatcher: Dispatcher,
    state: Mutex<State>,
    runtime: Option<Handle>,
}

#[derive(Default)]
struct State {
    /// Entries created before a surface was bound, in creation order.
    pending: VecDeque<Entry>,
    surface: Option<Box<dyn Surface>>,
}

impl StatusBarManager {
    /// Create a manager owned by the calling thread.
    ///
    /// Temporary messages are scheduled on the ambient tokio runtime, if any.
    pub fn new() -> Self {
        Self::build(Handle::try_current().ok())
    }

    /// Create a manager owned by the calling thread that schedules temporary
    /// messages on `runtime`.
    pub fn with_runtime(runtime: Handle) -> Self {
        Self::build(Some(runtime))
    }

    /// Create a manager and bind `surface` right away.
    pub fn bound_to(surface: impl Surface + 'static) -> Self {
        let manager = Self::new();
        manager.inner.state.lock().surface = Some(Box::new(surface));
        manager
    }

    fn build(runtime: Option<Handle>) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatcher: Dispatcher::for_current_thread(),
                state: Mutex::new(State::default()),
                runtime,
            }),
        }
    }

    /// Bind the surface entries are delivered to. Can only be called once.
    ///
    /// Entries created so far are handed to the surface in creation order.
    pub fn bind_surface(&self, surface: impl Surface + 'static) -> Result<()> {
        self.inner.dispatcher.verify_access("bind_surface")?;

        let mut state = self.inner.state.lock();
        if state.surface.is_some() {
            return Err(StatusBarError::AlreadyBound);
        }

        let pending: Vec<Entry> = state.pending.drain(..).collect();
        debug!("Binding surface; delivering {} pending entries", pending.len());

        let mut surface: Box<dyn Surface> = Box::new(surface);
        surface.attach(pending);
        state.surface = Some(surface);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.inner.state.lock().surface.is_some()
    }

    /// Number of entries waiting for a surface.
    pub fn pending_len(&self) -> usize {
        self.inner.state.lock().pending.len()
    }

    /// Create a new, initially hidden status bar item.
    ///
    /// Higher `priority` places the item further left within its region.
    /// Must be called from the owning thread.
    pub fn create_item(
        &self,
        id: impl Into<String>,
        alignment: Alignment,
        priority: i32,
    ) -> Result<StatusBarItem> {
        self.inner.dispatcher.verify_access("create_item")?;

        let entry = Entry::new(id, alignment, priority);
        let item = StatusBarItem::new(&entry, Arc::downgrade(&self.inner));
        debug!(id = %entry.id, key = %entry.key, ?alignment, priority, "Created status bar item");

        self.inner.add_entry(entry);
        Ok(item)
    }

    /// Show `text` in the bar until `timeout` elapses.
    ///
    /// The returned handle hides the message early; disposing it after the
    /// timeout fired is a no-op. Must be called from the owning thread.
    pub fn set_message(&self, text: impl Into<String>, timeout: Duration) -> Result<MessageHandle> {
        self.inner.dispatcher.verify_access("set_message")?;
        let runtime = self.runtime()?;

        let (item, cancel) = self.create_message(text.into());
        let task_item = item.clone();
        let token = cancel.clone();

        runtime.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    trace!(id = task_item.id(), "Message timed out");
                }
                _ = token.cancelled() => {}
            }
            task_item.dispose();
        });

        Ok(MessageHandle::new(item, cancel))
    }

    /// Show `text` in the bar until `done` settles.
    ///
    /// `done` is driven on the runtime; the message is removed whether it
    /// returns or panics. The returned handle hides the message early and
    /// stops waiting on `done` without cancelling it.
    pub fn set_message_until<F>(&self, text: impl Into<String>, done: F) -> Result<MessageHandle>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.inner.dispatcher.verify_access("set_message_until")?;
        let runtime = self.runtime()?;

        let (item, cancel) = self.create_message(text.into());
        let task_item = item.clone();
        let token = cancel.clone();

        runtime.spawn(async move {
            let work = tokio::spawn(done);
            tokio::select! {
                settled = work => {
                    if let Err(e) = settled {
                        warn!(id = task_item.id(), "Message task failed: {e}");
                    }
                }
                _ = token.cancelled() => {}
            }
            task_item.dispose();
        });

        Ok(MessageHandle::new(item, cancel))
    }

    fn create_message(&self, text: String) -> (StatusBarItem, CancellationToken) {
        let entry = Entry::temporary(uuid::Uuid::new_v4().to_string(), text);
        let item = StatusBarItem::new(&entry, Arc::downgrade(&self.inner));
        debug!(id = %entry.id, key = %entry.key, "Showing temporary message");

        self.inner.add_entry(entry);
        (item, CancellationToken::new())
    }

    fn runtime(&self) -> Result<Handle> {
        self.inner
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(StatusBarError::NoRuntime)
    }

    /// Apply every command queued by other threads. Owner thread only.
    ///
    /// Returns the number of commands applied.
    pub fn pump(&self) -> Result<usize> {
        self.inner.dispatcher.verify_access("pump")?;

        let mut applied = 0;
        while let Some(command) = self.inner.dispatcher.next() {
            self.inner.execute(command);
            applied += 1;
        }
        Ok(applied)
    }

    /// Wait until another thread queued work for the owner.
    ///
    /// Meant for an async task outside the owning thread that then signals
    /// the owner to call [`StatusBarManager::pump`].
    pub async fn work_available(&self) {
        self.inner.dispatcher.wait().await;
    }

    /// Wake-up source for a host loop that pumps on demand.
    ///
    /// Unlike [`StatusBarManager::work_available`], waiting on the signal
    /// does not hold the registry.
    pub fn work_signal(&self) -> WorkSignal {
        self.inner.dispatcher.signal()
    }

    pub fn downgrade(&self) -> WeakStatusBarManager {
        WeakStatusBarManager { inner: Arc::downgrade(&self.inner) }
    }

    /// Run `f` against the bound surface. Owner thread only.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut dyn Surface) -> R) -> Option<R> {
        if !self.inner.dispatcher.check_access() {
            return None;
        }
        let mut state = self.inner.state.lock();
        state.surface.as_deref_mut().map(|surface| f(surface))
    }
}

impl Default for StatusBarManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) enum ContentRequest {
    Ready(Option<Content>),
    Queued(oneshot::Receiver<Option<Content>>),
}

impl Inner {
    /// Forward a new entry, or queue it until a surface is bound.
    fn add_entry(&self, entry: Entry) {
        let mut state = self.state.lock();
        let State { pending, surface } = &mut *state;

        let Some(surface) = surface.as_deref_mut() else {
            pending.push_back(entry);
            return;
        };

        // Earlier entries must never appear after this one.
        while let Some(earlier) = pending.pop_front() {
            surface.insert(earlier);
        }
        surface.insert(entry);
    }

    pub(crate) fn on_owner(&self) -> bool {
        self.dispatcher.check_access()
    }

    /// Apply `change` now if on the owning thread, otherwise queue it.
    pub(crate) fn submit(&self, key: EntryKey, change: EntryChange) {
        if self.on_owner() {
            self.apply(key, change);
        } else {
            trace!(%key, property = change.property(), "Marshaling change to owner");
            self.dispatcher.post(Command::Apply { key, change });
        }
    }

    pub(crate) fn submit_dispose(&self, key: EntryKey) {
        if self.on_owner() {
            self.dispose(key);
        } else {
            self.dispatcher.post(Command::Dispose { key });
        }
    }

    /// Read an entry's content now on the owner, otherwise queue the read.
    ///
    /// The caller must let go of `self` before waiting on a queued read:
    /// the reply sender lives in this registry's queue and is only dropped
    /// with it.
    pub(crate) fn request_content(&self, key: EntryKey) -> ContentRequest {
        if self.on_owner() {
            return ContentRequest::Ready(self.content(key));
        }

        let (reply, response) = oneshot::channel();
        self.dispatcher.post(Command::ReadContent { key, reply });
        ContentRequest::Queued(response)
    }

    fn execute(&self, command: Command) {
        match command {
            Command::Apply { key, change } => self.apply(key, change),
            Command::Dispose { key } => self.dispose(key),
            Command::ReadContent { key, reply } => {
                let _ = reply.send(self.content(key));
            }
        }
    }

    fn apply(&self, key: EntryKey, change: EntryChange) {
        let mut state = self.state.lock();

        if let Some(entry) = state.pending.iter_mut().find(|e| e.key == key) {
            entry.apply(change);
            return;
        }

        match state.surface.as_deref_mut() {
            Some(surface) => surface.apply(key, change),
            None => trace!(%key, "Dropping change for unknown entry"),
        }
    }

    fn dispose(&self, key: EntryKey) {
        let removed = {
            let mut state = self.state.lock();
            match state.pending.iter().position(|e| e.key == key) {
                Some(index) => state.pending.remove(index),
                None => state.surface.as_deref_mut().and_then(|s| s.remove(key)),
            }
        };

        match removed {
            Some(entry) => debug!(id = %entry.id, %key, "Disposed status bar entry"),
            None => trace!(%key, "Dispose of an entry that is already gone"),
        }
    }

    fn content(&self, key: EntryKey) -> Option<Content> {
        let state = self.state.lock();
        if let Some(entry) = state.pending.iter().find(|e| e.key == key) {
            return entry.content.clone();
        }
        state.surface.as_deref()?.content(key)
    }
}
