use crate::item::StatusBarItem;
use tokio_util::sync::CancellationToken;

/// Handle to a temporary message created by
/// [`StatusBarManager::set_message`](crate::StatusBarManager::set_message).
///
/// Dropping the handle does not hide the message; call [`MessageHandle::dispose`].
#[derive(Debug, Clone)]
pub struct MessageHandle {
    item: StatusBarItem,
    cancel: CancellationToken,
}

impl MessageHandle {
    pub(crate) fn new(item: StatusBarItem, cancel: CancellationToken) -> Self {
        Self { item, cancel }
    }

    /// Generated id of the message entry.
    pub fn id(&self) -> &str {
        self.item.id()
    }

    pub fn is_disposed(&self) -> bool {
        self.item.is_disposed()
    }

    /// Hide the message now and stop its timer or completion wait.
    ///
    /// Safe to call any number of times, before or after the message
    /// expired on its own.
    pub fn dispose(&self) {
        self.cancel.cancel();
        self.item.dispose();
    }
}
