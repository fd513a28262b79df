use crate::manager::{ContentRequest, Inner};
use parking_lot::Mutex;
use statusbar_core::{
    Alignment, ClickHandler, Color, Content, Entry, EntryChange, EntryKey, FontWeight, Result,
    StatusBarError,
};
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Weak,
    },
};

/// Controls one status bar item.
///
/// Handles are cheap to clone and may be used from any thread. On the
/// owning thread a write takes effect immediately; elsewhere it is queued and
/// applied on the next pump, in the order it was issued. Every write fails
/// with [`StatusBarError::ItemDisposed`] once the item is disposed.
#[derive(Clone)]
pub struct StatusBarItem {
    shared: Arc<Shared>,
}

struct Shared {
    key: EntryKey,
    id: String,
    alignment: Alignment,
    priority: i32,
    is_temporary: bool,
    disposed: AtomicBool,
    /// Last values written through this handle.
    cache: Mutex<Written>,
    manager: Weak<Inner>,
}

#[derive(Default)]
struct Written {
    text: String,
    tool_tip: String,
    name: Option<String>,
    click: Option<ClickHandler>,
    color: Option<Color>,
    background_color: Option<Color>,
    font_weight: FontWeight,
}

impl StatusBarItem {
    pub(crate) fn new(entry: &Entry, manager: Weak<Inner>) -> Self {
        Self {
            shared: Arc::new(Shared {
                key: entry.key,
                id: entry.id.clone(),
                alignment: entry.alignment,
                priority: entry.priority,
                is_temporary: entry.is_temporary,
                disposed: AtomicBool::new(false),
                cache: Mutex::new(Written {
                    text: entry.text.clone(),
                    tool_tip: entry.tool_tip.clone(),
                    ..Written::default()
                }),
                manager,
            }),
        }
    }

    pub fn key(&self) -> EntryKey {
        self.shared.key
    }

    pub fn id(&self) -> &str {
        &self.shared.id
    }

    pub fn alignment(&self) -> Alignment {
        self.shared.alignment
    }

    /// Higher value means the item is shown further to the left.
    pub fn priority(&self) -> i32 {
        self.shared.priority
    }

    pub fn is_temporary(&self) -> bool {
        self.shared.is_temporary
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::Acquire)
    }

    pub fn text(&self) -> String {
        self.shared.cache.lock().text.clone()
    }

    /// Set the entry text. Icons can be embedded with `$(icon-name)` and
    /// animated with `$(icon-name~spin)`.
    pub fn set_text(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.write(EntryChange::Text(text.clone()), |w| w.text = text)
    }

    pub fn tool_tip(&self) -> String {
        self.shared.cache.lock().tool_tip.clone()
    }

    pub fn set_tool_tip(&self, tool_tip: impl Into<String>) -> Result<()> {
        let tool_tip = tool_tip.into();
        self.write(EntryChange::ToolTip(tool_tip.clone()), |w| w.tool_tip = tool_tip)
    }

    pub fn name(&self) -> Option<String> {
        self.shared.cache.lock().name.clone()
    }

    /// Label shown for this item in the configuration menu.
    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        let name = Some(name.into());
        self.write(EntryChange::Name(name.clone()), |w| w.name = name)
    }

    pub fn click(&self) -> Option<ClickHandler> {
        self.shared.cache.lock().click.clone()
    }

    /// Run `handler` when the item is clicked.
    pub fn set_click(&self, handler: impl Fn() + Send + Sync + 'static) -> Result<()> {
        let handler: ClickHandler = Arc::new(handler);
        self.write(EntryChange::Click(Some(handler.clone())), |w| w.click = Some(handler))
    }

    pub fn clear_click(&self) -> Result<()> {
        self.write(EntryChange::Click(None), |w| w.click = None)
    }

    pub fn color(&self) -> Option<Color> {
        self.shared.cache.lock().color
    }

    pub fn set_color(&self, color: Option<Color>) -> Result<()> {
        self.write(EntryChange::Color(color), |w| w.color = color)
    }

    pub fn background_color(&self) -> Option<Color> {
        self.shared.cache.lock().background_color
    }

    pub fn set_background_color(&self, color: Option<Color>) -> Result<()> {
        self.write(EntryChange::BackgroundColor(color), |w| w.background_color = color)
    }

    pub fn font_weight(&self) -> FontWeight {
        self.shared.cache.lock().font_weight
    }

    pub fn set_font_weight(&self, weight: FontWeight) -> Result<()> {
        self.write(EntryChange::FontWeight(weight), |w| w.font_weight = weight)
    }

    /// Current custom content of the entry.
    ///
    /// Off the owning thread this blocks until the owner pumps, so it must
    /// not be called from a context the owner is itself waiting on. Fails
    /// with [`StatusBarError::OwnerGone`] once every manager clone is
    /// dropped, including while the read is waiting.
    pub fn content(&self) -> Result<Option<Content>> {
        if self.is_disposed() {
            return Ok(None);
        }

        let request = match self.shared.manager.upgrade() {
            Some(inner) => inner.request_content(self.shared.key),
            None => return Err(StatusBarError::OwnerGone),
        };
        // `inner` is released here; only manager clones keep the queue alive.
        match request {
            ContentRequest::Ready(content) => Ok(content),
            ContentRequest::Queued(response) => {
                futures::executor::block_on(response).map_err(|_| StatusBarError::OwnerGone)
            }
        }
    }

    /// Replace text rendering with arbitrary content.
    pub fn set_content(&self, content: Option<Content>) -> Result<()> {
        self.write(EntryChange::Content(content), |_| {})
    }

    /// Show the entry in the status bar.
    pub fn show(&self) -> Result<()> {
        self.write(EntryChange::Show(true), |_| {})
    }

    /// Hide the entry in the status bar.
    pub fn hide(&self) -> Result<()> {
        self.write(EntryChange::Show(false), |_| {})
    }

    /// Remove the entry from the bar for good. Calling this again is a no-op.
    pub fn dispose(&self) {
        if self.shared.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(inner) = self.shared.manager.upgrade() {
            inner.submit_dispose(self.shared.key);
        }
    }

    fn write(&self, change: EntryChange, remember: impl FnOnce(&mut Written)) -> Result<()> {
        if self.is_disposed() {
            return Err(StatusBarError::ItemDisposed { id: self.shared.id.clone() });
        }

        {
            let mut cache = self.shared.cache.lock();
            remember(&mut *cache);
        }

        if let Some(inner) = self.shared.manager.upgrade() {
            inner.submit(self.shared.key, change);
        }
        Ok(())
    }
}

impl fmt::Debug for StatusBarItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusBarItem")
            .field("key", &self.shared.key)
            .field("id", &self.shared.id)
            .field("alignment", &self.shared.alignment)
            .field("priority", &self.shared.priority)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::StatusBarManager;
    use statusbar_core::{Alignment, Color, StatusBarError};
    use std::sync::Arc;

    #[test]
    fn writes_after_dispose_fail() {
        let manager = StatusBarManager::new();
        let item = manager.create_item("mode", Alignment::Left, 3).unwrap();
        item.dispose();

        let err = item.set_text("Insert").unwrap_err();
        assert!(matches!(err, StatusBarError::ItemDisposed { ref id } if id == "mode"));
        assert!(item.show().is_err());
        assert!(item.set_color(Some(Color::BLACK)).is_err());

        // Identity stays readable.
        assert_eq!(item.id(), "mode");
        assert_eq!(item.alignment(), Alignment::Left);
        assert_eq!(item.priority(), 3);
    }

    #[test]
    fn handle_remembers_written_values() {
        let manager = StatusBarManager::new();
        let item = manager.create_item("mode", Alignment::Left, 0).unwrap();

        item.set_text("Normal").unwrap();
        item.set_background_color(Some(Color::MEDIUM_SEA_GREEN)).unwrap();
        item.set_click(|| {}).unwrap();

        assert_eq!(item.text(), "Normal");
        assert_eq!(item.background_color(), Some(Color::MEDIUM_SEA_GREEN));
        assert!(item.click().is_some());

        item.clear_click().unwrap();
        assert!(item.click().is_none());
    }

    #[test]
    fn clones_share_disposal() {
        let manager = StatusBarManager::new();
        let item = manager.create_item("mode", Alignment::Left, 0).unwrap();
        let other = item.clone();

        item.dispose();
        assert!(other.is_disposed());
        other.dispose();
    }

    #[test]
    fn content_round_trips_on_owner_thread() {
        let manager = StatusBarManager::new();
        let item = manager.create_item("logo", Alignment::Right, 0).unwrap();

        let logo: statusbar_core::Content = Arc::new(String::from("logo"));
        item.set_content(Some(logo)).unwrap();

        let read = item.content().unwrap().unwrap();
        assert_eq!(read.downcast_ref::<String>().map(String::as_str), Some("logo"));
    }

    #[test]
    fn handles_outliving_the_manager_are_inert() {
        let manager = StatusBarManager::new();
        let item = manager.create_item("orphan", Alignment::Left, 0).unwrap();
        drop(manager);

        item.set_text("still fine").unwrap();
        assert!(matches!(item.content(), Err(StatusBarError::OwnerGone)));
        item.dispose();
        assert!(item.content().unwrap().is_none());
    }
}
