//! Items shown by the demo bar, and the producers that drive them.

use chrono::Local;
use statusbar_core::{Alignment, Color, Content, FontWeight, Result};
use statusbar_registry::{StatusBarItem, StatusBarManager};
use statusbar_renderer::Badge;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

const MODES: [(&str, Color); 3] = [
    ("NORMAL", Color::MEDIUM_SEA_GREEN),
    ("INSERT", Color::DODGER_BLUE),
    ("VISUAL", Color::ORANGE_RED),
];

const PYTHON_STEPS: [&str; 4] = [
    "Resolving interpreter",
    "Creating virtual environment",
    "Installing packages",
    "Activating",
];

/// Handles the app keeps after setup.
#[derive(Debug)]
pub struct Demo {
    clock: StatusBarItem,
    /// Kept so the items stay referenced for the lifetime of the bar.
    _items: Vec<StatusBarItem>,
}

impl Demo {
    /// Create every demo item. Must run on the thread that owns `manager`.
    pub fn install(manager: &StatusBarManager, message_timeout: Duration) -> Result<Self> {
        let runtime = Handle::try_current().ok();
        let mut items = Vec::new();

        items.push(logo(manager)?);
        items.push(mode(manager)?);
        items.push(git_branch(manager)?);
        items.push(git_sync(manager, runtime.clone())?);
        items.push(login(manager)?);
        items.push(counter(manager)?);

        items.push(static_item(manager, "cursor", "Ln 1, Col 1", "Go to Line/Column", 100)?);
        items.push(line_break(manager)?);
        items.push(static_item(manager, "encoding", "UTF-8", "Select Encoding", 80)?);
        items.push(static_item(manager, "filetype", "$(json) JSON", "Select Language Mode", 70)?);

        let clock = date_time(manager, message_timeout)?;

        match runtime {
            Some(runtime) => {
                let python = python_env(manager)?;
                runtime.spawn(run_python_setup(python));
            }
            None => warn!("No async runtime; skipping python environment demo"),
        }

        info!("Installed {} demo items", items.len() + 1);
        Ok(Self { clock, _items: items })
    }

    /// Refresh the clock text.
    pub fn tick(&self) -> Result<()> {
        self.clock.set_text(format!("$(clock) {}", Local::now().format("%H:%M")))
    }
}

fn static_item(
    manager: &StatusBarManager,
    id: &str,
    text: &str,
    tool_tip: &str,
    priority: i32,
) -> Result<StatusBarItem> {
    let item = manager.create_item(id, Alignment::Right, priority)?;
    item.set_text(text)?;
    item.set_tool_tip(tool_tip)?;
    item.show()?;
    Ok(item)
}

fn logo(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("logo", Alignment::Left, i32::MAX)?;
    item.set_name("Logo")?;
    let badge: Content = Arc::new(Badge::new("$", Color::WHITE, Color::rgb(0x16, 0x82, 0x5d)));
    item.set_content(Some(badge))?;
    item.show()?;
    Ok(item)
}

/// Cycles through editor modes, reading its own label back to find the next.
fn mode(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("mode", Alignment::Left, 1000)?;
    let (label, color) = MODES[0];
    item.set_name("Editor Mode")?;
    item.set_text(label)?;
    item.set_background_color(Some(color))?;
    item.set_color(Some(Color::WHITE))?;
    item.set_font_weight(FontWeight::Bold)?;

    let handle = item.clone();
    item.set_click(move || {
        let current = handle.text();
        let index = MODES.iter().position(|(label, _)| *label == current).unwrap_or(0);
        let (label, color) = MODES[(index + 1) % MODES.len()];
        if let Err(e) = handle
            .set_text(label)
            .and_then(|_| handle.set_background_color(Some(color)))
        {
            warn!("Mode switch failed: {e}");
        }
    })?;
    item.show()?;
    Ok(item)
}

fn git_branch(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("git-branch", Alignment::Left, 900)?;
    item.set_name("Source Control Branch")?;
    item.set_text("$(git-branch) main")?;
    item.set_tool_tip("Checkout branch")?;

    let handle = item.clone();
    item.set_click(move || {
        let next = if handle.text().ends_with("main") {
            "$(git-branch) develop"
        } else {
            "$(git-branch) main"
        };
        let _ = handle.set_text(next);
    })?;
    item.show()?;
    Ok(item)
}

/// Spins while a simulated sync runs on the async runtime.
fn git_sync(manager: &StatusBarManager, runtime: Option<Handle>) -> Result<StatusBarItem> {
    let item = manager.create_item("git-status", Alignment::Left, 890)?;
    item.set_name("Source Control Sync")?;
    item.set_text("$(sync) 0↓ 1↑")?;
    item.set_tool_tip("Synchronize Changes")?;

    let handle = item.clone();
    item.set_click(move || {
        let Some(runtime) = runtime.as_ref() else {
            return;
        };
        if handle.text().contains("~spin") {
            return;
        }
        let _ = handle.set_text("$(sync~spin) Syncing");

        let handle = handle.clone();
        runtime.spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            // Off the owner thread: queued until the bar pumps.
            if let Err(e) = handle.set_text("$(sync) 0↓ 0↑") {
                debug!("Sync finished after the item went away: {e}");
            }
        });
    })?;
    item.show()?;
    Ok(item)
}

/// Shows a "logging in" message for the duration of a simulated sign-in.
fn login(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("login", Alignment::Left, 800)?;
    item.set_name("Account")?;
    item.set_text("$(account) Sign in")?;

    let handle = item.clone();
    let manager = manager.downgrade();
    item.set_click(move || {
        let Some(manager) = manager.upgrade() else {
            return;
        };
        let account = handle.clone();
        let signed_in = async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            let _ = account.set_text("$(account) Signed in");
            let _ = account.clear_click();
        };

        if let Err(e) = manager.set_message_until("$(loading~spin) Logging in...", signed_in) {
            warn!("Cannot show login message: {e}");
        }
    })?;
    item.show()?;
    Ok(item)
}

fn counter(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("counter", Alignment::Center, 0)?;
    item.set_name("Counter")?;
    item.set_text("$(add) 0")?;
    item.set_tool_tip("Click to count")?;

    let count = AtomicUsize::new(0);
    let handle = item.clone();
    item.set_click(move || {
        let n = count.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = handle.set_text(format!("$(add) {n}"));
    })?;
    item.show()?;
    Ok(item)
}

fn line_break(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("line-break", Alignment::Right, 90)?;
    item.set_name("End of Line Sequence")?;
    item.set_text("LF")?;
    item.set_tool_tip("Select End of Line Sequence")?;

    let handle = item.clone();
    item.set_click(move || {
        let next = if handle.text() == "LF" { "CRLF" } else { "LF" };
        let _ = handle.set_text(next);
    })?;
    item.show()?;
    Ok(item)
}

/// Clock that posts the full date as a temporary message when clicked.
fn date_time(manager: &StatusBarManager, timeout: Duration) -> Result<StatusBarItem> {
    let item = manager.create_item("datetime", Alignment::Right, 0)?;
    item.set_name("Date and Time")?;
    item.set_text(format!("$(clock) {}", Local::now().format("%H:%M")))?;

    let manager = manager.downgrade();
    item.set_click(move || {
        let Some(manager) = manager.upgrade() else {
            return;
        };
        let text = Local::now().format("$(calendar) %A, %d %B %Y").to_string();
        if let Err(e) = manager.set_message(text, timeout) {
            warn!("Cannot show date message: {e}");
        }
    })?;
    item.show()?;
    Ok(item)
}

fn python_env(manager: &StatusBarManager) -> Result<StatusBarItem> {
    let item = manager.create_item("python-env", Alignment::Left, -100)?;
    item.set_name("Python Environment")?;
    Ok(item)
}

/// Walks the python item through its setup steps from a background task,
/// then removes it.
async fn run_python_setup(item: StatusBarItem) {
    let total = PYTHON_STEPS.len();
    let shown = item.show();
    if let Err(e) = shown {
        debug!("Python environment item unavailable: {e}");
        return;
    }

    for (step, label) in PYTHON_STEPS.iter().enumerate() {
        let text = format!("$(gear~spin) {label} ({}/{total})", step + 1);
        if item.set_text(text).is_err() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1500)).await;
    }

    item.dispose();
    debug!("Python environment ready");
}
