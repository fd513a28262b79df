//! Wayland layer-shell surface for `statusbar`.
//!
//! Owns the iced application loop and wires together:
//! - the status bar manager and the container it is bound to
//! - the demo producers (see [`demo`])
//! - a pump that applies writes queued by other threads
//! - the config file watcher (live theme / context menu reload)
//! - the clock and spinner timers

pub mod demo;

use demo::Demo;
use futures::{channel::mpsc::Sender, Stream};
use iced::{
    widget::{column, container},
    Element, Length, Subscription, Task,
};
use iced_layershell::{
    build_pattern::application,
    reexport::{Anchor, Layer},
    settings::{LayerShellSettings, Settings},
    to_layer_message,
};
use statusbar_config::{default_path, load as load_config, ConfigWatcher, Position, StatusBarConfig};
use statusbar_core::{DisabledIds, Result, StatusBarError};
use statusbar_registry::{StatusBarManager, WorkSignal};
use statusbar_renderer::BarEvent;
use statusbar_surface::{BarSnapshot, ConfigMenu, PointerButton, SharedContainer, StatusBarContainer};
use statusbar_theme::{ResourceKey, Theme, ToIced};
use std::time::Duration;
use tracing::{debug, error, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the Wayland bar. Never returns under normal operation.
///
/// Must be called with a tokio runtime entered: temporary messages and the
/// demo producers schedule their timers on it.
pub fn run() -> Result<()> {
    let config = load_config(default_path()).unwrap_or_default();
    let height = config.global.height;
    let anchor = position_to_anchor(config.global.position);
    let exclusive_zone = if config.global.exclusive_zone {
        height as i32
    } else {
        0
    };

    application(StatusBar::new, StatusBar::namespace, StatusBar::update, StatusBar::view)
        .subscription(StatusBar::subscription)
        .style(StatusBar::style)
        .settings(Settings {
            layer_settings: LayerShellSettings {
                size: Some((0, height)), // width=0 + L|R anchor = full-width stretch
                exclusive_zone,
                anchor,
                layer: Layer::Top,
                ..Default::default()
            },
            ..Default::default()
        })
        .run()
        .map_err(|e| StatusBarError::Wayland(e.to_string()))
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Top-level application messages.
///
/// `#[to_layer_message]` injects layer-shell control variants (SizeChange,
/// AnchorChange, etc.). The menu uses `SizeChange` to grow the surface.
#[to_layer_message]
#[derive(Debug, Clone)]
pub enum Message {
    Bar(BarEvent),
    /// Another thread queued status bar writes.
    Pump,
    /// Advance spinning icons by one frame.
    Spin,
    /// One-second timer tick for the clock item.
    Tick,
    ConfigReloaded,
}

// ── State ─────────────────────────────────────────────────────────────────────

struct StatusBar {
    config: StatusBarConfig,
    theme: Theme,
    manager: StatusBarManager,
    container: SharedContainer,
    /// Rendered state, refreshed after every update.
    snapshot: BarSnapshot,
    menu: Option<ConfigMenu>,
    /// Host-side copy of the ids hidden through the menu.
    disabled: DisabledIds,
    demo: Option<Demo>,
    frame: usize,
}

impl StatusBar {
    fn new() -> (Self, Task<Message>) {
        let config = load_config(default_path()).unwrap_or_default();
        let theme = Theme::from_config(&config.theme);
        let manager = StatusBarManager::new();

        // The demo items are created before any container exists and sit in
        // the pending queue until it is bound below.
        let timeout = Duration::from_millis(config.global.message_timeout_ms);
        let demo = match Demo::install(&manager, timeout) {
            Ok(demo) => Some(demo),
            Err(e) => {
                error!("Demo items unavailable: {e}");
                None
            }
        };

        let disabled = DisabledIds::new();
        let mut surface = StatusBarContainer::new().with_disabled_ids(disabled.clone());
        surface.set_context_menu_enabled(config.global.context_menu);
        let container = SharedContainer::new(surface);

        if let Err(e) = manager.bind_surface(container.clone()) {
            error!("Cannot bind status bar container: {e}");
        }

        let mut bar = Self {
            config,
            theme,
            manager,
            container,
            snapshot: BarSnapshot::default(),
            menu: None,
            disabled,
            demo,
            frame: 0,
        };
        bar.refresh();

        let pump = Task::run(work_stream(bar.manager.work_signal()), |()| Message::Pump);
        (bar, pump)
    }

    fn namespace() -> String {
        String::from("statusbar")
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Bar(event) => self.handle_bar(event),
            Message::Pump => {
                match self.manager.pump() {
                    Ok(applied) => debug!(applied, "Applied queued status bar writes"),
                    Err(e) => warn!("Pump failed: {e}"),
                }
                Task::none()
            }
            Message::Spin => {
                self.frame = self.frame.wrapping_add(1);
                Task::none()
            }
            Message::Tick => {
                if let Some(demo) = &self.demo {
                    if let Err(e) = demo.tick() {
                        debug!("Clock update skipped: {e}");
                    }
                }
                Task::none()
            }
            Message::ConfigReloaded => {
                self.reload();
                Task::none()
            }
            // Layer-shell injected variants handled by the backend.
            _ => Task::none(),
        };

        self.refresh();
        task
    }

    fn handle_bar(&mut self, event: BarEvent) -> Task<Message> {
        match event {
            BarEvent::Entered(key) => self.container.lock().pointer_entered(key),
            BarEvent::Exited(key) => self.container.lock().pointer_exited(key),
            BarEvent::Pressed(key) => {
                self.container.lock().pointer_pressed(key, PointerButton::Primary);
            }
            BarEvent::Released(key) => {
                // The lock is released before the handler runs: handlers
                // call back into the manager.
                let click = self.container.lock().pointer_released(key);
                if let Some(click) = click {
                    click();
                }
            }
            BarEvent::ContextMenu(origin) => {
                if self.menu.is_some() {
                    return Task::none();
                }
                self.menu = self.container.lock().open_menu(origin);
                if let Some(menu) = &self.menu {
                    return self.resize(menu_height(menu, &self.theme));
                }
            }
            BarEvent::MenuToggled(id, checked) => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.set_checked(&id, checked);
                }
            }
            BarEvent::MenuHideOrigin => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.choose_hide_origin();
                }
                return self.close_menu();
            }
            BarEvent::MenuClosed => return self.close_menu(),
        }
        Task::none()
    }

    fn close_menu(&mut self) -> Task<Message> {
        let Some(menu) = self.menu.take() else {
            return Task::none();
        };

        let mut container = self.container.lock();
        let delta = container.close_menu(&menu);
        if !delta.is_empty() {
            self.disabled = container.disabled_ids().clone();
            info!(hidden = self.disabled.len(), "Status bar items reconfigured");
        }
        drop(container);

        self.resize(0)
    }

    fn resize(&self, extra: u32) -> Task<Message> {
        Task::done(Message::SizeChange((0, self.config.global.height + extra)))
    }

    fn reload(&mut self) {
        match load_config(default_path()) {
            Ok(cfg) => {
                info!("Config reloaded");
                self.theme = Theme::from_config(&cfg.theme);
                self.container
                    .lock()
                    .set_context_menu_enabled(cfg.global.context_menu);
                self.config = cfg;
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    fn refresh(&mut self) {
        self.snapshot = self.container.lock().snapshot();
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let bar = container(
            statusbar_renderer::bar(&self.snapshot, &self.theme, self.frame).map(Message::Bar),
        )
        .width(Length::Fill)
        .height(Length::Fixed(self.config.global.height as f32));

        let Some(menu) = &self.menu else {
            return bar.into();
        };
        let menu = statusbar_renderer::menu::view(menu, &self.theme).map(Message::Bar);

        let stacked = match self.config.global.position {
            Position::Top => column![bar, menu],
            Position::Bottom => column![menu, bar],
        };
        stacked.width(Length::Fill).into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick),
            Subscription::run(config_stream),
        ];
        if self.snapshot.spins() {
            subscriptions.push(iced::time::every(self.theme.spin_interval).map(|_| Message::Spin));
        }
        Subscription::batch(subscriptions)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        let bar = self.theme.bar_style(&self.config.global);
        iced::theme::Style {
            background_color: bar.background.with_alpha(bar.opacity).to_iced(),
            text_color: self.theme.resource(ResourceKey::BarForeground).to_iced(),
        }
    }
}

// ── Streams ───────────────────────────────────────────────────────────────────

/// Yields once every time another thread queues work for the owner.
///
/// `StatusBar::manager` stays the only owner reference.
fn work_stream(signal: WorkSignal) -> impl Stream<Item = ()> + Send + 'static {
    futures::stream::unfold(signal, |signal| async move {
        signal.notified().await;
        Some(((), signal))
    })
}

/// Watches `~/.config/statusbar/statusbar.toml` and sends `ConfigReloaded`.
fn config_stream() -> impl Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn position_to_anchor(pos: Position) -> Anchor {
    match pos {
        Position::Top => Anchor::Top | Anchor::Left | Anchor::Right,
        Position::Bottom => Anchor::Bottom | Anchor::Left | Anchor::Right,
    }
}

/// Extra surface height needed to show `menu` next to the bar.
fn menu_height(menu: &ConfigMenu, theme: &Theme) -> u32 {
    let rows = menu.toggles.len() + usize::from(menu.hide_origin.is_some()) + 1;
    let row_height = theme.font_size * 1.8 + 4.0;
    (rows as f32 * row_height + 32.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_surface::{HideAction, MenuToggle};

    #[test]
    fn menu_height_grows_with_rows() {
        let theme = Theme::default();
        let mut menu = ConfigMenu::default();
        let empty = menu_height(&menu, &theme);

        menu.toggles.push(MenuToggle {
            id: "mode".into(),
            label: "Editor Mode".into(),
            checked: true,
        });
        menu.hide_origin = Some(HideAction {
            id: "cursor".into(),
            label: "Hide 'cursor'".into(),
            chosen: false,
        });
        assert!(menu_height(&menu, &theme) > empty);
    }

    #[test]
    fn anchor_follows_position() {
        assert!(position_to_anchor(Position::Top).contains(Anchor::Top));
        assert!(position_to_anchor(Position::Bottom).contains(Anchor::Bottom));
    }
}
