use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::input::InputEvent;
use crate::menu::{FILTER_CHOICES, MAIN_MENU};
use crate::params::{FilterMode, ParameterKind, ParameterStore};
use crate::persist::SettingsStore;

/// Step applied to the pending percentage per scroll while adjusting.
const ADJUST_STEP: i32 = 5;
/// How long the main menu stays visible after the last input.
pub const MENU_HIDE_DELAY: Duration = Duration::from_secs(5);
/// How long commit notices stay on screen.
const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// The single active interaction mode. Exactly one variant exists at a
/// time, so two modes can never be visible together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationState {
    MainMenu { selected: usize },
    FilterPicker { selected: usize },
    Adjusting { kind: ParameterKind, pending: i32 },
}

/// A short-lived confirmation message for the widget layer.
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    until: Instant,
}

/// Consumes abstract input events and drives navigation plus all parameter
/// writes. This is the sole writer of the [`ParameterStore`]; every input
/// source is funneled into it on one thread, so it is never entered
/// concurrently.
pub struct InteractionStateMachine {
    nav: NavigationState,
    params: Arc<ParameterStore>,
    settings: Arc<dyn SettingsStore>,
    /// Main-menu position to restore when a submode closes.
    main_selected: usize,
    /// While in the main menu: the moment the menu auto-hides. `None` means
    /// hidden (or a submode is pinning its popup visible).
    hide_deadline: Option<Instant>,
    notice: Option<Notice>,
}

impl InteractionStateMachine {
    /// Build the machine and restore the persisted filter mode into the
    /// store, as happens once at startup.
    pub fn new(params: Arc<ParameterStore>, settings: Arc<dyn SettingsStore>) -> Self {
        let saved = settings.load_filter_mode();
        params.set_filter_mode(saved);
        Self {
            nav: NavigationState::MainMenu { selected: 0 },
            params,
            settings,
            main_selected: 0,
            hide_deadline: None,
            notice: None,
        }
    }

    pub fn navigation(&self) -> NavigationState {
        self.nav
    }

    /// Record user activity without an event (e.g. app resume): shows the
    /// main menu and restarts its hide timer.
    pub fn touch(&mut self, now: Instant) {
        if let NavigationState::MainMenu { .. } = self.nav {
            self.hide_deadline = Some(now + MENU_HIDE_DELAY);
        }
    }

    /// Whether the menu/popup layer should currently be drawn. Submodes pin
    /// their popup visible; the main menu hides after [`MENU_HIDE_DELAY`].
    pub fn menu_visible(&self, now: Instant) -> bool {
        match self.nav {
            NavigationState::MainMenu { .. } => {
                self.hide_deadline.is_some_and(|deadline| now < deadline)
            }
            _ => true,
        }
    }

    /// The instant the main menu will auto-hide, if a timer is running.
    pub fn hide_deadline(&self) -> Option<Instant> {
        match self.nav {
            NavigationState::MainMenu { .. } => self.hide_deadline,
            _ => None,
        }
    }

    /// Current confirmation message, if one is still fresh.
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now < n.until)
            .map(|n| n.text.as_str())
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) {
        match event {
            // Voice shortcuts act on the store directly and leave
            // navigation untouched.
            InputEvent::SetFilter(mode) => {
                self.apply_filter(mode);
                self.push_notice(format!("Filter applied: {}", mode.label()), now);
            }
            InputEvent::AdjustZoomBy(delta) => {
                let zoom = self.params.snapshot().zoom + delta;
                self.params.set_zoom(zoom);
            }
            InputEvent::ScrollUp | InputEvent::ScrollDown | InputEvent::Select | InputEvent::Back => {
                self.navigate(event, now)
            }
        }
        self.reset_hide_timer(now);
    }

    fn navigate(&mut self, event: InputEvent, now: Instant) {
        match self.nav {
            NavigationState::MainMenu { selected } => match event {
                InputEvent::ScrollUp => {
                    let len = MAIN_MENU.len();
                    self.nav = NavigationState::MainMenu {
                        selected: (selected + len - 1) % len,
                    };
                }
                InputEvent::ScrollDown => {
                    self.nav = NavigationState::MainMenu {
                        selected: (selected + 1) % MAIN_MENU.len(),
                    };
                }
                InputEvent::Select => {
                    self.main_selected = selected;
                    let kind = MAIN_MENU[selected].kind;
                    self.nav = if kind == ParameterKind::Filter {
                        NavigationState::FilterPicker {
                            selected: self.params.filter_mode().index(),
                        }
                    } else {
                        NavigationState::Adjusting {
                            kind,
                            pending: kind.to_percent(self.params.value(kind)),
                        }
                    };
                }
                // Back from the top level does nothing.
                InputEvent::Back => {}
                _ => {}
            },
            NavigationState::FilterPicker { selected } => match event {
                InputEvent::ScrollUp | InputEvent::ScrollDown => {
                    let len = FILTER_CHOICES.len();
                    let next = if event == InputEvent::ScrollUp {
                        (selected + len - 1) % len
                    } else {
                        (selected + 1) % len
                    };
                    self.nav = NavigationState::FilterPicker { selected: next };
                    // Preview-as-you-scroll: every step applies and
                    // persists the filter immediately.
                    self.apply_filter(FILTER_CHOICES[next]);
                }
                InputEvent::Select => {
                    let mode = FILTER_CHOICES[selected];
                    self.apply_filter(mode);
                    self.push_notice(format!("Filter applied: {}", mode.label()), now);
                    self.close_submode();
                }
                // Scroll steps already committed; Back only leaves the
                // picker, it does not roll anything back.
                InputEvent::Back => self.close_submode(),
                _ => {}
            },
            NavigationState::Adjusting { kind, pending } => match event {
                InputEvent::ScrollUp | InputEvent::ScrollDown => {
                    let next = if event == InputEvent::ScrollUp {
                        (pending + ADJUST_STEP).min(100)
                    } else {
                        (pending - ADJUST_STEP).max(0)
                    };
                    self.nav = NavigationState::Adjusting { kind, pending: next };
                    // Live preview: apply on every step.
                    self.params.set(kind, kind.from_percent(next));
                }
                InputEvent::Select => {
                    self.push_notice(format!("{} set to {}%", kind.title(), pending), now);
                    self.close_submode();
                }
                InputEvent::Back => self.close_submode(),
                _ => {}
            },
        }
    }

    fn close_submode(&mut self) {
        self.nav = NavigationState::MainMenu {
            selected: self.main_selected,
        };
    }

    fn apply_filter(&mut self, mode: FilterMode) {
        self.params.set_filter_mode(mode);
        self.settings.save_filter_mode(mode);
    }

    fn push_notice(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            until: now + NOTICE_DURATION,
        });
    }

    fn reset_hide_timer(&mut self, now: Instant) {
        self.hide_deadline = match self.nav {
            NavigationState::MainMenu { .. } => Some(now + MENU_HIDE_DELAY),
            _ => None,
        };
    }
}
