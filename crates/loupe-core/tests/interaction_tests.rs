use std::sync::Arc;
use std::time::{Duration, Instant};

use loupe_core::machine::MENU_HIDE_DELAY;
use loupe_core::{
    map_phrase, FilterMode, InputEvent, InteractionStateMachine, MemorySettingsStore,
    NavigationState, ParameterKind, ParameterStore, SettingsStore, MAIN_MENU,
};

fn machine_with(
    saved: FilterMode,
) -> (
    InteractionStateMachine,
    Arc<ParameterStore>,
    Arc<MemorySettingsStore>,
) {
    let params = Arc::new(ParameterStore::new());
    let settings = Arc::new(MemorySettingsStore::new(saved));
    let machine = InteractionStateMachine::new(params.clone(), settings.clone());
    (machine, params, settings)
}

fn machine() -> (
    InteractionStateMachine,
    Arc<ParameterStore>,
    Arc<MemorySettingsStore>,
) {
    machine_with(FilterMode::Normal)
}

fn selected_index(machine: &InteractionStateMachine) -> usize {
    match machine.navigation() {
        NavigationState::MainMenu { selected } => selected,
        other => panic!("expected main menu, got {:?}", other),
    }
}

// ── Main menu navigation ─────────────────────────────────────────

#[test]
fn scroll_up_then_down_returns_to_start_from_every_item() {
    let now = Instant::now();
    for start in 0..MAIN_MENU.len() {
        let (mut m, _, _) = machine();
        for _ in 0..start {
            m.handle(InputEvent::ScrollDown, now);
        }
        assert_eq!(selected_index(&m), start);
        m.handle(InputEvent::ScrollUp, now);
        m.handle(InputEvent::ScrollDown, now);
        assert_eq!(selected_index(&m), start);
        m.handle(InputEvent::ScrollDown, now);
        m.handle(InputEvent::ScrollUp, now);
        assert_eq!(selected_index(&m), start);
    }
}

#[test]
fn main_menu_scrolling_is_cyclic() {
    let now = Instant::now();
    let (mut m, _, _) = machine();
    m.handle(InputEvent::ScrollUp, now);
    assert_eq!(selected_index(&m), MAIN_MENU.len() - 1);
    m.handle(InputEvent::ScrollDown, now);
    assert_eq!(selected_index(&m), 0);
}

#[test]
fn back_at_top_level_is_a_no_op() {
    let now = Instant::now();
    let (mut m, _, _) = machine();
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Back, now);
    assert_eq!(selected_index(&m), 1);
}

// ── Filter picker ────────────────────────────────────────────────

#[test]
fn picker_opens_on_active_filter_and_wraps() {
    let now = Instant::now();
    let (mut m, params, _) = machine_with(FilterMode::Grayscale);
    assert_eq!(params.filter_mode(), FilterMode::Grayscale);

    m.handle(InputEvent::Select, now);
    assert_eq!(
        m.navigation(),
        NavigationState::FilterPicker {
            selected: FilterMode::Grayscale.index()
        }
    );

    // From Grayscale, scroll-down wraps to Normal.
    m.handle(InputEvent::ScrollDown, now);
    assert_eq!(m.navigation(), NavigationState::FilterPicker { selected: 0 });
    assert_eq!(params.filter_mode(), FilterMode::Normal);
}

#[test]
fn picker_scroll_applies_and_persists_live() {
    let now = Instant::now();
    let (mut m, params, settings) = machine();
    m.handle(InputEvent::Select, now);
    m.handle(InputEvent::ScrollDown, now);
    assert_eq!(params.filter_mode(), FilterMode::Amber);
    assert_eq!(settings.load_filter_mode(), FilterMode::Amber);
}

#[test]
fn picker_back_keeps_previewed_filter() {
    let now = Instant::now();
    let (mut m, params, settings) = machine();
    m.handle(InputEvent::Select, now);
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Back, now);
    // Each scroll step already committed; leaving does not roll back.
    assert_eq!(params.filter_mode(), FilterMode::Amber);
    assert_eq!(settings.load_filter_mode(), FilterMode::Amber);
    assert_eq!(m.navigation(), NavigationState::MainMenu { selected: 0 });
}

#[test]
fn picker_select_commits_and_returns() {
    let now = Instant::now();
    let (mut m, params, settings) = machine();
    m.handle(InputEvent::Select, now);
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Select, now);
    assert_eq!(params.filter_mode(), FilterMode::Grayscale);
    assert_eq!(settings.load_filter_mode(), FilterMode::Grayscale);
    assert_eq!(m.navigation(), NavigationState::MainMenu { selected: 0 });
    assert_eq!(m.notice(now), Some("Filter applied: Grayscale"));
}

// ── Adjusting ────────────────────────────────────────────────────

#[test]
fn zoom_adjustment_scenario() {
    let now = Instant::now();
    let (mut m, params, _) = machine();

    // Zoom is the second main-menu item.
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Select, now);
    assert_eq!(
        m.navigation(),
        NavigationState::Adjusting {
            kind: ParameterKind::Zoom,
            pending: 0
        }
    );

    for _ in 0..5 {
        m.handle(InputEvent::ScrollUp, now);
    }
    assert_eq!(
        m.navigation(),
        NavigationState::Adjusting {
            kind: ParameterKind::Zoom,
            pending: 25
        }
    );
    assert_eq!(params.snapshot().zoom, 3.25);

    m.handle(InputEvent::Select, now);
    assert_eq!(m.navigation(), NavigationState::MainMenu { selected: 1 });
    assert_eq!(params.snapshot().zoom, 3.25);
    assert_eq!(m.notice(now), Some("Zoom set to 25%"));
}

#[test]
fn pending_value_clamps_at_bounds() {
    let now = Instant::now();
    let (mut m, params, _) = machine();
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Select, now);
    for _ in 0..30 {
        m.handle(InputEvent::ScrollUp, now);
    }
    assert_eq!(
        m.navigation(),
        NavigationState::Adjusting {
            kind: ParameterKind::Zoom,
            pending: 100
        }
    );
    assert_eq!(params.snapshot().zoom, 10.0);
    for _ in 0..30 {
        m.handle(InputEvent::ScrollDown, now);
    }
    assert_eq!(params.snapshot().zoom, 1.0);
}

#[test]
fn adjusting_back_keeps_previewed_value() {
    let now = Instant::now();
    let (mut m, params, _) = machine();
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Select, now);
    m.handle(InputEvent::ScrollUp, now);
    m.handle(InputEvent::Back, now);
    // Brightness: 50% default + one step = 55% -> 0.1.
    assert!((params.snapshot().brightness - 0.1).abs() < 1e-6);
    assert_eq!(m.navigation(), NavigationState::MainMenu { selected: 2 });
}

#[test]
fn screen_brightness_adjusts_outside_render_snapshot() {
    let now = Instant::now();
    let (mut m, params, _) = machine();
    m.handle(InputEvent::ScrollUp, now); // wrap to Screen Brightness
    m.handle(InputEvent::Select, now);
    assert_eq!(
        m.navigation(),
        NavigationState::Adjusting {
            kind: ParameterKind::ScreenBrightness,
            pending: 100
        }
    );
    m.handle(InputEvent::ScrollDown, now);
    assert!((params.screen_brightness() - 0.95).abs() < 1e-6);
    // The render snapshot is untouched by screen brightness.
    assert_eq!(params.snapshot(), Default::default());
}

// ── Voice shortcuts ──────────────────────────────────────────────

#[test]
fn voice_filter_applies_anywhere_without_navigation() {
    let now = Instant::now();
    let (mut m, params, settings) = machine();
    m.handle(InputEvent::ScrollDown, now);
    m.handle(InputEvent::Select, now); // Adjusting zoom
    m.handle(map_phrase("grayscale").unwrap(), now);
    assert_eq!(params.filter_mode(), FilterMode::Grayscale);
    assert_eq!(settings.load_filter_mode(), FilterMode::Grayscale);
    assert!(matches!(
        m.navigation(),
        NavigationState::Adjusting {
            kind: ParameterKind::Zoom,
            ..
        }
    ));
}

#[test]
fn voice_zoom_steps_and_clamps() {
    let now = Instant::now();
    let (mut m, params, _) = machine();
    m.handle(map_phrase("zoom in").unwrap(), now);
    assert_eq!(params.snapshot().zoom, 1.25);
    for _ in 0..50 {
        m.handle(map_phrase("zoom in").unwrap(), now);
    }
    assert_eq!(params.snapshot().zoom, 10.0);
    m.handle(map_phrase("zoom out").unwrap(), now);
    assert_eq!(params.snapshot().zoom, 9.75);
}

// ── Startup persistence ──────────────────────────────────────────

#[test]
fn persisted_filter_is_restored_at_startup() {
    let (_m, params, _) = machine_with(FilterMode::Grayscale);
    assert_eq!(params.snapshot().filter_mode, FilterMode::Grayscale);
}

// ── Menu auto-hide ───────────────────────────────────────────────

#[test]
fn menu_hides_after_delay_and_any_input_restarts_it() {
    let t0 = Instant::now();
    let (mut m, _, _) = machine();
    m.touch(t0);
    assert!(m.menu_visible(t0));
    assert!(!m.menu_visible(t0 + MENU_HIDE_DELAY));

    let t1 = t0 + MENU_HIDE_DELAY + Duration::from_secs(1);
    m.handle(InputEvent::ScrollDown, t1);
    assert!(m.menu_visible(t1 + Duration::from_secs(4)));
    assert!(!m.menu_visible(t1 + MENU_HIDE_DELAY));
}

#[test]
fn submodes_pin_menu_visible_and_return_restarts_timer() {
    let t0 = Instant::now();
    let (mut m, _, _) = machine();
    m.handle(InputEvent::Select, t0); // filter picker
    assert!(m.hide_deadline().is_none());
    assert!(m.menu_visible(t0 + Duration::from_secs(60)));

    let t1 = t0 + Duration::from_secs(60);
    m.handle(InputEvent::Back, t1);
    assert!(m.menu_visible(t1 + Duration::from_secs(4)));
    assert!(!m.menu_visible(t1 + MENU_HIDE_DELAY));
}

// ── Notices ──────────────────────────────────────────────────────

#[test]
fn notices_expire() {
    let t0 = Instant::now();
    let (mut m, _, _) = machine();
    m.handle(InputEvent::SetFilter(FilterMode::Amber), t0);
    assert_eq!(m.notice(t0), Some("Filter applied: Amber"));
    assert_eq!(m.notice(t0 + Duration::from_secs(3)), None);
}
