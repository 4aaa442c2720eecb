pub mod input;
pub mod machine;
pub mod menu;
pub mod params;
pub mod persist;
pub mod schedule;

pub use input::{event_channel, map_key, map_phrase, InputEvent, KeyCode};
pub use machine::{InteractionStateMachine, NavigationState};
pub use menu::{MenuItem, FILTER_CHOICES, MAIN_MENU};
pub use params::{FilterMode, ParameterKind, ParameterStore, ViewParameters};
pub use persist::{MemorySettingsStore, SettingsStore};
pub use schedule::{RedrawHandle, RenderScheduler};
