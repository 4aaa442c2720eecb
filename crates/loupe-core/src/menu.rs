use crate::params::{FilterMode, ParameterKind};

/// One entry in a fixed menu sequence. Read-only after construction.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub kind: ParameterKind,
}

/// The main menu, in scroll order.
pub const MAIN_MENU: [MenuItem; 6] = [
    MenuItem { label: "Filters", kind: ParameterKind::Filter },
    MenuItem { label: "Zoom", kind: ParameterKind::Zoom },
    MenuItem { label: "Brightness", kind: ParameterKind::Brightness },
    MenuItem { label: "Contrast", kind: ParameterKind::Contrast },
    MenuItem { label: "Sharpness", kind: ParameterKind::Sharpness },
    MenuItem { label: "Screen Brightness", kind: ParameterKind::ScreenBrightness },
];

/// The filter picker choices, one per mode, in enum order.
pub const FILTER_CHOICES: [FilterMode; 3] = [
    FilterMode::Normal,
    FilterMode::Amber,
    FilterMode::Grayscale,
];
