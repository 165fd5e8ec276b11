// overlay.rs - the transparent element that captures pointer and key input over the player

use std::collections::BTreeSet;

pub const OVERLAY_CLASS: &str = "vimeo-video-root__event-overlay";
pub const DRAGGING_CLASS: &str = "dragging";

/// Inline style applied to every overlay. Full width on top of the player, no focus ring.
pub const OVERLAY_STYLE: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("outline", "none"),
    ("width", "100%"),
    ("z-index", "200"),
];

/// Input listeners the tracker can have attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Listener {
    MouseDown,
    MouseUp,
    MouseMove,
    /// Registered on the window rather than on the overlay itself.
    WindowKeyDown,
}

/// Size of the element the player renders into, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Host-independent model of the overlay element.
#[derive(Debug, Clone)]
pub struct EventOverlay {
    classes: BTreeSet<String>,
    tab_index: i32,
    focused: bool,
    listeners: BTreeSet<Listener>,
}

impl EventOverlay {
    /// A fresh overlay, styled, focusable and listening for mouse down/up and window key presses.
    pub fn new() -> Self {
        let mut overlay = Self {
            classes: BTreeSet::new(),
            tab_index: 0,
            focused: false,
            listeners: BTreeSet::new(),
        };
        overlay.add_class(OVERLAY_CLASS);
        overlay.listen(Listener::MouseDown);
        overlay.listen(Listener::MouseUp);
        overlay.listen(Listener::WindowKeyDown);
        overlay
    }

    pub fn style(&self) -> String {
        OVERLAY_STYLE
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn tab_index(&self) -> i32 {
        self.tab_index
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn listens(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    /// Attaching twice is a no-op, like `addEventListener` with the same handler.
    pub fn listen(&mut self, listener: Listener) {
        self.listeners.insert(listener);
    }

    pub fn unlisten(&mut self, listener: Listener) {
        self.listeners.remove(&listener);
    }
}

impl Default for EventOverlay {
    fn default() -> Self {
        Self::new()
    }
}
