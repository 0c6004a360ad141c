//! Pointer events and the filters that classify a drag gesture.
//!
//! A [`MouseFilter`] decides whether a press starts a selecting or a toggling
//! rubber band. Filters can be written as short strings such as
//! `primary+shift`, which is how they appear in configuration.

use crate::error::AppError;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pointer button that produced an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl From<egui::PointerButton> for PointerButton {
    fn from(button: egui::PointerButton) -> Self {
        match button {
            egui::PointerButton::Secondary => PointerButton::Secondary,
            egui::PointerButton::Middle => PointerButton::Middle,
            _ => PointerButton::Primary,
        }
    }
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const ALL: Self = Self {
        shift: true,
        ctrl: true,
        alt: true,
        meta: true,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Returns only the modifiers that are also set in `mask`.
    pub fn masked(self, mask: Modifiers) -> Self {
        Self {
            shift: self.shift && mask.shift,
            ctrl: self.ctrl && mask.ctrl,
            alt: self.alt && mask.alt,
            meta: self.meta && mask.meta,
        }
    }
}

impl From<egui::Modifiers> for Modifiers {
    fn from(m: egui::Modifiers) -> Self {
        Self {
            shift: m.shift,
            ctrl: m.ctrl,
            alt: m.alt,
            meta: m.mac_cmd,
        }
    }
}

/// A pointer event delivered to the drag controller.
///
/// The controller marks the event consumed when it handles it and is
/// configured to consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: egui::Pos2,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    consumed: bool,
}

impl PointerEvent {
    pub fn new(position: egui::Pos2, button: PointerButton, modifiers: Modifiers) -> Self {
        Self {
            position,
            button,
            modifiers,
            consumed: false,
        }
    }

    /// Primary-button event with no modifiers held.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(egui::pos2(x, y), PointerButton::Primary, Modifiers::NONE)
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Predicate over pointer events: a button plus a required modifier state.
///
/// Only the modifiers in `mask` are compared; the rest are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseFilter {
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub mask: Modifiers,
}

impl MouseFilter {
    /// Plain primary-button press with no modifiers.
    pub const SELECTION: Self = Self {
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
        mask: Modifiers::ALL,
    };

    /// Primary-button press with shift held.
    pub const ALTERNATE_SELECTION: Self = Self {
        button: PointerButton::Primary,
        modifiers: Modifiers::SHIFT,
        mask: Modifiers::ALL,
    };

    pub fn new(button: PointerButton, modifiers: Modifiers) -> Self {
        Self {
            button,
            modifiers,
            mask: Modifiers::ALL,
        }
    }

    pub fn accept(&self, event: &PointerEvent) -> bool {
        event.button == self.button && event.modifiers.masked(self.mask) == self.modifiers
    }
}

impl FromStr for MouseFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('+').map(|p| p.trim().to_ascii_lowercase());

        let button = match parts.next().as_deref() {
            Some("primary") | Some("left") => PointerButton::Primary,
            Some("secondary") | Some("right") => PointerButton::Secondary,
            Some("middle") => PointerButton::Middle,
            other => {
                return Err(AppError::config(format!(
                    "unknown pointer button {:?} in filter '{}'",
                    other.unwrap_or_default(),
                    s
                )));
            }
        };

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                other => {
                    return Err(AppError::config(format!(
                        "unknown modifier '{}' in filter '{}'",
                        other, s
                    )));
                }
            }
        }

        Ok(Self::new(button, modifiers))
    }
}

impl fmt::Display for MouseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let button = match self.button {
            PointerButton::Primary => "primary",
            PointerButton::Secondary => "secondary",
            PointerButton::Middle => "middle",
        };
        write!(f, "{}", button)?;
        let m = self.modifiers;
        for (set, name) in [(m.shift, "shift"), (m.ctrl, "ctrl"), (m.alt, "alt"), (m.meta, "meta")] {
            if set {
                write!(f, "+{}", name)?;
            }
        }
        Ok(())
    }
}
