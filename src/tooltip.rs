//! Tooltip personnalisable qui suit le pointeur

use derive_more::Display;
use serde::{Deserialize, Serialize};

const OFFSET_X: i64 = 24;
const OFFSET_Y: i64 = 0;
// Shift so the box never sits under the pointer tip
const NUDGE: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub client_x: i64,
    pub client_y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scroll {
    pub left: i64,
    pub top: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("top: {top}px; left: {left}px")]
pub struct TooltipPosition {
    pub top: i64,
    pub left: i64,
}

impl TooltipPosition {
    pub fn css(&self) -> String {
        self.to_string()
    }
}

/// Place the tooltip box relative to the pointer, in document coordinates.
pub fn place(pointer: Pointer, scroll: Scroll) -> TooltipPosition {
    TooltipPosition {
        top: pointer.client_y - NUDGE + OFFSET_Y + scroll.top,
        left: pointer.client_x - NUDGE + OFFSET_X + scroll.left,
    }
}

/// État de la boîte de tooltip
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tooltip {
    html: String,
    visible: bool,
    position: Option<TooltipPosition>,
}

impl Tooltip {
    pub fn show(&mut self, html: impl Into<String>) {
        self.html = html.into();
        self.visible = true;
    }

    /// Only moves the box while it is shown.
    pub fn track(&mut self, pointer: Pointer, scroll: Scroll) -> Option<TooltipPosition> {
        if !self.visible {
            return None;
        }
        let position = place(pointer, scroll);
        self.position = Some(position);
        Some(position)
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<TooltipPosition> {
        self.position
    }
}
