//! Loading/success/error indicator shared by the log and plot panels.

use serde::{Deserialize, Serialize};

use crate::dom::Dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Loading,
    Success,
    Error,
}

impl PanelStatus {
    const ALL: [PanelStatus; 3] = [PanelStatus::Loading, PanelStatus::Success, PanelStatus::Error];

    pub fn class(self) -> &'static str {
        match self {
            PanelStatus::Loading => "grey-text",
            PanelStatus::Success => "green-text",
            PanelStatus::Error => "red-text",
        }
    }

    /// Material icon name.
    pub fn icon(self) -> &'static str {
        match self {
            PanelStatus::Loading => "hourglass_empty",
            PanelStatus::Success => "check_circle",
            PanelStatus::Error => "error",
        }
    }
}

/// Where a panel shows its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusHooks {
    /// Element carrying the status colour classes.
    pub selector: String,
    /// Icon element whose text names the status.
    pub icon: String,
}

impl StatusHooks {
    pub fn new(selector: impl Into<String>) -> Self {
        let selector = selector.into();
        let icon = format!("{selector} i");
        Self { selector, icon }
    }
}

impl Default for StatusHooks {
    fn default() -> Self {
        Self::new(".status")
    }
}

/// Status of one panel. `Error` is sticky.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelState {
    status: PanelStatus,
}

impl PanelState {
    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn is_error(&self) -> bool {
        self.status == PanelStatus::Error
    }

    /// Move to `next`. Returns whether the status changed; nothing leaves `Error`.
    pub fn set(&mut self, next: PanelStatus) -> bool {
        if self.status == next || self.is_error() {
            return false;
        }
        self.status = next;
        true
    }

    /// Set and, if it changed, repaint the indicator.
    pub fn update(&mut self, next: PanelStatus, dom: &impl Dom, hooks: &StatusHooks) {
        if self.set(next) {
            render(self.status, dom, hooks);
        }
    }
}

pub fn render(status: PanelStatus, dom: &impl Dom, hooks: &StatusHooks) {
    for other in PanelStatus::ALL.into_iter().filter(|s| *s != status) {
        dom.remove_class(&hooks.selector, other.class());
    }
    dom.add_class(&hooks.selector, status.class());
    dom.set_text(&hooks.icon, status.icon());
}
