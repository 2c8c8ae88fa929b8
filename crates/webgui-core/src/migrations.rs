//! Migration list on the dashboard: upgrade, downgrade, refresh and add.
//!
//! Every action is followed by a re-fetch of the rendered list, so the page
//! never has to work out locally what an action changed.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::dom::Dom;
use crate::error::{Result, UiError};
use crate::markup;
use crate::models::{ActionResult, ActionStatus};
use crate::transport::{HttpClient, RequestConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationAction {
    Upgrade,
    Downgrade,
    Refresh,
    Add,
}

impl MigrationAction {
    pub const ALL: [MigrationAction; 4] = [
        MigrationAction::Upgrade,
        MigrationAction::Downgrade,
        MigrationAction::Refresh,
        MigrationAction::Add,
    ];
}

impl std::fmt::Display for MigrationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationAction::Upgrade => write!(f, "upgrade"),
            MigrationAction::Downgrade => write!(f, "downgrade"),
            MigrationAction::Refresh => write!(f, "refresh"),
            MigrationAction::Add => write!(f, "add"),
        }
    }
}

/// Configuration of a [`MigrationList`]. Unset fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MigrationOptions {
    pub upgrade_trigger: String,
    pub downgrade_trigger: String,
    pub refresh_trigger: String,
    pub add_trigger: String,
    pub name_input_selector: String,
    pub error_classes: String,
    pub success_classes: String,
    /// Falls back to the list root's `data-status-url` attribute.
    pub status_url: Option<String>,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            upgrade_trigger: ".migration-upgrade".to_string(),
            downgrade_trigger: ".migration-downgrade".to_string(),
            refresh_trigger: ".migration-refresh".to_string(),
            add_trigger: ".migration-add".to_string(),
            name_input_selector: "#migration-name-input".to_string(),
            error_classes: "red lighten-2".to_string(),
            success_classes: "green lighten-2".to_string(),
            status_url: None,
        }
    }
}

impl MigrationOptions {
    pub fn trigger(&self, action: MigrationAction) -> &str {
        match action {
            MigrationAction::Upgrade => &self.upgrade_trigger,
            MigrationAction::Downgrade => &self.downgrade_trigger,
            MigrationAction::Refresh => &self.refresh_trigger,
            MigrationAction::Add => &self.add_trigger,
        }
    }

    pub fn classes_for(&self, status: ActionStatus) -> &str {
        match status {
            ActionStatus::Success => &self.success_classes,
            ActionStatus::Error => &self.error_classes,
        }
    }
}

pub struct MigrationList<D, H> {
    root: String,
    options: MigrationOptions,
    status_url: String,
    dom: D,
    http: H,
}

impl<D: Dom, H: HttpClient> MigrationList<D, H> {
    /// Attach to the list at `root`.
    pub fn new(root: impl Into<String>, options: MigrationOptions, dom: D, http: H) -> Result<Self> {
        let root = root.into();
        let status_url = options
            .status_url
            .clone()
            .or_else(|| dom.attribute(&root, "data-status-url"))
            .filter(|url| !url.is_empty())
            .ok_or(UiError::MissingConfig("status_url"))?;

        Ok(Self {
            root,
            options,
            status_url,
            dom,
            http,
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// Trigger selectors to delegate clicks for, in match order.
    pub fn triggers(&self) -> impl Iterator<Item = (MigrationAction, &str)> + '_ {
        MigrationAction::ALL
            .into_iter()
            .map(|action| (action, self.options.trigger(action)))
    }

    /// Request to send for `action`. The migration name of `add` is not validated.
    pub fn request_for(&self, action: MigrationAction) -> RequestConfig {
        match action {
            MigrationAction::Add => {
                let name = self
                    .dom
                    .input_value(&self.options.name_input_selector)
                    .unwrap_or_default();
                RequestConfig::PostForm(vec![("name".to_string(), name)])
            }
            _ => RequestConfig::Get,
        }
    }

    /// A trigger for `action` pointing at `href` was clicked.
    pub async fn trigger(&self, action: MigrationAction, href: &str) -> Result<ActionResult> {
        info!(%action, href, "Migration action");
        let request = self.request_for(action);
        self.perform_action(href, &request).await
    }

    /// Run an action endpoint, toast its outcome, then refresh the list.
    ///
    /// A failed request is toasted with the error classes and returned; the
    /// list is refreshed either way.
    pub async fn perform_action(&self, url: &str, request: &RequestConfig) -> Result<ActionResult> {
        let outcome = self.request_action(url, request).await;
        match &outcome {
            Ok(result) => {
                self.dom.toast(
                    &markup::message_html(&result.message),
                    self.options.classes_for(result.status),
                );
            }
            Err(e) => {
                warn!(url, method = request.method(), error = %e, "Migration action failed");
                self.dom.toast(
                    &markup::escape_html(&e.to_string()),
                    &self.options.error_classes,
                );
            }
        }

        if let Err(e) = self.update_list().await {
            error!(url = %self.status_url, error = %e, "Could not refresh migration list");
        }
        outcome
    }

    async fn request_action(&self, url: &str, request: &RequestConfig) -> Result<ActionResult> {
        let body = self.http.send(url, request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Re-fetch the rendered list and swap it in.
    pub async fn update_list(&self) -> Result<()> {
        let body = self.http.get(&self.status_url).await?;
        let html = decode_fragment(body);
        self.dom.replace_first_child(&self.root, &html)
    }
}

/// The status endpoint answers with the fragment JSON-encoded as a string;
/// a plain HTML body is taken as is.
fn decode_fragment(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(html) => html,
        Err(_) => body,
    }
}
