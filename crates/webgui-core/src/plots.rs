//! Plot generation, requested once a run has finished.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::dom::Dom;
use crate::error::Result;
use crate::markup;
use crate::models::{PlotMessage, PlotStatus};
use crate::panel::{PanelState, PanelStatus, StatusHooks};
use crate::transport::HttpClient;

/// Hooks of the plot panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotHooks {
    /// Status lines of the generation run.
    pub log: String,
    /// Gallery row the image tiles are appended to.
    pub tiles: String,
    pub status: StatusHooks,
}

impl Default for PlotHooks {
    fn default() -> Self {
        Self {
            log: "#plots .plot-log".to_string(),
            tiles: "#plots .row".to_string(),
            status: StatusHooks::new("#plots .plot-status"),
        }
    }
}

/// Fetch the plot-generation endpoint and decode its JSON array.
pub async fn fetch_plots(http: &impl HttpClient, url: &str) -> Result<Vec<PlotMessage>> {
    let body = http.get(url).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Ask the server to generate the run's plots and render the outcome.
///
/// Every entry gets a line in the plot log; entries with a file also get a
/// gallery tile, in response order. A failed request is shown as an error
/// line. Returns the final panel status.
pub async fn generate_plots(
    http: &impl HttpClient,
    dom: &impl Dom,
    url: &str,
    hooks: &PlotHooks,
) -> PanelStatus {
    let mut panel = PanelState::default();

    let plots = match fetch_plots(http, url).await {
        Ok(plots) => plots,
        Err(e) => {
            error!(url, error = %e, "Plot generation failed");
            let line = format!("Could not generate plots: {e}");
            dom.append_html(&hooks.log, &markup::log_line(&line, true));
            panel.update(PanelStatus::Error, dom, &hooks.status);
            return panel.status();
        }
    };

    if plots.is_empty() {
        debug!(url, "No plots configured for this experiment");
        dom.append_html(&hooks.log, &markup::log_line(markup::NO_PLOTS, false));
        dom.append_html(&hooks.tiles, &markup::plot_placeholder());
        panel.update(PanelStatus::Success, dom, &hooks.status);
        return panel.status();
    }

    for plot in &plots {
        let failed = plot.status == PlotStatus::Error;
        dom.append_html(&hooks.log, &markup::log_line(&plot.message, failed));
        if let Some(file) = &plot.file {
            dom.append_html(&hooks.tiles, &markup::plot_tile(file, &plot.message));
        }
        if failed {
            panel.update(PanelStatus::Error, dom, &hooks.status);
        }
    }
    panel.update(PanelStatus::Success, dom, &hooks.status);

    info!(url, count = plots.len(), status = ?panel.status(), "Plots generated");
    panel.status()
}
