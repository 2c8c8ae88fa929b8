//! Live experiment log: dispatches push-channel events onto the result page.
//!
//! The stream runs `started`, then any number of `log`/`table` events, then a
//! single `finished`. `finished` fills in the run summary, closes the channel
//! and hands over to plot generation; anything arriving after it is dropped.

use std::future::Future;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dom::Dom;
use crate::markup;
use crate::models::{LogLine, LogMessage, RunSummary, TIME_FORMAT};
use crate::panel::{PanelState, PanelStatus, StatusHooks};
use crate::plots::{generate_plots, PlotHooks};
use crate::transport::{HttpClient, PushChannel};

/// Selectors and class sets of the result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogStreamHooks {
    pub log: String,
    /// Spinner shown until the first event arrives.
    pub loading: String,
    pub status: StatusHooks,
    /// Step list entries flipped from `success` to `error` on the first error line.
    pub status_log: String,
    /// Progress bar shown while the run is live.
    pub progress: String,
    pub result: String,
    pub result_table: String,
    pub table_classes: String,
    pub started_at: String,
    pub finished_at: String,
    pub config_file: String,
    pub config_content: String,
    /// Run summary, hidden until the run finishes.
    pub summary: String,
    pub plots: PlotHooks,
}

impl Default for LogStreamHooks {
    fn default() -> Self {
        Self {
            log: ".log".to_string(),
            loading: ".loading".to_string(),
            status: StatusHooks::default(),
            status_log: ".status-log > li.success".to_string(),
            progress: ".progress".to_string(),
            result: "#result".to_string(),
            result_table: "#result table".to_string(),
            table_classes: "striped highlight responsive-table".to_string(),
            started_at: ".started_at > time".to_string(),
            finished_at: ".finished_at > time".to_string(),
            config_file: ".config_file".to_string(),
            config_content: ".config_content".to_string(),
            summary: ".collapsible".to_string(),
            plots: PlotHooks::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Connected, nothing received yet.
    Waiting,
    Streaming,
    /// `finished` seen or connection lost; the channel is released.
    Closed,
}

/// What the caller has to do after an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Rendered,
    /// Payload could not be decoded.
    Skipped,
    /// Stream already closed.
    Ignored,
    /// The run finished and the channel is closed: generate the plots now.
    GeneratePlots,
}

pub struct LogStream<D, C> {
    dom: D,
    channel: C,
    hooks: LogStreamHooks,
    phase: Phase,
    panel: PanelState,
}

impl<D: Dom, C: PushChannel> LogStream<D, C> {
    pub fn new(dom: D, channel: C, hooks: LogStreamHooks) -> Self {
        Self {
            dom,
            channel,
            hooks,
            phase: Phase::Waiting,
            panel: PanelState::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn panel_status(&self) -> PanelStatus {
        self.panel.status()
    }

    /// Stamp the client-side start time until the server reports its own.
    pub fn announce_start(&self) {
        let now = Local::now().format(TIME_FORMAT).to_string();
        self.dom.set_text(&self.hooks.started_at, &now);
    }

    /// Dispatch one raw push-channel payload.
    pub fn on_message(&mut self, payload: &str) -> Dispatch {
        if self.phase == Phase::Closed {
            debug!("Dropping log stream event after close");
            return Dispatch::Ignored;
        }

        let message = match LogMessage::parse(payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Skipping malformed log stream event");
                return Dispatch::Skipped;
            }
        };
        debug!(kind = message.kind(), "Log stream event");

        self.ensure_started();
        match message {
            LogMessage::Started => {}
            LogMessage::Log(line) => self.append_line(&line),
            LogMessage::Table(html) => {
                self.dom.set_inner_html(&self.hooks.result, &html);
                self.dom
                    .add_class(&self.hooks.result_table, &self.hooks.table_classes);
            }
            LogMessage::Finished(summary) => {
                self.finish(&summary);
                return Dispatch::GeneratePlots;
            }
        }
        Dispatch::Rendered
    }

    /// Dispatch `payload` and, once the run has finished, return the plot
    /// generation for the caller to drive. The job owns its inputs, so the
    /// stream can be borrowed again while it runs.
    pub fn handle<H>(
        &mut self,
        payload: &str,
        http: H,
        plot_url: &str,
    ) -> Option<impl Future<Output = PanelStatus> + 'static>
    where
        D: Clone + 'static,
        C: 'static,
        H: HttpClient + 'static,
    {
        if self.on_message(payload) != Dispatch::GeneratePlots {
            return None;
        }
        let dom = self.dom.clone();
        let hooks = self.hooks.plots.clone();
        let url = plot_url.to_string();
        Some(async move { generate_plots(&http, &dom, &url, &hooks).await })
    }

    /// The connection dropped. Returns `false` if the stream had already closed.
    ///
    /// The channel is closed so the browser does not reconnect on its own.
    pub fn on_disconnect(&mut self) -> bool {
        if self.phase == Phase::Closed {
            return false;
        }
        warn!(phase = ?self.phase, "Log stream connection lost");
        self.ensure_started();
        self.append_line(&LogLine {
            data: markup::CONNECTION_LOST.to_string(),
            error: true,
        });
        self.close();
        true
    }

    fn ensure_started(&mut self) {
        if self.phase == Phase::Waiting {
            self.dom.remove(&self.hooks.loading);
            self.phase = Phase::Streaming;
        }
    }

    fn append_line(&mut self, line: &LogLine) {
        self.dom
            .append_html(&self.hooks.log, &markup::log_line(&line.data, line.error));
        if line.error {
            if !self.panel.is_error() {
                // Add first: the selector matches on the class being removed.
                self.dom.add_class(&self.hooks.status_log, "error");
                self.dom.remove_class(&self.hooks.status_log, "success");
            }
            self.panel
                .update(PanelStatus::Error, &self.dom, &self.hooks.status);
        }
        self.dom.scroll_to_bottom(&self.hooks.log);
    }

    fn finish(&mut self, summary: &RunSummary) {
        let hooks = &self.hooks;
        // Without a server start time the client stamp from `announce_start` stays.
        if let Some(start) = &summary.start {
            self.dom.set_text(&hooks.started_at, &start.display());
        }
        let finished = match &summary.finished {
            Some(finished) => finished.display(),
            None => Local::now().format(TIME_FORMAT).to_string(),
        };
        self.dom.set_text(&hooks.finished_at, &finished);
        self.dom.set_text(&hooks.config_file, &summary.config_file);
        self.dom.set_text(&hooks.config_content, &summary.config_content);
        self.dom.remove_class(&hooks.summary, "hide");
        self.dom.remove(&hooks.progress);

        self.panel
            .update(PanelStatus::Success, &self.dom, &self.hooks.status);
        info!(
            config_file = %summary.config_file,
            status = ?self.panel.status(),
            "Experiment run finished"
        );
        self.close();
    }

    fn close(&mut self) {
        self.channel.close();
        self.phase = Phase::Closed;
    }
}
