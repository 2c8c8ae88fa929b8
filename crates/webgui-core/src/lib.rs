//! webgui-core: controllers behind the experimentum web GUI.
//!
//! Nothing in here touches a browser directly. The controllers mutate the page
//! through the [`Dom`] adapter and talk to the server through [`HttpClient`]
//! and [`PushChannel`], so the same code runs in the wasm frontend and in
//! native tests with in-memory fakes.

pub mod dom;
pub mod error;
pub mod log_stream;
pub mod markup;
pub mod migrations;
pub mod models;
pub mod panel;
pub mod plots;
pub mod transport;

pub use dom::Dom;
pub use error::UiError;
pub use log_stream::{Dispatch, LogStream, LogStreamHooks, Phase};
pub use migrations::{MigrationAction, MigrationList, MigrationOptions};
pub use models::{ActionResult, ActionStatus, LogLine, LogMessage, PlotMessage, PlotStatus, RunSummary};
pub use panel::{PanelState, PanelStatus, StatusHooks};
pub use plots::{generate_plots, PlotHooks};
pub use transport::{HttpClient, PushChannel, RequestConfig};
