//! Network seams: request/response HTTP and the server push channel.

use crate::error::Result;

/// How an action endpoint is called.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestConfig {
    #[default]
    Get,
    /// `POST` with a `multipart/form-data` body.
    PostForm(Vec<(String, String)>),
}

impl RequestConfig {
    pub fn method(&self) -> &'static str {
        match self {
            RequestConfig::Get => "GET",
            RequestConfig::PostForm(_) => "POST",
        }
    }
}

/// Request/response HTTP as seen by the controllers.
///
/// Futures are not required to be `Send`; in the browser everything runs on
/// the UI thread.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Send `request` to `url` and return the response body.
    /// Non-2xx statuses are reported as [`UiError::Status`](crate::UiError::Status).
    async fn send(&self, url: &str, request: &RequestConfig) -> Result<String>;

    async fn get(&self, url: &str) -> Result<String> {
        self.send(url, &RequestConfig::Get).await
    }
}

/// The server push connection owned by a log stream.
pub trait PushChannel {
    /// Release the connection. No further messages are delivered afterwards.
    fn close(&self);
}
