//! `HttpClient` over `gloo-net`.

use gloo_net::http::Request;
use web_sys::FormData;

use webgui_core::error::Result;
use webgui_core::{HttpClient, RequestConfig, UiError};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttp;

impl HttpClient for GlooHttp {
    async fn send(&self, url: &str, request: &RequestConfig) -> Result<String> {
        let failed = |reason: String| UiError::Http {
            url: url.to_string(),
            reason,
        };

        let request = match request {
            RequestConfig::Get => Request::get(url).build(),
            RequestConfig::PostForm(fields) => {
                let form = FormData::new().map_err(|e| failed(format!("{e:?}")))?;
                for (name, value) in fields {
                    form.append_with_str(name, value)
                        .map_err(|e| failed(format!("{e:?}")))?;
                }
                Request::post(url).body(form)
            }
        }
        .map_err(|e| failed(e.to_string()))?;

        let resp = request.send().await.map_err(|e| failed(e.to_string()))?;
        if !resp.ok() {
            return Err(UiError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        resp.text().await.map_err(|e| failed(e.to_string()))
    }
}
