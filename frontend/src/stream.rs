//! Live log of an experiment run over `EventSource`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventSource, MessageEvent};

use webgui_core::{generate_plots, LogStream, LogStreamHooks, PlotHooks, PushChannel};

use crate::dom::WebDom;
use crate::http::GlooHttp;
use crate::options_or_default;

pub struct EventSourceChannel(EventSource);

impl PushChannel for EventSourceChannel {
    fn close(&self) {
        self.0.close();
    }
}

/// Stream the log of a running experiment from `stream_url` into the result
/// page, then generate its plots from `plot_url`.
///
/// `hooks` optionally overrides the page selectors.
#[wasm_bindgen(js_name = attachLogStream)]
pub fn attach_log_stream(stream_url: &str, plot_url: &str, hooks: JsValue) -> Result<(), JsValue> {
    let hooks: LogStreamHooks = options_or_default(hooks)?;
    let dom = WebDom::new()?;
    let source = EventSource::new(stream_url)?;
    let stream = Rc::new(RefCell::new(LogStream::new(
        dom,
        EventSourceChannel(source.clone()),
        hooks,
    )));
    stream.borrow().announce_start();
    log::info!("Streaming experiment log from {stream_url}");

    let on_message = {
        let stream = Rc::clone(&stream);
        let plot_url = plot_url.to_string();
        Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
            let Some(payload) = e.data().as_string() else {
                return;
            };
            let plots = stream.borrow_mut().handle(&payload, GlooHttp, &plot_url);
            if let Some(plots) = plots {
                spawn_local(async move {
                    plots.await;
                });
            }
        })
    };
    source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    // The source lives for the whole page; keep the handlers with it.
    on_message.forget();

    let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        stream.borrow_mut().on_disconnect();
    });
    source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    Ok(())
}

/// Generate the plots of a finished run and render them into the plot panel.
#[wasm_bindgen(js_name = generatePlots)]
pub async fn generate_plots_js(url: String, hooks: JsValue) -> Result<(), JsValue> {
    let hooks: PlotHooks = options_or_default(hooks)?;
    let dom = WebDom::new()?;
    generate_plots(&GlooHttp, &dom, &url, &hooks).await;
    Ok(())
}
