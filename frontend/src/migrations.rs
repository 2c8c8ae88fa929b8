//! Migration list on the dashboard, with delegated click handling.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlAnchorElement, MouseEvent};

use webgui_core::{MigrationList, MigrationOptions};

use crate::dom::WebDom;
use crate::http::GlooHttp;
use crate::{js_error, options_or_default};

type List = MigrationList<WebDom, GlooHttp>;

/// Controller bound to one migration list. Clicks on the configured triggers
/// anywhere in the page run the matching action for the lifetime of the page,
/// whether or not the handle is kept.
#[wasm_bindgen(js_name = MigrationList)]
pub struct MigrationListHandle {
    list: Rc<List>,
}

#[wasm_bindgen(js_class = MigrationList)]
impl MigrationListHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str, options: JsValue) -> Result<MigrationListHandle, JsValue> {
        let options: MigrationOptions = options_or_default(options)?;
        let dom = WebDom::new()?;
        let list = Rc::new(MigrationList::new(selector, options, dom, GlooHttp).map_err(js_error)?);

        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let on_click = {
            let list = Rc::clone(&list);
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| on_click(&list, event))
        };
        body.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        log::debug!("Migration list bound to {selector} ({})", list.status_url());

        Ok(Self { list })
    }

    /// Re-fetch and re-render the list.
    #[wasm_bindgen(js_name = updateList)]
    pub fn update_list(&self) {
        let list = Rc::clone(&self.list);
        spawn_local(async move {
            if let Err(e) = list.update_list().await {
                log::error!("Could not refresh migration list: {e}");
            }
        });
    }
}

fn on_click(list: &Rc<List>, event: MouseEvent) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Some((action, trigger)) = list
        .triggers()
        .find_map(|(action, selector)| Some((action, target.closest(selector).ok()??)))
    else {
        return;
    };
    event.prevent_default();

    let href = trigger
        .dyn_ref::<HtmlAnchorElement>()
        .map(|a| a.href())
        .or_else(|| trigger.get_attribute("data-href"))
        .unwrap_or_default();

    let list = Rc::clone(list);
    spawn_local(async move {
        // Failures are already toasted.
        if let Err(e) = list.trigger(action, &href).await {
            log::debug!("Migration {action} failed: {e}");
        }
    });
}
