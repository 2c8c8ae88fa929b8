//! `Dom` adapter over the live document.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use webgui_core::error::Result;
use webgui_core::{Dom, UiError};

#[wasm_bindgen]
extern "C" {
    /// Materialize's `M.toast({html, classes})`.
    #[wasm_bindgen(js_namespace = M, js_name = toast, catch)]
    fn materialize_toast(options: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct ToastOptions<'a> {
    html: &'a str,
    classes: &'a str,
}

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> std::result::Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no global `document` exists"))?;
        Ok(Self { document })
    }

    fn each(&self, selector: &str, mut f: impl FnMut(&Element)) {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Invalid selector {selector:?}: {e:?}");
                return;
            }
        };
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(&el);
            }
        }
    }

    fn first(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }
}

fn dom_error(e: JsValue) -> UiError {
    UiError::Dom(format!("{e:?}"))
}

impl Dom for WebDom {
    fn append_html(&self, selector: &str, html: &str) {
        self.each(selector, |el| {
            if let Err(e) = el.insert_adjacent_html("beforeend", html) {
                log::warn!("Could not append to {selector:?}: {e:?}");
            }
        });
    }

    fn set_inner_html(&self, selector: &str, html: &str) {
        self.each(selector, |el| el.set_inner_html(html));
    }

    fn set_text(&self, selector: &str, text: &str) {
        self.each(selector, |el| el.set_text_content(Some(text)));
    }

    fn remove(&self, selector: &str) {
        self.each(selector, |el| el.remove());
    }

    fn add_class(&self, selector: &str, classes: &str) {
        self.each(selector, |el| {
            let list = el.class_list();
            for class in classes.split_whitespace() {
                let _ = list.add_1(class);
            }
        });
    }

    fn remove_class(&self, selector: &str, classes: &str) {
        self.each(selector, |el| {
            let list = el.class_list();
            for class in classes.split_whitespace() {
                let _ = list.remove_1(class);
            }
        });
    }

    fn scroll_to_bottom(&self, selector: &str) {
        self.each(selector, |el| el.set_scroll_top(el.scroll_height()));
    }

    fn replace_first_child(&self, selector: &str, html: &str) -> Result<()> {
        let root = self
            .first(selector)
            .ok_or_else(|| UiError::ElementNotFound(selector.to_string()))?;

        let scratch = self.document.create_element("div").map_err(dom_error)?;
        scratch.set_inner_html(html.trim());
        let replacement = scratch
            .first_element_child()
            .ok_or_else(|| UiError::ElementNotFound("fragment root".to_string()))?;

        let swapped = match root.first_element_child() {
            Some(current) => current.replace_with_with_node_1(&replacement),
            None => root.append_child(&replacement).map(|_| ()),
        };
        swapped.map_err(dom_error)
    }

    fn input_value(&self, selector: &str) -> Option<String> {
        self.first(selector)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
    }

    fn attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.first(selector)?.get_attribute(name)
    }

    fn toast(&self, html: &str, classes: &str) {
        let options = match serde_wasm_bindgen::to_value(&ToastOptions { html, classes }) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Could not build toast options: {e}");
                return;
            }
        };
        if let Err(e) = materialize_toast(&options) {
            log::warn!("Materialize toast unavailable ({e:?}): {html}");
        }
    }
}
