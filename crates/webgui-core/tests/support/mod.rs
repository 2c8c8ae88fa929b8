//! In-memory stand-ins for the browser: a recording DOM, a scripted HTTP
//! client and a push channel that counts closes.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use webgui_core::error::Result;
use webgui_core::{Dom, HttpClient, PushChannel, RequestConfig, UiError};

#[derive(Default)]
pub struct DomState {
    pub appended: HashMap<String, Vec<String>>,
    pub inner: HashMap<String, String>,
    pub text: HashMap<String, String>,
    pub removed: Vec<String>,
    pub classes: HashMap<String, BTreeSet<String>>,
    pub removed_classes: HashMap<String, BTreeSet<String>>,
    pub scrolls: HashMap<String, usize>,
    pub replaced: Vec<(String, String)>,
    pub inputs: HashMap<String, String>,
    pub attributes: HashMap<(String, String), String>,
    pub toasts: Vec<(String, String)>,
}

/// Clones share state, so a test keeps a handle after moving one into a controller.
#[derive(Clone, Default)]
pub struct FakeDom(pub Rc<RefCell<DomState>>);

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(self, selector: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .inputs
            .insert(selector.to_string(), value.to_string());
        self
    }

    pub fn with_attribute(self, selector: &str, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert((selector.to_string(), name.to_string()), value.to_string());
        self
    }

    pub fn appended(&self, selector: &str) -> Vec<String> {
        self.0.borrow().appended.get(selector).cloned().unwrap_or_default()
    }

    pub fn inner(&self, selector: &str) -> Option<String> {
        self.0.borrow().inner.get(selector).cloned()
    }

    pub fn text(&self, selector: &str) -> Option<String> {
        self.0.borrow().text.get(selector).cloned()
    }

    pub fn removed(&self) -> Vec<String> {
        self.0.borrow().removed.clone()
    }

    pub fn has_class(&self, selector: &str, class: &str) -> bool {
        self.0
            .borrow()
            .classes
            .get(selector)
            .is_some_and(|set| set.contains(class))
    }

    pub fn class_removed(&self, selector: &str, class: &str) -> bool {
        self.0
            .borrow()
            .removed_classes
            .get(selector)
            .is_some_and(|set| set.contains(class))
    }

    pub fn scrolls(&self, selector: &str) -> usize {
        self.0.borrow().scrolls.get(selector).copied().unwrap_or(0)
    }

    pub fn replaced(&self) -> Vec<(String, String)> {
        self.0.borrow().replaced.clone()
    }

    pub fn toasts(&self) -> Vec<(String, String)> {
        self.0.borrow().toasts.clone()
    }
}

fn split(classes: &str) -> impl Iterator<Item = String> + '_ {
    classes.split_whitespace().map(str::to_string)
}

impl Dom for FakeDom {
    fn append_html(&self, selector: &str, html: &str) {
        self.0
            .borrow_mut()
            .appended
            .entry(selector.to_string())
            .or_default()
            .push(html.to_string());
    }

    fn set_inner_html(&self, selector: &str, html: &str) {
        let mut state = self.0.borrow_mut();
        state.appended.remove(selector);
        state.inner.insert(selector.to_string(), html.to_string());
    }

    fn set_text(&self, selector: &str, text: &str) {
        self.0
            .borrow_mut()
            .text
            .insert(selector.to_string(), text.to_string());
    }

    fn remove(&self, selector: &str) {
        self.0.borrow_mut().removed.push(selector.to_string());
    }

    fn add_class(&self, selector: &str, classes: &str) {
        let mut state = self.0.borrow_mut();
        let set = state.classes.entry(selector.to_string()).or_default();
        set.extend(split(classes));
    }

    fn remove_class(&self, selector: &str, classes: &str) {
        let mut state = self.0.borrow_mut();
        if let Some(set) = state.classes.get_mut(selector) {
            for class in split(classes) {
                set.remove(&class);
            }
        }
        state
            .removed_classes
            .entry(selector.to_string())
            .or_default()
            .extend(split(classes));
    }

    fn scroll_to_bottom(&self, selector: &str) {
        *self
            .0
            .borrow_mut()
            .scrolls
            .entry(selector.to_string())
            .or_default() += 1;
    }

    fn replace_first_child(&self, selector: &str, html: &str) -> Result<()> {
        self.0
            .borrow_mut()
            .replaced
            .push((selector.to_string(), html.to_string()));
        Ok(())
    }

    fn input_value(&self, selector: &str) -> Option<String> {
        self.0.borrow().inputs.get(selector).cloned()
    }

    fn attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .get(&(selector.to_string(), name.to_string()))
            .cloned()
    }

    fn toast(&self, html: &str, classes: &str) {
        self.0
            .borrow_mut()
            .toasts
            .push((html.to_string(), classes.to_string()));
    }
}

#[derive(Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
    Unreachable(String),
}

/// Answers from a fixed url → reply table and records every request.
#[derive(Clone, Default)]
pub struct FakeHttp {
    replies: Rc<RefCell<HashMap<String, Reply>>>,
    requests: Rc<RefCell<Vec<(String, RequestConfig)>>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, url: &str, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), Reply::Body(body.to_string()));
        self
    }

    pub fn reply_with(self, url: &str, reply: Reply) -> Self {
        self.replies.borrow_mut().insert(url.to_string(), reply);
        self
    }

    pub fn requests(&self) -> Vec<(String, RequestConfig)> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|(u, _)| u == url).count()
    }
}

impl HttpClient for FakeHttp {
    async fn send(&self, url: &str, request: &RequestConfig) -> Result<String> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), request.clone()));
        let reply = self.replies.borrow().get(url).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(UiError::Status {
                url: url.to_string(),
                status,
            }),
            Some(Reply::Unreachable(reason)) => Err(UiError::Http {
                url: url.to_string(),
                reason,
            }),
            None => Err(UiError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeChannel {
    closes: Rc<Cell<usize>>,
}

impl FakeChannel {
    pub fn closes(&self) -> usize {
        self.closes.get()
    }
}

impl PushChannel for FakeChannel {
    fn close(&self) {
        self.closes.set(self.closes.get() + 1);
    }
}
