//! The DOM adapter the controllers mutate the page through.
//!
//! Every method addresses elements by CSS selector and applies to all matches,
//! the way a jQuery collection would. Selectors that match nothing are a
//! no-op, since the host template decides which hooks exist. Class arguments
//! are space-separated class lists.

use crate::error::Result;

pub trait Dom {
    /// Append `html` after the last child of every matching element.
    fn append_html(&self, selector: &str, html: &str);

    /// Replace the children of every matching element with `html`.
    fn set_inner_html(&self, selector: &str, html: &str);

    /// Replace the children of every matching element with a text node.
    fn set_text(&self, selector: &str, text: &str);

    /// Detach every matching element.
    fn remove(&self, selector: &str);

    fn add_class(&self, selector: &str, classes: &str);

    fn remove_class(&self, selector: &str, classes: &str);

    /// Scroll every matching element to its newest (bottom) content.
    fn scroll_to_bottom(&self, selector: &str);

    /// Replace the first element child of `selector` with the first top-level
    /// element parsed from `html`.
    fn replace_first_child(&self, selector: &str, html: &str) -> Result<()>;

    /// Current value of the first matching input field.
    fn input_value(&self, selector: &str) -> Option<String>;

    /// Attribute of the first matching element.
    fn attribute(&self, selector: &str, name: &str) -> Option<String>;

    /// Show a transient notification.
    fn toast(&self, html: &str, classes: &str);
}
