use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions, Window};

use crate::error::{Error, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::MissingGlobal("window"))
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(Error::MissingGlobal("document"))
}

/// Keeps every node of `list` that casts to `T`, in document order.
pub fn collect<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>> {
    Ok(collect(document.query_selector_all(selector)?))
}

pub fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Vertical scroll offset of the page, 0 when unreadable.
pub fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Classes to add and remove on one element. Controllers compute these from
/// their state and never touch `classList` any other way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatch {
    pub add: Vec<&'static str>,
    pub remove: Vec<&'static str>,
}

impl ClassPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, classes: &[&'static str]) -> Self {
        self.add.extend_from_slice(classes);
        self
    }

    pub fn remove(mut self, classes: &[&'static str]) -> Self {
        self.remove.extend_from_slice(classes);
        self
    }

    /// Adds when `on`, removes otherwise.
    pub fn toggle(self, classes: &[&'static str], on: bool) -> Self {
        if on {
            self.add(classes)
        } else {
            self.remove(classes)
        }
    }

    pub fn apply(&self, element: &Element) -> Result<()> {
        let list = element.class_list();
        for class in &self.remove {
            list.remove_1(class)?;
        }
        for class in &self.add {
            list.add_1(class)?;
        }
        Ok(())
    }
}
