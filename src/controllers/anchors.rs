use log::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::dom::{self, Listener};
use crate::error::Result;

/// Element id an in-page href points at. `None` for a bare `#` or anything
/// that isn't a fragment.
pub fn fragment_id(href: &str) -> Option<String> {
    let raw = href.strip_prefix('#')?;
    if raw.is_empty() {
        return None;
    }
    let id = urlencoding::decode(raw)
        .map(|id| id.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(id)
}

/// Scroll position that lands the target just below a fixed header.
pub fn scroll_target(element_top: f64, header_height: Option<f64>, buffer_px: f64) -> f64 {
    element_top - header_height.unwrap_or(0.0) - buffer_px
}

pub struct AnchorHandle {
    listeners: Vec<Listener>,
}

impl AnchorHandle {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

pub fn mount(
    window: &Window,
    document: &Document,
    anchors: Vec<Element>,
    header: Option<HtmlElement>,
    buffer_px: f64,
) -> Result<AnchorHandle> {
    let mut listeners = Vec::with_capacity(anchors.len());

    for anchor in anchors {
        let window = window.clone();
        let document = document.clone();
        let header = header.clone();
        let link = anchor.clone();
        listeners.push(Listener::new(&anchor, "click", move |e: Event| {
            e.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(target) = fragment_id(&href).and_then(|id| document.get_element_by_id(&id)) else {
                return;
            };

            let element_top = target.get_bounding_client_rect().top() + dom::scroll_offset(&window);
            // height is read per click since the header can change size
            let header_height = header.as_ref().map(|h| h.offset_height() as f64);
            let top = scroll_target(element_top, header_height, buffer_px);
            debug!("Scrolling to {} at {}", href, top);
            dom::smooth_scroll_to(&window, top);

            if let Ok(history) = window.history() {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&href)) {
                    warn!("Failed to push {} onto history: {:?}", href, e);
                }
            }
        })?);
    }

    Ok(AnchorHandle {
        listeners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_section_below_header() {
        assert_eq!(scroll_target(1500.0, Some(80.0), 20.0), 1400.0);
    }

    #[test]
    fn missing_header_counts_as_zero() {
        assert_eq!(scroll_target(1500.0, None, 20.0), 1480.0);
    }

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#contact").as_deref(), Some("contact"));
        assert_eq!(fragment_id("#servi%C3%A7os").as_deref(), Some("serviços"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("https://wa.me/5511"), None);
    }
}
