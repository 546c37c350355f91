use log::warn;
use web_sys::{HtmlElement, Window};

use crate::config::BackToTopConfig;
use crate::dom::{self, ClassPatch, Listener};
use crate::error::Result;

const CONCEALED: &[&str] = &["translate-y-20", "opacity-0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Concealed,
}

pub fn visibility(offset: f64, threshold_px: f64) -> Visibility {
    if offset > threshold_px {
        Visibility::Visible
    } else {
        Visibility::Concealed
    }
}

pub fn render(visibility: Visibility) -> ClassPatch {
    ClassPatch::new().toggle(CONCEALED, visibility == Visibility::Concealed)
}

pub struct BackToTopHandle {
    _listeners: [Listener; 2],
}

pub fn mount(window: &Window, button: HtmlElement, config: &BackToTopConfig) -> Result<BackToTopHandle> {
    let threshold = config.threshold_px;

    let scroll = {
        let view = window.clone();
        let button = button.clone();
        Listener::new(window, "scroll", move |_| {
            let patch = render(visibility(dom::scroll_offset(&view), threshold));
            if let Err(e) = patch.apply(&button) {
                warn!("Failed to render back-to-top button: {}", e);
            }
        })?
    };

    let click = {
        let view = window.clone();
        Listener::new(&button, "click", move |_| dom::smooth_scroll_to(&view, 0.0))?
    };

    Ok(BackToTopHandle {
        _listeners: [scroll, click],
    })
}
