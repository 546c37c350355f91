use log::warn;
use web_sys::{HtmlElement, Window};

use crate::config::ChromeConfig;
use crate::dom::{self, ClassPatch, Listener};
use crate::error::Result;

const OPAQUE: &[&str] = &["bg-white"];
const TRANSLUCENT: &[&str] = &["bg-white/95", "backdrop-blur-sm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Opaque,
    Translucent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Shown,
    Hidden,
}

impl Reveal {
    pub fn transform(self) -> &'static str {
        match self {
            Reveal::Shown => "translateY(0)",
            Reveal::Hidden => "translateY(-100%)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeState {
    pub backdrop: Backdrop,
    pub reveal: Reveal,
}

impl ChromeState {
    pub fn classes(self) -> ClassPatch {
        let translucent = self.backdrop == Backdrop::Translucent;
        ClassPatch::new()
            .toggle(TRANSLUCENT, translucent)
            .toggle(OPAQUE, !translucent)
    }
}

#[derive(Debug, Clone)]
pub struct ChromeModel {
    translucent_after: f64,
    hide_after: f64,
    last_offset: f64,
}

impl ChromeModel {
    pub fn new(config: &ChromeConfig) -> Self {
        Self {
            translucent_after: config.translucent_after_px,
            hide_after: config.hide_after_px,
            last_offset: 0.0,
        }
    }

    /// Derives the header state from the new offset and the one seen before.
    pub fn on_scroll(&mut self, offset: f64) -> ChromeState {
        let backdrop = if offset > self.translucent_after {
            Backdrop::Translucent
        } else {
            Backdrop::Opaque
        };
        let reveal = if offset > self.last_offset && offset > self.hide_after {
            Reveal::Hidden
        } else {
            Reveal::Shown
        };
        self.last_offset = offset;
        ChromeState { backdrop, reveal }
    }
}

fn paint(header: &HtmlElement, state: ChromeState) -> Result<()> {
    state.classes().apply(header)?;
    header.style().set_property("transform", state.reveal.transform())?;
    Ok(())
}

pub struct ChromeHandle {
    _scroll: Listener,
}

pub fn mount(window: &Window, header: HtmlElement, config: &ChromeConfig) -> Result<ChromeHandle> {
    // set once; every transform change below animates through it
    header.style().set_property("transition", &config.transition)?;

    let mut model = ChromeModel::new(config);
    let view = window.clone();
    let scroll = Listener::new(window, "scroll", move |_| {
        let state = model.on_scroll(dom::scroll_offset(&view));
        if let Err(e) = paint(&header, state) {
            warn!("Failed to render navigation header: {}", e);
        }
    })?;

    Ok(ChromeHandle { _scroll: scroll })
}
