use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Event, HtmlElement, KeyboardEvent, MouseEvent};

use crate::config::CardConfig;
use crate::dom::Listener;
use crate::error::{Error, Result};

const STYLE_ID: &str = "ripple-style";
const RIPPLE_CLASS: &str = "ripple";

const RIPPLE_CSS: &str = r#"
    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(196, 0, 0, 0.3);
        transform: scale(0);
        animation: ripple-animation 0.6s linear;
        pointer-events: none;
    }

    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

/// Square overlay centred on the pointer, relative to the card's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    pub fn compute(card_left: f64, card_top: f64, width: f64, height: f64, client_x: f64, client_y: f64) -> Self {
        let size = width.max(height);
        Self {
            size,
            left: client_x - card_left - size / 2.0,
            top: client_y - card_top - size / 2.0,
        }
    }

    fn from_rect(rect: &DomRect, client_x: f64, client_y: f64) -> Self {
        Self::compute(rect.left(), rect.top(), rect.width(), rect.height(), client_x, client_y)
    }

    pub fn style(&self) -> [(&'static str, String); 4] {
        let size = format!("{}px", self.size);
        [
            ("width", size.clone()),
            ("height", size),
            ("left", format!("{}px", self.left)),
            ("top", format!("{}px", self.top)),
        ]
    }
}

/// Enter and Space activate a focused card like a click does.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Adds the ripple stylesheet to `<head>` unless it is already there.
pub fn install_styles(document: &Document) -> Result<()> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let head = document.head().ok_or_else(|| Error::MissingElement("head".to_string()))?;
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(RIPPLE_CSS));
    head.append_child(&style)?;
    Ok(())
}

fn spawn_ripple(document: &Document, card: &HtmlElement, event: &MouseEvent, lifetime_ms: u32) -> Result<()> {
    let ripple = Ripple::from_rect(
        &card.get_bounding_client_rect(),
        event.client_x() as f64,
        event.client_y() as f64,
    );

    let span = document
        .create_element("span")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| Error::Js("span is not an HtmlElement".to_string()))?;
    let style = span.style();
    for (property, value) in ripple.style() {
        style.set_property(property, &value)?;
    }
    span.class_list().add_1(RIPPLE_CLASS)?;
    card.append_child(&span)?;

    // the overlay must leave the tree once its animation is over
    Timeout::new(lifetime_ms, move || span.remove()).forget();
    Ok(())
}

pub struct CardHandle {
    _listeners: Vec<Listener>,
}

pub fn mount(document: &Document, cards: Vec<HtmlElement>, config: &CardConfig) -> Result<CardHandle> {
    install_styles(document)?;

    let ripple_ms = config.ripple_ms;
    let mut listeners = Vec::with_capacity(cards.len() * 2);

    for card in cards {
        card.set_attribute("tabindex", "0")?;

        {
            let document = document.clone();
            let target = card.clone();
            listeners.push(Listener::new(&card, "click", move |e: Event| {
                let Some(event) = e.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if let Err(err) = spawn_ripple(&document, &target, event, ripple_ms) {
                    warn!("Failed to add ripple: {}", err);
                }
            })?);
        }

        {
            let target = card.clone();
            listeners.push(Listener::new(&card, "keydown", move |e: Event| {
                let Some(event) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if is_activation_key(&event.key()) {
                    event.prevent_default();
                    target.click();
                }
            })?);
        }
    }

    Ok(CardHandle {
        _listeners: listeners,
    })
}
