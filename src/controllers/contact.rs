use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use web_sys::{Document, HtmlElement};

use crate::config::ContactConfig;
use crate::dom::{self, Listener};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Rest,
    Hover,
    Pressed,
}

impl Feedback {
    pub fn transform(self) -> &'static str {
        match self {
            Feedback::Rest => "scale(1)",
            Feedback::Hover => "scale(1.05)",
            Feedback::Pressed => "scale(0.95)",
        }
    }
}

pub fn is_contact_link(href: &str, prefix: &str) -> bool {
    href.starts_with(prefix)
}

/// Every element whose `href` starts with the configured deep-link prefix.
pub fn locate(document: &Document, config: &ContactConfig) -> Result<Vec<HtmlElement>> {
    let candidates: Vec<HtmlElement> = dom::query_all(document, "[href]")?;
    Ok(candidates
        .into_iter()
        .filter(|el| {
            el.get_attribute("href")
                .map_or(false, |href| is_contact_link(&href, &config.href_prefix))
        })
        .collect())
}

fn paint(link: &HtmlElement, feedback: Feedback) {
    if let Err(e) = link.style().set_property("transform", feedback.transform()) {
        warn!("Failed to style contact link: {:?}", e);
    }
}

pub struct ContactHandle {
    _listeners: Vec<Listener>,
}

pub fn mount(links: Vec<HtmlElement>, config: &ContactConfig) -> Result<ContactHandle> {
    let press_ms = config.press_ms;
    let mut listeners = Vec::with_capacity(links.len() * 3);

    for link in links {
        let link = Rc::new(link);

        let pressed = link.clone();
        listeners.push(Listener::new(&link, "click", move |_| {
            paint(&pressed, Feedback::Pressed);
            let release = pressed.clone();
            Timeout::new(press_ms, move || paint(&release, Feedback::Rest)).forget();
            info!("WhatsApp button clicked");
        })?);

        let hovered = link.clone();
        listeners.push(Listener::new(&link, "mouseenter", move |_| paint(&hovered, Feedback::Hover))?);

        let left = link.clone();
        listeners.push(Listener::new(&link, "mouseleave", move |_| paint(&left, Feedback::Rest))?);
    }

    Ok(ContactHandle {
        _listeners: listeners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whatsapp_prefix_only() {
        let prefix = ContactConfig::default().href_prefix;
        assert!(is_contact_link("https://wa.me/5511999999999", &prefix));
        assert!(!is_contact_link("https://example.com/wa.me/", &prefix));
        assert!(!is_contact_link("#contact", &prefix));
    }

    #[test]
    fn feedback_scales() {
        assert_eq!(Feedback::Pressed.transform(), "scale(0.95)");
        assert_eq!(Feedback::Hover.transform(), "scale(1.05)");
        assert_eq!(Feedback::Rest.transform(), "scale(1)");
    }
}
