//! Client-side behaviour for the landing page: nine independent controllers
//! wired onto static markup once the document has been parsed.

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlImageElement, Window};

pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod error;
pub mod timing;

pub mod controllers {
    pub mod anchors;
    pub mod animations;
    pub mod back_to_top;
    pub mod cards;
    pub mod chrome;
    pub mod contact;
    pub mod forms;
    pub mod lazy_images;
    pub mod menu;
}

use config::Config;
use controllers::{anchors, animations, back_to_top, cards, chrome, contact, forms, lazy_images, menu};
use dom::Listener;
use error::Result;

/// Everything registered on the page. Dropping it removes every listener.
#[derive(Default)]
pub struct Page {
    pub animations_started: bool,
    pub error_handler: Option<Listener>,
    pub menu: Option<menu::MenuHandle>,
    pub anchors: Option<anchors::AnchorHandle>,
    pub chrome: Option<chrome::ChromeHandle>,
    pub contact: Option<contact::ContactHandle>,
    pub back_to_top: Option<back_to_top::BackToTopHandle>,
    pub cards: Option<cards::CardHandle>,
    pub forms: Option<forms::FormHandle>,
    pub lazy_images: Option<lazy_images::LazyImageHandle>,
}

/// Logs a failed mount and turns it into `None` so the next one still runs.
fn settle<T>(feature: &str, result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(handle)) => Some(handle),
        Ok(None) => {
            info!("{}: nothing to wire on this page", feature);
            None
        }
        Err(e) => {
            warn!("{}: {}", feature, e);
            None
        }
    }
}

impl Page {
    pub fn boot(window: &Window, document: &Document, config: &Config) -> Self {
        let mut page = Page {
            error_handler: settle("error handler", diagnostics::install_error_handler(window).map(Some)),
            ..Page::default()
        };

        page.animations_started = match animations::init(&config.animations) {
            Ok(status) => status.is_started(),
            Err(e) => {
                warn!("animations: {}", e);
                false
            }
        };

        page.menu = settle(
            "mobile menu",
            menu::MenuParts::locate(document, &config.menu)
                .map(|parts| menu::mount(window, document, parts, &config.menu))
                .transpose(),
        );

        let header = document
            .query_selector(&config.header_selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        page.anchors = settle(
            "smooth scroll",
            mount_anchors(window, document, header.clone(), config).map(Some),
        );

        page.chrome = settle(
            "navigation header",
            header
                .map(|header| chrome::mount(window, header, &config.chrome))
                .transpose(),
        );

        page.contact = settle(
            "contact buttons",
            contact::locate(document, &config.contact).and_then(|links| contact::mount(links, &config.contact).map(Some)),
        );

        page.back_to_top = settle(
            "back to top",
            dom::html_element_by_id(document, &config.back_to_top.button_id)
                .map(|button| back_to_top::mount(window, button, &config.back_to_top))
                .transpose(),
        );

        page.cards = settle(
            "service cards",
            dom::query_all::<HtmlElement>(document, &config.cards.selector)
                .and_then(|found| cards::mount(document, found, &config.cards).map(Some)),
        );

        page.forms = settle(
            "form validation",
            dom::query_all::<HtmlFormElement>(document, "form")
                .and_then(|found| forms::mount(document, found, &config.forms, forms::log_outcome()).map(Some)),
        );

        page.lazy_images = settle(
            "lazy images",
            dom::query_all::<HtmlImageElement>(document, &config.lazy_images.selector())
                .and_then(|found| lazy_images::mount(found, &config.lazy_images).map(Some)),
        );

        if let Some(images) = &page.lazy_images {
            if images.is_observing() {
                info!("{} image(s) waiting to scroll into view", images.pending());
            } else {
                info!("IntersectionObserver unavailable, images loaded eagerly");
            }
        }

        page
    }
}

fn mount_anchors(
    window: &Window,
    document: &Document,
    header: Option<HtmlElement>,
    config: &Config,
) -> Result<anchors::AnchorHandle> {
    let links = dom::query_all(document, &config.anchors.selector)?;
    let handle = anchors::mount(window, document, links, header, config.anchors.buffer_px)?;
    info!("Smooth scroll wired on {} anchor(s)", handle.len());
    Ok(handle)
}

fn boot(window: &Window, document: &Document) {
    let config = Config::load(document);
    let page = Page::boot(window, document, &config);
    info!("Landing page ready (animations {})", if page.animations_started { "on" } else { "off" });
    // lives as long as the page itself
    std::mem::forget(page);
}

/// Boots every controller once the document is parsed and keeps them alive
/// for the rest of the session.
pub fn start() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    diagnostics::print_banner();

    if document.ready_state() != "loading" {
        boot(&window, &document);
        return Ok(());
    }

    let target = document.clone();
    let on_ready = Closure::once_into_js(move || boot(&window, &target));
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}
