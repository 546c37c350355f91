use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use crate::config::LazyImageConfig;
use crate::dom::ClassPatch;
use crate::error::Result;

const PENDING: &[&str] = &["opacity-0"];
const LOADED: &[&str] = &["opacity-100", "transition-opacity", "duration-300"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
}

/// One deferred image. Moves from pending to loaded once and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImage {
    source: String,
    state: LoadState,
}

impl LazyImage {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: LoadState::Pending,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The source to assign, on the first call only.
    pub fn reveal(&mut self) -> Option<&str> {
        match self.state {
            LoadState::Pending => {
                self.state = LoadState::Loaded;
                Some(self.source.as_str())
            }
            LoadState::Loaded => None,
        }
    }
}

struct Tracked {
    element: HtmlImageElement,
    image: LazyImage,
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct LazyImageHandle {
    observer: Option<(IntersectionObserver, ObserverCallback)>,
    images: Rc<RefCell<Vec<Tracked>>>,
}

impl LazyImageHandle {
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn pending(&self) -> usize {
        self.images
            .borrow()
            .iter()
            .filter(|t| t.image.state() == LoadState::Pending)
            .count()
    }
}

impl Drop for LazyImageHandle {
    fn drop(&mut self) {
        if let Some((observer, _)) = &self.observer {
            observer.disconnect();
        }
    }
}

fn on_intersections(entries: Array, observer: &IntersectionObserver, images: &RefCell<Vec<Tracked>>) {
    for entry in entries.iter() {
        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
            continue;
        };
        if !entry.is_intersecting() {
            continue;
        }
        let target = entry.target();
        let mut images = images.borrow_mut();
        let Some(tracked) = images.iter_mut().find(|t| t.element.is_same_node(Some(&target))) else {
            continue;
        };
        if let Some(source) = tracked.image.reveal() {
            tracked.element.set_src(source);
            let patch = ClassPatch::new().remove(PENDING).add(LOADED);
            if let Err(e) = patch.apply(&tracked.element) {
                warn!("Failed to fade in image: {}", e);
            }
        }
        observer.unobserve(&target);
    }
}

pub fn mount(elements: Vec<HtmlImageElement>, config: &LazyImageConfig) -> Result<LazyImageHandle> {
    let tracked: Vec<Tracked> = elements
        .into_iter()
        .map(|element| {
            let source = element.get_attribute(&config.source_attribute).unwrap_or_default();
            Tracked {
                element,
                image: LazyImage::new(source),
            }
        })
        .collect();
    let images = Rc::new(RefCell::new(tracked));

    let callback: ObserverCallback = {
        let images = images.clone();
        Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            on_intersections(entries, &observer, &images);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref());
    match observer {
        Ok(observer) => {
            for tracked in images.borrow().iter() {
                if let Err(e) = ClassPatch::new().add(PENDING).apply(&tracked.element) {
                    warn!("Failed to hide pending image: {}", e);
                }
                observer.observe(&tracked.element);
            }
            debug!("Observing {} deferred image(s)", images.borrow().len());
            Ok(LazyImageHandle {
                observer: Some((observer, callback)),
                images,
            })
        }
        Err(_) => {
            // no IntersectionObserver: load everything now, without the fade
            for tracked in images.borrow_mut().iter_mut() {
                if let Some(source) = tracked.image.reveal() {
                    tracked.element.set_src(source);
                }
            }
            Ok(LazyImageHandle { observer: None, images })
        }
    }
}
