use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node, Window};

use crate::config::MenuConfig;
use crate::dom::{self, ClassPatch, Listener};
use crate::error::Result;
use crate::timing::Debounced;

const HIDDEN: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    Toggle,
    /// Pointer activation outside both the panel and its button.
    OutsideClick,
    LinkClick,
    /// Viewport width once a resize burst has settled.
    ResizeSettled { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Bars,
    Times,
}

impl Icon {
    pub fn class(self) -> &'static str {
        match self {
            Icon::Bars => "fa-bars",
            Icon::Times => "fa-times",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuModel {
    state: MenuState,
    breakpoint_px: f64,
}

impl MenuModel {
    pub fn new(state: MenuState, breakpoint_px: f64) -> Self {
        Self { state, breakpoint_px }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Applies one trigger. Returns true if the state changed.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match event {
            MenuEvent::Toggle => match self.state {
                MenuState::Open => MenuState::Closed,
                MenuState::Closed => MenuState::Open,
            },
            MenuEvent::OutsideClick | MenuEvent::LinkClick => MenuState::Closed,
            MenuEvent::ResizeSettled { width } if width >= self.breakpoint_px => MenuState::Closed,
            MenuEvent::ResizeSettled { .. } => self.state,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }
}

/// Panel and icon classes for a state. Both always come from the same state
/// value, so the glyph can't drift from the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub icon: Icon,
    pub panel: ClassPatch,
    pub glyph: ClassPatch,
}

pub fn render(state: MenuState) -> MenuView {
    let (icon, other) = match state {
        MenuState::Open => (Icon::Times, Icon::Bars),
        MenuState::Closed => (Icon::Bars, Icon::Times),
    };
    MenuView {
        icon,
        panel: ClassPatch::new().toggle(&[HIDDEN], !state.is_open()),
        glyph: ClassPatch::new().remove(&[other.class()]).add(&[icon.class()]),
    }
}

pub struct MenuParts {
    pub button: HtmlElement,
    pub panel: Element,
    /// Glyph element inside the button, if the markup has one.
    pub icon: Option<Element>,
}

impl MenuParts {
    pub fn locate(document: &Document, config: &MenuConfig) -> Option<Self> {
        let button = dom::html_element_by_id(document, &config.button_id)?;
        let panel = document.get_element_by_id(&config.panel_id)?;
        let icon = button.query_selector("i").ok().flatten();
        Some(Self { button, panel, icon })
    }

    fn paint(&self, state: MenuState) -> Result<()> {
        let view = render(state);
        view.panel.apply(&self.panel)?;
        if let Some(icon) = &self.icon {
            view.glyph.apply(icon)?;
        }
        Ok(())
    }
}

pub struct MenuHandle {
    resize: Debounced,
    _listeners: Vec<Listener>,
}

impl Drop for MenuHandle {
    fn drop(&mut self) {
        self.resize.cancel();
    }
}

pub fn mount(window: &Window, document: &Document, parts: MenuParts, config: &MenuConfig) -> Result<MenuHandle> {
    let initial = if parts.panel.class_list().contains(HIDDEN) {
        MenuState::Closed
    } else {
        MenuState::Open
    };
    let model = Rc::new(RefCell::new(MenuModel::new(initial, config.breakpoint_px)));
    let parts = Rc::new(parts);
    // sync the glyph with whatever the markup shipped
    parts.paint(initial)?;

    let dispatch: Rc<dyn Fn(MenuEvent)> = {
        let model = model.clone();
        let parts = parts.clone();
        Rc::new(move |event| {
            let (changed, state) = {
                let mut model = model.borrow_mut();
                (model.handle(event), model.state())
            };
            if changed {
                debug!("Mobile menu {:?} after {:?}", state, event);
                if let Err(e) = parts.paint(state) {
                    warn!("Failed to render mobile menu: {}", e);
                }
            }
        })
    };

    let mut listeners = Vec::new();

    {
        let dispatch = dispatch.clone();
        listeners.push(Listener::new(&parts.button, "click", move |e: Event| {
            // keep the document handler from treating this as an outside click
            e.stop_propagation();
            dispatch(MenuEvent::Toggle);
        })?);
    }

    {
        let dispatch = dispatch.clone();
        let model = model.clone();
        let parts = parts.clone();
        listeners.push(Listener::new(document, "click", move |e: Event| {
            if !model.borrow().state().is_open() {
                return;
            }
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            let inside = parts.panel.contains(Some(&target)) || parts.button.contains(Some(&target));
            if !inside {
                dispatch(MenuEvent::OutsideClick);
            }
        })?);
    }

    let links: Vec<Element> = dom::collect(parts.panel.query_selector_all("a")?);
    for link in &links {
        let dispatch = dispatch.clone();
        listeners.push(Listener::new(link, "click", move |_| dispatch(MenuEvent::LinkClick))?);
    }

    let resize = {
        let dispatch = dispatch.clone();
        let window = window.clone();
        Debounced::new(config.resize_debounce_ms, move || {
            if let Some(width) = window.inner_width().ok().and_then(|w| w.as_f64()) {
                dispatch(MenuEvent::ResizeSettled { width });
            }
        })
    };
    {
        let resize = resize.clone();
        listeners.push(Listener::new(window, "resize", move |_| resize.trigger())?);
    }

    Ok(MenuHandle {
        resize,
        _listeners: listeners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut model = MenuModel::new(MenuState::Closed, 768.0);
        assert!(model.handle(MenuEvent::Toggle));
        assert_eq!(model.state(), MenuState::Open);
        assert!(model.handle(MenuEvent::Toggle));
        assert_eq!(model.state(), MenuState::Closed);
    }

    #[test]
    fn dismissals_only_close() {
        let mut model = MenuModel::new(MenuState::Closed, 768.0);
        assert!(!model.handle(MenuEvent::OutsideClick));
        assert!(!model.handle(MenuEvent::LinkClick));
        assert_eq!(model.state(), MenuState::Closed);

        model.handle(MenuEvent::Toggle);
        assert!(model.handle(MenuEvent::LinkClick));
        assert_eq!(model.state(), MenuState::Closed);
    }

    #[test]
    fn narrow_resize_keeps_menu_open() {
        let mut model = MenuModel::new(MenuState::Open, 768.0);
        assert!(!model.handle(MenuEvent::ResizeSettled { width: 767.0 }));
        assert_eq!(model.state(), MenuState::Open);
        assert!(model.handle(MenuEvent::ResizeSettled { width: 768.0 }));
        assert_eq!(model.state(), MenuState::Closed);
    }

    #[test]
    fn render_pairs_glyph_with_panel() {
        let open = render(MenuState::Open);
        assert_eq!(open.icon, Icon::Times);
        assert_eq!(open.panel.remove, vec![HIDDEN]);
        assert_eq!(open.glyph.add, vec!["fa-times"]);
        assert_eq!(open.glyph.remove, vec!["fa-bars"]);

        let closed = render(MenuState::Closed);
        assert_eq!(closed.icon, Icon::Bars);
        assert_eq!(closed.panel.add, vec![HIDDEN]);
        assert_eq!(closed.glyph.add, vec!["fa-bars"]);
    }
}
