use log::error;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, Event, Window};

use crate::dom::Listener;
use crate::error::Result;
use crate::timing::{SystemClock, Throttle};

/// Uncaught script errors logged per second at most once, so a handler
/// failing on every scroll event can't flood the console.
const ERROR_LOG_WINDOW_MS: f64 = 1000.0;

pub const BANNER: &str = "
    🎨 Patrícia Digitação - Landing Page
    📱 Serviços de papelaria personalizada
    💬 Contato: (11) 99999-9999

    ✨ Desenvolvido com carinho e tecnologia de ponta
";

pub fn describe(message: &str, source: &str, line: u32) -> String {
    if source.is_empty() {
        format!("JavaScript error: {}", message)
    } else {
        format!("JavaScript error: {} ({}:{})", message, source, line)
    }
}

/// Last-resort `error` listener. It only logs; the browser's own handling
/// and every other listener carry on untouched.
pub fn install_error_handler(window: &Window) -> Result<Listener> {
    let mut throttle = Throttle::new(SystemClock, ERROR_LOG_WINDOW_MS);
    Listener::new(window, "error", move |e: Event| {
        if !throttle.try_acquire() {
            return;
        }
        match e.dyn_ref::<ErrorEvent>() {
            Some(event) => error!("{}", describe(&event.message(), &event.filename(), event.lineno())),
            None => error!("JavaScript error: {:?}", e.type_()),
        }
    })
}

pub fn print_banner() {
    gloo_console::log!(BANNER);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_includes_location_when_known() {
        assert_eq!(
            describe("x is undefined", "main.js", 12),
            "JavaScript error: x is undefined (main.js:12)"
        );
        assert_eq!(describe("boom", "", 0), "JavaScript error: boom");
    }
}
