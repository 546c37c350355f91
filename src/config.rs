use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::controllers::animations::AosOptions;
use crate::error::Result;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub header_selector: String,
    pub animations: AosOptions,
    pub menu: MenuConfig,
    pub anchors: AnchorConfig,
    pub chrome: ChromeConfig,
    pub contact: ContactConfig,
    pub back_to_top: BackToTopConfig,
    pub cards: CardConfig,
    pub forms: FormConfig,
    pub lazy_images: LazyImageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_selector: "nav".to_string(),
            animations: AosOptions::default(),
            menu: MenuConfig::default(),
            anchors: AnchorConfig::default(),
            chrome: ChromeConfig::default(),
            contact: ContactConfig::default(),
            back_to_top: BackToTopConfig::default(),
            cards: CardConfig::default(),
            forms: FormConfig::default(),
            lazy_images: LazyImageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    pub button_id: String,
    pub panel_id: String,
    /// Viewport width (px) from which the mobile menu is irrelevant.
    pub breakpoint_px: f64,
    pub resize_debounce_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            button_id: "mobile-menu-button".to_string(),
            panel_id: "mobile-menu".to_string(),
            breakpoint_px: 768.0,
            resize_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnchorConfig {
    pub selector: String,
    /// Extra space left between the fixed header and the scroll target.
    pub buffer_px: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: "a[href^=\"#\"]".to_string(),
            buffer_px: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromeConfig {
    pub translucent_after_px: f64,
    pub hide_after_px: f64,
    pub transition: String,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            translucent_after_px: 50.0,
            hide_after_px: 200.0,
            transition: "transform 0.3s ease-in-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub href_prefix: String,
    pub press_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            href_prefix: "https://wa.me/".to_string(),
            press_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackToTopConfig {
    pub button_id: String,
    pub threshold_px: f64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            button_id: "back-to-top".to_string(),
            threshold_px: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub selector: String,
    pub ripple_ms: u32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            selector: ".service-card, [class*=\"rounded-lg shadow-lg\"]".to_string(),
            ripple_ms: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub required_selector: String,
    pub required_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            required_selector: "input[required], textarea[required]".to_string(),
            required_message: "Este campo é obrigatório".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LazyImageConfig {
    /// Attribute carrying the real image source until the image is visible.
    pub source_attribute: String,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            source_attribute: "data-src".to_string(),
        }
    }
}

impl LazyImageConfig {
    pub fn selector(&self) -> String {
        format!("img[{}]", self.source_attribute)
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the override block from the page, falling back to defaults.
    pub fn load(document: &Document) -> Self {
        let raw = match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}
