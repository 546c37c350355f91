use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::FormConfig;
use crate::dom::{self, ClassPatch, Listener};
use crate::error::Result;

const INVALID: &[&str] = &["border-red-500"];
const MESSAGE_CLASS: &str = "error-message text-red-500 text-sm mt-1";
const MESSAGE_KEY: &str = "data-error-for";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

pub fn check(value: &str) -> Validity {
    if value.trim().is_empty() {
        Validity::Invalid
    } else {
        Validity::Valid
    }
}

/// Per-field outcome of one submit attempt, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub fields: Vec<Validity>,
}

impl ValidationReport {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            fields: values.into_iter().map(check).collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_count() == 0
    }

    pub fn invalid_count(&self) -> usize {
        self.fields.iter().filter(|v| **v == Validity::Invalid).count()
    }
}

/// Called after every submit attempt with the aggregate result. There is no
/// backend; integrations hook in here.
pub type OnValidated = Rc<dyn Fn(&HtmlFormElement, &ValidationReport)>;

pub fn log_outcome() -> OnValidated {
    Rc::new(|_form, report| {
        if report.is_valid() {
            info!("Form is valid");
        } else {
            debug!("Form has {} empty required field(s)", report.invalid_count());
        }
    })
}

enum RequiredField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl RequiredField {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(RequiredField::Input(input)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlTextAreaElement>().ok().map(RequiredField::TextArea)
    }

    fn value(&self) -> String {
        match self {
            RequiredField::Input(input) => input.value(),
            RequiredField::TextArea(area) => area.value(),
        }
    }

    fn element(&self) -> &Element {
        match self {
            RequiredField::Input(input) => input,
            RequiredField::TextArea(area) => area,
        }
    }
}

/// What to do with the messages already attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePlan {
    pub create: bool,
    /// How many existing messages to drop, taken from the end.
    pub remove: usize,
}

impl MessagePlan {
    /// Messages left once the plan has been carried out.
    pub fn remaining(&self, existing: usize) -> usize {
        existing - self.remove + usize::from(self.create)
    }
}

/// One message for an invalid field, none for a valid one, whatever was
/// there before.
pub fn reconcile(existing: usize, validity: Validity) -> MessagePlan {
    match validity {
        Validity::Valid => MessagePlan {
            create: false,
            remove: existing,
        },
        Validity::Invalid => MessagePlan {
            create: existing == 0,
            remove: existing.saturating_sub(1),
        },
    }
}

/// Writes one field's validity: error style on the field and its messages
/// reconciled to the plan.
fn render_field(document: &Document, field: &Element, index: usize, validity: Validity, message: &str) -> Result<()> {
    ClassPatch::new()
        .toggle(INVALID, validity == Validity::Invalid)
        .apply(field)?;

    let Some(container) = field.parent_element() else {
        return Ok(());
    };
    let selector = format!(".error-message[{}=\"{}\"]", MESSAGE_KEY, index);
    let mut existing: Vec<Element> = dom::collect(container.query_selector_all(&selector)?);

    let plan = reconcile(existing.len(), validity);
    let keep = existing.len() - plan.remove;
    for stale in existing.drain(keep..) {
        stale.remove();
    }
    if plan.create {
        let span = document.create_element("span")?;
        span.set_attribute(MESSAGE_KEY, &index.to_string())?;
        container.append_child(&span)?;
        existing.push(span);
    }
    for kept in &existing {
        kept.set_class_name(MESSAGE_CLASS);
        kept.set_text_content(Some(message));
    }
    Ok(())
}

/// Validates every required field of `form` and renders the result. A field
/// that fails to render is logged and the rest are still rendered.
pub fn validate(document: &Document, form: &HtmlFormElement, config: &FormConfig) -> Result<ValidationReport> {
    let fields: Vec<RequiredField> = dom::collect::<Element>(form.query_selector_all(&config.required_selector)?)
        .into_iter()
        .filter_map(RequiredField::from_element)
        .collect();

    let values: Vec<String> = fields.iter().map(RequiredField::value).collect();
    let report = ValidationReport::from_values(values.iter().map(String::as_str));

    for (index, (field, validity)) in fields.iter().zip(&report.fields).enumerate() {
        if let Err(e) = render_field(document, field.element(), index, *validity, &config.required_message) {
            warn!("Failed to render required field {}: {}", index, e);
        }
    }
    Ok(report)
}

pub struct FormHandle {
    _listeners: Vec<Listener>,
}

pub fn mount(
    document: &Document,
    forms: Vec<HtmlFormElement>,
    config: &FormConfig,
    on_validated: OnValidated,
) -> Result<FormHandle> {
    let config = Rc::new(config.clone());
    let mut listeners = Vec::with_capacity(forms.len());

    for form in forms {
        let document = document.clone();
        let config = config.clone();
        let on_validated = on_validated.clone();
        let target = form.clone();
        listeners.push(Listener::new(&form, "submit", move |e: Event| {
            // nothing to submit to
            e.prevent_default();
            match validate(&document, &target, &config) {
                Ok(report) => on_validated(&target, &report),
                Err(err) => warn!("Form validation failed: {}", err),
            }
        })?);
    }

    Ok(FormHandle {
        _listeners: listeners,
    })
}
