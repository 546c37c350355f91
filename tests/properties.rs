//! Property tests for the pure state behind each controller.

use landing_frontend::config::{BackToTopConfig, ChromeConfig};
use landing_frontend::controllers::back_to_top::{self, Visibility};
use landing_frontend::controllers::chrome::{Backdrop, ChromeModel, Reveal};
use landing_frontend::controllers::forms::{self, ValidationReport, Validity};
use landing_frontend::controllers::lazy_images::{LazyImage, LoadState};
use landing_frontend::controllers::menu::{self, Icon, MenuEvent, MenuModel, MenuState};
use proptest::prelude::*;

fn offsets() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..5000.0, 1..50)
}

fn menu_events() -> impl Strategy<Value = Vec<MenuEvent>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(MenuEvent::Toggle),
            1 => Just(MenuEvent::OutsideClick),
            1 => Just(MenuEvent::LinkClick),
            1 => (200.0f64..2000.0).prop_map(|width| MenuEvent::ResizeSettled { width }),
        ],
        0..40,
    )
}

/// Field values: mostly blank-ish or short words.
fn field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,5}",
        "[ ]{0,2}[a-zA-Z0-9@.]{1,12}[ ]{0,2}",
    ]
}

proptest! {
    #[test]
    fn backdrop_is_translucent_iff_past_fifty(offsets in offsets()) {
        let mut model = ChromeModel::new(&ChromeConfig::default());
        for offset in offsets {
            let state = model.on_scroll(offset);
            prop_assert_eq!(state.backdrop == Backdrop::Translucent, offset > 50.0);
        }
    }

    #[test]
    fn header_hides_only_on_downward_scroll_past_two_hundred(offsets in offsets()) {
        let mut model = ChromeModel::new(&ChromeConfig::default());
        let mut previous = 0.0;
        for offset in offsets {
            let state = model.on_scroll(offset);
            let expect_hidden = offset > previous && offset > 200.0;
            prop_assert_eq!(state.reveal == Reveal::Hidden, expect_hidden);
            previous = offset;
        }
    }

    #[test]
    fn back_to_top_visible_iff_past_three_hundred(offset in 0.0f64..5000.0) {
        let threshold = BackToTopConfig::default().threshold_px;
        let visible = back_to_top::visibility(offset, threshold) == Visibility::Visible;
        prop_assert_eq!(visible, offset > 300.0);
    }

    #[test]
    fn menu_glyph_always_matches_panel(events in menu_events()) {
        let mut model = MenuModel::new(MenuState::Closed, 768.0);
        for event in events {
            model.handle(event);
            let view = menu::render(model.state());
            match model.state() {
                MenuState::Open => {
                    prop_assert_eq!(view.icon, Icon::Times);
                    prop_assert!(view.panel.remove.contains(&"hidden"));
                }
                MenuState::Closed => {
                    prop_assert_eq!(view.icon, Icon::Bars);
                    prop_assert!(view.panel.add.contains(&"hidden"));
                }
            }
            prop_assert_eq!(&view.glyph.add, &vec![view.icon.class()]);
            prop_assert!(!view.glyph.remove.contains(&view.icon.class()));
        }
    }

    #[test]
    fn one_verdict_per_required_field(values in prop::collection::vec(field_value(), 0..12)) {
        let report = ValidationReport::from_values(values.iter().map(String::as_str));
        prop_assert_eq!(report.fields.len(), values.len());
        for (value, validity) in values.iter().zip(&report.fields) {
            let expected = if value.trim().is_empty() { Validity::Invalid } else { Validity::Valid };
            prop_assert_eq!(*validity, expected);
        }
        let empty = values.iter().filter(|v| v.trim().is_empty()).count();
        prop_assert_eq!(report.invalid_count(), empty);
        prop_assert_eq!(report.is_valid(), empty == 0);
    }

    #[test]
    fn reconciled_messages_match_validity(existing in 0usize..5, invalid in any::<bool>()) {
        let validity = if invalid { Validity::Invalid } else { Validity::Valid };
        let plan = forms::reconcile(existing, validity);
        prop_assert!(plan.remove <= existing);
        prop_assert_eq!(plan.remaining(existing), usize::from(invalid));
    }

    #[test]
    fn deferred_image_is_revealed_once(source in "/img/[a-z]{1,10}\\.webp", extra in 1usize..5) {
        let mut image = LazyImage::new(source.clone());
        prop_assert_eq!(image.reveal(), Some(source.as_str()));
        for _ in 0..extra {
            prop_assert_eq!(image.reveal(), None);
            prop_assert_eq!(image.state(), LoadState::Loaded);
        }
    }
}
