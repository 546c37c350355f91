//! End-to-end walks through the page scenarios, using the pure models and a
//! manual clock in place of the browser.

use landing_frontend::config::{Config, MenuConfig};
use landing_frontend::controllers::anchors::{fragment_id, scroll_target};
use landing_frontend::controllers::forms::{ValidationReport, Validity};
use landing_frontend::controllers::menu::{self, Icon, MenuEvent, MenuModel, MenuState};
use landing_frontend::timing::{Debounce, ManualClock, Poll};

#[test]
fn widening_the_viewport_closes_menu_after_debounce() {
    let config = MenuConfig::default();
    let clock = ManualClock::new(0.0);
    let mut debounce = Debounce::new(clock.clone(), config.resize_debounce_ms as f64);
    let mut model = MenuModel::new(MenuState::Closed, config.breakpoint_px);

    // 400px wide, menu opened
    model.handle(MenuEvent::Toggle);
    assert_eq!(model.state(), MenuState::Open);

    // continuous resize towards 1024px
    for _ in 0..5 {
        debounce.schedule();
        clock.advance(50.0);
        assert!(matches!(debounce.poll(), Poll::Pending { .. }));
    }
    assert_eq!(model.state(), MenuState::Open);

    clock.advance(250.0);
    assert_eq!(debounce.poll(), Poll::Ready);
    model.handle(MenuEvent::ResizeSettled { width: 1024.0 });

    assert_eq!(model.state(), MenuState::Closed);
    assert_eq!(menu::render(model.state()).icon, Icon::Bars);
}

#[test]
fn contact_anchor_lands_below_header() {
    let config = Config::default();
    assert_eq!(fragment_id("#contact").as_deref(), Some("contact"));
    assert_eq!(scroll_target(1500.0, Some(80.0), config.anchors.buffer_px), 1400.0);
}

#[test]
fn one_empty_field_gets_the_only_error() {
    let report = ValidationReport::from_values(["", "Patrícia"]);
    assert_eq!(report.fields, vec![Validity::Invalid, Validity::Valid]);
    assert_eq!(report.invalid_count(), 1);
    assert!(!report.is_valid());

    // fixing the field on the next attempt clears it
    let retry = ValidationReport::from_values(["Ana", "Patrícia"]);
    assert!(retry.is_valid());
}

#[test]
fn config_block_overrides_thresholds() {
    let config = Config::from_json(r#"{ "backToTop": { "thresholdPx": 500 }, "anchors": { "bufferPx": 0 } }"#).unwrap();
    assert_eq!(config.back_to_top.threshold_px, 500.0);
    assert_eq!(config.back_to_top.button_id, "back-to-top");
    assert_eq!(scroll_target(1500.0, Some(80.0), config.anchors.buffer_px), 1420.0);
}
