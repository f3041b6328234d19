mod common;

use common::{el, has_class, session, session_with_markup};
use site::Host;

const SERVICES_TITLE: &str = "#tjenester .fade-in";
const CONTACT_TITLE: &str = "#kontakt .fade-in";

#[test]
fn nothing_below_the_fold_is_revealed_at_boot() {
    let s = session();
    assert!(!has_class(&s, SERVICES_TITLE, "fade-in--visible"));
    assert!(!has_class(&s, ".fade-in-left", "fade-in-left--visible"));
    for selector in [SERVICES_TITLE, ".fade-in-left", ".fade-in-right", CONTACT_TITLE] {
        assert!(s.page().is_observed(el(&s, selector)), "{selector} not observed");
    }
}

#[test]
fn entering_the_shrunk_viewport_reveals_each_variant() {
    let mut s = session();
    s.scroll_to_y(300.0);
    assert!(has_class(&s, SERVICES_TITLE, "fade-in--visible"));
    assert!(has_class(&s, ".fade-in-left", "fade-in-left--visible"));
    assert!(has_class(&s, ".fade-in-right", "fade-in-right--visible"));
    assert!(!has_class(&s, CONTACT_TITLE, "fade-in--visible"));
}

#[test]
fn less_than_a_tenth_visible_is_not_enough() {
    let mut s = session();
    // 20px of the 300px box sits above the bottom margin
    s.scroll_to_y(270.0);
    assert!(has_class(&s, SERVICES_TITLE, "fade-in--visible"));
    assert!(!has_class(&s, ".fade-in-left", "fade-in-left--visible"));

    s.scroll_to_y(290.0);
    assert!(has_class(&s, ".fade-in-left", "fade-in-left--visible"));
}

#[test]
fn bottom_margin_hides_the_last_fifty_pixels() {
    let mut s = session();
    // title spans 720..780; half of it is above the 750px root edge
    s.scroll_to_y(200.0);
    assert!(has_class(&s, SERVICES_TITLE, "fade-in--visible"));

    let mut s = session();
    // title spans 770..830, inside the real viewport but past the margin
    s.scroll_to_y(150.0);
    assert!(!has_class(&s, SERVICES_TITLE, "fade-in--visible"));
}

#[test]
fn reveal_happens_once_and_stops_observing() {
    let mut s = session();
    s.scroll_to_y(300.0);
    let title = el(&s, SERVICES_TITLE);
    assert!(!s.page().is_observed(title));

    s.scroll_to_y(0.0);
    assert!(has_class(&s, SERVICES_TITLE, "fade-in--visible"));
    s.scroll_to_y(300.0);
    let classes = s.page().attribute(title, "class").unwrap_or_default();
    assert_eq!(
        classes.split_whitespace().filter(|c| *c == "fade-in--visible").count(),
        1
    );
}

#[test]
fn left_variant_wins_over_plain_fade() {
    let markup = r#"<body><div id="x" class="fade-in fade-in-left fade-in-right"></div></body>"#;
    let mut s = session_with_markup(markup);
    let x = el(&s, "#x");
    s.page_mut()
        .set_layout_of(x, core_types::Rect::new(0.0, 100.0, 200.0, 200.0));
    s.scroll_to_y(0.0);
    assert!(has_class(&s, "#x", "fade-in-left--visible"));
    assert!(!has_class(&s, "#x", "fade-in--visible"));
    assert!(!has_class(&s, "#x", "fade-in-right--visible"));
}

#[test]
fn teardown_releases_remaining_observers() {
    let mut s = session();
    s.scroll_to_y(300.0);
    s.teardown();
    assert!(!s.page().is_observed(el(&s, CONTACT_TITLE)));
}
