mod common;

use common::{body_overflow, has_class, session, session_with_markup};

fn is_open(s: &runtime_page::Session) -> bool {
    has_class(s, ".mobile-nav", "mobile-nav--open")
        && has_class(s, ".header__toggle", "header__toggle--active")
        && has_class(s, ".mobile-nav__overlay", "mobile-nav__overlay--visible")
        && body_overflow(s).as_deref() == Some("hidden")
}

fn is_closed(s: &runtime_page::Session) -> bool {
    !has_class(s, ".mobile-nav", "mobile-nav--open")
        && !has_class(s, ".header__toggle", "header__toggle--active")
        && !has_class(s, ".mobile-nav__overlay", "mobile-nav__overlay--visible")
        && body_overflow(s).is_none()
}

#[test]
fn toggle_opens_and_closes() {
    let mut s = session();
    assert!(is_closed(&s));

    s.click(".header__toggle").unwrap();
    assert!(is_open(&s));

    s.click(".header__toggle").unwrap();
    assert!(is_closed(&s));
}

#[test]
fn clicks_inside_toggle_count() {
    let mut s = session();
    s.click(".header__toggle-bar").unwrap();
    assert!(is_open(&s));
}

#[test]
fn overlay_closes() {
    let mut s = session();
    s.click(".header__toggle").unwrap();
    s.click(".mobile-nav__overlay").unwrap();
    assert!(is_closed(&s));
}

#[test]
fn every_link_closes() {
    let links = [
        r##".mobile-nav__link[href="#tjenester"]"##,
        r##".mobile-nav__link[href="#prosjekter"]"##,
        r#".mobile-nav__link[href="/om-oss.html"]"#,
    ];
    for link in links {
        let mut s = session();
        s.click(".header__toggle").unwrap();
        s.click(link).unwrap();
        assert!(is_closed(&s), "{link} left the drawer open");
    }
}

#[test]
fn link_click_while_closed_is_harmless() {
    let mut s = session();
    s.click(".mobile-nav__link").unwrap();
    assert!(is_closed(&s));
}

#[test]
fn escape_closes_only_when_open() {
    let mut s = session();
    s.press("Escape");
    assert!(is_closed(&s));

    s.click(".header__toggle").unwrap();
    s.press("Enter");
    assert!(is_open(&s));
    s.press("Escape");
    assert!(is_closed(&s));
}

#[test]
fn drawer_without_overlay_still_works() {
    let markup = r#"<body>
        <button class="header__toggle"></button>
        <nav class="mobile-nav"><a class="mobile-nav__link" href="/">Hjem</a></nav>
    </body>"#;
    let mut s = session_with_markup(markup);
    s.click(".header__toggle").unwrap();
    assert!(has_class(&s, ".mobile-nav", "mobile-nav--open"));
    assert_eq!(body_overflow(&s).as_deref(), Some("hidden"));
    s.click(".mobile-nav__link").unwrap();
    assert!(!has_class(&s, ".mobile-nav", "mobile-nav--open"));
    assert_eq!(body_overflow(&s), None);
}

#[test]
fn missing_drawer_skips_widget() {
    let s = session_with_markup(r#"<body><button class="header__toggle"></button></body>"#);
    assert!(!s.site().widget_names().contains(&"mobile-nav"));
}
