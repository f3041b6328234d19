#![allow(dead_code)]

use core_types::{ElementId, Rect};
use html::dom_utils::outline;
use runtime_page::{Page, Session};
use site::Host;

pub const INDEX: &str = include_str!("../fixtures/index.html");

pub const HEADER_HEIGHT: f64 = 80.0;
pub const SLIDER_RECT: Rect = Rect::new(100.0, 1800.0, 400.0, 300.0);

/// The fixture page with a plausible desktop layout.
pub fn page() -> Page {
    let mut page = Page::from_markup(INDEX);
    let boxes = [
        (".header", Rect::new(0.0, 0.0, 1280.0, HEADER_HEIGHT)),
        ("#tjenester", Rect::new(0.0, 900.0, 1280.0, 600.0)),
        ("#tjenester .fade-in", Rect::new(100.0, 920.0, 1080.0, 60.0)),
        (".fade-in-left", Rect::new(100.0, 1000.0, 500.0, 300.0)),
        (".fade-in-right", Rect::new(680.0, 1000.0, 500.0, 300.0)),
        ("#prosjekter", Rect::new(0.0, 1500.0, 1280.0, 300.0)),
        ("#slider-1", SLIDER_RECT),
        ("#kontakt", Rect::new(0.0, 2900.0, 1280.0, 900.0)),
        ("#kontakt .fade-in", Rect::new(100.0, 2920.0, 1080.0, 60.0)),
    ];
    for (selector, rect) in boxes {
        page.set_layout(selector, rect)
            .unwrap_or_else(|err| panic!("fixture layout: {err}"));
    }
    page
}

pub fn session() -> Session {
    Session::new(page())
}

pub fn session_with_markup(markup: &str) -> Session {
    Session::new(Page::from_markup(markup))
}

pub fn el(session: &Session, selector: &str) -> ElementId {
    session
        .page()
        .select(selector)
        .unwrap_or_else(|err| panic!("{err}\n{}", dump(session)))
}

pub fn has_class(session: &Session, selector: &str, class: &str) -> bool {
    session.page().has_class(el(session, selector), class)
}

pub fn style(session: &Session, selector: &str, property: &str) -> Option<String> {
    session.page().style(el(session, selector), property)
}

pub fn text(session: &Session, selector: &str) -> String {
    session.page().text(el(session, selector))
}

pub fn body_overflow(session: &Session) -> Option<String> {
    let body = session.page().body().expect("fixture has a body");
    session.page().style(body, "overflow")
}

pub fn dump(session: &Session) -> String {
    outline(session.page().document(), 400).join("\n")
}
