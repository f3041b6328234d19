use crate::runtime::{Runtime, Shared};
use bus::{Key, PointerSource, UiEvent};
use gloo::events::{EventListener, EventListenerOptions};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent, Window};

#[derive(Clone, Copy)]
enum Translate {
    Click,
    KeyDown,
    Input,
    Blur,
    Submit,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    Scroll,
}

struct Binding {
    name: &'static str,
    translate: Translate,
    options: EventListenerOptions,
}

fn bind(name: &'static str, translate: Translate, options: EventListenerOptions) -> Binding {
    Binding {
        name,
        translate,
        options,
    }
}

fn document_bindings() -> [Binding; 11] {
    let active = EventListenerOptions::enable_prevent_default();
    let passive = EventListenerOptions::default();
    [
        bind("click", Translate::Click, active),
        bind("keydown", Translate::KeyDown, passive),
        bind("input", Translate::Input, passive),
        // blur does not bubble
        bind("blur", Translate::Blur, EventListenerOptions::run_in_capture_phase()),
        bind("submit", Translate::Submit, active),
        bind("mousedown", Translate::MouseDown, active),
        bind("mousemove", Translate::MouseMove, active),
        bind("mouseup", Translate::MouseUp, passive),
        bind("touchstart", Translate::TouchStart, passive),
        bind("touchmove", Translate::TouchMove, active),
        bind("touchend", Translate::TouchEnd, passive),
    ]
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn mouse_x(event: &Event) -> Option<f64> {
    Some(f64::from(event.dyn_ref::<MouseEvent>()?.client_x()))
}

/// Translates a DOM event into the site's vocabulary, registering the target element.
fn translate(shared: &Shared, kind: Translate, event: &Event) -> Option<UiEvent> {
    let target = || {
        let el = target_element(event)?;
        let rt = shared.try_borrow().ok()?;
        Some(rt.host().id_of(&el))
    };
    let ui = match kind {
        Translate::Click => UiEvent::Click { target: target()? },
        Translate::KeyDown => UiEvent::KeyDown {
            key: Key::from_dom_key(&event.dyn_ref::<KeyboardEvent>()?.key()),
        },
        Translate::Input => UiEvent::Input { target: target()? },
        Translate::Blur => UiEvent::Blur { target: target()? },
        Translate::Submit => UiEvent::Submit { target: target()? },
        Translate::MouseDown => UiEvent::PointerDown {
            target: target()?,
            client_x: mouse_x(event)?,
            source: PointerSource::Mouse,
        },
        Translate::MouseMove => UiEvent::PointerMove {
            client_x: mouse_x(event)?,
            source: PointerSource::Mouse,
        },
        Translate::MouseUp => UiEvent::PointerUp {
            source: PointerSource::Mouse,
        },
        Translate::TouchStart => UiEvent::PointerDown {
            target: target()?,
            client_x: first_touch_x(event)?,
            source: PointerSource::Touch,
        },
        Translate::TouchMove => UiEvent::PointerMove {
            client_x: first_touch_x(event)?,
            source: PointerSource::Touch,
        },
        Translate::TouchEnd => UiEvent::PointerUp {
            source: PointerSource::Touch,
        },
        Translate::Scroll => UiEvent::Scroll,
    };
    Some(ui)
}

fn listen(target: &EventTarget, binding: Binding, shared: &Shared) -> EventListener {
    let weak = Rc::downgrade(shared);
    let Binding {
        name,
        translate: kind,
        options,
    } = binding;
    EventListener::new_with_options(target, name, options, move |event: &Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Some(ui) = translate(&shared, kind, event) else {
            return;
        };
        if Runtime::dispatch(&shared, ui).prevent_default {
            event.prevent_default();
        }
    })
}

/// Delegated listeners on the document plus the window scroll listener. Dropping the
/// returned listeners detaches them.
pub(crate) fn install(window: &Window, document: &Document, shared: &Shared) -> Vec<EventListener> {
    let mut listeners: Vec<EventListener> = document_bindings()
        .into_iter()
        .map(|binding| listen(document, binding, shared))
        .collect();
    listeners.push(listen(
        window,
        bind("scroll", Translate::Scroll, EventListenerOptions::default()),
        shared,
    ));
    listeners
}
