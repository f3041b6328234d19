use crate::config::SliderConfig;
use crate::host::Host;
use crate::widget::{Listener, Widget};
use bus::{EventKind, EventOutcome, PointerSource, UiEvent};
use core_types::{ElementId, Rect};

pub const SLIDERS: &str = ".ba-slider";
const BEFORE: &str = ".ba-slider__before";
const HANDLE: &str = ".ba-slider__handle";

/// Horizontal position of `client_x` across `rect`, clamped into `[min, max]`.
/// `None` for a slider with no width.
pub fn slider_fraction(client_x: f64, rect: Rect, min: f64, max: f64) -> Option<f64> {
    if rect.width <= 0.0 {
        return None;
    }
    Some(((client_x - rect.left()) / rect.width).clamp(min, max))
}

/// One before/after comparison: dragging reveals more or less of the "before" image.
pub struct BeforeAfterSlider {
    slider: ElementId,
    before: ElementId,
    handle: ElementId,
    min_fraction: f64,
    max_fraction: f64,
    dragging: bool,
    listeners: [Listener; 3],
}

impl BeforeAfterSlider {
    /// Builds one widget per slider in the document. Sliders missing a part are skipped.
    pub fn init_all(host: &mut dyn Host, config: &SliderConfig) -> Vec<Self> {
        host.query_all(SLIDERS)
            .into_iter()
            .filter_map(|slider| Self::init(host, slider, config))
            .collect()
    }

    pub fn init(host: &mut dyn Host, slider: ElementId, config: &SliderConfig) -> Option<Self> {
        let (Some(before), Some(handle)) = (host.query_in(slider, BEFORE), host.query_in(slider, HANDLE))
        else {
            log::debug!(target: "site.slider", "slider {slider} lacks {BEFORE} or {HANDLE}; skipping");
            return None;
        };
        Some(Self {
            slider,
            before,
            handle,
            min_fraction: config.min_fraction,
            max_fraction: config.max_fraction,
            dragging: false,
            listeners: [
                Listener::element(EventKind::PointerDown, slider),
                Listener::document(EventKind::PointerMove),
                Listener::document(EventKind::PointerUp),
            ],
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn update(&self, client_x: f64, host: &mut dyn Host) {
        let rect = host.bounding_rect(self.slider);
        let Some(fraction) = slider_fraction(client_x, rect, self.min_fraction, self.max_fraction)
        else {
            return;
        };
        let pct = fraction * 100.0;
        host.set_style(self.before, "clip-path", &format!("inset(0 {}% 0 0)", 100.0 - pct));
        host.set_style(self.handle, "left", &format!("{pct}%"));
    }
}

impl Widget for BeforeAfterSlider {
    fn name(&self) -> &'static str {
        "ba-slider"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        match *event {
            UiEvent::PointerDown {
                client_x, source, ..
            } => {
                self.dragging = true;
                self.update(client_x, host);
                // Touch start is passive.
                match source {
                    PointerSource::Mouse => EventOutcome::PREVENT_DEFAULT,
                    PointerSource::Touch => EventOutcome::IGNORED,
                }
            }
            UiEvent::PointerMove { client_x, .. } if self.dragging => {
                self.update(client_x, host);
                EventOutcome::PREVENT_DEFAULT
            }
            UiEvent::PointerUp { .. } => {
                self.dragging = false;
                EventOutcome::IGNORED
            }
            _ => EventOutcome::IGNORED,
        }
    }
}
