use crate::config::SiteConfig;
use crate::host::Host;
use crate::task::Task;
use crate::widget::Widget;
use crate::widgets::{
    BeforeAfterSlider, ContactForm, GalleryFilter, HeaderScroll, Lightbox, MobileNav,
    ScrollReveal, SimulatedSubmission, SmoothScroll, SubmissionSink,
};
use bus::{EventOutcome, IntersectionEntry, UiEvent};

/// Every widget that found its markup, in boot order.
///
/// The site owns no host state. Whoever owns the host forwards events, due tasks and
/// intersection records here.
pub struct Site {
    widgets: Vec<Box<dyn Widget>>,
}

impl Site {
    pub fn boot(host: &mut dyn Host, config: &SiteConfig) -> Self {
        Self::boot_with(host, config, Box::new(SimulatedSubmission))
    }

    /// Like [`Site::boot`], with contact form submissions going to `sink`.
    pub fn boot_with(
        host: &mut dyn Host,
        config: &SiteConfig,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        let mut widgets: Vec<Box<dyn Widget>> = Vec::new();
        if let Some(w) = HeaderScroll::init(host, &config.header) {
            widgets.push(Box::new(w));
        }
        if let Some(w) = MobileNav::init(host) {
            widgets.push(Box::new(w));
        }
        if let Some(w) = ScrollReveal::init(host, &config.reveal) {
            widgets.push(Box::new(w));
        }
        if let Some(w) = ContactForm::init(host, &config.form, sink) {
            widgets.push(Box::new(w));
        }
        if let Some(w) = GalleryFilter::init(host, &config.gallery) {
            widgets.push(Box::new(w));
        }
        if let Some(w) = Lightbox::init(host) {
            widgets.push(Box::new(w));
        }
        if let Some(w) = SmoothScroll::init(host) {
            widgets.push(Box::new(w));
        }
        for w in BeforeAfterSlider::init_all(host, &config.slider) {
            widgets.push(Box::new(w));
        }

        log::debug!(target: "site", "booted {} widgets", widgets.len());
        Self { widgets }
    }

    pub fn widget_names(&self) -> Vec<&'static str> {
        self.widgets.iter().map(|w| w.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Routes `event` to every widget with a matching listener and merges the outcomes.
    pub fn dispatch(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        let mut outcome = EventOutcome::IGNORED;
        for widget in &mut self.widgets {
            let wants = widget.listeners().iter().any(|l| l.matches(event, &*host));
            if wants {
                outcome = outcome.merge(widget.handle_event(event, host));
            }
        }
        outcome
    }

    /// Hands a due timer or frame task back to its owner.
    pub fn run_task(&mut self, task: &Task, host: &mut dyn Host) {
        log::trace!(target: "site", "task {task:?}");
        for widget in &mut self.widgets {
            widget.run_task(task, host);
        }
    }

    pub fn deliver_intersections(&mut self, entries: &[IntersectionEntry], host: &mut dyn Host) {
        if entries.is_empty() {
            return;
        }
        for widget in &mut self.widgets {
            widget.on_intersection(entries, host);
        }
    }

    /// Drops every widget along with its listeners, releasing observers first.
    pub fn teardown(&mut self, host: &mut dyn Host) {
        for mut widget in self.widgets.drain(..) {
            widget.teardown(host);
        }
    }
}
