use crate::config::FormConfig;
use crate::host::Host;
use crate::task::Task;
use crate::validate::{FIELDS, FieldKind, FieldSpec};
use crate::widget::{Listener, Widget};
use bus::{EventKind, EventOutcome, UiEvent};
use core_types::ElementId;

pub const FORM: &str = ".contact-form form";
const GROUP: &str = ".form-group";
const ERROR_TEXT: &str = ".form-error";
const SUBMIT: &str = ".btn";
const GROUP_ERROR: &str = "form-group--error";

/// Field values captured at the moment a submission passes validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl Submission {
    fn set(&mut self, kind: FieldKind, value: String) {
        match kind {
            FieldKind::Name => self.name = value,
            FieldKind::Email => self.email = value,
            FieldKind::Phone => self.phone = value,
            FieldKind::Message => self.message = value,
        }
    }
}

/// Receives valid submissions. The visible sending/sent timing is driven by the form
/// itself and does not wait on the sink.
pub trait SubmissionSink {
    fn submit(&mut self, submission: &Submission);
}

/// Default sink: there is no backend, the submission is only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedSubmission;

impl SubmissionSink for SimulatedSubmission {
    fn submit(&mut self, submission: &Submission) {
        log::info!(
            target: "site.form",
            "simulated submission from {:?} <{}>",
            submission.name,
            submission.email
        );
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Sending { original_label: String },
    Sent { original_label: String },
}

struct BoundField {
    spec: &'static FieldSpec,
    element: Option<ElementId>,
}

/// Client-side validation and the simulated send flow of the contact form.
pub struct ContactForm {
    form: ElementId,
    fields: Vec<BoundField>,
    button: Option<ElementId>,
    config: FormConfig,
    state: SubmitState,
    sink: Box<dyn SubmissionSink>,
    listeners: Vec<Listener>,
}

impl ContactForm {
    pub fn init(
        host: &mut dyn Host,
        config: &FormConfig,
        sink: Box<dyn SubmissionSink>,
    ) -> Option<Self> {
        let Some(form) = host.query(FORM) else {
            log::debug!(target: "site.form", "no {FORM}; skipping");
            return None;
        };
        let fields: Vec<BoundField> = FIELDS
            .iter()
            .map(|spec| BoundField {
                spec,
                element: host.query_in(form, spec.selector),
            })
            .collect();

        let mut listeners = Vec::new();
        for el in fields.iter().filter_map(|f| f.element) {
            listeners.push(Listener::element(EventKind::Blur, el));
            listeners.push(Listener::element(EventKind::Input, el));
        }
        listeners.push(Listener::element(EventKind::Submit, form));

        Some(Self {
            form,
            fields,
            button: host.query_in(form, SUBMIT),
            config: config.clone(),
            state: SubmitState::Idle,
            sink,
            listeners,
        })
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    fn field_for(&self, el: ElementId) -> Option<&BoundField> {
        self.fields.iter().find(|f| f.element == Some(el))
    }

    /// Validates one field and mirrors the result onto its form group.
    fn validate_field(field: &BoundField, host: &mut dyn Host) -> bool {
        let Some(el) = field.element else {
            return true;
        };
        let valid = (field.spec.validate)(&host.value(el));
        if let Some(group) = host.closest(el, GROUP) {
            if valid {
                host.remove_class(group, GROUP_ERROR);
            } else {
                host.add_class(group, GROUP_ERROR);
                if let Some(error_el) = host.query_in(group, ERROR_TEXT) {
                    host.set_text(error_el, field.spec.error);
                }
            }
        }
        valid
    }

    fn in_error(field: &BoundField, host: &dyn Host) -> bool {
        field
            .element
            .and_then(|el| host.closest(el, GROUP))
            .is_some_and(|group| host.has_class(group, GROUP_ERROR))
    }

    fn on_submit(&mut self, host: &mut dyn Host) {
        if self.state != SubmitState::Idle {
            log::debug!(target: "site.form", "submit ignored while {:?}", self.state);
            return;
        }
        // Every field is validated so all errors show at once.
        let mut valid = true;
        for field in &self.fields {
            valid &= Self::validate_field(field, host);
        }
        if !valid {
            log::trace!(target: "site.form", "submit blocked by validation");
            return;
        }

        let mut submission = Submission::default();
        for field in &self.fields {
            if let Some(el) = field.element {
                submission.set(field.spec.kind, host.value(el));
            }
        }
        self.sink.submit(&submission);

        let original_label = self.button.map(|b| host.text(b)).unwrap_or_default();
        if let Some(button) = self.button {
            host.set_text(button, &self.config.sending_label);
            host.set_disabled(button, true);
        }
        host.set_timeout(self.config.sent_after, Task::MarkFormSent(self.form));
        self.state = SubmitState::Sending { original_label };
        log::trace!(target: "site.form", "sending");
    }
}

impl Widget for ContactForm {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        match event {
            UiEvent::Blur { target } => {
                if let Some(field) = self.field_for(*target) {
                    Self::validate_field(field, host);
                }
                EventOutcome::IGNORED
            }
            UiEvent::Input { target } => {
                if let Some(field) = self.field_for(*target) {
                    if Self::in_error(field, host) {
                        Self::validate_field(field, host);
                    }
                }
                EventOutcome::IGNORED
            }
            UiEvent::Submit { target } if *target == self.form => {
                self.on_submit(host);
                EventOutcome::PREVENT_DEFAULT
            }
            _ => EventOutcome::IGNORED,
        }
    }

    fn run_task(&mut self, task: &Task, host: &mut dyn Host) {
        match (task, &self.state) {
            (Task::MarkFormSent(form), SubmitState::Sending { original_label })
                if *form == self.form =>
            {
                let original_label = original_label.clone();
                if let Some(button) = self.button {
                    host.set_text(button, &self.config.sent_label);
                    host.set_style(button, "background-color", &self.config.success_color);
                }
                host.set_timeout(self.config.restore_after, Task::RestoreForm(self.form));
                self.state = SubmitState::Sent { original_label };
                log::trace!(target: "site.form", "sent");
            }
            (Task::RestoreForm(form), SubmitState::Sent { original_label })
                if *form == self.form =>
            {
                host.reset_form(self.form);
                if let Some(button) = self.button {
                    host.set_text(button, original_label);
                    host.set_style(button, "background-color", "");
                    host.set_disabled(button, false);
                }
                self.state = SubmitState::Idle;
                log::trace!(target: "site.form", "restored");
            }
            _ => {}
        }
    }
}
