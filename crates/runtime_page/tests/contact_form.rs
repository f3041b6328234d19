mod common;

use common::{el, session, session_with_markup, style, text};
use runtime_page::Session;
use site::widgets::{Submission, SubmissionSink};
use site::{Host, SiteConfig};
use std::cell::RefCell;
use std::rc::Rc;

const FORM: &str = ".contact-form form";
const BUTTON: &str = ".contact-form .btn";

fn in_error(s: &Session, field: &str) -> bool {
    let page = s.page();
    let group = page
        .closest(el(s, field), ".form-group")
        .expect("field has a group");
    page.has_class(group, "form-group--error")
}

fn error_text(s: &Session, field: &str) -> String {
    let page = s.page();
    let group = page
        .closest(el(s, field), ".form-group")
        .expect("field has a group");
    let error = page.query_in(group, ".form-error").expect("group has an error slot");
    page.text(error)
}

fn fill_valid(s: &mut Session) {
    s.fill("#name", "Kari Nordmann").unwrap();
    s.fill("#email", "kari@example.no").unwrap();
    s.fill("#phone", "+47 55 12 34 56").unwrap();
    s.fill("#message", "Vi vil pusse opp badet i høst.").unwrap();
}

fn button_disabled(s: &Session) -> bool {
    s.page().document().is_disabled(el(s, BUTTON))
}

#[test]
fn blur_validates_and_shows_message() {
    let mut s = session();
    s.blur("#name").unwrap();
    assert!(in_error(&s, "#name"));
    assert_eq!(error_text(&s, "#name"), "Vennligst oppgi ditt navn");

    s.fill("#email", "kari@").unwrap();
    s.blur("#email").unwrap();
    assert_eq!(error_text(&s, "#email"), "Vennligst oppgi en gyldig e-postadresse");
}

#[test]
fn blank_phone_is_fine() {
    let mut s = session();
    s.blur("#phone").unwrap();
    assert!(!in_error(&s, "#phone"));

    s.fill("#phone", "123").unwrap();
    s.blur("#phone").unwrap();
    assert!(in_error(&s, "#phone"));
    assert_eq!(error_text(&s, "#phone"), "Vennligst oppgi et gyldig telefonnummer");
}

#[test]
fn typing_does_not_validate_a_clean_field() {
    let mut s = session();
    s.type_text("#name", "K").unwrap();
    assert!(!in_error(&s, "#name"));
}

#[test]
fn typing_revalidates_a_field_in_error() {
    let mut s = session();
    s.blur("#message").unwrap();
    assert!(in_error(&s, "#message"));

    s.type_text("#message", "Hei på deg").unwrap();
    assert!(!in_error(&s, "#message"));
}

#[test]
fn invalid_submit_is_blocked_and_flags_every_field() {
    let mut s = session();
    let outcome = s.submit(FORM).unwrap();
    assert!(outcome.prevent_default);

    assert!(in_error(&s, "#name"));
    assert!(in_error(&s, "#email"));
    assert!(!in_error(&s, "#phone"));
    assert!(in_error(&s, "#message"));
    assert_eq!(error_text(&s, "#message"), "Meldingen må være minst 10 tegn");

    assert_eq!(text(&s, BUTTON), "Send forespørsel");
    assert!(!button_disabled(&s));
    assert_eq!(s.page().pending_timers(), 0);
}

#[test]
fn valid_submit_runs_the_send_sequence() {
    let mut s = session();
    fill_valid(&mut s);
    let outcome = s.submit(FORM).unwrap();
    assert!(outcome.prevent_default);

    assert_eq!(text(&s, BUTTON), "Sender...");
    assert!(button_disabled(&s));

    s.advance(1499);
    assert_eq!(text(&s, BUTTON), "Sender...");

    s.advance(1);
    assert_eq!(text(&s, BUTTON), "Sendt!");
    assert_eq!(style(&s, BUTTON, "background-color").as_deref(), Some("#27ae60"));
    assert!(button_disabled(&s));

    s.advance(2000);
    assert_eq!(text(&s, BUTTON), "Send forespørsel");
    assert_eq!(style(&s, BUTTON, "background-color"), None);
    assert!(!button_disabled(&s));
    let name = el(&s, "#name");
    assert_eq!(s.page().value(name), "");
}

#[test]
fn submit_button_click_submits_the_form() {
    let mut s = session();
    fill_valid(&mut s);
    s.click(BUTTON).unwrap();
    assert_eq!(text(&s, BUTTON), "Sender...");

    // disabled while sending, so a second click goes nowhere
    s.click(BUTTON).unwrap();
    assert_eq!(s.page().pending_timers(), 1);
}

#[test]
fn resubmitting_while_in_flight_is_ignored() {
    let mut s = session();
    fill_valid(&mut s);
    s.submit(FORM).unwrap();
    s.advance(1500);
    assert_eq!(text(&s, BUTTON), "Sendt!");

    let outcome = s.submit(FORM).unwrap();
    assert!(outcome.prevent_default);
    assert_eq!(s.page().pending_timers(), 1);

    s.advance(2000);
    assert_eq!(text(&s, BUTTON), "Send forespørsel");
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Submission>>>);

impl SubmissionSink for Recorder {
    fn submit(&mut self, submission: &Submission) {
        self.0.borrow_mut().push(submission.clone());
    }
}

#[test]
fn sink_sees_each_valid_submission() {
    let recorder = Recorder::default();
    let mut s = Session::with_sink(
        common::page(),
        &SiteConfig::default(),
        Box::new(recorder.clone()),
    );
    s.submit(FORM).unwrap();
    assert!(recorder.0.borrow().is_empty());

    fill_valid(&mut s);
    s.submit(FORM).unwrap();
    let seen = recorder.0.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].name, "Kari Nordmann");
    assert_eq!(seen[0].phone, "+47 55 12 34 56");
}

#[test]
fn form_without_button_still_resets() {
    let markup = r#"<body><section class="contact-form"><form>
        <div class="form-group"><input id="name"><span class="form-error"></span></div>
        <div class="form-group"><input id="email"><span class="form-error"></span></div>
        <div class="form-group"><textarea id="message"></textarea><span class="form-error"></span></div>
    </form></section></body>"#;
    let mut s = session_with_markup(markup);
    s.fill("#name", "Ola").unwrap();
    s.fill("#email", "ola@example.no").unwrap();
    s.fill("#message", "Trenger nytt kjøkken").unwrap();
    s.submit(".contact-form form").unwrap();
    s.advance(3500);
    assert_eq!(s.page().value(el(&s, "#name")), "");
}

#[test]
fn page_without_form_skips_widget() {
    let s = session_with_markup("<body><form><input id=\"name\"></form></body>");
    assert!(!s.site().widget_names().contains(&"contact-form"));
}
