//! Contact form submission
//!
//! Validates the three required fields, forwards them to the email service
//! and reflects the outcome in the submit button and a notification. The
//! button returns to its idle label after a fixed delay either way; only a
//! successful send clears the fields.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::email::{EmailPayload, EmailService};
use crate::audio::SoundCue;
use crate::config::EmailSettings;
use crate::engine::{FormEvent, Millis, Stage, TimerEvent};
use crate::error::PortfolioError;
use crate::page::{ButtonState, ButtonTone, NotificationKind};

pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "Message Sent!";
pub const FAILED_LABEL: &str = "Send Failed";
pub const SENT_MESSAGE: &str = "Message sent successfully!";

/// The three contact form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// The first field that is empty after trimming
    ///
    /// Whitespace-only input counts as empty, so a blank name or message
    /// never reaches the email service.
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// What a submit attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// A required field was empty; the service was not called
    Invalid { field: &'static str },
    /// The service rejected the message
    Failed { reason: String },
    /// The button was disabled by an earlier submit
    Busy,
}

pub struct FormSubmitter {
    service: Box<dyn EmailService>,
    settings: EmailSettings,
    restore_ms: Millis,
    /// Button label to restore after a send
    idle_label: Option<String>,
}

impl FormSubmitter {
    pub fn new(service: Box<dyn EmailService>, settings: EmailSettings, restore_ms: Millis) -> Self {
        Self {
            service,
            settings,
            restore_ms,
            idle_label: None,
        }
    }

    /// An input gained focus
    pub fn focus(&self, stage: &mut Stage) {
        stage.cue(SoundCue::InputFocus);
    }

    /// Submit the fields currently on the page
    pub fn submit(&mut self, stage: &mut Stage) -> SubmitOutcome {
        let button = stage.page.submit_button();
        if button.disabled {
            debug!("submit ignored: send in progress");
            return SubmitOutcome::Busy;
        }

        stage.cue(SoundCue::FormSubmit);

        let fields = stage.page.form_fields();
        if let Some(field) = fields.first_missing() {
            let err = PortfolioError::MissingField { field };
            stage.notify(NotificationKind::Error, &err.friendly_message());
            return SubmitOutcome::Invalid { field };
        }

        self.idle_label = Some(button.label.clone());
        stage.page.set_submit_button(ButtonState {
            label: SENDING_LABEL.to_string(),
            disabled: true,
            tone: ButtonTone::Normal,
        });

        let payload = EmailPayload {
            from_name: fields.name.clone(),
            from_email: fields.email.clone(),
            message: fields.message.clone(),
            to_name: self.settings.to_name.clone(),
            reply_to: fields.email,
        };

        match self
            .service
            .send(&self.settings.service_id, &self.settings.template_id, &payload)
        {
            Ok(()) => {
                stage.page.set_submit_button(ButtonState {
                    label: SENT_LABEL.to_string(),
                    disabled: true,
                    tone: ButtonTone::Success,
                });
                stage.cue(SoundCue::ButtonSuccess);
                stage.notify(NotificationKind::Success, SENT_MESSAGE);
                stage.after(self.restore_ms, TimerEvent::Form(FormEvent::Reset));
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!("email send failed: {}", err);
                stage.page.set_submit_button(ButtonState {
                    label: FAILED_LABEL.to_string(),
                    disabled: true,
                    tone: ButtonTone::Failure,
                });
                stage.notify(NotificationKind::Error, &err.friendly_message());
                stage.after(self.restore_ms, TimerEvent::Form(FormEvent::Restore));
                SubmitOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Restore the button once the result has been shown
    pub fn on_event(&mut self, stage: &mut Stage, event: FormEvent) {
        let label = self
            .idle_label
            .take()
            .unwrap_or_else(|| stage.page.submit_button().label);
        stage.page.set_submit_button(ButtonState::enabled(&label));
        if event == FormEvent::Reset {
            stage.page.set_form_fields(ContactFields::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::test_stage;
    use crate::form::RecordingEmailService;
    use crate::page::MemoryPage;

    fn submitter(service: &RecordingEmailService) -> FormSubmitter {
        FormSubmitter::new(Box::new(service.clone()), EmailSettings::default(), 2000)
    }

    fn drive(form: &mut FormSubmitter, stage: &mut Stage, until: Millis) {
        while let Some(event) = stage.timeline.pop_due(until) {
            match event {
                TimerEvent::Form(form_event) => form.on_event(stage, form_event),
                TimerEvent::NotificationExpired(id) => {
                    stage.page.dismiss_notification(id);
                }
                _ => {}
            }
        }
        stage.timeline.set_now(until);
    }

    #[test]
    fn test_first_missing_trims() {
        assert_eq!(ContactFields::new("Ada", "  ", "Hi").first_missing(), Some("email"));
        assert_eq!(ContactFields::new(" \t", "a@b.c", "Hi").first_missing(), Some("name"));
        assert_eq!(ContactFields::new("Ada", "a@b.c", "\n").first_missing(), Some("message"));
        assert_eq!(ContactFields::new("", "", "").first_missing(), Some("name"));
        assert_eq!(ContactFields::new("Ada", "a@b.c", "Hi").first_missing(), None);
    }

    #[test]
    fn test_payload_fields() {
        let (mut stage, _) = test_stage(MemoryPage::default());
        let service = RecordingEmailService::new();
        let mut form = submitter(&service);
        stage
            .page
            .set_form_fields(ContactFields::new("Ada", "ada@example.com", "Hello"));

        assert_eq!(form.submit(&mut stage), SubmitOutcome::Sent);

        let sent = service.sent();
        assert_eq!(sent[0].service_id, "YOUR_SERVICE_ID");
        assert_eq!(sent[0].payload.to_name, "Your Name");
        assert_eq!(sent[0].payload.reply_to, "ada@example.com");
        assert_eq!(sent[0].payload.from_name, "Ada");
    }

    #[test]
    fn test_invalid_keeps_button() {
        let (mut stage, recorder) = test_stage(MemoryPage::default());
        let service = RecordingEmailService::new();
        let mut form = submitter(&service);
        stage
            .page
            .set_form_fields(ContactFields::new("Ada", "", "Hello"));

        assert_eq!(
            form.submit(&mut stage),
            SubmitOutcome::Invalid { field: "email" }
        );
        assert_eq!(service.calls(), 0);
        assert!(!stage.page.submit_button().disabled);
        assert_eq!(
            stage.page.notifications()[0].message,
            "Please fill in all fields!"
        );
        // FormSubmit cue still plays
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_busy_button_ignores_submit() {
        let (mut stage, recorder) = test_stage(MemoryPage::default());
        let service = RecordingEmailService::new();
        let mut form = submitter(&service);
        stage
            .page
            .set_form_fields(ContactFields::new("Ada", "ada@example.com", "Hello"));

        form.submit(&mut stage);
        let tones = recorder.len();
        assert_eq!(form.submit(&mut stage), SubmitOutcome::Busy);
        assert_eq!(service.calls(), 1);
        assert_eq!(recorder.len(), tones);
    }

    #[test]
    fn test_failure_restores_without_reset() {
        let (mut stage, _) = test_stage(MemoryPage::default());
        let service = RecordingEmailService::failing("network down");
        let mut form = submitter(&service);
        let fields = ContactFields::new("Ada", "ada@example.com", "Hello");
        stage.page.set_form_fields(fields.clone());

        assert!(matches!(
            form.submit(&mut stage),
            SubmitOutcome::Failed { .. }
        ));
        let button = stage.page.submit_button();
        assert_eq!(button.label, FAILED_LABEL);
        assert_eq!(button.tone, ButtonTone::Failure);

        drive(&mut form, &mut stage, 2000);
        assert_eq!(stage.page.submit_button(), ButtonState::enabled("Send Message"));
        assert_eq!(stage.page.form_fields(), fields);
    }
}
