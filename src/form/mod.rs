//! Contact form
//!
//! Field validation, email delivery and submit-button feedback.

pub mod email;
pub mod submitter;

pub use email::{EmailPayload, EmailService, LogEmailService, RecordingEmailService, SentEmail};
pub use submitter::{
    ContactFields, FormSubmitter, SubmitOutcome, FAILED_LABEL, SENDING_LABEL, SENT_LABEL,
    SENT_MESSAGE,
};
