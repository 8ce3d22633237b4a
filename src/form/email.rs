//! Email delivery
//!
//! The contact form hands a fixed payload to an [`EmailService`]; the
//! service id and template id select the remote account and message
//! template.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, Result};

/// Template parameters of a contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
    pub reply_to: String,
}

/// Outbound email collaborator
pub trait EmailService {
    /// Deliver one message
    ///
    /// # Errors
    /// * `Delivery` - the message was not accepted
    fn send(&mut self, service_id: &str, template_id: &str, payload: &EmailPayload) -> Result<()>;
}

/// One call made to a [`RecordingEmailService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub service_id: String,
    pub template_id: String,
    pub payload: EmailPayload,
}

/// Test double that records every call
///
/// Clones share the record, so a test can keep one handle while the form
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailService {
    sent: Rc<RefCell<Vec<SentEmail>>>,
    failure: Option<String>,
}

impl RecordingEmailService {
    /// A service that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that rejects everything with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Rc::default(),
            failure: Some(reason.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.borrow().clone()
    }
}

impl EmailService for RecordingEmailService {
    fn send(&mut self, service_id: &str, template_id: &str, payload: &EmailPayload) -> Result<()> {
        self.sent.borrow_mut().push(SentEmail {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            payload: payload.clone(),
        });
        match &self.failure {
            Some(reason) => Err(PortfolioError::Delivery {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Service that logs the message and reports success
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailService;

impl EmailService for LogEmailService {
    fn send(&mut self, service_id: &str, template_id: &str, payload: &EmailPayload) -> Result<()> {
        info!(
            "email via {}/{} from {} <{}>: {} chars",
            service_id,
            template_id,
            payload.from_name,
            payload.from_email,
            payload.message.chars().count()
        );
        Ok(())
    }
}
