//! Voice Calls Module
//!
//! TwiML document construction and the Twilio API client used to place
//! one outbound call.

pub mod twiml;
pub mod twilio;

pub use twiml::{announcement, VoiceResponse};
pub use twilio::{console_url, CallBody, CallOutcome, CallRequest, CallSubmitter, TwilioClient};

use thiserror::Error;

/// Voice module errors
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Twilio API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for voice operations
pub type Result<T> = std::result::Result<T, CallError>;
