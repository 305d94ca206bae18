//! Credential and phone number resolution.
//!
//! Everything is sourced from environment variables, with positional CLI
//! arguments taking precedence for the phone numbers. All validation happens
//! here, before any network activity.

use thiserror::Error;

/// Twilio account SID environment variable.
pub const ACCOUNT_SID_VAR: &str = "TWILIO_ACCOUNT_SID";
/// Twilio auth token environment variable.
pub const AUTH_TOKEN_VAR: &str = "TWILIO_AUTH_TOKEN";
/// Default origin number environment variable.
pub const FROM_NUMBER_VAR: &str = "TWILIO_PHONE_NUMBER";
/// Default destination number environment variable.
pub const TO_NUMBER_VAR: &str = "TEST_PHONE_NUMBER";

/// Configuration errors, all detected before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {0} environment variable")]
    MissingCredential(&'static str),

    #[error("no phone numbers provided")]
    MissingNumbers,

    #[error("{role} number '{number}' must be in E.164 format (e.g. +1234567890)")]
    InvalidNumber { role: &'static str, number: String },
}

/// Everything needed to place one call.
#[derive(Debug, Clone)]
pub struct CallConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Origin number (the Twilio number), E.164.
    pub from: String,
    /// Destination number, E.164.
    pub to: String,
}

impl CallConfig {
    /// Resolve from the process environment and positional arguments.
    pub fn from_env(args: &[String]) -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok(), args)
    }

    /// Resolve against an arbitrary environment lookup.
    ///
    /// Numbers come from the first two positional arguments when two or more
    /// were given (extras are ignored), otherwise from the environment.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        args: &[String],
    ) -> Result<Self, ConfigError> {
        let account_sid = require(&env, ACCOUNT_SID_VAR)?;
        let auth_token = require(&env, AUTH_TOKEN_VAR)?;

        let (from, to) = if args.len() >= 2 {
            (args[0].clone(), args[1].clone())
        } else {
            (
                env(FROM_NUMBER_VAR).unwrap_or_default(),
                env(TO_NUMBER_VAR).unwrap_or_default(),
            )
        };

        if from.is_empty() || to.is_empty() {
            return Err(ConfigError::MissingNumbers);
        }

        check_e164("origin", &from)?;
        check_e164("destination", &to)?;

        Ok(Self {
            account_sid,
            auth_token,
            from,
            to,
        })
    }
}

fn require(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match env(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(name)),
    }
}

/// Only the leading plus is enforced; everything past it is Twilio's problem.
fn check_e164(role: &'static str, number: &str) -> Result<(), ConfigError> {
    if number.starts_with('+') {
        Ok(())
    } else {
        Err(ConfigError::InvalidNumber {
            role,
            number: number.to_string(),
        })
    }
}
