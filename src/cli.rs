//! CLI definition and the call handler.
//!
//! `dialout [FROM TO]` -- place one outbound call that speaks a greeting,
//! plays a sample clip, and says goodbye. Credentials always come from the
//! environment; numbers come from the arguments or the environment.

use clap::Parser;
use tracing::info;

use crate::config::{CallConfig, FROM_NUMBER_VAR, TO_NUMBER_VAR};
use crate::voice::{self, announcement, console_url};
use crate::voice::{CallBody, CallOutcome, CallRequest, CallSubmitter};

/// Place a single outbound test call through the Twilio API.
#[derive(Parser, Debug)]
#[command(
    name = "dialout",
    version = env!("CARGO_PKG_VERSION"),
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("DIALOUT_GIT_HASH"), " ", env!("DIALOUT_BUILD_DATE"), ")"
    ),
    about = "Place a single outbound test call through the Twilio API"
)]
pub struct Cli {
    /// Origin and destination numbers in E.164 format (e.g. +15551234567).
    /// Anything past the first two is ignored. With fewer than two,
    /// TWILIO_PHONE_NUMBER and TEST_PHONE_NUMBER are used instead.
    #[arg(value_name = "NUMBER")]
    pub numbers: Vec<String>,

    /// Fetch call instructions from this TwiML URL instead of using the
    /// built-in announcement.
    #[arg(long, value_name = "URL")]
    pub twiml_url: Option<String>,
}

/// Usage guidance printed when no numbers could be resolved.
pub fn usage_hint() -> String {
    format!(
        "Usage:\n  dialout <from_number> <to_number>\n\n\
         Or set environment variables:\n  export {}='+1234567890'\n  export {}='+0987654321'\n\n\
         Example:\n  dialout +1234567890 +0987654321\n",
        FROM_NUMBER_VAR, TO_NUMBER_VAR
    )
}

/// Run the call: build the instructions, submit once, print the report.
pub async fn handle_call(
    config: &CallConfig,
    twiml_url: Option<&str>,
    submitter: &dyn CallSubmitter,
) -> voice::Result<CallOutcome> {
    let body = match twiml_url {
        Some(url) => CallBody::Url(url.to_string()),
        None => CallBody::Twiml(announcement().to_xml()),
    };
    let inline = matches!(body, CallBody::Twiml(_));

    let request = CallRequest {
        to: config.to.clone(),
        from: config.from.clone(),
        body,
    };

    println!("Initiating call...");
    println!("  From: {}", request.from);
    println!("  To:   {}", request.to);
    info!(from = %request.from, to = %request.to, inline, "submitting call");

    let outcome = submitter.submit_call(&request).await?;
    info!(sid = %outcome.sid, status = %outcome.status, "call created");

    print!("{}", render_report(&outcome, inline));
    Ok(outcome)
}

/// Render the post-submission report.
fn render_report(outcome: &CallOutcome, inline: bool) -> String {
    let mut report = format!(
        "\nCall initiated successfully!\n  Call SID:    {}\n  Status:      {}\n  Direction:   {}\n\n  View in Console: {}\n",
        outcome.sid,
        outcome.status,
        outcome.direction,
        console_url(&outcome.sid)
    );
    if inline {
        report.push_str(
            "\nThe call will:\n  1. Greet the recipient in German\n  2. Play a sample audio file\n  3. Say goodbye in German\n",
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["dialout"]).unwrap();
        assert!(cli.numbers.is_empty());
        assert!(cli.twiml_url.is_none());
    }

    #[test]
    fn test_cli_two_numbers() {
        let cli = Cli::try_parse_from(["dialout", "+15551234567", "+15557654321"]).unwrap();
        assert_eq!(cli.numbers, vec!["+15551234567", "+15557654321"]);
    }

    #[test]
    fn test_cli_accepts_trailing_extras() {
        let cli = Cli::try_parse_from(["dialout", "+1", "+2", "+3"]).unwrap();
        assert_eq!(cli.numbers.len(), 3);
    }

    #[test]
    fn test_cli_twiml_url_flag() {
        let cli = Cli::try_parse_from([
            "dialout",
            "+1",
            "+2",
            "--twiml-url",
            "https://example.com/voice.xml",
        ])
        .unwrap();
        assert_eq!(
            cli.twiml_url.as_deref(),
            Some("https://example.com/voice.xml")
        );
    }

    #[test]
    fn test_usage_hint_mentions_example_and_env_vars() {
        let hint = usage_hint();
        assert!(hint.contains("dialout +1234567890 +0987654321"));
        assert!(hint.contains("TWILIO_PHONE_NUMBER"));
        assert!(hint.contains("TEST_PHONE_NUMBER"));
    }

    #[test]
    fn test_render_report_contains_all_fields() {
        let outcome = CallOutcome {
            sid: "CAxxx".to_string(),
            status: "queued".to_string(),
            direction: "outbound-api".to_string(),
        };
        let report = render_report(&outcome, true);
        assert!(report.contains("CAxxx"));
        assert!(report.contains("queued"));
        assert!(report.contains("outbound-api"));
        assert!(report.contains("https://console.twilio.com/us1/monitor/logs/call/CAxxx"));
        assert!(report.contains("The call will:"));
    }

    #[test]
    fn test_render_report_url_mode_skips_script_description() {
        let outcome = CallOutcome {
            sid: "CAyyy".to_string(),
            status: "queued".to_string(),
            direction: "outbound-api".to_string(),
        };
        let report = render_report(&outcome, false);
        assert!(report.contains("CAyyy"));
        assert!(!report.contains("The call will:"));
    }
}
