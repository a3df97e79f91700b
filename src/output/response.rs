//! JSON envelope written to stdout for every command, plus exit-code mapping.

use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use wags_tails::error::Hint;
use wags_tails::{Error, ErrorCode, Result};

/// `{"success": true, "command": .., "data": ..}` or the same with `error`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub success: bool,
    pub command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl From<Error> for ErrorBody {
    fn from(err: Error) -> Self {
        Self {
            code: err.code.as_str(),
            message: err.message,
            details: err.details,
            hints: err.hints,
            retryable: err.retryable,
        }
    }
}

impl<'a> Envelope<'a> {
    pub fn new(command: &'a str, result: Result<Value>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                command,
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                success: false,
                command,
                data: None,
                error: Some(err.into()),
            },
        }
    }

    fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal_json(e.to_string(), Some("render envelope".to_string())))
    }
}

/// Serialize a command's output, pairing failures with their exit code.
pub fn to_json_result<T: Serialize>(result: Result<(T, i32)>) -> (Result<Value>, i32) {
    let (data, exit_code) = match result {
        Ok(pair) => pair,
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            return (Err(err), exit_code);
        }
    };

    match serde_json::to_value(data) {
        Ok(value) => (Ok(value), exit_code),
        Err(e) => (
            Err(Error::internal_json(
                e.to_string(),
                Some("serialize command output".to_string()),
            )),
            exit_code_for_error(ErrorCode::InternalJsonError),
        ),
    }
}

pub(crate) fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ValidationInvalidArgument => 2,
        ErrorCode::SourceNotFound | ErrorCode::SourceNoLocalData => 4,
        ErrorCode::SourceRemoteData | ErrorCode::RemoteHttpError => 20,
        ErrorCode::InternalIoError | ErrorCode::InternalJsonError | ErrorCode::InternalUnexpected => 1,
    }
}

/// Write the envelope for `command` to stdout. A closed pipe is not an error.
pub fn print_envelope(command: &str, result: Result<Value>) -> Result<()> {
    let payload = Envelope::new(command, result).render()?;
    let mut out = io::stdout().lock();
    match writeln!(out, "{}", payload) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(e.to_string(), Some("write stdout".to_string()))),
        Ok(()) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_local_data_maps_to_exit_code_4() {
        let err = Error::source_no_local_data("mondo", "/tmp/mondo", "mondo_*.owl");
        let (value, exit_code) = to_json_result::<Value>(Err(err));
        assert!(value.is_err());
        assert_eq!(exit_code, 4);
    }

    #[test]
    fn remote_failures_map_to_exit_code_20() {
        let http = Error::remote_http("https://example.org/x", Some(502), "bad gateway");
        assert_eq!(to_json_result::<Value>(Err(http)).1, 20);

        let parse = Error::source_remote_data("chembl", "no release line", None);
        assert_eq!(to_json_result::<Value>(Err(parse)).1, 20);
    }

    #[test]
    fn error_envelope_carries_code_hints_and_retryable() {
        let err = Error::remote_http("https://example.org/x", Some(503), "unavailable")
            .with_hint("Try again later");
        let json = Envelope::new("get-latest", Err(err)).render().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["command"], "get-latest");
        assert_eq!(value["error"]["code"], "remote.http_error");
        assert_eq!(value["error"]["details"]["status"], 503);
        assert_eq!(value["error"]["hints"][0]["message"], "Try again later");
        assert_eq!(value["error"]["retryable"], true);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn success_envelope_omits_error() {
        let (data, exit_code) = to_json_result(Ok((serde_json::json!({ "version": "33" }), 0)));
        assert_eq!(exit_code, 0);

        let json = Envelope::new("versions", data).render().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["version"], "33");
        assert!(value.get("error").is_none());
    }
}
