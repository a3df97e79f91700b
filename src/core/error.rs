use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    SourceNotFound,
    SourceNoLocalData,
    SourceRemoteData,

    RemoteHttpError,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::SourceNotFound => "source.not_found",
            ErrorCode::SourceNoLocalData => "source.no_local_data",
            ErrorCode::SourceRemoteData => "source.remote_data",

            ErrorCode::RemoteHttpError => "remote.http_error",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundDetails {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoLocalDataDetails {
    pub source: String,
    pub data_dir: String,
    pub pattern: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDataDetails {
    pub source: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpErrorDetails {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let problem = problem.into();
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            format!("Invalid argument: {}", problem),
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem,
                id,
                tried,
            }),
        )
    }

    /// `from_local` and `force_refresh` pull in opposite directions.
    pub fn conflicting_fetch_flags() -> Self {
        Self::validation_invalid_argument(
            "force_refresh",
            "Cannot set both `force_refresh` and `from_local`",
            None,
            None,
        )
    }

    pub fn source_not_found(id: impl Into<String>, known: Vec<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorCode::SourceNotFound,
            format!("Unknown data source: {}", id),
            to_details(NotFoundDetails { id }),
        )
        .with_hint(format!("Known sources: {}", known.join(", ")))
        .with_hint("Run 'wags-tails list-sources' to see available sources")
    }

    pub fn source_no_local_data(
        source: impl Into<String>,
        data_dir: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        let source = source.into();
        Self::new(
            ErrorCode::SourceNoLocalData,
            format!("No source data found for {}", source),
            to_details(NoLocalDataDetails {
                source,
                data_dir: data_dir.into(),
                pattern: pattern.into(),
            }),
        )
        .with_hint("Run again without --from-local to fetch from the remote source")
    }

    /// Remote metadata could not be parsed, navigated, or extracted from.
    pub fn source_remote_data(
        source: impl Into<String>,
        problem: impl Into<String>,
        url: Option<String>,
    ) -> Self {
        let problem = problem.into();
        Self::new(
            ErrorCode::SourceRemoteData,
            problem.clone(),
            to_details(RemoteDataDetails {
                source: source.into(),
                problem,
                url,
            }),
        )
    }

    pub fn remote_http(url: impl Into<String>, status: Option<u16>, error: impl Into<String>) -> Self {
        let url = url.into();
        let message = match status {
            Some(code) => format!("HTTP {} from {}", code, url),
            None => format!("HTTP request to {} failed", url),
        };
        let mut err = Self::new(
            ErrorCode::RemoteHttpError,
            message,
            to_details(HttpErrorDetails {
                url,
                status,
                error: error.into(),
            }),
        );
        // Transport failures, 5xx and 429 are retryable
        err.retryable = Some(status.map_or(true, |code| code >= 500 || code == 429));
        err
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalJsonErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
