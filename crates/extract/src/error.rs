use thiserror::Error;

/// Failure to turn a model response into `SummaryDetails`
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model output")]
    NoJson,

    #[error("invalid JSON in model output: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a string")]
    NotAString(&'static str),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chat endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("chat response contained no choices")]
    EmptyResponse,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
