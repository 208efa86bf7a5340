//! Client for the Judge0-compatible code execution service.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::JudgeConfig;

/// Source plus optional stdin for one sandboxed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language_id: u16,
    pub stdin: Option<String>,
}

/// Decoded outcome of a single judge run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    /// Wall time in seconds as reported by the judge.
    pub time: Option<String>,
    /// Peak memory in kilobytes.
    pub memory: Option<u64>,
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    pub fn time_seconds(&self) -> Option<f64> {
        self.time
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
    }
}

/// Synchronous submit-and-wait execution against an external judge.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, JudgeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("judge responded with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("judge returned undecodable {field}: {message}")]
    Decode {
        field: &'static str,
        message: String,
    },
}

pub fn encode_payload(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

/// Judge0 wraps base64 output at 76 columns, so whitespace is dropped before decoding.
pub fn decode_payload(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, JudgeError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Ok(None);
    }

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| JudgeError::Decode {
            field,
            message: err.to_string(),
        })?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

#[derive(Debug, Serialize)]
struct Judge0Submission {
    source_code: String,
    language_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdin: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Judge0Response {
    #[serde(default)]
    status: Option<Judge0Status>,
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    stderr: Option<String>,
    #[serde(default)]
    compile_output: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    memory: Option<u64>,
    #[serde(default)]
    exit_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Judge0Status {
    #[serde(default)]
    description: Option<String>,
}

impl Judge0Response {
    fn decode(self) -> Result<ExecutionResult, JudgeError> {
        Ok(ExecutionResult {
            status: self
                .status
                .and_then(|status| status.description)
                .unwrap_or_else(|| "Unknown".to_string()),
            stdout: decode_payload("stdout", self.stdout)?,
            stderr: decode_payload("stderr", self.stderr)?,
            compile_output: decode_payload("compile_output", self.compile_output)?,
            time: self.time,
            memory: self.memory,
            exit_code: self.exit_code,
        })
    }
}

/// RapidAPI-hosted (or self-hosted) Judge0 client.
pub struct Judge0Client {
    http: Client,
    config: JudgeConfig,
}

impl Judge0Client {
    pub fn new(config: JudgeConfig) -> Result<Self, JudgeError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn submissions_url(&self) -> String {
        format!("{}/submissions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl JudgeClient for Judge0Client {
    #[instrument(skip_all, fields(language_id = request.language_id))]
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, JudgeError> {
        let submission = Judge0Submission {
            source_code: encode_payload(&request.source_code),
            language_id: request.language_id,
            stdin: request.stdin.as_deref().map(encode_payload),
        };

        let response = self
            .http
            .post(self.submissions_url())
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&[("base64_encoded", "true"), ("wait", "true")])
            .json(&submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Judge0Response = response.json().await?;
        let result = payload.decode()?;
        debug!(status = %result.status, time = ?result.time, "judge run finished");
        Ok(result)
    }
}
