//! JSON request/response boundary.
//!
//! Collaborators (HTTP handlers, the CLI, job runners) speak JSON. This module
//! maps a request document onto [`CutPlanInput`], runs the optimizer and wraps
//! the outcome in a response envelope that classifies failures as client or
//! server errors.
//!
//! ## Request
//!
//! ```json
//! {
//!   "stock": [{ "stockId": "stock-a", "specKey": "G60", "lengthIn": 120, "quantity": 1 }],
//!   "requirements": [{ "partId": "part-1", "specKey": "G60", "lengthIn": 36, "quantity": 2 }],
//!   "kerfIn": 0.125,
//!   "toleranceIn": 0.25
//! }
//! ```
//!
//! Optional fields: `minPartLengthIn`, `scrapThresholdPct`, `version`, and
//! `allowKeepRemnants` per stock line.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::CutPlanInput;
use crate::optimizer::CutOptimizer;
use crate::report::ScrapReport;
use crate::result::CutPlan;

/// API version.
pub const API_VERSION: &str = "1.0";

/// An optimization request document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// API version the caller targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Stock, requirements, kerf and tolerance.
    #[serde(flatten)]
    pub input: CutPlanInput,

    /// Overrides the configured scrap-free threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrap_threshold_pct: Option<f64>,
}

impl OptimizeRequest {
    /// Wraps an input with no overrides.
    pub fn new(input: CutPlanInput) -> Self {
        Self {
            version: None,
            input,
            scrap_threshold_pct: None,
        }
    }
}

/// Failure payload of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Stable error code, e.g. `INSUFFICIENT_STOCK`.
    pub kind: String,
    /// `client` or `server`.
    pub class: String,
    /// Human readable message.
    pub message: String,
    /// Spec key involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_key: Option<String>,
    /// Part id involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,
    /// Stock id involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_id: Option<String>,
    /// Length involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_in: Option<f64>,
}

impl ErrorResponse {
    /// Payload for a document that could not be parsed.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: "INVALID_REQUEST".to_string(),
            class: "client".to_string(),
            message: message.into(),
            spec_key: None,
            part_id: None,
            stock_id: None,
            length_in: None,
        }
    }

    /// Returns true if the caller caused the failure.
    pub fn is_client_error(&self) -> bool {
        self.class == "client"
    }
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        let mut response = Self {
            kind: err.code().to_string(),
            class: err.class().as_str().to_string(),
            message: err.to_string(),
            spec_key: None,
            part_id: None,
            stock_id: None,
            length_in: None,
        };
        match err {
            Error::Validation {
                spec_key,
                part_id,
                stock_id,
                length_in,
                ..
            } => {
                response.spec_key = spec_key.clone();
                response.part_id = part_id.clone();
                response.stock_id = stock_id.clone();
                response.length_in = *length_in;
            }
            Error::InfeasiblePart(fault) | Error::InsufficientStock(fault) => {
                response.spec_key = Some(fault.spec_key.clone());
                response.part_id = Some(fault.part_id.clone());
                response.length_in = Some(fault.length_in);
            }
            Error::Internal { .. } => {}
        }
        response
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    /// API version.
    pub version: String,
    /// Whether a plan was produced.
    pub success: bool,
    /// The plan, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<CutPlan>,
    /// Scrap figures for the plan, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrap: Option<ScrapReport>,
    /// The failure, otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl OptimizeResponse {
    fn success(plan: CutPlan, scrap: ScrapReport) -> Self {
        Self {
            version: API_VERSION.to_string(),
            success: true,
            plan: Some(plan),
            scrap: Some(scrap),
            error: None,
        }
    }

    /// Builds a failed response.
    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            version: API_VERSION.to_string(),
            success: false,
            plan: None,
            scrap: None,
            error: Some(error),
        }
    }

    /// Serializes the response as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs a parsed request.
pub fn optimize_request(optimizer: &CutOptimizer, request: &OptimizeRequest) -> OptimizeResponse {
    let threshold = request
        .scrap_threshold_pct
        .unwrap_or(optimizer.config().scrap_free_threshold_pct);

    match optimizer.optimize(&request.input) {
        Ok(plan) => {
            let scrap = ScrapReport::from_plan(&plan, threshold, optimizer.config().epsilon);
            OptimizeResponse::success(plan, scrap)
        }
        Err(err) => OptimizeResponse::failure(ErrorResponse::from(&err)),
    }
}

/// Parses and runs a JSON request with `optimizer`.
pub fn optimize_json_with(optimizer: &CutOptimizer, request_json: &str) -> OptimizeResponse {
    match serde_json::from_str::<OptimizeRequest>(request_json) {
        Ok(request) => optimize_request(optimizer, &request),
        Err(e) => OptimizeResponse::failure(ErrorResponse::invalid_request(format!(
            "Failed to parse request: {e}"
        ))),
    }
}

/// Parses and runs a JSON request with the default configuration.
pub fn optimize_json(request_json: &str) -> OptimizeResponse {
    optimize_json_with(&CutOptimizer::default_config(), request_json)
}
