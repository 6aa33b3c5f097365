//! Turn-by-turn intake tracking
//!
//! `advance_state` is the single entry point: one oracle round trip per
//! user turn, with every oracle output re-validated locally before any of
//! it reaches the stored state.

use super::prompt::{build_extraction_request, question_for};
use super::state::{FieldId, TripIntakeState};
use super::validate::merge_untrusted;
use crate::llm::{LlmRequest, LlmResponse, LlmService};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Per-attempt deadline for an oracle call
const ORACLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Total attempts per turn: the initial call plus one retry
const ORACLE_ATTEMPTS: u32 = 2;

/// Re-prompt returned whenever the oracle cannot be used this turn
pub const FALLBACK_PROMPT: &str =
    "Sorry, I had trouble understanding. Could you tell me more?";

/// Why an oracle round trip produced no usable update
#[derive(Debug, Error)]
enum OracleFailure {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    #[error("oracle call timed out")]
    Timeout,
    #[error("turn cancelled")]
    Cancelled,
    #[error("oracle reply malformed: {0}")]
    Malformed(String),
}

/// Structured reply expected inside the oracle's text.
///
/// The oracle's own missing-field list is deliberately not modeled here:
/// completeness is always computed locally from the merged state.
#[derive(Debug, Deserialize)]
struct OracleReply {
    updated_json: Map<String, Value>,
    #[serde(default)]
    next_question: String,
}

/// Result of one intake turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub state: TripIntakeState,
    pub missing_fields: Vec<FieldId>,
    /// Empty exactly when `complete` is true
    pub next_prompt: String,
    pub complete: bool,
}

/// Conversation state tracker
pub struct IntakeTracker {
    oracle: Option<Arc<dyn LlmService>>,
}

impl IntakeTracker {
    pub fn new(oracle: Option<Arc<dyn LlmService>>) -> Self {
        Self { oracle }
    }

    /// Advance the intake by one user turn.
    ///
    /// Never fails: an unavailable oracle, a timed-out or cancelled call,
    /// and an unparseable reply all degrade to the unmodified input state,
    /// the full missing-field list, and a generic re-prompt.
    pub async fn advance_state(
        &self,
        state: &TripIntakeState,
        utterance: &str,
        history: &[String],
        cancel: &CancellationToken,
    ) -> TurnOutcome {
        let Some(oracle) = &self.oracle else {
            tracing::warn!("No oracle configured; keeping previous state");
            return Self::fallback_outcome(state);
        };

        let request = build_extraction_request(state, utterance, history);

        let response = match Self::call_oracle(oracle, &request, cancel).await {
            Ok(response) => response,
            Err(failure) => {
                tracing::warn!(error = %failure, "Oracle turn failed; keeping previous state");
                return Self::fallback_outcome(state);
            }
        };

        let reply = match parse_reply(&response.text) {
            Ok(reply) => reply,
            Err(failure) => {
                tracing::warn!(error = %failure, "Oracle reply unusable; keeping previous state");
                return Self::fallback_outcome(state);
            }
        };

        let merged = merge_untrusted(state, &reply.updated_json);
        for rejection in &merged.rejected {
            tracing::warn!(
                field = %rejection.field,
                reason = %rejection.reason,
                "Rejected oracle field update"
            );
        }

        let missing_fields = merged.state.missing_fields();
        let complete = missing_fields.is_empty();
        let next_prompt = if complete {
            String::new()
        } else {
            choose_prompt(&reply.next_question, missing_fields[0])
        };

        TurnOutcome {
            state: merged.state,
            missing_fields,
            next_prompt,
            complete,
        }
    }

    /// One oracle call with a per-attempt deadline and a single retry on
    /// retryable errors or timeouts. Cancellation aborts immediately.
    async fn call_oracle(
        oracle: &Arc<dyn LlmService>,
        request: &LlmRequest,
        cancel: &CancellationToken,
    ) -> Result<LlmResponse, OracleFailure> {
        let mut attempt = 1;
        loop {
            let result = tokio::select! {
                () = cancel.cancelled() => return Err(OracleFailure::Cancelled),
                result = timeout(ORACLE_TIMEOUT, oracle.complete(request)) => result,
            };

            match result {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(e)) => {
                    if e.kind.is_retryable() && attempt < ORACLE_ATTEMPTS {
                        tracing::warn!(attempt, error = %e, "Oracle error; retrying");
                    } else {
                        return Err(OracleFailure::Unavailable(e.to_string()));
                    }
                }
                Err(_) => {
                    if attempt < ORACLE_ATTEMPTS {
                        tracing::warn!(attempt, "Oracle call timed out; retrying");
                    } else {
                        return Err(OracleFailure::Timeout);
                    }
                }
            }

            attempt += 1;
        }
    }

    fn fallback_outcome(state: &TripIntakeState) -> TurnOutcome {
        let missing_fields = state.missing_fields();
        let complete = missing_fields.is_empty();
        let next_prompt = if complete {
            String::new()
        } else {
            FALLBACK_PROMPT.to_string()
        };
        TurnOutcome {
            state: state.clone(),
            missing_fields,
            next_prompt,
            complete,
        }
    }
}

fn parse_reply(text: &str) -> Result<OracleReply, OracleFailure> {
    let json = extract_json_object(text)
        .ok_or_else(|| OracleFailure::Malformed("no JSON object in reply".to_string()))?;
    serde_json::from_str(json).map_err(|e| OracleFailure::Malformed(e.to_string()))
}

/// Slice the outermost `{...}` from a reply that may carry prose or fences
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    text.get(start..=end)
}

fn choose_prompt(oracle_question: &str, top_missing: FieldId) -> String {
    let question = oracle_question.trim();
    if question.is_empty() {
        question_for(top_missing).to_string()
    } else {
        question.to_string()
    }
}
