//! Response router
//!
//! QUERY → DISPATCH (remote | local) → DEGRADE ON FAILURE → ANNOTATE → RESULT
//!
//! The router is stateless between calls: mode and credential are explicit
//! parameters, and every call yields exactly one `ResponseResult`.

use crate::error::RemoteError;
use crate::models::{Credential, Mode, ModeLabel, ResponseResult};
use crate::responder::{LocalResponder, RemoteResponder};
use crate::urgency::UrgencyAnnotator;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ResponseRouter {
    local: LocalResponder,
    remote: Arc<dyn RemoteResponder>,
}

impl ResponseRouter {
    pub fn new(local: LocalResponder, remote: Arc<dyn RemoteResponder>) -> Self {
        Self { local, remote }
    }

    /// Answer a query. Never fails: remote errors degrade to the local
    /// answer with a diagnostic note and an `AiError` label.
    pub async fn route(
        &self,
        query: &str,
        mode: Mode,
        credential: Option<&Credential>,
    ) -> ResponseResult {
        let mut result = match mode {
            Mode::AiDisabled => {
                debug!("Routing to local responder");
                self.local.respond(query)
            }
            Mode::AiEnabled => match self.ask_remote(query, credential).await {
                Ok(result) => {
                    info!("Answered by remote responder");
                    result
                }
                Err(e) => {
                    warn!("Remote responder failed, using local fallback: {}", e);
                    self.degraded(query, &e)
                }
            },
        };

        if UrgencyAnnotator::is_urgent(query) {
            info!("Crisis keyword detected, adding urgent banner");
        }
        result.answer = UrgencyAnnotator::annotate(query, &result.answer);

        result
    }

    /// Check the remote backend with the given credential
    pub async fn test_connection(
        &self,
        credential: Option<&Credential>,
    ) -> std::result::Result<String, RemoteError> {
        let credential = credential.ok_or(RemoteError::MissingCredential)?;

        match self.remote.probe(credential).await {
            Ok(reply) => {
                info!("Remote connection OK");
                Ok(reply)
            }
            Err(e) => {
                warn!("Remote connection failed: {}", e);
                Err(e)
            }
        }
    }

    async fn ask_remote(
        &self,
        query: &str,
        credential: Option<&Credential>,
    ) -> std::result::Result<ResponseResult, RemoteError> {
        let credential = credential.ok_or(RemoteError::MissingCredential)?;
        let mut result = self.remote.respond(query, credential).await?;
        // the label reflects who answered, whatever the strategy returned
        result.mode = ModeLabel::AiMode;
        Ok(result)
    }

    fn degraded(&self, query: &str, error: &RemoteError) -> ResponseResult {
        let fallback = self.local.respond(query);
        ResponseResult::new(
            format!("{}\n\n(Note: AI failed: {})", fallback.answer, error),
            ModeLabel::AiError,
        )
    }
}
