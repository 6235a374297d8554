use rst_common::with_logging::log::{debug, info, warn};

use crate::agent::admin::response::field_str;
use crate::agent::admin::types::{AdminAPI, AdminRequest};

use super::types::{Delay, MediationError, MediationRequestID, PollConfig, STATE_GRANTED};

/// `GrantPoller` waits for a mediation request to be granted
///
/// Every attempt sleeps first and then fetches the request record, so a budget of
/// `n` means `n` sleeps and at most `n` fetches. Only the `granted` label ends the
/// loop early, any other label (including `denied`) uses up an attempt.
#[derive(Clone)]
pub struct GrantPoller<TAdmin, TDelay>
where
    TAdmin: AdminAPI,
    TDelay: Delay,
{
    admin: TAdmin,
    delay: TDelay,
    config: PollConfig,
}

impl<TAdmin, TDelay> GrantPoller<TAdmin, TDelay>
where
    TAdmin: AdminAPI,
    TDelay: Delay,
{
    pub fn new(admin: TAdmin, delay: TDelay, config: PollConfig) -> Self {
        Self {
            admin,
            delay,
            config,
        }
    }

    pub fn config(&self) -> PollConfig {
        self.config
    }

    /// `poll` returns the granted state label or [`MediationError::MediationTimeout`]
    ///
    /// Admin errors are returned right away without using the rest of the budget
    pub async fn poll(&self, request_id: &MediationRequestID) -> Result<String, MediationError> {
        for attempt in 1..=self.config.attempts {
            self.delay.sleep(self.config.delay).await;

            let response = self
                .admin
                .send(AdminRequest::get(format!(
                    "/mediation/requests/{}",
                    request_id
                )))
                .await?;

            let state = field_str(&response, "state").unwrap_or_default();
            debug!(
                "[mediation:poll] {request_id} attempt {attempt}/{}: {state}",
                self.config.attempts
            );

            if state == STATE_GRANTED {
                info!("[mediation:poll] {request_id} granted");
                return Ok(state);
            }
        }

        warn!(
            "[mediation:poll] {request_id} not granted after {} attempts",
            self.config.attempts
        );

        Err(MediationError::MediationTimeout {
            request_id: request_id.clone(),
            attempts: self.config.attempts,
        })
    }
}
