use std::fmt::{self, Display};
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::cli::{Config, Timeout};
use crate::error::{RequestError, Result};

use super::request::RequestPlan;
use super::response::{HttpResult, ResponseBody, collect_headers, timestamp_now};

/// Where a single exchange has got to.
///
/// `Connecting` spans connect, writing the request and waiting for the
/// status line: reqwest drives all three inside one `send` future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Connecting,
    ReceivingBody,
    Complete,
    Failed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Connecting => "connecting",
            Phase::ReceivingBody => "receiving body",
            Phase::Complete => "complete",
            Phase::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug)]
struct Exchange {
    phase: Phase,
}

impl Exchange {
    fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    fn enter(&mut self, next: Phase) {
        debug!("{} -> {}", self.phase, next);
        self.phase = next;
    }
}

/// Send the configured request once and wait for the whole response.
///
/// The timeout bounds the entire exchange. When it fires the request future
/// is dropped, which closes the connection.
pub async fn execute(config: &Config) -> Result<HttpResult> {
    let plan = RequestPlan::from_config(config)?;
    let client = build_client()?;
    let mut exchange = Exchange::new();

    debug!(method = %plan.method, url = %plan.url, timeout = %config.timeout, "sending request");

    let outcome = match config.timeout {
        Timeout::Millis(millis) => {
            let limit = Duration::from_millis(millis);
            let timed = tokio::time::timeout(limit, perform(&client, plan, &mut exchange)).await;
            match timed {
                Ok(outcome) => outcome,
                Err(_) => {
                    debug!("deadline of {millis}ms expired while {}", exchange.phase);
                    Err(RequestError::Timeout { millis })
                }
            }
        }
        Timeout::Unbounded => perform(&client, plan, &mut exchange).await,
    };

    match &outcome {
        Ok(_) => exchange.enter(Phase::Complete),
        Err(err) => {
            exchange.enter(Phase::Failed);
            debug!("request failed: {err}");
        }
    }

    outcome
}

async fn perform(client: &Client, plan: RequestPlan, exchange: &mut Exchange) -> Result<HttpResult> {
    let mut request = client.request(plan.method, plan.url).headers(plan.headers);
    if let Some(body) = plan.body {
        request = request.body(body);
    }

    exchange.enter(Phase::Connecting);
    let response = request.send().await?;

    exchange.enter(Phase::ReceivingBody);
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    let bytes = response.bytes().await?;

    Ok(HttpResult {
        status,
        headers,
        body: ResponseBody::from_bytes(&bytes),
        timestamp: timestamp_now(),
    })
}

/// One-shot client: no redirects, no pooled connections, no proxy lookup.
fn build_client() -> Result<Client> {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .http1_title_case_headers()
        .build()
        .map_err(|err| RequestError::Transport(format!("Failed to build HTTP client: {err}")))
}
