//! Smoke flows against a live session
//!
//! A flow drives the page objects end to end and reports one summary line.
//! The session is torn down whether the flow passes or not.

use crate::commands::SmokeFlow;
use crate::error::{CliError, CliResult};
use bankprobe::pages::{LocationPage, LoginPage};
use bankprobe::{Credentials, ProbeConfig, Session, TracingSink};

/// Start a session from `config`, run `flow`, quit
pub fn execute_smoke(config: &ProbeConfig, flow: SmokeFlow) -> CliResult<String> {
    let session = Session::start(config, TracingSink::shared())?;
    tracing::info!(session = %session.id(), flow = flow.as_str(), "Smoke flow started");

    let outcome = run_flow(&session, flow, config);
    let closed = session.quit();
    let summary = outcome?;
    closed?;
    Ok(summary)
}

/// Run `flow` on an open session
pub fn run_flow(session: &Session, flow: SmokeFlow, config: &ProbeConfig) -> CliResult<String> {
    match flow {
        SmokeFlow::Login => login(session, &config.credentials),
        SmokeFlow::Location => location(session),
    }
}

fn login(session: &Session, credentials: &Credentials) -> CliResult<String> {
    let page = LoginPage::new(session);
    page.login(&credentials.username, &credentials.password)?;
    if page.is_error_displayed()? {
        let message = page
            .error_message()?
            .unwrap_or_else(|| "error banner shown".to_string());
        return Err(CliError::smoke_failed(SmokeFlow::Login.as_str(), message));
    }
    Ok(format!("login: signed in as {}", credentials.username))
}

fn location(session: &Session) -> CliResult<String> {
    let page = LocationPage::new(session);
    page.open_atm_near_me_tab()?;
    page.allow_permission()?;
    page.toggle_gps_checkbox()?;
    page.click_get_location()?;
    let response = page.response_text()?;
    Ok(format!("location: {response}"))
}
