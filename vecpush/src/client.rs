//! The one-shot run: build the payload, connect, write, close.

use tracing::{debug, info};
use vecpush_core::{Payload, SendReport, UniformSource, VecpushError};

use crate::config::ClientConfig;

/// What [`run`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The payload was delivered and the connection closed.
    Sent(SendReport),
    /// `dry_run` was set; nothing left the process.
    Built { encoded_len: usize },
}

/// Draw the configured number of samples and wrap them with the tag.
pub fn build(config: &ClientConfig) -> Result<Payload, VecpushError> {
    let mut source = UniformSource::from_seed_option(config.payload.seed);
    let payload = Payload::generate(config.payload.tag, config.payload.count, &mut source)?;
    debug!(
        tag = payload.tag(),
        samples = payload.len(),
        digest = %payload.digest(),
        "payload built"
    );
    Ok(payload)
}

/// Execute build → connect → write → close once.
pub async fn run(config: &ClientConfig, dry_run: bool) -> Result<RunOutcome, VecpushError> {
    config.validate()?;

    let payload = build(config)?;
    let encoded_len = payload.encoded_len();
    info!(
        "payload: tag {}, {} samples, {encoded_len} bytes",
        payload.tag(),
        payload.len()
    );

    if dry_run {
        info!("dry run; not connecting");
        return Ok(RunOutcome::Built { encoded_len });
    }

    let info = config.connection_info();
    let report = vecpush_core::send(&payload, &info).await?;
    Ok(RunOutcome::Sent(report))
}
