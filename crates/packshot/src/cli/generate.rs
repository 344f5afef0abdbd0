//! `generate` command handler.

use super::{GenerateArgs, write_images};
use crate::AppConfig;
use packshot_models::GeminiClient;
use packshot_pipeline::Pipeline;
use packshot_rate_limit::{RateLimiter, RetryingDriver};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one generation job end to end.
///
/// Fails when the request is invalid, the provider cannot be configured, or
/// not a single image was produced.
#[tracing::instrument(skip_all, fields(pack_size = args.pack_size, out = %args.out.display()))]
pub async fn handle_generate_command(args: &GenerateArgs) -> anyhow::Result<()> {
    let request = args.to_request()?;
    let config = AppConfig::load(args.config.as_deref())?;

    let client = GeminiClient::from_env()?;
    let limiter = Arc::new(RateLimiter::new(config.rate_limit()));
    let driver = RetryingDriver::new(client, config.retry().clone()).with_limiter(limiter);
    let pipeline = Pipeline::new(Arc::new(driver), config.pipeline().clone());

    let result = pipeline.run(&request).await?;
    if result.is_empty() {
        anyhow::bail!(
            "generation failed: none of the {} requested images could be produced",
            result.requested()
        );
    }
    if result.is_partial() {
        warn!(
            produced = result.len(),
            requested = %result.requested(),
            "Partial batch"
        );
    }

    let written = write_images(&args.out, result.images())?;
    let billable = config.pipeline().billing().billable_units(&result);
    info!(written = written.len(), billable, "Images saved");

    println!(
        "{} of {} images written to {}",
        result.len(),
        result.requested(),
        args.out.display()
    );
    println!("billable units: {}", billable);
    Ok(())
}
