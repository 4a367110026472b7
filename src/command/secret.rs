use anyhow::{Context as _, Result};
use osaas_client::{instance, Context};

pub async fn run_secret(
    ctx: &Context,
    service_id: &str,
    secret_name: &str,
    secret_value: &str,
) -> Result<()> {
    instance::add_service_secret(ctx, service_id, secret_name, secret_value)
        .await
        .with_context(|| format!("Failed to store secret {} for {}", secret_name, service_id))?;

    println!("✅ Secret {} stored for {}", secret_name, service_id);
    Ok(())
}
