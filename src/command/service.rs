use anyhow::{Context as _, Result};
use osaas_client::{get_service, Context};

pub async fn run_service(ctx: &Context, service_id: &str) -> Result<()> {
    let service = get_service(ctx, service_id)
        .await
        .with_context(|| format!("Failed to look up service {}", service_id))?;

    println!("{}", serde_json::to_string_pretty(&service)?);
    Ok(())
}

pub async fn run_activate(ctx: &Context, service_id: &str) -> Result<()> {
    ctx.activate_service(service_id)
        .await
        .with_context(|| format!("Failed to activate service {}", service_id))?;

    println!("✅ Service {} is active", service_id);
    Ok(())
}

pub async fn run_token(ctx: &Context, service_id: &str) -> Result<()> {
    let token = ctx
        .issue_service_token(service_id)
        .await
        .with_context(|| format!("Failed to get a token for service {}", service_id))?;

    if let Some(expires_at) = token.expires_at() {
        eprintln!("Token expires at {}", expires_at.to_rfc3339());
    }
    println!("{}", token.token);
    Ok(())
}
