use anyhow::{Context as _, Result};
use osaas_client::{instance, Context, Instance};
use serde_json::Value;

/// Instance body from the CLI name and `key=value` options.
fn build_instance_body(name: &str, options: Vec<(String, String)>) -> Instance {
    let mut body = Instance::new();
    body.insert("name".to_string(), Value::String(name.to_string()));
    for (key, value) in options {
        body.insert(key, Value::String(value));
    }
    body
}

async fn service_token(ctx: &Context, service_id: &str) -> Result<String> {
    ctx.service_access_token(service_id)
        .await
        .with_context(|| format!("Failed to get a token for service {}", service_id))
}

pub async fn run_create(
    ctx: &Context,
    service_id: &str,
    name: &str,
    options: Vec<(String, String)>,
) -> Result<()> {
    let token = service_token(ctx, service_id).await?;
    let body = build_instance_body(name, options);

    let created = instance::create_instance(ctx, service_id, &token, &body)
        .await
        .with_context(|| format!("Failed to create instance {} of {}", name, service_id))?;

    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

pub async fn run_list(ctx: &Context, service_id: &str) -> Result<()> {
    let token = service_token(ctx, service_id).await?;

    let instances = instance::list_instances(ctx, service_id, &token)
        .await
        .with_context(|| format!("Failed to list instances of {}", service_id))?;

    for item in &instances {
        match item.get("name").and_then(Value::as_str) {
            Some(name) => println!("{}", name),
            None => println!("{}", serde_json::to_string(item)?),
        }
    }
    Ok(())
}

pub async fn run_describe(ctx: &Context, service_id: &str, name: &str) -> Result<()> {
    let token = service_token(ctx, service_id).await?;

    let found = instance::get_instance(ctx, service_id, name, &token)
        .await
        .with_context(|| format!("Failed to get instance {} of {}", name, service_id))?;

    match found {
        Some(found) => println!("{}", serde_json::to_string_pretty(&found)?),
        None => anyhow::bail!("Instance {} of {} not found", name, service_id),
    }
    Ok(())
}

pub async fn run_remove(ctx: &Context, service_id: &str, name: &str) -> Result<()> {
    let token = service_token(ctx, service_id).await?;

    instance::remove_instance(ctx, service_id, name, &token)
        .await
        .with_context(|| format!("Failed to remove instance {} of {}", name, service_id))?;

    println!("✅ Removed {}", name);
    Ok(())
}

pub async fn run_ports(ctx: &Context, service_id: &str, name: &str) -> Result<()> {
    let token = service_token(ctx, service_id).await?;

    let ports = instance::get_ports(ctx, service_id, name, &token)
        .await
        .with_context(|| format!("Failed to get ports of {}", name))?;

    for port in &ports {
        println!(
            "{}:{} -> {}",
            port.external_ip, port.external_port, port.internal_port
        );
    }
    Ok(())
}

pub async fn run_logs(ctx: &Context, service_id: &str, name: &str) -> Result<()> {
    let token = service_token(ctx, service_id).await?;

    let logs = instance::get_logs(ctx, service_id, name, &token)
        .await
        .with_context(|| format!("Failed to get logs of {}", name))?;

    for line in &logs {
        println!("{}", line);
    }
    Ok(())
}
