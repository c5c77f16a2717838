use anyhow::{Context, Result};
use std::process::Command;

/// Execute a gh CLI command and return stdout.
/// Uses spawn_blocking to avoid blocking the tokio runtime. The credential
/// is handed to gh through the GH_TOKEN child environment variable and never
/// appears on the command line.
pub async fn gh_command(token: &str, args: &[&str]) -> Result<String> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let token = token.to_string();

    tokio::task::spawn_blocking(move || {
        let output = Command::new("gh")
            .args(&args)
            .env("GH_TOKEN", &token)
            .output()
            .context("Failed to execute gh CLI - is it installed?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh command failed: {}", stderr.trim());
        }

        String::from_utf8(output.stdout).context("gh output contains invalid UTF-8")
    })
    .await
    .context("spawn_blocking task panicked")?
}

/// Field type for gh api command
pub enum FieldValue<'a> {
    /// String field (-f)
    String(&'a str),
    /// Raw/typed field (-F) - for integers, booleans, null
    Raw(&'a str),
}

fn push_fields(args: &mut Vec<String>, fields: &[(&str, FieldValue<'_>)]) {
    for (key, value) in fields {
        match value {
            FieldValue::String(v) => {
                args.push("-f".to_string());
                args.push(format!("{}={}", key, v));
            }
            FieldValue::Raw(v) => {
                args.push("-F".to_string());
                args.push(format!("{}={}", key, v));
            }
        }
    }
}

/// Execute a GraphQL query or mutation through `gh api graphql`, with
/// `fields` bound as query variables.
pub async fn gh_graphql(
    token: &str,
    document: &str,
    fields: &[(&str, FieldValue<'_>)],
) -> Result<serde_json::Value> {
    let mut args = vec![
        "api".to_string(),
        "graphql".to_string(),
        "-f".to_string(),
        format!("query={}", document),
    ];
    push_fields(&mut args, fields);
    let args_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let output = gh_command(token, &args_refs).await?;
    serde_json::from_str(&output).context("Failed to parse gh graphql response as JSON")
}

/// Execute a REST POST through `gh api --method POST`.
pub async fn gh_api_post(
    token: &str,
    endpoint: &str,
    fields: &[(&str, FieldValue<'_>)],
) -> Result<serde_json::Value> {
    let mut args = vec![
        "api".to_string(),
        "--method".to_string(),
        "POST".to_string(),
        endpoint.to_string(),
    ];
    push_fields(&mut args, fields);
    let args_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let output = gh_command(token, &args_refs).await?;
    serde_json::from_str(&output).context("Failed to parse gh api response as JSON")
}
