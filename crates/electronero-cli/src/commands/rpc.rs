//! `electronero wallet|daemon|call`: issue one RPC call and print the result.

use std::io::Write;

use serde_json::Value;

use super::{build_client, parse_id, parse_params};
use crate::ConnectionArgs;

/// Run the `wallet` subcommand.
pub async fn wallet(
    args: &ConnectionArgs,
    method: String,
    params: Option<String>,
    id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(args)?;
    let params = parse_params(params.as_deref())?;
    let result = match id {
        Some(id) => client.wallet_with_id(parse_id(&id), &method, params).await?,
        None => client.wallet(&method, params).await?,
    };
    print_json(&result)
}

/// Run the `daemon` subcommand.
pub async fn daemon(
    args: &ConnectionArgs,
    method: String,
    params: Option<String>,
    id: Option<String>,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(args)?;
    let params = parse_params(params.as_deref())?;

    if raw {
        if !method.starts_with('/') {
            return Err("--raw only applies to daemon paths such as /get_blocks.bin".into());
        }
        let body = client.daemon_bytes(&method, params).await?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&body)?;
        stdout.flush()?;
        return Ok(());
    }

    let result = match id {
        Some(id) => client.daemon_with_id(parse_id(&id), &method, params).await?,
        None => client.daemon(&method, params).await?,
    };
    print_json(&result)
}

/// Run the `call` subcommand.
pub async fn call(
    args: &ConnectionArgs,
    name: String,
    params: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(args)?;
    let params = parse_params(params.as_deref())?;
    let result = client.call(&name, params).await?;
    print_json(&result)
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
