//! Command-line front end for the request interceptor.
//!
//! Reads one payload, runs it through the interceptor pipeline with an echo
//! handler and prints the enriched request.
//!
//! ```text
//! request-interceptor --config interceptor.toml --handler orders.get payload.txt
//! cat call.json | request-interceptor --handler orders.get --json
//! ```

use clap::Parser;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tower::{service_fn, BoxError, ServiceBuilder, ServiceExt};

use request_interceptor::config::{load_config, InterceptorConfig};
use request_interceptor::observability::logging;
use request_interceptor::{ParsedRequest, RequestInterceptor, RequestParseLayer, RpcCall};

#[derive(Parser)]
#[command(name = "request-interceptor")]
#[command(about = "Parse an encoded request payload and print the enriched request", long_about = None)]
struct Cli {
    /// TOML configuration with route patterns
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Handler identity used for the route pattern lookup
    #[arg(long)]
    handler: String,

    /// Materialize the files list (overrides the config)
    #[arg(long)]
    with_files: bool,

    /// Read the input as the JSON value delivered by the transport instead
    /// of as the raw payload string
    #[arg(long)]
    json: bool,

    /// Payload file; stdin when omitted
    payload: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => InterceptorConfig::default(),
    };
    if cli.with_files {
        config.with_files = true;
    }

    logging::init(&config.observability.log_level)?;

    tracing::info!(
        routes = config.routes.len(),
        with_files = config.with_files,
        "Configuration loaded"
    );

    let input = read_input(cli.payload.as_deref())?;
    let data = if cli.json {
        serde_json::from_str(&input)?
    } else {
        Value::String(input)
    };

    let interceptor = RequestInterceptor::from_config(&config)?;
    let service = ServiceBuilder::new()
        .layer(RequestParseLayer::new(interceptor))
        .service(service_fn(echo));

    let output = service.oneshot(RpcCall::new(cli.handler, data)).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn echo(call: RpcCall<ParsedRequest>) -> Result<Value, BoxError> {
    let request = call.data;
    let mut output = serde_json::to_value(&request)?;

    if let (Some(body), Value::Object(map)) = (request.field_value("body"), &mut output) {
        map.insert("body".to_string(), body?);
    }

    Ok(json!({ "handler": call.handler, "request": output }))
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
