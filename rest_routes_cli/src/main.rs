mod call;
mod output;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rest_routes::{ExpectedSet, HttpCode, RequestOptions, RestClient};
use serde_json::Value;

use crate::call::Call;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "rest-routes")]
#[command(about = "Send one HTTP request and report how its response was classified")]
struct Cli {
    /// Base URL of the API
    #[arg(long, env = "REST_ROUTES_BASE_URL", global = true, default_value = "http://localhost:3000")]
    base_url: String,

    /// Client name, sent as the User-Agent
    #[arg(long, env = "REST_ROUTES_CLIENT_NAME", global = true, default_value = "rest-routes")]
    name: String,

    /// Bearer token
    #[arg(long, env = "REST_ROUTES_BEARER_TOKEN", global = true, hide_env_values = true)]
    bearer: Option<String>,

    /// Basic auth username
    #[arg(long, env = "REST_ROUTES_USERNAME", global = true, requires = "password")]
    user: Option<String>,

    /// Basic auth password
    #[arg(long, env = "REST_ROUTES_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Status code to treat as an expected error (repeatable)
    #[arg(long = "expect", global = true, value_parser = parse_status)]
    expected: Vec<HttpCode>,

    /// Extra request header as NAME:VALUE (repeatable)
    #[arg(long = "header", global = true, value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Query parameter as NAME=VALUE (repeatable)
    #[arg(long = "query", global = true, value_parser = parse_query)]
    query: Vec<(String, String)>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a resource
    Get { path: String },
    /// POST a JSON body
    Create {
        path: String,
        #[arg(long, value_parser = parse_json)]
        body: Value,
    },
    /// PATCH a JSON body
    Update {
        path: String,
        #[arg(long, value_parser = parse_json)]
        body: Value,
    },
    /// DELETE a resource
    Delete { path: String },
}

fn parse_status(s: &str) -> Result<HttpCode, String> {
    let raw: u16 = s.parse().map_err(|_| format!("{} is not a number", s))?;
    HttpCode::try_from(raw).map_err(|e| e.to_string())
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("header {} must look like NAME:VALUE", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_query(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("query {} must look like NAME=VALUE", s))?;
    Ok((name.to_string(), value.to_string()))
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("body is not valid JSON: {}", e))
}

impl Cli {
    fn client(&self) -> Result<RestClient> {
        let mut client = RestClient::new(&self.name, &self.base_url)
            .with_context(|| format!("cannot build a client for {}", self.base_url))?;
        if let Some(token) = &self.bearer {
            client = client.set_bearer_credential(token)?;
        }
        if let (Some(user), Some(password)) = (&self.user, &self.password) {
            client = client.set_basic_auth_credential(user, password)?;
        }
        Ok(client)
    }

    fn options(&self) -> RequestOptions {
        let mut options = RequestOptions::default();
        for (name, value) in &self.headers {
            options = options.with_header(name, value);
        }
        for (name, value) in &self.query {
            options = options.with_query(name, value);
        }
        if let Some(secs) = self.timeout {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        options
    }

    fn call(&self) -> Call<'_> {
        match &self.command {
            Commands::Get { path } => Call::Get { path },
            Commands::Create { path, body } => Call::Create { path, body },
            Commands::Update { path, body } => Call::Update { path, body },
            Commands::Delete { path } => Call::Delete { path },
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rest_routes=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let client = cli.client()?;
    let expected = ExpectedSet::new(cli.expected.iter().copied());
    let result = call::run(&client, cli.call(), &expected, &cli.options()).await;

    match &result {
        Ok(report) => output::print_report(report, &format),
        Err(e) => eprintln!("Error: {:#}", e),
    }
    Ok(ExitCode::from(call::exit_code(&result)))
}
