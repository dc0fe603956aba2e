use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use site_proxy::auth::gate::APP_PASSWORD_HEADER;

#[derive(Parser)]
#[command(name = "sites-cli")]
#[command(about = "Command-line client for the site management proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Shared secret for protected function deployments.
    #[arg(short, long, env = "APP_PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sites, most recently updated first
    List,
    /// Delete a site by identifier
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(password) = &cli.password {
        headers.insert(APP_PASSWORD_HEADER, HeaderValue::from_str(password)?);
    }

    let res = match cli.command {
        Commands::List => {
            client.get(sites_url(&cli.url, None)?)
                .headers(headers)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client.delete(sites_url(&cli.url, Some(&id))?)
                .headers(headers)
                .send()
                .await?
        }
    };
    print_response(res).await
}

/// `{base}/api/sites[/{id}]`, with the id encoded as a single path segment.
fn sites_url(base: &str, id: Option<&str>) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| format!("cannot use {} as a base URL", base))?
        .pop_if_empty()
        .extend(["api", "sites"])
        .extend(id);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = json
            .get("error")
            .or_else(|| json.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("no details");
        eprintln!("Error: proxy returned status {}: {}", status, message);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
