//! Site management proxy: function profile.
//!
//! Reads one platform event as JSON on stdin, writes the platform response as
//! JSON on stdout. Logs go to stderr.
//!
//! Environment:
//! - `NETLIFY_API_TOKEN`: upstream token (required for API calls)
//! - `APP_PASSWORD`: optional shared secret checked against `x-app-password`
//! - `SITE_PROXY_UPSTREAM_URL`: optional upstream base URL override

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use site_proxy::function::{FunctionEvent, FunctionHandler, FunctionResponse, FunctionSettings};
use site_proxy::observability::logging;
use site_proxy::RelayResponse;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("site_proxy=warn");

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let response = match serde_json::from_str::<FunctionEvent>(&input) {
        Ok(event) => match FunctionHandler::from_settings(FunctionSettings::from_env()) {
            Ok(handler) => handler.handle(&event).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize relay");
                FunctionResponse::from(RelayResponse::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e.to_string(),
                ))
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Invalid function event");
            FunctionResponse::from(RelayResponse::error(
                StatusCode::BAD_REQUEST,
                format!("Invalid event: {}", e),
            ))
        }
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(serde_json::to_string(&response)?.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
