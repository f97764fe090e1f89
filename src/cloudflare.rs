use anyhow::{Context, Result};
use log::info;
use reqwest::Client;
use serde::Serialize;

use crate::config::CloudflareConfig;

#[derive(Debug, Serialize)]
struct PurgeRequest {
    purge_everything: bool,
}

/// Ask Cloudflare to drop everything cached for the configured zone.
///
/// Returns the upstream response body as opaque JSON; deciding whether the
/// purge succeeded is the caller's job.
pub async fn purge_everything(config: &CloudflareConfig) -> Result<serde_json::Value> {
    let client = Client::new();

    let url = format!("{}/zones/{}/purge_cache", config.api_base, config.zone_id);
    info!("Requesting full cache purge for zone {}", config.zone_id);

    let details: serde_json::Value = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", config.api_token))
        .header("Content-Type", "application/json")
        .json(&PurgeRequest {
            purge_everything: true,
        })
        .send()
        .await
        .context("Failed to send purge request to Cloudflare")?
        .json()
        .await
        .context("Failed to parse Cloudflare purge response")?;

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_base: String) -> CloudflareConfig {
        CloudflareConfig {
            zone_id: "abc123456".to_string(),
            api_token: "test-token".to_string(),
            domain: "example.com".to_string(),
            api_base,
        }
    }

    #[tokio::test]
    async fn sends_bearer_auth_and_fixed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/zones/abc123456/purge_cache"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({"purge_everything": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"success": true, "errors": [], "result": {"id": "abc123456"}}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let details = purge_everything(&test_config(server.uri())).await.unwrap();

        assert_eq!(details["success"], serde_json::json!(true));
        assert_eq!(details["result"]["id"], serde_json::json!("abc123456"));
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("gateway timeout"))
            .mount(&server)
            .await;

        let err = purge_everything(&test_config(server.uri()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("parse Cloudflare purge response"));
    }
}
