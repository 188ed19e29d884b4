//! HTTP client for the one-time-code issuance and verification service.

mod client;
mod error;
mod types;

pub use client::OtpClient;
pub use error::OtpError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_test_client(mock_server: &MockServer) -> OtpClient {
        OtpClient::new(mock_server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_send_code_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/otp"))
            .and(body_json(serde_json::json!({"phone": "09123456789"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let issued = client.send_code("09123456789").await.unwrap();

        assert!(issued.warning.is_none());
        assert!(issued.dev_code.is_none());
    }

    #[tokio::test]
    async fn test_send_code_with_warning_and_dev_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "warning": "SMS dispatch unconfirmed",
                "devCode": "123456"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let issued = client.send_code("09123456789").await.unwrap();

        assert_eq!(issued.warning.as_deref(), Some("SMS dispatch unconfirmed"));
        assert_eq!(issued.dev_code.as_deref(), Some("123456"));
    }

    #[tokio::test]
    async fn test_send_code_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "phone number blocked"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.send_code("09123456789").await;

        assert!(matches!(result, Err(OtpError::IssuanceRejected(ref r)) if r == "phone number blocked"));
    }

    #[tokio::test]
    async fn test_send_code_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/otp"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.send_code("09123456789").await;

        assert!(matches!(result, Err(OtpError::Api(_))));
    }

    #[tokio::test]
    async fn test_verify_code_sends_verify_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/otp"))
            .and(body_json(serde_json::json!({
                "phone": "09123456789",
                "code": "654321",
                "verifyOnly": true
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(client.verify_code("09123456789", "654321").await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_code_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "code expired"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.verify_code("09123456789", "000000").await;

        assert!(matches!(result, Err(OtpError::VerificationFailed(ref r)) if r == "code expired"));
    }
}
