//! Blocking HTTP implementations of the gateway traits
//!
//! Thin reqwest wrappers: POST a JSON body with a bearer header, check the
//! status, deserialize the JSON answer. Non-2xx responses are surfaced as
//! [`TellerError::Gateway`] with the body text attached.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{TellerError, TellerResult};
use crate::models::{
    AuthRequest, AuthResponse, FundTransferRequest, InquiryRequest, InquiryResponse,
    PaymentVaRequest, ResponseStatus,
};

use super::{ExternalGateway, InternalGateway};

fn post_json<B, R>(
    client: &reqwest::blocking::Client,
    url: &str,
    body: &B,
    token: Option<&str>,
) -> TellerResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let mut request = client.post(url).json(body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send()?;
    let status = response.status();

    if !status.is_success() {
        let message = response.text().unwrap_or_default();
        tracing::warn!(url, status = status.as_u16(), "gateway call failed");
        return Err(TellerError::gateway(status.as_u16(), message));
    }

    response.json().map_err(TellerError::from)
}

/// External payment gateway over HTTP
pub struct HttpExternalGateway {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl HttpExternalGateway {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: settings.external_base_url.trim_end_matches('/').to_string(),
            api_key: settings.external_api_key.clone(),
            api_secret: settings.external_api_secret.clone(),
        }
    }
}

impl ExternalGateway for HttpExternalGateway {
    fn authenticate(&self) -> TellerResult<String> {
        let body = AuthRequest {
            username: self.api_key.clone(),
            password: self.api_secret.clone(),
        };
        let response: AuthResponse =
            post_json(&self.client, &format!("{}/auth", self.base_url), &body, None)?;
        Ok(response.token)
    }

    fn inquiry(&self, request: &InquiryRequest, token: &str) -> TellerResult<InquiryResponse> {
        post_json(
            &self.client,
            &format!("{}/external/inquiryVA", self.base_url),
            request,
            Some(token),
        )
    }

    fn payment_va(
        &self,
        request: &PaymentVaRequest,
        token: &str,
    ) -> TellerResult<InquiryResponse> {
        post_json(
            &self.client,
            &format!("{}/external/paymentVA", self.base_url),
            request,
            Some(token),
        )
    }
}

/// Internal ledger gateway over HTTP
pub struct HttpInternalGateway {
    client: reqwest::blocking::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpInternalGateway {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: settings.internal_base_url.trim_end_matches('/').to_string(),
            username: settings.internal_username.clone(),
            password: settings.internal_password.clone(),
        }
    }
}

impl InternalGateway for HttpInternalGateway {
    fn authenticate(&self) -> TellerResult<String> {
        let body = AuthRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };
        let response: AuthResponse =
            post_json(&self.client, &format!("{}/auth", self.base_url), &body, None)?;
        Ok(response.token)
    }

    fn fund_transfer(
        &self,
        request: &FundTransferRequest,
        token: &str,
    ) -> TellerResult<ResponseStatus> {
        post_json(
            &self.client,
            &format!("{}/fundtransfer", self.base_url),
            request,
            Some(token),
        )
    }

    fn balance(&self, account: &str, token: &str) -> TellerResult<ResponseStatus> {
        post_json(
            &self.client,
            &format!("{}/balance", self.base_url),
            &serde_json::json!({ "account": account }),
            Some(token),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let mut settings = Settings::default();
        settings.external_base_url = "http://gw.example.test/".to_string();
        settings.internal_base_url = "http://ledger.example.test///".to_string();

        let external = HttpExternalGateway::new(&settings);
        assert_eq!(external.base_url, "http://gw.example.test");

        let internal = HttpInternalGateway::new(&settings);
        assert_eq!(internal.base_url, "http://ledger.example.test");
    }
}
