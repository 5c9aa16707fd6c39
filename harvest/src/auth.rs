use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use thiserror::Error;

const HARVEST_USER_AGENT: &str = concat!("harvest-cli/", env!("CARGO_PKG_VERSION"));

/// Personal access token credentials for the Harvest v2 API.
#[derive(Clone)]
pub struct HarvestCredentials {
    pub token: String,
    pub account_id: String,
}

#[derive(Error, Debug)]
pub enum IntoCredentialsError {
    #[error("Missing Harvest token")]
    MissingToken,
    #[error("Missing Harvest account id")]
    MissingAccountId,
    #[error("Credentials contain characters not allowed in a header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl std::fmt::Debug for HarvestCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestCredentials")
            .field("token", &"<redacted>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

impl HarvestCredentials {
    pub fn new(
        token: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Result<Self, IntoCredentialsError> {
        let token = token.into();
        let account_id = account_id.into();

        if token.trim().is_empty() {
            return Err(IntoCredentialsError::MissingToken);
        }
        if account_id.trim().is_empty() {
            return Err(IntoCredentialsError::MissingAccountId);
        }

        Ok(Self { token, account_id })
    }

    /// Headers every Harvest request must carry.
    pub fn as_headers(&self) -> Result<HeaderMap, IntoCredentialsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))?,
        );
        headers.insert("Harvest-Account-Id", HeaderValue::from_str(&self.account_id)?);
        headers.insert(USER_AGENT, HeaderValue::from_static(HARVEST_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
