//! Service-account access tokens for the Google Indexing API.
//!
//! The flow is the OAuth 2.0 JWT bearer grant:
//!
//! 1. Load the service-account JSON key file.
//! 2. Build a JWT with the indexing scope, valid for one hour, and sign it
//!    with the account's RSA key (RS256).
//! 3. POST it to the account's token endpoint as a form and read back
//!    `access_token`.
//!
//! Tokens are minted per run and never cached.

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::Utc;
use ring::rand::SystemRandom;
use ring::signature::{RSA_PKCS1_SHA256, RsaKeyPair};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::notifier::Notifier;
use crate::{Error, Result};

/// Token endpoint used when the credential file does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth scope for the Indexing API.
pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

/// Grant type for the JWT bearer flow.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion validity in seconds.
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The parts of a service-account key file needed to mint tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccountCredential {
    /// Service account identity, used as the JWT issuer
    pub client_email: String,
    /// PKCS#8 PEM private key
    pub private_key: String,
    /// Token endpoint, used as the JWT audience
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredential")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountCredential {
    /// Read and validate a service-account key file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Credential(format!("failed to read {}: {e}", path.display()))
        })?;
        debug!("Loaded service account file {}", path.display());
        Self::from_json(&content)
    }

    /// Parse the JSON content of a service-account key file.
    ///
    /// `client_email` and `private_key` must be strings; `token_uri` falls
    /// back to [`DEFAULT_TOKEN_URI`].
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| Error::Credential(format!("file is not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(Error::Credential("expected a JSON object".to_string()));
        }

        Ok(Self {
            client_email: required_string(&value, "client_email")?,
            private_key: required_string(&value, "private_key")?,
            token_uri: value
                .get("token_uri")
                .and_then(Value::as_str)
                .filter(|uri| !uri.trim().is_empty())
                .unwrap_or(DEFAULT_TOKEN_URI)
                .to_string(),
        })
    }
}

fn required_string(value: &Value, field: &str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Credential(format!("missing or invalid field `{field}`")))
}

/// Short-lived bearer token.
///
/// The secret is kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// The bearer string to send in `Authorization` headers.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Serialize)]
struct JwtHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Build the signed `header.claims.signature` assertion.
pub fn build_assertion(credential: &ServiceAccountCredential, issued_at: i64) -> Result<String> {
    let header = JwtHeader {
        alg: "RS256",
        typ: "JWT",
    };
    let claims = JwtClaims {
        iss: &credential.client_email,
        scope: INDEXING_SCOPE,
        aud: &credential.token_uri,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
    );

    let key_pair = load_key_pair(&credential.private_key)?;
    let mut signature = vec![0; key_pair.public().modulus_len()];
    key_pair
        .sign(
            &RSA_PKCS1_SHA256,
            &SystemRandom::new(),
            signing_input.as_bytes(),
            &mut signature,
        )
        .map_err(|_| Error::Signing("RSA signing failed".to_string()))?;

    Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

fn load_key_pair(pem: &str) -> Result<RsaKeyPair> {
    let der = decode_pem(pem)?;
    RsaKeyPair::from_pkcs8(&der)
        .map_err(|e| Error::Signing(format!("private key rejected: {e}")))
}

/// Decode a PEM block into DER bytes.
///
/// Accepts literal `\n` escapes, which show up when keys pass through
/// environment variables.
fn decode_pem(pem: &str) -> Result<Vec<u8>> {
    let pem = pem.replace("\\n", "\n");
    let body: String = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect();

    if body.is_empty() {
        return Err(Error::Signing("private key PEM is empty".to_string()));
    }
    STANDARD
        .decode(body)
        .map_err(|e| Error::Signing(format!("private key is not valid PEM: {e}")))
}

/// Exchange a signed assertion for an access token.
pub async fn fetch_access_token(
    notifier: &Notifier,
    credential: &ServiceAccountCredential,
) -> Result<AccessToken> {
    let assertion = build_assertion(credential, Utc::now().timestamp())?;

    debug!("Requesting access token from {}", credential.token_uri);
    let response = notifier
        .client()
        .post(&credential.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(Error::TokenExchange {
            status: status.as_u16(),
            body,
        });
    }

    let token = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("access_token")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .ok_or_else(|| Error::TokenExchange {
            status: status.as_u16(),
            body: format!("response has no access_token: {body}"),
        })?;

    info!("Obtained access token for {}", credential.client_email);
    Ok(AccessToken(token))
}

/// Load the credential at `path` and mint one access token.
pub async fn issue_token(notifier: &Notifier, path: &Path) -> Result<AccessToken> {
    let credential = ServiceAccountCredential::load(path).await?;
    fetch_access_token(notifier, &credential).await
}
