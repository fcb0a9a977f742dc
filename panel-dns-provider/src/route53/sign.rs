//! AWS Signature Version 4 (`AWS4-HMAC-SHA256`)
//!
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{Route53Client, SERVICE};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Headers produced by [`Route53Client::sign`].
#[derive(Debug, Clone)]
pub(crate) struct SignedHeaders {
    /// `Authorization`
    pub authorization: String,
    /// `X-Amz-Date` (`20240115T080000Z`)
    pub amz_date: String,
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| ProviderError::InvalidParameter {
        param: "secret".to_string(),
        detail: e.to_string(),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// RFC 3986 encoding of every path segment, `/` kept.
pub(crate) fn canonical_uri(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Sorted, RFC 3986 encoded `k=v&k=v`.
pub(crate) fn canonical_query(params: &[(&str, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();
    encoded
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

impl Route53Client {
    /// Sign one request. `query` must already be canonical (see [`canonical_query`]).
    pub(crate) fn sign(
        &self,
        method: &str,
        path: &str,
        query: &str,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        // 1. Canonical request
        let mut canonical_headers = format!("host:{}\nx-amz-date:{amz_date}\n", self.host);
        let mut signed_headers = String::from("host;x-amz-date");
        if let Some(token) = &self.credentials.token {
            canonical_headers.push_str(&format!("x-amz-security-token:{}\n", token.trim()));
            signed_headers.push_str(";x-amz-security-token");
        }
        let hashed_payload = hex::encode(Sha256::digest(payload.as_bytes()));
        let canonical_request = format!(
            "{method}\n{}\n{query}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}",
            canonical_uri(path)
        );

        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        // 2. String to sign
        let credential_scope = format!("{date}/{}/{SERVICE}/aws4_request", self.signing_region);
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign =
            format!("{ALGORITHM}\n{amz_date}\n{credential_scope}\n{hashed_canonical_request}");

        // 3. Signing key and signature
        let secret_date = hmac_sha256(
            format!("AWS4{}", self.credentials.secret).as_bytes(),
            date.as_bytes(),
        )?;
        let secret_region = hmac_sha256(&secret_date, self.signing_region.as_bytes())?;
        let secret_service = hmac_sha256(&secret_region, SERVICE.as_bytes())?;
        let secret_signing = hmac_sha256(&secret_service, b"aws4_request")?;
        let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes())?);

        // 4. Authorization
        Ok(SignedHeaders {
            authorization: format!(
                "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
                self.credentials.key
            ),
            amz_date,
        })
    }
}
