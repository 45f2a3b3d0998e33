use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::InspectError;
use crate::types::reserved::{
    AUDIENCE, EXPIRATION, IDENTIFIER, ISSUED_AT, ISSUER, NOT_BEFORE, SUBJECT,
};
use crate::types::{reserved, Claims, Output, ReservedClaim};

const LABELS: [(&str, &str); 7] = [
    (ISSUER, "Issuer"),
    (SUBJECT, "Subject"),
    (AUDIENCE, "Audience"),
    (IDENTIFIER, "Identifier"),
    (ISSUED_AT, "IssuedAt"),
    (NOT_BEFORE, "NotBefore"),
    (EXPIRATION, "Expires"),
];

/// Claims for a freshly issued token.
#[derive(Debug, Default, Clone)]
pub struct IssueRequest {
    pub subject: Option<String>,
    pub issuer: Option<String>,
    pub audience: Vec<String>,
    pub identifier: Option<String>,
    pub ttl: Option<i64>,
}

#[derive(Debug, Default)]
pub struct TokenInspector;

impl TokenInspector {
    pub fn new() -> Self {
        TokenInspector
    }

    /// Decodes header and claims of a compact token. With a secret the
    /// signature is checked as well; a bad signature is reported in the
    /// output, not as an error.
    pub fn inspect(&self, token: &str, secret: Option<&str>) -> Result<Output, InspectError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(InspectError::InvalidFormat);
        }

        let header = self.decode_header(parts[0])?;
        let claims = self.decode_claims(parts[1])?;
        debug!(claims = claims.len(), "decoded token payload");

        let verified = secret.map(|secret| match self.verify(token, secret) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "token signature rejected");
                false
            }
        });

        Ok(Self::build_output(header, &claims, verified))
    }

    /// Verifies an HMAC signed token and returns its claims. Time based
    /// claims are not validated here.
    pub fn verify(&self, token: &str, secret: &str) -> Result<Claims, InspectError> {
        let header = jsonwebtoken::decode_header(token)
            .map_err(|e| InspectError::SignatureVerification(e.to_string()))?;
        let algorithm = match header.alg {
            alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => alg,
            other => {
                return Err(InspectError::SignatureVerification(format!(
                    "unsupported algorithm: {:?}",
                    other
                )))
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| InspectError::SignatureVerification(e.to_string()))?;
        Ok(data.claims)
    }

    /// Builds the claims of a new token and signs them with HS256.
    pub fn issue(&self, request: &IssueRequest, secret: &str, now: DateTime<Utc>) -> Result<String, InspectError> {
        let claims = Self::build_claims(request, now);
        debug!(claims = claims.len(), "signing claims");
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| InspectError::Signing(e.to_string()))
    }

    pub fn build_claims(request: &IssueRequest, now: DateTime<Utc>) -> Claims {
        let mut claims = Claims::new();
        claims.set_issued_at(now);
        if let Some(subject) = &request.subject {
            claims.set_subject(subject.as_str());
        }
        if let Some(issuer) = &request.issuer {
            claims.set_issuer(issuer.as_str());
        }
        if let Some(identifier) = &request.identifier {
            claims.set_identifier(identifier.as_str());
        }
        claims.set_audience(request.audience.iter().cloned());
        if let Some(exp) = request
            .ttl
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
        {
            claims.set_expiration(exp);
        }
        claims
    }

    fn build_output(header: Value, claims: &Claims, verified: Option<bool>) -> Output {
        let reserved = LABELS
            .iter()
            .map(|&(key, label)| ReservedClaim {
                key,
                label,
                value: Self::render_reserved(claims, key),
            })
            .collect();

        let custom: Map<String, Value> = claims
            .iter()
            .filter(|(key, _)| !reserved::is_reserved(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Output {
            header,
            reserved,
            custom,
            verified,
        }
    }

    fn render_reserved(claims: &Claims, key: &str) -> Option<String> {
        match key {
            AUDIENCE => claims.audience().map(|auds| auds.join(", ")),
            EXPIRATION | ISSUED_AT | NOT_BEFORE => claims.get_time(key).map(Self::format_timestamp),
            _ => claims.get_string(key),
        }
    }

    fn format_timestamp(t: DateTime<Utc>) -> String {
        format!("{} ==> {}", t.timestamp(), t.format("%Y-%m-%d %H:%M:%S (UTC)"))
    }

    fn decode_segment(segment: &str) -> Result<Vec<u8>, InspectError> {
        Ok(base64::decode_config(segment, base64::URL_SAFE_NO_PAD)?)
    }

    fn decode_header(&self, header_b64: &str) -> Result<Value, InspectError> {
        let header_bytes = Self::decode_segment(header_b64)?;
        serde_json::from_slice(&header_bytes).map_err(|_| InspectError::InvalidFormat)
    }

    fn decode_claims(&self, payload_b64: &str) -> Result<Claims, InspectError> {
        let payload_bytes = Self::decode_segment(payload_b64)?;
        let mut claims = Claims::new();
        claims.merge_json(&payload_bytes)?;
        Ok(claims)
    }
}
