// src/types/reserved.rs
//! Getters and setters for the registered claim names of a JWT payload.
//! Setters and deleters return the previous value in the claim's type.
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::types::claims::Claims;
use crate::types::coerce;

pub const AUDIENCE: &str = "aud";
pub const EXPIRATION: &str = "exp";
pub const ISSUED_AT: &str = "iat";
pub const ISSUER: &str = "iss";
pub const IDENTIFIER: &str = "jti";
pub const NOT_BEFORE: &str = "nbf";
pub const SUBJECT: &str = "sub";

pub const RESERVED: [&str; 7] = [
    AUDIENCE, EXPIRATION, ISSUED_AT, ISSUER, IDENTIFIER, NOT_BEFORE, SUBJECT,
];

pub fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}

impl Claims {
    /// Retrieves `aud`. Accepts a single string or an array of strings.
    pub fn audience(&self) -> Option<Vec<String>> {
        self.get(AUDIENCE).and_then(coerce::to_audience)
    }

    /// Sets `aud`. No audiences delete the claim, one is stored as a bare
    /// string, more as an array.
    pub fn set_audience<I, S>(&mut self, audiences: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let old = self.audience();
        let mut audiences: Vec<String> = audiences.into_iter().map(Into::into).collect();
        match audiences.len() {
            0 => {
                self.delete(AUDIENCE);
            }
            1 => {
                self.set(AUDIENCE, audiences.remove(0));
            }
            _ => {
                self.set(AUDIENCE, Value::from(audiences));
            }
        }
        old
    }

    pub fn delete_audience(&mut self) -> Option<Vec<String>> {
        let old = self.audience();
        self.delete(AUDIENCE);
        old
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.get_time(EXPIRATION)
    }

    pub fn set_expiration<Tz: TimeZone>(&mut self, t: DateTime<Tz>) -> Option<DateTime<Utc>> {
        self.set_time(EXPIRATION, t)
    }

    pub fn delete_expiration(&mut self) -> Option<DateTime<Utc>> {
        self.delete_time(EXPIRATION)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.get_time(ISSUED_AT)
    }

    pub fn set_issued_at<Tz: TimeZone>(&mut self, t: DateTime<Tz>) -> Option<DateTime<Utc>> {
        self.set_time(ISSUED_AT, t)
    }

    pub fn delete_issued_at(&mut self) -> Option<DateTime<Utc>> {
        self.delete_time(ISSUED_AT)
    }

    pub fn issuer(&self) -> Option<String> {
        self.get_string(ISSUER)
    }

    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> Option<String> {
        self.set_text(ISSUER, issuer.into())
    }

    pub fn delete_issuer(&mut self) -> Option<String> {
        self.delete_text(ISSUER)
    }

    /// Retrieves `jti`, the unique token identifier.
    pub fn identifier(&self) -> Option<String> {
        self.get_string(IDENTIFIER)
    }

    pub fn set_identifier(&mut self, id: impl Into<String>) -> Option<String> {
        self.set_text(IDENTIFIER, id.into())
    }

    pub fn delete_identifier(&mut self) -> Option<String> {
        self.delete_text(IDENTIFIER)
    }

    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.get_time(NOT_BEFORE)
    }

    pub fn set_not_before<Tz: TimeZone>(&mut self, t: DateTime<Tz>) -> Option<DateTime<Utc>> {
        self.set_time(NOT_BEFORE, t)
    }

    pub fn delete_not_before(&mut self) -> Option<DateTime<Utc>> {
        self.delete_time(NOT_BEFORE)
    }

    pub fn subject(&self) -> Option<String> {
        self.get_string(SUBJECT)
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> Option<String> {
        self.set_text(SUBJECT, subject.into())
    }

    pub fn delete_subject(&mut self) -> Option<String> {
        self.delete_text(SUBJECT)
    }

    fn set_text(&mut self, key: &str, text: String) -> Option<String> {
        let old = self.get_string(key);
        self.set(key, text);
        old
    }

    fn delete_text(&mut self, key: &str) -> Option<String> {
        self.delete(key).as_ref().map(coerce::to_string)
    }

    fn delete_time(&mut self, key: &str) -> Option<DateTime<Utc>> {
        self.delete(key).as_ref().and_then(coerce::to_time)
    }
}
