//! Typed log records
//!
//! Every service event is described by a fixed shape: a category, a
//! subcategory, and an ordered key-value payload. Records are forwarded to
//! `tracing` so the subscriber configured by the binary decides the output
//! format.

use std::fmt;

use tracing::Level;

/// Top-level area that produced a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Token,
    Otp,
    Access,
    Http,
}

impl LogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Token => "token",
            LogCategory::Otp => "otp",
            LogCategory::Access => "access",
            LogCategory::Http => "http",
        }
    }
}

/// Operation within a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSubcategory {
    Issue,
    Logout,
    RevocationCheck,
    Verify,
    Set,
    Validate,
    MarkUsed,
    Resolve,
    CheckAccess,
    Request,
}

impl LogSubcategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSubcategory::Issue => "issue",
            LogSubcategory::Logout => "logout",
            LogSubcategory::RevocationCheck => "revocation_check",
            LogSubcategory::Verify => "verify",
            LogSubcategory::Set => "set",
            LogSubcategory::Validate => "validate",
            LogSubcategory::MarkUsed => "mark_used",
            LogSubcategory::Resolve => "resolve",
            LogSubcategory::CheckAccess => "check_access",
            LogSubcategory::Request => "request",
        }
    }
}

/// A structured log event with a fixed shape
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub category: LogCategory,
    pub subcategory: LogSubcategory,
    pub fields: Vec<(&'static str, String)>,
}

impl LogRecord {
    pub fn new(category: LogCategory, subcategory: LogSubcategory) -> Self {
        Self {
            category,
            subcategory,
            fields: Vec::new(),
        }
    }

    /// Append a key-value pair to the payload
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Render the payload as `key=value` pairs
    pub fn payload(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Forward the record to `tracing` at the given level
    pub fn emit(&self, level: Level, message: &str) {
        let category = self.category.as_str();
        let subcategory = self.subcategory.as_str();
        let payload = self.payload();

        match level {
            Level::ERROR => tracing::error!(category, subcategory, payload = %payload, "{}", message),
            Level::WARN => tracing::warn!(category, subcategory, payload = %payload, "{}", message),
            Level::INFO => tracing::info!(category, subcategory, payload = %payload, "{}", message),
            Level::DEBUG => tracing::debug!(category, subcategory, payload = %payload, "{}", message),
            Level::TRACE => tracing::trace!(category, subcategory, payload = %payload, "{}", message),
        }
    }
}

/// Mask an identifier for logging
///
/// Emails keep their first character and domain (`j***@example.com`); other
/// identifiers keep only their last four characters.
pub fn mask_identifier(identifier: &str) -> String {
    if let Some((local, domain)) = identifier.split_once('@') {
        return match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        };
    }

    let chars: Vec<char> = identifier.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keeps_field_order() {
        let record = LogRecord::new(LogCategory::Otp, LogSubcategory::Set)
            .field("identifier", "a***@b.com")
            .field("request_count", 2);

        assert_eq!(record.payload(), "identifier=a***@b.com request_count=2");
        assert_eq!(record.category.as_str(), "otp");
        assert_eq!(record.subcategory.as_str(), "set");
    }

    #[test]
    fn test_mask_identifier() {
        assert_eq!(mask_identifier("alice@example.com"), "a***@example.com");
        assert_eq!(mask_identifier("@example.com"), "***@example.com");
        assert_eq!(mask_identifier("1234567890"), "***7890");
        assert_eq!(mask_identifier("123"), "****");
        assert_eq!(mask_identifier(""), "****");
    }
}
