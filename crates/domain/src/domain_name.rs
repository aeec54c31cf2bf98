use crate::DomainError;
use std::sync::Arc;

/// Where a query is routed, decided from its suffix alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// `<label>.<ledger suffix>`: answered from the registry, keyed by the
    /// leading label.
    Registry { label: Arc<str> },
    /// Anything else, including bare labels: cache first, then recursive.
    Conventional { name: Arc<str> },
}

impl QueryTarget {
    /// Normalizes (trim, lower-case) and classifies a query.
    ///
    /// Only the part after the *first* dot is compared to the suffix, so
    /// `a.b.blockchain` is a conventional name.
    pub fn classify(input: &str, ledger_suffix: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().to_lowercase();
        let (label, suffix) = match normalized.split_once('.') {
            Some((label, suffix)) => (label, suffix),
            None => (normalized.as_str(), ""),
        };

        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(input.to_string()));
        }

        if !suffix.is_empty() && suffix.eq_ignore_ascii_case(ledger_suffix.trim()) {
            Ok(QueryTarget::Registry {
                label: Arc::from(label),
            })
        } else {
            Ok(QueryTarget::Conventional {
                name: Arc::from(normalized.as_str()),
            })
        }
    }

    pub fn key(&self) -> &str {
        match self {
            QueryTarget::Registry { label } => label,
            QueryTarget::Conventional { name } => name,
        }
    }

    pub fn is_registry(&self) -> bool {
        matches!(self, QueryTarget::Registry { .. })
    }
}

/// Canonical registry key for a mutation argument: trimmed, lower-cased,
/// with an optional trailing `.<ledger suffix>` removed.
pub fn registry_label(input: &str, ledger_suffix: &str) -> Result<String, DomainError> {
    let normalized = input.trim().to_lowercase();
    let suffix = format!(".{}", ledger_suffix.trim().to_lowercase());
    let label = normalized
        .strip_suffix(suffix.as_str())
        .unwrap_or(normalized.as_str());

    if label.is_empty() || label.contains(char::is_whitespace) {
        return Err(DomainError::InvalidDomainName(input.to_string()));
    }

    Ok(label.to_string())
}
