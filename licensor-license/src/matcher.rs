//! Product-id wildcard matching.
//!
//! The license's product id is the pattern, the requested product id is the
//! subject. `*` matches any run of characters (including none); everything
//! else, regex metacharacters included, matches itself. The whole subject
//! has to match.

use regex_lite::Regex;

/// A compiled product-id pattern.
#[derive(Debug, Clone)]
pub enum ProductPattern {
    /// No wildcard: plain string equality.
    Exact(String),
    /// At least one `*`, compiled to an anchored matcher.
    Wildcard { pattern: String, matcher: Regex },
}

impl ProductPattern {
    /// Compiles a license product id.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        if !pattern.contains('*') {
            return Self::Exact(pattern.to_string());
        }

        let body = pattern
            .split('*')
            .map(regex_lite::escape)
            .collect::<Vec<_>>()
            .join(".*");
        // Escaped literals and `.*` always form a valid expression.
        match Regex::new(&format!("^(?s:{body})$")) {
            Ok(matcher) => Self::Wildcard {
                pattern: pattern.to_string(),
                matcher,
            },
            Err(_) => Self::Exact(pattern.to_string()),
        }
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(pattern) | Self::Wildcard { pattern, .. } => pattern,
        }
    }

    /// Returns true if `subject` is covered by this pattern.
    ///
    /// The pattern text always covers itself. Any other subject containing
    /// `*` never matches a wildcard pattern.
    #[must_use]
    pub fn matches(&self, subject: &str) -> bool {
        match self {
            Self::Exact(pattern) => pattern == subject,
            Self::Wildcard { pattern, matcher } => {
                pattern == subject || (!subject.contains('*') && matcher.is_match(subject))
            }
        }
    }
}

/// Returns true if the license product id `pattern` covers `subject`.
#[must_use]
pub fn product_id_matches(pattern: &str, subject: &str) -> bool {
    ProductPattern::parse(pattern).matches(subject)
}
