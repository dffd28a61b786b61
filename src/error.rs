//! Unified error types for html-diff-tools.
//!
//! Only two things can go wrong inside a diff: a configuration that would make
//! placeholders ambiguous, and a list diff whose input holds no list element.
//! Everything else (malformed tags, unterminated isolated regions, empty
//! inputs) is defined behavior. IO and validation variants serve the CLI and
//! config-file layers.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for html-diff-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HtmlDiffError {
    /// Rejected configuration change
    #[error("Invalid configuration: {context}")]
    Config {
        context: String,
        #[source]
        source: ConfigErrorKind,
    },

    /// Structural failure while diffing lists
    #[error("List diff failed: {context}")]
    List {
        context: String,
        #[source]
        source: ListErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific configuration error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    #[error("placeholder '{placeholder}' for tag '{tag}' is already used by tag '{existing_tag}'")]
    PlaceholderCollision {
        tag: String,
        placeholder: String,
        existing_tag: String,
    },

    #[error("tag '{tag}' is already mapped to '{existing}', refusing to remap it to '{requested}'")]
    TagRemapped {
        tag: String,
        existing: String,
        requested: String,
    },

    #[error("tag '{tag}' needs a non-empty placeholder")]
    EmptyPlaceholder { tag: String },

    #[error("{0}")]
    Invalid(String),
}

/// Specific list diff error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListErrorKind {
    #[error("Unable to diff list; missing list node")]
    MissingListNode,
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
    #[error("serialized markup is not UTF-8")]
    NonUtf8Markup,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for html-diff-tools operations
pub type Result<T> = std::result::Result<T, HtmlDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl HtmlDiffError {
    /// Create a configuration error with context
    pub fn config(context: impl Into<String>, source: ConfigErrorKind) -> Self {
        Self::Config {
            context: context.into(),
            source,
        }
    }

    /// A placeholder is already claimed by another isolated tag
    pub fn placeholder_collision(
        tag: impl Into<String>,
        placeholder: impl Into<String>,
        existing_tag: impl Into<String>,
    ) -> Self {
        Self::config(
            "adding isolated tag",
            ConfigErrorKind::PlaceholderCollision {
                tag: tag.into(),
                placeholder: placeholder.into(),
                existing_tag: existing_tag.into(),
            },
        )
    }

    /// An isolated tag already maps to a different placeholder
    pub fn tag_remapped(
        tag: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::config(
            "adding isolated tag",
            ConfigErrorKind::TagRemapped {
                tag: tag.into(),
                existing: existing.into(),
                requested: requested.into(),
            },
        )
    }

    /// Create a list diff error with context
    pub fn list(context: impl Into<String>, source: ListErrorKind) -> Self {
        Self::List {
            context: context.into(),
            source,
        }
    }

    /// An input contains no `ul`, `ol` or `dl` element
    pub fn missing_list_node(side: impl Into<String>) -> Self {
        Self::List {
            context: side.into(),
            source: ListErrorKind::MissingListNode,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error came from a rejected configuration change.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for HtmlDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context chains rather than replaces, so a failure deep inside a list diff
/// reads as `outer: inner` by the time it reaches the CLI.
///
/// # Example
///
/// ```
/// use html_diff_tools::error::{ErrorContext, Result};
/// use html_diff_tools::{diff_list, DiffConfig};
///
/// fn review(old: &str, new: &str) -> Result<String> {
///     diff_list(old, new, &DiffConfig::default()).context("reviewing chapter 3")
/// }
///
/// assert!(review("<p>no list</p>", "<ul><li>x</li></ul>").is_err());
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<HtmlDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: HtmlDiffError, new_ctx: &str) -> HtmlDiffError {
    match err {
        HtmlDiffError::Config {
            context: existing,
            source,
        } => HtmlDiffError::Config {
            context: chain_context(new_ctx, &existing),
            source,
        },
        HtmlDiffError::List {
            context: existing,
            source,
        } => HtmlDiffError::List {
            context: chain_context(new_ctx, &existing),
            source,
        },
        HtmlDiffError::Io {
            path,
            message,
            source,
        } => HtmlDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        HtmlDiffError::Validation(msg) => HtmlDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a validation error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to a validation error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| HtmlDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| HtmlDiffError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_list_node_message() {
        let err = HtmlDiffError::missing_list_node("old input");
        match &err {
            HtmlDiffError::List { source, .. } => {
                assert_eq!(source.to_string(), "Unable to diff list; missing list node");
            }
            _ => panic!("Expected List error"),
        }
        assert!(err.to_string().contains("old input"));
    }

    #[test]
    fn test_config_error_display() {
        let err = HtmlDiffError::placeholder_collision("u", "[[REPLACE_A]]", "a");
        assert!(err.is_config());
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("placeholder '[[REPLACE_A]]' for tag 'u' is already used by tag 'a'")
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = HtmlDiffError::io("/path/to/old.html", io_err);
        assert!(err.to_string().contains("/path/to/old.html"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(HtmlDiffError::missing_list_node("base"))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(HtmlDiffError::List { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            _ => panic!("Expected List error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);

        let err_result: Result<i32> = Err(HtmlDiffError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called);
    }

    #[test]
    fn test_option_context() {
        assert_eq!(Some(42).context_none("missing value").ok(), Some(42));

        match None::<i32>.context_none("missing value") {
            Err(HtmlDiffError::Validation(msg)) => assert_eq!(msg, "missing value"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("outer", "middle: inner"), "outer: middle: inner");
    }
}
