//! Log message templates and the per-function template registry
//!
//! A [`Template`] is a runtime format string with a single `%s` placeholder
//! (`%%` is a literal percent sign). A [`LogTemplateSet`] overrides the
//! `enter`, `leave` and `error` messages for one function, and a
//! [`LogTemplateRegistry`] maps function names to their overrides.
//!
//! # Registry source
//!
//! ```
//! use calltrace_core::templates::LogTemplateRegistry;
//!
//! let registry = LogTemplateRegistry::from_toml_str(
//!     r#"
//!     [foo]
//!     enter = "IN %s"
//!     leave = "OUT %s"
//!     error = "ERR %s"
//!     "#,
//! )
//! .unwrap();
//!
//! let foo = registry.resolve("foo");
//! assert_eq!(foo.enter.render("foo"), "IN foo");
//!
//! let bar = registry.resolve("bar");
//! assert_eq!(bar.enter.render("bar"), "Entering bar");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CallTraceError, Result};

pub const DEFAULT_ENTER_TEMPLATE: &str = "Entering %s";
pub const DEFAULT_LEAVE_TEMPLATE: &str = "Leaving %s";
pub const DEFAULT_ERROR_TEMPLATE: &str = "%s";

/// A validated log template
///
/// Holds exactly one `%s` placeholder; construction rejects anything else so
/// rendering can never fail at call time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    raw: String,
}

impl Template {
    /// Parse and validate a template
    ///
    /// # Errors
    ///
    /// Returns `CallTraceError::InvalidTemplate` when the template has no
    /// `%s`, more than one `%s`, a conversion other than `%s`/`%%`, or a
    /// trailing `%`.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let placeholders = match count_placeholders(&raw) {
            Ok(count) => count,
            Err(reason) => return Err(invalid(&raw, reason)),
        };
        if placeholders != 1 {
            return Err(invalid(
                &raw,
                format!("expected exactly one %s placeholder, found {placeholders}"),
            ));
        }
        Ok(Self { raw })
    }

    /// The template source text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Interpolate `value` into the placeholder
    pub fn render(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.raw.len() + value.len());
        let mut chars = self.raw.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('s') => out.push_str(value),
                Some('%') => out.push('%'),
                // parse() rejects these; keep them verbatim regardless
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
        out
    }

    fn default_enter() -> Self {
        Self {
            raw: DEFAULT_ENTER_TEMPLATE.to_string(),
        }
    }

    fn default_leave() -> Self {
        Self {
            raw: DEFAULT_LEAVE_TEMPLATE.to_string(),
        }
    }

    fn default_error() -> Self {
        Self {
            raw: DEFAULT_ERROR_TEMPLATE.to_string(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for Template {
    type Error = CallTraceError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(raw)
    }
}

impl TryFrom<&str> for Template {
    type Error = CallTraceError;

    fn try_from(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.raw
    }
}

fn invalid(raw: &str, reason: impl Into<String>) -> CallTraceError {
    CallTraceError::InvalidTemplate {
        template: raw.to_string(),
        reason: reason.into(),
    }
}

fn count_placeholders(raw: &str) -> std::result::Result<usize, String> {
    let mut count = 0;
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.next() {
            Some('s') => count += 1,
            Some('%') => {}
            Some(other) => return Err(format!("unsupported conversion '%{other}'")),
            None => return Err("dangling '%' at end of template".to_string()),
        }
    }
    Ok(count)
}

/// Per-function template overrides
///
/// Each key is optional. Missing keys fall back to the defaults, and a set
/// with no keys at all behaves exactly like having no override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogTemplateSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<Template>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave: Option<Template>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Template>,
}

impl LogTemplateSet {
    /// Build a full override from three template strings
    ///
    /// # Errors
    ///
    /// Returns `CallTraceError::InvalidTemplate` if any template is invalid.
    pub fn new(enter: &str, leave: &str, error: &str) -> Result<Self> {
        Ok(Self {
            enter: Some(Template::parse(enter)?),
            leave: Some(Template::parse(leave)?),
            error: Some(Template::parse(error)?),
        })
    }

    pub fn with_enter(mut self, template: Template) -> Self {
        self.enter = Some(template);
        self
    }

    pub fn with_leave(mut self, template: Template) -> Self {
        self.leave = Some(template);
        self
    }

    pub fn with_error(mut self, template: Template) -> Self {
        self.error = Some(template);
        self
    }

    /// True when no key is set
    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.leave.is_none() && self.error.is_none()
    }
}

/// The concrete templates a wrapper uses for one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplates {
    pub enter: Template,
    pub leave: Template,
    pub error: Template,
}

impl ResolvedTemplates {
    /// Fill the gaps of an optional override with the defaults
    pub fn from_set(set: Option<&LogTemplateSet>) -> Self {
        let Some(set) = set.filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        Self {
            enter: set.enter.clone().unwrap_or_else(Template::default_enter),
            leave: set.leave.clone().unwrap_or_else(Template::default_leave),
            error: set.error.clone().unwrap_or_else(Template::default_error),
        }
    }
}

impl Default for ResolvedTemplates {
    fn default() -> Self {
        Self {
            enter: Template::default_enter(),
            leave: Template::default_leave(),
            error: Template::default_error(),
        }
    }
}

/// Function name to template override mapping
///
/// Serializes as a plain table keyed by function name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogTemplateRegistry {
    entries: BTreeMap<String, LogTemplateSet>,
}

impl LogTemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the override for `function`
    pub fn with(mut self, function: impl Into<String>, set: LogTemplateSet) -> Self {
        self.entries.insert(function.into(), set);
        self
    }

    /// Parse a registry from TOML text
    ///
    /// # Errors
    ///
    /// Returns `CallTraceError::InvalidRegistry` on malformed TOML, unknown
    /// keys, or invalid templates.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| CallTraceError::InvalidRegistry {
            reason: e.to_string(),
        })
    }

    /// Parse a registry from JSON text
    ///
    /// # Errors
    ///
    /// Returns `CallTraceError::InvalidRegistry` on malformed JSON, unknown
    /// keys, or invalid templates.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| CallTraceError::InvalidRegistry {
            reason: e.to_string(),
        })
    }

    pub fn get(&self, function: &str) -> Option<&LogTemplateSet> {
        self.entries.get(function)
    }

    /// Templates to use for `function`
    pub fn resolve(&self, function: &str) -> ResolvedTemplates {
        ResolvedTemplates::from_set(self.get(function))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, LogTemplateSet)> for LogTemplateRegistry {
    fn from_iter<T: IntoIterator<Item = (N, LogTemplateSet)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, set)| (name.into(), set))
                .collect(),
        }
    }
}
