//! Declarative field validation.
//!
//! A [`RuleSet`] maps field names to lists of [`Rule`]s. Each rule pairs a
//! predicate with the message reported when it fails. Evaluation never stops
//! at the first failure: every violated rule on every field is collected into
//! [`Violations`].

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

// ─── Rules ───────────────────────────────────────────────────────────────────

/// A single predicate over an optional field value.
///
/// `None` means the field was absent from the input.
#[derive(Clone, Copy)]
pub struct Rule {
  check:   fn(Option<&str>) -> bool,
  message: &'static str,
}

impl Rule {
  pub fn new(check: fn(Option<&str>) -> bool, message: &'static str) -> Self {
    Self { check, message }
  }

  /// The field must be present.
  pub fn required() -> Self { Self::new(|v| v.is_some(), "is required") }

  /// If present, the field must not be the empty string.
  pub fn non_empty() -> Self {
    Self::new(|v| v.is_none_or(|s| !s.is_empty()), "must not be empty")
  }

  /// If present, the field must be a syntactically valid email address.
  pub fn email() -> Self {
    Self::new(|v| v.is_none_or(is_email), "must be a valid email")
  }

  pub fn message(&self) -> &'static str { self.message }

  fn passes(&self, value: Option<&str>) -> bool { (self.check)(value) }
}

impl fmt::Debug for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Rule").field(&self.message).finish()
  }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
  )
  .expect("email pattern compiles")
});

/// Returns `true` if `s` looks like `local@domain.tld`.
pub fn is_email(s: &str) -> bool {
  s.len() <= 254 && EMAIL.is_match(s)
}

// ─── Rule sets ───────────────────────────────────────────────────────────────

/// An ordered mapping of field name to the rules applied to it.
#[derive(Debug, Default)]
pub struct RuleSet {
  fields: Vec<(&'static str, Vec<Rule>)>,
}

impl RuleSet {
  pub fn new() -> Self { Self::default() }

  /// Builder-style: append `rules` for `field`.
  pub fn field(mut self, field: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
    self.fields.push((field, rules.into_iter().collect()));
    self
  }

  /// Evaluate every rule against the values produced by `lookup`.
  pub fn check<'a>(
    &self,
    lookup: impl Fn(&str) -> Option<&'a str>,
  ) -> Result<(), Violations> {
    let violations: Vec<Violation> = self
      .fields
      .iter()
      .flat_map(|&(field, ref rules)| {
        let value = lookup(field);
        rules
          .iter()
          .filter(move |rule| !rule.passes(value))
          .map(move |rule| Violation {
            field:   field.to_owned(),
            message: rule.message().to_owned(),
          })
      })
      .collect();

    if violations.is_empty() {
      Ok(())
    } else {
      Err(Violations(violations))
    }
  }
}

// ─── Violations ──────────────────────────────────────────────────────────────

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
  pub field:   String,
  pub message: String,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.field, self.message)
  }
}

/// A non-empty list of violations returned by [`RuleSet::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
  pub fn iter(&self) -> impl Iterator<Item = &Violation> { self.0.iter() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Whether any violation was reported for `field`.
  pub fn has_field(&self, field: &str) -> bool {
    self.0.iter().any(|v| v.field == field)
  }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, v) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{v}")?;
    }
    Ok(())
  }
}

impl std::error::Error for Violations {}

/// A value whose named fields can be checked against a [`RuleSet`].
pub trait Validate {
  /// The rules this type is checked against.
  fn rules() -> &'static RuleSet;

  /// The current value of `field`, or `None` if absent.
  fn field(&self, name: &str) -> Option<&str>;

  fn validate(&self) -> Result<(), Violations> {
    Self::rules().check(|name| self.field(name))
  }
}
