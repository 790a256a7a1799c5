//! Flag extraction over an immutable token list.
//!
//! Each extraction consumes an [`Args`] and hands back the tokens it did not
//! claim, so a sequence of extractions reads top to bottom and the order in
//! which flags are pulled stays explicit at the call site.

use super::types::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
  tokens: Vec<String>,
}

impl Args {
  pub fn new<I, S>(tokens: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      tokens: tokens.into_iter().map(Into::into).collect(),
    }
  }

  pub fn tokens(&self) -> &[String] {
    &self.tokens
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  /// Extract one value from a set of mutually exclusive flag spellings.
  ///
  /// Every occurrence of every spelling is removed. Two different spellings
  /// in the same token list are an [`ConfigError::AmbiguousFlags`] error.
  pub fn take_switch<T: Copy>(self, spellings: &[(&str, T)]) -> Result<(Option<T>, Args), ConfigError> {
    let mut found: Option<(&str, T)> = None;
    let mut rest = Vec::with_capacity(self.tokens.len());

    for token in self.tokens {
      let Some(&(spelling, value)) = spellings.iter().find(|(s, _)| *s == token) else {
        rest.push(token);
        continue;
      };
      if let Some((first, _)) = found
        && first != spelling
      {
        return Err(ConfigError::AmbiguousFlags(first.to_string(), spelling.to_string()));
      }
      found = Some((spelling, value));
    }

    Ok((found.map(|(_, value)| value), Args { tokens: rest }))
  }

  /// Extract the token following `flag`, removing both.
  pub fn take_value(self, flag: &str) -> Result<(Option<String>, Args), ConfigError> {
    let mut positions = self.tokens.iter().enumerate().filter(|(_, t)| *t == flag).map(|(i, _)| i);
    let Some(index) = positions.next() else {
      return Ok((None, self));
    };
    if positions.next().is_some() {
      return Err(ConfigError::DuplicateFlag(flag.to_string()));
    }
    if index + 1 >= self.tokens.len() {
      return Err(ConfigError::MissingFlagValue(flag.to_string()));
    }

    let mut tokens = self.tokens;
    let value = tokens.remove(index + 1);
    tokens.remove(index);
    Ok((Some(value), Args { tokens }))
  }

  /// Interpret the remaining tokens as target names.
  pub fn into_targets(self) -> Result<Vec<String>, ConfigError> {
    if let Some(flag) = self.tokens.iter().find(|t| t.starts_with('-')) {
      return Err(ConfigError::UnknownFlag(flag.clone()));
    }
    Ok(self.tokens)
  }
}
