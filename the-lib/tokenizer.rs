//! Splits the query into whitespace-delimited tokens.

use smallvec::SmallVec;

pub type Tokens<'a> = SmallVec<[&'a str; 4]>;

/// Characters that separate query tokens and words.
///
/// The same set drives tokenizing and word-wise cursor motion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters(String);

impl Delimiters {
  pub fn new(chars: impl Into<String>) -> Self {
    Self(chars.into())
  }

  #[inline]
  pub fn contains(&self, ch: char) -> bool {
    self.0.contains(ch)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for Delimiters {
  fn default() -> Self {
    Self::new(" ")
  }
}

/// Returns the non-empty tokens of `query`, in order.
pub fn tokenize<'a>(query: &'a str, delimiters: &Delimiters) -> Tokens<'a> {
  query
    .split(|ch: char| delimiters.contains(ch))
    .filter(|token| !token.is_empty())
    .collect()
}

#[cfg(test)]
mod test {
  use super::*;

  #[track_caller]
  fn assert_tokens(input: &str, delimiters: &str, expected: &[&str]) {
    let tokens = tokenize(input, &Delimiters::new(delimiters));
    assert_eq!(tokens.as_slice(), expected);
  }

  #[test]
  fn splits_on_spaces() {
    assert_tokens("foo bar", " ", &["foo", "bar"]);
    assert_tokens("  foo   bar ", " ", &["foo", "bar"]);
  }

  #[test]
  fn empty_and_blank_queries_have_no_tokens() {
    assert_tokens("", " ", &[]);
    assert_tokens("   ", " ", &[]);
  }

  #[test]
  fn custom_delimiters() {
    assert_tokens("usr/local bin", " /", &["usr", "local", "bin"]);
    assert_tokens("a\tb", " ", &["a\tb"]);
  }
}
