//! Substring filtering and tiered ordering of items.
//!
//! An item matches when every query token occurs somewhere in its text.
//! Matches are grouped into three tiers, each keeping input order:
//!
//! - **Exact**: the whole query equals the item text (or the query has no
//!   tokens, in which case everything is exact)
//! - **Prefix**: the item text starts with the first token
//! - **Substring**: any other match
//!
//! There is no scoring; the tier order is the only ranking.

use std::ops::Range;

use crate::{
  item::{
    Item,
    ItemId,
    ItemStore,
  },
  tokenizer::{
    Delimiters,
    tokenize,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMatching {
  #[default]
  Sensitive,
  Insensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
  Exact,
  Prefix,
  Substring,
}

/// Ordered view over the items matching a query.
///
/// Positions index the matched sequence, not the store; neighbouring
/// positions are neighbouring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
  ids:        Vec<ItemId>,
  exact_end:  usize,
  prefix_end: usize,
}

impl Matches {
  #[inline]
  pub fn len(&self) -> usize {
    self.ids.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  #[inline]
  pub fn get(&self, pos: usize) -> Option<ItemId> {
    self.ids.get(pos).copied()
  }

  pub fn ids(&self) -> &[ItemId] {
    &self.ids
  }

  /// Position of the first match.
  pub fn first(&self) -> Option<usize> {
    (!self.ids.is_empty()).then_some(0)
  }

  /// Position of the last match.
  pub fn last(&self) -> Option<usize> {
    self.ids.len().checked_sub(1)
  }

  pub fn kind(&self, pos: usize) -> Option<MatchKind> {
    if pos >= self.ids.len() {
      None
    } else if pos < self.exact_end {
      Some(MatchKind::Exact)
    } else if pos < self.prefix_end {
      Some(MatchKind::Prefix)
    } else {
      Some(MatchKind::Substring)
    }
  }

  pub fn segment(&self, kind: MatchKind) -> &[ItemId] {
    &self.ids[self.segment_range(kind)]
  }

  fn segment_range(&self, kind: MatchKind) -> Range<usize> {
    match kind {
      MatchKind::Exact => 0..self.exact_end,
      MatchKind::Prefix => self.exact_end..self.prefix_end,
      MatchKind::Substring => self.prefix_end..self.ids.len(),
    }
  }
}

/// Filters `items` against `query` and orders the result by tier.
pub fn filter(
  items: &ItemStore,
  query: &str,
  delimiters: &Delimiters,
  case: CaseMatching,
) -> Matches {
  let folded_query;
  let query = match case {
    CaseMatching::Sensitive => query,
    CaseMatching::Insensitive => {
      folded_query = query.to_lowercase();
      folded_query.as_str()
    },
  };
  let tokens = tokenize(query, delimiters);

  let mut exact = Vec::new();
  let mut prefix = Vec::new();
  let mut substring = Vec::new();

  for (id, item) in items.iter() {
    let text = haystack(item, case);
    if !tokens.iter().all(|token| text.contains(token)) {
      continue;
    }

    if tokens.is_empty() || bounded_eq(query, text, query.len() + 1) {
      exact.push(id);
    } else if text.starts_with(tokens[0]) {
      prefix.push(id);
    } else {
      substring.push(id);
    }
  }

  let exact_end = exact.len();
  let prefix_end = exact_end + prefix.len();
  let mut ids = exact;
  ids.extend(prefix);
  ids.extend(substring);

  tracing::trace!(
    query,
    matched = ids.len(),
    exact = exact_end,
    prefix = prefix_end - exact_end,
    "filtered items"
  );

  Matches {
    ids,
    exact_end,
    prefix_end,
  }
}

#[inline]
fn haystack(item: &Item, case: CaseMatching) -> &str {
  match case {
    CaseMatching::Sensitive => &item.text,
    CaseMatching::Insensitive => item.folded(),
  }
}

/// Compares at most `n` bytes. A string shorter than `n` only equals one of
/// the same length, so `n = a.len() + 1` asks for full equality.
fn bounded_eq(a: &str, b: &str, n: usize) -> bool {
  let (a, b) = (a.as_bytes(), b.as_bytes());
  a[..n.min(a.len())] == b[..n.min(b.len())]
}

#[cfg(test)]
mod test {
  use quickcheck::TestResult;

  use super::*;

  fn store(texts: &[&str]) -> ItemStore {
    ItemStore::new(texts.iter().map(|text| Item::new(*text)).collect())
  }

  fn texts<'a>(items: &'a ItemStore, ids: &[ItemId]) -> Vec<&'a str> {
    ids.iter().map(|id| items.get(*id).text.as_str()).collect()
  }

  fn run(items: &ItemStore, query: &str) -> Matches {
    filter(items, query, &Delimiters::default(), CaseMatching::Sensitive)
  }

  #[test]
  fn empty_query_matches_everything_as_exact() {
    let items = store(&["b", "a", "c"]);
    let matches = run(&items, "");
    assert_eq!(texts(&items, matches.ids()), ["b", "a", "c"]);
    assert_eq!(matches.segment(MatchKind::Exact).len(), 3);
  }

  #[test]
  fn blank_query_has_no_tokens() {
    let items = store(&["a b", "c"]);
    let matches = run(&items, "   ");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches.kind(1), Some(MatchKind::Exact));
  }

  #[test]
  fn prefix_tier_for_partial_query() {
    let items = store(&["apple", "apricot", "banana"]);
    let matches = run(&items, "ap");
    assert_eq!(texts(&items, matches.ids()), ["apple", "apricot"]);
    assert!(matches.segment(MatchKind::Exact).is_empty());
    assert_eq!(matches.segment(MatchKind::Prefix).len(), 2);
  }

  #[test]
  fn tiers_are_concatenated_in_order() {
    let items = store(&["xfoo", "foobar", "foo", "barfoo", "foo"]);
    let matches = run(&items, "foo");
    assert_eq!(
      texts(&items, matches.ids()),
      ["foo", "foo", "foobar", "xfoo", "barfoo"]
    );
    assert_eq!(matches.kind(0), Some(MatchKind::Exact));
    assert_eq!(matches.kind(2), Some(MatchKind::Prefix));
    assert_eq!(matches.kind(4), Some(MatchKind::Substring));
    assert_eq!(matches.kind(5), None);
  }

  #[test]
  fn all_tokens_must_match() {
    let items = store(&["git commit", "git push", "commit log"]);
    let matches = run(&items, "commit git");
    assert_eq!(texts(&items, matches.ids()), ["git commit"]);
    assert_eq!(matches.kind(0), Some(MatchKind::Substring));
  }

  #[test]
  fn prefix_uses_first_token_only() {
    let items = store(&["git push", "push git"]);
    let matches = run(&items, "git pu");
    assert_eq!(texts(&items, matches.ids()), ["git push", "push git"]);
    assert_eq!(matches.kind(0), Some(MatchKind::Prefix));
    assert_eq!(matches.kind(1), Some(MatchKind::Substring));
  }

  #[test]
  fn exact_compares_the_full_query() {
    let items = store(&["git push", "git push --force"]);
    let matches = run(&items, "git push");
    assert_eq!(matches.kind(0), Some(MatchKind::Exact));
    assert_eq!(matches.kind(1), Some(MatchKind::Prefix));
  }

  #[test]
  fn case_insensitive_matching() {
    let items = store(&["Firefox", "firefox-esr", "Thunderbird"]);
    let matches = filter(
      &items,
      "FIREFOX",
      &Delimiters::default(),
      CaseMatching::Insensitive,
    );
    assert_eq!(texts(&items, matches.ids()), ["Firefox", "firefox-esr"]);
    assert_eq!(matches.kind(0), Some(MatchKind::Exact));

    let matches = run(&items, "FIREFOX");
    assert!(matches.is_empty());
  }

  #[test]
  fn bounded_comparison() {
    assert!(bounded_eq("abc", "abc", 4));
    assert!(!bounded_eq("ab", "abc", 3));
    assert!(bounded_eq("ab", "abc", 2));
    assert!(bounded_eq("", "", 1));
  }

  #[test]
  fn nul_byte_is_not_the_end_of_text() {
    assert!(!bounded_eq("ab", "ab\0c", 3));
    let items = store(&["ab\0c", "ab"]);
    let matches = run(&items, "ab");
    assert_eq!(texts(&items, matches.ids()), ["ab", "ab\0c"]);
    assert_eq!(matches.kind(0), Some(MatchKind::Exact));
    assert_eq!(matches.kind(1), Some(MatchKind::Prefix));
  }

  fn to_store(texts: &[String]) -> ItemStore {
    ItemStore::new(texts.iter().map(Item::new).collect())
  }

  quickcheck::quickcheck! {
    fn matches_contain_every_token(texts: Vec<String>, query: String) -> bool {
      let items = to_store(&texts);
      let delimiters = Delimiters::default();
      let tokens = tokenize(&query, &delimiters);
      run(&items, &query)
        .ids()
        .iter()
        .all(|id| tokens.iter().all(|token| items.get(*id).text.contains(token)))
    }

    fn segments_keep_store_order(texts: Vec<String>, query: String) -> bool {
      let items = to_store(&texts);
      let matches = run(&items, &query);
      [MatchKind::Exact, MatchKind::Prefix, MatchKind::Substring]
        .into_iter()
        .all(|kind| matches.segment(kind).windows(2).all(|pair| pair[0] < pair[1]))
    }

    fn filtering_is_idempotent(texts: Vec<String>, query: String) -> bool {
      let items = to_store(&texts);
      run(&items, &query) == run(&items, &query)
    }

    fn non_matches_miss_a_token(texts: Vec<String>, query: String) -> TestResult {
      let items = to_store(&texts);
      let matches = run(&items, &query);
      if matches.len() == items.len() {
        return TestResult::discard();
      }
      let delimiters = Delimiters::default();
      let tokens = tokenize(&query, &delimiters);
      let missed = items.iter().all(|(id, item)| {
        matches.ids().contains(&id) || !tokens.iter().all(|token| item.text.contains(token))
      });
      TestResult::from_bool(missed)
    }
  }
}
