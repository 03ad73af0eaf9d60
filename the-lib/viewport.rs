//! Pagination of the matched sequence.
//!
//! A page starts at some position and extends as far as the display
//! capacity allows. In flow layout (a single horizontal line) every item
//! costs its measured width, clamped to the budget so that one item always
//! fits. In grid layout every item takes one of `rows * columns` slots.

use std::ops::Range;

use crate::{
  item::ItemStore,
  matcher::Matches,
};

/// Text measurement supplied by the renderer.
pub trait Measure {
  /// Width of `text` as drawn in a menu entry, padding included.
  fn text_width(&self, text: &str) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
  /// Horizontal list with a width budget.
  Flow { budget: usize },
  /// Fixed grid of `rows * columns` cells.
  Grid { rows: usize, columns: usize },
}

impl Capacity {
  pub fn grid(rows: usize, columns: usize) -> Self {
    Self::Grid {
      rows:    rows.max(1),
      columns: columns.max(1),
    }
  }

  pub fn budget(self) -> usize {
    match self {
      Self::Flow { budget } => budget,
      Self::Grid { rows, columns } => rows * columns,
    }
  }

  pub fn cost(self, text: &str, measure: &dyn Measure) -> usize {
    match self {
      Self::Flow { budget } => measure.text_width(text).min(budget),
      Self::Grid { .. } => 1,
    }
  }
}

/// Visible window over the matched sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
  /// First visible position, `None` when nothing matched.
  pub start: Option<usize>,
  /// First position of the next page, `None` when this is the last page.
  pub end:   Option<usize>,
  /// First position of the previous page. Equal to `start` on the first
  /// page.
  pub prev:  Option<usize>,
}

impl Page {
  /// Visible positions for a sequence of `len` elements.
  pub fn range(&self, len: usize) -> Range<usize> {
    match self.start {
      Some(start) => start..self.end.unwrap_or(len),
      None => 0..0,
    }
  }

  #[inline]
  pub fn contains(&self, pos: usize, len: usize) -> bool {
    self.range(len).contains(&pos)
  }
}

/// Computes the page beginning at `start`.
pub fn paginate(
  matches: &Matches,
  items: &ItemStore,
  start: Option<usize>,
  capacity: Capacity,
  measure: &dyn Measure,
) -> Page {
  let Some(start) = start.filter(|start| *start < matches.len()) else {
    return Page::default();
  };

  let budget = capacity.budget();
  let cost = |pos: usize| {
    let id = matches.ids()[pos];
    capacity.cost(&items.get(id).text, measure)
  };

  let mut end = None;
  let mut used = 0;
  for pos in start..matches.len() {
    used += cost(pos);
    if used > budget {
      end = Some(pos);
      break;
    }
  }

  let mut prev = start;
  let mut used = 0;
  while prev > 0 {
    used += cost(prev - 1);
    if used > budget {
      break;
    }
    prev -= 1;
  }

  Page {
    start: Some(start),
    end,
    prev: Some(prev),
  }
}

#[cfg(test)]
mod test {
  use quickcheck::TestResult;

  use super::*;
  use crate::{
    item::Item,
    matcher::{
      CaseMatching,
      filter,
    },
    tokenizer::Delimiters,
  };

  /// One cell per char.
  struct CharWidth;

  impl Measure for CharWidth {
    fn text_width(&self, text: &str) -> usize {
      text.chars().count()
    }
  }

  fn setup(texts: &[&str]) -> (ItemStore, Matches) {
    let items = ItemStore::new(texts.iter().map(|text| Item::new(*text)).collect());
    let matches = filter(&items, "", &Delimiters::default(), CaseMatching::Sensitive);
    (items, matches)
  }

  #[test]
  fn empty_sequence_has_no_page() {
    let (items, matches) = setup(&[]);
    let page = paginate(&matches, &items, Some(0), Capacity::grid(2, 2), &CharWidth);
    assert_eq!(page, Page::default());
    assert_eq!(page.range(0), 0..0);
  }

  #[test]
  fn flow_breaks_before_overflow() {
    let (items, matches) = setup(&["aaa", "bb", "cccc", "d"]);
    let page = paginate(
      &matches,
      &items,
      Some(0),
      Capacity::Flow { budget: 6 },
      &CharWidth,
    );
    assert_eq!(page.start, Some(0));
    assert_eq!(page.end, Some(2));
    assert_eq!(page.prev, Some(0));
  }

  #[test]
  fn flow_clamps_wide_items() {
    let (items, matches) = setup(&["a", "very long entry", "b"]);
    let capacity = Capacity::Flow { budget: 5 };
    let page = paginate(&matches, &items, Some(1), capacity, &CharWidth);
    assert_eq!(page.end, Some(2));
    assert_eq!(page.prev, Some(0));

    let page = paginate(&matches, &items, Some(2), capacity, &CharWidth);
    assert_eq!(page.end, None);
    assert_eq!(page.prev, Some(1));
  }

  #[test]
  fn grid_pages_by_slot_count() {
    let (items, matches) = setup(&["1", "2", "3", "4", "5"]);
    let capacity = Capacity::grid(2, 2);
    let page = paginate(&matches, &items, Some(0), capacity, &CharWidth);
    assert_eq!((page.start, page.end, page.prev), (Some(0), Some(4), Some(0)));
    assert_eq!(page.range(matches.len()), 0..4);

    let page = paginate(&matches, &items, Some(4), capacity, &CharWidth);
    assert_eq!((page.start, page.end, page.prev), (Some(4), None, Some(0)));
    assert!(page.contains(4, matches.len()));
    assert!(!page.contains(3, matches.len()));
  }

  #[test]
  fn grid_prev_walks_a_full_page() {
    let (items, matches) = setup(&["1", "2", "3", "4", "5", "6", "7"]);
    let page = paginate(&matches, &items, Some(6), Capacity::grid(1, 3), &CharWidth);
    assert_eq!(page.prev, Some(3));
  }

  fn words(lens: &[u8]) -> Vec<String> {
    lens.iter().map(|len| "x".repeat(*len as usize % 12)).collect()
  }

  quickcheck::quickcheck! {
    fn flow_page_is_tight(lens: Vec<u8>, start: usize, budget: u8) -> TestResult {
      if lens.is_empty() || budget == 0 {
        return TestResult::discard();
      }
      let texts = words(&lens);
      let items = ItemStore::new(texts.iter().map(Item::new).collect());
      let matches = filter(&items, "", &Delimiters::default(), CaseMatching::Sensitive);
      let capacity = Capacity::Flow { budget: budget as usize };
      let start = start % matches.len();
      let page = paginate(&matches, &items, Some(start), capacity, &CharWidth);

      let cost = |pos: usize| capacity.cost(&texts[pos], &CharWidth);
      let range = page.range(matches.len());
      let used: usize = range.clone().map(cost).sum();
      let fits = used <= capacity.budget();
      let tight = match page.end {
        Some(end) => used + cost(end) > capacity.budget(),
        None => range.end == matches.len(),
      };
      let prev = page.prev.unwrap_or(start);
      let prev_fits = (prev..start).map(cost).sum::<usize>() <= capacity.budget();
      let prev_tight = prev == 0
        || (prev - 1..start).map(cost).sum::<usize>() > capacity.budget();
      TestResult::from_bool(!range.is_empty() && fits && tight && prev_fits && prev_tight)
    }
  }
}
