//! The navigation state machine.
//!
//! A [`Session`] owns everything that changes while the menu is open: the
//! query line, the matched sequence, the visible page and the selection.
//! Frontends translate key and pointer input into [`Event`]s and feed them to
//! [`Session::handle`] one at a time; each event runs to completion and
//! reports an [`Outcome`].
//!
//! Invariants kept across every transition:
//!
//! - the selection is `None` exactly when nothing matched;
//! - whenever the page moves, the selection ends up inside it;
//! - any change to the query text rebuilds the matches and resets page and
//!   selection to the first match.

use tracing::{
  debug,
  trace,
};

use crate::{
  icon::{
    self,
    IconLoader,
  },
  item::{
    Item,
    ItemId,
    ItemStore,
  },
  matcher::{
    CaseMatching,
    Matches,
    filter,
  },
  query::Query,
  tokenizer::Delimiters,
  viewport::{
    Capacity,
    Measure,
    Page,
    paginate,
  },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
  pub case:       CaseMatching,
  pub delimiters: Delimiters,
  pub capacity:   Capacity,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      case:       CaseMatching::Sensitive,
      delimiters: Delimiters::default(),
      capacity:   Capacity::Flow { budget: 80 },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  /// Typed text, inserted at the cursor. Control characters are dropped.
  Insert(String),
  /// Pasted text. Only the first line is inserted.
  Paste(String),
  Backspace,
  Delete,
  /// Select the previous match when the layout runs horizontally, otherwise
  /// move the cursor.
  Left,
  /// Select the next match when the layout runs horizontally, otherwise
  /// move the cursor.
  Right,
  CursorLeft,
  CursorRight,
  WordLeft,
  WordRight,
  DeleteToStart,
  DeleteToEnd,
  DeleteWord,
  /// Pointer clicked the input field. Removes the text before the cursor,
  /// which is the whole query unless the cursor was moved.
  ClearQuery,
  SelectPrev,
  SelectNext,
  Up,
  Down,
  PageUp,
  PageDown,
  Home,
  End,
  /// Copy the selected item's text into the query.
  Complete,
  Confirm {
    /// Print the query text even if an item is selected.
    input_only: bool,
    /// Stay open after printing.
    keep_open:  bool,
  },
  Cancel,
  /// Pointer moved over the match at the given position.
  Hover(usize),
  /// Pointer clicked the match at the given position.
  Pick { pos: usize, keep_open: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Continue,
  /// Print the line and keep running.
  Emit(String),
  /// Print the line and exit successfully.
  Exit(String),
  /// Exit with failure, printing nothing.
  Cancel,
}

#[derive(Debug, Clone)]
pub struct Session {
  items:    ItemStore,
  options:  Options,
  query:    Query,
  matches:  Matches,
  page:     Page,
  selected: Option<usize>,
}

impl Session {
  pub fn new(items: ItemStore, options: Options, measure: &dyn Measure) -> Self {
    let mut session = Self {
      items,
      options,
      query: Query::new(),
      matches: Matches::default(),
      page: Page::default(),
      selected: None,
    };
    session.refilter(measure);
    session
  }

  pub fn items(&self) -> &ItemStore {
    &self.items
  }

  pub fn options(&self) -> &Options {
    &self.options
  }

  pub fn query(&self) -> &Query {
    &self.query
  }

  pub fn matches(&self) -> &Matches {
    &self.matches
  }

  pub fn page(&self) -> Page {
    self.page
  }

  /// Position of the selected match.
  pub fn selected(&self) -> Option<usize> {
    self.selected
  }

  pub fn selected_item(&self) -> Option<&Item> {
    self.selected_id().map(|id| self.items.get(id))
  }

  /// Matches on the current page, with their positions.
  pub fn visible(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
    self
      .page
      .range(self.matches.len())
      .map(|pos| (pos, self.items.get(self.matches.ids()[pos])))
  }

  /// Whether there are matches before the current page.
  pub fn has_prev_page(&self) -> bool {
    self.page.start.is_some_and(|start| start > 0)
  }

  pub fn has_next_page(&self) -> bool {
    self.page.end.is_some()
  }

  /// Changes the display capacity, e.g. after a resize.
  pub fn set_capacity(&mut self, capacity: Capacity, measure: &dyn Measure) {
    if self.options.capacity == capacity {
      return;
    }
    self.options.capacity = capacity;
    self.repage(self.page.start, measure);
    if let Some(selected) = self.selected {
      if !self.page.contains(selected, self.matches.len()) {
        self.repage(Some(selected), measure);
      }
    }
  }

  /// Advances the selection `count` times, as if pressing Right.
  ///
  /// A negative count is taken relative to the number of grid rows.
  pub fn preselect(&mut self, count: isize, measure: &dyn Measure) {
    let count = if count < 0 {
      let rows = match self.options.capacity {
        Capacity::Grid { rows, .. } => rows as isize,
        Capacity::Flow { .. } => 0,
      };
      rows + count
    } else {
      count
    };
    for _ in 0..count.max(0) {
      if !self.select_next(measure) {
        break;
      }
    }
  }

  /// Resolves icons of the visible items that were not tried yet.
  pub fn resolve_icons<L>(&mut self, icon_command: Option<&str>, loader: &mut L)
  where
    L: IconLoader + ?Sized,
  {
    for pos in self.page.range(self.matches.len()) {
      let id = self.matches.ids()[pos];
      icon::resolve(self.items.get_mut(id), icon_command, loader);
    }
  }

  pub fn handle(&mut self, event: Event, measure: &dyn Measure) -> Outcome {
    trace!(?event, "handling event");
    match event {
      Event::Insert(text) => {
        let text: String = text.chars().filter(|ch| !ch.is_control()).collect();
        self.edit(measure, |query, _| query.insert(&text));
      },
      Event::Paste(text) => {
        let line = text.split('\n').next().unwrap_or_default();
        self.edit(measure, |query, _| query.insert(line));
      },
      Event::Backspace => self.edit(measure, |query, _| query.backspace()),
      Event::Delete => self.edit(measure, |query, _| query.delete()),
      Event::DeleteToStart | Event::ClearQuery => {
        self.edit(measure, |query, _| query.delete_to_start())
      },
      Event::DeleteToEnd => self.edit(measure, |query, _| query.delete_to_end()),
      Event::DeleteWord => self.edit(measure, Query::delete_word),
      Event::Left => {
        if !(self.runs_horizontally() && self.select_prev(measure)) {
          self.query.move_left();
        }
      },
      Event::Right => {
        if !(self.runs_horizontally() && self.select_next(measure)) {
          self.query.move_right();
        }
      },
      Event::CursorLeft => {
        self.query.move_left();
      },
      Event::CursorRight => {
        self.query.move_right();
      },
      Event::WordLeft => {
        self.query.word_left(&self.options.delimiters);
      },
      Event::WordRight => {
        self.query.word_right(&self.options.delimiters);
      },
      Event::SelectPrev => {
        self.select_prev(measure);
      },
      Event::SelectNext => {
        self.select_next(measure);
      },
      Event::Up => self.select_up(measure),
      Event::Down => self.select_down(measure),
      Event::PageUp => self.page_up(measure),
      Event::PageDown => self.page_down(measure),
      Event::Home => {
        if !self.query.move_to_start() {
          self.jump_to_first(measure);
        }
      },
      Event::End => {
        if !self.query.move_to_end() {
          self.jump_to_last(measure);
        }
      },
      Event::Complete => {
        if let Some(id) = self.selected_id() {
          let text = self.items.get(id).text.clone();
          self.query.set(&text);
          self.refilter(measure);
        }
      },
      Event::Confirm {
        input_only,
        keep_open,
      } => return self.confirm(input_only, keep_open),
      Event::Cancel => return Outcome::Cancel,
      Event::Hover(pos) => {
        if self.page.contains(pos, self.matches.len()) {
          self.selected = Some(pos);
        }
      },
      Event::Pick { pos, keep_open } => {
        if self.page.contains(pos, self.matches.len()) {
          self.selected = Some(pos);
          return self.confirm(false, keep_open);
        }
      },
    }
    Outcome::Continue
  }

  fn selected_id(&self) -> Option<ItemId> {
    self.selected.and_then(|pos| self.matches.get(pos))
  }

  fn runs_horizontally(&self) -> bool {
    match self.options.capacity {
      Capacity::Flow { .. } => true,
      Capacity::Grid { columns, .. } => columns > 1,
    }
  }

  /// Applies a query edit and refilters if the text changed.
  fn edit<F>(&mut self, measure: &dyn Measure, f: F)
  where
    F: FnOnce(&mut Query, &Delimiters) -> bool,
  {
    if f(&mut self.query, &self.options.delimiters) {
      self.refilter(measure);
    }
  }

  fn refilter(&mut self, measure: &dyn Measure) {
    self.matches = filter(
      &self.items,
      self.query.text(),
      &self.options.delimiters,
      self.options.case,
    );
    self.selected = self.matches.first();
    self.repage(self.selected, measure);
    debug!(
      query = self.query.text(),
      matched = self.matches.len(),
      "refiltered"
    );
  }

  fn repage(&mut self, start: Option<usize>, measure: &dyn Measure) {
    self.page = paginate(
      &self.matches,
      &self.items,
      start,
      self.options.capacity,
      measure,
    );
    trace!(page = ?self.page, "repaginated");
  }

  fn select_prev(&mut self, measure: &dyn Measure) -> bool {
    let Some(selected) = self.selected.filter(|pos| *pos > 0) else {
      return false;
    };
    self.selected = Some(selected - 1);
    if self.page.start == Some(selected) {
      self.repage(self.page.prev, measure);
    }
    true
  }

  fn select_next(&mut self, measure: &dyn Measure) -> bool {
    let Some(target) = self
      .selected
      .map(|pos| pos + 1)
      .filter(|pos| *pos < self.matches.len())
    else {
      return false;
    };
    self.selected = Some(target);
    if self.page.end == Some(target) {
      self.repage(Some(target), measure);
    }
    true
  }

  /// Moves one grid row up. A walk that runs out of matches before a full
  /// row is a no-op unless it already crossed into the previous page.
  fn select_up(&mut self, measure: &dyn Measure) {
    let Capacity::Grid { columns, .. } = self.options.capacity else {
      self.select_prev(measure);
      return;
    };
    let Some(mut target) = self.selected else {
      return;
    };

    let mut offscreen = false;
    for _ in 0..columns {
      if target == 0 {
        if offscreen {
          break;
        }
        return;
      }
      if self.page.start == Some(target) {
        offscreen = true;
      }
      target -= 1;
    }

    self.selected = Some(target);
    if offscreen {
      self.repage(self.page.prev, measure);
    }
  }

  /// Moves one grid row down. A short last row with no match below the
  /// selection is a no-op unless the walk already crossed the page end.
  fn select_down(&mut self, measure: &dyn Measure) {
    let Capacity::Grid { columns, .. } = self.options.capacity else {
      self.select_next(measure);
      return;
    };
    let Some(mut target) = self.selected else {
      return;
    };

    let mut offscreen = false;
    for _ in 0..columns {
      if target + 1 >= self.matches.len() {
        if offscreen {
          break;
        }
        return;
      }
      target += 1;
      if self.page.end == Some(target) {
        offscreen = true;
      }
    }

    self.selected = Some(target);
    if offscreen {
      self.repage(self.page.end, measure);
    }
  }

  fn page_down(&mut self, measure: &dyn Measure) {
    let Some(next) = self.page.end else {
      return;
    };
    self.selected = Some(next);
    self.repage(Some(next), measure);
  }

  fn page_up(&mut self, measure: &dyn Measure) {
    let Some(prev) = self.page.prev else {
      return;
    };
    self.selected = Some(prev);
    self.repage(Some(prev), measure);
  }

  fn jump_to_first(&mut self, measure: &dyn Measure) {
    self.selected = self.matches.first();
    self.repage(self.selected, measure);
  }

  /// Selects the last match and lays out the final page so that it ends
  /// on it, filled as far back as the capacity allows.
  fn jump_to_last(&mut self, measure: &dyn Measure) {
    let Some(last) = self.matches.last() else {
      return;
    };
    if self.page.end.is_some() {
      self.repage(Some(last), measure);
      self.repage(self.page.prev, measure);
      while self.page.end.is_some() {
        let start = self.page.start.map(|start| start + 1);
        self.repage(start, measure);
      }
    }
    self.selected = Some(last);
  }

  fn confirm(&mut self, input_only: bool, keep_open: bool) -> Outcome {
    let selected = self.selected_id();
    let line = match selected {
      Some(id) if !input_only => self.items.get(id).output().to_string(),
      _ => self.query.text().to_string(),
    };
    if !keep_open {
      debug!(%line, "confirmed");
      return Outcome::Exit(line);
    }
    if let Some(id) = selected {
      self.items.get_mut(id).emitted = true;
    }
    Outcome::Emit(line)
  }
}
