//! End-to-end behaviour of a menu session driven through events.

use std::io::Cursor;

use the_lib::{
  Event,
  ItemStore,
  Options,
  Outcome,
  Session,
  matcher::CaseMatching,
  viewport::{
    Capacity,
    Measure,
  },
};

/// Each char takes one cell, plus one cell of padding on each side.
struct Padded;

impl Measure for Padded {
  fn text_width(&self, text: &str) -> usize {
    text.chars().count() + 2
  }
}

fn open(input: &str, capacity: Capacity) -> Session {
  let items = ItemStore::from_reader(Cursor::new(input)).expect("in-memory read");
  let options = Options {
    capacity,
    ..Options::default()
  };
  Session::new(items, options, &Padded)
}

fn type_text(session: &mut Session, text: &str) {
  for ch in text.chars() {
    assert_eq!(
      session.handle(Event::Insert(ch.to_string()), &Padded),
      Outcome::Continue
    );
  }
}

fn confirm() -> Event {
  Event::Confirm {
    input_only: false,
    keep_open:  false,
  }
}

fn matched(session: &Session) -> Vec<String> {
  session
    .matches()
    .ids()
    .iter()
    .map(|id| session.items().get(*id).text.clone())
    .collect()
}

#[test]
fn prefix_query_confirms_first_match() {
  let mut session = open("apple\napricot\nbanana\n", Capacity::grid(3, 1));
  type_text(&mut session, "ap");
  assert_eq!(matched(&session), ["apple", "apricot"]);

  session.handle(Event::Right, &Padded);
  assert_eq!(session.selected_item().map(|i| i.text.as_str()), Some("apple"));
  assert_eq!(session.handle(confirm(), &Padded), Outcome::Exit("apple".into()));
}

#[test]
fn confirm_without_match_prints_query() {
  let mut session = open("", Capacity::Flow { budget: 40 });
  assert_eq!(session.selected(), None);
  assert_eq!(session.handle(confirm(), &Padded), Outcome::Exit(String::new()));

  let mut session = open("one\ntwo\n", Capacity::Flow { budget: 40 });
  type_text(&mut session, "three");
  assert_eq!(session.handle(confirm(), &Padded), Outcome::Exit("three".into()));
}

#[test]
fn value_option_is_printed() {
  let mut session = open("--value=ID123 Display Label\n", Capacity::grid(5, 1));
  let item = session.selected_item().expect("one item");
  assert_eq!(item.text, "Display Label");
  assert_eq!(item.value.as_deref(), Some("ID123"));
  assert_eq!(session.handle(confirm(), &Padded), Outcome::Exit("ID123".into()));
}

#[test]
fn erasing_query_restores_full_list() {
  let input = "alpha\nbeta\ngamma\ndelta\n";
  let mut session = open(input, Capacity::Flow { budget: 30 });
  let all = matched(&session);

  type_text(&mut session, "ta");
  assert_eq!(matched(&session), ["beta", "delta"]);
  session.handle(Event::Backspace, &Padded);
  session.handle(Event::Backspace, &Padded);
  assert_eq!(matched(&session), all);
  assert_eq!(session.selected(), Some(0));
  assert_eq!(session.page().start, Some(0));
}

#[test]
fn grid_rows_and_short_last_row() {
  let mut session = open("1\n2\n3\n4\n5\n", Capacity::grid(3, 2));
  session.handle(Event::Down, &Padded);
  assert_eq!(session.selected(), Some(2));

  session.handle(Event::Right, &Padded);
  session.handle(Event::Down, &Padded);
  assert_eq!(session.selected(), Some(3));
}

#[test]
fn grid_window_slides_one_page() {
  let mut session = open("1\n2\n3\n4\n5\n6\n", Capacity::grid(2, 2));
  session.handle(Event::Down, &Padded);
  session.handle(Event::Down, &Padded);
  assert_eq!(session.selected(), Some(4));
  assert_eq!(session.page().start, Some(4));
  assert!(session.has_prev_page());
  assert!(!session.has_next_page());

  let visible: Vec<usize> = session.visible().map(|(pos, _)| pos).collect();
  assert_eq!(visible, [4, 5]);
}

#[test]
fn keep_open_emits_and_marks() {
  let mut session = open("one\ntwo\n", Capacity::grid(2, 1));
  let keep = Event::Confirm {
    input_only: false,
    keep_open:  true,
  };
  assert_eq!(session.handle(keep.clone(), &Padded), Outcome::Emit("one".into()));
  session.handle(Event::Down, &Padded);
  assert_eq!(session.handle(keep, &Padded), Outcome::Emit("two".into()));
  assert!(session.items().iter().all(|(_, item)| item.emitted));
}

#[test]
fn input_only_ignores_selection() {
  let mut session = open("apple\n", Capacity::grid(1, 1));
  type_text(&mut session, "app");
  let event = Event::Confirm {
    input_only: true,
    keep_open:  false,
  };
  assert_eq!(session.handle(event, &Padded), Outcome::Exit("app".into()));
}

#[test]
fn flow_pages_forward_and_back() {
  // Every entry is 4 cells wide, three fit in 12.
  let input = "aa\nbb\ncc\ndd\nee\nff\ngg\n";
  let mut session = open(input, Capacity::Flow { budget: 12 });
  assert_eq!(session.page().range(7), 0..3);

  session.handle(Event::PageDown, &Padded);
  assert_eq!(session.page().range(7), 3..6);
  assert_eq!(session.selected(), Some(3));

  session.handle(Event::End, &Padded);
  assert_eq!(session.selected(), Some(6));
  assert_eq!(session.page().range(7), 4..7);

  session.handle(Event::PageUp, &Padded);
  assert_eq!(session.page().range(7), 1..4);

  session.handle(Event::Home, &Padded);
  assert_eq!(session.selected(), Some(0));
  assert_eq!(session.page().range(7), 0..3);
}

#[test]
fn case_insensitive_option() {
  let items = ItemStore::from_lines(["Firefox", "files"]);
  let options = Options {
    case: CaseMatching::Insensitive,
    capacity: Capacity::grid(2, 1),
    ..Options::default()
  };
  let mut session = Session::new(items, options, &Padded);
  type_text(&mut session, "FI");
  assert_eq!(matched(&session), ["Firefox", "files"]);
}

#[test]
fn cancel_prints_nothing() {
  let mut session = open("a\n", Capacity::grid(1, 1));
  assert_eq!(session.handle(Event::Cancel, &Padded), Outcome::Cancel);
}
