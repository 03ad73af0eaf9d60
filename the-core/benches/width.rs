//! Benchmarks for display width measurement in the-core.
//!
//! Run with: `cargo bench -p the-core --bench width`

use divan::{
  Bencher,
  black_box,
};
use the_core::width::{
  str_width,
  truncate_to_width,
};

fn main() {
  divan::main();
}

mod measure {
  use super::*;

  #[divan::bench]
  fn ascii(bencher: Bencher) {
    bencher.bench(|| str_width(black_box("firefox --private-window")));
  }

  #[divan::bench]
  fn cjk(bencher: Bencher) {
    bencher.bench(|| str_width(black_box("日本語のテキスト")));
  }
}

mod truncate {
  use super::*;

  #[divan::bench]
  fn ascii(bencher: Bencher) {
    bencher.bench(|| truncate_to_width(black_box("a fairly long menu entry label"), black_box(12)));
  }

  #[divan::bench]
  fn combining(bencher: Bencher) {
    bencher.bench(|| truncate_to_width(black_box("e\u{301}e\u{301}e\u{301}e\u{301}"), black_box(2)));
  }
}
