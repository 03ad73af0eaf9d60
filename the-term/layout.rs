use ratatui::prelude::Rect;
use the_lib::{
  Item,
  viewport::{
    Capacity,
    Measure,
  },
};

/// Width of a page arrow, `<` or `>` with padding.
pub const ARROW_WIDTH: u16 = 3;

/// Sizes that do not depend on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuMetrics {
  /// Prompt width including padding, zero without a prompt.
  pub prompt_width: u16,
  /// Widest item, used as the input width in flow layout.
  pub widest_item:  u16,
  /// Grid rows, zero for flow layout.
  pub rows:         u16,
  pub columns:      u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuLayout {
  pub area:       Rect,
  pub prompt:     Rect,
  pub input:      Rect,
  /// Flow layout only.
  pub prev_arrow: Rect,
  /// Flow layout only.
  pub next_arrow: Rect,
  /// Where items are drawn.
  pub list:       Rect,
  pub rows:       u16,
  /// Zero in flow layout.
  pub columns:    u16,
}

impl MenuLayout {
  pub fn is_grid(&self) -> bool {
    self.columns > 0
  }

  pub fn capacity(&self) -> Capacity {
    if self.is_grid() {
      Capacity::grid(self.rows as usize, self.columns as usize)
    } else {
      Capacity::Flow {
        budget: self.list.width as usize,
      }
    }
  }

  fn cell_width(&self) -> u16 {
    self.list.width / self.columns.max(1)
  }
}

pub fn compute_menu_layout(area: Rect, metrics: &MenuMetrics) -> MenuLayout {
  let prompt_width = metrics.prompt_width.min(area.width);
  let prompt = Rect::new(area.x, area.y, prompt_width, area.height.min(1));
  let after_prompt = area.x + prompt_width;
  let rest = area.width - prompt_width;

  // Grid needs a row below the input, otherwise fall back to flow.
  let rows = metrics.rows.min(area.height.saturating_sub(1));
  if rows > 0 && metrics.columns > 0 {
    return MenuLayout {
      area: Rect::new(area.x, area.y, area.width, (rows + 1).min(area.height)),
      prompt,
      input: Rect::new(after_prompt, area.y, rest, area.height.min(1)),
      list: Rect::new(after_prompt, area.y + 1, rest, rows),
      rows,
      columns: metrics.columns,
      ..Default::default()
    };
  }

  let height = area.height.min(1);
  let input_width = metrics.widest_item.min(area.width / 3).min(rest);
  let input = Rect::new(after_prompt, area.y, input_width, height);
  let arrows_x = input.x + input.width;
  let remaining = area.right().saturating_sub(arrows_x);
  let prev_arrow = Rect::new(arrows_x, area.y, ARROW_WIDTH.min(remaining), height);
  let next_width = ARROW_WIDTH.min(remaining - prev_arrow.width);
  let next_arrow = Rect::new(area.right() - next_width, area.y, next_width, height);
  let list_x = prev_arrow.right();
  let list = Rect::new(list_x, area.y, next_arrow.x - list_x, height);

  MenuLayout {
    area: Rect::new(area.x, area.y, area.width, height),
    prompt,
    input,
    prev_arrow,
    next_arrow,
    list,
    rows: 0,
    columns: 0,
  }
}

/// A visible match and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
  pub pos:  usize,
  pub rect: Rect,
}

/// Places the visible matches: left to right in flow layout, row by row in
/// grid layout.
pub fn place_items<'a, I>(layout: &MenuLayout, visible: I, measure: &dyn Measure) -> Vec<Placed>
where
  I: IntoIterator<Item = (usize, &'a Item)>,
{
  let list = layout.list;
  let mut placed = Vec::new();

  if layout.is_grid() {
    let width = layout.cell_width();
    for (idx, (pos, _)) in visible.into_iter().enumerate() {
      let row = (idx / layout.columns as usize) as u16;
      let column = (idx % layout.columns as usize) as u16;
      if row >= layout.rows {
        break;
      }
      placed.push(Placed {
        pos,
        rect: Rect::new(list.x + column * width, list.y + row, width, 1),
      });
    }
    return placed;
  }

  let mut x = list.x;
  for (pos, item) in visible {
    let available = list.right().saturating_sub(x);
    let width = (measure.text_width(&item.text) as u16).min(available);
    if width == 0 {
      break;
    }
    placed.push(Placed {
      pos,
      rect: Rect::new(x, list.y, width, list.height),
    });
    x += width;
  }
  placed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
  Input,
  PrevPage,
  NextPage,
  Item(usize),
}

/// Finds what is under the pointer. In flow layout a hidden previous-page
/// arrow counts as part of the input field.
pub fn hit_test(
  layout: &MenuLayout,
  placed: &[Placed],
  has_prev_page: bool,
  x: u16,
  y: u16,
) -> Option<Hit> {
  if let Some(item) = placed.iter().find(|item| point_in_rect(x, y, item.rect)) {
    return Some(Hit::Item(item.pos));
  }
  if layout.is_grid() {
    return (y == layout.area.y && point_in_rect(x, y, layout.area)).then_some(Hit::Input);
  }
  if point_in_rect(x, y, layout.prompt) || point_in_rect(x, y, layout.input) {
    return Some(Hit::Input);
  }
  if point_in_rect(x, y, layout.prev_arrow) {
    return Some(if has_prev_page {
      Hit::PrevPage
    } else {
      Hit::Input
    });
  }
  point_in_rect(x, y, layout.next_arrow).then_some(Hit::NextPage)
}

pub fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
  x >= rect.x
    && y >= rect.y
    && x < rect.x.saturating_add(rect.width)
    && y < rect.y.saturating_add(rect.height)
}
