use crate::draw::Surface;
use crate::geometry::{Edges, Point, Rect};
use crate::layout::{WINDOW_FRAME, header_height, row_height, tab_width};
use crate::scroll::{BAR_SIZE, Thumb, Viewport, max_scroll};
use crate::theme::{Color, Theme, darken, lighten};
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::Widget;

/// Draw a single text run if the theme has a font.
fn text(s: &mut dyn Surface, theme: &Theme, pos: Point, color: Color, wrap: bool, text: &str) {
    if let Some(font) = &theme.font {
        s.text(pos, color, font, wrap, text);
    }
}

/// Fill `rect` (clipped to the current clip).
fn fill_rect(s: &mut dyn Surface, rect: Rect, color: Color) {
    s.push_clip(rect);
    s.fill(color);
    s.pop_clip();
}

/// Vertical offset that centers `inner` in `outer`, never negative.
fn center(outer: i32, inner: i32) -> i32 {
    ((outer - inner) / 2).max(0)
}

/// Row state for list-like widgets.
struct Rows<'a> {
    items: &'a [String],
    selected: Option<usize>,
    hovered: Option<usize>,
    offset: i32,
    border: Color,
}

impl WidgetTree {
    /// Render the subtree under `id` using the rects of the last layout.
    pub fn draw(&self, id: WidgetId, s: &mut dyn Surface, current: &Theme) {
        let Some(node) = self.get(id) else {
            return;
        };
        let theme = self.theme_for(id, current);
        let rect = node.rect;

        match &node.widget {
            Widget::Container(_) | Widget::RadioGroup(_) => self.draw_children(id, s, current),
            Widget::ScrollView(sv) => {
                s.push_clip(rect);
                let content = node.children.first().copied();
                if let Some(content) = content {
                    self.draw(content, s, current);
                }
                let content_min = content.map_or(Default::default(), |c| self.min_size(c, current));
                let vp = Viewport::compute(content_min, rect.size());
                let offset = vp.clamp(sv.offset);
                let track_color = lighten(theme.background, 0.1);

                if vp.need_v {
                    let thumb = vp.v_thumb(offset.y);
                    let x = rect.x + vp.outer.width - BAR_SIZE;
                    fill_rect(s, Rect::new(x, rect.y, BAR_SIZE, thumb.track), track_color);
                    fill_rect(
                        s,
                        Rect::new(x, rect.y + thumb.pos, BAR_SIZE, thumb.len),
                        theme.border,
                    );
                }
                if vp.need_h {
                    let thumb = vp.h_thumb(offset.x);
                    let y = rect.y + vp.outer.height - BAR_SIZE;
                    fill_rect(s, Rect::new(rect.x, y, thumb.track, BAR_SIZE), track_color);
                    fill_rect(
                        s,
                        Rect::new(rect.x + thumb.pos, y, thumb.len, BAR_SIZE),
                        theme.border,
                    );
                }
                if vp.need_v && vp.need_h {
                    let corner = Rect::new(
                        rect.right() - BAR_SIZE,
                        rect.bottom() - BAR_SIZE,
                        BAR_SIZE,
                        BAR_SIZE,
                    );
                    fill_rect(s, corner, darken(theme.background, 0.3));
                }
                s.pop_clip();
            }
            Widget::Panel => {
                s.push_clip(rect);
                if theme.background[3] > 0.0 {
                    s.fill(theme.background);
                }
                if theme.border[3] > 0.0 {
                    s.border(theme.border);
                }
                self.draw_children(id, s, current);
                s.pop_clip();
            }
            Widget::Label(l) => {
                s.push_clip(rect);
                let y = center(rect.height, theme.line_height());
                text(s, theme, Point::new(rect.x, rect.y + y), theme.text, true, &l.text);
                s.pop_clip();
            }
            Widget::Button(b) => {
                s.push_clip(rect);
                let bg = if b.pressed {
                    darken(theme.button, 0.2)
                } else if b.hovered {
                    theme.button_hover
                } else {
                    theme.button
                };
                s.fill(bg);
                s.border(theme.border);
                let extent = theme.measure(&b.text);
                let pos = Point::new(
                    rect.x + center(rect.width, extent.width),
                    rect.y + center(rect.height, extent.height),
                );
                text(s, theme, pos, theme.text, false, &b.text);
                s.pop_clip();
            }
            Widget::Checkbox(c) => {
                s.push_clip(rect);
                if c.focused {
                    s.fill(lighten(theme.background, 0.1));
                }
                let lh = theme.line_height();
                let y = rect.y + center(rect.height, lh);
                let check = Rect::new(rect.x + theme.padding.left, y, lh, lh);
                s.push_clip(check);
                s.border(theme.text);
                s.pop_clip();
                if c.checked {
                    fill_rect(s, check.inset(Edges::all(3)), theme.primary);
                }
                let pos = Point::new(check.right() + theme.spacing, y);
                text(s, theme, pos, theme.text, false, &c.label);
                s.pop_clip();
            }
            Widget::Radio(r) => {
                s.push_clip(rect);
                if r.focused {
                    s.fill(lighten(theme.background, 0.1));
                } else if r.hovered {
                    s.fill(lighten(theme.background, 0.05));
                }
                let lh = theme.line_height();
                let y = rect.y + center(rect.height, lh);
                let mark = Rect::new(rect.x + theme.padding.left, y, lh, lh);
                s.push_clip(mark);
                s.border(theme.text);
                s.pop_clip();
                if self.is_radio_selected(id) {
                    fill_rect(s, mark.inset(Edges::all(4)), theme.primary);
                }
                let pos = Point::new(mark.right() + theme.spacing, y);
                text(s, theme, pos, theme.text, false, &r.label);
                s.pop_clip();
            }
            Widget::TextArea(t) => {
                s.push_clip(rect);
                let bg = if t.focused {
                    lighten(theme.background, 0.1)
                } else {
                    darken(theme.background, 0.1)
                };
                s.fill(bg);
                s.border(theme.border);
                let inner = rect.inset(theme.padding);
                s.push_clip(inner);
                if t.focused {
                    let shown = format!("{}|", t.text);
                    text(s, theme, inner.origin(), theme.text, true, &shown);
                } else {
                    text(s, theme, inner.origin(), theme.text, true, &t.text);
                }
                s.pop_clip();
                s.pop_clip();
            }
            Widget::TextInput(t) => {
                s.push_clip(rect);
                let bg = if t.focused {
                    lighten(theme.background, 0.1)
                } else {
                    darken(theme.background, 0.1)
                };
                s.fill(bg);
                s.border(theme.border);

                let inner = rect.inset(theme.padding);
                s.push_clip(inner);
                let shown = t.display_text();
                text(s, theme, inner.origin(), theme.text, false, &shown);
                if t.focused {
                    let before: String = shown.chars().take(t.cursor).collect();
                    let x = inner.x + theme.measure(&before).width;
                    fill_rect(s, Rect::new(x, inner.y, 1, theme.line_height()), theme.text);
                }
                s.pop_clip();
                s.pop_clip();
            }
            Widget::List(l) => {
                let border = if l.focused {
                    theme.primary
                } else {
                    theme.border
                };
                draw_rows(
                    s,
                    theme,
                    rect,
                    &Rows {
                        items: &l.items,
                        selected: l.selected,
                        hovered: l.hovered,
                        offset: l.scroll.offset,
                        border,
                    },
                );
            }
            Widget::Select(sel) => {
                s.push_clip(rect);
                s.fill(theme.button);
                s.border(theme.border);
                let label = sel
                    .selected
                    .and_then(|i| sel.items.get(i))
                    .map_or("Select...", String::as_str);
                let pos = Point::new(
                    rect.x + theme.padding.left,
                    rect.y + center(rect.height, theme.line_height()),
                );
                text(s, theme, pos, theme.text, false, label);
                s.pop_clip();
            }
            Widget::SelectList(list) => {
                let Some(Widget::Select(sel)) = self.widget(list.select) else {
                    return;
                };
                let theme = self.theme_for(list.select, current);
                draw_rows(
                    s,
                    theme,
                    rect,
                    &Rows {
                        items: &sel.items,
                        selected: sel.selected,
                        hovered: sel.hovered,
                        offset: list.scroll.offset,
                        border: theme.border,
                    },
                );
            }
            Widget::MenuBar(_) => {
                fill_rect(s, rect, darken(theme.background, 0.1));
                self.draw_children(id, s, current);
            }
            Widget::PopupMenu(_) => {
                fill_rect(s, rect, darken(theme.background, 0.1));
                self.draw_children(id, s, current);
                // Border on top of the items.
                s.push_clip(rect);
                s.border(theme.border);
                s.pop_clip();
            }
            Widget::MenuItem(m) => {
                s.push_clip(rect);
                if m.hovered {
                    s.fill(theme.primary);
                }
                let pos = Point::new(
                    rect.x + theme.padding.left,
                    rect.y + center(rect.height, theme.line_height()),
                );
                text(s, theme, pos, theme.text, false, &m.text);
                s.pop_clip();
            }
            Widget::Window(w) => {
                if w.show_frame {
                    fill_rect(s, rect, theme.border);
                    fill_rect(s, rect.inset(Edges::all(WINDOW_FRAME)), theme.background);
                } else {
                    fill_rect(s, rect, theme.background);
                }
                if w.show_header {
                    let frame = if w.show_frame { WINDOW_FRAME } else { 0 };
                    let header = header_height(theme);
                    let header_rect =
                        Rect::new(rect.x + frame, rect.y + frame, rect.width - frame * 2, header);
                    s.push_clip(header_rect);
                    s.fill(theme.primary);
                    let pos = Point::new(
                        header_rect.x + theme.padding.left,
                        header_rect.y + center(header, theme.line_height()),
                    );
                    text(s, theme, pos, theme.text, false, &w.title);
                    s.pop_clip();
                }
                self.draw_children(id, s, current);
            }
            Widget::Tabs(t) => {
                let header = header_height(theme);
                let strip = Rect::new(rect.x, rect.y, rect.width, header);
                s.push_clip(strip);
                s.fill(darken(theme.background, 0.2));
                let mut x = rect.x;
                for (i, title) in t.titles.iter().enumerate() {
                    let w = tab_width(theme, title);
                    s.push_clip(Rect::new(x, rect.y, w, header));
                    s.fill(if i == t.active {
                        theme.background
                    } else {
                        theme.button
                    });
                    s.border(theme.border);
                    let pos = Point::new(
                        x + theme.padding.left,
                        rect.y + center(header, theme.line_height()),
                    );
                    text(s, theme, pos, theme.text, false, title);
                    s.pop_clip();
                    x += w;
                }
                s.pop_clip();

                let body = Rect::new(
                    rect.x,
                    rect.y + header,
                    rect.width,
                    (rect.height - header).max(0),
                );
                fill_rect(s, body, darken(theme.background, 0.2));
                self.draw_children(id, s, current);
            }
        }
    }

    fn draw_children(&self, id: WidgetId, s: &mut dyn Surface, current: &Theme) {
        for child in self.live_children(id) {
            self.draw(child, s, current);
        }
    }
}

/// Bordered row list with an optional vertical scrollbar. Only rows that
/// intersect the viewport are emitted.
fn draw_rows(s: &mut dyn Surface, theme: &Theme, rect: Rect, rows: &Rows<'_>) {
    s.push_clip(rect);
    s.fill(theme.background);
    s.border(rows.border);

    let rh = row_height(theme);
    let viewport_h = rect.height - 2;
    let content_h = rows.items.len() as i32 * rh;
    let max = max_scroll(content_h, viewport_h);
    let mut content_w = rect.width - 2;
    if max > 0 {
        content_w -= BAR_SIZE;
    }
    let content = Rect::new(rect.x + 1, rect.y + 1, content_w, viewport_h);

    if rh > 0 {
        s.push_clip(content);
        let start = (rows.offset / rh).max(0) as usize;
        let end = (((rows.offset + viewport_h + rh - 1) / rh).max(0) as usize).min(rows.items.len());
        for i in start..end {
            let y = content.y + i as i32 * rh - rows.offset;
            let bg = if Some(i) == rows.selected {
                Some(theme.primary)
            } else if Some(i) == rows.hovered {
                Some(theme.secondary)
            } else {
                None
            };
            if let Some(bg) = bg {
                fill_rect(s, Rect::new(content.x, y, content_w, rh), bg);
            }
            let pos = Point::new(
                content.x + theme.padding.left,
                y + (rh - theme.line_height()) / 2,
            );
            text(s, theme, pos, theme.text, false, &rows.items[i]);
        }
        s.pop_clip();
    }

    if max > 0 {
        let thumb = Thumb::new(viewport_h, content_h, rows.offset, max);
        let x = rect.right() - BAR_SIZE - 1;
        fill_rect(
            s,
            Rect::new(x, rect.y + 1, BAR_SIZE, viewport_h),
            lighten(theme.background, 0.1),
        );
        fill_rect(
            s,
            Rect::new(x, rect.y + 1 + thumb.pos, BAR_SIZE, thumb.len),
            theme.border,
        );
    }
    s.pop_clip();
}
