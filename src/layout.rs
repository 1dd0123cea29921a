use crate::geometry::{Edges, Point, Rect, Size};
use crate::scroll::{BAR_SIZE, Viewport, max_scroll};
use crate::theme::Theme;
use crate::tree::{Children, WidgetId, WidgetTree};
use crate::widget::{Axis, Checkbox, Container, Radio, RadioGroup, Widget};

/// Frame thickness around a window.
pub(crate) const WINDOW_FRAME: i32 = 2;
/// Rows shown by a list's min-size and by a select drop-down.
pub(crate) const MAX_VISIBLE_ROWS: usize = 5;

/// Height of one list / select row.
pub(crate) fn row_height(theme: &Theme) -> i32 {
    theme.line_height() + 2
}

/// Height of window headers, tab strips and menu bars.
pub(crate) fn header_height(theme: &Theme) -> i32 {
    theme.line_height() + theme.padding.vertical()
}

/// Width of one tab title cell.
pub(crate) fn tab_width(theme: &Theme, title: &str) -> i32 {
    theme.measure(title).width + theme.padding.horizontal()
}

/// Height of a list viewport showing `rows` rows plus its 1px border.
pub(crate) fn rows_height(theme: &Theme, rows: usize) -> i32 {
    rows.min(MAX_VISIBLE_ROWS) as i32 * row_height(theme) + 2
}

fn widest(theme: &Theme, items: &[String]) -> i32 {
    items
        .iter()
        .map(|s| theme.measure(s).width)
        .max()
        .unwrap_or(0)
}

impl WidgetTree {
    /// Close button and content of a window, if present.
    pub(crate) fn window_parts(&self, id: WidgetId) -> (Option<WidgetId>, Option<WidgetId>) {
        let Some(Widget::Window(win)) = self.widget(id) else {
            return (None, None);
        };
        let close = win.close_button;
        let content = self
            .children(id)
            .iter()
            .copied()
            .find(|c| Some(*c) != close);
        (close, content)
    }

    // ------------------------------------------------------------------
    // Min size
    // ------------------------------------------------------------------

    /// Smallest size `id` can be laid out at without clipping its content.
    pub fn min_size(&self, id: WidgetId, current: &Theme) -> Size {
        let Some(node) = self.get(id) else {
            return Size::ZERO;
        };
        let theme = self.theme_for(id, current);

        match &node.widget {
            Widget::Container(Container { axis, .. })
            | Widget::RadioGroup(RadioGroup { axis, .. }) => {
                let mut total = Size::ZERO;
                let n = node.children.len();
                for (i, &child) in node.children.iter().enumerate() {
                    let sz = self.min_size(child, current);
                    let gap = if i + 1 < n { theme.spacing } else { 0 };
                    match axis {
                        Axis::Vertical => {
                            total.width = total.width.max(sz.width);
                            total.height += sz.height + gap;
                        }
                        Axis::Horizontal => {
                            total.height = total.height.max(sz.height);
                            total.width += sz.width + gap;
                        }
                    }
                }
                total
            }
            Widget::ScrollView(s) => {
                let width = if s.width > 0 {
                    s.width
                } else {
                    node.children
                        .first()
                        .map_or(BAR_SIZE, |&c| self.min_size(c, current).width + BAR_SIZE)
                };
                let height = if s.height > 0 { s.height } else { 100 };
                Size::new(width, height)
            }
            Widget::Panel => {
                let content = node
                    .children
                    .first()
                    .map_or(Size::ZERO, |&c| self.min_size(c, current));
                Size::new(
                    content.width + theme.padding.horizontal(),
                    content.height + theme.padding.vertical(),
                )
            }
            Widget::Label(l) => theme.measure(&l.text),
            Widget::Button(b) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                let text = theme.measure(&b.text);
                Size::new(
                    text.width + theme.padding.horizontal() * 2,
                    text.height + theme.padding.vertical() * 2,
                )
            }
            Widget::Checkbox(Checkbox { label, .. }) | Widget::Radio(Radio { label, .. }) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                let lh = theme.line_height();
                let text = theme.measure(label);
                Size::new(
                    lh + theme.spacing + text.width + theme.padding.horizontal(),
                    lh + theme.padding.vertical(),
                )
            }
            Widget::TextInput(t) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                let width = if t.width > 0 {
                    t.width
                } else {
                    let text = theme.measure(&format!("{}|", t.text)).width;
                    text.max(theme.measure("MMMMMMMMMM").width)
                };
                Size::new(
                    width + theme.padding.horizontal(),
                    theme.line_height() + theme.padding.vertical(),
                )
            }
            Widget::TextArea(t) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                let width = if t.width > 0 { t.width } else { 100 };
                let height = if t.height > 0 {
                    t.height
                } else {
                    theme.line_height() * 3
                };
                Size::new(width, height)
            }
            Widget::List(l) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                Size::new(
                    widest(theme, &l.items) + theme.padding.horizontal() + BAR_SIZE,
                    rows_height(theme, l.items.len()),
                )
            }
            Widget::Select(s) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                Size::new(
                    widest(theme, &s.items) + theme.padding.horizontal() * 2,
                    row_height(theme) + theme.padding.vertical(),
                )
            }
            Widget::SelectList(l) => match self.widget(l.select) {
                Some(Widget::Select(s)) => Size::new(
                    self.rect(l.select).width,
                    rows_height(self.theme_for(l.select, current), s.items.len()),
                ),
                _ => Size::ZERO,
            },
            Widget::MenuBar(_) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                let width = node
                    .children
                    .iter()
                    .map(|&c| self.min_size(c, current).width)
                    .sum();
                Size::new(width, header_height(theme))
            }
            Widget::PopupMenu(_) => {
                let mut total = Size::ZERO;
                for &item in &node.children {
                    let sz = self.min_size(item, current);
                    total.width = total.width.max(sz.width);
                    total.height += sz.height;
                }
                total
            }
            Widget::MenuItem(m) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                Size::new(
                    theme.measure(&m.text).width + theme.spacing + theme.padding.horizontal(),
                    theme.line_height() + theme.padding.vertical(),
                )
            }
            Widget::Window(w) => {
                let (_, content) = self.window_parts(id);
                let mut size = content.map_or(Size::ZERO, |c| self.min_size(c, current));
                if w.show_frame {
                    size.width += WINDOW_FRAME * 2;
                    size.height += WINDOW_FRAME * 2;
                }
                if w.show_header {
                    let header = header_height(theme);
                    size.height += header;
                    let mut title = theme.measure(&w.title).width + theme.padding.horizontal();
                    if w.closable {
                        title += header;
                    }
                    size.width = size.width.max(title);
                }
                size
            }
            Widget::Tabs(t) => {
                if theme.font.is_none() {
                    return Size::ZERO;
                }
                let mut pages = Size::ZERO;
                for &page in &node.children {
                    pages = pages.max(self.min_size(page, current));
                }
                let strip: i32 = t.titles.iter().map(|title| tab_width(theme, title)).sum();
                Size::new(pages.width.max(strip), pages.height + header_height(theme))
            }
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Lay out the subtree under `id`. The node's own rect must already be
    /// set by its parent; children get absolute rects.
    pub fn layout(&mut self, id: WidgetId, available: Size, current: &Theme) -> Size {
        let Some(node) = self.get(id) else {
            return Size::ZERO;
        };
        let rect = node.rect;

        match &node.widget {
            Widget::Container(c) => {
                let c = *c;
                self.layout_container(id, c, rect, available, current)
            }
            Widget::RadioGroup(g) => {
                let c = Container {
                    axis: g.axis,
                    stretch: false,
                };
                self.layout_container(id, c, rect, available, current)
            }
            Widget::ScrollView(_) => {
                self.layout_scroll_view(id, rect, current);
                available
            }
            Widget::Panel => {
                let inner = rect.inset(self.theme_for(id, current).padding);
                if let Some(&content) = self.children(id).first() {
                    self.set_rect(content, inner);
                    self.layout(content, inner.size(), current);
                }
                available
            }
            Widget::MenuBar(_) => {
                let mut x = rect.x;
                for header in self.live_children(id) {
                    let sz = self.min_size(header, current);
                    let r = Rect::new(x, rect.y, sz.width, rect.height);
                    self.set_rect(header, r);
                    self.layout(header, r.size(), current);
                    x += sz.width;
                }
                available
            }
            Widget::PopupMenu(_) => {
                let mut y = rect.y;
                for item in self.live_children(id) {
                    let sz = self.min_size(item, current);
                    let r = Rect::new(rect.x, y, rect.width, sz.height);
                    self.set_rect(item, r);
                    self.layout(item, r.size(), current);
                    y += sz.height;
                }
                Size::new(rect.width, y - rect.y)
            }
            Widget::Window(_) => {
                self.layout_window(id, rect, current);
                rect.size()
            }
            Widget::Tabs(_) => {
                let header = header_height(self.theme_for(id, current));
                if let Some(page) = self.live_children(id).first().copied() {
                    let r = Rect::new(
                        rect.x,
                        rect.y + header,
                        available.width,
                        (available.height - header).max(0),
                    );
                    self.set_rect(page, r);
                    self.layout(page, r.size(), current);
                }
                available
            }
            Widget::List(l) => {
                let count = l.items.len();
                let max = max_scroll(
                    count as i32 * row_height(self.theme_for(id, current)),
                    rect.height - 2,
                );
                if let Some(Widget::List(l)) = self.widget_mut(id) {
                    l.scroll.offset = l.scroll.offset.clamp(0, max);
                }
                available
            }
            Widget::SelectList(l) => {
                let select = l.select;
                let count = match self.widget(select) {
                    Some(Widget::Select(s)) => s.items.len(),
                    _ => 0,
                };
                let max = max_scroll(
                    count as i32 * row_height(self.theme_for(select, current)),
                    rect.height - 2,
                );
                if let Some(Widget::SelectList(l)) = self.widget_mut(id) {
                    l.scroll.offset = l.scroll.offset.clamp(0, max);
                }
                available
            }
            _ => available,
        }
    }

    /// Lay out `id` again at its current rect size.
    pub fn relayout(&mut self, id: WidgetId, current: &Theme) -> Size {
        let size = self.rect(id).size();
        self.layout(id, size, current)
    }

    fn layout_container(
        &mut self,
        id: WidgetId,
        c: Container,
        rect: Rect,
        available: Size,
        current: &Theme,
    ) -> Size {
        let spacing = self.theme_for(id, current).spacing;
        let children: Children = self.children(id).iter().copied().collect();
        let n = children.len();
        let total_spacing = if n > 1 { spacing * (n as i32 - 1) } else { 0 };

        // First pass: space taken by non-fill children.
        let mut used = 0;
        let mut fill_count = 0;
        let mut mins = Vec::with_capacity(n);
        for &child in &children {
            let min = self.min_size(child, current);
            let fill = self.is_fill(child);
            if fill {
                fill_count += 1;
            } else {
                used += match c.axis {
                    Axis::Vertical => min.height,
                    Axis::Horizontal => min.width,
                };
            }
            mins.push((min, fill));
        }

        // Remainder of the integer division is dropped.
        let fill_share = if fill_count > 0 {
            let main = match c.axis {
                Axis::Vertical => available.height,
                Axis::Horizontal => available.width,
            };
            (main - total_spacing - used).max(0) / fill_count
        } else {
            0
        };

        // Second pass: place sequentially from the container's origin.
        let mut cursor = rect.origin();
        let mut total = Size::ZERO;
        for (i, (&child, &(min, fill))) in children.iter().zip(&mins).enumerate() {
            let size = match c.axis {
                Axis::Vertical => Size::new(
                    if c.stretch { available.width } else { min.width },
                    if fill { fill_share.max(min.height) } else { min.height },
                ),
                Axis::Horizontal => Size::new(
                    if fill { fill_share.max(min.width) } else { min.width },
                    if c.stretch { available.height } else { min.height },
                ),
            };
            self.set_rect(child, Rect::from_origin_size(cursor, size));
            self.layout(child, size, current);

            let gap = if i + 1 < n { spacing } else { 0 };
            match c.axis {
                Axis::Vertical => {
                    cursor = cursor.offset(0, size.height + spacing);
                    total.width = total.width.max(size.width);
                    total.height += size.height + gap;
                }
                Axis::Horizontal => {
                    cursor = cursor.offset(size.width + spacing, 0);
                    total.height = total.height.max(size.height);
                    total.width += size.width + gap;
                }
            }
        }
        total
    }

    fn layout_scroll_view(&mut self, id: WidgetId, rect: Rect, current: &Theme) {
        let content = self.children(id).first().copied();
        let content_min = content.map_or(Size::ZERO, |c| self.min_size(c, current));
        let vp = Viewport::compute(content_min, rect.size());

        let offset = match self.widget_mut(id) {
            Some(Widget::ScrollView(s)) => {
                s.offset = vp.clamp(s.offset);
                s.offset
            }
            _ => Point::default(),
        };

        if let Some(content) = content {
            let extent = vp.content_extent();
            let origin = Point::new(rect.x - offset.x, rect.y - offset.y);
            self.set_rect(content, Rect::from_origin_size(origin, extent));
            self.layout(content, extent, current);
        }
    }

    fn layout_window(&mut self, id: WidgetId, rect: Rect, current: &Theme) {
        let Some(Widget::Window(win)) = self.widget(id) else {
            return;
        };
        let (show_frame, show_header, closable) = (win.show_frame, win.show_header, win.closable);
        let header = header_height(self.theme_for(id, current));
        let (close, content) = self.window_parts(id);

        let mut inner = if show_frame {
            rect.inset(Edges::all(WINDOW_FRAME))
        } else {
            rect
        };

        if show_header {
            if closable && let Some(close) = close {
                // Square button at the right end of the header.
                let r = Rect::new(inner.right() - header, inner.y, header, header);
                self.set_rect(close, r);
                self.layout(close, r.size(), current);
            }
            inner = Rect::new(
                inner.x,
                inner.y + header,
                inner.width,
                (inner.height - header).max(0),
            );
        }

        if let Some(content) = content {
            self.set_rect(content, inner);
            self.layout(content, inner.size(), current);
        }
    }
}
