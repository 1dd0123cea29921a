//! Per-widget input behaviour. Everything here runs inside `Master::event`
//! and may call back into the `Master` (overlays, focus, handlers).

use log::trace;

use crate::event::{Event, KeyCode};
use crate::geometry::{Point, Rect};
use crate::layout::{WINDOW_FRAME, header_height, row_height, rows_height, tab_width};
use crate::master::Master;
use crate::scroll::{BAR_SIZE, Thumb, WHEEL_STEP, Viewport, max_scroll, wheel};
use crate::tree::WidgetId;
use crate::widget::{Axis, Handler, RowScroll, SelectList, ThumbDrag, Widget};

// ----------------------------------------------------------------------------
// Handler slots
// ----------------------------------------------------------------------------

/// Locates a handler field inside a widget.
type Slot<A> = fn(&mut Widget) -> Option<&mut Option<Handler<A>>>;

fn button_click(w: &mut Widget) -> Option<&mut Option<Handler>> {
    match w {
        Widget::Button(b) => Some(&mut b.on_click),
        _ => None,
    }
}

fn checkbox_change(w: &mut Widget) -> Option<&mut Option<Handler<bool>>> {
    match w {
        Widget::Checkbox(c) => Some(&mut c.on_change),
        _ => None,
    }
}

fn radio_change(w: &mut Widget) -> Option<&mut Option<Handler<String>>> {
    match w {
        Widget::RadioGroup(g) => Some(&mut g.on_change),
        _ => None,
    }
}

fn list_select(w: &mut Widget) -> Option<&mut Option<Handler<usize>>> {
    match w {
        Widget::List(l) => Some(&mut l.on_select),
        Widget::Select(s) => Some(&mut s.on_select),
        _ => None,
    }
}

fn menu_action(w: &mut Widget) -> Option<&mut Option<Handler>> {
    match w {
        Widget::MenuItem(m) => Some(&mut m.action),
        _ => None,
    }
}

fn popup_dismiss(w: &mut Widget) -> Option<&mut Option<Handler>> {
    match w {
        Widget::PopupMenu(p) => Some(&mut p.on_dismiss),
        _ => None,
    }
}

fn window_close(w: &mut Widget) -> Option<&mut Option<Handler>> {
    match w {
        Widget::Window(win) => Some(&mut win.on_close),
        _ => None,
    }
}

// ----------------------------------------------------------------------------
// Row geometry shared by List and SelectList
// ----------------------------------------------------------------------------

/// A bordered column of equal-height rows with a vertical scrollbar.
struct Rows {
    rect: Rect,
    row: i32,
    count: usize,
}

enum RowAction {
    Ignored,
    Consumed,
    Pick(usize),
    Hover(Option<usize>, bool),
}

impl Rows {
    fn viewport(&self) -> i32 {
        self.rect.height - 2
    }

    fn content(&self) -> i32 {
        self.count as i32 * self.row
    }

    fn max(&self) -> i32 {
        max_scroll(self.content(), self.viewport())
    }

    fn on_bar(&self, p: Point) -> bool {
        self.max() > 0 && p.x >= self.rect.right() - BAR_SIZE
    }

    fn index_at(&self, p: Point, offset: i32) -> Option<usize> {
        if self.row <= 0 {
            return None;
        }
        let i = (p.y - self.rect.y - 1 + offset) / self.row;
        (i >= 0 && (i as usize) < self.count).then_some(i as usize)
    }

    fn wheel(&self, offset: i32, dy: f64) -> i32 {
        wheel(offset, dy, self.row as f64, self.max())
    }

    /// Offset after moving the selection to `index`, keeping it visible.
    fn reveal(&self, offset: i32, index: usize) -> i32 {
        let top = index as i32 * self.row;
        let bottom = top + self.row;
        let offset = if top < offset {
            top
        } else if bottom > offset + self.viewport() {
            bottom - self.viewport()
        } else {
            offset
        };
        offset.clamp(0, self.max())
    }

    fn pointer(&self, scroll: &mut RowScroll, event: &Event) -> RowAction {
        match event {
            Event::PointerDown { pos, .. } if self.rect.contains(*pos) => {
                if self.on_bar(*pos) {
                    scroll.drag = Some((pos.y, scroll.offset));
                    return RowAction::Consumed;
                }
                match self.index_at(*pos, scroll.offset) {
                    Some(i) => RowAction::Pick(i),
                    None => RowAction::Ignored,
                }
            }
            Event::PointerUp { pos, .. } => {
                scroll.drag = None;
                if self.rect.contains(*pos) {
                    RowAction::Consumed
                } else {
                    RowAction::Ignored
                }
            }
            Event::PointerMove { pos, .. } => {
                let max = self.max();
                if let Some((start_y, start_offset)) = scroll.drag
                    && max > 0
                {
                    let thumb = Thumb::new(self.viewport(), self.content(), start_offset, max);
                    scroll.offset = thumb.drag(start_offset, pos.y - start_y, max);
                    return RowAction::Consumed;
                }
                if !self.rect.contains(*pos) {
                    RowAction::Hover(None, false)
                } else if self.on_bar(*pos) {
                    RowAction::Hover(None, true)
                } else {
                    match self.index_at(*pos, scroll.offset) {
                        Some(i) => RowAction::Hover(Some(i), true),
                        None => RowAction::Hover(None, false),
                    }
                }
            }
            _ => RowAction::Ignored,
        }
    }
}

impl Master {
    // ------------------------------------------------------------------
    // Handler plumbing
    // ------------------------------------------------------------------

    /// Run the handler in `slot` of widget `id`. The handler is detached
    /// while it runs and restored only if the widget survived and no
    /// replacement was installed meanwhile.
    fn fire<A>(&mut self, id: WidgetId, slot: Slot<A>, arg: A) {
        let Some(mut handler) = self.tree.widget_mut(id).and_then(slot).and_then(Option::take)
        else {
            return;
        };
        handler.call(self, arg);
        if let Some(restore) = self.tree.widget_mut(id).and_then(slot)
            && restore.is_none()
        {
            *restore = Some(handler);
        }
    }

    pub(crate) fn fire_window_close(&mut self, win: WidgetId) {
        self.fire(win, window_close, ());
    }

    /// Overlay dismiss hook, run after `id` left the overlay stack.
    pub(crate) fn dismiss(&mut self, id: WidgetId) {
        match self.tree.widget(id) {
            Some(Widget::PopupMenu(p)) => {
                if let Some(owner) = p.owner
                    && let Some(Widget::MenuBar(bar)) = self.tree.widget_mut(owner)
                {
                    bar.open = None;
                }
                for item in self.tree.live_children(id) {
                    if let Some(Widget::MenuItem(m)) = self.tree.widget_mut(item) {
                        m.hovered = false;
                    }
                }
                self.fire(id, popup_dismiss, ());
            }
            Some(Widget::SelectList(l)) => {
                let select = l.select;
                if let Some(Widget::Select(s)) = self.tree.widget_mut(select) {
                    s.expanded = false;
                    s.list = None;
                    s.hovered = None;
                }
                self.tree.remove(id);
            }
            Some(Widget::Window(_)) => self.fire(id, window_close, ()),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Pointer dispatch
    // ------------------------------------------------------------------

    /// Offer a pointer event to `id`. Returns true if consumed.
    pub(crate) fn dispatch(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(widget) = self.tree.widget(id) else {
            return false;
        };
        match widget {
            Widget::Container(_) | Widget::Panel | Widget::RadioGroup(_) => {
                self.dispatch_children(id, event)
            }
            Widget::ScrollView(_) => self.scroll_view_event(id, event),
            Widget::Label(_) => false,
            Widget::Button(_) => self.button_event(id, event),
            Widget::Checkbox(_) => self.checkbox_event(id, event),
            Widget::Radio(_) => self.radio_event(id, event),
            Widget::TextInput(_) | Widget::TextArea(_) => {
                matches!(event, Event::PointerDown { pos, .. } if self.tree.rect(id).contains(*pos))
            }
            Widget::List(_) => self.list_event(id, event),
            Widget::Select(_) => self.select_event(id, event),
            Widget::SelectList(_) => self.select_list_event(id, event),
            Widget::MenuBar(_) | Widget::PopupMenu(_) => self.menu_event(id, event),
            Widget::MenuItem(_) => self.menu_item_event(id, event),
            Widget::Window(_) => self.window_event(id, event),
            Widget::Tabs(_) => self.tabs_event(id, event),
        }
    }

    /// First live child to consume wins.
    fn dispatch_children(&mut self, id: WidgetId, event: &Event) -> bool {
        for child in self.tree.live_children(id) {
            if self.dispatch(child, event) {
                return true;
            }
        }
        false
    }

    fn button_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let inside = self.tree.rect(id).contains(pos);
        let Some(Widget::Button(b)) = self.tree.widget_mut(id) else {
            return false;
        };
        match event {
            Event::PointerMove { .. } => {
                let was = b.hovered;
                b.hovered = inside;
                was || inside
            }
            Event::PointerDown { .. } if inside => {
                b.pressed = true;
                true
            }
            Event::PointerUp { .. } => {
                let clicked = b.pressed && inside;
                b.pressed = false;
                if clicked {
                    trace!("button {id:?} clicked");
                    self.fire(id, button_click, ());
                }
                inside
            }
            _ => false,
        }
    }

    fn checkbox_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let inside = self.tree.rect(id).contains(pos);
        let Some(Widget::Checkbox(c)) = self.tree.widget_mut(id) else {
            return false;
        };
        match event {
            Event::PointerMove { .. } => {
                let was = c.hovered;
                c.hovered = inside;
                was || inside
            }
            Event::PointerDown { .. } if inside => {
                c.pressed = true;
                true
            }
            Event::PointerUp { .. } => {
                let clicked = c.pressed && inside;
                c.pressed = false;
                if clicked {
                    self.toggle_checkbox(id);
                }
                inside
            }
            _ => false,
        }
    }

    fn toggle_checkbox(&mut self, id: WidgetId) {
        let Some(Widget::Checkbox(c)) = self.tree.widget_mut(id) else {
            return;
        };
        c.checked = !c.checked;
        let checked = c.checked;
        self.fire(id, checkbox_change, checked);
    }

    fn radio_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let inside = self.tree.rect(id).contains(pos);
        let Some(Widget::Radio(r)) = self.tree.widget_mut(id) else {
            return false;
        };
        match event {
            Event::PointerMove { .. } => {
                let was = r.hovered;
                r.hovered = inside;
                was || inside
            }
            Event::PointerDown { .. } if inside => {
                r.pressed = true;
                true
            }
            Event::PointerUp { .. } => {
                let clicked = r.pressed && inside;
                r.pressed = false;
                if clicked {
                    self.select_radio(id);
                }
                inside
            }
            _ => false,
        }
    }

    /// Make `radio`'s value its group's selection. A radio outside a
    /// group does nothing.
    fn select_radio(&mut self, radio: WidgetId) {
        let Some(Widget::Radio(r)) = self.tree.widget(radio) else {
            return;
        };
        let value = r.value.clone();
        let Some(group) = self.tree.radio_group(radio) else {
            return;
        };
        if let Some(Widget::RadioGroup(g)) = self.tree.widget_mut(group) {
            g.selected = Some(value.clone());
        }
        trace!("radio group {group:?} -> {value:?}");
        self.fire(group, radio_change, value);
    }

    fn list_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let rows = self.list_rows(id);
        let Some(Widget::List(l)) = self.tree.widget_mut(id) else {
            return false;
        };
        match rows.pointer(&mut l.scroll, event) {
            RowAction::Ignored => false,
            RowAction::Consumed => true,
            RowAction::Hover(hovered, consumed) => {
                l.hovered = hovered;
                consumed
            }
            RowAction::Pick(i) => {
                l.selected = Some(i);
                self.fire(id, list_select, i);
                true
            }
        }
    }

    fn list_rows(&self, id: WidgetId) -> Rows {
        let count = match self.tree.widget(id) {
            Some(Widget::List(l)) => l.items.len(),
            _ => 0,
        };
        Rows {
            rect: self.tree.rect(id),
            row: row_height(self.tree.theme_for(id, &self.theme)),
            count,
        }
    }

    /// Rows of a drop-down, measured with its select box's theme.
    fn select_list_rows(&self, id: WidgetId, select: WidgetId) -> Rows {
        let count = match self.tree.widget(select) {
            Some(Widget::Select(s)) => s.items.len(),
            _ => 0,
        };
        Rows {
            rect: self.tree.rect(id),
            row: row_height(self.tree.theme_for(select, &self.theme)),
            count,
        }
    }

    fn select_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let rect = self.tree.rect(id);
        let Event::PointerDown { pos, .. } = event else {
            return false;
        };
        if !rect.contains(*pos) {
            return false;
        }
        let theme = self.tree.theme_for(id, &self.theme);
        if theme.font.is_none() {
            return false;
        }
        let Some(Widget::Select(s)) = self.tree.widget(id) else {
            return false;
        };

        if s.expanded {
            if let Some(list) = s.list {
                if self.is_overlay(list) {
                    self.close_overlay(list);
                } else {
                    self.dismiss(list);
                }
            }
            return true;
        }

        let height = rows_height(theme, s.items.len());
        let list = self.tree.insert_root(Widget::SelectList(SelectList {
            select: id,
            scroll: RowScroll::default(),
        }));
        self.tree
            .set_rect(list, Rect::new(rect.x, rect.bottom(), rect.width, height));
        if let Some(Widget::Select(s)) = self.tree.widget_mut(id) {
            s.expanded = true;
            s.list = Some(list);
        }
        self.push_overlay(list);
        true
    }

    fn select_list_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(&Widget::SelectList(SelectList { select, mut scroll })) = self.tree.widget(id)
        else {
            return false;
        };
        let rows = self.select_list_rows(id, select);
        let action = rows.pointer(&mut scroll, event);
        if let Some(Widget::SelectList(l)) = self.tree.widget_mut(id) {
            l.scroll = scroll;
        }

        match action {
            RowAction::Ignored => false,
            RowAction::Consumed => true,
            RowAction::Hover(hovered, consumed) => {
                if let Some(Widget::Select(s)) = self.tree.widget_mut(select) {
                    s.hovered = hovered;
                }
                consumed
            }
            RowAction::Pick(i) => {
                if let Some(Widget::Select(s)) = self.tree.widget_mut(select) {
                    s.selected = Some(i);
                }
                self.fire(select, list_select, i);
                self.close_overlay(id);
                true
            }
        }
    }

    fn menu_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let mut handled = false;
        for item in self.tree.live_children(id) {
            if self.dispatch(item, event) {
                handled = true;
                // Moves reach every item so stale hover clears.
                if !event.is_pointer_move() {
                    return true;
                }
            }
        }
        if handled {
            return true;
        }
        matches!(self.tree.widget(id), Some(Widget::PopupMenu(_)))
            && event.pos().is_some_and(|p| self.tree.rect(id).contains(p))
    }

    fn menu_item_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let inside = self.tree.rect(id).contains(pos);
        let Some(Widget::MenuItem(m)) = self.tree.widget_mut(id) else {
            return false;
        };
        if !inside {
            m.hovered = false;
            return false;
        }
        match event {
            Event::PointerMove { .. } => {
                m.hovered = true;
                true
            }
            Event::PointerUp { .. } => {
                let parent = self.tree.parent(id);
                match parent.and_then(|p| self.tree.widget(p)) {
                    Some(Widget::MenuBar(_)) => {
                        if let Some(bar) = parent
                            && let Some(index) =
                                self.tree.children(bar).iter().position(|&c| c == id)
                        {
                            self.toggle_menu(bar, index);
                        }
                    }
                    Some(Widget::PopupMenu(_)) => {
                        // Close first so overlays the action pushes survive.
                        if let Some(popup) = parent {
                            self.close_overlay(popup);
                        }
                        self.fire(id, menu_action, ());
                    }
                    _ => self.fire(id, menu_action, ()),
                }
                true
            }
            _ => false,
        }
    }

    /// Open or close the popup under header `index` of `bar`. Opening
    /// closes whichever popup the bar had open.
    pub fn toggle_menu(&mut self, bar: WidgetId, index: usize) {
        let Some(Widget::MenuBar(b)) = self.tree.widget(bar) else {
            return;
        };
        let Some(&popup) = b.popups.get(index) else {
            return;
        };
        let open = b.open;
        let previous = open.and_then(|i| b.popups.get(i).copied());
        let header = self
            .tree
            .children(bar)
            .get(index)
            .map(|&h| self.tree.rect(h))
            .unwrap_or_default();

        if let Some(previous) = previous {
            self.close_overlay(previous);
        }
        if let Some(Widget::MenuBar(b)) = self.tree.widget_mut(bar) {
            b.open = None;
        }
        if open == Some(index) {
            return;
        }

        let size = self.tree.min_size(popup, &self.theme);
        self.tree.set_rect(
            popup,
            Rect::new(header.x, header.bottom(), size.width, size.height),
        );
        if let Some(Widget::PopupMenu(p)) = self.tree.widget_mut(popup) {
            p.owner = Some(bar);
        }
        if let Some(Widget::MenuBar(b)) = self.tree.widget_mut(bar) {
            b.open = Some(index);
        }
        self.push_overlay(popup);
    }

    fn window_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let rect = self.tree.rect(id);
        let header = header_height(self.tree.theme_for(id, &self.theme));
        let Some(Widget::Window(w)) = self.tree.widget_mut(id) else {
            return false;
        };

        if let Some(from) = w.drag_from {
            match event {
                Event::PointerUp { .. } => {
                    w.drag_from = None;
                    return true;
                }
                Event::PointerMove { .. } => {
                    w.drag_from = Some(pos);
                    self.tree
                        .set_rect(id, rect.translate(pos.x - from.x, pos.y - from.y));
                    self.tree.relayout(id, &self.theme);
                    return true;
                }
                _ => {}
            }
        }

        if !rect.contains(pos) {
            return false;
        }

        let (show_header, show_frame, closable) = (w.show_header, w.show_frame, w.closable);
        let (close, content) = self.tree.window_parts(id);
        if show_header {
            let frame = if show_frame { WINDOW_FRAME } else { 0 };
            let bar = Rect::new(
                rect.x + frame,
                rect.y + frame,
                rect.width - 2 * frame,
                header,
            );
            if bar.contains(pos) {
                if closable
                    && let Some(close) = close
                    && self.dispatch(close, event)
                {
                    return true;
                }
                if event.is_pointer_down() {
                    if let Some(Widget::Window(w)) = self.tree.widget_mut(id) {
                        w.drag_from = Some(pos);
                    }
                    return true;
                }
            }
        }

        if let Some(content) = content {
            self.dispatch(content, event);
        }
        true
    }

    fn tabs_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let rect = self.tree.rect(id);
        if !rect.contains(pos) {
            return false;
        }
        let theme = self.tree.theme_for(id, &self.theme);
        let header = header_height(theme);
        let Some(Widget::Tabs(tabs)) = self.tree.widget(id) else {
            return false;
        };

        if pos.y - rect.y < header {
            if event.is_pointer_down() {
                let mut x = rect.x;
                let mut picked = None;
                for (i, title) in tabs.titles.iter().enumerate() {
                    let w = tab_width(theme, title);
                    if pos.x >= x && pos.x < x + w {
                        picked = Some(i);
                        break;
                    }
                    x += w;
                }
                if let Some(i) = picked
                    && let Some(Widget::Tabs(tabs)) = self.tree.widget_mut(id)
                {
                    tabs.active = i;
                    trace!("tabs {id:?} -> page {i}");
                    self.tree.relayout(id, &self.theme);
                }
            }
            return true;
        }

        match self.tree.live_children(id).first() {
            Some(&page) => self.dispatch(page, event),
            None => false,
        }
    }

    fn scroll_view_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(pos) = event.pos() else {
            return false;
        };
        let rect = self.tree.rect(id);
        let content = self.tree.children(id).first().copied();
        let content_min = content.map_or_else(Default::default, |c| {
            self.tree.min_size(c, &self.theme)
        });
        let vp = Viewport::compute(content_min, rect.size());
        let Some(Widget::ScrollView(sv)) = self.tree.widget_mut(id) else {
            return false;
        };
        sv.offset = vp.clamp(sv.offset);
        let inside = rect.contains(pos);

        match event {
            Event::PointerDown { .. } if inside => {
                let rel = Point::new(pos.x - rect.x, pos.y - rect.y);
                // A press on the track that misses the thumb goes to the content.
                if vp.need_v
                    && rel.x >= vp.outer.width - BAR_SIZE
                    && rel.y < vp.effective.height
                    && vp.v_thumb(sv.offset.y).contains(rel.y)
                {
                    sv.drag = Some(ThumbDrag {
                        axis: Axis::Vertical,
                        start_pointer: pos,
                        start_offset: sv.offset.y,
                    });
                    return true;
                }
                if vp.need_h
                    && rel.y >= vp.outer.height - BAR_SIZE
                    && rel.x < vp.effective.width
                    && vp.h_thumb(sv.offset.x).contains(rel.x)
                {
                    sv.drag = Some(ThumbDrag {
                        axis: Axis::Horizontal,
                        start_pointer: pos,
                        start_offset: sv.offset.x,
                    });
                    return true;
                }
            }
            Event::PointerUp { .. } => {
                if sv.drag.take().is_some() {
                    return true;
                }
            }
            Event::PointerMove { .. } => {
                if let Some(drag) = sv.drag {
                    match drag.axis {
                        Axis::Vertical => {
                            let delta = pos.y - drag.start_pointer.y;
                            sv.offset.y = vp
                                .v_thumb(drag.start_offset)
                                .drag(drag.start_offset, delta, vp.max_y);
                        }
                        Axis::Horizontal => {
                            let delta = pos.x - drag.start_pointer.x;
                            sv.offset.x = vp
                                .h_thumb(drag.start_offset)
                                .drag(drag.start_offset, delta, vp.max_x);
                        }
                    }
                    self.tree.relayout(id, &self.theme);
                    return true;
                }
            }
            _ => {}
        }

        // Content outside the viewport is clipped away, so it can't be hit.
        if !inside && !event.is_pointer_move() {
            return false;
        }
        match content {
            Some(content) => self.dispatch(content, event),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Wheel
    // ------------------------------------------------------------------

    /// Scroll `id` itself. Returns false for widgets that don't scroll so
    /// the wheel can bubble to an ancestor.
    pub(crate) fn scroll_local(&mut self, id: WidgetId, dx: f64, dy: f64) -> bool {
        match self.tree.widget(id) {
            Some(Widget::ScrollView(_)) => {
                let rect = self.tree.rect(id);
                let content_min = self
                    .tree
                    .children(id)
                    .first()
                    .map_or_else(Default::default, |&c| self.tree.min_size(c, &self.theme));
                let vp = Viewport::compute(content_min, rect.size());
                if let Some(Widget::ScrollView(sv)) = self.tree.widget_mut(id) {
                    sv.offset = Point::new(
                        wheel(sv.offset.x, dx, WHEEL_STEP, vp.max_x),
                        wheel(sv.offset.y, dy, WHEEL_STEP, vp.max_y),
                    );
                }
                self.tree.relayout(id, &self.theme);
                true
            }
            Some(Widget::List(_)) => {
                let rows = self.list_rows(id);
                if let Some(Widget::List(l)) = self.tree.widget_mut(id) {
                    l.scroll.offset = rows.wheel(l.scroll.offset, dy);
                }
                true
            }
            Some(&Widget::SelectList(SelectList { select, .. })) => {
                let rows = self.select_list_rows(id, select);
                if let Some(Widget::SelectList(l)) = self.tree.widget_mut(id) {
                    l.scroll.offset = rows.wheel(l.scroll.offset, dy);
                }
                true
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Deliver a key or text event to the focused widget `id`.
    pub(crate) fn key_event(&mut self, id: WidgetId, event: &Event) -> bool {
        match (self.tree.widget(id), event) {
            (Some(Widget::Checkbox(_)), Event::KeyDown(KeyCode::ENTER | KeyCode::SPACE)) => {
                self.toggle_checkbox(id);
                true
            }
            (Some(Widget::Radio(_)), Event::KeyDown(KeyCode::ENTER | KeyCode::SPACE)) => {
                self.select_radio(id);
                true
            }
            (Some(Widget::TextInput(_)), _) => self.text_input_key(id, event),
            (Some(Widget::TextArea(_)), _) => self.text_area_key(id, event),
            (Some(Widget::List(_)), Event::KeyDown(key)) => {
                let key = *key;
                self.list_key(id, key)
            }
            _ => false,
        }
    }

    fn text_input_key(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(Widget::TextInput(t)) = self.tree.widget_mut(id) else {
            return false;
        };
        match event {
            Event::TextInput(text) => {
                if !t.insert(text) {
                    trace!("{:?} rejected {text:?}", t.kind);
                }
                true
            }
            Event::KeyDown(key) => {
                match *key {
                    KeyCode::LEFT => t.move_left(),
                    KeyCode::RIGHT => t.move_right(),
                    KeyCode::HOME => t.home(),
                    KeyCode::END => t.end(),
                    KeyCode::BACKSPACE => t.backspace(),
                    KeyCode::DELETE => t.delete(),
                    _ => return false,
                }
                true
            }
            _ => false,
        }
    }

    fn text_area_key(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(Widget::TextArea(t)) = self.tree.widget_mut(id) else {
            return false;
        };
        match event {
            Event::TextInput(text) => t.push_str(text),
            Event::KeyDown(KeyCode::BACKSPACE) => t.backspace(),
            Event::KeyDown(KeyCode::ENTER) => t.newline(),
            _ => return false,
        }
        true
    }

    fn list_key(&mut self, id: WidgetId, key: KeyCode) -> bool {
        let rows = self.list_rows(id);
        let Some(Widget::List(l)) = self.tree.widget_mut(id) else {
            return false;
        };
        let next = match (key, l.selected) {
            (KeyCode::UP, Some(i)) if i > 0 => i - 1,
            (KeyCode::DOWN, None) if rows.count > 0 => 0,
            (KeyCode::DOWN, Some(i)) if i + 1 < rows.count => i + 1,
            _ => return false,
        };
        l.selected = Some(next);
        l.scroll.offset = rows.reveal(l.scroll.offset, next);
        self.fire(id, list_select, next);
        true
    }
}
