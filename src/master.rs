use log::{debug, trace};

use crate::draw::Surface;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::Widget;

/// Owns the widget tree and routes input through it.
///
/// The root fills the surface; overlays (popups, drop-downs, windows) sit
/// above it in stack order, last = topmost. Focus, hover and the overlay
/// stack are only changed through `Master` methods.
#[derive(Debug)]
pub struct Master {
    pub(crate) tree: WidgetTree,
    root: Option<WidgetId>,
    overlays: Vec<WidgetId>,
    focused: Option<WidgetId>,
    hovered: Option<WidgetId>,
    cursor: Point,
    pub(crate) theme: Theme,
}

impl Master {
    pub fn new(theme: Theme) -> Self {
        Self {
            tree: WidgetTree::new(),
            root: None,
            overlays: Vec::new(),
            focused: None,
            hovered: None,
            cursor: Point::default(),
            theme,
        }
    }

    /// Wrap an already built tree.
    pub fn with_root(tree: WidgetTree, root: WidgetId, theme: Theme) -> Self {
        let mut master = Self::new(theme);
        master.tree = tree;
        master.set_root(root);
        master
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    pub fn set_root(&mut self, root: WidgetId) {
        self.root = self.tree.contains(root).then_some(root);
    }

    /// Current theme slot, used by every widget without an override.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap the theme. Rects keep their values until the next `layout`.
    pub fn set_theme(&mut self, theme: Theme) {
        debug!("theme swapped (spacing {})", theme.spacing);
        self.theme = theme;
    }

    /// Focused widget, if it is still alive.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused.filter(|id| self.tree.contains(*id))
    }

    /// Widget under the pointer as of the last draw.
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered.filter(|id| self.tree.contains(*id))
    }

    /// Last known pointer position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Overlay stack, bottom first.
    pub fn overlays(&self) -> &[WidgetId] {
        &self.overlays
    }

    pub fn is_overlay(&self, id: WidgetId) -> bool {
        self.overlays.contains(&id)
    }

    // ------------------------------------------------------------------
    // Layout / draw
    // ------------------------------------------------------------------

    /// Root gets the whole surface; each overlay keeps its own rect.
    pub fn layout(&mut self, size: Size) {
        if let Some(root) = self.root {
            self.tree
                .set_rect(root, Rect::new(0, 0, size.width, size.height));
            self.tree.layout(root, size, &self.theme);
        }
        for overlay in self.overlays.clone() {
            self.tree.relayout(overlay, &self.theme);
        }
    }

    /// Draw root, then overlays bottom to top, then the hovered widget's tooltip.
    pub fn draw(&mut self, s: &mut dyn Surface) {
        if let Some(root) = self.root {
            self.tree.draw(root, s, &self.theme);
        }
        for &overlay in &self.overlays {
            self.tree.draw(overlay, s, &self.theme);
        }

        self.update_hover(self.cursor);
        if let Some(hovered) = self.hovered {
            let tip = self.tree.tooltip(hovered);
            if !tip.is_empty() {
                self.draw_tooltip(s, tip);
            }
        }
    }

    pub fn update_hover(&mut self, p: Point) {
        self.hovered = self.hit_test(p);
    }

    fn draw_tooltip(&self, s: &mut dyn Surface, text: &str) {
        let theme = &self.theme;
        let Some(font) = theme.font else {
            return;
        };
        let width = s.measure_text(&font, text).width + theme.padding.horizontal();
        let height = font.line_height() + theme.padding.vertical();

        // Offset from the pointer, kept on-surface.
        let bounds = s.size();
        let x = (self.cursor.x + 10).min(bounds.width - width).max(0);
        let y = (self.cursor.y + 10).min(bounds.height - height).max(0);
        let rect = Rect::new(x, y, width, height);

        s.push_clip(rect);
        s.fill(theme.background);
        s.border(theme.border);
        let text_y = y + (height - font.line_height()) / 2;
        s.text(
            Point::new(x + theme.padding.left, text_y),
            theme.text,
            &font,
            false,
            text,
        );
        s.pop_clip();
    }

    // ------------------------------------------------------------------
    // Hit testing / focus
    // ------------------------------------------------------------------

    /// Frontmost widget at `p`: overlays top to bottom, then the root.
    pub fn hit_test(&self, p: Point) -> Option<WidgetId> {
        self.overlays
            .iter()
            .rev()
            .find_map(|&o| self.tree.hit_test(o, p))
            .or_else(|| self.root.and_then(|r| self.tree.hit_test(r, p)))
    }

    /// Move focus to `target`, or clear it with `None`. Non-focusable or
    /// stale targets clear focus.
    pub fn set_focus(&mut self, target: Option<WidgetId>) {
        if let Some(old) = self.focused.take()
            && let Some(w) = self.tree.widget_mut(old)
        {
            w.set_focused(false);
        }
        if let Some(new) = target
            && let Some(w) = self.tree.widget_mut(new)
            && w.is_focusable()
        {
            w.set_focused(true);
            self.focused = Some(new);
        }
        debug!("focus -> {:?}", self.focused);
    }

    fn focus_at(&mut self, p: Point) {
        let target = self
            .hit_test(p)
            .filter(|&id| self.tree.widget(id).is_some_and(Widget::is_focusable));
        if target != self.focused() {
            self.set_focus(target);
        }
    }

    // ------------------------------------------------------------------
    // Event routing
    // ------------------------------------------------------------------

    /// Route one input event. Returns true if some widget consumed it.
    pub fn event(&mut self, event: &Event) -> bool {
        if let Some(pos) = event.pos() {
            self.cursor = pos;
            if event.is_pointer_down() {
                self.focus_at(pos);
            }
        }

        match event {
            Event::KeyDown(_) | Event::KeyUp(_) | Event::TextInput(_) => {
                let Some(target) = self.focused() else {
                    trace!("{event:?}: no focus, dropped");
                    return false;
                };
                return self.key_event(target, event);
            }
            Event::Scroll { dx, dy } => return self.scroll_event(*dx, *dy),
            _ => {}
        }

        // Overlays top to bottom.
        let mut i = self.overlays.len();
        while i > 0 {
            i -= 1;
            let Some(&overlay) = self.overlays.get(i) else {
                continue;
            };
            if self.dispatch(overlay, event) {
                trace!("{event:?} consumed by overlay {overlay:?}");
                return true;
            }
            if let Event::PointerDown { pos, .. } = event
                && !self.tree.rect(overlay).contains(*pos)
            {
                trace!("pointer down outside overlay {overlay:?}");
                self.pop_overlay();
                return true;
            }
        }

        match self.root {
            Some(root) => self.dispatch(root, event),
            None => false,
        }
    }

    /// Wheel input goes to the widget under the pointer, then bubbles up
    /// its ancestors until one scrolls.
    fn scroll_event(&mut self, dx: f64, dy: f64) -> bool {
        let mut current = self.hit_test(self.cursor);
        while let Some(id) = current {
            if self.scroll_local(id, dx, dy) {
                trace!("scroll consumed by {id:?}");
                return true;
            }
            current = self.tree.parent(id);
        }
        false
    }

    // ------------------------------------------------------------------
    // Overlays
    // ------------------------------------------------------------------

    /// Show `id` above everything else. It is laid out at its current rect.
    pub fn push_overlay(&mut self, id: WidgetId) {
        if !self.tree.contains(id) || self.is_overlay(id) {
            return;
        }
        self.tree.relayout(id, &self.theme);
        self.overlays.push(id);
        debug!("push overlay {id:?} (depth {})", self.overlays.len());
    }

    /// Remove the topmost overlay and run its dismiss hook.
    pub fn pop_overlay(&mut self) {
        let Some(id) = self.overlays.pop() else {
            return;
        };
        debug!("pop overlay {id:?} (depth {})", self.overlays.len());
        if let Some(focused) = self.focused
            && self.tree.is_within(focused, id)
        {
            self.set_focus(None);
        }
        self.dismiss(id);
    }

    /// Pop overlays down to and including `id`. No-op if `id` is not shown.
    pub fn close_overlay(&mut self, id: WidgetId) {
        let Some(pos) = self.overlays.iter().position(|&o| o == id) else {
            return;
        };
        let count = self.overlays.len() - pos;
        for _ in 0..count {
            self.pop_overlay();
        }
    }

    /// Close button behaviour: pop the window if shown, else run its close handler.
    pub fn close_window(&mut self, win: WidgetId) {
        if self.is_overlay(win) {
            self.close_overlay(win);
        } else {
            self.fire_window_close(win);
        }
    }

    /// Remove `id` and everything it owns. Focus, hover and overlay entries
    /// pointing into the removed subtree are dropped without dismissing.
    pub fn remove(&mut self, id: WidgetId) {
        let doomed = self.tree.subtree(id);
        if let Some(focused) = self.focused
            && doomed.contains(&focused)
        {
            self.set_focus(None);
        }
        if self.hovered.is_some_and(|h| doomed.contains(&h)) {
            self.hovered = None;
        }
        self.overlays.retain(|o| !doomed.contains(o));
        if self.root.is_some_and(|r| doomed.contains(&r)) {
            self.root = None;
        }
        self.tree.remove(id);
    }
}
