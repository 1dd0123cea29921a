use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::geometry::{Point, Rect};
use crate::theme::Theme;
use crate::widget::{Handler, MenuBar, PopupMenu, Tabs, Widget};

new_key_type! {
    /// Handle into the widget arena. Stable across insertions/removals.
    pub struct WidgetId;
}

/// Child id snapshot. Dispatch iterates one of these so handlers may edit
/// the child list mid-walk.
pub type Children = SmallVec<[WidgetId; 8]>;

// ---------------------------------------------------------------------------
// Widget node (arena entry)
// ---------------------------------------------------------------------------

/// Arena entry pairing a widget with tree/layout metadata.
#[derive(Debug)]
pub struct WidgetNode {
    pub widget: Widget,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    /// Absolute rect, assigned by the parent during layout.
    pub rect: Rect,
    /// Theme override for this widget only.
    pub theme: Option<Rc<Theme>>,
    /// Expand along the parent container's layout axis.
    pub fill: bool,
    /// Tooltip text shown while hovered. Empty = none.
    pub tooltip: String,
}

impl WidgetNode {
    fn new(widget: Widget, parent: Option<WidgetId>) -> Self {
        Self {
            widget,
            parent,
            children: Vec::new(),
            rect: Rect::default(),
            theme: None,
            fill: false,
            tooltip: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetTree
// ---------------------------------------------------------------------------

/// Arena-backed retained widget tree.
///
/// Holds every live widget: the main tree, overlays, and detached nodes
/// waiting to be shown (menu popups, windows). Which of them are drawn is
/// decided by the `Master`.
#[derive(Debug, Default)]
pub struct WidgetTree {
    arena: SlotMap<WidgetId, WidgetNode>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
        }
    }

    /// Insert a widget with no parent.
    pub fn insert_root(&mut self, widget: Widget) -> WidgetId {
        self.arena.insert(WidgetNode::new(widget, None))
    }

    /// Insert a widget as the last child of `parent`. Returns the new widget's id.
    /// A stale `parent` leaves the widget detached.
    pub fn insert(&mut self, parent: WidgetId, widget: Widget) -> WidgetId {
        let parent = self.arena.contains_key(parent).then_some(parent);
        let id = self.arena.insert(WidgetNode::new(widget, parent));
        if let Some(parent) = parent
            && let Some(parent_node) = self.arena.get_mut(parent)
        {
            parent_node.children.push(id);
        }
        id
    }

    /// Remove a widget, its descendants, and any detached widgets it owns
    /// (menu popups, an open select list).
    pub fn remove(&mut self, id: WidgetId) {
        if !self.arena.contains_key(id) {
            return;
        }
        let to_remove = self.subtree(id);

        if let Some(parent_id) = self.arena.get(id).and_then(|n| n.parent) {
            self.unlink_child(parent_id, id);
        }

        for rid in to_remove {
            self.arena.remove(rid);
        }
    }

    fn unlink_child(&mut self, parent_id: WidgetId, child: WidgetId) {
        let Some(parent) = self.arena.get_mut(parent_id) else {
            return;
        };
        let Some(index) = parent.children.iter().position(|c| *c == child) else {
            return;
        };
        parent.children.remove(index);

        // Keep per-child side tables parallel to the child list.
        let mut orphan_popup = None;
        match &mut parent.widget {
            Widget::Tabs(tabs) => {
                if index < tabs.titles.len() {
                    tabs.titles.remove(index);
                }
                if tabs.active >= parent.children.len() {
                    tabs.active = parent.children.len().saturating_sub(1);
                }
            }
            Widget::MenuBar(bar) => {
                if index < bar.popups.len() {
                    orphan_popup = Some(bar.popups.remove(index));
                }
                bar.open = None;
            }
            _ => {}
        }
        if let Some(popup) = orphan_popup {
            self.remove(popup);
        }
    }

    /// Ids of `id` and everything it owns, depth-first.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        self.collect_subtree(id, &mut out);
        out
    }

    fn collect_subtree(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        out.push(id);
        match &node.widget {
            Widget::MenuBar(bar) => {
                for &popup in &bar.popups {
                    self.collect_subtree(popup, out);
                }
            }
            Widget::Select(select) => {
                if let Some(list) = select.list {
                    self.collect_subtree(list, out);
                }
            }
            _ => {}
        }
        for &child in &node.children {
            self.collect_subtree(child, out);
        }
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.arena.get_mut(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.arena.get(id).map(|n| &n.widget)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.arena.get_mut(id).map(|n| &mut n.widget)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.arena.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Last laid-out rect, or an empty rect for a stale id.
    pub fn rect(&self, id: WidgetId) -> Rect {
        self.arena.get(id).map_or(Rect::default(), |n| n.rect)
    }

    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(node) = self.arena.get_mut(id) {
            node.rect = rect;
        }
    }

    pub fn set_fill(&mut self, id: WidgetId, fill: bool) {
        if let Some(node) = self.arena.get_mut(id) {
            node.fill = fill;
        }
    }

    pub fn is_fill(&self, id: WidgetId) -> bool {
        self.arena.get(id).is_some_and(|n| n.fill)
    }

    pub fn set_tooltip(&mut self, id: WidgetId, text: impl Into<String>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.tooltip = text.into();
        }
    }

    pub fn tooltip(&self, id: WidgetId) -> &str {
        self.arena.get(id).map_or("", |n| n.tooltip.as_str())
    }

    /// Override the theme for one widget. `None` reverts to the current theme.
    pub fn set_theme(&mut self, id: WidgetId, theme: Option<Rc<Theme>>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.theme = theme;
        }
    }

    /// Theme in effect for `id`: its own override, else `current`.
    pub fn theme_for<'a>(&'a self, id: WidgetId, current: &'a Theme) -> &'a Theme {
        self.arena
            .get(id)
            .and_then(|n| n.theme.as_deref())
            .unwrap_or(current)
    }

    /// True if `id` is `ancestor` or lies below it.
    pub fn is_within(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = self.parent(cid);
        }
        false
    }

    /// Group a radio belongs to: its parent, if that is a `RadioGroup`.
    pub fn radio_group(&self, radio: WidgetId) -> Option<WidgetId> {
        let parent = self.parent(radio)?;
        matches!(self.widget(parent), Some(Widget::RadioGroup(_))).then_some(parent)
    }

    /// Whether `radio`'s value is its group's selected value.
    pub fn is_radio_selected(&self, radio: WidgetId) -> bool {
        let Some(Widget::Radio(r)) = self.widget(radio) else {
            return false;
        };
        match self.radio_group(radio).and_then(|g| self.widget(g)) {
            Some(Widget::RadioGroup(g)) => g.selected.as_deref() == Some(r.value.as_str()),
            _ => false,
        }
    }

    /// Children that currently take part in draw, hit-test and dispatch.
    /// Tabs expose only the active page; a window hides its close button
    /// when the header or close box is off.
    pub fn live_children(&self, id: WidgetId) -> Children {
        let Some(node) = self.arena.get(id) else {
            return Children::new();
        };
        match &node.widget {
            Widget::Tabs(tabs) => node.children.get(tabs.active).copied().into_iter().collect(),
            Widget::Window(win) if !(win.show_header && win.closable) => node
                .children
                .iter()
                .copied()
                .filter(|c| Some(*c) != win.close_button)
                .collect(),
            _ => node.children.iter().copied().collect(),
        }
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Frontmost widget under `p` within the subtree rooted at `id`.
    /// Walks back-to-front: the last live child is topmost.
    pub fn hit_test(&self, id: WidgetId, p: Point) -> Option<WidgetId> {
        let node = self.arena.get(id)?;
        if !node.rect.contains(p) {
            return None;
        }
        for child in self.live_children(id).into_iter().rev() {
            if let Some(hit) = self.hit_test(child, p) {
                return Some(hit);
            }
        }
        Some(id)
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Add a menu to a menu bar: a header item under the bar plus a detached
    /// popup the bar owns. Returns the popup; fill it with menu items.
    pub fn add_menu(&mut self, bar: WidgetId, title: impl Into<String>) -> Option<WidgetId> {
        if !matches!(self.widget(bar), Some(Widget::MenuBar(_))) {
            return None;
        }
        self.insert(bar, Widget::menu_item(title, None));
        let popup = self.insert_root(Widget::PopupMenu(PopupMenu {
            owner: Some(bar),
            on_dismiss: None,
        }));
        if let Some(Widget::MenuBar(MenuBar { popups, .. })) = self.widget_mut(bar) {
            popups.push(popup);
        }
        Some(popup)
    }

    /// Add a page to a tab strip. Returns the page id.
    pub fn add_tab(
        &mut self,
        tabs: WidgetId,
        title: impl Into<String>,
        page: Widget,
    ) -> Option<WidgetId> {
        let Some(Widget::Tabs(Tabs { titles, .. })) = self.widget_mut(tabs) else {
            return None;
        };
        titles.push(title.into());
        Some(self.insert(tabs, page))
    }

    /// Create a detached window with its close button. Push it as an
    /// overlay to show it; add content with `insert`.
    pub fn insert_window(&mut self, title: impl Into<String>) -> WidgetId {
        let win = self.insert_root(Widget::window(title));
        let close = self.insert(
            win,
            Widget::button("x", Some(Handler::new(move |m, ()| m.close_window(win)))),
        );
        if let Some(Widget::Window(w)) = self.widget_mut(win) {
            w.close_button = Some(close);
        }
        win
    }
}
