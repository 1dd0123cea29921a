//! Widget showcase.
//!
//! Builds one of every widget kind into a single tree: a menu bar, a tab strip
//! with a controls page, a long list and a scroll view, plus a detached
//! "About" window opened from the menu. Used by the `dump_layout` binary and
//! by the routing tests as a realistic tree.

use crate::geometry::Rect;
use crate::master::Master;
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::{Axis, Container, EntryKind, Handler, MenuBar, Tabs, Widget};

/// Ids of the interesting widgets in the demo tree.
#[derive(Debug, Clone, Copy)]
pub struct DemoIds {
    pub root: WidgetId,
    pub menu_bar: WidgetId,
    pub tabs: WidgetId,
    pub button: WidgetId,
    pub name: WidgetId,
    pub select: WidgetId,
    pub mode: WidgetId,
    pub notes: WidgetId,
    pub list: WidgetId,
    pub about: WidgetId,
}

/// Build the showcase into `tree`. The root is a stretched vertical
/// container; lay it out at the surface size.
pub fn build_demo(tree: &mut WidgetTree) -> DemoIds {
    let root = tree.insert_root(Widget::Container(Container {
        axis: Axis::Vertical,
        stretch: true,
    }));

    // -----------------------------------------------------------------------
    // About window (detached until opened)
    // -----------------------------------------------------------------------
    let about = tree.insert_window("About");
    let about_body = tree.insert(about, Widget::container(Axis::Vertical));
    tree.insert(about_body, Widget::label("trellis widget toolkit"));
    tree.insert(about_body, Widget::label("drag the header to move"));
    tree.set_rect(about, Rect::new(180, 120, 260, 140));

    // -----------------------------------------------------------------------
    // Menu bar
    // -----------------------------------------------------------------------
    let menu_bar = tree.insert(root, Widget::MenuBar(MenuBar::default()));
    if let Some(file) = tree.add_menu(menu_bar, "File") {
        tree.insert(file, Widget::menu_item("New", None));
        tree.insert(file, Widget::menu_item("Open...", None));
        tree.insert(
            file,
            Widget::menu_item(
                "Quit",
                Some(Handler::new(|m, ()| {
                    log::info!("quit requested");
                    m.set_focus(None);
                })),
            ),
        );
    }
    if let Some(help) = tree.add_menu(menu_bar, "Help") {
        tree.insert(
            help,
            Widget::menu_item(
                "About",
                Some(Handler::new(move |m, ()| m.push_overlay(about))),
            ),
        );
    }

    // -----------------------------------------------------------------------
    // Tabs
    // -----------------------------------------------------------------------
    let tabs = tree.insert(root, Widget::Tabs(Tabs::default()));
    tree.set_fill(tabs, true);

    // Controls page
    let controls = tree
        .add_tab(tabs, "Controls", Widget::container(Axis::Vertical))
        .unwrap_or(tabs);
    tree.insert(controls, Widget::label("Name"));
    let name = tree.insert(controls, Widget::text_input("", EntryKind::Text));
    tree.insert(controls, Widget::label("Age"));
    tree.insert(controls, Widget::text_input("42", EntryKind::Integer));
    tree.insert(controls, Widget::text_input("secret", EntryKind::Password));

    let row = tree.insert(controls, Widget::container(Axis::Horizontal));
    let button = tree.insert(
        row,
        Widget::button(
            "About...",
            Some(Handler::new(move |m, ()| m.push_overlay(about))),
        ),
    );
    tree.set_tooltip(button, "Opens the about window");
    tree.insert(row, Widget::checkbox("Enabled", true));

    let select = tree.insert(
        controls,
        Widget::select(
            ["Small", "Medium", "Large", "Huge", "Enormous", "Colossal"]
                .map(String::from)
                .to_vec(),
        ),
    );
    if let Some(Widget::Select(s)) = tree.widget_mut(select) {
        s.selected = Some(1);
    }

    let mode = tree.insert(controls, Widget::radio_group(Axis::Horizontal));
    tree.insert(mode, Widget::radio("Light", "light"));
    tree.insert(mode, Widget::radio("Dark", "dark"));
    if let Some(Widget::RadioGroup(g)) = tree.widget_mut(mode) {
        g.selected = Some("light".into());
        g.on_change = Some(Handler::new(|_, value: String| {
            log::info!("mode {value}");
        }));
    }

    tree.insert(controls, Widget::label("Notes"));
    let notes = tree.insert(controls, Widget::text_area(""));

    // List page
    let list = tree
        .add_tab(
            tabs,
            "List",
            Widget::list((1..=30).map(|i| format!("Item {i}")).collect()),
        )
        .unwrap_or(tabs);

    // Scroll page
    let scroll = tree
        .add_tab(tabs, "Scroll", Widget::scroll_view(0, 0))
        .unwrap_or(tabs);
    let panel = tree.insert(scroll, Widget::Panel);
    let column = tree.insert(panel, Widget::container(Axis::Vertical));
    for i in 0..40 {
        tree.insert(column, Widget::label(format!("Line {i:02} of scrolled content")));
    }

    DemoIds {
        root,
        menu_bar,
        tabs,
        button,
        name,
        select,
        mode,
        notes,
        list,
        about,
    }
}

/// A `Master` holding the showcase as its root.
pub fn demo_master(theme: Theme) -> (Master, DemoIds) {
    let mut tree = WidgetTree::new();
    let ids = build_demo(&mut tree);
    (Master::with_root(tree, ids.root, theme), ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn demo_lays_out_to_surface() {
        let (mut m, ids) = demo_master(Theme::default());
        m.layout(Size::new(640, 480));
        assert_eq!(m.tree().rect(ids.root), Rect::new(0, 0, 640, 480));
        let tabs = m.tree().rect(ids.tabs);
        assert_eq!(tabs.width, 640);
        assert!(tabs.bottom() <= 480);
    }

    #[test]
    fn controls_page_fits_radios_and_notes() {
        let (mut m, ids) = demo_master(Theme::default());
        m.layout(Size::new(640, 480));
        assert!(m.tree().is_radio_selected(m.tree().children(ids.mode)[0]));
        let notes = m.tree().rect(ids.notes);
        assert_eq!(notes.size(), Size::new(100, 48));
        assert!(notes.bottom() <= m.tree().rect(ids.tabs).bottom());
    }

    #[test]
    fn about_window_starts_hidden() {
        let (m, ids) = demo_master(Theme::default());
        assert!(!m.is_overlay(ids.about));
        assert_eq!(m.tree().parent(ids.about), None);
    }
}
