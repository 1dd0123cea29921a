//! End-to-end input routing: focus, overlays, menus, drop-downs, windows
//! and wheel bubbling, driven through `Master::event`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use trellis::demo::demo_master;
use trellis::event::{Event, KeyCode};
use trellis::geometry::{Point, Rect, Size};
use trellis::master::Master;
use trellis::scroll::{Viewport, max_scroll};
use trellis::theme::{FontMetrics, Theme};
use trellis::tree::{WidgetId, WidgetTree};
use trellis::widget::{Axis, Container, EntryKind, Handler, MenuBar, PopupMenu, Tabs, Widget};

fn center(r: Rect) -> Point {
    Point::new(r.x + r.width / 2, r.y + r.height / 2)
}

fn click(m: &mut Master, p: Point) {
    m.event(&Event::pointer_down(p.x, p.y));
    m.event(&Event::pointer_up(p.x, p.y));
}

fn click_widget(m: &mut Master, id: WidgetId) {
    let p = center(m.tree().rect(id));
    click(m, p);
}

/// Font giving 20px list rows.
fn row_theme() -> Theme {
    Theme {
        font: Some(FontMetrics {
            glyph_width: 8,
            ascent: 14,
            descent: 4,
        }),
        ..Theme::default()
    }
}

fn entry_text(m: &Master, id: WidgetId) -> &str {
    match m.tree().widget(id) {
        Some(Widget::TextInput(t)) => &t.text,
        _ => panic!("not a text input"),
    }
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[test]
fn focus_is_exclusive() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let a = tree.insert(root, Widget::text_input("", EntryKind::Text));
    let b = tree.insert(root, Widget::text_input("", EntryKind::Text));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, a);
    assert_eq!(m.focused(), Some(a));
    click_widget(&mut m, b);
    assert_eq!(m.focused(), Some(b));

    let focused: Vec<_> = [a, b]
        .into_iter()
        .filter(|&id| m.tree().widget(id).is_some_and(Widget::is_focused))
        .collect();
    assert_eq!(focused, vec![b]);
}

#[test]
fn clicking_label_after_entry_drops_keys() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let entry = tree.insert(root, Widget::text_input("", EntryKind::Text));
    let label = tree.insert(root, Widget::label("Name"));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, entry);
    assert!(m.event(&Event::TextInput("a".into())));
    assert_eq!(entry_text(&m, entry), "a");

    click_widget(&mut m, label);
    assert_eq!(m.focused(), None);
    assert!(!m.event(&Event::TextInput("b".into())));
    assert!(!m.event(&Event::KeyDown(KeyCode::BACKSPACE)));
    assert_eq!(entry_text(&m, entry), "a");
}

#[test]
fn entry_editing_keys_route_to_focus() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let age = tree.insert(root, Widget::text_input("", EntryKind::Integer));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, age);
    for s in ["4", "x", "2"] {
        m.event(&Event::TextInput(s.into()));
    }
    assert_eq!(entry_text(&m, age), "42");

    m.event(&Event::KeyDown(KeyCode::HOME));
    m.event(&Event::TextInput("-".into()));
    m.event(&Event::KeyDown(KeyCode::END));
    m.event(&Event::KeyDown(KeyCode::BACKSPACE));
    assert_eq!(entry_text(&m, age), "-4");
    // Unknown keys fall through.
    assert!(!m.event(&Event::KeyDown(KeyCode(112))));
}

#[test]
fn checkbox_toggles_by_click_and_keyboard() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let cb = tree.insert(root, Widget::checkbox("Enabled", false));
    if let Some(Widget::Checkbox(c)) = tree.widget_mut(cb) {
        let seen = seen.clone();
        c.on_change = Some(Handler::new(move |_, checked| seen.borrow_mut().push(checked)));
    }
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, cb);
    assert_eq!(m.focused(), Some(cb));
    assert!(m.event(&Event::KeyDown(KeyCode::SPACE)));
    assert!(m.event(&Event::KeyDown(KeyCode::ENTER)));
    assert_eq!(*seen.borrow(), vec![true, false, true]);
}

#[test]
fn radio_picks_by_click_and_keyboard() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let group = tree.insert(root, Widget::radio_group(Axis::Vertical));
    let small = tree.insert(group, Widget::radio("Small", "s"));
    let large = tree.insert(group, Widget::radio("Large", "l"));
    if let Some(Widget::RadioGroup(g)) = tree.widget_mut(group) {
        let seen = seen.clone();
        g.on_change = Some(Handler::new(move |_, value: String| seen.borrow_mut().push(value)));
    }
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, large);
    assert_eq!(m.focused(), Some(large));
    assert!(m.tree().is_radio_selected(large));
    assert!(!m.tree().is_radio_selected(small));

    click_widget(&mut m, small);
    assert_eq!(m.focused(), Some(small));
    assert!(m.event(&Event::KeyDown(KeyCode::SPACE)));
    assert!(!m.event(&Event::KeyDown(KeyCode::DOWN)));
    assert!(m.tree().is_radio_selected(small));
    assert_eq!(*seen.borrow(), vec!["l", "s", "s"]);
}

#[test]
fn press_released_off_radio_does_not_pick() {
    let mut tree = WidgetTree::new();
    let group = tree.insert_root(Widget::radio_group(Axis::Vertical));
    let a = tree.insert(group, Widget::radio("A", "a"));
    let mut m = Master::with_root(tree, group, Theme::default());
    m.layout(Size::new(300, 200));

    let p = center(m.tree().rect(a));
    m.event(&Event::pointer_down(p.x, p.y));
    m.event(&Event::pointer_up(250, 150));
    assert!(!m.tree().is_radio_selected(a));
}

#[test]
fn text_area_takes_lines_and_backspace() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let area = tree.insert(root, Widget::text_area(""));
    let entry = tree.insert(root, Widget::text_input("", EntryKind::Text));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, area);
    assert_eq!(m.focused(), Some(area));
    assert!(m.event(&Event::TextInput("ab".into())));
    assert!(m.event(&Event::KeyDown(KeyCode::ENTER)));
    assert!(m.event(&Event::TextInput("cd".into())));
    assert!(m.event(&Event::KeyDown(KeyCode::BACKSPACE)));
    assert!(!m.event(&Event::KeyDown(KeyCode::LEFT)));

    // Keys follow focus to the entry; the area keeps its text.
    click_widget(&mut m, entry);
    m.event(&Event::TextInput("x".into()));
    let Some(Widget::TextArea(t)) = m.tree().widget(area) else {
        panic!("text area");
    };
    assert_eq!(t.text, "ab\nc");
    assert!(!t.focused);
    assert_eq!(entry_text(&m, entry), "x");
}

#[test]
fn handler_may_remove_its_own_widget() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let button = tree.insert(root, Widget::button("Delete me", None));
    if let Some(Widget::Button(b)) = tree.widget_mut(button) {
        b.on_click = Some(Handler::new(move |m, ()| m.remove(button)));
    }
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, button);
    assert!(!m.tree().contains(button));
    assert!(m.tree().children(root).is_empty());
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn counting_popup(tree: &mut WidgetTree, rect: Rect, count: &Rc<Cell<u32>>) -> WidgetId {
    let count = count.clone();
    let popup = tree.insert_root(Widget::PopupMenu(PopupMenu {
        owner: None,
        on_dismiss: Some(Handler::new(move |_, ()| count.set(count.get() + 1))),
    }));
    tree.insert(popup, Widget::menu_item("item", None));
    tree.set_rect(popup, rect);
    popup
}

#[test]
fn click_outside_pops_only_topmost_overlay() {
    let a_dismissed = Rc::new(Cell::new(0));
    let b_dismissed = Rc::new(Cell::new(0));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let a = counting_popup(&mut tree, Rect::new(10, 10, 60, 40), &a_dismissed);
    let b = counting_popup(&mut tree, Rect::new(100, 100, 60, 40), &b_dismissed);
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(400, 300));

    m.push_overlay(a);
    m.push_overlay(b);
    m.push_overlay(b);
    assert_eq!(m.overlays(), &[a, b]);

    assert!(m.event(&Event::pointer_down(300, 250)));
    assert_eq!(m.overlays(), &[a]);
    assert_eq!(b_dismissed.get(), 1);
    assert_eq!(a_dismissed.get(), 0);
}

#[test]
fn close_overlay_pops_everything_above() {
    let count = Rc::new(Cell::new(0));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let a = counting_popup(&mut tree, Rect::new(0, 0, 50, 50), &count);
    let b = counting_popup(&mut tree, Rect::new(0, 0, 50, 50), &count);
    let c = counting_popup(&mut tree, Rect::new(0, 0, 50, 50), &count);
    let mut m = Master::with_root(tree, root, Theme::default());
    for id in [a, b, c] {
        m.push_overlay(id);
    }

    m.close_overlay(b);
    assert_eq!(m.overlays(), &[a]);
    assert_eq!(count.get(), 2);
}

#[test]
fn popping_overlay_clears_focus_inside_it() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let win = tree.insert_window("Edit");
    let entry = tree.insert(win, Widget::text_input("", EntryKind::Text));
    tree.set_rect(win, Rect::new(50, 50, 200, 100));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(400, 300));
    m.push_overlay(win);

    click_widget(&mut m, entry);
    assert_eq!(m.focused(), Some(entry));
    m.pop_overlay();
    assert_eq!(m.focused(), None);
    assert!(!m.event(&Event::TextInput("x".into())));
}

// ---------------------------------------------------------------------------
// Lists and wheel
// ---------------------------------------------------------------------------

#[test]
fn list_wheel_clamps_to_max_scroll() {
    let mut tree = WidgetTree::new();
    let list = tree.insert_root(Widget::list((0..10).map(|i| format!("Item {i}")).collect()));
    let mut m = Master::with_root(tree, list, row_theme());
    // 97 high: 95px viewport inside the 1px border, 10 rows of 20 = 200.
    m.layout(Size::new(120, 97));

    m.event(&Event::pointer_move(5, 5));
    assert!(m.event(&Event::scroll(-10.0)));
    let Some(Widget::List(l)) = m.tree().widget(list) else {
        panic!("list");
    };
    assert_eq!(l.scroll.offset, 105);

    m.event(&Event::scroll(100.0));
    let Some(Widget::List(l)) = m.tree().widget(list) else {
        panic!("list");
    };
    assert_eq!(l.scroll.offset, 0);
}

#[test]
fn list_offset_reclamps_when_laid_out_taller() {
    let mut tree = WidgetTree::new();
    let list = tree.insert_root(Widget::list((0..10).map(|i| format!("Item {i}")).collect()));
    let mut m = Master::with_root(tree, list, row_theme());
    m.layout(Size::new(120, 97));
    m.event(&Event::pointer_move(5, 5));
    m.event(&Event::scroll(-10.0));

    // 180px viewport leaves 20px of the 200px content to scroll.
    m.layout(Size::new(120, 182));
    let Some(Widget::List(l)) = m.tree().widget(list) else {
        panic!("list");
    };
    assert_eq!(l.scroll.offset, max_scroll(200, 180));
    assert_eq!(l.scroll.offset, 20);
}

#[test]
fn drop_down_offset_reclamps_on_layout() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let select = tree.insert(root, Widget::select((0..10).map(|i| format!("Opt {i}")).collect()));
    let mut m = Master::with_root(tree, root, row_theme());
    m.layout(Size::new(200, 300));
    click_widget(&mut m, select);
    let Some(&list) = m.overlays().last() else {
        panic!("drop-down not shown");
    };
    if let Some(Widget::SelectList(l)) = m.tree_mut().widget_mut(list) {
        l.scroll.offset = 1_000;
    }

    // Five 20px rows in a 102px box: 200 - 100 = 100.
    m.layout(Size::new(200, 300));
    let Some(Widget::SelectList(l)) = m.tree().widget(list) else {
        panic!("drop-down");
    };
    assert_eq!(l.scroll.offset, 100);
}

#[test]
fn huge_wheel_deltas_saturate_at_the_ends() {
    let mut tree = WidgetTree::new();
    let sv = tree.insert_root(Widget::scroll_view(0, 0));
    let column = tree.insert(sv, Widget::container(Axis::Vertical));
    for i in 0..25 {
        tree.insert(column, Widget::label(format!("row {i}")));
    }
    let mut m = Master::with_root(tree, sv, Theme::default());
    m.layout(Size::new(100, 100));
    let max_y = Viewport::compute(m.tree().min_size(column, m.theme()), Size::new(100, 100)).max_y;
    assert!(max_y > 0);
    let offset_y = |m: &Master| match m.tree().widget(sv) {
        Some(Widget::ScrollView(s)) => s.offset.y,
        _ => panic!("scroll view"),
    };

    m.event(&Event::pointer_move(20, 20));
    assert!(m.event(&Event::scroll(-2.0e8)));
    assert_eq!(offset_y(&m), max_y);
    assert!(m.event(&Event::scroll(f64::NEG_INFINITY)));
    assert_eq!(offset_y(&m), max_y);
    assert!(m.event(&Event::scroll(f64::INFINITY)));
    assert_eq!(offset_y(&m), 0);
}

#[test]
fn track_press_off_thumb_reaches_content() {
    let clicks = Rc::new(Cell::new(0));
    let mut tree = WidgetTree::new();
    let sv = tree.insert_root(Widget::scroll_view(0, 0));
    let column = tree.insert(
        sv,
        Widget::Container(Container {
            axis: Axis::Vertical,
            stretch: true,
        }),
    );
    tree.insert(column, Widget::scroll_view(10, 40));
    let c = clicks.clone();
    let button = tree.insert(
        column,
        Widget::button("x".repeat(40), Some(Handler::new(move |_, ()| c.set(c.get() + 1)))),
    );
    tree.insert(column, Widget::scroll_view(10, 300));
    let mut m = Master::with_root(tree, sv, Theme::default());
    m.layout(Size::new(100, 100));

    // Content 340 wide runs under the vertical bar at x 90..100; the
    // thumb sits at the top of the track, the button below it.
    let b = m.tree().rect(button);
    assert_eq!(b, Rect::new(0, 45, 340, 24));
    click(&mut m, Point::new(95, 57));
    assert_eq!(clicks.get(), 1);

    // Pressing the thumb itself starts a drag instead.
    click(&mut m, Point::new(95, 5));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn list_click_and_arrow_keys_select() {
    let picked = Rc::new(RefCell::new(Vec::new()));
    let mut tree = WidgetTree::new();
    let list = tree.insert_root(Widget::list((0..10).map(|i| format!("Item {i}")).collect()));
    if let Some(Widget::List(l)) = tree.widget_mut(list) {
        let picked = picked.clone();
        l.on_select = Some(Handler::new(move |_, i| picked.borrow_mut().push(i)));
    }
    let mut m = Master::with_root(tree, list, row_theme());
    m.layout(Size::new(120, 97));

    // Row 2 spans y 41..61 inside the border.
    click(&mut m, Point::new(20, 50));
    assert_eq!(m.focused(), Some(list));
    for _ in 0..4 {
        m.event(&Event::KeyDown(KeyCode::DOWN));
    }
    m.event(&Event::KeyDown(KeyCode::UP));

    let Some(Widget::List(l)) = m.tree().widget(list) else {
        panic!("list");
    };
    assert_eq!(l.selected, Some(5));
    // Row 6 had to be revealed: bottom 140 - viewport 95.
    assert_eq!(l.scroll.offset, 45);
    assert_eq!(*picked.borrow(), vec![2, 3, 4, 5, 6, 5]);
}

#[test]
fn wheel_bubbles_from_label_to_scroll_view() {
    let mut tree = WidgetTree::new();
    let sv = tree.insert_root(Widget::scroll_view(0, 0));
    let column = tree.insert(sv, Widget::container(Axis::Vertical));
    let mut labels = Vec::new();
    for i in 0..30 {
        labels.push(tree.insert(column, Widget::label(format!("Line {i}"))));
    }
    let mut m = Master::with_root(tree, sv, Theme::default());
    m.layout(Size::new(200, 100));

    let p = center(m.tree().rect(labels[1]));
    m.event(&Event::pointer_move(p.x, p.y));
    assert_eq!(m.hit_test(p), Some(labels[1]));
    assert!(m.event(&Event::scroll(-1.0)));

    let Some(Widget::ScrollView(s)) = m.tree().widget(sv) else {
        panic!("scroll view");
    };
    assert_eq!(s.offset, Point::new(0, 20));
    // Content moved with the offset.
    assert_eq!(m.tree().rect(column).y, -20);
}

#[test]
fn wheel_over_nothing_is_ignored() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    tree.insert(root, Widget::label("x"));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(100, 100));
    m.event(&Event::pointer_move(50, 90));
    assert!(!m.event(&Event::scroll(-1.0)));
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

#[test]
fn menu_opens_runs_action_and_closes() {
    let runs = Rc::new(Cell::new(0));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let bar = tree.insert(root, Widget::MenuBar(MenuBar::default()));
    let file = tree.add_menu(bar, "File").expect("menu bar");
    let edit = tree.add_menu(bar, "Edit").expect("menu bar");
    let new = {
        let runs = runs.clone();
        tree.insert(
            file,
            Widget::menu_item("New", Some(Handler::new(move |_, ()| runs.set(runs.get() + 1)))),
        )
    };
    tree.insert(edit, Widget::menu_item("Undo", None));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(400, 300));
    let headers = m.tree().children(bar).to_vec();

    click_widget(&mut m, headers[0]);
    assert_eq!(m.overlays(), &[file]);
    let header = m.tree().rect(headers[0]);
    assert_eq!(m.tree().rect(file).origin(), Point::new(header.x, header.bottom()));
    assert!(matches!(m.tree().widget(bar), Some(Widget::MenuBar(b)) if b.open == Some(0)));

    // Switching headers swaps the popup.
    click_widget(&mut m, headers[1]);
    assert_eq!(m.overlays(), &[edit]);

    click_widget(&mut m, headers[0]);
    assert_eq!(m.overlays(), &[file]);
    click_widget(&mut m, new);
    assert_eq!(runs.get(), 1);
    assert!(m.overlays().is_empty());
    assert!(matches!(m.tree().widget(bar), Some(Widget::MenuBar(b)) if b.open.is_none()));
}

#[test]
fn toggle_menu_twice_closes() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let bar = tree.insert(root, Widget::MenuBar(MenuBar::default()));
    let file = tree.add_menu(bar, "File").expect("menu bar");
    tree.insert(file, Widget::menu_item("New", None));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(400, 300));

    m.toggle_menu(bar, 0);
    assert_eq!(m.overlays(), &[file]);
    m.toggle_menu(bar, 0);
    assert!(m.overlays().is_empty());
    // Out of range header index.
    m.toggle_menu(bar, 7);
    assert!(m.overlays().is_empty());
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

#[test]
fn select_opens_list_and_picks_item() {
    let picked = Rc::new(Cell::new(None));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let select = tree.insert(
        root,
        Widget::select(["Red", "Green", "Blue"].map(String::from).to_vec()),
    );
    if let Some(Widget::Select(s)) = tree.widget_mut(select) {
        let picked = picked.clone();
        s.on_select = Some(Handler::new(move |_, i| picked.set(Some(i))));
    }
    let mut m = Master::with_root(tree, root, row_theme());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, select);
    let Some(Widget::Select(s)) = m.tree().widget(select) else {
        panic!("select");
    };
    assert!(s.expanded);
    let list = s.list.expect("open list");
    assert_eq!(m.overlays(), &[list]);
    let sel = m.tree().rect(select);
    assert_eq!(
        m.tree().rect(list),
        Rect::new(sel.x, sel.bottom(), sel.width, 3 * 20 + 2)
    );

    // Third row: y offset 1 + 2 * 20 inside the list.
    let lr = m.tree().rect(list);
    click(&mut m, Point::new(lr.x + 5, lr.y + 1 + 2 * 20 + 10));

    assert_eq!(picked.get(), Some(2));
    assert!(m.overlays().is_empty());
    assert!(!m.tree().contains(list));
    let Some(Widget::Select(s)) = m.tree().widget(select) else {
        panic!("select");
    };
    assert_eq!(s.selected, Some(2));
    assert!(!s.expanded);
    assert_eq!(s.list, None);
}

#[test]
fn clicking_select_again_collapses() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let select = tree.insert(root, Widget::select(vec!["a".into(), "b".into()]));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(300, 200));

    click_widget(&mut m, select);
    assert_eq!(m.overlays().len(), 1);
    // Pointer-down on the select box is outside the list: the overlay pops
    // and consumes the click.
    click_widget(&mut m, select);
    assert!(m.overlays().is_empty());
    assert!(matches!(m.tree().widget(select), Some(Widget::Select(s)) if !s.expanded));
}

// ---------------------------------------------------------------------------
// Windows and tabs
// ---------------------------------------------------------------------------

#[test]
fn window_drags_by_header_and_closes() {
    let closed = Rc::new(Cell::new(0));
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Widget::container(Axis::Vertical));
    let win = tree.insert_window("Tools");
    tree.insert(win, Widget::label("body"));
    if let Some(Widget::Window(w)) = tree.widget_mut(win) {
        let closed = closed.clone();
        w.on_close = Some(Handler::new(move |_, ()| closed.set(closed.get() + 1)));
    }
    tree.set_rect(win, Rect::new(100, 100, 200, 150));
    let mut m = Master::with_root(tree, root, Theme::default());
    m.layout(Size::new(640, 480));
    m.push_overlay(win);

    // Drag from inside the header, left of the close button.
    m.event(&Event::pointer_down(120, 105));
    m.event(&Event::pointer_move(150, 125));
    m.event(&Event::pointer_up(150, 125));
    assert_eq!(m.tree().rect(win), Rect::new(130, 120, 200, 150));

    let close = match m.tree().widget(win) {
        Some(Widget::Window(w)) => w.close_button.expect("close button"),
        _ => panic!("window"),
    };
    let cr = m.tree().rect(close);
    assert_eq!(cr, Rect::new(130 + 200 - 2 - 20, 122, 20, 20));
    click_widget(&mut m, close);

    assert_eq!(closed.get(), 1);
    assert!(m.overlays().is_empty());
    assert!(m.tree().contains(win));
}

#[test]
fn tab_header_click_switches_page() {
    let mut tree = WidgetTree::new();
    let tabs = tree.insert_root(Widget::Tabs(Tabs::default()));
    let one = tree.add_tab(tabs, "One", Widget::label("first")).expect("tabs");
    let two = tree.add_tab(tabs, "Two", Widget::label("second")).expect("tabs");
    let mut m = Master::with_root(tree, tabs, Theme::default());
    m.layout(Size::new(300, 200));

    // "One" is 3 * 8 + 10 wide; x = 40 lands on "Two".
    click(&mut m, Point::new(40, 5));
    assert!(matches!(m.tree().widget(tabs), Some(Widget::Tabs(t)) if t.active == 1));
    assert_eq!(m.hit_test(Point::new(5, 25)), Some(two));
    assert_ne!(m.hit_test(Point::new(5, 25)), Some(one));
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

#[test]
fn demo_help_menu_opens_about_window() {
    let (mut m, ids) = demo_master(Theme::default());
    m.layout(Size::new(640, 480));

    let headers = m.tree().children(ids.menu_bar).to_vec();
    click_widget(&mut m, headers[1]);
    let popup = *m.overlays().last().expect("help popup");
    let about_item = m.tree().children(popup)[0];
    click_widget(&mut m, about_item);

    assert_eq!(m.overlays(), &[ids.about]);
}

#[test]
fn demo_button_tooltip_draws() {
    let (mut m, ids) = demo_master(Theme::default());
    m.layout(Size::new(640, 480));
    let p = center(m.tree().rect(ids.button));
    m.event(&Event::pointer_move(p.x, p.y));

    let mut dl = trellis::draw::DrawList::new(Size::new(640, 480));
    m.draw(&mut dl);
    assert_eq!(m.hovered(), Some(ids.button));
    assert!(dl.texts().any(|t| t == "Opens the about window"));
    assert_eq!(dl.clip_depth(), 0);
}
