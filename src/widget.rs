use std::fmt;

use crate::WidgetId;
use crate::geometry::Point;
use crate::master::Master;

/// Callback invoked synchronously from inside event dispatch.
///
/// Receives the `Master`, so a handler may push/pop overlays, move focus or
/// edit the tree. While it runs it is detached from its widget; it is put
/// back afterwards if the widget still exists.
pub struct Handler<A = ()>(Box<dyn FnMut(&mut Master, A)>);

impl<A> Handler<A> {
    pub fn new(f: impl FnMut(&mut Master, A) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub(crate) fn call(&mut self, master: &mut Master, arg: A) {
        (self.0)(master, arg)
    }
}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

/// Layout direction of a `Container`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Flat enum widget identity.
/// Closed set: we know all widget kinds, so no trait objects. Composite
/// widgets own their children through the node's child list.
#[derive(Debug)]
pub enum Widget {
    /// Arranges children sequentially along one axis.
    Container(Container),
    /// Clipped window onto a single (possibly larger) content child.
    ScrollView(ScrollView),
    /// Padded, bordered box around a single content child.
    Panel,
    Label(Label),
    Button(Button),
    Checkbox(Checkbox),
    /// Column or row of `Radio` children sharing one selected value.
    RadioGroup(RadioGroup),
    /// One choice of the parent `RadioGroup`.
    Radio(Radio),
    TextInput(TextInput),
    /// Multi-line free text entry.
    TextArea(TextArea),
    List(List),
    /// Closed drop-down box. Opens a `SelectList` overlay.
    Select(Select),
    /// Ephemeral overlay listing a `Select`'s items.
    SelectList(SelectList),
    /// Row of menu header items (children), each owning a popup.
    MenuBar(MenuBar),
    /// Overlay column of menu items (children).
    PopupMenu(PopupMenu),
    MenuItem(MenuItem),
    /// Floating frame with optional header and close button.
    Window(Window),
    /// Tab strip; each child is one page, only the active one is live.
    Tabs(Tabs),
}

impl Widget {
    /// Widgets that can hold keyboard focus.
    pub fn is_focusable(&self) -> bool {
        matches!(
            self,
            Widget::Checkbox(_)
                | Widget::Radio(_)
                | Widget::TextInput(_)
                | Widget::TextArea(_)
                | Widget::List(_)
        )
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        match self {
            Widget::Checkbox(c) => c.focused = focused,
            Widget::Radio(r) => r.focused = focused,
            Widget::TextInput(t) => t.focused = focused,
            Widget::TextArea(t) => t.focused = focused,
            Widget::List(l) => l.focused = focused,
            _ => {}
        }
    }

    pub fn is_focused(&self) -> bool {
        match self {
            Widget::Checkbox(c) => c.focused,
            Widget::Radio(r) => r.focused,
            Widget::TextInput(t) => t.focused,
            Widget::TextArea(t) => t.focused,
            Widget::List(l) => l.focused,
            _ => false,
        }
    }

    pub fn container(axis: Axis) -> Self {
        Widget::Container(Container {
            axis,
            stretch: false,
        })
    }

    /// Scroll viewport with optional fixed min-size hints (0 = none).
    pub fn scroll_view(width: i32, height: i32) -> Self {
        Widget::ScrollView(ScrollView {
            width,
            height,
            ..ScrollView::default()
        })
    }

    pub fn label(text: impl Into<String>) -> Self {
        Widget::Label(Label { text: text.into() })
    }

    pub fn button(text: impl Into<String>, on_click: Option<Handler>) -> Self {
        Widget::Button(Button {
            text: text.into(),
            on_click,
            hovered: false,
            pressed: false,
        })
    }

    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        Widget::Checkbox(Checkbox {
            label: label.into(),
            checked,
            on_change: None,
            hovered: false,
            pressed: false,
            focused: false,
        })
    }

    pub fn radio_group(axis: Axis) -> Self {
        Widget::RadioGroup(RadioGroup {
            axis,
            selected: None,
            on_change: None,
        })
    }

    /// Choice labelled `label` that sets its group to `value` when picked.
    pub fn radio(label: impl Into<String>, value: impl Into<String>) -> Self {
        Widget::Radio(Radio {
            label: label.into(),
            value: value.into(),
            hovered: false,
            pressed: false,
            focused: false,
        })
    }

    pub fn text_area(text: impl Into<String>) -> Self {
        Widget::TextArea(TextArea {
            text: text.into(),
            width: 0,
            height: 0,
            focused: false,
        })
    }

    pub fn text_input(text: impl Into<String>, kind: EntryKind) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Widget::TextInput(TextInput {
            text,
            kind,
            cursor,
            width: 0,
            focused: false,
        })
    }

    pub fn list(items: Vec<String>) -> Self {
        Widget::List(List {
            items,
            selected: None,
            hovered: None,
            on_select: None,
            focused: false,
            scroll: RowScroll::default(),
        })
    }

    pub fn select(items: Vec<String>) -> Self {
        Widget::Select(Select {
            items,
            selected: None,
            hovered: None,
            on_select: None,
            expanded: false,
            list: None,
        })
    }

    pub fn menu_item(text: impl Into<String>, action: Option<Handler>) -> Self {
        Widget::MenuItem(MenuItem {
            text: text.into(),
            action,
            hovered: false,
        })
    }

    pub fn window(title: impl Into<String>) -> Self {
        Widget::Window(Window {
            title: title.into(),
            show_header: true,
            show_frame: true,
            closable: true,
            on_close: None,
            drag_from: None,
            close_button: None,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Container {
    pub axis: Axis,
    /// Force every child's cross-axis size to the available size.
    pub stretch: bool,
}

/// Which scrollbar thumb is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbDrag {
    pub axis: Axis,
    /// Pointer position at press.
    pub start_pointer: Point,
    /// Offset on `axis` at press.
    pub start_offset: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollView {
    /// Current scroll offset (x, y). Always within `[0, max_scroll]`.
    pub offset: Point,
    /// Fixed viewport width hint for min-size; 0 = fit content.
    pub width: i32,
    /// Fixed viewport height hint for min-size; 0 = default.
    pub height: i32,
    pub drag: Option<ThumbDrag>,
}

#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
}

#[derive(Debug)]
pub struct Button {
    pub text: String,
    pub on_click: Option<Handler>,
    pub hovered: bool,
    pub pressed: bool,
}

#[derive(Debug)]
pub struct Checkbox {
    pub label: String,
    pub checked: bool,
    pub on_change: Option<Handler<bool>>,
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
}

#[derive(Debug)]
pub struct RadioGroup {
    pub axis: Axis,
    /// Value of the picked radio, if any.
    pub selected: Option<String>,
    /// Runs with the new value every time a radio is picked.
    pub on_change: Option<Handler<String>>,
}

#[derive(Debug, Clone)]
pub struct Radio {
    pub label: String,
    pub value: String,
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TextArea {
    pub text: String,
    /// Fixed minimum width; 0 = 100px.
    pub width: i32,
    /// Fixed minimum height; 0 = three lines.
    pub height: i32,
    pub focused: bool,
}

impl TextArea {
    /// Append typed text at the end.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn newline(&mut self) {
        self.text.push('\n');
    }

    /// Remove the last char, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }
}

/// Input validation / display mode of a `TextInput`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryKind {
    #[default]
    Text,
    /// Displays one `*` per character.
    Password,
    /// Accepts only text that parses as an integer (or a partial sign).
    Integer,
    /// Accepts only text that parses as a float (or a partial prefix).
    Float,
}

#[derive(Debug, Clone)]
pub struct TextInput {
    pub text: String,
    pub kind: EntryKind,
    /// Cursor position in chars, `0..=text.chars().count()`.
    pub cursor: usize,
    /// Fixed minimum width; 0 = ten `M`s wide.
    pub width: i32,
    pub focused: bool,
}

impl TextInput {
    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Text as drawn: one `*` per char for passwords.
    pub fn display_text(&self) -> String {
        match self.kind {
            EntryKind::Password => "*".repeat(self.char_count()),
            _ => self.text.clone(),
        }
    }

    /// Whether `text` is acceptable content for this kind.
    pub fn accepts(&self, text: &str) -> bool {
        match self.kind {
            EntryKind::Text | EntryKind::Password => true,
            EntryKind::Integer => matches!(text, "" | "-") || text.parse::<i64>().is_ok(),
            EntryKind::Float => {
                matches!(text, "" | "-" | "." | "-.") || text.parse::<f64>().is_ok()
            }
        }
    }

    /// Insert at the cursor. Rejected (returns false) if the result would
    /// not be valid for this kind.
    pub fn insert(&mut self, s: &str) -> bool {
        self.cursor = self.cursor.min(self.char_count());
        let at = self.byte_index(self.cursor);
        let mut next = self.text.clone();
        next.insert_str(at, s);
        if !self.accepts(&next) {
            return false;
        }
        self.text = next;
        self.cursor += s.chars().count();
        true
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        self.cursor = self.cursor.min(self.char_count());
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.min(self.char_count()).saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Replace the text and put the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }
}

/// Vertical row scrolling shared by `List` and `SelectList`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowScroll {
    pub offset: i32,
    /// (pointer y at press, offset at press) while dragging the scrollbar.
    pub drag: Option<(i32, i32)>,
}

#[derive(Debug)]
pub struct List {
    pub items: Vec<String>,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    pub on_select: Option<Handler<usize>>,
    pub focused: bool,
    pub scroll: RowScroll,
}

#[derive(Debug)]
pub struct Select {
    pub items: Vec<String>,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    pub on_select: Option<Handler<usize>>,
    pub expanded: bool,
    /// The open drop-down overlay, if any.
    pub list: Option<WidgetId>,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectList {
    /// Select box this list belongs to.
    pub select: WidgetId,
    pub scroll: RowScroll,
}

#[derive(Debug, Default)]
pub struct MenuBar {
    /// Index of the header whose popup is on the overlay stack.
    pub open: Option<usize>,
    /// Popup per header, parallel to the bar's children.
    pub popups: Vec<WidgetId>,
}

#[derive(Debug, Default)]
pub struct PopupMenu {
    /// Menu bar that opened this popup, if any.
    pub owner: Option<WidgetId>,
    pub on_dismiss: Option<Handler>,
}

#[derive(Debug)]
pub struct MenuItem {
    pub text: String,
    pub action: Option<Handler>,
    pub hovered: bool,
}

#[derive(Debug)]
pub struct Window {
    pub title: String,
    pub show_header: bool,
    pub show_frame: bool,
    pub closable: bool,
    pub on_close: Option<Handler>,
    /// Last pointer position while the header is being dragged.
    pub drag_from: Option<Point>,
    /// Close button child, created with the window.
    pub close_button: Option<WidgetId>,
}

#[derive(Debug, Clone, Default)]
pub struct Tabs {
    /// Title per page, parallel to the node's children.
    pub titles: Vec<String>,
    pub active: usize,
}
