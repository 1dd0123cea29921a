//! Retained-mode widget toolkit: a widget tree with layout, clipped
//! scrolling, focus and an overlay stack, drawn onto an abstract `Surface`.

pub mod demo;
pub mod draw;
pub mod event;
pub mod geometry;
mod handlers;
pub mod layout;
pub mod master;
pub mod render;
pub mod scroll;
pub mod theme;
pub mod tree;
pub mod widget;

pub use draw::{DrawCommand, DrawList, Surface};
pub use event::{Event, KeyCode, MouseButton};
pub use geometry::{Edges, Point, Rect, Size};
pub use master::Master;
pub use theme::{Color, FontMetrics, Theme, ThemeError};
pub use tree::{WidgetId, WidgetTree};
pub use widget::{Axis, EntryKind, Handler, Widget};
