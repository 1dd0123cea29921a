//! Lay out the widget showcase and print the recorded draw commands.
//!
//! Usage: dump_layout [theme.ron]

use trellis::demo::demo_master;
use trellis::draw::{DrawCommand, DrawList};
use trellis::geometry::Size;
use trellis::theme::{Theme, load_theme_or_default};

const SURFACE: Size = Size::new(640, 480);

fn main() {
    env_logger::init();

    let theme = match std::env::args().nth(1) {
        Some(path) => load_theme_or_default(path),
        None => Theme::default(),
    };

    let (mut master, ids) = demo_master(theme);
    master.layout(SURFACE);

    let mut surface = DrawList::new(SURFACE);
    master.draw(&mut surface);

    log::info!(
        "{} widgets, {} draw commands",
        master.tree().len(),
        surface.commands.len()
    );
    println!("root {:?}", master.tree().rect(ids.root));
    for cmd in &surface.commands {
        match cmd {
            DrawCommand::Fill { rect, .. } => println!("fill   {rect:?}"),
            DrawCommand::Border { rect, .. } => println!("border {rect:?}"),
            DrawCommand::Text { text, pos, .. } => {
                println!("text   ({}, {}) {text:?}", pos.x, pos.y)
            }
        }
    }
}
