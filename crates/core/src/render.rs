//! Text rendering of a screen into a single message body.

use crate::screen::Screen;

/// Render `screen` as a message body.
///
/// Each output row concatenates the row's symbols followed by `\n`; the rows
/// are wrapped as `"{title}\n{rows}\n{footer}"`, so a blank line separates the
/// last row from the footer.
pub fn render(screen: &Screen, title: &str, footer: &str) -> String {
    let mut out = String::with_capacity(title.len() + footer.len() + 2 + estimate(screen));
    out.push_str(title);
    out.push('\n');
    for row in screen.rows() {
        for sym in row {
            out.push_str(sym.as_str());
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(footer);
    out
}

fn estimate(screen: &Screen) -> usize {
    let cell = screen.get(0, 0).map_or(1, |s| s.as_str().len());
    (screen.width() * cell + 1) * screen.height()
}
