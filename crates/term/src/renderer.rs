//! TerminalRenderer: flushes composed lines to a real terminal.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Vec<String>>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `lines`, rewriting only the lines that changed since the last draw.
    pub fn draw_lines(&mut self, lines: Vec<String>) -> Result<()> {
        self.buf.clear();
        match self.last.as_deref() {
            Some(prev) if prev.len() == lines.len() => encode_diff_into(prev, &lines, &mut self.buf)?,
            _ => encode_full_into(&lines, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(lines);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full redraw of `lines` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(lines: &[String], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for (y, line) in lines.iter().enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        out.queue(Print(line))?;
    }
    Ok(())
}

/// Encode only the lines of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &[String], next: &[String], out: &mut Vec<u8>) -> Result<()> {
    for y in changed_lines(prev, next) {
        out.queue(cursor::MoveTo(0, y))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.queue(Print(&next[y as usize]))?;
    }
    Ok(())
}

fn changed_lines(prev: &[String], next: &[String]) -> Vec<u16> {
    next.iter()
        .enumerate()
        .filter(|(y, line)| prev.get(*y) != Some(*line))
        .filter_map(|(y, _)| u16::try_from(y).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn changed_lines_only_reports_differences() {
        let a = lines(&["one", "two", "three"]);
        let b = lines(&["one", "2", "three"]);
        assert_eq!(changed_lines(&a, &b), vec![1]);
        assert!(changed_lines(&a, &a).is_empty());
    }

    #[test]
    fn diff_of_identical_frames_is_empty() {
        let a = lines(&["⬛⬛", "⬛🟦"]);
        let mut out = Vec::new();
        encode_diff_into(&a, &a, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn full_redraw_contains_every_line() {
        let a = lines(&["title", "⬛🟦"]);
        let mut out = Vec::new();
        encode_full_into(&a, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("title"));
        assert!(text.contains("⬛🟦"));
    }
}
