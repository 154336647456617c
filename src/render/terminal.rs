//! TerminalRenderer: writes captured frames to a real terminal.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use super::{Frame, Renderer, Tint};

/// Whether the run loop should keep going after a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    glyphs: Box<dyn Renderer>,
}

impl TerminalRenderer {
    pub fn new(glyphs: Box<dyn Renderer>) -> Self {
        Self {
            stdout: io::stdout(),
            glyphs,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Full redraw of the grid followed by the status lines
    pub fn draw(&mut self, frame: &Frame, status: &[String]) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current = None;
        for row in frame.glyph_rows(&*self.glyphs) {
            for glyph in row {
                if current != Some(glyph.tint) {
                    apply_tint(&mut self.stdout, glyph.tint)?;
                    current = Some(glyph.tint);
                }
                self.stdout.queue(Print(glyph.symbol))?;
            }
            self.stdout.queue(Print("\r\n"))?;
        }

        self.stdout.queue(ResetColor)?;
        for line in status {
            self.stdout.queue(Print(line))?;
            self.stdout.queue(Print("\r\n"))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Sleep for `delay`, returning early with `Flow::Stop` on q, Esc or Ctrl-C
    pub fn wait(&mut self, delay: Duration) -> Result<Flow> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Flow::Continue);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(Flow::Stop);
                }
            }
        }
    }
}

fn apply_tint(stdout: &mut io::Stdout, tint: Tint) -> Result<()> {
    match tint {
        Tint::Default => stdout.queue(ResetColor)?,
        Tint::Green => stdout.queue(SetForegroundColor(Color::Green))?,
        Tint::Red => stdout.queue(SetForegroundColor(Color::Red))?,
        Tint::Yellow => stdout.queue(SetForegroundColor(Color::Yellow))?,
        Tint::Grey => stdout.queue(SetForegroundColor(Color::DarkGrey))?,
    };
    Ok(())
}
