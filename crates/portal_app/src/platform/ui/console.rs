use std::io::{self, Write};

use portal_core::NoticeLevel;

use super::constants::*;
use super::render::UiCommand;

/// Prints frames produced by `render` to a line-oriented terminal.
pub struct ConsolePainter<W: Write> {
    out: W,
}

impl ConsolePainter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePainter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn paint(&mut self, frame: &[UiCommand]) -> io::Result<()> {
        writeln!(self.out)?;
        for cmd in frame {
            self.paint_one(cmd)?;
        }
        write!(self.out, "> ")?;
        self.out.flush()
    }

    pub fn print_block(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn paint_one(&mut self, cmd: &UiCommand) -> io::Result<()> {
        match cmd {
            UiCommand::Header { title, subtitle } => {
                writeln!(self.out, "{title}")?;
                writeln!(self.out, "{subtitle}")?;
            }
            UiCommand::Alert { text } => writeln!(self.out, "!! {text} {ALERT_HINT}")?,
            UiCommand::Notice { level, text } => {
                let tag = match level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Warning => "warning",
                    NoticeLevel::Error => "error",
                };
                writeln!(self.out, "[{tag}] {text}")?;
            }
            UiCommand::ConnectButton { label, .. } => writeln!(self.out, "[ {label} ]")?,
            UiCommand::Identity { address } => writeln!(self.out, "Wallet: {address}")?,
            UiCommand::Busy { label } => writeln!(self.out, "{label}")?,
            UiCommand::InitializeButton { label, fetch_error } => {
                if let Some(reason) = fetch_error {
                    writeln!(self.out, "Could not load the GIF list: {reason}")?;
                    writeln!(self.out, "{RETRY_HINT}")?;
                }
                writeln!(self.out, "[ {label} ]")?;
            }
            UiCommand::Loading => writeln!(self.out, "{LOADING_LABEL}")?,
            UiCommand::Form { draft, busy } => {
                let shown = if draft.is_empty() {
                    INPUT_PLACEHOLDER
                } else {
                    draft.as_str()
                };
                writeln!(self.out, "Link: {shown}")?;
                // The busy line above the form covers the pending state.
                if !*busy {
                    writeln!(self.out, "{SUBMIT_LABEL}")?;
                }
            }
            UiCommand::Grid { rows } => {
                if rows.is_empty() {
                    writeln!(self.out, "{EMPTY_LIST_LABEL}")?;
                }
                for row in rows {
                    writeln!(self.out, "  {row}")?;
                }
            }
        }
        Ok(())
    }
}
