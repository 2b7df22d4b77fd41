//! Terminal status panel

use std::io::{self, Write};

use crossterm::{cursor, style, terminal, QueueableCommand};
use live_state::PlaybackState;

const BORDER: &str = "+----------------------------------+";
const TITLE: &str = "|        REAPER LIVE STATUS        |";

/// Something that can display the live state
pub trait Render {
    fn render(&mut self, state: &PlaybackState) -> io::Result<()>;
}

/// Redraws the panel in place on a terminal-like writer
pub struct Dashboard<W: Write> {
    out: W,
}

impl Dashboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Dashboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for Dashboard<W> {
    fn render(&mut self, state: &PlaybackState) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        for line in panel_lines(state) {
            self.out.queue(style::Print(line))?;
            self.out.queue(cursor::MoveToNextLine(1))?;
        }

        self.out.flush()
    }
}

/// Panel text, one entry per line
pub fn panel_lines(state: &PlaybackState) -> Vec<String> {
    vec![
        BORDER.to_string(),
        TITLE.to_string(),
        BORDER.to_string(),
        format!("Beat:   {}", state.beat_position),
        format!("Time:   {}", state.time_position),
        format!("Tempo:  {}", state.tempo),
        format!("Region: {}", state.region_name),
        format!("Color:  {}", state.region_color),
    ]
}
