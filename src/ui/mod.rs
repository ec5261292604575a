//! UI rendering module for CLI-Mate
//!
//! Forecasts and errors are drawn with ratatui widgets. On a terminal they go to
//! an inline viewport below the prompt; when stdout is redirected the same
//! widgets are drawn off-screen and written out as plain text.

pub mod error_panel;
pub mod forecast_view;

use std::io::{self, IsTerminal, Write};

use crossterm::terminal;
use ratatui::{
    backend::{CrosstermBackend, TestBackend},
    buffer::Buffer,
    Frame, Terminal, TerminalOptions, Viewport,
};

use crate::data::WeatherResult;

/// Width used when stdout is not a terminal
const PLAIN_WIDTH: u16 = 90;

/// Prints a forecast to stdout
pub fn print_weather(result: &WeatherResult) -> io::Result<()> {
    draw(forecast_view::height(result), |frame| {
        forecast_view::render(frame, result)
    })
}

/// Prints an error panel to stdout
pub fn print_error(message: &str) -> io::Result<()> {
    let width = output_width();
    draw(error_panel::height(message, width), |frame| {
        error_panel::render(frame, message)
    })
}

fn output_width() -> u16 {
    if io::stdout().is_terminal() {
        terminal::size().map(|(w, _)| w).unwrap_or(PLAIN_WIDTH)
    } else {
        PLAIN_WIDTH
    }
}

fn draw(height: u16, render: impl FnOnce(&mut Frame)) -> io::Result<()> {
    if io::stdout().is_terminal() {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )?;
        terminal.draw(render)?;
        drop(terminal);
        println!();
        Ok(())
    } else {
        let mut terminal = Terminal::new(TestBackend::new(PLAIN_WIDTH, height))?;
        terminal.draw(render)?;
        let mut stdout = io::stdout().lock();
        for line in buffer_lines(terminal.backend().buffer()) {
            writeln!(stdout, "{}", line)?;
        }
        Ok(())
    }
}

/// Buffer rows as text with trailing blanks removed
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let width = usize::from(buffer.area.width).max(1);
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_lines_trims_rows() {
        let mut terminal = Terminal::new(TestBackend::new(40, error_panel::height("boom", 40))).unwrap();
        terminal.draw(|frame| error_panel::render(frame, "boom")).unwrap();

        let lines = buffer_lines(terminal.backend().buffer());

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Error"));
        assert!(lines[1].contains("boom"));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }
}
