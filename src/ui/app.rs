//! Main TUI application state and logic

use crate::parser::lexer::Token;
use crate::parser::printer::{tree_lines, TreeLine};
use crate::parser::{Analysis, Diagnostic};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::time::Duration;

const PAGE_ROWS: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being browsed
    pub source_code: String,

    /// Token stream, kept even when lexing reported errors
    pub tokens: Vec<Token>,

    /// Pretty-printed tree, one entry per row; empty when parsing failed
    pub tree_lines: Vec<TreeLine>,

    pub diagnostics: Vec<Diagnostic>,
    diagnostics_by_line: FxHashMap<usize, Vec<String>>,

    /// Top-level statement count of a successful parse
    pub statement_count: Option<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for `source_code` and what the front end made of it
    pub fn new(source_code: String, analysis: Analysis) -> Self {
        let diagnostics = analysis.diagnostics();

        let mut diagnostics_by_line: FxHashMap<usize, Vec<String>> = FxHashMap::default();
        for diagnostic in &diagnostics {
            diagnostics_by_line
                .entry(diagnostic.location.line)
                .or_default()
                .push(diagnostic.message.clone());
        }

        let (tree_lines, statement_count) = match &analysis.program {
            Ok(program) => (tree_lines(program), Some(program.len())),
            Err(_) => (Vec::new(), None),
        };

        let status_message = if diagnostics.is_empty() {
            String::from("Parsed successfully")
        } else {
            format!("First error on line {}", diagnostics[0].location.line)
        };

        App {
            source_code,
            tokens: analysis.tokens,
            tree_lines,
            diagnostics,
            diagnostics_by_line,
            statement_count,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Left: Source | Right: Tokens (top) and Syntax Tree (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            &self.diagnostics_by_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[1],
            &self.tree_lines,
            &self.diagnostics,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let status = super::panes::StatusRenderData {
            message: &self.status_message,
            token_count: self.tokens.len(),
            error_count: self.diagnostics.len(),
            statement_count: self.statement_count,
        };
        super::panes::render_status_bar(frame, status_area, &status);
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
        }
    }

    /// Handle keyboard events. Scrolling past the end is clamped when the
    /// pane is next rendered.
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE_ROWS);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE_ROWS);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::End => {
                *self.focused_scroll() = usize::MAX;
            }
            KeyCode::Char('e') => {
                // Jump the source pane to the first diagnostic
                if let Some(first) = self.diagnostics.first() {
                    self.source_scroll = first.location.line.saturating_sub(1);
                    self.focused_pane = FocusedPane::Source;
                    self.status_message = first.to_string();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::analyze_source;
    use crate::parser::printer::TreeLineKind;
    use crossterm::event::KeyModifiers;

    fn app(source: &str) -> App {
        App::new(source.to_string(), analyze_source(source, 1024))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("x = 1");
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_scroll_keys_move_focused_pane_only() {
        let mut app = app("x = 1");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, PAGE_ROWS);
        assert_eq!(app.source_scroll, 0);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.tokens_scroll, 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, 0);
    }

    #[test]
    fn test_successful_parse_state() {
        let app = app("if a then\n  b = 1\nend\nc = 2");
        assert_eq!(app.statement_count, Some(2));
        assert!(app.diagnostics.is_empty());
        assert_eq!(app.tree_lines[0].kind, TreeLineKind::Header);
        assert!(app.tree_lines[0].text.starts_with("Block"));
        assert_eq!(app.status_message, "Parsed successfully");
    }

    #[test]
    fn test_failed_parse_state() {
        let mut app = app("x = 1\ny = @\nz = $");
        assert_eq!(app.statement_count, None);
        assert!(app.tree_lines.is_empty());
        assert_eq!(app.diagnostics.len(), 2);
        assert!(app.diagnostics_by_line.contains_key(&2));
        assert!(app.diagnostics_by_line.contains_key(&3));
        assert!(!app.tokens.is_empty());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focused_pane, FocusedPane::Source);
        assert_eq!(app.source_scroll, 1);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
