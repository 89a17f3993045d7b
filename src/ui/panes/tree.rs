//! Syntax tree pane
//!
//! Shows the pretty-printed tree of a successful parse. When there is no
//! tree, the pane lists the diagnostics instead.

use crate::parser::printer::{TreeLine, TreeLineKind};
use crate::parser::Diagnostic;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};

fn tree_line_style(kind: TreeLineKind) -> Style {
    match kind {
        TreeLineKind::Header | TreeLineKind::Statement => Style::default()
            .fg(DEFAULT_THEME.node_kind)
            .add_modifier(Modifier::BOLD),
        TreeLineKind::Label => Style::default().fg(DEFAULT_THEME.comment),
        TreeLineKind::Operator => Style::default().fg(DEFAULT_THEME.operator),
        TreeLineKind::Leaf => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn diagnostic_lines(diagnostics: &[Diagnostic]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{} error(s), no syntax tree", diagnostics.len()),
        Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    ))];
    for diagnostic in diagnostics {
        lines.push(Line::from(vec![
            Span::styled(
                format!("line {:>3}: ", diagnostic.location.line),
                Style::default().fg(DEFAULT_THEME.secondary),
            ),
            Span::styled(
                diagnostic.message.clone(),
                Style::default().fg(DEFAULT_THEME.error),
            ),
        ]));
    }
    lines
}

/// Render the syntax tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree_lines: &[TreeLine],
    diagnostics: &[Diagnostic],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = super::pane_block(" Syntax Tree ", is_focused).padding(Padding::new(1, 0, 0, 0));

    let lines: Vec<Line> = if diagnostics.is_empty() {
        tree_lines
            .iter()
            .map(|line| Line::from(Span::styled(line.to_string(), tree_line_style(line.kind))))
            .collect()
    } else {
        diagnostic_lines(diagnostics)
    };

    let visible_height = super::visible_height(area);
    super::clamp_scroll(scroll_offset, lines.len(), visible_height);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
