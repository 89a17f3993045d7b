//! Token stream pane: one row per source line that produced tokens

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Tokens grouped by the line they start on, in line order
pub fn token_rows(tokens: &[Token]) -> Vec<(usize, Vec<&Token>)> {
    let mut by_line: FxHashMap<usize, Vec<&Token>> = FxHashMap::default();
    for token in tokens {
        by_line.entry(token.location.line).or_default().push(token);
    }
    let mut rows: Vec<(usize, Vec<&Token>)> = by_line.into_iter().collect();
    rows.sort_unstable_by_key(|(line, _)| *line);
    rows
}

fn token_style(kind: &TokenKind) -> Style {
    match kind {
        TokenKind::Keyword(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Operator(_) => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::Separator(_) => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::Number(_) => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Str(_) => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Ident(_) => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn row_line<'a>(line: usize, tokens: &[&'a Token]) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{:4} ", line),
        Style::default().fg(DEFAULT_THEME.comment),
    )];
    for token in tokens {
        spans.push(Span::styled(
            format!("{} ", token.kind.source_text()),
            token_style(&token.kind),
        ));
        if token.ends_line {
            spans.push(Span::styled("\\", Style::default().fg(DEFAULT_THEME.comment)));
        }
    }
    Line::from(spans)
}

/// Render the token pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = super::pane_block(" Tokens ", is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = token_rows(tokens);
    let visible_height = super::visible_height(area);
    super::clamp_scroll(scroll_offset, rows.len(), visible_height);

    let items: Vec<ListItem> = rows
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(line, tokens)| ListItem::new(row_line(*line, tokens)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_rows_follow_source_lines() {
        let tokenized = tokenize("a = 1\n\n\nif a then\nend");
        let rows = token_rows(&tokenized.tokens);
        let lines: Vec<usize> = rows.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![1, 4, 5]);
        assert_eq!(rows[0].1.len(), 3);
        assert_eq!(rows[1].1.len(), 3);
    }

    #[test]
    fn test_row_marks_line_end() {
        let tokenized = tokenize("x = 2\n");
        let rows = token_rows(&tokenized.tokens);
        let line = row_line(rows[0].0, &rows[0].1);
        let last = line.spans.last().map(|s| s.content.to_string());
        assert_eq!(last.as_deref(), Some("\\"));
    }
}
