//! Demo list widget

use musica_dsp::sequencing::CATALOG;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render_catalog(frame: &mut Frame, area: Rect, state: &mut ListState) {
    let items: Vec<ListItem> = CATALOG
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", entry.category.name()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(entry.label),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Demos ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, state);
}
