use folio_schema::{Language, PlaceholderId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::strings::{text, Key};

/// Structure-matched loading placeholders: each skeleton mirrors the layout
/// of its destination view so content mounts without the page jumping.
pub fn render(frame: &mut Frame, area: Rect, placeholder: PlaceholderId, lang: Language) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", text(lang, Key::Loading)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match placeholder {
        PlaceholderId::Home => home(frame, inner),
        PlaceholderId::About => about(frame, inner),
        PlaceholderId::Skills => skills(frame, inner),
        PlaceholderId::Projects => projects(frame, inner),
        PlaceholderId::Contact => contact(frame, inner),
    }
}

fn bar(width: usize) -> Span<'static> {
    Span::styled("▇".repeat(width), Style::default().fg(Color::DarkGray))
}

fn blank() -> Line<'static> {
    Line::from("")
}

fn home(frame: &mut Frame, area: Rect) {
    // Intro line, large name, tagline, then a row of social blocks.
    let lines = vec![
        blank(),
        Line::from(bar(10)),
        blank(),
        Line::from(bar(28)),
        Line::from(bar(28)),
        blank(),
        Line::from(bar(36)),
        blank(),
        Line::from(vec![
            bar(4),
            Span::raw("  "),
            bar(4),
            Span::raw("  "),
            bar(4),
            Span::raw("  "),
            bar(4),
            Span::raw("  "),
            bar(4),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn about(frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);
    frame.render_widget(
        Paragraph::new(vec![Line::from(bar(16)), Line::from(bar(40))]),
        rows[0],
    );

    // Card grid, like the about cards.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    for col in cols.iter() {
        let card = vec![
            Line::from(bar(3)),
            Line::from(bar(14)),
            blank(),
            Line::from(bar(30)),
            Line::from(bar(28)),
            Line::from(bar(24)),
        ];
        frame.render_widget(
            Paragraph::new(card).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            *col,
        );
    }
}

fn skills(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(bar(12)), Line::from(bar(30)), blank()];
    for _category in 0..2 {
        lines.push(Line::from(bar(14)));
        for _skill in 0..3 {
            lines.push(Line::from(vec![
                Span::raw("  "),
                bar(12),
                Span::raw("   "),
                bar(20),
            ]));
        }
        lines.push(blank());
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn projects(frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    frame.render_widget(
        Paragraph::new(vec![Line::from(bar(14)), Line::from(bar(34))]),
        rows[0],
    );

    // List panel on the left, detail panel on the right.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let mut list = Vec::new();
    for _item in 0..4 {
        list.push(Line::from(bar(18)));
        list.push(Line::from(vec![
            Span::raw("  "),
            bar(6),
            Span::raw(" "),
            bar(5),
        ]));
        list.push(blank());
    }
    frame.render_widget(
        Paragraph::new(list).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        cols[0],
    );

    let detail = vec![
        Line::from(bar(34)),
        Line::from(bar(32)),
        Line::from(bar(30)),
        blank(),
        Line::from(vec![bar(8), Span::raw("  "), bar(8), Span::raw("  "), bar(8)]),
        blank(),
        Line::from(bar(14)),
    ];
    frame.render_widget(
        Paragraph::new(detail).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        cols[1],
    );
}

fn contact(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(bar(12)),
        Line::from(bar(40)),
        blank(),
        Line::from(bar(34)),
        blank(),
        Line::from(bar(34)),
        blank(),
        Line::from(bar(34)),
        Line::from(bar(34)),
        blank(),
        Line::from(bar(16)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
