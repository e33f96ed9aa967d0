use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::model::{Recommendation, NOT_AVAILABLE};
use crate::sort::{SortDirection, SortKey};
use crate::theme::{get_theme, Theme};

pub const TITLE: &str = "Solution Finder";
pub const INPUT_PLACEHOLDER: &str = "Enter your search query...";

const DETAIL_HEIGHT: u16 = 14;

/// Sortable table columns, left to right.
const COLUMNS: [(&str, SortKey); 3] = [
    ("Name", SortKey::Name),
    ("Test Types", SortKey::TestTypes),
    ("Remote Testing", SortKey::RemoteTesting),
];

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = get_theme();

    let mut constraints = vec![
        Constraint::Length(1), // title
        Constraint::Length(3), // search box
    ];
    if app.error.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0)); // results
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    draw_title(frame, &theme, chunks[0]);
    draw_search_box(frame, app, &theme, chunks[1]);

    let mut next = 2;
    if let Some(error) = &app.error {
        draw_error(frame, error, &theme, chunks[next]);
        next += 1;
    }

    draw_results_area(frame, app, &theme, chunks[next]);
    draw_status_bar(frame, app, &theme, chunks[next + 1]);
}

fn draw_title(frame: &mut Frame, theme: &Theme, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(title, area);
}

fn border_style(active: bool, theme: &Theme) -> Style {
    if active {
        Style::default().fg(theme.active_border)
    } else {
        Style::default().fg(theme.inactive_border)
    }
}

fn draw_search_box(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(area);

    let is_active = app.focus == Focus::Input;
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style(is_active, theme));

    let input = if app.query.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(theme.input_placeholder),
        ))
    } else {
        Paragraph::new(Span::styled(
            app.query.as_str(),
            Style::default().fg(theme.input_text),
        ))
    };
    frame.render_widget(input.block(block), chunks[0]);

    if is_active {
        let inner_width = chunks[0].width.saturating_sub(2);
        let offset = cursor_offset(&app.query, inner_width);
        frame.set_cursor_position((chunks[0].x + 1 + offset, chunks[0].y + 1));
    }

    let (label, color) = if app.loading {
        ("Searching...", theme.button_disabled)
    } else if app.can_search() {
        ("Search", theme.button_enabled)
    } else {
        ("Search", theme.button_disabled)
    };
    let button = Paragraph::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(button, chunks[1]);
}

/// Column of the input cursor, kept inside the box.
fn cursor_offset(query: &str, inner_width: u16) -> u16 {
    let limit = inner_width.saturating_sub(1);
    let typed = query.chars().count().min(usize::from(limit));
    u16::try_from(typed).unwrap_or(limit)
}

fn draw_error(frame: &mut Frame, error: &str, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(Span::styled(
        format!("Error: {}", error),
        Style::default()
            .fg(theme.error_fg)
            .add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error_border)),
    )
    .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_results_area(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if let Some(message) = app.empty_state_message() {
        let paragraph = Paragraph::new(message)
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().fg(theme.text_muted))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.inactive_border)),
            );
        frame.render_widget(paragraph, area);
        return;
    }

    if app.results.is_empty() {
        // Loading with nothing to show yet
        return;
    }

    match app.expanded_item() {
        Some(item) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(DETAIL_HEIGHT)])
                .split(area);
            draw_table(frame, app, theme, chunks[0]);
            draw_detail(frame, item, theme, chunks[1]);
        }
        None => draw_table(frame, app, theme, area),
    }
}

fn header_label(label: &str, key: SortKey, app: &App) -> String {
    if app.sort.key == Some(key) {
        let arrow = match app.sort.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        };
        format!("{} {}", label, arrow)
    } else {
        label.to_string()
    }
}

fn draw_table(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let is_active = app.focus == Focus::Results;

    let mut header_cells: Vec<Cell> = COLUMNS
        .iter()
        .map(|(label, key)| {
            let style = if app.sort.key == Some(*key) {
                Style::default().fg(theme.sort_indicator)
            } else {
                Style::default().fg(theme.header_fg)
            };
            Cell::from(header_label(label, *key, app)).style(style.add_modifier(Modifier::BOLD))
        })
        .collect();
    header_cells.push(
        Cell::from("Actions").style(
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        ),
    );
    let header = Row::new(header_cells).bottom_margin(1);

    let rows: Vec<Row> = app
        .displayed()
        .into_iter()
        .enumerate()
        .map(|(index, item)| table_row(index, item, app, theme))
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Length(16),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Results ({}) ", app.results.len()))
                .borders(Borders::ALL)
                .border_style(border_style(is_active, theme)),
        )
        .highlight_style(Style::default().bg(theme.row_selected_bg))
        .highlight_symbol(">> ");

    let mut state = TableState::default();
    if is_active {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn table_row<'a>(index: usize, item: &'a Recommendation, app: &App, theme: &Theme) -> Row<'a> {
    let remote_color = if item.is_remote() {
        theme.remote_yes
    } else {
        theme.remote_other
    };

    let is_expanded = app.expanded == Some(index);
    let chevron = if is_expanded { "▲" } else { "▼" };
    let visit_style = if item.visit_url().is_some() {
        Style::default().fg(theme.link)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let row = Row::new(vec![
        Cell::from(item.name.as_str()),
        Cell::from(item.test_types_or_placeholder()),
        Cell::from(Span::styled(
            item.remote_testing_or_placeholder(),
            Style::default().fg(remote_color),
        )),
        Cell::from(Line::from(vec![
            Span::styled("Visit", visit_style),
            Span::raw(" "),
            Span::raw(chevron),
        ])),
    ]);

    if is_expanded {
        row.style(
            Style::default()
                .bg(theme.row_expanded_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        row
    }
}

fn detail_line<'a>(label: &'a str, value: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(theme.detail_label)),
        Span::styled(value, Style::default().fg(theme.detail_value)),
    ])
}

fn heading<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.detail_heading)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Lines of the detail panel for one expanded item.
pub fn detail_lines<'a>(item: &'a Recommendation, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        heading("Description", theme),
        Line::from(item.description_or_placeholder()),
        Line::from(""),
        heading("Key Details", theme),
        detail_line("Duration:", item.duration_or_placeholder(), theme),
        detail_line("Job Levels:", item.job_levels_or_placeholder(), theme),
        detail_line("Adaptive IRT:", item.adaptive_irt_or_placeholder(), theme),
        detail_line("Languages:", item.languages_or_placeholder(), theme),
        detail_line("URL:", item.visit_url().unwrap_or(NOT_AVAILABLE), theme),
    ];

    if let Some(downloads) = item.visible_downloads() {
        lines.push(Line::from(""));
        lines.push(heading("Downloads", theme));
        for (i, download) in downloads.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(theme.detail_label)),
                Span::styled(
                    format!("{} ({})", download.title, download.language),
                    Style::default().fg(theme.link),
                ),
            ]));
        }
    }

    lines
}

fn draw_detail(frame: &mut Frame, item: &Recommendation, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(detail_lines(item, theme))
        .block(
            Block::default()
                .title(format!(" {} ", item.name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.inactive_border)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let status_text = if app.loading {
        format!("Loading... | {}", app.status_message)
    } else {
        app.status_message.clone()
    };

    let help_text = match app.focus {
        Focus::Input => "Enter: Search | Ctrl+U: Clear | Tab: Results | Esc: Quit",
        Focus::Results => {
            "↑↓: Move | Enter: Details | n/t/r: Sort | o: Visit | 1-9: Download | /: Search | q: Quit"
        }
    };

    let status_line = Line::from(vec![
        Span::styled(status_text, Style::default().fg(theme.status_bar_fg)),
        Span::raw(" | "),
        Span::styled(help_text, Style::default().fg(theme.status_help_text)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}
