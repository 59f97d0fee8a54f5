//! Rendering.
//!
//! Draws one [`DashboardView`] per frame: a header with the active order
//! count and clock, the main screen (loading, error, empty, or the card
//! grid), a key-hint footer, and the alert modal on top when one is open.

use kds_core::{CardAction, DashboardView, OrderCard, Screen, StatusTag};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use super::state::UiState;

/// Minimum card width; the grid fits as many columns as this allows.
const CARD_WIDTH: u16 = 30;

mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(255, 140, 0);
    pub const PENDING: Color = Color::Rgb(240, 200, 60);
    pub const PREPARING: Color = Color::Rgb(80, 160, 255);
    pub const COMPLETED: Color = Color::Rgb(80, 200, 120);
    pub const COLLECTED: Color = Color::Rgb(130, 130, 130);
    pub const ERROR: Color = Color::Rgb(220, 60, 60);
    pub const MUTED: Color = Color::DarkGray;
}

fn tag_color(tag: StatusTag) -> Color {
    match tag {
        StatusTag::Pending => colors::PENDING,
        StatusTag::Preparing => colors::PREPARING,
        StatusTag::Completed => colors::COMPLETED,
        StatusTag::Collected => colors::COLLECTED,
    }
}

pub fn draw(f: &mut Frame, view: &DashboardView, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], view);

    match &view.screen {
        Screen::Loading => draw_message(
            f,
            chunks[1],
            vec![Line::from("Loading orders...".fg(colors::MUTED))],
        ),
        Screen::Error { message } => draw_message(
            f,
            chunks[1],
            vec![
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(colors::ERROR).bold(),
                )),
                Line::from(""),
                Line::from("Press r to retry".fg(colors::MUTED)),
            ],
        ),
        Screen::Empty => draw_message(
            f,
            chunks[1],
            vec![
                Line::from("No Active Orders".bold()),
                Line::from(""),
                Line::from("Waiting for new orders to arrive...".fg(colors::MUTED)),
            ],
        ),
        Screen::Orders(cards) => draw_cards(f, chunks[1], cards, ui.selected()),
    }

    draw_footer(f, chunks[2], view);

    if let Some(message) = ui.alert() {
        draw_alert(f, message);
    }
}

fn draw_header(f: &mut Frame, area: Rect, view: &DashboardView) {
    let title = Line::from(vec![
        Span::styled(" KDS ", Style::default().fg(Color::Black).bg(colors::ACCENT).bold()),
        Span::raw("  "),
        Span::styled("Kitchen Display System", Style::default().fg(colors::ACCENT).bold()),
    ]);

    let stats = Line::from(vec![
        Span::styled("Active Orders: ", Style::default().fg(colors::MUTED)),
        Span::styled(view.active_orders.to_string(), Style::default().bold()),
        Span::raw("   "),
        Span::styled("Current Time: ", Style::default().fg(colors::MUTED)),
        Span::styled(view.clock.clone(), Style::default().bold()),
        Span::raw("   "),
        Span::styled("● LIVE ", Style::default().fg(colors::COMPLETED).bold()),
    ])
    .alignment(Alignment::Right);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);
    f.render_widget(Paragraph::new(title), halves[0]);
    f.render_widget(Paragraph::new(stats), halves[1]);
}

fn draw_message(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect {
        y: top,
        height: height.min(area.height),
        ..area
    };
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered,
    );
}

fn card_height(card: &OrderCard) -> u16 {
    // Borders, student, status, ETA, blank, action; plus token and items.
    let token = u16::from(card.token.is_some());
    let items = u16::try_from(card.items.len().max(1)).unwrap_or(u16::MAX);
    7u16.saturating_add(token).saturating_add(items)
}

fn draw_cards(f: &mut Frame, area: Rect, cards: &[OrderCard], selected: usize) {
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let rows: Vec<&[OrderCard]> = cards.chunks(columns).collect();
    let heights: Vec<u16> = rows
        .iter()
        .map(|row| row.iter().map(card_height).max().unwrap_or(0))
        .collect();

    // Scroll so the selected row is fully visible.
    let selected_row = (selected / columns).min(rows.len().saturating_sub(1));
    let mut first_row = 0;
    while first_row < selected_row
        && heights[first_row..=selected_row]
            .iter()
            .map(|&h| u32::from(h))
            .sum::<u32>()
            > u32::from(area.height)
    {
        first_row += 1;
    }

    let mut y = area.y;
    for (row_idx, row) in rows.iter().enumerate().skip(first_row) {
        let height = heights[row_idx];
        if y >= area.bottom() {
            break;
        }
        let row_area = Rect {
            y,
            height: height.min(area.bottom() - y),
            ..area
        };
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);

        for (col_idx, card) in row.iter().enumerate() {
            let index = row_idx * columns + col_idx;
            draw_card(f, slots[col_idx], card, index == selected);
        }
        y = y.saturating_add(height);
    }
}

fn draw_card(f: &mut Frame, area: Rect, card: &OrderCard, is_selected: bool) {
    let color = tag_color(card.tag);
    let (border_type, border_style) = if is_selected {
        (BorderType::Thick, Style::default().fg(color).bold())
    } else {
        (BorderType::Rounded, Style::default().fg(color))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} · {} items ", card.title, card.total_qty),
            Style::default().fg(color).bold(),
        ));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Student: ", Style::default().fg(colors::MUTED)),
            Span::raw(card.student_id.clone()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(colors::MUTED)),
            Span::styled(card.status_label.clone(), Style::default().fg(color)),
        ]),
    ];
    if let Some(token) = &card.token {
        lines.push(Line::from(vec![
            Span::styled("Token: ", Style::default().fg(colors::MUTED)),
            Span::raw(token.clone()),
        ]));
    }

    if card.items.is_empty() {
        lines.push(Line::from("(no items)".fg(colors::MUTED)));
    }
    for item in &card.items {
        lines.push(Line::from(vec![
            Span::styled(format!("{}x ", item.qty), Style::default().bold()),
            Span::raw(item.name.clone()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("ETA: ", Style::default().fg(colors::MUTED)),
        Span::raw(card.eta.clone()),
    ]));
    lines.push(Line::from(""));
    lines.push(action_line(card.action, is_selected));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn action_line(action: CardAction, is_selected: bool) -> Line<'static> {
    match action {
        CardAction::MarkReady => {
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(colors::COMPLETED)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::COMPLETED)
            };
            Line::from(Span::styled(" Mark Ready ", style))
        }
        CardAction::Processing => Line::from("Processing...".fg(colors::MUTED).italic()),
        CardAction::ReadyForPickup => {
            Line::from("✓ Ready for Pickup".fg(colors::COMPLETED).bold())
        }
    }
}

fn draw_footer(f: &mut Frame, area: Rect, view: &DashboardView) {
    let mut hints = vec![Span::styled(
        " ←/→ select  Enter mark ready  r refresh  q quit ",
        Style::default().fg(colors::MUTED),
    )];
    if let Some(at) = &view.last_updated {
        hints.push(Span::styled(
            format!(" Updated {} ", at),
            Style::default().fg(colors::MUTED),
        ));
    }
    if matches!(view.screen, Screen::Error { .. }) {
        hints.push(Span::styled(" OFFLINE ", Style::default().fg(colors::ERROR).bold()));
    }
    f.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 7, f.area());
    let block = Block::default()
        .title(Span::styled(" Error ", Style::default().fg(colors::ERROR).bold()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::ERROR));
    let body = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Press Enter to dismiss".fg(colors::MUTED)),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// A `height`-row rectangle centered in `area`, `percent_x` percent wide.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_x) / 100;
    let width = u16::try_from(scaled)
        .unwrap_or(u16::MAX)
        .max(CARD_WIDTH)
        .min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
