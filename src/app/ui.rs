use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::{app::portfolio::Portfolio, services::RefreshRate};

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    portfolio: &Portfolio,
    table_state: &mut TableState,
    popup_message: &Option<String>,
    error_popup: &Option<String>,
    show_entries_popup: bool,
    entries_state: &mut TableState,
    show_rate_popup: bool,
    rate_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(frame.area());

    render_header(frame, portfolio, chunks[0]);
    render_totals(frame, portfolio, chunks[1]);
    render_holdings(frame, portfolio, table_state, chunks[2]);

    if show_entries_popup {
        render_entries_popup(frame, portfolio, table_state, entries_state);
    }

    if show_rate_popup {
        render_rate_popup(frame, rate_state);
    }

    if let Some(message) = popup_message {
        render_message_popup(frame, message, Color::White);
    }

    if let Some(message) = error_popup {
        render_message_popup(frame, message, Color::Red);
    }
}

fn render_header(frame: &mut Frame, portfolio: &Portfolio, area: Rect) {
    let mut spans = vec![Span::styled(
        "Cryptofolio",
        Style::default().fg(Color::Cyan),
    )];

    if let Some(fear_greed) = portfolio.fear_greed() {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!(
                "Fear & Greed: {} ({})",
                fear_greed.value(),
                fear_greed.classification()
            ),
            Style::default().fg(Color::Magenta),
        ));
    }

    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Refresh: {}", portfolio.refresh_rate()),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("q: quit | r: refresh | Enter: entries | F8: refresh rate"),
    );

    frame.render_widget(header, area);
}

fn render_totals(frame: &mut Frame, portfolio: &Portfolio, area: Rect) {
    let summary = portfolio.summary();
    let pnl_color = if summary.total_profit_or_loss() >= &Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };

    let line = Line::from(vec![
        Span::raw(format!("Value: ${:.2}", summary.total_portfolio_value())),
        Span::raw("   "),
        Span::raw(format!("Invested: ${:.2}", summary.total_invested())),
        Span::raw("   "),
        Span::styled(
            format!(
                "P&L: ${:.2} ({:.2}%)",
                summary.total_profit_or_loss(),
                summary.total_profit_or_loss_percentage()
            ),
            Style::default().fg(pnl_color),
        ),
        Span::raw("   "),
        Span::raw(format!("Holdings: {}", summary.holdings().len())),
    ]);

    let totals =
        Paragraph::new(line).block(Block::default().title("Portfolio").borders(Borders::ALL));

    frame.render_widget(totals, area);
}

fn render_holdings(
    frame: &mut Frame,
    portfolio: &Portfolio,
    table_state: &mut TableState,
    area: Rect,
) {
    let holdings = portfolio.summary().holdings();

    if holdings.is_empty() {
        let empty_message =
            Paragraph::new("No holdings to display. Add entries with the add or import commands.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty_message, area);
        return;
    }

    let header_cells = [
        "Name",
        "Symbol",
        "Amount",
        "Avg Price",
        "Price",
        "Value",
        "P&L",
        "P&L %",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).style(Style::default()).height(1);

    let rows = holdings.iter().map(|holding| {
        let pnl = *holding.profit_or_loss();
        let pnl_color = if pnl >= Decimal::ZERO {
            Color::Green
        } else {
            Color::Red
        };

        let cells = [
            Cell::from(holding.name().to_string()),
            Cell::from(holding.symbol().to_string()),
            Cell::from(format!("{:.4}", holding.total_quantity())),
            Cell::from(format!("${:.2}", holding.average_buy_price())),
            Cell::from(format!("${:.2}", holding.current_price())),
            Cell::from(format!("${:.2}", holding.current_value())),
            Cell::from(format!("${:.2}", pnl)).style(Style::default().fg(pnl_color)),
            Cell::from(format!("{:.2}%", holding.profit_or_loss_percentage()))
                .style(Style::default().fg(pnl_color)),
        ];

        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Length(24),
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Holdings").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_entries_popup(
    frame: &mut Frame,
    portfolio: &Portfolio,
    table_state: &mut TableState,
    entries_state: &mut TableState,
) {
    let Some(selected) = table_state.selected() else {
        return;
    };
    let Some(holding) = portfolio.summary().holdings().get(selected) else {
        return;
    };

    let area = centered_rect(70, 60, frame.area());

    let header_cells = ["Id", "Date", "Quantity", "Price", "Notes"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = holding.entries().iter().map(|entry| {
        let cells = [
            Cell::from(entry.id().to_string()),
            Cell::from(entry.timestamp().format("%Y-%m-%d").to_string()),
            Cell::from(format!("{:.4}", entry.quantity())),
            Cell::from(format!("${:.2}", entry.price_used())),
            Cell::from(entry.notes().clone().unwrap_or_default()),
        ];
        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Entries - {} (d: delete, Esc: close)",
                    holding.symbol()
                ))
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, entries_state);
}

fn render_rate_popup(frame: &mut Frame, rate_state: &mut ListState) {
    let area = centered_rect(30, 30, frame.area());

    let items: Vec<ListItem> = RefreshRate::iter()
        .map(|rate| ListItem::new(rate.to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Refresh rate")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, rate_state);
}

fn render_message_popup(frame: &mut Frame, message: &str, color: Color) {
    let area = centered_rect(50, 20, frame.area());
    let popup = Paragraph::new(message)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
