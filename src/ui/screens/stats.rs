use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Summary cards
            Constraint::Min(8),     // Monthly totals chart
            Constraint::Length(10), // Category breakdown
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_trend_chart(f, chunks[1], app);
    render_breakdown(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Month Total",
        format_amount(app.month_total),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[1],
        "Entries",
        app.month_expenses.len().to_string(),
        theme::GREEN,
    );
    render_card(
        f,
        cards[2],
        "Categories",
        app.category_totals.len().to_string(),
        theme::YELLOW,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: ratatui::style::Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .monthly_trend
        .iter()
        .map(|entry| {
            let val = entry.total.abs().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .label(Line::from(entry.month.short_label()))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Monthly Totals ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Categories in {} ", app.current_month.label());

    if app.category_totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses for this month",
            theme::dim_style(),
        )))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .category_totals
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let ratio = share_of(entry.total, app.month_total);
            let swatch_color = theme::category_color(&entry.category);
            let bar = create_progress_bar(ratio, 20);
            let display_name = truncate(&entry.category.name, 17);

            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(swatch_color)),
                Span::styled(format!("{display_name:<18}"), theme::normal_style()),
                Span::styled(
                    format!("{:>12} ", format_amount(entry.total)),
                    Style::default().fg(theme::TEXT),
                ),
                Span::styled(bar, Style::default().fg(swatch_color)),
                Span::styled(
                    format!(" {:.0}%", ratio * 100.0),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

/// A category's share of the month, clamped to [0, 1] so refunds and odd
/// data can't break the bar rendering.
fn share_of(part: Decimal, whole: Decimal) -> f64 {
    if whole == Decimal::ZERO {
        return 0.0;
    }
    (part.abs() / whole.abs())
        .to_f64()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
