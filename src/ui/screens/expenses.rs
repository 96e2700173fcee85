use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::{Category, UNCATEGORIZED_NAME};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Month summary card
            Constraint::Min(5),    // Expense table
        ])
        .split(area);

    render_summary_card(f, chunks[0], app);
    render_expense_table(f, chunks[1], app);
}

fn render_summary_card(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Spent in {} ", app.current_month.label()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let total_color = if app.month_total < Decimal::ZERO {
        theme::RED
    } else {
        theme::ACCENT
    };

    let entries = app.month_expenses.len();
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(app.month_total),
            Style::default().fg(total_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{entries} entr{}", if entries == 1 { "y" } else { "ies" }),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_expense_table(f: &mut Frame, area: Rect, app: &App) {
    if app.month_expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses for this month",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <YYYY-MM-DD> <title> <amount> [category]",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Expenses (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Title", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .month_expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, exp)| {
            let category = exp
                .category_id
                .and_then(|cid| Category::find_by_id(&app.categories, cid));
            let cat_cell = match category {
                Some(cat) => Cell::from(Line::from(vec![
                    Span::styled("● ", Style::default().fg(theme::category_color(cat))),
                    Span::raw(cat.name.clone()),
                ])),
                None => Cell::from(Span::styled(UNCATEGORIZED_NAME, theme::dim_style())),
            };

            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(exp.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&exp.title, 40)),
                cat_cell,
                Cell::from(format_amount(exp.amount)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Expenses ({}) ", app.month_expenses.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
