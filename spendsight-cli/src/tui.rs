use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, List, ListItem, Row, Table},
};
use spendsight_core::{Analysis, Category};
use spendsight_finance::insight_bullets;
use std::io::{self, Stdout};

use crate::dashboard::chart_rows;

pub fn run_dashboard(analysis: &Analysis) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, analysis);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    analysis: &Analysis,
) -> Result<()> {
    let bullets = insight_bullets(&analysis.insights);
    let chart = chart_rows(&analysis.records);

    loop {
        terminal.draw(|f| draw(f, analysis, &bullets, &chart))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                return Ok(());
            }
        }
    }
}

/// Whole dollars for the bar widget; refunds and credits draw as empty bars
fn bar_value(amount: f64) -> u64 {
    amount.max(0.0).round() as u64
}

/// Insight panel rows, borders included
const MAX_INSIGHT_PANEL: u16 = 12;

fn insight_panel_height(bullet_count: usize) -> u16 {
    u16::try_from(bullet_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(MAX_INSIGHT_PANEL)
}

fn draw(f: &mut Frame, analysis: &Analysis, bullets: &[String], chart: &[(Category, f64)]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(insight_panel_height(bullets.len())),
            Constraint::Min(8),
        ])
        .split(f.area());

    let header = Row::new(vec!["Date", "Merchant", "Amount", "Category"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = analysis.records.iter().map(|r| {
        Row::new(vec![
            r.date.map(|d| d.to_string()).unwrap_or_default(),
            r.merchant.clone(),
            format!("{:.2}", r.amount),
            r.category.map(|c| c.label()).unwrap_or("-").to_string(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(13),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Transaction Data (q to quit) ")
            .borders(Borders::ALL),
    );
    f.render_widget(table, chunks[0]);

    let items: Vec<ListItem> = bullets
        .iter()
        .map(|b| ListItem::new(format!("• {b}")))
        .collect();
    let list = List::new(items).block(Block::default().title(" Insights ").borders(Borders::ALL));
    f.render_widget(list, chunks[1]);

    let bars: Vec<(&str, u64)> = chart
        .iter()
        .map(|(c, amount)| (c.label(), bar_value(*amount)))
        .collect();
    let bar_chart = BarChart::default()
        .block(
            Block::default()
                .title(" Spending by Category ")
                .borders(Borders::ALL),
        )
        .data(bars.as_slice())
        .bar_width(13)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(bar_chart, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use spendsight_core::TransactionRecord;
    use spendsight_finance::categorize_all;

    #[test]
    fn test_bar_value_clamps_negative() {
        assert_eq!(bar_value(-12.0), 0);
        assert_eq!(bar_value(49.6), 50);
    }

    #[test]
    fn test_insight_panel_height_is_capped() {
        assert_eq!(insight_panel_height(0), 2);
        assert_eq!(insight_panel_height(3), 5);
        assert_eq!(insight_panel_height(70_000), MAX_INSIGHT_PANEL);
        assert_eq!(insight_panel_height(usize::MAX), MAX_INSIGHT_PANEL);
    }

    #[test]
    fn test_draw_with_many_bullets_keeps_chart() {
        let analysis = Analysis {
            records: categorize_all(vec![TransactionRecord::new(None, "Netflix", 15.0)]),
            insights: (0..500).map(|i| format!("- tip {i}\n")).collect(),
        };
        let bullets = insight_bullets(&analysis.insights);
        assert_eq!(bullets.len(), 500);
        let chart = chart_rows(&analysis.records);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| draw(f, &analysis, &bullets, &chart))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Spending by Category"));
    }

    #[test]
    fn test_draw_renders_panels() {
        let analysis = Analysis {
            records: categorize_all(vec![
                TransactionRecord::new(None, "Walmart Store", 50.0),
                TransactionRecord::new(None, "Uber", 12.0),
            ]),
            insights: "Cook at home more.".to_string(),
        };
        let bullets = insight_bullets(&analysis.insights);
        let chart = chart_rows(&analysis.records);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| draw(f, &analysis, &bullets, &chart))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Transaction Data"));
        assert!(text.contains("Walmart Store"));
        assert!(text.contains("Cook at home more."));
        assert!(text.contains("Spending by Category"));
    }
}
