use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ledger_core::format::{percent_label, signed_amount};
use ledger_core::LedgerState;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io::{self, Stdout};

use crate::controller::Controller;
use crate::view::{APP_NAME, goal_status, stat_lines};

/// Read-only dashboard. `r` reloads both lists, `q`/Esc quits.
pub async fn run_dashboard(controller: &mut Controller) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, controller).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, controller.state()))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => {
                        controller.load().await;
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn draw(f: &mut Frame, state: &LedgerState) {
    let goal_rows = state.goals.len().max(1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(goal_rows * 2 + 2),
            Constraint::Min(5),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            APP_NAME,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   r=refresh  q=quit", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);
    let colors = [Color::White, Color::Green, Color::Red];
    for (i, (label, value)) in stat_lines(state).into_iter().enumerate() {
        let p = Paragraph::new(Span::styled(value, Style::default().fg(colors[i])))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(label));
        f.render_widget(p, stats[i]);
    }

    draw_goals(f, state, chunks[2]);
    draw_transactions(f, state, chunks[3]);
}

fn draw_goals(f: &mut Frame, state: &LedgerState, area: ratatui::layout::Rect) {
    let block = Block::default().borders(Borders::ALL).title("Savings Goals");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.goals.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No goals yet: ledgerlite goal add --name <name> --target <amount>",
                Style::default().fg(Color::Gray),
            )),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(2); state.goals.len()])
        .split(inner);

    for (goal, row) in state.goals.iter().zip(rows.iter()) {
        let progress = goal.progress();
        let color = if goal.is_completed {
            Color::Green
        } else {
            Color::Cyan
        };
        let title = format!(
            "{} {} · {}",
            goal.emoji.as_deref().unwrap_or("•"),
            goal.name,
            goal_status(goal)
        );
        let gauge = Gauge::default()
            .block(Block::default().title(title))
            .gauge_style(Style::default().fg(color))
            .ratio((progress / 100.0).clamp(0.0, 1.0))
            .label(percent_label(progress));
        f.render_widget(gauge, *row);
    }
}

fn draw_transactions(f: &mut Frame, state: &LedgerState, area: ratatui::layout::Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if state.loading {
        lines.push(Line::raw("Loading…"));
    }

    for group in state.groups() {
        lines.push(Line::from(Span::styled(
            format!("{} {}", group.category.label(), group.heading()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for t in &group.transactions {
            let color = if t.is_income() { Color::Green } else { Color::Red };
            lines.push(Line::from(vec![
                Span::raw(format!("   {:<24} {}  ", t.name, t.date_label())),
                Span::styled(signed_amount(t), Style::default().fg(color)),
            ]));
        }
        lines.push(Line::raw(""));
    }

    let list = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Transactions by Category"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(list, area);
}
