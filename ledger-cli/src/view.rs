//! Plain-text rendering of the ledger and of the setup screen.

use ledger_core::format::{money, percent_label, signed_amount};
use ledger_core::{KNOWN_CATEGORIES, LedgerState, SavingsGoal};
use std::fmt::Write;

use crate::config::{KEY_ENV, URL_ENV};
use crate::onboard::OnboardDecision;

pub const APP_NAME: &str = "LedgerLite";
const BAR_WIDTH: usize = 24;

/// Filled cells for a progress bar. Negative progress draws an empty bar.
pub fn bar_cells(progress: f64, width: usize) -> usize {
    let ratio = (progress / 100.0).clamp(0.0, 1.0);
    ((ratio * width as f64).round() as usize).min(width)
}

pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = bar_cells(progress, width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn goal_status(goal: &SavingsGoal) -> &'static str {
    if goal.is_completed {
        "Completed"
    } else {
        "In Progress"
    }
}

pub fn stat_lines(state: &LedgerState) -> [(&'static str, String); 3] {
    let totals = state.totals();
    [
        ("Total Balance", money(totals.balance)),
        ("Monthly Income", money(totals.income)),
        ("Monthly Expenses", money(totals.expenses)),
    ]
}

pub fn goal_card(goal: &SavingsGoal) -> Vec<String> {
    let progress = goal.progress();
    vec![
        format!(
            "{} {}  [{}]",
            goal.emoji.as_deref().unwrap_or("•"),
            goal.name,
            goal_status(goal)
        ),
        format!(
            "   {} {}",
            progress_bar(progress, BAR_WIDTH),
            percent_label(progress)
        ),
        format!(
            "   {} / {}   (id {})",
            money(goal.current_amount),
            money(goal.target_amount),
            goal.id
        ),
    ]
}

pub fn render_dashboard(state: &LedgerState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{APP_NAME}   Welcome back, User\n");

    for (label, value) in stat_lines(state) {
        let _ = writeln!(out, "{label:<18} {value}");
    }

    let _ = writeln!(out, "\nSavings Goals");
    if state.goals.is_empty() {
        let _ = writeln!(
            out,
            "  (none yet) add one: ledgerlite goal add --name <name> --target <amount>"
        );
    }
    for goal in &state.goals {
        for line in goal_card(goal) {
            let _ = writeln!(out, "  {line}");
        }
    }

    let _ = writeln!(out, "\nTransactions by Category");
    if state.loading {
        let _ = writeln!(out, "  Loading…");
    } else if state.transactions.is_empty() {
        let _ = writeln!(out, "  (none yet) add one: ledgerlite add --name <name> --amount <n>");
    }
    for group in state.groups() {
        let _ = writeln!(out, "  {} {}", group.category.label(), group.heading());
        for t in &group.transactions {
            let _ = writeln!(
                out,
                "     {:<24} {}  {:>14}",
                t.name,
                t.date_label(),
                signed_amount(t)
            );
        }
    }

    out
}

pub fn render_setup(decision: &OnboardDecision) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{APP_NAME}\n");
    let _ = writeln!(out, "Supabase Setup Required\n");
    let _ = writeln!(out, "{}", decision.message);
    if !decision.missing.is_empty() {
        let _ = writeln!(out, "Missing: {}", decision.missing.join(", "));
    }
    let _ = writeln!(out, "\nEither run `ledgerlite setup`, or export:\n");
    let _ = writeln!(out, "  {URL_ENV}=your_url");
    let _ = writeln!(out, "  {KEY_ENV}=your_key");
    out
}

pub fn render_category_choices() -> String {
    KNOWN_CATEGORIES
        .iter()
        .map(|c| format!("{} {}", c.label(), c.picker_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledger_core::{Category, LedgerEvent, RecordId, Transaction, TxnType, reduce};

    fn sample_state() -> LedgerState {
        let txns = vec![
            Transaction {
                id: RecordId::new("2"),
                name: "Coffee".to_string(),
                amount: 4.5,
                kind: TxnType::Expense,
                category: Category::Food,
                date: NaiveDate::from_ymd_opt(2024, 1, 2),
            },
            Transaction {
                id: RecordId::new("1"),
                name: "Salary".to_string(),
                amount: 150000.0,
                kind: TxnType::Income,
                category: Category::Income,
                date: NaiveDate::from_ymd_opt(2024, 1, 1),
            },
        ];
        let goals = vec![SavingsGoal {
            id: RecordId::new("g1"),
            name: "New Car".to_string(),
            target_amount: 100.0,
            current_amount: 50.0,
            is_completed: false,
            created_at: None,
            emoji: Some("🚗".to_string()),
        }];
        let (s, _) = reduce(&LedgerState::initial(), LedgerEvent::TransactionsLoaded(txns));
        let (s, _) = reduce(&s, LedgerEvent::GoalsLoaded(goals));
        s
    }

    #[test]
    fn test_progress_bar_cells() {
        assert_eq!(bar_cells(50.0, 10), 5);
        assert_eq!(bar_cells(100.0, 10), 10);
        assert_eq!(bar_cells(-20.0, 10), 0);
        assert_eq!(progress_bar(50.0, 4), "[██░░]");
    }

    #[test]
    fn test_dashboard_shows_totals_goals_and_groups() {
        let out = render_dashboard(&sample_state());
        assert!(out.contains("Total Balance      ₹1,49,995.5"));
        assert!(out.contains("Monthly Expenses   ₹4.5"));
        assert!(out.contains("New Car  [In Progress]"));
        assert!(out.contains("50%"));
        assert!(out.contains("₹50 / ₹100"));

        let food = out.find("🍔 Food & Drink").unwrap();
        let income = out.find("💰 Income").unwrap();
        assert!(food < income);
        assert!(out.contains("-₹4.5"));
        assert!(out.contains("+₹1,50,000"));
    }

    #[test]
    fn test_completed_goal_label() {
        let mut g = sample_state().goals[0].clone();
        g.is_completed = true;
        assert_eq!(goal_status(&g), "Completed");
    }

    #[test]
    fn test_setup_screen_lists_missing_settings() {
        let decision = crate::onboard::decide_next_step(&Default::default());
        let out = render_setup(&decision);
        assert!(out.contains("Supabase Setup Required"));
        assert!(out.contains("supabase.url, supabase.anon_key"));
        assert!(out.contains(URL_ENV));
    }

    #[test]
    fn test_category_choices_in_picker_order() {
        assert!(render_category_choices().starts_with("🛒 Shopping, 🍔 Food"));
    }
}
