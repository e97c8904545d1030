use chrono::NaiveDate;
use ledger_core::{
    Category, FollowUp, LedgerEvent, LedgerState, RecordId, SavingsGoal, Transaction,
    TransactionDraft, TxnType, group_by_category, plan_contribution, reduce, summarize,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

/// Stand-in for the store: assigns an id the way the service would.
fn persist(draft: TransactionDraft, id: &str) -> Transaction {
    Transaction {
        id: RecordId::new(id),
        name: draft.name,
        amount: draft.amount,
        kind: draft.kind,
        category: draft.category,
        date: Some(draft.date),
    }
}

#[test]
fn test_coffee_into_empty_ledger() {
    let draft = TransactionDraft::new(
        "Coffee",
        Some(4.5),
        TxnType::Expense,
        Category::from_label("🍔"),
        day(1),
    )
    .unwrap();

    let (state, _) = reduce(
        &LedgerState::initial(),
        LedgerEvent::TransactionsLoaded(Vec::new()),
    );
    let (state, follow_up) = reduce(&state, LedgerEvent::TransactionInserted(persist(draft, "1")));

    assert_eq!(follow_up, FollowUp::Nothing);
    assert_eq!(state.transactions.len(), 1);
    let totals = state.totals();
    assert_eq!(totals.expenses, 4.5);
    assert_eq!(totals.income, 0.0);
    assert_eq!(totals.balance, -4.5);
}

#[test]
fn test_contribute_thirty_to_eighty_of_hundred() {
    let goal = SavingsGoal {
        id: RecordId::new("42"),
        name: "Laptop".to_string(),
        target_amount: 100.0,
        current_amount: 80.0,
        is_completed: false,
        created_at: None,
        emoji: None,
    };

    let update = plan_contribution(&goal, 30.0);
    assert_eq!(update.goal_id, RecordId::new("42"));
    assert_eq!(update.current_amount, 110.0);
    assert!(update.is_completed);
}

#[test]
fn test_two_food_one_transport_grouping() {
    let txns = vec![
        persist(
            TransactionDraft::new("Lunch", Some(12.0), TxnType::Expense, Category::Food, day(3))
                .unwrap(),
            "1",
        ),
        persist(
            TransactionDraft::new("Dinner", Some(30.0), TxnType::Expense, Category::Food, day(2))
                .unwrap(),
            "2",
        ),
        persist(
            TransactionDraft::new("Taxi", Some(8.0), TxnType::Expense, Category::Transport, day(1))
                .unwrap(),
            "3",
        ),
    ];

    let groups = group_by_category(&txns);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, &Category::Food);
    let food: Vec<&str> = groups[0].transactions.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(food, vec!["Lunch", "Dinner"]);
    assert_eq!(groups[1].heading(), "Transport");
}

#[test]
fn test_grouping_is_a_partition_preserving_order() {
    let labels = ["🚗", "🍔", "💰", "🍔", "🐶", "🚗", "🏠", "🐶", "🎬", "🛒"];
    let txns: Vec<Transaction> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| Transaction {
            id: RecordId::new(i.to_string()),
            name: format!("t{i}"),
            amount: (i as f64) * 1.5,
            kind: if *label == "💰" { TxnType::Income } else { TxnType::Expense },
            category: Category::from_label(label),
            date: Some(day(28 - i as u32)),
        })
        .collect();

    let groups = group_by_category(&txns);

    let flattened: usize = groups.iter().map(|g| g.transactions.len()).sum();
    assert_eq!(flattened, txns.len());

    for g in &groups {
        let positions: Vec<usize> = g
            .transactions
            .iter()
            .map(|t| txns.iter().position(|o| o.id == t.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(g.transactions.iter().all(|t| &t.category == g.category));
    }

    let firsts: Vec<usize> = groups
        .iter()
        .map(|g| txns.iter().position(|o| o.id == g.transactions[0].id).unwrap())
        .collect();
    assert!(firsts.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_balance_identity_holds() {
    let txns: Vec<Transaction> = (0..20)
        .map(|i| Transaction {
            id: RecordId::new(i.to_string()),
            name: String::new(),
            amount: i as f64 * 3.25,
            kind: if i % 3 == 0 { TxnType::Income } else { TxnType::Expense },
            category: Category::default(),
            date: Some(day(1)),
        })
        .collect();

    let totals = summarize(&txns);
    assert_eq!(totals.balance, totals.income - totals.expenses);
    assert!(totals.income >= 0.0);
    assert!(totals.expenses >= 0.0);
}
