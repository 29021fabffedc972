use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;

use crate::error::Result;
use crate::models::{
    Asset, AssetKind, Budget, Debt, DebtKind, Goal, Liability, LiabilityKind, Transaction, TxnKind,
    INCOME_CATEGORY,
};
use crate::settings::ledger_path;
use crate::store::Ledger;

// (category, merchants, min..max spend)
const EXPENSE_TABLE: &[(&str, &[&str], f64, f64)] = &[
    ("Food", &["Corner Market", "Bluebird Cafe", "Slice Pizza", "Harvest Grocery"], 8.0, 95.0),
    ("Transport", &["Metro Card", "City Fuel", "Downtown Parking"], 5.0, 60.0),
    ("Shopping", &["Maple & Main", "Bookshop", "Hardware Depot"], 15.0, 140.0),
    ("Utilities", &["City Power & Light", "Fiber Internet", "Water District"], 35.0, 120.0),
    ("Entertainment", &["Streamflix", "Grand Cinema", "Vinyl Records"], 9.0, 55.0),
    ("Health", &["Greenleaf Pharmacy", "Riverside Gym"], 12.0, 80.0),
];

const INCOME_SOURCES: &[&str] = &["Acme Corp Payroll", "Freelance Invoice"];

fn months_back(n: u32) -> (i32, u32) {
    let today = Local::now().date_naive();
    let total = today.year() * 12 + today.month0() as i32 - n as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Fill the ledger with a few months of plausible activity so every command
/// has something to show. Refuses to touch a ledger that already has data.
pub fn run() -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    if ledger.transaction_count() > 0 {
        println!("Ledger already has transactions; demo data not loaded.");
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    let mut seq = 0usize;
    let mut next_id = |prefix: &str| {
        seq += 1;
        format!("{prefix}-{seq}")
    };

    let mut txns: Vec<Transaction> = Vec::new();
    for back in 0..3u32 {
        let (year, month) = months_back(back);

        for source in INCOME_SOURCES {
            let amount = rng.gen_range(1200.0..2600.0);
            if let Some(date) =
                NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(9, 0, 0))
            {
                txns.push(Transaction {
                    id: next_id("demo"),
                    date,
                    description: source.to_string(),
                    category: INCOME_CATEGORY.to_string(),
                    amount: (amount * 100.0f64).round() / 100.0,
                    kind: TxnKind::Income,
                    confidence: None,
                });
            }
        }

        for (category, merchants, lo, hi) in EXPENSE_TABLE {
            let count = rng.gen_range(2..=4usize);
            for _ in 0..count {
                let merchant = merchants[rng.gen_range(0..merchants.len())];
                let day = rng.gen_range(1..=28u32);
                let amount = rng.gen_range(*lo..*hi);
                if let Some(date) =
                    NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(12, 0, 0))
                {
                    txns.push(Transaction {
                        id: next_id("demo"),
                        date,
                        description: merchant.to_string(),
                        category: category.to_string(),
                        amount: (amount * 100.0f64).round() / 100.0,
                        kind: TxnKind::Expense,
                        confidence: None,
                    });
                }
            }
        }
    }

    let count = txns.len();
    ledger.absorb_categories(&txns);
    for txn in txns {
        ledger.add_transaction(txn);
    }

    ledger.budgets = vec![
        Budget { category: "Food".to_string(), amount: 400.0 },
        Budget { category: "Entertainment".to_string(), amount: 100.0 },
        Budget { category: "Transport".to_string(), amount: 150.0 },
    ];
    ledger.debts = vec![Debt {
        id: next_id("demo-debt"),
        description: "Split weekend trip with Sam".to_string(),
        amount: 180.0,
        kind: DebtKind::Iou,
        due_date: None,
        is_settled: false,
    }];
    ledger.assets = vec![
        Asset {
            id: next_id("demo-asset"),
            name: "Checking account".to_string(),
            kind: AssetKind::Cash,
            value: 4200.0,
        },
        Asset {
            id: next_id("demo-asset"),
            name: "Index fund".to_string(),
            kind: AssetKind::Investment,
            value: 11500.0,
        },
    ];
    ledger.liabilities = vec![Liability {
        id: next_id("demo-liability"),
        name: "Credit card balance".to_string(),
        kind: LiabilityKind::CreditCard,
        value: 950.0,
    }];
    ledger.goals = vec![Goal {
        id: next_id("demo-goal"),
        name: "Emergency fund".to_string(),
        target_amount: 5000.0,
        saved_amount: 1250.0,
        deadline: format!("{}-12-31", Local::now().year()),
    }];

    ledger.save(&ledger_file)?;
    println!("Demo data loaded: {count} transactions over 3 months. Try 'penny summary'.");
    Ok(())
}
