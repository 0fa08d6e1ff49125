//! ledger-cli: headless command-line runner for the supply-chain ledger.
//!
//! Usage:
//!   ledger-cli --db ledger.db store-event E1 lot-7 shipment '{"qty":5}' acme
//!   ledger-cli --db ledger.db store-forecast F1 '[10,12,15]' 0.85 14 0.9
//!   ledger-cli --db ledger.db store-inventory X widget 100 200 20 50 7 1 ok
//!   ledger-cli --db ledger.db store-risk R1 8 6 5 9
//!   ledger-cli --db ledger.db query F1
//!   ledger-cli --db ledger.db scan A Z
//!   ledger-cli --db ledger.db verify lot-7 A Z

use anyhow::{bail, Context, Result};
use scmledger_core::{ledger::SupplyChainLedger, store::SqliteStore};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let mut rest: Vec<&str> = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--db" {
            iter.next();
        } else {
            rest.push(arg.as_str());
        }
    }

    let Some((&cmd, cmd_args)) = rest.split_first() else {
        bail!("no command given; try: store-event | store-forecast | store-inventory | store-risk | query | scan | verify");
    };

    let store = SqliteStore::open(db)?;
    log::info!("opened ledger database at {db}");
    let mut ledger = SupplyChainLedger::new(store);

    match (cmd, cmd_args) {
        ("store-event", [id, subject, event_type, data, owner]) => {
            ledger.store_event(id, subject, event_type, data, owner)?;
            println!("stored event {id}");
        }
        ("store-forecast", [id, sales, accuracy, demand, confidence]) => {
            ledger.store_demand_forecast(
                id,
                sales,
                parse(accuracy, "forecast accuracy")?,
                parse(demand, "next month demand")?,
                parse(confidence, "confidence level")?,
            )?;
            println!("stored forecast {id}");
        }
        ("store-inventory", [id, name, cur, max, min, reorder, lead, level, status]) => {
            ledger.store_inventory_data(
                id,
                name,
                parse(cur, "current stock")?,
                parse(max, "max stock")?,
                parse(min, "min stock")?,
                parse(reorder, "reorder point")?,
                parse(lead, "lead time")?,
                parse(level, "stock level")?,
                status,
            )?;
            println!("stored inventory {id}");
        }
        ("store-risk", [id, supply, demand, quality, financial]) => {
            ledger.store_risk_assessment(
                id,
                parse(supply, "supply risk")?,
                parse(demand, "demand risk")?,
                parse(quality, "quality risk")?,
                parse(financial, "financial risk")?,
            )?;
            println!("stored risk assessment {id}");
        }
        ("query", [id]) => {
            println!("{}", ledger.query_raw(id)?);
        }
        ("scan", [start, end]) => {
            for record in ledger.get_all_data(start, end)? {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        ("verify", [subject, start, end]) => {
            let n = ledger.verify_chain(subject, start, end)?;
            println!("chain for '{subject}' verified: {n} event(s)");
        }
        _ => bail!("unknown command or wrong number of arguments: {cmd}"),
    }

    Ok(())
}

fn parse<T: std::str::FromStr>(value: &str, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .with_context(|| format!("invalid {what}: '{value}'"))
}
