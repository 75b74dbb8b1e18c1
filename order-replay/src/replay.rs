//! Feeds newline-delimited JSON orders through a matching engine

use std::io::{BufRead, Write};

use common::decimal::{Amount, Price, TotalQuantity};
use common::error::{Error, ErrorExt, Result};
use common::model::order::{Order, Side};
use common::model::trade::Trade;
use matching_engine::MatchingEngine;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

/// Counters reported at the end of a replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Orders accepted by the engine
    pub processed: usize,
    /// Lines that failed to parse or were rejected by the engine
    pub rejected: usize,
    /// Trades generated
    pub trades: usize,
    /// Sum of price * quantity over all trades, saturating at `Decimal::MAX`
    pub notional: Amount,
}

/// Combined price * quantity of `trades`
fn traded_notional(trades: &[Trade]) -> Result<Amount> {
    trades.iter().try_fold(Amount::ZERO, |total, trade| {
        let amount = trade.amount()?;
        total
            .checked_add(amount)
            .ok_or_else(|| Error::DecimalError(format!("{} + {} overflows", total, amount)))
    })
}

/// Process every order in `input`, writing one JSON result per line to `output`
///
/// Blank lines and lines starting with `#` are skipped. Unparseable or invalid
/// orders produce an `{"line": .., "error": ..}` record and do not stop the
/// replay; I/O failures do.
pub fn replay<R, W>(engine: &mut MatchingEngine, input: R, output: &mut W) -> Result<ReplaySummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line
            .map_err(Error::from)
            .with_context(|| format!("reading line {}", line_number))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = serde_json::from_str::<Order>(line)
            .map_err(Error::from)
            .and_then(|order| engine.process_order(order));

        match result {
            Ok(processed) => {
                debug!("Line {} processed as order {}", line_number, processed.id);
                summary.processed += 1;
                summary.trades += processed.executed_trades.len();
                match traded_notional(&processed.executed_trades)
                    .with_context(|| format!("notional of order {}", processed.id))
                {
                    Ok(amount) => summary.notional = summary.notional.saturating_add(amount),
                    Err(err) => {
                        warn!("{}", err);
                        summary.notional = Amount::MAX;
                    }
                }
                serde_json::to_writer(&mut *output, &processed)?;
            }
            Err(err) => {
                warn!("Rejected line {}: {}", line_number, err);
                summary.rejected += 1;
                serde_json::to_writer(
                    &mut *output,
                    &json!({ "line": line_number, "error": err.to_string() }),
                )?;
            }
        }
        writeln!(output)?;
    }

    Ok(summary)
}

/// Aggregated depth of both sides after a replay
#[derive(Debug, Serialize)]
struct BookSnapshot {
    bids: Vec<(Price, TotalQuantity)>,
    asks: Vec<(Price, TotalQuantity)>,
    last_price: Option<Price>,
}

/// Write aggregated depth for both sides as a single JSON line
pub fn write_book<W: Write>(engine: &MatchingEngine, levels: usize, output: &mut W) -> Result<()> {
    let book = BookSnapshot {
        bids: engine.book(Side::Buy).depth(levels),
        asks: engine.book(Side::Sell).depth(levels),
        last_price: engine.last_price(),
    };
    // Written straight to the stream; `serde_json::Value` cannot hold levels above u64::MAX
    serde_json::to_writer(&mut *output, &book)?;
    writeln!(output)?;
    Ok(())
}
