//! Left joins of wide bank tables on (entity, date).

use std::collections::HashMap;

use solvency_core::types::{BankRecord, BankTable, Field, RecordKey, Table};
use tracing::{debug, info};

/// Left-joins `right` onto `left` by (entity, date).
///
/// Every left row is kept, in order. Where both sides carry a field the left
/// value wins and the right value only fills a missing left cell. Right rows
/// without a left partner are dropped. The result has the union of both
/// column sets.
pub fn left_join(left: BankTable, right: &BankTable) -> BankTable {
    let index: HashMap<RecordKey, &BankRecord> =
        right.iter().map(|record| (record.key(), record)).collect();
    let right_columns: Vec<Field> = right.columns().iter().copied().collect();

    let (mut columns, mut rows) = left.into_parts();
    let mut matched = 0usize;

    for record in &mut rows {
        let Some(other) = index.get(&record.key()) else {
            continue;
        };
        matched += 1;
        for field in &right_columns {
            if record.get(*field).is_none() {
                record.set_opt(*field, other.get(*field));
            }
        }
    }

    columns.extend(right_columns);
    debug!(rows = rows.len(), matched, "Left join complete");
    Table::new(columns, rows)
}

/// Takes `RWA_Total` from the market risk table when the merge lacks it.
///
/// Only consulted when the merged table has no `RWA_Total` column at all;
/// the market table then contributes that single column.
pub fn supplement_rwa_from_market(merged: BankTable, market: &BankTable) -> BankTable {
    if merged.has_column(Field::RwaTotal) || !market.has_column(Field::RwaTotal) {
        return merged;
    }

    info!("RWA_Total absent from disclosures, taking it from market risk");
    let rwa_only = Table::new(
        [Field::RwaTotal],
        market
            .iter()
            .map(|record| {
                let mut narrowed = BankRecord::from_key(record.key());
                narrowed.set_opt(Field::RwaTotal, record.get(Field::RwaTotal));
                narrowed
            })
            .collect(),
    );
    left_join(merged, &rwa_only)
}
