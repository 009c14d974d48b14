//! Bridge skills: the skills with the highest betweenness centrality,
//! i.e. those linking otherwise separate skill communities

use serde::Serialize;

use crate::centrality::CentralityTable;
use crate::table::Table;

pub const BRIDGE_COLUMNS: [&str; 3] = ["node", "betweenness", "degree"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeSkill {
    pub node: String,
    pub betweenness: f64,
    pub degree: f64,
}

/// Top `n` skills by betweenness, highest first (ties keep table order)
pub fn bridge_skills(centralities: &CentralityTable, n: usize) -> Vec<BridgeSkill> {
    let mut bridges: Vec<BridgeSkill> = centralities
        .iter()
        .map(|row| BridgeSkill {
            node: row.node.clone(),
            betweenness: row.betweenness,
            degree: row.degree,
        })
        .collect();

    bridges.sort_by(|a, b| b.betweenness.total_cmp(&a.betweenness));
    bridges.truncate(n);
    bridges
}

/// Table variant: top `n` rows by betweenness projected to
/// (node, betweenness, degree).
///
/// A table without a betweenness column yields an empty table.
pub fn select_bridge_skills(table: &Table, n: usize) -> Table {
    if !table.has_column("betweenness") {
        return Table::default();
    }

    let mut ranked: Vec<(usize, f64)> = (0..table.len())
        .map(|row| (row, table.number(row, "betweenness").unwrap_or(f64::NEG_INFINITY)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);

    let top = Table {
        columns: table.columns.clone(),
        rows: ranked
            .into_iter()
            .map(|(row, _)| table.rows[row].clone())
            .collect(),
    };
    top.select(&BRIDGE_COLUMNS)
}
