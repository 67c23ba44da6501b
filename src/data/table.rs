use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Column sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort, if any: column index into `Dataset::columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<(usize, SortDirection)>,
}

impl SortState {
    /// Header click: none → ascending → descending → none. Clicking a
    /// different column starts it at ascending.
    pub fn cycle(&mut self, column: usize) {
        self.column = match self.column {
            Some((c, SortDirection::Ascending)) if c == column => {
                Some((column, SortDirection::Descending))
            }
            Some((c, SortDirection::Descending)) if c == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn direction_of(&self, column: usize) -> Option<SortDirection> {
        match self.column {
            Some((c, dir)) if c == column => Some(dir),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-column filter query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Parsed form of the text typed under a column header.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnQuery {
    /// Blank query, matches everything.
    Any,
    Compare { op: Op, operand: String },
    Contains(String),
}

impl ColumnQuery {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return ColumnQuery::Any;
        }
        // Two-character operators first so ">=" is not read as ">".
        const OPS: [(&str, Op); 6] = [
            (">=", Op::Ge),
            ("<=", Op::Le),
            ("!=", Op::Ne),
            (">", Op::Gt),
            ("<", Op::Lt),
            ("=", Op::Eq),
        ];
        for (prefix, op) in OPS {
            if let Some(rest) = text.strip_prefix(prefix) {
                return ColumnQuery::Compare {
                    op,
                    operand: rest.trim().to_string(),
                };
            }
        }
        ColumnQuery::Contains(text.to_string())
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        match self {
            ColumnQuery::Any => true,
            ColumnQuery::Contains(needle) => match (needle.parse::<f64>(), cell.as_f64()) {
                (Ok(n), Some(v)) => n == v,
                _ => cell.to_string().contains(needle.as_str()),
            },
            ColumnQuery::Compare { op, operand } => {
                let ordering = match (operand.parse::<f64>(), cell.as_f64()) {
                    (Ok(n), Some(v)) => match v.partial_cmp(&n) {
                        Some(o) => o,
                        None => return false,
                    },
                    (Ok(_), None) => return false,
                    (Err(_), _) => cell.to_string().as_str().cmp(operand.as_str()),
                };
                match op {
                    Op::Eq => ordering.is_eq(),
                    Op::Ne => ordering.is_ne(),
                    Op::Lt => ordering.is_lt(),
                    Op::Le => ordering.is_le(),
                    Op::Gt => ordering.is_gt(),
                    Op::Ge => ordering.is_ge(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Table view
// ---------------------------------------------------------------------------

/// Sort and query state of the data table. `queries` holds the raw text
/// typed under each column header.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub sort: SortState,
    pub queries: Vec<String>,
}

impl TableState {
    pub fn for_columns(n: usize) -> Self {
        TableState {
            sort: SortState::default(),
            queries: vec![String::new(); n],
        }
    }

    /// Apply the queries, then the sort, to `rows`. Never touches the
    /// rows that feed the charts.
    pub fn view(&self, dataset: &Dataset, rows: &[usize]) -> Vec<usize> {
        let queries: Vec<(usize, ColumnQuery)> = self
            .queries
            .iter()
            .enumerate()
            .map(|(col, text)| (col, ColumnQuery::parse(text)))
            .filter(|(_, q)| *q != ColumnQuery::Any)
            .collect();

        let mut visible: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&idx| {
                let cells = &dataset.records[idx].cells;
                queries.iter().all(|(col, q)| match cells.get(*col) {
                    Some(cell) => q.matches(cell),
                    None => q.matches(&CellValue::Null),
                })
            })
            .collect();

        if let Some((col, dir)) = self.sort.column {
            // `sort_by` is stable: ties keep filtered order.
            visible.sort_by(|&a, &b| {
                let ca = dataset.records[a].cells.get(col).unwrap_or(&CellValue::Null);
                let cb = dataset.records[b].cells.get(col).unwrap_or(&CellValue::Null);
                match dir {
                    SortDirection::Ascending => ca.cmp(cb),
                    SortDirection::Descending => cb.cmp(ca),
                }
            });
        }
        visible
    }
}
