//! Text and markdown rendering of the derived tables
//!
//! Pure string building; writing anything to disk stays the caller's
//! concern.

use std::fmt;

use crate::analysis::{MeanRankingTable, RankingTable, SignificanceRow, WideTable};

fn markdown_header(keys: &[&str], methods: &[String]) -> String {
    let mut md = String::new();
    md.push('|');
    for key in keys {
        md.push_str(&format!(" {key} |"));
    }
    for method in methods {
        md.push_str(&format!(" {method} |"));
    }
    md.push('\n');
    md.push('|');
    for _ in 0..keys.len() + methods.len() {
        md.push_str("---|");
    }
    md.push('\n');
    md
}

impl WideTable {
    /// Export as a markdown table, cells rendered `mean ± std` when the
    /// std was appended
    pub fn to_markdown(&self) -> String {
        let mut md = markdown_header(&["Dataset", "Classifier", "Metric"], &self.methods);
        for row in &self.rows {
            md.push_str(&format!(
                "| {} | {} | {} |",
                row.dataset, row.classifier, row.metric
            ));
            for cell in &row.cells {
                match cell {
                    Some(cell) => match cell.std {
                        Some(std) => md.push_str(&format!(" {:.4} ± {:.4} |", cell.mean, std)),
                        None => md.push_str(&format!(" {:.4} |", cell.mean)),
                    },
                    None => md.push_str(" - |"),
                }
            }
            md.push('\n');
        }
        md
    }
}

impl fmt::Display for WideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "(empty table)");
        }

        let key_width = self
            .rows
            .iter()
            .map(|r| r.dataset.len() + r.classifier.len() + r.metric.len() + 4)
            .max()
            .unwrap_or(8);

        write!(f, "{:key_width$} │", "")?;
        for method in &self.methods {
            write!(f, " {method:>15} │")?;
        }
        writeln!(f)?;
        write!(f, "{:─<key_width$}─┼", "")?;
        for _ in &self.methods {
            write!(f, "{:─<17}┼", "")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            let key = format!("{} / {} / {}", row.dataset, row.classifier, row.metric);
            write!(f, "{key:key_width$} │")?;
            for cell in &row.cells {
                match cell {
                    Some(cell) => write!(f, " {:>15.4} │", cell.mean)?,
                    None => write!(f, " {:>15} │", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl RankingTable {
    /// Export as a markdown table, one rank column per method
    pub fn to_markdown(&self) -> String {
        let mut md = markdown_header(&["Dataset", "Classifier", "Metric"], &self.methods);
        for row in &self.rows {
            md.push_str(&format!(
                "| {} | {} | {} |",
                row.dataset, row.classifier, row.metric
            ));
            for rank in &row.ranks {
                match rank {
                    Some(rank) => md.push_str(&format!(" {rank:.1} |")),
                    None => md.push_str(" - |"),
                }
            }
            md.push('\n');
        }
        md
    }
}

impl MeanRankingTable {
    /// Export as a markdown table of dataset-averaged ranks
    pub fn to_markdown(&self) -> String {
        let mut md = markdown_header(&["Classifier", "Metric"], &self.methods);
        for row in &self.rows {
            md.push_str(&format!("| {} | {} |", row.classifier, row.metric));
            for rank in &row.ranks {
                match rank {
                    Some(rank) => md.push_str(&format!(" {rank:.2} |")),
                    None => md.push_str(" - |"),
                }
            }
            md.push('\n');
        }
        md
    }
}

/// Render Friedman test results as a markdown table
pub fn significance_to_markdown(results: &[SignificanceRow]) -> String {
    let mut md = String::from("| Classifier | Metric | p-value | Significant |\n|---|---|---|---|\n");
    for row in results {
        md.push_str(&format!(
            "| {} | {} | {:.4} | {} |\n",
            row.classifier, row.metric, row.p_value, row.significant
        ));
    }
    md
}
