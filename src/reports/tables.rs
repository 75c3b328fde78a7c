use colcrack::api::CrackReport;
use colcrack::oracle::OracleStatus;
use colcrack::search::Candidate;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn leaderboard(ranked: &[&Candidate]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Plaintext"),
    ]);

    for i in [0, 2] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, c) in ranked.iter().enumerate() {
        let score = Cell::new(format!("{:.1}", c.score));
        let score = if rank == 0 { score.fg(Color::Green) } else { score };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(c.key.label()),
            score,
            Cell::new(&c.plaintext),
        ]);
    }
    println!("\n{}", table);
}

pub fn oracle(report: &CrackReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let status_color = match report.oracle.status {
        OracleStatus::Matched => Color::Green,
        OracleStatus::NoMatch | OracleStatus::Skipped => Color::Yellow,
        OracleStatus::UnexpectedFormat | OracleStatus::Unavailable => Color::Red,
    };

    table.add_row(vec![
        Cell::new("Dictionary best").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} {} (score {:.1})",
            report.best.key, report.best.plaintext, report.best.score
        )),
    ]);
    table.add_row(vec![
        Cell::new("Oracle").add_attribute(Attribute::Bold),
        Cell::new(report.oracle.status).fg(status_color),
    ]);
    if let Some(v) = &report.oracle.verdict {
        table.add_row(vec![
            Cell::new("Oracle pick"),
            Cell::new(format!("{} (Key: {})", v.sentence, v.key_label)),
        ]);
    }
    if let Some(c) = &report.oracle.matched {
        table.add_row(vec![
            Cell::new("Matched"),
            Cell::new(format!("{} {} (score {:.1})", c.key, c.plaintext, c.score)),
        ]);
    }
    if let Some(detail) = &report.oracle.detail {
        table.add_row(vec![Cell::new("Detail"), Cell::new(detail)]);
    }
    println!("\n{}", table);
}
