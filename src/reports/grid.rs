use colcrack::cipher::{Grid, Key};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

/// Header row shows the key value above each column.
pub fn print_grid(key: &Key, grid: &Grid) {
    println!("\nKey: {}", key);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.set_header(
        key.values()
            .iter()
            .map(|v| Cell::new(v).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for r in 0..grid.rows() {
        let cells: Vec<Cell> = grid
            .row(r)
            .iter()
            .map(|cell| {
                let label = match cell {
                    Some(' ') => "␠".to_string(),
                    Some(c) => c.to_string(),
                    None => " ".to_string(),
                };
                Cell::new(label).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}
