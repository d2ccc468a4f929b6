use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::snapshot::{PriceSnapshot, RawPricePoint};

pub fn build_prices_table(snapshot: &PriceSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Day", "Start", "End", "Price"]);
    let rows = snapshot
        .raw_today
        .iter()
        .map(|point| ("Today", point))
        .chain(snapshot.raw_tomorrow.iter().map(|point| ("Tomorrow", point)));
    for (day, point) in rows {
        table.add_row(build_row(day, point, snapshot.average));
    }
    table
}

fn build_row(day: &str, point: &RawPricePoint, average: f64) -> Vec<Cell> {
    vec![
        Cell::new(day).add_attribute(Attribute::Dim),
        Cell::new(&point.start),
        Cell::new(&point.end).add_attribute(Attribute::Dim),
        Cell::new(format!("{:.2}", point.value))
            .set_alignment(CellAlignment::Right)
            .fg(if point.value >= average { Color::Red } else { Color::Green }),
    ]
}
