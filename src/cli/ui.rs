use crate::core::EvmCoinInfo;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Builds the two column table describing a coin info record.
pub fn coin_info_table(info: &EvmCoinInfo) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    table.add_row(vec![Cell::new("Denom"), Cell::new(&info.denom)]);
    table.add_row(vec![
        Cell::new("Extended denom"),
        Cell::new(&info.extended_denom),
    ]);
    table.add_row(vec![
        Cell::new("Display denom"),
        Cell::new(&info.display_denom),
    ]);
    table.add_row(vec![
        Cell::new("Decimals"),
        Cell::new(info.decimals).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Conversion factor"),
        format_optional_cell(info.conversion_factor(), |f| f.to_string()),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_info_table_contents() {
        let rendered = coin_info_table(&EvmCoinInfo::default()).to_string();
        assert!(rendered.contains("aatom"));
        assert!(rendered.contains("Conversion factor"));
        assert!(rendered.contains("18"));
    }
}
