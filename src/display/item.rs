//! Item display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::GroceryItem;

use super::report::truncate;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    status: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Unit Price")]
    price: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl ItemRow {
    fn new(item: &GroceryItem, symbol: &str) -> Self {
        Self {
            id: item.id.to_string(),
            status: if item.purchased { "✓" } else { " " },
            name: truncate(&item.name, 28),
            category: truncate(&item.category, 20),
            store: truncate(&item.store_name, 18),
            quantity: format!("{} {}", item.quantity, item.unit),
            price: item.price_per_unit.format_with_symbol(symbol),
            total: item.total_cost().format_with_symbol(symbol),
        }
    }
}

/// Items as a table, or a short message when there are none
pub fn format_item_table(items: &[GroceryItem], symbol: &str) -> String {
    if items.is_empty() {
        return "No items found.\n".to_string();
    }

    let rows: Vec<ItemRow> = items.iter().map(|i| ItemRow::new(i, symbol)).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(5..), Alignment::right());

    format!("{}\n", table)
}

/// Every field of one item
pub fn format_item_details(item: &GroceryItem, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Item:        {} {}\n", item.id, item.name));
    output.push_str(&format!("Category:    {}\n", item.category));
    output.push_str(&format!("Store:       {}\n", item.store_name));
    output.push_str(&format!("Quantity:    {} {}\n", item.quantity, item.unit));
    output.push_str(&format!(
        "Unit price:  {}\n",
        item.price_per_unit.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total cost:  {}\n",
        item.total_cost().format_with_symbol(symbol)
    ));

    match item.purchase_date {
        Some(date) if item.purchased => {
            output.push_str(&format!("Purchased:   {}\n", date.format(date_format)))
        }
        _ => output.push_str("Purchased:   no\n"),
    }

    if let Some(notes) = &item.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    output.push_str(&format!(
        "Added:       {}\n",
        item.created_at.format(&format!("{} %H:%M", date_format))
    ));

    output
}

/// One-line summary, e.g. for confirmations
pub fn format_item_short(item: &GroceryItem, symbol: &str) -> String {
    format!(
        "{} {} ({} {} @ {} = {})",
        item.id,
        item.name,
        item.quantity,
        item.unit,
        item.price_per_unit.format_with_symbol(symbol),
        item.total_cost().format_with_symbol(symbol)
    )
}
