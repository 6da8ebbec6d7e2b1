//! CSV Export functionality
//!
//! Writes the item list as a spreadsheet-friendly CSV file.

use std::io::Write;

use crate::error::{GroceryError, GroceryResult};
use crate::models::GroceryItem;
use crate::storage::Storage;

const ITEM_HEADER: [&str; 11] = [
    "ID",
    "Name",
    "Category",
    "Quantity",
    "Unit",
    "Price Per Unit",
    "Total Cost",
    "Store",
    "Purchased",
    "Purchase Date",
    "Notes",
];

/// Export every item to CSV
pub fn export_items_csv<W: Write>(storage: &Storage, writer: W) -> GroceryResult<()> {
    write_items_csv(&storage.items.get_all()?, writer)
}

/// Write the given items to CSV, one row each
pub fn write_items_csv<W: Write>(items: &[GroceryItem], writer: W) -> GroceryResult<()> {
    let export_err = |e: csv::Error| GroceryError::Export(e.to_string());
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(ITEM_HEADER).map_err(export_err)?;

    for item in items {
        csv.write_record([
            item.id.get().to_string(),
            item.name.clone(),
            item.category.clone(),
            item.quantity.to_string(),
            item.unit.clone(),
            format!("{:.2}", item.price_per_unit.rounded().amount()),
            format!("{:.2}", item.total_cost().rounded().amount()),
            item.store_name.clone(),
            item.purchased.to_string(),
            item.purchase_date.map(|d| d.to_string()).unwrap_or_default(),
            item.notes.clone().unwrap_or_default(),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| GroceryError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GroceryPaths;
    use crate::services::ItemService;
    use crate::validation::ItemInput;
    use tempfile::TempDir;

    #[test]
    fn test_items_csv_quotes_and_totals() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(GroceryPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage.load_all().unwrap();

        ItemService::new(&storage)
            .add(&ItemInput {
                name: "Eggs, free range".into(),
                category: "Dairy & Eggs".into(),
                quantity: "1.5".into(),
                unit: "dozen".into(),
                price: "4.00".into(),
                store: "Trader Joe's".into(),
                notes: Some("large".into()),
                purchased_on: Some("2025-04-02".into()),
            })
            .unwrap();

        let mut out = Vec::new();
        export_items_csv(&storage, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "ID,Name,Category,Quantity,Unit,Price Per Unit,Total Cost,Store,Purchased,Purchase Date,Notes"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,\"Eggs, free range\",Dairy & Eggs,1.5,dozen,4.00,6.00,Trader Joe's,true,2025-04-02,large"
        );
    }
}
