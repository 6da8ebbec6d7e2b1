//! Item record validation
//!
//! Turns raw text (as typed at the command line) into typed item fields.
//! Every function here is pure: the same input always gives the same value
//! or the same error, and nothing is coerced silently.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{GroceryError, GroceryResult};
use crate::models::{ItemPatch, Money, NewItem, Quantity};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_UNIT_LEN: usize = 20;
pub const MAX_STORE_LEN: usize = 50;
pub const MAX_NOTES_LEN: usize = 500;

/// Largest accepted price per unit or budget limit (1,000,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted quantity (1,000,000,000)
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Parse a price such as `10.50`, `$10.50` or `₹100`
///
/// The currency symbol, whitespace and thousands separators are stripped;
/// the remainder must be a number between 0 and `MAX_PRICE`. Prices are kept
/// to cent precision.
pub fn parse_price(input: &str) -> GroceryResult<Money> {
    let money = Money::parse(input).map_err(|_| GroceryError::InvalidPriceFormat {
        input: input.to_string(),
    })?;
    validate_price_value(money, input)?;
    Ok(money.rounded())
}

/// Reject negative prices and prices above `MAX_PRICE`
pub fn validate_price_value(price: Money, input: &str) -> GroceryResult<()> {
    if price.is_negative() || price.amount() > MAX_PRICE {
        return Err(GroceryError::InvalidPriceFormat {
            input: input.to_string(),
        });
    }
    Ok(())
}

/// Format an amount the way prices are displayed (`$1,234.50`)
pub fn format_currency(amount: Money) -> String {
    amount.to_string()
}

/// Parse a strictly positive quantity such as `2`, `0.5` or `1.25`
pub fn parse_quantity(input: &str) -> GroceryResult<Quantity> {
    let value: Decimal = input
        .trim()
        .parse()
        .map_err(|_| GroceryError::InvalidQuantityFormat {
            input: input.to_string(),
        })?;
    let quantity = Quantity::new(value).ok_or_else(|| GroceryError::InvalidQuantityFormat {
        input: input.to_string(),
    })?;
    validate_quantity_value(quantity, input)?;
    Ok(quantity)
}

/// Reject quantities above `MAX_QUANTITY`
pub fn validate_quantity_value(quantity: Quantity, input: &str) -> GroceryResult<()> {
    if quantity.value() > MAX_QUANTITY {
        return Err(GroceryError::InvalidQuantityFormat {
            input: input.to_string(),
        });
    }
    Ok(())
}

/// Validate an item name, returning it trimmed
pub fn validate_name(name: &str) -> GroceryResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GroceryError::EmptyName);
    }
    check_length("name", trimmed, MAX_NAME_LEN)?;
    Ok(trimmed.to_string())
}

/// Validate a required free-text field (category, unit or store)
pub fn validate_text_field(field: &'static str, value: &str) -> GroceryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GroceryError::EmptyField { field });
    }
    let max = match field {
        "category" => MAX_CATEGORY_LEN,
        "unit" => MAX_UNIT_LEN,
        "store" => MAX_STORE_LEN,
        _ => MAX_NAME_LEN,
    };
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Validate optional notes; blank notes become `None`
pub fn validate_notes(notes: &str) -> GroceryResult<Option<String>> {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    check_length("notes", trimmed, MAX_NOTES_LEN)?;
    Ok(Some(trimmed.to_string()))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> GroceryResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| GroceryError::InvalidDate {
        input: input.to_string(),
    })
}

fn check_length(field: &'static str, value: &str, max: usize) -> GroceryResult<()> {
    if value.chars().count() > max {
        return Err(GroceryError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Raw text input for a new item
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub unit: String,
    pub price: String,
    pub store: String,
    pub notes: Option<String>,
    /// Purchase date (`YYYY-MM-DD`) when recording an item as already bought
    pub purchased_on: Option<String>,
}

impl ItemInput {
    /// Validate every field, failing on the first invalid one
    pub fn validate(&self) -> GroceryResult<NewItem> {
        Ok(NewItem {
            name: validate_name(&self.name)?,
            category: validate_text_field("category", &self.category)?,
            quantity: parse_quantity(&self.quantity)?,
            unit: validate_text_field("unit", &self.unit)?,
            price_per_unit: parse_price(&self.price)?,
            store_name: validate_text_field("store", &self.store)?,
            notes: match &self.notes {
                Some(notes) => validate_notes(notes)?,
                None => None,
            },
            purchased_on: self.purchased_on.as_deref().map(parse_date).transpose()?,
        })
    }
}

/// Raw text input for an item update; `None` fields stay unchanged
#[derive(Debug, Clone, Default)]
pub struct ItemPatchInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub price: Option<String>,
    pub store: Option<String>,
    pub notes: Option<String>,
    pub clear_notes: bool,
}

impl ItemPatchInput {
    /// Validate the provided fields with the same rules as item creation
    pub fn validate(&self) -> GroceryResult<ItemPatch> {
        let notes = if self.clear_notes {
            Some(None)
        } else {
            self.notes.as_deref().map(validate_notes).transpose()?
        };

        Ok(ItemPatch {
            name: self.name.as_deref().map(validate_name).transpose()?,
            category: self
                .category
                .as_deref()
                .map(|c| validate_text_field("category", c))
                .transpose()?,
            quantity: self.quantity.as_deref().map(parse_quantity).transpose()?,
            unit: self
                .unit
                .as_deref()
                .map(|u| validate_text_field("unit", u))
                .transpose()?,
            price_per_unit: self.price.as_deref().map(parse_price).transpose()?,
            store_name: self
                .store
                .as_deref()
                .map(|s| validate_text_field("store", s))
                .transpose()?,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk_input() -> ItemInput {
        ItemInput {
            name: "  Milk ".into(),
            category: "Dairy & Eggs".into(),
            quantity: "2".into(),
            unit: "l".into(),
            price: "$1.49".into(),
            store: "Aldi".into(),
            notes: None,
            purchased_on: None,
        }
    }

    #[test]
    fn test_parse_price_formats() {
        assert_eq!(parse_price("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(parse_price("$10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(parse_price("₹100").unwrap(), Money::from_cents(10000));
        assert_eq!(parse_price("0").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_price_failures() {
        for bad in ["", "abc", "$", "-1", "-$3.00", "1.2.3"] {
            let err = parse_price(bad).unwrap_err();
            assert!(
                matches!(err, GroceryError::InvalidPriceFormat { .. }),
                "expected InvalidPriceFormat for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_price_normalizes_to_cents() {
        assert_eq!(parse_price("2.499").unwrap(), Money::from_cents(250));
    }

    #[test]
    fn test_price_round_trip_through_format() {
        for cents in [0, 1, 99, 100, 1050, 99_999, 123_456_789] {
            let price = Money::from_cents(cents);
            assert_eq!(parse_price(&format_currency(price)).unwrap(), price);
        }
    }

    #[test]
    fn test_parse_price_is_deterministic() {
        assert_eq!(parse_price("$3.10").unwrap(), parse_price("$3.10").unwrap());
        assert_eq!(
            parse_price("x").unwrap_err().to_string(),
            parse_price("x").unwrap_err().to_string()
        );
    }

    #[test]
    fn test_parse_price_upper_bound() {
        assert_eq!(
            parse_price("1,000,000,000").unwrap(),
            Money::new(MAX_PRICE)
        );
        for bad in ["1000000000.01", "50000000000000000000000000000"] {
            assert!(matches!(
                parse_price(bad),
                Err(GroceryError::InvalidPriceFormat { .. })
            ));
        }
    }

    #[test]
    fn test_parse_quantity_upper_bound() {
        assert_eq!(parse_quantity("1000000000").unwrap().value(), MAX_QUANTITY);
        for bad in ["1000000000.5", "79228162514264337593543950335"] {
            assert!(matches!(
                parse_quantity(bad),
                Err(GroceryError::InvalidQuantityFormat { .. })
            ));
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2.5").unwrap().value(), Decimal::new(25, 1));
        assert_eq!(parse_quantity(" 3 ").unwrap().value(), Decimal::from(3));

        for bad in ["0", "-1", "two", ""] {
            assert!(matches!(
                parse_quantity(bad),
                Err(GroceryError::InvalidQuantityFormat { .. })
            ));
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Bread ").unwrap(), "Bread");
        assert!(matches!(validate_name("   "), Err(GroceryError::EmptyName)));
        assert!(matches!(
            validate_name(&"x".repeat(101)),
            Err(GroceryError::FieldTooLong { field: "name", .. })
        ));
    }

    #[test]
    fn test_validate_text_fields() {
        assert!(matches!(
            validate_text_field("unit", ""),
            Err(GroceryError::EmptyField { field: "unit" })
        ));
        assert!(matches!(
            validate_text_field("unit", &"k".repeat(21)),
            Err(GroceryError::FieldTooLong { field: "unit", max: 20 })
        ));
        assert_eq!(validate_notes("  ").unwrap(), None);
        assert!(validate_notes(&"n".repeat(501)).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(matches!(
            parse_date("2025-02-30"),
            Err(GroceryError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_item_input_validate() {
        let item = milk_input().validate().unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.price_per_unit, Money::from_cents(149));
        assert!(item.purchased_on.is_none());
    }

    #[test]
    fn test_item_input_reports_first_bad_field() {
        let mut input = milk_input();
        input.quantity = "0".into();
        input.price = "free".into();
        let err = input.validate().unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn test_patch_input() {
        let patch = ItemPatchInput {
            price: Some("3.00".into()),
            clear_notes: true,
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.price_per_unit, Some(Money::from_cents(300)));
        assert_eq!(patch.notes, Some(None));
        assert!(patch.name.is_none());

        let err = ItemPatchInput {
            name: Some(" ".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, GroceryError::EmptyName));
    }
}
