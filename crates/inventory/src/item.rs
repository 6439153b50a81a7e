use stockroom_core::{DomainError, DomainResult, ValueObject};

/// Characters that would break a comma-delimited record line.
const FORBIDDEN_CHARS: [char; 3] = [',', '\n', '\r'];

fn ensure_plain(field: &str, value: &str) -> DomainResult<()> {
    if value.contains(FORBIDDEN_CHARS) {
        return Err(DomainError::validation(format!(
            "{field} cannot contain commas or line breaks"
        )));
    }
    Ok(())
}

fn is_negative_integer(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| digits.parse::<u64>().is_ok())
}

/// Integral costs keep one decimal place (`45.0`); others use the shortest
/// representation that parses back to the same value (`12.5`).
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{cost:.1}")
    } else {
        cost.to_string()
    }
}

/// Item code, normalized to lower case so comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemCode(String);

impl ItemCode {
    pub fn new(raw: &str) -> DomainResult<Self> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        ensure_plain("code", code)?;
        Ok(Self(code.to_lowercase()))
    }

    /// Canonical (lower-case) form, as written to the backing file.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against raw user input.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim().to_lowercase()
    }
}

impl ValueObject for ItemCode {}

impl core::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.to_uppercase())
    }
}

/// One inventory line item.
///
/// `origin`, `code` and `name` are fixed at construction and never contain a
/// comma or line break. Cost and quantity are validated non-negative; quantity
/// only ever grows through [`restock`].
///
/// [`restock`]: StockItem::restock
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    origin: String,
    code: ItemCode,
    name: String,
    unit_cost: f64,
    quantity: u64,
}

impl StockItem {
    pub fn new(
        origin: &str,
        code: &str,
        name: &str,
        unit_cost: f64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let quantity = u64::try_from(quantity)
            .map_err(|_| DomainError::validation("quantity cannot be negative"))?;
        Self::build(origin, code, name, unit_cost, quantity)
    }

    /// Build an item from raw text fields (one line of the backing file).
    ///
    /// Quantity is read as a `u64`, the type it is stored in, so anything a
    /// restock can reach loads back.
    pub fn from_fields(
        origin: &str,
        code: &str,
        name: &str,
        cost: &str,
        quantity: &str,
    ) -> DomainResult<Self> {
        let cost_text = cost.trim();
        let unit_cost: f64 = cost_text
            .parse()
            .map_err(|_| DomainError::parse("cost", cost_text))?;

        let quantity_text = quantity.trim();
        let quantity: u64 = match quantity_text.parse() {
            Ok(quantity) => quantity,
            Err(_) if is_negative_integer(quantity_text) => {
                return Err(DomainError::validation("quantity cannot be negative"));
            }
            Err(_) => return Err(DomainError::parse("quantity", quantity_text)),
        };

        Self::build(origin, code, name, unit_cost, quantity)
    }

    fn build(
        origin: &str,
        code: &str,
        name: &str,
        unit_cost: f64,
        quantity: u64,
    ) -> DomainResult<Self> {
        let code = ItemCode::new(code)?;

        let origin = origin.trim();
        ensure_plain("origin", origin)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        ensure_plain("name", name)?;

        if !unit_cost.is_finite() {
            return Err(DomainError::validation("cost must be a finite number"));
        }
        if unit_cost < 0.0 {
            return Err(DomainError::validation("cost cannot be negative"));
        }

        Ok(Self {
            origin: origin.to_string(),
            code,
            name: name.to_lowercase(),
            unit_cost,
            quantity,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    /// Canonical (lower-case) product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product name with its first letter capitalized, for display.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Stock value of this line: unit cost times quantity on hand.
    pub fn total_value(&self) -> f64 {
        self.unit_cost * self.quantity as f64
    }

    /// Add `amount` units to the quantity on hand, returning the new quantity.
    pub fn restock(&mut self, amount: u64) -> DomainResult<u64> {
        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or_else(|| DomainError::invariant("quantity overflow"))?;
        Ok(self.quantity)
    }
}

impl core::fmt::Display for StockItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.origin,
            self.code,
            self.display_name(),
            format_cost(self.unit_cost),
            self.quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item() -> StockItem {
        StockItem::new("South Africa", "SKU44386", "Air Max 90", 2300.0, 20).unwrap()
    }

    #[test]
    fn construction_normalizes_code_and_name() {
        let item = test_item();
        assert_eq!(item.code().as_str(), "sku44386");
        assert_eq!(item.name(), "air max 90");
        assert_eq!(item.origin(), "South Africa");
    }

    #[test]
    fn code_matches_case_insensitively() {
        let item = StockItem::new("China", "AB12", "Runner", 10.0, 1).unwrap();
        assert!(item.code().matches("ab12"));
        assert!(item.code().matches(" AB12 "));
        assert!(!item.code().matches("ab13"));
    }

    #[test]
    fn total_value_is_cost_times_quantity() {
        let item = StockItem::new("Vietnam", "X1", "Sandal", 12.5, 4).unwrap();
        assert_eq!(item.total_value(), 50.0);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = StockItem::new("Vietnam", "X1", "Sandal", 12.5, -1).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("quantity") => {}
            _ => panic!("Expected validation error for negative quantity"),
        }
    }

    #[test]
    fn negative_or_non_finite_cost_is_rejected() {
        for cost in [-0.01, f64::NAN, f64::INFINITY] {
            let err = StockItem::new("Vietnam", "X1", "Sandal", cost, 1).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "cost {cost}");
        }
    }

    #[test]
    fn empty_code_or_name_is_rejected() {
        assert!(StockItem::new("Vietnam", "  ", "Sandal", 1.0, 1).is_err());
        assert!(StockItem::new("Vietnam", "X1", "", 1.0, 1).is_err());
    }

    #[test]
    fn from_fields_parses_numbers() {
        let item = StockItem::from_fields("Japan", "JP7", "Kobe", " 45.0", "7 ").unwrap();
        assert_eq!(item.unit_cost(), 45.0);
        assert_eq!(item.quantity(), 7);
    }

    #[test]
    fn from_fields_rejects_non_numeric_values() {
        let err = StockItem::from_fields("Japan", "JP7", "Kobe", "cheap", "7").unwrap_err();
        assert_eq!(err, DomainError::parse("cost", "cheap"));

        let err = StockItem::from_fields("Japan", "JP7", "Kobe", "4.5", "2.5").unwrap_err();
        assert_eq!(err, DomainError::parse("quantity", "2.5"));
    }

    #[test]
    fn from_fields_rejects_negative_values_as_validation() {
        let err = StockItem::from_fields("Japan", "JP7", "Kobe", "4.5", "-3").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn restock_increments_quantity() {
        let mut item = test_item();
        assert_eq!(item.restock(5).unwrap(), 25);
        assert_eq!(item.quantity(), 25);
    }

    #[test]
    fn restock_overflow_is_an_invariant_violation() {
        let mut item = test_item();
        let err = item.restock(u64::MAX).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(item.quantity(), 20);
    }

    #[test]
    fn display_uses_upper_code_and_capitalized_name() {
        let item = StockItem::new("Pakistan", "sku1", "jordan 1", 3.5, 2).unwrap();
        assert_eq!(item.to_string(), "Pakistan | SKU1 | Jordan 1 | 3.5 | 2");
    }

    #[test]
    fn display_keeps_one_decimal_for_whole_costs() {
        let item = StockItem::new("China", "SKU90000", "Jordan 1", 3200.0, 50).unwrap();
        assert_eq!(item.to_string(), "China | SKU90000 | Jordan 1 | 3200.0 | 50");
    }

    #[test]
    fn cost_formatting() {
        assert_eq!(format_cost(45.0), "45.0");
        assert_eq!(format_cost(12.5), "12.5");
        assert_eq!(format_cost(0.0), "0.0");
        assert_eq!(format_cost(1999.99), "1999.99");
    }

    #[test]
    fn from_fields_reads_any_quantity_a_restock_can_reach() {
        let mut item = test_item();
        item.restock(i64::MAX as u64).unwrap();
        let text = item.quantity().to_string();

        let parsed = StockItem::from_fields("South Africa", "SKU44386", "Air Max 90", "2300", &text)
            .unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn delimiters_and_line_breaks_are_rejected() {
        let cases = [
            ("Korea, South", "K1", "Runner"),
            ("Korea", "K,1", "Runner"),
            ("Korea", "K1", "Run\nner"),
            ("Korea", "K1", "Runner\rX"),
            ("Kor\nea", "K1", "Runner"),
        ];
        for (origin, code, name) in cases {
            let err = StockItem::new(origin, code, name, 1.0, 1).unwrap_err();
            assert!(
                matches!(&err, DomainError::Validation(msg) if msg.contains("commas or line breaks")),
                "{origin:?} {code:?} {name:?} gave {err:?}"
            );
        }
        assert!(ItemCode::new("a,b").is_err());
    }
}
