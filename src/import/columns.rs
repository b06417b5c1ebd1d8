use csv::StringRecord;

/// Source column headers, as they appear in billing spreadsheets.
pub mod header {
    pub const INVOICE_NUMBER: &str = "Invoice Number";
    pub const INVOICE_DATE: &str = "Invoice Date";
    pub const SELLER_NAME: &str = "Seller Name";
    pub const SELLER_ADDRESS: &str = "Seller Address";
    pub const SELLER_GSTIN: &str = "Seller GSTIN";
    pub const BUYER_NAME: &str = "Buyer Name";
    pub const BUYER_ADDRESS: &str = "Buyer Address";
    pub const BUYER_GSTIN: &str = "Buyer GSTIN";
    pub const ITEM_NAME: &str = "Item Name";
    pub const QUANTITY: &str = "Quantity";
    pub const UNIT_PRICE: &str = "Unit Price";
    pub const BASE_AMOUNT: &str = "Base Amount";
    pub const EXTRA_LABEL: &str = "Extra Label Name";
    /// Older sheets name the extra label column without the prefix.
    pub const EXTRA_LABEL_SHORT: &str = "Label Name";
    pub const EXTRA_QTY: &str = "Extra Qty";
    pub const EXTRA_PRICE: &str = "Extra Price";
    pub const DISCOUNT: &str = "Discount";
    pub const CGST: &str = "CGST";
    pub const SGST: &str = "SGST";
    pub const IGST: &str = "IGST";
    pub const GRAND_TOTAL: &str = "Grand Total";
}

/// Header positions, matched on trimmed, case-insensitive names.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    names: Vec<String>,
}

impl ColumnMap {
    pub fn new(headers: &StringRecord) -> Self {
        Self {
            names: headers.iter().map(normalize).collect(),
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        let wanted = normalize(name);
        self.names.iter().position(|n| *n == wanted)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Trimmed cell under `name`; `None` when the column is absent or the
    /// cell is blank.
    pub fn get<'r>(&self, row: &'r StringRecord, name: &str) -> Option<&'r str> {
        let value = row.get(self.index_of(name)?)?.trim();
        (!value.is_empty()).then_some(value)
    }

    /// First non-blank cell among `names`.
    pub fn get_any<'r>(&self, row: &'r StringRecord, names: &[&str]) -> Option<&'r str> {
        names.iter().find_map(|name| self.get(row, name))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_trimmed_case_insensitive() {
        let map = ColumnMap::new(&StringRecord::from(vec![" invoice number ", "SELLER NAME"]));
        assert_eq!(map.index_of(header::INVOICE_NUMBER), Some(0));
        assert_eq!(map.index_of(header::SELLER_NAME), Some(1));
        assert!(!map.contains(header::BUYER_NAME));
    }

    #[test]
    fn blank_cells_read_as_none() {
        let map = ColumnMap::new(&StringRecord::from(vec!["Discount", "Label Name"]));
        let row = StringRecord::from(vec!["   ", "Parking"]);
        assert_eq!(map.get(&row, header::DISCOUNT), None);
        assert_eq!(map.get(&row, header::CGST), None);
        assert_eq!(
            map.get_any(&row, &[header::EXTRA_LABEL, header::EXTRA_LABEL_SHORT]),
            Some("Parking")
        );
    }
}
