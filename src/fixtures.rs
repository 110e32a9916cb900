//! Metadata fixtures shared by unit and execute tests.

use std::collections::BTreeMap;

use crate::types::ColumnRow;

/// A metadata dump with two schemas: `shop` (customers, orders) and an empty `audit`.
pub const SHOP_DUMP: &str = r#"{
  "audit": [],
  "shop": [
    {
      "table_name": "customers",
      "table_comment": "Registered customers",
      "column_name": "id",
      "ordinal": 1,
      "column_type": "int(11)",
      "nullable": false,
      "key_type": "PRI",
      "comment": "Customer ID"
    },
    {
      "table_name": "customers",
      "table_comment": "Registered customers",
      "column_name": "name",
      "ordinal": 2,
      "column_type": "varchar(100)",
      "nullable": true,
      "key_type": "",
      "comment": "Full name"
    },
    {
      "table_name": "customers",
      "table_comment": "Registered customers",
      "column_name": "region_id",
      "ordinal": 3,
      "column_type": "int(11)",
      "nullable": true,
      "key_type": "MUL",
      "comment": "Home region"
    },
    {
      "table_name": "orders",
      "table_comment": "Customer orders",
      "column_name": "id",
      "ordinal": 1,
      "column_type": "int(11)",
      "nullable": false,
      "key_type": "PRI",
      "comment": "Order ID"
    },
    {
      "table_name": "orders",
      "table_comment": "Customer orders",
      "column_name": "status",
      "ordinal": 2,
      "column_type": "varchar(20)",
      "nullable": true,
      "key_type": "",
      "comment": "Order status"
    }
  ]
}"#;

pub fn shop_dump() -> BTreeMap<String, Vec<ColumnRow>> {
    serde_json::from_str(SHOP_DUMP).expect("fixture dump is valid JSON")
}

/// Every row of the `shop` schema, in catalog order.
pub fn shop_rows() -> Vec<ColumnRow> {
    shop_dump().remove("shop").unwrap_or_default()
}

/// The two `orders` rows of the `shop` schema.
pub fn orders_rows() -> Vec<ColumnRow> {
    shop_rows()
        .into_iter()
        .filter(|r| r.table_name == "orders")
        .collect()
}
