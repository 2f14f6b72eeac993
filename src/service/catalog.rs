//! Sample catalog inserted by seeding

use crate::models::Item;

/// `(name, stock, price)` of every sample item.
pub const SAMPLE_CATALOG: [(&str, i32, f64); 10] = [
    ("Laptop", 50, 999.99),
    ("Mouse", 200, 25.99),
    ("Keyboard", 150, 75.50),
    ("Monitor", 75, 299.99),
    ("Headphones", 100, 149.99),
    ("Webcam", 80, 89.99),
    ("USB Cable", 300, 12.99),
    ("Power Adapter", 120, 45.00),
    ("Tablet", 60, 399.99),
    ("Smartphone", 40, 699.99),
];

/// Fresh items for the sample catalog.
pub fn sample_items() -> Vec<Item> {
    SAMPLE_CATALOG
        .iter()
        .map(|&(name, stock, price)| Item::new(name, stock, price))
        .collect()
}
