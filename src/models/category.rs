use serde::{Deserialize, Serialize};

/// Expense category. Persisted as an integer code (0-10); every code outside
/// the known range collapses to `Others`, so unknown future categories survive
/// a round-trip only as `Others`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Others,
    HousingAndSupplies,
    HealthAndPersonalCare,
    Sport,
    Transportation,
    Clothing,
    Entertainment,
    BillsAndUtilities,
    Pets,
    Insurance,
    Gifts,
}

impl Category {
    pub fn code(self) -> i64 {
        match self {
            Category::Others => 0,
            Category::HousingAndSupplies => 1,
            Category::HealthAndPersonalCare => 2,
            Category::Sport => 3,
            Category::Transportation => 4,
            Category::Clothing => 5,
            Category::Entertainment => 6,
            Category::BillsAndUtilities => 7,
            Category::Pets => 8,
            Category::Insurance => 9,
            Category::Gifts => 10,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Category::HousingAndSupplies,
            2 => Category::HealthAndPersonalCare,
            3 => Category::Sport,
            4 => Category::Transportation,
            5 => Category::Clothing,
            6 => Category::Entertainment,
            7 => Category::BillsAndUtilities,
            8 => Category::Pets,
            9 => Category::Insurance,
            10 => Category::Gifts,
            _ => Category::Others,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Others
    }
}
