//! Taxpayer profile domain models.

mod model;

pub use model::{City, RiskLevel, Sector, TaxpayerProfile};
