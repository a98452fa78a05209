//! Taxpayer profile value type and its fixed catalogs.
//!
//! A profile is collected once per submission and is immutable afterwards:
//! the prediction workflow takes it by value and snapshots it into the
//! ledger record it produces.

use crate::error::{Result, TaxAlertError};
use serde::{Deserialize, Serialize};

/// Business sector catalog.
///
/// Wire labels are the French strings the inference service was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Commerce,
    Agriculture,
    Construction,
    Services,
    Industry,
}

impl Sector {
    /// The label sent to the inference service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Commerce => "Commerce",
            Sector::Agriculture => "Agriculture",
            Sector::Construction => "Construction",
            Sector::Services => "Services",
            Sector::Industry => "Industrie",
        }
    }
}

/// City catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    Yaounde,
    Douala,
    Bamenda,
    Garoua,
    Buea,
}

impl City {
    /// The label sent to the inference service.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Yaounde => "Yaoundé",
            City::Douala => "Douala",
            City::Bamenda => "Bamenda",
            City::Garoua => "Garoua",
            City::Buea => "Buea",
        }
    }
}

/// Self-declared risk level catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// The label sent to the inference service.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Faible",
            RiskLevel::Medium => "Moyen",
            RiskLevel::High => "Élevé",
        }
    }
}

/// A taxpayer profile as submitted for a compliance prediction.
///
/// This is a closed record type: unknown fields are rejected at the domain
/// boundary. Enum fields may be unset (`None`); the workflow forwards them
/// as empty strings and lets the downstream service decide, so `validate`
/// never rejects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    /// Annual revenue in FCFA
    pub annual_revenue: f64,
    /// Annual turnover in FCFA
    pub turnover: f64,
    /// Number of late payments on record
    pub late_payments: u32,
    /// Number of past sanctions on record
    pub past_sanctions: u32,
    /// Business sector, if declared
    pub sector: Option<Sector>,
    /// City of registration, if declared
    pub location: Option<City>,
    /// Number of audits undergone
    pub audit_count: u32,
    /// Self-declared risk level, if declared
    pub risk_level: Option<RiskLevel>,
    /// Contact address for alerting; validated as non-empty only when used
    pub contact_email: Option<String>,
}

impl TaxpayerProfile {
    /// Checks the numeric field constraints.
    ///
    /// Counts are non-negative by construction; the monetary fields must be
    /// finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.annual_revenue.is_finite() || self.annual_revenue < 0.0 {
            return Err(TaxAlertError::validation(
                "annual_revenue must be a non-negative number",
            ));
        }
        if !self.turnover.is_finite() || self.turnover < 0.0 {
            return Err(TaxAlertError::validation(
                "turnover must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Returns the contact address if it is usable for alerting (non-empty
    /// after trimming).
    pub fn alert_address(&self) -> Option<&str> {
        self.contact_email
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}
