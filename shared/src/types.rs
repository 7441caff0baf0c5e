//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Who a catalog row belongs to.
///
/// Items and suppliers are either owned by a single tenant or global
/// (visible to everyone). Stored as a nullable tenant id column; NULL means
/// global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Tenant(String),
    Global,
}

impl Owner {
    /// Build from a nullable `user_id` column.
    pub fn from_column(user_id: Option<String>) -> Self {
        match user_id {
            Some(id) => Owner::Tenant(id),
            None => Owner::Global,
        }
    }

    /// The value to store in a nullable `user_id` column.
    pub fn into_column(self) -> Option<String> {
        match self {
            Owner::Tenant(id) => Some(id),
            Owner::Global => None,
        }
    }

    /// Whether a row with this owner shows up in the given tenant's catalog.
    /// Global rows are visible to every tenant.
    pub fn visible_to(&self, tenant_id: &str) -> bool {
        match self {
            Owner::Tenant(id) => id == tenant_id,
            Owner::Global => true,
        }
    }

    /// Whether the given tenant owns this row outright. Global rows belong
    /// to nobody, so this is false for them.
    pub fn owned_by(&self, tenant_id: &str) -> bool {
        matches!(self, Owner::Tenant(id) if id == tenant_id)
    }
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The range covering the last `days` days ending at `today`.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let back = days.saturating_sub(1) as i64;
        Self {
            start: today - chrono::Duration::days(back),
            end: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_visibility() {
        let own = Owner::Tenant("user_a".to_string());
        let other = Owner::Tenant("user_b".to_string());
        let global = Owner::Global;

        assert!(own.visible_to("user_a"));
        assert!(!other.visible_to("user_a"));
        assert!(global.visible_to("user_a"));
        assert!(global.visible_to("user_b"));
    }

    #[test]
    fn test_owner_deletion_rights() {
        assert!(Owner::Tenant("user_a".to_string()).owned_by("user_a"));
        assert!(!Owner::Tenant("user_b".to_string()).owned_by("user_a"));
        // Global rows are owned by nobody and cannot be deleted by a tenant
        assert!(!Owner::Global.owned_by("user_a"));
    }

    #[test]
    fn test_owner_column_round_trip() {
        assert_eq!(
            Owner::from_column(Some("u1".to_string())),
            Owner::Tenant("u1".to_string())
        );
        assert_eq!(Owner::from_column(None), Owner::Global);
        assert_eq!(Owner::Global.into_column(), None);
        assert_eq!(
            Owner::Tenant("u1".to_string()).into_column(),
            Some("u1".to_string())
        );
    }

    #[test]
    fn test_last_days_range() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let range = DateRange::last_days(today, 10);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(range.end, today);
    }
}
