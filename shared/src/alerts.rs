//! Stock alert derivation
//!
//! Alerts are not a source of truth: they are recomputed from the inventory
//! after every change and merged into the existing list. An alert is never
//! deleted automatically; acknowledging it only flips a flag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AlertSeverity, AlertType, InventoryItem, StockAlert};

/// Items expiring within this many days raise an `expiring_soon` alert
pub const EXPIRY_WARNING_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days until expiry, rounded up (negative once expired)
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry - now).num_milliseconds();
    -((-millis).div_euclid(MILLIS_PER_DAY))
}

/// Alerts warranted by the current state of one item
pub fn alerts_for_item(item: &InventoryItem, now: DateTime<Utc>) -> Vec<StockAlert> {
    let mut alerts = Vec::new();
    let alert = |prefix: &str, alert_type, message: String, severity| StockAlert {
        id: format!("{}-{}-{}", prefix, item.id, Uuid::new_v4()),
        inventory_item_id: item.id.clone(),
        item_name: item.name.clone(),
        alert_type,
        message,
        severity,
        timestamp: now,
        acknowledged: false,
    };

    if item.current_stock <= Decimal::ZERO {
        alerts.push(alert(
            "out",
            AlertType::LowStock,
            format!("{} is out of stock", item.name),
            AlertSeverity::Critical,
        ));
    } else if item.current_stock <= item.minimum_stock {
        alerts.push(alert(
            "low",
            AlertType::LowStock,
            format!(
                "{} is running low ({} {} remaining)",
                item.name,
                item.current_stock.normalize(),
                item.unit
            ),
            AlertSeverity::High,
        ));
    }

    if let Some(expiry) = item.expiry_date {
        let days = days_until_expiry(expiry, now);
        if days < 0 {
            alerts.push(alert(
                "expired",
                AlertType::Expired,
                format!("{} has expired", item.name),
                AlertSeverity::Critical,
            ));
        } else if days <= EXPIRY_WARNING_DAYS {
            let severity = if days <= 1 {
                AlertSeverity::High
            } else {
                AlertSeverity::Medium
            };
            let plural = if days == 1 { "" } else { "s" };
            alerts.push(alert(
                "expiring",
                AlertType::ExpiringSoon,
                format!("{} expires in {} day{}", item.name, days, plural),
                severity,
            ));
        }
    }

    alerts
}

/// Alerts to add for the given inventory snapshot
///
/// Inactive items are ignored. An alert is suppressed when an
/// unacknowledged alert with the same `(type, item)` key already exists,
/// or when an earlier alert in this batch has that key.
pub fn derive_alerts(
    inventory: &[InventoryItem],
    existing: &[StockAlert],
    now: DateTime<Utc>,
) -> Vec<StockAlert> {
    let mut open: Vec<(AlertType, &str)> = existing
        .iter()
        .filter(|alert| !alert.acknowledged)
        .map(|alert| (alert.alert_type, alert.inventory_item_id.as_str()))
        .collect();

    let mut new_alerts = Vec::new();
    for item in inventory.iter().filter(|item| item.is_active) {
        for alert in alerts_for_item(item, now) {
            let key = (alert.alert_type, item.id.as_str());
            if open.contains(&key) {
                continue;
            }
            open.push(key);
            new_alerts.push(alert);
        }
    }
    new_alerts
}

/// Derive alerts for `inventory` and append them to `alerts`.
/// Returns how many were added.
pub fn refresh_alerts(inventory: &[InventoryItem], alerts: &mut Vec<StockAlert>, now: DateTime<Utc>) -> usize {
    let fresh = derive_alerts(inventory, alerts, now);
    let added = fresh.len();
    alerts.extend(fresh);
    added
}

/// Mark an alert acknowledged. Returns false if no alert has that id.
pub fn acknowledge_alert(alerts: &mut [StockAlert], alert_id: &str) -> bool {
    match alerts.iter_mut().find(|alert| alert.id == alert_id) {
        Some(alert) => {
            alert.acknowledged = true;
            true
        }
        None => false,
    }
}

/// Alerts still awaiting acknowledgement
pub fn active_alerts(alerts: &[StockAlert]) -> impl Iterator<Item = &StockAlert> {
    alerts.iter().filter(|alert| !alert.acknowledged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryCategory;
    use chrono::Duration;

    fn item(id: &str, stock: i64, minimum: i64) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            name: format!("Item {}", id),
            current_stock: Decimal::from(stock),
            unit: "g".into(),
            minimum_stock: Decimal::from(minimum),
            maximum_stock: Decimal::from(1000),
            cost_per_unit: Decimal::ONE,
            supplier: None,
            last_restocked: Utc::now(),
            expiry_date: None,
            location: None,
            category: InventoryCategory::Dairy,
            is_active: true,
        }
    }

    #[test]
    fn test_days_until_expiry_rounds_up() {
        let now = Utc::now();
        assert_eq!(days_until_expiry(now + Duration::hours(1), now), 1);
        assert_eq!(days_until_expiry(now + Duration::days(2), now), 2);
        assert_eq!(days_until_expiry(now - Duration::hours(1), now), 0);
        assert_eq!(days_until_expiry(now - Duration::hours(25), now), -1);
    }

    #[test]
    fn test_low_stock_alert() {
        let alerts = alerts_for_item(&item("a", 5, 10), Utc::now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::LowStock);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].message, "Item a is running low (5 g remaining)");
    }

    #[test]
    fn test_out_of_stock_alert_is_critical() {
        let alerts = alerts_for_item(&item("a", 0, 10), Utc::now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].message, "Item a is out of stock");
    }

    #[test]
    fn test_expiry_alerts() {
        let now = Utc::now();
        let mut expired = item("a", 50, 10);
        expired.expiry_date = Some(now - Duration::days(2));
        let alerts = alerts_for_item(&expired, now);
        assert_eq!(alerts[0].alert_type, AlertType::Expired);

        let mut soon = item("b", 50, 10);
        soon.expiry_date = Some(now + Duration::days(3));
        let alerts = alerts_for_item(&soon, now);
        assert_eq!(alerts[0].alert_type, AlertType::ExpiringSoon);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(alerts[0].message, "Item b expires in 3 days");

        let mut later = item("c", 50, 10);
        later.expiry_date = Some(now + Duration::days(10));
        assert!(alerts_for_item(&later, now).is_empty());
    }

    #[test]
    fn test_derive_alerts_skips_inactive_and_duplicates() {
        let now = Utc::now();
        let mut inactive = item("x", 0, 10);
        inactive.is_active = false;
        let inventory = vec![item("a", 5, 10), inactive];

        let mut alerts = Vec::new();
        assert_eq!(refresh_alerts(&inventory, &mut alerts, now), 1);
        assert_eq!(refresh_alerts(&inventory, &mut alerts, now), 0);
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_acknowledged_alert_no_longer_suppresses() {
        let now = Utc::now();
        let inventory = vec![item("a", 5, 10)];
        let mut alerts = Vec::new();
        refresh_alerts(&inventory, &mut alerts, now);

        let id = alerts[0].id.clone();
        assert!(acknowledge_alert(&mut alerts, &id));
        assert!(!acknowledge_alert(&mut alerts, "missing"));
        assert_eq!(active_alerts(&alerts).count(), 0);

        refresh_alerts(&inventory, &mut alerts, now);
        assert_eq!(alerts.len(), 2);
        assert!(alerts[0].acknowledged);
        assert_eq!(active_alerts(&alerts).count(), 1);

        // Re-derived at the same instant, the new alert is still addressable
        let second = alerts[1].id.clone();
        assert_ne!(second, id);
        assert!(second.starts_with("low-a-"));
        assert!(acknowledge_alert(&mut alerts, &second));
        assert_eq!(active_alerts(&alerts).count(), 0);
    }
}
