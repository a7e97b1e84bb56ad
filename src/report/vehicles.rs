//! Distinct vehicles seen, with their country, brand and type

use crate::error::Result;
use crate::sentry::Event;
use crate::tags::{car_id, vehicle_tags, VEHICLE_BRAND, VEHICLE_COUNTRY, VEHICLE_TYPE};
use indexmap::IndexMap;
use std::collections::BTreeMap;

use super::ReportGenerator;

pub const VEHICLES_REPORT: &str = "weekly_vehicles.json";

const VEHICLE_KEYS: [&str; 3] = [VEHICLE_COUNTRY, VEHICLE_BRAND, VEHICLE_TYPE];

/// The vehicle tags an event carried
pub type VehicleInfo = BTreeMap<String, String>;

/// Car id to its latest tags, in order of first sighting
pub type VehicleMap = IndexMap<String, VehicleInfo>;

pub fn vehicles_report() -> ReportGenerator<VehicleMap> {
    ReportGenerator::new(
        VEHICLES_REPORT,
        VehicleMap::new(),
        record_vehicle,
        render_vehicles,
    )
}

fn record_vehicle(vehicles: &mut VehicleMap, event: &Event) -> Result<Option<VehicleMap>> {
    let tags = vehicle_tags(event)?;
    let id = car_id(event, &tags);
    let info: VehicleInfo = tags
        .into_iter()
        .filter(|(key, _)| VEHICLE_KEYS.contains(&key.as_str()))
        .collect();

    // IndexMap keeps an existing key in its original slot
    vehicles.insert(id, info);
    Ok(None)
}

fn render_vehicles(vehicles: &VehicleMap) -> Result<String> {
    let list: Vec<&VehicleInfo> = vehicles.values().collect();
    Ok(serde_json::to_string(&list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::report::Report;
    use serde_json::{json, Value};

    fn event(user: &str, tags: &[(&str, &str)]) -> Event {
        let tags: Vec<_> = tags
            .iter()
            .map(|(k, v)| json!({"key": k, "value": v}))
            .collect();
        serde_json::from_value(json!({
            "dateCreated": "2026-10-17",
            "user": {"id": user},
            "tags": tags,
        }))
        .unwrap()
    }

    fn rendered(report: &impl Report) -> Value {
        serde_json::from_str(&report.output().unwrap()).unwrap()
    }

    #[test]
    fn test_keeps_only_vehicle_tags() {
        let mut report = vehicles_report();
        report
            .reduce(&event(
                "u1",
                &[
                    ("vehicle_type", "F56"),
                    ("hmi_type", "MINI ID5"),
                    ("vehicle_country", "DE"),
                    ("port", "4007"),
                ],
            ))
            .unwrap();

        assert_eq!(
            rendered(&report),
            json!([{"vehicle_brand": "MINI", "vehicle_country": "DE", "vehicle_type": "F56"}])
        );
    }

    #[test]
    fn test_recurring_car_replaces_value_in_first_slot() {
        let mut report = vehicles_report();
        report
            .reduce(&event("u1", &[("vehicle_type", "F56"), ("hmi_type", "MINI ID5")]))
            .unwrap();
        report
            .reduce(&event("u2", &[("vehicle_type", "G20"), ("hmi_type", "BMW ID7")]))
            .unwrap();
        report
            .reduce(&event(
                "u1",
                &[
                    ("vehicle_type", "F56"),
                    ("hmi_type", "MINI ID5"),
                    ("vehicle_country", "NL"),
                ],
            ))
            .unwrap();

        assert_eq!(report.state().len(), 2);
        assert_eq!(
            rendered(&report),
            json!([
                {"vehicle_brand": "MINI", "vehicle_country": "NL", "vehicle_type": "F56"},
                {"vehicle_brand": "BMW", "vehicle_type": "G20"}
            ])
        );
    }

    #[test]
    fn test_same_user_different_cars_are_distinct() {
        let mut report = vehicles_report();
        report
            .reduce(&event("u1", &[("vehicle_type", "F56"), ("hmi_type", "MINI ID5")]))
            .unwrap();
        report
            .reduce(&event("u1", &[("vehicle_type", "I01"), ("hmi_type", "BMW ID4")]))
            .unwrap();

        let ids: Vec<_> = report.state().keys().cloned().collect();
        assert_eq!(ids, vec!["u1-F56", "u1-I01"]);
    }

    #[test]
    fn test_missing_hmi_type_fails_reduce() {
        let mut report = vehicles_report();
        let err = report
            .reduce(&event("u1", &[("vehicle_type", "F56")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingTag { key: "hmi_type", .. }));
        assert!(report.state().is_empty());
    }

    #[test]
    fn test_empty_report_renders_empty_array() {
        assert_eq!(vehicles_report().output().unwrap(), "[]");
    }
}
