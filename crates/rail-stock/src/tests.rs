//! Unit tests for rail-stock.

use crate::{StockError, TrainType, TrainTypeRegistryBuilder};

fn loco() -> TrainType {
    TrainType::new("LOCO", 20.0, 40.0, 0.5, 0.6, 1.5)
}

fn coach() -> TrainType {
    TrainType::new("COACH", 25.0, 45.0, 0.8, 0.5, 1.2)
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn composite_derives_from_elements() {
        let reg = TrainTypeRegistryBuilder::new()
            .add(loco())
            .add(coach())
            .add_composite("EXP", "Express", &["LOCO", "COACH", "COACH"])
            .build()
            .unwrap();
        let exp = reg.get("EXP").unwrap();
        assert_eq!(exp.length, 70.0);
        assert_eq!(exp.max_speed, 40.0);
        assert_eq!(exp.std_accel, 0.5);
        assert_eq!(exp.std_braking, 0.5);
        assert_eq!(exp.emerg_braking, 1.2);
        assert_eq!(exp.element_count(), 3);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let err = TrainTypeRegistryBuilder::new().add(loco()).add(loco()).build();
        assert!(matches!(err, Err(StockError::DuplicateType(c)) if c == "LOCO"));
    }

    #[test]
    fn unknown_element_is_rejected() {
        let err = TrainTypeRegistryBuilder::new()
            .add(loco())
            .add_composite("PAIR", "", &["LOCO", "WAGON"])
            .build();
        assert!(matches!(err, Err(StockError::UnknownElement { .. })));
    }

    #[test]
    fn non_positive_braking_is_rejected() {
        let mut bad = loco();
        bad.std_braking = 0.0;
        let err = TrainTypeRegistryBuilder::new().add(bad).build();
        assert!(matches!(err, Err(StockError::InvalidParameter { what: "standard braking", .. })));
    }

    #[test]
    fn find_for_elements_matches_groups_and_single_types() {
        let reg = TrainTypeRegistryBuilder::new()
            .add(loco())
            .add(coach())
            .add_composite("PAIR", "", &["COACH", "COACH"])
            .build()
            .unwrap();
        let group = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(reg.find_for_elements(&group(&["LOCO"])).unwrap().code, "LOCO");
        assert_eq!(reg.find_for_elements(&group(&["COACH", "COACH"])).unwrap().code, "PAIR");
        assert!(reg.find_for_elements(&group(&["LOCO", "COACH"])).is_none());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"[
            { "code": "DMU", "length": 40, "maxSpeed": 30, "stdAccel": 0.6,
              "stdBraking": 0.5, "emergBraking": 1.4 }
        ]"#;
        let reg = crate::TrainTypeRegistry::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(reg.len(), 1);
        assert!(reg.get("DMU").unwrap().elements.is_empty());
    }
}
