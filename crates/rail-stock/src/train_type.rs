//! Static rolling-stock characteristics.

use serde::{Deserialize, Serialize};

use crate::{StockError, StockResult};

/// One kind of rolling stock.  Speeds are in m/s, rates in m/s², and
/// lengths in metres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainType {
    pub code:          String,
    #[serde(default)]
    pub description:   String,
    pub length:        f64,
    pub max_speed:     f64,
    pub std_accel:     f64,
    pub std_braking:   f64,
    pub emerg_braking: f64,
    /// Codes of the types this one is composed of, head first.  Empty for a
    /// single vehicle.
    #[serde(default)]
    pub elements:      Vec<String>,
}

impl TrainType {
    /// A single vehicle type.
    pub fn new(
        code:          &str,
        length:        f64,
        max_speed:     f64,
        std_accel:     f64,
        std_braking:   f64,
        emerg_braking: f64,
    ) -> Self {
        Self {
            code: code.to_owned(),
            description: String::new(),
            length,
            max_speed,
            std_accel,
            std_braking,
            emerg_braking,
            elements: Vec::new(),
        }
    }

    /// Number of splittable elements.  A single vehicle counts as one.
    pub fn element_count(&self) -> usize {
        self.elements.len().max(1)
    }

    /// `true` if this type is matched by the element group `group`: either
    /// its element list equals the group, or the group is this single type.
    pub fn matches_elements(&self, group: &[String]) -> bool {
        self.elements == group || (group.len() == 1 && group[0] == self.code)
    }

    pub(crate) fn validate(&self) -> StockResult<()> {
        let checks: [(&'static str, f64); 5] = [
            ("length", self.length),
            ("max speed", self.max_speed),
            ("standard acceleration", self.std_accel),
            ("standard braking", self.std_braking),
            ("emergency braking", self.emerg_braking),
        ];
        for (what, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(StockError::InvalidParameter { code: self.code.clone(), what, value });
            }
        }
        Ok(())
    }
}
