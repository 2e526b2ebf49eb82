//! The set of train types known to a simulation.

use std::collections::HashMap;
use std::io::Read;

use crate::{StockError, StockResult, TrainType};

/// Validated, immutable train-type table.
///
/// Iteration order is registration order, so lookups by element group are
/// deterministic.
#[derive(Clone, Debug, Default)]
pub struct TrainTypeRegistry {
    types: Vec<TrainType>,
    index: HashMap<String, usize>,
}

impl TrainTypeRegistry {
    pub fn get(&self, code: &str) -> Option<&TrainType> {
        self.index.get(code).map(|&i| &self.types[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrainType> {
        self.types.iter()
    }

    /// The first registered type matching the element group `group`.
    pub fn find_for_elements(&self, group: &[String]) -> Option<&TrainType> {
        self.types.iter().find(|t| t.matches_elements(group))
    }

    /// Load a JSON array of train types.
    pub fn from_json_reader<R: Read>(reader: R) -> StockResult<Self> {
        let types: Vec<TrainType> = serde_json::from_reader(reader)?;
        types.into_iter().fold(TrainTypeRegistryBuilder::new(), |b, t| b.add(t)).build()
    }
}

// ── TrainTypeRegistryBuilder ──────────────────────────────────────────────────

/// Collect train types, then validate them all in [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rail_stock::{TrainType, TrainTypeRegistryBuilder};
///
/// let registry = TrainTypeRegistryBuilder::new()
///     .add(TrainType::new("LOCO", 20.0, 40.0, 0.5, 0.5, 1.5))
///     .add(TrainType::new("COACH", 25.0, 45.0, 0.5, 0.5, 1.5))
///     .add_composite("EXP", "Express", &["LOCO", "COACH", "COACH"])
///     .build()
///     .unwrap();
/// assert_eq!(registry.get("EXP").unwrap().length, 70.0);
/// ```
#[derive(Default)]
pub struct TrainTypeRegistryBuilder {
    types:      Vec<TrainType>,
    composites: Vec<(String, String, Vec<String>)>,
}

impl TrainTypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fully specified type.
    pub fn add(mut self, train_type: TrainType) -> Self {
        self.types.push(train_type);
        self
    }

    /// Register a composition whose characteristics are derived from its
    /// elements: lengths add up, every other limit is the weakest element's.
    pub fn add_composite(mut self, code: &str, description: &str, elements: &[&str]) -> Self {
        self.composites.push((
            code.to_owned(),
            description.to_owned(),
            elements.iter().map(|e| (*e).to_owned()).collect(),
        ));
        self
    }

    pub fn build(self) -> StockResult<TrainTypeRegistry> {
        let mut registry = TrainTypeRegistry::default();
        for train_type in self.types {
            insert(&mut registry, train_type)?;
        }
        for (code, description, elements) in self.composites {
            let derived = derive_composite(&registry, &code, &description, elements)?;
            insert(&mut registry, derived)?;
        }
        for train_type in &registry.types {
            for element in &train_type.elements {
                if !registry.contains(element) {
                    return Err(StockError::UnknownElement {
                        type_code: train_type.code.clone(),
                        element:   element.clone(),
                    });
                }
            }
        }
        Ok(registry)
    }
}

fn insert(registry: &mut TrainTypeRegistry, train_type: TrainType) -> StockResult<()> {
    train_type.validate()?;
    if registry.index.contains_key(&train_type.code) {
        return Err(StockError::DuplicateType(train_type.code));
    }
    registry.index.insert(train_type.code.clone(), registry.types.len());
    registry.types.push(train_type);
    Ok(())
}

fn derive_composite(
    registry:    &TrainTypeRegistry,
    code:        &str,
    description: &str,
    elements:    Vec<String>,
) -> StockResult<TrainType> {
    let mut parts = Vec::with_capacity(elements.len());
    for element in &elements {
        let part = registry.get(element).ok_or_else(|| StockError::UnknownElement {
            type_code: code.to_owned(),
            element:   element.clone(),
        })?;
        parts.push(part);
    }
    let weakest = |f: fn(&TrainType) -> f64| parts.iter().map(|t| f(t)).fold(f64::INFINITY, f64::min);
    Ok(TrainType {
        code:          code.to_owned(),
        description:   description.to_owned(),
        length:        parts.iter().map(|t| t.length).sum(),
        max_speed:     weakest(|t| t.max_speed),
        std_accel:     weakest(|t| t.std_accel),
        std_braking:   weakest(|t| t.std_braking),
        emerg_braking: weakest(|t| t.emerg_braking),
        elements,
    })
}
