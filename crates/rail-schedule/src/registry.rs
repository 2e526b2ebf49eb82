//! Services keyed by code.

use std::collections::BTreeMap;

use crate::{ScheduleError, ScheduleResult, Service};

#[derive(Clone, Debug, Default)]
pub struct ServiceRegistry {
    services: BTreeMap<String, Service>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `service`, rejecting a second service with the same code.
    pub fn insert(&mut self, service: Service) -> ScheduleResult<()> {
        if self.services.contains_key(&service.code) {
            return Err(ScheduleError::DuplicateService(service.code));
        }
        self.services.insert(service.code.clone(), service);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Service> {
        self.services.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.services.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    /// Check that every chained next service exists.
    pub fn validate(&self) -> ScheduleResult<()> {
        for service in self.services.values() {
            if let Some(next) = &service.next_service_code {
                if !self.services.contains_key(next) {
                    return Err(ScheduleError::UnknownNextService {
                        service: service.code.clone(),
                        next:    next.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<Service> for ServiceRegistry {
    /// Later services replace earlier ones with the same code.
    fn from_iter<I: IntoIterator<Item = Service>>(iter: I) -> Self {
        Self { services: iter.into_iter().map(|s| (s.code.clone(), s)).collect() }
    }
}
