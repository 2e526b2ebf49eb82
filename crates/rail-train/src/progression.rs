//! Itinerary progression and service assignment.

use log::{info, warn};

use crate::status::RUNNING_THRESHOLD;
use crate::{Train, TrainContext, TrainError, TrainEvent, TrainResult, TrainStatus};

impl Train {
    /// Move on to the next place of the itinerary.
    ///
    /// At the last place the train reverses if its service asks for it, then
    /// takes over the chained next service, if any.  Without one the
    /// itinerary is exhausted and `next_place_index` becomes `None`.
    pub fn jump_to_next_place(&mut self, ctx: &mut TrainContext<'_>) {
        self.resample_minimum_stop_time(ctx.options);
        let services = ctx.services;
        let Some(service) = self.current_service(services) else {
            self.next_place_index = None;
            return;
        };
        let Some(index) = self.next_place_index else {
            return;
        };
        if Some(index) != service.last_index() {
            self.next_place_index = Some(index + 1);
            return;
        }

        if service.auto_reverse && self.speed == 0.0 {
            if let Err(e) = self.reverse(ctx) {
                warn!("{} could not reverse at end of {}: {e}", self.id, service.code);
            }
        }
        match service.next_service_code.as_deref() {
            Some(code) => {
                if let Err(e) = self.assign_service(code, ctx) {
                    warn!("{} could not take over service {code}: {e}", self.id);
                    self.next_place_index = None;
                }
            }
            None => self.next_place_index = None,
        }
    }

    /// Assign service `code` and restart its itinerary.
    ///
    /// The status is re-derived: STOPPED if the train is halted at a
    /// scheduled place, RUNNING otherwise.  A split-off train is released.
    /// A train that has not entered yet only gets its itinerary replaced and
    /// still waits for [`activate`](Self::activate).
    pub fn assign_service(&mut self, code: &str, ctx: &mut TrainContext<'_>) -> TrainResult<()> {
        let services = ctx.services;
        let service = services
            .get(code)
            .ok_or_else(|| TrainError::UnknownService(code.to_owned()))?;
        if self.status == TrainStatus::Out {
            return Err(TrainError::NotOnNetwork(self.id));
        }

        self.service_code = Some(service.code.clone());
        self.next_place_index = (!service.lines.is_empty()).then_some(0);
        self.resample_minimum_stop_time(ctx.options);
        if self.status == TrainStatus::Inactive && !self.held {
            info!("{} will run service {}", self.id, service.code);
            return Ok(());
        }
        self.held = false;
        let halted = self.stopped_time != 0.0 && self.speed <= RUNNING_THRESHOLD;
        let status = if halted { TrainStatus::Stopped } else { TrainStatus::Running };
        self.set_status(status, ctx);
        self.draw_train(0.0, ctx);
        self.set_berth_ahead(ctx);
        info!("{} now runs service {}", self.id, service.code);
        Ok(())
    }

    /// Skip the next place when the head reaches it and the service does not
    /// stop there.
    pub(crate) fn check_non_stop_place(&mut self, place_code: &str, ctx: &mut TrainContext<'_>) {
        let passes = self
            .next_line(ctx.services)
            .is_some_and(|line| line.place_code == place_code && !line.must_stop);
        if passes {
            self.jump_to_next_place(ctx);
            ctx.emit(TrainEvent::PassedPlace { train: self.id, place_code: place_code.to_owned() });
        }
    }
}
