//! Service itineraries.

use rail_core::SimTime;

/// One scheduled place in a service's itinerary.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceLine {
    pub place_code:          String,
    pub track_code:          Option<String>,
    pub scheduled_arrival:   Option<SimTime>,
    /// `None` means the train holds at this place until told otherwise.
    pub scheduled_departure: Option<SimTime>,
    /// `false` for places the service passes without stopping.
    pub must_stop:           bool,
}

impl ServiceLine {
    /// A scheduled stop.
    pub fn stop(place_code: &str, arrival: Option<SimTime>, departure: Option<SimTime>) -> Self {
        Self {
            place_code:          place_code.to_owned(),
            track_code:          None,
            scheduled_arrival:   arrival,
            scheduled_departure: departure,
            must_stop:           true,
        }
    }

    /// A place the service runs through.
    pub fn pass(place_code: &str) -> Self {
        Self {
            place_code:          place_code.to_owned(),
            track_code:          None,
            scheduled_arrival:   None,
            scheduled_departure: None,
            must_stop:           false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Service {
    pub code:              String,
    pub description:       String,
    pub lines:             Vec<ServiceLine>,
    /// Service taken over once this one's itinerary is exhausted.
    pub next_service_code: Option<String>,
    /// Reverse the train when the itinerary is exhausted.
    pub auto_reverse:      bool,
}

impl Service {
    pub fn new(code: &str, lines: Vec<ServiceLine>) -> Self {
        Self {
            code:              code.to_owned(),
            description:       String::new(),
            lines,
            next_service_code: None,
            auto_reverse:      false,
        }
    }

    pub fn then(mut self, next_service_code: &str) -> Self {
        self.next_service_code = Some(next_service_code.to_owned());
        self
    }

    pub fn auto_reverse(mut self, on: bool) -> Self {
        self.auto_reverse = on;
        self
    }

    pub fn line(&self, index: usize) -> Option<&ServiceLine> {
        self.lines.get(index)
    }

    pub fn entry_place(&self) -> Option<&str> {
        self.lines.first().map(|l| l.place_code.as_str())
    }

    pub fn exit_place(&self) -> Option<&str> {
        self.lines.last().map(|l| l.place_code.as_str())
    }

    /// Index of the last line.  `None` for an empty itinerary.
    pub fn last_index(&self) -> Option<usize> {
        self.lines.len().checked_sub(1)
    }
}
