//! Signal aspects and the actions they ask of drivers.

use serde::{Deserialize, Serialize};

use rail_core::TrainId;

/// Where an action's target speed must be reached.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Target {
    /// Brake (or accelerate) towards the speed immediately.
    Asap,
    /// Be at the speed when reaching this signal.
    BeforeThisSignal,
    /// Be at the speed when reaching the signal after this one.
    BeforeNextSignal,
}

/// One `(target, speed, optional wait)` instruction of an aspect.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SignalAction {
    pub target: Target,
    /// Target speed in m/s.
    pub speed:  f64,
    /// Seconds to hold `speed` before moving on to the next action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay:  Option<f64>,
}

impl SignalAction {
    /// The action a driver follows when no signal constrains it.
    pub const UNCONSTRAINED: SignalAction = SignalAction {
        target: Target::Asap,
        speed:  999.0,
        delay:  None,
    };

    pub fn new(target: Target, speed: f64) -> Self {
        Self { target, speed, delay: None }
    }

    pub fn with_delay(mut self, secs: f64) -> Self {
        self.delay = Some(secs);
        self
    }

    #[inline]
    pub fn wait_secs(&self) -> f64 {
        self.delay.unwrap_or(0.0)
    }
}

/// A named signal aspect and its ordered action list.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SignalAspect {
    pub name:    String,
    #[serde(default)]
    pub actions: Vec<SignalAction>,
}

impl SignalAspect {
    pub fn new(name: impl Into<String>, actions: Vec<SignalAction>) -> Self {
        Self { name: name.into(), actions }
    }

    /// Proceed at line speed.
    pub fn clear() -> Self {
        Self::new("CLEAR", vec![SignalAction::UNCONSTRAINED])
    }

    /// Stop before the signal.
    pub fn stop() -> Self {
        Self::new("STOP", vec![SignalAction::new(Target::BeforeThisSignal, 0.0)])
    }

    /// Pass this signal at `speed`, then stop before the next one.
    pub fn caution(speed: f64) -> Self {
        Self::new(
            "CAUTION",
            vec![
                SignalAction::new(Target::BeforeThisSignal, speed),
                SignalAction::new(Target::BeforeNextSignal, 0.0),
            ],
        )
    }

    /// `false` for a red aspect, i.e. one whose first action is a stop
    /// before this signal.
    pub fn means_proceed(&self) -> bool {
        !matches!(
            self.actions.first(),
            Some(SignalAction { target: Target::BeforeThisSignal, speed, .. }) if *speed == 0.0
        )
    }
}

/// Mutable state of a signal item.
#[derive(Clone, PartialEq, Debug)]
pub struct SignalState {
    /// `true` if the signal faces trains running from `ends[1]` to `ends[0]`.
    pub reverse:  bool,
    pub aspect:   SignalAspect,
    /// The train approaching this signal (its berth), if any.
    pub train_id: Option<TrainId>,
}

impl SignalState {
    pub fn new(reverse: bool) -> Self {
        Self { reverse, aspect: SignalAspect::stop(), train_id: None }
    }
}
