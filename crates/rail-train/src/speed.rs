//! Braking-curve speed targets.
//!
//! Every constraint ahead of a train (signal, station, speed limit, train
//! ahead) is turned into a speed the train may run at now so that it can
//! still reach the constraint's speed by the constraint's distance using
//! standard braking `b`:
//!
//! ```text
//! v(d) = min(v_max, sqrt(|2·d·b| + v_target²))
//! ```
//!
//! The commanded speed is the minimum over all constraints, reached by one
//! acceleration clamped to `[-emergency braking, standard acceleration]`.

/// One speed requirement on the road ahead.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Constraint {
    /// Nothing ahead; run at the maximum speed.
    Unconstrained,
    /// Hold `speed` now, irrespective of distance.
    Hold { speed: f64 },
    /// Be at `speed` after `distance` metres.
    Approach { distance: f64, speed: f64 },
}

impl Constraint {
    /// [`Approach`](Self::Approach) if `distance` is known, otherwise
    /// [`Unconstrained`](Self::Unconstrained).
    pub fn approach(distance: Option<f64>, speed: f64) -> Self {
        match distance {
            Some(distance) => Constraint::Approach { distance, speed },
            None => Constraint::Unconstrained,
        }
    }
}

/// The kinematic state a target speed is computed against.
#[derive(Copy, Clone, Debug)]
pub struct SpeedController {
    /// Lower of the train type's and the current item's maximum speed.
    pub max_speed:   f64,
    pub std_braking: f64,
    /// Current speed.
    pub speed:       f64,
    /// Tick length in seconds.
    pub dt:          f64,
}

impl SpeedController {
    /// Highest speed from which `target` can be reached within `distance`.
    pub fn calculated_speed(&self, distance: f64, target: f64) -> f64 {
        ((2.0 * distance * self.std_braking).abs() + target * target)
            .sqrt()
            .min(self.max_speed)
    }

    /// Speed to aim for this tick under `constraint`.
    ///
    /// The distance is shortened by half the distance covered during the
    /// tick, at the current speed when slowing and at the theoretical speed
    /// when accelerating.
    pub fn target_speed(&self, constraint: Constraint) -> f64 {
        match constraint {
            Constraint::Unconstrained => self.max_speed,
            Constraint::Hold { speed } => speed,
            Constraint::Approach { distance, speed: target } => {
                if distance < 0.5 * self.std_braking * self.dt * self.dt {
                    return target;
                }
                let theoretical = self.calculated_speed(distance, target);
                let reference = if theoretical < self.speed { self.speed } else { theoretical };
                self.calculated_speed(distance - reference * self.dt / 2.0, target)
            }
        }
    }

    /// Distance over which an ASAP action's `target` is reached when braking
    /// from the current speed starting this tick.
    pub fn asap_distance(&self, target: f64) -> f64 {
        let after_tick = self.speed - self.std_braking * self.dt;
        (after_tick * after_tick - target * target) / (2.0 * self.std_braking)
            + self.speed * self.dt / 2.0
    }

    /// Acceleration towards `target`, clamped to the train's capabilities.
    pub fn acceleration(&self, target: f64, std_accel: f64, emerg_braking: f64) -> f64 {
        ((target - self.speed) / self.dt).clamp(-emerg_braking, std_accel)
    }
}
