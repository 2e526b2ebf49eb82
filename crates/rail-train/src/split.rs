//! Splitting a train into two.
//!
//! A train whose type is a composition of elements can be divided after
//! element `k`: the first `k` elements keep the train's identity, the rest
//! become a new train one metre behind.  Both halves must correspond to a
//! registered train type.

use log::info;

use rail_core::{DurationProba, TrainId};
use rail_stock::{TrainType, TrainTypeRegistry};

use crate::{Train, TrainContext, TrainError, TrainEvent, TrainRecord, TrainResult, TrainStatus};

/// Gap (m) between the two halves of a split train.
pub const SPLIT_GAP: f64 = 1.0;

/// Types of the two halves of a split.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitPlan {
    pub head_type: TrainType,
    pub tail_type: TrainType,
}

/// Resolve the types of both halves of `train_type` split after element
/// `index`.
pub fn plan_split(
    types:      &TrainTypeRegistry,
    train_type: &TrainType,
    index:      usize,
) -> TrainResult<SplitPlan> {
    let elements = &train_type.elements;
    if index == 0 || index >= elements.len() {
        return Err(TrainError::SplitIndexOutOfRange { index, elements: elements.len() });
    }
    let (head, tail) = elements.split_at(index);
    let find = |group: &[String]| {
        types
            .find_for_elements(group)
            .cloned()
            .ok_or_else(|| TrainError::NoMatchingType { elements: group.to_vec() })
    };
    Ok(SplitPlan { head_type: find(head)?, tail_type: find(tail)? })
}

impl Train {
    /// Fail unless the train is stopped and has at least two elements.
    pub fn check_splittable(&self) -> TrainResult<()> {
        if self.speed != 0.0 {
            return Err(TrainError::NotStopped(self.id));
        }
        if self.train_type.element_count() < 2 {
            return Err(TrainError::NotSplittable(self.id));
        }
        Ok(())
    }

    /// Split after element `index`, returning the new rear train with id
    /// `new_id`.
    ///
    /// The rear train is inactive and held until a service is assigned to
    /// it.  Nothing is changed if the split is refused.
    pub fn split(&mut self, index: usize, new_id: TrainId, ctx: &mut TrainContext<'_>) -> TrainResult<Train> {
        self.check_splittable()?;
        let plan = plan_split(ctx.types, &self.train_type, index)?;

        let record = TrainRecord {
            service_code:     None,
            train_type_code:  plan.tail_type.code.clone(),
            status:           TrainStatus::Inactive,
            speed:            0.0,
            initial_speed:    0.0,
            train_head:       self.head.retreated(ctx.network, plan.head_type.length + SPLIT_GAP),
            appear_time:      ctx.now,
            initial_delay:    DurationProba::fixed(0.0),
            next_place_index: None,
            stopped_time:     1.0,
        };
        let mut rear = record.into_train(new_id, ctx)?;
        rear.held = true;

        info!(
            "{} split after element {index}: {} + {} ({})",
            self.id, plan.head_type.code, plan.tail_type.code, new_id
        );
        self.train_type = plan.head_type;
        ctx.network.release_train(self.id);
        self.draw_train(0.0, ctx);
        rear.draw_train(0.0, ctx);
        ctx.emit(TrainEvent::ReassignServiceRequested { train: new_id });
        Ok(rear)
    }
}
