//! Occupation drawing and crossing side effects.
//!
//! After each move the train re-registers the stretch of every item between
//! its tail and its head, and reports items its head entered or its tail
//! left since the previous tick.

use log::info;

use crate::{Train, TrainContext, TrainEvent, TrainStatus};

impl Train {
    /// Register the items covered from tail to head and unregister those
    /// vacated during the last `advance_length` metres.
    pub fn draw_train(&self, advance_length: f64, ctx: &mut TrainContext<'_>) {
        let tail = self.tail(ctx.network);
        let old_tail = tail.retreated(ctx.network, advance_length);

        for pos in tail.positions_to(ctx.network, &self.head) {
            let item = ctx.network.item(pos.item);
            if item.is_end() {
                continue;
            }
            let length = item.real_length;
            let from = pos.offset.clamp(0.0, length);
            let to = if pos.item == self.head.item { self.head.offset.clamp(0.0, length) } else { length };
            let (from, to) = if pos.is_forward(ctx.network) {
                (from, to)
            } else {
                (length - to, length - from)
            };
            ctx.network.register_train(pos.item, self.id, from, to);
        }

        for item in old_tail.items_to(ctx.network, &tail) {
            if item != tail.item {
                ctx.network.unregister_train(item, self.id);
            }
        }
    }

    /// Side effects of the last `advance_length` metres of travel.
    pub fn execute_actions(&mut self, advance_length: f64, ctx: &mut TrainContext<'_>) {
        let old_head = self.head.retreated(ctx.network, advance_length);
        let crossed = old_head.positions_to(ctx.network, &self.head);
        let mut passed_signal = false;

        for (i, pos) in crossed.iter().enumerate() {
            let place = ctx.network.item(pos.item).place_code().map(str::to_owned);
            if let Some(place) = place {
                self.check_non_stop_place(&place, ctx);
            }
            let newly_entered = i > 0 || advance_length == 0.0;
            if self.is_active() && newly_entered {
                passed_signal |= i > 0 && ctx.network.is_signal_facing(pos);
                ctx.network.train_head_enters(pos.item, self.id);
            }
        }
        if passed_signal {
            self.set_berth_ahead(ctx);
        }

        let exiting = self.head.is_exiting(ctx.network);
        let tail = self.tail(ctx.network);
        let old_tail = tail.retreated(ctx.network, advance_length);
        if self.is_active() {
            for item in old_tail.items_to(ctx.network, &tail) {
                if item != tail.item {
                    ctx.network.train_tail_leaves(item, self.id);
                }
            }
        }

        if exiting && tail.is_exiting(ctx.network) && self.status != TrainStatus::Out {
            self.set_status(TrainStatus::Out, ctx);
            ctx.network.release_train(self.id);
            ctx.emit(TrainEvent::ExitedArea { train: self.id });
            info!("{} exited the area", self.id);
        }
    }

    /// Re-register a train loaded while on the network: its occupation and
    /// the berth of the signal ahead.
    pub fn restore(&self, ctx: &mut TrainContext<'_>) {
        if self.status.is_on_scenery() {
            self.draw_train(0.0, ctx);
            self.set_berth_ahead(ctx);
        }
    }
}
