//! Single eastbound line between two stations.
//!
//! ```text
//!  W end ─ 300 m ─ WST 200 m ─ S1 ─ 1200 m (15 m/s) ─ S2 ─ EST 200 m ─ 300 m "EXE" ─ E end
//!    0       1          2       3          4            5        6           7          8
//! ```
//!
//! `S1` starts at stop.  `S2` shows a caution aspect.

use rail_core::TrackItemId;
use rail_track::{SignalAspect, TrackNetwork, TrackNetworkBuilder, TrackResult};

pub const WEST_APPROACH: TrackItemId = TrackItemId(1);
pub const WEST_PLATFORM: TrackItemId = TrackItemId(2);
pub const STARTER_SIGNAL: TrackItemId = TrackItemId(3);
pub const HOME_SIGNAL: TrackItemId = TrackItemId(5);

/// Speed limit on the plain line between the stations (m/s).
const LINE_SPEED: f64 = 15.0;

/// Caution speed shown by the home signal of EST (m/s).
const CAUTION_SPEED: f64 = 8.0;

pub fn build_network() -> TrackResult<TrackNetwork> {
    let mut b = TrackNetworkBuilder::new();
    let west = b.add_end();
    let approach = b.add_line(300.0);
    let wst = b.add_platform(200.0, "WST", "1");
    let starter = b.add_signal(false);
    let main = b.add_line(1200.0);
    let home = b.add_signal(false);
    let est = b.add_platform(200.0, "EST", "1");
    let exit = b.add_line(300.0);
    let east = b.add_end();

    b.set_max_speed(main, LINE_SPEED)?;
    b.set_place(exit, "EXE")?;
    for (x, y) in [
        (west, approach),
        (approach, wst),
        (wst, starter),
        (starter, main),
        (main, home),
        (home, est),
        (est, exit),
        (exit, east),
    ] {
        b.connect(x, y)?;
    }

    let mut network = b.build()?;
    network.set_signal_aspect(home, SignalAspect::caution(CAUTION_SPEED))?;
    Ok(network)
}
