//! JSON session files: the simulation time plus every train's record.
//!
//! ```json
//! { "time": "06:12:00",
//!   "trains": [ { "type": "Train", "serviceCode": "S1", ... } ] }
//! ```
//!
//! Trains are listed in id order, so loading a session and handing its
//! records to `SimBuilder::trains` restores the same ids.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use rail_core::SimTime;
use rail_train::TrainRecord;

use crate::OutputResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub time:   SimTime,
    #[serde(default)]
    pub trains: Vec<TrainRecord>,
}

/// Write a session to `path`, replacing any existing file.
pub fn save_session(path: &Path, time: SimTime, trains: &[TrainRecord]) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_session(&mut out, time, trains)?;
    out.flush()?;
    Ok(())
}

/// Like [`save_session`] but accepts any `Write` sink.
pub fn write_session<W: Write>(writer: W, time: SimTime, trains: &[TrainRecord]) -> OutputResult<()> {
    #[derive(Serialize)]
    struct SessionRef<'a> {
        time:   SimTime,
        trains: &'a [TrainRecord],
    }
    serde_json::to_writer_pretty(writer, &SessionRef { time, trains })?;
    Ok(())
}

pub fn load_session(path: &Path) -> OutputResult<Session> {
    read_session(BufReader::new(File::open(path)?))
}

/// Like [`load_session`] but accepts any `Read` source.
pub fn read_session<R: Read>(reader: R) -> OutputResult<Session> {
    Ok(serde_json::from_reader(reader)?)
}
