//! JSON event files feeding the packer CLI.
//!
//! ```json
//! { "events": [ { "first_bx": -2, "last_bx": 2,
//!                 "crossings": [ { "bx": 0, "taus": [ { "hw_pt": 40, "hw_eta": -3, "hw_phi": 70 } ] } ] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Tau, TauBxCollection, TauPackError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossing {
    pub bx: i32,
    #[serde(default)]
    pub taus: Vec<Tau>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub first_bx: i32,
    pub last_bx: i32,
    /// Crossings not listed are empty.
    #[serde(default)]
    pub crossings: Vec<Crossing>,
}

impl EventRecord {
    /// Build the bx-indexed collection, keeping tau order within each crossing.
    pub fn to_collection(&self) -> Result<TauBxCollection, TauPackError> {
        if self.last_bx < self.first_bx {
            return Err(TauPackError::Collection(format!(
                "last_bx {} precedes first_bx {}",
                self.last_bx, self.first_bx
            )));
        }
        let mut taus = TauBxCollection::new(self.first_bx, self.last_bx);
        for crossing in &self.crossings {
            for tau in &crossing.taus {
                taus.push(crossing.bx, *tau)?;
            }
        }
        Ok(taus)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFile {
    pub events: Vec<EventRecord>,
}

impl EventFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TauPackError> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_outside_range_is_rejected() {
        let ev = EventRecord {
            first_bx: 0,
            last_bx: 0,
            crossings: vec![Crossing {
                bx: 3,
                taus: vec![Tau::new(1, 1, 1, 0, 0)],
            }],
        };
        assert!(matches!(ev.to_collection(), Err(TauPackError::Collection(_))));
    }

    #[test]
    fn parses_minimal_event() {
        let json = r#"{"events":[{"first_bx":-1,"last_bx":1,
            "crossings":[{"bx":0,"taus":[{"hw_pt":40,"hw_eta":-3,"hw_phi":70}]}]}]}"#;
        let file: EventFile = serde_json::from_str(json).unwrap();
        let taus = file.events[0].to_collection().unwrap();
        assert_eq!(taus.n_bx(), 3);
        assert_eq!(taus.bx(0), &[Tau::new(40, -3, 70, 0, 0)]);
    }
}
