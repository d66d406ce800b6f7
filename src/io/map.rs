//! The variable map of an encoding, persisted as JSON.
//!
//! A formula written to DIMACS carries no names, and so the map is saved alongside it in order to decode a model returned by some external solver.
//! Only declarations are stored, as the ids of a map are a function of its declarations:
//!
//! ```json
//! {
//!   "version": 1,
//!   "horizon": 4,
//!   "var_count": 54,
//!   "facts": ["at(ball,A)", "at(ball,B)", "..."],
//!   "actions": ["pick-up(ball,A)", "..."]
//! }
//! ```
//!
//! Reading a record replays the declarations, and the variable count is checked against the count of the replayed map.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::{
    db::variable_map::{Allocator, VariableMap},
    types::err::{self, ErrorKind},
};

/// The version of the record written.
pub const MAP_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRecord {
    pub version: u32,
    pub horizon: usize,
    pub var_count: usize,
    pub facts: Vec<String>,
    pub actions: Vec<String>,
}

impl MapRecord {
    pub fn from_map(map: &VariableMap) -> Self {
        MapRecord {
            version: MAP_VERSION,
            horizon: map.horizon(),
            var_count: map.var_count(),
            facts: map.fact_names().to_vec(),
            actions: map.action_identifiers().to_vec(),
        }
    }

    /// Replays the declarations of the record.
    pub fn into_map(self) -> Result<VariableMap, ErrorKind> {
        if self.version != MAP_VERSION {
            return Err(err::ParseError::MapVersion(self.version).into());
        }

        let schema = |msg: String| ErrorKind::from(err::ParseError::MapSchema(msg));

        let mut allocator = Allocator::new();
        allocator
            .declare_facts(&self.facts, self.horizon)
            .map_err(|e| schema(e.to_string()))?;
        allocator
            .declare_actions(&self.actions, self.horizon)
            .map_err(|e| schema(e.to_string()))?;
        let map = allocator.finish();

        if map.fact_count() != self.facts.len() || map.action_count() != self.actions.len() {
            return Err(schema("repeated fact or action".to_string()));
        }

        if map.var_count() != self.var_count {
            return Err(schema(format!(
                "{} variables recorded, {} declared",
                self.var_count,
                map.var_count()
            )));
        }

        Ok(map)
    }
}

pub fn write_map(writer: impl Write, map: &VariableMap) -> Result<(), ErrorKind> {
    serde_json::to_writer_pretty(writer, &MapRecord::from_map(map))
        .map_err(|e| ErrorKind::Io(e.to_string()))
}

pub fn read_map(reader: impl Read) -> Result<VariableMap, ErrorKind> {
    let record: MapRecord = serde_json::from_reader(reader)
        .map_err(|e| ErrorKind::from(err::ParseError::MapSchema(e.to_string())))?;
    record.into_map()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MapRecord {
        MapRecord {
            version: MAP_VERSION,
            horizon: 2,
            var_count: 2 * 3 + 2,
            facts: vec!["p".to_string(), "q".to_string()],
            actions: vec!["a()".to_string()],
        }
    }

    #[test]
    fn saved_map_decodes_identically() {
        let map = record().into_map().unwrap();

        let mut buffer = Vec::default();
        write_map(&mut buffer, &map).unwrap();
        let read = read_map(buffer.as_slice()).unwrap();

        assert_eq!(read.keys().collect::<Vec<_>>(), map.keys().collect::<Vec<_>>());
        assert_eq!(read.action("a()", 1), Ok(8));
    }

    #[test]
    fn schema_violations() {
        let mut future = record();
        future.version = 2;
        assert_eq!(
            future.into_map().err(),
            Some(ErrorKind::Parse(err::ParseError::MapVersion(2)))
        );

        let mut miscounted = record();
        miscounted.var_count = 9;
        assert!(matches!(
            miscounted.into_map(),
            Err(ErrorKind::Parse(err::ParseError::MapSchema(_)))
        ));

        let mut repeated = record();
        repeated.facts.push("p".to_string());
        assert!(matches!(
            repeated.into_map(),
            Err(ErrorKind::Parse(err::ParseError::MapSchema(_)))
        ));

        assert!(matches!(
            read_map(b"{\"version\": 1}".as_slice()),
            Err(ErrorKind::Parse(err::ParseError::MapSchema(_)))
        ));
    }
}
