use crate::errors::{MoveDataError, MoveDataResult};
use schema::{Move, MoveData};
use std::collections::HashMap;
use std::sync::LazyLock;

const MOVES_RON: &str = include_str!("../data/moves.ron");

// Global move data storage - parsed once, on first lookup
static MOVE_DATA: LazyLock<MoveDataResult<HashMap<Move, MoveData>>> =
    LazyLock::new(|| parse_move_table(MOVES_RON));

/// Parse a RON list of move records into a lookup table.
pub fn parse_move_table(source: &str) -> MoveDataResult<HashMap<Move, MoveData>> {
    let records: Vec<MoveData> =
        ron::from_str(source).map_err(|err| MoveDataError::MalformedData(err.to_string()))?;

    let mut table = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(previous) = table.insert(record.id, record) {
            return Err(MoveDataError::MalformedData(format!(
                "duplicate entry for {:?}",
                previous.id
            )));
        }
    }
    Ok(table)
}

/// Get move data for a specific move from the global store
pub fn get_move_data(move_: Move) -> MoveDataResult<&'static MoveData> {
    let table = MOVE_DATA.as_ref().map_err(Clone::clone)?;
    table.get(&move_).ok_or(MoveDataError::MoveNotFound(move_))
}

/// Get max PP for a specific move
pub fn get_move_max_pp(move_: Move) -> MoveDataResult<u8> {
    get_move_data(move_).map(|data| data.max_pp)
}
