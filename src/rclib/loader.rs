use crate::rclib::{Layout, LayoutParser, LoadError, RoomEntry, RoomSet, RoomTableParser};
use std::{collections::HashSet, path::Path};

/// Joins table rows to their floor coordinates by room id.
/// Output order follows the table. Layout rooms missing from the table are skipped.
/// A room listed twice is kept twice and warned about.
pub fn align_rooms(entries: Vec<RoomEntry>, layout: &Layout) -> Result<RoomSet, LoadError> {
    if entries.is_empty() {
        return Err(LoadError::Rooms(crate::rclib::ClusterError::EmptyInput));
    }

    let mut ids = Vec::with_capacity(entries.len());
    let mut acuity = Vec::with_capacity(entries.len());
    let mut coords = Vec::with_capacity(entries.len());
    let mut discharge = Vec::with_capacity(entries.len());
    let mut distinct = HashSet::with_capacity(entries.len());
    for entry in entries {
        let coord = *layout
            .get(&entry.room)
            .ok_or_else(|| LoadError::UnknownRoom(entry.room.clone()))?;
        acuity.push(entry.acuity);
        coords.push(coord);
        discharge.push(entry.discharge);
        if !distinct.insert(entry.room.clone()) {
            warn!("room '{}' appears more than once in the table", entry.room);
        }
        ids.push(entry.room);
    }

    let unused = layout.len().saturating_sub(distinct.len());
    if unused > 0 {
        debug!("{} layout rooms have no table entry", unused);
    }

    Ok(RoomSet::new(acuity, coords, discharge)?.with_ids(ids)?)
}

/// Read the room table and floor layout and align them
pub fn load_rooms(table: &Path, layout: &Path) -> Result<RoomSet, LoadError> {
    let entries = RoomTableParser::new(table).parse()?;
    let layout = LayoutParser::new(layout).parse()?;
    align_rooms(entries, &layout)
}
