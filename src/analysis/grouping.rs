/// Grouping engine: buckets classified file records by physical group.
///
/// A physical group is everything the metadata says except the centrality
/// bounds — collision system, species, charge, and value type. Each group
/// becomes one output file whose sections are the group's centrality bins,
/// with the fully inclusive 0–100% bin always first.

use crate::classify::group_label;
use crate::model::{Charge, CollisionSystem, FileRecord, Metadata, ReformError, Species, ValueType};

// ---------------------------------------------------------------------------
// Keys and groups
// ---------------------------------------------------------------------------

/// Structural identity of a physical group: `Metadata` minus centrality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub collision_system: CollisionSystem,
    pub species: Species,
    pub charge: Charge,
    pub value_type: ValueType,
}

impl GroupKey {
    pub fn of(metadata: &Metadata) -> Self {
        GroupKey {
            collision_system: metadata.collision_system,
            species: metadata.species,
            charge: metadata.charge,
            value_type: metadata.value_type,
        }
    }
}

/// All records of one physical group, ordered for output.
///
/// `label` is the shared filename prefix (name sans `_cent####.txt`) of the
/// first record seen for this key; it names the emitted output file.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: GroupKey,
    pub label: String,
    pub members: Vec<FileRecord>,
}

// ---------------------------------------------------------------------------
// Incremental accumulator
// ---------------------------------------------------------------------------

/// Accumulates records into groups one at a time.
///
/// Keys keep first-seen order so the set of emitted files is deterministic
/// for a given discovery order. `insert` rejects a record whose centrality
/// bounds collide with an existing member of its group — ambiguous data is
/// an error here, never a silent overwrite.
#[derive(Debug, Default)]
pub struct GroupSet {
    groups: Vec<Group>,
}

impl GroupSet {
    pub fn new() -> Self {
        GroupSet { groups: Vec::new() }
    }

    /// Add one record, failing with `DuplicateCentrality` on a collision.
    /// The previously inserted record is kept in that case.
    pub fn insert(&mut self, record: FileRecord) -> Result<(), ReformError> {
        let key = GroupKey::of(&record.metadata);
        let bounds = (record.metadata.centrality_low, record.metadata.centrality_high);

        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(group) => {
                let collides = group.members.iter().any(|m| {
                    (m.metadata.centrality_low, m.metadata.centrality_high) == bounds
                });
                if collides {
                    return Err(ReformError::DuplicateCentrality {
                        group: group.label.clone(),
                        low: bounds.0,
                        high: bounds.1,
                    });
                }
                group.members.push(record);
            }
            None => {
                self.groups.push(Group {
                    key,
                    label: group_label(&record.raw_name).to_string(),
                    members: vec![record],
                });
            }
        }
        Ok(())
    }

    /// Finish accumulation: sort each group's members (inclusive 0–100% bin
    /// pinned first, then ascending centrality bounds) and hand the groups
    /// back in first-seen key order.
    pub fn into_groups(mut self) -> Vec<Group> {
        for group in &mut self.groups {
            group.members.sort_by_key(|m| member_sort_key(&m.metadata));
        }
        self.groups
    }
}

/// Sort key pinning the fully inclusive sample ahead of every real bin.
/// Duplicate bounds are rejected at insert time, so ties cannot occur.
fn member_sort_key(metadata: &Metadata) -> (u8, u8) {
    if metadata.is_full_centrality() {
        (0, 0)
    } else {
        (metadata.centrality_low, metadata.centrality_high)
    }
}

/// Group a whole record sequence at once. Strict variant of `GroupSet`:
/// the first duplicate-centrality collision fails the call.
pub fn group(records: Vec<FileRecord>) -> Result<Vec<Group>, ReformError> {
    let mut set = GroupSet::new();
    for record in records {
        set.insert(record)?;
    }
    Ok(set.into_groups())
}
