//! Display strings for places and other part-composed records.
//!
//! # Responsibility
//! - Render a place from its place parts, and a characteristic from its
//!   characteristic parts.
//! - Order the roles of a group type.
//!
//! # Invariants
//! - Parts are read in storage order and then ordered by sequence number per
//!   the owner's `SortOrder`; `SortOrder::None` keeps storage order.

use crate::model::conclusions::{
    Characteristic, CharacteristicPart, GroupType, GroupTypeRole, Place, PlacePart,
};
use crate::model::{join_part_names, order_by_sequence, RecordId};
use crate::repo::record_repo::{Record, RecordRepository, RepoError, RepoResult};

/// Read-only rendering service for part-composed records.
pub struct PlaceService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> PlaceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Renders a place as its part names joined by `", "`.
    ///
    /// A place without parts renders as an empty string.
    pub fn display_name(&self, place_id: RecordId) -> RepoResult<String> {
        let place: Place = self.require(place_id)?;
        let parts = self.repo.list_by::<PlacePart>("place_id", place_id)?;
        Ok(join_part_names(place.sort_order, parts))
    }

    /// Renders a characteristic the same way a place is rendered.
    pub fn characteristic_display(&self, characteristic_id: RecordId) -> RepoResult<String> {
        let characteristic: Characteristic = self.require(characteristic_id)?;
        let parts = self
            .repo
            .list_by::<CharacteristicPart>("characteristic_id", characteristic_id)?;
        Ok(join_part_names(characteristic.sort_order, parts))
    }

    /// Roles of a group type in the group type's sort order.
    pub fn group_type_roles(&self, group_type_id: RecordId) -> RepoResult<Vec<GroupTypeRole>> {
        let group_type: GroupType = self.require(group_type_id)?;
        let mut roles = self
            .repo
            .list_by::<GroupTypeRole>("group_type_id", group_type_id)?;
        order_by_sequence(group_type.sort_order, &mut roles);
        Ok(roles)
    }

    fn require<T: Record>(&self, id: RecordId) -> RepoResult<T> {
        self.repo.get(id)?.ok_or(RepoError::NotFound {
            entity: T::ENTITY,
            id,
        })
    }
}
