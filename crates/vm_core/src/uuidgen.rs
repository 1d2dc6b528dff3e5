//! UUID source collaborator used for ballot provenance (`Ballot.uuid`).

use uuid::Uuid;

pub trait UuidSource: Send + Sync {
    fn new_uuid(&self) -> Uuid;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomUuidSource;

impl UuidSource for RandomUuidSource {
    fn new_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}
