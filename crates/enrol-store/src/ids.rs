use enrol_model::RecordId;
use uuid::Uuid;

/// Upper bound on fresh-id draws per insert before giving up.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// Produces candidate record identifiers. Candidates may repeat; the table
/// rejects any it has already issued and draws again.
pub trait IdSource {
    fn next_id(&mut self) -> RecordId;
}

/// Short random ids: the first group (8 hex digits) of a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn next_id(&mut self) -> RecordId {
        let uuid = Uuid::new_v4().simple().to_string();
        RecordId::new(&uuid[..8])
    }
}

impl<F> IdSource for F
where
    F: FnMut() -> RecordId,
{
    fn next_id(&mut self) -> RecordId {
        self()
    }
}
