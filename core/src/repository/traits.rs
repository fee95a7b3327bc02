use crate::model::task::{OwnerId, Task};
use anyhow::Result;
use uuid::Uuid;

/// Owner-scoped task storage. A task that belongs to someone else behaves as absent.
pub trait TaskRepository {
    fn create(&self, task: Task) -> Result<Task>;
    fn get(&self, owner: &OwnerId, id: &Uuid) -> Result<Option<Task>>;
    /// In insertion order.
    fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Task>>;
    /// Every owner with at least one stored task, each listed once.
    fn owners(&self) -> Result<Vec<OwnerId>>;
    fn update(&self, task: &Task) -> Result<()>;
    /// `Ok(false)` when nothing matched.
    fn delete(&self, owner: &OwnerId, id: &Uuid) -> Result<bool>;
}
