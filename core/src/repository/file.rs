use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

use crate::config::default_data_dir;
use crate::model::task::{OwnerId, Task};
use crate::repository::traits::TaskRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// All owners' tasks in one pretty-printed JSON array, rewritten on every change.
#[derive(Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        let repo = FileTaskRepository { file_path: path };
        if !repo.file_path.exists() {
            repo.write_tasks(&[])?;
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.read_tasks()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(anyhow!("Task with ID {} already exists", task.id));
        }
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn get(&self, owner: &OwnerId, id: &Uuid) -> Result<Option<Task>> {
        Ok(self
            .read_tasks()?
            .into_iter()
            .find(|t| t.id == *id && t.owner == *owner))
    }

    fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Task>> {
        let mut tasks = self.read_tasks()?;
        tasks.retain(|t| t.owner == *owner);
        Ok(tasks)
    }

    fn owners(&self) -> Result<Vec<OwnerId>> {
        let owners: BTreeSet<OwnerId> = self.read_tasks()?.into_iter().map(|t| t.owner).collect();
        Ok(owners.into_iter().collect())
    }

    fn update(&self, task: &Task) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        if let Some(pos) = tasks.iter().position(|t| t.id == task.id && t.owner == task.owner) {
            tasks[pos] = task.clone();
            self.write_tasks(&tasks)?;
            Ok(())
        } else {
            Err(anyhow!("Task with ID {} not found", task.id))
        }
    }

    fn delete(&self, owner: &OwnerId, id: &Uuid) -> Result<bool> {
        let mut tasks = self.read_tasks()?;
        let initial_len = tasks.len();
        tasks.retain(|t| !(t.id == *id && t.owner == *owner));

        if tasks.len() == initial_len {
            return Ok(false);
        }

        self.write_tasks(&tasks)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn repo_in(dir: &Path) -> FileTaskRepository {
        FileTaskRepository::new(Some(dir.to_path_buf())).unwrap()
    }

    #[test]
    fn test_new_initialises_empty_file() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path());
        assert!(repo.path().exists());
        assert_eq!(fs::read_to_string(repo.path()).unwrap().trim(), "[]");
        assert!(repo.owners().unwrap().is_empty());
    }

    #[test]
    fn test_tasks_are_scoped_by_owner() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path());
        let alice = OwnerId::new("alice");
        let bob = OwnerId::new("bob");

        let first = repo.create(Task::new(alice.clone(), "Buy milk".to_string())).unwrap();
        let second = repo.create(Task::new(bob.clone(), "Fix bike".to_string())).unwrap();
        repo.create(Task::new(alice.clone(), "Call mom".to_string())).unwrap();

        let titles: Vec<String> = repo.list_by_owner(&alice).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Buy milk", "Call mom"]);

        assert!(repo.get(&alice, &first.id).unwrap().is_some());
        assert!(repo.get(&alice, &second.id).unwrap().is_none());
        assert_eq!(repo.owners().unwrap(), vec![alice.clone(), bob.clone()]);

        // someone else's id is not found
        assert!(!repo.delete(&alice, &second.id).unwrap());
        assert!(repo.delete(&bob, &second.id).unwrap());
        assert_eq!(repo.owners().unwrap(), vec![alice]);
    }

    #[test]
    fn test_update_persists_and_rejects_unknown() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path());
        let owner = OwnerId::new("alice");

        let mut task = repo.create(Task::new(owner.clone(), "Draft".to_string())).unwrap();
        task.completed = true;
        repo.update(&task).unwrap();

        // a fresh handle reads what the first one wrote
        let reopened = repo_in(dir.path());
        let stored = reopened.get(&owner, &task.id).unwrap().unwrap();
        assert!(stored.completed);
        assert_eq!(stored.created_on(), task.created_on());

        let stranger = Task::new(owner, "Never saved".to_string());
        assert!(repo.update(&stranger).is_err());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path());
        fs::write(repo.path(), "not json").unwrap();
        let err = repo.list_by_owner(&OwnerId::new("alice")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
