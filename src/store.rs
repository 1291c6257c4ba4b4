//! Entity model and the store seam the resolver looks entities up through.

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of entity a work log holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Job,
    Task,
    Note,
    Company,
    Record,
}

impl EntityKind {
    /// Map a normalized species name (`Job`, `Task`, ...) to its kind.
    pub fn from_species(species: &str) -> Option<Self> {
        match species {
            "Job" => Some(EntityKind::Job),
            "Task" => Some(EntityKind::Task),
            "Note" => Some(EntityKind::Note),
            "Company" => Some(EntityKind::Company),
            "Record" => Some(EntityKind::Record),
            _ => None,
        }
    }

    pub fn species(&self) -> &'static str {
        match self {
            EntityKind::Job => "Job",
            EntityKind::Task => "Task",
            EntityKind::Note => "Note",
            EntityKind::Company => "Company",
            EntityKind::Record => "Record",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.species())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub company_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub job_id: i64,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub job_id: i64,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

/// A block of time logged against a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub job_id: i64,
    pub message: String,
    pub minutes: u32,
}

/// A handle to one matched entity, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    Job(Job),
    Task(Task),
    Note(Note),
    Company(Company),
    Record(Record),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Job(_) => EntityKind::Job,
            Entity::Task(_) => EntityKind::Task,
            Entity::Note(_) => EntityKind::Note,
            Entity::Company(_) => EntityKind::Company,
            Entity::Record(_) => EntityKind::Record,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Entity::Job(job) => job.id,
            Entity::Task(task) => task.id,
            Entity::Note(note) => note.id,
            Entity::Company(company) => company.id,
            Entity::Record(record) => record.id,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Job(job) => write!(f, "Job #{} {}", job.id, job.title),
            Entity::Task(task) => {
                let mark = if task.completed { "x" } else { " " };
                write!(f, "Task #{} [{}] {} (job #{})", task.id, mark, task.content, task.job_id)
            }
            Entity::Note(note) => write!(f, "Note #{} {} (job #{})", note.id, note.body, note.job_id),
            Entity::Company(company) => write!(f, "Company #{} {}", company.id, company.name),
            Entity::Record(record) => write!(
                f,
                "Record #{} {}m {} (job #{})",
                record.id, record.minutes, record.message, record.job_id
            ),
        }
    }
}

/// The lookup capability the host application provides.
///
/// Implementations must be read-only; errors are handed back to the caller of
/// the resolver untouched.
pub trait EntityStore {
    type Error: std::error::Error;

    fn find_by_id(&self, kind: EntityKind, id: i64) -> Result<Option<Entity>, Self::Error>;
}

#[derive(Debug, Error)]
pub enum StoreLoadError {
    #[error("cannot read work log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse work log {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An in-memory work log, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| StoreLoadError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// A small work log for trying the search prompt without a file.
    pub fn sample() -> Self {
        Self {
            jobs: vec![
                Job { id: 412, title: "Website relaunch".to_string(), company_id: Some(1) },
                Job { id: 413, title: "Quarterly report".to_string(), company_id: Some(2) },
            ],
            tasks: vec![
                Task { id: 1, job_id: 412, content: "Draft sitemap".to_string(), completed: true },
                Task { id: 2, job_id: 412, content: "Review copy".to_string(), completed: false },
            ],
            notes: vec![Note {
                id: 1,
                job_id: 413,
                body: "Numbers are due Friday".to_string(),
            }],
            companies: vec![
                Company { id: 1, name: "Acme".to_string() },
                Company { id: 2, name: "Globex".to_string() },
            ],
            records: vec![Record {
                id: 1,
                job_id: 412,
                message: "Kickoff call".to_string(),
                minutes: 45,
            }],
        }
    }
}

impl EntityStore for MemoryStore {
    type Error = Infallible;

    fn find_by_id(&self, kind: EntityKind, id: i64) -> Result<Option<Entity>, Self::Error> {
        let found = match kind {
            EntityKind::Job => self.jobs.iter().find(|j| j.id == id).cloned().map(Entity::Job),
            EntityKind::Task => self.tasks.iter().find(|t| t.id == id).cloned().map(Entity::Task),
            EntityKind::Note => self.notes.iter().find(|n| n.id == id).cloned().map(Entity::Note),
            EntityKind::Company => self
                .companies
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .map(Entity::Company),
            EntityKind::Record => self
                .records
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Entity::Record),
        };
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_store_lookup() {
        let store = MemoryStore::sample();

        let job = store.find_by_id(EntityKind::Job, 412).unwrap().unwrap();
        assert_eq!(job.kind(), EntityKind::Job);
        assert_eq!(job.id(), 412);

        assert_eq!(store.find_by_id(EntityKind::Job, 999).unwrap(), None);
        // ids are per kind
        assert_eq!(store.find_by_id(EntityKind::Note, 412).unwrap(), None);
    }

    #[test]
    fn test_species_mapping() {
        for kind in [
            EntityKind::Job,
            EntityKind::Task,
            EntityKind::Note,
            EntityKind::Company,
            EntityKind::Record,
        ] {
            assert_eq!(EntityKind::from_species(kind.species()), Some(kind));
        }
        assert_eq!(EntityKind::from_species("job"), None);
        assert_eq!(EntityKind::from_species("Invoice"), None);
    }

    #[test]
    fn test_load_partial_json() {
        let store = MemoryStore::from_json_str(
            r#"{ "jobs": [ { "id": 7, "title": "Audit" } ] }"#,
        )
        .unwrap();
        assert_eq!(store.jobs.len(), 1);
        assert_eq!(store.jobs[0].company_id, None);
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_load_json_file() {
        let temp_file = "test_worklog_store.json";
        let mut file = fs::File::create(temp_file).unwrap();
        writeln!(
            file,
            r#"{{ "companies": [ {{ "id": 3, "name": "Initech" }} ] }}"#
        )
        .unwrap();

        let store = MemoryStore::from_json_file(temp_file).unwrap();
        let company = store.find_by_id(EntityKind::Company, 3).unwrap().unwrap();
        assert_eq!(company.to_string(), "Company #3 Initech");

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            MemoryStore::from_json_file("non_existent_worklog.json"),
            Err(StoreLoadError::Io { .. })
        ));

        let temp_file = "test_invalid_worklog.json";
        fs::write(temp_file, "{ not json").unwrap();
        assert!(matches!(
            MemoryStore::from_json_file(temp_file),
            Err(StoreLoadError::Json { .. })
        ));
        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_entity_serializes_with_kind_tag() {
        let entity = Entity::Job(Job { id: 1, title: "A".to_string(), company_id: None });
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["kind"], "Job");
        assert_eq!(json["id"], 1);
    }
}
