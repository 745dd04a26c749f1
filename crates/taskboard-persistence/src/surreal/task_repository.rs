//! SurrealDB Task Repository Implementation

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};
use tracing::debug;

use taskboard_domain::{
    DomainResult, Priority, Task, TaskChanges, TaskDraft, TaskFilter, TaskId, TaskRepository,
};

use super::connection::{SharedConnection, SurrealClient};
use crate::error::PersistenceError;

/// SurrealDB table name for tasks
const TABLE_NAME: &str = "tasks";

/// Serializable task record for SurrealDB
///
/// Timestamps are kept as microseconds so `ORDER BY` compares numbers.
/// `seq` is the insertion order and breaks ties between equal `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskRecord {
    task_id: String,
    title: String,
    description: Option<String>,
    completed: bool,
    priority: String,
    due_date: Option<String>,
    created_at: i64,
    updated_at: i64,
    #[serde(default)]
    seq: u64,
}

impl TaskRecord {
    fn new(task: &Task, seq: u64) -> Self {
        Self {
            task_id: task.id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            priority: task.priority.as_str().to_string(),
            due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            created_at: task.created_at.timestamp_micros(),
            updated_at: task.updated_at.timestamp_micros(),
            seq,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = PersistenceError;

    fn try_from(r: TaskRecord) -> Result<Self, Self::Error> {
        let id = TaskId::from_string(&r.task_id)
            .map_err(|e| PersistenceError::CorruptRecord(format!("Invalid task ID: {}", e)))?;
        let priority = r
            .priority
            .parse::<Priority>()
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        let due_date = r
            .due_date
            .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| PersistenceError::CorruptRecord(format!("Invalid due date: {}", e)))?;

        Ok(Task {
            id,
            title: r.title,
            description: r.description,
            completed: r.completed,
            priority,
            due_date,
            created_at: from_micros(r.created_at)?,
            updated_at: from_micros(r.updated_at)?,
        })
    }
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| PersistenceError::CorruptRecord(format!("Invalid timestamp: {}", micros)))
}

fn db_error(e: surrealdb::Error) -> PersistenceError {
    PersistenceError::Database(e.to_string())
}

async fn insert<C: Connection>(db: &Surreal<C>, record: TaskRecord) -> Result<(), PersistenceError> {
    let id = record.task_id.clone();
    let _: Option<TaskRecord> = db
        .create((TABLE_NAME, id.as_str()))
        .content(record)
        .await
        .map_err(db_error)?;
    Ok(())
}

async fn replace<C: Connection>(db: &Surreal<C>, record: TaskRecord) -> Result<(), PersistenceError> {
    let id = record.task_id.clone();
    let _: Option<TaskRecord> = db
        .update((TABLE_NAME, id.as_str()))
        .content(record)
        .await
        .map_err(db_error)?;
    Ok(())
}

async fn select<C: Connection>(
    db: &Surreal<C>,
    id: &str,
) -> Result<Option<TaskRecord>, PersistenceError> {
    db.select((TABLE_NAME, id)).await.map_err(db_error)
}

async fn select_many<C: Connection>(
    db: &Surreal<C>,
    completed: Option<bool>,
) -> Result<Vec<TaskRecord>, PersistenceError> {
    let mut response = match completed {
        Some(completed) => db
            .query(format!(
                "SELECT * FROM {} WHERE completed = $completed ORDER BY created_at DESC, seq DESC",
                TABLE_NAME
            ))
            .bind(("completed", completed))
            .await
            .map_err(db_error)?,
        None => db
            .query(format!(
                "SELECT * FROM {} ORDER BY created_at DESC, seq DESC",
                TABLE_NAME
            ))
            .await
            .map_err(db_error)?,
    };
    response.take(0).map_err(db_error)
}

async fn last_seq<C: Connection>(db: &Surreal<C>) -> Result<Option<u64>, PersistenceError> {
    let mut response = db
        .query(format!(
            "SELECT VALUE seq FROM {} ORDER BY seq DESC LIMIT 1",
            TABLE_NAME
        ))
        .await
        .map_err(db_error)?;
    let seqs: Vec<u64> = response.take(0).map_err(db_error)?;
    Ok(seqs.first().copied())
}

async fn remove<C: Connection>(db: &Surreal<C>, id: &str) -> Result<bool, PersistenceError> {
    let deleted: Option<TaskRecord> = db.delete((TABLE_NAME, id)).await.map_err(db_error)?;
    Ok(deleted.is_some())
}

/// SurrealDB implementation of TaskRepository
pub struct SurrealTaskRepository {
    connection: SharedConnection,
    next_seq: AtomicU64,
}

impl SurrealTaskRepository {
    /// Open the task table on `connection`, continuing after its last stored task
    pub async fn new(connection: SharedConnection) -> Result<Self, PersistenceError> {
        let last = match connection.client() {
            SurrealClient::Local(db) => last_seq(db).await?,
            SurrealClient::Remote(db) => last_seq(db).await?,
        };
        Ok(Self {
            connection,
            next_seq: AtomicU64::new(last.map_or(0, |seq| seq + 1)),
        })
    }

    async fn load(&self, id: &TaskId) -> Result<Option<TaskRecord>, PersistenceError> {
        let id = id.to_string();
        match self.connection.client() {
            SurrealClient::Local(db) => select(db, &id).await,
            SurrealClient::Remote(db) => select(db, &id).await,
        }
    }

    async fn insert_task(&self, task: &Task) -> Result<(), PersistenceError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let record = TaskRecord::new(task, seq);
        match self.connection.client() {
            SurrealClient::Local(db) => insert(db, record).await,
            SurrealClient::Remote(db) => insert(db, record).await,
        }
    }

    async fn replace_task(&self, task: &Task, seq: u64) -> Result<(), PersistenceError> {
        let record = TaskRecord::new(task, seq);
        match self.connection.client() {
            SurrealClient::Local(db) => replace(db, record).await,
            SurrealClient::Remote(db) => replace(db, record).await,
        }
    }
}

#[async_trait]
impl TaskRepository for SurrealTaskRepository {
    async fn create(&self, draft: TaskDraft) -> DomainResult<Task> {
        let task = Task::create(draft);
        debug!("Saving task {} to SurrealDB", task.id);
        self.insert_task(&task).await?;
        Ok(task)
    }

    async fn find_many(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        debug!("Finding tasks with filter {}", filter);

        let records = match self.connection.client() {
            SurrealClient::Local(db) => select_many(db, filter.completed()).await?,
            SurrealClient::Remote(db) => select_many(db, filter.completed()).await?,
        };

        let mut tasks = Vec::with_capacity(records.len());
        for record in records {
            tasks.push(Task::try_from(record)?);
        }
        Ok(tasks)
    }

    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        debug!("Finding task by id: {}", id);
        Ok(self.load(id).await?.map(Task::try_from).transpose()?)
    }

    async fn update_by_id(
        &self,
        id: &TaskId,
        changes: TaskChanges,
    ) -> DomainResult<Option<Task>> {
        debug!("Updating task: {}", id);

        let Some(record) = self.load(id).await? else {
            return Ok(None);
        };
        let seq = record.seq;
        let mut task = Task::try_from(record)?;
        task.apply(changes)?;
        self.replace_task(&task, seq).await?;
        Ok(Some(task))
    }

    async fn delete_by_id(&self, id: &TaskId) -> DomainResult<bool> {
        debug!("Deleting task: {}", id);

        let id = id.to_string();
        let deleted = match self.connection.client() {
            SurrealClient::Local(db) => remove(db, &id).await?,
            SurrealClient::Remote(db) => remove(db, &id).await?,
        };
        Ok(deleted)
    }
}
