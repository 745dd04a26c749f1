//! Opening the SurrealDB session behind [`SurrealTaskRepository`]
//!
//! [`SurrealTaskRepository`]: super::SurrealTaskRepository

use std::sync::Arc;

use surrealdb::engine::local::{Db as LocalDb, Mem};
use surrealdb::engine::remote::ws::{Client as WsClient, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::PersistenceError;

/// Where the task table lives
#[derive(Debug, Clone, Default)]
pub enum SurrealTarget {
    /// Embedded engine, gone when the process exits
    #[default]
    Embedded,
    /// Server reached over WebSocket, signed in as root
    Remote {
        url: String,
        username: String,
        password: String,
    },
}

/// Engine handle, one variant per supported transport
pub enum SurrealClient {
    Local(Surreal<LocalDb>),
    Remote(Surreal<WsClient>),
}

/// Open session scoped to one namespace and database
pub struct SurrealConnection {
    client: SurrealClient,
}

/// Session shared by every repository built on it
pub type SharedConnection = Arc<SurrealConnection>;

impl SurrealConnection {
    /// Connect to `target` and select `namespace`/`database`
    pub async fn open(
        target: SurrealTarget,
        namespace: &str,
        database: &str,
    ) -> Result<SharedConnection, PersistenceError> {
        let client = match target {
            SurrealTarget::Embedded => {
                info!("Opening embedded SurrealDB task store");
                let db = Surreal::new::<Mem>(()).await.map_err(connection_error)?;
                scope(&db, namespace, database).await?;
                SurrealClient::Local(db)
            }
            SurrealTarget::Remote {
                url,
                username,
                password,
            } => {
                // ws engine takes host:port
                let address = url.trim_start_matches("ws://");
                info!("Opening SurrealDB task store at {}", address);
                let db = Surreal::new::<Ws>(address)
                    .await
                    .map_err(connection_error)?;
                db.signin(Root {
                    username: &username,
                    password: &password,
                })
                .await
                .map_err(|e| PersistenceError::Connection(format!("sign-in rejected: {}", e)))?;
                scope(&db, namespace, database).await?;
                SurrealClient::Remote(db)
            }
        };

        Ok(Arc::new(Self { client }))
    }

    pub fn client(&self) -> &SurrealClient {
        &self.client
    }
}

async fn scope<C: Connection>(
    db: &Surreal<C>,
    namespace: &str,
    database: &str,
) -> Result<(), PersistenceError> {
    db.use_ns(namespace)
        .use_db(database)
        .await
        .map_err(|e| PersistenceError::Connection(format!("{}/{}: {}", namespace, database, e)))
}

fn connection_error(e: surrealdb::Error) -> PersistenceError {
    PersistenceError::Connection(e.to_string())
}
