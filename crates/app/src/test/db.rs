//! Per-test Postgres databases on one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const USER: &str = "aura_test";
const PASSWORD: &str = "aura_test_password";

static CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases waiting to be dropped once their `TestDb` goes away.
static DROP_QUEUE: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Accept only names that are safe to interpolate into `CREATE`/`DROP DATABASE`.
fn check_database_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err("database name is empty".to_string());
    };

    if name.len() > 63 {
        return Err(format!("database name '{name}' exceeds 63 bytes"));
    }

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("database name '{name}' must start with a letter or underscore"));
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("database name '{name}' contains invalid characters"));
    }

    Ok(())
}

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("aura_test")
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// Connection URL for `database` on the shared container.
async fn database_url(database: &str) -> String {
    let container = CONTAINER.get_or_init(start_container).await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}")
}

async fn drop_queue() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if check_database_name(&name).is_err() {
                continue;
            }

            let Ok(mut conn) = PgConnection::connect(&database_url("postgres").await).await else {
                continue;
            };

            let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
                .execute(&mut conn)
                .await;

            let _ = conn.close().await;
        }
    });

    sender
}

/// A freshly migrated database owned by a single test.
///
/// Services commit normally; isolation comes from every test having its own
/// database, which is dropped in the background when this value is dropped.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROP_QUEUE.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();

        let thread_id = std::thread::current().id();

        let name = format!("aura_test_{nanos}_{thread_id:?}").replace(['(', ')', ' '], "");

        Self::with_name(&name).await
    }

    pub async fn with_name(name: &str) -> Self {
        DROP_QUEUE.get_or_init(drop_queue).await;

        if let Err(error) = check_database_name(name) {
            panic!("{error}");
        }

        let mut conn = PgConnection::connect(&database_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close().await.expect("Failed to close admin connection");

        let pool = PgPool::connect(&database_url(name).await)
            .await
            .expect("Failed to connect to test database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            name: name.to_string(),
        }
    }

    /// Begin a transaction that rolls back unless committed.
    ///
    /// Meant for repository-level tests; service tests go through `TestContext`.
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Postgres> {
        self.pool
            .begin()
            .await
            .expect("Failed to start test transaction")
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_names_are_checked() {
        assert!(check_database_name("aura_test_1").is_ok());
        assert!(check_database_name("_leading").is_ok());

        assert!(check_database_name("").is_err());
        assert!(check_database_name(&"a".repeat(64)).is_err());
        assert!(check_database_name("1st").is_err());
        assert!(check_database_name("has-hyphen").is_err());
        assert!(check_database_name("quote\"d").is_err());
    }

    #[tokio::test]
    async fn fresh_database_is_migrated() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('products', 'testers', 'cart_lines', 'orders', 'customers')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to count tables");

        assert_eq!(tables, 5);
    }

    #[tokio::test]
    async fn uncommitted_transactions_roll_back() {
        let test_db = TestDb::new().await;

        {
            let mut tx = test_db.begin_test_transaction().await;

            sqlx::query("CREATE TABLE scratch (id INTEGER)")
                .execute(&mut *tx)
                .await
                .expect("Failed to create table");
        }

        let result = sqlx::query("SELECT COUNT(*) FROM scratch")
            .fetch_one(test_db.pool())
            .await;

        assert!(result.is_err());
    }
}
