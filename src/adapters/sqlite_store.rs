use crate::domain::model::{
    Car, ClosedRequest, Customer, Mechanic, Ownership, QueryResult, Sequence, ServiceRequest,
};
use crate::domain::ports::ShopStore;
use crate::utils::error::Result;
use rusqlite::types::ValueRef;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Customer (
    id INTEGER NOT NULL PRIMARY KEY,
    fname CHAR(32) NOT NULL,
    lname CHAR(32) NOT NULL,
    phone CHAR(13) NOT NULL,
    address CHAR(256) NOT NULL
);
CREATE TABLE IF NOT EXISTS Mechanic (
    id INTEGER NOT NULL PRIMARY KEY,
    fname CHAR(32) NOT NULL,
    lname CHAR(32) NOT NULL,
    experience INTEGER NOT NULL CHECK (experience >= 0 AND experience < 100)
);
CREATE TABLE IF NOT EXISTS Car (
    vin VARCHAR(16) NOT NULL PRIMARY KEY,
    make VARCHAR(32) NOT NULL,
    model VARCHAR(32) NOT NULL,
    year INTEGER NOT NULL CHECK (year >= 1970)
);
CREATE TABLE IF NOT EXISTS Owns (
    ownership_id INTEGER NOT NULL PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES Customer(id),
    car_vin VARCHAR(16) NOT NULL REFERENCES Car(vin)
);
CREATE TABLE IF NOT EXISTS Service_Request (
    rid INTEGER NOT NULL PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES Customer(id),
    car_vin VARCHAR(16) NOT NULL REFERENCES Car(vin),
    date DATE NOT NULL,
    odometer INTEGER NOT NULL CHECK (odometer >= 0),
    complain TEXT
);
CREATE TABLE IF NOT EXISTS Closed_Request (
    wid INTEGER NOT NULL PRIMARY KEY,
    rid INTEGER NOT NULL UNIQUE REFERENCES Service_Request(rid),
    mid INTEGER NOT NULL REFERENCES Mechanic(id),
    date DATE NOT NULL,
    comment TEXT,
    bill INTEGER NOT NULL CHECK (bill >= 0)
);
CREATE TABLE IF NOT EXISTS Sequences (
    name TEXT NOT NULL PRIMARY KEY,
    value INTEGER NOT NULL
);
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    SqliteFile(PathBuf),
    SqliteInMemory,
}

/// The one process-wide connection. Dropping it closes the database.
pub struct Database {
    connection: Connection,
}

impl Database {
    pub fn open(config: &DatabaseConfig, busy_timeout: Duration) -> Result<Self> {
        let connection = match config {
            DatabaseConfig::SqliteFile(path) => create_connection(path)?,
            DatabaseConfig::SqliteInMemory => Connection::open_in_memory()?,
        };
        connection.busy_timeout(busy_timeout)?;
        connection.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { connection })
    }

    /// In-memory database with the schema already in place.
    pub fn open_in_memory() -> Result<Self> {
        let db = Self::open(&DatabaseConfig::SqliteInMemory, Duration::from_secs(5))?;
        db.create_schema()?;
        Ok(db)
    }

    pub fn create_schema(&self) -> Result<()> {
        self.connection.execute_batch(SCHEMA)?;
        tracing::debug!("🗄️ Schema ensured");
        Ok(())
    }

    /// Auto-commit access, one statement at a time.
    pub fn repo(&self) -> SqliteRepo<'_> {
        SqliteRepo::new(&self.connection)
    }

    /// Runs `f` inside an IMMEDIATE transaction: the write lock is taken up
    /// front, so lookups and the inserts that depend on them see the same data.
    /// Commits when `f` returns `Ok`, rolls back otherwise.
    pub fn in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&SqliteRepo<'_>) -> Result<T>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = {
            let repo = SqliteRepo::new(&tx);
            f(&repo)?
        };
        tx.commit()?;
        Ok(value)
    }
}

fn create_connection(dbms_path: &Path) -> Result<Connection> {
    if let Some(parent) = dbms_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(dbms_path)?;
    Ok(connection)
}

pub struct SqliteRepo<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn exists(&self, sql: &str, param: &dyn rusqlite::ToSql) -> Result<bool> {
        tracing::debug!("SQL: {}", sql);
        let found = self
            .conn
            .query_row(sql, params![param], |_| Ok(()))
            .optional()?
            .is_some();
        Ok(found)
    }
}

impl ShopStore for SqliteRepo<'_> {
    fn next_id(&self, sequence: Sequence) -> Result<i64> {
        let (table, column) = sequence.target();
        self.conn.execute(
            "INSERT OR IGNORE INTO Sequences (name, value) VALUES (?1, 0)",
            params![sequence.name()],
        )?;
        // 序列值永遠不小於表中現有的最大 id
        let bump = format!(
            "UPDATE Sequences SET value = MAX(value, (SELECT COALESCE(MAX({column}), 0) FROM {table})) + 1 WHERE name = ?1"
        );
        self.conn.execute(&bump, params![sequence.name()])?;
        let id: i64 = self.conn.query_row(
            "SELECT value FROM Sequences WHERE name = ?1",
            params![sequence.name()],
            |row| row.get(0),
        )?;
        tracing::debug!("🔢 Sequence {} -> {}", sequence.name(), id);
        Ok(id)
    }

    fn insert_customer(&self, customer: &Customer) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Customer (id, fname, lname, phone, address) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                customer.id,
                customer.fname,
                customer.lname,
                customer.phone,
                customer.address
            ],
        )?;
        Ok(())
    }

    fn insert_mechanic(&self, mechanic: &Mechanic) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Mechanic (id, fname, lname, experience) VALUES (?1, ?2, ?3, ?4)",
            params![mechanic.id, mechanic.fname, mechanic.lname, mechanic.experience],
        )?;
        Ok(())
    }

    fn insert_car(&self, car: &Car) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Car (vin, make, model, year) VALUES (?1, ?2, ?3, ?4)",
            params![car.vin, car.make, car.model, car.year],
        )?;
        Ok(())
    }

    fn insert_ownership(&self, ownership: &Ownership) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Owns (ownership_id, customer_id, car_vin) VALUES (?1, ?2, ?3)",
            params![ownership.id, ownership.customer_id, ownership.car_vin],
        )?;
        Ok(())
    }

    fn insert_service_request(&self, request: &ServiceRequest) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Service_Request (rid, customer_id, car_vin, date, odometer, complain) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                request.id,
                request.customer_id,
                request.car_vin,
                request.date,
                request.odometer,
                request.complaint
            ],
        )?;
        Ok(())
    }

    fn insert_closed_request(&self, closed: &ClosedRequest) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Closed_Request (wid, rid, mid, date, comment, bill) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                closed.id,
                closed.request_id,
                closed.mechanic_id,
                closed.date,
                closed.comment,
                closed.bill
            ],
        )?;
        Ok(())
    }

    fn customers_by_last_name(&self, lname: &str) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, fname, lname, phone, address FROM Customer WHERE TRIM(lname) = ?1 ORDER BY id",
        )?;
        let customers = stmt
            .query_map(params![lname.trim()], |row| {
                Ok(Customer {
                    id: row.get(0)?,
                    fname: row.get(1)?,
                    lname: row.get(2)?,
                    phone: row.get(3)?,
                    address: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    fn customer_exists(&self, id: i64) -> Result<bool> {
        self.exists("SELECT 1 FROM Customer WHERE id = ?1", &id)
    }

    fn mechanic_exists(&self, id: i64) -> Result<bool> {
        self.exists("SELECT 1 FROM Mechanic WHERE id = ?1", &id)
    }

    fn car_exists(&self, vin: &str) -> Result<bool> {
        self.exists("SELECT 1 FROM Car WHERE vin = ?1", &vin)
    }

    fn cars_owned_by(&self, customer_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT car_vin FROM Owns WHERE customer_id = ?1 ORDER BY ownership_id")?;
        let vins = stmt
            .query_map(params![customer_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(vins)
    }

    fn service_request_exists(&self, id: i64) -> Result<bool> {
        self.exists("SELECT 1 FROM Service_Request WHERE rid = ?1", &id)
    }

    fn is_request_closed(&self, id: i64) -> Result<bool> {
        self.exists("SELECT 1 FROM Closed_Request WHERE rid = ?1", &id)
    }

    fn query_table(&self, sql: &str, params: &[i64]) -> Result<QueryResult> {
        tracing::debug!("SQL: {} {:?}", sql, params);
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(render_cell))
                    .collect::<rusqlite::Result<Vec<String>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(QueryResult { columns, rows })
    }
}

fn render_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).trim_end().to_string(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
