use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::database::{Database, DatabaseError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

struct PantryRow {
    id: i64,
    name: String,
    quantity: f64,
    unit: String,
    created_at: String,
    updated_at: String,
}

const PANTRY_COLUMNS: &str = "id, name, quantity, unit, created_at, updated_at";

fn read_row(row: &Row<'_>) -> rusqlite::Result<PantryRow> {
    Ok(PantryRow {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl TryFrom<PantryRow> for PantryItem {
    type Error = DatabaseError;

    fn try_from(row: PantryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Decode(format!("timestamp '{}': {}", value, e)))
}

impl Database {
    /// Adds an item, or updates the quantity and unit of an existing item
    /// with the same name (case-insensitive).
    pub async fn add_pantry_item(
        &self,
        name: &str,
        quantity: f64,
        unit: &str,
    ) -> Result<PantryItem, DatabaseError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DatabaseError::Invalid("pantry item name is empty".to_string()));
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DatabaseError::Invalid(format!("invalid quantity {}", quantity)));
        }
        let unit = unit.trim().to_string();
        let now = Utc::now().to_rfc3339();

        let row = self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let existing: Option<i64> = tx
                    .query_row(
                        "SELECT id FROM pantry_items WHERE lower(name) = lower(?1)",
                        params![name],
                        |row| row.get(0),
                    )
                    .optional()?;

                let id = match existing {
                    Some(id) => {
                        tx.execute(
                            "UPDATE pantry_items SET quantity = ?1, unit = ?2, updated_at = ?3 WHERE id = ?4",
                            params![quantity, unit, now, id],
                        )?;
                        id
                    }
                    None => {
                        tx.execute(
                            "INSERT INTO pantry_items (name, quantity, unit, created_at, updated_at)
                             VALUES (?1, ?2, ?3, ?4, ?4)",
                            params![name, quantity, unit, now],
                        )?;
                        tx.last_insert_rowid()
                    }
                };

                let row = tx.query_row(
                    &format!("SELECT {} FROM pantry_items WHERE id = ?1", PANTRY_COLUMNS),
                    params![id],
                    read_row,
                )?;
                tx.commit()?;
                Ok(row)
            })
            .await?;

        row.try_into()
    }

    pub async fn list_pantry_items(&self) -> Result<Vec<PantryItem>, DatabaseError> {
        let rows = self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM pantry_items ORDER BY name COLLATE NOCASE",
                    PANTRY_COLUMNS
                ))?;
                let rows = stmt
                    .query_map([], read_row)?
                    .collect::<Result<Vec<_>, rusqlite::Error>>()?;
                Ok(rows)
            })
            .await?;

        rows.into_iter().map(PantryItem::try_from).collect()
    }

    pub async fn update_pantry_quantity(&self, id: i64, quantity: f64) -> Result<PantryItem, DatabaseError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DatabaseError::Invalid(format!("invalid quantity {}", quantity)));
        }
        let now = Utc::now().to_rfc3339();

        let row = self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE pantry_items SET quantity = ?1, updated_at = ?2 WHERE id = ?3",
                    params![quantity, now, id],
                )?;
                let row = conn
                    .query_row(
                        &format!("SELECT {} FROM pantry_items WHERE id = ?1", PANTRY_COLUMNS),
                        params![id],
                        read_row,
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        row.ok_or_else(|| DatabaseError::NotFound(format!("pantry item {}", id)))?
            .try_into()
    }

    pub async fn remove_pantry_item(&self, id: i64) -> Result<bool, DatabaseError> {
        let removed = self.conn
            .call(move |conn| {
                let removed = conn.execute("DELETE FROM pantry_items WHERE id = ?1", params![id])?;
                Ok(removed)
            })
            .await?;
        Ok(removed > 0)
    }

    pub async fn remove_pantry_item_by_name(&self, name: &str) -> Result<bool, DatabaseError> {
        let name = name.trim().to_string();
        let removed = self.conn
            .call(move |conn| {
                let removed = conn.execute(
                    "DELETE FROM pantry_items WHERE lower(name) = lower(?1)",
                    params![name],
                )?;
                Ok(removed)
            })
            .await?;
        Ok(removed > 0)
    }

    pub async fn pantry_names(&self) -> Result<Vec<String>, DatabaseError> {
        Ok(self
            .list_pantry_items()
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect())
    }
}
