use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories<'e, E>(executor: E) -> sqlx::Result<Vec<Category>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_category<'e, E>(executor: E, category: &Category) -> sqlx::Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let id = sqlx::query(
        r#"
        INSERT INTO categories (id, type) VALUES (?1, ?2)
        "#,
    )
    .bind(category.id)
    .bind(&category.kind)
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_category<'e, E>(executor: E, category: &Category) -> sqlx::Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE categories SET type=?1 WHERE categories.id = ?2
        "#,
    )
    .bind(&category.kind)
    .bind(category.id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn delete_category<'e, E>(executor: E, id: i64) -> sqlx::Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        DELETE FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Makes the stored categories match `categories` exactly, keyed by id.
pub async fn import_categories(
    conn: &mut SqliteConnection,
    categories: Vec<Category>,
) -> sqlx::Result<()> {
    let existing_ids: HashSet<i64> = get_all_categories(&mut *conn)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();
    let new_ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    for id in existing_ids.difference(&new_ids) {
        delete_category(&mut *conn, *id).await?;
    }
    for category in categories {
        if existing_ids.contains(&category.id) {
            update_category(&mut *conn, &category).await?;
        } else {
            insert_category(&mut *conn, &category).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::testing;

    fn category(id: i64, kind: &str) -> Category {
        Category {
            id,
            kind: kind.to_owned(),
        }
    }

    #[tokio::test]
    async fn lists_categories_by_id() {
        let pool = testing::pool().await;
        testing::seed_category(&pool, 3, "History").await;
        testing::seed_category(&pool, 1, "Science").await;

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories, vec![category(1, "Science"), category(3, "History")]);
    }

    #[tokio::test]
    async fn missing_category_is_none() {
        let pool = testing::pool().await;
        assert_eq!(get_category(&pool, 42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn import_replaces_existing_set() {
        let pool = testing::pool().await;
        testing::seed_category(&pool, 1, "Science").await;
        testing::seed_category(&pool, 2, "Art").await;

        let mut conn = pool.acquire().await.unwrap();
        import_categories(&mut *conn, vec![category(2, "Arts"), category(5, "Sports")])
            .await
            .unwrap();
        drop(conn);

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories, vec![category(2, "Arts"), category(5, "Sports")]);
    }
}
