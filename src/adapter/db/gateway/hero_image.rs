use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::hero_image::{HeroImageReader, HeroImageWriter};
use crate::domain::entities::hero_image::HeroImage;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[derive(Clone)]
pub struct HeroImageGateway {
    session: SqlxSession,
}

impl HeroImageGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_hero_image(row: &PgRow) -> AppResult<HeroImage> {
        Ok(HeroImage {
            id: Id::new(row.try_get("id")?),
            profile_id: Id::new(row.try_get("profile_id")?),
            image: row.try_get("image")?,
            caption: row.try_get("caption")?,
            display_order: row.try_get("display_order")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

#[async_trait]
impl HeroImageWriter for HeroImageGateway {
    async fn insert(&self, row: HeroImage) -> AppResult<Id<HeroImage>> {
        self.session
            .with_tx(|tx| {
                let row = row.clone();
                async move {
                    let inserted = sqlx::query(
                        r#"
                            INSERT INTO hero_images
                                (id, profile_id, image, caption, display_order, is_active)
                            VALUES
                                ($1, $2, $3, $4, $5, $6)
                            RETURNING id
                        "#,
                    )
                    .bind(row.id.value)
                    .bind(row.profile_id.value)
                    .bind(row.image)
                    .bind(row.caption)
                    .bind(row.display_order)
                    .bind(row.is_active)
                    .fetch_one(tx.as_mut())
                    .await?;

                    let id: Uuid = inserted.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, row: HeroImage) -> AppResult<Id<HeroImage>> {
        self.session
            .with_tx(|tx| {
                let row = row.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE hero_images
                            SET
                                image = $3,
                                caption = $4,
                                display_order = $5,
                                is_active = $6
                            WHERE id = $1 AND profile_id = $2
                        "#,
                    )
                    .bind(row.id.value)
                    .bind(row.profile_id.value)
                    .bind(row.image)
                    .bind(row.caption)
                    .bind(row.display_order)
                    .bind(row.is_active)
                    .execute(tx.as_mut())
                    .await?;

                    if result.rows_affected() == 0 {
                        return Err(AppError::RowNotFound(row.id.to_string()));
                    }
                    Ok(row.id)
                }
                .boxed()
            })
            .await
    }

    async fn delete(&self, profile_id: &Id<Profile>, id: &Id<HeroImage>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                let id = id.value;
                async move {
                    let result = sqlx::query("DELETE FROM hero_images WHERE id = $1 AND profile_id = $2")
                        .bind(id)
                        .bind(profile_id)
                        .execute(tx.as_mut())
                        .await?;

                    if result.rows_affected() == 0 {
                        return Err(AppError::RowNotFound(id.to_string()));
                    }
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl HeroImageReader for HeroImageGateway {
    async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<HeroImage>> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT id, profile_id, image, caption, display_order, is_active
                            FROM hero_images
                            WHERE profile_id = $1
                            ORDER BY display_order, id
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(Self::get_hero_image).collect()
                }
                .boxed()
            })
            .await
    }
}
