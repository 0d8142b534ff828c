use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::testimonial::{TestimonialReader, TestimonialWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::testimonial::Testimonial;

#[derive(Clone)]
pub struct TestimonialGateway {
    session: SqlxSession,
}

impl TestimonialGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_testimonial(row: &PgRow) -> AppResult<Testimonial> {
        Ok(Testimonial {
            id: Id::new(row.try_get("id")?),
            profile_id: Id::new(row.try_get("profile_id")?),
            client_name: row.try_get("client_name")?,
            client_photo: row.try_get("client_photo")?,
            rating: row.try_get("rating")?,
            testimonial_text: row.try_get("testimonial_text")?,
            is_featured: row.try_get("is_featured")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl TestimonialWriter for TestimonialGateway {
    async fn insert(&self, row: Testimonial) -> AppResult<Id<Testimonial>> {
        self.session
            .with_tx(|tx| {
                let row = row.clone();
                async move {
                    let inserted = sqlx::query(
                        r#"
                            INSERT INTO testimonials
                                (
                                    id,
                                    profile_id,
                                    client_name,
                                    client_photo,
                                    rating,
                                    testimonial_text,
                                    is_featured,
                                    is_active,
                                    created_at
                                )
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                            RETURNING id
                        "#,
                    )
                    .bind(row.id.value)
                    .bind(row.profile_id.value)
                    .bind(row.client_name)
                    .bind(row.client_photo)
                    .bind(row.rating)
                    .bind(row.testimonial_text)
                    .bind(row.is_featured)
                    .bind(row.is_active)
                    .bind(row.created_at)
                    .fetch_one(tx.as_mut())
                    .await?;

                    let id: Uuid = inserted.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, row: Testimonial) -> AppResult<Id<Testimonial>> {
        self.session
            .with_tx(|tx| {
                let row = row.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE testimonials
                            SET
                                client_name = $3,
                                client_photo = $4,
                                rating = $5,
                                testimonial_text = $6,
                                is_featured = $7,
                                is_active = $8
                            WHERE id = $1 AND profile_id = $2
                        "#,
                    )
                    .bind(row.id.value)
                    .bind(row.profile_id.value)
                    .bind(row.client_name)
                    .bind(row.client_photo)
                    .bind(row.rating)
                    .bind(row.testimonial_text)
                    .bind(row.is_featured)
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

    async fn delete(&self, profile_id: &Id<Profile>, id: &Id<Testimonial>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                let id = id.value;
                async move {
                    let result = sqlx::query("DELETE FROM testimonials WHERE id = $1 AND profile_id = $2")
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
impl TestimonialReader for TestimonialGateway {
    async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<Testimonial>> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                id, profile_id, client_name, client_photo, rating,
                                testimonial_text, is_featured, is_active, created_at
                            FROM testimonials
                            WHERE profile_id = $1
                            ORDER BY created_at DESC, id DESC
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(Self::get_testimonial).collect()
                }
                .boxed()
            })
            .await
    }
}
