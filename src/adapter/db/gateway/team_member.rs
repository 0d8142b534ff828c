use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::team_member::{TeamMemberReader, TeamMemberWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::team_member::TeamMember;

#[derive(Clone)]
pub struct TeamMemberGateway {
    session: SqlxSession,
}

impl TeamMemberGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_team_member(row: &PgRow) -> AppResult<TeamMember> {
        Ok(TeamMember {
            id: Id::new(row.try_get("id")?),
            profile_id: Id::new(row.try_get("profile_id")?),
            name: row.try_get("name")?,
            photo: row.try_get("photo")?,
            role_title: row.try_get("role_title")?,
            specialties: row.try_get("specialties")?,
            bio: row.try_get("bio")?,
            credentials: row.try_get("credentials")?,
            display_order: row.try_get("display_order")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

#[async_trait]
impl TeamMemberWriter for TeamMemberGateway {
    async fn insert(&self, row: TeamMember) -> AppResult<Id<TeamMember>> {
        self.session
            .with_tx(|tx| {
                let row = row.clone();
                async move {
                    let inserted = sqlx::query(
                        r#"
                            INSERT INTO team_members
                                (
                                    id,
                                    profile_id,
                                    name,
                                    photo,
                                    role_title,
                                    specialties,
                                    bio,
                                    credentials,
                                    display_order,
                                    is_active
                                )
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                            RETURNING id
                        "#,
                    )
                    .bind(row.id.value)
                    .bind(row.profile_id.value)
                    .bind(row.name)
                    .bind(row.photo)
                    .bind(row.role_title)
                    .bind(row.specialties)
                    .bind(row.bio)
                    .bind(row.credentials)
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

    async fn update(&self, row: TeamMember) -> AppResult<Id<TeamMember>> {
        self.session
            .with_tx(|tx| {
                let row = row.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE team_members
                            SET
                                name = $3,
                                photo = $4,
                                role_title = $5,
                                specialties = $6,
                                bio = $7,
                                credentials = $8,
                                display_order = $9,
                                is_active = $10
                            WHERE id = $1 AND profile_id = $2
                        "#,
                    )
                    .bind(row.id.value)
                    .bind(row.profile_id.value)
                    .bind(row.name)
                    .bind(row.photo)
                    .bind(row.role_title)
                    .bind(row.specialties)
                    .bind(row.bio)
                    .bind(row.credentials)
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

    async fn delete(&self, profile_id: &Id<Profile>, id: &Id<TeamMember>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                let id = id.value;
                async move {
                    let result = sqlx::query("DELETE FROM team_members WHERE id = $1 AND profile_id = $2")
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
impl TeamMemberReader for TeamMemberGateway {
    async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<TeamMember>> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                id, profile_id, name, photo, role_title, specialties,
                                bio, credentials, display_order, is_active
                            FROM team_members
                            WHERE profile_id = $1
                            ORDER BY display_order, id
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(Self::get_team_member).collect()
                }
                .boxed()
            })
            .await
    }
}
