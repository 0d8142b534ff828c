use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::account::Account;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{LegalLinks, Profile, ProfileDetails, SocialLinks};

const PROFILE_COLUMNS: &str = r#"
    id, account_id, business_name, business_type, description, phone, whatsapp_number,
    business_address, city, state, pincode, logo, profile_image, hero_color,
    mission_statement, vision_statement, about_us,
    instagram_url, facebook_url, twitter_url, linkedin_url, youtube_url,
    terms_conditions_url, privacy_policy_url, cancellation_policy_url,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_profile(row: &PgRow) -> AppResult<Profile> {
        Ok(Profile {
            id: Id::new(row.try_get("id")?),
            account_id: Id::new(row.try_get("account_id")?),
            details: ProfileDetails {
                business_name: row.try_get("business_name")?,
                business_type: row.try_get("business_type")?,
                description: row.try_get("description")?,
                phone: row.try_get("phone")?,
                whatsapp_number: row.try_get("whatsapp_number")?,
                business_address: row.try_get("business_address")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                pincode: row.try_get("pincode")?,
                hero_color: row.try_get("hero_color")?,
                mission_statement: row.try_get("mission_statement")?,
                vision_statement: row.try_get("vision_statement")?,
                about_us: row.try_get("about_us")?,
                social: SocialLinks {
                    instagram_url: row.try_get("instagram_url")?,
                    facebook_url: row.try_get("facebook_url")?,
                    twitter_url: row.try_get("twitter_url")?,
                    linkedin_url: row.try_get("linkedin_url")?,
                    youtube_url: row.try_get("youtube_url")?,
                },
                legal: LegalLinks {
                    terms_conditions_url: row.try_get("terms_conditions_url")?,
                    privacy_policy_url: row.try_get("privacy_policy_url")?,
                    cancellation_policy_url: row.try_get("cancellation_policy_url")?,
                },
            },
            logo: row.try_get("logo")?,
            profile_image: row.try_get("profile_image")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn select_by_account(&self, account_id: &Id<Account>, for_update: bool) -> AppResult<Option<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE account_id = $1{}",
            PROFILE_COLUMNS,
            if for_update { " FOR UPDATE" } else { "" }
        );
        self.session
            .with_tx(|tx| {
                let account_id = account_id.value;
                let sql = sql.clone();
                async move {
                    let row = sqlx::query(&sql).bind(account_id).fetch_optional(tx.as_mut()).await?;

                    match row {
                        Some(row) => Ok(Some(Self::get_profile(&row)?)),
                        None => Ok(None),
                    }
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let details = profile.details;
                    let row = sqlx::query(
                        r#"
                            INSERT INTO profiles
                                (
                                    id,
                                    account_id,
                                    business_name,
                                    business_type,
                                    description,
                                    phone,
                                    whatsapp_number,
                                    business_address,
                                    city,
                                    state,
                                    pincode,
                                    logo,
                                    profile_image,
                                    hero_color,
                                    mission_statement,
                                    vision_statement,
                                    about_us,
                                    instagram_url,
                                    facebook_url,
                                    twitter_url,
                                    linkedin_url,
                                    youtube_url,
                                    terms_conditions_url,
                                    privacy_policy_url,
                                    cancellation_policy_url,
                                    created_at,
                                    updated_at
                                )
                            VALUES
                                (
                                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
                                )
                            RETURNING id
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(profile.account_id.value)
                    .bind(details.business_name)
                    .bind(details.business_type)
                    .bind(details.description)
                    .bind(details.phone)
                    .bind(details.whatsapp_number)
                    .bind(details.business_address)
                    .bind(details.city)
                    .bind(details.state)
                    .bind(details.pincode)
                    .bind(profile.logo)
                    .bind(profile.profile_image)
                    .bind(details.hero_color)
                    .bind(details.mission_statement)
                    .bind(details.vision_statement)
                    .bind(details.about_us)
                    .bind(details.social.instagram_url)
                    .bind(details.social.facebook_url)
                    .bind(details.social.twitter_url)
                    .bind(details.social.linkedin_url)
                    .bind(details.social.youtube_url)
                    .bind(details.legal.terms_conditions_url)
                    .bind(details.legal.privacy_policy_url)
                    .bind(details.legal.cancellation_policy_url)
                    .bind(profile.created_at)
                    .bind(profile.updated_at)
                    .fetch_one(tx.as_mut())
                    .await
                    .map_err(|err| {
                        if err.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                            AppError::ProfileAlreadyExists
                        } else {
                            AppError::DatabaseError(err)
                        }
                    })?;

                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, profile: Profile) -> AppResult<Id<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let details = profile.details;
                    let result = sqlx::query(
                        r#"
                            UPDATE profiles
                            SET
                                business_name = $2,
                                business_type = $3,
                                description = $4,
                                phone = $5,
                                whatsapp_number = $6,
                                business_address = $7,
                                city = $8,
                                state = $9,
                                pincode = $10,
                                logo = $11,
                                profile_image = $12,
                                hero_color = $13,
                                mission_statement = $14,
                                vision_statement = $15,
                                about_us = $16,
                                instagram_url = $17,
                                facebook_url = $18,
                                twitter_url = $19,
                                linkedin_url = $20,
                                youtube_url = $21,
                                terms_conditions_url = $22,
                                privacy_policy_url = $23,
                                cancellation_policy_url = $24,
                                updated_at = $25
                            WHERE id = $1
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(details.business_name)
                    .bind(details.business_type)
                    .bind(details.description)
                    .bind(details.phone)
                    .bind(details.whatsapp_number)
                    .bind(details.business_address)
                    .bind(details.city)
                    .bind(details.state)
                    .bind(details.pincode)
                    .bind(profile.logo)
                    .bind(profile.profile_image)
                    .bind(details.hero_color)
                    .bind(details.mission_statement)
                    .bind(details.vision_statement)
                    .bind(details.about_us)
                    .bind(details.social.instagram_url)
                    .bind(details.social.facebook_url)
                    .bind(details.social.twitter_url)
                    .bind(details.social.linkedin_url)
                    .bind(details.social.youtube_url)
                    .bind(details.legal.terms_conditions_url)
                    .bind(details.legal.privacy_policy_url)
                    .bind(details.legal.cancellation_policy_url)
                    .bind(profile.updated_at)
                    .execute(tx.as_mut())
                    .await?;

                    if result.rows_affected() == 0 {
                        return Err(AppError::ProfileNotFound);
                    }
                    Ok(profile.id)
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl ProfileReader for ProfileGateway {
    async fn find_by_account(&self, account_id: &Id<Account>) -> AppResult<Option<Profile>> {
        self.select_by_account(account_id, false).await
    }

    async fn lock_by_account(&self, account_id: &Id<Account>) -> AppResult<Option<Profile>> {
        self.select_by_account(account_id, true).await
    }

    async fn exists_for_account(&self, account_id: &Id<Account>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let account_id = account_id.value;
                async move {
                    let exists: bool =
                        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM profiles WHERE account_id = $1)")
                            .bind(account_id)
                            .fetch_one(tx.as_mut())
                            .await?;
                    Ok(exists)
                }
                .boxed()
            })
            .await
    }
}
