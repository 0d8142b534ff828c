use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{
    CreateProfileDTO, ProfileContext, ProfileDTO, ProfileSubmissionDTO, ProfileUpdateOutcome,
};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::hero_image::{HeroImageReader, HeroImageWriter};
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::application::interface::gateway::team_member::{TeamMemberReader, TeamMemberWriter};
use crate::application::interface::gateway::testimonial::{TestimonialReader, TestimonialWriter};
use crate::application::interface::storage::StorageClient;
use crate::application::validation::{ImageChange, RowChange, UploadLimits, ValidatedSubmission, validate};
use crate::domain::entities::account::Account;
use crate::domain::entities::hero_image::HeroImage;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{Profile, ProfileAggregate, ProfileDetails};
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::testimonial::Testimonial;
use crate::domain::media::MediaKind;

/// Lifecycle of one update submission, logged as the `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Received,
    Validating,
    Rejected,
    Committing,
    Committed,
    RolledBack,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Received => "received",
            SubmissionState::Validating => "validating",
            SubmissionState::Rejected => "rejected",
            SubmissionState::Committing => "committing",
            SubmissionState::Committed => "committed",
            SubmissionState::RolledBack => "rolled_back",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct ProfileReaders {
    pub profile: Arc<dyn ProfileReader>,
    pub hero_images: Arc<dyn HeroImageReader>,
    pub team_members: Arc<dyn TeamMemberReader>,
    pub testimonials: Arc<dyn TestimonialReader>,
}

impl ProfileReaders {
    async fn load(&self, profile: Profile) -> AppResult<ProfileAggregate> {
        let hero_images = self.hero_images.list_by_profile(&profile.id).await?;
        let team_members = self.team_members.list_by_profile(&profile.id).await?;
        let testimonials = self.testimonials.list_by_profile(&profile.id).await?;
        Ok(ProfileAggregate {
            profile,
            hero_images,
            team_members,
            testimonials,
        })
    }
}

#[derive(Clone)]
pub struct ProfileWriters {
    pub profile: Arc<dyn ProfileWriter>,
    pub hero_images: Arc<dyn HeroImageWriter>,
    pub team_members: Arc<dyn TeamMemberWriter>,
    pub testimonials: Arc<dyn TestimonialWriter>,
}

#[derive(Clone)]
pub struct GetProfileInteractor {
    readers: ProfileReaders,
}

impl GetProfileInteractor {
    pub fn new(readers: ProfileReaders) -> Self {
        Self { readers }
    }

    pub async fn execute(&self, ctx: ProfileContext) -> AppResult<ProfileDTO> {
        let account_id: Id<Account> = ctx.account_id.try_into()?;
        let profile = self
            .readers
            .profile
            .find_by_account(&account_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        Ok(self.readers.load(profile).await?.into())
    }
}

#[derive(Clone)]
pub struct CreateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl CreateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: CreateProfileDTO) -> AppResult<ProfileDTO> {
        let account_id: Id<Account> = dto.account_id.try_into()?;

        if self.profile_reader.exists_for_account(&account_id).await? {
            warn!("Profile setup repeated for account {}", account_id);
            return Err(AppError::ProfileAlreadyExists);
        }

        let details = ProfileDetails::new(dto.business_name, dto.business_type, dto.phone, dto.city);
        let profile = Profile::new(account_id, details);

        self.profile_writer.insert(profile.clone()).await?;
        self.db_session.commit().await?;

        info!("Profile {} set up for account {}", profile.id, account_id);
        Ok(ProfileAggregate::empty(profile).into())
    }
}

/// Storage keys touched while committing. `uploaded` is undone on rollback,
/// `superseded` is removed once the commit holds.
#[derive(Debug, Default)]
struct MediaBatch {
    uploaded: Vec<String>,
    superseded: Vec<String>,
}

/// Validates a full profile submission and persists it as one unit, or
/// persists nothing.
#[derive(Clone)]
pub struct UpdateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    readers: ProfileReaders,
    writers: ProfileWriters,
    storage: Arc<dyn StorageClient>,
    limits: UploadLimits,
}

impl UpdateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        readers: ProfileReaders,
        writers: ProfileWriters,
        storage: Arc<dyn StorageClient>,
        limits: UploadLimits,
    ) -> Self {
        Self {
            db_session,
            readers,
            writers,
            storage,
            limits,
        }
    }

    pub async fn execute(&self, ctx: ProfileContext, dto: ProfileSubmissionDTO) -> AppResult<ProfileUpdateOutcome> {
        let account_id: Id<Account> = ctx.account_id.try_into()?;
        info!(state = %SubmissionState::Received, account_id = %account_id, "Profile submission received");

        let current = match self.load_locked(&account_id).await {
            Ok(current) => current,
            Err(err) => {
                self.release().await;
                return Err(err);
            }
        };
        let profile_id = current.profile.id;

        info!(state = %SubmissionState::Validating, profile_id = %profile_id, "Validating profile submission");
        let submission = match validate(dto, &current, &self.limits) {
            Ok(submission) => submission,
            Err(report) => {
                self.release().await;
                info!(
                    state = %SubmissionState::Rejected,
                    profile_id = %profile_id,
                    failures = ?report.failures(),
                    "Profile submission rejected"
                );
                return Ok(ProfileUpdateOutcome::Rejected(report));
            }
        };

        info!(state = %SubmissionState::Committing, profile_id = %profile_id, "Committing profile submission");
        let mut media = MediaBatch::default();
        match self.persist(&current, &submission, &mut media).await {
            Ok(refreshed) => {
                info!(state = %SubmissionState::Committed, profile_id = %profile_id, "Profile updated");
                self.discard(&media.superseded).await;
                Ok(ProfileUpdateOutcome::Committed(refreshed.into()))
            }
            Err(err) => {
                error!(
                    state = %SubmissionState::RolledBack,
                    profile_id = %profile_id,
                    error = %err,
                    "Profile update failed, rolling back"
                );
                self.release().await;
                self.discard(&media.uploaded).await;
                Err(AppError::UpdateFailed)
            }
        }
    }

    async fn load_locked(&self, account_id: &Id<Account>) -> AppResult<ProfileAggregate> {
        let profile = self
            .readers
            .profile
            .lock_by_account(account_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.readers.load(profile).await
    }

    /// Writes parent, hero images, team members and testimonials in that
    /// order, then re-reads the result before committing.
    async fn persist(
        &self,
        current: &ProfileAggregate,
        submission: &ValidatedSubmission,
        media: &mut MediaBatch,
    ) -> AppResult<ProfileAggregate> {
        let profile_id = current.profile.id;

        let mut profile = current.profile.clone();
        profile.details = submission.details().clone();
        profile.logo = self
            .resolve(MediaKind::Logo, &profile_id, submission.logo(), profile.logo.take(), media)
            .await?;
        profile.profile_image = self
            .resolve(
                MediaKind::ProfileImage,
                &profile_id,
                submission.profile_image(),
                profile.profile_image.take(),
                media,
            )
            .await?;
        profile.updated_at = Utc::now();
        self.writers.profile.update(profile).await?;

        for change in submission.hero_images() {
            match change {
                RowChange::Create(draft) => {
                    let image = self
                        .resolve(MediaKind::HeroImage, &profile_id, &draft.image, None, media)
                        .await?
                        .ok_or(AppError::ImageRequired("hero_images"))?;
                    let row = HeroImage::new(
                        profile_id,
                        image,
                        draft.caption.clone(),
                        draft.display_order,
                        draft.is_active,
                    );
                    self.writers.hero_images.insert(row).await?;
                }
                RowChange::Update(id, draft) => {
                    let existing = find_row(&current.hero_images, |row| row.id == *id)?;
                    let image = self
                        .resolve(
                            MediaKind::HeroImage,
                            &profile_id,
                            &draft.image,
                            Some(existing.image.clone()),
                            media,
                        )
                        .await?
                        .ok_or(AppError::ImageRequired("hero_images"))?;
                    let row = HeroImage {
                        image,
                        caption: draft.caption.clone(),
                        display_order: draft.display_order,
                        is_active: draft.is_active,
                        ..existing.clone()
                    };
                    self.writers.hero_images.update(row).await?;
                }
                RowChange::Delete(id) => {
                    let existing = find_row(&current.hero_images, |row| row.id == *id)?;
                    self.writers.hero_images.delete(&profile_id, id).await?;
                    media.superseded.push(existing.image.clone());
                }
            }
        }

        for change in submission.team_members() {
            match change {
                RowChange::Create(draft) => {
                    let photo = self
                        .resolve(MediaKind::TeamPhoto, &profile_id, &draft.photo, None, media)
                        .await?;
                    let row = TeamMember {
                        id: Id::generate(),
                        profile_id,
                        name: draft.name.clone(),
                        photo,
                        role_title: draft.role_title.clone(),
                        specialties: draft.specialties.clone(),
                        bio: draft.bio.clone(),
                        credentials: draft.credentials.clone(),
                        display_order: draft.display_order,
                        is_active: draft.is_active,
                    };
                    self.writers.team_members.insert(row).await?;
                }
                RowChange::Update(id, draft) => {
                    let existing = find_row(&current.team_members, |row| row.id == *id)?;
                    let photo = self
                        .resolve(MediaKind::TeamPhoto, &profile_id, &draft.photo, existing.photo.clone(), media)
                        .await?;
                    let row = TeamMember {
                        name: draft.name.clone(),
                        photo,
                        role_title: draft.role_title.clone(),
                        specialties: draft.specialties.clone(),
                        bio: draft.bio.clone(),
                        credentials: draft.credentials.clone(),
                        display_order: draft.display_order,
                        is_active: draft.is_active,
                        ..existing.clone()
                    };
                    self.writers.team_members.update(row).await?;
                }
                RowChange::Delete(id) => {
                    let existing = find_row(&current.team_members, |row| row.id == *id)?;
                    self.writers.team_members.delete(&profile_id, id).await?;
                    media.superseded.extend(existing.photo.clone());
                }
            }
        }

        for change in submission.testimonials() {
            match change {
                RowChange::Create(draft) => {
                    let client_photo = self
                        .resolve(MediaKind::TestimonialPhoto, &profile_id, &draft.client_photo, None, media)
                        .await?;
                    let row = Testimonial {
                        id: Id::generate(),
                        profile_id,
                        client_name: draft.client_name.clone(),
                        client_photo,
                        rating: draft.rating,
                        testimonial_text: draft.testimonial_text.clone(),
                        is_featured: draft.is_featured,
                        is_active: draft.is_active,
                        created_at: Utc::now(),
                    };
                    self.writers.testimonials.insert(row).await?;
                }
                RowChange::Update(id, draft) => {
                    let existing = find_row(&current.testimonials, |row| row.id == *id)?;
                    let client_photo = self
                        .resolve(
                            MediaKind::TestimonialPhoto,
                            &profile_id,
                            &draft.client_photo,
                            existing.client_photo.clone(),
                            media,
                        )
                        .await?;
                    let row = Testimonial {
                        client_name: draft.client_name.clone(),
                        client_photo,
                        rating: draft.rating,
                        testimonial_text: draft.testimonial_text.clone(),
                        is_featured: draft.is_featured,
                        is_active: draft.is_active,
                        ..existing.clone()
                    };
                    self.writers.testimonials.update(row).await?;
                }
                RowChange::Delete(id) => {
                    let existing = find_row(&current.testimonials, |row| row.id == *id)?;
                    self.writers.testimonials.delete(&profile_id, id).await?;
                    media.superseded.extend(existing.client_photo.clone());
                }
            }
        }

        let profile = self
            .readers
            .profile
            .find_by_account(&current.profile.account_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        let refreshed = self.readers.load(profile).await?;

        self.db_session.commit().await?;
        Ok(refreshed)
    }

    /// Applies an image change to the key currently stored in a field,
    /// uploading new bytes under a fresh key.
    async fn resolve(
        &self,
        kind: MediaKind,
        profile_id: &Id<Profile>,
        change: &ImageChange,
        current: Option<String>,
        media: &mut MediaBatch,
    ) -> AppResult<Option<String>> {
        match change {
            ImageChange::Keep => Ok(current),
            ImageChange::Clear => {
                media.superseded.extend(current);
                Ok(None)
            }
            ImageChange::Replace(pending) => {
                let key = kind.key_for(profile_id, pending.image.ext);
                self.storage
                    .upload(&key, pending.data.clone(), pending.image.content_type)
                    .await?;
                media.uploaded.push(key.clone());
                media.superseded.extend(current);
                Ok(Some(key))
            }
        }
    }

    async fn release(&self) {
        if let Err(err) = self.db_session.rollback().await {
            warn!("Failed to roll back profile session: {}", err);
        }
    }

    async fn discard(&self, keys: &[String]) {
        for key in keys {
            if let Err(err) = self.storage.delete(key).await {
                warn!("Failed to delete stored image {}: {}", key, err);
            }
        }
    }
}

fn find_row<T>(rows: &[T], matches: impl Fn(&T) -> bool) -> AppResult<&T> {
    rows.iter()
        .find(|row| matches(row))
        .ok_or_else(|| AppError::RowNotFound("submitted row".to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;
    use mockall::mock;
    use mockall::predicate::always;
    use rstest::{fixture, rstest};

    use crate::application::app_error::{AppError, AppResult};
    use crate::application::dto::profile::{
        CreateProfileDTO, HeroImageFieldsDTO, ProfileContext, ProfileFieldsDTO, ProfileSubmissionDTO,
        ProfileUpdateOutcome, RowSubmission, TestimonialFieldsDTO, UploadedFile,
    };
    use crate::application::interactors::profile::{
        CreateProfileInteractor, GetProfileInteractor, ProfileReaders, ProfileWriters, SubmissionState,
        UpdateProfileInteractor,
    };
    use crate::application::interface::db::DBSession;
    use crate::application::interface::gateway::hero_image::{HeroImageReader, HeroImageWriter};
    use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
    use crate::application::interface::gateway::team_member::{TeamMemberReader, TeamMemberWriter};
    use crate::application::interface::gateway::testimonial::{TestimonialReader, TestimonialWriter};
    use crate::application::interface::storage::{DownloadedFile, StorageClient};
    use crate::application::validation::UploadLimits;
    use crate::domain::entities::account::Account;
    use crate::domain::entities::hero_image::HeroImage;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::{Profile, ProfileDetails};
    use crate::domain::entities::team_member::TeamMember;
    use crate::domain::entities::testimonial::Testimonial;

    // Mocks
    mock! {
        pub DBSessionMock {}

        #[async_trait]
        impl DBSession for DBSessionMock {
            async fn commit(&self) -> AppResult<()>;
            async fn rollback(&self) -> AppResult<()>;
        }
    }

    mock! {
        pub ProfileReaderMock {}

        #[async_trait]
        impl ProfileReader for ProfileReaderMock {
            async fn find_by_account(&self, account_id: &Id<Account>) -> AppResult<Option<Profile>>;
            async fn lock_by_account(&self, account_id: &Id<Account>) -> AppResult<Option<Profile>>;
            async fn exists_for_account(&self, account_id: &Id<Account>) -> AppResult<bool>;
        }
    }

    mock! {
        pub ProfileWriterMock {}

        #[async_trait]
        impl ProfileWriter for ProfileWriterMock {
            async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>>;
            async fn update(&self, profile: Profile) -> AppResult<Id<Profile>>;
        }
    }

    mock! {
        pub HeroImageReaderMock {}

        #[async_trait]
        impl HeroImageReader for HeroImageReaderMock {
            async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<HeroImage>>;
        }
    }

    mock! {
        pub HeroImageWriterMock {}

        #[async_trait]
        impl HeroImageWriter for HeroImageWriterMock {
            async fn insert(&self, row: HeroImage) -> AppResult<Id<HeroImage>>;
            async fn update(&self, row: HeroImage) -> AppResult<Id<HeroImage>>;
            async fn delete(&self, profile_id: &Id<Profile>, id: &Id<HeroImage>) -> AppResult<()>;
        }
    }

    mock! {
        pub TeamMemberReaderMock {}

        #[async_trait]
        impl TeamMemberReader for TeamMemberReaderMock {
            async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<TeamMember>>;
        }
    }

    mock! {
        pub TeamMemberWriterMock {}

        #[async_trait]
        impl TeamMemberWriter for TeamMemberWriterMock {
            async fn insert(&self, row: TeamMember) -> AppResult<Id<TeamMember>>;
            async fn update(&self, row: TeamMember) -> AppResult<Id<TeamMember>>;
            async fn delete(&self, profile_id: &Id<Profile>, id: &Id<TeamMember>) -> AppResult<()>;
        }
    }

    mock! {
        pub TestimonialReaderMock {}

        #[async_trait]
        impl TestimonialReader for TestimonialReaderMock {
            async fn list_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<Testimonial>>;
        }
    }

    mock! {
        pub TestimonialWriterMock {}

        #[async_trait]
        impl TestimonialWriter for TestimonialWriterMock {
            async fn insert(&self, row: Testimonial) -> AppResult<Id<Testimonial>>;
            async fn update(&self, row: Testimonial) -> AppResult<Id<Testimonial>>;
            async fn delete(&self, profile_id: &Id<Profile>, id: &Id<Testimonial>) -> AppResult<()>;
        }
    }

    mock! {
        pub StorageClientMock {}

        #[async_trait]
        impl StorageClient for StorageClientMock {
            async fn ensure_bucket(&self) -> AppResult<()>;
            async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;
            async fn download(&self, key: &str) -> AppResult<DownloadedFile>;
            async fn delete(&self, key: &str) -> AppResult<()>;
        }
    }

    // Constants
    const ACCOUNT_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";

    const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

    const LIMITS: UploadLimits = UploadLimits { max_image_bytes: 1024 };

    /// All mocks an update interactor needs, configured per test.
    #[derive(Default)]
    struct Mocks {
        db_session: MockDBSessionMock,
        profile_reader: MockProfileReaderMock,
        profile_writer: MockProfileWriterMock,
        hero_reader: MockHeroImageReaderMock,
        hero_writer: MockHeroImageWriterMock,
        team_reader: MockTeamMemberReaderMock,
        team_writer: MockTeamMemberWriterMock,
        testimonial_reader: MockTestimonialReaderMock,
        testimonial_writer: MockTestimonialWriterMock,
        storage: MockStorageClientMock,
    }

    impl Mocks {
        fn readers(
            profile: MockProfileReaderMock,
            hero_images: MockHeroImageReaderMock,
            team_members: MockTeamMemberReaderMock,
            testimonials: MockTestimonialReaderMock,
        ) -> ProfileReaders {
            ProfileReaders {
                profile: Arc::new(profile),
                hero_images: Arc::new(hero_images),
                team_members: Arc::new(team_members),
                testimonials: Arc::new(testimonials),
            }
        }

        fn into_interactor(self) -> UpdateProfileInteractor {
            UpdateProfileInteractor::new(
                Arc::new(self.db_session),
                Mocks::readers(
                    self.profile_reader,
                    self.hero_reader,
                    self.team_reader,
                    self.testimonial_reader,
                ),
                ProfileWriters {
                    profile: Arc::new(self.profile_writer),
                    hero_images: Arc::new(self.hero_writer),
                    team_members: Arc::new(self.team_writer),
                    testimonials: Arc::new(self.testimonial_writer),
                },
                Arc::new(self.storage),
                LIMITS,
            )
        }

        /// Profile is found and locked; collections start as given.
        fn with_current(&mut self, profile: &Profile, heroes: Vec<HeroImage>, testimonials: Vec<Testimonial>) {
            let locked = profile.clone();
            self.profile_reader
                .expect_lock_by_account()
                .returning(move |_| Ok(Some(locked.clone())));
            let found = profile.clone();
            self.profile_reader
                .expect_find_by_account()
                .returning(move |_| Ok(Some(found.clone())));
            self.hero_reader
                .expect_list_by_profile()
                .returning(move |_| Ok(heroes.clone()));
            self.team_reader.expect_list_by_profile().returning(|_| Ok(vec![]));
            self.testimonial_reader
                .expect_list_by_profile()
                .returning(move |_| Ok(testimonials.clone()));
        }
    }

    // Fixtures
    #[fixture]
    fn profile() -> Profile {
        let details = ProfileDetails::new(
            "Old Name".to_string(),
            "Salon".to_string(),
            "5550000000".to_string(),
            None,
        );
        Profile::new(ACCOUNT_ID.to_string().try_into().unwrap(), details)
    }

    #[fixture]
    fn ctx() -> ProfileContext {
        ProfileContext {
            account_id: ACCOUNT_ID.to_string(),
        }
    }

    fn hero_row(name: &str) -> RowSubmission<HeroImageFieldsDTO> {
        RowSubmission {
            id: None,
            delete: false,
            fields: HeroImageFieldsDTO {
                image: Some(UploadedFile {
                    filename: Some(name.to_string()),
                    data: Bytes::from_static(PNG_BYTES),
                }),
                ..Default::default()
            },
        }
    }

    #[fixture]
    fn acme() -> ProfileSubmissionDTO {
        ProfileSubmissionDTO {
            profile: ProfileFieldsDTO {
                business_name: Some("Acme Spa".to_string()),
                business_type: Some("Wellness".to_string()),
                phone: Some("5551234567".to_string()),
                ..Default::default()
            },
            hero_images: vec![hero_row("a.png"), hero_row("b.png")],
            team_members: vec![],
            testimonials: vec![RowSubmission {
                id: None,
                delete: false,
                fields: TestimonialFieldsDTO {
                    client_name: Some("Jane".to_string()),
                    rating: Some(5),
                    testimonial_text: Some("Great!".to_string()),
                    ..Default::default()
                },
            }],
        }
    }

    // UpdateProfileInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_update_commits_all_writes(profile: Profile, ctx: ProfileContext, acme: ProfileSubmissionDTO) {
        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![], vec![]);
        mocks
            .profile_writer
            .expect_update()
            .withf(|p| p.details.business_name == "Acme Spa")
            .times(1)
            .returning(|p| Ok(p.id));
        mocks.hero_writer.expect_insert().times(2).returning(|row| Ok(row.id));
        mocks
            .testimonial_writer
            .expect_insert()
            .withf(|row| row.rating == 5 && row.testimonial_text == "Great!")
            .times(1)
            .returning(|row| Ok(row.id));
        mocks
            .storage
            .expect_upload()
            .withf(|key, _, content_type| key.starts_with("hero_images/") && content_type == "image/png")
            .times(2)
            .returning(|_, _, _| Ok(()));
        mocks.db_session.expect_commit().times(1).returning(|| Ok(()));
        mocks.db_session.expect_rollback().times(0);

        let outcome = mocks.into_interactor().execute(ctx, acme).await.unwrap();

        assert!(matches!(outcome, ProfileUpdateOutcome::Committed(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_rejects_fourth_hero_without_writes(
        profile: Profile,
        ctx: ProfileContext,
        mut acme: ProfileSubmissionDTO,
    ) {
        acme.hero_images.push(hero_row("c.png"));
        acme.hero_images.push(hero_row("d.png"));

        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![], vec![]);
        mocks.db_session.expect_rollback().times(1).returning(|| Ok(()));
        mocks.db_session.expect_commit().times(0);
        mocks.storage.expect_upload().times(0);

        let outcome = mocks.into_interactor().execute(ctx, acme).await.unwrap();

        match outcome {
            ProfileUpdateOutcome::Rejected(report) => {
                assert_eq!(report.failures(), vec!["hero_images"]);
            }
            ProfileUpdateOutcome::Committed(_) => panic!("expected rejection"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_rolls_back_when_hero_write_fails(
        profile: Profile,
        ctx: ProfileContext,
        acme: ProfileSubmissionDTO,
    ) {
        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![], vec![]);
        mocks.profile_writer.expect_update().times(1).returning(|p| Ok(p.id));
        mocks
            .hero_writer
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::StorageError("disk full".to_string())));
        mocks.testimonial_writer.expect_insert().times(0);
        mocks.storage.expect_upload().times(1).returning(|_, _, _| Ok(()));
        mocks
            .storage
            .expect_delete()
            .withf(|key| key.starts_with("hero_images/"))
            .times(1)
            .returning(|_| Ok(()));
        mocks.db_session.expect_commit().times(0);
        mocks.db_session.expect_rollback().times(1).returning(|| Ok(()));

        let result = mocks.into_interactor().execute(ctx, acme).await;

        assert!(matches!(result, Err(AppError::UpdateFailed)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_rolls_back_when_upload_fails(profile: Profile, ctx: ProfileContext, acme: ProfileSubmissionDTO) {
        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![], vec![]);
        mocks.profile_writer.expect_update().returning(|p| Ok(p.id));
        mocks.hero_writer.expect_insert().times(0);
        mocks
            .storage
            .expect_upload()
            .times(1)
            .returning(|_, _, _| Err(AppError::StorageError("unreachable".to_string())));
        mocks.storage.expect_delete().times(0);
        mocks.db_session.expect_commit().times(0);
        mocks.db_session.expect_rollback().times(1).returning(|| Ok(()));

        let result = mocks.into_interactor().execute(ctx, acme).await;

        assert!(matches!(result, Err(AppError::UpdateFailed)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_resubmit_updates_rows_in_place(profile: Profile, ctx: ProfileContext) {
        let hero = HeroImage::new(profile.id, "hero_images/existing.png".to_string(), None, 0, true);
        let testimonial = Testimonial {
            id: Id::generate(),
            profile_id: profile.id,
            client_name: "Jane".to_string(),
            client_photo: None,
            rating: 5,
            testimonial_text: "Great!".to_string(),
            is_featured: false,
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        let submission = ProfileSubmissionDTO {
            profile: ProfileFieldsDTO {
                business_name: Some("Acme Spa".to_string()),
                business_type: Some("Wellness".to_string()),
                phone: Some("5551234567".to_string()),
                ..Default::default()
            },
            hero_images: vec![RowSubmission {
                id: Some(hero.id.to_string()),
                delete: false,
                fields: HeroImageFieldsDTO {
                    display_order: Some(0),
                    is_active: Some(true),
                    ..Default::default()
                },
            }],
            team_members: vec![],
            testimonials: vec![RowSubmission {
                id: Some(testimonial.id.to_string()),
                delete: false,
                fields: TestimonialFieldsDTO {
                    client_name: Some("Jane".to_string()),
                    rating: Some(5),
                    testimonial_text: Some("Great!".to_string()),
                    ..Default::default()
                },
            }],
        };

        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![hero.clone()], vec![testimonial.clone()]);
        mocks.profile_writer.expect_update().times(1).returning(|p| Ok(p.id));
        let expected = hero.clone();
        mocks
            .hero_writer
            .expect_update()
            .withf(move |row| *row == expected)
            .times(1)
            .returning(|row| Ok(row.id));
        mocks.hero_writer.expect_insert().times(0);
        let expected = testimonial.clone();
        mocks
            .testimonial_writer
            .expect_update()
            .withf(move |row| *row == expected)
            .times(1)
            .returning(|row| Ok(row.id));
        mocks.testimonial_writer.expect_insert().times(0);
        mocks.storage.expect_upload().times(0);
        mocks.db_session.expect_commit().times(1).returning(|| Ok(()));

        let outcome = mocks.into_interactor().execute(ctx, submission).await.unwrap();

        match outcome {
            ProfileUpdateOutcome::Committed(dto) => {
                assert_eq!(dto.hero_images.len(), 1);
                assert_eq!(dto.testimonials.len(), 1);
            }
            ProfileUpdateOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_cleared_and_deleted_images_removed_after_commit(
        mut profile: Profile,
        ctx: ProfileContext,
        mut acme: ProfileSubmissionDTO,
    ) {
        profile.logo = Some("provider_logos/old.png".to_string());
        let hero = HeroImage::new(profile.id, "hero_images/old.png".to_string(), None, 0, true);
        acme.profile.clear_logo = true;
        acme.hero_images = vec![RowSubmission {
            id: Some(hero.id.to_string()),
            delete: true,
            fields: HeroImageFieldsDTO::default(),
        }];

        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![hero.clone()], vec![]);
        mocks
            .profile_writer
            .expect_update()
            .withf(|p| p.logo.is_none())
            .returning(|p| Ok(p.id));
        let hero_id = hero.id;
        mocks
            .hero_writer
            .expect_delete()
            .withf(move |_, id| *id == hero_id)
            .times(1)
            .returning(|_, _| Ok(()));
        mocks.testimonial_writer.expect_insert().returning(|row| Ok(row.id));
        mocks.db_session.expect_commit().times(1).returning(|| Ok(()));
        mocks
            .storage
            .expect_delete()
            .withf(|key| key == "provider_logos/old.png" || key == "hero_images/old.png")
            .times(2)
            .returning(|_| Ok(()));

        let outcome = mocks.into_interactor().execute(ctx, acme).await.unwrap();

        assert!(matches!(outcome, ProfileUpdateOutcome::Committed(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_without_profile(ctx: ProfileContext, acme: ProfileSubmissionDTO) {
        let mut mocks = Mocks::default();
        mocks.profile_reader.expect_lock_by_account().returning(|_| Ok(None));
        mocks.db_session.expect_rollback().times(1).returning(|| Ok(()));

        let result = mocks.into_interactor().execute(ctx, acme).await;

        assert!(matches!(result, Err(AppError::ProfileNotFound)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_with_invalid_account_id(acme: ProfileSubmissionDTO) {
        let ctx = ProfileContext {
            account_id: "not-a-uuid".to_string(),
        };

        let result = Mocks::default().into_interactor().execute(ctx, acme).await;

        assert!(matches!(result, Err(AppError::InvalidId(_))));
    }

    #[test]
    fn test_submission_state_display() {
        assert_eq!(SubmissionState::Received.to_string(), "received");
        assert_eq!(SubmissionState::RolledBack.to_string(), "rolled_back");
    }

    // GetProfileInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_get_profile(profile: Profile, ctx: ProfileContext) {
        let mut mocks = Mocks::default();
        mocks.with_current(&profile, vec![], vec![]);
        let readers = Mocks::readers(
            mocks.profile_reader,
            mocks.hero_reader,
            mocks.team_reader,
            mocks.testimonial_reader,
        );

        let dto = GetProfileInteractor::new(readers).execute(ctx).await.unwrap();

        assert_eq!(dto.business_name, "Old Name");
        assert_eq!(dto.hero_color, "#4f46e5");
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_profile_not_found(ctx: ProfileContext) {
        let mut profile_reader = MockProfileReaderMock::new();
        profile_reader.expect_find_by_account().returning(|_| Ok(None));
        let readers = Mocks::readers(
            profile_reader,
            MockHeroImageReaderMock::new(),
            MockTeamMemberReaderMock::new(),
            MockTestimonialReaderMock::new(),
        );

        let result = GetProfileInteractor::new(readers).execute(ctx).await;

        assert!(matches!(result, Err(AppError::ProfileNotFound)));
    }

    // CreateProfileInteractor tests
    fn create_dto() -> CreateProfileDTO {
        CreateProfileDTO {
            account_id: ACCOUNT_ID.to_string(),
            business_name: "Acme Spa".to_string(),
            business_type: "Wellness".to_string(),
            phone: "5551234567".to_string(),
            city: Some("Pune".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_profile_success() {
        let mut db_session = MockDBSessionMock::new();
        let mut profile_reader = MockProfileReaderMock::new();
        let mut profile_writer = MockProfileWriterMock::new();

        profile_reader.expect_exists_for_account().with(always()).returning(|_| Ok(false));
        profile_writer.expect_insert().times(1).returning(|p| Ok(p.id));
        db_session.expect_commit().times(1).returning(|| Ok(()));

        let dto = CreateProfileInteractor::new(Arc::new(db_session), Arc::new(profile_reader), Arc::new(profile_writer))
            .execute(create_dto())
            .await
            .unwrap();

        assert_eq!(dto.business_name, "Acme Spa");
        assert_eq!(dto.city.as_deref(), Some("Pune"));
        assert_eq!(dto.account_id, ACCOUNT_ID);
        assert!(dto.hero_images.is_empty());
    }

    #[tokio::test]
    async fn test_create_profile_conflict() {
        let db_session = MockDBSessionMock::new();
        let mut profile_reader = MockProfileReaderMock::new();
        let mut profile_writer = MockProfileWriterMock::new();

        profile_reader.expect_exists_for_account().returning(|_| Ok(true));
        profile_writer.expect_insert().times(0);

        let result =
            CreateProfileInteractor::new(Arc::new(db_session), Arc::new(profile_reader), Arc::new(profile_writer))
                .execute(create_dto())
                .await;

        assert!(matches!(result, Err(AppError::ProfileAlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_profile_concurrent_setup_is_a_conflict() {
        let mut db_session = MockDBSessionMock::new();
        let mut profile_reader = MockProfileReaderMock::new();
        let mut profile_writer = MockProfileWriterMock::new();

        profile_reader.expect_exists_for_account().returning(|_| Ok(false));
        profile_writer
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::ProfileAlreadyExists));
        db_session.expect_commit().times(0);

        let result =
            CreateProfileInteractor::new(Arc::new(db_session), Arc::new(profile_reader), Arc::new(profile_writer))
                .execute(create_dto())
                .await;

        assert!(matches!(result, Err(AppError::ProfileAlreadyExists)));
    }
}
