use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::modules::auth::adapter::outgoing::{UserRepositoryMemory, UserRepositoryPostgres};
use crate::modules::auth::application::ports::outgoing::UserRepository;
use crate::modules::course::adapter::outgoing::{CourseRepositoryMemory, CourseRepositoryPostgres};
use crate::modules::course::application::domain::seed::default_catalog;
use crate::modules::course::application::ports::outgoing::CourseRepository;
use crate::modules::enrollment::adapter::outgoing::{
    EnrollmentRepositoryMemory, EnrollmentRepositoryPostgres, LessonProgressRepositoryMemory,
    LessonProgressRepositoryPostgres,
};
use crate::modules::enrollment::application::ports::outgoing::{
    EnrollmentRepository, LessonProgressRepository,
};
use crate::modules::grading::adapter::outgoing::{
    SubmissionRepositoryMemory, SubmissionRepositoryPostgres,
};
use crate::modules::grading::application::ports::outgoing::SubmissionRepository;

use super::readiness::StoreReadiness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    Durable,
    Fallback,
}

impl StorageMode {
    fn as_u8(self) -> u8 {
        match self {
            StorageMode::Durable => 1,
            StorageMode::Fallback => 2,
        }
    }
}

/// One backend's repositories. Obtained from [`Storage::resolve`] and used for
/// a whole operation so a single call never straddles two backends.
#[derive(Clone)]
pub struct StoreHandle {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub lesson_progress: Arc<dyn LessonProgressRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
}

impl StoreHandle {
    /// Process-local maps seeded with the static catalog.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(UserRepositoryMemory::new()),
            courses: Arc::new(CourseRepositoryMemory::with_catalog(default_catalog())),
            enrollments: Arc::new(EnrollmentRepositoryMemory::new()),
            lesson_progress: Arc::new(LessonProgressRepositoryMemory::new()),
            submissions: Arc::new(SubmissionRepositoryMemory::new()),
        }
    }

    pub fn postgres(db: Arc<DatabaseConnection>) -> Self {
        Self {
            users: Arc::new(UserRepositoryPostgres::new(Arc::clone(&db))),
            courses: Arc::new(CourseRepositoryPostgres::new(Arc::clone(&db))),
            enrollments: Arc::new(EnrollmentRepositoryPostgres::new(Arc::clone(&db))),
            lesson_progress: Arc::new(LessonProgressRepositoryPostgres::new(Arc::clone(&db))),
            submissions: Arc::new(SubmissionRepositoryPostgres::new(db)),
        }
    }
}

/// Picks the durable store when it is ready and the in-memory fallback
/// otherwise. Fallback writes are never copied back to the durable store.
#[derive(Clone)]
pub struct Storage {
    durable: Option<StoreHandle>,
    fallback: StoreHandle,
    readiness: Arc<dyn StoreReadiness>,
    last_mode: Arc<AtomicU8>,
}

impl Storage {
    pub fn new(
        durable: Option<StoreHandle>,
        fallback: StoreHandle,
        readiness: Arc<dyn StoreReadiness>,
    ) -> Self {
        Self {
            durable,
            fallback,
            readiness,
            last_mode: Arc::new(AtomicU8::new(0)),
        }
    }

    /// Fallback only, for deployments without `DATABASE_URL`.
    pub fn memory_only() -> Self {
        Self::new(
            None,
            StoreHandle::in_memory(),
            Arc::new(super::readiness::NeverReady),
        )
    }

    pub fn mode(&self) -> StorageMode {
        match self.durable {
            Some(_) if self.readiness.is_ready() => StorageMode::Durable,
            _ => StorageMode::Fallback,
        }
    }

    /// Backend for the current operation. Readiness is read once here.
    pub fn resolve(&self) -> StoreHandle {
        let mode = self.mode();
        let previous = self.last_mode.swap(mode.as_u8(), Ordering::SeqCst);
        if previous != mode.as_u8() {
            match mode {
                StorageMode::Durable => tracing::info!("Storage switched to durable backend"),
                StorageMode::Fallback if self.durable.is_some() => tracing::warn!(
                    "Durable store not ready; serving from in-memory fallback"
                ),
                StorageMode::Fallback => {
                    tracing::info!("No durable store configured; using in-memory storage")
                }
            }
        }

        match (&self.durable, mode) {
            (Some(durable), StorageMode::Durable) => durable.clone(),
            _ => self.fallback.clone(),
        }
    }
}
