use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use std::sync::Arc;

use crate::modules::course::application::domain::entities::Course;
use crate::modules::course::application::ports::outgoing::course_repository::{
    CourseRepository, CourseRepositoryError,
};

use super::sea_orm_entity::courses::{
    ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as CourseEntity,
    Model as CourseModel,
};

#[derive(Clone, Debug)]
pub struct CourseRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CourseRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: CourseModel) -> Course {
        Course {
            id: model.id,
            title: model.title,
            description: model.description,
            instructor: model.instructor,
            duration: model.duration,
            units: model.units,
            schedule: model.schedule,
            category: model.category,
            price: model.price,
            is_premium: model.is_premium,
        }
    }

    fn to_active(course: Course) -> CourseActiveModel {
        CourseActiveModel {
            id: Set(course.id),
            title: Set(course.title),
            description: Set(course.description),
            instructor: Set(course.instructor),
            duration: Set(course.duration),
            units: Set(course.units),
            schedule: Set(course.schedule),
            category: Set(course.category),
            price: Set(course.price),
            is_premium: Set(course.is_premium),
        }
    }

    /// Inserts `catalog` when the table is empty. Returns how many rows were written.
    pub async fn seed_if_empty(&self, catalog: Vec<Course>) -> Result<u64, DbErr> {
        let existing = CourseEntity::find().count(&*self.db).await?;
        if existing > 0 || catalog.is_empty() {
            return Ok(0);
        }

        let count = catalog.len() as u64;
        CourseEntity::insert_many(catalog.into_iter().map(Self::to_active))
            .exec(&*self.db)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CourseRepository for CourseRepositoryPostgres {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let models = CourseEntity::find()
            .order_by_asc(CourseColumn::Title)
            .all(&*self.db)
            .await
            .map_err(|e| CourseRepositoryError::DatabaseError(e.to_string()))?;
        Ok(models.into_iter().map(Self::to_domain).collect())
    }

    async fn find_by_id(&self, course_id: &str) -> Result<Option<Course>, CourseRepositoryError> {
        let model = CourseEntity::find_by_id(course_id.to_string())
            .one(&*self.db)
            .await
            .map_err(|e| CourseRepositoryError::DatabaseError(e.to_string()))?;
        Ok(model.map(Self::to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::course::application::domain::seed::default_catalog;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(id: &str, price: i64) -> CourseModel {
        CourseModel {
            id: id.to_string(),
            title: id.to_string(),
            description: "d".to_string(),
            instructor: "i".to_string(),
            duration: "1 week".to_string(),
            units: "1 unit".to_string(),
            schedule: "s".to_string(),
            category: "c".to_string(),
            price,
            is_premium: true,
        }
    }

    #[tokio::test]
    async fn find_by_id_maps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model("ai-agents", 19900)]])
            .into_connection();
        let repo = CourseRepositoryPostgres::new(Arc::new(db));

        let course = repo.find_by_id("ai-agents").await.unwrap().unwrap();

        assert_eq!(course.id, "ai-agents");
        assert_eq!(course.price, 19900);
        assert!(!course.is_free());
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<CourseModel>::new()])
            .into_connection();
        let repo = CourseRepositoryPostgres::new(Arc::new(db));

        assert!(repo.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn database_errors_are_mapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = CourseRepositoryPostgres::new(Arc::new(db));

        let result = repo.list_courses().await;

        assert!(matches!(result, Err(CourseRepositoryError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn seed_skips_populated_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![std::collections::BTreeMap::from([(
                "num_items".to_string(),
                sea_orm::Value::BigInt(Some(3)),
            )])]])
            .into_connection();
        let repo = CourseRepositoryPostgres::new(Arc::new(db));

        let written = repo.seed_if_empty(default_catalog()).await.unwrap();

        assert_eq!(written, 0);
    }
}
