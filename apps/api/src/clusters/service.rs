use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::clusters::builder::build_cluster;
use crate::errors::AppError;
use crate::keywords::service::{validate_keyword, KeywordService, DEFAULT_COUNTRY, DEFAULT_LANGUAGE};
use crate::models::cluster::TopicCluster;
use crate::models::keyword::Intent;
use crate::serp::service::SerpService;
use crate::store::{Record, RecordStore};

impl Record for TopicCluster {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub struct ClusterService {
    keywords: Arc<KeywordService>,
    serp: Arc<SerpService>,
    store: RecordStore<TopicCluster>,
}

impl ClusterService {
    pub fn new(keywords: Arc<KeywordService>, serp: Arc<SerpService>) -> Self {
        Self {
            keywords,
            serp,
            store: RecordStore::in_memory("Topic cluster"),
        }
    }

    pub async fn create(
        &self,
        main_topic: &str,
        intent: Option<Intent>,
    ) -> Result<TopicCluster, AppError> {
        let main_topic = validate_keyword(main_topic)?;
        let analysis = self
            .keywords
            .analyze(main_topic, DEFAULT_COUNTRY, DEFAULT_LANGUAGE)?;
        let serp = self.serp.lookup(main_topic, None, None).await;

        let cluster = build_cluster(main_topic, intent, &analysis, &serp.results);
        info!(
            main_topic = %cluster.main_topic,
            intent = %cluster.intent,
            subtopics = cluster.subtopics.len(),
            relevance = cluster.semantic_relevance,
            "Topic cluster created"
        );
        Ok(self.store.insert(cluster))
    }

    pub fn list(&self) -> Vec<TopicCluster> {
        self.store.list()
    }

    pub fn get(&self, id: Uuid) -> Result<TopicCluster, AppError> {
        self.store.get(id)
    }

    pub fn delete(&self, id: Uuid) -> Result<TopicCluster, AppError> {
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::rng::SharedRng;
    use crate::serp::client::{SerpClient, DEFAULT_TIMEOUT};
    use std::time::Duration;

    fn service() -> ClusterService {
        let keywords = Arc::new(KeywordService::new(
            Arc::new(TtlCache::with_ttl(Duration::from_secs(3600))),
            SharedRng::seeded(2),
        ));
        let serp = Arc::new(SerpService::new(SerpClient::new(None, DEFAULT_TIMEOUT)));
        ClusterService::new(keywords, serp)
    }

    #[tokio::test]
    async fn test_create_on_fallback_serp() {
        let svc = service();
        let cluster = svc.create("email marketing", None).await.unwrap();

        // fallback snippets mention both "learn" and "best practices"; the tie goes commercial
        assert_eq!(cluster.intent, Intent::Commercial);
        assert_eq!(cluster.main_topic, "email marketing");
        assert!(!cluster.subtopics.is_empty());
        assert_eq!(svc.list().len(), 1);
        assert_eq!(svc.get(cluster.id).unwrap().id, cluster.id);
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let svc = service();
        let cluster = svc
            .create("seo strategy", Some(Intent::Informational))
            .await
            .unwrap();
        svc.delete(cluster.id).unwrap();
        assert!(matches!(svc.get(cluster.id), Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete(cluster.id), Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rejects_blank_topic() {
        assert!(matches!(
            service().create(" ", None).await,
            Err(AppError::Validation(_))
        ));
    }
}
