use crate::core::{AccessCheck, AccessValidator, ConfigProvider};
use crate::utils::error::{AccessError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

pub const DEFAULT_USER_AGENT: &str = concat!("page-access/", env!("CARGO_PKG_VERSION"));

/// Thin client over the access validation handler.
///
/// One GET per check. A 2xx answer means the page may be shown; anything
/// else comes back as [`AccessError::Rejected`] carrying the raw body.
#[derive(Debug, Clone)]
pub struct AccessValidationClient {
    client: Client,
    base_url: String,
}

impl AccessValidationClient {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_url("base_url", config.base_url())?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                AccessError::InvalidConfigValueError {
                    field: "server.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| AccessError::InvalidConfigValueError {
                    field: format!("server.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent())
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, check: &AccessCheck) -> Result<String> {
        Ok(format!(
            "{}{}",
            self.base_url,
            check.request()?.path_and_query()
        ))
    }

    pub async fn validate_access_to_classroom_page(
        &self,
        classroom_url_fragment: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::ClassroomPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_classrooms_page(&self) -> Result<()> {
        self.validate(&AccessCheck::ClassroomsPage).await
    }

    pub async fn validate_can_manage_own_account(&self) -> Result<()> {
        self.validate(&AccessCheck::ManageOwnAccount).await
    }

    pub async fn does_profile_exist(&self, username: &str) -> Result<()> {
        self.validate(&AccessCheck::ProfilePage {
            username: username.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_release_coordinator_page(&self) -> Result<()> {
        self.validate(&AccessCheck::ReleaseCoordinatorPage).await
    }

    pub async fn validate_access_to_diagnostic_test_player_page(&self) -> Result<()> {
        self.validate(&AccessCheck::DiagnosticTestPlayerPage).await
    }

    pub async fn validate_access_to_facilitator_dashboard_page(&self) -> Result<()> {
        self.validate(&AccessCheck::FacilitatorDashboardPage).await
    }

    pub async fn validate_access_to_contributor_dashboard_admin_page(&self) -> Result<()> {
        self.validate(&AccessCheck::ContributorDashboardAdminPage).await
    }

    pub async fn validate_access_to_learner_group_creator_page(&self) -> Result<()> {
        self.validate(&AccessCheck::CreateLearnerGroupPage).await
    }

    pub async fn validate_access_to_learner_group_editor_page(
        &self,
        learner_group_id: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::EditLearnerGroupPage {
            learner_group_id: learner_group_id.to_string(),
        })
        .await
    }

    pub async fn does_learner_group_exist(&self, learner_group_id: &str) -> Result<()> {
        self.validate(&AccessCheck::LearnerGroupExists {
            learner_group_id: learner_group_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_blog_home_page(&self) -> Result<()> {
        self.validate(&AccessCheck::BlogHomePage).await
    }

    pub async fn validate_access_to_blog_post_page(
        &self,
        blog_post_url_fragment: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::BlogPostPage {
            blog_post_url_fragment: blog_post_url_fragment.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_blog_author_profile_page(
        &self,
        author_username: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::BlogAuthorProfilePage {
            author_username: author_username.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_collection_player_page(
        &self,
        collection_id: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::CollectionPlayerPage {
            collection_id: collection_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_collection_editor_page(
        &self,
        collection_id: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::CollectionEditorPage {
            collection_id: collection_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_exploration_editor_page(
        &self,
        exploration_id: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::ExplorationEditorPage {
            exploration_id: exploration_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_exploration_player_page(
        &self,
        exploration_id: &str,
        version: Option<u32>,
    ) -> Result<()> {
        self.validate(&AccessCheck::ExplorationPlayerPage {
            exploration_id: exploration_id.to_string(),
            version,
        })
        .await
    }

    pub async fn validate_access_to_story_editor_page(&self, story_id: &str) -> Result<()> {
        self.validate(&AccessCheck::StoryEditorPage {
            story_id: story_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_skill_editor_page(&self, skill_id: &str) -> Result<()> {
        self.validate(&AccessCheck::SkillEditorPage {
            skill_id: skill_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_topic_editor_page(&self, topic_id: &str) -> Result<()> {
        self.validate(&AccessCheck::TopicEditorPage {
            topic_id: topic_id.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_topic_viewer_page(
        &self,
        classroom_url_fragment: &str,
        topic_url_fragment: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::TopicViewerPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
            topic_url_fragment: topic_url_fragment.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_story_viewer_page(
        &self,
        classroom_url_fragment: &str,
        topic_url_fragment: &str,
        story_url_fragment: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::StoryViewerPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
            topic_url_fragment: topic_url_fragment.to_string(),
            story_url_fragment: story_url_fragment.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_subtopic_viewer_page(
        &self,
        classroom_url_fragment: &str,
        topic_url_fragment: &str,
        subtopic_url_fragment: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::SubtopicViewerPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
            topic_url_fragment: topic_url_fragment.to_string(),
            subtopic_url_fragment: subtopic_url_fragment.to_string(),
        })
        .await
    }

    /// `selected_subtopic_ids` is a JSON array string such as `[1,2,3]`; see
    /// [`AccessCheck::practice_session`] to build one from numbers.
    pub async fn validate_access_to_practice_session_page(
        &self,
        classroom_url_fragment: &str,
        topic_url_fragment: &str,
        selected_subtopic_ids: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::PracticeSessionPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
            topic_url_fragment: topic_url_fragment.to_string(),
            selected_subtopic_ids: selected_subtopic_ids.to_string(),
        })
        .await
    }

    pub async fn validate_access_to_review_tests_page(
        &self,
        classroom_url_fragment: &str,
        topic_url_fragment: &str,
        story_url_fragment: &str,
    ) -> Result<()> {
        self.validate(&AccessCheck::ReviewTestsPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
            topic_url_fragment: topic_url_fragment.to_string(),
            story_url_fragment: story_url_fragment.to_string(),
        })
        .await
    }
}

#[async_trait::async_trait]
impl AccessValidator for AccessValidationClient {
    async fn validate(&self, check: &AccessCheck) -> Result<()> {
        let url = self.url_for(check)?;

        tracing::debug!("Checking access: GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("{} answered {}", check, status);

        if status.is_success() {
            // body carries nothing the caller needs
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{} rejected with HTTP {}", check, status.as_u16());

        Err(AccessError::Rejected {
            check: check.name().to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
