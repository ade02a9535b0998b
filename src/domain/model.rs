use crate::domain::codec::{encode_path_segment, encode_query_value};
use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HANDLER_PREFIX: &str = "/access_validation_handler";

/// Every page-access question the backend can answer.
///
/// Variant fields are the identifiers the handler URL is built from, in the
/// order they appear in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Subcommand))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessCheck {
    ClassroomPage {
        classroom_url_fragment: String,
    },
    ClassroomsPage,
    ManageOwnAccount,
    ProfilePage {
        username: String,
    },
    ReleaseCoordinatorPage,
    DiagnosticTestPlayerPage,
    FacilitatorDashboardPage,
    ContributorDashboardAdminPage,
    CreateLearnerGroupPage,
    EditLearnerGroupPage {
        learner_group_id: String,
    },
    LearnerGroupExists {
        learner_group_id: String,
    },
    BlogHomePage,
    BlogPostPage {
        blog_post_url_fragment: String,
    },
    BlogAuthorProfilePage {
        author_username: String,
    },
    CollectionPlayerPage {
        collection_id: String,
    },
    CollectionEditorPage {
        collection_id: String,
    },
    ExplorationEditorPage {
        exploration_id: String,
    },
    ExplorationPlayerPage {
        exploration_id: String,
        /// Sent as `?v=` only when given
        #[cfg_attr(feature = "cli", arg(long = "exploration-version"))]
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<u32>,
    },
    StoryEditorPage {
        story_id: String,
    },
    SkillEditorPage {
        skill_id: String,
    },
    TopicEditorPage {
        topic_id: String,
    },
    TopicViewerPage {
        classroom_url_fragment: String,
        topic_url_fragment: String,
    },
    StoryViewerPage {
        classroom_url_fragment: String,
        topic_url_fragment: String,
        story_url_fragment: String,
    },
    SubtopicViewerPage {
        classroom_url_fragment: String,
        topic_url_fragment: String,
        subtopic_url_fragment: String,
    },
    PracticeSessionPage {
        classroom_url_fragment: String,
        topic_url_fragment: String,
        /// JSON array string, e.g. `[1,2,3]`
        selected_subtopic_ids: String,
    },
    ReviewTestsPage {
        classroom_url_fragment: String,
        topic_url_fragment: String,
        story_url_fragment: String,
    },
}

impl AccessCheck {
    /// Handler name, the first path segment after the prefix.
    pub fn name(&self) -> &'static str {
        match self {
            AccessCheck::ClassroomPage { .. } => "can_access_classroom_page",
            AccessCheck::ClassroomsPage => "can_access_classrooms_page",
            AccessCheck::ManageOwnAccount => "can_manage_own_account",
            AccessCheck::ProfilePage { .. } => "does_profile_exist",
            AccessCheck::ReleaseCoordinatorPage => "can_access_release_coordinator_page",
            AccessCheck::DiagnosticTestPlayerPage => "can_access_diagnostic_test_player_page",
            AccessCheck::FacilitatorDashboardPage => "can_access_facilitator_dashboard_page",
            AccessCheck::ContributorDashboardAdminPage => {
                "can_access_contributor_dashboard_admin_page"
            }
            AccessCheck::CreateLearnerGroupPage => "can_access_create_learner_group_page",
            AccessCheck::EditLearnerGroupPage { .. } => "can_access_edit_learner_group_page",
            AccessCheck::LearnerGroupExists { .. } => "does_learner_group_exist",
            AccessCheck::BlogHomePage => "can_access_blog_home_page",
            AccessCheck::BlogPostPage { .. } => "can_access_blog_post_page",
            AccessCheck::BlogAuthorProfilePage { .. } => "can_access_blog_author_profile_page",
            AccessCheck::CollectionPlayerPage { .. } => "can_access_collection_player_page",
            AccessCheck::CollectionEditorPage { .. } => "can_access_collection_editor_page",
            AccessCheck::ExplorationEditorPage { .. } => "can_access_exploration_editor_page",
            AccessCheck::ExplorationPlayerPage { .. } => "can_access_exploration_player_page",
            AccessCheck::StoryEditorPage { .. } => "can_access_story_editor_page",
            AccessCheck::SkillEditorPage { .. } => "can_access_skill_editor_page",
            AccessCheck::TopicEditorPage { .. } => "can_access_topic_editor_page",
            AccessCheck::TopicViewerPage { .. } => "can_access_topic_viewer_page",
            AccessCheck::StoryViewerPage { .. } => "can_access_story_viewer_page",
            AccessCheck::SubtopicViewerPage { .. } => "can_access_subtopic_viewer_page",
            AccessCheck::PracticeSessionPage { .. } => "can_access_practice_session_page",
            AccessCheck::ReviewTestsPage { .. } => "can_access_review_tests_page",
        }
    }

    /// Fails when a path identifier is empty, `.` or `..`: URL normalization
    /// would fold such a segment away and the GET would hit another route.
    pub fn request(&self) -> Result<AccessRequest> {
        let mut request = AccessRequest::new(self.name());

        match self {
            AccessCheck::ClassroomsPage
            | AccessCheck::ManageOwnAccount
            | AccessCheck::ReleaseCoordinatorPage
            | AccessCheck::DiagnosticTestPlayerPage
            | AccessCheck::FacilitatorDashboardPage
            | AccessCheck::ContributorDashboardAdminPage
            | AccessCheck::CreateLearnerGroupPage
            | AccessCheck::BlogHomePage => {}

            AccessCheck::ClassroomPage {
                classroom_url_fragment,
            } => {
                request.push_query("classroom_url_fragment", classroom_url_fragment);
            }
            AccessCheck::BlogPostPage {
                blog_post_url_fragment,
            } => {
                request.push_query("blog_post_url_fragment", blog_post_url_fragment);
            }

            AccessCheck::ProfilePage { username: id }
            | AccessCheck::EditLearnerGroupPage {
                learner_group_id: id,
            }
            | AccessCheck::LearnerGroupExists {
                learner_group_id: id,
            }
            | AccessCheck::BlogAuthorProfilePage {
                author_username: id,
            }
            | AccessCheck::CollectionPlayerPage { collection_id: id }
            | AccessCheck::CollectionEditorPage { collection_id: id }
            | AccessCheck::ExplorationEditorPage { exploration_id: id }
            | AccessCheck::StoryEditorPage { story_id: id }
            | AccessCheck::SkillEditorPage { skill_id: id }
            | AccessCheck::TopicEditorPage { topic_id: id } => {
                request.push_segment(id);
            }

            AccessCheck::ExplorationPlayerPage {
                exploration_id,
                version,
            } => {
                request.push_segment(exploration_id);
                if let Some(version) = version {
                    request.push_query("v", &version.to_string());
                }
            }

            AccessCheck::TopicViewerPage {
                classroom_url_fragment,
                topic_url_fragment,
            } => {
                request.push_segment(classroom_url_fragment);
                request.push_segment(topic_url_fragment);
            }

            AccessCheck::StoryViewerPage {
                classroom_url_fragment,
                topic_url_fragment,
                story_url_fragment: third,
            }
            | AccessCheck::SubtopicViewerPage {
                classroom_url_fragment,
                topic_url_fragment,
                subtopic_url_fragment: third,
            }
            | AccessCheck::ReviewTestsPage {
                classroom_url_fragment,
                topic_url_fragment,
                story_url_fragment: third,
            } => {
                request.push_segment(classroom_url_fragment);
                request.push_segment(topic_url_fragment);
                request.push_segment(third);
            }

            AccessCheck::PracticeSessionPage {
                classroom_url_fragment,
                topic_url_fragment,
                selected_subtopic_ids,
            } => {
                request.push_segment(classroom_url_fragment);
                request.push_segment(topic_url_fragment);
                request.push_query("selected_subtopic_ids", selected_subtopic_ids);
            }
        }

        if let Some(bad) = request.segments.iter().find(|s| is_unroutable_segment(s)) {
            return Err(AccessError::InvalidIdentifier {
                check: self.name().to_string(),
                value: bad.clone(),
            });
        }

        Ok(request)
    }

    /// Builds a practice-session check from numeric subtopic ids.
    pub fn practice_session(
        classroom_url_fragment: &str,
        topic_url_fragment: &str,
        subtopic_ids: &[u32],
    ) -> Result<Self> {
        Ok(AccessCheck::PracticeSessionPage {
            classroom_url_fragment: classroom_url_fragment.to_string(),
            topic_url_fragment: topic_url_fragment.to_string(),
            selected_subtopic_ids: serde_json::to_string(subtopic_ids)?,
        })
    }
}

fn is_unroutable_segment(segment: &str) -> bool {
    matches!(segment, "" | "." | "..")
}

impl fmt::Display for AccessCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One GET against the handler: raw path segments and query pairs, encoded
/// only when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub endpoint: &'static str,
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
}

impl AccessRequest {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            segments: Vec::new(),
            query: Vec::new(),
        }
    }

    fn push_segment(&mut self, segment: &str) {
        self.segments.push(segment.to_string());
    }

    fn push_query(&mut self, key: &'static str, value: &str) {
        self.query.push((key, value.to_string()));
    }

    /// Path relative to the server root, starting with the handler prefix.
    pub fn path_and_query(&self) -> String {
        let mut out = format!("{}/{}", HANDLER_PREFIX, self.endpoint);

        for segment in &self.segments {
            out.push('/');
            out.push_str(&encode_path_segment(segment));
        }

        for (i, (key, value)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(key);
            out.push('=');
            out.push_str(&encode_query_value(value));
        }

        out
    }
}
