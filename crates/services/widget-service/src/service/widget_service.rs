//! Public widget flows and banner administration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{validate_email, Banner, CreateCandidate, NewCandidateEmail};
use web::{require_admin, CurrentUser};

use crate::repository::{ContactOutcome, JobOpeningView, NewBanner, WidgetRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sign-up submitted through a widget form.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub widget_key: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WidgetService: Send + Sync {
    async fn active_banner(&self) -> AppResult<Option<Banner>>;

    async fn create_banner(&self, user: CurrentUser, data: NewBanner) -> AppResult<Banner>;

    async fn deactivate_banner(&self, user: CurrentUser, id: Uuid) -> AppResult<()>;

    async fn contact_only(&self, request: ContactRequest) -> AppResult<ContactOutcome>;

    async fn job_openings(&self, widget_key: String) -> AppResult<Vec<JobOpeningView>>;
}

pub struct WidgetManager {
    widgets: Arc<dyn WidgetRepository>,
}

impl WidgetManager {
    pub fn new(widgets: Arc<dyn WidgetRepository>) -> Self {
        Self { widgets }
    }
}

#[async_trait]
impl WidgetService for WidgetManager {
    async fn active_banner(&self) -> AppResult<Option<Banner>> {
        self.widgets.active_banner().await
    }

    async fn create_banner(&self, user: CurrentUser, data: NewBanner) -> AppResult<Banner> {
        require_admin(&user)?;
        let banner = self.widgets.create_banner(data).await?;
        info!(banner_id = %banner.id, user_id = %user.id, "Banner activated");
        Ok(banner)
    }

    async fn deactivate_banner(&self, user: CurrentUser, id: Uuid) -> AppResult<()> {
        require_admin(&user)?;
        if !self.widgets.deactivate_banner(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn contact_only(&self, request: ContactRequest) -> AppResult<ContactOutcome> {
        validate_email(&request.email)?;
        let widget = self
            .widgets
            .find_widget(request.widget_key)
            .await?
            .ok_or_not_found()?;

        let data = CreateCandidate {
            first_name: request.first_name,
            last_name: request.last_name,
            emails: vec![NewCandidateEmail {
                label: None,
                address: request.email,
                is_default: true,
            }],
            ..Default::default()
        };
        let outcome = self.widgets.contact_only(widget.clone(), data).await?;
        if let ContactOutcome::Created(id) = outcome {
            info!(candidate_id = %id, widget = %widget.name, "Candidate joined via widget");
        }
        Ok(outcome)
    }

    async fn job_openings(&self, widget_key: String) -> AppResult<Vec<JobOpeningView>> {
        let widget = self
            .widgets
            .find_widget(widget_key)
            .await?
            .ok_or_not_found()?;
        self.widgets.open_job_openings(widget.domain_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{UserRole, WidgetPage};

    use crate::repository::MockWidgetRepository;

    fn widget() -> WidgetPage {
        WidgetPage {
            id: Uuid::new_v4(),
            domain_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            widget_key: "careers".to_string(),
            name: "Careers page".to_string(),
        }
    }

    fn request(email: &str) -> ContactRequest {
        ContactRequest {
            widget_key: "careers".to_string(),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            email: email.to_string(),
        }
    }

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            role,
            domain_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_unknown_widget_is_not_found() {
        let mut repo = MockWidgetRepository::new();
        repo.expect_find_widget().returning(|_| Ok(None));
        repo.expect_contact_only().never();

        let result = WidgetManager::new(Arc::new(repo))
            .contact_only(request("grace@navy.mil"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_lookup() {
        let mut repo = MockWidgetRepository::new();
        repo.expect_find_widget().never();

        let result = WidgetManager::new(Arc::new(repo))
            .contact_only(request("not-an-email"))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_contact_builds_candidate_for_widget() {
        let page = widget();
        let page_id = page.id;
        let mut repo = MockWidgetRepository::new();
        repo.expect_find_widget()
            .withf(|key| key == "careers")
            .returning(move |_| Ok(Some(page.clone())));
        repo.expect_contact_only()
            .withf(move |w, data| {
                w.id == page_id
                    && data.first_name.as_deref() == Some("Grace")
                    && data.emails.len() == 1
                    && data.emails[0].address == "grace@navy.mil"
            })
            .returning(|_, _| Ok(ContactOutcome::Created(Uuid::nil())));

        let outcome = WidgetManager::new(Arc::new(repo))
            .contact_only(request("grace@navy.mil"))
            .await
            .unwrap();
        assert_eq!(outcome, ContactOutcome::Created(Uuid::nil()));
    }

    #[tokio::test]
    async fn test_banner_admin_only() {
        let mut repo = MockWidgetRepository::new();
        repo.expect_create_banner().never();

        let result = WidgetManager::new(Arc::new(repo))
            .create_banner(
                user(UserRole::User),
                NewBanner {
                    title: "Maintenance".to_string(),
                    text: "Tonight".to_string(),
                    link: None,
                    style: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_deactivate_missing_banner() {
        let mut repo = MockWidgetRepository::new();
        repo.expect_deactivate_banner().returning(|_| Ok(false));

        let result = WidgetManager::new(Arc::new(repo))
            .deactivate_banner(user(UserRole::Admin), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_job_openings_use_widget_domain() {
        let page = widget();
        let domain_id = page.domain_id;
        let mut repo = MockWidgetRepository::new();
        repo.expect_find_widget()
            .returning(move |_| Ok(Some(page.clone())));
        repo.expect_open_job_openings()
            .withf(move |d| *d == domain_id)
            .returning(|_| Ok(Vec::new()));

        let openings = WidgetManager::new(Arc::new(repo))
            .job_openings("careers".to_string())
            .await
            .unwrap();
        assert!(openings.is_empty());
    }
}
