// ==================== SHELL / NAVIGATION ====================
// Maps the three destinations of the UI onto the active controller. Each
// navigation builds a fresh controller instance and only installs it after
// its entry fetch succeeds, so a fetch belonging to an abandoned navigation
// can never write into whatever view the user moved on to.

use crate::controllers::{FormController, ListController};
use crate::services::UserService;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Edit(String),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let rest = path.strip_prefix('/')?;
        match rest {
            "" => Some(Route::List),
            "create" => Some(Route::Create),
            _ => match rest.strip_prefix("edit/") {
                Some(id) if !id.is_empty() => Some(Route::Edit(id.to_string())),
                _ => None,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Edit(id) => format!("/edit/{}", id),
        }
    }
}

pub enum ActiveView {
    List(ListController),
    Form(FormController),
}

pub struct Shell {
    service: UserService,
    active: Option<ActiveView>,
}

impl Shell {
    pub fn new(service: UserService) -> Shell {
        Shell {
            service,
            active: None,
        }
    }

    /// Switches the active controller to the given destination. When an
    /// edit entry fails (record gone, storage down) the shell reports the
    /// error and lands on the list instead.
    pub async fn navigate(&mut self, route: Route) -> Result<(), AppError> {
        match route {
            Route::List => {
                let mut list = ListController::new(self.service.clone());
                list.enter().await?;
                self.active = Some(ActiveView::List(list));
                Ok(())
            }
            Route::Create => {
                self.active = Some(ActiveView::Form(FormController::create(
                    self.service.clone(),
                )));
                Ok(())
            }
            Route::Edit(id) => {
                let mut form = FormController::edit(self.service.clone(), id);
                if let Err(e) = form.enter().await {
                    // The form never becomes the active view; fall back to
                    // the list so the user is not left on a dead screen
                    let mut list = ListController::new(self.service.clone());
                    match list.enter().await {
                        Ok(()) => self.active = Some(ActiveView::List(list)),
                        Err(list_err) => {
                            log::error!("❌ Fallback to list failed: {}", list_err);
                        }
                    }
                    return Err(e);
                }
                self.active = Some(ActiveView::Form(form));
                Ok(())
            }
        }
    }

    pub fn list(&self) -> Option<&ListController> {
        match &self.active {
            Some(ActiveView::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListController> {
        match &mut self.active {
            Some(ActiveView::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&FormController> {
        match &self.active {
            Some(ActiveView::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        match &mut self.active {
            Some(ActiveView::Form(form)) => Some(form),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::FormMode;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn shell() -> Shell {
        Shell::new(UserService::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn test_route_parse_and_format_round_trip() {
        for route in [
            Route::List,
            Route::Create,
            Route::Edit("42".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }

        assert_eq!(Route::parse("/edit/abc-def"), Some(Route::Edit("abc-def".to_string())));
        assert_eq!(Route::parse("/edit/"), None);
        assert_eq!(Route::parse("/unknown"), None);
        assert_eq!(Route::parse("create"), None);
    }

    #[tokio::test]
    async fn test_navigate_list_installs_ready_list() {
        let mut shell = shell();
        shell.navigate(Route::List).await.unwrap();

        let list = shell.list().unwrap();
        assert_eq!(list.users().len(), 2);
        assert!(shell.form().is_none());
    }

    #[tokio::test]
    async fn test_navigate_create_installs_empty_form() {
        let mut shell = shell();
        shell.navigate(Route::Create).await.unwrap();

        let form = shell.form().unwrap();
        assert_eq!(*form.mode(), FormMode::Create);
        assert!(form.values().is_empty());
    }

    #[tokio::test]
    async fn test_navigate_edit_prefills_form() {
        let mut shell = shell();
        shell.navigate(Route::Edit("2".to_string())).await.unwrap();

        let form = shell.form().unwrap();
        assert_eq!(form.values()["firstName"], "Mohan");
    }

    #[tokio::test]
    async fn test_failed_edit_entry_falls_back_to_list() {
        let mut shell = shell();
        let err = shell
            .navigate(Route::Edit("missing".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(shell.form().is_none());
        assert!(shell.list().is_some());
    }

    #[tokio::test]
    async fn test_stale_edit_fetch_cannot_touch_the_active_form() {
        let mut shell = shell();
        let service = UserService::new(Arc::new(MemoryStore::new()));

        // An edit entry is started, then the user navigates to the create
        // form before it resolves
        let mut abandoned = FormController::edit(service, "1".to_string());
        shell.navigate(Route::Create).await.unwrap();

        // The old fetch finally resolves into its own abandoned instance
        abandoned.enter().await.unwrap();
        assert_eq!(abandoned.values()["firstName"], "Rahul");

        // The active create form never saw any of it
        let form = shell.form().unwrap();
        assert_eq!(*form.mode(), FormMode::Create);
        assert!(form.values().is_empty());
    }
}
