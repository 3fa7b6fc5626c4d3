//! Operator session: the API client, the active project and the cached
//! catalog, with every remote action reported to a [`Notifier`].
//!
//! Failed actions leave the session as it was before the call.

mod notify;

pub use notify::{Level, LogNotifier, MemoryNotifier, Notifier};

use std::path::Path;

use tracing::debug;

use crate::api::{CloodClient, Token};
use crate::catalog::Catalog;
use crate::error::{CloodError, Result};
use crate::input::{Case, CaseBatch, CaseIngestor};
use crate::query::{QueryFeature, RetainRequest, RetrieveRequest, RetrieveResponse};
use crate::schema::Project;

/// Explicit session state for one operator.
pub struct Session {
    client: CloodClient,
    catalog: Option<Catalog>,
    project: Option<Project>,
    notifier: Box<dyn Notifier>,
}

impl Session {
    pub fn new(client: CloodClient, notifier: Box<dyn Notifier>) -> Self {
        Self {
            client,
            catalog: None,
            project: None,
            notifier,
        }
    }

    pub fn client(&self) -> &CloodClient {
        &self.client
    }

    /// The catalog, once loaded.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// The active project.
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Make `project` active without contacting the server.
    pub fn set_project(&mut self, project: Project) {
        self.project = Some(project);
    }

    /// Fetch the catalog on first use.
    pub fn load_catalog(&mut self) -> Result<&Catalog> {
        if self.catalog.is_none() {
            let catalog = self.report(
                self.client.catalog(),
                "Configuration loaded.",
                "Could not load configuration",
            )?;
            self.catalog = Some(catalog);
        }
        self.catalog
            .as_ref()
            .ok_or_else(|| CloodError::Config("catalog not loaded".to_string()))
    }

    /// All projects on the server.
    pub fn projects(&self) -> Result<Vec<Project>> {
        let result = self.client.list_projects();
        if let Err(e) = &result {
            self.notify_error("Could not load projects", e);
        }
        result
    }

    /// Fetch the project with this id and make it active.
    pub fn select_project(&mut self, id: &str) -> Result<&Project> {
        let project = self
            .projects()?
            .into_iter()
            .find(|p| p.id.as_deref() == Some(id))
            .ok_or_else(|| CloodError::NoProject(format!("no project with id '{}'", id)));
        let project = self.report(project, "Project selected.", "Could not select project")?;
        Ok(&*self.project.insert(project))
    }

    /// Create `project` on the server and make it active.
    pub fn create_project(&mut self, project: &Project) -> Result<&Project> {
        let created = self.report(
            self.client.create_project(project),
            "New project saved.",
            "Error saving new project",
        )?;
        Ok(&*self.project.insert(created))
    }

    /// Push `project` to the server; it becomes the active project on success.
    pub fn update_project(&mut self, project: Project) -> Result<()> {
        self.report(
            self.client.update_project(&project),
            "Project updated.",
            "Error updating project",
        )?;
        self.project = Some(project);
        Ok(())
    }

    pub fn delete_project(&mut self, id: &str) -> Result<()> {
        self.report(
            self.client.delete_project(id),
            "Project deleted.",
            "Error deleting project",
        )?;
        if self.project.as_ref().and_then(|p| p.id.as_deref()) == Some(id) {
            self.project = None;
        }
        Ok(())
    }

    /// Commit the active project's schema as its casebase.
    pub fn create_index_mapping(&mut self) -> Result<()> {
        let project = self.active()?;
        self.report(
            self.client.create_index_mapping(project),
            "Casebase created.",
            "Error creating casebase",
        )?;
        self.mark_has_casebase();
        Ok(())
    }

    /// Ingest a case file against the active project's attributes.
    pub fn ingest(&self, path: impl AsRef<Path>) -> Result<CaseBatch> {
        let project = self.active()?;
        match CaseIngestor::new(&project.attributes).ingest_file(path) {
            Ok(batch) => {
                self.notifier
                    .notify(Level::Info, &format!("{} cases ready to upload.", batch.len()));
                Ok(batch)
            }
            Err(e) => {
                self.notifier.notify(Level::Warning, &e.to_string());
                Err(e.into())
            }
        }
    }

    /// Upload an ingested batch to the active project's casebase.
    pub fn save_casebase(&mut self, batch: &CaseBatch) -> Result<()> {
        let id = self.active()?.require_id()?.to_string();
        self.report(
            self.client.insert_cases(&id, &batch.data),
            "Cases added to casebase.",
            "Error adding cases",
        )?;
        self.mark_has_casebase();
        Ok(())
    }

    /// Retrieve the `topk` cases most similar to `features`.
    pub fn retrieve(
        &self,
        features: Vec<QueryFeature>,
        topk: usize,
        explanation: bool,
    ) -> Result<RetrieveResponse> {
        let project = self.active()?.clone();
        let request = self.warn_on_err(RetrieveRequest::new(project, features))?;
        let request = request.with_topk(topk).with_explanation(explanation);
        self.report(
            self.client.retrieve(&request),
            "Cases retrieved.",
            "An error occurred while trying to retrieve cases",
        )
    }

    /// Add one case to the active project's casebase.
    pub fn retain(&self, case: Case) -> Result<()> {
        let project = self.active()?.clone();
        let request = self.warn_on_err(RetainRequest::new(project, case))?;
        self.report(
            self.client.retain(&request),
            "New case added.",
            "Case was not added (duplicates are rejected unless the project allows them)",
        )
    }

    pub fn tokens(&self) -> Result<Vec<Token>> {
        let result = self.client.list_tokens();
        if let Err(e) = &result {
            self.notify_error("Could not load tokens", e);
        }
        result
    }

    /// Create a token; the result carries the secret.
    pub fn create_token(&self, token: &Token) -> Result<Token> {
        self.report(
            self.client.create_token(token),
            "New token saved.",
            "Error saving new token",
        )
    }

    pub fn delete_token(&self, id: &str) -> Result<()> {
        self.report(
            self.client.delete_token(id),
            "Token deleted.",
            "Error deleting token",
        )
    }

    fn active(&self) -> Result<&Project> {
        self.project
            .as_ref()
            .ok_or_else(|| CloodError::NoProject("no project selected".to_string()))
    }

    fn mark_has_casebase(&mut self) {
        if let Some(project) = self.project.as_mut() {
            project.has_casebase = true;
        }
    }

    fn report<T>(&self, result: Result<T>, success: &str, failure: &str) -> Result<T> {
        match &result {
            Ok(_) => self.notifier.notify(Level::Success, success),
            Err(e) => self.notify_error(failure, e),
        }
        result
    }

    fn warn_on_err<T, E>(&self, result: std::result::Result<T, E>) -> Result<T>
    where
        E: Into<CloodError>,
    {
        result.map_err(|e| {
            let e = e.into();
            self.notifier.notify(Level::Warning, &e.to_string());
            e
        })
    }

    fn notify_error(&self, failure: &str, error: &CloodError) {
        debug!(%error, "{}", failure);
        self.notifier
            .notify(Level::Error, &format!("{}: {}", failure, error));
    }
}
