use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn, Instrument};

use super::{DirectoryError, DirectoryState};
use crate::api::{ApiError, UserApi};
use crate::clients::DirectoryClient;
use crate::domain::{User, UserField, UserId};
use crate::messages::{DirectoryRequest, ServiceResponse};

/// Owns the directory state. Every mutation happens inside [`run`](Self::run),
/// one message at a time.
///
/// HTTP calls are spawned in the background and report back through the
/// service's own channel, so a slow request never holds up the loop.
pub struct DirectoryService {
    receiver: mpsc::Receiver<DirectoryRequest>,
    // Weak so the loop still ends once every client is gone.
    sender: mpsc::WeakSender<DirectoryRequest>,
    api: Arc<dyn UserApi>,
    state: DirectoryState,
}

impl DirectoryService {
    pub fn new(buffer_size: usize, api: Arc<dyn UserApi>) -> (Self, DirectoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            sender: sender.downgrade(),
            api,
            state: DirectoryState::default(),
        };
        let client = DirectoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "directory_service", skip(self))]
    pub async fn run(mut self) {
        info!("DirectoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DirectoryRequest::Load { respond_to } => self.handle_load(respond_to),
                DirectoryRequest::BeginEdit { id, respond_to } => self.handle_begin_edit(id, respond_to),
                DirectoryRequest::SetField {
                    field,
                    value,
                    respond_to,
                } => self.handle_set_field(field, value, respond_to),
                DirectoryRequest::Save { respond_to } => self.handle_save(respond_to),
                DirectoryRequest::Cancel { respond_to } => self.handle_cancel(respond_to),
                DirectoryRequest::Delete { id, respond_to } => self.handle_delete(id, respond_to),
                DirectoryRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                DirectoryRequest::LoadCompleted { result, respond_to } => {
                    self.on_load_completed(result, respond_to)
                }
                DirectoryRequest::SaveCompleted {
                    id,
                    result,
                    respond_to,
                } => self.on_save_completed(id, result, respond_to),
                DirectoryRequest::DeleteCompleted {
                    id,
                    result,
                    respond_to,
                } => self.on_delete_completed(id, result, respond_to),
                DirectoryRequest::Shutdown => {
                    info!("DirectoryService shutting down");
                    break;
                }
            }
        }

        info!("DirectoryService stopped");
    }

    /// Runs `call` off the loop and feeds its outcome back as a message.
    ///
    /// If the service is gone by then the completion is dropped, and with it
    /// the caller's responder.
    fn spawn_call<T, F>(
        &self,
        call: F,
        complete: impl FnOnce(Result<T, ApiError>) -> DirectoryRequest + Send + 'static,
    ) where
        T: Send + 'static,
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let sender = self.sender.clone();
        tokio::spawn(
            async move {
                let result = call.await;
                let Some(sender) = sender.upgrade() else {
                    debug!("DirectoryService gone before call completed");
                    return;
                };
                if sender.send(complete(result)).await.is_err() {
                    debug!("DirectoryService stopped before call completed");
                }
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, respond_to))]
    fn handle_load(&self, respond_to: ServiceResponse<usize>) {
        debug!("Processing load request");
        let api = Arc::clone(&self.api);
        self.spawn_call(async move { api.list_users().await }, move |result| {
            DirectoryRequest::LoadCompleted { result, respond_to }
        });
    }

    fn on_load_completed(
        &mut self,
        result: Result<Vec<User>, ApiError>,
        respond_to: ServiceResponse<usize>,
    ) {
        let outcome = match result {
            Ok(users) => {
                self.state = self.state.loaded(users);
                let count = self.state.users().len();
                info!(user_count = count, "Users loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Loading users failed");
                Err(DirectoryError::Api(e))
            }
        };
        let _ = respond_to.send(outcome);
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_begin_edit(&mut self, id: UserId, respond_to: ServiceResponse<User>) {
        debug!("Processing begin_edit request");
        let outcome = self.state.begin_edit(id).map(|next| {
            self.state = next;
            info!("Editing user");
            self.state.draft().cloned()
        });
        let _ = respond_to.send(flatten_draft(outcome));
    }

    #[instrument(fields(field = %field), skip(self, field, value, respond_to))]
    fn handle_set_field(
        &mut self,
        field: UserField,
        value: String,
        respond_to: ServiceResponse<User>,
    ) {
        debug!("Processing set_field request");
        let outcome = self.state.set_field(field, value).map(|next| {
            self.state = next;
            self.state.draft().cloned()
        });
        let _ = respond_to.send(flatten_draft(outcome));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_save(&self, respond_to: ServiceResponse<User>) {
        debug!("Processing save request");
        let Some(editing) = self.state.editing() else {
            warn!("Save requested without a selection");
            let _ = respond_to.send(Err(DirectoryError::NotEditing));
            return;
        };

        let id = editing.id();
        let draft = editing.draft().clone();
        info!(user_id = %id, "Saving user");

        let api = Arc::clone(&self.api);
        self.spawn_call(async move { api.update_user(id, &draft).await }, move |result| {
            DirectoryRequest::SaveCompleted {
                id,
                result,
                respond_to,
            }
        });
    }

    #[instrument(fields(user_id = %id), skip(self, id, result, respond_to))]
    fn on_save_completed(
        &mut self,
        id: UserId,
        result: Result<User, ApiError>,
        respond_to: ServiceResponse<User>,
    ) {
        let outcome = match result {
            Ok(user) => {
                if self.state.user(id).is_none() {
                    debug!("Saved user is no longer in the directory");
                }
                self.state = self.state.saved(id, user.clone());
                info!("User saved");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Saving user failed");
                Err(DirectoryError::Api(e))
            }
        };
        let _ = respond_to.send(outcome);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_cancel(&mut self, respond_to: ServiceResponse<Option<UserId>>) {
        debug!("Processing cancel request");
        let abandoned = self.state.selection();
        self.state = self.state.cancel();
        if let Some(id) = abandoned {
            info!(user_id = %id, "Edit cancelled");
        }
        let _ = respond_to.send(Ok(abandoned));
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_delete(&self, id: UserId, respond_to: ServiceResponse<()>) {
        debug!("Processing delete request");
        let api = Arc::clone(&self.api);
        self.spawn_call(async move { api.delete_user(id).await }, move |result| {
            DirectoryRequest::DeleteCompleted {
                id,
                result,
                respond_to,
            }
        });
    }

    #[instrument(fields(user_id = %id), skip(self, id, result, respond_to))]
    fn on_delete_completed(
        &mut self,
        id: UserId,
        result: Result<(), ApiError>,
        respond_to: ServiceResponse<()>,
    ) {
        let outcome = match result {
            Ok(()) => {
                if self.state.user(id).is_none() {
                    debug!("Deleted user was not in the directory");
                }
                self.state = self.state.removed(id);
                info!(user_count = self.state.users().len(), "User deleted");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Deleting user failed");
                Err(DirectoryError::Api(e))
            }
        };
        let _ = respond_to.send(outcome);
    }
}

// A successful transition always leaves a draft behind.
fn flatten_draft(
    outcome: Result<Option<User>, DirectoryError>,
) -> Result<User, DirectoryError> {
    outcome.and_then(|draft| draft.ok_or(DirectoryError::NotEditing))
}
