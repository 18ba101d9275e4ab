use std::fmt::{Debug, Display};
use std::hash::Hash;

use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record must implement to be held by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Overwrite the ID. The actor calls this on create and replace, so
    /// whatever the caller supplied is never what gets stored.
    fn assign_id(&mut self, id: Self::Id);

    /// Checks a candidate before it is stored by `create`.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Errors crossing the actor boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        item: T,
        respond_to: Response<T>,
    },
    Replace {
        id: T::Id,
        item: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Shutdown,
    #[cfg(test)]
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Single owner of an insertion-ordered collection. Every request is handled
/// to completion before the next one is received, so mutations never race.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    /// Creates the actor and the client handle that talks to it.
    ///
    /// # Arguments
    /// * `buffer_size` - Capacity of the request channel
    /// * `next_id_fn` - Id generator; must never return the same id twice
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Main actor loop. Ends on `Shutdown` or when every client is dropped.
    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("Resource actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Create { item, respond_to } => {
                    let _ = respond_to.send(self.handle_create(item));
                }
                ResourceRequest::Replace { id, item, respond_to } => {
                    let _ = respond_to.send(self.handle_replace(id, item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Shutdown => {
                    info!("Resource actor shutting down");
                    break;
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!(remaining = self.store.len(), "Resource actor stopped");
    }

    /// Validation runs before an id is drawn, so a rejected candidate never
    /// burns an id.
    #[instrument(skip(self, item))]
    fn handle_create(&mut self, mut item: T) -> Result<T, FrameworkError> {
        if let Err(reason) = item.validate() {
            warn!(%reason, "Rejected create");
            return Err(FrameworkError::Validation(reason));
        }

        let id = (self.next_id_fn)();
        item.assign_id(id.clone());
        self.store.insert(id.clone(), item.clone());

        info!(id = %id, "Item created");
        Ok(item)
    }

    #[instrument(skip(self, item))]
    fn handle_replace(&mut self, id: T::Id, mut item: T) -> Result<T, FrameworkError> {
        match self.store.get_mut(&id) {
            Some(slot) => {
                item.assign_id(id.clone());
                *slot = item.clone();
                debug!("Item replaced");
                Ok(item)
            }
            None => Err(FrameworkError::NotFound(id.to_string())),
        }
    }

    #[instrument(skip(self))]
    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        // shift_remove keeps the relative order of the remaining items
        match self.store.shift_remove(&id) {
            Some(_) => {
                debug!("Item deleted");
                Ok(())
            }
            None => Err(FrameworkError::NotFound(id.to_string())),
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn create(&self, item: T) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { item, respond_to }).await
    }

    pub async fn replace(&self, id: T::Id, item: T) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Replace { id, item, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to }).await
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================
