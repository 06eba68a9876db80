//! # Core Actor Framework
//!
//! This module defines the generic building blocks the catalog, identity and
//! order stores are built on.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all resource types must implement.
//! - [`ResourceActor`]: The generic actor that owns a store of entities.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound, Conflict).
//!
//! ## Units of Work
//!
//! Every request is processed to completion before the next one is read from the
//! mailbox, so each request is an isolated unit of work against the store. Hooks
//! never touch the stored entity directly: they run against a staged clone which
//! is written back only when the hook returns `Ok`. A [`ResourceRequest::Batch`]
//! extends the same guarantee to several entities at once.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Architecture Note
/// By defining a contract (`ActorEntity`) that all our resource types (User, Product, Order)
/// must satisfy, we can write the `ResourceActor` logic *once* and reuse it everywhere.
///
/// We use "Associated Types" (type Id, type Create, etc.) to enforce type safety.
/// A `User` entity requires a `UserCreate` payload, and you can't accidentally send it
/// a `ProductCreate` payload.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g., calling other actors).
/// It also defines a `Context` type, which is injected into every hook. This allows "Late Binding"
/// of dependencies (passing clients to `run()` instead of `new()`).
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::unique_key`]
/// - [`ActorEntity::on_create`]
/// - [`ActorEntity::on_delete`]
///
/// The defaults do nothing.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The data carried by a delete request (e.g. who is asking). Use `()` if none.
    type Delete: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// It is boxed into [`FrameworkError::EntityError`] on the way back to the
    /// client and recovered with [`FrameworkError::into_entity_error`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// A key that must be unique across the store (e.g. a normalized email).
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// A failure here means the entity is never stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    /// A failure here keeps the entity.
    async fn on_delete(
        &self,
        _params: Self::Delete,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflicting item: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the concrete entity error, or hands the framework error back.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to **CRUD** operations plus two extensions:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource. Replies with the stored entity.
/// - **Get**: Fetches the current state of the resource by ID.
/// - **List**: Snapshot of every stored entity.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing resource.
/// - **Delete**: Removes the resource.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
/// - **Batch**: Executes several actions, possibly on different entities, all-or-nothing.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        params: T::Delete,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Batch {
        ops: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each actor processes its own messages *sequentially* in a loop, so the `store`
/// needs no `Mutex`. Two clients racing for the last unit of stock are simply
/// served one after the other.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Product" instead of "pedidos::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let result = self.create(id.clone(), params, &context).await;
                    match &result {
                        Ok(_) => {
                            self.next_id += 1;
                            info!(entity_type, %id, size = self.store.len(), "Created");
                        }
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut staged) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = self.conflicting_key(&id, &staged) {
                        warn!(entity_type, %id, key, "Update conflicts");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                        continue;
                    }
                    self.store.insert(id.clone(), staged.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(staged));
                }
                ResourceRequest::Delete {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(params, &context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(mut staged) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), staged);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Batch { ops, respond_to } => {
                    debug!(entity_type, ?ops, "Batch");
                    match self.stage_batch(ops, &context).await {
                        Ok((staged, results)) => {
                            let touched = staged.len();
                            self.store.extend(staged);
                            info!(entity_type, touched, "Batch committed");
                            let _ = respond_to.send(Ok(results));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Batch rolled back");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        if let Some(key) = self.conflicting_key(&id, &item) {
            return Err(FrameworkError::Conflict(key));
        }
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    /// Applies every action to staged clones. Nothing is written to the store here;
    /// the caller commits the returned clones only if every action succeeded.
    async fn stage_batch(
        &self,
        ops: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<(HashMap<T::Id, T>, Vec<T::ActionResult>), FrameworkError> {
        let mut staged: HashMap<T::Id, T> = HashMap::new();
        let mut results = Vec::with_capacity(ops.len());

        for (id, action) in ops {
            let item = match staged.entry(id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => match self.store.get(&id) {
                    Some(current) => entry.insert(current.clone()),
                    None => return Err(FrameworkError::NotFound(id.to_string())),
                },
            };
            let result = item
                .handle_action(action, context)
                .await
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
            results.push(result);
        }

        Ok((staged, results))
    }

    fn conflicting_key(&self, id: &T::Id, candidate: &T) -> Option<String> {
        let key = candidate.unique_key()?;
        self.store
            .iter()
            .any(|(other_id, other)| other_id != id && other.unique_key().as_deref() == Some(&key))
            .then_some(key)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across tasks.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
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

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id, params: T::Delete) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete {
            id,
            params,
            respond_to,
        })
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Runs every action or none of them.
    pub async fn perform_batch(
        &self,
        ops: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Batch { ops, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u32,
        label: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterUpdate {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Take(u32),
        Give(u32),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum CounterError {
        #[error("only {available} left")]
        Exhausted { available: u32 },
        #[error("label must not be empty")]
        EmptyLabel,
        #[error("counter is not empty")]
        NotEmpty,
    }

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = u32;
        type Create = CounterCreate;
        type Update = CounterUpdate;
        type Delete = ();
        type Action = CounterAction;
        type ActionResult = u32;
        type Context = ();
        type Error = CounterError;

        fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, CounterError> {
            if params.label.is_empty() {
                return Err(CounterError::EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                value: params.value,
            })
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.label.clone())
        }

        async fn on_update(&mut self, update: CounterUpdate, _ctx: &()) -> Result<(), CounterError> {
            if let Some(label) = update.label {
                // Mutate first, fail after: the stored copy must not see this.
                self.value = 0;
                if label.is_empty() {
                    return Err(CounterError::EmptyLabel);
                }
                self.label = label;
            }
            Ok(())
        }

        async fn on_delete(&self, _params: (), _ctx: &()) -> Result<(), CounterError> {
            if self.value > 0 {
                return Err(CounterError::NotEmpty);
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: CounterAction, _ctx: &()) -> Result<u32, CounterError> {
            match action {
                CounterAction::Take(n) => {
                    if self.value < n {
                        return Err(CounterError::Exhausted { available: self.value });
                    }
                    self.value -= n;
                }
                CounterAction::Give(n) => self.value += n,
            }
            Ok(self.value)
        }
    }

    fn spawn_counters() -> ResourceClient<Counter> {
        let (actor, client) = ResourceActor::<Counter>::new(10);
        tokio::spawn(actor.run(()));
        client
    }

    async fn create(client: &ResourceClient<Counter>, label: &str, value: u32) -> u32 {
        client
            .create(CounterCreate {
                label: label.into(),
                value,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_crud_and_actions() {
        let client = spawn_counters();

        let a = create(&client, "a", 3).await;
        assert_eq!(a, 1);

        let left = client.perform_action(a, CounterAction::Take(2)).await.unwrap();
        assert_eq!(left, 1);

        let updated = client
            .update(a, CounterUpdate { label: Some("renamed".into()) })
            .await
            .unwrap();
        assert_eq!(updated.label, "renamed");

        assert_eq!(client.list().await.unwrap().len(), 1);

        client.delete(a, ()).await.unwrap();
        assert!(client.get(a).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_hooks_leave_store_untouched() {
        let client = spawn_counters();
        let a = create(&client, "a", 5).await;

        let err = client
            .update(a, CounterUpdate { label: Some(String::new()) })
            .await
            .unwrap_err();
        assert_eq!(err.into_entity_error::<CounterError>().unwrap(), CounterError::EmptyLabel);

        let err = client.perform_action(a, CounterAction::Take(9)).await.unwrap_err();
        assert_eq!(
            err.into_entity_error::<CounterError>().unwrap(),
            CounterError::Exhausted { available: 5 }
        );

        let err = client.delete(a, ()).await.unwrap_err();
        assert!(matches!(
            err.into_entity_error::<CounterError>(),
            Ok(CounterError::NotEmpty)
        ));

        let stored = client.get(a).await.unwrap().unwrap();
        assert_eq!(stored.value, 5);
        assert_eq!(stored.label, "a");
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let client = spawn_counters();
        let a = create(&client, "a", 2).await;
        let b = create(&client, "b", 1).await;

        // Moving 2 from `a` into `b`, then taking 4 from `b` fails on the last step.
        let err = client
            .perform_batch(vec![
                (a, CounterAction::Take(2)),
                (b, CounterAction::Give(2)),
                (b, CounterAction::Take(4)),
            ])
            .await
            .unwrap_err();
        assert_eq!(
            err.into_entity_error::<CounterError>().unwrap(),
            CounterError::Exhausted { available: 3 }
        );
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 2);
        assert_eq!(client.get(b).await.unwrap().unwrap().value, 1);

        let results = client
            .perform_batch(vec![(a, CounterAction::Take(2)), (b, CounterAction::Give(2))])
            .await
            .unwrap();
        assert_eq!(results, vec![0, 3]);
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 0);
        assert_eq!(client.get(b).await.unwrap().unwrap().value, 3);
    }

    #[tokio::test]
    async fn test_batch_with_unknown_id_fails() {
        let client = spawn_counters();
        let a = create(&client, "a", 2).await;

        let err = client
            .perform_batch(vec![(a, CounterAction::Take(1)), (42, CounterAction::Give(1))])
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 2);
    }

    #[tokio::test]
    async fn test_unique_key_conflict() {
        let client = spawn_counters();
        create(&client, "a", 1).await;
        let b = create(&client, "b", 1).await;

        let err = client
            .create(CounterCreate { label: "a".into(), value: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Conflict(key) if key == "a"));

        let err = client
            .update(b, CounterUpdate { label: Some("a".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Conflict(_)));

        // The rejected create did not consume an id.
        let c = create(&client, "c", 1).await;
        assert_eq!(c, 3);
    }
}
