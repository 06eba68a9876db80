//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
///
/// This enum is used internally by `MockClient` to track what requests
/// are expected and what responses should be returned.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Batch {
        response: Result<Vec<T::ActionResult>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are answered strictly in the order the expectations were queued;
/// a request that does not match the next expectation panics the mock task,
/// which surfaces in the test as `ActorDropped`.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_get(ProductId(1)).return_ok(Some(product));
/// mock.expect_action(ProductId(1)).return_ok(ProductActionResult::CheckStock(4));
///
/// let client = ProductClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "action for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Batch { respond_to, .. },
                        Some(Expectation::Batch { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(expectation);
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Action { id, response })
    }

    /// Expects a `batch` operation.
    pub fn expect_batch(&mut self) -> ExpectationBuilder<'_, T, Vec<T::ActionResult>> {
        ExpectationBuilder::new(self, |response| Expectation::Batch { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        assert_eq!(remaining, 0, "Not all expectations were met. {remaining} remaining");
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that queues one expectation on a [`MockClient`].
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit/integration tests, we don't want to spin up a full `ResourceActor` if we are just
/// testing the *Client* logic (e.g., `OrderClient`).
///
/// Instead, we create a "Mock Client". This client sends messages to a channel we control (`receiver`).
/// We can then inspect the messages arriving on that channel and assert they are correct.
/// This allows us to simulate the Actor's behavior (success, failure, delays) deterministically.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Batch request
pub async fn expect_batch<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Action)>,
    oneshot::Sender<Result<Vec<T::ActionResult>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Batch { ops, respond_to }) => Some((ops, respond_to)),
        _ => None,
    }
}
