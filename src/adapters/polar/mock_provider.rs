//! Mock billing provider for testing.
//!
//! Provides a configurable mock implementation of `BillingProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    BillingProvider, CheckoutDetail, CheckoutSession, CreateCheckoutRequest, Order, Product,
    ProviderError, Subscription,
};

/// Mock billing provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockBillingProvider::new()
///     .with_products(vec![product]);
///
/// // Inject errors
/// mock.set_error(ProviderError::upstream(500, "boom"));
///
/// // Assert on issued calls
/// assert_eq!(mock.calls(), vec!["list_products"]);
/// ```
#[derive(Default)]
pub struct MockBillingProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    products: Vec<Product>,
    orders: Vec<Order>,
    subscriptions: Vec<Subscription>,
    checkout_session: Option<CheckoutSession>,
    checkout_detail: Option<CheckoutDetail>,
    next_error: Option<ProviderError>,
    call_log: Vec<String>,
    checkout_requests: Vec<CreateCheckoutRequest>,
}

impl MockBillingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.inner.lock().unwrap().products = products;
        self
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.inner.lock().unwrap().orders = orders;
        self
    }

    pub fn with_subscriptions(self, subscriptions: Vec<Subscription>) -> Self {
        self.inner.lock().unwrap().subscriptions = subscriptions;
        self
    }

    pub fn with_checkout_session(self, session: CheckoutSession) -> Self {
        self.inner.lock().unwrap().checkout_session = Some(session);
        self
    }

    pub fn with_checkout_detail(self, detail: CheckoutDetail) -> Self {
        self.inner.lock().unwrap().checkout_detail = Some(detail);
        self
    }

    /// Fail the next provider call with the given error.
    pub fn set_error(&self, error: ProviderError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Names of provider methods invoked so far.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Checkout creation requests captured so far.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }

    fn record(&self, method: &str) -> Option<ProviderError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(method.to_string());
        state.next_error.take()
    }
}

#[async_trait]
impl BillingProvider for MockBillingProvider {
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, ProviderError> {
        if let Some(err) = self.record("create_checkout") {
            return Err(err);
        }
        self.inner
            .lock()
            .unwrap()
            .checkout_requests
            .push(request.clone());

        let session = self.inner.lock().unwrap().checkout_session.clone();
        Ok(session.unwrap_or(CheckoutSession {
            id: "chk_mock".to_string(),
            url: "https://polar.sh/checkout/chk_mock".to_string(),
            expires_at: None,
        }))
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProviderError> {
        if let Some(err) = self.record("list_products") {
            return Err(err);
        }
        Ok(self.inner.lock().unwrap().products.clone())
    }

    async fn get_checkout(&self, _checkout_id: &str) -> Result<CheckoutDetail, ProviderError> {
        if let Some(err) = self.record("get_checkout") {
            return Err(err);
        }
        self.inner
            .lock()
            .unwrap()
            .checkout_detail
            .clone()
            .ok_or_else(|| ProviderError::not_found("Checkout"))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ProviderError> {
        if let Some(err) = self.record("list_orders") {
            return Err(err);
        }
        Ok(self.inner.lock().unwrap().orders.clone())
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ProviderError> {
        if let Some(err) = self.record("list_subscriptions") {
            return Err(err);
        }
        Ok(self.inner.lock().unwrap().subscriptions.clone())
    }
}
