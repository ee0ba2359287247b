//! HTTP handlers for the billing endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, CreateCheckoutCommand, CreateCheckoutHandler,
    GetCheckoutStatusHandler, GetCheckoutStatusQuery, ListCustomerOrdersHandler,
    ListCustomerOrdersQuery, ListProductsHandler, ListProductsQuery, ProcessWebhookCommand,
    ProcessWebhookHandler,
};
use crate::config::Environment;
use crate::domain::billing::BillingError;
use crate::domain::webhook::SignatureVerifier;
use crate::ports::BillingProvider;

use super::dto::{
    CheckoutApiResponse, CheckoutStatusResponse, CreateCheckoutApiRequest, ErrorResponse,
    HealthResponse, OrderResponse, ProductResponse, SubscriptionStatusResponse,
    SubscriptionSummaryResponse, WebhookAckResponse,
};

/// Service name reported by the health endpoint.
const SERVICE_NAME: &str = "Plara Payment API";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers. No process-wide
/// singletons; everything a handler needs is injected here.
#[derive(Clone)]
pub struct BillingAppState {
    pub billing_provider: Arc<dyn BillingProvider>,

    /// Webhook verifier, present only when a secret is configured. While
    /// absent the webhook endpoint fails closed.
    pub webhook_verifier: Option<SignatureVerifier>,

    pub environment: Environment,
}

impl BillingAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.billing_provider.clone())
    }

    pub fn list_products_handler(&self) -> ListProductsHandler {
        ListProductsHandler::new(self.billing_provider.clone())
    }

    pub fn get_checkout_status_handler(&self) -> GetCheckoutStatusHandler {
        GetCheckoutStatusHandler::new(self.billing_provider.clone())
    }

    pub fn list_customer_orders_handler(&self) -> ListCustomerOrdersHandler {
        ListCustomerOrdersHandler::new(self.billing_provider.clone())
    }

    pub fn check_subscription_handler(&self) -> CheckSubscriptionHandler {
        CheckSubscriptionHandler::new(self.billing_provider.clone())
    }

    /// Webhook handler; errors when no secret is configured (fail closed).
    pub fn webhook_handler(&self) -> Result<ProcessWebhookHandler, BillingError> {
        let verifier = self.webhook_verifier.clone().ok_or_else(|| {
            BillingError::configuration("Webhook secret is not configured")
        })?;
        Ok(ProcessWebhookHandler::new(verifier))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Health check
pub async fn health(State(state): State<BillingAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        environment: state.environment.as_str(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/products - List available products
pub async fn list_products(
    State(state): State<BillingAppState>,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.list_products_handler();
    let products = handler.handle(ListProductsQuery {}).await?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/checkout - Create a hosted checkout session
pub async fn create_checkout(
    State(state): State<BillingAppState>,
    Json(request): Json<CreateCheckoutApiRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let product_id = request
        .product_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BillingError::validation("product_id", "product_id is required"))?;

    let handler = state.create_checkout_handler();
    let cmd = CreateCheckoutCommand {
        product_id,
        customer_email: request.email,
        customer_name: request.customer_name,
        metadata: request.metadata,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CheckoutApiResponse::from(result.checkout)))
}

/// GET /api/checkout/{checkout_id} - Get checkout status
pub async fn get_checkout_status(
    State(state): State<BillingAppState>,
    Path(checkout_id): Path<String>,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.get_checkout_status_handler();
    let detail = handler.handle(GetCheckoutStatusQuery { checkout_id }).await?;

    Ok(Json(CheckoutStatusResponse::from(detail)))
}

/// GET /api/orders/{customer_email} - List a customer's orders
pub async fn list_customer_orders(
    State(state): State<BillingAppState>,
    Path(customer_email): Path<String>,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.list_customer_orders_handler();
    let orders = handler
        .handle(ListCustomerOrdersQuery { customer_email })
        .await?;

    let response: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/subscriptions/{customer_email} - Check subscription status
pub async fn check_subscription(
    State(state): State<BillingAppState>,
    Path(customer_email): Path<String>,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.check_subscription_handler();
    let result = handler
        .handle(CheckSubscriptionQuery { customer_email })
        .await?;

    Ok(Json(SubscriptionStatusResponse {
        has_active_subscription: result.has_active_subscription,
        subscription: result.subscription.map(SubscriptionSummaryResponse::from),
    }))
}

/// POST /api/webhooks/polar - Handle Polar webhook deliveries
///
/// Also mounted at the legacy `/webhook` path. The raw body is required for
/// signature verification; a missing `Polar-Signature` header is treated as
/// an invalid signature, not a validation error.
pub async fn handle_polar_webhook(
    State(state): State<BillingAppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.webhook_handler()?;

    let signature = headers
        .get("Polar-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let cmd = ProcessWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(WebhookAckResponse {
        status: "received",
        event_type: result.event_type().to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts billing errors to HTTP responses.
pub struct BillingApiError(BillingError);

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            BillingError::ValidationFailed { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            BillingError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
            BillingError::InvalidWebhookSignature => {
                (StatusCode::UNAUTHORIZED, "INVALID_WEBHOOK_SIGNATURE")
            }
            BillingError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            BillingError::Upstream { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            BillingError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::polar::MockBillingProvider;
    use crate::ports::{CheckoutSession, Order, Product, ProviderError, Subscription};
    use serde_json::json;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    const TEST_SECRET: &str = "whsec_http_test";

    fn state_with(provider: MockBillingProvider) -> BillingAppState {
        BillingAppState {
            billing_provider: Arc::new(provider),
            webhook_verifier: Some(SignatureVerifier::new(TEST_SECRET)),
            environment: Environment::Development,
        }
    }

    fn test_product() -> Product {
        Product {
            id: "prod_1".to_string(),
            name: "Pro Plan".to_string(),
            description: Some("Monthly access".to_string()),
            price_amount: 1999,
            price_currency: "usd".to_string(),
            is_recurring: true,
            interval: Some("month".to_string()),
        }
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn health_reports_service_and_environment() {
        let state = state_with(MockBillingProvider::new());

        let response = health(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "Plara Payment API");
        assert_eq!(json["environment"], "development");
    }

    #[tokio::test]
    async fn list_products_returns_catalog() {
        let state = state_with(MockBillingProvider::new().with_products(vec![test_product()]));

        let response = list_products(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json[0]["id"], "prod_1");
        assert_eq!(json[0]["price_amount"], 1999);
    }

    #[tokio::test]
    async fn create_checkout_maps_session_fields() {
        let provider = MockBillingProvider::new().with_checkout_session(CheckoutSession {
            id: "chk_1".to_string(),
            url: "https://pay/x".to_string(),
            expires_at: None,
        });
        let state = state_with(provider);
        let request = CreateCheckoutApiRequest {
            product_id: Some("prod_123".to_string()),
            ..Default::default()
        };

        let response = create_checkout(State(state), Json(request))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["checkout_url"], "https://pay/x");
        assert_eq!(json["checkout_id"], "chk_1");
    }

    #[tokio::test]
    async fn create_checkout_missing_product_id_is_400_without_upstream_call() {
        let provider = MockBillingProvider::new();
        let calls = Arc::new(provider);
        let state = BillingAppState {
            billing_provider: calls.clone(),
            webhook_verifier: None,
            environment: Environment::Development,
        };

        let response = create_checkout(State(state), Json(CreateCheckoutApiRequest::default()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(calls.calls().is_empty());
    }

    #[tokio::test]
    async fn get_checkout_status_unknown_id_is_404() {
        let state = state_with(MockBillingProvider::new());

        let response = get_checkout_status(State(state), Path("chk_missing".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_customer_orders_filters_by_exact_email() {
        let orders = vec![
            Order {
                id: "ord_1".to_string(),
                customer_email: "buyer@example.com".to_string(),
                product_name: "Pro Plan".to_string(),
                amount: 1999,
                currency: "usd".to_string(),
                status: "paid".to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
            Order {
                id: "ord_2".to_string(),
                customer_email: "Buyer@example.com".to_string(),
                product_name: "Pro Plan".to_string(),
                amount: 1999,
                currency: "usd".to_string(),
                status: "paid".to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
        ];
        let state = state_with(MockBillingProvider::new().with_orders(orders));

        let response = list_customer_orders(State(state), Path("buyer@example.com".to_string()))
            .await
            .into_response();

        let json = response_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["id"], "ord_1");
    }

    #[tokio::test]
    async fn check_subscription_reports_active_match() {
        let subs = vec![Subscription {
            id: "sub_1".to_string(),
            customer_email: "buyer@example.com".to_string(),
            status: "active".to_string(),
            current_period_end: Some("2026-02-01T00:00:00Z".to_string()),
        }];
        let state = state_with(MockBillingProvider::new().with_subscriptions(subs));

        let response = check_subscription(State(state), Path("buyer@example.com".to_string()))
            .await
            .into_response();

        let json = response_json(response).await;
        assert_eq!(json["has_active_subscription"], true);
        assert_eq!(json["subscription"]["id"], "sub_1");
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_500_with_body() {
        let provider = MockBillingProvider::new();
        provider.set_error(ProviderError::upstream(503, "polar is down"));
        let state = state_with(provider);

        let response = list_products(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["error"], "UPSTREAM_ERROR");
        assert!(json["message"].as_str().unwrap().contains("polar is down"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Tests
    // ════════════════════════════════════════════════════════════════════════════

    fn signed(body: &str) -> (axum::http::HeaderMap, axum::body::Bytes) {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            "Polar-Signature",
            verifier.expected_hex(body.as_bytes()).parse().unwrap(),
        );
        (headers, axum::body::Bytes::from(body.to_string()))
    }

    #[tokio::test]
    async fn webhook_valid_signature_is_acknowledged() {
        let state = state_with(MockBillingProvider::new());
        let body = json!({"type": "order.created", "data": {"id": "ord_1"}}).to_string();
        let (headers, bytes) = signed(&body);

        let response = handle_polar_webhook(State(state), headers, bytes)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "received");
        assert_eq!(json["event_type"], "order.created");
    }

    #[tokio::test]
    async fn webhook_unknown_event_type_is_still_200() {
        let state = state_with(MockBillingProvider::new());
        let body = json!({"type": "unknown.event", "data": {}}).to_string();
        let (headers, bytes) = signed(&body);

        let response = handle_polar_webhook(State(state), headers, bytes)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["event_type"], "unknown.event");
    }

    #[tokio::test]
    async fn webhook_invalid_signature_is_401() {
        let state = state_with(MockBillingProvider::new());
        let mut headers = axum::http::HeaderMap::new();
        headers.insert("Polar-Signature", "deadbeef".parse().unwrap());
        let body = axum::body::Bytes::from(json!({"type": "order.created"}).to_string());

        let response = handle_polar_webhook(State(state), headers, body)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn webhook_missing_signature_header_is_401() {
        let state = state_with(MockBillingProvider::new());
        let body = axum::body::Bytes::from(json!({"type": "order.created"}).to_string());

        let response = handle_polar_webhook(State(state), axum::http::HeaderMap::new(), body)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn webhook_unparsable_body_is_400() {
        let state = state_with(MockBillingProvider::new());
        let (headers, bytes) = signed("not json");

        let response = handle_polar_webhook(State(state), headers, bytes)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_without_configured_secret_fails_closed() {
        let state = BillingAppState {
            billing_provider: Arc::new(MockBillingProvider::new()),
            webhook_verifier: None,
            environment: Environment::Development,
        };
        let body = axum::body::Bytes::from(json!({"type": "order.created"}).to_string());

        let response = handle_polar_webhook(State(state), axum::http::HeaderMap::new(), body)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["error"], "CONFIGURATION_ERROR");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_validation_to_400() {
        let err = BillingApiError(BillingError::validation("product_id", "required"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_invalid_payload_to_400() {
        let err = BillingApiError(BillingError::invalid_payload("bad json"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_invalid_signature_to_401() {
        let err = BillingApiError(BillingError::invalid_webhook_signature());
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_not_found_to_404() {
        let err = BillingApiError(BillingError::not_found("Checkout"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_upstream_to_500() {
        let err = BillingApiError(BillingError::upstream(Some(502), "bad gateway"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_maps_configuration_to_500() {
        let err = BillingApiError(BillingError::configuration("secret missing"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
