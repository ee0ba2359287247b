//! Polar billing provider adapter.
//!
//! Implements the `BillingProvider` trait against Polar's REST API.
//! Every request carries bearer authentication, an explicit timeout, and a
//! bounded single retry on transient transport failures (never on HTTP
//! status failures).

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::{PolarConfig, ServerConfig};
use crate::ports::{
    BillingProvider, CheckoutDetail, CheckoutSession, CreateCheckoutRequest, Order, Product,
    ProviderError, Subscription,
};

use super::api_types::{
    CreateCheckoutBody, ListResponse, PolarCheckout, PolarOrder, PolarProduct, PolarSubscription,
};

/// Polar API client configuration.
#[derive(Clone)]
pub struct PolarApiConfig {
    /// Access token (polar_oat_... / polar_pat_...).
    access_token: SecretString,

    /// Organization scoping product/order/subscription visibility.
    organization_id: String,

    /// Base URL for the Polar API.
    api_base_url: String,

    /// Storefront base URL for success redirects.
    frontend_url: String,

    /// Per-request timeout.
    request_timeout: Duration,
}

impl PolarApiConfig {
    /// Create a new configuration with default base URLs and timeout.
    pub fn new(access_token: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            organization_id: organization_id.into(),
            api_base_url: "https://api.polar.sh".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Build from the application configuration.
    pub fn from_config(polar: &PolarConfig, server: &ServerConfig) -> Self {
        Self {
            access_token: SecretString::new(polar.access_token.clone()),
            organization_id: polar.organization_id.clone(),
            api_base_url: polar.api_base_url.clone(),
            frontend_url: polar.frontend_url.clone(),
            request_timeout: Duration::from_secs(server.request_timeout_secs),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the storefront base URL for success redirects.
    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Polar billing provider adapter.
///
/// Implements `BillingProvider` over Polar's REST API.
pub struct PolarBillingAdapter {
    config: PolarApiConfig,
    http_client: reqwest::Client,
}

impl PolarBillingAdapter {
    /// Create a new Polar adapter with the given configuration.
    pub fn new(config: PolarApiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Success redirect passed to checkout creation.
    ///
    /// The `{CHECKOUT_ID}` placeholder is substituted by Polar, not by us.
    fn success_url(&self) -> String {
        format!(
            "{}/success?checkout_id={{CHECKOUT_ID}}",
            self.config.frontend_url.trim_end_matches('/')
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    /// Send a request, retrying once on transient transport failures.
    ///
    /// HTTP status failures are never retried; only connect and timeout
    /// errors qualify.
    async fn send_with_retry(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ProviderError> {
        let retry = request.try_clone();

        match request.send().await {
            Ok(response) => Ok(response),
            Err(err) if is_transient(&err) => {
                let Some(retry) = retry else {
                    return Err(ProviderError::network(err.to_string()));
                };
                tracing::warn!(error = %err, "Transient transport failure, retrying once");
                retry
                    .send()
                    .await
                    .map_err(|e| ProviderError::network(e.to_string()))
            }
            Err(err) => Err(ProviderError::network(err.to_string())),
        }
    }

    /// Convert a non-2xx response into an upstream error carrying the
    /// status and body verbatim.
    async fn upstream_error(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status, body = %body, "Polar API request failed");
        ProviderError::upstream(status, body)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(self.config.access_token.expose_secret())
            .timeout(self.config.request_timeout)
    }
}

#[async_trait]
impl BillingProvider for PolarBillingAdapter {
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, ProviderError> {
        let body = CreateCheckoutBody {
            products: vec![request.product_id],
            success_url: self.success_url(),
            customer_email: request.customer_email,
            customer_name: request.customer_name,
            metadata: request.metadata,
        };

        let req = self
            .authed(self.http_client.post(self.url("/v1/checkouts/")))
            .json(&body);

        let response = self.send_with_retry(req).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let checkout: PolarCheckout = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        let url = checkout
            .url
            .ok_or_else(|| ProviderError::invalid_response("Checkout response missing url"))?;

        tracing::info!(checkout_id = %checkout.id, "Created Polar checkout session");

        Ok(CheckoutSession {
            id: checkout.id,
            url,
            expires_at: checkout.expires_at,
        })
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProviderError> {
        let req = self
            .authed(self.http_client.get(self.url("/v1/products/")))
            .query(&[
                ("organization_id", self.config.organization_id.as_str()),
                ("is_archived", "false"),
            ]);

        let response = self.send_with_retry(req).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let page: ListResponse<PolarProduct> = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(page.items.into_iter().filter_map(product_from_api).collect())
    }

    async fn get_checkout(&self, checkout_id: &str) -> Result<CheckoutDetail, ProviderError> {
        let req = self.authed(
            self.http_client
                .get(self.url(&format!("/v1/checkouts/{}", checkout_id))),
        );

        let response = self.send_with_retry(req).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::not_found("Checkout"));
        }
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let checkout: PolarCheckout = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(checkout_detail_from_api(checkout))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ProviderError> {
        let req = self
            .authed(self.http_client.get(self.url("/v1/orders/")))
            .query(&[("organization_id", self.config.organization_id.as_str())]);

        let response = self.send_with_retry(req).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let page: ListResponse<PolarOrder> = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(page.items.into_iter().map(order_from_api).collect())
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ProviderError> {
        let req = self
            .authed(self.http_client.get(self.url("/v1/subscriptions/")))
            .query(&[("organization_id", self.config.organization_id.as_str())]);

        let response = self.send_with_retry(req).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let page: ListResponse<PolarSubscription> = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(page.items.into_iter().map(subscription_from_api).collect())
    }
}

/// Map a Polar product to the port type.
///
/// Returns `None` for products with no price entries; the first price
/// populates amount/currency/recurrence verbatim.
fn product_from_api(product: PolarProduct) -> Option<Product> {
    let price = product.prices.first()?;

    Some(Product {
        id: product.id,
        name: product.name,
        description: product.description,
        price_amount: price.price_amount,
        price_currency: price.price_currency.clone(),
        is_recurring: price.is_recurring,
        interval: if price.is_recurring {
            price.recurring_interval.clone()
        } else {
            None
        },
    })
}

fn checkout_detail_from_api(checkout: PolarCheckout) -> CheckoutDetail {
    CheckoutDetail {
        id: checkout.id,
        status: checkout.status.unwrap_or_else(|| "unknown".to_string()),
        customer_email: checkout.customer_email,
        amount: checkout.amount,
        currency: checkout.currency,
        product_name: checkout.product.and_then(|p| p.name),
        created_at: checkout.created_at,
        confirmed_at: checkout.confirmed_at,
    }
}

fn order_from_api(order: PolarOrder) -> Order {
    Order {
        id: order.id,
        customer_email: order
            .customer
            .and_then(|c| c.email)
            .unwrap_or_default(),
        product_name: order
            .product
            .and_then(|p| p.name)
            .unwrap_or_default(),
        amount: order.amount,
        currency: order.currency,
        status: order.status,
        created_at: order.created_at,
    }
}

fn subscription_from_api(sub: PolarSubscription) -> Subscription {
    Subscription {
        id: sub.id,
        customer_email: sub.customer.and_then(|c| c.email).unwrap_or_default(),
        status: sub.status,
        current_period_end: sub.current_period_end,
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::polar::api_types::PolarPrice;

    fn test_config() -> PolarApiConfig {
        PolarApiConfig::new("polar_oat_test", "org_test")
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_new_sets_defaults() {
        let config = test_config();
        assert_eq!(config.api_base_url, "https://api.polar.sh");
        assert_eq!(config.frontend_url, "http://localhost:5173");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_with_base_url() {
        let config = test_config().with_base_url("http://localhost:8080");
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn config_with_timeout() {
        let config = test_config().with_timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_from_app_config() {
        let polar = PolarConfig {
            access_token: "polar_oat_x".to_string(),
            organization_id: "org_x".to_string(),
            api_base_url: "https://sandbox-api.polar.sh".to_string(),
            frontend_url: "https://shop.example".to_string(),
            webhook_secret: None,
        };
        let server = ServerConfig {
            request_timeout_secs: 10,
            ..Default::default()
        };

        let config = PolarApiConfig::from_config(&polar, &server);

        assert_eq!(config.organization_id, "org_x");
        assert_eq!(config.api_base_url, "https://sandbox-api.polar.sh");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn success_url_keeps_checkout_id_placeholder() {
        let adapter = PolarBillingAdapter::new(
            test_config().with_frontend_url("https://shop.example/"),
        );
        assert_eq!(
            adapter.success_url(),
            "https://shop.example/success?checkout_id={CHECKOUT_ID}"
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let adapter = PolarBillingAdapter::new(test_config().with_base_url("http://host:9/"));
        assert_eq!(adapter.url("/v1/orders/"), "http://host:9/v1/orders/");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    fn api_product(prices: Vec<PolarPrice>) -> PolarProduct {
        PolarProduct {
            id: "prod_1".to_string(),
            name: "Pro Plan".to_string(),
            description: Some("Monthly access".to_string()),
            is_archived: false,
            prices,
        }
    }

    #[test]
    fn product_without_prices_is_omitted() {
        assert!(product_from_api(api_product(vec![])).is_none());
    }

    #[test]
    fn product_uses_first_price_verbatim() {
        let product = product_from_api(api_product(vec![
            PolarPrice {
                price_amount: 1999,
                price_currency: "usd".to_string(),
                is_recurring: true,
                recurring_interval: Some("month".to_string()),
            },
            PolarPrice {
                price_amount: 19999,
                price_currency: "usd".to_string(),
                is_recurring: true,
                recurring_interval: Some("year".to_string()),
            },
        ]))
        .unwrap();

        assert_eq!(product.price_amount, 1999);
        assert_eq!(product.price_currency, "usd");
        assert!(product.is_recurring);
        assert_eq!(product.interval.as_deref(), Some("month"));
    }

    #[test]
    fn one_time_price_has_no_interval() {
        let product = product_from_api(api_product(vec![PolarPrice {
            price_amount: 4999,
            price_currency: "usd".to_string(),
            is_recurring: false,
            recurring_interval: Some("month".to_string()), // stale upstream field
        }]))
        .unwrap();

        assert!(!product.is_recurring);
        assert!(product.interval.is_none());
    }

    #[test]
    fn order_mapping_flattens_customer_and_product() {
        let order = order_from_api(PolarOrder {
            id: "ord_1".to_string(),
            amount: 4999,
            currency: "usd".to_string(),
            status: "paid".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            customer: Some(crate::adapters::polar::api_types::PolarCustomer {
                email: Some("buyer@example.com".to_string()),
                name: None,
            }),
            product: Some(crate::adapters::polar::api_types::PolarProductRef {
                name: Some("Lifetime".to_string()),
            }),
        });

        assert_eq!(order.customer_email, "buyer@example.com");
        assert_eq!(order.product_name, "Lifetime");
        assert_eq!(order.amount, 4999);
    }

    #[test]
    fn subscription_mapping_flattens_customer() {
        let sub = subscription_from_api(PolarSubscription {
            id: "sub_1".to_string(),
            status: "active".to_string(),
            current_period_end: Some("2026-02-01T00:00:00Z".to_string()),
            customer: Some(crate::adapters::polar::api_types::PolarCustomer {
                email: Some("buyer@example.com".to_string()),
                name: None,
            }),
        });

        assert_eq!(sub.customer_email, "buyer@example.com");
        assert!(sub.is_active());
    }

    #[test]
    fn checkout_detail_mapping_defaults_status() {
        let detail = checkout_detail_from_api(PolarCheckout {
            id: "chk_1".to_string(),
            url: None,
            status: None,
            expires_at: None,
            customer_email: None,
            amount: None,
            currency: None,
            product: None,
            created_at: None,
            confirmed_at: None,
        });

        assert_eq!(detail.status, "unknown");
    }
}
