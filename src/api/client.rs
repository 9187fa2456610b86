use crate::api::models::{ApiResponse, Customer, CustomerRequest, ErrorBody};
use crate::error::ApiError;
use crate::utils::error_helpers::convert_request_error;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const USER_AGENT: &str = concat!("customer-desk/", env!("CARGO_PKG_VERSION"));
const CUSTOMERS: &str = "customers";

#[derive(Debug, Clone)]
pub struct CustomerClient {
    client: Client,
    pub base_url: String,
    base: Url,
}

impl CustomerClient {
    // Create baseClient with transport defaults (no client-side timeout)
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: String, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| convert_request_error(e, "client_init"))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| ApiError::Request {
            endpoint: "client_init".to_string(),
            message: format!("Invalid base URL '{}': {}", base_url, e),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Request {
                endpoint: "client_init".to_string(),
                message: format!("Invalid base URL '{}': not a hierarchical URL", base_url),
            });
        }

        Ok(CustomerClient {
            client,
            base_url,
            base,
        })
    }

    /// Resolve path segments against the base URL. Each segment is percent-encoded.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Request {
                endpoint: format!("/{}", segments.join("/")),
                message: format!("Base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn build_request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint_url(segments)?;
        Ok(self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json"))
    }

    /// List every customer
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let endpoint = "/customers";
        let request = self.build_request(Method::GET, &[CUSTOMERS])?;
        self.send(request, endpoint).await
    }

    /// Fetch one customer by id; a 404 surfaces as `ApiError::Http` with `is_not_found()`
    pub async fn get_customer_by_id(&self, id: &str) -> Result<Customer, ApiError> {
        let endpoint = format!("/customers/{}", id);
        require("Customer id", id, &endpoint)?;
        let request = self.build_request(Method::GET, &[CUSTOMERS, id])?;
        self.send(request, &endpoint).await
    }

    /// Look up a customer by email. The service answers with a single-record
    /// envelope; `data: null` means no match.
    pub async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, ApiError> {
        self.lookup("email", email).await
    }

    pub async fn get_customer_by_name(&self, name: &str) -> Result<Option<Customer>, ApiError> {
        self.lookup("name", name).await
    }

    async fn lookup(&self, field: &str, value: &str) -> Result<Option<Customer>, ApiError> {
        let endpoint = format!("/customers?{}=", field);
        require(field, value, &endpoint)?;
        let request = self
            .build_request(Method::GET, &[CUSTOMERS])?
            .query(&[(field, value)]);
        self.send(request, &endpoint).await
    }

    pub async fn create_customer(&self, customer: &CustomerRequest) -> Result<Customer, ApiError> {
        let endpoint = "/customers";
        let request = self.build_request(Method::POST, &[CUSTOMERS])?.json(customer);
        self.send(request, endpoint).await
    }

    /// Full replacement of the customer's fields
    pub async fn update_customer(
        &self,
        id: &str,
        customer: &CustomerRequest,
    ) -> Result<Customer, ApiError> {
        let endpoint = format!("/customers/{}", id);
        require("Customer id", id, &endpoint)?;
        let request = self
            .build_request(Method::PUT, &[CUSTOMERS, id])?
            .json(customer);
        self.send(request, &endpoint).await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        let endpoint = format!("/customers/{}", id);
        require("Customer id", id, &endpoint)?;
        let request = self.build_request(Method::DELETE, &[CUSTOMERS, id])?;

        log::debug!("DELETE {}", endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, &endpoint))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response, &endpoint).await)
        }
    }

    async fn send<T>(&self, request: RequestBuilder, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        log::debug!("Sending request to {}", endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint))?;

        Self::handle_response::<ApiResponse<T>>(response, endpoint)
            .await
            .map(|envelope| envelope.data)
    }

    pub async fn handle_response<T>(response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            // A body cut off mid-read is a transport failure, only bad JSON is a decode error
            response
                .json::<T>()
                .await
                .map_err(|e| convert_request_error(e, endpoint))
        } else {
            Err(Self::error_from_response(response, endpoint).await)
        }
    }

    async fn error_from_response(response: Response, endpoint: &str) -> ApiError {
        let status = response.status();
        let body = match response.text().await {
            Ok(text) => ErrorBody::parse(&text),
            Err(_) => ErrorBody::default(),
        };

        ApiError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            endpoint: endpoint.to_string(),
            server_message: body.message,
            errors: body.errors.unwrap_or_default(),
        }
    }
}

fn require(what: &str, value: &str, endpoint: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Request {
            endpoint: endpoint.to_string(),
            message: format!("{} must not be empty", what),
        });
    }
    Ok(())
}
