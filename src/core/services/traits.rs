use crate::api::client::CustomerClient;
use crate::api::models::{Customer, CustomerRequest};
use crate::error::ApiError;
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the store needs from the customers resource.
///
/// [`CustomerClient`] is the HTTP implementation; tests substitute scripted ones.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// List every customer, in server order
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;

    /// Get a single customer by ID
    async fn get_customer_by_id(&self, id: &str) -> Result<Customer, ApiError>;

    /// Look up the customer with this email, `None` when there is no match
    async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, ApiError>;

    /// Look up the customer with this name, `None` when there is no match
    async fn get_customer_by_name(&self, name: &str) -> Result<Option<Customer>, ApiError>;

    /// Create a new customer; the server assigns the id
    async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, ApiError>;

    /// Replace an existing customer's fields
    async fn update_customer(
        &self,
        id: &str,
        request: &CustomerRequest,
    ) -> Result<Customer, ApiError>;

    /// Delete a customer by ID
    async fn delete_customer(&self, id: &str) -> Result<(), ApiError>;
}

/// Helper macro to implement CustomerApi for types exposing the same inherent methods
macro_rules! impl_customer_api {
    ($service:ty) => {
        #[async_trait]
        impl CustomerApi for $service {
            async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
                <$service>::list_customers(self).await
            }

            async fn get_customer_by_id(&self, id: &str) -> Result<Customer, ApiError> {
                <$service>::get_customer_by_id(self, id).await
            }

            async fn get_customer_by_email(
                &self,
                email: &str,
            ) -> Result<Option<Customer>, ApiError> {
                <$service>::get_customer_by_email(self, email).await
            }

            async fn get_customer_by_name(
                &self,
                name: &str,
            ) -> Result<Option<Customer>, ApiError> {
                <$service>::get_customer_by_name(self, name).await
            }

            async fn create_customer(
                &self,
                request: &CustomerRequest,
            ) -> Result<Customer, ApiError> {
                <$service>::create_customer(self, request).await
            }

            async fn update_customer(
                &self,
                id: &str,
                request: &CustomerRequest,
            ) -> Result<Customer, ApiError> {
                <$service>::update_customer(self, id, request).await
            }

            async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
                <$service>::delete_customer(self, id).await
            }
        }
    };
}

impl_customer_api!(CustomerClient);

#[async_trait]
impl<T> CustomerApi for Arc<T>
where
    T: CustomerApi + ?Sized,
{
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        (**self).list_customers().await
    }

    async fn get_customer_by_id(&self, id: &str) -> Result<Customer, ApiError> {
        (**self).get_customer_by_id(id).await
    }

    async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, ApiError> {
        (**self).get_customer_by_email(email).await
    }

    async fn get_customer_by_name(&self, name: &str) -> Result<Option<Customer>, ApiError> {
        (**self).get_customer_by_name(name).await
    }

    async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, ApiError> {
        (**self).create_customer(request).await
    }

    async fn update_customer(
        &self,
        id: &str,
        request: &CustomerRequest,
    ) -> Result<Customer, ApiError> {
        (**self).update_customer(id, request).await
    }

    async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete_customer(id).await
    }
}
