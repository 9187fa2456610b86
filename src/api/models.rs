use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Custom deserializer: accepts both string and numeric ids, always stored as a string
fn deserialize_customer_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected customer id as string or number, got {}",
            other
        ))),
    }
}

/// Custom deserializer: unknown or malformed tiers are treated as absent
fn deserialize_tier<'de, D>(deserializer: D) -> Result<Option<CustomerTier>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s.parse().ok()),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerTier {
    Silver,
    Gold,
    Platinum,
}

impl CustomerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Silver => "SILVER",
            CustomerTier::Gold => "GOLD",
            CustomerTier::Platinum => "PLATINUM",
        }
    }
}

impl std::str::FromStr for CustomerTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SILVER" => Ok(CustomerTier::Silver),
            "GOLD" => Ok(CustomerTier::Gold),
            "PLATINUM" => Ok(CustomerTier::Platinum),
            other => Err(format!("unknown customer tier '{}'", other)),
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Customer models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(deserialize_with = "deserialize_customer_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub annual_spend: Option<f64>,
    #[serde(default)]
    pub last_purchase_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_tier",
        skip_serializing_if = "Option::is_none"
    )]
    pub tier: Option<CustomerTier>,
}

/// Payload for create and update. `tier` is derived by the server and cannot be sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub annual_spend: Option<f64>,
    pub last_purchase_date: Option<NaiveDate>,
}

impl From<&Customer> for CustomerRequest {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            annual_spend: customer.annual_spend,
            last_purchase_date: customer.last_purchase_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

// Response envelope models
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub timestamp: Option<String>,
    pub status: Option<u16>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub data: T,
}

/// Body of a non-2xx response. Both fields are optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<ValidationError>>,
}

impl ErrorBody {
    /// Lenient parse: a body that is not the expected JSON yields an empty ErrorBody.
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_deserialization_full() {
        let json = r#"{
            "id": "c-1",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "annualSpend": 1250.5,
            "lastPurchaseDate": "2024-03-01",
            "tier": "GOLD"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, "c-1");
        assert_eq!(customer.annual_spend, Some(1250.5));
        assert_eq!(
            customer.last_purchase_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(customer.tier, Some(CustomerTier::Gold));
    }

    #[test]
    fn test_customer_deserialization_nullable_fields() {
        // Test with explicit nulls
        let json = r#"{
            "id": "c-2",
            "name": "Grace",
            "email": "grace@example.com",
            "annualSpend": null,
            "lastPurchaseDate": null
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.annual_spend, None);
        assert_eq!(customer.last_purchase_date, None);
        assert_eq!(customer.tier, None);

        // Test with unknown tier
        let json = r#"{
            "id": "c-3",
            "name": "Linus",
            "email": "linus@example.com",
            "tier": "BRONZE"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.tier, None);

        // Test with null tier
        let json = r#"{"id": "c-4", "name": "Ken", "email": "ken@example.com", "tier": null}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.tier, None);
    }

    #[test]
    fn test_customer_numeric_id() {
        let json = r#"{"id": 42, "name": "Num", "email": "num@example.com"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, "42");

        let json = r#"{"id": null, "name": "Bad", "email": "bad@example.com"}"#;
        assert!(serde_json::from_str::<Customer>(json).is_err());
    }

    #[test]
    fn test_customer_request_serialization() {
        let request = CustomerRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            annual_spend: None,
            last_purchase_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "annualSpend": null,
                "lastPurchaseDate": "2024-01-31"
            })
        );
        assert!(value.get("tier").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_customer_request_from_customer() {
        let customer = Customer {
            id: "c-9".to_string(),
            name: "Edsger".to_string(),
            email: "edsger@example.com".to_string(),
            annual_spend: Some(99.0),
            last_purchase_date: None,
            tier: Some(CustomerTier::Platinum),
        };
        let request = CustomerRequest::from(&customer);
        assert_eq!(request.name, "Edsger");
        assert_eq!(request.annual_spend, Some(99.0));
    }

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{
            "meta": {"timestamp": "2024-03-01T10:00:00Z", "status": 200, "message": "OK"},
            "data": [{"id": "a", "name": "A", "email": "a@example.com"}]
        }"#;
        let envelope: ApiResponse<Vec<Customer>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.meta.and_then(|m| m.status), Some(200));

        // Missing meta and null data for a lookup
        let json = r#"{"data": null}"#;
        let envelope: ApiResponse<Option<Customer>> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_error_body_parse() {
        let body = ErrorBody::parse(
            r#"{"message": "Invalid", "errors": [{"field": "email", "message": "invalid format"}]}"#,
        );
        assert_eq!(body.message.as_deref(), Some("Invalid"));
        assert_eq!(
            body.errors,
            Some(vec![ValidationError {
                field: "email".to_string(),
                message: "invalid format".to_string(),
            }])
        );

        let body = ErrorBody::parse("<html>Bad Gateway</html>");
        assert!(body.message.is_none());
        assert!(body.errors.is_none());
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("SILVER".parse::<CustomerTier>(), Ok(CustomerTier::Silver));
        assert!("silver".parse::<CustomerTier>().is_err());
        assert_eq!(CustomerTier::Platinum.to_string(), "PLATINUM");
    }
}
