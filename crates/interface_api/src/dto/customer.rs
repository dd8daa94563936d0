//! Retail customer DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::CustomerId;
use domain_investment::{NewRetailCustomer, RetailCustomer};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRetailCustomerRequest {
    #[serde(alias = "firstname")]
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(alias = "lastname")]
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
}

impl CreateRetailCustomerRequest {
    pub fn into_new_customer(self) -> NewRetailCustomer {
        NewRetailCustomer::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim().to_lowercase(),
        )
    }
}

/// Path parameters of the lookup by email
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerEmailPath {
    #[validate(email, length(max = 255))]
    pub email: String,
}

impl CustomerEmailPath {
    /// The address in the form it is stored in
    pub fn normalised(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<RetailCustomer> for CustomerResponse {
    fn from(customer: RetailCustomer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(first: &str, email: &str) -> CreateRetailCustomerRequest {
        CreateRetailCustomerRequest {
            first_name: first.to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Ada", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn test_invalid_email_and_empty_name() {
        let errors = request("", "not-an-email").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
    }

    #[test]
    fn test_email_path_is_validated_and_normalised() {
        let path = CustomerEmailPath {
            email: "Ada@Example.COM".to_string(),
        };
        assert!(path.validate().is_ok());
        assert_eq!(path.normalised(), "ada@example.com");

        let path = CustomerEmailPath {
            email: "nope".to_string(),
        };
        assert!(path.validate().is_err());
    }

    #[test]
    fn test_lowercase_wire_names_are_accepted() {
        let body = r#"{"firstname":"Ada","lastname":"Lovelace","email":"Ada@Example.com"}"#;
        let parsed: CreateRetailCustomerRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_new_customer().email, "ada@example.com");
    }
}
