//! Supplier models

use serde::Deserialize;
use validator::Validate;

/// Input for registering a supplier.
///
/// Names are not unique; two tenants (or one) can register the same
/// supplier name independently.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, message = "Supplier name is required"))]
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_global: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: Option<&str>) -> CreateSupplierInput {
        CreateSupplierInput {
            name: name.to_string(),
            city: None,
            phone: None,
            email: email.map(str::to_string),
            address: None,
            notes: None,
            is_global: false,
        }
    }

    #[test]
    fn test_supplier_requires_name() {
        assert!(input("", None).validate().is_err());
        assert!(input("Toko Maju", None).validate().is_ok());
    }

    #[test]
    fn test_supplier_email_format() {
        assert!(input("Toko Maju", Some("not-an-email")).validate().is_err());
        assert!(input("Toko Maju", Some("maju@example.com")).validate().is_ok());
    }
}
