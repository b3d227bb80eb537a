//! Product Catalog
//!
//! The loan products offered to members. Loaded from `products.yaml`, with
//! a built-in default carrying the standard Hana lineup so the platform
//! runs without any config files present.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hana_core::{DomainError, LoanProduct};

/// Catalog of loan products, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<LoanProduct>,
}

impl ProductCatalog {
    /// Load from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::FileNotFound(path.as_ref().display().to_string(), e.to_string())
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse from YAML and check catalog invariants.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::ParseError(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every product must pass its own checks and ids must be unique.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for product in &self.products {
            product.validate()?;
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(())
    }

    /// Look up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&LoanProduct> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// The standard product lineup shipped with the app.
    pub fn builtin() -> Self {
        Self {
            products: vec![
                LoanProduct {
                    id: "business-loan".to_string(),
                    name: "Business Loan".to_string(),
                    description: "Finance your business growth with flexible repayment terms"
                        .to_string(),
                    min_amount: 2000.0,
                    max_amount: 50000.0,
                    interest_rate: 12.0,
                    min_duration: 6,
                    max_duration: 36,
                    requirements: vec![
                        "Business license".to_string(),
                        "Financial statements".to_string(),
                        "Bank statements".to_string(),
                        "Business plan".to_string(),
                    ],
                    processing_fee: 2.0,
                    processing_time: "3-5 business days".to_string(),
                },
                LoanProduct {
                    id: "education-loan".to_string(),
                    name: "Education Loan".to_string(),
                    description: "Invest in your future with affordable education financing"
                        .to_string(),
                    min_amount: 500.0,
                    max_amount: 10000.0,
                    interest_rate: 8.0,
                    min_duration: 6,
                    max_duration: 24,
                    requirements: vec![
                        "Admission letter".to_string(),
                        "Fee structure".to_string(),
                        "ID document".to_string(),
                        "Proof of address".to_string(),
                    ],
                    processing_fee: 1.5,
                    processing_time: "2-3 business days".to_string(),
                },
                LoanProduct {
                    id: "emergency-loan".to_string(),
                    name: "Emergency Loan".to_string(),
                    description: "Quick funds for unexpected expenses with minimal paperwork"
                        .to_string(),
                    min_amount: 200.0,
                    max_amount: 2000.0,
                    interest_rate: 15.0,
                    min_duration: 1,
                    max_duration: 6,
                    requirements: vec![
                        "ID document".to_string(),
                        "Proof of income".to_string(),
                        "Bank statement".to_string(),
                    ],
                    processing_fee: 3.0,
                    processing_time: "24 hours".to_string(),
                },
                LoanProduct {
                    id: "agriculture-loan".to_string(),
                    name: "Agriculture Loan".to_string(),
                    description: "Support for farmers with seasonal repayment options".to_string(),
                    min_amount: 1000.0,
                    max_amount: 20000.0,
                    interest_rate: 10.0,
                    min_duration: 3,
                    max_duration: 24,
                    requirements: vec![
                        "Land ownership documents".to_string(),
                        "Farming activity details".to_string(),
                        "ID document".to_string(),
                        "Proof of address".to_string(),
                    ],
                    processing_fee: 2.0,
                    processing_time: "3-5 business days".to_string(),
                },
            ],
        }
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Errors when loading the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product catalog not found at {0}: {1}")]
    FileNotFound(String, String),

    #[error("failed to parse product catalog: {0}")]
    ParseError(String),

    #[error("duplicate product id '{0}'")]
    DuplicateProduct(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = ProductCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.products.len(), 4);

        let business = catalog.get("business-loan").unwrap();
        assert_eq!(business.name, "Business Loan");
        assert_eq!(business.max_amount, 50000.0);
        assert_eq!(business.requirements.len(), 4);
    }

    #[test]
    fn test_shipped_file_matches_builtin() {
        let shipped =
            ProductCatalog::from_yaml_str(include_str!("../../../config/products.yaml")).unwrap();
        assert_eq!(shipped, ProductCatalog::builtin());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let yaml = r#"
products:
  - id: "starter"
    name: "Starter Loan"
    description: "Small first loan"
    minAmount: 100
    maxAmount: 500
    interestRate: 10
    minDuration: 1
    maxDuration: 6
    requirements: []
    processingFee: 1
    processingTime: "24 hours"
  - id: "starter"
    name: "Starter Loan Copy"
    description: "Duplicate id"
    minAmount: 100
    maxAmount: 500
    interestRate: 10
    minDuration: 1
    maxDuration: 6
    requirements: []
    processingFee: 1
    processingTime: "24 hours"
"#;
        let err = ProductCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(id) if id == "starter"));
    }

    #[test]
    fn test_rejects_invalid_product() {
        let yaml = r#"
products:
  - id: "inverted"
    name: "Inverted"
    description: "Bad range"
    minAmount: 5000
    maxAmount: 500
    interestRate: 10
    minDuration: 1
    maxDuration: 6
    requirements: []
    processingFee: 1
    processingTime: "24 hours"
"#;
        assert!(matches!(
            ProductCatalog::from_yaml_str(yaml),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "products: []").unwrap();
        let catalog = ProductCatalog::load(file.path()).unwrap();
        assert!(catalog.products.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProductCatalog::load("/nonexistent/products.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound(..)));
    }
}
