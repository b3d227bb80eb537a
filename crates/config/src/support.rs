//! Support Content
//!
//! Brand details, contact channels, FAQs, and help topics served to the
//! support screen. Loaded from `support.yaml` with a built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the support screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportContent {
    pub brand: BrandInfo,
    #[serde(default)]
    pub channels: Vec<ContactChannel>,
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
    #[serde(default)]
    pub help_topics: Vec<String>,
}

/// Institution identity shown across the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    pub institution: String,
    pub helpline: String,
    pub support_email: String,
}

/// A way to reach support, e.g. phone or live chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactChannel {
    pub title: String,
    pub subtitle: String,
}

/// One frequently asked question with its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl SupportContent {
    /// Load from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SupportError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SupportError::FileNotFound(path.as_ref().display().to_string(), e.to_string())
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SupportError> {
        serde_yaml::from_str(yaml).map_err(|e| SupportError::ParseError(e.to_string()))
    }

    /// The support content shipped with the app.
    pub fn builtin() -> Self {
        let channel = |title: &str, subtitle: &str| ContactChannel {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        };
        let faq = |question: &str, answer: &str| FaqEntry {
            question: question.to_string(),
            answer: answer.to_string(),
        };

        Self {
            brand: BrandInfo {
                institution: "Hana Microfinance".to_string(),
                helpline: "+95 1 234 5678".to_string(),
                support_email: "support@hanamicro.com".to_string(),
            },
            channels: vec![
                channel("Call Support", "24/7 Customer Service"),
                channel("Live Chat", "Chat with an agent"),
                channel("Email Support", "support@hanamicro.com"),
                channel("Visit a Branch", "Find nearest location"),
            ],
            faqs: vec![
                faq(
                    "How do I apply for a loan?",
                    "Pick a product from the Loans tab, review its requirements, and submit \
                     your application at your nearest branch. Our officers will walk you \
                     through the paperwork.",
                ),
                faq(
                    "What are the loan requirements?",
                    "Each product lists its own requirements, such as an ID document or a \
                     business license. You can review them on the product card before applying.",
                ),
                faq(
                    "How long does loan approval take?",
                    "Processing time depends on the product, from 24 hours for Emergency \
                     Loans up to 3-5 business days for Business and Agriculture Loans.",
                ),
                faq(
                    "How can I make repayments?",
                    "Use Pay Now in the app, visit a branch, or pay through one of our \
                     partner agents. Payments are credited to your loan the same day.",
                ),
                faq(
                    "What happens if I miss a payment?",
                    "The loan is marked overdue and our team will contact you to arrange \
                     catch-up payments. Paying the overdue amount returns the loan to \
                     active status.",
                ),
            ],
            help_topics: vec![
                "Loan Application".to_string(),
                "Repayments".to_string(),
                "Account Management".to_string(),
                "Technical Issues".to_string(),
                "Loan Products".to_string(),
                "Security".to_string(),
            ],
        }
    }
}

impl Default for SupportContent {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Errors when loading support content.
#[derive(Debug, Error)]
pub enum SupportError {
    #[error("support content not found at {0}: {1}")]
    FileNotFound(String, String),

    #[error("failed to parse support content: {0}")]
    ParseError(String),
}
