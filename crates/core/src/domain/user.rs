//! Member Profile
//!
//! The registered member record backing the profile screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered Hana Microfinance member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub profile_picture: Option<String>,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub id_number: Option<String>,
    pub join_date: NaiveDate,
}

impl User {
    /// Display name, e.g. "Jane Doe".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_shape() {
        let user = User {
            id: "usr-1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "+95 9 123 456 789".to_string(),
            profile_picture: None,
            address: Some("Yangon".to_string()),
            occupation: None,
            id_number: None,
            join_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["phoneNumber"], "+95 9 123 456 789");
        assert_eq!(json["joinDate"], "2023-03-15");
    }

    #[test]
    fn test_full_name() {
        let user = User {
            id: "usr-1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "0912345".to_string(),
            profile_picture: None,
            address: None,
            occupation: None,
            id_number: None,
            join_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
        };
        assert_eq!(user.full_name(), "Jane Doe");
    }
}
