//! Resource records served by the public and protected APIs

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Postal address; every field is optional on input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl Address {
    pub fn new(street: &str, city: &str, zip: &str) -> Self {
        Self {
            street: Some(street.to_string()),
            city: Some(city.to_string()),
            zip: Some(zip.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub hobbies: Vec<String>,
    pub address: Address,
    pub created_at: String,
}

impl User {
    /// Alice and Bob, the records present at start-up
    pub fn seed() -> Vec<User> {
        let now = Utc::now().to_rfc3339();
        vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                role: "admin".to_string(),
                is_active: true,
                hobbies: vec!["reading".to_string(), "hiking".to_string()],
                address: Address::new("123 Main St", "Springfield", "12345"),
                created_at: now.clone(),
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                role: "user".to_string(),
                is_active: false,
                hobbies: vec!["gaming".to_string(), "traveling".to_string()],
                address: Address::new("456 Elm St", "Shelbyville", "67890"),
                created_at: now,
            },
        ]
    }
}

/// User creation request body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub hobbies: Option<Vec<String>>,
    pub address: Option<Address>,
}

impl CreateUserRequest {
    /// Build a user when name, email and role are all present and non-empty
    pub fn into_user(self, id: i64) -> Option<User> {
        let name = self.name.filter(|s| !s.is_empty())?;
        let email = self.email.filter(|s| !s.is_empty())?;
        let role = self.role.filter(|s| !s.is_empty())?;

        Some(User {
            id,
            name,
            email,
            role,
            is_active: self.is_active.unwrap_or(true),
            hobbies: self.hobbies.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            created_at: Utc::now().to_rfc3339(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

impl Book {
    pub fn seed() -> Vec<Book> {
        vec![
            Book {
                id: "12345".to_string(),
                title: "The Great Gatsby".to_string(),
                author: "F. Scott Fitzgerald".to_string(),
                published_year: 1925,
            },
            Book {
                id: "67890".to_string(),
                title: "1984".to_string(),
                author: "George Orwell".to_string(),
                published_year: 1949,
            },
        ]
    }
}

/// Book creation request body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<i32>,
}

impl CreateBookRequest {
    pub fn into_book(self, id: String) -> Option<Book> {
        let title = self.title.filter(|s| !s.is_empty())?;
        let author = self.author.filter(|s| !s.is_empty())?;
        let published_year = self.published_year.filter(|year| *year != 0)?;

        Some(Book {
            id,
            title,
            author,
            published_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_format_is_camel_case() {
        let alice = User::seed().remove(0);
        let json = serde_json::to_value(&alice).unwrap();

        assert_eq!(json["isActive"], true);
        assert!(json["createdAt"].is_string());
        assert_eq!(json["address"]["city"], "Springfield");
        assert_eq!(json["hobbies"][1], "hiking");
    }

    #[test]
    fn test_create_user_defaults() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"name":"Carol","email":"carol@example.com","role":"user"}"#,
        )
        .unwrap();
        let user = req.into_user(42).unwrap();

        assert_eq!(user.id, 42);
        assert!(user.is_active);
        assert!(user.hobbies.is_empty());
        assert_eq!(user.address, Address::default());
        assert_eq!(serde_json::to_value(&user.address).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_create_user_requires_name_email_role() {
        for body in [
            r#"{"email":"x@example.com","role":"user"}"#,
            r#"{"name":"X","role":"user"}"#,
            r#"{"name":"X","email":"x@example.com"}"#,
            r#"{"name":"","email":"x@example.com","role":"user"}"#,
        ] {
            let req: CreateUserRequest = serde_json::from_str(body).unwrap();
            assert!(req.into_user(1).is_none(), "body {}", body);
        }
    }

    #[test]
    fn test_blank_but_present_fields_are_accepted() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name":" ","email":"x@example.com","role":"user"}"#).unwrap();
        assert_eq!(req.into_user(1).map(|u| u.name), Some(" ".to_string()));

        let req: CreateBookRequest =
            serde_json::from_str(r#"{"title":" ","author":" ","publishedYear":2001}"#).unwrap();
        assert!(req.into_book("b3".to_string()).is_some());
    }

    #[test]
    fn test_create_book_validation() {
        let req: CreateBookRequest = serde_json::from_str(
            r#"{"title":"Dune","author":"Frank Herbert","publishedYear":1965}"#,
        )
        .unwrap();
        let book = req.into_book("b1".to_string()).unwrap();
        assert_eq!(book.published_year, 1965);

        let missing: CreateBookRequest =
            serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert"}"#).unwrap();
        assert!(missing.into_book("b2".to_string()).is_none());
    }
}
