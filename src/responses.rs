//! Response envelopes returned by the reqres API.

use serde::{Deserialize, Serialize};

use crate::types::User;

/// One page of `GET /users`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UsersResponse {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
}

/// `GET /users/{id}`; the record sits under `data` on the wire.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    #[serde(rename = "data")]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
}

/// Promotional block reqres attaches to JSON responses.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Support {
    pub url: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "data": {
            "id": 2,
            "email": "janet.weaver@reqres.in",
            "first_name": "Janet",
            "last_name": "Weaver",
            "avatar": "https://reqres.in/img/faces/2-image.jpg"
        },
        "support": {
            "url": "https://reqres.in/#support-heading",
            "text": "To keep ReqRes free, contributions towards server costs are appreciated!"
        }
    }"#;

    #[test]
    fn user_response_unwraps_data_envelope() {
        let response: UserResponse = serde_json::from_str(USER_JSON).unwrap();
        assert_eq!(response.user.id, 2);
        assert_eq!(response.user.first_name, "Janet");
        assert_eq!(response.user.last_name, "Weaver");
        assert_eq!(response.user.full_name(), "Janet Weaver");
        assert_eq!(
            response.user.avatar.as_str(),
            "https://reqres.in/img/faces/2-image.jpg"
        );
        assert!(response.support.is_some());
    }

    #[test]
    fn users_response_maps_snake_case_fields() {
        let body = r#"{
            "page": 1, "per_page": 6, "total": 12, "total_pages": 2,
            "data": [{"id": 1, "email": "george.bluth@reqres.in", "first_name": "John",
                      "last_name": "Bluth", "avatar": "https://reqres.in/img/faces/1-image.jpg"}]
        }"#;
        let response: UsersResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.per_page, 6);
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.data[0].first_name, "John");
        assert!(response.support.is_none());
    }

    #[test]
    fn camel_case_fields_are_rejected() {
        let body = r#"{"data": {"id": 1, "email": "a@b.c", "firstName": "John",
                       "lastName": "Doe", "avatar": "https://example.com/a.png"}}"#;
        assert!(serde_json::from_str::<UserResponse>(body).is_err());
    }

    #[test]
    fn malformed_avatar_url_fails_decoding() {
        let body = r#"{"data": {"id": 1, "email": "a@b.c", "first_name": "John",
                       "last_name": "Doe", "avatar": "not a url"}}"#;
        assert!(serde_json::from_str::<UserResponse>(body).is_err());
    }
}
