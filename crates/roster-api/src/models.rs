// Wire types for the `/users` collection.
//
// Fields the API sends beyond the ones the screen uses are kept in
// `extra` so a record echoed back in a PATCH is not truncated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user record as served by `GET /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Id carried by a record the server has not assigned an id to yet.
    pub const UNASSIGNED_ID: i64 = 0;

    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            address,
            extra: Map::new(),
        }
    }

    /// Shallow copy with only `address.city` replaced.
    pub fn with_city(&self, city: impl Into<String>) -> Self {
        Self {
            address: Address {
                city: city.into(),
                ..self.address.clone()
            },
            ..self.clone()
        }
    }
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_minimal_record() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Ali",
            "email": "ali@x.com",
            "address": { "street": "A", "city": "Lahore" }
        }))
        .unwrap();

        assert_eq!(
            user,
            User::new(1, "Ali", "ali@x.com", Address::new("A", "Lahore"))
        );
    }

    #[test]
    fn keeps_unknown_fields_on_reserialize() {
        let raw = json!({
            "id": 3,
            "name": "Clementine",
            "email": "c@x.com",
            "phone": "555-0100",
            "address": { "street": "Douglas", "city": "McKenziehaven", "zipcode": "59590" }
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.extra.get("phone"), Some(&json!("555-0100")));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn with_city_preserves_everything_else() {
        let user = User::new(1, "Ali", "ali@x.com", Address::new("A", "Lahore"));
        let moved = user.with_city("islamabad");
        assert_eq!(moved.address.street, "A");
        assert_eq!(moved.address.city, "islamabad");
        assert_eq!(moved.name, user.name);
        assert_eq!(moved.id, user.id);
    }
}
