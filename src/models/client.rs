use serde::Serialize;

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A client as returned by search, with its phone numbers collapsed into one list.
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientWithPhones {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phones: Vec<String>,
}

impl NewClient {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phones: Vec::new(),
        }
    }

    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = phones.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial change to a client. `None` leaves a field untouched; `Some` overwrites it,
/// even with an empty value. `phones: Some(..)` replaces the whole phone list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phones: Option<Vec<String>>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phones.is_none()
    }
}
