#[derive(sqlx::FromRow, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: i32,
    pub client_id: i32,
    pub phone: String,
}
