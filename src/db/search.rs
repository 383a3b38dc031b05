use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::models::ClientWithPhones;

const SELECT_CLIENTS_WITH_PHONES: &str = "SELECT clients.id, clients.first_name, clients.last_name, clients.email, \
COALESCE(array_agg(phones.phone::text ORDER BY phones.id) FILTER (WHERE phones.id IS NOT NULL), '{}'::text[]) AS phones \
FROM clients LEFT JOIN phones ON clients.id = phones.client_id";

const GROUP_BY_CLIENT: &str = " GROUP BY clients.id ORDER BY clients.id";

/// Search criteria for [`Database::find_clients`]. Present criteria are AND-ed together;
/// an empty filter matches every client. `Some("")` matches the empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criterion {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl Criterion {
    /// SQL placed before and after the bound value.
    fn clause(self) -> (&'static str, &'static str) {
        match self {
            Criterion::FirstName => ("clients.first_name = ", ""),
            Criterion::LastName => ("clients.last_name = ", ""),
            Criterion::Email => ("clients.email = ", ""),
            // Matches the owner without narrowing the aggregated phone list.
            Criterion::Phone => (
                "EXISTS (SELECT 1 FROM phones AS matched \
                 WHERE matched.client_id = clients.id AND matched.phone = ",
                ")",
            ),
        }
    }
}

impl ClientFilter {
    pub fn is_empty(&self) -> bool {
        self.criteria().next().is_none()
    }

    fn criteria(&self) -> impl Iterator<Item = (Criterion, &str)> {
        [
            (Criterion::FirstName, self.first_name.as_deref()),
            (Criterion::LastName, self.last_name.as_deref()),
            (Criterion::Email, self.email.as_deref()),
            (Criterion::Phone, self.phone.as_deref()),
        ]
        .into_iter()
        .filter_map(|(criterion, value)| value.map(|value| (criterion, value)))
    }
}

pub(crate) fn find_clients_query(filter: &ClientFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(SELECT_CLIENTS_WITH_PHONES);

    let mut joiner = " WHERE ";
    for (criterion, value) in filter.criteria() {
        let (head, tail) = criterion.clause();
        query.push(joiner).push(head).push_bind(value).push(tail);
        joiner = " AND ";
    }

    query.push(GROUP_BY_CLIENT);
    query
}

impl Database {
    /// Find clients matching every present criterion, each with all of its phone numbers.
    ///
    /// A phone criterion only selects which clients are returned; the phone list of a
    /// matched client is never narrowed down to the number searched for.
    pub async fn find_clients(&self, filter: &ClientFilter) -> Result<Vec<ClientWithPhones>> {
        let mut query = find_clients_query(filter);

        let clients = query
            .build_query_as::<ClientWithPhones>()
            .fetch_all(&self.pool)
            .await?;

        debug!(?filter, matched = clients.len(), "client search");

        Ok(clients)
    }
}
