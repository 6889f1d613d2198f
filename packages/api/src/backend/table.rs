//! Table-store queries (`/rest/v1/{table}`) in PostgREST syntax.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::BackendClient;
use crate::error::ApiResult;

/// A query against one table: equality filters, optional ordering, then a verb.
///
/// ```ignore
/// client
///     .from_table("favorites", Some(token))
///     .eq("user_id", &user_id)
///     .order("pokemon_id", true)
///     .select::<FavoriteRecord>()
///     .await?;
/// ```
pub struct TableQuery<'a> {
    client: &'a BackendClient,
    table: String,
    token: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
}

impl<'a> TableQuery<'a> {
    pub(super) fn new(client: &'a BackendClient, table: &str, token: Option<&str>) -> Self {
        Self {
            client,
            table: table.to_string(),
            token: token.map(str::to_string),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Keep rows where `column = value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    fn filter_params(&self) -> Vec<(String, String)> {
        let mut params = self.filters.clone();
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{column}.{direction}")));
        }
        params
    }

    fn url(&self) -> String {
        self.client.config.rest_url(&self.table)
    }

    pub async fn select<T: DeserializeOwned>(self) -> ApiResult<Vec<T>> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filter_params());

        let request = self.client.http.get(self.url()).query(&params);
        let response = self
            .client
            .authorize(request, self.token.as_deref())
            .send()
            .await?;
        let response = BackendClient::check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn insert<T: Serialize + ?Sized>(self, rows: &T) -> ApiResult<()> {
        let request = self
            .client
            .http
            .post(self.url())
            .header("Prefer", "return=minimal")
            .json(rows);
        let response = self
            .client
            .authorize(request, self.token.as_deref())
            .send()
            .await?;
        BackendClient::check(response).await?;
        Ok(())
    }

    /// Delete every row matching the filters.
    pub async fn delete(self) -> ApiResult<()> {
        let request = self
            .client
            .http
            .delete(self.url())
            .query(&self.filter_params());
        let response = self
            .client
            .authorize(request, self.token.as_deref())
            .send()
            .await?;
        BackendClient::check(response).await?;
        Ok(())
    }
}
