#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::{ChangeKind, OverallSentiment, Review, Table, TableChange};
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream, StreamExt};
    use log::{debug, warn};
    use reqwest::{header, Client, RequestBuilder};
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use serde_json::Value;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Arc;
    use std::time::Duration;
    use thiserror::Error;


    #[derive(Error, Debug)]
    pub enum StoreError {
        #[error("Database request failed: {0}")]
        Http(#[from] reqwest::Error),

        #[error("{message}")]
        Query { status: u16, message: String },

        #[error("Row without an id in {0}")]
        MissingId(&'static str),
    }

    /// All rows of one table keyed by id.
    pub type TableSnapshot = BTreeMap<String, Value>;

    /// Lazy, never-ending sequence of row changes for one table.
    pub type ChangeStream = BoxStream<'static, TableChange>;

    /// Read-only view of the two tables the dashboard shows.
    #[async_trait]
    pub trait SentimentStore: Send + Sync {
        /// The single current aggregate row. Zero or several rows is an error.
        async fn fetch_overall_sentiment(&self) -> Result<OverallSentiment, StoreError>;

        /// Every review, newest `review_date` first.
        async fn fetch_reviews(&self) -> Result<Vec<Review>, StoreError>;

        async fn snapshot(&self, table: Table) -> Result<TableSnapshot, StoreError>;
    }

    // PostgREST answers 406 unless exactly one row matches.
    const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

    #[derive(Deserialize)]
    struct PostgrestError {
        message: String,
    }

    /// Client for the managed database's REST interface.
    #[derive(Clone)]
    pub struct SupabaseClient {
        client: Client,
        rest_url: String,
        anon_key: String,
    }

    impl SupabaseClient {
        pub fn new(base_url: &str, anon_key: impl Into<String>) -> Self {
            Self::with_client(Client::new(), base_url, anon_key)
        }

        pub fn with_client(client: Client, base_url: &str, anon_key: impl Into<String>) -> Self {
            Self {
                client,
                rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
                anon_key: anon_key.into(),
            }
        }

        fn select(&self, table: Table) -> RequestBuilder {
            self.client
                .get(format!("{}/{}", self.rest_url, table.name()))
                .header("apikey", &self.anon_key)
                .bearer_auth(&self.anon_key)
                .query(&[("select", "*")])
        }

        async fn read<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, StoreError> {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = postgrest_message(status.as_u16(), &body);
                warn!("[DB] Query failed with {}: {}", status, message);
                return Err(StoreError::Query {
                    status: status.as_u16(),
                    message,
                });
            }
            Ok(response.json::<T>().await?)
        }
    }

    #[async_trait]
    impl SentimentStore for SupabaseClient {
        async fn fetch_overall_sentiment(&self) -> Result<OverallSentiment, StoreError> {
            debug!("[DB] Fetching overall sentiment");
            Self::read(
                self.select(Table::OverallSentiment)
                    .header(header::ACCEPT, SINGLE_OBJECT),
            )
            .await
        }

        async fn fetch_reviews(&self) -> Result<Vec<Review>, StoreError> {
            debug!("[DB] Fetching reviews");
            let reviews: Vec<Review> =
                Self::read(self.select(Table::Reviews).query(&[("order", "review_date.desc")])).await?;
            debug!("[DB] Fetched {} reviews", reviews.len());
            Ok(reviews)
        }

        async fn snapshot(&self, table: Table) -> Result<TableSnapshot, StoreError> {
            let rows: Vec<Value> = Self::read(self.select(table)).await?;
            rows.into_iter()
                .map(|row| match row_id(&row) {
                    Some(id) => Ok((id, row)),
                    None => Err(StoreError::MissingId(table.name())),
                })
                .collect()
        }
    }

    fn postgrest_message(status: u16, body: &str) -> String {
        if body.trim().is_empty() {
            return format!("Database request failed with status {}", status);
        }
        serde_json::from_str::<PostgrestError>(body)
            .map(|err| err.message)
            .unwrap_or_else(|_| body.to_string())
    }

    fn row_id(row: &Value) -> Option<String> {
        match row.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Row-level changes between two snapshots: updates and inserts in id
    /// order, then deletes.
    pub fn diff_snapshots(
        table: Table,
        previous: &TableSnapshot,
        current: &TableSnapshot,
    ) -> Vec<TableChange> {
        let change = |kind, id: &String| TableChange {
            table,
            kind,
            id: id.clone(),
        };

        let mut changes: Vec<TableChange> = current
            .iter()
            .filter_map(|(id, row)| match previous.get(id) {
                None => Some(change(ChangeKind::Insert, id)),
                Some(old) if old != row => Some(change(ChangeKind::Update, id)),
                Some(_) => None,
            })
            .collect();

        changes.extend(
            previous
                .keys()
                .filter(|id| !current.contains_key(*id))
                .map(|id| change(ChangeKind::Delete, id)),
        );
        changes
    }

    struct Feed<A> {
        store: Arc<dyn SentimentStore>,
        table: Table,
        interval: Duration,
        active: A,
        baseline: Option<TableSnapshot>,
        pending: VecDeque<TableChange>,
        polled: bool,
    }

    /// Change notifications for `table`, produced by polling snapshots every
    /// `interval`. Nothing is fetched until the stream is first polled. The
    /// first snapshot is the baseline; failed polls are logged and the next
    /// good snapshot is compared against the last good one.
    pub fn subscribe(store: Arc<dyn SentimentStore>, table: Table, interval: Duration) -> ChangeStream {
        subscribe_while(store, table, interval, || true)
    }

    /// Like [`subscribe`], but a poll only reaches the database while
    /// `active()` holds. Idle ticks keep the baseline, so changes made in
    /// between are reported once polling resumes.
    pub fn subscribe_while<A>(
        store: Arc<dyn SentimentStore>,
        table: Table,
        interval: Duration,
        active: A,
    ) -> ChangeStream
    where
        A: Fn() -> bool + Send + 'static,
    {
        let feed = Feed {
            store,
            table,
            interval,
            active,
            baseline: None,
            pending: VecDeque::new(),
            polled: false,
        };

        stream::unfold(feed, |mut feed| async move {
            loop {
                if let Some(change) = feed.pending.pop_front() {
                    return Some((change, feed));
                }
                if feed.polled {
                    tokio::time::sleep(feed.interval).await;
                }
                feed.polled = true;
                if !(feed.active)() {
                    continue;
                }

                match feed.store.snapshot(feed.table).await {
                    Ok(current) => {
                        match &feed.baseline {
                            Some(previous) => {
                                feed.pending.extend(diff_snapshots(feed.table, previous, &current))
                            }
                            None => debug!(
                                "[FEED] {} baseline holds {} rows",
                                feed.table.name(),
                                current.len()
                            ),
                        }
                        feed.baseline = Some(current);
                    }
                    Err(err) => warn!("[FEED] Polling {} failed: {}", feed.table.name(), err),
                }
            }
        })
        .boxed()
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{
    diff_snapshots, subscribe, subscribe_while, ChangeStream, SentimentStore, StoreError,
    SupabaseClient, TableSnapshot,
};
