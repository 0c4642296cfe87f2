use std::{collections::BTreeMap, fmt::Display, marker::PhantomData, sync::Arc};

use itertools::Itertools;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::Language,
    error::ApiError,
    requester::Requester,
};

pub mod account;
pub mod backstory;
pub mod build;
pub mod colors;
pub mod dailycrafting;
pub mod items;
pub mod minis;
pub mod outfits;
pub mod quaggans;
pub mod worlds;

/// largest `page_size` and largest number of ids per request the api accepts
pub const MAX_PAGE_SIZE: u16 = 200;

/// What an endpoint can do. Fixed per endpoint and never changed after construction.
///
/// Build them in a `const` so an invalid combination fails to compile:
/// ```
/// use gw2api::EndpointFlags;
/// const COLORS: EndpointFlags = EndpointFlags::NONE
///     .paginated()
///     .bulk()
///     .bulk_all()
///     .localized()
///     .checked();
/// assert!(COLORS.supports_bulk_all);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointFlags {
    pub is_paginated: bool,
    /// ids can be requested with `?id=` and `?ids=`
    pub is_bulk: bool,
    /// `?ids=all` works
    pub supports_bulk_all: bool,
    pub is_localized: bool,
    pub is_authenticated: bool,
    /// an api key is sent when present, but not required
    pub is_optionally_authenticated: bool,
    pub max_page_size: u16,
}

impl Default for EndpointFlags {
    fn default() -> Self {
        Self::NONE
    }
}

impl EndpointFlags {
    pub const NONE: Self = Self {
        is_paginated: false,
        is_bulk: false,
        supports_bulk_all: false,
        is_localized: false,
        is_authenticated: false,
        is_optionally_authenticated: false,
        max_page_size: MAX_PAGE_SIZE,
    };
    pub const fn paginated(mut self) -> Self {
        self.is_paginated = true;
        self
    }
    pub const fn bulk(mut self) -> Self {
        self.is_bulk = true;
        self
    }
    pub const fn bulk_all(mut self) -> Self {
        self.supports_bulk_all = true;
        self
    }
    pub const fn localized(mut self) -> Self {
        self.is_localized = true;
        self
    }
    pub const fn authenticated(mut self) -> Self {
        self.is_authenticated = true;
        self
    }
    pub const fn optionally_authenticated(mut self) -> Self {
        self.is_optionally_authenticated = true;
        self
    }
    pub const fn max_page_size(mut self, max_page_size: u16) -> Self {
        self.max_page_size = max_page_size;
        self
    }
    /// panics on contradictory flags. in a `const` that is a compile error
    pub const fn checked(self) -> Self {
        assert!(
            !self.supports_bulk_all || self.is_bulk,
            "`ids=all` needs a bulk endpoint"
        );
        assert!(
            !(self.is_authenticated && self.is_optionally_authenticated),
            "an endpoint is either authenticated or optionally authenticated"
        );
        assert!(self.max_page_size > 0, "max page size must be positive");
        self
    }
}

/// The descriptor operations, used to report what was not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Many,
    All,
    Ids,
    Page,
    Fetch,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operation::Get => "get",
            Operation::Many => "many",
            Operation::All => "all",
            Operation::Ids => "ids",
            Operation::Page => "page",
            Operation::Fetch => "fetch",
        })
    }
}

/// Id of a resource. Depending on the endpoint it is a number (colors, worlds)
/// or a string (quaggans, backstory answers).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}
impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}
impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}
impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
impl From<&ResourceId> for ResourceId {
    fn from(value: &ResourceId) -> Self {
        value.clone()
    }
}

/// Everything a request needs besides the endpoint itself.
/// Cloned into every descriptor; descriptors never share it mutably.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub requester: Arc<dyn Requester>,
    pub language: Language,
    pub api_key: Option<Arc<str>>,
    pub schema: Option<Arc<str>>,
}

impl RequestContext {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self {
            requester,
            language: Language::default(),
            api_key: None,
            schema: None,
        }
    }
}

/// An endpoint descriptor: url path + capability flags + request context.
///
/// `T` is the resource an id resolves to. Descriptors are immutable values; the builder
/// style methods return a new descriptor.
pub struct Endpoint<T> {
    url: String,
    flags: EndpointFlags,
    context: RequestContext,
    resource: PhantomData<fn() -> T>,
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            flags: self.flags,
            context: self.context.clone(),
            resource: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url)
            .field("flags", &self.flags)
            .field("language", &self.context.language)
            .field("authenticated", &self.context.api_key.is_some())
            .finish()
    }
}

impl<T> Endpoint<T> {
    pub fn new(context: RequestContext, url: impl Into<String>, flags: EndpointFlags) -> Self {
        Self {
            url: url.into(),
            flags: flags.checked(),
            context,
            resource: PhantomData,
        }
    }
    /// a sub endpoint at `self.url + "/" + suffix`. pass `self.flags()` to inherit the flags
    pub fn child<U>(&self, suffix: &str, flags: EndpointFlags) -> Endpoint<U> {
        Endpoint::new(
            self.context.clone(),
            format!("{}/{}", self.url, suffix),
            flags,
        )
    }
    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn flags(&self) -> EndpointFlags {
        self.flags
    }
    pub fn context(&self) -> &RequestContext {
        &self.context
    }
    pub fn is_paginated(&self) -> bool {
        self.flags.is_paginated
    }
    pub fn is_bulk(&self) -> bool {
        self.flags.is_bulk
    }
    pub fn supports_bulk_all(&self) -> bool {
        self.flags.supports_bulk_all
    }
    pub fn is_localized(&self) -> bool {
        self.flags.is_localized
    }
    pub fn is_authenticated(&self) -> bool {
        self.flags.is_authenticated
    }
    pub fn is_optionally_authenticated(&self) -> bool {
        self.flags.is_optionally_authenticated
    }
    pub fn with_requester(mut self, requester: Arc<dyn Requester>) -> Self {
        self.context.requester = requester;
        self
    }
    pub fn language(mut self, language: Language) -> Self {
        self.context.language = language;
        self
    }
    pub fn authenticate(mut self, api_key: impl Into<Arc<str>>) -> Self {
        self.context.api_key = Some(api_key.into());
        self
    }
    pub fn schema(mut self, schema: impl Into<Arc<str>>) -> Self {
        self.context.schema = Some(schema.into());
        self
    }

    fn ensure(&self, supported: bool, operation: Operation) -> Result<(), ApiError> {
        if supported {
            Ok(())
        } else {
            Err(ApiError::NotSupported {
                url: self.url.clone(),
                operation,
            })
        }
    }

    /// query parameters every request of this endpoint carries
    fn base_params(&self) -> Result<Vec<(&'static str, String)>, ApiError> {
        let mut params = Vec::with_capacity(4);
        if self.flags.is_localized {
            params.push(("lang", self.context.language.to_string()));
        }
        match &self.context.api_key {
            Some(key) if self.flags.is_authenticated || self.flags.is_optionally_authenticated => {
                params.push(("access_token", key.to_string()));
            }
            None if self.flags.is_authenticated => {
                return Err(ApiError::MissingApiKey {
                    url: self.url.clone(),
                });
            }
            _ => {}
        }
        if let Some(schema) = &self.context.schema {
            params.push(("v", schema.to_string()));
        }
        Ok(params)
    }

    async fn request(&self, extra: Vec<(&'static str, String)>) -> Result<Value, ApiError> {
        let mut params = self.base_params()?;
        params.extend(extra);
        debug!(
            url = %self.url,
            params = ?params.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            "dispatching request"
        );
        Ok(self.context.requester.get(&self.url, &params).await?)
    }

    fn decode<R: DeserializeOwned>(&self, value: Value) -> Result<R, ApiError> {
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            url: self.url.clone(),
            source,
        })
    }

    /// ids of every resource of a bulk endpoint
    pub async fn ids(&self) -> Result<Vec<ResourceId>, ApiError> {
        self.ensure(self.flags.is_bulk, Operation::Ids)?;
        let value = self.request(vec![]).await?;
        self.decode(value)
    }
}

impl<T: DeserializeOwned> Endpoint<T> {
    /// a single resource by id. only id addressable (bulk) endpoints support this
    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<T, ApiError> {
        self.ensure(self.flags.is_bulk, Operation::Get)?;
        let id: ResourceId = id.into();
        let value = self.request(vec![("id", id.to_string())]).await?;
        self.decode(value)
    }

    /// Resources by id, keyed by id.
    ///
    /// Duplicate ids are requested once. Ids are split into requests of at most
    /// `max_page_size` ids which are sent concurrently; the first failure fails the call.
    pub async fn many<I>(&self, ids: I) -> Result<BTreeMap<ResourceId, T>, ApiError>
    where
        I: IntoIterator,
        I::Item: Into<ResourceId>,
    {
        self.ensure(self.flags.is_bulk, Operation::Many)?;
        // `1` and `"1"` end up as the same query value
        let ids: Vec<ResourceId> = ids
            .into_iter()
            .map(Into::into)
            .unique_by(ToString::to_string)
            .collect();
        if ids.is_empty() {
            return Ok(BTreeMap::new());
        }
        let chunks = ids
            .chunks(usize::from(self.flags.max_page_size))
            .map(|chunk| self.request(vec![("ids", chunk.iter().join(","))]))
            .collect::<Vec<_>>();
        let responses = futures::future::try_join_all(chunks).await?;
        let mut resources = BTreeMap::new();
        for response in responses {
            for (id, resource) in self.decode_keyed(response)? {
                resources.insert(id, resource);
            }
        }
        Ok(resources)
    }

    /// every resource, with `ids=all`
    pub async fn all(&self) -> Result<Vec<T>, ApiError> {
        self.ensure(self.flags.supports_bulk_all, Operation::All)?;
        let value = self.request(vec![("ids", "all".to_string())]).await?;
        self.decode(value)
    }

    /// `page` is zero based. `size` must be within `1..=max_page_size`
    pub async fn page(&self, page: u32, size: u16) -> Result<Vec<T>, ApiError> {
        self.ensure(self.flags.is_paginated, Operation::Page)?;
        let max = self.flags.max_page_size;
        if size == 0 || size > max {
            return Err(ApiError::InvalidPageSize { size, max });
        }
        let value = self
            .request(vec![("page", page.to_string()), ("page_size", size.to_string())])
            .await?;
        self.decode(value)
    }

    /// the resource behind the bare url of a non bulk endpoint, like `/v2/build`
    pub async fn fetch(&self) -> Result<T, ApiError> {
        self.ensure(!self.flags.is_bulk, Operation::Fetch)?;
        let value = self.request(vec![]).await?;
        self.decode(value)
    }

    fn decode_keyed(&self, response: Value) -> Result<Vec<(ResourceId, T)>, ApiError> {
        let items: Vec<Value> = self.decode(response)?;
        items
            .into_iter()
            .map(|item| {
                let id = item
                    .get("id")
                    .cloned()
                    .ok_or_else(|| ApiError::MissingId {
                        url: self.url.clone(),
                    })?;
                Ok((self.decode(id)?, self.decode(item)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::{error::TransportError, requester::mock::MockRequester, Client};

    fn client() -> (Arc<MockRequester>, Client) {
        let mock = Arc::new(MockRequester::new());
        (mock.clone(), Client::new(mock))
    }

    #[rstest]
    #[case("answers")]
    #[case("questions")]
    #[case("nested/deeper")]
    fn child_url_is_parent_slash_suffix(#[case] suffix: &str) {
        let parent: Endpoint<Value> =
            Endpoint::new(
            RequestContext::new(Arc::new(MockRequester::new())),
            "/v2/backstory",
            EndpointFlags::NONE,
        );
        let child: Endpoint<Value> = parent.child(suffix, parent.flags());
        assert_eq!(child.url(), format!("{}/{}", parent.url(), suffix));
        assert_eq!(child.flags(), parent.flags());
        assert_eq!(parent.url(), "/v2/backstory");
    }

    #[test]
    fn flags_do_not_change_between_reads() {
        let (_, client) = client();
        let colors = client.colors();
        let first = colors.flags();
        for _ in 0..3 {
            assert_eq!(colors.flags(), first);
            assert!(colors.is_bulk());
            assert!(colors.is_paginated());
        }
        let german = colors.clone().language(Language::De);
        assert_eq!(german.flags(), first);
    }

    #[test]
    #[should_panic(expected = "`ids=all` needs a bulk endpoint")]
    fn bulk_all_without_bulk_is_rejected() {
        let _ = EndpointFlags::NONE.bulk_all().checked();
    }

    #[tokio::test]
    async fn many_on_non_bulk_endpoint_is_not_supported() {
        let (mock, client) = client();
        let err = client.build().many([1, 2]).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotSupported {
                operation: Operation::Many,
                ..
            }
        ));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn unsupported_all_fails_every_time() {
        let (mock, client) = client();
        let items = client.items();
        assert!(!items.supports_bulk_all());
        for _ in 0..2 {
            let err = items.all().await.unwrap_err();
            assert_eq!(err.to_string(), "/v2/items does not support `all`");
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn many_dedups_and_keys_by_id() {
        let (mock, client) = client();
        mock.add_response(json!([
            {"id": 10, "name": "Quaggan Blue"},
            {"id": 2, "name": "Dye Remover"},
        ]));
        let colors = client.colors().many([10, 2, 10]).await.unwrap();
        assert_eq!(
            colors.keys().cloned().collect::<Vec<_>>(),
            vec![ResourceId::Number(2), ResourceId::Number(10)]
        );
        assert_eq!(colors[&ResourceId::Number(2)].name, "Dye Remover");
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0]
            .params
            .contains(&("ids".to_string(), "10,2".to_string())));
    }

    #[tokio::test]
    async fn many_splits_by_max_page_size() {
        let (mock, client) = client();
        mock.add_response(json!([{"id": 1}, {"id": 2}]));
        mock.add_response(json!([{"id": 3}, {"id": 4}]));
        mock.add_response(json!([{"id": 5}]));
        let things = client
            .endpoint::<Value>("/v2/things", EndpointFlags::NONE.bulk().max_page_size(2))
            .many(1..=5)
            .await
            .unwrap();
        assert_eq!(things.len(), 5);
        let ids: Vec<String> = mock
            .requests()
            .into_iter()
            .map(|r| {
                r.params
                    .into_iter()
                    .find(|(k, _)| k == "ids")
                    .map(|(_, v)| v)
                    .unwrap()
            })
            .collect();
        assert_eq!(ids, vec!["1,2", "3,4", "5"]);
    }

    #[tokio::test]
    async fn many_defaults_to_two_hundred_ids_per_request() {
        let (mock, client) = client();
        let first: Vec<Value> = (1..=200).map(|id| json!({"id": id})).collect();
        let second: Vec<Value> = (201..=250).map(|id| json!({"id": id})).collect();
        mock.add_response(Value::Array(first));
        mock.add_response(Value::Array(second));
        let colors = client.colors().many(1..=250).await.unwrap();
        assert_eq!(colors.len(), 250);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn many_treats_numeric_and_text_ids_alike() {
        let (mock, client) = client();
        mock.add_response(json!([{"id": 1, "name": "Dye Remover"}]));
        let colors = client
            .colors()
            .many([ResourceId::Number(1), ResourceId::from("1")])
            .await
            .unwrap();
        assert_eq!(colors.len(), 1);
        assert!(mock.requests()[0]
            .params
            .contains(&("ids".to_string(), "1".to_string())));
    }

    #[tokio::test]
    async fn optional_api_key_is_sent_only_when_set() {
        let (mock, client) = client();
        mock.add_response(json!({"id": 1}));
        mock.add_response(json!({"id": 1}));
        let flags = EndpointFlags::NONE.optionally_authenticated().checked();
        client
            .endpoint::<Value>("/v2/guild/1", flags)
            .fetch()
            .await
            .unwrap();
        client
            .authenticate("K")
            .endpoint::<Value>("/v2/guild/1", flags)
            .fetch()
            .await
            .unwrap();
        let requests = mock.requests();
        assert!(requests[0].params.is_empty());
        similar_asserts::assert_eq!(
            requests[1].params,
            vec![("access_token".to_string(), "K".to_string())]
        );
    }

    #[tokio::test]
    async fn many_without_ids_sends_nothing() {
        let (mock, client) = client();
        let worlds = client.worlds().many(Vec::<u32>::new()).await.unwrap();
        assert!(worlds.is_empty());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn many_requires_ids_in_response() {
        let (mock, client) = client();
        mock.add_response(json!([{"name": "nameless"}]));
        let err = client.colors().many([1]).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingId { .. }));
    }

    #[tokio::test]
    async fn localized_and_schema_params() {
        let (mock, client) = client();
        mock.add_response(json!([]));
        mock.add_response(json!([]));
        let client = client.language(Language::Fr).schema("2019-12-19T00:00:00.000Z");
        client.colors().all().await.unwrap();
        client.quaggans().all().await.unwrap();
        let requests = mock.requests();
        similar_asserts::assert_eq!(
            requests[0].params,
            vec![
                ("lang".to_string(), "fr".to_string()),
                ("v".to_string(), "2019-12-19T00:00:00.000Z".to_string()),
                ("ids".to_string(), "all".to_string()),
            ]
        );
        // quaggans are not localized
        similar_asserts::assert_eq!(
            requests[1].params,
            vec![
                ("v".to_string(), "2019-12-19T00:00:00.000Z".to_string()),
                ("ids".to_string(), "all".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn page_size_is_validated() {
        let (mock, client) = client();
        let colors = client.colors();
        for size in [0, 201] {
            let err = colors.page(0, size).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidPageSize { max: 200, .. }));
        }
        assert!(mock.requests().is_empty());

        mock.add_response(json!([{"id": 1, "name": "Dye Remover"}]));
        let page = colors.page(3, 50).await.unwrap();
        assert_eq!(page.len(), 1);
        assert!(mock.requests()[0]
            .params
            .ends_with(&[
                ("page".to_string(), "3".to_string()),
                ("page_size".to_string(), "50".to_string())
            ]));
    }

    #[tokio::test]
    async fn ids_and_fetch_follow_bulk_flag() {
        let (mock, client) = client();
        mock.add_response(json!(["box", "cheer"]));
        let ids = client.quaggans().ids().await.unwrap();
        assert_eq!(ids, vec![ResourceId::from("box"), ResourceId::from("cheer")]);

        let err = client.quaggans().fetch().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotSupported {
                operation: Operation::Fetch,
                ..
            }
        ));
        let err = client.build().get(1).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotSupported {
                operation: Operation::Get,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let (mock, client) = client();
        mock.add_error(TransportError::Status {
            url: "/v2/worlds".to_string(),
            status: 404,
            body: r#"{"text":"no such id"}"#.to_string(),
        });
        let err = client.worlds().get(9999).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn wrong_shape_is_a_decode_error() {
        let (mock, client) = client();
        mock.add_response(json!("not a world"));
        let err = client.worlds().get(1001).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[rstest]
    #[case(json!(1), ResourceId::Number(1), "1")]
    #[case(json!("7-54"), ResourceId::Text("7-54".into()), "7-54")]
    fn resource_id_from_json(
        #[case] src: Value,
        #[case] expected: ResourceId,
        #[case] display: &str,
    ) {
        let id: ResourceId = serde_json::from_value(src).unwrap();
        assert_eq!(id, expected);
        assert_eq!(id.to_string(), display);
    }
}
