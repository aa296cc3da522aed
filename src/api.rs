//! REST boundary: authenticate from the session store, build the request,
//! classify failures. 401 clears the session as a side effect.

use crate::config::Config;
use crate::error::ApiError;
use crate::filter::Filterable;
use crate::ids::{AgentId, TaskId};
use crate::lookup::LookupSlot;
use crate::models::{
    Agent, AgentDraft, DealerSummary, Intervention, InterventionDraft, KpiSummary, Task,
    TaskDraft, TaskStatus,
};
use crate::session::{Session, SessionKey, SessionStore};
use crate::validation::{Validate, ValidationErrors};
use crate::view::ListView;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Runtime::new().expect("tokio runtime")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL including the encoded query string.
    pub url: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. Only transport failures are errors here; HTTP statuses
/// are classified by the client.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Blocking transport over reqwest. Do not call from inside a tokio runtime.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        RUNTIME.block_on(async {
            let mut builder = self
                .client
                .request(request.method.as_reqwest(), &request.url)
                .header(reqwest::header::ACCEPT, "application/json");
            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            let resp = builder
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ApiResponse { status, body })
        })
    }
}

/// `base + path`, then `?k=v&...` with both sides URL-encoded. Empty values are skipped.
pub fn build_url(base: &str, path: &str, query: &[(&str, String)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);
    let pairs: Vec<String> = query
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    if !pairs.is_empty() {
        url.push('?');
        url.push_str(&pairs.join("&"));
    }
    url
}

/// Server-side list filters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub company_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListQuery {
    fn pairs(&self, fallback_company: String) -> Vec<(&'static str, String)> {
        let mut q = vec![(
            "company_id",
            self.company_id.clone().unwrap_or(fallback_company),
        )];
        if let Some(s) = &self.search {
            q.push(("search", s.clone()));
        }
        if let Some(s) = &self.status {
            q.push(("status", s.clone()));
        }
        if let Some(d) = self.from {
            q.push(("from", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.to {
            q.push(("to", d.format("%Y-%m-%d").to_string()));
        }
        q
    }
}

/// One fetched collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Wrapped { items: Vec<T>, total: Option<usize> },
    Bare(Vec<T>),
}

/// Accepts `{ "items": [...], "total": n }` or a bare array.
pub fn parse_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>, ApiError> {
    match serde_json::from_str::<PageBody<T>>(body)? {
        PageBody::Wrapped { items, total } => Ok(Page {
            total: total.unwrap_or(items.len()),
            items,
        }),
        PageBody::Bare(items) => Ok(Page {
            total: items.len(),
            items,
        }),
    }
}

/// Capability the list pages fetch through.
pub trait CollectionSource<R> {
    fn fetch_collection(&self, query: &ListQuery) -> Result<Page<R>, ApiError>;
}

/// Fetch, then replace the view's records. On failure the view is untouched.
pub fn sync_into<R, C>(view: &mut ListView<R>, source: &C, query: &ListQuery) -> Result<usize, ApiError>
where
    R: Filterable,
    C: CollectionSource<R> + ?Sized,
{
    let page = source.fetch_collection(query)?;
    let n = page.items.len();
    view.replace_source(page.items);
    Ok(n)
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    company_id: Option<Value>,
}

#[derive(Deserialize)]
struct NameLookup {
    name: String,
}

/// Ids arrive as numbers or strings depending on the endpoint.
fn id_string(v: Option<Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub struct ApiClient<T: Transport, S: SessionStore> {
    transport: T,
    session: S,
    config: Config,
}

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    pub fn new(transport: T, session: S, config: Config) -> Self {
        ApiClient {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.session.get(SessionKey::Token), Ok(Some(_)))
    }

    fn token(&self) -> Result<String, ApiError> {
        self.session
            .get(SessionKey::Token)?
            .ok_or(ApiError::Unauthenticated)
    }

    /// Session company, or the configured fallback.
    pub fn company_id(&self) -> Result<String, ApiError> {
        Ok(self
            .session
            .get(SessionKey::CompanyId)?
            .unwrap_or_else(|| self.config.default_company_id.clone()))
    }

    fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<String, ApiError> {
        let bearer = if authenticated {
            Some(self.token()?)
        } else {
            None
        };
        let url = build_url(&self.config.api_base_url, path, query);
        debug!(?method, path, "api request");
        let resp = self.transport.send(ApiRequest {
            method,
            url,
            body,
            bearer,
        })?;
        if resp.is_success() {
            debug!(?method, path, status = resp.status, "api response");
            return Ok(resp.body);
        }
        let err = match ApiError::from_status(resp.status, resp.body) {
            ApiError::SessionExpired if !authenticated => ApiError::InvalidCredentials,
            err => err,
        };
        if matches!(err, ApiError::SessionExpired) {
            warn!(path, "session expired, clearing local session");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "failed to clear session");
            }
        } else {
            warn!(?method, path, status = resp.status, "api request failed");
        }
        Err(err)
    }

    fn get_json<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R, ApiError> {
        let body = self.execute(Method::Get, path, query, None, true)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_value(body)?;
        let text = self.execute(method, path, &[], Some(body), true)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn list<R: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> Result<Page<R>, ApiError> {
        let pairs = query.pairs(self.company_id()?);
        let body = self.execute(Method::Get, path, &pairs, None, true)?;
        parse_page(&body)
    }

    // --- Auth ---

    /// POST /auth/login, then persist the session.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let mut errors = ValidationErrors::default();
        if username.trim().is_empty() {
            errors.push("username", "is required");
        }
        if password.is_empty() {
            errors.push("password", "is required");
        }
        errors.into_result()?;

        let body = serde_json::json!({ "username": username.trim(), "password": password });
        let text = self.execute(Method::Post, "/auth/login", &[], Some(body), false)?;
        let resp: LoginResponse = serde_json::from_str(&text)?;
        if resp.token.is_empty() {
            return Err(ApiError::Decode("No token in response".to_string()));
        }
        let session = Session {
            token: resp.token,
            user_id: id_string(resp.user_id),
            role: resp.role,
            company_id: id_string(resp.company_id),
        };
        session.persist(&self.session)?;
        info!(user_id = ?session.user_id, "logged in");
        Ok(session)
    }

    /// Best-effort server logout; the local session is cleared regardless.
    pub fn logout(&self) -> Result<(), ApiError> {
        if self.is_logged_in() {
            if let Err(e) = self.execute(Method::Post, "/auth/logout", &[], None, true) {
                warn!(error = %e, "server logout failed");
            }
        }
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }

    // --- Agents ---

    pub fn list_agents(&self, query: &ListQuery) -> Result<Page<Agent>, ApiError> {
        self.list("/agents", query)
    }

    pub fn get_agent(&self, id: AgentId) -> Result<Agent, ApiError> {
        self.get_json(&format!("/agents/{}", id), &[])
    }

    pub fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ApiError> {
        draft.validate()?;
        self.send_json(Method::Post, "/agents", draft)
    }

    pub fn update_agent(&self, id: AgentId, draft: &AgentDraft) -> Result<Agent, ApiError> {
        draft.validate()?;
        self.send_json(Method::Put, &format!("/agents/{}", id), draft)
    }

    pub fn set_agent_active(&self, id: AgentId, active: bool) -> Result<Agent, ApiError> {
        self.send_json(
            Method::Patch,
            &format!("/agents/{}", id),
            &serde_json::json!({ "active": active }),
        )
    }

    pub fn delete_agent(&self, id: AgentId) -> Result<(), ApiError> {
        self.execute(Method::Delete, &format!("/agents/{}", id), &[], None, true)?;
        Ok(())
    }

    // --- Tasks ---

    pub fn list_tasks(&self, query: &ListQuery) -> Result<Page<Task>, ApiError> {
        self.list("/tasks", query)
    }

    pub fn get_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.get_json(&format!("/tasks/{}", id), &[])
    }

    pub fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        draft.validate()?;
        self.send_json(Method::Post, "/tasks", draft)
    }

    pub fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Result<Task, ApiError> {
        draft.validate()?;
        self.send_json(Method::Put, &format!("/tasks/{}", id), draft)
    }

    pub fn change_task_status(&self, id: TaskId, status: TaskStatus) -> Result<Task, ApiError> {
        self.send_json(
            Method::Patch,
            &format!("/tasks/{}/status", id),
            &serde_json::json!({ "status": status }),
        )
    }

    /// POST /tasks/{id}/interventions. Interventions are never deleted.
    pub fn add_intervention(&self, id: TaskId, draft: &InterventionDraft) -> Result<Intervention, ApiError> {
        draft.validate()?;
        self.send_json(Method::Post, &format!("/tasks/{}/interventions", id), draft)
    }

    // --- Reports ---

    pub fn ewallet_dealers(&self, query: &ListQuery) -> Result<Page<DealerSummary>, ApiError> {
        self.list("/reports/ewallet/dealers", query)
    }

    pub fn kpi_summary(&self, from: NaiveDate, to: NaiveDate) -> Result<KpiSummary, ApiError> {
        let query = [
            ("company_id", self.company_id()?),
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ];
        self.get_json("/reports/kpi", &query)
    }

    // --- Lookup ---

    /// Resolve a code to a display name through `slot`. `Ok(None)` means a
    /// newer lookup (or an unmount) superseded this one and its result was dropped.
    pub fn lookup_name(&self, slot: &LookupSlot, code: &str) -> Result<Option<String>, ApiError> {
        let ticket = slot.begin();
        let result = self.get_json::<NameLookup>("/lookup/name", &[("code", code.trim().to_string())]);
        match slot.complete(ticket, result) {
            Some(r) => r.map(|n| Some(n.name)),
            None => Ok(None),
        }
    }
}

impl<S: SessionStore> ApiClient<ReqwestTransport, S> {
    /// Client over the real HTTP transport, with the configured timeout.
    pub fn connect(session: S, config: Config) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.http_timeout)?;
        Ok(Self::new(transport, session, config))
    }
}

impl<T: Transport, S: SessionStore> CollectionSource<Agent> for ApiClient<T, S> {
    fn fetch_collection(&self, query: &ListQuery) -> Result<Page<Agent>, ApiError> {
        self.list_agents(query)
    }
}

impl<T: Transport, S: SessionStore> CollectionSource<Task> for ApiClient<T, S> {
    fn fetch_collection(&self, query: &ListQuery) -> Result<Page<Task>, ApiError> {
        self.list_tasks(query)
    }
}

impl<T: Transport, S: SessionStore> CollectionSource<DealerSummary> for ApiClient<T, S> {
    fn fetch_collection(&self, query: &ListQuery) -> Result<Page<DealerSummary>, ApiError> {
        self.ewallet_dealers(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn client(mock: MockTransport) -> ApiClient<MockTransport, MemorySessionStore> {
        ApiClient::new(mock, MemorySessionStore::new(), Config::default())
    }

    #[test]
    fn build_url_encodes_and_skips_empty_values() {
        let url = build_url(
            "http://h/api/",
            "/agents",
            &[("search", "rossi & co".to_string()), ("status", String::new())],
        );
        assert_eq!(url, "http://h/api/agents?search=rossi%20%26%20co");
    }

    #[test]
    fn parse_page_accepts_both_shapes() {
        let wrapped: Page<u32> = parse_page(r#"{"items":[1,2],"total":40}"#).unwrap();
        assert_eq!((wrapped.items.len(), wrapped.total), (2, 40));
        let bare: Page<u32> = parse_page("[1,2,3]").unwrap();
        assert_eq!(bare.total, 3);
        assert!(parse_page::<u32>(r#"{"oops":1}"#).is_err());
    }

    #[test]
    fn missing_token_fails_before_sending() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(0);
        let api = client(mock);
        let err = api.list_agents(&ListQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn invalid_draft_never_reaches_transport() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(0);
        let api = client(mock);
        api.session().set(SessionKey::Token, "t").unwrap();
        let err = api.create_agent(&AgentDraft::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn unauthorized_clears_session() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|req| {
            assert_eq!(req.bearer.as_deref(), Some("t"));
            Ok(ApiResponse {
                status: 401,
                body: "expired".to_string(),
            })
        });
        let api = client(mock);
        api.session().set(SessionKey::Token, "t").unwrap();
        api.session().set(SessionKey::Role, "ADMIN").unwrap();

        let err = api.list_tasks(&ListQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
        assert!(!api.is_logged_in());
        assert_eq!(api.session().get(SessionKey::Role).unwrap(), None);
    }

    #[test]
    fn login_persists_numeric_ids_as_strings() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|req| {
            assert_eq!(req.method, Method::Post);
            assert!(req.url.ends_with("/auth/login"));
            assert!(req.bearer.is_none());
            Ok(ApiResponse {
                status: 200,
                body: r#"{"token":"abc","user_id":12,"role":"ADMIN","company_id":3}"#.to_string(),
            })
        });
        let api = client(mock);
        let session = api.login("admin", "secret").unwrap();
        assert_eq!(session.user_id.as_deref(), Some("12"));
        assert_eq!(api.company_id().unwrap(), "3");
        assert!(api.is_logged_in());
    }

    #[test]
    fn list_query_falls_back_to_configured_company() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|req| {
            assert_eq!(req.url, "http://localhost:8080/api/tasks?company_id=1&status=OPEN");
            Ok(ApiResponse {
                status: 200,
                body: "[]".to_string(),
            })
        });
        let api = client(mock);
        api.session().set(SessionKey::Token, "t").unwrap();
        let query = ListQuery {
            status: Some("OPEN".to_string()),
            ..Default::default()
        };
        let page = api.list_tasks(&query).unwrap();
        assert_eq!(page.total, 0);
    }
}
