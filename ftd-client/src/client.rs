// Async HTTP client for the Firepower Device Manager REST API.
//
// Base path: /api/fdm/latest/
// Auth: OAuth password grant at `fdm/token`, then `Authorization: Bearer`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use crate::api::FtdApi;
use crate::error::Error;
use crate::models::{
    AccessPolicy, AccessRule, Application, ApplicationCategory, ApplicationFilter, ListResponse,
    NetworkInterface, NetworkObject, SecurityZone, TcpUdpPort, TokenRequest, TokenResponse,
    port_collection,
};

/// Device address used when none is configured (factory management IP).
pub const DEFAULT_URL: &str = "https://192.168.45.45";

const API_PREFIX: &str = "/api/fdm/latest";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    messages: Vec<ErrorMessage>,
}

#[derive(serde::Deserialize)]
struct ErrorMessage {
    #[serde(default)]
    description: String,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the FDM REST API.
///
/// Holds the access token obtained at login; requests made before login
/// (or by an unauthenticated client) carry no `Authorization` header.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl HttpClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build an unauthenticated client. `insecure` disables certificate
    /// verification for devices with self-signed certificates.
    pub fn new(base_url: Option<&str>, insecure: bool) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("ftd-client/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(insecure)
            .build()?;
        Self::from_reqwest(base_url.unwrap_or(DEFAULT_URL), http)
    }

    /// Build a client and log in with the given credentials.
    pub async fn login(
        base_url: Option<&str>,
        username: &str,
        password: &SecretString,
        insecure: bool,
    ) -> Result<Self, Error> {
        let client = Self::new(base_url, insecure)?;
        client.authenticate(username, password).await?;
        Ok(client)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Build the base URL ending in `/api/fdm/latest/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{API_PREFIX}/"));
        }

        Ok(url)
    }

    /// The API root every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request an access token and keep it for subsequent requests.
    pub async fn authenticate(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url(&["fdm", "token"])?;
        debug!("POST {url}");

        let body = TokenRequest {
            grant_type: "password",
            username,
            password: password.expose_secret(),
        };
        let resp = self.http.post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match self.parse_error(status, resp).await {
                Error::Api { message, .. } => message,
                other => other.to_string(),
            };
            return Err(Error::Authentication { message });
        }

        let token: TokenResponse = self.decode(resp).await?;
        *self.token.write().await = Some(SecretString::from(token.access_token));
        info!("authenticated as {username}");
        Ok(())
    }

    /// Whether a token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (e.g. `["object", "networks", id]`) to the
    /// base URL. Each segment is percent-encoded on its own, so an id
    /// containing `/`, `?` or `#` stays within its segment.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_ref() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url)).await.send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorize(self.http.get(url).query(params))
            .await
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .authorize(self.http.post(url).json(body))
            .await
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .authorize(self.http.put(url).json(body))
            .await
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &[&str]) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url)).await.send().await?;
        self.handle_empty(resp).await
    }

    /// First object whose name matches `name`, via `?filter=name:<name>`.
    async fn find_by_name<T: DeserializeOwned>(
        &self,
        path: &[&str],
        name: &str,
        kind: &'static str,
    ) -> Result<T, Error> {
        self.list_by_name(path, name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                kind,
                name: name.to_owned(),
            })
    }

    async fn list_by_name<T: DeserializeOwned>(
        &self,
        path: &[&str],
        name: &str,
    ) -> Result<Vec<T>, Error> {
        let list: ListResponse<T> = self
            .get_with_params(path, &[("filter", format!("name:{name}"))])
            .await?;
        Ok(list.items)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            self.decode(resp).await
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: "access token missing or rejected".into(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();

        let described = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .map(|err| {
                err.error
                    .messages
                    .into_iter()
                    .map(|m| m.description)
                    .filter(|d| !d.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|m| !m.is_empty());

        Error::Api {
            status: status.as_u16(),
            message: match described {
                Some(message) => message,
                None if raw.is_empty() => status.to_string(),
                None => raw,
            },
        }
    }
}

#[async_trait]
impl FtdApi for HttpClient {
    // ── Security zones ───────────────────────────────────────────────

    async fn get_security_zone(&self, id: &str) -> Result<SecurityZone, Error> {
        self.get(&["object", "securityzones", id]).await
    }

    async fn create_security_zone(&self, zone: &SecurityZone) -> Result<SecurityZone, Error> {
        self.post(&["object", "securityzones"], zone).await
    }

    async fn update_security_zone(&self, zone: &SecurityZone) -> Result<SecurityZone, Error> {
        self.put(&["object", "securityzones", zone.id.as_str()], zone).await
    }

    // ── Network objects ──────────────────────────────────────────────

    async fn get_network_object(&self, id: &str) -> Result<NetworkObject, Error> {
        self.get(&["object", "networks", id]).await
    }

    async fn create_network_object(
        &self,
        object: &NetworkObject,
    ) -> Result<NetworkObject, Error> {
        self.post(&["object", "networks"], object).await
    }

    async fn update_network_object(
        &self,
        object: &NetworkObject,
    ) -> Result<NetworkObject, Error> {
        self.put(&["object", "networks", object.id.as_str()], object).await
    }

    async fn delete_network_object(&self, object: &NetworkObject) -> Result<(), Error> {
        self.delete(&["object", "networks", object.id.as_str()]).await
    }

    // ── Interfaces ───────────────────────────────────────────────────

    async fn get_network_interface(&self, id: &str) -> Result<NetworkInterface, Error> {
        self.get(&["devices", "default", "interfaces", id]).await
    }

    async fn find_network_interface(&self, name: &str) -> Result<NetworkInterface, Error> {
        self.find_by_name(&["devices", "default", "interfaces"], name, "interface")
            .await
    }

    async fn update_network_interface(
        &self,
        iface: &NetworkInterface,
    ) -> Result<NetworkInterface, Error> {
        self.put(&["devices", "default", "interfaces", iface.id.as_str()], iface)
            .await
    }

    // ── Access policies ──────────────────────────────────────────────

    async fn get_access_policy(&self, id: &str) -> Result<AccessPolicy, Error> {
        self.get(&["policy", "accesspolicies", id]).await
    }

    async fn find_access_policy(&self, name: &str) -> Result<AccessPolicy, Error> {
        self.find_by_name(&["policy", "accesspolicies"], name, "access policy")
            .await
    }

    async fn update_access_policy(&self, policy: &AccessPolicy) -> Result<AccessPolicy, Error> {
        self.put(&["policy", "accesspolicies", policy.id.as_str()], policy)
            .await
    }

    // ── Access rules ─────────────────────────────────────────────────

    async fn get_access_rule(&self, policy_id: &str, id: &str) -> Result<AccessRule, Error> {
        self.get(&["policy", "accesspolicies", policy_id, "accessrules", id])
            .await
    }

    async fn create_access_rule(
        &self,
        policy_id: &str,
        rule: &AccessRule,
    ) -> Result<AccessRule, Error> {
        self.post(&["policy", "accesspolicies", policy_id, "accessrules"], rule)
            .await
    }

    async fn update_access_rule(
        &self,
        policy_id: &str,
        rule: &AccessRule,
    ) -> Result<AccessRule, Error> {
        self.put(
            &["policy", "accesspolicies", policy_id, "accessrules", rule.id.as_str()],
            rule,
        )
        .await
    }

    async fn delete_access_rule(&self, policy_id: &str, rule: &AccessRule) -> Result<(), Error> {
        self.delete(&[
            "policy",
            "accesspolicies",
            policy_id,
            "accessrules",
            rule.id.as_str(),
        ])
        .await
    }

    // ── Application filters ──────────────────────────────────────────

    async fn get_application_filter(&self, id: &str) -> Result<ApplicationFilter, Error> {
        self.get(&["object", "applicationfilters", id]).await
    }

    async fn create_application_filter(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationFilter, Error> {
        self.post(&["object", "applicationfilters"], filter).await
    }

    async fn update_application_filter(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationFilter, Error> {
        self.put(&["object", "applicationfilters", filter.id.as_str()], filter)
            .await
    }

    async fn delete_application_filter(&self, filter: &ApplicationFilter) -> Result<(), Error> {
        self.delete(&["object", "applicationfilters", filter.id.as_str()])
            .await
    }

    // ── TCP/UDP port objects ─────────────────────────────────────────

    async fn get_tcp_udp_port(&self, id: &str, kind: &str) -> Result<TcpUdpPort, Error> {
        self.get(&["object", port_collection(kind), id]).await
    }

    async fn get_tcp_udp_port_by_name(
        &self,
        name: &str,
        kind: &str,
    ) -> Result<TcpUdpPort, Error> {
        self.find_by_name(&["object", port_collection(kind)], name, "port object")
            .await
    }

    async fn create_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<TcpUdpPort, Error> {
        self.post(&["object", port_collection(&port.kind)], port)
            .await
    }

    async fn update_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<TcpUdpPort, Error> {
        self.put(&["object", port_collection(&port.kind), port.id.as_str()], port)
            .await
    }

    async fn delete_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<(), Error> {
        self.delete(&["object", port_collection(&port.kind), port.id.as_str()])
            .await
    }

    // ── Applications ─────────────────────────────────────────────────

    async fn get_applications(&self, name: &str) -> Result<Vec<Application>, Error> {
        self.list_by_name(&["object", "applications"], name).await
    }

    async fn get_application_category(&self, name: &str) -> Result<ApplicationCategory, Error> {
        self.find_by_name(&["object", "applicationcategories"], name, "application category")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_prefix() {
        let client = HttpClient::from_reqwest("https://10.0.0.1", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://10.0.0.1/api/fdm/latest/");
    }

    #[test]
    fn base_url_prefix_is_not_doubled() {
        let client = HttpClient::from_reqwest(
            "https://fw.example.com/api/fdm/latest/",
            reqwest::Client::new(),
        )
        .unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://fw.example.com/api/fdm/latest/"
        );
    }

    #[test]
    fn id_is_encoded_as_one_segment() {
        let client = HttpClient::from_reqwest("https://10.0.0.1", reqwest::Client::new()).unwrap();
        let url = client.url(&["object", "networks", "a/b?c#d e"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://10.0.0.1/api/fdm/latest/object/networks/a%2Fb%3Fc%23d%20e"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn default_url_is_used_when_unset() {
        let client = HttpClient::new(None, true).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://192.168.45.45/api/fdm/latest/"
        );
    }
}
