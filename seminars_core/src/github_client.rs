//! This client reads issues and user profiles from the GitHub REST API.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{
    header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK, USER_AGENT},
    Response,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    error::ClientError,
    issue::{Issue, Profile},
};

/// The public GitHub API.
pub static API_URL: &str = "https://api.github.com";

static MEDIA_TYPE: &str = "application/vnd.github.v3+json";
static AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
static BAD_CREDENTIALS: &str = "Bad credentials";
static PER_PAGE: u32 = 100;

static NEXT_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<(?P<url>[^>]+)>;\s*rel="next""#).unwrap());

/// Error payload of the GitHub API, e.g. `{"message": "Bad credentials"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_url: &str, token: &str) -> Self {
        GithubClient {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Get all issues of a repository, open and closed.
    ///
    /// Pages are followed until the API stops sending a `next` link.
    pub async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>, ClientError> {
        let mut url = format!(
            "{}/repos/{owner}/{repo}/issues?state=all&per_page={PER_PAGE}",
            self.api_url
        );
        let mut issues: Vec<Issue> = vec![];
        loop {
            let response = self.get(&url).await?;
            let next_url = next_page(response.headers());
            let page: Vec<Issue> = read_json(&url, response).await?;
            debug!("{url} listed {} issues", page.len());
            issues.extend(page);
            match next_url {
                Some(next_url) if next_url != url => url = next_url,
                _ => break,
            }
        }
        Ok(issues)
    }

    /// Get the public profile of a user.
    pub async fn get_user(&self, login: &str) -> Result<Profile, ClientError> {
        let url = format!("{}/users/{login}", self.api_url);
        let response = self.get(&url).await?;
        read_json(&url, response).await
    }

    async fn get(&self, url: &str) -> Result<Response, ClientError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(USER_AGENT, AGENT)
            .send()
            .await?;
        Ok(response)
    }
}

/// Classify a response and deserialize its body.
///
/// The API reports invalid tokens in the body, so that check comes before the status check.
async fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let text = response.text().await?;
    debug!("{url} returned {status} with {} bytes", text.len());
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .map(|error_body| error_body.message);
    if message.as_deref() == Some(BAD_CREDENTIALS) {
        return Err(ClientError::BadCredentials);
    }
    if !status.is_success() {
        return Err(ClientError::Status {
            url: url.to_string(),
            status,
            message: message.unwrap_or(text),
        });
    }
    Ok(serde_json::from_str(&text)?)
}

/// Get the `next` URL of a paginated response.
fn next_page(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    NEXT_LINK_REGEX
        .captures(link)
        .map(|captures| captures["url"].to_string())
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use reqwest::{
        header::{HeaderMap, HeaderValue, LINK},
        StatusCode,
    };

    use crate::{
        error::ClientError,
        github_client::{next_page, GithubClient},
    };

    fn issue_json(title: &str) -> String {
        format!(
            r#"{{"title": "{title}", "body": "**Date**: 2025-01-01", "user": {{"login": "bob"}}, "assignees": []}}"#
        )
    }

    #[test]
    fn test_next_page() {
        let mut headers = HeaderMap::new();
        assert_eq!(next_page(&headers), None);
        headers.insert(
            LINK,
            HeaderValue::from_static(
                r#"<https://api.github.com/repositories/1/issues?page=2>; rel="next", <https://api.github.com/repositories/1/issues?page=5>; rel="last""#,
            ),
        );
        assert_eq!(
            next_page(&headers).as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=2")
        );
        headers.insert(
            LINK,
            HeaderValue::from_static(r#"<https://api.github.com/x?page=1>; rel="prev""#),
        );
        assert_eq!(next_page(&headers), None);
    }

    #[tokio::test]
    async fn test_list_issues() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/geem-lab/seminars/issues")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "all".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .match_header("authorization", "token secret")
            .match_header("accept", "application/vnd.github.v3+json")
            .match_header("user-agent", Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", issue_json("[SEMINAR] One")))
            .create_async()
            .await;
        let client = GithubClient::new(&server.url(), "secret");
        let issues = client.list_issues("geem-lab", "seminars").await.unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title.as_deref(), Some("[SEMINAR] One"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_issues_follows_pages() {
        let mut server = Server::new_async().await;
        let next = format!(
            r#"<{}/repos/geem-lab/seminars/issues?state=all&per_page=100&page=2>; rel="next""#,
            server.url()
        );
        let first = server
            .mock("GET", "/repos/geem-lab/seminars/issues")
            .match_query(Matcher::Exact("state=all&per_page=100".into()))
            .with_status(200)
            .with_header("link", &next)
            .with_body(format!(
                "[{}, {}]",
                issue_json("[SEMINAR] One"),
                issue_json("Bug")
            ))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/repos/geem-lab/seminars/issues")
            .match_query(Matcher::Exact("state=all&per_page=100&page=2".into()))
            .with_status(200)
            .with_body(format!("[{}]", issue_json("[SEMINAR] Two")))
            .create_async()
            .await;
        let client = GithubClient::new(&format!("{}/", server.url()), "secret");
        let issues = client.list_issues("geem-lab", "seminars").await.unwrap();
        let titles: Vec<Option<&str>> = issues
            .iter()
            .map(|issue| issue.title.as_deref())
            .collect();
        assert_eq!(
            titles,
            vec![Some("[SEMINAR] One"), Some("Bug"), Some("[SEMINAR] Two")]
        );
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/geem-lab/seminars/issues")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(
                r#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com/rest"}"#,
            )
            .create_async()
            .await;
        let client = GithubClient::new(&server.url(), "wrong");
        let error = client
            .list_issues("geem-lab", "seminars")
            .await
            .unwrap_err();
        assert!(matches!(error, ClientError::BadCredentials));
        assert!(error.is_configuration());
    }

    #[tokio::test]
    async fn test_bad_credentials_with_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/alice")
            .with_status(200)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;
        let client = GithubClient::new(&server.url(), "wrong");
        let error = client.get_user("alice").await.unwrap_err();
        assert!(matches!(error, ClientError::BadCredentials));
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/ghost")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;
        let client = GithubClient::new(&server.url(), "secret");
        let error = client.get_user("ghost").await.unwrap_err();
        match error {
            ClientError::Status {
                url,
                status,
                message,
            } => {
                assert_eq!(url, format!("{}/users/ghost", server.url()));
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Not Found");
            }
            error => panic!("unexpected error {error:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/geem-lab/seminars/issues")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;
        let client = GithubClient::new(&server.url(), "secret");
        let error = client
            .list_issues("geem-lab", "seminars")
            .await
            .unwrap_err();
        assert!(matches!(error, ClientError::Json(_)));
        assert!(!error.is_configuration());
    }

    #[tokio::test]
    async fn test_get_user() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/alice")
            .match_header("authorization", "token secret")
            .with_status(200)
            .with_body(
                r#"{"login": "alice", "name": "Alice Liddell", "html_url": "https://github.com/alice", "avatar_url": "https://avatars.example/alice"}"#,
            )
            .create_async()
            .await;
        let client = GithubClient::new(&server.url(), "secret");
        let profile = client.get_user("alice").await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Alice Liddell"));
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://avatars.example/alice")
        );
    }
}
