// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab GraphQL gateway.
//!
//! ```text
//! GraphQlGateway::new(&GatewaySettings)
//!        |
//!        +--> current_user()     query { currentUser }
//!        +--> fetch_group_tree() query ($path) { group { ... descendantGroups } }
//!                  |
//!                  v
//!   POST endpoint  {"query", "variables"}  Authorization: Bearer
//!                  |
//!   401/403        --> GatewayError::Authentication
//!   other non-2xx  --> GatewayError::Http
//!   bad JSON shape --> GatewayError::Schema
//!   errors[]       --> GatewayError::Query
//!   connect/timeout--> GatewayError::Transport
//! ```
//!
//! Every gateway error is fatal for the run; nothing is retried.

pub mod query;
pub mod schema;


use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use crate::config::types::{GatewaySettings, Selection};
use crate::error::{GatewayError, MirrorResult};

use schema::{CurrentUser, CurrentUserData, GraphQlResponse, GroupData, RawGroup};

/// Client for one GraphQL endpoint and access token.
pub struct GraphQlGateway {
    client: Client,
    endpoint: String,
    token: String,
}

impl GraphQlGateway {
    /// Build a gateway with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(settings: &GatewaySettings) -> MirrorResult<Self> {
        let client = Client::builder()
            .user_agent(format!("group-mirror/{}", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            token: settings.token.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The user the access token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Authentication` when the endpoint rejects the
    /// token or reports no current user, or any other gateway error.
    pub async fn current_user(&self) -> MirrorResult<CurrentUser> {
        let data: CurrentUserData = self.execute(query::CURRENT_USER, json!({})).await?;
        data.current_user.ok_or_else(|| {
            GatewayError::Authentication {
                status: StatusCode::OK.as_u16(),
                url: self.endpoint.clone(),
            }
            .into()
        })
    }

    /// Fetch the selected group with its projects and all descendant groups.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Schema` if the group does not exist or the
    /// response is malformed, or any other gateway error.
    pub async fn fetch_group_tree(&self, selection: &Selection) -> MirrorResult<RawGroup> {
        let document = query::group_tree(selection.transport, selection.filter);
        let data: GroupData = self
            .execute(&document, json!({ "path": selection.group }))
            .await?;

        let group = data.group.ok_or_else(|| {
            GatewayError::Schema(format!("group '{}' not found", selection.group))
        })?;
        debug!(
            group = %group.full_path,
            projects = group.projects.nodes.len(),
            descendants = group.descendant_groups.as_ref().map_or(0, |d| d.nodes.len()),
            "fetched group tree"
        );
        Ok(group)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> MirrorResult<T> {
        trace!(endpoint = %self.endpoint, "graphql request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(GatewayError::Authentication {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            }
            .into());
        }
        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|source| GatewayError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let parsed: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|e| GatewayError::Schema(e.to_string()))?;

        if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
            return Err(GatewayError::Query {
                messages: errors.into_iter().map(|e| e.message).collect(),
            }
            .into());
        }

        parsed
            .data
            .ok_or_else(|| GatewayError::Schema("response carries no data".to_string()).into())
    }
}
