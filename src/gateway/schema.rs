// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Response shapes of the GitLab GraphQL API.
//!
//! Field names follow the API (`camelCase`). Only the fields the queries in
//! [`super::query`] request are modelled.

use serde::Deserialize;

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the group query.
#[derive(Debug, Deserialize)]
pub struct GroupData {
    pub group: Option<RawGroup>,
}

/// A group as returned by the API. `descendant_groups` is only present on
/// the root group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    pub full_name: String,
    pub full_path: String,
    pub projects: Connection<RawProject>,
    #[serde(default)]
    pub descendant_groups: Option<Connection<RawGroup>>,
}

/// GraphQL connection; nodes are nullable in the schema.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    pub name: String,
    pub full_path: String,
    /// Aliased from `sshUrlToRepo` or `httpUrlToRepo`.
    pub clone_url: Option<String>,
    /// Only requested under the strict filter.
    #[serde(default)]
    pub repository: Option<RawRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub empty: Option<bool>,
    pub exists: Option<bool>,
}

/// `data` of the current-user query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserData {
    pub current_user: Option<CurrentUser>,
}

/// The user an access token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    pub username: String,
}
