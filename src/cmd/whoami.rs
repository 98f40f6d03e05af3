// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Whoami command implementation for group-mirror.

use anyhow::Context;

use crate::config::Config;
use crate::config::prompt::StdinPrompter;
use crate::error::Result;
use crate::gateway::GraphQlGateway;

/// Print the user the access token belongs to.
///
/// # Errors
///
/// Returns an error if the endpoint or token cannot be resolved, or the
/// endpoint rejects the token.
pub async fn run_whoami_command(config: &Config) -> Result<()> {
    let settings = config.gateway_settings(&mut StdinPrompter)?;
    let gateway = GraphQlGateway::new(&settings)?;
    let user = gateway
        .current_user()
        .await
        .with_context(|| format!("failed to query {}", gateway.endpoint()))?;
    println!("{} (@{})", user.name, user.username);
    Ok(())
}
