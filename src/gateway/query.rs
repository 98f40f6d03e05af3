// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GraphQL documents sent to GitLab.

use crate::config::types::{FilterPolicy, TransportMode};

/// Who does the token belong to.
pub const CURRENT_USER: &str = "query { currentUser { name username } }";

/// Group tree query for one `$path`.
///
/// The clone URL field is aliased to `cloneUrl` so both transports parse
/// into the same shape. `repository { empty exists }` is only requested
/// when the strict filter needs it.
#[must_use]
pub fn group_tree(transport: TransportMode, filter: FilterPolicy) -> String {
    let url_field = transport.url_field();
    let repository = if filter.needs_repository() {
        "\n      repository {\n        empty\n        exists\n      }"
    } else {
        ""
    };

    format!(
        "query ($path: ID!) {{
  group(fullPath: $path) {{
    ...GroupFields
    descendantGroups {{
      nodes {{
        ...GroupFields
      }}
    }}
  }}
}}

fragment GroupFields on Group {{
  fullName
  fullPath
  projects {{
    nodes {{
      name
      fullPath
      cloneUrl: {url_field}{repository}
    }}
  }}
}}
"
    )
}
