use axum::http::HeaderMap;

/// Identity of the authenticated user performing a request, as forwarded by
/// the fronting host through `X-Actor-Id`, `X-Actor-Name` and
/// `X-Actor-Roles` headers.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: i64,
    pub display_name: String,
    pub roles: Vec<String>,
}

impl Actor {
    /// Build an actor from forwarded identity headers. Returns `None` when no
    /// parseable `X-Actor-Id` is present; such requests are anonymous.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let id = headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i64>().ok())?;

        let display_name = headers
            .get("x-actor-name")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .trim()
            .to_string();

        let roles = headers
            .get("x-actor-roles")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            id,
            display_name,
            roles,
        })
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
