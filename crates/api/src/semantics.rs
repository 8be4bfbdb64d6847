//! HTTP method vocabulary and the MCP tool annotations that follow from it.

use reqwest::Method;
use rmcp::model::ToolAnnotations;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl ApiMethod {
    #[must_use]
    pub fn as_reqwest(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// MCP tool annotations based on RFC 9110-style method semantics.
    ///
    /// `openWorldHint` is always `true`: every tool talks to the Housecall Pro API.
    #[must_use]
    pub fn annotations(self) -> ToolAnnotations {
        let (read_only, destructive, idempotent) = match self {
            Self::Get => (true, false, Some(true)),
            Self::Post => (false, false, Some(false)),
            Self::Put | Self::Delete => (false, true, Some(true)),
            // PATCH may or may not be idempotent; do not guess.
            Self::Patch => (false, true, None),
        };

        ToolAnnotations {
            title: None,
            read_only_hint: Some(read_only),
            destructive_hint: Some(destructive),
            idempotent_hint: idempotent,
            open_world_hint: Some(true),
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiMethod;
    use reqwest::Method;

    const ALL: [ApiMethod; 5] = [
        ApiMethod::Get,
        ApiMethod::Post,
        ApiMethod::Put,
        ApiMethod::Patch,
        ApiMethod::Delete,
    ];

    #[test]
    fn annotations_set_open_world_for_all_methods() {
        for m in ALL {
            assert_eq!(m.annotations().open_world_hint, Some(true));
        }
    }

    #[test]
    fn annotations_get_is_readonly_and_idempotent() {
        let a = ApiMethod::Get.annotations();
        assert_eq!(a.read_only_hint, Some(true));
        assert_eq!(a.destructive_hint, Some(false));
        assert_eq!(a.idempotent_hint, Some(true));
    }

    #[test]
    fn annotations_patch_leaves_idempotence_unknown() {
        let a = ApiMethod::Patch.annotations();
        assert_eq!(a.read_only_hint, Some(false));
        assert_eq!(a.destructive_hint, Some(true));
        assert_eq!(a.idempotent_hint, None);
    }

    #[test]
    fn delete_is_destructive_and_idempotent() {
        let a = ApiMethod::Delete.annotations();
        assert_eq!(a.destructive_hint, Some(true));
        assert_eq!(a.idempotent_hint, Some(true));
    }

    #[test]
    fn display_matches_reqwest_method() {
        for m in ALL {
            assert_eq!(m.to_string(), m.as_reqwest().as_str());
        }
        assert_eq!(ApiMethod::Patch.as_reqwest(), Method::PATCH);
    }
}
