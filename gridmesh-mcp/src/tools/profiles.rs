/// Profile discovery tools
///
/// `list_profiles` and `get_profile`. Profiles are read-only templates;
/// both tools return the platform response verbatim.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::ToolResult;
use crate::mcp::protocol::ToolDef;
use crate::mcp::{ToolContext, ToolHandler};
use crate::tools::{parse_args, platform_client, to_json, FailureMap};

const LIST_PROFILES_FAILURES: FailureMap = FailureMap {
    on_status: &[],
    fallback: "Failed to list profiles: {message}",
};

/// Lists available computation profiles
pub struct ListProfiles;

#[async_trait]
impl ToolHandler for ListProfiles {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "list_profiles".to_string(),
            description: "List available computation profiles that can be used when \
                          creating tasks. Each profile defines a computation environment."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        tracing::info!(tool = "list_profiles", "Tool invoked");

        let client = platform_client(&ctx)?;
        let profiles = client
            .list_profiles()
            .await
            .map_err(|err| LIST_PROFILES_FAILURES.apply(err, ""))?;

        tracing::info!(tool = "list_profiles", count = profiles.len(), "Profiles listed");

        to_json(&profiles)
    }
}

const GET_PROFILE_FAILURES: FailureMap = FailureMap {
    on_status: &[(404, "Profile not found: {id}")],
    fallback: "Failed to get profile: {message}",
};

#[derive(Debug, Deserialize, Validate)]
pub struct GetProfileParams {
    /// Name of the profile to retrieve
    #[validate(length(min = 1))]
    pub profile_name: String,
}

/// Fetches details of one computation profile
pub struct GetProfile;

#[async_trait]
impl ToolHandler for GetProfile {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "get_profile".to_string(),
            description: "Get details of a specific computation profile, including its \
                          configurable constants."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "profile_name": {
                        "type": "string",
                        "description": "Name of the profile to retrieve"
                    }
                },
                "required": ["profile_name"]
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: GetProfileParams = parse_args(&ctx.args)?;
        params.validate()?;
        tracing::info!(tool = "get_profile", profile = %params.profile_name, "Tool invoked");

        let client = platform_client(&ctx)?;
        let profile = client
            .get_profile(&params.profile_name)
            .await
            .map_err(|err| GET_PROFILE_FAILURES.apply(err, &params.profile_name))?;

        tracing::info!(tool = "get_profile", profile = %profile.name, "Profile retrieved");

        to_json(&profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profile_requires_name() {
        let result: Result<GetProfileParams, _> = serde_json::from_value(json!({}));
        assert!(result.is_err());

        let params: GetProfileParams =
            serde_json::from_value(json!({"profile_name": "docker-batch"})).unwrap();
        assert!(params.validate().is_ok());
        assert_eq!(params.profile_name, "docker-batch");
    }
}
