//! Twitter v2 response types

use serde::Deserialize;

/// A resolved account as returned by the user lookup endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// A problem descriptor, used both for per-user errors inside a 200 body
/// and for the top-level body of a failed request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub message: Option<String>,
    pub value: Option<String>,
}

impl ApiProblem {
    /// The most specific human-readable description available
    pub fn description(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.title.as_deref())
    }
}

/// Body of `GET /2/users/by`
///
/// Usernames that could not be resolved are missing from `data`. When none
/// resolve, `data` is absent and `errors` describes why.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersResponse {
    pub data: Option<Vec<User>>,
    pub errors: Option<Vec<ApiProblem>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_response_with_data() {
        let json = r#"{
            "data": [
                {"id": "2244994945", "name": "Twitter Dev", "username": "TwitterDev"},
                {"id": "783214", "name": "Twitter", "username": "Twitter"}
            ]
        }"#;

        let response: UsersResponse = serde_json::from_str(json).unwrap();
        let users = response.data.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "2244994945");
        assert_eq!(users[1].username, "Twitter");
        assert!(response.errors.is_none());
    }

    #[test]
    fn test_users_response_with_only_errors() {
        let json = r#"{
            "errors": [{
                "value": "nobody_here_123",
                "detail": "Could not find user with usernames: [nobody_here_123].",
                "title": "Not Found Error",
                "resource_type": "user",
                "parameter": "usernames",
                "type": "https://api.twitter.com/2/problems/resource-not-found"
            }]
        }"#;

        let response: UsersResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());
        let errors = response.errors.unwrap();
        assert_eq!(errors[0].value.as_deref(), Some("nobody_here_123"));
        assert_eq!(
            errors[0].description(),
            Some("Could not find user with usernames: [nobody_here_123].")
        );
    }

    #[test]
    fn test_problem_description_falls_back_to_message() {
        let problem = ApiProblem {
            message: Some("bad request".to_string()),
            title: Some("Invalid Request".to_string()),
            ..Default::default()
        };
        assert_eq!(problem.description(), Some("bad request"));

        let problem = ApiProblem::default();
        assert_eq!(problem.description(), None);
    }
}
