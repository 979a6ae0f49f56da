//! Request and response bodies of the backend endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::graph::GraphData;

/// Turns `{ success: false, error }` or a bare `{ error }` into [`ApiError::Backend`].
pub fn check_envelope(value: &Value) -> Result<()> {
	let success = value.get("success").and_then(Value::as_bool);
	let error = value.get("error").and_then(Value::as_str).filter(|e| !e.is_empty());
	match (success, error) {
		(Some(true), _) => Ok(()),
		(Some(false), msg) => Err(ApiError::Backend(msg.unwrap_or("Request failed").to_string())),
		(None, Some(msg)) => Err(ApiError::Backend(msg.to_string())),
		(None, None) => Ok(()),
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Ack {
	#[serde(default)]
	pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RelationshipCategory {
	#[serde(alias = "name")]
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub description: Option<String>,
}

impl RelationshipCategory {
	pub fn display(&self) -> &str {
		if self.label.is_empty() {
			&self.id
		} else {
			&self.label
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CategoriesResponse {
	#[serde(default)]
	pub categories: Vec<RelationshipCategory>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryUpdate<'a> {
	pub category: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub significance: Option<u8>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeUpdate<'a> {
	pub new_type: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Project {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProjectsResponse {
	#[serde(default)]
	pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewProject<'a> {
	pub name: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct MessageBody<'a> {
	pub message: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct FocusBody<'a> {
	pub focus: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct QueryBody<'a> {
	pub query: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChatReply {
	#[serde(alias = "reply", alias = "message", default)]
	pub response: String,
}

/// Outcome of a discovery or research cycle.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CycleReport {
	#[serde(alias = "message", default)]
	pub summary: Option<String>,
	#[serde(default)]
	pub findings: Vec<String>,
}

impl CycleReport {
	pub fn headline(&self) -> String {
		match (&self.summary, self.findings.len()) {
			(Some(s), _) if !s.is_empty() => s.clone(),
			(_, 0) => "Cycle finished.".to_string(),
			(_, n) => format!("Cycle finished with {n} findings."),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResearchAnswer {
	#[serde(default)]
	pub answer: String,
	#[serde(flatten)]
	pub graph: GraphData,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Job {
	#[serde(default)]
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub company: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub salary: Option<String>,
	#[serde(default)]
	pub posted_at: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct JobsResponse {
	#[serde(default)]
	pub jobs: Vec<Job>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Location {
	pub city: String,
	#[serde(default)]
	pub state: Option<String>,
	#[serde(default)]
	pub country: Option<String>,
}

impl std::fmt::Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.city)?;
		if let Some(state) = &self.state {
			write!(f, ", {state}")?;
		}
		match self.country.as_deref() {
			Some(c) if c != "USA" => write!(f, ", {c}"),
			_ => Ok(()),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UserProfile {
	#[serde(alias = "first_name", default)]
	pub name: String,
	#[serde(default)]
	pub nickname: Option<String>,
	#[serde(default)]
	pub location: Option<Location>,
	#[serde(default)]
	pub interests: Vec<String>,
}

impl UserProfile {
	pub fn greeting_name(&self) -> &str {
		self.nickname.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.name)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProfileResponse {
	#[serde(default)]
	pub profile: Option<UserProfile>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReferenceRequest<'a> {
	pub text: &'a str,
	pub note: &'a str,
	pub project: &'a str,
	pub source: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PersonaIdentity {
	#[serde(default)]
	pub name: String,
	#[serde(alias = "welcome_message", alias = "message", default)]
	pub greeting: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OAuthService {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub connected: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OAuthStatus {
	#[serde(default)]
	pub services: Vec<OAuthService>,
}

impl OAuthStatus {
	pub fn any_disconnected(&self) -> bool {
		self.services.iter().any(|s| !s.connected)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn envelope_failures() {
		assert!(check_envelope(&json!({"success": true, "nodes": []})).is_ok());
		assert!(check_envelope(&json!({"nodes": []})).is_ok());
		assert_eq!(
			check_envelope(&json!({"success": false, "error": "no graph"})),
			Err(ApiError::Backend("no graph".into()))
		);
		assert_eq!(
			check_envelope(&json!({"error": "research offline"})),
			Err(ApiError::Backend("research offline".into()))
		);
		assert_eq!(
			check_envelope(&json!({"success": false})),
			Err(ApiError::Backend("Request failed".into()))
		);
	}

	#[test]
	fn research_answer_carries_graph() {
		let answer: ResearchAnswer = serde_json::from_value(json!({
			"answer": "Found two sources",
			"nodes": [{"id": "t", "type": "Topic", "name": "Rust"}],
			"edges": []
		}))
		.unwrap();
		assert_eq!(answer.graph.nodes.len(), 1);
		assert_eq!(answer.answer, "Found two sources");
	}

	#[test]
	fn location_display_skips_usa() {
		let home = Location {
			city: "Austin".into(),
			state: Some("TX".into()),
			country: Some("USA".into()),
		};
		assert_eq!(home.to_string(), "Austin, TX");
		let away = Location {
			city: "Lyon".into(),
			state: None,
			country: Some("France".into()),
		};
		assert_eq!(away.to_string(), "Lyon, France");
	}

	#[test]
	fn cycle_headline() {
		assert_eq!(CycleReport::default().headline(), "Cycle finished.");
		let report = CycleReport {
			summary: None,
			findings: vec!["a".into(), "b".into()],
		};
		assert_eq!(report.headline(), "Cycle finished with 2 findings.");
	}
}
