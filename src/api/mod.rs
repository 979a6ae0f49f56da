//! Backend endpoints used by the pages and the chat widget.

mod client;
pub mod types;

pub use client::ApiClient;
use types::*;

use crate::chat::PersonaChatRequest;
use crate::error::Result;
use crate::graph::GraphData;

impl ApiClient {
	pub async fn cognitive_graph(&self) -> Result<GraphData> {
		self.get("/api/cognitive/graph").await
	}

	pub async fn full_graph(&self) -> Result<GraphData> {
		self.get("/api/graph/full").await
	}

	pub async fn research_graph(&self) -> Result<GraphData> {
		self.get("/api/research/graph").await
	}

	pub async fn research_query(&self, query: &str) -> Result<ResearchAnswer> {
		self.post("/api/research/query", &QueryBody { query }).await
	}

	pub async fn relationships(&self) -> Result<GraphData> {
		self.get("/api/relationships").await
	}

	pub async fn relationship_categories(&self) -> Result<Vec<RelationshipCategory>> {
		let resp: CategoriesResponse = self.get("/api/relationships/categories").await?;
		Ok(resp.categories)
	}

	pub async fn update_relationship_category(
		&self,
		id: &str,
		category: &str,
		significance: Option<u8>,
	) -> Result<Ack> {
		let body = CategoryUpdate {
			category,
			significance,
		};
		self.put(&format!("/api/relationships/{id}/category"), &body).await
	}

	pub async fn update_relationship_type(&self, id: &str, new_type: &str) -> Result<Ack> {
		self.put(&format!("/api/relationships/{id}/type"), &TypeUpdate { new_type })
			.await
	}

	pub async fn delete_relationship(&self, id: &str) -> Result<Ack> {
		self.delete(&format!("/api/relationships/{id}")).await
	}

	pub async fn projects(&self) -> Result<Vec<Project>> {
		let resp: ProjectsResponse = self.get("/api/projects").await?;
		Ok(resp.projects)
	}

	pub async fn create_project(&self, name: &str) -> Result<Ack> {
		self.post("/api/projects", &NewProject { name }).await
	}

	pub async fn initialize_default_projects(&self) -> Result<Ack> {
		self.post("/api/projects/initialize-defaults", &serde_json::json!({}))
			.await
	}

	pub async fn project_chat(&self, id: &str, message: &str) -> Result<ChatReply> {
		self.post(&format!("/api/projects/{id}/chat"), &MessageBody { message })
			.await
	}

	pub async fn project_research(&self, id: &str, focus: &str) -> Result<CycleReport> {
		self.post(&format!("/api/projects/{id}/research"), &FocusBody { focus })
			.await
	}

	pub async fn run_cycle(&self, query: &str) -> Result<CycleReport> {
		self.post("/api/cycles/run", &QueryBody { query }).await
	}

	pub async fn jobs(&self) -> Result<Vec<Job>> {
		let resp: JobsResponse = self.get("/api/jobs").await?;
		Ok(resp.jobs)
	}

	pub async fn user_profile(&self) -> Result<Option<UserProfile>> {
		let resp: ProfileResponse = self.get("/api/user-profile").await?;
		Ok(resp.profile)
	}

	pub async fn save_reference(&self, reference: &ReferenceRequest<'_>) -> Result<Ack> {
		self.post("/api/references", reference).await
	}

	pub async fn persona_initialize(&self) -> Result<PersonaIdentity> {
		self.post("/api/persona/initialize", &serde_json::json!({})).await
	}

	pub async fn persona_chat(&self, request: &PersonaChatRequest) -> Result<ChatReply> {
		self.post("/api/persona/chat", request).await
	}

	pub async fn oauth_status(&self) -> Result<OAuthStatus> {
		self.get("/oauth/status").await
	}

	/// Redirect target that starts linking `service_id`, returning to `redirect` afterwards.
	pub fn oauth_connect_url(&self, service_id: &str, redirect: &str) -> String {
		let redirect = String::from(js_sys::encode_uri_component(redirect));
		self.url(&format!("/oauth/connect/{service_id}?redirect={redirect}"))
	}
}
