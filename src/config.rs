//! Startup configuration read once from the host page.

use log::info;

/// `<meta name>` carrying the workspace owner.
pub const USERNAME_META: &str = "my-desk:username";
/// `<meta name>` carrying the backend origin.
pub const API_BASE_META: &str = "my-desk:api-base";
/// `<meta name>` that turns the research demo graph off with `off` or `false`.
pub const DEMO_FALLBACK_META: &str = "my-desk:demo-fallback";
/// Used when the page names no user.
pub const DEFAULT_USERNAME: &str = "me";

/// Where the app is mounted and which backend it talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Workspace owner, never empty.
	pub username: String,
	/// Router base, `/{username}/app`.
	pub base_path: String,
	/// Prefix for `/api` and `/oauth` calls; empty means same origin.
	pub api_base: String,
	/// Whether the research page may show its bundled demo graph when the backend errors.
	pub demo_fallback: bool,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::for_user(DEFAULT_USERNAME)
	}
}

impl AppConfig {
	/// Defaults for `username`; a blank name falls back to [`DEFAULT_USERNAME`].
	pub fn for_user(username: &str) -> Self {
		let username = username.trim().trim_matches('/');
		let username = if username.is_empty() {
			DEFAULT_USERNAME
		} else {
			username
		};
		Self {
			username: username.to_string(),
			base_path: format!("/{username}/app"),
			api_base: String::new(),
			demo_fallback: true,
		}
	}

	/// Sets the backend prefix, without a trailing slash.
	pub fn with_api_base(mut self, api_base: &str) -> Self {
		self.api_base = api_base.trim_end_matches('/').to_string();
		self
	}

	/// Enables or disables the research demo graph.
	pub fn with_demo_fallback(mut self, enabled: bool) -> Self {
		self.demo_fallback = enabled;
		self
	}

	/// Absolute in-app link for a route such as `/graph`.
	pub fn href(&self, route: &str) -> String {
		let route = route.trim_start_matches('/');
		if route.is_empty() {
			format!("{}/", self.base_path)
		} else {
			format!("{}/{}", self.base_path, route)
		}
	}

	/// Strips the base path from a browser pathname, yielding the in-app route.
	pub fn route_of<'a>(&self, pathname: &'a str) -> &'a str {
		match pathname.strip_prefix(self.base_path.as_str()) {
			Some("") => "/",
			Some(rest) if rest.starts_with('/') => rest,
			_ => pathname,
		}
	}

	/// Builds the config from `<meta>` tags of the host page.
	pub fn from_document() -> Self {
		let config = Self::for_user(&meta_content(USERNAME_META).unwrap_or_default())
			.with_api_base(&meta_content(API_BASE_META).unwrap_or_default())
			.with_demo_fallback(!matches!(
				meta_content(DEMO_FALLBACK_META).as_deref(),
				Some("off" | "false")
			));
		info!("Mounted under {}", config.base_path);
		config
	}
}

fn meta_content(name: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document
		.query_selector(&format!("meta[name=\"{name}\"]"))
		.ok()??;
	element.get_attribute("content")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_path_comes_from_username() {
		let config = AppConfig::for_user("ada");
		assert_eq!(config.base_path, "/ada/app");
		assert_eq!(config.href("/graph"), "/ada/app/graph");
		assert_eq!(config.href("/"), "/ada/app/");
		assert_eq!(AppConfig::for_user("  ").username, DEFAULT_USERNAME);
	}

	#[test]
	fn route_of_strips_base() {
		let config = AppConfig::for_user("ada");
		assert_eq!(config.route_of("/ada/app/graph"), "/graph");
		assert_eq!(config.route_of("/ada/app"), "/");
		assert_eq!(config.route_of("/ada/apple"), "/ada/apple");
		assert_eq!(config.route_of("/write"), "/write");
	}

	#[test]
	fn api_base_drops_trailing_slash() {
		let config = AppConfig::default().with_api_base("https://desk.example/");
		assert_eq!(config.api_base, "https://desk.example");
	}
}
