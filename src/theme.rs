#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	Light,
	#[default]
	Dark,
}

impl Theme {
	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Value of the `data-theme` attribute on `<html>`.
	pub fn attr(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggles_back_and_forth() {
		assert_eq!(Theme::Dark.toggled(), Theme::Light);
		assert_eq!(Theme::Light.toggled().attr(), "dark");
	}
}
