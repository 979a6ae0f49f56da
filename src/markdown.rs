use pulldown_cmark::{Event, Options, Parser, html};

fn options() -> Options {
	Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders markdown to HTML. Raw HTML in the source is escaped, not passed through.
pub fn render(source: &str) -> String {
	let parser = Parser::new_ext(source, options()).map(|event| match event {
		Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
		other => other,
	});
	let mut out = String::with_capacity(source.len() * 3 / 2);
	html::push_html(&mut out, parser);
	out
}

pub fn word_count(source: &str) -> usize {
	source.split_whitespace().count()
}

/// Minutes to read at roughly 200 words per minute, at least one.
pub fn reading_minutes(source: &str) -> usize {
	word_count(source).div_ceil(200).max(1)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_headings_and_tables() {
		let out = render("# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
		assert!(out.contains("<h1>Title</h1>"));
		assert!(out.contains("<table>"));
	}

	#[test]
	fn escapes_raw_html() {
		let out = render("hello <script>alert(1)</script>");
		assert!(!out.contains("<script>"));
		assert!(out.contains("&lt;script&gt;"));
	}

	#[test]
	fn counts_words() {
		assert_eq!(word_count("  one two\nthree  "), 3);
		assert_eq!(reading_minutes(""), 1);
		assert_eq!(reading_minutes(&"w ".repeat(450)), 3);
	}
}
