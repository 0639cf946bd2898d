use leptos::prelude::*;

use super::placeholder::{bullet_list, loadable_view};
use crate::api::{PaperSection, SampleResearchPaper};
use crate::loadable::Loadable;

/// Characters per word used for the outline estimate.
pub const CHARS_PER_WORD: usize = 5;
pub const PREVIEW_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaperView {
	#[default]
	Outline,
	Sections,
	Full,
}

impl PaperView {
	pub const ALL: [PaperView; 3] = [PaperView::Outline, PaperView::Sections, PaperView::Full];

	pub fn label(self) -> &'static str {
		match self {
			PaperView::Outline => "Outline",
			PaperView::Sections => "Section preview",
			PaperView::Full => "Full paper",
		}
	}
}

/// Rough size of a section: characters divided by [`CHARS_PER_WORD`].
pub fn approx_word_count(content: &str) -> usize {
	content.chars().count() / CHARS_PER_WORD
}

/// First `limit` characters, with an ellipsis when something was cut.
pub fn preview(content: &str, limit: usize) -> String {
	match content.char_indices().nth(limit) {
		Some((cut, _)) => format!("{}...", content[..cut].trim_end()),
		None => content.to_owned(),
	}
}

#[component]
pub fn SamplePaperPanel(#[prop(into)] state: Signal<Loadable<SampleResearchPaper>>) -> impl IntoView {
	let mode = RwSignal::new(PaperView::default());

	move || {
		loadable_view(state.get(), "sample paper", move |paper| {
			let paper = StoredValue::new(paper);
			view! {
				<section class="sample-paper-panel">
					<nav class="sub-tabs">
						{PaperView::ALL
							.into_iter()
							.map(|m| {
								view! {
									<button
										class:active=move || mode.get() == m
										on:click=move |_| mode.set(m)
									>
										{m.label()}
									</button>
								}
							})
							.collect_view()}
					</nav>
					{move || paper.with_value(|p| paper_body(p, mode.get()))}
				</section>
			}
		})
	}
}

fn paper_body(paper: &SampleResearchPaper, mode: PaperView) -> AnyView {
	let sections: Vec<PaperSection> = paper.sections().into_iter().cloned().collect();
	match mode {
		PaperView::Outline => view! {
			<h3>{paper.title.clone()}</h3>
			<ol class="outline">
				{sections
					.into_iter()
					.map(|s| {
						let words = approx_word_count(&s.content);
						let subs = s.subsections.into_iter().map(|sub| sub.title).collect::<Vec<_>>();
						view! {
							<li>
								<span class="section-title">{s.title}</span>
								<span class="word-estimate">{format!(" (~{words} words)")}</span>
								{(!subs.is_empty())
									.then(|| {
										view! {
											<ul>
												{subs
													.into_iter()
													.map(|t| view! { <li>{t}</li> })
													.collect_view()}
											</ul>
										}
									})}
							</li>
						}
					})
					.collect_view()}
			</ol>
		}
		.into_any(),
		PaperView::Sections => view! {
			<h3>{paper.title.clone()}</h3>
			{sections
				.into_iter()
				.map(|s| {
					view! {
						<div class="section-preview">
							<h4>{s.title}</h4>
							<p>{preview(&s.content, PREVIEW_CHARS)}</p>
						</div>
					}
				})
				.collect_view()}
		}
		.into_any(),
		PaperView::Full => {
			let footer = format!(
				"{} words{}",
				paper.word_count,
				if paper.generated_at.is_empty() {
					String::new()
				} else {
					format!(" · generated {}", paper.generated_at)
				}
			);
			view! {
				<article class="full-paper">
					<h2>{paper.title.clone()}</h2>
					<h4>"Abstract"</h4>
					<p class="abstract">{paper.r#abstract.clone()}</p>
					{(!paper.keywords.is_empty())
						.then(|| {
							view! {
								<p class="keywords">
									<strong>"Keywords: "</strong>
									{paper.keywords.join(", ")}
								</p>
							}
						})}
					{sections.into_iter().map(|s| section_view(s, 3)).collect_view()}
					{bullet_list("References", paper.references.clone())}
					<footer>{footer}</footer>
				</article>
			}
			.into_any()
		}
	}
}

fn section_view(section: PaperSection, depth: u8) -> AnyView {
	let subsections = section
		.subsections
		.into_iter()
		.map(|s| section_view(s, depth.saturating_add(1)))
		.collect_view();
	let heading = match depth {
		0..=3 => view! { <h3>{section.title}</h3> }.into_any(),
		4 => view! { <h4>{section.title}</h4> }.into_any(),
		_ => view! { <h5>{section.title}</h5> }.into_any(),
	};
	view! {
		<section>
			{heading}
			<p>{section.content}</p>
			{subsections}
		</section>
	}
	.into_any()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn word_estimate_divides_characters() {
		assert_eq!(approx_word_count(""), 0);
		assert_eq!(approx_word_count("four"), 0);
		assert_eq!(approx_word_count("hello"), 1);
		assert_eq!(approx_word_count(&"x".repeat(3500)), 700);
		// an estimate, not a count: 2 real words here
		assert_eq!(approx_word_count("supercalifragilistic expialidocious"), 7);
	}

	#[test]
	fn preview_cuts_on_characters() {
		assert_eq!(preview("short", 200), "short");
		assert_eq!(preview("abcdef", 3), "abc...");
		assert_eq!(preview("ab cdef", 3), "ab...");
		assert_eq!(preview("ééééé", 2), "éé...");
	}

	#[test]
	fn default_view_is_outline() {
		assert_eq!(PaperView::default(), PaperView::Outline);
		assert_eq!(PaperView::ALL.len(), 3);
	}
}
