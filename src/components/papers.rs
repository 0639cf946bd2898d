use leptos::prelude::*;

use super::placeholder::loadable_view;
use crate::api::ResearchPaper;
use crate::loadable::Loadable;

const MAX_LISTED_AUTHORS: usize = 3;

/// "A, B, C et al." for long author lists.
pub fn author_line(authors: &[String]) -> String {
	let mut line = authors
		.iter()
		.take(MAX_LISTED_AUTHORS)
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(", ");
	if authors.len() > MAX_LISTED_AUTHORS {
		line.push_str(" et al.");
	}
	line
}

/// Venue, year and citation count joined by dots, skipping blanks.
pub fn venue_line(paper: &ResearchPaper) -> String {
	let mut parts = Vec::new();
	if !paper.journal.is_empty() {
		parts.push(paper.journal.clone());
	}
	if let Some(year) = paper.year {
		parts.push(year.to_string());
	}
	if let Some(citations) = paper.citations {
		parts.push(format!("{citations} citations"));
	}
	parts.join(" · ")
}

#[component]
pub fn PapersPanel(#[prop(into)] state: Signal<Loadable<Vec<ResearchPaper>>>) -> impl IntoView {
	move || {
		loadable_view(state.get(), "papers", |papers| {
			if papers.is_empty() {
				return view! { <p class="panel-empty">"No matching papers found."</p> }.into_any();
			}
			view! {
				<ul class="paper-list">
					{papers.into_iter().map(paper_card).collect_view()}
				</ul>
			}
			.into_any()
		})
	}
}

fn paper_card(paper: ResearchPaper) -> impl IntoView {
	let authors = author_line(&paper.authors);
	let venue = venue_line(&paper);
	let link = paper
		.url
		.clone()
		.or_else(|| paper.doi.as_ref().map(|doi| format!("https://doi.org/{doi}")));
	view! {
		<li class="paper-card">
			<div class="paper-heading">
				<h4>{paper.title}</h4>
				{paper
					.relevance_score
					.map(|score| view! { <span class="relevance">{format!("{score}% relevant")}</span> })}
			</div>
			<p class="authors">{authors}</p>
			<p class="venue">{venue}</p>
			<p class="abstract">{paper.r#abstract}</p>
			{(!paper.keywords.is_empty())
				.then(|| {
					view! {
						<div class="keywords">
							{paper
								.keywords
								.into_iter()
								.map(|k| view! { <span class="keyword">{k}</span> })
								.collect_view()}
						</div>
					}
				})}
			{link.map(|href| view! { <a href=href target="_blank" rel="noopener">"Open paper"</a> })}
		</li>
	}
}
