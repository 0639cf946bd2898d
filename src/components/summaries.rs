use leptos::prelude::*;

use super::placeholder::{bullet_list, loadable_view};
use crate::api::ComprehensiveSummaries;
use crate::api::types::DocumentSummary;
use crate::loadable::Loadable;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SummaryView {
	#[default]
	Overview,
	Documents,
	Synthesis,
}

impl SummaryView {
	pub const ALL: [SummaryView; 3] = [
		SummaryView::Overview,
		SummaryView::Documents,
		SummaryView::Synthesis,
	];

	pub fn label(self) -> &'static str {
		match self {
			SummaryView::Overview => "Topic overview",
			SummaryView::Documents => "Paper summaries",
			SummaryView::Synthesis => "Synthesis & gaps",
		}
	}
}

#[component]
pub fn SummariesPanel(#[prop(into)] state: Signal<Loadable<ComprehensiveSummaries>>) -> impl IntoView {
	let active = RwSignal::new(SummaryView::default());

	move || {
		loadable_view(state.get(), "summaries", move |summaries| {
			let summaries = StoredValue::new(summaries);
			view! {
				<section class="summaries-panel">
					<nav class="sub-tabs">
						{SummaryView::ALL
							.into_iter()
							.map(|v| {
								view! {
									<button
										class:active=move || active.get() == v
										on:click=move |_| active.set(v)
									>
										{v.label()}
									</button>
								}
							})
							.collect_view()}
					</nav>
					{move || summaries.with_value(|s| summary_body(s, active.get()))}
				</section>
			}
		})
	}
}

fn summary_body(summaries: &ComprehensiveSummaries, view: SummaryView) -> AnyView {
	match view {
		SummaryView::Overview => {
			let t = summaries.topic_overview.clone();
			view! {
				<article>
					<h3>{t.topic}</h3>
					<p>{t.overview}</p>
					{bullet_list("Key concepts", t.key_concepts)}
					{bullet_list("Main challenges", t.main_challenges)}
					{bullet_list("Current trends", t.current_trends)}
					{bullet_list("Future directions", t.future_directions)}
					{bullet_list("Related fields", t.related_fields)}
				</article>
			}
			.into_any()
		}
		SummaryView::Documents if summaries.document_summaries.is_empty() => {
			view! { <p class="panel-empty">"No paper summaries were produced."</p> }.into_any()
		}
		SummaryView::Documents => summaries
			.document_summaries
			.iter()
			.cloned()
			.map(document_card)
			.collect_view()
			.into_any(),
		SummaryView::Synthesis => {
			let synthesis = summaries.synthesis.clone();
			let gaps = summaries.research_gaps.clone();
			view! {
				<article>
					<h3>"Synthesis"</h3>
					<p>{synthesis}</p>
					{bullet_list("Research gaps", gaps)}
				</article>
			}
			.into_any()
		}
	}
}

fn document_card(doc: DocumentSummary) -> impl IntoView {
	let methodology = (!doc.methodology.is_empty()).then(|| {
		view! {
			<p>
				<strong>"Methodology: "</strong>
				{doc.methodology}
			</p>
		}
	});
	let significance = (!doc.significance.is_empty()).then(|| {
		view! {
			<p>
				<strong>"Significance: "</strong>
				{doc.significance}
			</p>
		}
	});
	view! {
		<article class="document-summary">
			<h4>{doc.title}</h4>
			<p>{doc.summary}</p>
			{bullet_list("Key findings", doc.key_findings)}
			{methodology}
			{bullet_list("Limitations", doc.limitations)}
			{significance}
		</article>
	}
}
