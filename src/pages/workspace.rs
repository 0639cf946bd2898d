use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use log::{info, warn};

use crate::api::{self, ResearchQuery, ResearchResponse};
use crate::components::mind_map::DiagramNode;
use crate::components::{
	CitationsPanel, MindMap, PapersPanel, SamplePaperPanel, SummariesPanel, WorkspacePanel,
	loadable_view,
};
use crate::config::ENTRY_ROUTE;
use crate::loadable::Loadable;
use crate::session::{Protected, use_session};

/// Result tab of the research view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultTab {
	#[default]
	Papers,
	Workspace,
	MindMap,
	Summaries,
	Citations,
	SamplePaper,
	Audio,
}

impl ResultTab {
	pub const ALL: [ResultTab; 7] = [
		ResultTab::Papers,
		ResultTab::Workspace,
		ResultTab::MindMap,
		ResultTab::Summaries,
		ResultTab::Citations,
		ResultTab::SamplePaper,
		ResultTab::Audio,
	];

	pub fn label(self) -> &'static str {
		match self {
			ResultTab::Papers => "Papers",
			ResultTab::Workspace => "Workspace",
			ResultTab::MindMap => "Mind map",
			ResultTab::Summaries => "Summaries",
			ResultTab::Citations => "Citations",
			ResultTab::SamplePaper => "Sample paper",
			ResultTab::Audio => "Audio",
		}
	}
}

/// Which sections the next query asks for.
#[derive(Clone, Copy, Debug)]
struct SectionToggles {
	workspace: RwSignal<bool>,
	mindmap: RwSignal<bool>,
	summaries: RwSignal<bool>,
	citations: RwSignal<bool>,
	sample_paper: RwSignal<bool>,
	audio: RwSignal<bool>,
}

impl SectionToggles {
	fn new() -> Self {
		Self {
			workspace: RwSignal::new(true),
			mindmap: RwSignal::new(true),
			summaries: RwSignal::new(true),
			citations: RwSignal::new(true),
			sample_paper: RwSignal::new(true),
			audio: RwSignal::new(true),
		}
	}

	fn query(&self, prompt: String) -> ResearchQuery {
		ResearchQuery {
			prompt,
			include_workspace: self.workspace.get_untracked(),
			include_mindmap: self.mindmap.get_untracked(),
			include_summaries: self.summaries.get_untracked(),
			include_citations: self.citations.get_untracked(),
			include_sample_paper: self.sample_paper.get_untracked(),
			include_audio: self.audio.get_untracked(),
		}
	}

	fn labelled(&self) -> [(&'static str, RwSignal<bool>); 6] {
		[
			("Workspace", self.workspace),
			("Mind map", self.mindmap),
			("Summaries", self.summaries),
			("Citations", self.citations),
			("Sample paper", self.sample_paper),
			("Audio", self.audio),
		]
	}
}

/// The research view behind the session gate.
#[component]
pub fn ProtectedWorkspace() -> impl IntoView {
	view! {
		<Protected>
			<Workspace />
		</Protected>
	}
}

#[component]
pub fn Workspace() -> impl IntoView {
	let session = use_session();
	let navigate = use_navigate();

	let prompt = RwSignal::new(String::new());
	let toggles = SectionToggles::new();
	let loading = RwSignal::new(false);
	let error = RwSignal::new(Option::<String>::None);
	let response = RwSignal::new(Option::<ResearchResponse>::None);
	let tab = RwSignal::new(ResultTab::default());
	let focus = RwSignal::new(Option::<String>::None);

	// one projection per panel
	fn section<T: Clone + Send + Sync + 'static>(
		loading: RwSignal<bool>,
		response: RwSignal<Option<ResearchResponse>>,
		field: fn(&ResearchResponse) -> Option<T>,
	) -> Signal<Loadable<T>> {
		Signal::derive(move || response.with(|r| Loadable::project(loading.get(), r.as_ref(), field)))
	}
	let papers = section(loading, response, |r| Some(r.papers.clone()));
	let workspace = section(loading, response, |r| r.workspace.clone());
	let mindmap = section(loading, response, |r| r.diagram().cloned());
	let summaries = section(loading, response, |r| r.comprehensive_summaries.clone());
	let citations = section(loading, response, |r| r.automated_citations.clone());
	let sample_paper = section(loading, response, |r| r.sample_paper.clone());
	let audio = section(loading, response, |r| r.audio_url.clone().filter(|u| !u.is_empty()));

	// one MindMap stays mounted; it keeps its search box across payloads and tabs
	let diagram =
		Signal::derive(move || mindmap.with(|m| m.ready().cloned().unwrap_or_default()));
	let has_diagram = Signal::derive(move || mindmap.with(|m| m.ready().is_some()));

	let submit_session = session.clone();
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if loading.get_untracked() {
			return;
		}
		let text = prompt.get_untracked().trim().to_owned();
		if text.is_empty() {
			error.set(Some("Please enter a research prompt.".into()));
			return;
		}
		let query = toggles.query(text);
		let token = submit_session.token();
		loading.set(true);
		error.set(None);
		response.set(None);
		focus.set(None);

		spawn_local(async move {
			match api::research_query(&query, token.as_deref()).await {
				Ok(body) => {
					info!("research results ready for {:?}", query.prompt);
					response.set(Some(body));
				}
				Err(e) => {
					warn!("research query failed: {e:?}");
					error.set(Some(e.user_message()));
				}
			}
			loading.set(false);
		});
	};

	let on_logout = move |_| {
		session.sign_out();
		navigate(ENTRY_ROUTE, Default::default());
	};

	let on_node_select = Callback::new(move |node: DiagramNode| {
		info!("mind map node selected: {} ({})", node.label, node.id);
		focus.set(Some(node.label));
	});

	view! {
		<div class="workspace-page">
			<header class="workspace-header">
				<h1>"R.A.M.A Research Workspace"</h1>
				<button class="logout" on:click=on_logout>"Log out"</button>
			</header>

			<form class="query-form" on:submit=on_submit>
				<textarea
					rows="3"
					placeholder="Describe what you want to research..."
					bind:value=prompt
				></textarea>
				<fieldset class="section-toggles">
					{toggles
						.labelled()
						.into_iter()
						.map(|(label, flag)| {
							view! {
								<label>
									<input type="checkbox" bind:checked=flag />
									{label}
								</label>
							}
						})
						.collect_view()}
				</fieldset>
				<button type="submit" disabled=move || loading.get()>
					{move || if loading.get() { "Researching..." } else { "Start research" }}
				</button>
				{move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
			</form>

			<nav class="result-tabs">
				{ResultTab::ALL
					.into_iter()
					.map(|t| {
						view! {
							<button class:active=move || tab.get() == t on:click=move |_| tab.set(t)>
								{t.label()}
							</button>
						}
					})
					.collect_view()}
				{move || focus.get().map(|f| view! { <span class="focus">{format!("Focused: {f}")}</span> })}
			</nav>

			<div class="result-body">
				{move || match tab.get() {
					ResultTab::Papers => view! { <PapersPanel state=papers /> }.into_any(),
					ResultTab::Workspace => view! { <WorkspacePanel state=workspace /> }.into_any(),
					// rendered below, outside this match
					ResultTab::MindMap => ().into_any(),
					ResultTab::Summaries => view! { <SummariesPanel state=summaries /> }.into_any(),
					ResultTab::Citations => view! { <CitationsPanel state=citations /> }.into_any(),
					ResultTab::SamplePaper => {
						view! { <SamplePaperPanel state=sample_paper /> }.into_any()
					}
					ResultTab::Audio => {
						loadable_view(
							audio.get(),
							"audio summary",
							|url| {
								view! {
									<audio controls src=url>
										"Your browser does not support audio playback."
									</audio>
								}
							},
						)
					}
				}}
			</div>
			<div
				class="result-body"
				style:display=move || if tab.get() == ResultTab::MindMap { "block" } else { "none" }
			>
				{move || loadable_view(mindmap.get(), "mind map", |_| ())}
				<div style:display=move || if has_diagram.get() { "block" } else { "none" }>
					<MindMap data=diagram on_node_select=on_node_select />
				</div>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tabs_cover_every_result_section() {
		assert_eq!(ResultTab::ALL.len(), 7);
		assert_eq!(ResultTab::default(), ResultTab::Papers);
		let labels: Vec<_> = ResultTab::ALL.iter().map(|t| t.label()).collect();
		assert!(labels.contains(&"Citations"));
		assert!(labels.contains(&"Mind map"));
	}
}
