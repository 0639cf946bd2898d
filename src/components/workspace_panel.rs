use leptos::prelude::*;

use super::placeholder::loadable_view;
use crate::api::ResearchWorkspace;
use crate::loadable::Loadable;

#[component]
pub fn WorkspacePanel(#[prop(into)] state: Signal<Loadable<ResearchWorkspace>>) -> impl IntoView {
	move || {
		loadable_view(state.get(), "workspace", |ws| {
			view! {
				<section class="workspace-panel">
					<h3>{ws.name}</h3>
					<p class="meta">
						{format!(
							"{} collaborators · last activity {}",
							ws.collaborators,
							ws.last_activity,
						)}
					</p>
					<h4>"Tools"</h4>
					<ul class="tools">
						{ws
							.tools
							.into_iter()
							.map(|tool| {
								let progress = tool.progress.min(100);
								view! {
									<li>
										<span class="tool-name">{tool.name}</span>
										<span class=format!("tool-status {}", tool.status)>
											{tool.status.clone()}
										</span>
										<progress max="100" value=progress.to_string()></progress>
										<span>{format!("{progress}%")}</span>
									</li>
								}
							})
							.collect_view()}
					</ul>
					<h4>"Files"</h4>
					<ul class="files">
						{ws
							.files
							.into_iter()
							.map(|file| {
								view! {
									<li>
										<span class="file-name">{file.name}</span>
										<span class="file-kind">{file.kind}</span>
										<span class="file-size">{file.size}</span>
									</li>
								}
							})
							.collect_view()}
					</ul>
				</section>
			}
		})
	}
}
