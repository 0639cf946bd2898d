use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::placeholder::loadable_view;
use crate::api::{AutomatedCitations, BibliographyEntry};
use crate::browser;
use crate::loadable::Loadable;

/// Citation style offered by the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CitationFormat {
	#[default]
	Ieee,
	Apa,
	Mla,
	Bibtex,
}

impl CitationFormat {
	pub const ALL: [CitationFormat; 4] = [
		CitationFormat::Ieee,
		CitationFormat::Apa,
		CitationFormat::Mla,
		CitationFormat::Bibtex,
	];

	pub fn label(self) -> &'static str {
		match self {
			CitationFormat::Ieee => "IEEE",
			CitationFormat::Apa => "APA",
			CitationFormat::Mla => "MLA",
			CitationFormat::Bibtex => "BibTeX",
		}
	}

	/// The backend-rendered string for this style.
	pub fn render(self, entry: &BibliographyEntry) -> &str {
		match self {
			CitationFormat::Ieee => &entry.ieee_format,
			CitationFormat::Apa => &entry.apa_format,
			CitationFormat::Mla => &entry.mla_format,
			CitationFormat::Bibtex => &entry.bibtex_format,
		}
	}

	pub fn file_name(self) -> &'static str {
		match self {
			CitationFormat::Bibtex => "references.bib",
			_ => "references.txt",
		}
	}

	pub fn mime(self) -> &'static str {
		match self {
			CitationFormat::Bibtex => "application/x-bibtex",
			_ => "text/plain",
		}
	}
}

/// Exactly what the panel shows for `format`: one entry per block, blank
/// line between entries.
pub fn displayed_text(citations: &AutomatedCitations, format: CitationFormat) -> String {
	citations
		.bibliography
		.iter()
		.map(|entry| format.render(entry))
		.collect::<Vec<_>>()
		.join("\n\n")
}

#[component]
pub fn CitationsPanel(#[prop(into)] state: Signal<Loadable<AutomatedCitations>>) -> impl IntoView {
	let format = RwSignal::new(CitationFormat::default());
	let status = RwSignal::new(Option::<String>::None);

	move || {
		loadable_view(state.get(), "citations", move |citations| {
			let citations = StoredValue::new(citations);
			let count = citations.with_value(|c| c.citation_count.max(c.bibliography.len() as u32));

			let on_copy = move |_| {
				let text = citations.with_value(|c| displayed_text(c, format.get_untracked()));
				spawn_local(async move {
					match browser::copy_to_clipboard(&text).await {
						Ok(()) => {
							info!("copied {} citation characters", text.len());
							status.set(Some("Copied to clipboard".into()));
						}
						Err(e) => {
							warn!("clipboard write failed: {e:?}");
							status.set(Some("Copy failed".into()));
						}
					}
				});
			};

			let on_download = move |_| {
				let fmt = format.get_untracked();
				let text = citations.with_value(|c| displayed_text(c, fmt));
				if let Err(e) = browser::download_text(fmt.file_name(), fmt.mime(), &text) {
					warn!("citation download failed: {e:?}");
					status.set(Some("Download failed".into()));
				}
			};

			let on_download_bibliography = move |_| {
				let text = citations.with_value(|c| c.formatted_bibliography.clone());
				if let Err(e) = browser::download_text("bibliography.txt", "text/plain", &text) {
					warn!("bibliography download failed: {e:?}");
					status.set(Some("Download failed".into()));
				}
			};

			view! {
				<section class="citations-panel">
					<header>
						<h3>{format!("Citations ({count})")}</h3>
						<div class="format-picker">
							{CitationFormat::ALL
								.into_iter()
								.map(|f| {
									view! {
										<button
											class:active=move || format.get() == f
											on:click=move |_| {
												format.set(f);
												status.set(None);
											}
										>
											{f.label()}
										</button>
									}
								})
								.collect_view()}
						</div>
						<div class="citation-actions">
							<button on:click=on_copy>"Copy"</button>
							<button on:click=on_download>"Download"</button>
							<button
								disabled=move || {
									citations.with_value(|c| c.formatted_bibliography.is_empty())
								}
								on:click=on_download_bibliography
							>
								"Download bibliography"
							</button>
						</div>
						{move || status.get().map(|s| view! { <span class="status">{s}</span> })}
					</header>
					<ol class="bibliography">
						{move || {
							let fmt = format.get();
							citations
								.with_value(|c| {
									c.bibliography
										.iter()
										.map(|entry| fmt.render(entry).to_owned())
										.collect::<Vec<_>>()
								})
								.into_iter()
								.map(|text| {
									if fmt == CitationFormat::Bibtex {
										view! {
											<li>
												<pre>{text}</pre>
											</li>
										}
											.into_any()
									} else {
										view! { <li>{text}</li> }.into_any()
									}
								})
								.collect_view()
						}}
					</ol>
					{citations
						.with_value(|c| {
							(!c.ieee_citations.is_empty())
								.then(|| {
									let markers = c
										.ieee_citations
										.iter()
										.map(|cite| {
											format!("{} → {}", cite.in_text_format, cite.citation_text)
										})
										.collect::<Vec<_>>();
									view! {
										<h4>"In-text markers"</h4>
										<ul class="in-text">
											{markers
												.into_iter()
												.map(|m| view! { <li>{m}</li> })
												.collect_view()}
										</ul>
									}
								})
						})}
				</section>
			}
		})
	}
}
