//! Wire models for the auth and research endpoints.
//!
//! Every result field is optional on the wire; arrays and strings that are
//! missing or `null` decode to empty values so panels never fail on a
//! partial payload.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::components::mind_map::DiagramData;

/// Identifier the backend sends either as a number or as a string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Id {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

impl From<i64> for Id {
	fn from(value: i64) -> Self {
		Self(value.to_string())
	}
}

impl<'de> Deserialize<'de> for Id {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Int(i64),
			Float(f64),
			Text(String),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Int(n) => Id(n.to_string()),
			Raw::Float(f) => Id(f.to_string()),
			Raw::Text(s) => Id(s),
		})
	}
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of both `/api/auth/register` and `/api/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

/// Answer of `/api/auth/login`. Both fields are optional so a token-less
/// answer can be told apart from a malformed one.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenResponse {
	#[serde(default)]
	pub access_token: Option<String>,
	#[serde(default)]
	pub token_type: Option<String>,
}

/// Body of `/api/research/query`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResearchQuery {
	pub prompt: String,
	pub include_workspace: bool,
	pub include_mindmap: bool,
	pub include_summaries: bool,
	pub include_citations: bool,
	pub include_sample_paper: bool,
	pub include_audio: bool,
}

/// Answer of `/api/research/query`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResearchResponse {
	#[serde(default, deserialize_with = "null_as_default")]
	pub papers: Vec<ResearchPaper>,
	#[serde(default)]
	pub workspace: Option<ResearchWorkspace>,
	#[serde(default)]
	pub interactive_mindmap: Option<DiagramData>,
	#[serde(default)]
	pub mindmap: Option<DiagramData>,
	#[serde(default)]
	pub comprehensive_summaries: Option<ComprehensiveSummaries>,
	#[serde(default)]
	pub automated_citations: Option<AutomatedCitations>,
	#[serde(default)]
	pub sample_paper: Option<SampleResearchPaper>,
	#[serde(default)]
	pub audio_url: Option<String>,
}

impl ResearchResponse {
	/// The interactive map when present, otherwise the legacy one.
	pub fn diagram(&self) -> Option<&DiagramData> {
		self.interactive_mindmap.as_ref().or(self.mindmap.as_ref())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResearchPaper {
	#[serde(default)]
	pub id: Id,
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub authors: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub r#abstract: String,
	#[serde(default)]
	pub year: Option<i32>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub journal: String,
	#[serde(default)]
	pub citations: Option<u32>,
	#[serde(default)]
	pub relevance_score: Option<u32>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub keywords: Vec<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub doi: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WorkspaceTool {
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub status: String,
	#[serde(default)]
	pub progress: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WorkspaceFile {
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(rename = "type", default, deserialize_with = "null_as_default")]
	pub kind: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub size: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResearchWorkspace {
	#[serde(default)]
	pub id: Id,
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub created_at: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub tools: Vec<WorkspaceTool>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub files: Vec<WorkspaceFile>,
	#[serde(default)]
	pub collaborators: u32,
	#[serde(default, deserialize_with = "null_as_default")]
	pub last_activity: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TopicSummary {
	#[serde(default, deserialize_with = "null_as_default")]
	pub topic: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub overview: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub key_concepts: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub main_challenges: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub current_trends: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub future_directions: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub related_fields: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DocumentSummary {
	#[serde(default)]
	pub paper_id: Id,
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub summary: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub key_findings: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub methodology: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub limitations: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub significance: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ComprehensiveSummaries {
	#[serde(default, deserialize_with = "null_as_default")]
	pub topic_overview: TopicSummary,
	#[serde(default, deserialize_with = "null_as_default")]
	pub document_summaries: Vec<DocumentSummary>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub synthesis: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub research_gaps: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IeeeCitation {
	#[serde(default)]
	pub id: Id,
	#[serde(default)]
	pub paper_id: Id,
	#[serde(default, deserialize_with = "null_as_default")]
	pub citation_text: String,
	#[serde(default)]
	pub citation_number: u32,
	#[serde(default, deserialize_with = "null_as_default")]
	pub in_text_format: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BibliographyEntry {
	#[serde(default)]
	pub id: Id,
	#[serde(default)]
	pub paper_id: Id,
	#[serde(default, deserialize_with = "null_as_default")]
	pub ieee_format: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub apa_format: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub mla_format: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub bibtex_format: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AutomatedCitations {
	#[serde(default, deserialize_with = "null_as_default")]
	pub ieee_citations: Vec<IeeeCitation>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub bibliography: Vec<BibliographyEntry>,
	#[serde(default)]
	pub citation_count: u32,
	#[serde(default, deserialize_with = "null_as_default")]
	pub formatted_bibliography: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PaperSection {
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub content: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub subsections: Vec<PaperSection>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SampleResearchPaper {
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub r#abstract: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub keywords: Vec<String>,
	#[serde(default)]
	pub introduction: Option<PaperSection>,
	#[serde(default)]
	pub literature_review: Option<PaperSection>,
	#[serde(default)]
	pub methodology: Option<PaperSection>,
	#[serde(default)]
	pub results: Option<PaperSection>,
	#[serde(default)]
	pub discussion: Option<PaperSection>,
	#[serde(default)]
	pub conclusion: Option<PaperSection>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub references: Vec<String>,
	#[serde(default)]
	pub word_count: u32,
	#[serde(default, deserialize_with = "null_as_default")]
	pub generated_at: String,
}

impl SampleResearchPaper {
	/// Present sections in reading order.
	pub fn sections(&self) -> Vec<&PaperSection> {
		[
			&self.introduction,
			&self.literature_review,
			&self.methodology,
			&self.results,
			&self.discussion,
			&self.conclusion,
		]
		.into_iter()
		.flatten()
		.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn id_accepts_numbers_and_strings() {
		let ids: Vec<Id> = serde_json::from_str(r#"[1, "central", 42]"#).unwrap();
		assert_eq!(ids, vec![Id::from(1), Id::from("central"), Id::from(42)]);
	}

	#[test]
	fn token_response_without_token_still_decodes() {
		let body: TokenResponse = serde_json::from_str(r#"{"token_type":"bearer"}"#).unwrap();
		assert_eq!(body.access_token, None);
		assert_eq!(body.token_type.as_deref(), Some("bearer"));
	}

	#[test]
	fn research_query_serialises_every_toggle() {
		let query = ResearchQuery {
			prompt: "graph neural networks".into(),
			include_workspace: true,
			include_mindmap: true,
			include_summaries: true,
			include_citations: true,
			include_sample_paper: true,
			include_audio: false,
		};
		let json = serde_json::to_value(&query).unwrap();
		assert_eq!(json["prompt"], "graph neural networks");
		assert_eq!(json["include_audio"], false);
		assert_eq!(json["include_sample_paper"], true);
		assert_eq!(json.as_object().unwrap().len(), 7);
	}

	#[test]
	fn empty_response_is_all_absent() {
		let resp: ResearchResponse = serde_json::from_str("{}").unwrap();
		assert!(resp.papers.is_empty());
		assert!(resp.diagram().is_none());
		assert!(resp.automated_citations.is_none());
	}

	#[test]
	fn interactive_mindmap_wins_over_legacy() {
		let resp: ResearchResponse = serde_json::from_str(
			r#"{
				"papers": null,
				"mindmap": {"topic": "old", "nodes": [], "connections": []},
				"interactive_mindmap": {"topic": "new", "nodes": [], "connections": []}
			}"#,
		)
		.unwrap();
		assert_eq!(resp.diagram().and_then(|d| d.topic.as_deref()), Some("new"));
	}

	#[test]
	fn legacy_mindmap_is_used_alone() {
		let resp: ResearchResponse =
			serde_json::from_str(r#"{"mindmap": {"topic": "old"}}"#).unwrap();
		assert_eq!(resp.diagram().and_then(|d| d.topic.as_deref()), Some("old"));
	}

	#[test]
	fn partial_summaries_treat_missing_arrays_as_empty() {
		let s: ComprehensiveSummaries = serde_json::from_str(
			r#"{
				"topic_overview": {"topic": "t", "overview": "o", "key_concepts": null},
				"document_summaries": [{"paper_id": 3, "title": "x"}]
			}"#,
		)
		.unwrap();
		assert!(s.topic_overview.key_concepts.is_empty());
		assert!(s.research_gaps.is_empty());
		assert_eq!(s.document_summaries[0].paper_id, Id::from(3));
		assert!(s.document_summaries[0].limitations.is_empty());
	}

	#[test]
	fn sample_paper_sections_skip_missing() {
		let paper: SampleResearchPaper = serde_json::from_str(
			r#"{
				"title": "T",
				"introduction": {"title": "Introduction", "content": "a"},
				"conclusion": {"title": "Conclusion", "content": "b", "subsections": null}
			}"#,
		)
		.unwrap();
		let titles: Vec<_> = paper.sections().iter().map(|s| s.title.as_str()).collect();
		assert_eq!(titles, ["Introduction", "Conclusion"]);
	}
}
