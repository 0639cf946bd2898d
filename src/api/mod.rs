//! HTTP client for the research backend.

pub mod client;
pub mod types;

pub use client::{login, register, research_query};
pub use types::{
	AutomatedCitations, BibliographyEntry, ComprehensiveSummaries, Credentials, Id,
	PaperSection, ResearchPaper, ResearchQuery, ResearchResponse, ResearchWorkspace,
	SampleResearchPaper,
};
