use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionRequest;
use crate::error::ApiError;
use crate::prompt::{IssueReport, Language, PromptTemplate};
use crate::AppState;

/// Diagnoses use greedy decoding.
pub const DIAGNOSIS_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub issue_type: Option<String>,
    pub location: Option<String>,
    pub leak_type: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub diagnosis: String,
}

impl AnalyzeRequest {
    fn into_report(self, default_language: Language) -> Result<(IssueReport, Language), ApiError> {
        let issue_type = match self.issue_type {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ApiError::MissingIssueType),
        };

        let language = match self.language.as_deref() {
            Some(code) if !code.is_empty() => code.parse::<Language>()?,
            _ => default_language,
        };

        let report = IssueReport::new(issue_type, self.location, self.leak_type, self.description);
        Ok((report, language))
    }
}

// POST /analyze
pub async fn analyze_home_issue(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;

    let (report, language) = request.into_report(state.config.default_language)?;

    let template = PromptTemplate::select(&report);
    tracing::info!(
        issue_type = %report.issue_type,
        template = template.kind(),
        %language,
        "analyzing home issue"
    );

    let completion = CompletionRequest {
        system_instruction: language.system_instruction().to_string(),
        user_prompt: template.render(language),
        temperature: DIAGNOSIS_TEMPERATURE,
    };

    let diagnosis = state.completion.complete(completion).await?;

    Ok(Json(AnalyzeResponse { diagnosis }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_empty_issue_type() {
        let request = AnalyzeRequest::default();
        assert!(matches!(
            request.into_report(Language::English),
            Err(ApiError::MissingIssueType)
        ));

        let request = AnalyzeRequest {
            issue_type: Some(String::new()),
            location: Some("attic".into()),
            ..Default::default()
        };
        assert!(matches!(
            request.into_report(Language::English),
            Err(ApiError::MissingIssueType)
        ));
    }

    #[test]
    fn test_language_defaults_and_overrides() {
        let request = AnalyzeRequest {
            issue_type: Some("leak".into()),
            ..Default::default()
        };
        let (_, language) = request.into_report(Language::Arabic).unwrap();
        assert_eq!(language, Language::Arabic);

        let request = AnalyzeRequest {
            issue_type: Some("leak".into()),
            language: Some("en".into()),
            ..Default::default()
        };
        let (_, language) = request.into_report(Language::Arabic).unwrap();
        assert_eq!(language, Language::English);

        let request = AnalyzeRequest {
            issue_type: Some("leak".into()),
            language: Some("de".into()),
            ..Default::default()
        };
        assert!(matches!(
            request.into_report(Language::English),
            Err(ApiError::UnsupportedLanguage(_))
        ));
    }
}
