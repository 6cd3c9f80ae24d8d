//! Bedrock Knowledge Base retrieval client
//!
//! Wraps the Bedrock Agent Runtime `Retrieve` API (retrieval only, no
//! generation step) scoped to a single configured knowledge base. Response
//! items are mapped field by field into [`JobOpening`] records; a failed
//! call surfaces immediately, there is no retry layer here.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseVectorSearchConfiguration, RetrievalResultLocation,
};
use aws_smithy_types::{Document, Number};
use thiserror::Error;

use super::types::{JobOpening, JobSource};
use crate::config::{AppConfig, ConfigError};
use crate::query::JobQuery;

/// Knowledge base retrieval errors
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    /// The client could not be constructed from configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport or service failure from the Retrieve call
    #[error("knowledge base retrieval failed: {0}")]
    Retrieve(String),

    /// The service returned a result the client cannot interpret
    #[error("malformed retrieval result: {0}")]
    MalformedResult(String),
}

/// Client for job-openings retrieval from a Bedrock Knowledge Base
pub struct KnowledgeBaseClient {
    client: aws_sdk_bedrockagentruntime::Client,
    knowledge_base_id: String,
}

impl KnowledgeBaseClient {
    /// Build a client from application configuration.
    ///
    /// When the configuration carries both halves of a static credential
    /// pair they are used directly; otherwise credential resolution is left
    /// to the SDK default chain (profiles, instance role, ...).
    pub async fn new(config: &AppConfig) -> Result<Self, KnowledgeBaseError> {
        let knowledge_base_id = config.require_knowledge_base_id()?.to_string();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region().to_string()));
        if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "static",
            ));
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            knowledge_base_id = %knowledge_base_id,
            region = config.aws_region(),
            "initialized knowledge base client"
        );
        Ok(Self::from_sdk_config(&sdk_config, knowledge_base_id))
    }

    /// Build a client from a prepared SDK configuration.
    ///
    /// Lets tests point the client at a stub endpoint without touching the
    /// process environment.
    pub fn from_sdk_config(sdk_config: &SdkConfig, knowledge_base_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockagentruntime::Client::new(sdk_config),
            knowledge_base_id: knowledge_base_id.into(),
        }
    }

    /// Retrieve job openings matching the query.
    ///
    /// Issues exactly one `Retrieve` call; results come back in the order
    /// the service ranked them.
    pub async fn retrieve_job_openings(
        &self,
        query: &JobQuery,
    ) -> Result<Vec<JobOpening>, KnowledgeBaseError> {
        tracing::debug!(
            knowledge_base_id = %self.knowledge_base_id,
            max_results = query.max_results(),
            "issuing retrieve request"
        );

        let retrieval_query = KnowledgeBaseQuery::builder()
            .text(query.query_text())
            .build();
        let vector_search = KnowledgeBaseVectorSearchConfiguration::builder()
            .number_of_results(query.max_results())
            .build();
        let retrieval_configuration = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(vector_search)
            .build();

        let output = self
            .client
            .retrieve()
            .knowledge_base_id(&self.knowledge_base_id)
            .retrieval_query(retrieval_query)
            .retrieval_configuration(retrieval_configuration)
            .send()
            .await
            .map_err(|e| KnowledgeBaseError::Retrieve(DisplayErrorContext(&e).to_string()))?;

        let results = output.retrieval_results();
        tracing::debug!(count = results.len(), "retrieve call returned");

        results.iter().map(parse_retrieval_result).collect()
    }
}

/// Map one retrieval result into a [`JobOpening`].
///
/// Content text is the only field we insist on; everything else falls back
/// to an empty or absent value.
fn parse_retrieval_result(
    result: &KnowledgeBaseRetrievalResult,
) -> Result<JobOpening, KnowledgeBaseError> {
    let content = result
        .content()
        .map(|content| content.text())
        .ok_or_else(|| {
            KnowledgeBaseError::MalformedResult("retrieval result has no content text".to_string())
        })?
        .to_string();

    let metadata = result
        .metadata()
        .map(|metadata| {
            metadata
                .iter()
                .map(|(key, value)| (key.clone(), document_to_display(value)))
                .collect()
        })
        .unwrap_or_default();

    Ok(JobOpening {
        content,
        score: result.score(),
        metadata,
        source: result.location().map(parse_source),
    })
}

fn parse_source(location: &RetrievalResultLocation) -> JobSource {
    let locator = location
        .s3_location()
        .and_then(|s3| s3.uri())
        .or_else(|| location.web_location().and_then(|web| web.url()))
        .or_else(|| {
            location
                .custom_document_location()
                .and_then(|custom| custom.id())
        });

    JobSource {
        source_type: location.r#type().as_str().to_string(),
        location: locator.map(str::to_string),
    }
}

/// Flatten a loosely-typed metadata value into a display string.
fn document_to_display(value: &Document) -> String {
    match value {
        Document::String(text) => text.clone(),
        Document::Bool(flag) => flag.to_string(),
        Document::Number(Number::PosInt(n)) => n.to_string(),
        Document::Number(Number::NegInt(n)) => n.to_string(),
        Document::Number(Number::Float(n)) => n.to_string(),
        Document::Null => "null".to_string(),
        Document::Array(items) => items
            .iter()
            .map(document_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        Document::Object(fields) => fields
            .iter()
            .map(|(key, value)| format!("{}: {}", key, document_to_display(value)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockagentruntime::types::{
        RetrievalResultContent, RetrievalResultLocationType, RetrievalResultS3Location,
        RetrievalResultWebLocation,
    };

    fn result_with_text(text: &str) -> KnowledgeBaseRetrievalResult {
        KnowledgeBaseRetrievalResult::builder()
            .content(RetrievalResultContent::builder().text(text).build())
            .build()
    }

    #[test]
    fn test_parse_minimal_result() {
        let opening = parse_retrieval_result(&result_with_text("Backend Engineer")).unwrap();
        assert_eq!(opening.content, "Backend Engineer");
        assert_eq!(opening.score, None);
        assert!(opening.metadata.is_empty());
        assert!(opening.source.is_none());
    }

    #[test]
    fn test_parse_result_without_content_fails() {
        let result = KnowledgeBaseRetrievalResult::builder().score(0.5).build();
        let err = parse_retrieval_result(&result).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::MalformedResult(_)));
    }

    #[test]
    fn test_parse_result_with_metadata() {
        let result = KnowledgeBaseRetrievalResult::builder()
            .content(RetrievalResultContent::builder().text("SRE role").build())
            .score(0.42)
            .metadata("job_id", Document::String("12345".to_string()))
            .metadata("openings", Document::Number(Number::PosInt(3)))
            .build();

        let opening = parse_retrieval_result(&result).unwrap();
        assert_eq!(opening.score, Some(0.42));
        assert_eq!(opening.metadata.get("job_id"), Some(&"12345".to_string()));
        assert_eq!(opening.metadata.get("openings"), Some(&"3".to_string()));
    }

    #[test]
    fn test_parse_s3_source() {
        let location = RetrievalResultLocation::builder()
            .r#type(RetrievalResultLocationType::S3)
            .s3_location(
                RetrievalResultS3Location::builder()
                    .uri("s3://talent8/jobs/12345.json")
                    .build(),
            )
            .build()
            .unwrap();

        let source = parse_source(&location);
        assert_eq!(source.source_type, "S3");
        assert_eq!(source.location.as_deref(), Some("s3://talent8/jobs/12345.json"));
    }

    #[test]
    fn test_parse_web_source() {
        let location = RetrievalResultLocation::builder()
            .r#type(RetrievalResultLocationType::Web)
            .web_location(
                RetrievalResultWebLocation::builder()
                    .url("https://careers.example.com/67890")
                    .build(),
            )
            .build()
            .unwrap();

        let source = parse_source(&location);
        assert_eq!(source.source_type, "WEB");
        assert_eq!(
            source.location.as_deref(),
            Some("https://careers.example.com/67890")
        );
    }

    #[test]
    fn test_parse_source_without_locator() {
        let location = RetrievalResultLocation::builder()
            .r#type(RetrievalResultLocationType::S3)
            .build()
            .unwrap();

        let source = parse_source(&location);
        assert_eq!(source.source_type, "S3");
        assert!(source.location.is_none());
    }

    #[test]
    fn test_document_to_display_scalars() {
        assert_eq!(
            document_to_display(&Document::String("Engineering".to_string())),
            "Engineering"
        );
        assert_eq!(document_to_display(&Document::Bool(true)), "true");
        assert_eq!(
            document_to_display(&Document::Number(Number::NegInt(-2))),
            "-2"
        );
        assert_eq!(document_to_display(&Document::Null), "null");
    }

    #[test]
    fn test_document_to_display_array() {
        let value = Document::Array(vec![
            Document::String("Berlin".to_string()),
            Document::String("Remote".to_string()),
        ]);
        assert_eq!(document_to_display(&value), "Berlin, Remote");
    }
}
