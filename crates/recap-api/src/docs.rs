use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::messages::list_messages,
        routes::summarize::summarize_messages,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::messages::MessageView,
        routes::messages::ListMessagesResponse,
        routes::summarize::NarrowTermParam,
        routes::summarize::SummarizeRequest,
        routes::summarize::SummarizeResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "messages", description = "Anchored message window fetch"),
        (name = "summarization", description = "LLM conversation summaries")
    )
)]
pub struct ApiDoc;
