use crate::context::AppContext;
use crate::workflow::detect::changed_documents;

pub async fn run(ctx: &AppContext) -> Vec<String> {
    changed_documents(ctx).await
}
