use folio_application::AppBootstrap;

use super::feedback::print_analysis;

pub async fn review(app: &AppBootstrap, id: &str) -> anyhow::Result<bool> {
    let service = app.review_service().await?;
    println!("Analyzing feedback {id}...");

    // Failures were already reported by the notifier.
    match service.review(id).await {
        Ok(analysis) => {
            print_analysis(&analysis);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}
