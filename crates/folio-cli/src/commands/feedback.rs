use chrono::{DateTime, Local};
use colored::Colorize;
use folio_application::FeedbackStore;
use folio_core::analysis::{AnalysisResult, Sentiment};
use folio_core::feedback::FeedbackItem;

pub fn add(store: &mut FeedbackStore, title: &str, content: &str) -> bool {
    let added = store.add_feedback(title, content);
    if added {
        if let Some(item) = store.view().and_then(|view| view.user_feedback().first()) {
            println!("{}", item.id.dimmed());
        }
    }
    added
}

pub fn delete(store: &mut FeedbackStore, id: &str) -> bool {
    let present = |store: &FeedbackStore| {
        store
            .view()
            .is_some_and(|view| view.user_feedback().iter().any(|item| item.id == id))
    };

    if store.view().and_then(|view| view.current_user()).is_none() {
        println!("{} Please log in first", "✗".red().bold());
        return false;
    }

    let existed = present(store);
    store.delete_feedback(id);
    existed && !present(store)
}

pub fn list(store: &FeedbackStore) -> bool {
    let Some(view) = store.view() else {
        return false;
    };
    let Some(user) = view.current_user() else {
        println!("Not logged in");
        return false;
    };

    let feedback = view.user_feedback();
    if feedback.is_empty() {
        println!("No feedback from {user} yet");
        return true;
    }

    for item in feedback {
        print_item(item, view.analysis_for(&item.id));
    }
    true
}

pub fn analyses(store: &FeedbackStore) -> bool {
    let Some(view) = store.view() else {
        return false;
    };

    let results = view.analysis_results();
    if results.is_empty() {
        println!("No analyses stored");
        return true;
    }

    for (id, analysis) in results {
        println!("{}", id.bold());
        print_analysis(analysis);
    }
    true
}

fn print_item(item: &FeedbackItem, analysis: Option<&AnalysisResult>) {
    let created = DateTime::from_timestamp_millis(item.timestamp)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| item.timestamp.to_string());

    println!("{}  {}  {}", item.id.dimmed(), created, item.title.bold());
    println!("    {}", item.content);
    if let Some(analysis) = analysis {
        print_analysis(analysis);
    }
    println!();
}

pub fn print_analysis(analysis: &AnalysisResult) {
    let sentiment = match analysis.sentiment {
        Sentiment::Positive => analysis.sentiment.to_string().green(),
        Sentiment::Neutral => analysis.sentiment.to_string().yellow(),
        Sentiment::Negative => analysis.sentiment.to_string().red(),
    };
    println!("    [{}] {}", sentiment, analysis.summary);
    println!("    → {}", analysis.suggested_action.italic());
}
