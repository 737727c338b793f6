use std::sync::Arc;

use portfolio_backend::services::CascadeService;
use portfolio_backend::supabase::{SupabaseClient, SupabaseConfig, SupabaseHttpClient};

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_fetch_subjects_from_supabase() {
    dotenvy::dotenv().ok();

    let config = SupabaseConfig::new_from_env().expect("Failed to load Supabase config");
    let supabase = SupabaseHttpClient::new(config).expect("Failed to create Supabase client");

    let subjects = supabase
        .fetch_subjects()
        .await
        .expect("Failed to fetch subjects");
    println!("Fetched {} subjects from Supabase", subjects.len());

    for s in &subjects {
        println!(
            "ID: {}, Name: {}, Courses: {}",
            s.id,
            s.name,
            s.course_count()
        );
    }

    for s in subjects {
        assert!(!s.id.is_empty(), "Subject ID should not be empty");
        assert!(!s.name.is_empty(), "Subject name should not be empty");
    }

    println!("✓ All subjects verified!");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_subject_cascade_against_live_data() {
    dotenvy::dotenv().ok();

    let config = SupabaseConfig::new_from_env().expect("Failed to load Supabase config");
    let supabase: Arc<dyn SupabaseClient> =
        Arc::new(SupabaseHttpClient::new(config).expect("Failed to create Supabase client"));
    let service = CascadeService::new(supabase.clone());

    let subjects = service
        .load_subject_list()
        .await
        .expect("Failed to load subject list");
    assert!(!subjects.is_empty(), "No subjects found in Supabase");

    // Walk the first subject through the full cascade.
    let detail = service
        .load_subject_detail(&subjects[0].id)
        .await
        .expect("Failed to load subject detail")
        .expect("Listed subject should resolve by id");

    println!(
        "Subject {} has {} courses",
        detail.data.subject.name,
        detail.data.courses.len()
    );

    for c in &detail.data.courses {
        let labels = &detail.data.tools_by_course[&c.id];
        assert!(labels.len() <= 3, "Displayed tools are capped at three");
        println!("  {} -> tools {:?}", c.name, labels);
    }

    println!("✓ Cascade verified against live data!");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_unknown_id_resolves_to_absent() {
    dotenvy::dotenv().ok();

    let config = SupabaseConfig::new_from_env().expect("Failed to load Supabase config");
    let supabase = SupabaseHttpClient::new(config).expect("Failed to create Supabase client");

    let found = supabase
        .fetch_subject_by_id("definitely-not-a-subject-id")
        .await
        .expect("Lookup itself should succeed");

    assert!(found.is_none(), "Unknown id must report absent");
}
