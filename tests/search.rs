use worklog_query::store::{Company, Job, Note};
use worklog_query::{parse, search, Entity, EntityKind, MemoryStore, Results, SearchConfig};

fn worklog() -> MemoryStore {
    MemoryStore {
        jobs: vec![
            Job { id: 412, title: "Website relaunch".to_string(), company_id: Some(1) },
            Job { id: 7, title: "Audit".to_string(), company_id: None },
        ],
        notes: vec![Note { id: 5, job_id: 7, body: "Bring receipts".to_string() }],
        companies: vec![Company { id: 1, name: "Acme".to_string() }],
        ..MemoryStore::default()
    }
}

#[test]
fn clause_in_free_text_resolves_to_its_job() {
    let store = worklog();
    let found = search("hours on @job.id=412 this week?", &Results::default(), &store).unwrap();

    let jobs = found.group("Jobs").unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0], Entity::Job(store.jobs[0].clone()));
}

#[test]
fn missing_job_leaves_empty_group() {
    let found = search("@job.id=999", &Results::default(), &worklog()).unwrap();
    assert_eq!(found.group("Jobs").map(<[Entity]>::len), Some(0));
}

#[test]
fn unregistered_species_contributes_nothing() {
    let found = search("@company.id=1", &Results::default(), &worklog()).unwrap();
    assert_eq!(found.groups().map(|(label, _)| label).collect::<Vec<_>>(), vec!["Jobs"]);
    assert!(found.is_empty());
}

#[test]
fn second_clause_for_a_species_is_dropped() {
    let components = parse("@job.id=412 @JOB.id=7");
    assert_eq!(components.len(), 1);

    let found = Results::default().find(&components, &worklog()).unwrap();
    assert_eq!(found.group("Jobs").unwrap().len(), 1);
}

#[test]
fn configured_species_resolve_into_their_groups() {
    let mut config = SearchConfig::default();
    config.species = vec!["Job".to_string(), "Note".to_string(), "Company".to_string()];
    config.groups.insert("Note".to_string(), "Journal".to_string());
    let results = Results::from_config(&config);

    let found = search("@note.id=5 @company.id=1 @job.id=7", &results, &worklog()).unwrap();

    assert_eq!(found.len(), 3);
    assert_eq!(found.group("Journal").unwrap()[0].kind(), EntityKind::Note);
    assert_eq!(found.group("Companies").unwrap()[0].id(), 1);
    assert_eq!(found.group("Jobs").unwrap()[0].id(), 7);
}

#[test]
fn malformed_input_is_forgiven() {
    let queries = ["", "hello world", "@job.id=abc", "@job.id=", "@.id=1", "@job.=1", "@@@", "@job.id = 412"];
    for query in queries {
        let found = search(query, &Results::default(), &worklog()).unwrap();
        assert!(found.is_empty(), "query {:?} should find nothing", query);
    }
}

#[test]
fn config_file_without_groups_labels_like_the_default() {
    let temp_file = "test_search_company_config.json";
    std::fs::write(temp_file, r#"{ "species": ["Company"] }"#).unwrap();
    let from_file = SearchConfig::from_json_file(temp_file).unwrap();
    std::fs::remove_file(temp_file).ok();

    let store = worklog();
    let labels = |config: &SearchConfig| {
        let found = search("@company.id=1", &Results::from_config(config), &store).unwrap();
        found.groups().map(|(label, _)| label.to_string()).collect::<Vec<_>>()
    };

    assert_eq!(labels(&from_file), vec!["Companies"]);
    let mut fallback = SearchConfig::default();
    fallback.species = vec!["Company".to_string()];
    assert_eq!(labels(&from_file), labels(&fallback));
}
